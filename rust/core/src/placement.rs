// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D placements in the cartCoord vocabulary.
//!
//! Rooms get a `cart:Point_List` with one `cart:Point` per perimeter vertex,
//! attached with ordered `cart:hasPoint` values. Sensors get a single point.

use kno_ifc_graph::{Class, Datatype, GraphSink, Literal, NodeKey, Property};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::identity::{Counter, IdentityAllocator, Role};
use crate::perimeter::Perimeter;

fn double(value: Decimal) -> Literal {
    Literal::typed(value.to_string(), Datatype::XsdDouble)
}

/// Emits a `cart:Point` with `xcoord`/`ycoord` literals.
pub fn build_point_2d<S: GraphSink>(
    sink: &mut S,
    identity: &str,
    x: Decimal,
    y: Decimal,
) -> Result<NodeKey> {
    let point = sink.create(identity, Class::CartPoint)?;
    sink.set(point, Property::XCoord, double(x).into())?;
    sink.set(point, Property::YCoord, double(y).into())?;
    Ok(point)
}

/// Emits the 2D outline of `place` and links it with `cart:hasPlacement`.
/// Returns the point list node.
pub fn build_placement<S: GraphSink>(
    sink: &mut S,
    ids: &mut IdentityAllocator<'_>,
    place: NodeKey,
    perimeter: &Perimeter,
) -> Result<NodeKey> {
    let list = sink.create(&ids.name(&Role::PlacementList)?, Class::CartPointList)?;
    sink.set(place, Property::HasPlacement, list.into())?;

    for vertex in perimeter.vertices() {
        let k = ids.next_index(Counter::PlacementPoint);
        let name = ids.name(&Role::PlacementPoint(k))?;
        let point = build_point_2d(sink, &name, vertex.x, vertex.y)?;
        sink.add(list, Property::HasPoint, point.into())?;
    }

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::DefaultNaming;
    use kno_ifc_graph::OutputGraph;

    #[test]
    fn outline_points_in_order() {
        let naming = DefaultNaming;
        let mut ids = IdentityAllocator::new("Hall", &naming);
        let mut graph = OutputGraph::default();
        let room = graph.create("Hall", Class::IfcSpace).unwrap();
        let perimeter = Perimeter::parse("0:0;4.5:0;4.5:3;").unwrap();

        let list = build_placement(&mut graph, &mut ids, room, &perimeter).unwrap();

        assert_eq!(graph.identity(list), Some("coords_of_Hall"));
        assert_eq!(graph.node_value(room, Property::HasPlacement), Some(list));

        let points = graph.node_values(list, Property::HasPoint);
        let names: Vec<_> = points.iter().map(|&p| graph.identity(p).unwrap()).collect();
        assert_eq!(names, ["Hall_point_0", "Hall_point_1", "Hall_point_2"]);

        let x = graph.literal(points[1], Property::XCoord).unwrap();
        assert_eq!(x.lexical, "4.5");
        assert_eq!(x.datatype, Datatype::XsdDouble);
        assert_eq!(graph.literal(points[2], Property::YCoord).unwrap().lexical, "3");
        let attributes: Vec<_> = graph
            .node(points[0])
            .unwrap()
            .attributes
            .iter()
            .map(|(p, _)| *p)
            .collect();
        assert_eq!(attributes, [Property::XCoord, Property::YCoord]);
    }

    #[test]
    fn single_point() {
        let mut graph = OutputGraph::default();
        let p = build_point_2d(&mut graph, "S1_point", Decimal::new(-15, 1), Decimal::ONE).unwrap();
        assert_eq!(graph.class_of(p), Some(Class::CartPoint));
        assert_eq!(graph.literal(p, Property::XCoord).unwrap().lexical, "-1.5");
    }
}
