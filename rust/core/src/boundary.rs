// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Space boundaries of a room.
//!
//! One `IfcRelSpaceBoundary2ndLevel` describes the whole room. It owns one
//! child boundary per perimeter edge; each child points at its wall and at
//! its face through the connection surface and bounded plane wrappers:
//!
//! ```text
//! room boundary ──InnerBoundaries──▶ edge boundary ──ParentBoundary──▶ room boundary
//!                                    ├─RelatedBuildingElement──▶ wall
//!                                    └─ConnectionGeometry──▶ csg ──▶ cbp ──▶ face
//! ```

use kno_ifc_graph::{Class, GraphSink, NodeKey, Property};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::face::{build_face, Face};
use crate::identity::{Counter, IdentityAllocator, Role};
use crate::perimeter::Perimeter;

/// Nodes emitted for one perimeter edge.
#[derive(Debug, Clone, Copy)]
pub struct EdgeGeometry {
    pub wall: NodeKey,
    pub boundary: NodeKey,
    pub connection_surface: NodeKey,
    pub bounded_plane: NodeKey,
    pub face: Face,
}

/// Nodes emitted for a room's boundary.
#[derive(Debug, Clone)]
pub struct RoomGeometry {
    pub boundary: NodeKey,
    pub edges: Vec<EdgeGeometry>,
}

impl RoomGeometry {
    /// Wall nodes, in perimeter order.
    pub fn walls(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.edges.iter().map(|e| e.wall)
    }
}

/// Emits the room boundary, one wall and one edge boundary per perimeter
/// edge, and registers every wall in `containment`.
///
/// Edge `i` runs from vertex `i` to vertex `i + 1`, wrapping to vertex 0.
pub fn build_room_geometry<S: GraphSink>(
    sink: &mut S,
    ids: &mut IdentityAllocator<'_>,
    room: NodeKey,
    containment: NodeKey,
    perimeter: &Perimeter,
    height: Decimal,
) -> Result<RoomGeometry> {
    let boundary = sink.create(
        &ids.name(&Role::RoomBoundary)?,
        Class::IfcRelSpaceBoundary2ndLevel,
    )?;
    sink.set(boundary, Property::RelatingSpace, room.into())?;

    let closed = perimeter.closed();
    let mut edges = Vec::with_capacity(perimeter.len());

    for pair in closed.windows(2) {
        let i = ids.next_index(Counter::Edge);

        let wall = sink.create(&ids.name(&Role::Wall(i))?, Class::IfcWallStandardCase)?;
        sink.add(containment, Property::RelatedElements, wall.into())?;

        let edge_boundary = sink.create(
            &ids.name(&Role::EdgeBoundary(i))?,
            Class::IfcRelSpaceBoundary2ndLevel,
        )?;
        sink.set(edge_boundary, Property::RelatedBuildingElement, wall.into())?;
        sink.add(boundary, Property::InnerBoundaries, edge_boundary.into())?;
        sink.add(edge_boundary, Property::ParentBoundary, boundary.into())?;

        let connection_surface = sink.create(
            &ids.name(&Role::ConnectionSurface(i))?,
            Class::IfcConnectionSurfaceGeometry,
        )?;
        sink.set(
            edge_boundary,
            Property::ConnectionGeometry,
            connection_surface.into(),
        )?;

        let bounded_plane = sink.create(
            &ids.name(&Role::BoundedPlane(i))?,
            Class::IfcCurveBoundedPlane,
        )?;
        sink.set(
            connection_surface,
            Property::SurfaceOnRelatingElement,
            bounded_plane.into(),
        )?;

        let face = build_face(sink, ids, &pair[0], &pair[1], height, i)?;
        sink.set(bounded_plane, Property::OuterBoundary, face.polyline.into())?;

        tracing::debug!(room = ids.scope(), edge = i, "built wall face");

        edges.push(EdgeGeometry {
            wall,
            boundary: edge_boundary,
            connection_surface,
            bounded_plane,
            face,
        });
    }

    Ok(RoomGeometry { boundary, edges })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::DefaultNaming;
    use kno_ifc_graph::OutputGraph;

    fn setup(graph: &mut OutputGraph) -> (NodeKey, NodeKey) {
        let room = graph.create("R", Class::IfcSpace).unwrap();
        let rel = graph
            .create("Contained_In_R", Class::IfcRelContainedInSpatialStructure)
            .unwrap();
        (room, rel)
    }

    #[test]
    fn one_boundary_and_wall_per_edge() {
        let naming = DefaultNaming;
        let mut ids = IdentityAllocator::new("R", &naming);
        let mut graph = OutputGraph::default();
        let (room, rel) = setup(&mut graph);
        let perimeter = Perimeter::parse("0:0;6:0;6:4;3:6;0:4;").unwrap();

        let geometry =
            build_room_geometry(&mut graph, &mut ids, room, rel, &perimeter, Decimal::from(2))
                .unwrap();

        assert_eq!(geometry.edges.len(), 5);
        assert_eq!(graph.count_of_class(Class::IfcWallStandardCase), 5);
        assert_eq!(graph.count_of_class(Class::IfcPolyline), 5);
        assert_eq!(graph.count_of_class(Class::IfcCartesianPoint), 20);
        // room boundary + 5 edge boundaries
        assert_eq!(graph.count_of_class(Class::IfcRelSpaceBoundary2ndLevel), 6);

        assert_eq!(
            graph.node_values(geometry.boundary, Property::InnerBoundaries),
            geometry.edges.iter().map(|e| e.boundary).collect::<Vec<_>>()
        );
        assert_eq!(
            graph.node_values(rel, Property::RelatedElements),
            geometry.walls().collect::<Vec<_>>()
        );
        assert_eq!(
            graph.node_value(geometry.boundary, Property::RelatingSpace),
            Some(room)
        );
    }

    #[test]
    fn edge_links_are_consistent() {
        let naming = DefaultNaming;
        let mut ids = IdentityAllocator::new("R", &naming);
        let mut graph = OutputGraph::default();
        let (room, rel) = setup(&mut graph);
        let perimeter = Perimeter::parse("0:0;1:0;0:1;").unwrap();

        let geometry =
            build_room_geometry(&mut graph, &mut ids, room, rel, &perimeter, Decimal::ONE)
                .unwrap();

        for (i, edge) in geometry.edges.iter().enumerate() {
            assert_eq!(graph.identity(edge.wall), Some(format!("R_wall_{}", i).as_str()));
            assert_eq!(
                graph.node_value(edge.boundary, Property::ParentBoundary),
                Some(geometry.boundary)
            );
            assert_eq!(
                graph.node_value(edge.boundary, Property::RelatedBuildingElement),
                Some(edge.wall)
            );
            let csg = graph
                .node_value(edge.boundary, Property::ConnectionGeometry)
                .unwrap();
            let cbp = graph
                .node_value(csg, Property::SurfaceOnRelatingElement)
                .unwrap();
            let line = graph.node_value(cbp, Property::OuterBoundary).unwrap();
            assert_eq!(line, edge.face.polyline);
            assert_eq!(graph.class_of(csg), Some(Class::IfcConnectionSurfaceGeometry));
            assert_eq!(graph.class_of(cbp), Some(Class::IfcCurveBoundedPlane));
        }
    }

    #[test]
    fn last_edge_closes_the_polygon() {
        let naming = DefaultNaming;
        let mut ids = IdentityAllocator::new("R", &naming);
        let mut graph = OutputGraph::default();
        let (room, rel) = setup(&mut graph);
        let perimeter = Perimeter::parse("0:0;10:0;10:10;0:10;").unwrap();

        let geometry =
            build_room_geometry(&mut graph, &mut ids, room, rel, &perimeter, Decimal::from(2))
                .unwrap();

        let last = geometry.edges.last().unwrap();
        let start = graph.node_value(last.face.points[0], Property::Coordinates).unwrap();
        let end = graph.node_value(last.face.points[1], Property::Coordinates).unwrap();
        let lexical = |x| -> Vec<String> {
            graph
                .chain(x)
                .map(|l| graph.literal(l, Property::HasListContent).unwrap().lexical.clone())
                .collect()
        };
        assert_eq!(lexical(start), ["0", "10", "0"]);
        assert_eq!(lexical(end), ["0", "0", "0"]);
    }
}
