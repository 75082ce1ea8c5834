// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertical wall faces extruded from one perimeter edge.
//!
//! A face is an `IfcPolyline` whose four corners are `IfcCartesianPoint_List`
//! nodes chained by `hasNext` in the order (start, end, end raised, start
//! raised) and closed back to the first corner. Each point stores its x, y
//! and z as singleton `IfcLengthMeasure_List` nodes chained x → y → z.

use kno_ifc_graph::{Class, Datatype, GraphSink, Literal, NodeKey, Property};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::identity::{Axis, IdentityAllocator, Role};
use crate::perimeter::Point3;

/// Nodes emitted for one face.
#[derive(Debug, Clone, Copy)]
pub struct Face {
    /// The polyline that owns the corners.
    pub polyline: NodeKey,
    /// First corner's point list (the head of the `hasNext` loop).
    pub head: NodeKey,
    /// Point list nodes, in corner order.
    pub point_lists: [NodeKey; 4],
    /// Point nodes, in corner order.
    pub points: [NodeKey; 4],
}

/// Corners of the wall face over an edge: (start, end, end raised,
/// start raised).
pub fn face_corners(start: &Point3, end: &Point3, height: Decimal) -> [Point3; 4] {
    [*start, *end, end.raised(height), start.raised(height)]
}

/// Emits the face for perimeter edge `edge` running from `start` to `end`.
pub fn build_face<S: GraphSink>(
    sink: &mut S,
    ids: &mut IdentityAllocator<'_>,
    start: &Point3,
    end: &Point3,
    height: Decimal,
    edge: usize,
) -> Result<Face> {
    let polyline = sink.create(&ids.name(&Role::Face(edge))?, Class::IfcPolyline)?;

    let corners = face_corners(start, end, height);
    let mut point_lists = [NodeKey::default(); 4];
    let mut points = [NodeKey::default(); 4];

    for (corner, coord) in corners.iter().enumerate() {
        let list = sink.create(
            &ids.name(&Role::PointList { edge, corner })?,
            Class::IfcCartesianPointList,
        )?;
        sink.add(polyline, Property::Points, list.into())?;

        let point = build_point(sink, ids, coord, edge, corner)?;
        sink.add(list, Property::HasListContent, point.into())?;

        point_lists[corner] = list;
        points[corner] = point;
    }

    sink.link_chain(&point_lists, true)?;

    Ok(Face {
        polyline,
        head: point_lists[0],
        point_lists,
        points,
    })
}

/// Emits an `IfcCartesianPoint` with its x → y → z coordinate lists.
fn build_point<S: GraphSink>(
    sink: &mut S,
    ids: &mut IdentityAllocator<'_>,
    coord: &Point3,
    edge: usize,
    corner: usize,
) -> Result<NodeKey> {
    let point = sink.create(
        &ids.name(&Role::Point { edge, corner })?,
        Class::IfcCartesianPoint,
    )?;

    let mut lists = [NodeKey::default(); 3];
    for (slot, (axis, value)) in Axis::ALL
        .into_iter()
        .zip([coord.x, coord.y, coord.z])
        .enumerate()
    {
        let list = sink.create(
            &ids.name(&Role::CoordinateList { edge, corner, axis })?,
            Class::IfcLengthMeasureList,
        )?;
        sink.set(
            list,
            Property::HasListContent,
            Literal::typed(value.to_string(), Datatype::IfcLengthMeasure).into(),
        )?;
        lists[slot] = list;
    }

    sink.set(point, Property::Coordinates, lists[0].into())?;
    sink.link_chain(&lists, false)?;
    Ok(point)
}
