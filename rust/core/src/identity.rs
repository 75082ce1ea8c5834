// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identity scheme for generated nodes.
//!
//! Every node the converter emits is named from its room (the scope), its
//! role, and positional indices. The naming convention lives behind the
//! [`Naming`] trait; the per-room [`IdentityAllocator`] hands out indices and
//! guarantees a name is never issued twice within one room. Uniqueness
//! across rooms is checked when a room's fragment is merged.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{Error, Result};

/// Axis of a coordinate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// The role a node plays within its room.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Room,
    Containment,
    /// 2D cartCoord placement list of the room.
    PlacementList,
    /// 2D placement point `k` of the room.
    PlacementPoint(usize),
    RoomBoundary,
    Wall(usize),
    EdgeBoundary(usize),
    ConnectionSurface(usize),
    BoundedPlane(usize),
    Face(usize),
    PointList { edge: usize, corner: usize },
    Point { edge: usize, corner: usize },
    CoordinateList { edge: usize, corner: usize, axis: Axis },
    /// A sensor keeps its source local name.
    Sensor(String),
    SensorPoint(String),
}

/// Indices that are handed out sequentially per room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    Edge,
    PlacementPoint,
}

/// A naming convention: turns (scope, role) into a local name.
pub trait Naming: Send + Sync {
    fn local_name(&self, scope: &str, role: &Role) -> String;
}

/// The underscore convention used by existing consumers of the output,
/// e.g. `Kitchen_boundary_2_point_3_z`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNaming;

impl Naming for DefaultNaming {
    fn local_name(&self, room: &str, role: &Role) -> String {
        match role {
            Role::Room => room.to_string(),
            Role::Containment => format!("Contained_In_{}", room),
            Role::PlacementList => format!("coords_of_{}", room),
            Role::PlacementPoint(k) => format!("{}_point_{}", room, k),
            Role::RoomBoundary => format!("{}_boundary", room),
            Role::Wall(i) => format!("{}_wall_{}", room, i),
            Role::EdgeBoundary(i) => format!("{}_boundary_{}", room, i),
            Role::ConnectionSurface(i) => format!("{}_boundary_{}_csg", room, i),
            Role::BoundedPlane(i) => format!("{}_boundary_{}_cbp", room, i),
            Role::Face(i) => format!("{}_boundary_{}_line", room, i),
            Role::PointList { edge, corner } => {
                format!("{}_boundary_{}_points_{}", room, edge, corner)
            }
            Role::Point { edge, corner } => format!("{}_boundary_{}_point_{}", room, edge, corner),
            Role::CoordinateList { edge, corner, axis } => format!(
                "{}_boundary_{}_point_{}_{}",
                room,
                edge,
                corner,
                axis.as_str()
            ),
            Role::Sensor(name) => name.clone(),
            Role::SensorPoint(name) => format!("{}_point", name),
        }
    }
}

/// Issues identities for one room.
pub struct IdentityAllocator<'n> {
    scope: String,
    naming: &'n dyn Naming,
    counters: FxHashMap<Counter, usize>,
    issued: FxHashSet<String>,
}

impl<'n> IdentityAllocator<'n> {
    pub fn new(scope: impl Into<String>, naming: &'n dyn Naming) -> Self {
        Self {
            scope: scope.into(),
            naming,
            counters: FxHashMap::default(),
            issued: FxHashSet::default(),
        }
    }

    /// The room this allocator names nodes for.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Returns the next index for a counter: 0, 1, 2, ...
    pub fn next_index(&mut self, counter: Counter) -> usize {
        let slot = self.counters.entry(counter).or_insert(0);
        let index = *slot;
        *slot += 1;
        index
    }

    /// Issues the identity for a role. Fails if the same name was already
    /// issued in this room.
    pub fn name(&mut self, role: &Role) -> Result<String> {
        let name = self.naming.local_name(&self.scope, role);
        if !self.issued.insert(name.clone()) {
            return Err(Error::IdentityCollision(name));
        }
        Ok(name)
    }

    /// Number of identities issued so far.
    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names() {
        let n = DefaultNaming;
        assert_eq!(n.local_name("R1", &Role::Room), "R1");
        assert_eq!(n.local_name("R1", &Role::Containment), "Contained_In_R1");
        assert_eq!(n.local_name("R1", &Role::PlacementList), "coords_of_R1");
        assert_eq!(n.local_name("R1", &Role::Wall(3)), "R1_wall_3");
        assert_eq!(n.local_name("R1", &Role::Face(0)), "R1_boundary_0_line");
        assert_eq!(
            n.local_name("R1", &Role::PointList { edge: 1, corner: 2 }),
            "R1_boundary_1_points_2"
        );
        assert_eq!(
            n.local_name(
                "R1",
                &Role::CoordinateList {
                    edge: 1,
                    corner: 2,
                    axis: Axis::Z
                }
            ),
            "R1_boundary_1_point_2_z"
        );
        assert_eq!(
            n.local_name("R1", &Role::SensorPoint("S9".into())),
            "S9_point"
        );
    }

    #[test]
    fn roles_never_collide_within_a_room() {
        let naming = DefaultNaming;
        let mut ids = IdentityAllocator::new("Room", &naming);
        let mut roles = vec![
            Role::Room,
            Role::Containment,
            Role::PlacementList,
            Role::RoomBoundary,
        ];
        for edge in 0..12 {
            roles.push(Role::PlacementPoint(edge));
            roles.push(Role::Wall(edge));
            roles.push(Role::EdgeBoundary(edge));
            roles.push(Role::ConnectionSurface(edge));
            roles.push(Role::BoundedPlane(edge));
            roles.push(Role::Face(edge));
            for corner in 0..4 {
                roles.push(Role::PointList { edge, corner });
                roles.push(Role::Point { edge, corner });
                for axis in Axis::ALL {
                    roles.push(Role::CoordinateList { edge, corner, axis });
                }
            }
        }

        for role in &roles {
            ids.name(role).unwrap();
        }
        assert_eq!(ids.issued(), roles.len());
    }

    #[test]
    fn reissuing_a_name_fails() {
        let naming = DefaultNaming;
        let mut ids = IdentityAllocator::new("Room", &naming);
        ids.name(&Role::Wall(0)).unwrap();
        let err = ids.name(&Role::Wall(0)).unwrap_err();
        assert!(matches!(err, Error::IdentityCollision(n) if n == "Room_wall_0"));

        // A sensor named like a generated node is caught too.
        let err = ids.name(&Role::Sensor("Room_wall_0".into())).unwrap_err();
        assert!(matches!(err, Error::IdentityCollision(_)));
    }

    #[test]
    fn counters_are_independent_and_monotonic() {
        let naming = DefaultNaming;
        let mut ids = IdentityAllocator::new("Room", &naming);
        assert_eq!(ids.next_index(Counter::Edge), 0);
        assert_eq!(ids.next_index(Counter::Edge), 1);
        assert_eq!(ids.next_index(Counter::PlacementPoint), 0);
        assert_eq!(ids.next_index(Counter::Edge), 2);
    }

    #[test]
    fn custom_naming_plugs_in() {
        struct Prefixed;
        impl Naming for Prefixed {
            fn local_name(&self, scope: &str, role: &Role) -> String {
                format!("x-{}", DefaultNaming.local_name(scope, role))
            }
        }

        let naming = Prefixed;
        let mut ids = IdentityAllocator::new("R", &naming);
        assert_eq!(ids.name(&Role::Wall(1)).unwrap(), "x-R_wall_1");
    }
}
