// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Kno-IFC Core
//!
//! Converts a Knoholem building graph (rooms with 2D perimeters, sensors with
//! kinds and positions) into an ifcOWL graph of spaces bounded by extruded
//! wall faces.
//!
//! ## Overview
//!
//! - **Perimeter parsing**: `x1:y1;x2:y2;...` into exact decimal points with [nom](https://docs.rs/nom)
//! - **Identity scheme**: deterministic, collision-checked local names per room
//! - **Boundary assembly**: one wall, one space boundary and one 4-corner face per edge
//! - **Sensor mapping**: total lookup from source kinds to `IfcSensor`/`IfcFlowMeter` types
//! - **Population**: per-room fragments, optionally built in parallel with [rayon](https://docs.rs/rayon), merged in source order
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kno_ifc_core::{ConversionConfig, Converter, StaticSource};
//!
//! let source = StaticSource::from_path("building.json")?;
//! let converter = Converter::new(ConversionConfig::from_env());
//! let mut graph = converter.new_graph();
//! let report = converter.convert(&source, &mut graph)?;
//!
//! for failure in &report.failures {
//!     eprintln!("{}", failure.error);
//! }
//! ```

pub mod boundary;
pub mod config;
pub mod error;
pub mod face;
pub mod identity;
pub mod perimeter;
pub mod placement;
pub mod populate;
pub mod results;
pub mod sensor;
pub mod source;

pub use boundary::{build_room_geometry, EdgeGeometry, RoomGeometry};
pub use config::ConversionConfig;
pub use error::{Error, Result};
pub use face::{build_face, face_corners, Face};
pub use identity::{Axis, Counter, DefaultNaming, IdentityAllocator, Naming, Role};
pub use perimeter::{parse_coordinate, parse_perimeter, Perimeter, Point3};
pub use placement::{build_placement, build_point_2d};
pub use populate::{ConversionReport, Converter, RoomFailure, RoomSummary};
pub use results::{strip_namespace, ResultSet, Row, Term};
pub use sensor::{
    build_sensor, entity_kind, map_kind, predefined_type, SensorEntity, SensorMapping, UNDEFINED,
};
pub use source::{
    sensor_records, source_error, BuildingSource, QueryService, RoomRecord, SensorRecord,
    SparqlSource, StaticSource, KNOHOLEM_NS, OWL_NS,
};
