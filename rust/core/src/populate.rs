// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room and sensor population.
//!
//! A run fetches every room row and its sensor rows up front, builds one
//! fragment per room with room-local identities, and merges the fragments
//! into the output graph in source order. A room that fails anywhere (bad
//! perimeter, bad sensor, identity clash at merge time) contributes nothing
//! and is reported; the run continues with the next room.

use kno_ifc_graph::{Class, GraphSink, Literal, OutputGraph, Property};
use rayon::prelude::*;

use crate::boundary::build_room_geometry;
use crate::config::ConversionConfig;
use crate::error::{Error, Result};
use crate::identity::{DefaultNaming, IdentityAllocator, Naming, Role};
use crate::perimeter::Perimeter;
use crate::placement::build_placement;
use crate::results::Row;
use crate::sensor::build_sensor;
use crate::source::{sensor_records, BuildingSource, RoomRecord};

/// What one converted room contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub name: String,
    pub iri: String,
    pub walls: usize,
    pub sensors: usize,
    /// Nodes emitted for the room, geometry and sensors included.
    pub nodes: usize,
}

/// A room that was skipped, with the reason.
#[derive(Debug)]
pub struct RoomFailure {
    pub room: String,
    pub error: Error,
}

/// Outcome of a conversion run.
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub rooms: Vec<RoomSummary>,
    pub failures: Vec<RoomFailure>,
}

impl ConversionReport {
    /// True when every room converted.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn walls(&self) -> usize {
        self.rooms.iter().map(|r| r.walls).sum()
    }

    pub fn sensors(&self) -> usize {
        self.rooms.iter().map(|r| r.sensors).sum()
    }
}

/// A room whose rows have been fetched, ready to build.
struct PendingRoom {
    record: RoomRecord,
    sensors: Vec<Row>,
}

/// Converts building sources into ifcOWL output graphs.
pub struct Converter<N = DefaultNaming> {
    config: ConversionConfig,
    naming: N,
}

impl Converter<DefaultNaming> {
    pub fn new(config: ConversionConfig) -> Self {
        Self::with_naming(config, DefaultNaming)
    }
}

impl Default for Converter<DefaultNaming> {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}

impl<N: Naming> Converter<N> {
    pub fn with_naming(config: ConversionConfig, naming: N) -> Self {
        Self { config, naming }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// An empty graph in the configured output namespace.
    pub fn new_graph(&self) -> OutputGraph {
        OutputGraph::new(self.config.output_namespace.as_str())
    }

    /// Converts every room of `source` into `graph`.
    ///
    /// Only a source failure aborts the run; room failures end up in the
    /// report.
    pub fn convert<B: BuildingSource + ?Sized>(
        &self,
        source: &B,
        graph: &mut OutputGraph,
    ) -> Result<ConversionReport> {
        let start = std::time::Instant::now();
        let mut report = ConversionReport::default();

        let rows = source.rooms()?;
        tracing::info!(rooms = rows.len(), parallel = self.config.parallel, "Starting conversion");

        // Fetch everything before building so the build phase never waits on
        // the source.
        let mut pending = Vec::with_capacity(rows.len());
        for row in &rows {
            match RoomRecord::from_row(row, &self.config.source_namespace) {
                Ok(record) => {
                    let sensors = source.sensors(&record.iri)?;
                    pending.push(PendingRoom { record, sensors });
                }
                Err(err) => {
                    let room = row
                        .get("room")
                        .map(|t| t.value().to_string())
                        .unwrap_or_else(|| "<unbound>".to_string());
                    fail(&mut report, room, err);
                }
            }
        }

        let built: Vec<Result<(OutputGraph, RoomSummary)>> = if self.config.parallel {
            pending.par_iter().map(|room| self.build_pending(room)).collect()
        } else {
            pending.iter().map(|room| self.build_pending(room)).collect()
        };

        for (room, outcome) in pending.iter().zip(built) {
            let merged = outcome.and_then(|(fragment, summary)| {
                graph.merge(fragment)?;
                Ok(summary)
            });
            match merged {
                Ok(summary) => {
                    tracing::info!(
                        room = %summary.name,
                        walls = summary.walls,
                        sensors = summary.sensors,
                        nodes = summary.nodes,
                        "Converted room"
                    );
                    report.rooms.push(summary);
                }
                Err(err) => fail(&mut report, room.record.name.clone(), err),
            }
        }

        tracing::info!(
            converted = report.rooms.len(),
            failed = report.failures.len(),
            walls = report.walls(),
            sensors = report.sensors(),
            nodes = graph.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Conversion complete"
        );
        Ok(report)
    }

    fn build_pending(&self, room: &PendingRoom) -> Result<(OutputGraph, RoomSummary)> {
        self.build_room(&room.record, &room.sensors)
    }

    /// Builds the fragment of one room: the space, its containment relation,
    /// 2D outline, wall boundaries and sensors.
    ///
    /// The perimeter and the sensor rows are validated before any node is
    /// created.
    pub fn build_room(
        &self,
        record: &RoomRecord,
        sensor_rows: &[Row],
    ) -> Result<(OutputGraph, RoomSummary)> {
        let perimeter = Perimeter::parse(&record.perimeter)?;
        let sensors = sensor_records(sensor_rows, &self.config.source_namespace)?;

        let mut fragment = self.new_graph();
        let mut ids = IdentityAllocator::new(record.name.as_str(), &self.naming);

        let room = fragment.create(&ids.name(&Role::Room)?, Class::IfcSpace)?;
        fragment.set(room, Property::Label, Literal::plain(record.label.as_str()).into())?;

        let containment = fragment.create(
            &ids.name(&Role::Containment)?,
            Class::IfcRelContainedInSpatialStructure,
        )?;
        fragment.set(containment, Property::RelatingStructure, room.into())?;

        build_placement(&mut fragment, &mut ids, room, &perimeter)?;
        let geometry = build_room_geometry(
            &mut fragment,
            &mut ids,
            room,
            containment,
            &perimeter,
            self.config.wall_height,
        )?;

        for sensor in &sensors {
            build_sensor(&mut fragment, &mut ids, containment, sensor)?;
        }

        let summary = RoomSummary {
            name: record.name.clone(),
            iri: record.iri.clone(),
            walls: geometry.edges.len(),
            sensors: sensors.len(),
            nodes: fragment.len(),
        };
        Ok((fragment, summary))
    }
}

fn fail(report: &mut ConversionReport, room: String, err: Error) {
    let error = err.in_room(room.as_str());
    tracing::warn!(room = %room, error = %error, "Skipping room");
    report.failures.push(RoomFailure { room, error });
}
