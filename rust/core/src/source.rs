// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building sources: where room and sensor rows come from.
//!
//! The converter asks two questions of a building graph: which rooms exist
//! (with perimeter and name), and which sensors belong to a room (with kind,
//! name and 2D position). [`SparqlSource`] phrases them as SPARQL over a
//! [`QueryService`]; [`StaticSource`] answers them from preloaded result
//! documents.

use std::path::Path;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::perimeter::parse_coordinate;
use crate::results::{strip_namespace, ResultSet, Row};

/// Namespace of the Knoholem building ontology.
pub const KNOHOLEM_NS: &str = "http://www.semanticweb.org/ontologies/2012/9/knoholem.owl#";
/// OWL namespace; types in it (e.g. `owl:NamedIndividual`) are never a sensor kind.
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";

/// A remote store that answers `SELECT` queries.
///
/// Implementations report transport or endpoint failures as
/// [`Error::Source`].
pub trait QueryService {
    fn select(&self, query: &str) -> Result<ResultSet>;
}

/// Rows describing a building.
///
/// `rooms` rows bind `?room` (IRI), `?perim` and `?name`. `sensors` rows bind
/// `?sensor` (IRI), `?type` (IRI), `?name`, `?x` and `?y`, one row per
/// (sensor, type) pair.
pub trait BuildingSource {
    fn rooms(&self) -> Result<Vec<Row>>;
    fn sensors(&self, room_iri: &str) -> Result<Vec<Row>>;
}

/// Asks a SPARQL endpoint for rooms and sensors.
pub struct SparqlSource<Q> {
    service: Q,
    namespace: String,
    graph: Option<String>,
}

impl<Q: QueryService> SparqlSource<Q> {
    pub fn new(service: Q, namespace: impl Into<String>, graph: Option<String>) -> Self {
        Self {
            service,
            namespace: namespace.into(),
            graph,
        }
    }

    fn prologue(&self) -> String {
        format!(
            "PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>\n\
             PREFIX knoholem: <{}>\n\
             PREFIX owl: <{}>\n",
            self.namespace, OWL_NS
        )
    }

    fn dataset(&self) -> String {
        match &self.graph {
            Some(graph) => format!("FROM <{}>\n", graph),
            None => String::new(),
        }
    }

    pub fn rooms_query(&self) -> String {
        format!(
            "{}SELECT ?room ?perim ?name\n{}WHERE {{\n  \
             ?room rdf:type knoholem:Room .\n  \
             ?room knoholem:hasPerimeter ?perim .\n  \
             ?room knoholem:hasName ?name\n}}",
            self.prologue(),
            self.dataset()
        )
    }

    pub fn sensors_query(&self, room_iri: &str) -> String {
        format!(
            "{}SELECT ?sensor ?type ?name ?x ?y\n{}WHERE {{\n  \
             ?sensor knoholem:isSensorOf <{}> .\n  \
             ?sensor rdf:type ?type .\n  \
             ?sensor knoholem:hasName ?name .\n  \
             ?sensor knoholem:hasPlacement ?pos .\n  \
             ?pos knoholem:hasXCoord ?x .\n  \
             ?pos knoholem:hasYCoord ?y\n}}",
            self.prologue(),
            self.dataset(),
            room_iri
        )
    }
}

impl<Q: QueryService> BuildingSource for SparqlSource<Q> {
    fn rooms(&self) -> Result<Vec<Row>> {
        Ok(self.service.select(&self.rooms_query())?.into_rows())
    }

    fn sensors(&self, room_iri: &str) -> Result<Vec<Row>> {
        Ok(self.service.select(&self.sensors_query(room_iri))?.into_rows())
    }
}

/// Preloaded result documents: the rooms result plus one sensors result per
/// room IRI. Rooms without an entry have no sensors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticSource {
    pub rooms: ResultSet,
    #[serde(default)]
    pub sensors: FxHashMap<String, ResultSet>,
}

impl StaticSource {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

impl BuildingSource for StaticSource {
    fn rooms(&self) -> Result<Vec<Row>> {
        Ok(self.rooms.rows().to_vec())
    }

    fn sensors(&self, room_iri: &str) -> Result<Vec<Row>> {
        Ok(self
            .sensors
            .get(room_iri)
            .map(|set| set.rows().to_vec())
            .unwrap_or_default())
    }
}

/// A room as read from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    pub iri: String,
    /// Local name within the source namespace.
    pub name: String,
    pub label: String,
    /// Raw perimeter string, parsed later.
    pub perimeter: String,
}

impl RoomRecord {
    pub fn from_row(row: &Row, namespace: &str) -> Result<Self> {
        let iri = row.uri("room")?;
        Ok(Self {
            iri: iri.to_string(),
            name: strip_namespace(iri, namespace)?.to_string(),
            label: row.literal("name")?.to_string(),
            perimeter: row.literal("perim")?.to_string(),
        })
    }
}

/// A sensor as read from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorRecord {
    pub iri: String,
    pub name: String,
    pub label: String,
    /// Local name of the sensor's kind, if it has one in the source namespace.
    pub kind: Option<String>,
    pub x: Decimal,
    pub y: Decimal,
}

/// Groups sensor rows into one record per sensor, in first-seen order.
///
/// Label and position come from a sensor's first row. The kind is the first
/// `?type` outside the OWL namespace; a type from another namespace leaves the
/// kind unset.
pub fn sensor_records(rows: &[Row], namespace: &str) -> Result<Vec<SensorRecord>> {
    let mut records: Vec<SensorRecord> = Vec::new();
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    // Sensors whose kind has been decided, including the "no kind" decision.
    let mut typed: Vec<bool> = Vec::new();

    for row in rows {
        let iri = row.uri("sensor")?;
        let slot = match index.get(iri) {
            Some(&slot) => slot,
            None => {
                let record = sensor_record(row, iri, namespace)
                    .map_err(|e| e.in_sensor(iri))?;
                index.insert(iri.to_string(), records.len());
                records.push(record);
                typed.push(false);
                records.len() - 1
            }
        };

        if typed[slot] {
            continue;
        }
        let ty = row.uri("type").map_err(|e| e.in_sensor(iri))?;
        if ty.starts_with(OWL_NS) {
            continue;
        }
        records[slot].kind = strip_namespace(ty, namespace).ok().map(str::to_string);
        typed[slot] = true;
    }

    Ok(records)
}

fn sensor_record(row: &Row, iri: &str, namespace: &str) -> Result<SensorRecord> {
    Ok(SensorRecord {
        iri: iri.to_string(),
        name: strip_namespace(iri, namespace)?.to_string(),
        label: row.literal("name")?.to_string(),
        kind: None,
        x: parse_coordinate("x", row.literal("x")?)?,
        y: parse_coordinate("y", row.literal("y")?)?,
    })
}

/// Wraps a transport failure so it aborts the run.
pub fn source_error(err: impl std::fmt::Display) -> Error {
    Error::Source(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::Term;
    use std::cell::RefCell;

    const NS: &str = KNOHOLEM_NS;

    fn sensor_row(name: &str, ty: &str, x: &str) -> Row {
        [
            ("sensor", Term::uri(format!("{NS}{name}"))),
            ("type", Term::uri(ty)),
            ("name", Term::literal(format!("{name} label"))),
            ("x", Term::literal(x)),
            ("y", Term::literal("2")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn groups_sensor_rows_in_first_seen_order() {
        let named = format!("{OWL_NS}NamedIndividual");
        let temp = format!("{NS}TemperatureSensor");
        let co2 = format!("{NS}CO2Sensor");
        let rows = vec![
            sensor_row("S2", &named, "1"),
            sensor_row("S1", &co2, "0.5"),
            sensor_row("S2", &temp, "1"),
            sensor_row("S2", &co2, "1"),
            sensor_row("S3", &named, "3"),
        ];

        let records = sensor_records(&rows, NS).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["S2", "S1", "S3"]);
        assert_eq!(records[0].kind.as_deref(), Some("TemperatureSensor"));
        assert_eq!(records[1].kind.as_deref(), Some("CO2Sensor"));
        assert_eq!(records[1].x, Decimal::new(5, 1));
        assert_eq!(records[2].kind, None);
        assert_eq!(records[0].label, "S2 label");
    }

    #[test]
    fn foreign_type_leaves_kind_unset() {
        let rows = vec![sensor_row("S1", "http://other.org/Sensor", "1")];
        let records = sensor_records(&rows, NS).unwrap();
        assert_eq!(records[0].kind, None);
    }

    #[test]
    fn bad_coordinate_names_the_sensor() {
        let rows = vec![sensor_row("S1", &format!("{NS}CO2Sensor"), "north")];
        let err = sensor_records(&rows, NS).unwrap_err();
        assert!(err.to_string().starts_with(&format!("sensor {NS}S1:")));
        assert!(matches!(err.root(), Error::InvalidCoordinate { field: "x", .. }));
    }

    #[test]
    fn room_record_from_row() {
        let row: Row = [
            ("room", Term::uri(format!("{NS}Office_1"))),
            ("perim", Term::literal("0:0;1:0;1:1;")),
            ("name", Term::literal("Office 1")),
        ]
        .into_iter()
        .collect();

        let room = RoomRecord::from_row(&row, NS).unwrap();
        assert_eq!(room.name, "Office_1");
        assert_eq!(room.label, "Office 1");
        assert!(matches!(
            RoomRecord::from_row(&row, "http://elsewhere/#"),
            Err(Error::NamespaceMismatch { .. })
        ));
    }

    struct Recording {
        queries: RefCell<Vec<String>>,
    }

    impl QueryService for Recording {
        fn select(&self, query: &str) -> Result<ResultSet> {
            self.queries.borrow_mut().push(query.to_string());
            Ok(ResultSet::default())
        }
    }

    #[test]
    fn sparql_source_renders_queries() {
        let service = Recording {
            queries: RefCell::new(Vec::new()),
        };
        let source = SparqlSource::new(service, NS, Some("http://graphs/building".into()));

        assert!(source.rooms().unwrap().is_empty());
        source.sensors(&format!("{NS}Office_1")).unwrap();

        let queries = source.service.queries.borrow();
        assert!(queries[0].contains("SELECT ?room ?perim ?name"));
        assert!(queries[0].contains("FROM <http://graphs/building>"));
        assert!(queries[0].contains("knoholem:hasPerimeter"));
        assert!(queries[1].contains(&format!("?sensor knoholem:isSensorOf <{NS}Office_1>")));
        assert!(queries[1].contains("?pos knoholem:hasYCoord ?y"));
    }

    #[test]
    fn failing_service_aborts() {
        struct Down;
        impl QueryService for Down {
            fn select(&self, _: &str) -> Result<ResultSet> {
                Err(source_error("connection refused"))
            }
        }
        let source = SparqlSource::new(Down, NS, None);
        assert!(matches!(source.rooms(), Err(Error::Source(m)) if m == "connection refused"));
        assert!(!source.rooms_query().contains("FROM"));
    }

    #[test]
    fn static_source_from_json() {
        let source = StaticSource::from_json(&format!(
            r#"{{
                "rooms": {{ "results": {{ "bindings": [] }} }},
                "sensors": {{
                    "{NS}R1": {{ "results": {{ "bindings": [
                        {{ "sensor": {{ "type": "uri", "value": "{NS}S1" }} }}
                    ] }} }}
                }}
            }}"#
        ))
        .unwrap();
        assert!(source.rooms().unwrap().is_empty());
        assert_eq!(source.sensors(&format!("{NS}R1")).unwrap().len(), 1);
        assert!(source.sensors(&format!("{NS}R2")).unwrap().is_empty());
    }
}
