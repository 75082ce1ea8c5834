// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the conversion engine.

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a building graph.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A perimeter segment is not of the form `x:y`.
    #[error("malformed perimeter segment {index} {segment:?} ({reason}) in {raw:?}")]
    MalformedSegment {
        index: usize,
        segment: String,
        reason: &'static str,
        raw: String,
    },

    /// A perimeter needs at least three distinct vertices.
    #[error("perimeter has {vertices} distinct vertices, at least 3 are required: {raw:?}")]
    DegeneratePerimeter { vertices: usize, raw: String },

    /// A scalar coordinate could not be parsed as a decimal.
    #[error("invalid {field} coordinate {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },

    /// An identifier does not start with the expected namespace.
    #[error("{iri} is not in namespace {namespace}")]
    NamespaceMismatch { iri: String, namespace: String },

    /// A result row lacks a variable the query selects.
    #[error("missing binding ?{0}")]
    MissingBinding(String),

    /// A result row binds a variable to the wrong kind of term.
    #[error("binding ?{var} is a {found}, expected {expected}")]
    UnexpectedTerm {
        var: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The identity scheme produced the same name twice for one room.
    #[error("identity already issued: {0}")]
    IdentityCollision(String),

    /// The source query layer failed.
    #[error("source query failed: {0}")]
    Source(String),

    /// Failure while converting one room.
    #[error("room {room}: {source}")]
    Room {
        room: String,
        #[source]
        source: Box<Error>,
    },

    /// Failure while converting one sensor.
    #[error("sensor {sensor}: {source}")]
    Sensor {
        sensor: String,
        #[source]
        source: Box<Error>,
    },

    #[error("output graph: {0}")]
    Graph(#[from] kno_ifc_graph::Error),

    #[error("invalid source document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wraps an error with the room it happened in.
    pub fn in_room(self, room: impl Into<String>) -> Self {
        Error::Room {
            room: room.into(),
            source: Box::new(self),
        }
    }

    /// Wraps an error with the sensor it happened in.
    pub fn in_sensor(self, sensor: impl Into<String>) -> Self {
        Error::Sensor {
            sensor: sensor.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping room and sensor context.
    pub fn root(&self) -> &Error {
        let mut err = self;
        while let Error::Room { source, .. } | Error::Sensor { source, .. } = err {
            err = &**source;
        }
        err
    }
}
