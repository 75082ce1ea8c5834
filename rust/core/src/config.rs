// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion configuration loaded from environment variables.

use std::str::FromStr;

use kno_ifc_graph::DEFAULT_BASE;
use rust_decimal::Decimal;

use crate::source::KNOHOLEM_NS;

/// Conversion configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionConfig {
    /// Extrusion height of every wall face.
    pub wall_height: Decimal,
    /// Namespace stripped from source room and sensor IRIs.
    pub source_namespace: String,
    /// Base namespace of the generated nodes.
    pub output_namespace: String,
    /// Named graph the source queries read from, if any.
    pub source_graph: Option<String>,
    /// Build room fragments on the rayon pool.
    pub parallel: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            wall_height: Decimal::from(2),
            source_namespace: KNOHOLEM_NS.into(),
            output_namespace: DEFAULT_BASE.into(),
            source_graph: None,
            parallel: false,
        }
    }
}

impl ConversionConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup. Unset keys keep their
    /// defaults; unparsable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            wall_height: parsed(&lookup, "KNO_IFC_WALL_HEIGHT", defaults.wall_height),
            source_namespace: lookup("KNO_IFC_SOURCE_NS").unwrap_or(defaults.source_namespace),
            output_namespace: lookup("KNO_IFC_OUTPUT_NS").unwrap_or(defaults.output_namespace),
            source_graph: lookup("KNO_IFC_SOURCE_GRAPH")
                .filter(|s| !s.trim().is_empty())
                .or(defaults.source_graph),
            parallel: parsed(&lookup, "KNO_IFC_PARALLEL", defaults.parallel),
        }
    }
}

fn parsed<T: FromStr + std::fmt::Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default = %default, "ignoring invalid setting");
            default
        }),
        None => default,
    }
}
