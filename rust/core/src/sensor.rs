// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor kinds and sensor nodes.
//!
//! Source sensor kinds map onto an IFC entity (`IfcSensor` or
//! `IfcFlowMeter`) and a predefined type tag. Both lookups are total: an
//! unknown or missing kind becomes an `IfcSensor` tagged `UNDEFINED`.

use kno_ifc_graph::{Class, GraphSink, Literal, NodeKey, Property, Value, IFC_NS};

use crate::error::Result;
use crate::identity::{IdentityAllocator, Role};
use crate::placement::build_point_2d;
use crate::source::SensorRecord;

/// Predefined type used when a kind has no tag.
pub const UNDEFINED: &str = "UNDEFINED";

/// Source kind → predefined type tag.
const PREDEFINED_TYPES: [(&str, &str); 9] = [
    ("CO2Sensor", "CO2SENSOR"),
    ("EnergyMeter", "ENERGYMETER"),
    ("FireSensor", "FIRESENSOR"),
    ("AirFlowSensor", "WINDSENSOR"),
    ("WaterFlowSensor", "FLOWSENSOR"),
    ("HumiditySensor", "HUMIDITYSENSOR"),
    ("LuminanceSensor", "LIGHTSENSOR"),
    ("OpeningSensor", "CONTACTSENSOR"),
    ("TemperatureSensor", "TEMPERATURESENSOR"),
];

/// Source kinds that are not plain `IfcSensor`s.
const ENTITIES: [(&str, SensorEntity); 1] = [("EnergyMeter", SensorEntity::FlowMeter)];

/// The IFC entity a sensor becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SensorEntity {
    #[default]
    Sensor,
    FlowMeter,
}

impl SensorEntity {
    pub fn class(&self) -> Class {
        match self {
            SensorEntity::Sensor => Class::IfcSensor,
            SensorEntity::FlowMeter => Class::IfcFlowMeter,
        }
    }

    /// The attribute that carries the predefined type for this entity.
    pub fn predefined_type_property(&self) -> Property {
        match self {
            SensorEntity::Sensor => Property::PredefinedTypeOfSensor,
            SensorEntity::FlowMeter => Property::PredefinedTypeOfFlowMeter,
        }
    }
}

/// Predefined type tag for a source kind.
pub fn predefined_type(kind: &str) -> &'static str {
    PREDEFINED_TYPES
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or(UNDEFINED, |&(_, tag)| tag)
}

/// IFC entity for a source kind.
pub fn entity_kind(kind: &str) -> SensorEntity {
    ENTITIES
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or(SensorEntity::Sensor, |&(_, e)| e)
}

/// Resolved mapping of one source kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorMapping {
    pub entity: SensorEntity,
    pub predefined_type: &'static str,
}

impl SensorMapping {
    /// IRI of the predefined type enumeration value.
    pub fn predefined_type_iri(&self) -> String {
        format!("{}{}", IFC_NS, self.predefined_type)
    }
}

pub fn map_kind(kind: Option<&str>) -> SensorMapping {
    match kind {
        Some(kind) => SensorMapping {
            entity: entity_kind(kind),
            predefined_type: predefined_type(kind),
        },
        None => SensorMapping {
            entity: SensorEntity::Sensor,
            predefined_type: UNDEFINED,
        },
    }
}

/// Emits a sensor with its label, predefined type and placement point, and
/// registers it in `containment`.
pub fn build_sensor<S: GraphSink>(
    sink: &mut S,
    ids: &mut IdentityAllocator<'_>,
    containment: NodeKey,
    record: &SensorRecord,
) -> Result<NodeKey> {
    build(sink, ids, containment, record).map_err(|e| e.in_sensor(record.name.as_str()))
}

fn build<S: GraphSink>(
    sink: &mut S,
    ids: &mut IdentityAllocator<'_>,
    containment: NodeKey,
    record: &SensorRecord,
) -> Result<NodeKey> {
    let mapping = map_kind(record.kind.as_deref());
    if mapping.predefined_type == UNDEFINED {
        tracing::debug!(sensor = %record.name, kind = ?record.kind, "unmapped sensor kind");
    }

    let sensor = sink.create(
        &ids.name(&Role::Sensor(record.name.clone()))?,
        mapping.entity.class(),
    )?;
    sink.set(sensor, Property::Label, Literal::plain(record.label.as_str()).into())?;
    sink.set(
        sensor,
        mapping.entity.predefined_type_property(),
        Value::Iri(mapping.predefined_type_iri()),
    )?;
    sink.add(containment, Property::RelatedElements, sensor.into())?;

    let name = ids.name(&Role::SensorPoint(record.name.clone()))?;
    let point = build_point_2d(sink, &name, record.x, record.y)?;
    sink.set(sensor, Property::HasPlacement, point.into())?;

    Ok(sensor)
}
