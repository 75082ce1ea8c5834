// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output vocabulary: ifcOWL classes and properties plus the cartCoord terms
//! used for flat 2D placements.
//!
//! Fast term checking uses enums instead of string comparison. Each term
//! knows its namespace, so full IRIs are only built when rendering.

use std::fmt;

/// ifcOWL namespace.
pub const IFC_NS: &str = "http://www.buildingsmart-tech.org/ifcOWL#";
/// cartCoord namespace (simple x/y/z points used for placements).
pub const CART_NS: &str = "http://purl.org/net/cartCoord#";
/// RDF Schema namespace.
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// XML Schema datatypes namespace.
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
/// `rdf:type`, linking each node to its class.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Node classes emitted by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Class {
    // Spatial structure
    IfcSpace,
    IfcRelContainedInSpatialStructure,
    IfcRelSpaceBoundary2ndLevel,

    // Elements
    IfcWallStandardCase,
    IfcSensor,
    IfcFlowMeter,

    // Boundary geometry
    IfcConnectionSurfaceGeometry,
    IfcCurveBoundedPlane,
    IfcPolyline,
    IfcCartesianPointList,
    IfcCartesianPoint,
    IfcLengthMeasureList,

    // cartCoord
    CartPointList,
    CartPoint,
}

impl Class {
    /// All classes, in declaration order.
    pub const ALL: [Class; 14] = [
        Class::IfcSpace,
        Class::IfcRelContainedInSpatialStructure,
        Class::IfcRelSpaceBoundary2ndLevel,
        Class::IfcWallStandardCase,
        Class::IfcSensor,
        Class::IfcFlowMeter,
        Class::IfcConnectionSurfaceGeometry,
        Class::IfcCurveBoundedPlane,
        Class::IfcPolyline,
        Class::IfcCartesianPointList,
        Class::IfcCartesianPoint,
        Class::IfcLengthMeasureList,
        Class::CartPointList,
        Class::CartPoint,
    ];

    /// Local name of the class within its namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            Class::IfcSpace => "IfcSpace",
            Class::IfcRelContainedInSpatialStructure => "IfcRelContainedInSpatialStructure",
            Class::IfcRelSpaceBoundary2ndLevel => "IfcRelSpaceBoundary2ndLevel",
            Class::IfcWallStandardCase => "IfcWallStandardCase",
            Class::IfcSensor => "IfcSensor",
            Class::IfcFlowMeter => "IfcFlowMeter",
            Class::IfcConnectionSurfaceGeometry => "IfcConnectionSurfaceGeometry",
            Class::IfcCurveBoundedPlane => "IfcCurveBoundedPlane",
            Class::IfcPolyline => "IfcPolyline",
            Class::IfcCartesianPointList => "IfcCartesianPoint_List",
            Class::IfcCartesianPoint => "IfcCartesianPoint",
            Class::IfcLengthMeasureList => "IfcLengthMeasure_List",
            Class::CartPointList => "Point_List",
            Class::CartPoint => "Point",
        }
    }

    /// Namespace the class lives in.
    pub fn namespace(&self) -> &'static str {
        match self {
            Class::CartPointList | Class::CartPoint => CART_NS,
            _ => IFC_NS,
        }
    }

    /// Full IRI of the class.
    pub fn iri(&self) -> String {
        format!("{}{}", self.namespace(), self.as_str())
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Properties (predicates) emitted by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    Label,

    // Containment
    RelatingStructure,
    RelatedElements,

    // Space boundaries
    RelatingSpace,
    RelatedBuildingElement,
    InnerBoundaries,
    ParentBoundary,
    ConnectionGeometry,
    SurfaceOnRelatingElement,
    OuterBoundary,
    Points,

    // Lists and points
    HasListContent,
    HasNext,
    Coordinates,

    // Sensors
    PredefinedTypeOfSensor,
    PredefinedTypeOfFlowMeter,

    // cartCoord
    HasPlacement,
    HasPoint,
    XCoord,
    YCoord,
}

impl Property {
    /// All properties, in declaration order.
    pub const ALL: [Property; 20] = [
        Property::Label,
        Property::RelatingStructure,
        Property::RelatedElements,
        Property::RelatingSpace,
        Property::RelatedBuildingElement,
        Property::InnerBoundaries,
        Property::ParentBoundary,
        Property::ConnectionGeometry,
        Property::SurfaceOnRelatingElement,
        Property::OuterBoundary,
        Property::Points,
        Property::HasListContent,
        Property::HasNext,
        Property::Coordinates,
        Property::PredefinedTypeOfSensor,
        Property::PredefinedTypeOfFlowMeter,
        Property::HasPlacement,
        Property::HasPoint,
        Property::XCoord,
        Property::YCoord,
    ];

    /// Local name of the property within its namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            Property::Label => "label",
            Property::RelatingStructure => "RelatingStructure_of_IfcRelContainedInSpatialStructure",
            Property::RelatedElements => "RelatedElements_of_IfcRelContainedInSpatialStructure",
            Property::RelatingSpace => "RelatingSpace",
            Property::RelatedBuildingElement => "RelatedBuildingElement",
            Property::InnerBoundaries => "InnerBoundaries",
            Property::ParentBoundary => "ParentBoundary",
            Property::ConnectionGeometry => "ConnectionGeometry",
            Property::SurfaceOnRelatingElement => "SurfaceOnRelatingElement",
            Property::OuterBoundary => "OuterBoundary",
            Property::Points => "Points",
            Property::HasListContent => "hasListContent",
            Property::HasNext => "hasNext",
            Property::Coordinates => "Coordinates",
            Property::PredefinedTypeOfSensor => "PredefinedType_of_IfcSensor",
            Property::PredefinedTypeOfFlowMeter => "PredefinedType_of_IfcFlowMeter",
            Property::HasPlacement => "hasPlacement",
            Property::HasPoint => "hasPoint",
            Property::XCoord => "xcoord",
            Property::YCoord => "ycoord",
        }
    }

    /// Namespace the property lives in.
    pub fn namespace(&self) -> &'static str {
        match self {
            Property::Label => RDFS_NS,
            Property::HasPlacement | Property::HasPoint | Property::XCoord | Property::YCoord => {
                CART_NS
            }
            _ => IFC_NS,
        }
    }

    /// Full IRI of the property.
    pub fn iri(&self) -> String {
        format!("{}{}", self.namespace(), self.as_str())
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literal datatypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datatype {
    /// Untyped string literal.
    Plain,
    /// `xsd:double`, used by cartCoord placements.
    XsdDouble,
    /// `ifc:IfcLengthMeasure`, used inside coordinate lists.
    IfcLengthMeasure,
}

impl Datatype {
    /// Full IRI of the datatype, or `None` for plain literals.
    pub fn iri(&self) -> Option<String> {
        match self {
            Datatype::Plain => None,
            Datatype::XsdDouble => Some(format!("{}double", XSD_NS)),
            Datatype::IfcLengthMeasure => Some(format!("{}IfcLengthMeasure", IFC_NS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_iris() {
        assert_eq!(
            Class::IfcSpace.iri(),
            "http://www.buildingsmart-tech.org/ifcOWL#IfcSpace"
        );
        assert_eq!(Class::CartPoint.iri(), "http://purl.org/net/cartCoord#Point");
        assert_eq!(
            Class::IfcCartesianPointList.iri(),
            "http://www.buildingsmart-tech.org/ifcOWL#IfcCartesianPoint_List"
        );
    }

    #[test]
    fn property_namespaces() {
        assert_eq!(
            Property::Label.iri(),
            "http://www.w3.org/2000/01/rdf-schema#label"
        );
        assert_eq!(
            Property::HasPlacement.iri(),
            "http://purl.org/net/cartCoord#hasPlacement"
        );
        assert_eq!(
            Property::PredefinedTypeOfFlowMeter.iri(),
            "http://www.buildingsmart-tech.org/ifcOWL#PredefinedType_of_IfcFlowMeter"
        );
    }

    #[test]
    fn property_names_are_unique() {
        for (i, a) in Property::ALL.iter().enumerate() {
            for b in &Property::ALL[i + 1..] {
                assert_ne!(a.iri(), b.iri());
            }
        }
    }

    #[test]
    fn datatype_iris() {
        assert_eq!(Datatype::Plain.iri(), None);
        assert_eq!(
            Datatype::XsdDouble.iri().as_deref(),
            Some("http://www.w3.org/2001/XMLSchema#double")
        );
    }
}
