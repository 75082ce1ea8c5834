// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! N-Triples output for an [`OutputGraph`].
//!
//! Nodes are written in insertion order: one `rdf:type` triple, then one
//! triple per attribute value in the order the values were added.

use std::io::Write;

use crate::arena::{Literal, OutputGraph, Value};
use crate::error::{Error, Result};
use crate::vocab::RDF_TYPE;

impl OutputGraph {
    /// Writes every node as N-Triples and returns the number of triples.
    pub fn write_ntriples<W: Write>(&self, mut out: W) -> Result<usize> {
        let mut triples = 0;

        for (_, node) in self.iter() {
            let subject = format!("{}{}", self.base(), node.identity);
            writeln!(out, "<{}> <{}> <{}> .", subject, RDF_TYPE, node.class.iri())?;
            triples += 1;

            for (property, values) in &node.attributes {
                let predicate = property.iri();
                for value in values {
                    let object = match value {
                        Value::Node(target) => {
                            let iri = self.iri(*target).ok_or(Error::NodeNotFound(*target))?;
                            format!("<{}>", iri)
                        }
                        Value::Iri(iri) => format!("<{}>", iri),
                        Value::Literal(literal) => literal_term(literal),
                    };
                    writeln!(out, "<{}> <{}> {} .", subject, predicate, object)?;
                    triples += 1;
                }
            }
        }

        out.flush()?;
        Ok(triples)
    }
}

/// Renders a literal as a quoted string, with `^^<datatype>` when typed.
fn literal_term(literal: &Literal) -> String {
    let mut term = String::with_capacity(literal.lexical.len() + 2);
    term.push('"');
    for c in literal.lexical.chars() {
        match c {
            '\\' => term.push_str("\\\\"),
            '"' => term.push_str("\\\""),
            '\n' => term.push_str("\\n"),
            '\r' => term.push_str("\\r"),
            _ => term.push(c),
        }
    }
    term.push('"');

    if let Some(datatype) = literal.datatype.iri() {
        term.push_str("^^<");
        term.push_str(&datatype);
        term.push('>');
    }
    term
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::GraphSink;
    use crate::vocab::{Class, Datatype, Property};

    #[test]
    fn writes_small_fragment() {
        let mut graph = OutputGraph::new("http://example.org/b#");
        let room = graph.create("Hall", Class::IfcSpace).unwrap();
        graph
            .set(room, Property::Label, Literal::plain("Hall \"A\"\nnorth").into())
            .unwrap();
        let point = graph.create("Hall_point_0", Class::CartPoint).unwrap();
        graph
            .set(point, Property::XCoord, Literal::typed("4.5", Datatype::XsdDouble).into())
            .unwrap();
        graph.set(room, Property::HasPlacement, point.into()).unwrap();

        let mut out = Vec::new();
        let triples = graph.write_ntriples(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(triples, 5);
        assert_eq!(
            lines,
            [
                "<http://example.org/b#Hall> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.buildingsmart-tech.org/ifcOWL#IfcSpace> .",
                "<http://example.org/b#Hall> <http://www.w3.org/2000/01/rdf-schema#label> \"Hall \\\"A\\\"\\nnorth\" .",
                "<http://example.org/b#Hall> <http://purl.org/net/cartCoord#hasPlacement> <http://example.org/b#Hall_point_0> .",
                "<http://example.org/b#Hall_point_0> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://purl.org/net/cartCoord#Point> .",
                "<http://example.org/b#Hall_point_0> <http://purl.org/net/cartCoord#xcoord> \"4.5\"^^<http://www.w3.org/2001/XMLSchema#double> .",
            ]
        );
    }

    #[test]
    fn external_iris_and_ordered_values() {
        let mut graph = OutputGraph::default();
        let sensor = graph.create("T1", Class::IfcSensor).unwrap();
        let iri = Value::Iri("http://www.buildingsmart-tech.org/ifcOWL#TEMPERATURESENSOR".into());
        graph.set(sensor, Property::PredefinedTypeOfSensor, iri).unwrap();
        let rel = graph
            .create("Contained_In_R", Class::IfcRelContainedInSpatialStructure)
            .unwrap();
        let wall = graph.create("R_wall_0", Class::IfcWallStandardCase).unwrap();
        graph.add(rel, Property::RelatedElements, wall.into()).unwrap();
        graph.add(rel, Property::RelatedElements, sensor.into()).unwrap();

        let mut out = Vec::new();
        assert_eq!(graph.write_ntriples(&mut out).unwrap(), 6);
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains(
            "<http://something/example/T1> <http://www.buildingsmart-tech.org/ifcOWL#PredefinedType_of_IfcSensor> <http://www.buildingsmart-tech.org/ifcOWL#TEMPERATURESENSOR> .\n"
        ));
        let related: Vec<_> = text
            .lines()
            .filter(|l| l.contains("RelatedElements"))
            .map(|l| l.rsplit(' ').nth(1).unwrap())
            .collect();
        assert_eq!(
            related,
            ["<http://something/example/R_wall_0>", "<http://something/example/T1>"]
        );
        assert!(text.lines().all(|l| l.ends_with(" .")));
    }
}
