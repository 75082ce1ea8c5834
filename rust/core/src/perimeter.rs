// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Perimeter parser using nom
//!
//! A room outline arrives as `x1:y1;x2:y2;...;xN:yN;`. Numbers are parsed as
//! exact decimals so coordinates survive the trip into the coordinate lists
//! without binary rounding.

use std::str::FromStr;

use nom::{
    branch::alt,
    character::complete::{char, digit1, one_of, space0},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::{delimited, pair, separated_pair, tuple},
    IResult,
};
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;

use crate::error::{Error, Result};

/// A perimeter vertex lifted into 3D (`z` is 0 on the floor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point3 {
    pub x: Decimal,
    pub y: Decimal,
    pub z: Decimal,
}

impl Point3 {
    pub fn new(x: Decimal, y: Decimal, z: Decimal) -> Self {
        Self { x, y, z }
    }

    /// A floor point (`z = 0`).
    pub fn floor(x: Decimal, y: Decimal) -> Self {
        Self::new(x, y, Decimal::ZERO)
    }

    /// The same point with `z` replaced by `height`.
    pub fn raised(&self, height: Decimal) -> Self {
        Self::new(self.x, self.y, height)
    }
}

/// Converts decimal text (optional sign, optional exponent) to a [`Decimal`].
fn to_decimal(text: &str) -> std::result::Result<Decimal, rust_decimal::Error> {
    let (sign, body) = match text.strip_prefix('-') {
        Some(body) => ("-", body),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };
    let text = if body.starts_with('.') {
        format!("{}0{}", sign, body)
    } else {
        format!("{}{}", sign, body)
    };

    if text.contains(|c| c == 'e' || c == 'E') {
        Decimal::from_scientific(&text)
    } else {
        Decimal::from_str(&text)
    }
}

/// Parse a decimal number: 10, -2.5, .5, 1.5E-3
fn number(input: &str) -> IResult<&str, Decimal> {
    delimited(
        space0,
        map_res(
            recognize(tuple((
                opt(one_of("+-")),
                alt((
                    recognize(pair(digit1, opt(pair(char('.'), digit1)))),
                    recognize(pair(char('.'), digit1)),
                )),
                opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
            ))),
            to_decimal,
        ),
        space0,
    )(input)
}

/// Parse one vertex: `x:y`
fn vertex(input: &str) -> IResult<&str, (Decimal, Decimal)> {
    all_consuming(separated_pair(number, char(':'), number))(input)
}

/// Parses a single scalar coordinate such as a sensor's x or y.
pub fn parse_coordinate(field: &'static str, text: &str) -> Result<Decimal> {
    all_consuming(number)(text)
        .map(|(_, d)| d)
        .map_err(|_| Error::InvalidCoordinate {
            field,
            value: text.to_string(),
        })
}

/// Parses a perimeter string into floor points, in order.
///
/// A trailing `;` is tolerated, as is a last segment without one. Any other
/// empty segment, a segment without exactly one `:`, or a component that is
/// not a decimal number fails with [`Error::MalformedSegment`].
pub fn parse_perimeter(raw: &str) -> Result<Vec<Point3>> {
    let segments: Vec<&str> = raw.split(';').collect();
    let last = segments.len() - 1;
    let mut points = Vec::with_capacity(segments.len());

    for (index, segment) in segments.iter().enumerate() {
        if segment.trim().is_empty() {
            if index == last {
                break;
            }
            return Err(malformed(index, segment, "empty segment", raw));
        }

        let (x, y) = match vertex(segment) {
            Ok((_, xy)) => xy,
            Err(_) => {
                let reason = match segment.matches(':').count() {
                    0 => "missing ':' between x and y",
                    1 => "components must be decimal numbers",
                    _ => "expected exactly two components",
                };
                return Err(malformed(index, segment, reason, raw));
            }
        };
        points.push(Point3::floor(x, y));
    }

    Ok(points)
}

fn malformed(index: usize, segment: &str, reason: &'static str, raw: &str) -> Error {
    Error::MalformedSegment {
        index,
        segment: segment.to_string(),
        reason,
        raw: raw.to_string(),
    }
}

/// A validated room outline with at least three distinct vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Perimeter {
    vertices: Vec<Point3>,
}

impl Perimeter {
    /// Parses and validates a perimeter string.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::validate(parse_perimeter(raw)?, raw)
    }

    /// Builds a perimeter from vertices that are already parsed.
    pub fn from_vertices(vertices: Vec<Point3>) -> Result<Self> {
        Self::validate(vertices, "")
    }

    /// Collapses repeated consecutive vertices, including an explicit
    /// closing vertex equal to the first, then requires three distinct ones.
    fn validate(mut vertices: Vec<Point3>, raw: &str) -> Result<Self> {
        vertices.dedup();
        while vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }

        let distinct = vertices.iter().collect::<FxHashSet<_>>().len();
        if distinct < 3 {
            return Err(Error::DegeneratePerimeter {
                vertices: distinct,
                raw: raw.to_string(),
            });
        }
        Ok(Self { vertices })
    }

    /// The distinct vertices, in perimeter order.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Number of vertices, which is also the number of edges.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertices with the first one repeated at the end, so that
    /// consecutive pairs enumerate every edge of the closed polygon.
    pub fn closed(&self) -> Vec<Point3> {
        let mut closed = Vec::with_capacity(self.vertices.len() + 1);
        closed.extend_from_slice(&self.vertices);
        closed.push(self.vertices[0]);
        closed
    }
}
