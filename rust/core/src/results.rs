// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Query result rows in the SPARQL 1.1 JSON results format.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One bound RDF term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Term {
    Uri {
        value: String,
    },
    Literal {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        datatype: Option<String>,
        #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
    },
    /// Older result documents mark typed literals separately.
    TypedLiteral {
        value: String,
        datatype: String,
    },
    Bnode {
        value: String,
    },
}

impl Term {
    pub fn uri(value: impl Into<String>) -> Self {
        Term::Uri {
            value: value.into(),
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }

    /// The lexical value, whatever the term kind.
    pub fn value(&self) -> &str {
        match self {
            Term::Uri { value }
            | Term::Literal { value, .. }
            | Term::TypedLiteral { value, .. }
            | Term::Bnode { value } => value,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Term::Uri { .. } => "uri",
            Term::Literal { .. } | Term::TypedLiteral { .. } => "literal",
            Term::Bnode { .. } => "bnode",
        }
    }
}

/// A solution row: variable name → bound term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(FxHashMap<String, Term>);

impl Row {
    pub fn get(&self, var: &str) -> Option<&Term> {
        self.0.get(var)
    }

    pub fn insert(&mut self, var: impl Into<String>, term: Term) {
        self.0.insert(var.into(), term);
    }

    fn require(&self, var: &str) -> Result<&Term> {
        self.get(var)
            .ok_or_else(|| Error::MissingBinding(var.to_string()))
    }

    /// The IRI bound to `var`.
    pub fn uri(&self, var: &str) -> Result<&str> {
        match self.require(var)? {
            Term::Uri { value } => Ok(value),
            other => Err(Error::UnexpectedTerm {
                var: var.to_string(),
                expected: "uri",
                found: other.kind(),
            }),
        }
    }

    /// The lexical form of the literal bound to `var`.
    pub fn literal(&self, var: &str) -> Result<&str> {
        match self.require(var)? {
            Term::Literal { value, .. } | Term::TypedLiteral { value, .. } => Ok(value),
            other => Err(Error::UnexpectedTerm {
                var: var.to_string(),
                expected: "literal",
                found: other.kind(),
            }),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Term)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Term)>>(iter: I) -> Self {
        Row(iter.into_iter().map(|(k, t)| (k.into(), t)).collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Head {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    #[serde(default)]
    pub bindings: Vec<Row>,
}

/// A complete `SELECT` result document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub head: Head,
    #[serde(default)]
    pub results: Bindings,
}

impl ResultSet {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self {
            head: Head::default(),
            results: Bindings { bindings: rows },
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.results.bindings
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.results.bindings
    }
}

/// Strips `namespace` from the front of `iri`.
pub fn strip_namespace<'a>(iri: &'a str, namespace: &str) -> Result<&'a str> {
    match iri.strip_prefix(namespace) {
        Some(local) if !local.is_empty() => Ok(local),
        _ => Err(Error::NamespaceMismatch {
            iri: iri.to_string(),
            namespace: namespace.to_string(),
        }),
    }
}
