// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Well-known text parser using pest

use crate::error::{Error, Result};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::fmt;

#[derive(Parser)]
#[grammar = "projection/wkt.pest"]
struct WktParser;

/// A value inside a WKT node's brackets
#[derive(Debug, Clone, PartialEq)]
pub enum WktValue {
    Node(WktNode),
    Text(String),
    Number(f64),
    /// Bare identifier such as an axis direction (`EAST`)
    Ident(String),
}

/// `KEYWORD[value, value, ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct WktNode {
    pub keyword: String,
    pub values: Vec<WktValue>,
}

/// Parse a WKT definition into its node tree
pub fn parse_wkt(source: &str) -> Result<WktNode> {
    let mut pairs = WktParser::parse(Rule::definition, source)
        .map_err(|e| Error::Wkt(e.to_string()))?;
    let node = pairs
        .next()
        .and_then(|definition| definition.into_inner().next())
        .ok_or_else(|| Error::Wkt("empty definition".into()))?;
    parse_node(node)
}

fn parse_node(pair: Pair<Rule>) -> Result<WktNode> {
    let mut inner = pair.into_inner();
    let keyword = inner
        .next()
        .ok_or_else(|| Error::Wkt("node without keyword".into()))?
        .as_str()
        .to_ascii_uppercase();
    let values = inner.map(parse_value).collect::<Result<Vec<_>>>()?;
    Ok(WktNode { keyword, values })
}

fn parse_value(pair: Pair<Rule>) -> Result<WktValue> {
    match pair.as_rule() {
        Rule::node => Ok(WktValue::Node(parse_node(pair)?)),
        Rule::text => {
            let chars = pair.into_inner().next().map(|c| c.as_str()).unwrap_or("");
            Ok(WktValue::Text(chars.replace("\"\"", "\"")))
        }
        Rule::number => pair
            .as_str()
            .parse()
            .map(WktValue::Number)
            .map_err(|e| Error::Wkt(format!("bad number `{}`: {}", pair.as_str(), e))),
        Rule::ident => Ok(WktValue::Ident(pair.as_str().to_string())),
        other => Err(Error::Wkt(format!("unexpected {:?}", other))),
    }
}

impl WktNode {
    /// First direct child node with the given keyword
    pub fn child(&self, keyword: &str) -> Option<&WktNode> {
        self.values.iter().find_map(|v| match v {
            WktValue::Node(n) if n.keyword.eq_ignore_ascii_case(keyword) => Some(n),
            _ => None,
        })
    }

    pub fn children<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a WktNode> + 'a {
        self.values.iter().filter_map(move |v| match v {
            WktValue::Node(n) if n.keyword.eq_ignore_ascii_case(keyword) => Some(n),
            _ => None,
        })
    }

    /// The leading quoted name, e.g. `"WGS 84"` in `GEOGCS["WGS 84", ...]`
    pub fn name(&self) -> Option<&str> {
        match self.values.first() {
            Some(WktValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// The n-th numeric value, counting only numbers
    pub fn number(&self, n: usize) -> Option<f64> {
        self.values
            .iter()
            .filter_map(|v| match v {
                WktValue::Number(x) => Some(*x),
                _ => None,
            })
            .nth(n)
    }

    /// The n-th bare identifier, counting only identifiers
    pub fn ident(&self, n: usize) -> Option<&str> {
        self.values
            .iter()
            .filter_map(|v| match v {
                WktValue::Ident(s) => Some(s.as_str()),
                _ => None,
            })
            .nth(n)
    }

    pub(crate) fn name_or_err(&self) -> Result<String> {
        self.name()
            .map(str::to_string)
            .ok_or_else(|| Error::Wkt(format!("{} has no name", self.keyword)))
    }

    pub(crate) fn number_or_err(&self, n: usize) -> Result<f64> {
        self.number(n)
            .ok_or_else(|| Error::Wkt(format!("{} is missing numeric value {}", self.keyword, n)))
    }

    pub(crate) fn require(&self, keyword: &str) -> Result<&WktNode> {
        self.child(keyword)
            .ok_or_else(|| Error::Wkt(format!("{} has no {}", self.keyword, keyword)))
    }
}

impl fmt::Display for WktValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
            Self::Number(x) => write!(f, "{}", x),
            Self::Ident(s) => f.write_str(s),
        }
    }
}

impl fmt::Display for WktNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.keyword)?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", v)?;
        }
        f.write_str("]")
    }
}
