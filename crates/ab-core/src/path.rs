//! Property paths into element attributes.
//!
//! A path is a non-empty sequence of property names, written dotted in text
//! form (`text`, `reference.text`, `argumentationScheme`) and parsed with
//! `winnow`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;
use winnow::combinator::separated;
use winnow::prelude::*;
use winnow::token::take_while;

/// A sequence of property names addressing a (possibly nested) attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath(SmallVec<[String; 2]>);

impl PropertyPath {
    /// Parse a dotted path such as `reference.text`.
    #[must_use = "parsing result should be used"]
    pub fn parse(input: &str) -> Result<Self, String> {
        let mut rest = input.trim();
        let segments: Vec<&str> = separated(1.., parse_segment, '.')
            .parse_next(&mut rest)
            .map_err(|e| format!("Path parse error: {e}"))?;
        if !rest.is_empty() {
            return Err(format!("Path parse error: unexpected `{rest}` in `{input}`"));
        }
        Ok(Self(segments.into_iter().map(str::to_string).collect()))
    }

    /// Build a path from already-split segments. Panics on an empty slice.
    pub fn from_segments(segments: &[&str]) -> Self {
        assert!(!segments.is_empty(), "property path needs at least one segment");
        Self(segments.iter().map(|s| s.to_string()).collect())
    }

    /// Borrowed segments, convenient for slice patterns.
    pub fn segments(&self) -> SmallVec<[&str; 2]> {
        self.0.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn parse_segment<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl std::str::FromStr for PropertyPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for PropertyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PropertyPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
