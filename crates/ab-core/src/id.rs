//! Element ids for argument graphs.
//!
//! Nodes, edges, and the graph itself share one id space. Ids are interned so
//! the editor can copy them freely and compare them in O(1). Ids coming from
//! outside (loaded documents, host selections) go through [`ElementId::parse`]
//! or [`ElementId::lookup`] rather than [`ElementId::intern`].

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// An interned identifier shared by nodes, edges, and the graph.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    /// Intern a trusted id, e.g. one written in code.
    pub fn intern(s: &str) -> Self {
        ElementId(INTERNER.get_or_intern(s))
    }

    /// Validate and intern an id read from a document.
    ///
    /// Ids must be non-empty and contain no whitespace or control characters;
    /// they are used as JSON object keys and in export filenames.
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Err("element id is empty".into());
        }
        if let Some(c) = s.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(format!("element id `{}` contains {c:?}", s.escape_debug()));
        }
        Ok(Self::intern(s))
    }

    /// The id for `s` if any element was ever given it. Never interns.
    pub fn lookup(s: &str) -> Option<Self> {
        INTERNER.get(s).map(ElementId)
    }

    pub fn as_str(&self) -> &'static str {
        INTERNER.resolve(&self.0)
    }

    /// A fresh id such as `graph_3`, for graphs created without one.
    pub fn fresh(prefix: &str) -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        loop {
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            let candidate = format!("{prefix}_{n}");
            if Self::lookup(&candidate).is_none() {
                return Self::intern(&candidate);
            }
        }
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ElementId::parse(&s).map_err(serde::de::Error::custom)
    }
}
