//! Drafts: isolated, immutable snapshots of an element under edit.
//!
//! A `Draft` owns its own allocation of the element, so nothing the user
//! types can leak into the authoritative store before a save. Every edit
//! produces a fresh `Draft`; older drafts stay valid and unchanged.

use ab_core::{GraphElement, PropertyPath, Reference, Scheme, SchemeType};
use std::sync::Arc;

/// Raw value a select widget sends for its "Unknown" option.
pub const UNSET_SENTINEL: &str = "###NULL###";

/// A value arriving from a field widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditValue {
    Text(String),
    /// Clear an optional attribute.
    Unset,
}

impl EditValue {
    /// Interpret a raw widget string, mapping the unset sentinel to `Unset`.
    pub fn from_raw(raw: &str) -> Self {
        if raw == UNSET_SENTINEL {
            EditValue::Unset
        } else {
            EditValue::Text(raw.to_string())
        }
    }
}

impl From<&str> for EditValue {
    fn from(raw: &str) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Option<String>> for EditValue {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(raw) => Self::from_raw(&raw),
            None => EditValue::Unset,
        }
    }
}

/// Edits that the current element variant cannot accept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("`{path}` is not an editable property of a {kind}")]
    InvalidPath { path: PropertyPath, kind: &'static str },

    #[error("`{value}` is not a valid value for `{path}`")]
    InvalidValue { path: PropertyPath, value: String },
}

/// An immutable snapshot of an element being edited.
#[derive(Debug, Clone)]
pub struct Draft(Arc<GraphElement>);

impl Draft {
    pub fn element(&self) -> &GraphElement {
        &self.0
    }

    /// Whether both drafts are the very same snapshot (not merely equal).
    pub fn ptr_eq(&self, other: &Draft) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Draft {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Draft {}

/// Start a draft from a store snapshot. The draft shares no state with `source`.
pub fn open_draft(source: &GraphElement) -> Draft {
    Draft(Arc::new(source.clone()))
}

/// Return a new draft with the value at `path` replaced.
///
/// Nested targets are created on demand: editing `reference.text` on an atom
/// without a reference attaches one. `Unset` clears optional attributes and
/// is rejected for plain text.
pub fn apply_edit(
    draft: &Draft,
    path: &PropertyPath,
    value: EditValue,
) -> Result<Draft, EditError> {
    let mut next = draft.element().clone();

    match (&mut next, path.segments().as_slice()) {
        (GraphElement::SchemeNode(scheme), ["type"]) => {
            scheme.scheme_type = choice(path, value, SchemeType::from_name)?;
        }
        (GraphElement::SchemeNode(scheme), ["argumentationScheme"]) => {
            scheme.argumentation_scheme = choice(path, value, Scheme::from_name)?;
        }
        (GraphElement::AtomicNode(atom), ["text"]) => {
            atom.text = text(path, value)?;
        }
        (GraphElement::AtomicNode(atom), ["reference", "text"]) => {
            let text = text(path, value)?;
            atom.reference.get_or_insert_with(Reference::default).text = text;
        }
        (element, _) => {
            return Err(EditError::InvalidPath {
                path: path.clone(),
                kind: element.kind_name(),
            });
        }
    }

    log::trace!("draft {}: {path} updated", next.id());
    Ok(Draft(Arc::new(next)))
}

fn choice<T>(
    path: &PropertyPath,
    value: EditValue,
    lookup: fn(&str) -> Option<T>,
) -> Result<Option<T>, EditError> {
    match value {
        EditValue::Unset => Ok(None),
        EditValue::Text(name) => match lookup(&name) {
            Some(found) => Ok(Some(found)),
            None => Err(EditError::InvalidValue {
                path: path.clone(),
                value: name,
            }),
        },
    }
}

fn text(path: &PropertyPath, value: EditValue) -> Result<String, EditError> {
    match value {
        EditValue::Text(text) => Ok(text),
        EditValue::Unset => Err(EditError::InvalidValue {
            path: path.clone(),
            value: UNSET_SENTINEL.to_string(),
        }),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────
