//! Non-fatal findings collected during a generation pass.

use log::warn;
use serde::Serialize;
use std::fmt;

use crate::generate::Level;
use crate::resolve::Category;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// A referenced atom, molecule or organism does not exist. The reference is skipped.
    MissingReference { category: Category, id: String },
    /// More than one entity of a category shares an identifier. The first one wins.
    DuplicateIdentifier { category: Category, id: String },
    /// The generated component name is not a valid JavaScript identifier.
    InvalidComponentName { name: String },
    /// Two identifiers of one level map to the same component name. The unit declared first
    /// keeps the file, the later one is not emitted.
    ComponentNameCollision {
        level: Level,
        name: String,
        first: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Identifier of the entity being composed when the finding was made.
    pub owner: String,
    /// Where inside the owner, e.g. the role name or section type.
    pub context: String,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::MissingReference { category, id } => write!(
                f,
                "{} `{}` ({}) not found in `{}`",
                category, id, self.context, self.owner
            ),
            DiagnosticKind::DuplicateIdentifier { category, id } => {
                write!(f, "duplicate {} identifier `{}`", category, id)
            }
            DiagnosticKind::InvalidComponentName { name } => write!(
                f,
                "`{}` produces component name `{}` which is not a valid identifier",
                self.owner, name
            ),
            DiagnosticKind::ComponentNameCollision { level, name, first } => write!(
                f,
                "{} `{}` maps to component `{}` already generated for `{}`",
                level, self.owner, name, first
            ),
        }
    }
}

/// Per-unit accumulator. Every push is also logged as a warning.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, owner: &str, context: &str, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            owner: owner.to_string(),
            context: context.to_string(),
            kind,
        };
        warn!("event=diagnostic {}", diagnostic);
        self.items.push(diagnostic);
    }

    pub fn missing(&mut self, owner: &str, context: &str, category: Category, id: &str) {
        self.push(
            owner,
            context,
            DiagnosticKind::MissingReference {
                category,
                id: id.to_string(),
            },
        );
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
