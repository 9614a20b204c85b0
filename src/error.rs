use std::path::PathBuf;
use thiserror::Error;

use crate::generate::Level;

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_UNSUPPORTED_PRIMITIVE: &str = "AG-ERR-PRIMITIVE";
pub const ERR_ORGANISM_NOT_FOUND: &str = "AG-ERR-ORGANISM-NOT-FOUND";
pub const ERR_LAYOUT_SECTION_EMPTY: &str = "AG-ERR-SECTION-EMPTY";
pub const ERR_MALFORMED_OUTPUT: &str = "AG-ERR-MALFORMED-OUTPUT";
pub const ERR_MISSING_FIELD: &str = "AG-ERR-MISSING-FIELD";
pub const ERR_DECODE: &str = "AG-ERR-DECODE";
pub const ERR_IO: &str = "AG-ERR-IO";

/// Fatal conditions. Any of these aborts the whole generation pass.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("unsupported primitive `{kind}` on atom `{atom}`")]
    UnsupportedPrimitive { atom: String, kind: String },

    #[error("organism `{id}` referenced by layout section `{section}` was not found")]
    OrganismNotFound { section: String, id: String },

    #[error("layout section `{section}` (#{index}) declares neither `organism` nor `organisms`")]
    LayoutSectionEmpty { section: String, index: usize },

    #[error("generated unit `{name}` does not parse as JSX: {message}")]
    MalformedOutput { name: String, message: String },

    #[error("structure is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("failed to decode structure: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to write `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Carries the stage and identifier of the unit whose generation failed.
    #[error("while generating {stage} `{id}`: {source}")]
    InUnit {
        stage: Level,
        id: String,
        #[source]
        source: Box<GenerateError>,
    },
}

impl GenerateError {
    pub fn code(&self) -> &'static str {
        match self {
            GenerateError::UnsupportedPrimitive { .. } => ERR_UNSUPPORTED_PRIMITIVE,
            GenerateError::OrganismNotFound { .. } => ERR_ORGANISM_NOT_FOUND,
            GenerateError::LayoutSectionEmpty { .. } => ERR_LAYOUT_SECTION_EMPTY,
            GenerateError::MalformedOutput { .. } => ERR_MALFORMED_OUTPUT,
            GenerateError::MissingField(_) => ERR_MISSING_FIELD,
            GenerateError::Decode(_) => ERR_DECODE,
            GenerateError::Io { .. } => ERR_IO,
            GenerateError::InUnit { source, .. } => source.code(),
        }
    }

    pub(crate) fn in_unit(self, stage: Level, id: &str) -> Self {
        match self {
            already @ GenerateError::InUnit { .. } => already,
            other => GenerateError::InUnit {
                stage,
                id: id.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, with unit context stripped.
    pub fn root(&self) -> &GenerateError {
        match self {
            GenerateError::InUnit { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_context_keeps_code() {
        let err = GenerateError::UnsupportedPrimitive {
            atom: "logo".into(),
            kind: "Video".into(),
        }
        .in_unit(Level::Molecule, "brand");

        assert_eq!(err.code(), ERR_UNSUPPORTED_PRIMITIVE);
        assert_eq!(
            err.to_string(),
            "while generating molecule `brand`: unsupported primitive `Video` on atom `logo`"
        );
        assert!(matches!(err.root(), GenerateError::UnsupportedPrimitive { .. }));
    }

    #[test]
    fn test_unit_context_is_not_nested() {
        let err = GenerateError::MissingField("page.id")
            .in_unit(Level::Page, "home")
            .in_unit(Level::Organism, "hero");
        match err {
            GenerateError::InUnit { stage, id, .. } => {
                assert_eq!(stage, Level::Page);
                assert_eq!(id, "home");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
