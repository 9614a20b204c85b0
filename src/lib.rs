//! # Atomic component generator
//!
//! Turns a declarative atomic-design structure (atoms, molecules, organisms, one page and its
//! layout) into React component sources.
//!
//! ## Pipeline
//!
//! 1. **Decode**: `Structure::from_slice` reads the JSON structure into ordered, closed types.
//! 2. **Compose**: each level builds a JSX element tree from the level below it, looking
//!    identifiers up through the `Resolver`:
//!    page → organism → molecule → atom → leaf.
//! 3. **Verify**: every unit is parsed as JSX before it is accepted.
//! 4. **Persist**: a complete `GenerateOutput` is handed to an `OutputSink`.
//!
//! ## Failure model
//!
//! - Unknown leaf primitives, missing single-organism placements and empty layout sections are
//!   fatal (`GenerateError`) and abort the whole pass before anything is written.
//! - Missing atom/molecule references, duplicate identifiers, invalid component names and
//!   component name collisions are `Diagnostic`s: logged, collected, never fatal.

#[cfg(feature = "napi")]
use napi_derive::napi;

mod atom;
mod diagnostics;
mod element;
mod error;
mod generate;
mod leaf;
mod model;
mod molecule;
mod naming;
mod organism;
mod page;
mod resolve;
mod scaffold;
mod sink;
mod style;
mod template;
mod verify;


pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::GenerateError;
pub use generate::{
    generate, generate_into, GenerateOptions, GenerateOutput, GeneratedFile, GeneratedUnit, Level,
};
pub use model::{
    Atom, Atoms, Layout, LayoutSection, Molecule, MoleculeRefs, Organism, Page, Project, Structure,
    Value, ValueMap,
};
pub use molecule::breakpoint_for;
pub use organism::CarouselPlan;
pub use page::RouteDescriptor;
pub use resolve::{Category, Entity, Resolver};
pub use sink::{DirectorySink, MemorySink, OutputSink};

/// Leaf rendering of a single atom, without the component wrapper.
pub fn render_atom(atom: &Atom) -> Result<String, GenerateError> {
    leaf::render(atom)
}

/// Inline-style expression for a style map (`{{ color: 'red' }}`), empty for an empty map.
pub fn inline_style(styles: &ValueMap) -> String {
    style::to_inline(styles)
}

/// CSS rule block for a class name, empty for an empty map.
pub fn style_block(class_name: &str, styles: &ValueMap) -> String {
    style::to_block(class_name, styles)
}

/// Node entry point. Takes the structure JSON and optional options JSON, returns the output
/// as JSON. Fatal errors are reported as `[<code>] <message>`.
#[cfg(feature = "napi")]
#[napi]
pub fn generate_native(
    structure_json: String,
    options_json: Option<String>,
) -> napi::Result<serde_json::Value> {
    let to_napi = |err: GenerateError| {
        napi::Error::from_reason(format!("[{}] {}", err.code(), err))
    };

    let structure = Structure::from_json(&structure_json).map_err(to_napi)?;
    let options = match options_json {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| to_napi(GenerateError::Decode(e)))?,
        None => GenerateOptions::default(),
    };
    let output = generate(&structure, &options).map_err(to_napi)?;
    serde_json::to_value(&output).map_err(|e| to_napi(GenerateError::Decode(e)))
}
