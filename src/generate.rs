//! Generation pass
//!
//! Composes every atom, molecule and organism plus the page into named units, then optionally
//! adds the project boilerplate. Nothing is written here: a pass either produces a complete
//! [`GenerateOutput`] or fails, and only a complete output can be persisted.

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::atom;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::error::GenerateError;
use crate::model::Structure;
use crate::molecule;
use crate::naming::{is_js_identifier, to_pascal_case};
use crate::organism;
use crate::page::{self, RouteDescriptor};
use crate::resolve::Resolver;
use crate::scaffold;
use crate::sink::OutputSink;
use crate::verify;

// ═══════════════════════════════════════════════════════════════════════════════
// OPTIONS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateOptions {
    /// Parse every unit as JSX before accepting it.
    pub verify_syntax: bool,
    /// Compose sibling units on the rayon pool. Output order does not change.
    pub parallel: bool,
    /// Emit the project boilerplate next to the units.
    pub scaffold: bool,
    /// File extension of generated units.
    pub extension: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            verify_syntax: true,
            parallel: true,
            scaffold: true,
            extension: "jsx".to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// OUTPUT
// ═══════════════════════════════════════════════════════════════════════════════

/// Composition level of a generated unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Level {
    Atom,
    Molecule,
    Organism,
    Page,
}

impl Level {
    /// Output directory name for units of this level.
    pub fn dir(&self) -> &'static str {
        match self {
            Level::Atom => "atoms",
            Level::Molecule => "molecules",
            Level::Organism => "organisms",
            Level::Page => "pages",
        }
    }

    /// Relative output path of a unit named `name`.
    pub fn path(&self, name: &str, extension: &str) -> String {
        match self {
            Level::Page => format!("src/pages/{}.{}", name, extension),
            other => format!("src/components/{}/{}.{}", other.dir(), name, extension),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Atom => "atom",
            Level::Molecule => "molecule",
            Level::Organism => "organism",
            Level::Page => "page",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedUnit {
    pub id: String,
    pub name: String,
    pub level: Level,
    pub path: String,
    pub source: String,
}

/// A non-component file, such as boilerplate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFile {
    pub path: String,
    pub contents: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    /// Atoms, molecules, organisms, then the page, each in declaration order.
    pub units: Vec<GeneratedUnit>,
    pub files: Vec<GeneratedFile>,
    pub route: RouteDescriptor,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerateOutput {
    pub fn unit(&self, level: Level, name: &str) -> Option<&GeneratedUnit> {
        self.units
            .iter()
            .find(|u| u.level == level && u.name == name)
    }

    /// Hands every unit and file to `sink`. Returns the number of files persisted.
    pub fn persist(&self, sink: &mut dyn OutputSink) -> Result<usize, GenerateError> {
        for unit in &self.units {
            sink.persist(&unit.path, &unit.source)?;
        }
        for file in &self.files {
            sink.persist(&file.path, &file.contents)?;
        }
        info!(
            "event=persisted units={} files={}",
            self.units.len(),
            self.files.len()
        );
        Ok(self.units.len() + self.files.len())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PASS
// ═══════════════════════════════════════════════════════════════════════════════

type UnitResult = Result<(GeneratedUnit, Diagnostics), GenerateError>;

/// Runs a full generation pass. The first fatal error (in output order) aborts the pass.
pub fn generate(
    structure: &Structure,
    options: &GenerateOptions,
) -> Result<GenerateOutput, GenerateError> {
    info!(
        "event=generate_start project={} atoms={} molecules={} organisms={} parallel={}",
        structure.project.id,
        structure.atoms.len(),
        structure.molecules.len(),
        structure.organisms.len(),
        options.parallel
    );

    let resolver = Resolver::new(structure);
    let mut diagnostics = Diagnostics::new();
    for (category, id) in resolver.duplicates() {
        diagnostics.push(
            id,
            "",
            DiagnosticKind::DuplicateIdentifier {
                category,
                id: id.to_string(),
            },
        );
    }

    let atoms: Vec<_> = structure.atoms.iter().collect();
    let mut results = compose_all(&atoms, options.parallel, |a| {
        let source = atom::compose(a).map_err(|e| e.in_unit(Level::Atom, &a.id))?;
        finish(Level::Atom, &a.id, source, Diagnostics::new(), options)
    });
    results.extend(compose_all(
        &structure.molecules,
        options.parallel,
        |m| {
            let mut diags = Diagnostics::new();
            let source = molecule::compose(m, &resolver, &mut diags)
                .map_err(|e| e.in_unit(Level::Molecule, &m.id))?;
            finish(Level::Molecule, &m.id, source, diags, options)
        },
    ));
    results.extend(compose_all(
        &structure.organisms,
        options.parallel,
        |o| {
            let mut diags = Diagnostics::new();
            let source = organism::compose(o, &resolver, &mut diags)
                .map_err(|e| e.in_unit(Level::Organism, &o.id))?;
            finish(Level::Organism, &o.id, source, diags, options)
        },
    ));

    let mut units = Vec::with_capacity(results.len() + 1);
    let mut claimed: HashMap<String, String> = HashMap::new();
    for result in results {
        let (unit, diags) = result?;
        diagnostics.extend(diags);
        if let Some(first) = claimed.get(&unit.path) {
            if *first == unit.id {
                // Same identifier twice: already reported as a duplicate.
                debug!("event=unit_shadowed level={} id={}", unit.level, unit.id);
            } else {
                diagnostics.push(
                    &unit.id,
                    "",
                    DiagnosticKind::ComponentNameCollision {
                        level: unit.level,
                        name: unit.name.clone(),
                        first: first.clone(),
                    },
                );
            }
            continue;
        }
        claimed.insert(unit.path.clone(), unit.id.clone());
        units.push(unit);
    }

    let mut page_diags = Diagnostics::new();
    let page_unit = page::compose(&structure.page, &structure.layout, &resolver, &mut page_diags)
        .map_err(|e| e.in_unit(Level::Page, &structure.page.id))?;
    let route = page_unit.route.clone();
    let (unit, page_diags) = finish(
        Level::Page,
        &structure.page.id,
        page_unit.source,
        page_diags,
        options,
    )?;
    diagnostics.extend(page_diags);
    units.push(unit);

    let files = if options.scaffold {
        scaffold::files(&structure.project, &route, &options.extension)
    } else {
        Vec::new()
    };

    let diagnostics = diagnostics.into_vec();
    info!(
        "event=generate_finish project={} units={} files={} diagnostics={}",
        structure.project.id,
        units.len(),
        files.len(),
        diagnostics.len()
    );

    Ok(GenerateOutput {
        units,
        files,
        route,
        diagnostics,
    })
}

/// Generates and persists in one step. A failed pass persists nothing.
pub fn generate_into(
    structure: &Structure,
    options: &GenerateOptions,
    sink: &mut dyn OutputSink,
) -> Result<GenerateOutput, GenerateError> {
    let output = generate(structure, options)?;
    output.persist(sink)?;
    Ok(output)
}

/// Maps `f` over `items`, on the rayon pool when `parallel`. Results keep item order either way.
fn compose_all<T, F>(items: &[T], parallel: bool, f: F) -> Vec<UnitResult>
where
    T: Sync,
    F: Fn(&T) -> UnitResult + Sync + Send,
{
    if parallel {
        items.par_iter().map(f).collect()
    } else {
        items.iter().map(f).collect()
    }
}

fn finish(
    level: Level,
    id: &str,
    source: String,
    mut diags: Diagnostics,
    options: &GenerateOptions,
) -> UnitResult {
    let name = to_pascal_case(id);
    if !is_js_identifier(&name) {
        diags.push(
            id,
            "",
            DiagnosticKind::InvalidComponentName { name: name.clone() },
        );
    }
    if options.verify_syntax {
        verify::check(&name, &source).map_err(|e| e.in_unit(level, id))?;
    }
    Ok((
        GeneratedUnit {
            id: id.to_string(),
            path: level.path(&name, &options.extension),
            name,
            level,
            source,
        },
        diags,
    ))
}
