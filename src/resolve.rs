//! Reference Resolver
//!
//! Looks entities up by identifier within a category. A miss is `None`; callers decide whether
//! that is fatal.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::model::{Atom, Molecule, Organism, Structure};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Atom,
    Molecule,
    Organism,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Atom => "atom",
            Category::Molecule => "molecule",
            Category::Organism => "organism",
        })
    }
}

/// A resolved entity, borrowed from the owning structure.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Atom(&'a Atom),
    Molecule(&'a Molecule),
    Organism(&'a Organism),
}

impl Entity<'_> {
    pub fn id(&self) -> &str {
        match self {
            Entity::Atom(a) => &a.id,
            Entity::Molecule(m) => &m.id,
            Entity::Organism(o) => &o.id,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Entity::Atom(_) => Category::Atom,
            Entity::Molecule(_) => Category::Molecule,
            Entity::Organism(_) => Category::Organism,
        }
    }
}

/// Read-only view over a structure. First match wins.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    structure: &'a Structure,
}

impl<'a> Resolver<'a> {
    pub fn new(structure: &'a Structure) -> Self {
        Self { structure }
    }

    pub fn structure(&self) -> &'a Structure {
        self.structure
    }

    pub fn find(&self, category: Category, id: &str) -> Option<Entity<'a>> {
        match category {
            Category::Atom => self.atom(id).map(Entity::Atom),
            Category::Molecule => self.molecule(id).map(Entity::Molecule),
            Category::Organism => self.organism(id).map(Entity::Organism),
        }
    }

    /// Scans images, headings, links, buttons, inputs, then text.
    pub fn atom(&self, id: &str) -> Option<&'a Atom> {
        self.structure.atoms.iter().find(|a| a.id == id)
    }

    pub fn molecule(&self, id: &str) -> Option<&'a Molecule> {
        self.structure.molecules.iter().find(|m| m.id == id)
    }

    pub fn organism(&self, id: &str) -> Option<&'a Organism> {
        self.structure.organisms.iter().find(|o| o.id == id)
    }

    /// Identifiers declared more than once within their category, in first-seen order.
    pub fn duplicates(&self) -> Vec<(Category, &'a str)> {
        let mut out = Vec::new();
        collect_duplicates(
            Category::Atom,
            self.structure.atoms.iter().map(|a| a.id.as_str()),
            &mut out,
        );
        collect_duplicates(
            Category::Molecule,
            self.structure.molecules.iter().map(|m| m.id.as_str()),
            &mut out,
        );
        collect_duplicates(
            Category::Organism,
            self.structure.organisms.iter().map(|o| o.id.as_str()),
            &mut out,
        );
        out
    }
}

fn collect_duplicates<'a>(
    category: Category,
    ids: impl Iterator<Item = &'a str>,
    out: &mut Vec<(Category, &'a str)>,
) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            out.push((category, id));
        }
    }
}
