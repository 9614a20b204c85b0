//! Data model for the declarative UI description.
//!
//! Everything here is decoded once from JSON and then only read. Free-form maps keep declaration
//! order so that generated output is reproducible.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GenerateError;

// ═══════════════════════════════════════════════════════════════════════════════
// FREE-FORM VALUES
// ═══════════════════════════════════════════════════════════════════════════════

/// Ordered mapping used for styles, configuration and layout zones.
pub type ValueMap = IndexMap<String, Value>;

/// Closed set of runtime-typed values allowed in free-form maps.
///
/// `null` and arrays are rejected while decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    String(String),
    Map(ValueMap),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// JavaScript-like truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Map(_) => true,
        }
    }
}

/// Whole numbers print without a fractional part.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::String(s) => f.write_str(s),
            Value::Map(m) => {
                f.write_str("{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                f.write_str("}")
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROJECT
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub brand: Brand,
    #[serde(default)]
    pub global_styles: GlobalStyles,
    #[serde(default)]
    pub third_party: ThirdParty,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    #[serde(default)]
    pub colors: IndexMap<String, String>,
    #[serde(default)]
    pub typography: Typography,
    #[serde(default)]
    pub spacing: IndexMap<String, String>,
    #[serde(default)]
    pub breakpoints: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    #[serde(default)]
    pub font_family: IndexMap<String, String>,
    #[serde(default)]
    pub font_sizes: IndexMap<String, String>,
    #[serde(default)]
    pub font_weights: ValueMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalStyles {
    pub reset: bool,
    pub normalize: bool,
}

impl Default for GlobalStyles {
    fn default() -> Self {
        Self {
            reset: true,
            normalize: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirdParty {
    #[serde(default)]
    pub fonts: Option<FontsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FontsConfig {
    #[serde(default)]
    pub google: Vec<String>,
}

/// A group of related pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clump {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub base_route: String,
    #[serde(default)]
    pub pages: Vec<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// PAGE & LAYOUT
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub clump: String,
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub meta: IndexMap<String, String>,
    #[serde(default)]
    pub layout: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Layout {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub structure: Vec<LayoutSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutSection {
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub organism: Option<String>,
    #[serde(default)]
    pub organisms: Vec<String>,
    #[serde(default)]
    pub position: Option<String>,
}

/// What a layout section places on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionTarget<'a> {
    Single(&'a str),
    Group(&'a [String]),
}

impl LayoutSection {
    /// A non-empty `organisms` list takes precedence over `organism`.
    pub fn target(&self) -> Option<SectionTarget<'_>> {
        if !self.organisms.is_empty() {
            return Some(SectionTarget::Group(&self.organisms));
        }
        match self.organism.as_deref() {
            Some(id) if !id.is_empty() => Some(SectionTarget::Single(id)),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ATOMS
// ═══════════════════════════════════════════════════════════════════════════════

/// Leaf primitive kinds understood by the leaf renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Image,
    Heading,
    Link,
    Button,
    Input,
    Text,
}

impl FromStr for Primitive {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Image" => Ok(Primitive::Image),
            "Heading" => Ok(Primitive::Heading),
            "Link" => Ok(Primitive::Link),
            "Button" => Ok(Primitive::Button),
            "Input" => Ok(Primitive::Input),
            "Text" => Ok(Primitive::Text),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Atom {
    pub id: String,
    #[serde(default)]
    pub subatom: String,
    #[serde(default)]
    pub config: ValueMap,
    #[serde(default)]
    pub styles: ValueMap,
    #[serde(default)]
    pub states: IndexMap<String, ValueMap>,
}

impl Atom {
    pub fn primitive(&self) -> Result<Primitive, GenerateError> {
        self.subatom
            .parse()
            .map_err(|_| GenerateError::UnsupportedPrimitive {
                atom: self.id.clone(),
                kind: self.subatom.clone(),
            })
    }
}

/// Atom catalog, bucketed by primitive family.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Atoms {
    #[serde(default)]
    pub images: Vec<Atom>,
    #[serde(default)]
    pub headings: Vec<Atom>,
    #[serde(default)]
    pub links: Vec<Atom>,
    #[serde(default)]
    pub buttons: Vec<Atom>,
    #[serde(default)]
    pub inputs: Vec<Atom>,
    #[serde(default)]
    pub text: Vec<Atom>,
}

impl Atoms {
    /// All atoms, bucket by bucket in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = &Atom> + '_ {
        self.images
            .iter()
            .chain(&self.headings)
            .chain(&self.links)
            .chain(&self.buttons)
            .chain(&self.inputs)
            .chain(&self.text)
    }

    pub fn len(&self) -> usize {
        self.images.len()
            + self.headings.len()
            + self.links.len()
            + self.buttons.len()
            + self.inputs.len()
            + self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MOLECULES & ORGANISMS
// ═══════════════════════════════════════════════════════════════════════════════

/// Declarative event descriptor. Decoded but not yet turned into handlers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub action: String,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponsiveConfig {
    pub breakpoint: String,
    #[serde(default)]
    pub atoms: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Molecule {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub atoms: IndexMap<String, String>,
    #[serde(default)]
    pub responsive: Vec<ResponsiveConfig>,
    #[serde(default)]
    pub styles: ValueMap,
    #[serde(default)]
    pub states: IndexMap<String, ValueMap>,
    #[serde(default)]
    pub events: IndexMap<String, Event>,
}

/// Molecule references of an organism: role-keyed, or an ordered sequence whose order matters
/// (carousel slides).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoleculeRefs {
    Ordered(Vec<String>),
    Keyed(IndexMap<String, String>),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganismSection {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub molecules: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Behavior {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub autoplay: bool,
    #[serde(default)]
    pub interval: u64,
    #[serde(rename = "loop", default)]
    pub looping: bool,
    #[serde(default)]
    pub controls: bool,
    #[serde(default)]
    pub indicators: bool,
    #[serde(default)]
    pub transition: Option<String>,
    #[serde(default)]
    pub pause_on_hover: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Organism {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub atoms: IndexMap<String, String>,
    #[serde(default)]
    pub molecules: Option<MoleculeRefs>,
    #[serde(default)]
    pub sections: Vec<OrganismSection>,
    #[serde(default)]
    pub config: ValueMap,
    #[serde(default)]
    pub styles: ValueMap,
    /// Zone name to nested style map, or opaque scalars.
    #[serde(default)]
    pub layout: ValueMap,
    #[serde(default)]
    pub states: IndexMap<String, ValueMap>,
    #[serde(default)]
    pub events: IndexMap<String, Event>,
    #[serde(default)]
    pub behavior: Option<Behavior>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// ROOT
// ═══════════════════════════════════════════════════════════════════════════════

/// Root aggregate. Owns every entity; composers only borrow from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Structure {
    pub project: Project,
    #[serde(default)]
    pub clump: Clump,
    pub page: Page,
    pub layout: Layout,
    #[serde(default)]
    pub atoms: Atoms,
    #[serde(default)]
    pub molecules: Vec<Molecule>,
    #[serde(default)]
    pub organisms: Vec<Organism>,
}

impl Structure {
    /// Decode a structure from raw JSON bytes and check the required identifiers.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, GenerateError> {
        let structure: Structure = serde_json::from_slice(bytes)?;
        structure.validate()?;
        Ok(structure)
    }

    pub fn from_json(source: &str) -> Result<Self, GenerateError> {
        Self::from_slice(source.as_bytes())
    }

    fn validate(&self) -> Result<(), GenerateError> {
        let required = [
            ("project.id", &self.project.id),
            ("project.name", &self.project.name),
            ("page.id", &self.page.id),
            ("layout.id", &self.layout.id),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(GenerateError::MissingField(field));
            }
        }
        Ok(())
    }
}
