//! Organism Composer
//!
//! Composition is a fixed pipeline, each stage optional and appending to one ordered element
//! list:
//!
//! 1. direct atom roles
//! 2. molecule references (role-keyed, or an ordered sequence that also feeds carousel indexing)
//! 3. declared sections, each in a `section-<type>` container
//! 4. layered layout zones (`background`, `overlay`, `content`)
//! 5. the organism's own semantic wrapper
//!
//! Behavior synthesis (carousel state, header scroll tracking) runs alongside and only adds
//! setup code; it never changes the element tree.

use log::debug;

use crate::diagnostics::Diagnostics;
use crate::element::Element;
use crate::error::GenerateError;
use crate::leaf;
use crate::model::{MoleculeRefs, Organism, Value, ValueMap};
use crate::molecule;
use crate::naming::to_pascal_case;
use crate::resolve::{Category, Resolver};
use crate::template::{self, Hooks};

/// Only this organism type gets scroll tracking.
pub const SCROLL_TRACKING_TYPE: &str = "site_header";
/// Configuration key that switches scroll tracking on when truthy.
pub const SCROLL_TRACKING_OPTION: &str = "scrollBehavior";
/// Vertical offset past which the header counts as scrolled.
pub const SCROLL_THRESHOLD: u32 = 50;
/// Autoplay period used when the behavior declares none.
pub const DEFAULT_CAROUSEL_INTERVAL: u64 = 5000;

const ZONE_BACKGROUND: &str = "background";
const ZONE_OVERLAY: &str = "overlay";
const ZONE_CONTENT: &str = "content";

/// Wrapper tag for an organism type.
pub fn semantic_tag(kind: &str) -> &'static str {
    match kind {
        "site_header" | "page_header" => "header",
        "site_footer" | "page_footer" => "footer",
        "hero_section" | "content_section" => "section",
        "navigation" | "nav_menu" => "nav",
        "article_content" => "article",
        "sidebar" => "aside",
        _ => "div",
    }
}

/// Result of the element pipeline.
#[derive(Debug, Clone)]
pub struct Composition {
    pub element: Element,
    /// Molecules resolved from an ordered reference sequence. Zero for role-keyed references.
    pub slide_count: usize,
}

pub fn element(
    organism: &Organism,
    resolver: &Resolver<'_>,
    diags: &mut Diagnostics,
) -> Result<Composition, GenerateError> {
    let mut elements = Vec::new();

    for (role, atom_id) in &organism.atoms {
        match resolver.atom(atom_id) {
            Some(atom) => elements.push(leaf::element(atom)?),
            None => diags.missing(&organism.id, role, Category::Atom, atom_id),
        }
    }

    let mut slide_count = 0;
    match &organism.molecules {
        Some(MoleculeRefs::Keyed(refs)) => {
            for (role, molecule_id) in refs {
                if let Some(el) = molecule_ref(organism, role, molecule_id, resolver, diags)? {
                    elements.push(el);
                }
            }
        }
        Some(MoleculeRefs::Ordered(refs)) => {
            for (i, molecule_id) in refs.iter().enumerate() {
                let context = format!("#{}", i);
                if let Some(el) = molecule_ref(organism, &context, molecule_id, resolver, diags)? {
                    elements.push(el);
                    slide_count += 1;
                }
            }
        }
        None => {}
    }

    for section in &organism.sections {
        let context = format!("section {}", section.kind);
        let mut container = Element::new("div").class(&format!("section-{}", section.kind));
        for molecule_id in &section.molecules {
            if let Some(el) = molecule_ref(organism, &context, molecule_id, resolver, diags)? {
                container.push(el);
            }
        }
        elements.push(container);
    }

    let elements = apply_layout(elements, &organism.layout);

    let mut wrapper = Element::new(semantic_tag(&organism.kind)).style(&organism.styles);
    if !organism.kind.is_empty() {
        wrapper = wrapper.class(&format!("organism-{}", organism.kind));
    }

    Ok(Composition {
        element: wrapper.children(elements),
        slide_count,
    })
}

fn molecule_ref(
    organism: &Organism,
    context: &str,
    molecule_id: &str,
    resolver: &Resolver<'_>,
    diags: &mut Diagnostics,
) -> Result<Option<Element>, GenerateError> {
    match resolver.molecule(molecule_id) {
        Some(m) => molecule::element(m, resolver, diags).map(Some),
        None => {
            diags.missing(&organism.id, context, Category::Molecule, molecule_id);
            Ok(None)
        }
    }
}

fn zone<'a>(layout: &'a ValueMap, key: &str) -> Option<&'a ValueMap> {
    layout.get(key).and_then(Value::as_map)
}

/// Layers the accumulated elements when any zone key carries a style map; otherwise they pass
/// through unchanged.
pub fn apply_layout(elements: Vec<Element>, layout: &ValueMap) -> Vec<Element> {
    let background = zone(layout, ZONE_BACKGROUND);
    let overlay = zone(layout, ZONE_OVERLAY);
    let content = zone(layout, ZONE_CONTENT);
    if background.is_none() && overlay.is_none() && content.is_none() {
        return elements;
    }

    let mut layered = Vec::with_capacity(elements.len() + 3);
    if let Some(styles) = background {
        layered.push(Element::new("div").style(styles).class("layout-background"));
    }
    if let Some(styles) = overlay {
        layered.push(Element::new("div").style(styles).class("layout-overlay"));
    }
    match content {
        Some(styles) => layered.push(
            Element::new("div")
                .style(styles)
                .class("layout-content")
                .children(elements),
        ),
        None => layered.extend(elements),
    }
    layered
}

// ═══════════════════════════════════════════════════════════════════════════════
// BEHAVIOR SYNTHESIS
// ═══════════════════════════════════════════════════════════════════════════════

/// Index stepping for an autoplaying carousel of `length` slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselPlan {
    pub length: usize,
    pub interval: u64,
}

impl CarouselPlan {
    pub fn next_index(&self, current: usize) -> usize {
        (current + 1) % self.length
    }

    /// Adds the length before the modulo so index 0 wraps to the last slide.
    pub fn prev_index(&self, current: usize) -> usize {
        (current + self.length - 1) % self.length
    }

    fn effect(&self) -> String {
        format!(
            "useEffect(() => {{
  const interval = setInterval(() => {{
    setCurrentSlide((prev) => (prev + 1) % {len});
  }}, {interval});
  return () => clearInterval(interval);
}}, []);

const nextSlide = () => setCurrentSlide((prev) => (prev + 1) % {len});
const prevSlide = () => setCurrentSlide((prev) => (prev - 1 + {len}) % {len});",
            len = self.length,
            interval = self.interval
        )
    }
}

/// Carousel plan for an organism, if it autoplays over a non-empty resolved sequence.
pub fn carousel_plan(organism: &Organism, slide_count: usize) -> Option<CarouselPlan> {
    let behavior = organism.behavior.as_ref()?;
    if behavior.kind != "carousel" || !behavior.autoplay || slide_count == 0 {
        return None;
    }
    let interval = if behavior.interval == 0 {
        DEFAULT_CAROUSEL_INTERVAL
    } else {
        behavior.interval
    };
    Some(CarouselPlan {
        length: slide_count,
        interval,
    })
}

fn tracks_scroll(organism: &Organism) -> bool {
    organism.kind == SCROLL_TRACKING_TYPE
        && organism
            .config
            .get(SCROLL_TRACKING_OPTION)
            .is_some_and(Value::is_truthy)
}

fn scroll_effect() -> String {
    format!(
        "useEffect(() => {{
  const handleScroll = () => {{
    setScrolled(window.scrollY > {threshold});
  }};
  window.addEventListener('scroll', handleScroll);
  return () => window.removeEventListener('scroll', handleScroll);
}}, []);",
        threshold = SCROLL_THRESHOLD
    )
}

pub fn compose(
    organism: &Organism,
    resolver: &Resolver<'_>,
    diags: &mut Diagnostics,
) -> Result<String, GenerateError> {
    let name = to_pascal_case(&organism.id);
    let composition = element(organism, resolver, diags)?;

    let mut hooks = Hooks::default();
    let mut state = Vec::new();
    let mut effects = Vec::new();

    let is_carousel = organism
        .behavior
        .as_ref()
        .is_some_and(|b| b.kind == "carousel");
    if is_carousel {
        hooks.use_hook("useState");
        state.push("const [currentSlide, setCurrentSlide] = useState(0);".to_string());
        if let Some(plan) = carousel_plan(organism, composition.slide_count) {
            hooks.use_hook("useEffect");
            effects.push(plan.effect());
        }
    }
    if tracks_scroll(organism) {
        hooks.use_hook("useState");
        hooks.use_hook("useEffect");
        state.push("const [scrolled, setScrolled] = useState(false);".to_string());
        effects.push(scroll_effect());
    }
    log_inert(organism);

    let mut setup = Vec::with_capacity(effects.len() + 1);
    if !state.is_empty() {
        setup.push(state.join("\n"));
    }
    setup.extend(effects);

    Ok(template::component(
        &name,
        hooks.as_slice(),
        &setup,
        &composition.element,
    ))
}

fn log_inert(organism: &Organism) {
    if let Some(b) = &organism.behavior {
        if b.kind != "carousel" {
            debug!(
                "event=inert_declaration organism={} behavior={}",
                organism.id, b.kind
            );
        } else if b.looping || b.pause_on_hover || b.controls || b.indicators || b.transition.is_some() {
            debug!(
                "event=inert_declaration organism={} note=carousel_options_not_composed",
                organism.id
            );
        }
    }
    if !organism.states.is_empty() || !organism.events.is_empty() {
        debug!(
            "event=inert_declaration organism={} states={} events={}",
            organism.id,
            organism.states.len(),
            organism.events.len()
        );
    }
}
