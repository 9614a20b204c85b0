//! Molecule Composer

use log::debug;

use crate::diagnostics::Diagnostics;
use crate::element::Element;
use crate::error::GenerateError;
use crate::leaf;
use crate::model::Molecule;
use crate::naming::to_pascal_case;
use crate::resolve::{Category, Resolver};
use crate::template::{self, Hooks};

/// Widths below this are `mobile`.
pub const MOBILE_BREAKPOINT: u32 = 768;
/// Widths below this (and not mobile) are `tablet`; everything else is `desktop`.
pub const TABLET_BREAKPOINT: u32 = 1024;

/// Wrapper tag for a molecule type.
pub fn semantic_tag(kind: &str) -> &'static str {
    match kind {
        "search_form" | "contact_form" | "login_form" => "form",
        "navigation" | "nav_menu" => "nav",
        "article_card" | "content_card" => "article",
        _ => "div",
    }
}

/// Breakpoint label the generated resize observer computes for a viewport width.
pub fn breakpoint_for(width: u32) -> &'static str {
    if width < MOBILE_BREAKPOINT {
        "mobile"
    } else if width < TABLET_BREAKPOINT {
        "tablet"
    } else {
        "desktop"
    }
}

/// Resolved atoms inside the semantic wrapper. Missing atoms are reported and skipped.
pub fn element(
    molecule: &Molecule,
    resolver: &Resolver<'_>,
    diags: &mut Diagnostics,
) -> Result<Element, GenerateError> {
    let mut children = Vec::with_capacity(molecule.atoms.len());
    for (role, atom_id) in &molecule.atoms {
        match resolver.atom(atom_id) {
            Some(atom) => children.push(leaf::element(atom)?),
            None => diags.missing(&molecule.id, role, Category::Atom, atom_id),
        }
    }

    let mut wrapper = Element::new(semantic_tag(&molecule.kind)).style(&molecule.styles);
    if !molecule.kind.is_empty() {
        wrapper = wrapper.class(&format!("molecule-{}", molecule.kind));
    }
    Ok(wrapper.children(children))
}

pub fn compose(
    molecule: &Molecule,
    resolver: &Resolver<'_>,
    diags: &mut Diagnostics,
) -> Result<String, GenerateError> {
    let name = to_pascal_case(&molecule.id);
    let el = element(molecule, resolver, diags)?;

    let mut hooks = Hooks::default();
    let mut setup = Vec::new();
    if !molecule.responsive.is_empty() {
        hooks.use_hook("useState");
        hooks.use_hook("useEffect");
        setup.push(breakpoint_state());
        debug!(
            "event=inert_declaration molecule={} breakpoints={} note=breakpoint_not_wired_into_render",
            molecule.id,
            molecule.responsive.len()
        );
    }
    if !molecule.events.is_empty() {
        debug!(
            "event=inert_declaration molecule={} events={}",
            molecule.id,
            molecule.events.len()
        );
    }

    Ok(template::component(&name, hooks.as_slice(), &setup, &el))
}

fn breakpoint_state() -> String {
    format!(
        "const [breakpoint, setBreakpoint] = useState('desktop');

useEffect(() => {{
  const updateBreakpoint = () => {{
    const width = window.innerWidth;
    if (width < {mobile}) setBreakpoint('mobile');
    else if (width < {tablet}) setBreakpoint('tablet');
    else setBreakpoint('desktop');
  }};

  updateBreakpoint();
  window.addEventListener('resize', updateBreakpoint);
  return () => window.removeEventListener('resize', updateBreakpoint);
}}, []);",
        mobile = MOBILE_BREAKPOINT,
        tablet = TABLET_BREAKPOINT
    )
}
