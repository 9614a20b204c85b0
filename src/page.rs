//! Page Composer
//!
//! Walks the layout sections in order and places the referenced organisms. Each placement
//! carries its composition level from the point of resolution, which is what the import paths
//! are built from.

use log::debug;
use serde::Serialize;

use crate::diagnostics::Diagnostics;
use crate::element::{indent, Element};
use crate::error::GenerateError;
use crate::generate::Level;
use crate::model::{Layout, Page, SectionTarget};
use crate::naming::to_pascal_case;
use crate::resolve::{Category, Resolver};
use crate::style::quote;
use crate::template;

/// Fallback path for a page that declares no route.
pub const DEFAULT_ROUTE: &str = "/";

/// Pairs the page route with its component, for the application routing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    pub path: String,
    pub component: String,
    pub title: String,
}

/// A generated component placed on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageComponent {
    pub id: String,
    pub name: String,
    pub level: Level,
    /// Local name the page imports the component under. Differs from `name` only when `name`
    /// is already bound in the page module.
    pub binding: String,
}

impl PageComponent {
    fn import_line(&self) -> String {
        format!(
            "import {binding} from '../components/{dir}/{name}';",
            binding = self.binding,
            name = self.name,
            dir = self.level.dir()
        )
    }
}

/// Names every page module declares itself, besides the page component and its route export.
const PAGE_BINDINGS: [&str; 3] = ["React", "Helmet", "PageMetadata"];

#[derive(Debug, Clone)]
pub struct PageUnit {
    pub name: String,
    pub source: String,
    pub route: RouteDescriptor,
    /// Distinct components in first-placement order.
    pub components: Vec<PageComponent>,
}

pub fn compose(
    page: &Page,
    layout: &Layout,
    resolver: &Resolver<'_>,
    diags: &mut Diagnostics,
) -> Result<PageUnit, GenerateError> {
    let name = to_pascal_case(&page.id);
    if !page.layout.is_empty() && page.layout != layout.id {
        debug!(
            "event=layout_mismatch page={} declared={} used={}",
            page.id, page.layout, layout.id
        );
    }

    let mut reserved: Vec<String> = PAGE_BINDINGS.iter().map(|b| b.to_string()).collect();
    reserved.push(name.clone());
    reserved.push(format!("{}Route", name));

    let mut components: Vec<PageComponent> = Vec::new();
    let mut placements = vec![Element::component("PageMetadata")];

    for (index, section) in layout.structure.iter().enumerate() {
        match section.target() {
            None => {
                return Err(GenerateError::LayoutSectionEmpty {
                    section: section.section.clone(),
                    index,
                })
            }
            Some(SectionTarget::Single(id)) => {
                let component =
                    place(resolver, id).ok_or_else(|| GenerateError::OrganismNotFound {
                        section: section.section.clone(),
                        id: id.to_string(),
                    })?;
                let binding = remember(&mut components, &mut reserved, component);
                placements.push(Element::component(&binding));
            }
            Some(SectionTarget::Group(ids)) => {
                let mut group = Element::new("main");
                for id in ids {
                    match place(resolver, id) {
                        Some(component) => {
                            let binding = remember(&mut components, &mut reserved, component);
                            group.push(Element::component(&binding));
                        }
                        None => diags.missing(&page.id, &section.section, Category::Organism, id),
                    }
                }
                placements.push(group);
            }
        }
    }

    let route = RouteDescriptor {
        path: if page.route.is_empty() {
            DEFAULT_ROUTE.to_string()
        } else {
            page.route.clone()
        },
        component: name.clone(),
        title: page.title.clone(),
    };

    let mut source = template::react_import(&[]);
    source.push('\n');
    source.push_str("import { Helmet } from 'react-helmet-async';\n");
    for component in &components {
        source.push_str(&component.import_line());
        source.push('\n');
    }
    source.push('\n');
    source.push_str(&metadata(page));
    source.push_str("\n\n");
    source.push_str(&template::component_body(
        &name,
        &[],
        &Element::fragment(placements),
    ));
    source.push('\n');
    source.push_str(&route_export(&route));

    Ok(PageUnit {
        name,
        source,
        route,
        components,
    })
}

/// Organisms are the only placeable category on a page.
fn place(resolver: &Resolver<'_>, id: &str) -> Option<PageComponent> {
    resolver.organism(id).map(|organism| PageComponent {
        id: organism.id.clone(),
        name: to_pascal_case(&organism.id),
        binding: String::new(),
        level: Level::Organism,
    })
}

/// Records the first placement of each component and returns the local name it is bound to.
/// A component whose name is already taken in the page module is imported under an alias.
fn remember(
    components: &mut Vec<PageComponent>,
    reserved: &mut Vec<String>,
    mut component: PageComponent,
) -> String {
    if let Some(known) = components.iter().find(|c| c.name == component.name) {
        return known.binding.clone();
    }
    let mut binding = component.name.clone();
    while reserved.contains(&binding) {
        binding.push_str("Organism");
    }
    if binding != component.name {
        debug!(
            "event=import_aliased component={} binding={}",
            component.name, binding
        );
    }
    reserved.push(binding.clone());
    component.binding = binding.clone();
    components.push(component);
    binding
}

/// `PageMetadata` component: the title always, then the recognized meta keys in declaration order.
fn metadata(page: &Page) -> String {
    let mut helmet = Element::new("Helmet").child(Element::text("title", page.title.as_str()));
    for (key, value) in &page.meta {
        let tag = match key.as_str() {
            "description" => Element::void("meta").attr("name", "description"),
            "keywords" => Element::void("meta").attr("name", "keywords"),
            "ogImage" => Element::void("meta").attr("property", "og:image"),
            "language" => Element::void("meta").attr("httpEquiv", "content-language"),
            other => {
                debug!("event=meta_ignored page={} key={}", page.id, other);
                continue;
            }
        };
        helmet.push(tag.attr("content", value.as_str()));
    }
    format!(
        "const PageMetadata = () => (\n{}\n);",
        indent(&helmet.to_jsx(), 1)
    )
}

fn route_export(route: &RouteDescriptor) -> String {
    format!(
        "export const {component}Route = {{\n  path: {path},\n  component: {component},\n  title: {title},\n}};\n",
        component = route.component,
        path = quote(&route.path),
        title = quote(&route.title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Structure;
    use serde_json::json;

    fn structure(page: serde_json::Value, sections: serde_json::Value) -> Structure {
        serde_json::from_value(json!({
            "project": { "id": "p", "name": "P" },
            "page": page,
            "layout": { "id": "main", "structure": sections },
            "organisms": [
                { "id": "main_header", "type": "site_header" },
                { "id": "hero", "type": "hero_section" },
                { "id": "features", "type": "content_section" },
                { "id": "site_footer", "type": "site_footer" }
            ]
        }))
        .unwrap()
    }

    fn run(s: &Structure) -> (Result<PageUnit, GenerateError>, Diagnostics) {
        let resolver = Resolver::new(s);
        let mut diags = Diagnostics::new();
        let unit = compose(&s.page, &s.layout, &resolver, &mut diags);
        (unit, diags)
    }

    #[test]
    fn test_page_source() {
        let s = structure(
            json!({
                "id": "home", "route": "/", "title": "Home",
                "meta": { "description": "Landing", "ogImage": "/og.png", "author": "nobody" }
            }),
            json!([
                { "section": "header", "organism": "main_header" },
                { "section": "body", "organisms": ["hero", "features"] },
                { "section": "footer", "organism": "site_footer" }
            ]),
        );
        let (unit, diags) = run(&s);
        let unit = unit.unwrap();
        assert!(diags.is_empty());
        assert_eq!(
            unit.source,
            "import React from 'react';
import { Helmet } from 'react-helmet-async';
import MainHeader from '../components/organisms/MainHeader';
import Hero from '../components/organisms/Hero';
import Features from '../components/organisms/Features';
import SiteFooter from '../components/organisms/SiteFooter';

const PageMetadata = () => (
  <Helmet>
    <title>Home</title>
    <meta name=\"description\" content=\"Landing\" />
    <meta property=\"og:image\" content=\"/og.png\" />
  </Helmet>
);

const Home = () => {
  return (
    <>
      <PageMetadata />
      <MainHeader />
      <main>
        <Hero />
        <Features />
      </main>
      <SiteFooter />
    </>
  );
};

export default Home;

export const HomeRoute = {
  path: '/',
  component: Home,
  title: 'Home',
};
"
        );
        assert_eq!(
            unit.route,
            RouteDescriptor {
                path: "/".into(),
                component: "Home".into(),
                title: "Home".into()
            }
        );
    }

    #[test]
    fn test_components_are_deduplicated_with_explicit_level() {
        let s = structure(
            json!({ "id": "home" }),
            json!([
                { "section": "a", "organism": "hero" },
                { "section": "b", "organisms": ["hero", "features"] }
            ]),
        );
        let unit = run(&s).0.unwrap();
        let names: Vec<&str> = unit.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Hero", "Features"]);
        assert!(unit.components.iter().all(|c| c.level == Level::Organism));
        assert_eq!(unit.source.matches("import Hero from").count(), 1);
    }

    #[test]
    fn test_missing_single_organism_is_fatal() {
        let s = structure(
            json!({ "id": "home" }),
            json!([{ "section": "header", "organism": "ghost_header" }]),
        );
        match run(&s).0.unwrap_err() {
            GenerateError::OrganismNotFound { section, id } => {
                assert_eq!(section, "header");
                assert_eq!(id, "ghost_header");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_group_member_is_omitted() {
        let s = structure(
            json!({ "id": "home" }),
            json!([{ "section": "body", "organisms": ["hero", "ghost", "features"] }]),
        );
        let (unit, diags) = run(&s);
        let unit = unit.unwrap();
        assert_eq!(diags.len(), 1);
        assert!(unit.source.contains("      <main>\n        <Hero />\n        <Features />\n      </main>"));
        assert!(!unit.source.contains("Ghost"));
    }

    #[test]
    fn test_empty_section_is_fatal() {
        let s = structure(
            json!({ "id": "home" }),
            json!([
                { "section": "header", "organism": "main_header" },
                { "section": "body" }
            ]),
        );
        match run(&s).0.unwrap_err() {
            GenerateError::LayoutSectionEmpty { section, index } => {
                assert_eq!(section, "body");
                assert_eq!(index, 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_metadata_escaping_and_defaults() {
        let s = structure(
            json!({
                "id": "about_us", "title": "About {us}",
                "meta": { "language": "en", "keywords": "a \"b\"" }
            }),
            json!([]),
        );
        let unit = run(&s).0.unwrap();
        assert_eq!(unit.route.path, "/");
        assert!(unit.source.contains("<title>About &#123;us&#125;</title>"));
        assert!(unit.source.contains("<meta httpEquiv=\"content-language\" content=\"en\" />"));
        assert!(unit.source.contains("<meta name=\"keywords\" content=\"a &quot;b&quot;\" />"));
        assert!(unit.source.contains("  title: 'About {us}',\n"));
        assert!(unit.source.contains("const AboutUs = () => {"));
        assert!(unit.source.contains("export const AboutUsRoute = {"));
    }

    #[test]
    fn test_reserved_component_names_are_aliased() {
        let s: Structure = serde_json::from_value(json!({
            "project": { "id": "p", "name": "P" },
            "page": { "id": "home" },
            "layout": { "id": "main", "structure": [
                { "section": "head", "organism": "page_metadata" },
                { "section": "body", "organisms": ["helmet", "home", "page_metadata"] },
                { "section": "foot", "organism": "page_metadata_organism" }
            ] },
            "organisms": [
                { "id": "page_metadata", "type": "content_section" },
                { "id": "helmet", "type": "content_section" },
                { "id": "home", "type": "content_section" },
                { "id": "page_metadata_organism", "type": "content_section" }
            ]
        }))
        .unwrap();
        let unit = run(&s).0.unwrap();

        for line in [
            "import PageMetadataOrganism from '../components/organisms/PageMetadata';",
            "import HelmetOrganism from '../components/organisms/Helmet';",
            "import HomeOrganism from '../components/organisms/Home';",
            "import PageMetadataOrganismOrganism from '../components/organisms/PageMetadataOrganism';",
        ] {
            assert!(unit.source.contains(line), "missing `{line}`");
        }
        assert_eq!(unit.source.matches("const PageMetadata = ").count(), 1);
        assert_eq!(unit.source.matches("const Home = ").count(), 1);
        assert!(unit.source.contains(
            "      <PageMetadata />\n      <PageMetadataOrganism />\n      <main>\n        <HelmetOrganism />\n        <HomeOrganism />\n        <PageMetadataOrganism />\n      </main>\n      <PageMetadataOrganismOrganism />"
        ));
        let bindings: Vec<&str> = unit.components.iter().map(|c| c.binding.as_str()).collect();
        assert_eq!(
            bindings,
            ["PageMetadataOrganism", "HelmetOrganism", "HomeOrganism", "PageMetadataOrganismOrganism"]
        );
    }

    #[test]
    fn test_route_title_with_control_characters_parses() {
        let s = structure(json!({ "id": "home", "title": "Acme\r\nHome\t" }), json!([]));
        let unit = run(&s).0.unwrap();
        assert!(unit.source.contains(r"  title: 'Acme\r\nHome\t',"));
        crate::verify::check(&unit.name, &unit.source).unwrap();
    }
}
