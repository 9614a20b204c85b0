//! Project boilerplate around the generated units: package manifest, bundler config, HTML
//! shell, entry point, routing table and the global style sheet.

use serde_json::json;

use crate::element::{escape_attr, Element};
use crate::generate::GeneratedFile;
use crate::model::{Project, Value, ValueMap};
use crate::page::RouteDescriptor;
use crate::style;

const DEFAULT_VERSION: &str = "0.1.0";
const DEV_SERVER_PORT: u16 = 3000;

const GITIGNORE: &str = "node_modules
dist
.DS_Store
*.log
.env
.env.local
";

/// All boilerplate files for `project`, with the routing table pointing at `route`.
pub fn files(project: &Project, route: &RouteDescriptor, extension: &str) -> Vec<GeneratedFile> {
    vec![
        file("package.json", package_json(project)),
        file("vite.config.js", vite_config()),
        file(".gitignore", GITIGNORE.to_string()),
        file("README.md", readme(project)),
        file("index.html", index_html(project, extension)),
        file(&format!("src/main.{}", extension), main_entry()),
        file(&format!("src/App.{}", extension), app(route)),
        file("src/styles/global.css", global_css(project)),
    ]
}

fn file(path: &str, contents: String) -> GeneratedFile {
    GeneratedFile {
        path: path.to_string(),
        contents,
    }
}

fn version(project: &Project) -> &str {
    if project.version.is_empty() {
        DEFAULT_VERSION
    } else {
        &project.version
    }
}

pub fn package_json(project: &Project) -> String {
    let manifest = json!({
        "name": project.id,
        "version": version(project),
        "type": "module",
        "scripts": {
            "dev": "vite",
            "build": "vite build",
            "preview": "vite preview",
            "lint": "eslint src"
        },
        "dependencies": {
            "react": "^18.2.0",
            "react-dom": "^18.2.0",
            "react-router-dom": "^6.20.0",
            "react-helmet-async": "^2.0.4"
        },
        "devDependencies": {
            "@types/react": "^18.2.43",
            "@types/react-dom": "^18.2.17",
            "@vitejs/plugin-react": "^4.2.1",
            "vite": "^5.0.8",
            "eslint": "^8.55.0",
            "eslint-plugin-react": "^7.33.2"
        }
    });
    // A `json!` value always serializes.
    let mut out = serde_json::to_string_pretty(&manifest).unwrap_or_default();
    out.push('\n');
    out
}

fn vite_config() -> String {
    format!(
        "import {{ defineConfig }} from 'vite';
import react from '@vitejs/plugin-react';

export default defineConfig({{
  plugins: [react()],
  server: {{
    port: {},
  }},
}});
",
        DEV_SERVER_PORT
    )
}

fn readme(project: &Project) -> String {
    format!(
        "# {name}

Generated from an atomic design structure.

## Getting Started

```bash
npm install
npm run dev
npm run build
```

## Project Structure

- `src/components/atoms` - basic UI elements
- `src/components/molecules` - combinations of atoms
- `src/components/organisms` - page sections
- `src/pages` - page components
- `src/styles` - global styles

## Version

{version}
",
        name = project.name,
        version = version(project)
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn index_html(project: &Project, extension: &str) -> String {
    let mut head = vec![
        "<meta charset=\"UTF-8\" />".to_string(),
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />".to_string(),
        format!("<title>{}</title>", escape_html(&project.name)),
    ];
    let fonts = project
        .third_party
        .fonts
        .as_ref()
        .map(|f| f.google.as_slice())
        .unwrap_or_default();
    if !fonts.is_empty() {
        head.push("<link rel=\"preconnect\" href=\"https://fonts.googleapis.com\" />".to_string());
        head.push(
            "<link rel=\"preconnect\" href=\"https://fonts.gstatic.com\" crossorigin />".to_string(),
        );
        for url in fonts {
            head.push(format!("<link href=\"{}\" rel=\"stylesheet\" />", escape_attr(url)));
        }
    }
    let head: Vec<String> = head.into_iter().map(|line| format!("    {}", line)).collect();

    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
  <head>
{head}
  </head>
  <body>
    <div id=\"root\"></div>
    <script type=\"module\" src=\"/src/main.{ext}\"></script>
  </body>
</html>
",
        head = head.join("\n"),
        ext = extension
    )
}

fn main_entry() -> String {
    "import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './App';

ReactDOM.createRoot(document.getElementById('root')).render(
  <React.StrictMode>
    <App />
  </React.StrictMode>
);
"
    .to_string()
}

pub fn app(route: &RouteDescriptor) -> String {
    let tree = Element::new("HelmetProvider").child(
        Element::new("BrowserRouter").child(
            Element::new("Routes").child(
                Element::void("Route")
                    .attr("path", route.path.as_str())
                    .expr_attr("element", format!("{{<{} />}}", route.component)),
            ),
        ),
    );
    format!(
        "import React from 'react';
import {{ BrowserRouter, Routes, Route }} from 'react-router-dom';
import {{ HelmetProvider }} from 'react-helmet-async';
import {name} from './pages/{name}';
import './styles/global.css';

function App() {{
  return (
{tree}
  );
}}

export default App;
",
        name = route.component,
        tree = crate::element::indent(&tree.to_jsx(), 2)
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// GLOBAL STYLE SHEET
// ═══════════════════════════════════════════════════════════════════════════════

/// `--<prefix>-<key>` custom properties, with `_` in keys turned into `-`.
fn custom_properties<'a, V: ToString>(
    prefix: &str,
    entries: impl IntoIterator<Item = (&'a String, V)>,
) -> Vec<String> {
    entries
        .into_iter()
        .map(|(key, value)| {
            format!("  --{}-{}: {};", prefix, key.replace('_', "-"), value.to_string())
        })
        .collect()
}

fn rule(selector: &str, declarations: &[(&str, &str)]) -> String {
    let styles: ValueMap = declarations
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    style::to_rule(selector, &styles)
}

pub fn global_css(project: &Project) -> String {
    let brand = &project.brand;
    let typography = &brand.typography;

    let mut vars = Vec::new();
    vars.extend(custom_properties("color", &brand.colors));
    vars.extend(custom_properties("font-family", &typography.font_family));
    vars.extend(custom_properties("font-size", &typography.font_sizes));
    vars.extend(custom_properties("font-weight", &typography.font_weights));
    vars.extend(custom_properties("spacing", &brand.spacing));
    vars.extend(custom_properties("breakpoint", &brand.breakpoints));

    let mut blocks = vec![format!(":root {{\n{}\n}}", vars.join("\n"))];

    if project.global_styles.reset {
        blocks.push("/* Reset */".to_string());
        blocks.push(rule(
            "*",
            &[("margin", "0"), ("padding", "0"), ("box-sizing", "border-box")],
        ));
        blocks.push(rule(
            "body",
            &[
                ("font-family", "var(--font-family-primary)"),
                ("font-size", "var(--font-size-body)"),
                ("color", "var(--color-text)"),
                ("background-color", "var(--color-background)"),
                ("line-height", "1.6"),
            ],
        ));
    }
    if project.global_styles.normalize {
        blocks.push("/* Normalize */".to_string());
        blocks.push(rule("img", &[("max-width", "100%"), ("height", "auto")]));
        blocks.push(rule("a", &[("color", "inherit"), ("text-decoration", "none")]));
        blocks.push(rule("button", &[("font-family", "inherit"), ("cursor", "pointer")]));
    }

    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(v: serde_json::Value) -> Project {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_root_variables_in_declaration_order() {
        let p = project(json!({
            "id": "demo", "name": "Demo",
            "brand": {
                "colors": { "primary": "#0055ff", "text_muted": "#666" },
                "typography": {
                    "fontFamily": { "primary": "Inter, sans-serif" },
                    "fontSizes": { "body": "16px" },
                    "fontWeights": { "bold": 700, "normal": "normal" }
                },
                "spacing": { "md": "16px" },
                "breakpoints": { "tablet": "1024px" }
            },
            "globalStyles": { "reset": false, "normalize": false }
        }));
        assert_eq!(
            global_css(&p),
            ":root {
  --color-primary: #0055ff;
  --color-text-muted: #666;
  --font-family-primary: Inter, sans-serif;
  --font-size-body: 16px;
  --font-weight-bold: 700;
  --font-weight-normal: normal;
  --spacing-md: 16px;
  --breakpoint-tablet: 1024px;
}
"
        );
    }

    #[test]
    fn test_reset_and_normalize_rules() {
        let css = global_css(&project(json!({ "id": "demo", "name": "Demo" })));
        assert!(css.contains("* {\n  margin: 0;\n  padding: 0;\n  box-sizing: border-box;\n}"));
        assert!(css.contains("  font-family: var(--font-family-primary);\n"));
        assert!(css.contains("img {\n  max-width: 100%;\n  height: auto;\n}"));
        assert!(css.contains("button {\n  font-family: inherit;\n  cursor: pointer;\n}"));
    }

    #[test]
    fn test_app_routes_to_page() {
        let route = RouteDescriptor {
            path: "/about".into(),
            component: "About".into(),
            title: "About".into(),
        };
        let src = app(&route);
        assert!(src.contains("import About from './pages/About';"));
        assert!(src.contains(
            "    <HelmetProvider>\n      <BrowserRouter>\n        <Routes>\n          <Route path=\"/about\" element={<About />} />\n        </Routes>\n      </BrowserRouter>\n    </HelmetProvider>"
        ));
    }

    #[test]
    fn test_index_html_fonts_and_title() {
        let p = project(json!({
            "id": "demo", "name": "Demo & Co",
            "thirdParty": { "fonts": { "google": ["https://fonts.googleapis.com/css2?family=Inter"] } }
        }));
        let html = index_html(&p, "jsx");
        assert!(html.contains("    <title>Demo &amp; Co</title>\n"));
        assert!(html.contains("<link href=\"https://fonts.googleapis.com/css2?family=Inter\" rel=\"stylesheet\" />"));
        assert!(html.contains("<script type=\"module\" src=\"/src/main.jsx\"></script>"));

        let bare = index_html(&project(json!({ "id": "demo", "name": "Demo" })), "jsx");
        assert!(!bare.contains("preconnect"));
    }

    #[test]
    fn test_package_json() {
        let manifest: serde_json::Value =
            serde_json::from_str(&package_json(&project(json!({ "id": "demo", "name": "Demo" }))))
                .unwrap();
        assert_eq!(manifest["name"], "demo");
        assert_eq!(manifest["version"], DEFAULT_VERSION);
        assert!(manifest["dependencies"]["react-helmet-async"].is_string());
        assert!(manifest["devDependencies"]["vite"].is_string());
    }

    #[test]
    fn test_file_list() {
        let route = RouteDescriptor {
            path: "/".into(),
            component: "Home".into(),
            title: String::new(),
        };
        let p = project(json!({ "id": "demo", "name": "Demo" }));
        let paths: Vec<String> = files(&p, &route, "jsx").into_iter().map(|f| f.path).collect();
        assert_eq!(
            paths,
            [
                "package.json",
                "vite.config.js",
                ".gitignore",
                "README.md",
                "index.html",
                "src/main.jsx",
                "src/App.jsx",
                "src/styles/global.css"
            ]
        );
    }
}
