//! Built-in `tera` templates
//!
//! Every template name ends in `.html`, so tera auto-escapes each `{{ }}`
//! expression. Only [`Templates::PAGE`] inserts pre-rendered regions with
//! `| safe`.

use crate::core::error::RenderError;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

/// Slot in the screen markup where the list region goes
pub const LIST_SLOT: &str = r#"<div data-region="list"></div>"#;

const BUILTIN: &[(&str, &str)] = &[
    ("list.html", include_str!("../../templates/list.html")),
    ("screen.html", include_str!("../../templates/screen.html")),
    ("topbar.html", include_str!("../../templates/topbar.html")),
    ("nav.html", include_str!("../../templates/nav.html")),
    ("landing.html", include_str!("../../templates/landing.html")),
    ("denied.html", include_str!("../../templates/denied.html")),
    ("detail.html", include_str!("../../templates/detail.html")),
    ("filters.html", include_str!("../../templates/filters.html")),
    ("offers.html", include_str!("../../templates/offers.html")),
    ("page.html", include_str!("../../templates/page.html")),
];

/// The storefront's template set
#[derive(Debug, Clone)]
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub const LIST: &'static str = "list.html";
    pub const SCREEN: &'static str = "screen.html";
    pub const TOP_BAR: &'static str = "topbar.html";
    pub const NAV: &'static str = "nav.html";
    pub const LANDING: &'static str = "landing.html";
    pub const DENIED: &'static str = "denied.html";
    pub const DETAIL: &'static str = "detail.html";
    pub const FILTERS: &'static str = "filters.html";
    pub const OFFERS: &'static str = "offers.html";
    pub const PAGE: &'static str = "page.html";

    /// Load the built-in templates
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.add_raw_templates(BUILTIN.iter().copied())
            .map_err(|e| RenderError::template("builtin", &e))?;
        Ok(Self { tera })
    }

    /// Replace or add a template (e.g. a themed `screen.html`)
    ///
    /// The name must end in `.html`; only those templates are autoescaped.
    pub fn override_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        if !name.ends_with(".html") {
            return Err(RenderError::Template {
                template: name.to_string(),
                message: "template names must end in .html".to_string(),
            });
        }
        self.tera
            .add_raw_template(name, source)
            .map_err(|e| RenderError::template(name, &e))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }

    /// Render `name` with a serializable view model as its context
    pub fn render<V: Serialize>(&self, name: &str, view: &V) -> Result<String, RenderError> {
        let context = Context::from_serialize(view).map_err(|e| RenderError::template(name, &e))?;
        let html = self
            .tera
            .render(name, &context)
            .map_err(|e| RenderError::template(name, &e))?;
        debug!(template = name, bytes = html.len(), "rendered");
        Ok(html)
    }

    /// Render a template that needs no data
    pub fn render_static(&self, name: &str) -> Result<String, RenderError> {
        self.tera
            .render(name, &Context::new())
            .map_err(|e| RenderError::template(name, &e))
    }
}
