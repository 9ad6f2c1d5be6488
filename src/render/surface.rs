//! Render surface: the last markup written to each screen region
//!
//! The surface stands in for the DOM. Writing a region whose markup did not
//! change is a no-op, so callers can re-render freely and only real changes
//! are counted as patches.

use super::templates::{LIST_SLOT, Templates};
use crate::core::error::RenderError;
use crate::core::events::Region;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// A region whose markup changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub region: Region,
    pub html: String,
}

#[derive(Serialize)]
struct PageView<'a> {
    topbar: &'a str,
    nav: &'a str,
    content: String,
}

/// Current markup per region
#[derive(Debug, Clone, Default)]
pub struct Surface {
    regions: BTreeMap<Region, String>,
    patches: Vec<Patch>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a region; returns whether its markup changed
    pub fn write(&mut self, region: Region, html: String) -> bool {
        if self.regions.get(&region) == Some(&html) {
            return false;
        }
        debug!(region = ?region, bytes = html.len(), "region patched");
        self.patches.push(Patch {
            region,
            html: html.clone(),
        });
        self.regions.insert(region, html);
        true
    }

    /// Empty a region (e.g. no list on the landing page)
    pub fn clear(&mut self, region: Region) -> bool {
        self.write(region, String::new())
    }

    pub fn get(&self, region: Region) -> Option<&str> {
        self.regions.get(&region).map(String::as_str)
    }

    /// Patches applied since the last call
    pub fn take_patches(&mut self) -> Vec<Patch> {
        std::mem::take(&mut self.patches)
    }

    /// Whole document, with the list placed into its slot in the content
    pub fn document(&self, templates: &Templates) -> Result<String, RenderError> {
        let region = |r| self.get(r).unwrap_or_default();
        let content = region(Region::Content).replacen(
            LIST_SLOT,
            &format!(r#"<div data-region="list">{}</div>"#, region(Region::List)),
            1,
        );
        templates.render(
            Templates::PAGE,
            &PageView {
                topbar: region(Region::TopBar),
                nav: region(Region::Nav),
                content,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_write_is_noop() {
        let mut surface = Surface::new();
        assert!(surface.write(Region::Nav, "<nav></nav>".to_string()));
        assert!(!surface.write(Region::Nav, "<nav></nav>".to_string()));
        assert!(surface.write(Region::Nav, "<nav>x</nav>".to_string()));

        let patches = surface.take_patches();
        assert_eq!(patches.len(), 2);
        assert!(surface.take_patches().is_empty());
    }

    #[test]
    fn test_document_places_list_in_slot() {
        let templates = Templates::new().unwrap();
        let mut surface = Surface::new();
        surface.write(Region::TopBar, "<header>top</header>".to_string());
        surface.write(Region::Content, format!("<section>{}</section>", LIST_SLOT));
        surface.write(Region::List, "<table></table>".to_string());

        let html = surface.document(&templates).unwrap();
        assert!(html.contains("<header>top</header>"));
        assert!(html.contains(r#"<section><div data-region="list"><table></table></div></section>"#));
    }
}
