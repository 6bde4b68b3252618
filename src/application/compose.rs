//! Page composition: applying the content queue to page markup.

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, warn};

use crate::application::content::ContentStore;
use crate::domain::markup;
use crate::presentation::fragments;

/// Applies queued content items to page markup, one section at a time.
#[derive(Clone)]
pub struct CompositionService {
    content: Arc<ContentStore>,
}

impl CompositionService {
    pub fn new(content: Arc<ContentStore>) -> Self {
        Self { content }
    }

    /// Thread every matching queued item through the slot injector, in
    /// insertion order, and return the transformed markup.
    ///
    /// Items scoped to a different section are skipped, as are items whose
    /// target slot is absent or empty. A fragment that fails to render, or
    /// finds no slot in the page, never fails the render; the page simply
    /// passes through unchanged for that item.
    pub fn compose(&self, page_markup: &str, section: &str) -> String {
        let mut updated = page_markup.to_string();

        for item in self.content.snapshot() {
            if !item.applies_to(section) {
                continue;
            }
            let Some(slot) = item.target.as_deref().filter(|t| !t.is_empty()) else {
                continue;
            };

            let fragment = match fragments::render_fragment(&item) {
                Ok(fragment) => fragment,
                Err(error) => {
                    warn!(
                        target = "inlay::compose",
                        error = %error,
                        slot,
                        section,
                        "fragment render failed; skipping item"
                    );
                    counter!("inlay_fragments_skipped_total").increment(1);
                    continue;
                }
            };

            let injection = markup::inject_fragment(&updated, slot, &fragment);
            if injection.applied {
                counter!("inlay_fragments_injected_total").increment(1);
            } else {
                debug!(
                    target = "inlay::compose",
                    slot, section, "no slot for fragment; markup unchanged"
                );
                counter!("inlay_fragments_skipped_total").increment(1);
            }
            updated = injection.markup;
        }

        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::ContentItem;

    fn item(target: &str, section: Option<&str>, title: &str) -> ContentItem {
        ContentItem {
            target: Some(target.to_string()),
            section: section.map(str::to_string),
            title: Some(title.to_string()),
            ..ContentItem::default()
        }
    }

    fn service_with(items: Vec<ContentItem>) -> CompositionService {
        let store = Arc::new(ContentStore::new());
        for entry in items {
            store.push(entry);
        }
        CompositionService::new(store)
    }

    #[test]
    fn compose_filters_by_section() {
        let service = service_with(vec![
            item("hero", Some("home"), "For home"),
            item("hero", Some("deals"), "For deals"),
            item("hero", None, "For everyone"),
        ]);

        let page = r#"<div data-inject="hero"></div>"#;
        let composed = service.compose(page, "home");

        assert!(composed.contains("For home"));
        assert!(composed.contains("For everyone"));
        assert!(!composed.contains("For deals"));
    }

    #[test]
    fn compose_skips_items_without_usable_target() {
        let empty_target = ContentItem {
            target: Some(String::new()),
            title: Some("ghost".into()),
            ..ContentItem::default()
        };
        let service = service_with(vec![empty_target]);

        let page = r#"<div data-inject=""></div>"#;
        assert_eq!(service.compose(page, "index"), page);
    }

    #[test]
    fn repeated_targets_stack_in_queue_order() {
        let service = service_with(vec![
            item("rail", None, "first queued"),
            item("rail", None, "second queued"),
        ]);

        let composed = service.compose(r#"<div data-inject="rail"></div>"#, "index");

        // Each injection lands right before the same boundary, so the most
        // recently queued fragment sits innermost.
        let first = composed.find("first queued").expect("first fragment");
        let second = composed.find("second queued").expect("second fragment");
        assert!(first < second);
        assert_eq!(composed.matches("data-injected=\"true\"").count(), 1);
    }

    #[test]
    fn compose_without_matching_slot_is_identity() {
        let service = service_with(vec![item("missing", None, "orphan")]);

        let page = "<main><div>no slots</div></main>";
        assert_eq!(service.compose(page, "index"), page);
    }

    #[test]
    fn compose_is_deterministic_over_a_snapshot() {
        let service = service_with(vec![item("hero", None, "stable")]);
        let page = r#"<div data-inject="hero"></div>"#;

        assert_eq!(service.compose(page, "a"), service.compose(page, "a"));
    }
}
