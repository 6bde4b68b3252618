//! Submitted content items and the closed set of fragment kinds.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Title shown when a submission carries none.
pub const DEFAULT_TITLE: &str = "New experience";

/// Image used when a submission has no image, or an empty one.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1469474968028-56623f02e42e?auto=format&fit=crop&w=800&q=80";

/// Ribbon label default for deal fragments.
pub const DEFAULT_DEAL_TAG: &str = "New";

/// Button label default for deal fragments.
pub const DEFAULT_DEAL_CTA: &str = "View";

/// One externally submitted content item.
///
/// All recognized keys are optional at the type level; the submission
/// boundary enforces that `target` is present before an item enters the
/// queue. Unrecognized keys are retained in `extra` so the listing endpoint
/// echoes submissions back exactly as they arrived.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Legacy alias for `subtitle`, still accepted from older producers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl ContentItem {
    /// Whether this item applies to a page rendered for `section`. Items
    /// without a section apply everywhere.
    pub fn applies_to(&self, section: &str) -> bool {
        match self.section.as_deref() {
            None => true,
            Some(own) => own == section,
        }
    }

    pub fn component_kind(&self) -> ComponentKind {
        ComponentKind::resolve(self.component.as_deref())
    }

    pub fn resolved_title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// `subtitle`, falling back to the legacy `meta` key, then empty.
    pub fn resolved_subtitle(&self) -> &str {
        self.subtitle
            .as_deref()
            .or(self.meta.as_deref())
            .unwrap_or("")
    }

    /// `image`, with absent and empty both falling back to the placeholder.
    pub fn resolved_image(&self) -> &str {
        match self.image.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => PLACEHOLDER_IMAGE,
        }
    }
}

/// The closed set of fragment shapes a content item can render as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Deal,
    Recommendation,
    Destination,
}

impl ComponentKind {
    /// Resolve a raw `component` value; anything unrecognized (including
    /// absence) is a destination card.
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some("deal") => Self::Deal,
            Some("recommendation") => Self::Recommendation,
            _ => Self::Destination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_component_falls_back_to_destination() {
        assert_eq!(ComponentKind::resolve(Some("deal")), ComponentKind::Deal);
        assert_eq!(
            ComponentKind::resolve(Some("recommendation")),
            ComponentKind::Recommendation
        );
        assert_eq!(
            ComponentKind::resolve(Some("carousel")),
            ComponentKind::Destination
        );
        assert_eq!(ComponentKind::resolve(None), ComponentKind::Destination);
    }

    #[test]
    fn subtitle_falls_back_to_legacy_meta() {
        let item = ContentItem {
            meta: Some("from meta".into()),
            ..ContentItem::default()
        };
        assert_eq!(item.resolved_subtitle(), "from meta");

        let both = ContentItem {
            subtitle: Some("primary".into()),
            meta: Some("ignored".into()),
            ..ContentItem::default()
        };
        assert_eq!(both.resolved_subtitle(), "primary");

        assert_eq!(ContentItem::default().resolved_subtitle(), "");
    }

    #[test]
    fn empty_image_uses_placeholder() {
        let empty = ContentItem {
            image: Some(String::new()),
            ..ContentItem::default()
        };
        assert_eq!(empty.resolved_image(), PLACEHOLDER_IMAGE);

        let set = ContentItem {
            image: Some("https://example.test/a.jpg".into()),
            ..ContentItem::default()
        };
        assert_eq!(set.resolved_image(), "https://example.test/a.jpg");
    }

    #[test]
    fn sectionless_items_apply_everywhere() {
        let everywhere = ContentItem::default();
        assert!(everywhere.applies_to("index"));
        assert!(everywhere.applies_to("deals"));

        let scoped = ContentItem {
            section: Some("deals".into()),
            ..ContentItem::default()
        };
        assert!(scoped.applies_to("deals"));
        assert!(!scoped.applies_to("index"));
    }

    #[test]
    fn unknown_keys_round_trip_through_serde() {
        let raw = serde_json::json!({
            "target": "hero",
            "campaign": "summer-24"
        });
        let item: ContentItem = serde_json::from_value(raw.clone()).expect("deserialize");
        assert_eq!(item.target.as_deref(), Some("hero"));
        assert_eq!(
            item.extra.get("campaign").and_then(Value::as_str),
            Some("summer-24")
        );

        let back = serde_json::to_value(&item).expect("serialize");
        assert_eq!(back, raw);
    }
}
