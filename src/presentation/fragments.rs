//! Render a content item into a markup fragment.
//!
//! Every interpolation goes through the `safe` filter: submitted values are
//! spliced into page markup verbatim, without escaping. That passthrough is
//! part of the engine's contract with existing producers, not an oversight;
//! changing it would alter rendered output for fields that contain markup.

use askama::{Error as AskamaError, Template};
use thiserror::Error;

use crate::domain::content::{ComponentKind, ContentItem, DEFAULT_DEAL_CTA, DEFAULT_DEAL_TAG};

#[derive(Debug, Error)]
#[error("fragment template `{template}` failed to render")]
pub struct FragmentRenderError {
    pub(crate) template: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

#[derive(Template)]
#[template(path = "fragments/deal.html")]
struct DealFragment<'a> {
    tag: &'a str,
    title: &'a str,
    cta: &'a str,
}

#[derive(Template)]
#[template(path = "fragments/recommendation.html")]
struct RecommendationFragment<'a> {
    badge: Option<&'a str>,
    image: &'a str,
    title: &'a str,
    subtitle: &'a str,
}

#[derive(Template)]
#[template(path = "fragments/destination.html")]
struct DestinationFragment<'a> {
    badge: Option<&'a str>,
    image: &'a str,
    title: &'a str,
    subtitle: &'a str,
}

/// Render `item` into the fragment shape its component kind selects.
/// Deterministic: the same item always yields the same markup.
pub fn render_fragment(item: &ContentItem) -> Result<String, FragmentRenderError> {
    let title = item.resolved_title();

    match item.component_kind() {
        ComponentKind::Deal => DealFragment {
            tag: item.tag.as_deref().unwrap_or(DEFAULT_DEAL_TAG),
            title,
            cta: item.cta.as_deref().unwrap_or(DEFAULT_DEAL_CTA),
        }
        .render()
        .map_err(|error| FragmentRenderError {
            template: "fragments/deal.html",
            error,
        }),
        ComponentKind::Recommendation => RecommendationFragment {
            badge: item.badge.as_deref(),
            image: item.resolved_image(),
            title,
            subtitle: item.resolved_subtitle(),
        }
        .render()
        .map_err(|error| FragmentRenderError {
            template: "fragments/recommendation.html",
            error,
        }),
        ComponentKind::Destination => DestinationFragment {
            badge: item.badge.as_deref(),
            image: item.resolved_image(),
            title,
            subtitle: item.resolved_subtitle(),
        }
        .render()
        .map_err(|error| FragmentRenderError {
            template: "fragments/destination.html",
            error,
        }),
    }
}
