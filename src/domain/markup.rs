//! Slot location and fragment splicing over raw markup text.
//!
//! Pages are never parsed into a tree. A slot is the first element whose
//! opening tag carries `data-inject="<slot-id>"`, and its injection boundary
//! is found by a depth-counted scan over matching tag tokens. The scanner is
//! best-effort by design: markup that is not well formed may yield an early
//! or missing boundary, and both cases degrade to "markup unchanged".

/// Attribute marking an element as an injection slot.
pub const SLOT_ATTRIBUTE: &str = "data-inject";

/// Stamp inserted after a slot marker once the slot has received content.
pub const FILLED_STAMP: &str = " data-injected=\"true\"";

/// Tag name assumed for slot containers.
pub const CONTAINER_TAG: &str = "div";

// The stamp check only needs to look just past the marker; 40 bytes is
// enough to cover a previously inserted stamp plus surrounding whitespace.
const STAMP_SCAN_WINDOW: usize = 40;

/// Outcome of [`inject_fragment`]: the resulting markup plus whether the
/// fragment was actually spliced in. A missing marker or missing boundary
/// leaves the page usable, so callers that only care about the page can
/// ignore `applied`; tests and diagnostics can distinguish no-op from
/// success through it.
#[derive(Debug, Clone)]
pub struct Injection {
    pub markup: String,
    pub applied: bool,
}

/// Find the byte offset of the closing tag matching the container whose
/// opening tag contains `container_start`.
///
/// The cursor starts immediately after the `>` that terminates the opening
/// tag, with depth 1. Each step consumes the nearer of the next `<tag` and
/// `</tag>` tokens, incrementing or decrementing depth; the offset of the
/// closing token that brings depth to zero is returned. `None` means no
/// closing token remains in the text.
///
/// Unbalanced markup is not detected: a stray closing tag simply wins the
/// scan early. Keeping the scan permissive is intentional.
pub fn locate_container_end(markup: &str, container_start: usize, tag: &str) -> Option<usize> {
    if container_start >= markup.len() {
        return None;
    }

    let open_token = format!("<{tag}");
    let close_token = format!("</{tag}>");

    let opening_end = markup[container_start..]
        .find('>')
        .map(|offset| container_start + offset + 1)?;

    let mut cursor = opening_end;
    let mut depth: u32 = 1;

    while depth > 0 {
        let next_close = markup[cursor..].find(&close_token).map(|i| cursor + i)?;
        let next_open = markup[cursor..next_close].find(&open_token).map(|i| cursor + i);

        match next_open {
            Some(open) => {
                depth += 1;
                cursor = open + open_token.len();
            }
            None => {
                depth -= 1;
                cursor = next_close + close_token.len();
            }
        }
    }

    Some(cursor - close_token.len())
}

/// Splice `fragment` into the slot identified by `slot_id`.
///
/// The slot marker is stamped as filled exactly once; injection itself is
/// not idempotent, and repeated calls stack fragments with later calls
/// landing closer to the container boundary. When the marker or the
/// boundary cannot be found the markup is returned unchanged (modulo the
/// stamp, which may already have been added before the boundary scan).
pub fn inject_fragment(markup: &str, slot_id: &str, fragment: &str) -> Injection {
    let marker = format!("{SLOT_ATTRIBUTE}=\"{slot_id}\"");

    let Some(marker_index) = markup.find(&marker) else {
        return Injection {
            markup: markup.to_string(),
            applied: false,
        };
    };

    let mut updated = markup.to_string();

    let window_end = (marker_index + marker.len() + STAMP_SCAN_WINDOW).min(updated.len());
    if !contains_stamp(&updated.as_bytes()[marker_index..window_end]) {
        updated.insert_str(marker_index + marker.len(), FILLED_STAMP);
    }

    let Some(closing_index) = locate_container_end(&updated, marker_index, CONTAINER_TAG) else {
        return Injection {
            markup: updated,
            applied: false,
        };
    };

    updated.insert_str(closing_index, fragment);

    Injection {
        markup: updated,
        applied: true,
    }
}

// Byte-wise search so the fixed-size window never has to land on a char
// boundary.
fn contains_stamp(window: &[u8]) -> bool {
    let needle = FILLED_STAMP.trim_start().as_bytes();
    window.windows(needle.len()).any(|chunk| chunk == needle)
}
