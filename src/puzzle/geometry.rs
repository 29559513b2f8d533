// Heart silhouette and the markup built around it.
//
// One cubic-Bezier heart is drawn four times, each copy clipped to a quadrant of
// the 160x135 view box, so the filled copies read as jigsaw pieces of a single
// shape. A fifth unclipped copy is the outline.

use std::fmt::Write;

use super::{PIECE_COUNT, progress_label};

pub const HEART_PATH: &str = "M80,130 C80,130 5,85 5,45 C5,20 25,2 48,2 C62,2 74,10 80,22 C86,10 98,2 112,2 C135,2 155,20 155,45 C155,85 80,130 80,130 Z";
pub const VIEW_BOX: &str = "0 0 160 135";

pub const PIECE_CLASS: &str = "heart-piece-path";
pub const FILLED_CLASS: &str = "filled";
pub const FILLING_CLASS: &str = "filling";

pub const CONTAINER_ID: &str = "heartPuzzleContainer";
pub const PROGRESS_TEXT_ID: &str = "heartProgressText";
pub const OVERLAY_ID: &str = "heartUnlockOverlay";
pub const UNLOCK_HEART_ID: &str = "unlockHeart";
pub const UNLOCK_MESSAGE_ID: &str = "unlockMessage";

pub const UNLOCK_MESSAGE: &str =
    "You\u{2019}ve unlocked my heart. Now, let me show you the moments I will always remember. \u{2764}\u{FE0F}";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Upper pieces are 80x65, lower ones 80x70.
pub const CLIP_RECTS: [ClipRect; PIECE_COUNT] = [
    ClipRect { x: 0, y: 0, w: 80, h: 65 },
    ClipRect { x: 80, y: 0, w: 80, h: 65 },
    ClipRect { x: 0, y: 65, w: 80, h: 70 },
    ClipRect { x: 80, y: 65, w: 80, h: 70 },
];

/// Selector for the path of piece `idx`.
pub fn piece_selector(idx: usize) -> String {
    format!(".{PIECE_CLASS}[data-piece-index=\"{idx}\"]")
}

/// The four-piece SVG with the first `filled` pieces marked.
pub fn heart_svg(filled: usize) -> String {
    let mut svg = String::with_capacity(2048);
    let _ = write!(svg, "<svg viewBox=\"{VIEW_BOX}\" xmlns=\"http://www.w3.org/2000/svg\"><defs>");
    for (i, r) in CLIP_RECTS.iter().enumerate() {
        let _ = write!(
            svg,
            "<clipPath id=\"piece{i}\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/></clipPath>",
            r.x, r.y, r.w, r.h
        );
    }
    svg.push_str("</defs>");
    for i in 0..PIECE_COUNT {
        let class = if i < filled { format!("{PIECE_CLASS} {FILLED_CLASS}") } else { PIECE_CLASS.to_string() };
        let _ = write!(
            svg,
            "<path d=\"{HEART_PATH}\" class=\"{class}\" data-piece-index=\"{i}\" clip-path=\"url(#piece{i})\"/>"
        );
    }
    let _ = write!(svg, "<path d=\"{HEART_PATH}\" class=\"heart-outline\"/></svg>");
    svg
}

/// Inner HTML of the progress container.
pub fn puzzle_markup(filled: usize) -> String {
    format!(
        "<div class=\"heart-puzzle\">{}</div><div class=\"puzzle-label-text\">Heart Progress</div><div class=\"puzzle-progress\" id=\"{PROGRESS_TEXT_ID}\">{}</div>",
        heart_svg(filled),
        progress_label(filled)
    )
}

/// Inner HTML of the full-screen unlock overlay; the message starts hidden (CSS).
pub fn unlock_overlay_markup() -> String {
    format!(
        "<div class=\"heart-unlock-content\"><div class=\"full-heart-animation\" id=\"{UNLOCK_HEART_ID}\"><svg viewBox=\"{VIEW_BOX}\" xmlns=\"http://www.w3.org/2000/svg\"><path fill=\"#e91e63\" stroke=\"none\" d=\"{HEART_PATH}\" style=\"filter: drop-shadow(0 0 20px rgba(233, 30, 99, 0.6));\"/></svg></div><div class=\"unlock-message\" id=\"{UNLOCK_MESSAGE_ID}\">{UNLOCK_MESSAGE}</div></div>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_rects_tile_the_view_box() {
        let area: u32 = CLIP_RECTS.iter().map(|r| r.w * r.h).sum();
        assert_eq!(area, 160 * 135);
        assert!(CLIP_RECTS.iter().all(|r| r.x + r.w <= 160 && r.y + r.h <= 135));
    }

    #[test]
    fn test_svg_has_four_clipped_pieces_and_outline() {
        let svg = heart_svg(0);
        assert_eq!(svg.matches("<clipPath").count(), 4);
        assert_eq!(svg.matches(HEART_PATH).count(), 5);
        assert_eq!(svg.matches("clip-path=\"url(#piece").count(), 4);
        assert!(svg.contains("class=\"heart-outline\""));
        assert!(!svg.contains(FILLED_CLASS));
    }

    #[test]
    fn test_markup_carries_label() {
        let html = puzzle_markup(3);
        assert!(html.contains(">3/4 pieces<"));
        assert!(html.contains("id=\"heartProgressText\""));
    }

    #[test]
    fn test_overlay_markup_ids() {
        let html = unlock_overlay_markup();
        assert!(html.contains("id=\"unlockHeart\""));
        assert!(html.contains("id=\"unlockMessage\""));
        assert!(html.contains("#e91e63"));
    }
}
