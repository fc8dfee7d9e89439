// CSS transform assembly for the scrolling text element. The engine's
// offset is one-dimensional; this turns it into the 2-D transform value and
// anchor coordinate the host assigns verbatim. Mirroring flips only the
// centering translate, never the offset.

use serde::{Deserialize, Serialize};

use crate::types::{Axis, ScrollConfig, ScrollExtent};

/// Ready-to-assign placement for the text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Value for the element's `transform` property.
    pub transform: String,
    /// Anchor coordinate in px: `top` in vertical mode, `left` in
    /// horizontal mode. Always the viewport size, so a zero shift parks the
    /// text just outside the leading edge.
    pub anchor_px: f64,
}

impl Placement {
    /// Placement for an engine offset.
    pub fn compute(config: &ScrollConfig, extent: ScrollExtent, offset: f64) -> Self {
        let shift = offset - extent.viewport_size;
        let transform = match (config.axis, config.mirrored) {
            (Axis::Vertical, false) => {
                format!("translateX(-50%) translateY({}px)", shift)
            }
            (Axis::Vertical, true) => {
                format!("scaleX(-1) translateX(50%) translateY({}px)", shift)
            }
            (Axis::Horizontal, false) => {
                format!("translateY(-50%) translateX({}px)", shift)
            }
            (Axis::Horizontal, true) => {
                format!("scaleX(-1) translateY(-50%) translateX({}px)", shift)
            }
        };
        Placement {
            transform,
            anchor_px: extent.viewport_size,
        }
    }

    /// Placement for the home position, with no shift along the scroll
    /// axis. Used by reset handling before any tick has run.
    pub fn home(config: &ScrollConfig, extent: ScrollExtent) -> Self {
        let transform = match (config.axis, config.mirrored) {
            (Axis::Vertical, false) => "translateX(-50%)".to_string(),
            (Axis::Vertical, true) => "scaleX(-1) translateX(50%)".to_string(),
            (Axis::Horizontal, false) => "translateY(-50%)".to_string(),
            (Axis::Horizontal, true) => "scaleX(-1) translateY(-50%)".to_string(),
        };
        Placement {
            transform,
            anchor_px: extent.viewport_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(axis: Axis, mirrored: bool) -> ScrollConfig {
        ScrollConfig {
            axis,
            mirrored,
            ..Default::default()
        }
    }

    #[test]
    fn vertical_transform_matches_renderer_convention() {
        let extent = ScrollExtent::new(600.0, 200.0);
        let placement = Placement::compute(&config(Axis::Vertical, false), extent, 450.0);
        assert_eq!(placement.transform, "translateX(-50%) translateY(-150px)");
        assert_eq!(placement.anchor_px, 600.0);
    }

    #[test]
    fn horizontal_transform_matches_renderer_convention() {
        let extent = ScrollExtent::new(800.0, 300.0);
        let placement = Placement::compute(&config(Axis::Horizontal, false), extent, 200.0);
        assert_eq!(placement.transform, "translateY(-50%) translateX(-600px)");
        assert_eq!(placement.anchor_px, 800.0);
    }

    #[test]
    fn mirroring_flips_only_the_centering_translate() {
        let extent = ScrollExtent::new(600.0, 200.0);
        let plain = Placement::compute(&config(Axis::Vertical, false), extent, 450.0);
        let mirrored = Placement::compute(&config(Axis::Vertical, true), extent, 450.0);

        assert_eq!(
            mirrored.transform,
            "scaleX(-1) translateX(50%) translateY(-150px)"
        );
        // The scroll shift itself is identical in both.
        assert!(plain.transform.ends_with("translateY(-150px)"));
        assert!(mirrored.transform.ends_with("translateY(-150px)"));
    }

    #[test]
    fn home_placement_has_no_scroll_shift() {
        let extent = ScrollExtent::new(600.0, 200.0);
        assert_eq!(
            Placement::home(&config(Axis::Vertical, false), extent).transform,
            "translateX(-50%)"
        );
        assert_eq!(
            Placement::home(&config(Axis::Horizontal, true), extent).transform,
            "scaleX(-1) translateY(-50%)"
        );
    }
}
