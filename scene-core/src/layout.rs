//! Viewport-to-layout resolution.
//!
//! [`Layout::resolve`] maps the current surface dimensions to a scale
//! factor and a set of named anchor regions. It is a pure function:
//! the layout is recomputed wholesale on every resize and never
//! interpolated between two viewports.

use glam::Vec2;

/// Reference viewport the scale factor is measured against.
pub const BASE_WIDTH: f32 = 1024.0;
pub const BASE_HEIGHT: f32 = 600.0;

/// Horizontal anchor centers as fractions of surface width.
const INPUT_X_FRACTION: f32 = 0.18;
const NETWORK_X_FRACTION: f32 = 0.50;
const OUTPUT_X_FRACTION: f32 = 0.82;

/// Vertical content band as fractions of surface height.
const BAND_TOP_FRACTION: f32 = 0.05;
const BAND_HEIGHT_FRACTION: f32 = 0.55;

/// Usable width of each of the three sections, as a fraction of width.
const SECTION_WIDTH_FRACTION: f32 = 0.28;

/// Horizontal centers of the input, network and output zones, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchors {
    pub input_x: f32,
    pub network_x: f32,
    pub output_x: f32,
}

/// Vertical content band in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub top: f32,
    pub height: f32,
    pub section_width: f32,
}

/// Resolved layout for one viewport size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub scale: f32,
    pub anchors: Anchors,
    pub band: Band,
}

impl Layout {
    /// Resolves the layout for a surface of `width` x `height` pixels.
    ///
    /// The scale is the smaller of the width and height ratios against
    /// the 1024x600 baseline, clamped to `[1.0, 2.0]`. Anchor centers
    /// and the content band are fixed fractional splits, independent of
    /// the scale.
    ///
    /// ### Returns
    /// A fully-resolved [`Layout`]. Deterministic and idempotent for
    /// identical inputs.
    pub fn resolve(width: f32, height: f32) -> Self {
        let scale = (width / BASE_WIDTH)
            .min(height / BASE_HEIGHT)
            .clamp(1.0, 2.0);

        Self {
            scale,
            anchors: Anchors {
                input_x: width * INPUT_X_FRACTION,
                network_x: width * NETWORK_X_FRACTION,
                output_x: width * OUTPUT_X_FRACTION,
            },
            band: Band {
                top: height * BAND_TOP_FRACTION,
                height: height * BAND_HEIGHT_FRACTION,
                section_width: width * SECTION_WIDTH_FRACTION,
            },
        }
    }

    /// Vertical center shared by the input panels, the network and the
    /// output gauge.
    pub fn content_center_y(&self) -> f32 {
        self.band.top + self.band.height * 0.45
    }

    /// Convenience constructor from a size vector.
    pub fn resolve_size(size: Vec2) -> Self {
        Self::resolve(size.x, size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_viewport_resolves_to_unit_scale() {
        let layout = Layout::resolve(1024.0, 600.0);
        assert_eq!(layout.scale, 1.0);
    }

    #[test]
    fn doubled_viewport_hits_the_upper_clamp() {
        // Raw ratio is exactly 2.0; the clamp keeps it there.
        let layout = Layout::resolve(2048.0, 1200.0);
        assert_eq!(layout.scale, 2.0);

        // Anything beyond stays clamped.
        let layout = Layout::resolve(4096.0, 2400.0);
        assert_eq!(layout.scale, 2.0);
    }

    #[test]
    fn small_viewport_is_floored_at_unit_scale() {
        // Raw ratio 0.5, floored to 1.0.
        let layout = Layout::resolve(512.0, 300.0);
        assert_eq!(layout.scale, 1.0);
    }

    #[test]
    fn scale_takes_the_smaller_axis_ratio() {
        // Width ratio 1.875, height ratio 1.2 -> 1.2 wins.
        let layout = Layout::resolve(1920.0, 720.0);
        assert!((layout.scale - 1.2).abs() < 1e-6);
    }

    #[test]
    fn scale_is_non_decreasing_under_proportional_growth() {
        let mut prev = 0.0_f32;
        for factor in [0.5, 0.8, 1.0, 1.3, 1.7, 2.0, 3.0] {
            let layout = Layout::resolve(1024.0 * factor, 600.0 * factor);
            assert!(layout.scale >= prev, "scale shrank at factor {factor}");
            assert!((1.0..=2.0).contains(&layout.scale));
            prev = layout.scale;
        }
    }

    #[test]
    fn anchors_are_fixed_fractions_of_width() {
        let layout = Layout::resolve(1000.0, 600.0);
        assert_eq!(layout.anchors.input_x, 180.0);
        assert_eq!(layout.anchors.network_x, 500.0);
        assert_eq!(layout.anchors.output_x, 820.0);
        assert_eq!(layout.band.section_width, 280.0);
    }

    #[test]
    fn band_is_fixed_fraction_of_height() {
        let layout = Layout::resolve(1024.0, 1000.0);
        assert_eq!(layout.band.top, 50.0);
        assert_eq!(layout.band.height, 550.0);
    }

    #[test]
    fn resolve_is_idempotent() {
        let a = Layout::resolve(1440.0, 900.0);
        let b = Layout::resolve(1440.0, 900.0);
        assert_eq!(a, b);
    }
}
