use std::sync::LazyLock;

use crate::catalog::{self, Family, SHAPE_COUNT};

/// 3-channel color in the renderer's native BGR byte order.
pub type Bgr8 = [u8; 3];

/// Color of the silhouette boundary strokes.
pub const STROKE: Bgr8 = [80, 80, 80];

const PIECE_SATURATION: f64 = 0.20;
const PIECE_VALUE: f64 = 0.97;
const UNFILLED_VALUE: f64 = 0.70;

/// Standard HSV to RGB conversion, reordered to BGR and scaled to 0..=255.
///
/// Hue is in degrees [0, 360), saturation and value in [0, 1]. Channels are
/// truncated, not rounded, when narrowed to bytes; existing frame fixtures
/// depend on the truncating cast.
pub fn hsv_to_bgr(hue: f64, saturation: f64, value: f64) -> Bgr8 {
    let (r, g, b) = hsv_to_rgb(hue / 360.0, saturation, value);
    [byte(b), byte(g), byte(r)]
}

fn byte(channel: f64) -> u8 {
    (255.0 * channel) as u8
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let i = (h * 6.0) as i64;
    let f = h * 6.0 - i as f64;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i.rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

fn family_hue(family: Family) -> f64 {
    match family {
        Family::O => 182.0,
        Family::I => 59.0,
        Family::J => 231.0,
        Family::L => 34.0,
        Family::S => 113.0,
        Family::Z => 0.0,
        Family::T => 302.0,
    }
}

// Derived once at first use; one entry per shape id, id 0 being the
// unfilled/background color.
static PIECE_COLORS: LazyLock<[Bgr8; SHAPE_COUNT]> = LazyLock::new(|| {
    let mut table = [[0u8; 3]; SHAPE_COUNT];
    table[0] = hsv_to_bgr(0.0, 0.0, UNFILLED_VALUE);
    for (id, entry) in table.iter_mut().enumerate().skip(1) {
        if let Some(family) = catalog::family(id as u8) {
            *entry = hsv_to_bgr(family_hue(family), PIECE_SATURATION, PIECE_VALUE);
        }
    }
    table
});

/// Fill color for a shape id. Id 0 maps to the unfilled/background color.
pub fn piece_color(id: u8) -> Bgr8 {
    PIECE_COLORS[id as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfilled_color_is_plain_gray() {
        assert_eq!(piece_color(0), [178, 178, 178]);
    }

    #[test]
    fn family_colors_match_the_reference_palette() {
        assert_eq!(piece_color(1), [247, 245, 197]); // O
        assert_eq!(piece_color(2), [197, 246, 247]); // I
        assert_eq!(piece_color(4), [247, 205, 197]); // J
        assert_eq!(piece_color(8), [197, 225, 247]); // L
        assert_eq!(piece_color(12), [197, 247, 203]); // S
        assert_eq!(piece_color(14), [197, 197, 247]); // Z
        assert_eq!(piece_color(16), [245, 197, 247]); // T
    }

    #[test]
    fn rotations_share_their_family_color() {
        assert_eq!(piece_color(2), piece_color(3));
        for id in 5..=7 {
            assert_eq!(piece_color(4), piece_color(id));
        }
        for id in 17..=19 {
            assert_eq!(piece_color(16), piece_color(id));
        }
    }

    #[test]
    fn primary_hues_convert_exactly() {
        assert_eq!(hsv_to_bgr(0.0, 1.0, 1.0), [0, 0, 255]);
        assert_eq!(hsv_to_bgr(120.0, 1.0, 1.0), [0, 255, 0]);
        assert_eq!(hsv_to_bgr(240.0, 1.0, 1.0), [255, 0, 0]);
    }
}
