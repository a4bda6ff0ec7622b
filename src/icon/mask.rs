// Rounded-rectangle opacity mask

use image::{GrayImage, Luma};

pub const OPAQUE: u8 = 255;
pub const TRANSPARENT: u8 = 0;

/// Corner radius for a badge of the given size
pub fn corner_radius(size: u32) -> u32 {
    size / 8
}

/// Build a `size` x `size` mask that is opaque inside a rounded square.
///
/// A pixel is opaque when its center lies inside the shape. The shape spans
/// `[0, size]` on both axes with quarter-circle corners of `radius`, so the
/// mask is symmetric under mirroring on either axis. No anti-aliasing: every
/// value is either [`OPAQUE`] or [`TRANSPARENT`].
pub fn rounded_rect_mask(size: u32, radius: u32) -> GrayImage {
    let extent = size as f64;
    let r = (radius as f64).min(extent / 2.0);

    GrayImage::from_fn(size, size, |x, y| {
        let px = x as f64 + 0.5;
        let py = y as f64 + 0.5;
        // nearest point on the inner rectangle the corner arcs are centered on
        let cx = px.clamp(r, extent - r);
        let cy = py.clamp(r, extent - r);
        let (dx, dy) = (px - cx, py - cy);

        if dx * dx + dy * dy <= r * r {
            Luma([OPAQUE])
        } else {
            Luma([TRANSPARENT])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha(mask: &GrayImage, x: u32, y: u32) -> u8 {
        mask.get_pixel(x, y).0[0]
    }

    #[test]
    fn radius_uses_integer_division() {
        assert_eq!(corner_radius(192), 24);
        assert_eq!(corner_radius(512), 64);
        assert_eq!(corner_radius(15), 1);
        assert_eq!(corner_radius(7), 0);
    }

    #[test]
    fn corners_are_cut_and_bands_are_opaque() {
        for size in [192, 512] {
            let r = corner_radius(size);
            let mask = rounded_rect_mask(size, r);
            let last = size - 1;

            for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
                assert_eq!(alpha(&mask, x, y), TRANSPARENT, "corner ({x},{y}) at {size}");
            }
            // edge midpoints sit on the straight part of the outline
            for (x, y) in [(size / 2, 0), (0, size / 2), (last, size / 2), (size / 2, last)] {
                assert_eq!(alpha(&mask, x, y), OPAQUE, "edge ({x},{y}) at {size}");
            }
            assert_eq!(alpha(&mask, size / 2, size / 2), OPAQUE);
            // where the arc starts
            assert_eq!(alpha(&mask, r, 0), OPAQUE);
            assert_eq!(alpha(&mask, 0, r), OPAQUE);
        }
    }

    #[test]
    fn every_pixel_outside_the_arcs_is_transparent() {
        let size = 192;
        let r = corner_radius(size);
        let mask = rounded_rect_mask(size, r);
        let rf = r as f64;

        for y in 0..r {
            for x in 0..r {
                let (dx, dy) = (rf - (x as f64 + 0.5), rf - (y as f64 + 0.5));
                let expected = if dx * dx + dy * dy <= rf * rf { OPAQUE } else { TRANSPARENT };
                assert_eq!(alpha(&mask, x, y), expected, "({x},{y})");
            }
        }
    }

    #[test]
    fn mask_is_mirror_symmetric() {
        let size = 100;
        let mask = rounded_rect_mask(size, corner_radius(size));
        for y in 0..size {
            for x in 0..size {
                let v = alpha(&mask, x, y);
                assert_eq!(v, alpha(&mask, size - 1 - x, y));
                assert_eq!(v, alpha(&mask, x, size - 1 - y));
            }
        }
    }

    #[test]
    fn zero_radius_is_a_plain_square() {
        let mask = rounded_rect_mask(6, 0);
        assert!(mask.pixels().all(|p| p.0[0] == OPAQUE));
    }

    #[test]
    fn mask_is_deterministic() {
        assert_eq!(rounded_rect_mask(512, 64), rounded_rect_mask(512, 64));
    }
}
