// Brand canvas and mask compositing

use crate::color::HexColor;
use image::{imageops, DynamicImage, GrayImage, RgbImage, RgbaImage};

/// Opaque square canvas filled with the brand color
pub fn brand_canvas(size: u32, background: HexColor) -> RgbImage {
    RgbImage::from_pixel(size, size, background.to_rgb())
}

/// Paste `canvas` onto a fully transparent buffer and use `mask` as its alpha
pub fn composite(canvas: &RgbImage, mask: &GrayImage) -> RgbaImage {
    debug_assert_eq!(canvas.dimensions(), mask.dimensions());

    let (width, height) = canvas.dimensions();
    let mut output = RgbaImage::new(width, height);
    let layer = DynamicImage::ImageRgb8(canvas.clone()).into_rgba8();
    imageops::replace(&mut output, &layer, 0, 0);
    apply_alpha(&mut output, mask);
    output
}

fn apply_alpha(image: &mut RgbaImage, mask: &GrayImage) {
    for (pixel, coverage) in image.pixels_mut().zip(mask.pixels()) {
        pixel.0[3] = coverage.0[0];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::mask::{corner_radius, rounded_rect_mask, OPAQUE, TRANSPARENT};
    use image::Rgba;

    const PURPLE: HexColor = HexColor::new(0x7B, 0x2C, 0xBF);

    #[test]
    fn canvas_is_solid_brand_color() {
        let canvas = brand_canvas(16, PURPLE);
        assert_eq!(canvas.dimensions(), (16, 16));
        assert!(canvas.pixels().all(|p| p.0 == [0x7B, 0x2C, 0xBF]));
    }

    #[test]
    fn composite_takes_alpha_from_mask() {
        let size = 64;
        let canvas = brand_canvas(size, PURPLE);
        let mask = rounded_rect_mask(size, corner_radius(size));
        let output = composite(&canvas, &mask);

        assert_eq!(output.get_pixel(0, 0).0[3], TRANSPARENT);
        assert_eq!(*output.get_pixel(32, 32), Rgba([0x7B, 0x2C, 0xBF, OPAQUE]));
        for (pixel, coverage) in output.pixels().zip(mask.pixels()) {
            assert_eq!(pixel.0[3], coverage.0[0]);
        }
    }
}
