// Badge icon pipeline: canvas -> mask -> composite -> glyph -> png

mod canvas;
mod encode;
mod glyph;
mod mask;

pub use glyph::{FontSource, InkBox};

use crate::color::HexColor;
use crate::config::Config;
use crate::error::IconError;
use glyph::{font_pixel_size, GlyphFont};
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Smallest accepted icon. From here on the radius is at least 2, which is
/// the first radius that clears the corner pixel.
pub const MIN_ICON_SIZE: u32 = 16;
pub const MAX_ICON_SIZE: u32 = 2048;

/// Rendering parameters shared by every icon size
#[derive(Clone, Debug, PartialEq)]
pub struct IconStyle {
    pub background: HexColor,
    pub font_path: PathBuf,
    pub font_scale: f32,
}

impl IconStyle {
    fn validate(&self, size: u32) -> Result<(), IconError> {
        if !(MIN_ICON_SIZE..=MAX_ICON_SIZE).contains(&size) {
            return Err(IconError::InvalidSize {
                size,
                min: MIN_ICON_SIZE,
                max: MAX_ICON_SIZE,
            });
        }
        if !(self.font_scale > 0.0 && self.font_scale <= 1.0) {
            return Err(IconError::InvalidFontScale(self.font_scale));
        }
        Ok(())
    }
}

/// An icon rendered in memory
pub struct RenderedIcon {
    pub image: RgbaImage,
    pub font: FontSource,
    /// Where the glyph's ink landed on the canvas
    pub glyph_box: InkBox,
}

/// Result of writing one icon to disk
#[derive(Clone, Debug, PartialEq)]
pub struct IconReport {
    pub path: PathBuf,
    pub size: u32,
    pub font: FontSource,
    pub glyph_box: InkBox,
}

/// Render a `size` x `size` badge without touching the filesystem
pub fn render_icon(size: u32, style: &IconStyle) -> Result<RenderedIcon, IconError> {
    style.validate(size)?;

    let radius = mask::corner_radius(size);
    tracing::debug!(size, radius, background = %style.background, "rendering icon");

    let canvas = canvas::brand_canvas(size, style.background);
    let mask = mask::rounded_rect_mask(size, radius);
    let mut image = canvas::composite(&canvas, &mask);

    let font = GlyphFont::load(&style.font_path, font_pixel_size(size, style.font_scale));
    let layer = font.rasterize(size)?;
    let glyph_box = layer.draw(&mut image, layer.centering_offset(size));

    Ok(RenderedIcon {
        image,
        font: layer.source,
        glyph_box,
    })
}

/// Render a badge and write it as a PNG to `path`
pub fn generate_icon(size: u32, path: &Path, style: &IconStyle) -> Result<IconReport, IconError> {
    let rendered = render_icon(size, style)?;
    encode::write_png(&rendered.image, path)?;
    tracing::info!(path = %path.display(), size, font = %rendered.font, "icon written");

    Ok(IconReport {
        path: path.to_path_buf(),
        size,
        font: rendered.font,
        glyph_box: rendered.glyph_box,
    })
}

/// Generate every configured size in order, stopping at the first failure
pub fn generate_all(config: &Config) -> Result<Vec<IconReport>, IconError> {
    if config.output.sizes.is_empty() {
        return Err(IconError::NoSizes);
    }
    let style = config.icon_style();
    config
        .output
        .sizes
        .iter()
        .map(|&size| generate_icon(size, &config.output.icon_path(size), &style))
        .collect()
}
