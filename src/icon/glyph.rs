// Glyph font selection, rasterizing and centered placement

use crate::error::IconError;
use image::{Rgba, RgbaImage};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};
use usvg::fontdb;

/// The character drawn on every badge
pub const GLYPH: char = 'B';

const GLYPH_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Which font actually produced the glyph
#[derive(Clone, Debug, PartialEq)]
pub enum FontSource {
    Preferred { path: PathBuf, family: String },
    Fallback { reason: String },
}

impl FontSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, FontSource::Fallback { .. })
    }
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::Preferred { path, family } => write!(f, "{} from {}", family, path.display()),
            FontSource::Fallback { .. } => write!(f, "built-in glyph"),
        }
    }
}

/// Font pixel size for an icon, truncated to whole pixels
pub fn font_pixel_size(size: u32, scale: f32) -> f32 {
    (size as f32 * scale).floor().max(1.0)
}

/// Font resolved for one icon size
pub struct GlyphFont {
    face: Result<LoadedFace, String>,
    px: f32,
}

struct LoadedFace {
    path: PathBuf,
    family: String,
    db: Arc<fontdb::Database>,
}

impl GlyphFont {
    /// Try the font file at `path`. Never fails: a font that can't be used
    /// is remembered with the reason and the built-in glyph is drawn instead.
    pub fn load(path: &Path, px: f32) -> Self {
        let face = load_face(path);
        if let Err(reason) = &face {
            tracing::warn!(%reason, "preferred font unavailable, using built-in glyph");
        }
        Self { face, px }
    }

    /// Skip font files entirely and use the built-in glyph
    #[cfg(test)]
    pub fn builtin(px: f32, reason: impl Into<String>) -> Self {
        Self {
            face: Err(reason.into()),
            px,
        }
    }

    /// Rasterize [`GLYPH`] into a scratch layer for an icon of `size`.
    ///
    /// The layer is twice the icon size with the glyph drawn roughly in its
    /// middle, so nothing gets clipped before the ink box is measured.
    pub fn rasterize(&self, size: u32) -> Result<GlyphLayer, IconError> {
        let side = size.checked_mul(2).ok_or(IconError::Allocation(size))?;
        let mut pixmap = Pixmap::new(side, side).ok_or(IconError::Allocation(side))?;

        let source = match &self.face {
            Ok(face) => match draw_text(&mut pixmap, face, self.px) {
                Ok(()) => FontSource::Preferred {
                    path: face.path.clone(),
                    family: face.family.clone(),
                },
                Err(reason) => {
                    tracing::warn!(%reason, family = %face.family, "font failed to render, using built-in glyph");
                    pixmap.fill(tiny_skia::Color::TRANSPARENT);
                    FontSource::Fallback { reason }
                }
            },
            Err(reason) => FontSource::Fallback {
                reason: reason.clone(),
            },
        };

        if source.is_fallback() {
            draw_builtin(&mut pixmap, self.px);
        }

        let ink = ink_box(&pixmap).ok_or(IconError::EmptyGlyph(GLYPH))?;
        tracing::debug!(size, px = self.px, ?ink, %source, "rasterized glyph");
        Ok(GlyphLayer {
            pixmap,
            ink,
            source,
        })
    }
}

fn load_face(path: &Path) -> Result<LoadedFace, String> {
    let mut db = fontdb::Database::new();
    db.load_font_file(path)
        .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
    let family = db
        .faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        .ok_or_else(|| format!("'{}' contains no usable font face", path.display()))?;

    Ok(LoadedFace {
        path: path.to_path_buf(),
        family,
        db: Arc::new(db),
    })
}

/// Lay out the glyph with the loaded face and render it through resvg
fn draw_text(pixmap: &mut Pixmap, face: &LoadedFace, px: f32) -> Result<(), String> {
    let side = pixmap.width();
    let center = side as f32 / 2.0;
    // baseline sits a bit below the middle so the capital lands near it
    let baseline = center + px * 0.36;
    let svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{side}" height="{side}" viewBox="0 0 {side} {side}"><text x="{center}" y="{baseline}" font-size="{px}" font-weight="bold" text-anchor="middle" fill="white">{glyph}</text></svg>"#,
        glyph = GLYPH,
    );

    let mut opt = usvg::Options::default();
    opt.font_family = face.family.clone();
    opt.fontdb = Arc::clone(&face.db);
    let tree = usvg::Tree::from_str(&svg, &opt).map_err(|e| e.to_string())?;

    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());
    if ink_box(pixmap).is_none() {
        return Err(format!("font '{}' has no outline for '{}'", face.family, GLYPH));
    }
    Ok(())
}

// Built-in "B" in a 1000 unit em, baseline at y = 0.
const UNITS_PER_EM: f32 = 1000.0;
const OUTLINE_CENTER: (f32, f32) = (380.0, -365.0);

fn builtin_outline() -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();

    // outer contour
    pb.move_to(80.0, -730.0);
    pb.line_to(400.0, -730.0);
    pb.cubic_to(560.0, -730.0, 650.0, -660.0, 650.0, -545.0);
    pb.cubic_to(650.0, -470.0, 610.0, -420.0, 545.0, -395.0);
    pb.cubic_to(630.0, -375.0, 680.0, -310.0, 680.0, -215.0);
    pb.cubic_to(680.0, -75.0, 580.0, 0.0, 410.0, 0.0);
    pb.line_to(80.0, 0.0);
    pb.close();

    // upper bowl
    pb.move_to(230.0, -610.0);
    pb.line_to(230.0, -430.0);
    pb.line_to(380.0, -430.0);
    pb.cubic_to(460.0, -430.0, 500.0, -465.0, 500.0, -520.0);
    pb.cubic_to(500.0, -578.0, 460.0, -610.0, 380.0, -610.0);
    pb.close();

    // lower bowl
    pb.move_to(230.0, -315.0);
    pb.line_to(230.0, -120.0);
    pb.line_to(395.0, -120.0);
    pb.cubic_to(480.0, -120.0, 525.0, -155.0, 525.0, -218.0);
    pb.cubic_to(525.0, -282.0, 480.0, -315.0, 395.0, -315.0);
    pb.close();

    pb.finish()
}

fn draw_builtin(pixmap: &mut Pixmap, px: f32) {
    let Some(outline) = builtin_outline() else {
        return;
    };
    let scale = px / UNITS_PER_EM;
    let center = pixmap.width() as f32 / 2.0;
    let transform = Transform::from_row(
        scale,
        0.0,
        0.0,
        scale,
        center - OUTLINE_CENTER.0 * scale,
        center - OUTLINE_CENTER.1 * scale,
    );

    let mut paint = Paint::default();
    paint.set_color_rgba8(255, 255, 255, 255);
    paint.anti_alias = true;
    pixmap.fill_path(&outline, &paint, FillRule::EvenOdd, transform, None);
}

/// Tightest pixel rectangle around non-zero coverage; `right` and `bottom`
/// are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InkBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl InkBox {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) as f32 / 2.0,
            (self.top + self.bottom) as f32 / 2.0,
        )
    }

    pub fn translate(&self, dx: i32, dy: i32) -> InkBox {
        InkBox {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }
}

pub fn ink_box(pixmap: &Pixmap) -> Option<InkBox> {
    let width = pixmap.width() as usize;
    let mut found: Option<InkBox> = None;

    for (i, pixel) in pixmap.pixels().iter().enumerate() {
        if pixel.alpha() == 0 {
            continue;
        }
        let x = (i % width) as i32;
        let y = (i / width) as i32;
        found = Some(match found {
            None => InkBox {
                left: x,
                top: y,
                right: x + 1,
                bottom: y + 1,
            },
            Some(b) => InkBox {
                left: b.left.min(x),
                top: b.top.min(y),
                right: b.right.max(x + 1),
                bottom: b.bottom.max(y + 1),
            },
        });
    }
    found
}

/// Rendered glyph coverage with its measured ink
pub struct GlyphLayer {
    pixmap: Pixmap,
    pub ink: InkBox,
    pub source: FontSource,
}

impl GlyphLayer {
    /// Offset that centers the ink box in a `size` canvas, taking the box's
    /// own origin into account
    pub fn centering_offset(&self, size: u32) -> (i32, i32) {
        centering_offset(self.ink, size)
    }

    /// Blend the glyph onto `image` shifted by `offset` and return where its
    /// ink ended up
    pub fn draw(&self, image: &mut RgbaImage, offset: (i32, i32)) -> InkBox {
        let (dx, dy) = offset;
        let (width, height) = (image.width() as i32, image.height() as i32);

        for sy in self.ink.top..self.ink.bottom {
            for sx in self.ink.left..self.ink.right {
                let alpha = match self.pixmap.pixel(sx as u32, sy as u32) {
                    Some(p) if p.alpha() > 0 => p.alpha(),
                    _ => continue,
                };
                let (x, y) = (sx + dx, sy + dy);
                if x < 0 || y < 0 || x >= width || y >= height {
                    continue;
                }
                blend_coverage(image.get_pixel_mut(x as u32, y as u32), alpha);
            }
        }
        self.ink.translate(dx, dy)
    }
}

/// Mix `pixel` toward the glyph color by `coverage` (0..=255).
///
/// Color channels are rounded to the nearest integer and the alpha only ever
/// grows, so an opaque badge pixel stays at 255.
fn blend_coverage(pixel: &mut Rgba<u8>, coverage: u8) {
    let a = coverage as u32;
    for (dst, src) in pixel.0[..3].iter_mut().zip(&GLYPH_COLOR.0[..3]) {
        let (d, s) = (*dst as u32, *src as u32);
        *dst = ((d * (255 - a) + s * a + 127) / 255) as u8;
    }
    pixel.0[3] = pixel.0[3].max(coverage);
}

pub fn centering_offset(ink: InkBox, size: u32) -> (i32, i32) {
    let size = size as i32;
    (
        (size - ink.width()).div_euclid(2) - ink.left,
        (size - ink.height()).div_euclid(2) - ink.top,
    )
}
