use std::path::PathBuf;
use std::sync::Arc;

use swash::scale::{image::Content, Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;
use swash::FontRef;

use crate::style::Emphasis;
use crate::{Error, Result};

/// A rasterizing font face. The renderer only needs vertical metrics,
/// horizontal advances and alpha coverage per glyph, so tests can supply
/// a fixed-metrics implementation.
pub trait FontFace: Send + Sync {
    fn metrics(&self) -> FaceMetrics;
    fn advance(&self, ch: char) -> f32;
    fn rasterize(&self, ch: char) -> Option<RasterizedGlyph>;
}

/// Vertical metrics in pixels at the face's configured size.
#[derive(Debug, Clone, Copy)]
pub struct FaceMetrics {
    /// Distance from the baseline to the top of the tallest glyphs.
    pub ascent: f32,
    /// Full line height: ascent + descent + line gap.
    pub height: f32,
}

/// Alpha coverage bitmap for one glyph, positioned relative to the pen.
pub struct RasterizedGlyph {
    pub width: u32,
    pub height: u32,
    /// Horizontal offset from the pen position to the bitmap's left edge.
    pub left: i32,
    /// Vertical offset from the baseline up to the bitmap's top edge.
    pub top: i32,
    /// `width * height` alpha values, row-major.
    pub coverage: Vec<u8>,
}

/// A font face backed by a TTF/OTF file, rasterized with swash.
pub struct SwashFace {
    // Keeps the font bytes alive for the duration of `font`.
    _data: Arc<Vec<u8>>,
    font: FontRef<'static>,
    size: f32,
    scale: f32,
    metrics: FaceMetrics,
}

impl SwashFace {
    /// Parses font data and prepares it for rasterization at `size` pixels.
    /// Returns `None` when the data is not a parseable font.
    pub fn new(data: Vec<u8>, size: f32) -> Option<Self> {
        let data = Arc::new(data);
        // SAFETY: `font` borrows from the heap allocation owned by `data`,
        // which lives as long as `self` and is never mutated. The 'static
        // lifetime never escapes this struct.
        let slice: &'static [u8] =
            unsafe { std::slice::from_raw_parts(data.as_ptr(), data.len()) };
        let font = FontRef::from_index(slice, 0)?;

        let units = font.metrics(&[]);
        let scale = size / units.units_per_em as f32;
        let metrics = FaceMetrics {
            ascent: units.ascent * scale,
            height: (units.ascent + units.descent + units.leading) * scale,
        };
        Some(Self {
            _data: data,
            font,
            size,
            scale,
            metrics,
        })
    }
}

impl FontFace for SwashFace {
    fn metrics(&self) -> FaceMetrics {
        self.metrics
    }

    fn advance(&self, ch: char) -> f32 {
        let glyph = self.font.charmap().map(ch);
        self.font.glyph_metrics(&[]).advance_width(glyph) * self.scale
    }

    fn rasterize(&self, ch: char) -> Option<RasterizedGlyph> {
        let glyph = self.font.charmap().map(ch);
        let mut context = ScaleContext::new();
        let mut scaler = context
            .builder(self.font)
            .size(self.size)
            .hint(true)
            .build();
        let image = Render::new(&[
            Source::ColorBitmap(StrikeWith::BestFit),
            Source::ColorOutline(0),
            Source::Outline,
        ])
        .format(Format::Alpha)
        .render(&mut scaler, glyph)?;

        let coverage = match image.content {
            Content::Mask => image.data,
            // Color sources deliver RGBA; only the alpha channel matters.
            Content::Color | Content::SubpixelMask => {
                image.data.iter().skip(3).step_by(4).copied().collect()
            }
        };
        Some(RasterizedGlyph {
            width: image.placement.width,
            height: image.placement.height,
            left: image.placement.left,
            top: image.placement.top,
            coverage,
        })
    }
}

/// The four style slots of a terminal font family. Missing slots fall
/// back to regular.
#[derive(Default)]
pub(crate) struct FaceSlots {
    pub(crate) regular: Option<Arc<dyn FontFace>>,
    pub(crate) bold: Option<Arc<dyn FontFace>>,
    pub(crate) italic: Option<Arc<dyn FontFace>>,
    pub(crate) bold_italic: Option<Arc<dyn FontFace>>,
}

impl FaceSlots {
    pub(crate) fn regular(&self) -> Option<&dyn FontFace> {
        self.regular.as_deref()
    }

    pub(crate) fn select(&self, emphasis: Emphasis) -> Option<&dyn FontFace> {
        let slot = match emphasis {
            Emphasis::Normal => &self.regular,
            Emphasis::Bold => &self.bold,
            Emphasis::Italic => &self.italic,
            Emphasis::BoldItalic => &self.bold_italic,
        };
        slot.as_deref().or(self.regular.as_deref())
    }

    /// A single face fills all four slots; otherwise the faces are taken
    /// positionally as regular, bold, italic, bold-italic, and slots
    /// beyond the list keep whatever they held before.
    pub(crate) fn apply(&mut self, faces: Vec<Arc<dyn FontFace>>) {
        if faces.len() == 1 {
            let face = &faces[0];
            self.regular = Some(Arc::clone(face));
            self.bold = Some(Arc::clone(face));
            self.italic = Some(Arc::clone(face));
            self.bold_italic = Some(Arc::clone(face));
            return;
        }
        let slots = [
            &mut self.regular,
            &mut self.bold,
            &mut self.italic,
            &mut self.bold_italic,
        ];
        for (slot, face) in slots.into_iter().zip(faces) {
            *slot = Some(face);
        }
    }
}

/// Reads and parses 1 to 4 font files at the given pixel size. Either all
/// files load or none do.
pub(crate) fn load_font_faces(paths: &[PathBuf], size: f32) -> Result<Vec<Arc<dyn FontFace>>> {
    if paths.is_empty() || paths.len() > 4 {
        return Err(Error::Config(format!(
            "expected 1 to 4 font files, got {}",
            paths.len()
        )));
    }
    let mut faces: Vec<Arc<dyn FontFace>> = Vec::with_capacity(paths.len());
    for path in paths {
        let data = std::fs::read(path).map_err(|err| {
            Error::Config(format!("failed to read font file {}: {err}", path.display()))
        })?;
        let kind = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("ttf") => "TTF",
            _ => "OpenType",
        };
        let face = SwashFace::new(data, size).ok_or_else(|| {
            Error::Config(format!(
                "failed to parse {kind} font {}",
                path.display()
            ))
        })?;
        faces.push(Arc::new(face));
    }
    Ok(faces)
}
