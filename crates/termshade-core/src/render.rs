use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tiny_skia::{
    FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, PremultipliedColorU8, Rect, Stroke,
    Transform,
};

use crate::ansi::{encode_runes, parse_ansi};
use crate::blur::gaussian_blur;
use crate::canvas::trim_transparent;
use crate::content::Content;
use crate::fonts::{load_font_faces, FaceSlots, FontFace, RasterizedGlyph};
use crate::layout::measure_content;
use crate::scheme::{ColorResolver, Rgb};
use crate::style::{ColoredRune, Style};
use crate::{
    Error, Result, BASE_CORNER_RADIUS, BASE_DECORATION_RADIUS, BASE_DECORATION_SPACING,
    BASE_MARGIN, BASE_PADDING, BASE_SHADOW_OFFSET, BASE_SHADOW_RADIUS, BASE_TITLE_BAR_OFFSET,
    COMMAND_INDICATOR_ENV, DEFAULT_COMMAND_INDICATOR, DEFAULT_FONT_DPI, DEFAULT_FONT_SIZE,
    DEFAULT_LINE_SPACING, DEFAULT_SCALE_FACTOR, DEFAULT_TAB_SPACES,
};

const WINDOW_BORDER_COLOR: Rgb = Rgb::new(0x40, 0x40, 0x40);
const SHADOW_COLOR: Rgb = Rgb::new(0x10, 0x10, 0x10);
const SHADOW_ALPHA: u8 = 0x66;
const DECORATION_COLORS: [Rgb; 3] = [
    Rgb::new(0xED, 0x65, 0x5A),
    Rgb::new(0xE1, 0xC0, 0x4C),
    Rgb::new(0x71, 0xBD, 0x47),
];
const COMMAND_INDICATOR_COLOR: Rgb = Rgb::new(0, 255, 0);
const COMMAND_TEXT_COLOR: Rgb = Rgb::new(105, 105, 105);

/// A terminal screenshot under construction: styled content plus the
/// window styling used to raster it.
pub struct Screenshot {
    content: Content,
    factor: f32,
    columns: usize,
    resolver: ColorResolver,
    clip_canvas: bool,
    draw_border: bool,
    draw_decorations: bool,
    draw_shadow: bool,
    shadow_radius: f32,
    shadow_offset_x: f32,
    shadow_offset_y: f32,
    /// Margins and paddings as top, right, bottom, left.
    margin: [f32; 4],
    padding: [f32; 4],
    faces: FaceSlots,
    font_size: f32,
    line_spacing: f32,
    tab_spaces: usize,
    command_indicator: String,
}

impl Default for Screenshot {
    fn default() -> Self {
        Self::new()
    }
}

impl Screenshot {
    pub fn new() -> Self {
        Self::with_options(DEFAULT_SCALE_FACTOR, |key| std::env::var(key).ok())
    }

    pub fn with_scale_factor(factor: f32) -> Self {
        Self::with_options(factor, |key| std::env::var(key).ok())
    }

    /// Full constructor with an injected environment lookup, used to read
    /// the command indicator override.
    pub fn with_options(factor: f32, env: impl Fn(&str) -> Option<String>) -> Self {
        let command_indicator = env(COMMAND_INDICATOR_ENV)
            .unwrap_or_else(|| DEFAULT_COMMAND_INDICATOR.to_string());
        Self {
            content: Content::default(),
            factor,
            columns: 0,
            resolver: ColorResolver::default(),
            clip_canvas: false,
            draw_border: true,
            draw_decorations: true,
            draw_shadow: true,
            shadow_radius: (factor * BASE_SHADOW_RADIUS).min(255.0),
            shadow_offset_x: factor * BASE_SHADOW_OFFSET,
            shadow_offset_y: factor * BASE_SHADOW_OFFSET,
            margin: [factor * BASE_MARGIN; 4],
            padding: [factor * BASE_PADDING; 4],
            faces: FaceSlots::default(),
            font_size: factor * DEFAULT_FONT_SIZE * DEFAULT_FONT_DPI / 72.0,
            line_spacing: DEFAULT_LINE_SPACING,
            tab_spaces: DEFAULT_TAB_SPACES,
            command_indicator,
        }
    }

    /// Fixed column budget for wrapping and measurement; 0 means "use the
    /// attached terminal's width, or no budget".
    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns;
    }

    pub fn set_decorations(&mut self, enabled: bool) {
        self.draw_decorations = enabled;
    }

    pub fn set_shadow(&mut self, enabled: bool) {
        self.draw_shadow = enabled;
    }

    pub fn set_border(&mut self, enabled: bool) {
        self.draw_border = enabled;
    }

    /// When enabled, PNG output is cropped to the non-transparent pixels.
    pub fn set_clip_canvas(&mut self, enabled: bool) {
        self.clip_canvas = enabled;
    }

    pub fn set_margin(&mut self, top: f32, right: f32, bottom: f32, left: f32) {
        self.margin = [top, right, bottom, left];
    }

    pub fn set_padding(&mut self, top: f32, right: f32, bottom: f32, left: f32) {
        self.padding = [top, right, bottom, left];
    }

    pub fn set_horizontal_margin(&mut self, value: f32) {
        self.margin[1] = value;
        self.margin[3] = value;
    }

    pub fn set_vertical_margin(&mut self, value: f32) {
        self.margin[0] = value;
        self.margin[2] = value;
    }

    pub fn set_horizontal_padding(&mut self, value: f32) {
        self.padding[1] = value;
        self.padding[3] = value;
    }

    pub fn set_vertical_padding(&mut self, value: f32) {
        self.padding[0] = value;
        self.padding[2] = value;
    }

    pub fn set_line_spacing(&mut self, spacing: f32) {
        self.line_spacing = spacing;
    }

    pub fn set_tab_spaces(&mut self, spaces: usize) {
        self.tab_spaces = spaces;
    }

    /// Maximum squared RGB distance at which a decoded color still counts
    /// as one of the 16 ANSI slots during colorscheme resolution.
    pub fn set_color_match_threshold(&mut self, threshold: u32) {
        self.resolver.set_match_threshold(threshold);
    }

    pub fn set_command_indicator(&mut self, indicator: impl Into<String>) {
        self.command_indicator = indicator.into();
    }

    pub fn set_font_face_regular(&mut self, face: impl FontFace + 'static) {
        self.faces.regular = Some(Arc::new(face));
    }

    pub fn set_font_face_bold(&mut self, face: impl FontFace + 'static) {
        self.faces.bold = Some(Arc::new(face));
    }

    pub fn set_font_face_italic(&mut self, face: impl FontFace + 'static) {
        self.faces.italic = Some(Arc::new(face));
    }

    pub fn set_font_face_bold_italic(&mut self, face: impl FontFace + 'static) {
        self.faces.bold_italic = Some(Arc::new(face));
    }

    /// Loads 1 to 4 font files at the screenshot's pixel size. A single
    /// file serves all four style slots; otherwise files are taken as
    /// regular, bold, italic, bold-italic in order. Nothing changes on
    /// error.
    pub fn load_fonts<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<()> {
        let paths: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
        let faces = load_font_faces(&paths, self.font_size)?;
        self.faces.apply(faces);
        Ok(())
    }

    /// Loads a JSON colorscheme that overrides the 16 ANSI slot colors
    /// and the default foreground/background.
    pub fn load_colorscheme<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.resolver.load_colorscheme(path)
    }

    fn fixed_columns(&self) -> usize {
        if self.columns != 0 {
            return self.columns;
        }
        terminal_size::terminal_size()
            .map(|(width, _)| width.0 as usize)
            .unwrap_or(0)
    }

    /// Appends already-decoded styled runes, wrapping to the column budget.
    pub fn append(&mut self, runes: &[ColoredRune]) {
        let columns = self.fixed_columns();
        self.content.append(runes, columns);
    }

    /// Reads a UTF-8 stream with ANSI escapes and appends its content.
    pub fn add_content<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let text = String::from_utf8(bytes)
            .map_err(|_| Error::Decode("invalid utf-8 in input stream".to_string()))?;
        self.append(&parse_ansi(&text));
        Ok(())
    }

    /// Appends a shell prompt line: the command indicator, then the
    /// command words joined by spaces.
    pub fn add_command<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut runes: Vec<ColoredRune> = Vec::new();
        for symbol in self.command_indicator.chars() {
            runes.push(ColoredRune {
                symbol,
                style: Style {
                    foreground: Some(COMMAND_INDICATOR_COLOR),
                    ..Default::default()
                },
            });
        }
        runes.push(ColoredRune::plain(' '));
        let command = args
            .into_iter()
            .map(|arg| arg.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        for symbol in command.chars() {
            runes.push(ColoredRune {
                symbol,
                style: Style {
                    foreground: Some(COMMAND_TEXT_COLOR),
                    ..Default::default()
                },
            });
        }
        runes.push(ColoredRune::plain('\n'));
        self.append(&runes);
    }

    /// Rasterizes the screenshot into a pixmap.
    pub(crate) fn image(&self) -> Result<Pixmap> {
        let f = |value: f32| self.factor * value;
        let corner_radius = f(BASE_CORNER_RADIUS);
        let decoration_radius = f(BASE_DECORATION_RADIUS);
        let distance = f(BASE_DECORATION_SPACING);
        let title_offset = if self.draw_decorations {
            f(BASE_TITLE_BAR_OFFSET)
        } else {
            0.0
        };

        let regular = self.faces.regular().ok_or_else(|| {
            Error::Config(
                "no font faces loaded; call load_fonts or set_font_face_regular first".to_string(),
            )
        })?;

        let (content_width, content_height) = measure_content(
            self.content.runes(),
            self.columns,
            regular,
            self.line_spacing,
            self.tab_spaces,
        );
        // Never narrower than the window decorations.
        let content_width = content_width.max(3.0 * distance + 3.0 * decoration_radius);

        let [margin_top, margin_right, margin_bottom, margin_left] = self.margin;
        let [padding_top, padding_right, padding_bottom, padding_left] = self.padding;

        let canvas_width = (content_width + margin_left + margin_right + padding_left
            + padding_right)
            .round()
            .max(1.0) as u32;
        let canvas_height = (content_height + margin_top + margin_bottom + padding_top
            + padding_bottom
            + title_offset)
            .round()
            .max(1.0) as u32;

        let mut canvas = Pixmap::new(canvas_width, canvas_height)
            .ok_or_else(|| Error::Render("canvas dimensions out of range".to_string()))?;

        let mut x_off = margin_left;
        let mut y_off = margin_top;
        let window_width = canvas_width as f32 - margin_left - margin_right;
        let window_height = canvas_height as f32 - margin_top - margin_bottom;

        if self.draw_shadow {
            // The window shifts up-left by half the shadow offset so the
            // shadow reads as cast down-right.
            x_off -= self.shadow_offset_x / 2.0;
            y_off -= self.shadow_offset_y / 2.0;

            let mut layer = Pixmap::new(canvas_width, canvas_height)
                .ok_or_else(|| Error::Render("canvas dimensions out of range".to_string()))?;
            fill_rounded_rect(
                &mut layer,
                x_off + self.shadow_offset_x,
                y_off + self.shadow_offset_y,
                window_width,
                window_height,
                corner_radius,
                SHADOW_COLOR,
                SHADOW_ALPHA,
            );
            gaussian_blur(&mut layer, self.shadow_radius);
            canvas.draw_pixmap(
                0,
                0,
                layer.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }

        fill_rounded_rect(
            &mut canvas,
            x_off,
            y_off,
            window_width,
            window_height,
            corner_radius,
            self.resolver.background(),
            255,
        );
        if self.draw_border {
            stroke_rounded_rect(
                &mut canvas,
                x_off,
                y_off,
                window_width,
                window_height,
                corner_radius,
                WINDOW_BORDER_COLOR,
                f(1.0),
            );
        }
        if self.draw_decorations {
            for (i, &color) in DECORATION_COLORS.iter().enumerate() {
                fill_circle(
                    &mut canvas,
                    x_off + padding_left + i as f32 * distance + f(4.0),
                    y_off + padding_top + f(4.0),
                    decoration_radius,
                    color,
                );
            }
        }

        let metrics = regular.metrics();
        let origin_x = x_off + padding_left;
        let mut x = origin_x;
        let mut y = y_off + padding_top + title_offset + metrics.height;

        for rune in self.content.runes() {
            let face = self.faces.select(rune.style.emphasis).unwrap_or(regular);
            match rune.symbol {
                '\n' => {
                    x = origin_x;
                    y += metrics.height * self.line_spacing;
                    continue;
                }
                '\t' => {
                    x += self.tab_spaces as f32 * face.advance(' ');
                    continue;
                }
                _ => {}
            }
            let advance = face.advance(rune.symbol);

            if let Some(background) = rune.style.background {
                let background = self
                    .resolver
                    .resolve_rgb(background)
                    .unwrap_or(background);
                if let Some(rect) =
                    Rect::from_xywh(x, y - metrics.ascent, advance, metrics.height)
                {
                    canvas.fill_rect(rect, &solid_paint(background, 255), Transform::identity(), None);
                }
            }

            let foreground = match rune.style.foreground {
                Some(color) => self.resolver.resolve_rgb(color).unwrap_or(color),
                None => self.resolver.foreground(),
            };
            let symbol = replace_unreliable_glyph(rune.symbol);
            if let Some(glyph) = face.rasterize(symbol) {
                draw_glyph(
                    &mut canvas,
                    &glyph,
                    (x + glyph.left as f32).round() as i32,
                    (y - glyph.top as f32).round() as i32,
                    foreground,
                );
            }
            if rune.style.underline {
                draw_line(
                    &mut canvas,
                    x,
                    y + f(4.0),
                    x + advance,
                    y + f(4.0),
                    f(1.0),
                    foreground,
                );
            }
            x += advance;
        }

        Ok(canvas)
    }

    /// Renders the screenshot and writes it as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> Result<()> {
        let canvas = self.image()?;
        let canvas = if self.clip_canvas {
            trim_transparent(&canvas)
        } else {
            canvas
        };
        let png = canvas
            .encode_png()
            .map_err(|err| Error::Encode(format!("failed to encode PNG: {err}")))?;
        writer.write_all(&png)?;
        Ok(())
    }

    /// Writes the accumulated content back out as an ANSI-escaped text
    /// stream.
    pub fn write_raw<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&encode_runes(self.content.runes()))?;
        Ok(())
    }
}

/// Glyphs many monospace fonts render at the wrong width are substituted
/// with a stable lookalike.
fn replace_unreliable_glyph(symbol: char) -> char {
    match symbol {
        '✗' | 'ˣ' => '×',
        _ => symbol,
    }
}

// Circle approximation constant for cubic Bezier corner arcs.
const KAPPA: f32 = 0.552_284_8;

fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<tiny_skia::Path> {
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    let k = r * KAPPA;
    let (right, bottom) = (x + w, y + h);
    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

#[allow(clippy::too_many_arguments)]
fn fill_rounded_rect(
    pixmap: &mut Pixmap,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    radius: f32,
    color: Rgb,
    alpha: u8,
) {
    if let Some(path) = rounded_rect_path(x, y, w, h, radius) {
        pixmap.fill_path(
            &path,
            &solid_paint(color, alpha),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn stroke_rounded_rect(
    pixmap: &mut Pixmap,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    radius: f32,
    color: Rgb,
    width: f32,
) {
    if let Some(path) = rounded_rect_path(x, y, w, h, radius) {
        pixmap.stroke_path(
            &path,
            &solid_paint(color, 255),
            &Stroke {
                width,
                ..Stroke::default()
            },
            Transform::identity(),
            None,
        );
    }
}

fn fill_circle(pixmap: &mut Pixmap, cx: f32, cy: f32, radius: f32, color: Rgb) {
    if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
        pixmap.fill_path(
            &path,
            &solid_paint(color, 255),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}

fn draw_line(pixmap: &mut Pixmap, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: Rgb) {
    let mut pb = PathBuilder::new();
    pb.move_to(x0, y0);
    pb.line_to(x1, y1);
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(
            &path,
            &solid_paint(color, 255),
            &Stroke {
                width,
                ..Stroke::default()
            },
            Transform::identity(),
            None,
        );
    }
}

fn solid_paint(color: Rgb, alpha: u8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, alpha);
    paint.anti_alias = true;
    paint
}

/// Composites a glyph's alpha coverage onto the canvas, tinted with the
/// foreground color.
fn draw_glyph(canvas: &mut Pixmap, glyph: &RasterizedGlyph, x: i32, y: i32, color: Rgb) {
    if glyph.width == 0 || glyph.height == 0 {
        return;
    }
    let Some(mut tinted) = Pixmap::new(glyph.width, glyph.height) else {
        return;
    };
    let premul = |c: u8, a: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
    for (px, &alpha) in tinted.pixels_mut().iter_mut().zip(&glyph.coverage) {
        *px = PremultipliedColorU8::from_rgba(
            premul(color.r, alpha),
            premul(color.g, alpha),
            premul(color.b, alpha),
            alpha,
        )
        .unwrap_or(PremultipliedColorU8::TRANSPARENT);
    }
    canvas.draw_pixmap(
        x,
        y,
        tinted.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}
