const DEFAULT_FONT_SIZE: f32 = 12.0;
const DEFAULT_FONT_DPI: f32 = 144.0;
const DEFAULT_SCALE_FACTOR: f32 = 2.0;
const BASE_MARGIN: f32 = 48.0;
const BASE_PADDING: f32 = 24.0;
const BASE_CORNER_RADIUS: f32 = 6.0;
const BASE_DECORATION_RADIUS: f32 = 9.0;
const BASE_DECORATION_SPACING: f32 = 25.0;
const BASE_TITLE_BAR_OFFSET: f32 = 40.0;
const BASE_SHADOW_OFFSET: f32 = 16.0;
const BASE_SHADOW_RADIUS: f32 = 16.0;
const DEFAULT_LINE_SPACING: f32 = 1.2;
const DEFAULT_TAB_SPACES: usize = 2;
const DEFAULT_COLOR_MATCH_THRESHOLD: u32 = 2500;
const REFERENCE_GLYPH: char = 'a';
const DEFAULT_COMMAND_INDICATOR: &str = "➜";
const COMMAND_INDICATOR_ENV: &str = "TERMSHADE_COMMAND_INDICATOR";

mod ansi;
mod blur;
mod canvas;
mod content;
mod fonts;
mod layout;
mod render;
mod scheme;
mod style;
mod types;

pub use fonts::{FaceMetrics, FontFace, RasterizedGlyph, SwashFace};
pub use render::Screenshot;
pub use scheme::Rgb;
pub use style::{ColoredRune, Emphasis, Style};
pub use types::{Error, Result};

#[cfg(test)]
mod tests;
