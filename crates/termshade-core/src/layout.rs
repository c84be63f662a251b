use crate::fonts::FontFace;
use crate::style::ColoredRune;
use crate::REFERENCE_GLYPH;

/// Measures the content box for styled runes in pixels. With a fixed
/// column budget the width is `columns` advances of the reference glyph;
/// otherwise it is the widest line's summed advances. Height is the line
/// count times the spaced line height. Empty content still occupies one
/// line.
pub(crate) fn measure_content(
    runes: &[ColoredRune],
    columns: usize,
    face: &dyn FontFace,
    line_spacing: f32,
    tab_spaces: usize,
) -> (f32, f32) {
    let mut text: String = runes.iter().map(|rune| rune.symbol).collect();
    if text.ends_with('\n') {
        text.pop();
    }
    let lines: Vec<&str> = text.split('\n').collect();

    let width = if columns > 0 {
        columns as f32 * face.advance(REFERENCE_GLYPH)
    } else {
        lines
            .iter()
            .map(|line| line_advance(line, face, tab_spaces))
            .fold(0.0f32, f32::max)
    };
    let height = lines.len() as f32 * face.metrics().height * line_spacing;
    (width, height)
}

fn line_advance(line: &str, face: &dyn FontFace, tab_spaces: usize) -> f32 {
    line.chars()
        .map(|ch| {
            if ch == '\t' {
                tab_spaces as f32 * face.advance(' ')
            } else {
                face.advance(ch)
            }
        })
        .sum()
}
