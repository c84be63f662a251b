use super::*;

use std::io::Write as _;
use std::sync::Arc;

use crate::ansi::{encode_runes, parse_ansi, xterm_color};
use crate::canvas::trim_transparent;
use crate::content::Content;
use crate::fonts::{load_font_faces, FaceSlots};
use crate::layout::measure_content;
use crate::scheme::ColorResolver;
use tiny_skia::{Pixmap, PremultipliedColorU8};

/// Deterministic face for pixel-exact tests: every glyph advances 5px,
/// covers a solid 5x8 block above the baseline, on a 10px line.
struct FixedFace;

impl FontFace for FixedFace {
    fn metrics(&self) -> FaceMetrics {
        FaceMetrics {
            ascent: 8.0,
            height: 10.0,
        }
    }

    fn advance(&self, _ch: char) -> f32 {
        5.0
    }

    fn rasterize(&self, ch: char) -> Option<RasterizedGlyph> {
        if ch == '\n' || ch == '\t' || ch == ' ' {
            return None;
        }
        Some(RasterizedGlyph {
            width: 5,
            height: 8,
            left: 0,
            top: 8,
            coverage: vec![255; 5 * 8],
        })
    }
}

/// A screenshot with the fixed face and all chrome disabled, so canvas
/// dimensions follow directly from the content box.
fn bare_screenshot() -> Screenshot {
    let mut screenshot = Screenshot::with_options(1.0, |_| None);
    screenshot.set_font_face_regular(FixedFace);
    screenshot.set_margin(0.0, 0.0, 0.0, 0.0);
    screenshot.set_padding(0.0, 0.0, 0.0, 0.0);
    screenshot.set_decorations(false);
    screenshot.set_shadow(false);
    screenshot.set_border(false);
    screenshot.set_line_spacing(1.0);
    screenshot
}

fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
    let px = pixmap.pixel(x, y).unwrap();
    (px.red(), px.green(), px.blue(), px.alpha())
}

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn style_bits_round_trip() {
    let style = Style {
        foreground: Some(Rgb::new(10, 20, 30)),
        background: Some(Rgb::new(200, 100, 50)),
        emphasis: Emphasis::BoldItalic,
        underline: true,
    };
    assert_eq!(Style::from_bits(style.to_bits()), style);
    assert_eq!(Style::from_bits(Style::default().to_bits()), Style::default());
}

#[test]
fn style_bit_positions() {
    let style = Style {
        foreground: Some(Rgb::new(0x11, 0x22, 0x33)),
        background: Some(Rgb::new(0x44, 0x55, 0x66)),
        emphasis: Emphasis::Bold,
        underline: true,
    };
    let bits = style.to_bits();
    assert_eq!(bits & 0b1, 1, "foreground set flag");
    assert_eq!(bits & 0b10, 0b10, "background set flag");
    assert_eq!((bits >> 2) & 0b11, 1, "emphasis code");
    assert_eq!((bits >> 4) & 1, 1, "underline flag");
    assert_eq!((bits >> 8) & 0xFF, 0x11);
    assert_eq!((bits >> 16) & 0xFF, 0x22);
    assert_eq!((bits >> 24) & 0xFF, 0x33);
    assert_eq!((bits >> 32) & 0xFF, 0x44);
    assert_eq!((bits >> 40) & 0xFF, 0x55);
    assert_eq!((bits >> 48) & 0xFF, 0x66);
}

#[test]
fn underline_is_independent_of_emphasis() {
    let runes = parse_ansi("\x1b[1;4mX");
    assert_eq!(runes[0].style.emphasis, Emphasis::Bold);
    assert!(runes[0].style.underline);

    let runes = parse_ansi("\x1b[4mX\x1b[24mY");
    assert!(runes[0].style.underline);
    assert!(!runes[1].style.underline);
    assert_eq!(runes[1].style.emphasis, Emphasis::Normal);
}

#[test]
fn parse_basic_colors() {
    let runes = parse_ansi("\x1b[31mred\x1b[0mplain");
    assert_eq!(runes.len(), 8);
    assert_eq!(runes[0].style.foreground, Some(Rgb::new(128, 0, 0)));
    assert_eq!(runes[0].symbol, 'r');
    assert_eq!(runes[3].style, Style::default());

    let runes = parse_ansi("\x1b[91;102mX");
    assert_eq!(runes[0].style.foreground, Some(Rgb::new(255, 0, 0)));
    assert_eq!(runes[0].style.background, Some(Rgb::new(0, 255, 0)));
}

#[test]
fn parse_extended_colors() {
    let runes = parse_ansi("\x1b[38;5;196mX\x1b[48;2;1;2;3mY");
    assert_eq!(runes[0].style.foreground, Some(Rgb::new(255, 0, 0)));
    assert_eq!(runes[1].style.background, Some(Rgb::new(1, 2, 3)));
}

#[test]
fn parse_emphasis_flags() {
    let runes = parse_ansi("\x1b[1mB\x1b[3mI\x1b[22mi\x1b[23mn");
    assert_eq!(runes[0].style.emphasis, Emphasis::Bold);
    assert_eq!(runes[1].style.emphasis, Emphasis::BoldItalic);
    assert_eq!(runes[2].style.emphasis, Emphasis::Italic);
    assert_eq!(runes[3].style.emphasis, Emphasis::Normal);
}

#[test]
fn control_bytes_keep_current_style() {
    let runes = parse_ansi("\x1b[31ma\nb\tc\rd");
    let symbols: String = runes.iter().map(|r| r.symbol).collect();
    assert_eq!(symbols, "a\nb\tcd");
    for rune in &runes {
        assert_eq!(rune.style.foreground, Some(Rgb::new(128, 0, 0)));
    }
}

#[test]
fn xterm_palette_values() {
    assert_eq!(xterm_color(1), Rgb::new(128, 0, 0));
    assert_eq!(xterm_color(15), Rgb::new(255, 255, 255));
    assert_eq!(xterm_color(16), Rgb::new(0, 0, 0));
    assert_eq!(xterm_color(196), Rgb::new(255, 0, 0));
    assert_eq!(xterm_color(232), Rgb::new(8, 8, 8));
    assert_eq!(xterm_color(255), Rgb::new(238, 238, 238));
}

#[test]
fn encode_plain_text_is_identity() {
    let text = "hello\nworld\t!";
    let runes = parse_ansi(text);
    assert_eq!(encode_runes(&runes), text.as_bytes());
}

#[test]
fn encode_styled_runs() {
    let runes = parse_ansi("\x1b[31mX\x1b[0m");
    assert_eq!(encode_runes(&runes), b"\x1b[38;2;128;0;0mX\x1b[0m");

    let runes = parse_ansi("\x1b[1;4;31mX\x1b[0mp");
    assert_eq!(encode_runes(&runes), b"\x1b[1;4;38;2;128;0;0mX\x1b[0mp");
}

#[test]
fn wrap_inserts_newline_per_column_budget() {
    let mut content = Content::default();
    content.append(&parse_ansi("abcdefghi"), 3);
    // The wrap trigger starts its line uncounted, so after the first
    // break lines carry columns + 1 runes.
    let symbols: String = content.runes().iter().map(|r| r.symbol).collect();
    assert_eq!(symbols, "abc\ndefg\nhi");
}

#[test]
fn wrap_cadence_is_columns_plus_one() {
    let mut content = Content::default();
    content.append(&parse_ansi(&"x".repeat(16)), 3);
    let inserted = content.runes().iter().filter(|r| r.symbol == '\n').count();
    assert_eq!(inserted, 4);
}

#[test]
fn wrap_counter_spans_appends() {
    let mut content = Content::default();
    content.append(&parse_ansi("ab"), 3);
    content.append(&parse_ansi("cd"), 3);
    let symbols: String = content.runes().iter().map(|r| r.symbol).collect();
    assert_eq!(symbols, "abc\nd");
}

#[test]
fn synthetic_newline_inherits_trigger_style() {
    let mut content = Content::default();
    content.append(&parse_ansi("\x1b[31mabcd\x1b[0m"), 3);
    let runes = content.runes();
    assert_eq!(runes[3].symbol, '\n');
    assert_eq!(runes[3].style.foreground, Some(Rgb::new(128, 0, 0)));
    assert_eq!(runes[4].symbol, 'd');
}

#[test]
fn zero_columns_never_wraps() {
    let mut content = Content::default();
    content.append(&parse_ansi("abcdefghij"), 0);
    assert!(content.runes().iter().all(|r| r.symbol != '\n'));
}

#[test]
fn resolver_without_scheme_resolves_nothing() {
    let resolver = ColorResolver::default();
    assert_eq!(resolver.resolve_rgb(Rgb::new(128, 0, 0)), None);
    assert_eq!(resolver.foreground(), Rgb::new(211, 211, 211));
    assert_eq!(resolver.background(), Rgb::new(0x15, 0x15, 0x15));
}

fn scheme_file() -> tempfile::NamedTempFile {
    write_temp(
        r##"{"colors": {"color1": "#112233", "foreground": "#aabbcc", "background": "#010203"}}"##,
    )
}

#[test]
fn resolver_exact_palette_match() {
    let mut resolver = ColorResolver::default();
    resolver.load_colorscheme(scheme_file().path()).unwrap();
    // Slot 1 in all three reference palettes maps to the same override.
    assert_eq!(resolver.resolve_rgb(Rgb::new(128, 0, 0)), Some(Rgb::new(0x11, 0x22, 0x33)));
    assert_eq!(resolver.resolve_rgb(Rgb::new(205, 0, 0)), Some(Rgb::new(0x11, 0x22, 0x33)));
    assert_eq!(resolver.resolve_rgb(Rgb::new(170, 0, 0)), Some(Rgb::new(0x11, 0x22, 0x33)));
    assert_eq!(resolver.foreground(), Rgb::new(0xAA, 0xBB, 0xCC));
    assert_eq!(resolver.background(), Rgb::new(0x01, 0x02, 0x03));
}

#[test]
fn resolver_exact_match_without_override_keeps_raw() {
    let mut resolver = ColorResolver::default();
    resolver.load_colorscheme(scheme_file().path()).unwrap();
    // Slot 2 exact hit, no override for it: the slot lookup falls back
    // to the raw value.
    assert_eq!(resolver.resolve_rgb(Rgb::new(0, 128, 0)), Some(Rgb::new(0, 128, 0)));
}

#[test]
fn resolver_slot_lookup_override_or_fallback() {
    let mut resolver = ColorResolver::default();
    assert_eq!(resolver.resolve(1, Rgb::new(9, 9, 9)), Rgb::new(9, 9, 9));

    resolver.load_colorscheme(scheme_file().path()).unwrap();
    assert_eq!(resolver.resolve(1, Rgb::new(9, 9, 9)), Rgb::new(0x11, 0x22, 0x33));
    assert_eq!(resolver.resolve(2, Rgb::new(9, 9, 9)), Rgb::new(9, 9, 9));
}

#[test]
fn resolver_nearest_match_under_threshold() {
    let mut resolver = ColorResolver::default();
    resolver.load_colorscheme(scheme_file().path()).unwrap();
    // (130, 3, 4) is 4 + 9 + 16 = 29 away from standard slot 1.
    assert_eq!(resolver.resolve_rgb(Rgb::new(130, 3, 4)), Some(Rgb::new(0x11, 0x22, 0x33)));
    // Resolution is a pure lookup; asking twice answers the same.
    assert_eq!(resolver.resolve_rgb(Rgb::new(130, 3, 4)), Some(Rgb::new(0x11, 0x22, 0x33)));
}

#[test]
fn resolver_rejects_distant_colors() {
    let mut resolver = ColorResolver::default();
    resolver.load_colorscheme(scheme_file().path()).unwrap();
    // (60, 120, 200) is more than 2500 away from every palette entry.
    assert_eq!(resolver.resolve_rgb(Rgb::new(60, 120, 200)), None);
}

#[test]
fn resolver_threshold_is_tunable() {
    let mut resolver = ColorResolver::default();
    resolver.load_colorscheme(scheme_file().path()).unwrap();
    resolver.set_match_threshold(0);
    assert_eq!(resolver.resolve_rgb(Rgb::new(130, 3, 4)), None);
    // Exact matches are not threshold-gated.
    assert_eq!(resolver.resolve_rgb(Rgb::new(128, 0, 0)), Some(Rgb::new(0x11, 0x22, 0x33)));
}

#[test]
fn colorscheme_errors_leave_state_untouched() {
    let mut resolver = ColorResolver::default();
    resolver.load_colorscheme(scheme_file().path()).unwrap();

    let invalid = write_temp(r##"{"colors": {"color2": "#12345"}}"##);
    let err = resolver.load_colorscheme(invalid.path()).unwrap_err();
    assert!(err.to_string().contains("color2"), "{err}");

    assert_eq!(resolver.resolve_rgb(Rgb::new(128, 0, 0)), Some(Rgb::new(0x11, 0x22, 0x33)));
    assert_eq!(resolver.foreground(), Rgb::new(0xAA, 0xBB, 0xCC));
}

#[test]
fn colorscheme_array_uses_first_entry() {
    let file = write_temp(r##"[{"colors": {"color0": "334455"}}, {"colors": {"color0": "#000001"}}]"##);
    let mut resolver = ColorResolver::default();
    resolver.load_colorscheme(file.path()).unwrap();
    assert_eq!(resolver.resolve_rgb(Rgb::new(0, 0, 0)), Some(Rgb::new(0x33, 0x44, 0x55)));

    let empty = write_temp("[]");
    assert!(resolver.load_colorscheme(empty.path()).is_err());
}

#[test]
fn hex_color_parsing() {
    assert_eq!(Rgb::from_hex("#A1B2C3").unwrap(), Rgb::new(0xA1, 0xB2, 0xC3));
    assert_eq!(Rgb::from_hex("a1b2c3").unwrap(), Rgb::new(0xA1, 0xB2, 0xC3));
    assert!(Rgb::from_hex("#12345").is_err());
    assert!(Rgb::from_hex("#1234567").is_err());
    assert!(Rgb::from_hex("#12g456").is_err());
}

#[test]
fn font_face_count_is_validated() {
    let err = load_font_faces(&[], 24.0).err().unwrap();
    assert!(err.to_string().contains("1 to 4"), "{err}");

    let paths: Vec<_> = (0..5).map(|i| std::path::PathBuf::from(format!("f{i}.ttf"))).collect();
    let err = load_font_faces(&paths, 24.0).err().unwrap();
    assert!(err.to_string().contains("got 5"), "{err}");
}

#[test]
fn missing_font_file_is_a_config_error() {
    let err = load_font_faces(&["/nonexistent/face.ttf".into()], 24.0).err().unwrap();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("/nonexistent/face.ttf"), "{err}");
}

#[test]
fn unparseable_font_is_a_config_error() {
    let file = write_temp("this is not a font");
    let err = load_font_faces(&[file.path().to_path_buf()], 24.0).err().unwrap();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn single_face_fills_all_slots() {
    let mut slots = FaceSlots::default();
    slots.apply(vec![Arc::new(FixedFace)]);
    for emphasis in [Emphasis::Normal, Emphasis::Bold, Emphasis::Italic, Emphasis::BoldItalic] {
        assert!(slots.select(emphasis).is_some());
    }
}

#[test]
fn missing_slots_fall_back_to_regular() {
    let mut slots = FaceSlots::default();
    slots.apply(vec![Arc::new(FixedFace), Arc::new(FixedFace)]);
    assert!(slots.italic.is_none());
    assert!(slots.select(Emphasis::Italic).is_some());
    assert!(slots.select(Emphasis::BoldItalic).is_some());
}

#[test]
fn partial_face_lists_keep_existing_slots() {
    let mut slots = FaceSlots::default();
    slots.apply(vec![Arc::new(FixedFace)]);
    slots.apply(vec![Arc::new(FixedFace), Arc::new(FixedFace)]);
    assert!(slots.italic.is_some());
    assert!(slots.bold_italic.is_some());
}

#[test]
fn measure_empty_content_is_one_line() {
    let (width, height) = measure_content(&[], 0, &FixedFace, 1.2, 2);
    assert_eq!(width, 0.0);
    assert!((height - 12.0).abs() < 1e-4);
}

#[test]
fn measure_uses_widest_line_without_columns() {
    let runes = parse_ansi("ab\nabcd\n\tc");
    let (width, height) = measure_content(&runes, 0, &FixedFace, 1.0, 2);
    // "abcd" is 4 advances; "\tc" is 2 space advances plus one glyph.
    assert!((width - 20.0).abs() < 1e-4);
    assert!((height - 30.0).abs() < 1e-4);
}

#[test]
fn measure_fixed_columns_ignores_line_content() {
    let runes = parse_ansi("ab");
    let (width, _) = measure_content(&runes, 10, &FixedFace, 1.0, 2);
    assert!((width - 50.0).abs() < 1e-4);
}

#[test]
fn measure_ignores_one_trailing_newline() {
    let runes = parse_ansi("ab\n");
    let (_, height) = measure_content(&runes, 0, &FixedFace, 1.0, 2);
    assert!((height - 10.0).abs() < 1e-4);

    let runes = parse_ansi("ab\n\n");
    let (_, height) = measure_content(&runes, 0, &FixedFace, 1.0, 2);
    assert!((height - 20.0).abs() < 1e-4);
}

#[test]
fn blur_spreads_coverage() {
    let mut pixmap = Pixmap::new(21, 21).unwrap();
    let center = 10 * 21 + 10;
    pixmap.pixels_mut()[center] = PremultipliedColorU8::from_rgba(255, 255, 255, 255).unwrap();
    crate::blur::gaussian_blur(&mut pixmap, 4.0);
    assert!(pixmap.pixels()[center].alpha() < 255);
    assert!(pixmap.pixels()[center + 2].alpha() > 0);
    // Mass moved outwards, roughly conserved up to per-pixel rounding.
    let total: u32 = pixmap.pixels().iter().map(|p| p.alpha() as u32).sum();
    assert!((200..=320).contains(&total), "total alpha {total}");
}

#[test]
fn trim_fully_transparent_returns_copy() {
    let pixmap = Pixmap::new(12, 7).unwrap();
    let trimmed = trim_transparent(&pixmap);
    assert_eq!((trimmed.width(), trimmed.height()), (12, 7));
}

#[test]
fn trim_crops_to_opaque_bbox() {
    let mut pixmap = Pixmap::new(20, 20).unwrap();
    for y in 3..8 {
        for x in 2..12 {
            pixmap.pixels_mut()[y * 20 + x] =
                PremultipliedColorU8::from_rgba(10, 20, 30, 255).unwrap();
        }
    }
    let trimmed = trim_transparent(&pixmap);
    assert_eq!((trimmed.width(), trimmed.height()), (10, 5));
    assert_eq!(pixel(&trimmed, 0, 0), (10, 20, 30, 255));
    assert_eq!(pixel(&trimmed, 9, 4), (10, 20, 30, 255));
}

#[test]
fn canvas_matches_content_box_without_chrome() {
    let mut screenshot = bare_screenshot();
    screenshot.set_columns(25);
    screenshot.append(&parse_ansi(&"a".repeat(25)));
    let canvas = screenshot.image().unwrap();
    assert_eq!((canvas.width(), canvas.height()), (125, 10));
}

#[test]
fn canvas_width_floors_at_decoration_span() {
    let mut screenshot = bare_screenshot();
    screenshot.append(&parse_ansi("ab"));
    let canvas = screenshot.image().unwrap();
    // 3 * 25 spacing + 3 * 9 radius at scale factor 1.
    assert_eq!(canvas.width(), 102);
}

#[test]
fn clip_trims_margins_away() {
    let mut screenshot = bare_screenshot();
    screenshot.set_columns(25);
    screenshot.set_margin(20.0, 20.0, 20.0, 20.0);
    screenshot.set_padding(10.0, 10.0, 10.0, 10.0);
    screenshot.append(&parse_ansi(&"a".repeat(25)));

    let full = screenshot.image().unwrap();
    assert_eq!((full.width(), full.height()), (185, 70));
    let trimmed = trim_transparent(&full);
    assert_eq!((trimmed.width(), trimmed.height()), (145, 30));
}

#[test]
fn scheme_override_tints_rendered_glyphs() {
    let mut screenshot = bare_screenshot();
    screenshot.load_colorscheme(scheme_file().path()).unwrap();
    screenshot.append(&parse_ansi("\x1b[31mX\x1b[0m"));
    let canvas = screenshot.image().unwrap();
    assert_eq!(pixel(&canvas, 2, 5), (0x11, 0x22, 0x33, 255));
}

#[test]
fn tab_advances_pen_without_drawing() {
    let mut screenshot = bare_screenshot();
    screenshot.append(&parse_ansi("\tX"));
    let canvas = screenshot.image().unwrap();
    // Glyph lands after two space advances; the tab itself leaves the
    // window background untouched.
    assert_eq!(pixel(&canvas, 11, 5), (211, 211, 211, 255));
    assert_eq!(pixel(&canvas, 5, 5), (0x15, 0x15, 0x15, 255));
}

#[test]
fn background_fills_the_cell_box() {
    let mut screenshot = bare_screenshot();
    screenshot.append(&parse_ansi("\x1b[48;2;9;8;7m X"));
    let canvas = screenshot.image().unwrap();
    // The space cell shows its background; the glyph paints over its own.
    assert_eq!(pixel(&canvas, 2, 5), (9, 8, 7, 255));
    assert_eq!(pixel(&canvas, 7, 5), (211, 211, 211, 255));
}

#[test]
fn rendering_without_fonts_is_a_config_error() {
    let mut screenshot = Screenshot::with_options(1.0, |_| None);
    screenshot.append(&parse_ansi("x"));
    let err = screenshot.image().unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("font"), "{err}");
}

#[test]
fn add_content_rejects_invalid_utf8() {
    let mut screenshot = bare_screenshot();
    let mut bytes: &[u8] = &[0x66, 0xFF, 0xFE];
    let err = screenshot.add_content(&mut bytes).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn add_command_styles_the_prompt_line() {
    let mut screenshot = Screenshot::with_options(1.0, |_| None);
    screenshot.set_columns(80);
    screenshot.add_command(["git", "status"]);
    let mut raw = Vec::new();
    screenshot.write_raw(&mut raw).unwrap();
    let text = String::from_utf8(raw).unwrap();
    assert!(text.contains("➜"));
    assert!(text.contains("git status"));
    assert!(text.ends_with('\n'));

    let mut screenshot = Screenshot::with_options(1.0, |key| {
        (key == COMMAND_INDICATOR_ENV).then(|| "$".to_string())
    });
    screenshot.set_columns(80);
    screenshot.add_command(["ls"]);
    let mut raw = Vec::new();
    screenshot.write_raw(&mut raw).unwrap();
    let runes = parse_ansi(std::str::from_utf8(&raw).unwrap());
    assert_eq!(runes[0].symbol, '$');
    assert_eq!(runes[0].style.foreground, Some(Rgb::new(0, 255, 0)));
    assert_eq!(runes[1], ColoredRune::plain(' '));
    assert_eq!(runes[2].style.foreground, Some(Rgb::new(105, 105, 105)));
    assert_eq!(runes.last().map(|r| r.symbol), Some('\n'));
}

#[test]
fn write_png_emits_png_magic() {
    let mut screenshot = bare_screenshot();
    screenshot.append(&parse_ansi("hi"));
    let mut out = Vec::new();
    screenshot.write_png(&mut out).unwrap();
    assert_eq!(&out[..4], &[0x89, b'P', b'N', b'G']);
}

#[test]
fn write_raw_round_trips_ansi() {
    let mut screenshot = bare_screenshot();
    screenshot.set_columns(80);
    let mut input: &[u8] = b"plain \x1b[31mred\x1b[0m tail\n";
    screenshot.add_content(&mut input).unwrap();
    let mut out = Vec::new();
    screenshot.write_raw(&mut out).unwrap();
    let reparsed = parse_ansi(std::str::from_utf8(&out).unwrap());
    assert_eq!(reparsed, parse_ansi("plain \x1b[31mred\x1b[0m tail\n"));
}

#[test]
fn unreliable_glyphs_are_substituted() {
    // The substitution happens at draw time, so both symbols produce the
    // same pixels as a literal '×'.
    let render = |text: &str| {
        let mut screenshot = bare_screenshot();
        screenshot.append(&parse_ansi(text));
        screenshot.image().unwrap().data().to_vec()
    };
    assert_eq!(render("✗"), render("×"));
    assert_eq!(render("ˣ"), render("×"));
}
