use vte::{Params, Parser, Perform};

use crate::scheme::{base_slot_color, Rgb};
use crate::style::{ColoredRune, Emphasis, Style};

/// Decodes a UTF-8 text stream with embedded SGR escape sequences into
/// styled runes. Unsupported escape sequences are consumed and dropped.
pub(crate) fn parse_ansi(text: &str) -> Vec<ColoredRune> {
    let mut parser = Parser::new();
    let mut performer = AnsiPerformer::default();
    parser.advance(&mut performer, text.as_bytes());
    performer.runes
}

#[derive(Default)]
struct AnsiPerformer {
    runes: Vec<ColoredRune>,
    foreground: Option<Rgb>,
    background: Option<Rgb>,
    bold: bool,
    italic: bool,
    underline: bool,
}

impl AnsiPerformer {
    fn current_style(&self) -> Style {
        Style {
            foreground: self.foreground,
            background: self.background,
            emphasis: Emphasis::from_flags(self.bold, self.italic),
            underline: self.underline,
        }
    }

    fn push(&mut self, symbol: char) {
        self.runes.push(ColoredRune {
            symbol,
            style: self.current_style(),
        });
    }

    fn reset(&mut self) {
        self.foreground = None;
        self.background = None;
        self.bold = false;
        self.italic = false;
        self.underline = false;
    }

    fn apply_sgr(&mut self, params: &[u16]) {
        let mut iter = params.iter().copied();
        while let Some(code) = iter.next() {
            match code {
                0 => self.reset(),
                1 => self.bold = true,
                3 => self.italic = true,
                4 => self.underline = true,
                22 => self.bold = false,
                23 => self.italic = false,
                24 => self.underline = false,
                30..=37 => self.foreground = Some(base_slot_color((code - 30) as u8)),
                39 => self.foreground = None,
                40..=47 => self.background = Some(base_slot_color((code - 40) as u8)),
                49 => self.background = None,
                90..=97 => self.foreground = Some(base_slot_color((code - 90 + 8) as u8)),
                100..=107 => self.background = Some(base_slot_color((code - 100 + 8) as u8)),
                38 => {
                    if let Some(color) = parse_extended_color(&mut iter) {
                        self.foreground = Some(color);
                    }
                }
                48 => {
                    if let Some(color) = parse_extended_color(&mut iter) {
                        self.background = Some(color);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Consumes the parameters after a 38/48 introducer: `5;idx` selects a
/// 256-color palette entry, `2;r;g;b` a direct RGB triple.
fn parse_extended_color(iter: &mut impl Iterator<Item = u16>) -> Option<Rgb> {
    match iter.next()? {
        5 => {
            let idx = iter.next()?;
            Some(xterm_color((idx & 0xFF) as u8))
        }
        2 => {
            let r = iter.next()?;
            let g = iter.next()?;
            let b = iter.next()?;
            Some(Rgb::new(
                (r & 0xFF) as u8,
                (g & 0xFF) as u8,
                (b & 0xFF) as u8,
            ))
        }
        _ => None,
    }
}

/// RGB value of a 256-color palette index: the 16 base slots, a 6x6x6
/// color cube, then a 24-step grayscale ramp.
pub(crate) fn xterm_color(idx: u8) -> Rgb {
    if idx < 16 {
        return base_slot_color(idx);
    }
    if idx >= 232 {
        let v = 8 + (idx - 232) * 10;
        return Rgb::new(v, v, v);
    }
    let idx = idx - 16;
    let to_comp = |v: u8| if v == 0 { 0 } else { 55 + 40 * v };
    Rgb::new(to_comp(idx / 36), to_comp(idx / 6 % 6), to_comp(idx % 6))
}

impl Perform for AnsiPerformer {
    fn print(&mut self, c: char) {
        self.push(c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            b'\n' | b'\t' => self.push(byte as char),
            _ => {}
        }
    }

    fn csi_dispatch(&mut self, params: &Params, _intermediates: &[u8], ignore: bool, action: char) {
        if ignore || action != 'm' {
            return;
        }
        self.apply_sgr(&params_to_vec(params));
    }
}

fn params_to_vec(params: &Params) -> Vec<u16> {
    let mut out = Vec::new();
    for param in params.iter() {
        for &sub in param {
            out.push(sub);
        }
    }
    if out.is_empty() {
        out.push(0);
    }
    out
}

/// Re-encodes styled runes as a UTF-8 stream with SGR escape sequences.
/// Plain runs come out byte-identical to the original plain text.
pub(crate) fn encode_runes(runes: &[ColoredRune]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut active = Style::default();
    let mut buf = [0u8; 4];
    for rune in runes {
        if rune.style != active {
            emit_transition(&mut out, active, rune.style);
            active = rune.style;
        }
        out.extend_from_slice(rune.symbol.encode_utf8(&mut buf).as_bytes());
    }
    if active != Style::default() {
        out.extend_from_slice(b"\x1b[0m");
    }
    out
}

fn emit_transition(out: &mut Vec<u8>, from: Style, to: Style) {
    let mut codes: Vec<String> = Vec::new();
    if from != Style::default() {
        codes.push("0".to_string());
    }
    if to.emphasis.is_bold() {
        codes.push("1".to_string());
    }
    if to.emphasis.is_italic() {
        codes.push("3".to_string());
    }
    if to.underline {
        codes.push("4".to_string());
    }
    if let Some(fg) = to.foreground {
        codes.push(format!("38;2;{};{};{}", fg.r, fg.g, fg.b));
    }
    if let Some(bg) = to.background {
        codes.push(format!("48;2;{};{};{}", bg.r, bg.g, bg.b));
    }
    if codes.is_empty() {
        codes.push("0".to_string());
    }
    out.extend_from_slice(b"\x1b[");
    out.extend_from_slice(codes.join(";").as_bytes());
    out.push(b'm');
}
