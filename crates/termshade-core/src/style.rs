use crate::scheme::Rgb;

const FOREGROUND_SET: u64 = 1;
const BACKGROUND_SET: u64 = 1 << 1;
const EMPHASIS_SHIFT: u32 = 2;
const EMPHASIS_MASK: u64 = 0b11 << EMPHASIS_SHIFT;
const UNDERLINE: u64 = 1 << 4;
const FOREGROUND_SHIFT: u32 = 8;
const BACKGROUND_SHIFT: u32 = 32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Emphasis {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl Emphasis {
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => Emphasis::Normal,
            (true, false) => Emphasis::Bold,
            (false, true) => Emphasis::Italic,
            (true, true) => Emphasis::BoldItalic,
        }
    }

    fn code(self) -> u64 {
        match self {
            Emphasis::Normal => 0,
            Emphasis::Bold => 1,
            Emphasis::Italic => 2,
            Emphasis::BoldItalic => 3,
        }
    }

    fn from_code(code: u64) -> Self {
        match code {
            1 => Emphasis::Bold,
            2 => Emphasis::Italic,
            3 => Emphasis::BoldItalic,
            _ => Emphasis::Normal,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, Emphasis::Bold | Emphasis::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, Emphasis::Italic | Emphasis::BoldItalic)
    }
}

/// Rendering attributes of a single symbol, decoded once from the packed
/// wire form. Colors are only present when the corresponding set flag was on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub foreground: Option<Rgb>,
    pub background: Option<Rgb>,
    pub emphasis: Emphasis,
    pub underline: bool,
}

impl Style {
    pub fn from_bits(bits: u64) -> Self {
        let foreground = if bits & FOREGROUND_SET != 0 {
            Some(rgb_from_bits(bits >> FOREGROUND_SHIFT))
        } else {
            None
        };
        let background = if bits & BACKGROUND_SET != 0 {
            Some(rgb_from_bits(bits >> BACKGROUND_SHIFT))
        } else {
            None
        };
        Self {
            foreground,
            background,
            emphasis: Emphasis::from_code((bits & EMPHASIS_MASK) >> EMPHASIS_SHIFT),
            underline: bits & UNDERLINE != 0,
        }
    }

    pub fn to_bits(self) -> u64 {
        let mut bits = self.emphasis.code() << EMPHASIS_SHIFT;
        if self.underline {
            bits |= UNDERLINE;
        }
        if let Some(color) = self.foreground {
            bits |= FOREGROUND_SET;
            bits |= rgb_to_bits(color) << FOREGROUND_SHIFT;
        }
        if let Some(color) = self.background {
            bits |= BACKGROUND_SET;
            bits |= rgb_to_bits(color) << BACKGROUND_SHIFT;
        }
        bits
    }
}

fn rgb_from_bits(bits: u64) -> Rgb {
    Rgb::new(
        (bits & 0xFF) as u8,
        ((bits >> 8) & 0xFF) as u8,
        ((bits >> 16) & 0xFF) as u8,
    )
}

fn rgb_to_bits(color: Rgb) -> u64 {
    color.r as u64 | (color.g as u64) << 8 | (color.b as u64) << 16
}

/// One character plus its rendering attributes; sequence order is
/// rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColoredRune {
    pub symbol: char,
    pub style: Style,
}

impl ColoredRune {
    pub fn plain(symbol: char) -> Self {
        Self {
            symbol,
            style: Style::default(),
        }
    }
}
