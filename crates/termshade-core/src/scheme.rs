use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::{Error, Result, DEFAULT_COLOR_MATCH_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` or `RRGGBB`; any other length is a config error.
    pub fn from_hex(input: &str) -> Result<Self> {
        parse_hex(input).ok_or_else(|| {
            Error::Config(format!(
                "invalid hex color {input:?}: expected exactly 6 hex digits after an optional '#'"
            ))
        })
    }

    fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

fn parse_hex(input: &str) -> Option<Rgb> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgb::new(r, g, b))
}

struct Palette {
    #[allow(dead_code)]
    name: &'static str,
    colors: [Rgb; 16],
}

// Terminal emulators disagree on the RGB values behind the 16 ANSI slots.
// The palettes are queried in this fixed order; the first exact hit wins.
static REFERENCE_PALETTES: &[Palette] = &[
    Palette {
        name: "standard",
        colors: [
            Rgb::new(0, 0, 0),
            Rgb::new(128, 0, 0),
            Rgb::new(0, 128, 0),
            Rgb::new(128, 128, 0),
            Rgb::new(0, 0, 128),
            Rgb::new(128, 0, 128),
            Rgb::new(0, 128, 128),
            Rgb::new(192, 192, 192),
            Rgb::new(128, 128, 128),
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(255, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(255, 0, 255),
            Rgb::new(0, 255, 255),
            Rgb::new(255, 255, 255),
        ],
    },
    Palette {
        name: "xterm",
        colors: [
            Rgb::new(0, 0, 0),
            Rgb::new(205, 0, 0),
            Rgb::new(0, 205, 0),
            Rgb::new(205, 205, 0),
            Rgb::new(0, 0, 238),
            Rgb::new(205, 0, 205),
            Rgb::new(0, 205, 205),
            Rgb::new(229, 229, 229),
            Rgb::new(127, 127, 127),
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(255, 255, 0),
            Rgb::new(92, 92, 255),
            Rgb::new(255, 0, 255),
            Rgb::new(0, 255, 255),
            Rgb::new(255, 255, 255),
        ],
    },
    Palette {
        name: "vga",
        colors: [
            Rgb::new(0, 0, 0),
            Rgb::new(170, 0, 0),
            Rgb::new(0, 170, 0),
            Rgb::new(170, 85, 0),
            Rgb::new(0, 0, 170),
            Rgb::new(170, 0, 170),
            Rgb::new(0, 170, 170),
            Rgb::new(170, 170, 170),
            Rgb::new(85, 85, 85),
            Rgb::new(255, 85, 85),
            Rgb::new(85, 255, 85),
            Rgb::new(255, 255, 85),
            Rgb::new(85, 85, 255),
            Rgb::new(255, 85, 255),
            Rgb::new(85, 255, 255),
            Rgb::new(255, 255, 255),
        ],
    },
];

/// RGB value the stream decoder assigns to a 4-bit color slot. Uses the
/// first reference palette so decoded slot colors always exact-match during
/// colorscheme resolution.
pub(crate) fn base_slot_color(slot: u8) -> Rgb {
    REFERENCE_PALETTES[0].colors[(slot & 0x0F) as usize]
}

pub(crate) struct ColorResolver {
    custom: Option<HashMap<u8, Rgb>>,
    foreground: Rgb,
    background: Rgb,
    match_threshold: u32,
}

impl Default for ColorResolver {
    fn default() -> Self {
        Self {
            custom: None,
            foreground: Rgb::new(0xD3, 0xD3, 0xD3),
            background: Rgb::new(0x15, 0x15, 0x15),
            match_threshold: DEFAULT_COLOR_MATCH_THRESHOLD,
        }
    }
}

impl ColorResolver {
    pub(crate) fn foreground(&self) -> Rgb {
        self.foreground
    }

    pub(crate) fn background(&self) -> Rgb {
        self.background
    }

    pub(crate) fn set_match_threshold(&mut self, threshold: u32) {
        self.match_threshold = threshold;
    }

    /// Scheme override for a slot, or the caller-supplied fallback.
    pub(crate) fn resolve(&self, slot: u8, fallback: Rgb) -> Rgb {
        self.custom
            .as_ref()
            .and_then(|custom| custom.get(&slot).copied())
            .unwrap_or(fallback)
    }

    /// Maps an arbitrary RGB triple back to the ANSI slot it most likely
    /// represents and resolves that slot, with the triple itself as the
    /// fallback for slots without an override. Returns `None` when no
    /// scheme is loaded or when the triple is not close enough to any
    /// reference color; the caller then uses the raw value.
    pub(crate) fn resolve_rgb(&self, color: Rgb) -> Option<Rgb> {
        self.custom.as_ref()?;

        for palette in REFERENCE_PALETTES {
            if let Some(slot) = palette.colors.iter().position(|&c| c == color) {
                return Some(self.resolve(slot as u8, color));
            }
        }

        let mut best: Option<(usize, u32)> = None;
        for palette in REFERENCE_PALETTES {
            for (slot, &reference) in palette.colors.iter().enumerate() {
                let distance = color.distance_squared(reference);
                if best.is_none_or(|(_, d)| distance < d) {
                    best = Some((slot, distance));
                }
            }
        }
        match best {
            Some((slot, distance)) if distance <= self.match_threshold => {
                Some(self.resolve(slot as u8, color))
            }
            _ => None,
        }
    }

    /// Loads a custom colorscheme from a JSON file. The whole file is
    /// validated before any resolver state changes; on error prior colors
    /// stay untouched.
    pub(crate) fn load_colorscheme<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|err| {
            Error::Config(format!(
                "failed to read colorscheme file {}: {err}",
                path.display()
            ))
        })?;
        let parsed = parse_colorscheme(&data)?;

        self.custom = Some(parsed.slots);
        if let Some(foreground) = parsed.foreground {
            self.foreground = foreground;
        }
        if let Some(background) = parsed.background {
            self.background = background;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct SchemeColors {
    #[serde(default)]
    colors: HashMap<String, String>,
}

struct ParsedScheme {
    slots: HashMap<u8, Rgb>,
    foreground: Option<Rgb>,
    background: Option<Rgb>,
}

fn parse_colorscheme(data: &str) -> Result<ParsedScheme> {
    // Either a single `{"colors": {...}}` object or an array of them, in
    // which case the first entry is used.
    let colors = if let Ok(schemes) = serde_json::from_str::<Vec<SchemeColors>>(data) {
        schemes
            .into_iter()
            .next()
            .ok_or_else(|| Error::Config("colorscheme array is empty".to_string()))?
            .colors
    } else {
        serde_json::from_str::<SchemeColors>(data)
            .map_err(|err| Error::Config(format!("failed to parse colorscheme JSON: {err}")))?
            .colors
    };

    let mut slots = HashMap::new();
    for slot in 0..16u8 {
        let key = format!("color{slot}");
        if let Some(hex) = colors.get(&key) {
            let color = parse_hex(hex)
                .ok_or_else(|| Error::Config(format!("invalid color {hex:?} for {key}")))?;
            slots.insert(slot, color);
        }
    }
    let foreground = named_color(&colors, "foreground")?;
    let background = named_color(&colors, "background")?;

    Ok(ParsedScheme {
        slots,
        foreground,
        background,
    })
}

fn named_color(colors: &HashMap<String, String>, key: &str) -> Result<Option<Rgb>> {
    match colors.get(key) {
        Some(hex) => parse_hex(hex)
            .map(Some)
            .ok_or_else(|| Error::Config(format!("invalid color {hex:?} for {key}"))),
        None => Ok(None),
    }
}
