/// Colour classification for image programs
///
/// Every pixel maps onto one of twenty colours: the 6 hues x 3 lightness
/// levels of the Piet palette, plus white and black. Exact palette values
/// are looked up directly; anything else is snapped to the nearest palette
/// entry so that classification is total over the RGB cube.
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// The six hues, in the cyclic order used to compute hue changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    Red,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
}

impl Hue {
    pub const ALL: [Hue; 6] = [
        Hue::Red,
        Hue::Yellow,
        Hue::Green,
        Hue::Cyan,
        Hue::Blue,
        Hue::Magenta,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Hue::Red => "red",
            Hue::Yellow => "yellow",
            Hue::Green => "green",
            Hue::Cyan => "cyan",
            Hue::Blue => "blue",
            Hue::Magenta => "magenta",
        }
    }
}

/// Lightness levels, in the cyclic order light -> normal -> dark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lightness {
    Light,
    Normal,
    Dark,
}

impl Lightness {
    pub const ALL: [Lightness; 3] = [Lightness::Light, Lightness::Normal, Lightness::Dark];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Lightness::Light => "light",
            Lightness::Normal => "normal",
            Lightness::Dark => "dark",
        }
    }
}

/// Semantic colour of a codel
///
/// White and black sit outside the hue/lightness cycle, so there is no way
/// to express an "undefined hue at normal lightness".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Passable, never executes anything
    White,
    /// Wall; exits into black are treated like the image edge
    Black,
    Chromatic { hue: Hue, lightness: Lightness },
}

impl Color {
    pub const fn new(hue: Hue, lightness: Lightness) -> Self {
        Color::Chromatic { hue, lightness }
    }

    /// Hue, or `None` for white and black
    pub fn hue(self) -> Option<Hue> {
        match self {
            Color::Chromatic { hue, .. } => Some(hue),
            _ => None,
        }
    }

    /// Lightness as seen by the reserved colours too: white is light, black is dark
    pub fn lightness(self) -> Lightness {
        match self {
            Color::White => Lightness::Light,
            Color::Black => Lightness::Dark,
            Color::Chromatic { lightness, .. } => lightness,
        }
    }

    pub fn is_white(self) -> bool {
        self == Color::White
    }

    pub fn is_black(self) -> bool {
        self == Color::Black
    }

    /// Canonical RGB value of this colour
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Color::White => [0xFF, 0xFF, 0xFF],
            Color::Black => [0x00, 0x00, 0x00],
            Color::Chromatic { hue, lightness } => {
                // Channels are "on" or "off" per hue; lightness picks the levels
                let (on, off) = match lightness {
                    Lightness::Light => (0xFF, 0xC0),
                    Lightness::Normal => (0xFF, 0x00),
                    Lightness::Dark => (0xC0, 0x00),
                };
                let mask = match hue {
                    Hue::Red => [true, false, false],
                    Hue::Yellow => [true, true, false],
                    Hue::Green => [false, true, false],
                    Hue::Cyan => [false, true, true],
                    Hue::Blue => [false, false, true],
                    Hue::Magenta => [true, false, true],
                };
                mask.map(|lit| if lit { on } else { off })
            }
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
            Color::Chromatic { hue, lightness } => {
                write!(f, "{} {}", lightness.name(), hue.name())
            }
        }
    }
}

lazy_static! {
    /// All twenty colours in tie-break order: white, black, then light,
    /// normal and dark rows of red..magenta
    pub static ref PALETTE: Vec<Color> = {
        let mut colors = vec![Color::White, Color::Black];
        for lightness in Lightness::ALL {
            for hue in Hue::ALL {
                colors.push(Color::new(hue, lightness));
            }
        }
        colors
    };

    static ref EXACT_MATCHES: HashMap<[u8; 3], Color> =
        PALETTE.iter().map(|&c| (c.rgb(), c)).collect();
}

fn distance_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

/// Map an RGB triple onto the palette
pub fn classify(rgb: [u8; 3]) -> Color {
    if let Some(&color) = EXACT_MATCHES.get(&rgb) {
        return color;
    }

    // min_by_key keeps the first of equal keys, giving palette-order tie breaks
    let nearest = PALETTE
        .iter()
        .copied()
        .min_by_key(|c| distance_sq(rgb, c.rgb()))
        .unwrap_or(Color::Black);
    debug!(
        "non-palette colour #{:02x}{:02x}{:02x} snapped to {}",
        rgb[0], rgb[1], rgb[2], nearest
    );
    nearest
}
