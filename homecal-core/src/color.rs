//! Packed ARGB event colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A color stored as a packed `0xAARRGGBB` integer.
///
/// Zero is never a real color here; events store zero to mean "use the
/// caller's default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventColor(pub u32);

impl EventColor {
    pub const BLACK: EventColor = EventColor(0xFF00_0000);
    pub const WHITE: EventColor = EventColor(0xFFFF_FFFF);

    /// Fallback default when nothing is configured.
    pub const DEFAULT: EventColor = EventColor(0xFF67_50A4);

    /// Fixed swatches offered next to the theme colors.
    pub const PALETTE: [EventColor; 2] = [EventColor(0xFF00_897B), EventColor(0xFF6D_4C41)];

    /// The stored color, or `default` when nothing was stored.
    pub fn resolve(stored: u32, default: EventColor) -> EventColor {
        if stored == 0 { default } else { EventColor(stored) }
    }

    pub fn argb(self) -> u32 {
        self.0
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Relative luminance of the sRGB color, 0.0 (black) to 1.0 (white).
    /// Alpha is ignored.
    pub fn luminance(self) -> f32 {
        fn linear(channel: u8) -> f32 {
            let c = f32::from(channel) / 255.0;
            if c <= 0.040_45 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * linear(self.red()) + 0.7152 * linear(self.green()) + 0.0722 * linear(self.blue())
    }

    /// Black or white, whichever reads better on top of this color.
    pub fn contrasting_text(self) -> EventColor {
        if self.luminance() > 0.5 {
            EventColor::BLACK
        } else {
            EventColor::WHITE
        }
    }

    /// `#RRGGBB` for opaque colors, `#AARRGGBB` otherwise.
    pub fn to_hex(self) -> String {
        if self.alpha() == 0xFF {
            format!("#{:06X}", self.0 & 0x00FF_FFFF)
        } else {
            format!("#{:08X}", self.0)
        }
    }
}

impl fmt::Display for EventColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for EventColor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || CoreError::InvalidColor(s.to_string());

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            6 => u32::from_str_radix(hex, 16)
                .map(|rgb| EventColor(0xFF00_0000 | rgb))
                .map_err(|_| invalid()),
            8 => u32::from_str_radix(hex, 16)
                .map(EventColor)
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_resolves_to_default() {
        let default = EventColor(0xFF12_3456);
        assert_eq!(EventColor::resolve(0, default), default);
        assert_eq!(EventColor::resolve(0xFF00_897B, default), EventColor(0xFF00_897B));
    }

    #[test]
    fn channels() {
        let c = EventColor(0x80FF_4020);
        assert_eq!(c.alpha(), 0x80);
        assert_eq!(c.red(), 0xFF);
        assert_eq!(c.green(), 0x40);
        assert_eq!(c.blue(), 0x20);
    }

    #[test]
    fn luminance_extremes() {
        assert!(EventColor::BLACK.luminance() < 1e-6);
        assert!((EventColor::WHITE.luminance() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn dark_colors_get_white_text() {
        assert_eq!(EventColor(0xFF00_897B).contrasting_text(), EventColor::WHITE);
        assert_eq!(EventColor::DEFAULT.contrasting_text(), EventColor::WHITE);
    }

    #[test]
    fn light_colors_get_black_text() {
        assert_eq!(EventColor(0xFFFF_EB3B).contrasting_text(), EventColor::BLACK);
        assert_eq!(EventColor::WHITE.contrasting_text(), EventColor::BLACK);
    }

    #[test]
    fn parse_hex() {
        assert_eq!("#00897B".parse::<EventColor>().unwrap(), EventColor(0xFF00_897B));
        assert_eq!("806D4C41".parse::<EventColor>().unwrap(), EventColor(0x806D_4C41));
        assert!("#12345".parse::<EventColor>().is_err());
        assert!("#GG897B".parse::<EventColor>().is_err());
        assert!("+00897B".parse::<EventColor>().is_err());
    }

    #[test]
    fn hex_output() {
        assert_eq!(EventColor(0xFF00_897B).to_hex(), "#00897B");
        assert_eq!(EventColor(0x806D_4C41).to_string(), "#806D4C41");
    }
}
