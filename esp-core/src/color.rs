//! Farb-Codec: `#rrggbb` ↔ RGB8
//!
//! Reine Funktionen ohne Hardware-Dependencies (testbar!)

use core::fmt;

use rgb::RGB8;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Hex-String mit führendem `#` (immer genau 7 Zeichen)
pub type HexString = heapless::String<7>;

/// Fehler beim Dekodieren eines Hex-Farbstrings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorError {
    /// Nach Entfernen des `#` sind es nicht genau 6 Zeichen
    InvalidLength,
    /// Zeichen ist keine Hex-Ziffer
    InvalidDigit,
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::InvalidLength => f.write_str("color must have exactly 6 hex digits"),
            ColorError::InvalidDigit => f.write_str("color contains a non-hex character"),
        }
    }
}

/// Dekodiert `#rrggbb` (oder `rrggbb`) in eine RGB8-Farbe
///
/// Kurzform (`#rgb`) und Alpha-Kanal werden nicht unterstützt.
///
/// # Beispiele
///
/// ```
/// # use rgb::RGB8;
/// # use esp_core::decode_hex;
/// assert_eq!(decode_hex("#FF8000"), Ok(RGB8 { r: 255, g: 128, b: 0 }));
/// assert_eq!(decode_hex("0000ff"), Ok(RGB8 { r: 0, g: 0, b: 255 }));
/// assert!(decode_hex("#fff").is_err());
/// ```
pub fn decode_hex(s: &str) -> Result<RGB8, ColorError> {
    let digits = s.strip_prefix('#').unwrap_or(s).as_bytes();
    if digits.len() != 6 {
        return Err(ColorError::InvalidLength);
    }

    let channel = |i: usize| -> Result<u8, ColorError> {
        Ok(nibble(digits[i])? << 4 | nibble(digits[i + 1])?)
    };

    Ok(RGB8 {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

fn nibble(c: u8) -> Result<u8, ColorError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(ColorError::InvalidDigit),
    }
}

/// Kodiert eine RGB8-Farbe als `#rrggbb` (Kleinbuchstaben)
///
/// ```
/// # use rgb::RGB8;
/// # use esp_core::encode_hex;
/// assert_eq!(encode_hex(RGB8 { r: 255, g: 0, b: 16 }).as_str(), "#ff0010");
/// ```
pub fn encode_hex(color: RGB8) -> HexString {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";

    let mut out = HexString::new();
    for c in ['#'].into_iter().chain(
        [color.r, color.g, color.b]
            .into_iter()
            .flat_map(|v| [DIGITS[(v >> 4) as usize], DIGITS[(v & 0x0f) as usize]])
            .map(char::from),
    ) {
        // 7 Zeichen passen immer in die Kapazität
        let _ = out.push(c);
    }
    out
}

/// Skaliert eine Farbe mit der globalen Strip-Helligkeit (0-255)
///
/// Gleiche Formel wie die NeoPixel-Treiber: `(c * (brightness + 1)) >> 8`.
/// Bei 255 bleibt die Farbe unverändert, bei 0 ist die LED aus.
pub fn scale_brightness(color: RGB8, brightness: u8) -> RGB8 {
    let scale = brightness as u16 + 1;
    let channel = |c: u8| ((c as u16 * scale) >> 8) as u8;
    RGB8 {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
    }
}

/// RGB8-Farbe, die in JSON als `"#rrggbb"` erscheint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HexColor(pub RGB8);

impl From<RGB8> for HexColor {
    fn from(color: RGB8) -> Self {
        Self(color)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_hex(self.0))
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexColorVisitor;

        impl Visitor<'_> for HexColorVisitor {
            type Value = HexColor;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a color string like \"#rrggbb\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<HexColor, E> {
                decode_hex(v).map(HexColor).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(HexColorVisitor)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for HexColor {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "#{=u8:02x}{=u8:02x}{=u8:02x}", self.0.r, self.0.g, self.0.b)
    }
}
