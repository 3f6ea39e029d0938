use serde::{Deserialize, Deserializer, Serialize, de};

/// An opaque RGB color.
///
/// Deserializes from either a `#RGB`/`#RRGGBB` hex string or an
/// `{ "r": .., "g": .., "b": .. }` map, so theme overrides in config files
/// can use the familiar hex form.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    // Default theme palette.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const NAVY: Color = Color::rgb(0, 0, 128);
    pub const DARK_BLUE: Color = Color::rgb(0, 0, 139);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const ALICE_BLUE: Color = Color::rgb(240, 248, 255);
    pub const STEEL_BLUE: Color = Color::rgb(70, 130, 180);

    /// Parse a hex color string (#RGB or #RRGGBB format)
    fn parse_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        let Some(hex) = s.strip_prefix('#') else {
            return Err(format!("Color must start with #, got: {}", s));
        };

        match hex.len() {
            3 => {
                // #RGB format - expand each digit
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16)
                    .map_err(|e| format!("Invalid red component: {}", e))?;
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16)
                    .map_err(|e| format!("Invalid green component: {}", e))?;
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16)
                    .map_err(|e| format!("Invalid blue component: {}", e))?;
                Ok(Color { r, g, b })
            }
            6 => {
                // #RRGGBB format
                let r = u8::from_str_radix(&hex[0..2], 16)
                    .map_err(|e| format!("Invalid red component: {}", e))?;
                let g = u8::from_str_radix(&hex[2..4], 16)
                    .map_err(|e| format!("Invalid green component: {}", e))?;
                let b = u8::from_str_radix(&hex[4..6], 16)
                    .map_err(|e| format!("Invalid blue component: {}", e))?;
                Ok(Color { r, g, b })
            }
            _ => Err(format!(
                "Invalid hex color length: expected 3 or 6, got {}",
                hex.len()
            )),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Str(String),
            Map { r: u8, g: u8, b: u8 },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Str(s) => Self::parse_hex(&s).map_err(de::Error::custom),
            ColorDef::Map { r, g, b } => Ok(Color { r, g, b }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_hex() {
        assert_eq!(Color::parse_hex("#4682B4").unwrap(), Color::STEEL_BLUE);
    }

    #[test]
    fn parses_short_hex() {
        assert_eq!(Color::parse_hex("#000").unwrap(), Color::BLACK);
    }

    #[test]
    fn rejects_missing_hash() {
        assert!(Color::parse_hex("4682B4").is_err());
    }

    #[test]
    fn deserializes_from_string_and_map() {
        let from_str: Color = serde_json::from_str("\"#000080\"").unwrap();
        assert_eq!(from_str, Color::NAVY);

        let from_map: Color = serde_json::from_str(r#"{"r":0,"g":0,"b":128}"#).unwrap();
        assert_eq!(from_map, Color::NAVY);
    }
}
