use image::Rgba;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex color `{0}`, expected #rgb, #rgba, #rrggbb or #rrggbbaa")]
    InvalidHex(String),

    #[error("unknown color name `{0}`")]
    UnknownName(String),
}

/// Parse a hex code (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`) or a CSS color
/// name, case-insensitively.
pub fn parse_color(input: &str) -> Result<Rgba<u8>, ColorError> {
    let input = input.trim();
    if let Some(hex) = input.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorError::InvalidHex(input.to_string()));
    }

    let name = input.to_ascii_lowercase();
    match palette::named::from_str(&name) {
        Some(color) => {
            let (r, g, b) = color.into_components();
            Ok(Rgba([r, g, b, 255]))
        }
        None => Err(ColorError::UnknownName(name)),
    }
}

fn parse_hex(hex: &str) -> Option<Rgba<u8>> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok();
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 | 4 => {
            let mut c = [255u8; 4];
            for (i, slot) in c.iter_mut().enumerate().take(hex.len()) {
                *slot = digit(i)? * 17;
            }
            Some(Rgba(c))
        }
        6 | 8 => {
            let mut c = [255u8; 4];
            for (i, slot) in c.iter_mut().enumerate().take(hex.len() / 2) {
                *slot = byte(i * 2)?;
            }
            Some(Rgba(c))
        }
        _ => None,
    }
}
