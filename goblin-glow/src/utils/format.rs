//! Formatting utilities

use humansize::{DECIMAL, format_size};

/// Format file size in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Format a fraction in `[0, 1]` as a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Format a closed range of floats with fixed precision
pub fn format_range(min: f32, max: f32) -> String {
    format!("{min:.3} .. {max:.3}")
}

/// Parse `WIDTHxHEIGHT`, e.g. `1280x720`
pub fn parse_dimensions(text: &str) -> Result<(f32, f32), String> {
    let (w, h) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{text}'"))?;
    let width: f32 = w
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{w}'"))?;
    let height: f32 = h
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{h}'"))?;
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        return Err(format!("dimensions must be positive, got '{text}'"));
    }
    Ok((width, height))
}

/// Parse a comma-separated list of exactly `N` floats
pub fn parse_floats<const N: usize>(text: &str) -> Result<[f32; N], String> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!(
            "expected {N} comma-separated numbers, got {} in '{text}'",
            parts.len()
        ));
    }
    let mut values = [0.0f32; N];
    for (slot, part) in values.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("invalid number '{part}' in '{text}'"))?;
    }
    Ok(values)
}

/// Parse `RRGGBB` or `RRGGBBAA` hex, with or without a leading `#`
pub fn parse_hex_color(text: &str) -> Result<[u8; 4], String> {
    let hex = text.trim().trim_start_matches('#');
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return Err(format!("expected RRGGBB or RRGGBBAA, got '{text}'"));
    }
    let mut rgba = [0, 0, 0, 255];
    for (i, slot) in rgba.iter_mut().enumerate().take(hex.len() / 2) {
        *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| format!("invalid hex color '{text}'"))?;
    }
    Ok(rgba)
}
