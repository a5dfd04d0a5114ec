use ratatui::style::Color;

use crate::config::ThemeConfig;

/// Colors used across the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct TuiTheme {
    pub background: Color,
    pub panel: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub error: Color,
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0x1A, 0x1A, 0x2E),
            panel: Color::Rgb(0x28, 0x2C, 0x34),
            foreground: Color::Rgb(0xE5, 0xE7, 0xEB),
            muted: Color::Rgb(0x9C, 0xA3, 0xAF),
            accent: Color::Rgb(0x00, 0xE5, 0xA0),
            border: Color::Rgb(0x44, 0x4C, 0x5C),
            error: Color::Rgb(0xF8, 0x71, 0x71),
        }
    }
}

impl TuiTheme {
    /// Built-in palette with any configured overrides applied.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = Self::default();
        let overrides = [
            (&config.background, &mut theme.background),
            (&config.panel, &mut theme.panel),
            (&config.foreground, &mut theme.foreground),
            (&config.muted, &mut theme.muted),
            (&config.accent, &mut theme.accent),
            (&config.border, &mut theme.border),
            (&config.error, &mut theme.error),
        ];
        for (value, slot) in overrides {
            if let Some(hex) = value {
                match parse_color(hex) {
                    Some(color) => *slot = color,
                    None => tracing::warn!("Ignoring invalid theme color '{}'", hex),
                }
            }
        }
        theme
    }
}

/// Parse `#RRGGBB`, `#RRGGBBAA` (alpha ignored) or a named ratatui color.
pub fn parse_color(value: &str) -> Option<Color> {
    let hex = value.trim().trim_start_matches('#');
    if matches!(hex.len(), 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    value.trim().parse::<Color>().ok()
}
