//! Color themes
//!
//! Built-in presets (dark, classic, light) plus per-color overrides from config.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All colors the UI draws with
#[derive(Debug, Clone)]
pub struct Theme {
    // Panels
    pub panel_border_active: Color,
    pub panel_border_inactive: Color,
    pub panel_header: Color,
    pub panel_background: Color,

    // Rows
    pub file_normal: Color,
    pub file_directory: Color,
    /// Listing rows that are already in the selection
    pub file_selected: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,

    // Header and status lines
    pub status_bg: Color,
    pub status_fg: Color,
    pub status_error_bg: Color,
    pub status_error_fg: Color,

    // Help screen
    pub help_header_bg: Color,
    pub help_header_fg: Color,
    pub help_content_bg: Color,
    pub help_content_fg: Color,
    pub help_highlight: Color,

    // Dialogs
    pub dialog_bg: Color,
    pub dialog_border: Color,
    pub dialog_danger_bg: Color,
    pub dialog_danger_border: Color,
    pub dialog_title: Color,
    pub dialog_text: Color,
    pub dialog_warning: Color,
    pub dialog_input_bg: Color,
    pub dialog_input_fg: Color,
    pub dialog_button_focused_bg: Color,
    pub dialog_button_focused_fg: Color,
    pub dialog_button_unfocused: Color,
    pub dialog_help: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        let teal = Color::Rgb(0, 150, 136);
        let gold = Color::Rgb(200, 170, 100);
        let light_gray = Color::Rgb(171, 178, 191);
        let dark_gray = Color::Rgb(76, 82, 99);
        let charcoal = Color::Rgb(58, 58, 58);

        Self {
            panel_border_active: teal,
            panel_border_inactive: Color::Rgb(160, 160, 160),
            panel_header: gold,
            panel_background: charcoal,

            file_normal: Color::Rgb(220, 220, 220),
            file_directory: Color::Rgb(171, 175, 135),
            file_selected: Color::Rgb(255, 220, 80),
            cursor_bg: Color::Rgb(0, 95, 95),
            cursor_fg: Color::Rgb(220, 220, 220),

            status_bg: Color::Rgb(45, 45, 45),
            status_fg: light_gray,
            status_error_bg: Color::Rgb(180, 60, 60),
            status_error_fg: Color::White,

            help_header_bg: teal,
            help_header_fg: Color::Black,
            help_content_bg: charcoal,
            help_content_fg: light_gray,
            help_highlight: gold,

            dialog_bg: Color::Rgb(30, 40, 55),
            dialog_border: Color::Rgb(97, 175, 239),
            dialog_danger_bg: Color::Rgb(55, 35, 35),
            dialog_danger_border: Color::Rgb(224, 108, 117),
            dialog_title: Color::White,
            dialog_text: light_gray,
            dialog_warning: gold,
            dialog_input_bg: dark_gray,
            dialog_input_fg: Color::White,
            dialog_button_focused_bg: teal,
            dialog_button_focused_fg: Color::Black,
            dialog_button_unfocused: dark_gray,
            dialog_help: dark_gray,
        }
    }

    /// Blue-background Norton Commander look
    pub fn classic() -> Self {
        Self {
            panel_border_active: Color::LightCyan,
            panel_border_inactive: Color::Cyan,
            panel_header: Color::Yellow,
            panel_background: Color::Blue,

            file_normal: Color::LightCyan,
            file_directory: Color::White,
            file_selected: Color::Yellow,
            cursor_bg: Color::Cyan,
            cursor_fg: Color::Black,

            status_bg: Color::Cyan,
            status_fg: Color::Black,
            status_error_bg: Color::Red,
            status_error_fg: Color::White,

            help_header_bg: Color::Cyan,
            help_header_fg: Color::Black,
            help_content_bg: Color::Blue,
            help_content_fg: Color::LightCyan,
            help_highlight: Color::Yellow,

            dialog_bg: Color::Blue,
            dialog_border: Color::LightCyan,
            dialog_danger_bg: Color::Blue,
            dialog_danger_border: Color::Red,
            dialog_title: Color::White,
            dialog_text: Color::LightCyan,
            dialog_warning: Color::Yellow,
            dialog_input_bg: Color::Cyan,
            dialog_input_fg: Color::Black,
            dialog_button_focused_bg: Color::Cyan,
            dialog_button_focused_fg: Color::Black,
            dialog_button_unfocused: Color::LightCyan,
            dialog_help: Color::Cyan,
        }
    }

    /// For light terminal backgrounds
    pub fn light() -> Self {
        Self {
            panel_border_active: Color::Blue,
            panel_border_inactive: Color::DarkGray,
            panel_header: Color::Blue,
            panel_background: Color::White,

            file_normal: Color::Black,
            file_directory: Color::Blue,
            file_selected: Color::Magenta,
            cursor_bg: Color::Blue,
            cursor_fg: Color::White,

            status_bg: Color::Gray,
            status_fg: Color::Black,
            status_error_bg: Color::Red,
            status_error_fg: Color::White,

            help_header_bg: Color::Blue,
            help_header_fg: Color::White,
            help_content_bg: Color::White,
            help_content_fg: Color::Black,
            help_highlight: Color::Blue,

            dialog_bg: Color::Rgb(220, 220, 255),
            dialog_border: Color::Blue,
            dialog_danger_bg: Color::Rgb(255, 220, 220),
            dialog_danger_border: Color::Red,
            dialog_title: Color::Black,
            dialog_text: Color::Black,
            dialog_warning: Color::Red,
            dialog_input_bg: Color::Rgb(180, 210, 255),
            dialog_input_fg: Color::Black,
            dialog_button_focused_bg: Color::Blue,
            dialog_button_focused_fg: Color::White,
            dialog_button_unfocused: Color::DarkGray,
            dialog_help: Color::Gray,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "classic" => Some(Self::classic()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Apply custom color overrides from config. Unknown keys and
    /// unparsable colors are skipped.
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
        for (key, value) in overrides {
            let Some(color) = parse_color(value) else {
                log::warn!("theme color {} = {:?} is not a color", key, value);
                continue;
            };
            let slot = match key.as_str() {
                "panel_border_active" => &mut self.panel_border_active,
                "panel_border_inactive" => &mut self.panel_border_inactive,
                "panel_header" => &mut self.panel_header,
                "panel_background" => &mut self.panel_background,
                "file_normal" => &mut self.file_normal,
                "file_directory" => &mut self.file_directory,
                "file_selected" => &mut self.file_selected,
                "cursor_bg" => &mut self.cursor_bg,
                "cursor_fg" => &mut self.cursor_fg,
                "status_bg" => &mut self.status_bg,
                "status_fg" => &mut self.status_fg,
                "status_error_bg" => &mut self.status_error_bg,
                "status_error_fg" => &mut self.status_error_fg,
                "help_header_bg" => &mut self.help_header_bg,
                "help_header_fg" => &mut self.help_header_fg,
                "help_content_bg" => &mut self.help_content_bg,
                "help_content_fg" => &mut self.help_content_fg,
                "help_highlight" => &mut self.help_highlight,
                "dialog_bg" => &mut self.dialog_bg,
                "dialog_border" => &mut self.dialog_border,
                "dialog_danger_bg" => &mut self.dialog_danger_bg,
                "dialog_danger_border" => &mut self.dialog_danger_border,
                "dialog_title" => &mut self.dialog_title,
                "dialog_text" => &mut self.dialog_text,
                "dialog_warning" => &mut self.dialog_warning,
                "dialog_input_bg" => &mut self.dialog_input_bg,
                "dialog_input_fg" => &mut self.dialog_input_fg,
                "dialog_button_focused_bg" => &mut self.dialog_button_focused_bg,
                "dialog_button_focused_fg" => &mut self.dialog_button_focused_fg,
                "dialog_button_unfocused" => &mut self.dialog_button_unfocused,
                "dialog_help" => &mut self.dialog_help,
                _ => continue,
            };
            *slot = color;
        }
        self
    }
}

/// `[theme]` section of the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// "dark", "classic" or "light"
    pub preset: String,
    /// Per-color overrides on top of the preset
    pub colors: HashMap<String, String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            preset: "dark".to_string(),
            colors: HashMap::new(),
        }
    }
}

impl ThemeConfig {
    pub fn build_theme(&self) -> Theme {
        Theme::by_name(&self.preset)
            .unwrap_or_else(|| {
                log::warn!("unknown theme preset {:?}, using dark", self.preset);
                Theme::dark()
            })
            .with_overrides(&self.colors)
    }
}

/// Parse a color string into a ratatui Color
///
/// Supports:
/// - Named colors: "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white", "gray"
/// - Light variants: "light_red", "light_green", etc.
/// - RGB hex: "#RRGGBB" or "RRGGBB"
/// - RGB decimal: "rgb(R,G,B)"
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    let named = match s.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "light_red" | "lightred" => Some(Color::LightRed),
        "light_green" | "lightgreen" => Some(Color::LightGreen),
        "light_yellow" | "lightyellow" => Some(Color::LightYellow),
        "light_blue" | "lightblue" => Some(Color::LightBlue),
        "light_magenta" | "lightmagenta" => Some(Color::LightMagenta),
        "light_cyan" | "lightcyan" => Some(Color::LightCyan),
        "reset" => Some(Color::Reset),
        _ => None,
    };
    if named.is_some() {
        return named;
    }

    let hex = s.strip_prefix('#').unwrap_or(&s);
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    let inner = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let parts: Vec<&str> = inner.split(',').collect();
    if parts.len() != 3 {
        return None;
    }
    Some(Color::Rgb(
        parts[0].trim().parse().ok()?,
        parts[1].trim().parse().ok()?,
        parts[2].trim().parse().ok()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colors() {
        assert_eq!(parse_color("BLUE"), Some(Color::Blue));
        assert_eq!(parse_color("dark_gray"), Some(Color::DarkGray));
        assert_eq!(parse_color("#1a2b3c"), Some(Color::Rgb(26, 43, 60)));
        assert_eq!(parse_color("rgb(0, 128, 255)"), Some(Color::Rgb(0, 128, 255)));
        assert_eq!(parse_color("rgb(1,2)"), None);
        assert_eq!(parse_color("chartreuse-ish"), None);
    }

    #[test]
    fn test_presets() {
        assert!(Theme::by_name("Classic").is_some());
        assert!(Theme::by_name("nonexistent").is_none());
    }

    #[test]
    fn test_overrides_from_toml() {
        let toml_str = r##"
            preset = "light"
            [colors]
            cursor_bg = "#ff0000"
            not_a_slot = "red"
            status_fg = "nonsense"
        "##;
        let config: ThemeConfig = toml_edit::de::from_str(toml_str).unwrap();
        let theme = config.build_theme();
        assert_eq!(theme.cursor_bg, Color::Rgb(255, 0, 0));
        assert_eq!(theme.status_fg, Theme::light().status_fg);
    }
}
