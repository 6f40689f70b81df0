//! Configuration loading
//!
//! `config.toml` in the platform config directory is read once at startup
//! and never written. A missing file means defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use encoding_rs::{Encoding, UTF_8};

use crate::commands::ReadLimits;
use crate::errors::{AppError, AppResult};
use crate::safety::text::encoding_for_label;
use crate::ui::ThemeConfig;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub reading: ReadingConfig,
    pub encoding: EncodingConfig,
    pub logging: LoggingConfig,
    pub theme: ThemeConfig,
    /// Keyboard shortcuts
    pub keybindings: KeyBindings,
    /// Problems met while loading, reported once logging is up
    #[serde(skip)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Show hidden files (starting with . on Unix)
    pub show_hidden: bool,
    /// List directories before files
    pub dirs_first: bool,
    /// Directory to open at startup instead of the volume list
    pub start_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    /// Characters per block when streaming a file
    pub chunk_chars: usize,
    /// Stop reading a file after this many megabytes worth of characters
    /// (0 = no limit)
    pub limit_mb: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Encoding for the plain read/create commands
    pub default: String,
    /// Encodings offered by the encoding dialog (WHATWG labels)
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// "off", "error", "warn", "info", "debug" or "trace"
    pub level: String,
    /// Log file; defaults to safefm.log in the config directory
    pub file: Option<String>,
}

/// Keyboard shortcut configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeyBindings {
    /// Custom keybindings (action -> key)
    #[serde(flatten)]
    pub bindings: HashMap<String, String>,
}

impl KeyBindings {
    /// Get the key binding for an action, falling back to default
    pub fn get(&self, action: &str) -> &str {
        self.bindings
            .get(action)
            .map(|s| s.as_str())
            .unwrap_or_else(|| default_keybinding(action))
    }

    /// Check if a key event matches an action
    pub fn matches(&self, action: &str, key: &KeyEvent) -> bool {
        parse_key_binding(self.get(action))
            .map(|(code, mods)| normalize_binding(code, mods) == normalize_event(key.code, key.modifiers))
            .unwrap_or(false)
    }

    /// Check an action and its `_alt` variant
    pub fn matches_any(&self, action: &str, key: &KeyEvent) -> bool {
        self.matches(action, key) || self.matches(&format!("{}_alt", action), key)
    }
}

/// Letters in bindings compare case-insensitively; Shift must be spelled
/// out ("Shift+R"). Other characters already encode Shift.
fn normalize_binding(code: KeyCode, mods: KeyModifiers) -> (KeyCode, KeyModifiers) {
    match code {
        KeyCode::Char(c) if c.is_alphabetic() => (KeyCode::Char(lowercase(c)), mods),
        KeyCode::Char(c) => (KeyCode::Char(c), mods.difference(KeyModifiers::SHIFT)),
        other => (other, mods),
    }
}

/// Some terminals report Shift+letter only through the uppercase char.
fn normalize_event(code: KeyCode, mods: KeyModifiers) -> (KeyCode, KeyModifiers) {
    match code {
        KeyCode::Char(c) if c.is_alphabetic() && c.is_uppercase() => {
            (KeyCode::Char(lowercase(c)), mods | KeyModifiers::SHIFT)
        }
        other => normalize_binding(other, mods),
    }
}

fn lowercase(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Parse a key binding string like "Ctrl+C", "Alt+F1", "F10", etc.
pub fn parse_key_binding(s: &str) -> Option<(KeyCode, KeyModifiers)> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    // "+" on its own is the plus key
    if s == "+" {
        return Some((KeyCode::Char('+'), KeyModifiers::NONE));
    }

    let mut modifiers = KeyModifiers::NONE;
    let mut parts: Vec<&str> = s.split('+').collect();

    // Process modifiers (all but last part)
    while parts.len() > 1 {
        let modifier = parts.remove(0).to_lowercase();
        match modifier.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None, // Unknown modifier
        }
    }

    let code = parse_key_code(parts[0])?;
    Some((code, modifiers))
}

/// Parse a key code string
fn parse_key_code(s: &str) -> Option<KeyCode> {
    let s_lower = s.to_lowercase();

    // Function keys
    if s_lower.starts_with('f')
        && s_lower.len() >= 2
        && let Ok(n) = s_lower[1..].parse::<u8>()
        && (1..=12).contains(&n)
    {
        return Some(KeyCode::F(n));
    }

    match s_lower.as_str() {
        "esc" | "escape" => Some(KeyCode::Esc),
        "enter" | "return" => Some(KeyCode::Enter),
        "tab" => Some(KeyCode::Tab),
        "backspace" | "bs" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        "insert" | "ins" => Some(KeyCode::Insert),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "space" => Some(KeyCode::Char(' ')),
        _ => {
            // Single character
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

/// Get the default key binding for an action
pub fn default_keybinding(action: &str) -> &'static str {
    match action {
        // Application
        "quit" => "F10",
        "quit_alt" => "Esc",
        "quit_letter" => "Q",
        "help" => "F1",
        "help_alt" => "H",
        "refresh" => "Ctrl+R",

        // Panels
        "toggle_panel" => "Tab",
        "move_up" => "Up",
        "move_down" => "Down",
        "page_up" => "PageUp",
        "page_down" => "PageDown",
        "go_home" => "Home",
        "go_end" => "End",
        "enter" => "Enter",
        "volumes" => "/",
        "volumes_alt" => "\\",

        // Selection
        "select" => "Insert",
        "select_alt" => "Space",
        "unselect" => "Delete",
        "unselect_alt" => "Backspace",

        // Commands
        "read" => "F2",
        "read_alt" => "R",
        "read_encoding" => "Shift+R",
        "create" => "F4",
        "create_alt" => "N",
        "create_encoding" => "Shift+N",
        "copy" => "F5",
        "copy_alt" => "C",
        "move" => "F6",
        "move_alt" => "M",
        "delete" => "F8",
        "delete_alt" => "D",

        // Unknown action
        _ => "",
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            show_hidden: true,
            dirs_first: false,
            start_path: None,
        }
    }
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            chunk_chars: crate::safety::blocks::CHUNK_CHARS,
            limit_mb: 100,
        }
    }
}

impl ReadingConfig {
    pub fn limits(&self) -> ReadLimits {
        let limit_chars = match self.limit_mb {
            0 => None,
            mb => usize::try_from(mb.saturating_mul(1024 * 1024)).ok(),
        };
        ReadLimits {
            chunk_chars: self.chunk_chars.max(1),
            limit_chars,
        }
    }
}

impl Default for EncodingConfig {
    fn default() -> Self {
        let choices = [
            "utf-8",
            "windows-1251",
            "koi8-r",
            "ibm866",
            "windows-1252",
            "iso-8859-2",
            "utf-16le",
            "utf-16be",
            "shift_jis",
            "gbk",
        ];
        Self {
            default: "utf-8".to_string(),
            choices: choices.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl EncodingConfig {
    pub fn default_encoding(&self) -> &'static Encoding {
        encoding_for_label(&self.default).unwrap_or_else(|| {
            log::warn!("unknown default encoding {:?}, using UTF-8", self.default);
            UTF_8
        })
    }

    /// Encodings for the dialog: UTF-8 first, unknown labels and duplicates
    /// dropped, config order otherwise.
    pub fn choices(&self) -> Vec<&'static Encoding> {
        let mut list = vec![UTF_8];
        for label in &self.choices {
            match encoding_for_label(label) {
                Some(enc) if !list.contains(&enc) => list.push(enc),
                Some(_) => {}
                None => log::warn!("unknown encoding {:?} in config", label),
            }
        }
        list
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            reading: ReadingConfig::default(),
            encoding: EncodingConfig::default(),
            logging: LoggingConfig::default(),
            theme: ThemeConfig::default(),
            keybindings: KeyBindings::default(),
            warnings: Vec::new(),
        }
    }
}

/// Get the config directory path for the current platform
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        // Linux: $XDG_CONFIG_HOME/safefm or ~/.config/safefm
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var("HOME").ok().map(|p| PathBuf::from(p).join(".config")))
            .map(|p| p.join("safefm"))
    }

    #[cfg(target_os = "macos")]
    {
        // macOS: ~/.config/safefm, like other terminal tools
        std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config/safefm"))
    }

    #[cfg(target_os = "windows")]
    {
        // Windows: %APPDATA%\safefm
        std::env::var("APPDATA").ok().map(|p| PathBuf::from(p).join("safefm"))
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        std::env::var("HOME").ok().map(|p| PathBuf::from(p).join(".config/safefm"))
    }
}

/// Get the config file path
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

impl Config {
    /// Load configuration from the config file, falling back to defaults
    pub fn load() -> Self {
        let Some(config_path) = config_file() else {
            let mut config = Config::default();
            config.warnings.push("could not determine config directory".to_string());
            return config;
        };

        if !config_path.exists() {
            return Config::default();
        }

        let loaded = fs::read_to_string(&config_path)
            .map_err(AppError::from)
            .and_then(|content| Self::parse(&content));

        match loaded {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {}: {}", config_path.display(), e);
                eprintln!("Using default configuration");
                let mut config = Config::default();
                config
                    .warnings
                    .push(format!("{}: {}; using defaults", config_path.display(), e));
                config
            }
        }
    }

    pub fn parse(content: &str) -> AppResult<Self> {
        toml_edit::de::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Where the log goes: `[logging] file`, else next to the config
    pub fn log_file(&self) -> Option<PathBuf> {
        self.logging
            .file
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| config_dir().map(|p| p.join("safefm.log")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn test_parse_key_bindings() {
        assert_eq!(parse_key_binding("F10"), Some((KeyCode::F(10), KeyModifiers::NONE)));
        assert_eq!(
            parse_key_binding("Ctrl+R"),
            Some((KeyCode::Char('R'), KeyModifiers::CONTROL))
        );
        assert_eq!(parse_key_binding("space"), Some((KeyCode::Char(' '), KeyModifiers::NONE)));
        assert_eq!(parse_key_binding("\\"), Some((KeyCode::Char('\\'), KeyModifiers::NONE)));
        assert_eq!(parse_key_binding("+"), Some((KeyCode::Char('+'), KeyModifiers::NONE)));
        assert_eq!(parse_key_binding("Hyper+X"), None);
        assert_eq!(parse_key_binding("F13"), None);
        assert_eq!(parse_key_binding(""), None);
    }

    #[test]
    fn test_letter_and_shift_letter_are_distinct() {
        let kb = KeyBindings::default();
        let plain = key(KeyCode::Char('r'), KeyModifiers::NONE);
        let shifted = key(KeyCode::Char('R'), KeyModifiers::SHIFT);
        // Some terminals report Shift only through the uppercase char
        let bare_upper = key(KeyCode::Char('R'), KeyModifiers::NONE);

        assert!(kb.matches("read_alt", &plain));
        assert!(!kb.matches("read_encoding", &plain));
        assert!(kb.matches("read_encoding", &shifted));
        assert!(!kb.matches("read_alt", &shifted));
        assert!(kb.matches("read_encoding", &bare_upper));
    }

    #[test]
    fn test_shifted_symbol_matches_plain_binding() {
        let kb = KeyBindings::default();
        let slash = key(KeyCode::Char('/'), KeyModifiers::SHIFT);
        assert!(kb.matches("volumes", &slash));
        assert!(kb.matches_any("volumes", &key(KeyCode::Char('\\'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_ctrl_letter() {
        let kb = KeyBindings::default();
        assert!(kb.matches("refresh", &key(KeyCode::Char('r'), KeyModifiers::CONTROL)));
        assert!(!kb.matches("refresh", &key(KeyCode::Char('r'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_user_binding_overrides_default() {
        let config = Config::parse("[keybindings]\ncopy = \"Alt+C\"\n").unwrap();
        let kb = &config.keybindings;
        assert!(kb.matches("copy", &key(KeyCode::Char('c'), KeyModifiers::ALT)));
        assert!(!kb.matches("copy", &key(KeyCode::F(5), KeyModifiers::NONE)));
        assert_eq!(kb.get("move"), "F6");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::parse(
            r#"
            [general]
            dirs_first = true

            [reading]
            limit_mb = 0

            [encoding]
            choices = ["koi8-r", "utf8", "no-such", "KOI8-R"]
            "#,
        )
        .unwrap();
        assert!(config.general.dirs_first);
        assert!(config.general.show_hidden);
        assert_eq!(config.reading.chunk_chars, crate::safety::blocks::CHUNK_CHARS);
        assert_eq!(config.reading.limits().limit_chars, None);
        assert_eq!(config.logging.level, "info");

        let names: Vec<&str> = config.encoding.choices().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["UTF-8", "KOI8-R"]);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(matches!(Config::parse("[general\nshow_hidden = "), Err(AppError::Config(_))));
        assert!(matches!(
            Config::parse("[general]\nshow_hidden = \"yes\""),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_default_limits() {
        let limits = ReadingConfig::default().limits();
        assert_eq!(limits.limit_chars, Some(100 * 1024 * 1024));
        assert_eq!(limits.chunk_chars, 16 * 1024);
    }
}
