//! Help viewer widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::config::KeyBindings;
use super::Theme;

/// (action, description) in help order; `None` starts a section
const COMMANDS: &[(Option<&str>, &str)] = &[
    (None, "COMMANDS"),
    (Some("help"), "this help"),
    (Some("read"), "read the selected files (default encoding)"),
    (Some("read_encoding"), "choose an encoding and read the selected files"),
    (Some("create"), "create a file (default encoding)"),
    (Some("create_encoding"), "choose an encoding and create a file"),
    (Some("copy"), "copy the selected files into the current directory"),
    (Some("move"), "move the selected files into the current directory"),
    (Some("delete"), "delete the selected files"),
    (Some("refresh"), "reload the listing"),
    (Some("quit"), "quit"),
    (None, "PANELS"),
    (Some("toggle_panel"), "switch between the listing and the selection"),
    (Some("enter"), "enter a directory, or show file properties"),
    (Some("select"), "listing: add to the selection; selection: remove"),
    (Some("unselect"), "selection: remove from the selection"),
    (Some("volumes"), "go to the volume list"),
];

const INTRO: &str = "\
There are two panels. The left one lists the current directory, the right
one lists the selected files: they are the arguments of every command. The
current directory is shown above them.

Move with the arrows, PageUp, PageDown, Home and End. Select files or
directories in the left panel, then press a command key. To drop a file
from the selection, switch to the right panel and press Enter or Space on it.";

/// Key names for an action and its `_alt` variant, e.g. "F2 / R"
fn keys_for(bindings: &KeyBindings, action: &str) -> String {
    let alt = format!("{}_alt", action);
    let mut keys: Vec<&str> = vec![bindings.get(action)];
    let alt_key = bindings.get(&alt);
    if !alt_key.is_empty() {
        keys.push(alt_key);
    }
    if action == "quit" {
        keys.push(bindings.get("quit_letter"));
    }
    keys.retain(|k| !k.is_empty());
    keys.join(" / ")
}

/// Help text for the configured key bindings
pub fn help_text(bindings: &KeyBindings) -> String {
    let mut text = String::from(INTRO);
    text.push('\n');
    for (action, description) in COMMANDS {
        match action {
            None => {
                text.push('\n');
                text.push_str(description);
                text.push('\n');
            }
            Some(action) => {
                text.push_str(&format!("  {:<22} {}\n", keys_for(bindings, action), description));
            }
        }
    }
    text
}

/// Help viewer widget
pub struct HelpViewer<'a> {
    content: &'a str,
    scroll: usize,
    theme: &'a Theme,
}

impl<'a> HelpViewer<'a> {
    pub fn new(content: &'a str, scroll: usize, theme: &'a Theme) -> Self {
        Self { content, scroll, theme }
    }

    /// Calculate the visible height (content area, excluding header and footer)
    pub fn content_height(area: Rect) -> usize {
        area.height.saturating_sub(2) as usize // -1 header, -1 footer
    }
}

impl Widget for HelpViewer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let header_style = Style::default().bg(self.theme.help_header_bg).fg(self.theme.help_header_fg).add_modifier(Modifier::BOLD);
        let content_style = Style::default().bg(self.theme.help_content_bg).fg(self.theme.help_content_fg);
        let highlight_style = Style::default().bg(self.theme.help_content_bg).fg(self.theme.help_highlight);

        // Header row
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_char(' ').set_style(header_style);
        }
        let title = " safefm help ";
        let title_x = area.x + (area.width.saturating_sub(title.len() as u16)) / 2;
        buf.set_string(title_x, area.y, title, header_style);

        let content_start_y = area.y + 1;
        let content_height = Self::content_height(area);
        let content_width = area.width.saturating_sub(1) as usize;

        for y in content_start_y..content_start_y + content_height as u16 {
            for x in area.x..area.x + area.width {
                buf[(x, y)].set_char(' ').set_style(content_style);
            }
        }

        let lines: Vec<&str> = self.content.lines().collect();
        for (i, line) in lines.iter().skip(self.scroll).take(content_height).enumerate() {
            let y = content_start_y + i as u16;

            // Section headers are all caps
            let style = if !line.is_empty() && line.chars().all(|c| c.is_uppercase() || c.is_whitespace()) {
                highlight_style
            } else {
                content_style
            };
            buf.set_stringn(area.x + 1, y, line, content_width, style);
        }

        // Footer row
        let footer_y = area.y + area.height - 1;
        for x in area.x..area.x + area.width {
            buf[(x, footer_y)].set_char(' ').set_style(header_style);
        }

        let total_lines = lines.len();
        let visible_end = (self.scroll + content_height).min(total_lines);
        let position_info = format!(" Lines {}-{} of {} ", self.scroll + 1, visible_end, total_lines);
        let help_text = " Esc/F1: Close  ↑↓: Scroll  PgUp/PgDn: Page ";

        buf.set_string(area.x, footer_y, &position_info, header_style);

        let help_width = help_text.chars().count() as u16;
        let help_x = (area.x + area.width).saturating_sub(help_width);
        if help_x > area.x + position_info.len() as u16 {
            buf.set_string(help_x, footer_y, help_text, header_style);
        }
    }
}
