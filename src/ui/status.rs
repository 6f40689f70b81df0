//! Header line (current directory) and status line widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::state::app::StatusMessage;
use crate::utils::truncate_path;
use super::Theme;

fn clear_line(area: Rect, buf: &mut Buffer, style: Style) {
    for x in area.x..area.x + area.width {
        buf[(x, area.y)].set_char(' ').set_style(style);
    }
}

/// Current directory above the panels; empty at the volume list
pub struct HeaderBar<'a> {
    path: Option<&'a std::path::Path>,
    theme: &'a Theme,
}

impl<'a> HeaderBar<'a> {
    pub fn new(path: Option<&'a std::path::Path>, theme: &'a Theme) -> Self {
        Self { path, theme }
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 2 {
            return;
        }
        let style = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.panel_header)
            .add_modifier(Modifier::BOLD);
        clear_line(area, buf, style);

        if let Some(path) = self.path {
            let text = truncate_path(&path.to_string_lossy(), area.width.saturating_sub(2) as usize);
            buf.set_string(area.x + 1, area.y, &text, style);
        }
    }
}

/// Status message, or a short key reference when there is none
pub struct StatusBar<'a> {
    message: Option<&'a StatusMessage>,
    selected: usize,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(message: Option<&'a StatusMessage>, selected: usize, theme: &'a Theme) -> Self {
        Self { message, selected, theme }
    }
}

const KEY_HINTS: &str = "F1 Help  F2 Read  F4 Create  F5 Copy  F6 Move  F8 Delete  F10 Quit";

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let (style, text) = match self.message {
            Some(msg) if msg.is_error => (
                Style::default().bg(self.theme.status_error_bg).fg(self.theme.status_error_fg),
                msg.text.as_str(),
            ),
            Some(msg) => (Style::default().bg(self.theme.status_bg).fg(self.theme.status_fg), msg.text.as_str()),
            None => (Style::default().bg(self.theme.status_bg).fg(self.theme.status_fg), KEY_HINTS),
        };
        clear_line(area, buf, style);
        buf.set_stringn(area.x + 1, area.y, text, area.width.saturating_sub(1) as usize, style);

        // Selection count at the right edge
        let count = format!(" {} selected ", self.selected);
        let count_len = count.len() as u16;
        if area.width > count_len + text.chars().count() as u16 + 2 {
            buf.set_string(area.x + area.width - count_len, area.y, &count, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(buf: &Buffer, width: u16) -> String {
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_error_message_uses_error_colors() {
        let theme = Theme::default();
        let msg = StatusMessage { text: "boom".to_string(), is_error: true };
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(Some(&msg), 2, &theme).render(area, &mut buf);

        let text = line(&buf, 40);
        assert!(text.starts_with(" boom"));
        assert!(text.ends_with(" 2 selected "));
        assert_eq!(buf[(0, 0)].bg, theme.status_error_bg);
    }

    #[test]
    fn test_header_is_blank_at_volume_list() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        HeaderBar::new(None, &theme).render(area, &mut buf);
        assert_eq!(line(&buf, 20).trim(), "");
    }
}
