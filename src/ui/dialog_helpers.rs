//! Dialog rendering helper utilities.
//!
//! Frame, title, buttons and input drawing shared by the dialog widgets.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use super::Theme;

/// Pre-computed styles for dialog rendering.
pub struct DialogStyles {
    pub border: Style,
    pub title: Style,
    pub label: Style,
    pub warning: Style,
    pub input: Style,
    pub button_focused: Style,
    pub button_unfocused: Style,
    pub help: Style,
    pub bg: Style,
}

impl DialogStyles {
    /// Create dialog styles from theme with given background color.
    pub fn new(theme: &Theme, bg_color: Color, border_color: Color) -> Self {
        Self {
            border: Style::default().fg(border_color).bg(bg_color),
            title: Style::default().bg(bg_color).fg(theme.dialog_title).add_modifier(Modifier::BOLD),
            label: Style::default().bg(bg_color).fg(theme.dialog_text),
            warning: Style::default().bg(bg_color).fg(theme.dialog_warning).add_modifier(Modifier::BOLD),
            input: Style::default().bg(theme.dialog_input_bg).fg(theme.dialog_input_fg),
            button_focused: Style::default().fg(theme.dialog_button_focused_fg).bg(theme.dialog_button_focused_bg).add_modifier(Modifier::BOLD),
            button_unfocused: Style::default().fg(theme.dialog_button_unfocused).bg(bg_color),
            help: Style::default().bg(bg_color).fg(theme.dialog_help),
            bg: Style::default().bg(bg_color),
        }
    }

    /// Regular dialog colors
    pub fn normal(theme: &Theme) -> Self {
        Self::new(theme, theme.dialog_bg, theme.dialog_border)
    }

    /// Colors for destructive confirmations
    pub fn danger(theme: &Theme) -> Self {
        Self::new(theme, theme.dialog_danger_bg, theme.dialog_danger_border)
    }
}

/// Helper functions for dialog rendering.
pub struct DialogRenderer;

impl DialogRenderer {
    /// Calculate centered dialog position and return the dialog area.
    /// Returns None if the area is too small.
    pub fn center_dialog(area: Rect, width: u16, height: u16, min_width: u16) -> Option<Rect> {
        if area.width < min_width || area.height < height {
            return None;
        }

        let dialog_width = width.min(area.width.saturating_sub(4));
        let x = area.x + (area.width.saturating_sub(dialog_width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;

        Some(Rect {
            x,
            y,
            width: dialog_width,
            height,
        })
    }

    /// Fill dialog area with background color.
    pub fn fill_background(area: Rect, buf: &mut Buffer, style: Style) {
        for row in area.y..area.y + area.height {
            for col in area.x..area.x + area.width {
                buf[(col, row)].set_char(' ').set_style(style);
            }
        }
    }

    /// Draw dialog border using rounded box-drawing characters.
    pub fn draw_border(area: Rect, buf: &mut Buffer, style: Style) {
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        buf[(area.x, area.y)].set_char('╭').set_style(style);
        buf[(right, area.y)].set_char('╮').set_style(style);
        buf[(area.x, bottom)].set_char('╰').set_style(style);
        buf[(right, bottom)].set_char('╯').set_style(style);
        for col in area.x + 1..right {
            buf[(col, area.y)].set_char('─').set_style(style);
            buf[(col, bottom)].set_char('─').set_style(style);
        }
        for row in area.y + 1..bottom {
            buf[(area.x, row)].set_char('│').set_style(style);
            buf[(right, row)].set_char('│').set_style(style);
        }
    }

    /// Background, border and centered title in one go.
    pub fn draw_frame(area: Rect, buf: &mut Buffer, title: &str, styles: &DialogStyles) {
        Self::fill_background(area, buf, styles.bg);
        Self::draw_border(area, buf, styles.border);
        Self::draw_title(area, buf, title, styles.title);
    }

    /// Draw centered title on the top border.
    pub fn draw_title(area: Rect, buf: &mut Buffer, title: &str, style: Style) {
        let title_x = area.x + (area.width.saturating_sub(title.chars().count() as u16)) / 2;
        buf.set_string(title_x, area.y, title, style);
    }

    /// Draw a horizontal row of buttons, centered.
    pub fn draw_buttons(
        area: Rect,
        buf: &mut Buffer,
        y_offset: u16,
        buttons: &[(&str, bool)], // (text, is_focused)
        focused_style: Style,
        unfocused_style: Style,
    ) {
        let button_y = area.y + y_offset;

        let total_width: usize = buttons.iter()
            .map(|(text, _)| text.chars().count())
            .sum::<usize>() + (buttons.len().saturating_sub(1)) * 2;

        let mut x = area.x + (area.width.saturating_sub(total_width as u16)) / 2;

        for (text, is_focused) in buttons {
            let style = if *is_focused { focused_style } else { unfocused_style };
            buf.set_string(x, button_y, text, style);
            x += text.chars().count() as u16 + 2;
        }
    }

    /// Draw an input field. Long inputs are cut from the start so the
    /// end stays visible.
    pub fn draw_input_field(
        buf: &mut Buffer,
        x: u16,
        y: u16,
        width: usize,
        text: &str,
        style: Style,
    ) {
        for col in x..x + width as u16 {
            buf[(col, y)].set_char(' ').set_style(style);
        }

        let max_display = width.saturating_sub(1);
        let len = text.chars().count();
        let display_text = if len > max_display {
            let mut shown = String::from("…");
            shown.extend(text.chars().skip(len - max_display + 1));
            shown
        } else {
            text.to_string()
        };

        buf.set_string(x, y, &display_text, style);
    }

    /// Screen column of character `cursor` in a field drawn by
    /// [`DialogRenderer::draw_input_field`].
    pub fn input_cursor_x(x: u16, width: usize, text: &str, cursor: usize) -> u16 {
        let max_display = width.saturating_sub(1);
        let len = text.chars().count();
        if len > max_display {
            // Truncated: the end is shown, cursor is clamped into view
            let hidden = len - max_display;
            x + cursor.saturating_sub(hidden).max(1).min(max_display) as u16
        } else {
            x + cursor.min(len) as u16
        }
    }

    /// Draw help text centered on the row above the bottom border.
    pub fn draw_help(area: Rect, buf: &mut Buffer, text: &str, style: Style) {
        let help_x = area.x + (area.width.saturating_sub(text.chars().count() as u16)) / 2;
        buf.set_string(help_x, area.y + area.height - 2, text, style);
    }
}

/// Split `text` into lines of at most `width` characters, breaking at
/// spaces where possible.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() { 0 } else { 1 } + word.chars().count();
            if !current.is_empty() && current.chars().count() + needed > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            // Words longer than a line are hard-split
            while current.chars().count() > width {
                let head: String = current.chars().take(width).collect();
                let tail: String = current.chars().skip(width).collect();
                lines.push(head);
                current = tail;
            }
        }
        lines.push(current);
    }
    lines
}
