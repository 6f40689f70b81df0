//! Dialog widgets drawn over the panels

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::fs::FileInfo;
use crate::utils::{format_date, format_size, truncate_path};
use super::dialog_helpers::{wrap_text, DialogRenderer, DialogStyles};
use super::Theme;

const MESSAGE_WIDTH: u16 = 60;

/// Question with a vertical list of answers
pub struct ChoiceDialog<'a> {
    title: &'a str,
    question: &'a str,
    options: &'a [String],
    focused: usize,
    danger: bool,
    theme: &'a Theme,
}

impl<'a> ChoiceDialog<'a> {
    pub fn new(title: &'a str, question: &'a str, options: &'a [String], focused: usize, theme: &'a Theme) -> Self {
        Self { title, question, options, focused, danger: false, theme }
    }

    /// Use the warning colors (delete, move)
    pub fn danger(mut self, danger: bool) -> Self {
        self.danger = danger;
        self
    }
}

impl Widget for ChoiceDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 7 {
            return;
        }
        let longest = self
            .options
            .iter()
            .map(|o| o.chars().count())
            .chain(std::iter::once(self.question.chars().count()))
            .max()
            .unwrap_or(0) as u16;
        let width = (longest + 8).clamp(30, MESSAGE_WIDTH);
        let question = wrap_text(self.question, width.saturating_sub(4) as usize);

        // Border, blank, question, blank, options, blank, help, border
        let height = question.len() as u16 + self.options.len() as u16 + 6;
        let Some(dialog_area) = DialogRenderer::center_dialog(area, width, height.min(area.height), 20) else {
            return;
        };

        let styles = if self.danger {
            DialogStyles::danger(self.theme)
        } else {
            DialogStyles::normal(self.theme)
        };
        DialogRenderer::draw_frame(dialog_area, buf, self.title, &styles);

        let content_x = dialog_area.x + 2;
        let content_width = dialog_area.width.saturating_sub(4) as usize;
        let bottom = dialog_area.y + dialog_area.height.saturating_sub(2);
        let mut y = dialog_area.y + 2;

        for line in &question {
            if y >= bottom {
                return;
            }
            buf.set_stringn(content_x, y, line, content_width, styles.label);
            y += 1;
        }
        y += 1;

        // Keep the focused answer visible when the dialog is cut short
        let rows = bottom.saturating_sub(y + 1) as usize;
        let skip = (self.focused + 1).saturating_sub(rows.max(1));
        for (idx, option) in self.options.iter().enumerate().skip(skip).take(rows) {
            let (style, marker) = if idx == self.focused {
                (styles.button_focused, "▸ ")
            } else {
                (styles.button_unfocused, "  ")
            };
            let text = format!("{}{:<w$}", marker, option, w = content_width.saturating_sub(2));
            buf.set_stringn(content_x, y, &text, content_width, style);
            y += 1;
        }

        DialogRenderer::draw_help(dialog_area, buf, "↑↓ Select  Enter Confirm  Esc Cancel", styles.help);
    }
}

/// Text with an OK button
pub struct MessageDialog<'a> {
    title: &'a str,
    text: &'a str,
    theme: &'a Theme,
}

impl<'a> MessageDialog<'a> {
    pub fn new(title: &'a str, text: &'a str, theme: &'a Theme) -> Self {
        Self { title, text, theme }
    }
}

impl Widget for MessageDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 6 {
            return;
        }
        let width = (self.text.chars().count() as u16 + 8).clamp(30, MESSAGE_WIDTH);
        let lines = wrap_text(self.text, width.saturating_sub(4) as usize);
        let height = lines.len() as u16 + 6;
        let Some(dialog_area) = DialogRenderer::center_dialog(area, width, height.min(area.height), 20) else {
            return;
        };

        let styles = DialogStyles::danger(self.theme);
        DialogRenderer::draw_frame(dialog_area, buf, &format!(" {} ", self.title), &styles);

        let content_width = dialog_area.width.saturating_sub(4) as usize;
        for (i, line) in lines.iter().enumerate() {
            let y = dialog_area.y + 2 + i as u16;
            if y + 3 >= dialog_area.y + dialog_area.height {
                break;
            }
            buf.set_stringn(dialog_area.x + 2, y, line, content_width, styles.label);
        }

        DialogRenderer::draw_buttons(
            dialog_area, buf, dialog_area.height.saturating_sub(2),
            &[("[ OK ]", true)],
            styles.button_focused, styles.button_unfocused,
        );
    }
}

/// Properties of a file
pub struct InfoDialog<'a> {
    info: &'a FileInfo,
    theme: &'a Theme,
}

impl<'a> InfoDialog<'a> {
    pub fn new(info: &'a FileInfo, theme: &'a Theme) -> Self {
        Self { info, theme }
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        let info = self.info;
        let yes_no = |flag: bool| (if flag { "yes" } else { "no" }).to_string();
        vec![
            ("Name", info.name.clone()),
            ("Path", info.path.to_string_lossy().into_owned()),
            ("Size", format!("{} ({} bytes)", format_size(info.size), info.size)),
            ("Extension", info.extension.clone().unwrap_or_else(|| "-".to_string())),
            ("Read-only", yes_no(info.readonly)),
            ("Created", format_date(info.created)),
            ("Modified", format_date(info.modified)),
        ]
    }
}

impl Widget for InfoDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.rows();
        let height = rows.len() as u16 + 5;
        let Some(dialog_area) = DialogRenderer::center_dialog(area, MESSAGE_WIDTH, height, 30) else {
            return;
        };

        let styles = DialogStyles::normal(self.theme);
        DialogRenderer::draw_frame(dialog_area, buf, " Properties ", &styles);

        let label_width = 11;
        let value_width = dialog_area.width.saturating_sub(4 + label_width as u16) as usize;
        for (i, (label, value)) in rows.iter().enumerate() {
            let y = dialog_area.y + 2 + i as u16;
            buf.set_string(dialog_area.x + 2, y, format!("{:<w$}", label, w = label_width), styles.title);
            let value = truncate_path(value, value_width);
            buf.set_string(dialog_area.x + 2 + label_width as u16, y, &value, styles.label);
        }

        DialogRenderer::draw_help(dialog_area, buf, "Enter/Esc Close", styles.help);
    }
}

const FILE_NAME_WIDTH: u16 = 56;
const FILE_NAME_HEIGHT: u16 = 9;

/// Name of the file to create
pub struct FileNameDialog<'a> {
    input: &'a str,
    encoding: &'a str,
    theme: &'a Theme,
}

impl<'a> FileNameDialog<'a> {
    pub fn new(input: &'a str, encoding: &'a str, theme: &'a Theme) -> Self {
        Self { input, encoding, theme }
    }
}

impl Widget for FileNameDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(dialog_area) = DialogRenderer::center_dialog(area, FILE_NAME_WIDTH, FILE_NAME_HEIGHT, 20) else {
            return;
        };

        let styles = DialogStyles::normal(self.theme);
        DialogRenderer::draw_frame(dialog_area, buf, &format!(" New file ({}) ", self.encoding), &styles);

        let content_x = dialog_area.x + 2;
        let content_width = dialog_area.width.saturating_sub(4) as usize;

        buf.set_stringn(
            content_x, dialog_area.y + 2,
            "Warning: an existing file will be truncated!",
            content_width, styles.warning,
        );
        buf.set_stringn(content_x, dialog_area.y + 3, "Enter the name of the new file:", content_width, styles.label);
        DialogRenderer::draw_input_field(buf, content_x, dialog_area.y + 5, content_width, self.input, styles.input);

        DialogRenderer::draw_help(dialog_area, buf, "Enter Create  Esc Cancel", styles.help);
    }
}

/// Cursor position for the file name dialog input field
pub fn file_name_cursor_position(area: Rect, input: &str, cursor: usize) -> Option<(u16, u16)> {
    let dialog_area = DialogRenderer::center_dialog(area, FILE_NAME_WIDTH, FILE_NAME_HEIGHT, 20)?;
    let content_x = dialog_area.x + 2;
    let content_width = dialog_area.width.saturating_sub(4) as usize;
    Some((
        DialogRenderer::input_cursor_x(content_x, content_width, input, cursor),
        dialog_area.y + 5,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut text = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_choice_dialog_lists_options() {
        let theme = Theme::default();
        let options = vec!["Don't overwrite".to_string(), "Overwrite".to_string()];
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        ChoiceDialog::new(" Copy ", "How should existing files be treated?", &options, 1, &theme).render(area, &mut buf);

        let text = screen_text(&buf);
        assert!(text.contains("How should existing files be treated?"));
        assert!(text.contains("  Don't overwrite"));
        assert!(text.contains("▸ Overwrite"));
    }

    #[test]
    fn test_file_name_dialog_warns_about_truncation() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        FileNameDialog::new("notes.txt", "UTF-8", &theme).render(area, &mut buf);

        let text = screen_text(&buf);
        assert!(text.contains("existing file will be truncated"));
        assert!(text.contains("notes.txt"));

        let (x, y) = file_name_cursor_position(area, "notes.txt", 9).unwrap();
        assert_eq!(y, (24 - FILE_NAME_HEIGHT) / 2 + 5);
        assert_eq!(x, (80 - FILE_NAME_WIDTH) / 2 + 2 + 9);
    }

    #[test]
    fn test_dialogs_skip_tiny_areas() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        MessageDialog::new("Error", "nothing fits here", &theme).render(area, &mut buf);
        assert_eq!(screen_text(&buf).trim(), "");
    }
}
