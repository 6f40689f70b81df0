//! Panel widgets: the directory listing and the selected files

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, StatefulWidget, Widget},
};

use crate::fs::{EntryKind, FileEntry};
use crate::selection::Selection;
use crate::state::app::SelectionCursor;
use crate::state::navigator::{Location, Navigator};
use crate::utils::{format_date, format_size, truncate_name, truncate_path};
use super::Theme;

const SIZE_WIDTH: usize = 9; // "1023.9 MB"
const DATE_WIDTH: usize = 16; // "2024-01-15 10:23"

fn panel_block<'a>(title: String, is_active: bool, theme: &Theme) -> Block<'a> {
    let border_color = if is_active {
        theme.panel_border_active
    } else {
        theme.panel_border_inactive
    };
    let title_style = Style::default()
        .fg(theme.panel_header)
        .bg(theme.panel_background)
        .add_modifier(Modifier::BOLD);

    Block::default()
        .title(Line::from(Span::styled(title, title_style)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(theme.panel_background))
        .style(Style::default().bg(theme.panel_background))
}

fn cursor_style(theme: &Theme) -> Style {
    Style::default().bg(theme.cursor_bg).fg(theme.cursor_fg)
}

/// Listing of the current directory, or of the volumes
pub struct ListingWidget<'a> {
    is_active: bool,
    selection: &'a Selection,
    theme: &'a Theme,
}

impl<'a> ListingWidget<'a> {
    pub fn new(is_active: bool, selection: &'a Selection, theme: &'a Theme) -> Self {
        Self { is_active, selection, theme }
    }

    /// Name column text: directories get a trailing slash, links an `@`
    fn display_name(entry: &FileEntry) -> String {
        let name = match entry.kind {
            EntryKind::Directory => format!("{}/", entry.name),
            _ => entry.name.clone(),
        };
        if entry.is_symlink { format!("{}@", name) } else { name }
    }

    fn entry_style(&self, entry: &FileEntry, is_cursor: bool) -> Style {
        let fg = if self.selection.contains(&entry.path) {
            self.theme.file_selected
        } else if entry.kind == EntryKind::File {
            self.theme.file_normal
        } else {
            self.theme.file_directory
        };

        let mut style = if is_cursor && self.is_active {
            cursor_style(self.theme).fg(fg)
        } else {
            Style::default().fg(fg)
        };
        if entry.kind != EntryKind::File {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }

    fn format_row(entry: &FileEntry, width: usize) -> String {
        let name_width = width.saturating_sub(SIZE_WIDTH + DATE_WIDTH + 2);
        let name = Self::display_name(entry);

        if name_width < 8 {
            return format!("{:<width$}", truncate_name(&name, width), width = width);
        }

        let size = match entry.kind {
            EntryKind::File => format_size(entry.size),
            EntryKind::Directory => "<DIR>".to_string(),
            EntryKind::Parent => "<UP>".to_string(),
            EntryKind::Volume => "<VOL>".to_string(),
        };
        let date = match entry.kind {
            EntryKind::File | EntryKind::Directory => format_date(entry.modified),
            _ => String::new(),
        };
        format!(
            "{:<name_w$} {:>size_w$} {:>date_w$}",
            truncate_name(&name, name_width),
            size,
            date,
            name_w = name_width,
            size_w = SIZE_WIDTH,
            date_w = DATE_WIDTH,
        )
    }
}

impl StatefulWidget for ListingWidget<'_> {
    type State = Navigator;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let title = match state.location() {
            Location::Volumes => " Volumes ".to_string(),
            Location::Directory(_) => format!(" Files ({}) ", state.entries().len().saturating_sub(1)),
        };
        let block = panel_block(title, self.is_active, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }
        state.visible_height = inner.height as usize;

        if let Some(error) = &state.error {
            let style = Style::default().fg(self.theme.status_error_bg).bg(self.theme.panel_background);
            let text = truncate_name(error, inner.width as usize);
            buf.set_string(inner.x, inner.y, &text, style);
            return;
        }

        let width = inner.width as usize;
        let start = state.scroll_offset;
        let end = (start + inner.height as usize).min(state.entries().len());

        for (row, idx) in (start..end).enumerate() {
            let entry = &state.entries()[idx];
            let style = self.entry_style(entry, idx == state.cursor);
            let line = Self::format_row(entry, width);
            buf.set_stringn(inner.x, inner.y + row as u16, &line, width, style);
        }
    }
}

/// The selected paths in insertion order
pub struct SelectionWidget<'a> {
    is_active: bool,
    selection: &'a Selection,
    theme: &'a Theme,
}

impl<'a> SelectionWidget<'a> {
    pub fn new(is_active: bool, selection: &'a Selection, theme: &'a Theme) -> Self {
        Self { is_active, selection, theme }
    }
}

impl StatefulWidget for SelectionWidget<'_> {
    type State = SelectionCursor;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let title = format!(" Selected ({}) ", self.selection.len());
        let block = panel_block(title, self.is_active, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }
        state.visible_height = inner.height as usize;
        state.clamp(self.selection.len());

        let width = inner.width as usize;
        let rows = self.selection.iter().enumerate().skip(state.scroll_offset).take(inner.height as usize);
        for (row, (idx, path)) in rows.enumerate() {
            let style = if idx == state.cursor && self.is_active {
                cursor_style(self.theme)
            } else {
                Style::default().fg(self.theme.file_normal)
            };
            let text = truncate_path(&path.to_string_lossy(), width);
            let line = format!("{:<width$}", text, width = width);
            buf.set_stringn(inner.x, inner.y + row as u16, &line, width, style);
        }
    }
}
