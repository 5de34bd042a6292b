use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Row, Table, Widget},
};

use super::helpers::{centered_rect, draw_drop_shadow};

pub struct HelpModal<'a> {
    pub theme: &'a Theme,
    /// Display label of the configured palette binding, e.g. `Ctrl+K`.
    pub palette_key: &'a str,
}

fn category<'a>(name: &'a str, style: Style) -> Row<'a> {
    Row::new(vec![Cell::from(Span::styled(name, style)), Cell::from("")])
}

fn binding<'a>(key: String, desc: &'a str, key_style: Style, desc_style: Style) -> Row<'a> {
    Row::new(vec![
        Cell::from(Span::styled(key, key_style)),
        Cell::from(Span::styled(desc, desc_style)),
    ])
}

impl Widget for HelpModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let help_area = centered_rect(70, 80, area);
        if help_area.width == 0 || help_area.height == 0 {
            return;
        }
        draw_drop_shadow(buf, help_area, area);
        Clear.render(help_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" HELP - KEYBINDINGS ", self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let key = self.theme.footer_segment_key;
        let desc = self.theme.list_item;
        let cat = self.theme.header_item;

        let rows = vec![
            category("Command Palette", cat),
            binding(format!(" {}", self.palette_key), "Open / close the palette", key, desc),
            binding(" \u{2193} / Ctrl+N".into(), "Next result", key, desc),
            binding(" \u{2191} / Ctrl+P".into(), "Previous result", key, desc),
            binding(" Enter".into(), "Run the highlighted result", key, desc),
            binding(" Ctrl+U".into(), "Clear the query", key, desc),
            binding(" Esc".into(), "Dismiss the palette", key, desc),
            binding(" Mouse".into(), "Hover to highlight, click to run", key, desc),
            Row::new(vec![Cell::from(""), Cell::from("")]),
            category("General", cat),
            binding(" g".into(), "Go to the dashboard", key, desc),
            binding(" t".into(), "Cycle theme", key, desc),
            binding(" ?".into(), "Show this help", key, desc),
            binding(" Esc".into(), "Close overlay / Clear errors", key, desc),
            binding(" q".into(), "Quit", key, desc),
        ];

        let table = Table::new(
            rows,
            [Constraint::Percentage(30), Constraint::Percentage(70)],
        )
        .block(block);

        table.render(help_area, buf);
    }
}
