use crate::app::routes::find_route;
use crate::domain::models::RoleSnapshot;
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const SEP_RIGHT: &str = "\u{e0b0}";

pub struct Header<'a> {
    pub route: &'a str,
    pub role: RoleSnapshot,
    pub theme: &'a Theme,
    pub terminal_width: u16,
}

impl Header<'_> {
    fn page_text(&self) -> String {
        match find_route(self.route) {
            Some(route) => format!(" {} {} ", route.icon, route.name),
            None => format!(" {} ", self.route),
        }
    }

    fn role_text(&self) -> String {
        match self.role {
            Some(role) => format!(" {} ", role.as_str()),
            None => " GUEST ".to_string(),
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let logo_bg = self.theme.header_logo.bg.unwrap_or(Color::Reset);
        let page_bg = self.theme.header_page.bg.unwrap_or(Color::Reset);
        let role_bg = self.theme.header_role.bg.unwrap_or(Color::Reset);
        let base_bg = self.theme.header.bg.unwrap_or(Color::Reset);

        // fg = current segment bg, bg = next segment bg
        let sep_logo_page = Style::default().fg(logo_bg).bg(page_bg);
        let sep_page_role = Style::default().fg(page_bg).bg(role_bg);
        let sep_role_base = Style::default().fg(role_bg).bg(base_bg);

        let spans = vec![
            Span::styled(" FLEETDESK ", self.theme.header_logo),
            Span::styled(SEP_RIGHT, sep_logo_page),
            Span::styled(self.page_text(), self.theme.header_page),
            Span::styled(SEP_RIGHT, sep_page_role),
            Span::styled(self.role_text(), self.theme.header_role),
            Span::styled(SEP_RIGHT, sep_role_base),
            Span::styled(" ".repeat(self.terminal_width as usize), self.theme.header),
        ];

        Paragraph::new(Line::from(spans))
            .style(self.theme.header)
            .render(area, buf);
    }
}
