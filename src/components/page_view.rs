use crate::app::routes::{find_route, permits};
use crate::app::state::{AppState, HISTORY_LIMIT};
use crate::domain::role::RoleContext;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

/// Body of the console: a placeholder for whichever page the router is on.
pub struct PageView<'a> {
    pub app_state: &'a AppState,
    pub theme: &'a Theme,
}

impl PageView<'_> {
    fn lines(&self) -> Vec<Line<'_>> {
        let state = self.app_state;
        let role = state.session.current_role();
        let mut lines = Vec::new();

        match find_route(&state.route) {
            Some(route) => {
                lines.push(Line::from(Span::styled(
                    format!("{} {}", route.icon, route.name),
                    self.theme.body_title,
                )));
                lines.push(Line::from(Span::styled(
                    state.route.clone(),
                    self.theme.dimmed,
                )));
                if !permits(route.required_roles, role) {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        " You do not have access to this page ",
                        self.theme.status_warn,
                    )));
                }
            }
            None => {
                lines.push(Line::from(Span::styled(
                    format!("Unknown page {}", state.route),
                    self.theme.status_error,
                )));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Press "),
            Span::styled(
                format!(" {} ", state.keymap.palette_label()),
                self.theme.footer_segment_key,
            ),
            Span::raw(" to search pages, actions, customers and devices"),
        ]));

        if !state.history.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Recent", self.theme.header_item)));
            for path in state.history.iter().rev().take(HISTORY_LIMIT) {
                let name = find_route(path).map_or(path.as_str(), |r| r.name);
                lines.push(Line::from(vec![
                    Span::styled(format!("{name:<18}"), self.theme.list_item),
                    Span::styled(path.clone(), self.theme.dimmed),
                ]));
            }
        }
        lines
    }
}

impl Widget for PageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = self.lines();
        let height = (lines.len() as u16).min(inner.height);
        let centered_area = Rect {
            x: inner.x,
            y: (inner.y + inner.height / 2).saturating_sub(height / 2),
            width: inner.width,
            height,
        };
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(centered_area, buf);
    }
}
