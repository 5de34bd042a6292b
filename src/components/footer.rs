use crate::app::state::{AppMode, AppState};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct FooterItem {
    pub key: String,
    pub desc: &'static str,
}

impl FooterItem {
    fn new(key: impl Into<String>, desc: &'static str) -> Self {
        Self {
            key: key.into(),
            desc,
        }
    }
}

pub struct FooterGroup {
    pub name: &'static str,
    pub items: Vec<FooterItem>,
}

pub struct Footer<'a> {
    pub state: &'a AppState,
    pub theme: &'a Theme,
}

impl Footer<'_> {
    fn get_groups(&self) -> Vec<FooterGroup> {
        if self.state.last_error.is_some() {
            return vec![FooterGroup {
                name: "ERROR",
                items: vec![FooterItem::new("Esc", "dismiss")],
            }];
        }

        let palette_key = self.state.keymap.palette_label();
        match self.state.mode {
            AppMode::Normal => vec![
                FooterGroup {
                    name: "GO",
                    items: vec![
                        FooterItem::new(palette_key, "search"),
                        FooterItem::new("g", "home"),
                    ],
                },
                FooterGroup {
                    name: "APP",
                    items: vec![
                        FooterItem::new("t", "theme"),
                        FooterItem::new("?", "help"),
                        FooterItem::new("q", "quit"),
                    ],
                },
            ],
            AppMode::Palette => vec![FooterGroup {
                name: "SEARCH",
                items: vec![
                    FooterItem::new("ENTER", "run"),
                    FooterItem::new("\u{2191}/\u{2193}", "move"),
                    FooterItem::new("ctrl+u", "clear"),
                    FooterItem::new("Esc", "close"),
                ],
            }],
            AppMode::Help => vec![FooterGroup {
                name: "HELP",
                items: vec![FooterItem::new("any key", "close")],
            }],
        }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let state = self.state;

        let status_span = if let Some(err) = &state.last_error {
            Span::styled(format!("  ERROR: {err}  "), theme.status_error)
        } else if let Some(msg) = &state.status_message {
            Span::styled(format!("  {msg}  "), theme.status_info)
        } else {
            Span::styled("  READY  ", theme.header_active)
        };

        let mut spans = vec![status_span, Span::raw("  ")];

        let available_width = area.width.saturating_sub(4) as usize;
        let mut current_width = spans.iter().map(Span::width).sum::<usize>();

        for group in self.get_groups() {
            let Some(first_item) = group.items.first() else {
                continue;
            };
            let first_item_width = first_item.key.len() + first_item.desc.len() + 4;
            if current_width + first_item_width > available_width {
                break;
            }

            if area.width > 100 {
                let label = Span::styled(format!("{}: ", group.name), theme.dimmed);
                if current_width + label.width() + first_item_width < available_width {
                    current_width += label.width();
                    spans.push(label);
                }
            }

            for item in group.items {
                let key_str = format!(" {} ", item.key);
                let desc_str = format!(" {} ", item.desc);

                let item_width = key_str.len() + desc_str.len();
                if current_width + item_width + 1 > available_width {
                    break;
                }

                spans.push(Span::styled(key_str, theme.footer_segment_key));
                spans.push(Span::styled(desc_str, theme.footer_segment_val));
                spans.push(Span::raw(" "));
                current_width += item_width + 1;
            }
            spans.push(Span::raw("  "));
            current_width += 2;
        }

        Paragraph::new(Line::from(spans))
            .style(theme.footer)
            .render(area, buf);
    }
}
