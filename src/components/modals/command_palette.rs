use crate::app::palette::merge::GroupBucket;
use crate::app::palette::{PaletteGroup, PaletteItem, PalettePhase, PaletteSession};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, StatefulWidget, Widget},
};

use super::helpers::{centered_rect, draw_drop_shadow};

/// One visual line of the result list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaletteRow<'a> {
    Header(PaletteGroup),
    Item(usize, &'a PaletteItem),
}

#[must_use]
pub fn palette_rows<'a>(buckets: &[GroupBucket<'a>]) -> Vec<PaletteRow<'a>> {
    let mut rows = Vec::new();
    for bucket in buckets {
        rows.push(PaletteRow::Header(bucket.group));
        rows.extend(bucket.items.iter().map(|&(i, item)| PaletteRow::Item(i, item)));
    }
    rows
}

#[must_use]
pub fn modal_area(area: Rect) -> Rect {
    centered_rect(60, 60, area)
}

/// Inner region holding the result rows (below the query and separator).
#[must_use]
pub fn results_area(modal: Rect) -> Rect {
    let inner = Block::default().borders(Borders::ALL).inner(modal);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Query input
            Constraint::Length(1), // Separator
            Constraint::Min(0),    // Results
        ])
        .split(inner)[2]
}

/// First visible row for this frame. `previous` is kept unless the active
/// item has left the window, in which case the window moves just enough to
/// show it again (with its group header when scrolling up onto a bucket).
#[must_use]
pub fn scroll_offset(
    rows: &[PaletteRow<'_>],
    active: usize,
    height: usize,
    previous: usize,
) -> usize {
    if height == 0 {
        return 0;
    }
    let position = rows
        .iter()
        .position(|row| matches!(row, PaletteRow::Item(i, _) if *i == active))
        .unwrap_or(0);

    let mut offset = previous.min(rows.len().saturating_sub(height));
    if position < offset {
        offset = position;
        if height > 1 && position > 0 && matches!(rows[position - 1], PaletteRow::Header(_)) {
            offset = position - 1;
        }
    } else if position >= offset + height {
        offset = position + 1 - height;
    }
    offset
}

/// Maps a terminal cell to the flat index of the result drawn there, using
/// the scroll position of the last rendered frame.
#[must_use]
pub fn hit_test(session: &PaletteSession, area: Rect, column: u16, row: u16) -> Option<usize> {
    if !session.is_open() {
        return None;
    }
    let results = results_area(modal_area(area));
    if column < results.x
        || column >= results.x + results.width
        || row < results.y
        || row >= results.y + results.height
    {
        return None;
    }

    let buckets = session.grouped();
    let rows = palette_rows(&buckets);
    match rows.get(session.scroll_offset() + (row - results.y) as usize) {
        Some(PaletteRow::Item(index, _)) => Some(*index),
        _ => None,
    }
}

pub struct CommandPaletteModal<'a> {
    pub theme: &'a Theme,
    pub session: &'a PaletteSession,
}

impl StatefulWidget for CommandPaletteModal<'_> {
    /// Scroll offset of the result list.
    type State = usize;

    fn render(self, area: Rect, buf: &mut Buffer, offset_state: &mut usize) {
        let modal_area = modal_area(area);
        if modal_area.width < 4 || modal_area.height < 4 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let mut title = vec![
            Span::raw(" "),
            Span::styled(" SEARCH ", self.theme.header_active),
            Span::raw(" "),
        ];
        if self.session.phase() == PalettePhase::Searching {
            title.push(Span::styled("searching… ", self.theme.dimmed));
        }

        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let inner_area = block.inner(modal_area);
        block.render(modal_area, buf);
        let results = results_area(modal_area);

        // Query
        let query_line = Line::from(vec![
            Span::styled(" > ", self.theme.footer_segment_key),
            Span::styled(self.session.raw_query(), self.theme.footer_segment_val),
            Span::styled(
                "_",
                self.theme
                    .footer_segment_val
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
        ]);
        buf.set_line(inner_area.x, inner_area.y, &query_line, inner_area.width);

        // Separator
        if inner_area.height > 1 {
            let separator = "─".repeat(inner_area.width as usize);
            buf.set_string(
                inner_area.x,
                inner_area.y + 1,
                separator,
                self.theme.border_focus,
            );
        }

        if results.height == 0 {
            *offset_state = 0;
            return;
        }

        let buckets = self.session.grouped();
        if buckets.is_empty() {
            let message = if self.session.phase() == PalettePhase::Searching {
                "  Searching…"
            } else {
                "  No results."
            };
            let line = Line::from(Span::styled(message, self.theme.dimmed));
            buf.set_line(results.x, results.y, &line, results.width);
            *offset_state = 0;
            return;
        }

        let active = self.session.selection().active_index;
        let rows = palette_rows(&buckets);
        let offset = scroll_offset(&rows, active, results.height as usize, *offset_state);
        *offset_state = offset;

        for (line_no, row) in rows
            .iter()
            .skip(offset)
            .take(results.height as usize)
            .enumerate()
        {
            let y = results.y + line_no as u16;
            let line = match row {
                PaletteRow::Header(group) => Line::from(Span::styled(
                    format!(" {} {}", group.glyph(), group.label().to_uppercase()),
                    self.theme.group_header,
                )),
                PaletteRow::Item(index, item) => {
                    let selected = *index == active;
                    let style = if selected {
                        self.theme.list_selected
                    } else {
                        self.theme.list_item
                    };
                    let mut spans = vec![
                        Span::styled(if selected { " > " } else { "   " }, style),
                        Span::styled(format!("{:<24}", item.title), style),
                    ];
                    if let Some(subtitle) = &item.subtitle {
                        spans.push(Span::styled(format!(" {subtitle}"), self.theme.dimmed));
                    }
                    Line::from(spans)
                }
            };
            buf.set_line(results.x, y, &line, results.width);
        }
    }
}
