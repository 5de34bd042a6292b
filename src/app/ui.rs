use crate::app::state::{AppMode, AppState};
use crate::components::modals::{CommandPaletteModal, HelpModal};
use crate::components::{Footer, Header, PageView};
use crate::domain::role::RoleContext;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub struct AppLayout {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

pub fn get_layout(area: Rect) -> AppLayout {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    AppLayout {
        header: main[0],
        body: main[1],
        footer: main[2],
    }
}

fn visible(area: Rect) -> bool {
    area.width > 0 && area.height > 0
}

/// Draws one frame. Takes the state mutably only to keep the palette's
/// scroll position between frames.
pub fn draw(f: &mut Frame, app_state: &mut AppState) {
    let area = f.area();
    if !visible(area) {
        return;
    }
    let theme = &app_state.theme;
    let layout = get_layout(area);

    // --- Header ---
    if visible(layout.header) {
        let header = Header {
            route: &app_state.route,
            role: app_state.session.current_role(),
            theme,
            terminal_width: area.width,
        };
        f.render_widget(header, layout.header);
    }

    // --- Body ---
    if visible(layout.body) {
        f.render_widget(
            PageView {
                app_state: &*app_state,
                theme,
            },
            layout.body,
        );
    }

    // --- Footer ---
    if visible(layout.footer) {
        f.render_widget(
            Footer {
                state: &*app_state,
                theme,
            },
            layout.footer,
        );
    }

    // --- Overlays ---
    match app_state.mode {
        AppMode::Help => {
            let palette_key = app_state.keymap.palette_label();
            f.render_widget(
                HelpModal {
                    theme,
                    palette_key: &palette_key,
                },
                area,
            );
        }
        AppMode::Palette if app_state.palette.is_open() => {
            let mut offset = app_state.palette.scroll_offset();
            f.render_stateful_widget(
                CommandPaletteModal {
                    theme,
                    session: &app_state.palette,
                },
                area,
                &mut offset,
            );
            app_state.palette.set_scroll_offset(offset);
        }
        _ => {}
    }
}
