use crate::app::{
    action::Action,
    command::Command,
    palette::{PaletteEffect, PaletteEvent, PaletteTarget},
    state::{AppMode, AppState, HISTORY_LIMIT},
};
use crate::theme::Theme;
use std::time::Instant;

pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    match action {
        Action::Quit => state.should_quit = true,
        Action::Navigate(path) => navigate(state, path),
        Action::ToggleHelp => {
            state.mode = if state.mode == AppMode::Help {
                AppMode::Normal
            } else {
                AppMode::Help
            };
        }
        Action::CycleTheme => {
            state.palette_type = state.palette_type.next();
            state.theme = Theme::from_palette_type(state.palette_type);
            let label = state.palette_type.label();
            state.set_status(format!("Theme: {label}"));
        }
        Action::SignOut => {
            state.session.sign_out();
            tracing::info!("session signed out");
            state.set_status("Signed out");
            navigate(state, "/".to_string());
        }
        Action::CancelMode => {
            state.last_error = None;
            if state.palette.is_open() {
                return palette(state, PaletteEvent::Close);
            }
            state.mode = AppMode::Normal;
        }

        // --- Palette ---
        Action::OpenPalette => return palette(state, PaletteEvent::Open),
        Action::ClosePalette => return palette(state, PaletteEvent::Close),
        Action::PaletteInsert(c) => return palette(state, PaletteEvent::InsertChar(c)),
        Action::PaletteBackspace => return palette(state, PaletteEvent::Backspace),
        Action::PaletteClearQuery => return palette(state, PaletteEvent::ClearQuery),
        Action::PaletteNext => return palette(state, PaletteEvent::MoveDown),
        Action::PalettePrev => return palette(state, PaletteEvent::MoveUp),
        Action::PaletteHover(index) => return palette(state, PaletteEvent::Hover(index)),
        Action::PaletteClick(index) => {
            palette(state, PaletteEvent::Hover(index));
            return palette(state, PaletteEvent::Confirm);
        }
        Action::PaletteConfirm => return palette(state, PaletteEvent::Confirm),

        // --- Async Results ---
        Action::PaletteQuerySettled(generation) => {
            return palette(state, PaletteEvent::QuerySettled(generation));
        }
        Action::PaletteRemoteLoaded(cycle, results) => {
            return palette(state, PaletteEvent::RemoteLoaded(cycle, *results));
        }
        Action::ErrorOccurred(err) => {
            tracing::error!(error = %err, "runtime error");
            state.last_error = Some(err);
        }

        Action::Tick => {
            if state
                .status_clear_time
                .is_some_and(|deadline| Instant::now() >= deadline)
            {
                state.status_message = None;
                state.status_clear_time = None;
            }
        }
        Action::Resize(_, _) => {}
    }
    None
}

/// Feeds one event to the palette and turns its effect into either a runtime
/// command or a re-dispatched host action.
fn palette(state: &mut AppState, event: PaletteEvent) -> Option<Command> {
    let effect = state.palette.update(event);
    sync_mode(state);

    match effect? {
        PaletteEffect::Debounce(ticket) => Some(Command::Debounce(ticket)),
        PaletteEffect::Search(request) => Some(Command::SearchDirectory(request)),
        PaletteEffect::Run(PaletteTarget::Navigate(path)) => update(state, Action::Navigate(path)),
        PaletteEffect::Run(PaletteTarget::Invoke(action)) => update(state, action),
    }
}

fn navigate(state: &mut AppState, path: String) {
    if state.route != path {
        let previous = std::mem::replace(&mut state.route, path);
        state.history.push_back(previous);
        if state.history.len() > HISTORY_LIMIT {
            state.history.pop_front();
        }
        tracing::info!(path = %state.route, "navigated");
    }
    // Navigation always tears the palette down, whoever triggered it.
    state.palette.update(PaletteEvent::ExternalNavigation);
    sync_mode(state);
}

fn sync_mode(state: &mut AppState) {
    if state.palette.is_open() {
        state.mode = AppMode::Palette;
    } else if state.mode == AppMode::Palette {
        state.mode = AppMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::keymap::KeyMap;
    use crate::app::palette::{PalettePhase, PaletteSettings};
    use crate::domain::models::Role;
    use crate::domain::role::RoleContext;
    use crate::infrastructure::session::SessionStore;
    use crate::theme::PaletteType;
    use std::sync::Arc;

    fn state(role: Role) -> AppState {
        AppState::new(
            Arc::new(SessionStore::new(Some(role))),
            PaletteSettings::default(),
            KeyMap::default(),
            PaletteType::Nord,
        )
    }

    fn settle(state: &mut AppState, text: &str) -> Option<Command> {
        let mut generation = None;
        for c in text.chars() {
            if let Some(Command::Debounce(ticket)) = update(state, Action::PaletteInsert(c)) {
                generation = Some(ticket.generation);
            }
        }
        update(state, Action::PaletteQuerySettled(generation.unwrap()))
    }

    #[test]
    fn test_open_and_escape() {
        let mut state = state(Role::Staff);
        update(&mut state, Action::OpenPalette);
        assert_eq!(state.mode, AppMode::Palette);

        update(&mut state, Action::ClosePalette);
        assert_eq!(state.mode, AppMode::Normal);
        assert!(!state.palette.is_open());
    }

    #[test]
    fn test_confirming_a_destination_navigates_and_closes() {
        let mut state = state(Role::Manager);
        update(&mut state, Action::OpenPalette);
        settle(&mut state, "suppliers");

        assert!(update(&mut state, Action::PaletteConfirm).is_none());
        assert_eq!(state.route, "/suppliers");
        assert_eq!(state.history, vec!["/".to_string()]);
        assert_eq!(state.mode, AppMode::Normal);
        assert_eq!(state.palette.phase(), PalettePhase::Closed);
    }

    #[test]
    fn test_confirming_an_invoke_target_dispatches_action() {
        let mut state = state(Role::Staff);
        update(&mut state, Action::OpenPalette);
        settle(&mut state, "cycle theme");
        update(&mut state, Action::PaletteConfirm);

        assert_eq!(state.palette_type, PaletteType::Catppuccin);
        assert!(!state.palette.is_open());
    }

    #[test]
    fn test_settled_query_requests_directory_search() {
        let mut state = state(Role::Staff);
        update(&mut state, Action::OpenPalette);
        match settle(&mut state, "alice") {
            Some(Command::SearchDirectory(request)) => {
                assert_eq!(request.query, "alice");
                assert_eq!(request.page_size, 5);
            }
            other => panic!("expected directory search, got {other:?}"),
        }
    }

    #[test]
    fn test_navigation_from_elsewhere_closes_palette() {
        let mut state = state(Role::Staff);
        update(&mut state, Action::OpenPalette);
        update(&mut state, Action::PaletteInsert('c'));

        update(&mut state, Action::Navigate("/customers".to_string()));
        assert!(!state.palette.is_open());
        assert_eq!(state.palette.raw_query(), "");
        assert_eq!(state.mode, AppMode::Normal);
    }

    #[test]
    fn test_sign_out_drops_role_and_goes_home() {
        let mut state = state(Role::Admin);
        update(&mut state, Action::Navigate("/users".to_string()));
        update(&mut state, Action::OpenPalette);
        settle(&mut state, "sign out");
        update(&mut state, Action::PaletteConfirm);

        assert_eq!(state.route, "/");
        assert!(state.session.current_role().is_none());

        update(&mut state, Action::OpenPalette);
        assert!(!state
            .palette
            .selection()
            .results
            .iter()
            .any(|i| i.title == "Users"));
    }

    #[test]
    fn test_click_confirms_hovered_row() {
        let mut state = state(Role::Staff);
        update(&mut state, Action::OpenPalette);
        let second = state.palette.selection().results[1].clone();
        update(&mut state, Action::PaletteClick(1));

        if let crate::app::palette::PaletteTarget::Navigate(path) = second.target {
            assert_eq!(state.route, path);
        }
        assert!(!state.palette.is_open());
    }

    #[test]
    fn test_history_keeps_only_recent_pages() {
        let mut state = state(Role::Admin);
        let pages = [
            "/customers",
            "/devices",
            "/contracts",
            "/suppliers",
            "/support",
            "/users",
            "/profile",
        ];
        for page in pages {
            update(&mut state, Action::Navigate(page.to_string()));
        }

        assert_eq!(state.history.len(), HISTORY_LIMIT);
        assert_eq!(
            state.history,
            vec!["/devices", "/contracts", "/suppliers", "/support", "/users"]
        );
        assert_eq!(state.route, "/profile");
    }

    #[test]
    fn test_runtime_error_is_shown_until_dismissed() {
        let mut state = state(Role::Staff);
        update(&mut state, Action::ErrorOccurred("Search failed".to_string()));
        assert_eq!(state.last_error.as_deref(), Some("Search failed"));

        update(&mut state, Action::CancelMode);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_status_clears_after_ttl() {
        let mut state = state(Role::Staff);
        state.set_status("hello");
        state.status_clear_time = Some(Instant::now());
        update(&mut state, Action::Tick);
        assert!(state.status_message.is_none());
    }
}
