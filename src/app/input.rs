use crate::app::{
    action::Action,
    state::{AppMode, AppState},
};
use crate::components::modals::command_palette::hit_test;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::{Rect, Size};

pub fn map_event_to_action(event: Event, app_state: &AppState, terminal_size: Size) -> Option<Action> {
    if let Event::Key(key) = &event {
        if key.kind == KeyEventKind::Release {
            return None;
        }
    }

    match event {
        Event::Resize(w, h) => Some(Action::Resize(w, h)),
        Event::Key(key) if app_state.mode == AppMode::Palette => map_palette_key(key, app_state),
        Event::Key(key) => app_state.keymap.get_action(key, app_state.mode),
        Event::Mouse(mouse) if app_state.mode == AppMode::Palette => {
            let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
            let index = hit_test(&app_state.palette, area, mouse.column, mouse.row);
            match mouse.kind {
                MouseEventKind::Moved => index.map(Action::PaletteHover),
                MouseEventKind::Down(MouseButton::Left) => index.map(Action::PaletteClick),
                MouseEventKind::ScrollUp => Some(Action::PalettePrev),
                MouseEventKind::ScrollDown => Some(Action::PaletteNext),
                _ => None,
            }
        }
        _ => None,
    }
}

fn map_palette_key(key: KeyEvent, app_state: &AppState) -> Option<Action> {
    // The opening shortcut toggles the palette shut again.
    if app_state.keymap.is_palette_key(key) {
        return Some(Action::ClosePalette);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Some(Action::ClosePalette),
        KeyCode::Enter => Some(Action::PaletteConfirm),
        KeyCode::Up => Some(Action::PalettePrev),
        KeyCode::Down | KeyCode::Tab => Some(Action::PaletteNext),
        KeyCode::BackTab => Some(Action::PalettePrev),
        KeyCode::Backspace => Some(Action::PaletteBackspace),
        KeyCode::Char('p') if ctrl => Some(Action::PalettePrev),
        KeyCode::Char('n') if ctrl => Some(Action::PaletteNext),
        KeyCode::Char('u') if ctrl => Some(Action::PaletteClearQuery),
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            Some(Action::PaletteInsert(c))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::reducer;
    use crate::components::modals::command_palette::{modal_area, results_area};
    use crossterm::event::{KeyEventState, MouseEvent};

    const SIZE: Size = Size {
        width: 100,
        height: 40,
    };

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn palette_state() -> AppState {
        let mut state = AppState::default();
        reducer::update(&mut state, Action::OpenPalette);
        state
    }

    #[test]
    fn test_shortcut_opens_palette_from_normal_mode() {
        let state = AppState::default();
        let action = map_event_to_action(
            press(KeyCode::Char('k'), KeyModifiers::CONTROL),
            &state,
            SIZE,
        );
        assert_eq!(action, Some(Action::OpenPalette));
    }

    #[test]
    fn test_typing_goes_to_the_query_while_open() {
        let state = palette_state();
        // `q` quits in normal mode but is plain text inside the palette.
        assert_eq!(
            map_event_to_action(press(KeyCode::Char('q'), KeyModifiers::NONE), &state, SIZE),
            Some(Action::PaletteInsert('q'))
        );
        assert_eq!(
            map_event_to_action(press(KeyCode::Char('A'), KeyModifiers::SHIFT), &state, SIZE),
            Some(Action::PaletteInsert('A'))
        );
    }

    #[test]
    fn test_palette_navigation_keys() {
        let state = palette_state();
        let cases = [
            (press(KeyCode::Esc, KeyModifiers::NONE), Action::ClosePalette),
            (press(KeyCode::Enter, KeyModifiers::NONE), Action::PaletteConfirm),
            (press(KeyCode::Down, KeyModifiers::NONE), Action::PaletteNext),
            (press(KeyCode::Up, KeyModifiers::NONE), Action::PalettePrev),
            (press(KeyCode::Char('n'), KeyModifiers::CONTROL), Action::PaletteNext),
            (press(KeyCode::Char('p'), KeyModifiers::CONTROL), Action::PalettePrev),
            (press(KeyCode::Char('u'), KeyModifiers::CONTROL), Action::PaletteClearQuery),
            (press(KeyCode::Backspace, KeyModifiers::NONE), Action::PaletteBackspace),
            (press(KeyCode::Char('k'), KeyModifiers::CONTROL), Action::ClosePalette),
        ];
        for (event, expected) in cases {
            assert_eq!(map_event_to_action(event, &state, SIZE), Some(expected));
        }
    }

    #[test]
    fn test_key_release_is_ignored() {
        let state = palette_state();
        let event = Event::Key(KeyEvent {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event_to_action(event, &state, SIZE), None);
    }

    #[test]
    fn test_mouse_hover_and_click_resolve_items() {
        let state = palette_state();
        let results = results_area(modal_area(Rect::new(0, 0, SIZE.width, SIZE.height)));
        let mouse = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: results.x + 3,
                row: results.y + 2,
                modifiers: KeyModifiers::NONE,
            })
        };

        assert_eq!(
            map_event_to_action(mouse(MouseEventKind::Moved), &state, SIZE),
            Some(Action::PaletteHover(1))
        );
        assert_eq!(
            map_event_to_action(mouse(MouseEventKind::Down(MouseButton::Left)), &state, SIZE),
            Some(Action::PaletteClick(1))
        );
    }

    #[test]
    fn test_mouse_outside_palette_does_nothing() {
        let state = palette_state();
        let event = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event_to_action(event, &state, SIZE), None);
    }
}
