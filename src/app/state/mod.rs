use super::keymap::KeyMap;
use super::palette::{PaletteSession, PaletteSettings};
use crate::infrastructure::session::SessionStore;
use crate::theme::{PaletteType, Theme};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const STATUS_TTL: Duration = Duration::from_secs(4);
/// Previously visited paths kept for the page body, oldest first.
pub const HISTORY_LIMIT: usize = 5;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AppMode {
    Normal,  // Viewing the current page
    Palette, // Command palette overlay is open
    Help,    // Showing the help overlay
}

pub struct AppState {
    // --- Status ---
    pub should_quit: bool,
    pub mode: AppMode,
    pub last_error: Option<String>,
    pub status_message: Option<String>,
    pub status_clear_time: Option<Instant>,

    // --- Routing ---
    pub route: String,
    pub history: VecDeque<String>,

    // --- Session & Palette ---
    pub session: Arc<SessionStore>,
    pub palette: PaletteSession,
    pub keymap: KeyMap,

    // --- Presentation ---
    pub palette_type: PaletteType,
    pub theme: Theme,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            Arc::new(SessionStore::default()),
            PaletteSettings::default(),
            KeyMap::default(),
            PaletteType::Nord,
        )
    }
}

impl AppState {
    pub fn new(
        session: Arc<SessionStore>,
        settings: PaletteSettings,
        keymap: KeyMap,
        palette_type: PaletteType,
    ) -> Self {
        Self {
            should_quit: false,
            mode: AppMode::Normal,
            last_error: None,
            status_message: None,
            status_clear_time: None,
            route: "/".to_string(),
            history: VecDeque::with_capacity(HISTORY_LIMIT + 1),
            palette: PaletteSession::new(session.clone(), settings),
            session,
            keymap,
            palette_type,
            theme: Theme::from_palette_type(palette_type),
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_clear_time = Some(Instant::now() + STATUS_TTL);
    }
}
