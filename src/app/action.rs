use crate::app::palette::{CycleId, RemoteResults};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit,

    // --- Host ---
    Navigate(String), // Transition to a concrete page path
    ToggleHelp,       // Toggle the help overlay (?)
    CycleTheme,       // Switch to the next colour theme
    SignOut,          // Drop the session role and go home
    CancelMode,       // ESC outside the palette

    // --- Palette ---
    OpenPalette,         // Global shortcut (ctrl+k)
    ClosePalette,        // ESC / dismiss
    PaletteInsert(char), // Typed character
    PaletteBackspace,
    PaletteClearQuery, // ctrl+u
    PaletteNext,       // Arrow down
    PalettePrev,       // Arrow up
    PaletteHover(usize),
    PaletteClick(usize),
    PaletteConfirm, // Enter

    // --- Async Results ---
    // Sent back by spawned tasks
    PaletteQuerySettled(u64),
    PaletteRemoteLoaded(CycleId, Box<RemoteResults>),
    ErrorOccurred(String),
}
