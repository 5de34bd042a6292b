pub mod command_palette;
pub mod help;
pub mod helpers;

pub use command_palette::CommandPaletteModal;
pub use help::HelpModal;
