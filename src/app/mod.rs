pub mod action;
pub mod command;
pub mod handler;
pub mod input;
pub mod keymap;
pub mod r#loop;
pub mod palette;
pub mod reducer;
pub mod routes;
pub mod state;
pub mod ui;
