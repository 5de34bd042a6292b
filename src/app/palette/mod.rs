//! Federated command palette: a static, role-filtered index of destinations
//! and actions merged with remote customer/device lookups.
//!
//! Keystrokes flow through [`debounce::DebouncedInput`]; each settled query
//! starts a search cycle whose remote half ([`fanout::FanoutRequest`]) is
//! tagged with a child of the session's cancellation token. Results are only
//! committed by [`session::PaletteSession`] while their cycle is still the
//! current one, so a slow response for an older query never overwrites the
//! list for a newer one.

pub mod debounce;
pub mod fanout;
pub mod index;
pub mod item;
pub mod merge;
pub mod selection;
pub mod session;

pub use fanout::{CycleId, RemoteResults};
pub use item::{PaletteGroup, PaletteItem, PaletteTarget};
pub use session::{PaletteEffect, PaletteEvent, PalettePhase, PaletteSession, PaletteSettings};
