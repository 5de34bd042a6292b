pub mod footer;
pub mod header;
pub mod modals;
pub mod page_view;

pub use footer::Footer;
pub use header::Header;
pub use page_view::PageView;
