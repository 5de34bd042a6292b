pub mod demo_directory;
pub mod http_directory;
pub mod session;
