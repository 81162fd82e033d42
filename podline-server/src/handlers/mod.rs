pub mod fetch_info;
pub mod ping;

pub use fetch_info::fetch_info_handler;
pub use ping::ping_handler;
