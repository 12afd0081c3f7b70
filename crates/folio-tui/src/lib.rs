pub mod app;
pub mod clipboard;
pub mod event;
pub mod input;
pub mod layout;
pub mod links;
pub mod scroll;
pub mod theme;
pub mod themes;
pub mod widgets;

pub use app::App;
pub use themes::load_theme;
