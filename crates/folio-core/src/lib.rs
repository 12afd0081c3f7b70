pub mod anim;
pub mod config;
pub mod error;
pub mod fps;
pub mod observer;
pub mod particles;
pub mod portfolio;
pub mod reveal;
pub mod scroll_spy;
pub mod typing;

pub use anim::EasingType;
pub use config::{AppConfig, ScrollConfig};
pub use error::{Error, Result};
pub use portfolio::{Block, BlockId, Portfolio};
