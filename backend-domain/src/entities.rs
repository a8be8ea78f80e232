// Domain entities
pub mod event;
pub mod runtime_config;

pub use event::*;
pub use runtime_config::*;
