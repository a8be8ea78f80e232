// Domain services: pure rules over events
pub mod query;
pub mod registration;
pub mod sample_events;

pub use query::{DateWindow, DropInFilter, FEATURED_LIMIT, RELATED_LIMIT};
pub use registration::*;
pub use sample_events::sample_events;
