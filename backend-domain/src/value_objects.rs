// Domain value objects
pub mod event_date;
pub mod event_status;
pub mod identifiers;

pub use event_date::*;
pub use event_status::*;
pub use identifiers::*;
