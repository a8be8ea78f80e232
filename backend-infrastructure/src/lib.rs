pub mod config;
pub mod remote;
pub mod repositories;
pub mod utils;

pub use config::*;
pub use remote::*;
pub use repositories::*;
pub use utils::*;
