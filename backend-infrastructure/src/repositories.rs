pub mod json_file;
pub mod memory;
pub mod seed_file;

pub use json_file::*;
pub use memory::*;
pub use seed_file::*;
