// Port traits the domain needs from infrastructure

pub mod repositories;

pub use repositories::*;
