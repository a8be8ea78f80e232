pub mod context;
pub mod lifecycle;
pub mod logging;
pub mod remote_commands;

pub use lifecycle::{build_router_with_layers, reseed, run_standalone, spawn_server, BackendHandle};
pub use logging::{init_logging, LogGuard};
pub use remote_commands::{run_remote, RemoteCommand};
