// src/commands/mod.rs
pub mod append_cmd;
pub mod deleteall_cmd;
pub mod enter;
pub mod home_cmd;
pub mod ln;
pub mod ls;
pub mod mkdir;
pub mod mv;
pub mod registry;
pub mod rm;
pub mod show_cmd;
pub mod touch;
pub mod types;
pub mod utils;

pub use registry::{create_default_registry, CommandRegistry};
pub use types::{Command, CommandContext, CommandResult};
