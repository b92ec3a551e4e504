pub mod command;
pub mod controller_handler;

pub use command::Command;
pub use controller_handler::Controller;
