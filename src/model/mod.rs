pub mod pin;
pub mod board;
pub mod config;

pub use pin::*;
pub use board::*;
pub use config::*;
