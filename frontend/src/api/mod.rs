pub mod client;
mod leave;
mod notifications;
pub mod types;

pub use client::*;
pub use types::*;
