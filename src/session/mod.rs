mod core;
mod errors;

pub use core::RoundSession;
pub use errors::SessionError;
