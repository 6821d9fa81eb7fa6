//! API Routes

pub mod health;
pub mod session;
pub mod submissions;
