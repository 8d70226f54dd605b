//! REST surface for the rolodex catalog service.

pub mod handlers;
pub mod server;

pub use server::{router, serve, ServerConfig};
