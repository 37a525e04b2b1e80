//! WebSocket Game Sessions
//!
//! Each WebSocket connection plays one game. It is structured into submodules:
//!
//! - `protocol`: Defines the JSON-based message format for client-server communication.
//! - `session`: Manages the connection lifecycle and the game's event loop.

pub mod protocol;
pub mod session;

pub use session::ws_handler;
