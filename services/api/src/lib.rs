//! Magic Shop API Library Crate
//!
//! This library contains the web service around the game core: the
//! application state, REST handlers for the shop catalog, the WebSocket game
//! session, and routing. The `api` binary is a thin wrapper around it.

pub mod config;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod router;
pub mod state;
pub mod ws;
