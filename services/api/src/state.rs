//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds all shared,
//! clonable resources like the shopkeeper client and the prompt template.

use crate::config::Config;
use magic_shop_core::llm_client::ShopkeeperClient;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub shopkeeper: Arc<dyn ShopkeeperClient>,
    /// System-instruction template; rendered against the catalog per game.
    pub system_template: Arc<String>,
    pub config: Arc<Config>,
}
