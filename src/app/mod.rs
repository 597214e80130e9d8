//! Application layer: configuration and client selection.

pub mod config;
pub mod factory;

pub use config::{ClientSettings, DATABASE_URL, SUPABASE_SERVICE_KEY, SUPABASE_URL};
pub use factory::{ClientFactory, ClientHandle, get_client};
