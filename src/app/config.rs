//! Client configuration read from the environment.
//!
//! The factory never touches process state itself; callers build a
//! [`ClientSettings`] (from the environment, a `.env` file, or any lookup
//! function) and hand it over.

use std::fmt;

use secrecy::SecretString;

/// Direct PostgreSQL connection string, checked first.
pub const DATABASE_URL: &str = "DATABASE_URL";
/// Supabase project URL.
pub const SUPABASE_URL: &str = "SUPABASE_URL";
/// Supabase service-role key.
pub const SUPABASE_SERVICE_KEY: &str = "SUPABASE_SERVICE_KEY";

/// Snapshot of the variables that decide which client to build.
///
/// Empty values are stored as `None`.
#[derive(Default)]
pub struct ClientSettings {
    pub database_url: Option<SecretString>,
    pub supabase_url: Option<String>,
    pub supabase_service_key: Option<SecretString>,
}

impl ClientSettings {
    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            database_url: read(DATABASE_URL).map(SecretString::from),
            supabase_url: read(SUPABASE_URL),
            supabase_service_key: read(SUPABASE_SERVICE_KEY).map(SecretString::from),
        }
    }

    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load a `.env` file if one exists, then read the process environment.
    #[must_use]
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    #[must_use]
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(SecretString::from(url.into()));
        self
    }

    #[must_use]
    pub fn with_supabase(mut self, url: impl Into<String>, service_key: impl Into<String>) -> Self {
        self.supabase_url = Some(url.into());
        self.supabase_service_key = Some(SecretString::from(service_key.into()));
        self
    }
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("database_url", &self.database_url.as_ref().map(|_| "[REDACTED]"))
            .field("supabase_url", &self.supabase_url)
            .field(
                "supabase_service_key",
                &self.supabase_service_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
