//! Database client factory
//!
//! Resolves the database client an application should use from its
//! environment: a Supabase client talking to the project's REST API, or,
//! when `DATABASE_URL` holds a `postgresql://` connection string, a
//! placeholder client with the same calling convention.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               Application Layer              │
//! │      ClientSettings, ClientFactory           │
//! ├─────────────────────────────────────────────┤
//! │                 Domain Layer                 │
//! │  Traits, TableHandle builder, types, errors  │
//! ├─────────────────────────────────────────────┤
//! │             Infrastructure Layer             │
//! │  PostgREST client, direct stub, logging      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use db_client_factory::app::{ClientFactory, ClientSettings};
//! use db_client_factory::domain::DatabaseClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ClientFactory::default().get_client(&ClientSettings::load())?;
//!
//!     let rows = client
//!         .table("documents")
//!         .select("id,title")
//!         .eq("status", "published")
//!         .execute()
//!         .await?;
//!     println!("{} rows", rows.count);
//!
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod domain;
pub mod infra;

// Test utilities are available in tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
