//! DNS Reconciler Core Library
//!
//! Reconciles declared DNS zone records against the live state of a
//! provider account:
//! - [`diff`]: set difference between desired and existing records
//! - [`corrections`]: planned changes and their execution
//! - [`Reconciler`]: a session tying provider, zone index and planning together
//! - [`config`]: the provider credentials file
//!
//! Provider access goes through [`dns_reconciler_provider::ZoneProvider`];
//! this crate performs no I/O of its own besides reading the credentials
//! file.
//!
//! ```rust,no_run
//! use dns_reconciler_core::config::load_provider_configs;
//! use dns_reconciler_core::corrections::ApplyPolicy;
//! use dns_reconciler_core::types::{DesiredRecord, ZoneConfig};
//! use dns_reconciler_core::{CoreResult, Reconciler};
//! use dns_reconciler_provider::create_provider;
//!
//! # async fn run() -> CoreResult<()> {
//! let configs = load_provider_configs("creds.json")?;
//! let provider = create_provider(configs.credentials("packetframe")?)?;
//!
//! let mut session = Reconciler::new(provider);
//! let zone = ZoneConfig {
//!     name: "example.com".to_string(),
//!     records: vec![DesiredRecord::new("www", "A", "192.0.2.1", 300)],
//! };
//! let corrections = session.plan_corrections(&zone).await?;
//! for c in &corrections {
//!     println!("{c}");
//! }
//! session.apply(corrections, ApplyPolicy::StopOnError).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod corrections;
pub mod diff;
pub mod error;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::Reconciler;
