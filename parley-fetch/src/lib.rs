// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Parley Fetch
//!
//! HTTP plumbing shared by the Parley providers.
//!
//! - [`http::HttpClient`] - reqwest wrapper with tracing, timeouts and JSON helpers
//! - [`probe::Probe`] - Reachability probe with its own short timeout
//! - [`retry::RetryStrategy`] - Opt-in in-provider retries with backoff
//!
//! Errors are reported as [`FetchError`], which converts into
//! [`parley_core::ProviderError`] so providers can propagate with `?`.

pub mod error;
pub mod http;
pub mod probe;
pub mod retry;

// Re-export key types at crate root
pub use error::{FetchError, HttpError};
pub use http::{check_status, join_url, HttpClient, ResponseExt};
pub use probe::{run_probes, Probe, ProbeResult};
pub use retry::RetryStrategy;
