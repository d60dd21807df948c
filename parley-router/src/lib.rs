// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Parley Router
//!
//! Routes interview operations across three tiers:
//!
//! | Tier | Served when |
//! |------|-------------|
//! | Local | preferred and available, or the cloud provider failed |
//! | Cloud | preferred and available, or the local provider failed |
//! | Deterministic | trivial inputs, or both providers produced unusable content |
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                        Router                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ Preference   │ │ Health       │ │ Usage        │   │
//! │  │ Store        │ │ Monitor      │ │ Stats        │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘   │
//! │        select ──► execute (fallback) ──► recover      │
//! └───────────────────────────────────────────────────────┘
//!          │                   │
//!          ▼                   ▼
//!   Arc<dyn CapabilityProvider> (local, cloud)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use parley_router::{Router, RouterConfig};
//! use std::sync::Arc;
//!
//! let router = Arc::new(Router::start(local, cloud, RouterConfig::default()).await);
//! let question = router.generate_first_question(&context).await?;
//! println!("{} (via {})", question.value.text, question.served_by);
//! ```

pub mod deterministic;
pub mod dispatch;
pub mod error;
pub mod health;
pub mod operation;
pub mod preference;
pub mod router;
pub mod stats;

pub use dispatch::{Attempt, Call, Outcome, Routed};
pub use error::{Rejection, RouterError};
pub use health::HealthMonitor;
pub use operation::Operation;
pub use preference::PreferenceStore;
pub use router::{APTITUDE_COUNT_RANGE, NEXT_QUESTION_RANGE, Router, RouterConfig, Selection};
pub use stats::UsageStats;
