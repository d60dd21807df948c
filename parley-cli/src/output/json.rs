//! JSON output formatting.

use anyhow::Result;
use parley_core::{ProviderId, Tier};
use parley_router::{Attempt, Routed};
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// JSON envelope for a routed result.
#[derive(Debug, Serialize)]
pub struct RoutedOutput<'a, T: Serialize> {
    pub served_by: Tier,
    pub attempts: Vec<AttemptOutput>,
    pub result: &'a T,
}

/// One provider call.
#[derive(Debug, Serialize)]
pub struct AttemptOutput {
    pub provider: ProviderId,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

impl From<&Attempt> for AttemptOutput {
    fn from(attempt: &Attempt) -> Self {
        Self {
            provider: attempt.provider,
            accepted: attempt.accepted,
            error: attempt.rejection.as_ref().map(ToString::to_string),
            duration_ms: u64::try_from(attempt.duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a routed result with the tier that served it and its attempts.
    pub fn format_routed<T: Serialize>(&self, routed: &Routed<T>) -> Result<String> {
        self.format(&RoutedOutput {
            served_by: routed.served_by,
            attempts: routed.attempts.iter().map(AttemptOutput::from).collect(),
            result: &routed.value,
        })
    }
}
