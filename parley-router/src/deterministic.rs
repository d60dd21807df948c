//! The deterministic tier.
//!
//! Some inputs are answered without any provider (too-brief answers, a
//! report with nothing to summarize, aptitude grading), and an operation
//! whose providers only produced unusable content is answered with the
//! matching default from [`parley_core::defaults`].

use parley_core::{defaults, Evaluation, InterviewReport, ProviderError, Tier};
use tracing::{debug, warn};

use crate::dispatch::{Attempt, Outcome, Routed};
use crate::error::{Rejection, RouterError};
use crate::operation::Operation;

/// Fixed evaluation for answers too short to score.
pub fn precheck_answer(answer: &str) -> Option<Evaluation> {
    if defaults::is_brief_answer(answer) {
        debug!(chars = answer.trim().chars().count(), "Answer too brief, skipping providers");
        Some(defaults::brief_answer_evaluation())
    } else {
        None
    }
}

/// Fixed report for an interview with no evaluations.
pub fn precheck_report(evaluations: &[Evaluation]) -> Option<InterviewReport> {
    if evaluations.is_empty() {
        debug!("No evaluations, skipping providers");
        Some(defaults::empty_report())
    } else {
        None
    }
}

/// Returns true if the deterministic tier may replace the outcome.
///
/// At least one provider must have answered with unusable content and
/// every other rejection must be an unavailable provider. Transport,
/// timeout and status failures always propagate.
pub fn is_recoverable(attempts: &[Attempt]) -> bool {
    let mut unusable = false;
    for rejection in attempts.iter().filter_map(|a| a.rejection.as_ref()) {
        match rejection {
            r if r.is_recoverable() => unusable = true,
            Rejection::Failed(ProviderError::Unavailable(_)) => {}
            _ => return false,
        }
    }
    unusable
}

/// Converts an outcome into a routed result, substituting `default` when
/// the failure is recoverable.
///
/// # Errors
///
/// Returns the outcome's [`RouterError`] when it is not recoverable.
pub fn recover<T, D>(
    operation: Operation,
    outcome: Outcome<T>,
    default: D,
) -> Result<Routed<T>, RouterError>
where
    D: FnOnce() -> T,
{
    let Outcome { result, attempts } = outcome;
    match result {
        Ok((value, provider)) => Ok(Routed {
            value,
            served_by: provider.into(),
            attempts,
        }),
        Err(error) if is_recoverable(&attempts) => {
            warn!(operation = %operation, error = %error, "Serving deterministic default");
            Ok(Routed {
                value: default(),
                served_by: Tier::Deterministic,
                attempts,
            })
        }
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::ProviderId;
    use std::time::Duration;

    fn rejected(provider: ProviderId, error: ProviderError) -> Attempt {
        Attempt::rejected(provider, Rejection::Failed(error), Duration::ZERO)
    }

    #[test]
    fn test_precheck_answer() {
        let eval = precheck_answer("  yes  ").unwrap();
        assert_eq!(eval.technical, 20);
        assert!(precheck_answer("I would profile it first.").is_none());
    }

    #[test]
    fn test_precheck_report() {
        assert_eq!(
            precheck_report(&[]).unwrap().overall_summary,
            defaults::NO_EVALUATIONS_SUMMARY
        );
        assert!(precheck_report(&[Evaluation::uniform(50, "ok")]).is_none());
    }

    #[test]
    fn test_recoverable_chains() {
        let malformed = rejected(ProviderId::Local, ProviderError::Malformed("x".into()));
        let empty = Attempt::rejected(ProviderId::Cloud, Rejection::EmptyResult, Duration::ZERO);
        let unavailable = rejected(ProviderId::Cloud, ProviderError::Unavailable("no key".into()));
        let timeout = rejected(ProviderId::Cloud, ProviderError::Timeout(30));

        assert!(is_recoverable(&[malformed.clone(), empty]));
        assert!(is_recoverable(&[malformed.clone(), unavailable.clone()]));
        assert!(!is_recoverable(&[malformed, timeout]));
        assert!(!is_recoverable(&[unavailable]));
        assert!(!is_recoverable(&[]));
    }
}
