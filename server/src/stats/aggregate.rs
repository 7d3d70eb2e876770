use itertools::Itertools;
use shared::{AggregatedActivity, ContributionMetrics, ServiceError};
use tracing::error;

use super::YearOutcome;

/// Sums the per-year metrics on top of the non-ranged activity query.
///
/// A single failed year fails the whole aggregate: the error names every
/// failed year and keeps the kind of the earliest one. Organization and
/// follower counts and the creation date come from `initial` untouched.
pub fn aggregate(
    initial: AggregatedActivity,
    outcomes: Vec<YearOutcome>,
) -> Result<AggregatedActivity, ServiceError> {
    let mut metrics = ContributionMetrics::default();
    let mut failures = Vec::new();

    for outcome in outcomes {
        match outcome {
            YearOutcome::Success {
                metrics: year_metrics,
                ..
            } => metrics += year_metrics,
            YearOutcome::Failure { year, error, .. } => failures.push((year, error)),
        }
    }

    if let Some((_, first_error)) = failures.first() {
        let failed_years = failures.iter().map(|(year, _)| year).join(", ");
        error!("Failed to fetch contribution data for years: {failed_years}");
        return Err(ServiceError::new(
            format!("Failed to fetch all-time data (years failed: {failed_years})"),
            first_error.kind,
        ));
    }

    Ok(AggregatedActivity { metrics, ..initial })
}
