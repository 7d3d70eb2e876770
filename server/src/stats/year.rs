use std::time::Duration;

use shared::{
    github::{UserActivity, UserEnvelope},
    ContributionMetrics, QueryRequest, ServiceError, YearSlice,
};
use tracing::{error, instrument, warn};

use super::CredentialRotatingExecutor;
use crate::{
    api::github::queries,
    consts::{YEAR_QUERY_BASE_DELAY, YEAR_QUERY_MAX_RETRIES},
};

/// `base * 2^attempt`, saturating at `Duration::MAX`.
pub fn backoff_delay(attempt: u32, base: Duration) -> Duration {
    2u32.checked_pow(attempt)
        .and_then(|factor| base.checked_mul(factor))
        .unwrap_or(Duration::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: YEAR_QUERY_MAX_RETRIES,
            base_delay: YEAR_QUERY_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Rate limits need the quota to be restored, so they wait twice as long
    /// as any other failure.
    pub fn delay_for(&self, error: &ServiceError, attempt: u32) -> Duration {
        if error.is_rate_limited() {
            backoff_delay(attempt, self.base_delay)
        } else {
            backoff_delay(attempt, self.base_delay / 2)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearOutcome {
    Success {
        year: i32,
        metrics: ContributionMetrics,
        attempts: u32,
    },
    Failure {
        year: i32,
        error: ServiceError,
        attempts: u32,
    },
}

impl YearOutcome {
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Success { attempts, .. } | Self::Failure { attempts, .. } => *attempts,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

pub struct YearRangeFetcher<'a> {
    executor: &'a CredentialRotatingExecutor,
    policy: RetryPolicy,
}

impl<'a> YearRangeFetcher<'a> {
    pub fn new(executor: &'a CredentialRotatingExecutor, policy: RetryPolicy) -> Self {
        Self { executor, policy }
    }

    #[instrument(skip(self, slice), fields(year = slice.year))]
    pub async fn fetch_year(&self, username: &str, slice: YearSlice) -> YearOutcome {
        let year = slice.year;
        let request = QueryRequest::for_user(queries::USER_ACTIVITY_WITH_DATE_RANGE, username)
            .variable("from", slice.from_iso())
            .variable("to", slice.to_iso());
        let max_retries = self.policy.max_retries;

        let mut last_error = None;
        for attempt in 0..max_retries {
            let result = self
                .executor
                .execute::<UserEnvelope<UserActivity>>(&request)
                .await
                .and_then(UserEnvelope::into_user);

            let error = match result {
                Ok(activity) => {
                    return YearOutcome::Success {
                        year,
                        metrics: activity.contributions_collection.into(),
                        attempts: attempt + 1,
                    }
                }
                Err(error) => error,
            };

            let delay = self.policy.delay_for(&error, attempt);
            // Rate limits wait even after the last attempt
            let should_wait = error.is_rate_limited() || attempt + 1 < max_retries;
            if error.is_rate_limited() {
                warn!(
                    "Rate limit hit for year {year}, attempt {}/{max_retries}, waiting {}ms",
                    attempt + 1,
                    delay.as_millis()
                );
            } else {
                warn!(
                    "Error fetching year {year}, attempt {}/{max_retries}: {error}",
                    attempt + 1
                );
            }
            last_error = Some(error);

            if should_wait {
                tokio::time::sleep(delay).await;
            }
        }

        let error = last_error.unwrap_or_else(|| {
            ServiceError::not_found(format!("Failed to fetch data for year {year}"))
        });
        error!("Giving up on year {year} after {max_retries} attempts: {error}");

        YearOutcome::Failure {
            year,
            error,
            attempts: max_retries,
        }
    }
}
