use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use shared::{
    github::{UserActivity, UserEnvelope, UserIssues, UserPullRequests, UserRepositories},
    year_slices, AggregatedActivity, CredentialPool, IssueStats, PullRequestStats, QueryRequest,
    RepositoryStats, ServiceError,
};
use tracing::{info, instrument};

use super::{aggregate, run_batched, CredentialRotatingExecutor, RetryPolicy, YearRangeFetcher};
use crate::{
    api::{github::queries, GraphqlTransport},
    consts::BATCH_CONCURRENCY,
};

/// The four independent queries a user profile is built from.
#[async_trait]
pub trait GithubRepository: Send + Sync {
    async fn fetch_repository_stats(
        &self,
        username: &str,
        all_time: bool,
    ) -> Result<RepositoryStats, ServiceError>;

    /// With `all_time` the contributions are summed over every year since the
    /// account was created, otherwise GitHub's default window is used.
    async fn fetch_activity(
        &self,
        username: &str,
        all_time: bool,
    ) -> Result<AggregatedActivity, ServiceError>;

    async fn fetch_issues(&self, username: &str) -> Result<IssueStats, ServiceError>;

    async fn fetch_pull_requests(&self, username: &str) -> Result<PullRequestStats, ServiceError>;
}

pub struct GithubStatsService {
    executor: CredentialRotatingExecutor,
    retry: RetryPolicy,
    concurrency: usize,
    now: fn() -> DateTime<Utc>,
}

impl GithubStatsService {
    pub fn new(pool: Arc<CredentialPool>, transport: Arc<dyn GraphqlTransport>) -> Self {
        Self {
            executor: CredentialRotatingExecutor::new(pool, transport),
            retry: RetryPolicy::default(),
            concurrency: BATCH_CONCURRENCY,
            now: Utc::now,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_clock(mut self, now: fn() -> DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    async fn query_user<T: DeserializeOwned>(
        &self,
        query: &str,
        username: &str,
    ) -> Result<T, ServiceError> {
        self.executor
            .execute::<UserEnvelope<T>>(&QueryRequest::for_user(query, username))
            .await?
            .into_user()
    }
}

#[async_trait]
impl GithubRepository for GithubStatsService {
    #[instrument(skip(self))]
    async fn fetch_repository_stats(
        &self,
        username: &str,
        all_time: bool,
    ) -> Result<RepositoryStats, ServiceError> {
        let query = if all_time {
            queries::USER_REPOSITORIES_ALL_TIME
        } else {
            queries::USER_REPOSITORIES
        };
        Ok(self
            .query_user::<UserRepositories>(query, username)
            .await?
            .into())
    }

    #[instrument(skip(self))]
    async fn fetch_activity(
        &self,
        username: &str,
        all_time: bool,
    ) -> Result<AggregatedActivity, ServiceError> {
        let initial: AggregatedActivity = self
            .query_user::<UserActivity>(queries::USER_ACTIVITY, username)
            .await?
            .into();
        if !all_time {
            return Ok(initial);
        }

        let slices = year_slices(initial.account_created_at, (self.now)());
        info!(
            "Fetching all-time activity of {username} in {} yearly slices",
            slices.len()
        );

        let fetcher = YearRangeFetcher::new(&self.executor, self.retry);
        let fetcher = &fetcher;
        let outcomes = run_batched(slices, self.concurrency, move |slice| {
            fetcher.fetch_year(username, slice)
        })
        .await;

        aggregate(initial, outcomes)
    }

    #[instrument(skip(self))]
    async fn fetch_issues(&self, username: &str) -> Result<IssueStats, ServiceError> {
        Ok(self
            .query_user::<UserIssues>(queries::USER_ISSUES, username)
            .await?
            .into())
    }

    #[instrument(skip(self))]
    async fn fetch_pull_requests(&self, username: &str) -> Result<PullRequestStats, ServiceError> {
        Ok(self
            .query_user::<UserPullRequests>(queries::USER_PULL_REQUESTS, username)
            .await?
            .into())
    }
}
