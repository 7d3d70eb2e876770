use std::sync::Arc;

use shared::{ServiceError, UserInfo};
use tracing::{error, instrument};

use super::GithubRepository;
use crate::consts::NOT_FOUND_MESSAGE;

/// Builds a [`UserInfo`] out of the four repository queries.
#[derive(Clone)]
pub struct UserInfoComposer {
    repository: Arc<dyn GithubRepository>,
}

impl UserInfoComposer {
    pub fn new(repository: Arc<dyn GithubRepository>) -> Self {
        Self { repository }
    }

    /// All four queries always run to completion. If any of them errors the
    /// whole profile is reported as not found.
    ///
    /// Successful answers are joined as they are, their content is not
    /// validated here.
    #[instrument(skip(self))]
    pub async fn compose(&self, username: &str, all_time: bool) -> Result<UserInfo, ServiceError> {
        let (repository, activity, issues, pull_requests) = tokio::join!(
            self.repository.fetch_repository_stats(username, all_time),
            self.repository.fetch_activity(username, all_time),
            self.repository.fetch_issues(username),
            self.repository.fetch_pull_requests(username),
        );

        match (repository, activity, issues, pull_requests) {
            (Ok(repository), Ok(activity), Ok(issues), Ok(pull_requests)) => Ok(UserInfo {
                activity,
                issues,
                pull_requests,
                repository,
            }),
            results => {
                let reasons = [
                    results.0.err(),
                    results.1.err(),
                    results.2.err(),
                    results.3.err(),
                ];
                for reason in reasons.iter().flatten() {
                    error!("Sub-query for {username} failed: {reason}");
                }
                error!("Can not find a user with username: '{username}'");
                Err(ServiceError::not_found(NOT_FOUND_MESSAGE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use shared::{
        AggregatedActivity, ContributionMetrics, ErrorKind, IssueStats, PullRequestStats,
        RepositoryStats,
    };

    use super::*;

    #[derive(Default)]
    struct FakeRepository {
        failing: Option<&'static str>,
        failing_kind: Option<ErrorKind>,
        completed: AtomicUsize,
    }

    impl FakeRepository {
        fn failing(query: &'static str, kind: ErrorKind) -> Self {
            Self {
                failing: Some(query),
                failing_kind: Some(kind),
                ..Default::default()
            }
        }

        async fn answer<T>(&self, query: &str, value: T) -> Result<T, ServiceError> {
            // Failures come back immediately, successes take a while
            if self.failing == Some(query) {
                self.completed.fetch_add(1, Ordering::SeqCst);
                let kind = self.failing_kind.unwrap_or(ErrorKind::Unknown);
                return Err(ServiceError::new(format!("{query} failed"), kind));
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok(value)
        }
    }

    fn activity() -> AggregatedActivity {
        AggregatedActivity {
            account_created_at: "2018-01-01T00:00:00Z".parse().unwrap(),
            metrics: ContributionMetrics::new(18, 3, 3),
            organization_count: 1,
            follower_count: 2,
        }
    }

    #[async_trait]
    impl GithubRepository for FakeRepository {
        async fn fetch_repository_stats(
            &self,
            _: &str,
            _: bool,
        ) -> Result<RepositoryStats, ServiceError> {
            self.answer("repository", RepositoryStats::default()).await
        }

        async fn fetch_activity(
            &self,
            _: &str,
            _: bool,
        ) -> Result<AggregatedActivity, ServiceError> {
            self.answer("activity", activity()).await
        }

        async fn fetch_issues(&self, _: &str) -> Result<IssueStats, ServiceError> {
            self.answer("issues", IssueStats { open: 1, closed: 2 }).await
        }

        async fn fetch_pull_requests(&self, _: &str) -> Result<PullRequestStats, ServiceError> {
            self.answer("pull_requests", PullRequestStats { total: 7 }).await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn joins_all_four_results() {
        let composer = UserInfoComposer::new(Arc::new(FakeRepository::default()));

        let started = tokio::time::Instant::now();
        let info = composer.compose("octocat", true).await.unwrap();

        // Queries run concurrently
        assert_eq!(started.elapsed(), std::time::Duration::from_millis(50));
        assert_eq!(info.activity, activity());
        assert_eq!(info.issues, IssueStats { open: 1, closed: 2 });
        assert_eq!(info.pull_requests.total, 7);
        assert_eq!(info.repository, RepositoryStats::default());
    }

    #[tokio::test(start_paused = true)]
    async fn any_failure_is_reported_as_not_found() {
        for query in ["repository", "activity", "issues", "pull_requests"] {
            let repository = Arc::new(FakeRepository::failing(query, ErrorKind::RateLimited));
            let composer = UserInfoComposer::new(repository.clone());

            let error = composer.compose("octocat", false).await.unwrap_err();

            assert_eq!(error.kind, ErrorKind::NotFound);
            assert_eq!(error.message, NOT_FOUND_MESSAGE);
            // The fast failure did not cancel the siblings
            assert_eq!(repository.completed.load(Ordering::SeqCst), 4);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn successful_payloads_are_not_validated() {
        // Empty-looking answers are still a success
        struct EmptyRepository;

        #[async_trait]
        impl GithubRepository for EmptyRepository {
            async fn fetch_repository_stats(
                &self,
                _: &str,
                _: bool,
            ) -> Result<RepositoryStats, ServiceError> {
                Ok(RepositoryStats {
                    total_count: 5,
                    repositories: Vec::new(),
                })
            }

            async fn fetch_activity(
                &self,
                _: &str,
                _: bool,
            ) -> Result<AggregatedActivity, ServiceError> {
                Ok(AggregatedActivity {
                    metrics: ContributionMetrics::default(),
                    ..activity()
                })
            }

            async fn fetch_issues(&self, _: &str) -> Result<IssueStats, ServiceError> {
                Ok(IssueStats::default())
            }

            async fn fetch_pull_requests(
                &self,
                _: &str,
            ) -> Result<PullRequestStats, ServiceError> {
                Ok(PullRequestStats::default())
            }
        }

        let info = UserInfoComposer::new(Arc::new(EmptyRepository))
            .compose("ghost", false)
            .await
            .unwrap();

        assert_eq!(info.repository.total_count, 5);
        assert!(info.repository.repositories.is_empty());
        assert_eq!(info.total_contributions(), 0);
    }
}
