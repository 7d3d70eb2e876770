//! Shapes of the GitHub GraphQL `data` payloads and their conversion into the
//! domain model.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    AggregatedActivity, ContributionMetrics, IssueStats, PullRequestStats, RepositoryStats,
    RepositorySummary, ServiceError,
};

/// Every query wraps its fields into `user(login: $username)`.
/// GitHub answers with `"user": null` when the login does not exist.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope<T> {
    pub user: Option<T>,
}

impl<T> UserEnvelope<T> {
    pub fn into_user(self) -> Result<T, ServiceError> {
        self.user
            .ok_or_else(|| ServiceError::not_found("Could not resolve to a User"))
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    pub total_count: u64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub total_commit_contributions: u64,
    pub restricted_contributions_count: u64,
    pub total_pull_request_review_contributions: u64,
}

impl From<ContributionsCollection> for ContributionMetrics {
    fn from(collection: ContributionsCollection) -> Self {
        Self::new(
            collection.total_commit_contributions,
            collection.restricted_contributions_count,
            collection.total_pull_request_review_contributions,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    pub created_at: DateTime<Utc>,
    pub contributions_collection: ContributionsCollection,
    pub organizations: TotalCount,
    pub followers: TotalCount,
}

impl From<UserActivity> for AggregatedActivity {
    fn from(activity: UserActivity) -> Self {
        Self {
            account_created_at: activity.created_at,
            metrics: activity.contributions_collection.into(),
            organization_count: activity.organizations.total_count,
            follower_count: activity.followers.total_count,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIssues {
    pub open_issues: TotalCount,
    pub closed_issues: TotalCount,
}

impl From<UserIssues> for IssueStats {
    fn from(issues: UserIssues) -> Self {
        Self {
            open: issues.open_issues.total_count,
            closed: issues.closed_issues.total_count,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPullRequests {
    pub pull_requests: TotalCount,
}

impl From<UserPullRequests> for PullRequestStats {
    fn from(pull_requests: UserPullRequests) -> Self {
        Self {
            total: pull_requests.pull_requests.total_count,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Nodes<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageNode {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub languages: Option<Nodes<LanguageNode>>,
    pub stargazers: TotalCount,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryConnection {
    pub total_count: u64,
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<RepositoryNode>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRepositories {
    pub repositories: RepositoryConnection,
}

impl From<UserRepositories> for RepositoryStats {
    fn from(value: UserRepositories) -> Self {
        let repositories = value
            .repositories
            .nodes
            .into_iter()
            .flatten()
            .map(|node| RepositorySummary {
                languages: node
                    .languages
                    .map(|l| l.nodes.into_iter().flatten().map(|n| n.name).collect())
                    .unwrap_or_default(),
                stars: node.stargazers.total_count,
                created_at: node.created_at,
            })
            .collect();

        Self {
            total_count: value.repositories.total_count,
            repositories,
        }
    }
}
