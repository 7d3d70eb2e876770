use std::ops::{Add, AddAssign};

use chrono::{DateTime, Datelike, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionMetrics {
    pub commit_count: u64,
    pub restricted_count: u64,
    pub review_count: u64,
}

impl ContributionMetrics {
    pub const fn new(commit_count: u64, restricted_count: u64, review_count: u64) -> Self {
        Self {
            commit_count,
            restricted_count,
            review_count,
        }
    }

    pub const fn total(&self) -> u64 {
        self.commit_count
            .saturating_add(self.restricted_count)
            .saturating_add(self.review_count)
    }
}

impl Add for ContributionMetrics {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            commit_count: self.commit_count.saturating_add(rhs.commit_count),
            restricted_count: self.restricted_count.saturating_add(rhs.restricted_count),
            review_count: self.review_count.saturating_add(rhs.review_count),
        }
    }
}

impl AddAssign for ContributionMetrics {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedActivity {
    pub account_created_at: DateTime<Utc>,
    pub metrics: ContributionMetrics,
    pub organization_count: u64,
    pub follower_count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueStats {
    pub open: u64,
    pub closed: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestStats {
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    /// Top languages of the repository ordered by size
    pub languages: Vec<String>,
    pub stars: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryStats {
    pub total_count: u64,
    pub repositories: Vec<RepositorySummary>,
}

impl RepositoryStats {
    pub fn total_stars(&self) -> u64 {
        self.repositories
            .iter()
            .fold(0u64, |total, r| total.saturating_add(r.stars))
    }

    /// Languages ordered by the number of repositories using them.
    /// Ties are broken alphabetically.
    pub fn language_ranking(&self) -> Vec<(String, usize)> {
        self.repositories
            .iter()
            .flat_map(|r| r.languages.iter().cloned())
            .counts()
            .into_iter()
            .sorted_by(|(a_name, a_count), (b_name, b_count)| {
                b_count.cmp(a_count).then_with(|| a_name.cmp(b_name))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub activity: AggregatedActivity,
    pub issues: IssueStats,
    pub pull_requests: PullRequestStats,
    pub repository: RepositoryStats,
}

impl UserInfo {
    pub fn total_stars(&self) -> u64 {
        self.repository.total_stars()
    }

    pub fn total_issues(&self) -> u64 {
        self.issues.open.saturating_add(self.issues.closed)
    }

    pub fn total_contributions(&self) -> u64 {
        self.activity
            .metrics
            .total()
            .saturating_add(self.pull_requests.total)
            .saturating_add(self.total_issues())
    }

    /// Number of full years between account creation and `now`.
    pub fn account_age_years(&self, now: DateTime<Utc>) -> u32 {
        let created = self.activity.account_created_at;
        let mut years = now.year() - created.year();
        if (now.month(), now.day()) < (created.month(), created.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }
}
