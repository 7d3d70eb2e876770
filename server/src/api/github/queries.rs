pub const USER_ACTIVITY: &str = r#"
query userInfo($username: String!) {
  user(login: $username) {
    createdAt
    contributionsCollection {
      totalCommitContributions
      restrictedContributionsCount
      totalPullRequestReviewContributions
    }
    organizations(first: 1) {
      totalCount
    }
    followers(first: 1) {
      totalCount
    }
  }
}
"#;

pub const USER_ACTIVITY_WITH_DATE_RANGE: &str = r#"
query userInfo($username: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $username) {
    createdAt
    contributionsCollection(from: $from, to: $to) {
      totalCommitContributions
      restrictedContributionsCount
      totalPullRequestReviewContributions
    }
    organizations(first: 1) {
      totalCount
    }
    followers(first: 1) {
      totalCount
    }
  }
}
"#;

pub const USER_ISSUES: &str = r#"
query userInfo($username: String!) {
  user(login: $username) {
    openIssues: issues(states: OPEN) {
      totalCount
    }
    closedIssues: issues(states: CLOSED) {
      totalCount
    }
  }
}
"#;

pub const USER_PULL_REQUESTS: &str = r#"
query userInfo($username: String!) {
  user(login: $username) {
    pullRequests(first: 1) {
      totalCount
    }
  }
}
"#;

pub const USER_REPOSITORIES: &str = r#"
query userInfo($username: String!) {
  user(login: $username) {
    repositories(first: 50, ownerAffiliations: OWNER, orderBy: {direction: DESC, field: STARGAZERS}) {
      totalCount
      nodes {
        languages(first: 3, orderBy: {direction: DESC, field: SIZE}) {
          nodes {
            name
          }
        }
        stargazers {
          totalCount
        }
        createdAt
      }
    }
  }
}
"#;

// Same as above but looks at more repositories
pub const USER_REPOSITORIES_ALL_TIME: &str = r#"
query userInfo($username: String!) {
  user(login: $username) {
    repositories(first: 100, ownerAffiliations: OWNER, orderBy: {direction: DESC, field: STARGAZERS}) {
      totalCount
      nodes {
        languages(first: 3, orderBy: {direction: DESC, field: SIZE}) {
          nodes {
            name
          }
        }
        stargazers {
          totalCount
        }
        createdAt
      }
    }
  }
}
"#;
