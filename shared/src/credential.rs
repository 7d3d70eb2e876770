use std::fmt;

use serde::{Deserialize, Serialize};

/// Secret token of a single rate-limit bucket.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Ordered set of equally privileged credentials.
///
/// Built once at startup and never mutated afterwards. The order is the
/// order in which credentials are tried for every query.
#[derive(Clone, Debug)]
pub struct CredentialPool {
    credentials: Vec<Credential>,
}

impl CredentialPool {
    /// Returns `None` if no non-blank secret is supplied.
    /// Repeated secrets are kept once, at their first position.
    pub fn new<I, S>(secrets: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut credentials: Vec<Credential> = Vec::new();
        for secret in secrets {
            let secret: String = secret.into();
            let secret = secret.trim();
            if secret.is_empty() || credentials.iter().any(|c| c.secret() == secret) {
                continue;
            }
            credentials.push(Credential::new(secret));
        }

        if credentials.is_empty() {
            None
        } else {
            Some(Self { credentials })
        }
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.credentials.iter()
    }
}

/// GraphQL query template together with its variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub variables: std::collections::BTreeMap<String, String>,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Default::default(),
        }
    }

    pub fn variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn for_user(query: impl Into<String>, username: &str) -> Self {
        Self::new(query).variable("username", username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_keeps_order_and_drops_blanks() {
        let pool = CredentialPool::new(["a", " ", "b", "a", "c"]).unwrap();
        let secrets: Vec<_> = pool.iter().map(Credential::secret).collect();
        assert_eq!(secrets, vec!["a", "b", "c"]);
        assert_eq!(pool.len(), 3);
        assert!(!pool.is_empty());
    }

    #[test]
    fn empty_pool_is_rejected() {
        assert!(CredentialPool::new(Vec::<String>::new()).is_none());
        assert!(CredentialPool::new(["", "  "]).is_none());
    }

    #[test]
    fn debug_never_shows_secret() {
        let pool = CredentialPool::new(["ghp_very_secret"]).unwrap();
        assert!(!format!("{pool:?}").contains("ghp_very_secret"));
    }

    #[test]
    fn request_serializes_as_graphql_body() {
        let request = QueryRequest::for_user("query { viewer { login } }", "octocat")
            .variable("from", "2021-01-01T00:00:00Z");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["query"], "query { viewer { login } }");
        assert_eq!(json["variables"]["username"], "octocat");
        assert_eq!(json["variables"]["from"], "2021-01-01T00:00:00Z");
    }
}
