use thiserror::Error;

/// Failure of a GitHub API call.
///
/// GitHub reports a missing membership (or file) with a 404, so [`GitHubError::NotFound`] is
/// kept apart from every other failure: callers can treat it as an answer instead of an error.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("GitHub API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("couldn't reach GitHub API")]
    Transport(#[source] reqwest::Error),

    #[error("couldn't decode GitHub API response")]
    Decode(#[source] reqwest::Error),

    #[error("invalid GitHub API url `{0}`")]
    InvalidUrl(String),
}

impl GitHubError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GitHubError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_404_is_not_found() {
        assert!(GitHubError::NotFound("memberships/octocat".to_string()).is_not_found());

        let forbidden = GitHubError::Status {
            status: 403,
            message: "Resource not accessible by integration".to_string(),
        };
        assert!(!forbidden.is_not_found());
        assert_eq!(
            forbidden.to_string(),
            "GitHub API returned HTTP 403: Resource not accessible by integration"
        );
    }
}
