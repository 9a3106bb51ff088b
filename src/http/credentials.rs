//! Basic-auth server credentials.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Host plus basic-auth credentials for a server the pipelines talk to: the
/// model host that serves generated sources, or the marketplace broker.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerCredentials {
    pub host: String,
    pub username: String,
    pub password: String,
}

impl ServerCredentials {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Resource URL on this server. The host is stored with or without a
    /// trailing slash; resource paths always start with one.
    pub fn resource_url(&self, resource_path: &str) -> String {
        format!("{}{}", self.host.trim_end_matches('/'), resource_path)
    }
}

// Requests get logged; the password must not.
impl fmt::Debug for ServerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerCredentials")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_url_joins_host_and_path() {
        let credentials = ServerCredentials::new("http://models.test", "user", "pass");
        assert_eq!(
            credentials.resource_url("/3/Models.java/iris-model"),
            "http://models.test/3/Models.java/iris-model"
        );
    }

    #[test]
    fn resource_url_tolerates_trailing_slash() {
        let credentials = ServerCredentials::new("http://models.test/", "user", "pass");
        assert_eq!(
            credentials.resource_url("/3/h2o-genmodel.jar"),
            "http://models.test/3/h2o-genmodel.jar"
        );
    }

    #[test]
    fn debug_redacts_password() {
        let credentials = ServerCredentials::new("http://models.test", "user", "s3cret");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("user"));
        assert!(!rendered.contains("s3cret"));
    }
}
