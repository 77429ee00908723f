use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct SheriaURL(String);

impl AsRef<str> for SheriaURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SheriaURL {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl SheriaURL {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self(base_url.into())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Whitelisted server methods are exposed under `/api/method/<dotted.path>`.
    pub fn method(&self, namespace: &str, method: &str) -> Self {
        let namespace = namespace.trim_matches('.');
        if namespace.is_empty() {
            return self.append_path("/api/method").append_path(method);
        }

        self.append_path("/api/method")
            .append_path(&format!("{}.{}", namespace, method))
    }

    pub fn login(&self) -> Self {
        self.append_path("/api/method/login")
    }
}
