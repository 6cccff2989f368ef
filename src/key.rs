//! Addressing for cache entries

use std::fmt;

/// Header carrying the entry key
pub const KEY_HEADER: &str = "x-cache-key";

/// Header carrying the entry namespace
pub const NAMESPACE_HEADER: &str = "x-cache-namespace";

/// Header carrying the entry scope
pub const SCOPE_HEADER: &str = "x-cache-scope";

/// Identity of a cache entry: a key within a namespace and scope.
///
/// All three parts are case-sensitive and passed to the service unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    key: String,
    namespace: String,
    scope: String,
}

impl CacheKey {
    /// Create a new cache key
    pub fn new(
        key: impl Into<String>,
        namespace: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            namespace: namespace.into(),
            scope: scope.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// The addressing headers sent with every request
    pub fn headers(&self) -> [(&'static str, &str); 3] {
        [
            (KEY_HEADER, &self.key),
            (NAMESPACE_HEADER, &self.namespace),
            (SCOPE_HEADER, &self.scope),
        ]
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.namespace, self.scope, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_map_each_part() {
        let key = CacheKey::new("k1", "ns1", "default");
        assert_eq!(
            key.headers(),
            [
                ("x-cache-key", "k1"),
                ("x-cache-namespace", "ns1"),
                ("x-cache-scope", "default"),
            ]
        );
    }

    #[test]
    fn test_display_and_case_sensitivity() {
        let lower = CacheKey::new("k1", "ns1", "default");
        let upper = CacheKey::new("K1", "ns1", "default");
        assert_eq!(lower.to_string(), "ns1/default/k1");
        assert_ne!(lower, upper);
    }
}
