//! Event key patterns.
//!
//! A key registered on the bus is one of:
//!   - Exact: `"user:login"` fires only for `"user:login"`
//!   - Universal: `"*"` fires for every event
//!   - Namespace: `"user:*"` fires for `"user:login"`, `"user:a:b"`, but not `"user"`
//!
//! No other wildcard forms exist. `"a:*:b"` is an exact key.

/// Suffix marking a namespaced wildcard
const NAMESPACE_WILDCARD: &str = ":*";

/// The universal wildcard key
pub const ANY_EVENT: &str = "*";

/// Classification of a registry key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPattern {
    /// Matches only the identical event name (handled by exact lookup).
    Exact(String),
    /// `*`, matches every event.
    Any,
    /// `<namespace>:*`, holds the namespace without the suffix.
    Namespace(String),
}

impl EventPattern {
    /// Classify a registry key
    pub fn parse(key: &str) -> Self {
        if key == ANY_EVENT {
            EventPattern::Any
        } else if let Some(base) = key.strip_suffix(NAMESPACE_WILDCARD) {
            EventPattern::Namespace(base.to_string())
        } else {
            EventPattern::Exact(key.to_string())
        }
    }

    /// Whether this key can match event names other than itself
    pub fn is_wildcard(&self) -> bool {
        !matches!(self, EventPattern::Exact(_))
    }

    /// Check if this pattern matches `event` through a wildcard rule.
    ///
    /// Exact patterns never match here; the exact key is dispatched separately.
    pub fn matches_wildcard(&self, event: &str) -> bool {
        match self {
            EventPattern::Exact(_) => false,
            EventPattern::Any => true,
            EventPattern::Namespace(base) => event
                .strip_prefix(base.as_str())
                .is_some_and(|rest| rest.starts_with(':')),
        }
    }
}

/// Check if the registry key `pattern` matches `event` through a wildcard rule.
///
/// A key equal to the event name is never a wildcard match, so an emitted
/// literal `"*"` does not reach `"*"` listeners twice.
pub fn matches_wildcard(pattern: &str, event: &str) -> bool {
    if pattern == event {
        return false;
    }
    EventPattern::parse(pattern).matches_wildcard(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(EventPattern::parse("*"), EventPattern::Any);
        assert_eq!(
            EventPattern::parse("user:*"),
            EventPattern::Namespace("user".to_string())
        );
        assert_eq!(
            EventPattern::parse("user:login"),
            EventPattern::Exact("user:login".to_string())
        );
        // Only a trailing `:*` counts
        assert_eq!(
            EventPattern::parse("a:*:b"),
            EventPattern::Exact("a:*:b".to_string())
        );
        assert_eq!(EventPattern::parse("user*"), EventPattern::Exact("user*".to_string()));
    }

    #[test]
    fn test_is_wildcard() {
        assert!(EventPattern::parse("*").is_wildcard());
        assert!(EventPattern::parse("a:*").is_wildcard());
        assert!(!EventPattern::parse("a:b").is_wildcard());
    }

    #[test]
    fn test_namespace_needs_colon_boundary() {
        assert!(matches_wildcard("a:*", "a:x"));
        assert!(matches_wildcard("a:*", "a:x:y"));
        assert!(!matches_wildcard("a:*", "b:x"));
        assert!(!matches_wildcard("a:*", "a"));
        assert!(!matches_wildcard("a:*", "ab:x"));
        assert!(matches_wildcard("a:*", "a:"));
    }

    #[test]
    fn test_universal() {
        assert!(matches_wildcard("*", "anything"));
        assert!(matches_wildcard("*", "user:login"));
        assert!(matches_wildcard("*", ""));
    }

    #[test]
    fn test_equal_key_is_not_wildcard_match() {
        assert!(!matches_wildcard("*", "*"));
        assert!(!matches_wildcard("user:*", "user:*"));
        assert!(!matches_wildcard("user:login", "user:login"));
    }

    #[test]
    fn test_nested_namespace() {
        assert!(matches_wildcard("a:b:*", "a:b:c"));
        assert!(!matches_wildcard("a:b:*", "a:c"));
        // a namespaced literal emitted name still reaches the parent pattern
        assert!(matches_wildcard("a:*", "a:*:b"));
    }

    #[test]
    fn test_empty_namespace() {
        // ":*" strips to an empty base, so any name starting with ':' matches
        assert!(matches_wildcard(":*", ":x"));
        assert!(!matches_wildcard(":*", "x"));
    }
}
