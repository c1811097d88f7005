//! Deterministic resource name generation
//!
//! When the caller omits a resource name, one is generated from the logical
//! resource id and the client request token. Both inputs are stable across
//! retries of the same request, so the generated name is too: a retried
//! create targets the same resource instead of leaking a duplicate.

const DEFAULT_PREFIX: &str = "resource";

/// Characters of the request token kept as the name suffix
const SUFFIX_LEN: usize = 12;

/// Generate a name from the logical id and request token, truncated to
/// `max_len` and lower-cased.
///
/// The suffix derived from the token always survives truncation; only the
/// logical-id prefix is trimmed. Two requests with distinct tokens keep
/// distinct names no matter how long their logical ids are.
pub fn generate_name(logical_id: Option<&str>, client_request_token: &str, max_len: usize) -> String {
    let mut suffix: String = client_request_token
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(SUFFIX_LEN)
        .collect();
    if suffix.is_empty() {
        suffix.push('0');
    }
    let suffix = suffix.to_ascii_lowercase();
    if max_len <= suffix.len() {
        return suffix[..max_len].to_string();
    }

    let mut prefix = sanitize(logical_id.unwrap_or(DEFAULT_PREFIX));
    if prefix.is_empty() {
        prefix = DEFAULT_PREFIX.to_string();
    }
    let available = max_len - suffix.len() - 1;
    let prefix: String = prefix.chars().take(available).collect();
    let prefix = prefix.trim_end_matches('-');
    if prefix.is_empty() {
        suffix
    } else {
        format!("{}-{}", prefix, suffix)
    }
}

/// Lower-case and replace anything outside `[a-z0-9]` with hyphens
fn sanitize(input: &str) -> String {
    let mapped: String = input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    mapped.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_same_name() {
        let a = generate_name(Some("MySubnetGroup"), "e2f1c9a8-0001", 255);
        let b = generate_name(Some("MySubnetGroup"), "e2f1c9a8-0001", 255);
        assert_eq!(a, b);
    }

    #[test]
    fn output_is_lowercase_and_bounded() {
        let name = generate_name(Some("MyEndpointWithAVeryLongLogicalId"), "ABCDEF123456", 30);
        assert!(name.len() <= 30);
        assert_eq!(name, name.to_ascii_lowercase());
    }

    #[test]
    fn token_suffix_survives_truncation() {
        let long_id = "a".repeat(300);
        let one = generate_name(Some(&long_id), "token-one-111", 30);
        let two = generate_name(Some(&long_id), "token-two-222", 30);
        assert_ne!(one, two);
        assert!(one.ends_with("tokenone111"));
    }

    #[test]
    fn missing_logical_id_uses_fallback() {
        let name = generate_name(None, "abc123", 255);
        assert_eq!(name, "resource-abc123");
    }

    #[test]
    fn non_alphanumeric_logical_id_is_sanitized() {
        let name = generate_name(Some("My_Subnet.Group!"), "tok1", 255);
        assert_eq!(name, "my-subnet-group-tok1");
    }

    #[test]
    fn tiny_budget_keeps_only_the_suffix() {
        let name = generate_name(Some("Anything"), "abcdef123456", 8);
        assert_eq!(name, "abcdef12");
    }

    #[test]
    fn empty_token_still_produces_a_name() {
        let name = generate_name(Some("Group"), "", 255);
        assert_eq!(name, "group-0");
    }
}
