/// Convert a route token to a form safe to embed in a filename
pub fn sanitize_token(token: &str) -> String {
    let name = token
        .trim()
        .replace([' ', '/', '\\', ':', '?', '&', '=', '#', '%'], "_");

    // Limit token length
    let name: String = name.chars().take(48).collect();
    if name.is_empty() {
        "unknown".to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_token() {
        assert_eq!(sanitize_token("MIA"), "MIA");
        assert_eq!(sanitize_token("New York"), "New_York");
        assert_eq!(sanitize_token("a/b:c?d"), "a_b_c_d");
        assert_eq!(sanitize_token("  "), "unknown");
    }

    #[test]
    fn test_sanitize_token_limits_length() {
        let long = "x".repeat(100);
        assert_eq!(sanitize_token(&long).len(), 48);
    }
}
