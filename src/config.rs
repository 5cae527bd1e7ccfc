use std::env;

/// API credentials for the key-gated sources, read once at startup and passed
/// explicitly into the source registry. A missing key disables exactly that
/// source; it never aborts the run.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    pub securitytrails: Option<String>,
    pub dnsdumpster: Option<String>,
}

impl ApiKeys {
    pub fn from_env() -> Self {
        Self {
            securitytrails: non_empty(env::var("SECURITYTRAILS_API_KEY").ok()),
            dnsdumpster: non_empty(env::var("DNSDUMPSTER_API_KEY").ok()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keys_count_as_absent() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("k".to_string())), Some("k".to_string()));
    }
}
