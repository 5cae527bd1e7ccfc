use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

// crt.sh historically returns very large payloads and is slow to do so; the
// commercial APIs answer quickly.
pub const CRTSH_TIMEOUT: Duration = Duration::from_secs(200);
pub const SECURITYTRAILS_TIMEOUT: Duration = Duration::from_secs(100);
pub const DNSDUMPSTER_TIMEOUT: Duration = Duration::from_secs(30);
pub const WAYBACK_TIMEOUT: Duration = Duration::from_secs(30);
pub const ALIENVAULT_TIMEOUT: Duration = Duration::from_secs(20);
pub const ANUBIS_TIMEOUT: Duration = Duration::from_secs(20);

pub const DNS_TIMEOUT: Duration = Duration::from_secs(5);

pub static USER_AGENTS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15",
    ]
});

pub static PROTOCOL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://").expect("protocol prefix regex is valid"));
