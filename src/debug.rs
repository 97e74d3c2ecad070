//! Dev-only logging helpers shared across modules.

/// Env flag that turns on per-analysis dev logs.
pub const ENV_DEV_LOG: &str = "SENTIMENT_DEV_LOG";

/// Dev logs require `SENTIMENT_DEV_LOG=1` and a dev environment
/// (debug build, or `SHUTTLE_ENV` in {local, development, dev}).
pub fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    is_dev_env()
}

pub(crate) fn is_dev_env() -> bool {
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// Short stable id for a text so logs never carry the raw input.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anon_hash_is_short_and_stable() {
        let a = anon_hash("I love this");
        assert_eq!(a.len(), 12);
        assert_eq!(a, anon_hash("I love this"));
        assert_ne!(a, anon_hash("I hate this"));
    }
}
