//! Cache key generation.
//!
//! Every key is `<prefix>:<parts joined by ':'>` so several deployments can
//! share one Redis.

fn build_key(prefix: &str, parts: &[&str]) -> String {
    format!("{}:{}", prefix, parts.join(":"))
}

/// Cache keys for article data.
pub mod articles {
    use super::*;

    /// Key for the full article listing.
    pub fn listing(prefix: &str) -> String {
        build_key(prefix, &["article-listing"])
    }
}
