//! Widget preference flags
//!
//! `Preferences` is loaded once from a [`KeyValueStore`] when the widget is
//! built and writes through on every mutation. Nothing else reads the store
//! for these keys.
//!
//! Stored shapes: booleans as `"true"`/`"false"`, lists as JSON string arrays.
//! A value that fails to parse is logged and replaced by the default; the
//! store itself is left alone until the next write overwrites it.

use crate::page::PageContext;
use crate::store::KeyValueStore;

pub const KEY_CAPTURE: &str = "capture_enabled";
pub const KEY_NOTIFICATIONS: &str = "notifications_enabled";
pub const KEY_BLOCKED_DOMAINS: &str = "blocked_domains";
pub const KEY_BLOCKED_URLS: &str = "blocked_urls";

/// All keys owned by `Preferences`
pub const ALL_KEYS: [&str; 4] = [
    KEY_CAPTURE,
    KEY_NOTIFICATIONS,
    KEY_BLOCKED_DOMAINS,
    KEY_BLOCKED_URLS,
];

/// True when the host or the URL appears in the matching list
pub fn is_blocked(host: &str, url: &str, blocked_domains: &[String], blocked_urls: &[String]) -> bool {
    blocked_domains.iter().any(|d| d == host) || blocked_urls.iter().any(|u| u == url)
}

pub struct Preferences {
    store: Box<dyn KeyValueStore>,
    capture_enabled: bool,
    notifications_enabled: bool,
    blocked_domains: Vec<String>,
    blocked_urls: Vec<String>,
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("capture_enabled", &self.capture_enabled)
            .field("notifications_enabled", &self.notifications_enabled)
            .field("blocked_domains", &self.blocked_domains)
            .field("blocked_urls", &self.blocked_urls)
            .finish()
    }
}

impl Preferences {
    /// Read every flag from `store`, falling back per key
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let capture_enabled = read_bool(store.as_ref(), KEY_CAPTURE, true);
        let notifications_enabled = read_bool(store.as_ref(), KEY_NOTIFICATIONS, true);
        let blocked_domains = read_list(store.as_ref(), KEY_BLOCKED_DOMAINS);
        let blocked_urls = read_list(store.as_ref(), KEY_BLOCKED_URLS);

        tracing::debug!(
            capture_enabled,
            notifications_enabled,
            domains = blocked_domains.len(),
            urls = blocked_urls.len(),
            "Preferences loaded"
        );

        Self {
            store,
            capture_enabled,
            notifications_enabled,
            blocked_domains,
            blocked_urls,
        }
    }

    pub fn capture_enabled(&self) -> bool {
        self.capture_enabled
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    pub fn blocked_domains(&self) -> &[String] {
        &self.blocked_domains
    }

    pub fn blocked_urls(&self) -> &[String] {
        &self.blocked_urls
    }

    /// Flip capture and persist; returns the new value
    pub fn toggle_capture(&mut self) -> bool {
        self.capture_enabled = !self.capture_enabled;
        self.write(KEY_CAPTURE, &self.capture_enabled.to_string());
        tracing::info!(enabled = self.capture_enabled, "Capture toggled");
        self.capture_enabled
    }

    /// Flip notifications and persist; returns the new value
    pub fn toggle_notifications(&mut self) -> bool {
        self.notifications_enabled = !self.notifications_enabled;
        self.write(KEY_NOTIFICATIONS, &self.notifications_enabled.to_string());
        tracing::info!(enabled = self.notifications_enabled, "Notifications toggled");
        self.notifications_enabled
    }

    /// Add a host to the domain list; returns false if it was already there
    pub fn block_domain(&mut self, host: &str) -> bool {
        if !push_unique(&mut self.blocked_domains, host) {
            return false;
        }
        let encoded = encode_list(&self.blocked_domains);
        self.write(KEY_BLOCKED_DOMAINS, &encoded);
        tracing::info!(host, "Domain blocked");
        true
    }

    /// Add a URL to the URL list; returns false if it was already there
    pub fn block_url(&mut self, url: &str) -> bool {
        if !push_unique(&mut self.blocked_urls, url) {
            return false;
        }
        let encoded = encode_list(&self.blocked_urls);
        self.write(KEY_BLOCKED_URLS, &encoded);
        tracing::info!(url, "URL blocked");
        true
    }

    pub fn is_page_blocked(&self, page: &PageContext) -> bool {
        is_blocked(
            page.host(),
            page.url(),
            &self.blocked_domains,
            &self.blocked_urls,
        )
    }

    /// Forget everything, in memory and in the store
    pub fn reset(&mut self) {
        for key in ALL_KEYS {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, "Failed to clear preference: {:#}", e);
            }
        }
        self.capture_enabled = true;
        self.notifications_enabled = true;
        self.blocked_domains.clear();
        self.blocked_urls.clear();
    }

    // Storage failures keep the in-memory value; the next write retries.
    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            tracing::warn!(key, "Failed to persist preference: {:#}", e);
        }
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || list.iter().any(|v| v == value) {
        return false;
    }
    list.push(value.to_string());
    true
}

fn encode_list(list: &[String]) -> String {
    // Vec<String> always serializes
    serde_json::to_string(list).unwrap_or_else(|_| "[]".to_string())
}

fn read_bool(store: &dyn KeyValueStore, key: &str, default: bool) -> bool {
    match store.get(key) {
        Ok(Some(raw)) => match raw.trim() {
            "true" => true,
            "false" => false,
            other => {
                tracing::warn!(key, value = other, "Stored flag is not a boolean, using default");
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            tracing::warn!(key, "Failed to read preference: {:#}", e);
            default
        }
    }
}

fn read_list(store: &dyn KeyValueStore, key: &str) -> Vec<String> {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(list) => {
                let mut unique = Vec::with_capacity(list.len());
                for item in &list {
                    push_unique(&mut unique, item);
                }
                unique
            }
            Err(e) => {
                tracing::warn!(key, "Stored list is malformed, using empty list: {}", e);
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(key, "Failed to read preference: {:#}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use anyhow::{anyhow, Result};

    fn prefs_with(entries: &[(&str, &str)]) -> Preferences {
        let mut store = MemoryStore::new();
        for (k, v) in entries {
            store.set(k, v).unwrap();
        }
        Preferences::load(Box::new(store))
    }

    /// Store whose reads work but whose writes always fail
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("read-only"))
        }
        fn remove(&mut self, _key: &str) -> Result<()> {
            Err(anyhow!("read-only"))
        }
        fn entries(&self) -> Result<Vec<(String, String)>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn defaults_when_store_empty() {
        let prefs = prefs_with(&[]);
        assert!(prefs.capture_enabled());
        assert!(prefs.notifications_enabled());
        assert!(prefs.blocked_domains().is_empty());
        assert!(prefs.blocked_urls().is_empty());
    }

    #[test]
    fn double_toggle_restores_persisted_value() {
        let mut prefs = prefs_with(&[(KEY_CAPTURE, "true"), (KEY_NOTIFICATIONS, "false")]);

        assert!(!prefs.toggle_capture());
        assert_eq!(prefs.store.get(KEY_CAPTURE).unwrap().as_deref(), Some("false"));
        assert!(prefs.toggle_capture());
        assert_eq!(prefs.store.get(KEY_CAPTURE).unwrap().as_deref(), Some("true"));

        assert!(prefs.toggle_notifications());
        assert!(!prefs.toggle_notifications());
        assert_eq!(
            prefs.store.get(KEY_NOTIFICATIONS).unwrap().as_deref(),
            Some("false")
        );
    }

    #[test]
    fn blocking_same_domain_twice_keeps_one_entry() {
        let mut prefs = prefs_with(&[]);
        assert!(prefs.block_domain("example.com"));
        assert!(!prefs.block_domain("example.com"));

        assert_eq!(prefs.blocked_domains(), ["example.com".to_string()]);
        assert_eq!(
            prefs.store.get(KEY_BLOCKED_DOMAINS).unwrap().as_deref(),
            Some(r#"["example.com"]"#)
        );
    }

    #[test]
    fn blocking_same_url_twice_keeps_one_entry() {
        let mut prefs = prefs_with(&[]);
        assert!(prefs.block_url("https://example.com/a"));
        assert!(!prefs.block_url("https://example.com/a"));
        assert_eq!(prefs.blocked_urls().len(), 1);
    }

    #[test]
    fn page_blocked_by_host_or_url() {
        let domains = vec!["example.com".to_string()];
        let urls = vec!["https://other.org/page".to_string()];

        assert!(is_blocked("example.com", "https://example.com/", &domains, &urls));
        assert!(is_blocked("other.org", "https://other.org/page", &domains, &urls));
        assert!(!is_blocked("other.org", "https://other.org/else", &domains, &urls));
        assert!(!is_blocked("news.org", "https://news.org/", &[], &[]));
    }

    #[test]
    fn is_page_blocked_uses_current_page() {
        let mut prefs = prefs_with(&[]);
        let page = PageContext::parse("https://example.com/docs");
        assert!(!prefs.is_page_blocked(&page));

        prefs.block_domain(page.host());
        assert!(prefs.is_page_blocked(&page));
    }

    #[test]
    fn malformed_list_falls_back_to_empty() {
        let prefs = prefs_with(&[(KEY_BLOCKED_DOMAINS, "example.com, not json")]);
        assert!(prefs.blocked_domains().is_empty());
    }

    #[test]
    fn malformed_flag_falls_back_to_default() {
        let prefs = prefs_with(&[(KEY_CAPTURE, "yes please")]);
        assert!(prefs.capture_enabled());
    }

    #[test]
    fn stored_duplicates_are_collapsed() {
        let prefs = prefs_with(&[(KEY_BLOCKED_URLS, r#"["a","a","b"]"#)]);
        assert_eq!(prefs.blocked_urls(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn write_failure_keeps_in_memory_value() {
        let mut prefs = Preferences::load(Box::new(ReadOnlyStore));
        assert!(!prefs.toggle_capture());
        assert!(!prefs.capture_enabled());
        assert!(prefs.block_domain("example.com"));
        assert_eq!(prefs.blocked_domains().len(), 1);
    }

    #[test]
    fn reset_clears_store_and_state() {
        let mut prefs = prefs_with(&[(KEY_CAPTURE, "false"), (KEY_BLOCKED_URLS, r#"["x"]"#)]);
        prefs.reset();
        assert!(prefs.capture_enabled());
        assert!(prefs.blocked_urls().is_empty());
        assert!(prefs.store.entries().unwrap().is_empty());
    }
}
