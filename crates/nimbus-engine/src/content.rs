//! Bundled content for virtual addresses.
//!
//! Virtual addresses (`nimbus://newtab`, `nimbus://settings`,
//! `nimbus://account`) are served from bundled pages via the engine's
//! custom protocol, so a view's URL for a virtual page is the virtual
//! address itself.

/// Custom protocol scheme for bundled content.
pub const SCHEME: &str = "nimbus";

pub const NEW_TAB_URL: &str = "nimbus://newtab";
pub const SETTINGS_URL: &str = "nimbus://settings";
pub const ACCOUNT_URL: &str = "nimbus://account";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtualPage {
    NewTab,
    Settings,
    Account,
}

/// Whether `url` points into the bundled-content scheme.
pub fn is_virtual(url: &str) -> bool {
    url.starts_with("nimbus://")
}

/// Map a virtual address to its page, tolerating a trailing slash.
pub fn virtual_page(url: &str) -> Option<VirtualPage> {
    match url.trim_end_matches('/') {
        NEW_TAB_URL => Some(VirtualPage::NewTab),
        SETTINGS_URL => Some(VirtualPage::Settings),
        ACCOUNT_URL => Some(VirtualPage::Account),
        _ => None,
    }
}

const NEW_TAB_HTML: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>New Tab</title></head>
<body style="background:#0f0f1a;color:#e6edf3;font-family:sans-serif;
display:flex;align-items:center;justify-content:center;height:100vh;margin:0">
<h1 style="font-weight:300">Nimbus</h1>
</body></html>
"#;

const SETTINGS_HTML: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Settings</title></head>
<body style="background:#0f0f1a;color:#e6edf3;font-family:sans-serif;margin:0;padding:40px">
<h1 style="font-weight:300">Settings</h1>
</body></html>
"#;

const ACCOUNT_HTML: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Account</title></head>
<body style="background:#0f0f1a;color:#e6edf3;font-family:sans-serif;margin:0;padding:40px">
<h1 style="font-weight:300">Account</h1>
</body></html>
"#;

/// Resolves custom-protocol paths to bundled assets.
#[derive(Debug, Default)]
pub struct ContentProvider;

impl ContentProvider {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a protocol path (`newtab`, `settings/`, …) to
    /// `(mime, body)`.
    pub fn resolve(&self, path: &str) -> Option<(&'static str, &'static str)> {
        match path.trim_matches('/') {
            "newtab" | "" => Some(("text/html", NEW_TAB_HTML)),
            "settings" => Some(("text/html", SETTINGS_HTML)),
            "account" => Some(("text/html", ACCOUNT_HTML)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_virtual_addresses() {
        assert!(is_virtual("nimbus://newtab"));
        assert!(is_virtual("nimbus://settings"));
        assert!(!is_virtual("https://example.com"));
        assert!(!is_virtual("about:blank"));
    }

    #[test]
    fn maps_virtual_pages() {
        assert_eq!(virtual_page("nimbus://newtab"), Some(VirtualPage::NewTab));
        assert_eq!(virtual_page("nimbus://newtab/"), Some(VirtualPage::NewTab));
        assert_eq!(
            virtual_page("nimbus://settings"),
            Some(VirtualPage::Settings)
        );
        assert_eq!(virtual_page("nimbus://account"), Some(VirtualPage::Account));
        assert_eq!(virtual_page("nimbus://bogus"), None);
        assert_eq!(virtual_page("https://example.com"), None);
    }

    #[test]
    fn provider_resolves_known_pages() {
        let provider = ContentProvider::new();
        let (mime, body) = provider.resolve("newtab").unwrap();
        assert_eq!(mime, "text/html");
        assert!(body.contains("New Tab"));

        assert!(provider.resolve("settings").is_some());
        assert!(provider.resolve("account").is_some());
        assert!(provider.resolve("nope").is_none());
    }

    #[test]
    fn provider_tolerates_slashes() {
        let provider = ContentProvider::new();
        assert!(provider.resolve("/settings/").is_some());
    }
}
