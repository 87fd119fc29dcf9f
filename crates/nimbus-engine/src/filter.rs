//! URL-pattern request filter, independent of view lifecycle.
//!
//! Patterns use the `*://*.host.com/*` glob form; they are compiled to
//! anchored regexes once at construction.

use std::sync::atomic::{AtomicBool, Ordering};

use regex::Regex;
use tracing::{debug, warn};

/// Default block list: common ad and tracking hosts.
pub const DEFAULT_BLOCK_PATTERNS: &[&str] = &[
    "*://*.doubleclick.net/*",
    "*://*.googleadservices.com/*",
    "*://*.googlesyndication.com/*",
    "*://*.google-analytics.com/*",
    "*://creative.ak.fbcdn.net/*",
    "*://*.adbrite.com/*",
    "*://*.exponential.com/*",
    "*://*.quantserve.com/*",
    "*://*.scorecardresearch.com/*",
    "*://*.zedo.com/*",
    "*://*.taboola.com/*",
    "*://*.outbrain.com/*",
    "*://*.amazon-adsystem.com/*",
];

pub struct UrlPatternFilter {
    patterns: Vec<Regex>,
    enabled: AtomicBool,
}

fn compile_pattern(pattern: &str) -> Option<Regex> {
    let mut regex = String::with_capacity(pattern.len() + 8);
    regex.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => regex.push_str(".*"),
            c => regex.push_str(&regex::escape(&c.to_string())),
        }
    }
    regex.push('$');
    match Regex::new(&regex) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(pattern, error = %e, "ignoring unparseable filter pattern");
            None
        }
    }
}

impl UrlPatternFilter {
    pub fn new(patterns: &[&str], enabled: bool) -> Self {
        Self {
            patterns: patterns.iter().filter_map(|p| compile_pattern(p)).collect(),
            enabled: AtomicBool::new(enabled),
        }
    }

    /// Filter with the default ad/tracker block list, disabled until the
    /// settings blob enables it.
    pub fn ad_blocker(enabled: bool) -> Self {
        Self::new(DEFAULT_BLOCK_PATTERNS, enabled)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        debug!(enabled, "request filter toggled");
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Whether a request to `url` should be blocked.
    pub fn is_blocked(&self, url: &str) -> bool {
        self.is_enabled() && self.patterns.iter().any(|re| re.is_match(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_listed_ad_hosts() {
        let filter = UrlPatternFilter::ad_blocker(true);
        assert!(filter.is_blocked("https://ads.doubleclick.net/pixel.gif"));
        assert!(filter.is_blocked("http://cdn.taboola.com/widget.js"));
        assert!(filter.is_blocked("https://x.amazon-adsystem.com/e/dtb/bid"));
    }

    #[test]
    fn passes_ordinary_urls() {
        let filter = UrlPatternFilter::ad_blocker(true);
        assert!(!filter.is_blocked("https://example.com/"));
        assert!(!filter.is_blocked("https://doubleclick.example.com/"));
        assert!(!filter.is_blocked("nimbus://newtab"));
    }

    #[test]
    fn disabled_filter_blocks_nothing() {
        let filter = UrlPatternFilter::ad_blocker(false);
        assert!(!filter.is_blocked("https://ads.doubleclick.net/pixel.gif"));
        filter.set_enabled(true);
        assert!(filter.is_blocked("https://ads.doubleclick.net/pixel.gif"));
    }

    #[test]
    fn patterns_are_anchored() {
        let filter = UrlPatternFilter::new(&["https://exact.example.com/"], true);
        assert!(filter.is_blocked("https://exact.example.com/"));
        assert!(!filter.is_blocked("https://exact.example.com/page"));
        assert!(!filter.is_blocked("xhttps://exact.example.com/"));
    }

    #[test]
    fn literal_dots_are_not_wildcards() {
        let filter = UrlPatternFilter::new(&["*://*.zedo.com/*"], true);
        assert!(filter.is_blocked("https://d3.zedo.com/jsc/d3/fo.js"));
        assert!(!filter.is_blocked("https://d3.zedoXcom/jsc"));
    }
}
