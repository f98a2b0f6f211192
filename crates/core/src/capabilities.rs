//! Browser capabilities, resolved once at startup and passed explicitly.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// Internet Explorer.
    Trident,
    /// Pre-Blink Opera.
    Presto,
    /// Safari and other WebKit ports.
    WebKit,
    Blink,
    Gecko,
    Other,
}

/// How the location fragment is changed without a scroll jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentUpdate {
    /// `history.pushState` with the new hash; the page never scrolls.
    PushState,
    /// Assign `location.hash`, then restore the saved scroll position.
    Assign,
    /// `location.replace(url#hash)`; assigning the hash stalls old WebKit.
    /// Replacing adds no history entry, so back/forward does not step
    /// through earlier tabs on these engines.
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub engine: Engine,
    pub history_api: bool,
}

impl Capabilities {
    pub fn modern() -> Self {
        Self {
            engine: Engine::Blink,
            history_api: true,
        }
    }

    pub fn detect(user_agent: &str, history_api: bool) -> Self {
        Self {
            engine: engine_from_user_agent(user_agent),
            history_api,
        }
    }

    pub fn fragment_update(&self) -> FragmentUpdate {
        match (self.history_api, self.engine) {
            (true, _) => FragmentUpdate::PushState,
            (false, Engine::WebKit) => FragmentUpdate::Replace,
            (false, _) => FragmentUpdate::Assign,
        }
    }

    /// Legacy engines jump to the fragment target on load; the widget
    /// scrolls back to the top after initialization.
    pub fn restores_scroll_on_load(&self) -> bool {
        matches!(self.engine, Engine::Trident | Engine::Presto)
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::modern()
    }
}

fn engine_from_user_agent(ua: &str) -> Engine {
    if ua.contains("MSIE") || ua.contains("Trident/") {
        Engine::Trident
    } else if ua.contains("Presto/") || ua.starts_with("Opera/") {
        Engine::Presto
    } else if ua.contains("Chrome/") || ua.contains("Chromium/") || ua.contains("Edg/") {
        Engine::Blink
    } else if ua.contains("AppleWebKit/") {
        Engine::WebKit
    } else if ua.contains("Gecko/") {
        Engine::Gecko
    } else {
        Engine::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IE8: &str = "Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1; Trident/4.0)";
    const OPERA9: &str = "Opera/9.80 (Windows NT 6.1; U; en) Presto/2.10.229 Version/11.62";
    const SAFARI3: &str = "Mozilla/5.0 (Macintosh; U; Intel Mac OS X 10_5) AppleWebKit/525.13 (KHTML, like Gecko) Version/3.1 Safari/525.13";
    const CHROME: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
    const FIREFOX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";

    #[test]
    fn test_engines() {
        assert_eq!(Capabilities::detect(IE8, false).engine, Engine::Trident);
        assert_eq!(Capabilities::detect(OPERA9, false).engine, Engine::Presto);
        assert_eq!(Capabilities::detect(SAFARI3, false).engine, Engine::WebKit);
        assert_eq!(Capabilities::detect(CHROME, true).engine, Engine::Blink);
        assert_eq!(Capabilities::detect(FIREFOX, true).engine, Engine::Gecko);
        assert_eq!(Capabilities::detect("curl/8.0", false).engine, Engine::Other);
    }

    #[test]
    fn test_fragment_update_strategy() {
        assert_eq!(Capabilities::detect(CHROME, true).fragment_update(), FragmentUpdate::PushState);
        assert_eq!(Capabilities::detect(SAFARI3, false).fragment_update(), FragmentUpdate::Replace);
        assert_eq!(Capabilities::detect(IE8, false).fragment_update(), FragmentUpdate::Assign);
    }

    #[test]
    fn test_scroll_reset_on_load() {
        assert!(Capabilities::detect(IE8, false).restores_scroll_on_load());
        assert!(!Capabilities::detect(FIREFOX, true).restores_scroll_on_load());
    }
}
