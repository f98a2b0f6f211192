//! Bookmarking / back-button integration.

/// Hooks the controller hands to the history service on registration.
pub struct HistoryHooks {
    /// The service is ready; the controller clicks its initial tab.
    pub on_ready: Box<dyn FnOnce()>,
    /// The location fragment changed outside the widget (back/forward,
    /// manual edit). Receives the decoded fragment.
    pub on_navigate: Box<dyn Fn(Option<String>)>,
}

/// External browser-history service.
pub trait History {
    fn register(&self, fragments: &[String], hooks: HistoryHooks);

    /// Updates the location fragment without a scroll jump.
    fn update_fragment(&self, fragment: &str);
}
