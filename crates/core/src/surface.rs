//! The DOM seam the controller drives.
//!
//! Tabs and their sections are addressed by the 0-based tab index; the
//! implementation resolves the link, its list item and the section the
//! link's fragment points to.

use crate::auto_height::LayoutMetrics;
use crate::fx::Step;
use futures::future::LocalBoxFuture;

#[allow(async_fn_in_trait)]
pub trait Surface {
    /// Fragments of the tab links, in order. Read once at initialization.
    fn tab_fragments(&self) -> Vec<Option<String>>;

    /// Current location fragment, decoded, without `#`.
    fn location_fragment(&self) -> Option<String>;

    /// Whether the section tab `tab` links to exists.
    fn has_section(&self, tab: usize) -> bool;

    /// Adds the hide class to every section in the container except the
    /// section of `shown`.
    fn hide_sections_except(&self, shown: usize, hide_class: &str);

    fn set_section_hidden(&self, tab: usize, hide_class: &str, hidden: bool);

    /// Toggles a state class on the tab's list item.
    fn set_tab_class(&self, tab: usize, class: &str, on: bool);

    /// Adds `class` to the tab's list item and removes it from its siblings.
    fn select_tab_item(&self, tab: usize, class: &str);

    fn scroll_position(&self) -> (f64, f64);

    fn scroll_to(&self, x: f64, y: f64);

    fn blur_link(&self, tab: usize);

    /// Runs one transition step on the section of `tab` and completes when
    /// it has finished.
    async fn animate(&self, tab: usize, step: &Step);

    /// Clears inline `height`/`overflow` left from an animation.
    fn clear_layout_overrides(&self, tab: usize);

    /// User-visible error notification.
    fn report_error(&self, message: &str);

    /// Completes on the next turn of the event loop.
    async fn next_tick(&self);

    fn spawn(&self, task: LocalBoxFuture<'static, ()>);

    fn layout_metrics(&self) -> LayoutMetrics;

    /// Natural heights of all sections; with `reset` previous `min-height`
    /// constraints are cleared first.
    fn section_heights(&self, reset: bool) -> Vec<f64>;

    fn set_min_height(&self, px: f64);
}
