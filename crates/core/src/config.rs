//! Опции виджета.
//!
//! Field names follow the options object accepted from JS (`fxFade`,
//! `selectedClass`, ...). Every field has a default, so `{}` is a valid
//! configuration.

use crate::fx::{Animation, Speed};
use crate::position::Position;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SELECTED_CLASS: &str = "tabs-selected";
pub const DEFAULT_DISABLED_CLASS: &str = "tabs-disabled";
pub const DEFAULT_HIDE_CLASS: &str = "tabs-hide";
pub const DEFAULT_TAB_STRUCT: &str = "div";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabsConfig {
    /// Starting tab; a matching location fragment overrides it.
    pub initial: Position,
    /// Tabs disabled at startup.
    pub disabled: Vec<Position>,
    /// Keep the location fragment in sync with the active tab.
    pub bookmarkable: bool,

    pub fx_fade: bool,
    pub fx_slide: bool,
    pub fx_show: Option<Animation>,
    pub fx_hide: Option<Animation>,
    pub fx_speed: Speed,
    pub fx_show_speed: Option<Speed>,
    pub fx_hide_speed: Option<Speed>,
    /// Give all sections the height of the tallest one.
    pub fx_auto_height: bool,

    pub selected_class: String,
    pub disabled_class: String,
    pub hide_class: String,
    /// Selector of the content sections inside the container.
    pub tab_struct: String,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            initial: Position::FIRST,
            disabled: Vec::new(),
            bookmarkable: false,
            fx_fade: false,
            fx_slide: false,
            fx_show: None,
            fx_hide: None,
            fx_speed: Speed::Normal,
            fx_show_speed: None,
            fx_hide_speed: None,
            fx_auto_height: false,
            selected_class: DEFAULT_SELECTED_CLASS.to_string(),
            disabled_class: DEFAULT_DISABLED_CLASS.to_string(),
            hide_class: DEFAULT_HIDE_CLASS.to_string(),
            tab_struct: DEFAULT_TAB_STRUCT.to_string(),
        }
    }
}

impl TabsConfig {
    /// Default config starting at a given 1-based tab.
    pub fn starting_at(initial: u32) -> Self {
        Self {
            initial: Position::from_one_based(initial),
            ..Self::default()
        }
    }

    /// Selector for the sections as direct children of the container.
    pub fn section_selector(&self) -> String {
        self.tab_struct
            .split(',')
            .map(|s| format!(":scope > {}", s.trim()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
