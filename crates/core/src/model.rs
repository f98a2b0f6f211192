//! Tab state: which tab is selected, which section is shown, which tabs
//! are disabled and whether a transition is running.

use crate::error::{Error, Result};
use crate::position::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// Fragment the link points to (the section id).
    pub fragment: Option<String>,
    pub disabled: bool,
}

impl Tab {
    pub fn new(fragment: Option<String>) -> Self {
        Self {
            fragment,
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    OutOfRange,
    Disabled,
    AlreadySelected,
    AlreadyShown,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Ignore(Ignored),
    Switch { to_show: usize, to_hide: Option<usize> },
}

#[derive(Debug, Clone)]
pub struct TabSet {
    tabs: Vec<Tab>,
    selected: usize,
    shown: Option<usize>,
    in_flight: bool,
}

impl TabSet {
    /// Builds the state for freshly discovered tabs.
    ///
    /// A tab whose fragment matches `location` wins over `initial`;
    /// an out-of-range `initial` means the first tab. A disabled initial
    /// tab is replaced by the first enabled one.
    pub fn new(
        fragments: Vec<Option<String>>,
        initial: Position,
        location: Option<&str>,
        disabled: &[Position],
    ) -> Result<Self> {
        if fragments.is_empty() {
            return Err(Error::NoTabs);
        }

        let mut tabs: Vec<Tab> = fragments.into_iter().map(Tab::new).collect();
        for position in disabled {
            if let Some(tab) = tabs.get_mut(position.index()) {
                tab.disabled = true;
            }
        }

        let from_location = location.and_then(|hash| {
            tabs.iter()
                .position(|t| t.fragment.as_deref() == Some(hash))
        });
        let configured = if initial.index() < tabs.len() {
            initial.index()
        } else {
            0
        };
        let mut start = from_location.unwrap_or(configured);
        if tabs[start].disabled {
            if let Some(enabled) = tabs.iter().position(|t| !t.disabled) {
                start = enabled;
            }
        }

        Ok(Self {
            tabs,
            selected: start,
            shown: Some(start),
            in_flight: false,
        })
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn shown(&self) -> Option<usize> {
        self.shown
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_disabled(&self, index: usize) -> bool {
        self.tabs.get(index).map(|t| t.disabled).unwrap_or(false)
    }

    pub fn index_of_fragment(&self, fragment: &str) -> Option<usize> {
        self.tabs
            .iter()
            .position(|t| t.fragment.as_deref() == Some(fragment))
    }

    /// Returns `true` when the index exists. Repeated calls are harmless.
    pub fn set_disabled(&mut self, index: usize, disabled: bool) -> bool {
        match self.tabs.get_mut(index) {
            Some(tab) => {
                tab.disabled = disabled;
                true
            }
            None => false,
        }
    }

    /// What a click on `index` should do.
    pub fn decide_click(&self, index: usize) -> Decision {
        let Some(tab) = self.tabs.get(index) else {
            return Decision::Ignore(Ignored::OutOfRange);
        };
        if tab.disabled {
            return Decision::Ignore(Ignored::Disabled);
        }
        if self.selected == index {
            return Decision::Ignore(Ignored::AlreadySelected);
        }
        if self.in_flight {
            return Decision::Ignore(Ignored::Busy);
        }
        Decision::Switch {
            to_show: index,
            to_hide: self.shown,
        }
    }

    /// What an `activate(index)` command should do. Unlike a click it is
    /// keyed on the visible section, not the selected list item.
    pub fn decide_activate(&self, index: usize) -> Decision {
        if index >= self.tabs.len() {
            return Decision::Ignore(Ignored::OutOfRange);
        }
        if self.shown == Some(index) {
            return Decision::Ignore(Ignored::AlreadyShown);
        }
        if self.tabs[index].disabled {
            return Decision::Ignore(Ignored::Disabled);
        }
        self.decide_click(index)
    }

    pub fn begin(&mut self) {
        self.in_flight = true;
    }

    /// Hide step finished: selection moves, nothing is shown yet.
    pub fn commit_hidden(&mut self, selected: usize) {
        self.selected = selected;
        self.shown = None;
    }

    /// Show step finished.
    pub fn commit_shown(&mut self, shown: usize) {
        self.shown = Some(shown);
        self.in_flight = false;
    }
}
