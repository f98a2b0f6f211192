//! TabController - one instance per container.
//!
//! Отвечает за:
//! - выбор начальной вкладки и разметку состояний при инициализации
//! - обработку клика: hide -> select -> show, с колбэками
//! - команды activate / disable / enable
//! - синхронизацию с историей браузера и выравнивание высоты
//!
//! The switch itself is one `async` sequence spawned on the surface, so the
//! hide step always completes before the show step begins.

use crate::auto_height::{max_height, HeightWatch, Remeasure};
use crate::capabilities::Capabilities;
use crate::config::TabsConfig;
use crate::error::{Error, Result};
use crate::fx::Transition;
use crate::history::{History, HistoryHooks};
use crate::model::{Decision, Ignored, TabSet};
use crate::position::Position;
use crate::surface::Surface;
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Arguments of the `on_click` / `on_hide` / `on_show` callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabEvent {
    pub clicked: usize,
    pub to_show: usize,
    pub to_hide: Option<usize>,
}

type Callback = Box<dyn Fn(&TabEvent)>;

#[derive(Default)]
pub struct Callbacks {
    pub on_click: Option<Callback>,
    pub on_hide: Option<Callback>,
    pub on_show: Option<Callback>,
}

impl Callbacks {
    pub fn on_click(mut self, f: impl Fn(&TabEvent) + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn on_hide(mut self, f: impl Fn(&TabEvent) + 'static) -> Self {
        self.on_hide = Some(Box::new(f));
        self
    }

    pub fn on_show(mut self, f: impl Fn(&TabEvent) + 'static) -> Self {
        self.on_show = Some(Box::new(f));
        self
    }

    fn fire(callback: &Option<Callback>, event: &TabEvent) {
        if let Some(f) = callback {
            f(event);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickSource {
    User,
    Programmatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickResponse {
    /// Whether the browser's default navigation must be suppressed.
    pub prevent_default: bool,
    /// A switch was started.
    pub started: bool,
}

pub struct TabController<S: Surface> {
    surface: S,
    config: TabsConfig,
    transition: Transition,
    callbacks: Callbacks,
    history: Option<Rc<dyn History>>,
    capabilities: Capabilities,
    state: RefCell<TabSet>,
    heights: RefCell<Option<HeightWatch>>,
    /// Back/forward target that arrived while a switch was running.
    pending_navigation: RefCell<Option<usize>>,
}

impl<S: Surface + 'static> TabController<S> {
    pub fn init(
        surface: S,
        config: TabsConfig,
        callbacks: Callbacks,
        history: Option<Rc<dyn History>>,
        capabilities: Capabilities,
    ) -> Result<Rc<Self>> {
        let bookmarking = config.bookmarkable && history.is_some();
        if config.bookmarkable && !bookmarking {
            debug!("bookmarkable requested without a history service, fragment stays untouched");
        }

        let location = surface.location_fragment();
        let state = TabSet::new(
            surface.tab_fragments(),
            config.initial,
            location.as_deref(),
            &config.disabled,
        )?;
        let initial = state.selected();

        surface.hide_sections_except(initial, &config.hide_class);
        surface.set_section_hidden(initial, &config.hide_class, false);
        surface.select_tab_item(initial, &config.selected_class);
        for (i, tab) in state.tabs().iter().enumerate() {
            if tab.disabled {
                surface.set_tab_class(i, &config.disabled_class, true);
            }
        }

        let transition = Transition::from_config(&config, bookmarking);
        let tab_count = state.len();
        let controller = Rc::new(Self {
            surface,
            config,
            transition,
            callbacks,
            history,
            capabilities,
            state: RefCell::new(state),
            heights: RefCell::new(None),
            pending_navigation: RefCell::new(None),
        });

        if controller.config.fx_auto_height {
            controller.apply_auto_height(false);
            let metrics = controller.surface.layout_metrics();
            *controller.heights.borrow_mut() = Some(HeightWatch::new(metrics));
        }

        if bookmarking {
            controller.register_history(initial);
        }

        if location.is_some() && controller.capabilities.restores_scroll_on_load() {
            let this = controller.clone();
            controller.surface.spawn(Box::pin(async move {
                this.surface.next_tick().await;
                this.surface.scroll_to(0.0, 0.0);
            }));
        }

        info!(
            "tabs initialized: {} tabs, initial {}",
            tab_count,
            Position::from_index(initial).get()
        );
        Ok(controller)
    }

    fn register_history(self: &Rc<Self>, initial: usize) {
        let Some(history) = self.history.clone() else {
            return;
        };
        let fragments: Vec<String> = self
            .state
            .borrow()
            .tabs()
            .iter()
            .filter_map(|t| t.fragment.clone())
            .collect();

        let ready: Weak<Self> = Rc::downgrade(self);
        let navigate: Weak<Self> = Rc::downgrade(self);
        history.register(
            &fragments,
            HistoryHooks {
                on_ready: Box::new(move || {
                    if let Some(this) = ready.upgrade() {
                        this.click(initial, ClickSource::Programmatic);
                    }
                }),
                on_navigate: Box::new(move |fragment| {
                    if let Some(this) = navigate.upgrade() {
                        this.navigate_to(fragment.as_deref(), initial);
                    }
                }),
            },
        );
    }

    /// Fragment changed outside the widget; an empty fragment goes back to
    /// the initial tab.
    fn navigate_to(self: &Rc<Self>, fragment: Option<&str>, initial: usize) {
        let index = match fragment {
            Some(f) => match self.state.borrow().index_of_fragment(f) {
                Some(i) => i,
                None => return,
            },
            None => initial,
        };
        if self.in_flight() {
            debug!("navigation to tab {} deferred until the switch ends", index + 1);
            *self.pending_navigation.borrow_mut() = Some(index);
            return;
        }
        self.switch_by_command(index);
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> &TabsConfig {
        &self.config
    }

    pub fn tab_count(&self) -> usize {
        self.state.borrow().len()
    }

    pub fn selected(&self) -> Position {
        Position::from_index(self.state.borrow().selected())
    }

    /// Tab whose section is visible; `None` between the hide and show steps.
    pub fn shown(&self) -> Option<Position> {
        self.state.borrow().shown().map(Position::from_index)
    }

    pub fn is_disabled(&self, position: Position) -> bool {
        self.state.borrow().is_disabled(position.index())
    }

    pub fn in_flight(&self) -> bool {
        self.state.borrow().in_flight()
    }

    /// Bookmarking needs both the option and a history service.
    pub fn bookmarking(&self) -> bool {
        self.config.bookmarkable && self.history.is_some()
    }

    /// Handles a click on the link of tab `tab` (0-based).
    pub fn click(self: &Rc<Self>, tab: usize, source: ClickSource) -> ClickResponse {
        let scroll = self.surface.scroll_position();
        let decision = self.state.borrow().decide_click(tab);

        let started = match decision {
            Decision::Ignore(reason) => {
                debug!("click on tab {} ignored: {:?}", tab + 1, reason);
                false
            }
            Decision::Switch { to_show, to_hide } => self.start_switch(to_show, to_hide),
        };

        let this = self.clone();
        self.surface.spawn(Box::pin(async move {
            this.surface.next_tick().await;
            this.surface.scroll_to(scroll.0, scroll.1);
        }));
        if tab < self.tab_count() {
            self.surface.blur_link(tab);
        }

        ClickResponse {
            prevent_default: !(started && self.bookmarking() && source == ClickSource::User),
            started,
        }
    }

    fn start_switch(self: &Rc<Self>, to_show: usize, to_hide: Option<usize>) -> bool {
        if !self.surface.has_section(to_show) {
            let fragment = self
                .state
                .borrow()
                .tab(to_show)
                .and_then(|t| t.fragment.clone());
            warn!("tab {} points to a missing section {:?}", to_show + 1, fragment);
            let error = Error::MissingSection { fragment };
            self.surface.report_error(&error.to_string());
            return false;
        }

        self.state.borrow_mut().begin();
        let this = self.clone();
        self.surface
            .spawn(Box::pin(async move { this.run_switch(to_show, to_hide).await }));
        true
    }

    async fn run_switch(self: Rc<Self>, to_show: usize, to_hide: Option<usize>) {
        let event = TabEvent {
            clicked: to_show,
            to_show,
            to_hide,
        };
        let hide_class = self.config.hide_class.as_str();

        self.surface.next_tick().await;
        Callbacks::fire(&self.callbacks.on_click, &event);

        if let Some(hidden) = to_hide {
            self.surface.animate(hidden, &self.transition.hide).await;
            self.surface.set_section_hidden(hidden, hide_class, true);
            self.surface.clear_layout_overrides(hidden);
        }

        self.surface
            .select_tab_item(to_show, &self.config.selected_class);
        self.state.borrow_mut().commit_hidden(to_show);
        Callbacks::fire(&self.callbacks.on_hide, &event);

        self.surface.set_section_hidden(to_show, hide_class, false);
        self.surface.animate(to_show, &self.transition.show).await;
        self.surface.clear_layout_overrides(to_show);
        self.state.borrow_mut().commit_shown(to_show);
        Callbacks::fire(&self.callbacks.on_show, &event);

        let pending = self.pending_navigation.borrow_mut().take();
        if let Some(index) = pending {
            self.switch_by_command(index);
        }
    }

    /// Same as a click on the tab at `position`, unless its section is
    /// already visible or the tab is disabled. Returns whether a switch
    /// started.
    pub fn activate(self: &Rc<Self>, position: Position) -> bool {
        let index = position.index();
        let started = self.switch_by_command(index);
        if started && self.bookmarking() {
            let fragment = self.state.borrow().tab(index).and_then(|t| t.fragment.clone());
            if let (Some(history), Some(fragment)) = (&self.history, fragment) {
                history.update_fragment(&fragment);
            }
        }
        started
    }

    fn switch_by_command(self: &Rc<Self>, index: usize) -> bool {
        let decision = self.state.borrow().decide_activate(index);
        match decision {
            Decision::Ignore(Ignored::OutOfRange) => {
                debug!("no tab at position {}", index + 1);
                false
            }
            Decision::Ignore(reason) => {
                debug!("activate tab {} ignored: {:?}", index + 1, reason);
                false
            }
            Decision::Switch { .. } => self.click(index, ClickSource::Programmatic).started,
        }
    }

    pub fn disable(&self, position: Position) {
        self.set_disabled(position, true);
    }

    pub fn enable(&self, position: Position) {
        self.set_disabled(position, false);
    }

    fn set_disabled(&self, position: Position, disabled: bool) {
        let index = position.index();
        if self.state.borrow_mut().set_disabled(index, disabled) {
            self.surface
                .set_tab_class(index, &self.config.disabled_class, disabled);
        } else {
            debug!("no tab at position {}", position.get());
        }
    }

    /// One auto-height poll; no-op unless `fxAutoHeight` is on.
    pub fn poll_auto_height(&self) {
        let metrics = self.surface.layout_metrics();
        let remeasure = match self.heights.borrow_mut().as_mut() {
            Some(watch) => watch.observe(metrics),
            None => return,
        };
        if let Some(mode) = remeasure {
            self.apply_auto_height(mode == Remeasure::Reset);
        }
    }

    fn apply_auto_height(&self, reset: bool) {
        let heights = self.surface.section_heights(reset);
        if let Some(max) = max_height(&heights) {
            self.surface.set_min_height(max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auto_height::LayoutMetrics;
    use crate::fx::{Direction, Step};
    use futures::channel::oneshot;
    use futures::executor::{LocalPool, LocalSpawner};
    use futures::future::LocalBoxFuture;
    use futures::task::LocalSpawnExt;
    use std::cell::Cell;
    use std::collections::{BTreeSet, HashSet, VecDeque};

    type Log = Rc<RefCell<Vec<String>>>;

    struct FakeDom {
        spawner: LocalSpawner,
        log: Log,
        fragments: Vec<Option<String>>,
        missing: HashSet<usize>,
        location: Option<String>,
        hidden: RefCell<Vec<bool>>,
        items: RefCell<Vec<BTreeSet<String>>>,
        scroll: Cell<(f64, f64)>,
        errors: RefCell<Vec<String>>,
        gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
        heights: RefCell<Vec<f64>>,
        metrics: Cell<LayoutMetrics>,
        min_height: Cell<Option<f64>>,
        resets: Cell<usize>,
    }

    impl FakeDom {
        fn new(spawner: LocalSpawner, tabs: usize) -> Self {
            Self {
                spawner,
                log: Rc::new(RefCell::new(Vec::new())),
                fragments: (1..=tabs).map(|i| Some(format!("s{}", i))).collect(),
                missing: HashSet::new(),
                location: None,
                hidden: RefCell::new(vec![false; tabs]),
                items: RefCell::new(vec![BTreeSet::new(); tabs]),
                scroll: Cell::new((0.0, 0.0)),
                errors: RefCell::new(Vec::new()),
                gates: RefCell::new(VecDeque::new()),
                heights: RefCell::new(vec![100.0; tabs]),
                metrics: Cell::new(LayoutMetrics { width: 300.0, height: 200.0, font: 16.0 }),
                min_height: Cell::new(None),
                resets: Cell::new(0),
            }
        }

        fn visible(&self) -> Vec<usize> {
            let hidden = self.hidden.borrow();
            (0..hidden.len()).filter(|&i| !hidden[i]).collect()
        }

        fn with_class(&self, class: &str) -> Vec<usize> {
            let items = self.items.borrow();
            (0..items.len()).filter(|&i| items[i].contains(class)).collect()
        }

        /// Holds the next animation until the returned sender fires.
        fn gate(&self) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().push_back(rx);
            tx
        }

        fn push(&self, entry: String) {
            self.log.borrow_mut().push(entry);
        }
    }

    struct Fake(Rc<FakeDom>);

    impl Surface for Fake {
        fn tab_fragments(&self) -> Vec<Option<String>> {
            self.0.fragments.clone()
        }

        fn location_fragment(&self) -> Option<String> {
            self.0.location.clone()
        }

        fn has_section(&self, tab: usize) -> bool {
            !self.0.missing.contains(&tab)
        }

        fn hide_sections_except(&self, shown: usize, _hide_class: &str) {
            for (i, h) in self.0.hidden.borrow_mut().iter_mut().enumerate() {
                *h = i != shown;
            }
        }

        fn set_section_hidden(&self, tab: usize, _hide_class: &str, hidden: bool) {
            self.0.hidden.borrow_mut()[tab] = hidden;
        }

        fn set_tab_class(&self, tab: usize, class: &str, on: bool) {
            let mut items = self.0.items.borrow_mut();
            if on {
                items[tab].insert(class.to_string());
            } else {
                items[tab].remove(class);
            }
        }

        fn select_tab_item(&self, tab: usize, class: &str) {
            self.0.push(format!("select:{}", tab));
            for (i, item) in self.0.items.borrow_mut().iter_mut().enumerate() {
                if i == tab {
                    item.insert(class.to_string());
                } else {
                    item.remove(class);
                }
            }
        }

        fn scroll_position(&self) -> (f64, f64) {
            self.0.scroll.get()
        }

        fn scroll_to(&self, x: f64, y: f64) {
            self.0.scroll.set((x, y));
        }

        fn blur_link(&self, tab: usize) {
            self.0.push(format!("blur:{}", tab));
        }

        async fn animate(&self, tab: usize, step: &Step) {
            let dir = match step.direction {
                Direction::Show => "show",
                Direction::Hide => "hide",
            };
            self.0.push(format!("{}:{}", dir, tab));
            let gate = self.0.gates.borrow_mut().pop_front();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.0.push(format!("{}-done:{}", dir, tab));
        }

        fn clear_layout_overrides(&self, _tab: usize) {}

        fn report_error(&self, message: &str) {
            self.0.errors.borrow_mut().push(message.to_string());
        }

        async fn next_tick(&self) {}

        fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
            self.0.spawner.spawn_local(task).unwrap();
        }

        fn layout_metrics(&self) -> LayoutMetrics {
            self.0.metrics.get()
        }

        fn section_heights(&self, reset: bool) -> Vec<f64> {
            if reset {
                self.0.resets.set(self.0.resets.get() + 1);
            }
            self.0.heights.borrow().clone()
        }

        fn set_min_height(&self, px: f64) {
            self.0.min_height.set(Some(px));
        }
    }

    #[derive(Default)]
    struct FakeHistory {
        registered: RefCell<Vec<String>>,
        hooks: RefCell<Option<HistoryHooks>>,
        updates: RefCell<Vec<String>>,
    }

    impl History for FakeHistory {
        fn register(&self, fragments: &[String], hooks: HistoryHooks) {
            *self.registered.borrow_mut() = fragments.to_vec();
            *self.hooks.borrow_mut() = Some(hooks);
        }

        fn update_fragment(&self, fragment: &str) {
            self.updates.borrow_mut().push(fragment.to_string());
        }
    }

    struct Harness {
        pool: LocalPool,
        dom: Rc<FakeDom>,
        tabs: Rc<TabController<Fake>>,
    }

    fn setup_with(
        tabs: usize,
        config: TabsConfig,
        callbacks: Callbacks,
        history: Option<Rc<dyn History>>,
        tweak: impl FnOnce(&mut FakeDom),
    ) -> Harness {
        setup_on(Capabilities::modern(), tabs, config, callbacks, history, tweak)
    }

    fn setup_on(
        capabilities: Capabilities,
        tabs: usize,
        config: TabsConfig,
        callbacks: Callbacks,
        history: Option<Rc<dyn History>>,
        tweak: impl FnOnce(&mut FakeDom),
    ) -> Harness {
        let mut pool = LocalPool::new();
        let mut dom = FakeDom::new(pool.spawner(), tabs);
        tweak(&mut dom);
        let dom = Rc::new(dom);
        let tabs = TabController::init(
            Fake(dom.clone()),
            config,
            callbacks,
            history,
            capabilities,
        )
        .unwrap();
        pool.run_until_stalled();
        Harness { pool, dom, tabs }
    }

    fn setup(tabs: usize, config: TabsConfig) -> Harness {
        setup_with(tabs, config, Callbacks::default(), None, |_| {})
    }

    fn assert_single(h: &Harness, expected: usize) {
        assert_eq!(h.dom.visible(), vec![expected]);
        assert_eq!(h.dom.with_class("tabs-selected"), vec![expected]);
        assert_eq!(h.tabs.selected().index(), expected);
        assert_eq!(h.tabs.shown().map(|p| p.index()), Some(expected));
    }

    #[test]
    fn test_init_selects_initial_tab() {
        let h = setup(3, TabsConfig::starting_at(2));
        assert_single(&h, 1);
        assert_eq!(h.dom.hidden.borrow().clone(), vec![true, false, true]);
    }

    #[test]
    fn test_single_tab() {
        let h = setup(1, TabsConfig::default());
        assert_single(&h, 0);
    }

    #[test]
    fn test_location_fragment_overrides_initial() {
        let h = setup_with(3, TabsConfig::starting_at(1), Callbacks::default(), None, |dom| {
            dom.location = Some("s3".into());
        });
        assert_single(&h, 2);
    }

    #[test]
    fn test_no_tabs_is_an_error() {
        let pool = LocalPool::new();
        let dom = Rc::new(FakeDom::new(pool.spawner(), 0));
        let result = TabController::init(
            Fake(dom),
            TabsConfig::default(),
            Callbacks::default(),
            None,
            Capabilities::modern(),
        );
        assert!(matches!(result, Err(Error::NoTabs)));
    }

    #[test]
    fn test_click_switches_tab() {
        let mut h = setup(3, TabsConfig::default());
        let response = h.tabs.click(2, ClickSource::User);
        assert!(response.started);
        assert!(response.prevent_default);
        h.pool.run_until_stalled();
        assert_single(&h, 2);
        assert!(!h.tabs.in_flight());
    }

    #[test]
    fn test_click_selected_tab_is_noop() {
        let mut h = setup(3, TabsConfig::starting_at(2));
        let response = h.tabs.click(1, ClickSource::User);
        assert!(!response.started);
        h.pool.run_until_stalled();
        assert_single(&h, 1);
        assert!(!h.dom.log.borrow().iter().any(|e| e.starts_with("hide")));
    }

    #[test]
    fn test_disabled_tab_until_enabled() {
        let config = TabsConfig {
            disabled: vec![Position::from(2)],
            ..TabsConfig::default()
        };
        let mut h = setup(3, config);
        assert_eq!(h.dom.with_class("tabs-disabled"), vec![1]);

        assert!(!h.tabs.click(1, ClickSource::User).started);
        h.pool.run_until_stalled();
        assert_single(&h, 0);

        h.tabs.enable(Position::from(2));
        assert!(h.dom.with_class("tabs-disabled").is_empty());
        assert!(h.tabs.click(1, ClickSource::User).started);
        h.pool.run_until_stalled();
        assert_single(&h, 1);
    }

    #[test]
    fn test_disable_enable_keeps_selection() {
        let mut h = setup(3, TabsConfig::default());
        h.tabs.disable(Position::from(3));
        h.tabs.disable(Position::from(3));
        assert!(h.tabs.is_disabled(Position::from(3)));
        h.tabs.enable(Position::from(3));
        h.tabs.enable(Position::from(3));
        assert!(!h.tabs.is_disabled(Position::from(3)));
        assert_single(&h, 0);

        // out of range: nothing happens
        h.tabs.disable(Position::from(9));
        h.tabs.enable(Position::from(9));

        assert!(h.tabs.click(2, ClickSource::User).started);
        h.pool.run_until_stalled();
        assert_single(&h, 2);
    }

    #[test]
    fn test_missing_section_reports_error() {
        let mut h = setup_with(3, TabsConfig::default(), Callbacks::default(), None, |dom| {
            dom.missing.insert(1);
        });
        let response = h.tabs.click(1, ClickSource::User);
        assert!(!response.started);
        h.pool.run_until_stalled();
        assert_eq!(h.dom.errors.borrow().clone(), vec!["There is no such container.".to_string()]);
        assert_single(&h, 0);
        assert!(!h.tabs.in_flight());
    }

    #[test]
    fn test_callback_order() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let (a, b, c) = (log.clone(), log.clone(), log.clone());
        let callbacks = Callbacks::default()
            .on_click(move |e| a.borrow_mut().push(format!("onClick:{}:{:?}", e.to_show, e.to_hide)))
            .on_hide(move |e| b.borrow_mut().push(format!("onHide:{}", e.clicked)))
            .on_show(move |e| c.borrow_mut().push(format!("onShow:{}", e.clicked)));
        let shared = log.clone();
        let mut h = setup_with(3, TabsConfig::default(), callbacks, None, move |dom| {
            dom.log = shared;
        });

        h.tabs.click(1, ClickSource::User);
        h.pool.run_until_stalled();

        let entries: Vec<String> = log
            .borrow()
            .iter()
            .filter(|e| !e.starts_with("blur") && *e != "select:0")
            .cloned()
            .collect();
        assert_eq!(
            entries,
            vec![
                "onClick:1:Some(0)",
                "hide:0",
                "hide-done:0",
                "select:1",
                "onHide:1",
                "show:1",
                "show-done:1",
                "onShow:1",
            ]
        );
    }

    #[test]
    fn test_hide_completes_before_show() {
        let mut h = setup(3, TabsConfig::default());
        let release = h.dom.gate();
        h.tabs.click(2, ClickSource::User);
        h.pool.run_until_stalled();

        // hide is still running: old section visible, selection unchanged
        assert!(h.tabs.in_flight());
        assert_eq!(h.dom.visible(), vec![0]);
        assert_eq!(h.dom.with_class("tabs-selected"), vec![0]);
        assert!(!h.dom.log.borrow().iter().any(|e| e.starts_with("show")));

        // a second switch while in flight is ignored
        assert!(!h.tabs.click(1, ClickSource::User).started);
        assert!(!h.tabs.activate(Position::from(2)));

        release.send(()).unwrap();
        h.pool.run_until_stalled();
        assert_single(&h, 2);
    }

    #[test]
    fn test_scroll_restored_and_link_blurred() {
        let mut h = setup(3, TabsConfig::default());
        h.dom.scroll.set((10.0, 20.0));
        h.tabs.click(1, ClickSource::User);
        // the browser jumps to the fragment after the handler returns
        h.dom.scroll.set((0.0, 640.0));
        h.pool.run_until_stalled();
        assert_eq!(h.dom.scroll.get(), (10.0, 20.0));
        assert!(h.dom.log.borrow().contains(&"blur:1".to_string()));
    }

    #[test]
    fn test_activate() {
        let mut h = setup(3, TabsConfig::default());
        assert!(!h.tabs.activate(Position::FIRST));
        h.tabs.disable(Position::from(2));
        assert!(!h.tabs.activate(Position::from(2)));
        assert!(!h.tabs.activate(Position::from(7)));

        assert!(h.tabs.activate(Position::from(3)));
        h.pool.run_until_stalled();
        assert_single(&h, 2);
    }

    #[test]
    fn test_bookmarking_allows_default_navigation() {
        let history = Rc::new(FakeHistory::default());
        let config = TabsConfig {
            bookmarkable: true,
            ..TabsConfig::default()
        };
        let mut h = setup_with(3, config, Callbacks::default(), Some(history.clone()), |_| {});
        assert!(h.tabs.bookmarking());
        assert_eq!(history.registered.borrow().clone(), vec!["s1", "s2", "s3"]);

        let response = h.tabs.click(1, ClickSource::User);
        assert!(response.started && !response.prevent_default);
        h.pool.run_until_stalled();

        // nothing to do: navigation stays suppressed
        assert!(h.tabs.click(1, ClickSource::User).prevent_default);
        assert!(history.updates.borrow().is_empty());
    }

    #[test]
    fn test_bookmarkable_without_history_leaves_fragment() {
        let config = TabsConfig {
            bookmarkable: true,
            ..TabsConfig::default()
        };
        let h = setup(2, config);
        assert!(!h.tabs.bookmarking());
        assert!(h.tabs.click(1, ClickSource::User).prevent_default);
    }

    #[test]
    fn test_activate_updates_fragment_once() {
        let history = Rc::new(FakeHistory::default());
        let config = TabsConfig {
            bookmarkable: true,
            ..TabsConfig::default()
        };
        let mut h = setup_with(3, config, Callbacks::default(), Some(history.clone()), |_| {});
        assert!(h.tabs.activate(Position::from(2)));
        h.pool.run_until_stalled();
        assert!(!h.tabs.activate(Position::from(2)));
        assert_eq!(history.updates.borrow().clone(), vec!["s2"]);
        assert_single(&h, 1);
    }

    #[test]
    fn test_history_hooks() {
        let history = Rc::new(FakeHistory::default());
        let config = TabsConfig {
            bookmarkable: true,
            initial: Position::from(2),
            ..TabsConfig::default()
        };
        let mut h = setup_with(3, config, Callbacks::default(), Some(history.clone()), |_| {});
        let hooks = history.hooks.borrow_mut().take().unwrap();

        (hooks.on_ready)();
        h.pool.run_until_stalled();
        assert_single(&h, 1);

        (hooks.on_navigate)(Some("s3".into()));
        h.pool.run_until_stalled();
        assert_single(&h, 2);

        (hooks.on_navigate)(Some("unknown".into()));
        h.pool.run_until_stalled();
        assert_single(&h, 2);

        (hooks.on_navigate)(None);
        h.pool.run_until_stalled();
        assert_single(&h, 1);
        assert!(history.updates.borrow().is_empty());
    }

    #[test]
    fn test_navigation_during_switch_is_applied_after_it() {
        let history = Rc::new(FakeHistory::default());
        let config = TabsConfig {
            bookmarkable: true,
            ..TabsConfig::default()
        };
        let mut h = setup_with(3, config, Callbacks::default(), Some(history.clone()), |_| {});
        let hooks = history.hooks.borrow_mut().take().unwrap();

        let release = h.dom.gate();
        assert!(h.tabs.click(1, ClickSource::User).started);
        h.pool.run_until_stalled();
        assert!(h.tabs.in_flight());

        // back/forward lands on s3 while the hide step is still running
        (hooks.on_navigate)(Some("s3".into()));
        h.pool.run_until_stalled();
        assert!(h.tabs.in_flight());

        release.send(()).unwrap();
        h.pool.run_until_stalled();
        assert_single(&h, 2);
        assert!(!h.tabs.in_flight());
        assert!(history.updates.borrow().is_empty());
    }

    #[test]
    fn test_back_during_switch_returns_to_previous_tab() {
        let history = Rc::new(FakeHistory::default());
        let config = TabsConfig {
            bookmarkable: true,
            ..TabsConfig::default()
        };
        let mut h = setup_with(3, config, Callbacks::default(), Some(history.clone()), |_| {});
        let hooks = history.hooks.borrow_mut().take().unwrap();

        let release = h.dom.gate();
        h.tabs.click(1, ClickSource::User);
        h.pool.run_until_stalled();
        (hooks.on_navigate)(Some("s1".into()));

        release.send(()).unwrap();
        h.pool.run_until_stalled();
        assert_single(&h, 0);
    }

    const IE8: &str = "Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1; Trident/4.0)";

    #[test]
    fn test_legacy_engine_scrolls_to_top_after_init() {
        let h = setup_on(
            Capabilities::detect(IE8, false),
            3,
            TabsConfig::default(),
            Callbacks::default(),
            None,
            |dom| {
                dom.location = Some("s2".into());
                dom.scroll = Cell::new((0.0, 480.0));
            },
        );
        assert_single(&h, 1);
        assert_eq!(h.dom.scroll.get(), (0.0, 0.0));
    }

    #[test]
    fn test_modern_engine_keeps_scroll_after_init() {
        let h = setup_with(3, TabsConfig::default(), Callbacks::default(), None, |dom| {
            dom.location = Some("s2".into());
            dom.scroll = Cell::new((0.0, 480.0));
        });
        assert_single(&h, 1);
        assert_eq!(h.dom.scroll.get(), (0.0, 480.0));
    }

    #[test]
    fn test_auto_height() {
        let config = TabsConfig {
            fx_auto_height: true,
            ..TabsConfig::default()
        };
        let h = setup_with(3, config, Callbacks::default(), None, |dom| {
            *dom.heights.borrow_mut() = vec![80.0, 140.0, 60.0];
        });
        assert_eq!(h.dom.min_height.get(), Some(140.0));

        *h.dom.heights.borrow_mut() = vec![80.0, 90.0, 60.0];
        h.tabs.poll_auto_height();
        assert_eq!(h.dom.min_height.get(), Some(140.0));

        h.dom.metrics.set(LayoutMetrics { width: 500.0, height: 200.0, font: 16.0 });
        h.tabs.poll_auto_height();
        assert_eq!(h.dom.resets.get(), 1);
        assert_eq!(h.dom.min_height.get(), Some(90.0));
    }

    #[test]
    fn test_auto_height_off_by_default() {
        let h = setup(2, TabsConfig::default());
        h.dom.metrics.set(LayoutMetrics { width: 900.0, height: 900.0, font: 9.0 });
        h.tabs.poll_auto_height();
        assert_eq!(h.dom.min_height.get(), None);
    }
}
