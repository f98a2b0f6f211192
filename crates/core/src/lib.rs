//! Tabbed-interface behavior, independent of the DOM.
//!
//! Содержит:
//! - `config` - опции виджета и их значения по умолчанию
//! - `model` - состояние вкладок (выбранная, показанная, отключённые)
//! - `fx` - выбор и расчёт анимаций показа/скрытия
//! - `controller` - последовательность обработки клика и команд
//!
//! The browser binding lives in `tabkit-frontend`; everything here runs
//! against the [`Surface`] trait so it can be exercised natively.

pub mod auto_height;
pub mod capabilities;
pub mod config;
pub mod controller;
pub mod error;
pub mod fragment;
pub mod fx;
pub mod history;
pub mod model;
pub mod position;
pub mod surface;

pub use capabilities::{Capabilities, Engine, FragmentUpdate};
pub use config::TabsConfig;
pub use controller::{Callbacks, ClickResponse, ClickSource, TabController, TabEvent};
pub use error::{Error, Result};
pub use history::{History, HistoryHooks};
pub use position::Position;
pub use surface::Surface;
