//! Genscape Scape editor core.
//!
//! Pure domain logic for composing Scapes out of widgets: the widget model
//! and its hierarchy ranking, the ordered widget collection, grid layout,
//! the Scape aggregate, and save/publish validation. No I/O lives here.

pub mod collection;
pub mod error;
pub mod hierarchy;
pub mod layout;
pub mod registry;
pub mod scape;
pub mod types;
pub mod validation;
pub mod widget;

pub use collection::WidgetCollection;
pub use error::CoreError;
pub use scape::{Scape, Visibility};
pub use widget::{Channel, Widget, WidgetKind, WidgetPatch, WidgetSize};
