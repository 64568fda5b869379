//! Editor-side selection of polymorphic field values.
//!
//! A [`SelectionController`] draws one row per field: a label (or foldout once
//! the bound instance has sub-fields), and a dropdown listing every variant of
//! the field's contract. Picking an entry replaces the field's value with a
//! fresh instance through the host's [`FieldBinding`] write protocol.
//!
//! Drawing goes through the host-supplied [`Painter`]; sub-fields of each
//! concrete variant are drawn by its registered [`VariantRenderer`].

pub mod binding;
pub mod command;
pub mod config;
pub mod controller;
mod error;
pub mod geometry;
pub mod menu;
pub mod notice;
pub mod paint;
pub mod recording;
pub mod render;

pub use binding::{FieldBinding, FieldId, MemoryField, StorageKind};
pub use command::{Choice, SelectionCommand};
pub use config::{ConfigError, DrawerConfig, Metrics};
pub use controller::{
	BindState, FieldState, Fold, SelectionController, SelectionControllerBuilder, UNREGISTERED_LABEL,
};
pub use error::{BindingError, SelectionError};
pub use geometry::Rect;
pub use menu::{Menu, MenuEntry, MenuItem};
pub use notice::{AutoDismiss, Level, Notice};
pub use paint::Painter;
pub use recording::{PaintCall, RecordingPainter};
pub use render::VariantRenderer;
