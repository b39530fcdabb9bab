//! Shared helpers for rendering.

pub mod text;
pub mod ui;

pub use text::truncate_with_ellipsis;
pub use ui::{FieldLine, InputHint, PanelConfig, render_field_line, render_hints, render_panel};
