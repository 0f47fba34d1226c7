//! # weft-tui
//!
//! Composable view-tree core for terminal UIs.
//!
//! ## Architecture
//!
//! Views are indices into an explicitly owned [`ViewTree`] arena
//! rather than reference-counted objects. The tree gives every node a
//! parent-relative frame, an ordered subview list, a tab-traversal
//! order, and a root-to-leaf focus chain; adornments decorate a view
//! from outside its content area; the text formatter negotiates
//! content size with the view when a size-to-text policy is active.
//!
//! The rendering pipeline is pull-based:
//! ```text
//! input pump → Navigator → ViewTree (focus, dirty marks)
//!                              ↓
//!             Adornment/TextFormatter → Surface → terminal
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Point, Rect, Thickness, Rgba, BorderStyle, ...)
//! - [`view`] - The view-tree arena: geometry, hierarchy, focus
//! - [`adornment`] - Borders/margins attached outside a view's bounds
//! - [`text`] - Text formatting, measurement, word wrap
//! - [`canvas`] - Line compositing with corner/junction resolution
//! - [`navigation`] - Directional focus traversal and overlapped windows
//! - [`surface`] - The paint boundary: test capture and crossterm backend

pub mod adornment;
pub mod canvas;
pub mod error;
pub mod navigation;
pub mod surface;
pub mod text;
pub mod types;
pub mod view;

// Re-export commonly used items
pub use types::*;

pub use view::{NavigationDirection, ViewEvent, ViewId, ViewTree};

pub use adornment::Adornment;

pub use text::{string_width, wrap_line, Alignment, TextDirection, TextFormatter};

pub use canvas::{LineCanvas, Orientation, StraightLine};

pub use navigation::{advance_with_wrap, deepest_focused, Navigator, OverlappedStack};

pub use surface::{Surface, TerminalSurface, TestSurface};

pub use error::ViewError;
