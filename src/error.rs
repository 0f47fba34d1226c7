//! Error types.
//!
//! The tree distinguishes programming errors (invalid operations that
//! fail fast with a typed error) from navigation no-op conditions,
//! which silently return without state change and never appear here.

use thiserror::Error;

/// Invalid operations on the view tree. These are programming errors:
/// they are surfaced immediately and never patched over with a
/// best-effort value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ViewError {
    /// Bounds is derived from the frame and adornment thickness.
    #[error("bounds is derived state and cannot be set directly")]
    BoundsNotSettable,

    /// Adornments are not subviews; their superview is always `None`.
    #[error("an adornment cannot be given a superview")]
    AdornmentSuperView,

    /// A view has at most one parent and appears in a subview list at
    /// most once.
    #[error("view is already attached to a superview")]
    AlreadyAttached,
}
