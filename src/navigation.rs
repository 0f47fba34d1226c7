//! Focus navigation engine.
//!
//! [`Navigator`] is the explicitly passed navigation context: which
//! root is currently navigable, which root is the application top, and
//! the optional z-ordered stack of overlapped windows. Nothing here is
//! ambient state - tests build as many independent navigators and
//! trees as they need.
//!
//! The input pump drives exactly four entry points: [`Navigator::move_next`],
//! [`Navigator::move_previous`], [`Navigator::move_next_or_top`] and
//! [`Navigator::move_previous_or_top`], plus the read-only
//! [`deepest_focused`] query.

use tracing::debug;

use crate::view::{NavigationDirection, ViewId, ViewTree};

// =============================================================================
// Queries
// =============================================================================

/// Descend through the chain of focused children and return the
/// terminal view. `None` input, or a view that does not itself hold
/// focus, yields `None`. Pure query, no mutation.
pub fn deepest_focused(tree: &ViewTree, view: Option<ViewId>) -> Option<ViewId> {
    let v = view?;
    if !tree.has_focus(v) {
        return None;
    }
    let mut cur = v;
    while let Some(f) = tree.focused(cur) {
        if !tree.has_focus(f) {
            break;
        }
        cur = f;
    }
    Some(cur)
}

// =============================================================================
// Wraparound advance
// =============================================================================

/// Advance focus among `ordered` siblings of `current`, wrapping to
/// the first element when no sibling accepts focus.
///
/// `current` must appear in `ordered`; if it does not (the caller may
/// hold a stale snapshot), or the list is empty, or `current` has no
/// superview, this is a silent no-op. The wraparound is what
/// guarantees navigation never gets stuck at a boundary.
pub fn advance_with_wrap(
    tree: &mut ViewTree,
    ordered: &[ViewId],
    direction: NavigationDirection,
    current: ViewId,
) {
    if ordered.is_empty() || !ordered.contains(&current) {
        return;
    }
    let Some(superview) = tree.superview(current) else {
        return;
    };

    tree.advance_focus(superview, direction);

    match tree.focused(superview) {
        Some(f) if f != current => {
            // A sibling accepted focus.
        }
        _ => {
            debug!(target: "weft_tui::nav", "no sibling accepted focus; wrapping to first");
            tree.set_focus(ordered[0]);
        }
    }
}

// =============================================================================
// Overlapped stack
// =============================================================================

/// Z-ordered top-level roots for overlapped-window mode. The front of
/// the list is the interactive top.
#[derive(Debug, Default)]
pub struct OverlappedStack {
    roots: Vec<ViewId>,
}

impl OverlappedStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root at the top of the z-order.
    pub fn push(&mut self, root: ViewId) {
        self.roots.retain(|&r| r != root);
        self.roots.insert(0, root);
    }

    /// Remove a root from the stack entirely.
    pub fn remove(&mut self, root: ViewId) {
        self.roots.retain(|&r| r != root);
    }

    /// The interactive top of the z-order.
    pub fn top(&self) -> Option<ViewId> {
        self.roots.first().copied()
    }

    /// Roots in z-order, top first.
    pub fn roots(&self) -> &[ViewId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Send the top to the back; the next root becomes top.
    fn rotate_next(&mut self) -> Option<ViewId> {
        if self.roots.len() > 1 {
            let top = self.roots.remove(0);
            self.roots.push(top);
        }
        self.top()
    }

    /// Bring the back to the front; it becomes top.
    fn rotate_previous(&mut self) -> Option<ViewId> {
        if self.roots.len() > 1 {
            if let Some(back) = self.roots.pop() {
                self.roots.insert(0, back);
            }
        }
        self.top()
    }
}

// =============================================================================
// Navigator
// =============================================================================

/// The navigation context: current root, top-level root, and the
/// optional overlapped-window stack.
#[derive(Debug, Default)]
pub struct Navigator {
    current: Option<ViewId>,
    top: Option<ViewId>,
    overlapped: Option<OverlappedStack>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A navigator whose current and top-level root are both `root`.
    pub fn with_root(root: ViewId) -> Self {
        Self {
            current: Some(root),
            top: Some(root),
            overlapped: None,
        }
    }

    pub fn current(&self) -> Option<ViewId> {
        self.current
    }

    pub fn set_current(&mut self, root: Option<ViewId>) {
        self.current = root;
    }

    pub fn top(&self) -> Option<ViewId> {
        self.top
    }

    pub fn set_top(&mut self, root: Option<ViewId>) {
        self.top = root;
    }

    /// Enable overlapped-window mode. The stack's top becomes the
    /// current root.
    pub fn set_overlapped(&mut self, stack: Option<OverlappedStack>) {
        if let Some(stack) = &stack {
            if let Some(top) = stack.top() {
                self.current = Some(top);
            }
        }
        self.overlapped = stack;
    }

    pub fn overlapped(&self) -> Option<&OverlappedStack> {
        self.overlapped.as_ref()
    }

    pub fn overlapped_mut(&mut self) -> Option<&mut OverlappedStack> {
        self.overlapped.as_mut()
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Move focus to the next view under the current root.
    pub fn move_next(&mut self, tree: &mut ViewTree) {
        if let Some(current) = self.current {
            self.move_focus_on(tree, current, NavigationDirection::Forward);
        }
    }

    /// Move focus to the previous view under the current root.
    pub fn move_previous(&mut self, tree: &mut ViewTree) {
        if let Some(current) = self.current {
            self.move_focus_on(tree, current, NavigationDirection::Backward);
        }
    }

    /// Like [`move_next`](Self::move_next), but against the modal root
    /// if one is active, else the top-level root; with an overlapped
    /// stack active, delegates entirely to stack rotation.
    pub fn move_next_or_top(&mut self, tree: &mut ViewTree) {
        self.move_or_top(tree, NavigationDirection::Forward);
    }

    /// Backward counterpart of [`move_next_or_top`](Self::move_next_or_top).
    pub fn move_previous_or_top(&mut self, tree: &mut ViewTree) {
        self.move_or_top(tree, NavigationDirection::Backward);
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn move_focus_on(&mut self, tree: &mut ViewTree, root: ViewId, direction: NavigationDirection) {
        let old = deepest_focused(tree, tree.focused(root));

        if !tree.advance_focus(root, direction) {
            // The first attempt may fail while establishing an initial
            // focus; a second failure is a terminal no-op for this call.
            tree.advance_focus(root, direction);
        }

        let focused = tree.focused(root);
        let grandchild = focused.and_then(|f| tree.focused(f));
        if old != focused && old != grandchild {
            // Minimal repaint: exactly the two affected regions.
            if let Some(o) = old {
                tree.set_needs_display(o);
            }
            if let Some(f) = focused {
                tree.set_needs_display(f);
            }
            debug!(target: "weft_tui::nav", ?old, ?focused, "focus moved");
        } else {
            let ordered: Vec<ViewId> = match tree.superview(root) {
                Some(sv) => tree.tab_indexes(sv).to_vec(),
                None => return,
            };
            let ordered: Vec<ViewId> = match direction {
                NavigationDirection::Forward => ordered,
                NavigationDirection::Backward => ordered.into_iter().rev().collect(),
            };
            advance_with_wrap(tree, &ordered, direction, root);
        }
    }

    fn move_or_top(&mut self, tree: &mut ViewTree, direction: NavigationDirection) {
        if self.overlapped.is_some() {
            self.rotate_overlapped(tree, direction);
            return;
        }

        let Some(current) = self.current else {
            return;
        };
        let root = if tree.modal(current) {
            current
        } else {
            self.top.unwrap_or(current)
        };
        self.move_focus_on(tree, root, direction);
    }

    /// Rotate the overlapped z-order and give the new top focus.
    /// Suppressed while the current root is modal.
    fn rotate_overlapped(&mut self, tree: &mut ViewTree, direction: NavigationDirection) {
        if let Some(cur) = self.current {
            if tree.is_alive(cur) && tree.modal(cur) {
                return;
            }
        }
        let Some(stack) = self.overlapped.as_mut() else {
            return;
        };
        let new_top = match direction {
            NavigationDirection::Forward => stack.rotate_next(),
            NavigationDirection::Backward => stack.rotate_previous(),
        };
        let Some(top) = new_top else {
            return;
        };

        if let Some(prev) = self.current {
            if prev != top && tree.is_alive(prev) {
                tree.set_needs_display(prev);
            }
        }
        self.current = Some(top);

        if !tree.has_focus(top) || tree.focused(top).is_none() {
            tree.focus_deepest(top, NavigationDirection::Forward);
        }
        tree.set_needs_display(top);
        debug!(target: "weft_tui::nav", ?top, "overlapped rotation");
    }
}

// =============================================================================
// Tests
// =============================================================================
