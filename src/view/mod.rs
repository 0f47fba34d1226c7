//! The view tree.
//!
//! Views are nodes in a rooted, ordered tree owned by a [`ViewTree`]
//! arena. Components hold [`ViewId`] indices rather than references:
//! the arena owns every node, children are owned by containment, and
//! the parent back-reference is a non-owning id used only for upward
//! traversal and coordinate resolution.
//!
//! The tree is a plain value passed explicitly - tests build as many
//! independent trees as they like with no shared state.
//!
//! # Focus
//!
//! Focus is a root-to-leaf chain: `has_focus` on a view implies
//! `has_focus` on its parent, and `focused` points at the single child
//! carrying the chain downward. [`ViewTree::advance_focus`] is the
//! uniform capability every node exposes for directional traversal
//! among its tab-indexed children.

use tracing::{debug, trace};

use crate::adornment::Adornment;
use crate::error::ViewError;
use crate::text::TextFormatter;
use crate::types::{ColorScheme, Point, Rect, Size, SizeToText, Thickness};

mod text;

// =============================================================================
// Ids, events, direction
// =============================================================================

/// Index of a view in its [`ViewTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub(crate) usize);

/// Traversal-order selector for focus navigation. Carries no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    Forward,
    Backward,
}

/// Notifications queued by tree mutations and drained by the host.
///
/// Draining after the operation completes means a handler can issue a
/// fresh navigation request but can never re-enter a traversal that is
/// still in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// A view stopped being part of the focus chain.
    FocusLeft { view: ViewId },
    /// A view became part of the focus chain.
    FocusEntered { view: ViewId },
    /// A view's text was replaced.
    TextChanged { view: ViewId },
}

// =============================================================================
// View node
// =============================================================================

/// One node: local geometry, children, traversal order, focus state,
/// adornments, text.
#[derive(Debug, Default)]
pub struct View {
    frame: Rect,
    superview: Option<ViewId>,
    subviews: Vec<ViewId>,
    tab_indexes: Vec<ViewId>,
    can_focus: bool,
    visible: bool,
    enabled: bool,
    has_focus: bool,
    focused: Option<ViewId>,
    adornments: Vec<Adornment>,
    title: String,
    modal: bool,
    color_scheme: Option<ColorScheme>,
    needs_display: bool,
    pub(crate) formatter: TextFormatter,
    pub(crate) size_to_text: SizeToText,
    pub(crate) content_size: Option<Size>,
}

impl View {
    fn new(frame: Rect) -> Self {
        Self {
            frame,
            visible: true,
            enabled: true,
            formatter: TextFormatter::new(),
            ..Self::default()
        }
    }
}

// =============================================================================
// ViewTree
// =============================================================================

/// Arena owning all views of one tree (or forest of top-level roots).
///
/// Released indices go back to a free pool for reuse, so ids are only
/// valid until their view is released.
#[derive(Debug)]
pub struct ViewTree {
    nodes: Vec<Option<View>>,
    free: Vec<usize>,
    screen: Size,
    events: Vec<ViewEvent>,
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTree {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            screen: Size::new(80, 25),
            events: Vec::new(),
        }
    }

    /// The hosting terminal's dimensions, used as the probe bound for
    /// size-to-text resolution.
    pub fn screen_size(&self) -> Size {
        self.screen
    }

    pub fn set_screen_size(&mut self, size: Size) {
        self.screen = size;
    }

    fn node(&self, id: ViewId) -> &View {
        self.nodes[id.0].as_ref().expect("view id outlived its view")
    }

    fn node_mut(&mut self, id: ViewId) -> &mut View {
        self.nodes[id.0].as_mut().expect("view id outlived its view")
    }

    /// Allocate a view with the given local frame.
    pub fn create_view(&mut self, frame: Rect) -> ViewId {
        let view = View::new(frame);
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(view);
                ViewId(index)
            }
            None => {
                self.nodes.push(Some(view));
                ViewId(self.nodes.len() - 1)
            }
        }
    }

    /// Release a view and, recursively, its whole subtree. Detaches it
    /// from its superview first.
    pub fn release(&mut self, id: ViewId) {
        if let Some(parent) = self.node(id).superview {
            self.detach(parent, id);
        }
        self.release_subtree(id);
    }

    fn release_subtree(&mut self, id: ViewId) {
        let children = self.node(id).subviews.clone();
        for child in children {
            self.release_subtree(child);
        }
        self.nodes[id.0] = None;
        self.free.push(id.0);
    }

    /// Whether `id` currently names a live view.
    pub fn is_alive(&self, id: ViewId) -> bool {
        self.nodes.get(id.0).is_some_and(|n| n.is_some())
    }

    /// Number of live views.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain queued notifications.
    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: ViewEvent) {
        self.events.push(event);
    }

    // =========================================================================
    // Hierarchy
    // =========================================================================

    /// Append `child` to `parent`'s subviews and traversal order.
    ///
    /// A view has at most one parent and appears in a subview list at
    /// most once; violating either is an error.
    pub fn add_subview(&mut self, parent: ViewId, child: ViewId) -> Result<(), ViewError> {
        if self.node(child).superview.is_some() {
            return Err(ViewError::AlreadyAttached);
        }
        self.node_mut(parent).subviews.push(child);
        self.node_mut(parent).tab_indexes.push(child);
        self.node_mut(child).superview = Some(parent);
        Ok(())
    }

    /// Remove `child` from `parent`'s subviews, destroying the child's
    /// subtree - a parent owns its children by containment. Unknown
    /// pairs are a silent no-op.
    pub fn remove_subview(&mut self, parent: ViewId, child: ViewId) {
        if self.node(child).superview != Some(parent) {
            return;
        }
        self.detach(parent, child);
        self.release_subtree(child);
    }

    fn detach(&mut self, parent: ViewId, child: ViewId) {
        if self.node(child).has_focus {
            self.unfocus(child);
        }
        let p = self.node_mut(parent);
        p.subviews.retain(|&c| c != child);
        p.tab_indexes.retain(|&c| c != child);
        if p.focused == Some(child) {
            p.focused = None;
        }
        self.node_mut(child).superview = None;
    }

    pub fn superview(&self, id: ViewId) -> Option<ViewId> {
        self.node(id).superview
    }

    pub fn subviews(&self, id: ViewId) -> &[ViewId] {
        &self.node(id).subviews
    }

    pub fn tab_indexes(&self, id: ViewId) -> &[ViewId] {
        &self.node(id).tab_indexes
    }

    /// Replace the traversal order. Entries that are not subviews of
    /// `id` are dropped; omitting a subview removes it from traversal.
    pub fn set_tab_indexes(&mut self, id: ViewId, order: Vec<ViewId>) {
        let subviews = self.node(id).subviews.clone();
        let mut seen = Vec::with_capacity(order.len());
        for v in order {
            if subviews.contains(&v) && !seen.contains(&v) {
                seen.push(v);
            }
        }
        self.node_mut(id).tab_indexes = seen;
    }

    // =========================================================================
    // Plain attributes
    // =========================================================================

    pub fn frame(&self, id: ViewId) -> Rect {
        self.node(id).frame
    }

    pub fn set_frame(&mut self, id: ViewId, frame: Rect) {
        let node = self.node_mut(id);
        if node.frame != frame {
            node.frame = frame;
            node.content_size = None;
            node.formatter.set_needs_format();
            node.needs_display = true;
        }
    }

    pub fn title(&self, id: ViewId) -> &str {
        &self.node(id).title
    }

    pub fn set_title(&mut self, id: ViewId, title: impl Into<String>) {
        let node = self.node_mut(id);
        node.title = title.into();
        node.needs_display = true;
    }

    pub fn visible(&self, id: ViewId) -> bool {
        self.node(id).visible
    }

    pub fn set_visible(&mut self, id: ViewId, visible: bool) {
        self.node_mut(id).visible = visible;
    }

    pub fn enabled(&self, id: ViewId) -> bool {
        self.node(id).enabled
    }

    pub fn set_enabled(&mut self, id: ViewId, enabled: bool) {
        self.node_mut(id).enabled = enabled;
    }

    pub fn can_focus(&self, id: ViewId) -> bool {
        self.node(id).can_focus
    }

    pub fn set_can_focus(&mut self, id: ViewId, can_focus: bool) {
        self.node_mut(id).can_focus = can_focus;
    }

    pub fn modal(&self, id: ViewId) -> bool {
        self.node(id).modal
    }

    pub fn set_modal(&mut self, id: ViewId, modal: bool) {
        self.node_mut(id).modal = modal;
    }

    pub fn has_focus(&self, id: ViewId) -> bool {
        self.node(id).has_focus
    }

    /// The child currently carrying the focus chain, if any.
    pub fn focused(&self, id: ViewId) -> Option<ViewId> {
        self.node(id).focused
    }

    pub fn needs_display(&self, id: ViewId) -> bool {
        self.node(id).needs_display
    }

    pub fn set_needs_display(&mut self, id: ViewId) {
        self.node_mut(id).needs_display = true;
    }

    pub fn clear_needs_display(&mut self, id: ViewId) {
        self.node_mut(id).needs_display = false;
    }

    /// The scheme set on this view, or the nearest ancestor's, or the
    /// crate default.
    pub fn color_scheme(&self, id: ViewId) -> ColorScheme {
        let mut cur = Some(id);
        while let Some(v) = cur {
            if let Some(scheme) = self.node(v).color_scheme {
                return scheme;
            }
            cur = self.node(v).superview;
        }
        ColorScheme::default()
    }

    pub fn set_color_scheme(&mut self, id: ViewId, scheme: Option<ColorScheme>) {
        self.node_mut(id).color_scheme = scheme;
    }

    // =========================================================================
    // Adornments and bounds
    // =========================================================================

    /// Attach an adornment; the adornment's parent link is set to `id`.
    pub fn add_adornment(&mut self, id: ViewId, mut adornment: Adornment) {
        adornment.attach(id);
        let node = self.node_mut(id);
        node.adornments.push(adornment);
        node.needs_display = true;
    }

    pub fn adornments(&self, id: ViewId) -> &[Adornment] {
        &self.node(id).adornments
    }

    pub fn adornments_mut(&mut self, id: ViewId) -> &mut [Adornment] {
        &mut self.node_mut(id).adornments
    }

    /// Combined thickness of every attached adornment.
    pub fn total_thickness(&self, id: ViewId) -> Thickness {
        self.node(id)
            .adornments
            .iter()
            .fold(Thickness::default(), |acc, a| acc.add(a.thickness))
    }

    /// The content rectangle: frame size reduced by adornment
    /// thickness, anchored at (0,0). Derived state.
    pub fn bounds(&self, id: ViewId) -> Rect {
        let size = self.node(id).frame.size();
        let thickness = self.total_thickness(id);
        let inner = thickness.inner_rect(Rect::from_parts(Point::new(0, 0), size));
        Rect::new(0, 0, inner.width, inner.height)
    }

    /// Bounds is derived from the frame and adornment thickness;
    /// setting it directly always fails.
    pub fn set_bounds(&mut self, _id: ViewId, _bounds: Rect) -> Result<(), ViewError> {
        Err(ViewError::BoundsNotSettable)
    }

    // =========================================================================
    // Coordinate transforms
    // =========================================================================

    /// Map a view-local point to screen coordinates by adding local
    /// frame origins up the superview chain.
    pub fn view_to_screen(&self, id: ViewId, p: Point) -> Point {
        let node = self.node(id);
        let p = p.offset(node.frame.x, node.frame.y);
        match node.superview {
            Some(parent) => self.view_to_screen(parent, p),
            None => p,
        }
    }

    /// Map a content (bounds-relative) point to screen coordinates,
    /// accounting for adornment thickness.
    pub fn content_to_screen(&self, id: ViewId, p: Point) -> Point {
        let t = self.total_thickness(id);
        self.view_to_screen(id, p.offset(t.left, t.top))
    }

    /// The view's frame in screen coordinates.
    pub fn screen_rect(&self, id: ViewId) -> Rect {
        Rect::from_parts(self.view_to_screen(id, Point::new(0, 0)), self.node(id).frame.size())
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Focus eligibility: the view itself accepts focus and is both
    /// visible and enabled.
    pub fn is_navigable(&self, id: ViewId) -> bool {
        let node = self.node(id);
        node.can_focus && node.visible && node.enabled
    }

    /// Give `id` the focus, establishing the chain from its root and
    /// unfocusing whatever branch held it before. Returns false when
    /// the view is not navigable.
    pub fn set_focus(&mut self, id: ViewId) -> bool {
        if !self.is_navigable(id) {
            return false;
        }

        let mut chain = vec![id];
        let mut cur = id;
        while let Some(parent) = self.node(cur).superview {
            chain.push(parent);
            cur = parent;
        }
        chain.reverse();

        for i in 0..chain.len() {
            let view = chain[i];
            if let Some(&child) = chain.get(i + 1) {
                let prev = self.node(view).focused;
                if prev != Some(child) {
                    if let Some(old) = prev {
                        self.unfocus(old);
                    }
                    self.node_mut(view).focused = Some(child);
                }
            }
            if !self.node(view).has_focus {
                self.node_mut(view).has_focus = true;
                self.node_mut(view).needs_display = true;
                self.push_event(ViewEvent::FocusEntered { view });
            }
        }

        trace!(target: "weft_tui::focus", ?id, "focus set");
        true
    }

    /// Clear `has_focus` down the subtree rooted at `id`.
    fn unfocus(&mut self, id: ViewId) {
        let node = self.node_mut(id);
        if node.has_focus {
            node.has_focus = false;
            node.needs_display = true;
            self.push_event(ViewEvent::FocusLeft { view: id });
        }
        if let Some(child) = self.node_mut(id).focused.take() {
            self.unfocus(child);
        }
    }

    /// Focus the deepest navigable descendant of `id`, taking the
    /// first child in traversal order for Forward and the last for
    /// Backward.
    pub fn focus_deepest(&mut self, id: ViewId, direction: NavigationDirection) -> bool {
        let mut target = id;
        loop {
            let kids: Vec<ViewId> = self
                .node(target)
                .tab_indexes
                .clone()
                .into_iter()
                .filter(|&c| self.is_navigable(c))
                .collect();
            let next = match direction {
                NavigationDirection::Forward => kids.first().copied(),
                NavigationDirection::Backward => kids.last().copied(),
            };
            match next {
                Some(n) => target = n,
                None => break,
            }
        }
        self.set_focus(target)
    }

    /// Advance focus among this view's tab-indexed children.
    ///
    /// Descends into the focused child first, so traversal walks
    /// nested containers before moving between siblings. Reports
    /// `false` either when there is nothing navigable (state is left
    /// untouched) or when the scan ran off the end of the order - in
    /// the latter case `focused` is cleared so that a repeated call
    /// establishes focus from the start again, which is what produces
    /// wraparound within a root.
    pub fn advance_focus(&mut self, id: ViewId, direction: NavigationDirection) -> bool {
        if let Some(f) = self.node(id).focused {
            if self.advance_focus(f, direction) {
                return true;
            }
        }

        let navigable: Vec<ViewId> = self
            .node(id)
            .tab_indexes
            .clone()
            .into_iter()
            .filter(|&c| self.is_navigable(c))
            .collect();
        if navigable.is_empty() {
            return false;
        }

        let focused = self.node(id).focused;
        let pos = focused.and_then(|f| navigable.iter().position(|&c| c == f));
        let next = match (direction, pos) {
            (NavigationDirection::Forward, None) => navigable.first().copied(),
            (NavigationDirection::Forward, Some(p)) => navigable.get(p + 1).copied(),
            (NavigationDirection::Backward, None) => navigable.last().copied(),
            (NavigationDirection::Backward, Some(0)) => None,
            (NavigationDirection::Backward, Some(p)) => navigable.get(p - 1).copied(),
        };

        match next {
            Some(n) => self.focus_deepest(n, direction),
            None => {
                debug!(target: "weft_tui::focus", ?id, "advance ran off the end; relinquishing");
                if let Some(f) = focused {
                    self.unfocus(f);
                    self.node_mut(id).focused = None;
                }
                false
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BorderStyle;

    fn tree_with_children(n: usize) -> (ViewTree, ViewId, Vec<ViewId>) {
        let mut tree = ViewTree::new();
        let root = tree.create_view(Rect::new(0, 0, 30, 10));
        let mut kids = Vec::new();
        for i in 0..n {
            let child = tree.create_view(Rect::new(i as i32 * 3, 0, 3, 1));
            tree.set_can_focus(child, true);
            tree.add_subview(root, child).unwrap();
            kids.push(child);
        }
        (tree, root, kids)
    }

    #[test]
    fn test_add_subview_rejects_second_parent() {
        let mut tree = ViewTree::new();
        let a = tree.create_view(Rect::new(0, 0, 5, 5));
        let b = tree.create_view(Rect::new(0, 0, 5, 5));
        let child = tree.create_view(Rect::new(0, 0, 1, 1));

        tree.add_subview(a, child).unwrap();
        assert_eq!(
            tree.add_subview(b, child),
            Err(ViewError::AlreadyAttached)
        );
        assert_eq!(tree.superview(child), Some(a));
    }

    #[test]
    fn test_release_removes_subtree() {
        let (mut tree, root, kids) = tree_with_children(3);
        assert_eq!(tree.len(), 4);

        tree.release(kids[1]);
        assert_eq!(tree.len(), 3);
        assert!(!tree.is_alive(kids[1]));
        assert_eq!(tree.subviews(root), &[kids[0], kids[2]]);

        tree.release(root);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_view_to_screen_adds_ancestor_origins() {
        let mut tree = ViewTree::new();
        let root = tree.create_view(Rect::new(2, 1, 40, 20));
        let mid = tree.create_view(Rect::new(3, 2, 20, 10));
        let leaf = tree.create_view(Rect::new(1, 1, 5, 5));
        tree.add_subview(root, mid).unwrap();
        tree.add_subview(mid, leaf).unwrap();

        assert_eq!(tree.view_to_screen(leaf, Point::new(0, 0)), Point::new(6, 4));
        assert_eq!(tree.view_to_screen(leaf, Point::new(2, 3)), Point::new(8, 7));
        assert_eq!(tree.screen_rect(leaf), Rect::new(6, 4, 5, 5));
    }

    #[test]
    fn test_bounds_without_adornment_is_frame_size_at_origin() {
        let mut tree = ViewTree::new();
        let v = tree.create_view(Rect::new(7, 3, 10, 5));
        assert_eq!(tree.bounds(v), Rect::new(0, 0, 10, 5));
    }

    #[test]
    fn test_bounds_reduced_by_thickness() {
        let mut tree = ViewTree::new();
        let v = tree.create_view(Rect::new(0, 0, 10, 5));
        tree.add_adornment(
            v,
            Adornment::new(Thickness::uniform(1), BorderStyle::Single),
        );
        assert_eq!(tree.bounds(v), Rect::new(0, 0, 8, 3));
    }

    #[test]
    fn test_bounds_clamps_below_zero() {
        let mut tree = ViewTree::new();
        let v = tree.create_view(Rect::new(0, 0, 3, 3));
        tree.add_adornment(
            v,
            Adornment::new(Thickness::uniform(2), BorderStyle::Single),
        );
        assert_eq!(tree.bounds(v), Rect::new(0, 0, 0, 0));
    }

    #[test]
    fn test_set_bounds_is_an_error() {
        let mut tree = ViewTree::new();
        let v = tree.create_view(Rect::new(0, 0, 10, 5));
        assert_eq!(
            tree.set_bounds(v, Rect::new(0, 0, 4, 4)),
            Err(ViewError::BoundsNotSettable)
        );
    }

    #[test]
    fn test_content_to_screen_offsets_by_thickness() {
        let mut tree = ViewTree::new();
        let v = tree.create_view(Rect::new(5, 5, 10, 5));
        tree.add_adornment(
            v,
            Adornment::new(Thickness::new(2, 1, 0, 0), BorderStyle::None),
        );
        assert_eq!(tree.content_to_screen(v, Point::new(0, 0)), Point::new(7, 6));
    }

    #[test]
    fn test_set_focus_builds_chain() {
        let mut tree = ViewTree::new();
        let root = tree.create_view(Rect::new(0, 0, 20, 20));
        let mid = tree.create_view(Rect::new(0, 0, 10, 10));
        let leaf = tree.create_view(Rect::new(0, 0, 5, 5));
        tree.set_can_focus(root, true);
        tree.set_can_focus(mid, true);
        tree.set_can_focus(leaf, true);
        tree.add_subview(root, mid).unwrap();
        tree.add_subview(mid, leaf).unwrap();

        assert!(tree.set_focus(leaf));
        assert!(tree.has_focus(root));
        assert!(tree.has_focus(mid));
        assert!(tree.has_focus(leaf));
        assert_eq!(tree.focused(root), Some(mid));
        assert_eq!(tree.focused(mid), Some(leaf));
        assert_eq!(tree.focused(leaf), None);
    }

    #[test]
    fn test_set_focus_moves_chain_between_branches() {
        let (mut tree, root, kids) = tree_with_children(2);
        tree.set_focus(kids[0]);
        tree.set_focus(kids[1]);

        assert!(!tree.has_focus(kids[0]));
        assert!(tree.has_focus(kids[1]));
        assert_eq!(tree.focused(root), Some(kids[1]));
    }

    #[test]
    fn test_set_focus_rejects_non_navigable() {
        let mut tree = ViewTree::new();
        let v = tree.create_view(Rect::new(0, 0, 5, 5));
        assert!(!tree.set_focus(v));

        tree.set_can_focus(v, true);
        tree.set_visible(v, false);
        assert!(!tree.set_focus(v));
    }

    #[test]
    fn test_focus_events_queue_leave_then_enter() {
        let (mut tree, _root, kids) = tree_with_children(2);
        tree.set_focus(kids[0]);
        tree.take_events();

        tree.set_focus(kids[1]);
        let events = tree.take_events();
        assert_eq!(
            events,
            vec![
                ViewEvent::FocusLeft { view: kids[0] },
                ViewEvent::FocusEntered { view: kids[1] },
            ]
        );

        // Draining again yields nothing.
        assert!(tree.take_events().is_empty());
    }

    #[test]
    fn test_advance_focus_moves_forward_and_reports_boundary() {
        let (mut tree, root, kids) = tree_with_children(3);
        assert!(tree.advance_focus(root, NavigationDirection::Forward));
        assert_eq!(tree.focused(root), Some(kids[0]));

        assert!(tree.advance_focus(root, NavigationDirection::Forward));
        assert!(tree.advance_focus(root, NavigationDirection::Forward));
        assert_eq!(tree.focused(root), Some(kids[2]));

        // Off the end: relinquish, so a retry starts over.
        assert!(!tree.advance_focus(root, NavigationDirection::Forward));
        assert_eq!(tree.focused(root), None);
        assert!(tree.advance_focus(root, NavigationDirection::Forward));
        assert_eq!(tree.focused(root), Some(kids[0]));
    }

    #[test]
    fn test_advance_focus_backward() {
        let (mut tree, root, kids) = tree_with_children(3);
        assert!(tree.advance_focus(root, NavigationDirection::Backward));
        assert_eq!(tree.focused(root), Some(kids[2]));

        assert!(tree.advance_focus(root, NavigationDirection::Backward));
        assert_eq!(tree.focused(root), Some(kids[1]));
    }

    #[test]
    fn test_advance_focus_empty_is_silent_noop() {
        let mut tree = ViewTree::new();
        let root = tree.create_view(Rect::new(0, 0, 10, 10));
        assert!(!tree.advance_focus(root, NavigationDirection::Forward));
        assert_eq!(tree.focused(root), None);
        assert!(tree.take_events().is_empty());
    }

    #[test]
    fn test_advance_focus_skips_non_navigable() {
        let (mut tree, root, kids) = tree_with_children(3);
        tree.set_visible(kids[1], false);

        tree.advance_focus(root, NavigationDirection::Forward);
        assert_eq!(tree.focused(root), Some(kids[0]));
        tree.advance_focus(root, NavigationDirection::Forward);
        assert_eq!(tree.focused(root), Some(kids[2]));
    }

    #[test]
    fn test_advance_focus_descends_into_containers() {
        let mut tree = ViewTree::new();
        let root = tree.create_view(Rect::new(0, 0, 30, 10));
        let panel = tree.create_view(Rect::new(0, 0, 20, 10));
        tree.set_can_focus(panel, true);
        tree.add_subview(root, panel).unwrap();
        let a = tree.create_view(Rect::new(0, 0, 5, 1));
        let b = tree.create_view(Rect::new(0, 1, 5, 1));
        tree.set_can_focus(a, true);
        tree.set_can_focus(b, true);
        tree.add_subview(panel, a).unwrap();
        tree.add_subview(panel, b).unwrap();

        // First advance establishes the deepest focus inside the panel.
        tree.advance_focus(root, NavigationDirection::Forward);
        assert!(tree.has_focus(a));
        assert_eq!(tree.focused(panel), Some(a));

        // Second advance moves within the panel, not past it.
        tree.advance_focus(root, NavigationDirection::Forward);
        assert!(tree.has_focus(b));
        assert!(!tree.has_focus(a));
    }

    #[test]
    fn test_tab_indexes_reorder_and_omit() {
        let (mut tree, root, kids) = tree_with_children(3);
        tree.set_tab_indexes(root, vec![kids[2], kids[0]]);
        assert_eq!(tree.tab_indexes(root), &[kids[2], kids[0]]);

        tree.advance_focus(root, NavigationDirection::Forward);
        assert_eq!(tree.focused(root), Some(kids[2]));
        tree.advance_focus(root, NavigationDirection::Forward);
        assert_eq!(tree.focused(root), Some(kids[0]));
    }

    #[test]
    fn test_set_tab_indexes_drops_foreign_ids() {
        let (mut tree, root, kids) = tree_with_children(2);
        let stranger = tree.create_view(Rect::new(0, 0, 1, 1));
        tree.set_tab_indexes(root, vec![stranger, kids[1], kids[1]]);
        assert_eq!(tree.tab_indexes(root), &[kids[1]]);
    }

    #[test]
    fn test_remove_subview_destroys_and_clears_focus() {
        let (mut tree, root, kids) = tree_with_children(2);
        tree.set_focus(kids[0]);
        tree.take_events();

        tree.remove_subview(root, kids[0]);
        assert_eq!(tree.focused(root), None);
        assert!(!tree.is_alive(kids[0]));
        assert_eq!(tree.subviews(root), &[kids[1]]);
        assert_eq!(
            tree.take_events(),
            vec![ViewEvent::FocusLeft { view: kids[0] }]
        );
    }

    #[test]
    fn test_color_scheme_inherits_from_ancestors() {
        let mut tree = ViewTree::new();
        let root = tree.create_view(Rect::new(0, 0, 10, 10));
        let child = tree.create_view(Rect::new(0, 0, 5, 5));
        tree.add_subview(root, child).unwrap();

        let scheme = ColorScheme::default();
        assert_eq!(tree.color_scheme(child), scheme);

        let mut custom = ColorScheme::default();
        custom.normal.attrs = crate::types::Attr::BOLD;
        tree.set_color_scheme(root, Some(custom));
        assert_eq!(tree.color_scheme(child), custom);
    }

    #[test]
    fn test_needs_display_marks_on_focus_change() {
        let (mut tree, _root, kids) = tree_with_children(2);
        tree.set_focus(kids[0]);
        tree.clear_needs_display(kids[0]);
        tree.clear_needs_display(kids[1]);

        tree.set_focus(kids[1]);
        assert!(tree.needs_display(kids[0]));
        assert!(tree.needs_display(kids[1]));
    }
}
