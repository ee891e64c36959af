#![forbid(unsafe_code)]

//! Host-boundary driver for wrap layout.
//!
//! [`WrapPanel`] owns a list of children, measures them, and keeps the last
//! computed [`WrapLayout`]. Hosts drive it in two phases:
//!
//! 1. **Measure**: [`WrapPanel::measure`] asks every child for its desired
//!    size, runs [`compute`], and reports the panel's own desired size
//!    (available width, stacked row height). The panel forwards its full
//!    available size to every child as the hint and never clamps the answer.
//! 2. **Arrange**: [`WrapPanel::arrange`] hands back the final rectangles in
//!    child order for the host to position.
//!
//! Staleness is an explicit signal: the host calls [`WrapPanel::invalidate`]
//! with [`Invalidation`] flags when its size or the child list changes and
//! polls [`WrapPanel::needs_measure`]. Nothing subscribes to anything, and
//! measuring always recomputes from scratch.
//!
//! ```
//! use rowflow_layout::{Invalidation, Size, WrapPanel};
//!
//! let mut panel = WrapPanel::with_children(vec![Size::new(100.0, 50.0); 3]);
//! assert!(panel.needs_measure());
//!
//! let desired = panel.measure(Size::new(250.0, 400.0));
//! assert_eq!(desired, Size::new(250.0, 100.0));
//! assert!(!panel.needs_measure());
//!
//! panel.invalidate(Invalidation::SIZE);
//! assert!(panel.needs_measure());
//! ```

use bitflags::bitflags;

use crate::{Rect, Size, WrapLayout, compute};

/// A child that can report its desired size.
///
/// The hint is the panel's own available size, passed through unchanged; it
/// is not the space remaining on the current row. Children are free to ask
/// for more than fits.
pub trait Measurable {
    /// Desired size under the given availability hint.
    fn desired_size(&self, available: Size) -> Size;
}

/// Fixed-size children: the hint is ignored.
impl Measurable for Size {
    #[inline]
    fn desired_size(&self, _available: Size) -> Size {
        *self
    }
}

impl<T: Measurable + ?Sized> Measurable for &T {
    #[inline]
    fn desired_size(&self, available: Size) -> Size {
        (**self).desired_size(available)
    }
}

bitflags! {
    /// Reasons a panel's cached layout is stale.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Invalidation: u8 {
        /// The available size changed.
        const SIZE = 0b01;
        /// The child list changed, or a child's content did.
        const CHILDREN = 0b10;
    }
}

/// A wrapping panel: children flow into rows, rows stretch to fill.
///
/// A fresh panel reports [`needs_measure`] until the first [`measure`] call;
/// afterwards the host re-arms it through [`invalidate`].
///
/// [`needs_measure`]: WrapPanel::needs_measure
/// [`measure`]: WrapPanel::measure
/// [`invalidate`]: WrapPanel::invalidate
#[derive(Debug)]
pub struct WrapPanel<C> {
    children: Vec<C>,
    layout: WrapLayout,
    dirty: Invalidation,
}

impl<C: Measurable> WrapPanel<C> {
    /// Create an empty panel.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            layout: WrapLayout::default(),
            dirty: Invalidation::all(),
        }
    }

    /// Create a panel holding the given children.
    pub fn with_children(children: Vec<C>) -> Self {
        Self {
            children,
            layout: WrapLayout::default(),
            dirty: Invalidation::all(),
        }
    }

    /// Append a child, marking the layout stale.
    pub fn push(&mut self, child: C) {
        self.children.push(child);
        self.dirty.insert(Invalidation::CHILDREN);
    }

    /// The children, in layout order.
    #[inline]
    pub fn children(&self) -> &[C] {
        &self.children
    }

    /// Number of children.
    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if the panel has no children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Record a staleness signal from the host.
    #[inline]
    pub fn invalidate(&mut self, flags: Invalidation) {
        self.dirty.insert(flags);
    }

    /// Check if the layout is stale and a measure pass is due.
    #[inline]
    pub fn needs_measure(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Measure every child and recompute the layout.
    ///
    /// Always runs the full pipeline, clears any pending invalidation, and
    /// returns the panel's desired size: the available width unchanged and
    /// the stacked height of all rows.
    pub fn measure(&mut self, available: Size) -> Size {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "panel_measure",
            children = self.children.len(),
            width = available.width
        )
        .entered();

        let desired: Vec<Size> = self
            .children
            .iter()
            .map(|child| child.desired_size(available))
            .collect();
        self.layout = compute(&desired, available.width);
        self.dirty = Invalidation::empty();
        self.layout.size()
    }

    /// Final rectangles from the last measure pass, in child order.
    #[inline]
    pub fn arrange(&self) -> &[Rect] {
        self.layout.rects()
    }

    /// The full layout from the last measure pass.
    #[inline]
    pub fn layout(&self) -> &WrapLayout {
        &self.layout
    }
}

impl<C: Measurable> Default for WrapPanel<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Test child that records every hint it is measured with.
    struct Probe {
        size: Size,
        seen: Rc<RefCell<Vec<Size>>>,
    }

    impl Measurable for Probe {
        fn desired_size(&self, available: Size) -> Size {
            self.seen.borrow_mut().push(available);
            self.size
        }
    }

    // --- Measure / arrange ---

    #[test]
    fn measure_reports_stacked_height() {
        let mut panel = WrapPanel::with_children(vec![Size::new(100.0, 50.0); 3]);
        let desired = panel.measure(Size::new(250.0, 400.0));
        assert_eq!(desired, Size::new(250.0, 100.0));

        assert_eq!(
            panel.arrange(),
            &[
                Rect::new(0.0, 0.0, 100.0, 50.0),
                Rect::new(150.0, 0.0, 100.0, 50.0),
                Rect::new(150.0, 50.0, 100.0, 50.0),
            ]
        );
        assert_eq!(panel.layout().rows().len(), 2);
    }

    #[test]
    fn measure_with_no_children() {
        let mut panel: WrapPanel<Size> = WrapPanel::new();
        let desired = panel.measure(Size::new(250.0, 400.0));
        assert_eq!(desired, Size::new(250.0, 0.0));
        assert!(panel.arrange().is_empty());
    }

    #[test]
    fn measure_forwards_full_available_to_every_child() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let children = (0..3)
            .map(|_| Probe {
                size: Size::new(100.0, 50.0),
                seen: Rc::clone(&seen),
            })
            .collect();
        let mut panel = WrapPanel::with_children(children);
        panel.measure(Size::new(250.0, 400.0));

        // Every child gets the panel's availability, not the row remainder.
        let hints = seen.borrow();
        assert_eq!(hints.len(), 3);
        assert!(hints.iter().all(|&h| h == Size::new(250.0, 400.0)));
    }

    #[test]
    fn remeasure_reflows_at_new_width() {
        let mut panel = WrapPanel::with_children(vec![Size::new(100.0, 50.0); 3]);
        panel.measure(Size::new(250.0, 400.0));
        assert_eq!(panel.layout().rows().len(), 2);

        panel.invalidate(Invalidation::SIZE);
        let desired = panel.measure(Size::new(350.0, 400.0));
        assert_eq!(panel.layout().rows().len(), 1);
        assert_eq!(desired, Size::new(350.0, 50.0));
    }

    // --- Invalidation lifecycle ---

    #[test]
    fn fresh_panel_needs_measure() {
        let panel: WrapPanel<Size> = WrapPanel::new();
        assert!(panel.needs_measure());
    }

    #[test]
    fn measure_clears_invalidation() {
        let mut panel = WrapPanel::with_children(vec![Size::new(10.0, 10.0)]);
        panel.measure(Size::new(100.0, 100.0));
        assert!(!panel.needs_measure());
    }

    #[test]
    fn invalidate_rearms_measure() {
        let mut panel = WrapPanel::with_children(vec![Size::new(10.0, 10.0)]);
        panel.measure(Size::new(100.0, 100.0));

        panel.invalidate(Invalidation::SIZE);
        assert!(panel.needs_measure());
        panel.measure(Size::new(100.0, 100.0));
        assert!(!panel.needs_measure());

        panel.invalidate(Invalidation::CHILDREN);
        assert!(panel.needs_measure());
    }

    #[test]
    fn push_marks_children_stale() {
        let mut panel = WrapPanel::with_children(vec![Size::new(10.0, 10.0)]);
        panel.measure(Size::new(100.0, 100.0));
        assert!(!panel.needs_measure());

        panel.push(Size::new(20.0, 20.0));
        assert!(panel.needs_measure());
        assert_eq!(panel.len(), 2);
    }

    // --- Children access ---

    #[test]
    fn children_accessors() {
        let mut panel: WrapPanel<Size> = WrapPanel::default();
        assert!(panel.is_empty());

        panel.push(Size::new(10.0, 10.0));
        panel.push(Size::new(20.0, 20.0));
        assert_eq!(panel.len(), 2);
        assert_eq!(panel.children()[1], Size::new(20.0, 20.0));
    }

    #[test]
    fn measurable_by_reference() {
        let size = Size::new(30.0, 10.0);
        let via_ref: &Size = &size;
        assert_eq!(via_ref.desired_size(Size::new(100.0, 100.0)), size);
    }
}
