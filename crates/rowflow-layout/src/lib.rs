#![forbid(unsafe_code)]

//! Row-flow layout: wrapping rows with stretch-to-fill.
//!
//! This crate arranges fixed-size children into left-to-right rows that wrap
//! within an available width:
//!
//! - [`compute`] - the pure layout entry point
//! - [`WrapLayout`] - per-child placements, row records, and total size
//! - [`Row`] - one laid-out row (vertical band plus member range)
//! - [`WrapPanel`] - measure/arrange driver with explicit invalidation
//! - [`cache`] - layout result caching for memoization
//! - [`debug`] - layout introspection and row reports
//!
//! # Pipeline
//!
//! [`compute`] runs three passes in a fixed order:
//!
//! 1. **Row assignment**: greedy first-fit wrapping. A child joins the open
//!    row only while `x + width < available` (strict, so a child whose right
//!    edge would land exactly on the container edge wraps); otherwise the row
//!    closes and the same child opens the next one.
//! 2. **Row stretch**: each multi-member row spreads its free width into
//!    equal gaps between consecutive members. Widths never change.
//! 3. **Trailing alignment**: a lone child on the final row is pushed flush
//!    to the right edge, provided other children exist above it.
//!
//! # Example
//!
//! ```
//! use rowflow_layout::{compute, Size};
//!
//! let children = [Size::new(100.0, 50.0); 3];
//! let layout = compute(&children, 250.0);
//!
//! // Two fit per row; the third wraps and is right-aligned.
//! assert_eq!(layout.rows().len(), 2);
//! assert_eq!(layout.rects()[2].x, 150.0);
//! assert_eq!(layout.size(), Size::new(250.0, 100.0));
//! ```

pub mod cache;
pub mod debug;
pub mod panel;

pub use cache::{LayoutCache, LayoutCacheKey, LayoutCacheStats};
pub use panel::{Invalidation, Measurable, WrapPanel};
pub use rowflow_core::geometry::{Rect, Size};

use std::ops::Range;

/// One laid-out row: its vertical band and the contiguous run of placements
/// it owns.
///
/// Rows are produced in top-to-bottom order by the assignment pass and are
/// never regrouped afterwards; later passes only look placements up through
/// the member range.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    y: f32,
    height: f32,
    members: Range<usize>,
}

impl Row {
    /// Top edge of the row.
    #[inline]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Row height: the tallest member's height.
    #[inline]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Bottom edge of the row.
    #[inline]
    pub const fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Index range of this row's placements in the layout's rect list.
    #[inline]
    pub const fn members(&self) -> Range<usize> {
        self.members.start..self.members.end
    }

    /// Number of placements in the row. Always at least 1.
    #[inline]
    pub const fn len(&self) -> usize {
        self.members.end - self.members.start
    }

    /// Check if the row holds no placements. Assignment never produces one.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.members.start == self.members.end
    }
}

/// The result of a layout pass: placements, row records, and total size.
///
/// Placements are index-aligned with the input children and keep their
/// measured width and height; the passes only decide positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrapLayout {
    rects: Vec<Rect>,
    rows: Vec<Row>,
    size: Size,
}

impl WrapLayout {
    /// Final placement for each child, in input order.
    #[inline]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Rows in top-to-bottom order.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Total occupied size: the available width as given, stacked row heights.
    #[inline]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Number of placed children.
    #[inline]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Check if the layout holds no children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// The placements belonging to one row.
    #[inline]
    pub fn row_rects(&self, row: &Row) -> &[Rect] {
        &self.rects[row.members()]
    }
}

/// Compute a wrap layout for `children` within `available_width`.
///
/// Pure function of its inputs: no caching, no partial reuse of earlier
/// results. Children keep their measured sizes; only positions are decided.
///
/// Child widths and heights must be non-negative and finite.
/// `available_width` may be `f32::INFINITY`, which yields a single
/// unstretched row.
///
/// # Properties
///
/// 1. One placement per child, in input order, with the child's exact size.
/// 2. Row member ranges are contiguous, non-empty, and cover the children in
///    order.
/// 3. Total height is the sum of row heights; a row is as tall as its tallest
///    member.
/// 4. Stretched rows end flush with the right edge; rows with a single member
///    are never stretched.
/// 5. A lone child on the final row is right-aligned when children exist on
///    earlier rows.
///
/// # Example
///
/// ```
/// use rowflow_layout::{compute, Rect, Size};
///
/// let children = [Size::new(100.0, 50.0); 3];
/// let layout = compute(&children, 250.0);
///
/// assert_eq!(
///     layout.rects(),
///     &[
///         Rect::new(0.0, 0.0, 100.0, 50.0),
///         Rect::new(150.0, 0.0, 100.0, 50.0),
///         Rect::new(150.0, 50.0, 100.0, 50.0),
///     ]
/// );
/// ```
#[must_use]
pub fn compute(children: &[Size], available_width: f32) -> WrapLayout {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "wrap_compute",
        children = children.len(),
        available = available_width
    )
    .entered();

    let mut layout = assign_rows(children, available_width);
    stretch_rows(&mut layout.rects, &layout.rows, available_width);
    align_trailing(&mut layout.rects, &layout.rows, available_width);
    layout
}

/// First pass: greedy row assignment.
///
/// Walks children in order with an (x, y) cursor. A child joins the open row
/// only while its right edge stays strictly inside `available`; otherwise the
/// row closes and the SAME child is retried on the next one. A child opening
/// a row is placed unconditionally, so a child wider than the container still
/// occupies a row of its own rather than wrapping forever.
///
/// Total height is accumulated here, row by row, and later passes never
/// touch it.
fn assign_rows(children: &[Size], available: f32) -> WrapLayout {
    let mut rects = Vec::with_capacity(children.len());
    let mut rows = Vec::new();

    let mut x = 0.0f32;
    let mut y = 0.0f32;
    let mut row_height = 0.0f32;
    let mut row_start = 0usize;
    let mut total_height = 0.0f32;
    let mut new_row = true;

    let mut i = 0;
    while i < children.len() {
        let child = children[i];
        if new_row {
            rects.push(Rect::new(x, y, child.width, child.height));
            x += child.width;
            row_height = child.height;
            new_row = false;
            i += 1;
        } else if x + child.width < available {
            rects.push(Rect::new(x, y, child.width, child.height));
            x += child.width;
            row_height = row_height.max(child.height);
            i += 1;
        } else {
            // Close the row; the child that failed the fit test is not
            // consumed and opens the next row.
            rows.push(Row {
                y,
                height: row_height,
                members: row_start..i,
            });
            total_height += row_height;
            y += row_height;
            x = 0.0;
            row_height = 0.0;
            row_start = i;
            new_row = true;
        }
    }

    if !children.is_empty() {
        rows.push(Row {
            y,
            height: row_height,
            members: row_start..children.len(),
        });
        total_height += row_height;
    }

    WrapLayout {
        rects,
        rows,
        size: Size::new(available, total_height),
    }
}

/// Second pass: spread each row's free width into equal gaps.
///
/// Member `k` of a row shifts right by `k * space`, where `space` is the
/// row's leftover width divided by its gap count. Rows with a single member
/// are skipped before the division, so the gap count is at least 1. Rows with
/// no free width are left alone, as is every row when `available` is
/// unbounded (`space` would not be finite).
fn stretch_rows(rects: &mut [Rect], rows: &[Row], available: f32) {
    for row in rows {
        let members = &mut rects[row.members()];
        if members.len() <= 1 {
            continue;
        }

        let natural: f32 = members.iter().map(|r| r.width).sum();
        let space = (available - natural) / (members.len() - 1) as f32;
        if !space.is_finite() || space <= 0.0 {
            continue;
        }

        for (k, rect) in members.iter_mut().enumerate().skip(1) {
            *rect = rect.translate(space * k as f32, 0.0);
        }
    }
}

/// Third pass: right-align a lone child on the final row.
///
/// Fires only when the layout holds at least two placements, which together
/// with the singleton final row means other children sit on earlier rows. A
/// layout consisting of one child keeps it at the left edge.
fn align_trailing(rects: &mut [Rect], rows: &[Row], available: f32) {
    if rects.len() < 2 {
        return;
    }
    let Some(last) = rows.last() else {
        return;
    };
    if last.len() != 1 {
        return;
    }

    let rect = &mut rects[last.members.start];
    rect.x = available - rect.width;
}
