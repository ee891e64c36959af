#![forbid(unsafe_code)]

//! Layout introspection and row reports.
//!
//! Read-only views over a computed [`WrapLayout`] for tests, debug overlays,
//! and log output:
//!
//! - [`inspect`] - per-row [`RowInfo`] records (geometry plus slack)
//! - [`occupied_bounds`] - the union of all placements
//! - [`render_report`] - a compact one-line-per-row textual dump

use std::fmt::Write as _;
use std::ops::Range;

use rowflow_core::geometry::Rect;

use crate::WrapLayout;

/// Per-row introspection data.
#[derive(Debug, Clone, PartialEq)]
pub struct RowInfo {
    /// Row position, top to bottom.
    pub index: usize,
    /// Top edge.
    pub y: f32,
    /// Row height.
    pub height: f32,
    /// Member placement indices.
    pub members: Range<usize>,
    /// Sum of member widths. Stretch never resizes, so this is also the
    /// consumed width before any gap was opened.
    pub natural_width: f32,
    /// Container width minus natural width. Negative when a member
    /// overflows the container.
    pub slack: f32,
}

/// Describe each row of a layout.
#[must_use]
pub fn inspect(layout: &WrapLayout) -> Vec<RowInfo> {
    let available = layout.size().width;
    layout
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let natural_width: f32 = layout.row_rects(row).iter().map(|r| r.width).sum();
            RowInfo {
                index,
                y: row.y(),
                height: row.height(),
                members: row.members(),
                natural_width,
                slack: available - natural_width,
            }
        })
        .collect()
}

/// Smallest rectangle containing every placement.
///
/// Empty layouts produce a zero rect. The result can reach left of the
/// origin or past the container edge when a child overflows.
#[must_use]
pub fn occupied_bounds(layout: &WrapLayout) -> Rect {
    let mut rects = layout.rects().iter();
    let Some(first) = rects.next() else {
        return Rect::default();
    };
    rects.fold(*first, |acc, r| acc.union(r))
}

/// Render a one-line-per-row summary of a layout.
#[must_use]
pub fn render_report(layout: &WrapLayout) -> String {
    let size = layout.size();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "wrap {}x{}: {} children in {} rows",
        size.width,
        size.height,
        layout.len(),
        layout.rows().len()
    );
    for info in inspect(layout) {
        let _ = writeln!(
            out,
            "  row {}: y={} h={} members={}..{} natural={} slack={}",
            info.index,
            info.y,
            info.height,
            info.members.start,
            info.members.end,
            info.natural_width,
            info.slack
        );
    }
    out
}
