//! Grid placement of a widget collection.
//!
//! Widgets flow left to right across a three-column grid in position order.
//! A widget that does not fit in the columns left on the current row starts a
//! new row. Every row is [`WIDGET_HEIGHT`] units tall.

use serde::Serialize;

use crate::collection::WidgetCollection;
use crate::types::WidgetId;
use crate::widget::WIDGET_HEIGHT;

/// Number of columns in the Scape grid.
pub const GRID_COLUMNS: u8 = 3;

/// Where one widget lands on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPlacement {
    pub widget_id: WidgetId,
    /// Zero-based row index.
    pub row: u32,
    /// Zero-based starting column.
    pub column: u8,
    pub span: u8,
    pub height: u8,
}

/// Compute grid placements for every widget, in position order.
pub fn compute_grid(collection: &WidgetCollection) -> Vec<GridPlacement> {
    let mut placements = Vec::with_capacity(collection.len());
    let mut row = 0u32;
    let mut column = 0u8;

    for widget in collection {
        let span = widget.size.span();
        if column + span > GRID_COLUMNS {
            row += 1;
            column = 0;
        }
        placements.push(GridPlacement {
            widget_id: widget.id.clone(),
            row,
            column,
            span,
            height: WIDGET_HEIGHT,
        });
        column += span;
        if column == GRID_COLUMNS {
            row += 1;
            column = 0;
        }
    }

    placements
}

/// Number of rows occupied by `placements`.
pub fn row_count(placements: &[GridPlacement]) -> u32 {
    placements.last().map_or(0, |p| p.row + 1)
}
