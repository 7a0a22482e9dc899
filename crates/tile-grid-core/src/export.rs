use crate::model::Layout;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Serialize a `Layout` as `{ tile, columns, rows, fallback, container, cells }`.
/// `cells` lists every tile's row-major position for hosts that place tiles absolutely.
pub fn to_json(layout: &Layout) -> Value {
    let cells: Vec<Value> = layout
        .cells()
        .iter()
        .map(|c| json!({"index": c.index, "x": c.x, "y": c.y, "w": c.width, "h": c.height}))
        .collect();
    json!({
        "tile": {"w": layout.tile.width, "h": layout.tile.height},
        "columns": layout.columns,
        "rows": layout.rows,
        "fallback": layout.fallback,
        "container": {"w": layout.container.width, "h": layout.container.height},
        "cells": cells,
    })
}

/// CSS-style box size applied to each tile element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TileStyle {
    pub max_width: String,
    pub max_height: String,
}

impl Default for TileStyle {
    /// Unconstrained tiles, used until a layout has been applied.
    fn default() -> Self {
        Self {
            max_width: "100%".into(),
            max_height: "100%".into(),
        }
    }
}

impl TileStyle {
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            max_width: format!("{}px", layout.tile.width),
            max_height: format!("{}px", layout.tile.height),
        }
    }

    /// Declarations ready for a `style` attribute.
    pub fn css(&self) -> String {
        format!("max-width: {}; max-height: {};", self.max_width, self.max_height)
    }
}
