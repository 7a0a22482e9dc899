use crate::error::TileLayoutError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// On-screen region available for tiles (device pixels).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Container {
    pub width: f64,
    pub height: f64,
}

/// Container orientation, as seen by the packer's log output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Container {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
    /// True if both sides are finite and strictly positive.
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
    pub fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else if self.height > self.width {
            Orientation::Portrait
        } else {
            Orientation::Square
        }
    }
}

impl FromStr for Container {
    type Err = TileLayoutError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = parse_dims(s)?;
        Ok(Self { width, height })
    }
}

/// Intrinsic resolution of one rendered media tile (e.g. a video's
/// `videoWidth`/`videoHeight`). Zero until the media metadata is known.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TileSample {
    pub width: f64,
    pub height: f64,
}

impl TileSample {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
    /// A sample with a non-positive or non-finite side carries no aspect ratio.
    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
    /// Width-to-height ratio. Only meaningful for measured samples.
    pub fn ratio(&self) -> f64 {
        self.width / self.height
    }
}

impl FromStr for TileSample {
    type Err = TileLayoutError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = parse_dims(s)?;
        Ok(Self { width, height })
    }
}

fn parse_dims(s: &str) -> Result<(f64, f64), TileLayoutError> {
    let lower = s.trim().to_ascii_lowercase();
    let Some((w, h)) = lower.split_once('x') else {
        return Err(TileLayoutError::InvalidInput(format!(
            "expected WIDTHxHEIGHT, got {s:?}"
        )));
    };
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| TileLayoutError::InvalidInput(format!("bad dimension {v:?}: {e}")))
    };
    Ok((parse(w)?, parse(h)?))
}

/// Uniform size applied to every tile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TileSize {
    pub width: f64,
    pub height: f64,
}

/// Result of one packing pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Layout {
    /// Size of every tile.
    pub tile: TileSize,
    /// Column count chosen by the fitting search.
    pub columns: usize,
    /// Rows occupied by `tile_count` tiles in row-major order.
    pub rows: usize,
    /// True when no column count fit and tiles were stretched to the full
    /// container height.
    pub fallback: bool,
    pub container: Container,
    pub tile_count: usize,
}

/// Placement of a single tile, row-major from the top-left corner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Cell {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Layout {
    /// Positions of all `tile_count` tiles.
    pub fn cells(&self) -> Vec<Cell> {
        let columns = self.columns.max(1);
        (0..self.tile_count)
            .map(|index| Cell {
                index,
                x: (index % columns) as f64 * self.tile.width,
                y: (index / columns) as f64 * self.tile.height,
                width: self.tile.width,
                height: self.tile.height,
            })
            .collect()
    }

    /// Rows that fit inside the container at this tile height.
    pub fn capacity_rows(&self) -> usize {
        (self.container.height / self.tile.height).floor() as usize
    }

    /// Computes coverage statistics for this layout.
    pub fn stats(&self) -> LayoutStats {
        let tile_area = self.tile.width * self.tile.height;
        let used_area = tile_area * self.tile_count as f64;
        let container_area = self.container.area();
        let occupancy = if container_area > 0.0 {
            used_area / container_area
        } else {
            0.0
        };
        LayoutStats {
            tile_count: self.tile_count,
            columns: self.columns,
            rows: self.rows,
            tile_area,
            used_area,
            container_area,
            occupancy,
            fallback: self.fallback,
        }
    }
}

/// Statistics about how much of the container a layout covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LayoutStats {
    pub tile_count: usize,
    pub columns: usize,
    pub rows: usize,
    /// Area of a single tile (px²).
    pub tile_area: f64,
    /// Sum of all tile areas (px²).
    pub used_area: f64,
    pub container_area: f64,
    /// used_area / container_area (0.0 to 1.0). Higher is better.
    pub occupancy: f64,
    pub fallback: bool,
}

impl LayoutStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Tiles: {}, Grid: {}x{}, Occupancy: {:.2}%, Tile Area: {:.0} px², Used Area: {:.0} px², Fallback: {}",
            self.tile_count,
            self.columns,
            self.rows,
            self.occupancy * 100.0,
            self.tile_area,
            self.used_area,
            self.fallback,
        )
    }

    /// Returns uncovered container area in pixels.
    pub fn wasted_area(&self) -> f64 {
        (self.container_area - self.used_area).max(0.0)
    }
}
