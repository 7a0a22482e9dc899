use crate::config::{PackerConfig, Rounding};
use crate::error::{Result, TileLayoutError};
use crate::model::{Container, Layout, TileSample, TileSize};
use tracing::{debug, instrument, trace};

pub mod reference;

/// Computes one uniform tile size that fits `n` tiles into a container while
/// keeping the aspect ratio of the reference sample.
///
/// The packer holds only configuration; every call is a pure function of its
/// inputs and may run concurrently from independent call sites.
#[derive(Debug, Clone, Copy, Default)]
pub struct TilePacker {
    config: PackerConfig,
}

impl TilePacker {
    pub fn new(config: PackerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    /// Packs `n` tiles into `container`.
    ///
    /// Errors:
    /// - `LayoutUnavailable` if `container` is `None` or has a non-positive/non-finite side
    /// - `NoTiles` if `n == 0` or no sample is measured
    ///
    /// When no column count up to `n` fits, the returned layout has
    /// `fallback == true` and tiles stretched to the container height.
    #[instrument(level = "debug", skip_all, fields(n = n))]
    pub fn pack(
        &self,
        container: Option<Container>,
        samples: &[TileSample],
        n: usize,
    ) -> Result<Layout> {
        let container = match container {
            Some(c) if c.is_measurable() => c,
            _ => return Err(TileLayoutError::LayoutUnavailable),
        };
        if n == 0 {
            return Err(TileLayoutError::NoTiles);
        }
        let reference = reference::select(samples, self.config.reference)
            .ok_or(TileLayoutError::NoTiles)?;
        let ratio = reference.ratio();
        debug!(
            orientation = ?container.orientation(),
            ratio,
            width = container.width,
            height = container.height,
            "packing tiles"
        );
        let start = self.initial_columns(container, ratio, n);
        Ok(fit_columns(container, ratio, n, start))
    }

    /// Column count implied by splitting the container area evenly between `n`
    /// tiles of aspect `ratio`.
    fn initial_columns(&self, container: Container, ratio: f64, n: usize) -> usize {
        let truncate = self.config.rounding == Rounding::Truncate;
        let mut element_area = container.area() / n as f64;
        if truncate {
            element_area = element_area.trunc();
        }
        let mut element_width = (element_area * ratio).sqrt();
        if truncate {
            element_width = element_width.trunc();
        }
        // A zero width would make the column count infinite.
        if element_width <= 0.0 || !element_width.is_finite() {
            element_width = 1.0;
        }
        trace!(element_area, element_width, "initial estimate");
        ((container.width / element_width).ceil() as usize).max(1)
    }
}

/// Widens the grid one column at a time until all `n` tiles fit vertically.
/// The first fitting column count wins.
fn fit_columns(container: Container, ratio: f64, n: usize, start: usize) -> Layout {
    let mut columns = start;
    let mut width = container.width / columns as f64;
    let mut height = width / ratio;
    while columns <= n {
        let rows = (container.height / height).floor();
        trace!(columns, width, height, rows, "fit attempt");
        if rows * columns as f64 >= n as f64 {
            return Layout {
                tile: TileSize { width, height },
                columns,
                rows: n.div_ceil(columns),
                fallback: false,
                container,
                tile_count: n,
            };
        }
        columns += 1;
        width = container.width / columns as f64;
        height = width / ratio;
    }
    debug!(columns, "no column count fits, stretching tiles to container height");
    Layout {
        tile: TileSize {
            width,
            height: container.height,
        },
        columns,
        rows: n.div_ceil(columns),
        fallback: true,
        container,
        tile_count: n,
    }
}

/// Packs with the default configuration (truncating, largest-area reference).
pub fn pack(container: Option<Container>, samples: &[TileSample], n: usize) -> Result<Layout> {
    TilePacker::default().pack(container, samples, n)
}

/// Packs with an explicit configuration.
pub fn pack_with_config(
    container: Option<Container>,
    samples: &[TileSample],
    n: usize,
    cfg: PackerConfig,
) -> Result<Layout> {
    TilePacker::new(cfg).pack(container, samples, n)
}
