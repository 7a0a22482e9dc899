//! Core library for laying out video-conference tiles.
//!
//! - Packer: one uniform tile size for `n` tiles, keeping the reference sample's aspect ratio
//! - Stage: host-side tile list + container that re-runs the packer on every change
//! - Data model is serde-serializable; JSON and CSS exporters are provided.
//!
//! Quick example:
//! ```
//! use tile_grid_core::{Container, TileSample, pack};
//!
//! let layout = pack(
//!     Some(Container::new(1280.0, 720.0)),
//!     &[TileSample::new(640.0, 480.0)],
//!     6,
//! )
//! .expect("layout");
//! assert!(layout.tile.width > 0.0);
//! assert!(layout.capacity_rows() * layout.columns >= 6);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod packer;
pub mod stage;

pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use packer::{TilePacker, pack, pack_with_config};
pub use stage::*;

/// Convenience prelude for common types and functions.
/// Importing `tile_grid_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{PackerConfig, PackerConfigBuilder, ReferencePolicy, Rounding};
    pub use crate::error::TileLayoutError;
    pub use crate::export::{TileStyle, to_json};
    pub use crate::model::{
        Cell, Container, Layout, LayoutStats, Orientation, TileSample, TileSize,
    };
    pub use crate::packer::{TilePacker, pack, pack_with_config};
    pub use crate::stage::{Stage, StageTile, Trigger};
}
