use crate::config::PackerConfig;
use crate::error::Result;
use crate::export::TileStyle;
use crate::model::{Container, Layout, TileSample};
use crate::packer::TilePacker;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use tracing::{debug, trace};

/// Why a re-layout was requested.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Container measured, resized, split pane moved or fullscreen toggled.
    Resize,
    TileAdded,
    TileRemoved,
    /// Media metadata for a tile became available.
    SourceLoaded,
    Manual,
}

/// A tile tracked by the stage. `sample` is `None` until its media resolution is known.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageTile<K = String> {
    pub key: K,
    pub sample: Option<TileSample>,
}

/// Host-side tile collection that re-runs the packer on every structural change.
///
/// Tiles keep insertion order, which decides reference ties. A failed re-layout
/// (container not measured yet, no measured tile) is non-fatal: the previously
/// applied layout stays in place.
pub struct Stage<K = String> {
    packer: TilePacker,
    container: Option<Container>,
    tiles: Vec<StageTile<K>>,
    applied: Option<Layout>,
    generation: u64,
}

impl<K: PartialEq + std::fmt::Debug> Stage<K> {
    pub fn new(cfg: PackerConfig) -> Self {
        Self {
            packer: TilePacker::new(cfg),
            container: None,
            tiles: Vec::new(),
            applied: None,
            generation: 0,
        }
    }

    pub fn container(&self) -> Option<Container> {
        self.container
    }

    pub fn tiles(&self) -> &[StageTile<K>] {
        &self.tiles
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Most recently applied layout, if any pass has succeeded.
    pub fn applied(&self) -> Option<&Layout> {
        self.applied.as_ref()
    }

    /// Number of layouts applied (plus clears) so far. Hosts racing several
    /// triggers keep only the result with the highest generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Size to apply to every tile's box.
    pub fn tile_style(&self) -> TileStyle {
        self.applied
            .as_ref()
            .map(TileStyle::from_layout)
            .unwrap_or_default()
    }

    pub fn resize(&mut self, container: Container) -> Result<Layout> {
        self.container = Some(container);
        self.relayout(Trigger::Resize)
    }

    /// Forget the container geometry (e.g. the panel was unmounted).
    /// The applied layout is kept.
    pub fn detach(&mut self) {
        self.container = None;
    }

    /// Adds a tile. A key already on stage is not inserted twice; its sample is
    /// refreshed when one is given.
    pub fn add_tile(&mut self, key: K, sample: Option<TileSample>) -> Result<Layout> {
        if let Some(idx) = self.tiles.iter().position(|t| t.key == key) {
            trace!(?key, "tile already on stage");
            if sample.is_some() {
                self.tiles[idx].sample = sample;
            }
        } else {
            self.tiles.push(StageTile { key, sample });
        }
        self.relayout(Trigger::TileAdded)
    }

    /// Records the intrinsic resolution of a tile once its media has loaded.
    /// Unknown keys are ignored but still trigger a re-layout.
    pub fn set_sample<Q>(&mut self, key: &Q, sample: TileSample) -> Result<Layout>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        if let Some(t) = self.tiles.iter_mut().find(|t| Borrow::<Q>::borrow(&t.key) == key) {
            t.sample = Some(sample);
        }
        self.relayout(Trigger::SourceLoaded)
    }

    /// Removes a tile. Unknown keys leave the tile list untouched.
    pub fn remove_tile<Q>(&mut self, key: &Q) -> Result<Layout>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        if let Some(idx) = self.tiles.iter().position(|t| Borrow::<Q>::borrow(&t.key) == key) {
            self.tiles.remove(idx);
        }
        self.relayout(Trigger::TileRemoved)
    }

    /// Drops every tile and the applied layout. The container is kept.
    /// Counts as a new generation so results computed before the clear are stale.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.applied = None;
        self.generation += 1;
        debug!(generation = self.generation, "stage cleared");
    }

    /// Re-runs the packer over the current container and tiles.
    pub fn relayout(&mut self, trigger: Trigger) -> Result<Layout> {
        let samples: Vec<TileSample> = self.tiles.iter().filter_map(|t| t.sample).collect();
        match self.packer.pack(self.container, &samples, self.tiles.len()) {
            Ok(layout) => {
                self.applied = Some(layout);
                self.generation += 1;
                debug!(
                    ?trigger,
                    generation = self.generation,
                    columns = layout.columns,
                    width = layout.tile.width,
                    height = layout.tile.height,
                    "layout applied"
                );
                Ok(layout)
            }
            Err(e) => {
                debug!(?trigger, error = %e, "layout skipped");
                Err(e)
            }
        }
    }
}

impl<K: PartialEq + std::fmt::Debug> Default for Stage<K> {
    fn default() -> Self {
        Self::new(PackerConfig::default())
    }
}
