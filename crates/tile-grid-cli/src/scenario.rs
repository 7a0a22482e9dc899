//! Replayable host event scripts.
//!
//! A scenario is a YAML (or JSON) document listing the structural changes a
//! conferencing UI goes through. Each event is a single-key map (or a bare
//! name for events without data), e.g.:
//!
//! ```yaml
//! config:
//!   rounding: truncate
//! events:
//!   - resize: { width: 1280, height: 720 }
//!   - add: { key: alice, sample: 640x480 }
//!   - add: { key: bob }
//!   - sample: { key: bob, size: 1280x720 }
//!   - remove: alice
//!   - detach
//!   - relayout
//! ```
//!
//! The same script in JSON:
//!
//! ```json
//! {"events": [{"resize": {"width": 1280, "height": 720}}, {"remove": "alice"}, "detach"]}
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tile_grid_core::prelude::*;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: Option<PackerConfig>,
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Resize { width: f64, height: f64 },
    Detach,
    Add {
        key: String,
        #[serde(default)]
        sample: Option<String>,
    },
    Sample { key: String, size: String },
    Remove(String),
    Clear,
    Relayout,
}

/// Outcome of one replayed event.
#[derive(Debug, Serialize)]
pub struct Step {
    pub index: usize,
    pub event: Event,
    pub tiles: usize,
    pub generation: u64,
    /// Layout produced by this event, if the pass succeeded.
    pub layout: Option<Layout>,
    /// Why the pass was skipped, if it failed.
    pub skipped: Option<String>,
    pub style: TileStyle,
}

pub fn parse(text: &str) -> anyhow::Result<Scenario> {
    if text.trim_start().starts_with('{') {
        serde_json::from_str(text).context("parse JSON scenario")
    } else {
        serde_yaml::from_str(text).context("parse YAML scenario")
    }
}

/// Applies every event to a fresh stage and records what the host would see.
pub fn replay(scenario: &Scenario, cfg: PackerConfig) -> anyhow::Result<Vec<Step>> {
    let mut stage: Stage = Stage::new(scenario.config.unwrap_or(cfg));
    let mut steps = Vec::with_capacity(scenario.events.len());
    for (index, event) in scenario.events.iter().enumerate() {
        let outcome = apply(&mut stage, event)
            .with_context(|| format!("event #{index} ({event:?})"))?;
        let (layout, skipped) = match outcome {
            Some(Ok(l)) => (Some(l), None),
            Some(Err(e)) => (None, Some(e.to_string())),
            None => (None, None),
        };
        steps.push(Step {
            index,
            event: event.clone(),
            tiles: stage.tile_count(),
            generation: stage.generation(),
            layout,
            skipped,
            style: stage.tile_style(),
        });
    }
    Ok(steps)
}

/// Returns `None` for events that do not trigger a layout pass.
fn apply(
    stage: &mut Stage,
    event: &Event,
) -> anyhow::Result<Option<tile_grid_core::Result<Layout>>> {
    Ok(match event {
        Event::Resize { width, height } => Some(stage.resize(Container::new(*width, *height))),
        Event::Detach => {
            stage.detach();
            None
        }
        Event::Add { key, sample } => {
            let sample = sample
                .as_deref()
                .map(str::parse::<TileSample>)
                .transpose()?;
            Some(stage.add_tile(key.clone(), sample))
        }
        Event::Sample { key, size } => Some(stage.set_sample(key.as_str(), size.parse()?)),
        Event::Remove(key) => Some(stage.remove_tile(key.as_str())),
        Event::Clear => {
            stage.clear();
            None
        }
        Event::Relayout => Some(stage.relayout(Trigger::Manual)),
    })
}
