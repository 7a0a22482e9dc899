//! Reference sample selection.
//!
//! Every tile in a layout pass shares one aspect ratio, taken from a single
//! "reference" sample. Unmeasured samples (zero or non-finite sides, e.g. a
//! video whose metadata has not loaded) never become the reference.

use crate::config::ReferencePolicy;
use crate::model::TileSample;

/// Picks the reference sample according to `policy`, or `None` if no sample is measured.
pub fn select(samples: &[TileSample], policy: ReferencePolicy) -> Option<TileSample> {
    let measured = samples.iter().copied().filter(TileSample::is_measured);
    match policy {
        ReferencePolicy::LargestArea => measured.fold(None, |best, s| match best {
            Some(b) if b.area() >= s.area() => Some(b),
            _ => Some(s),
        }),
        ReferencePolicy::Dominant => measured.fold(None, |best, s| match best {
            Some(b) if !(s.width > b.width && s.height > b.height) => Some(b),
            _ => Some(s),
        }),
    }
}
