//! Font-size fitting: the largest size at which every placement stays on
//! the canvas.
//!
//! The search is a bounded descending walk: measure every placement at the
//! current size, and if any rendered box would leave the canvas, shrink by
//! `step` and try again. A box counts as fitting only with the outline
//! stroke rim included, since the stroke draws outside the measured extent.
//! The walk stops at `floor` no matter what — when even
//! the floor size does not fit, the outcome says so (`fitted == false`) and a
//! warning is logged instead of looping forever. Callers decide whether an
//! unfitted floor outcome is acceptable; the pipeline treats it as fatal.
//!
//! No I/O happens here: measurement goes through [`TextRenderer`] only.

use log::warn;
use thiserror::Error;

use crate::compose::STROKE_WIDTH;
use crate::layout::{Anchor, TextPlacement};
use crate::text::TextRenderer;

#[derive(Error, Debug)]
pub enum FitError {
    #[error("no placements to fit")]
    NoPlacements,
    #[error("invalid size search: start {start}, step {step}, floor {floor}")]
    InvalidSearch { start: u32, step: u32, floor: u32 },
}

/// Parameters of the descending size search.
#[derive(Debug, Clone, Copy)]
pub struct SizeSearch {
    /// First size tried, in points.
    pub start: u32,
    /// Decrement between attempts.
    pub step: u32,
    /// Smallest size ever returned. Must be > 0.
    pub floor: u32,
}

impl Default for SizeSearch {
    fn default() -> Self {
        Self { start: 80, step: 2, floor: 8 }
    }
}

impl SizeSearch {
    fn validate(&self) -> Result<(), FitError> {
        if self.floor == 0 || self.step == 0 || self.start < self.floor {
            return Err(FitError::InvalidSearch {
                start: self.start,
                step: self.step,
                floor: self.floor,
            });
        }
        Ok(())
    }
}

/// Result of a fitting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitOutcome {
    /// The chosen size in points.
    pub size: u32,
    /// Whether every placement's box is in bounds at `size`. `false` only
    /// when the floor was reached without a fit.
    pub fitted: bool,
}

/// Axis-aligned bounding box of a placement's text at a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementBox {
    pub min: (f32, f32),
    pub max: (f32, f32),
}

impl PlacementBox {
    pub fn within(&self, width: u32, height: u32) -> bool {
        self.min.0 >= 0.0
            && self.min.1 >= 0.0
            && self.max.0 <= width as f32
            && self.max.1 <= height as f32
    }

    /// The box grown by `margin` pixels on every side.
    pub fn inflate(&self, margin: f32) -> PlacementBox {
        PlacementBox {
            min: (self.min.0 - margin, self.min.1 - margin),
            max: (self.max.0 + margin, self.max.1 + margin),
        }
    }
}

/// Where a placement's box lands at `size`: the anchor point pins the edge or
/// corner named by the placement's anchors, not the box's top-left.
pub fn placement_box(
    renderer: &dyn TextRenderer,
    placement: &TextPlacement,
    size: u32,
) -> PlacementBox {
    let extent = renderer.measure(&placement.text, size as f32);
    let x_min = placement.anchor_point.0
        - match placement.h_anchor {
            Anchor::Start => 0.0,
            Anchor::Center => extent.width / 2.0,
            Anchor::End => extent.width,
        };
    let y_min = placement.anchor_point.1
        - match placement.v_anchor {
            Anchor::Start => 0.0,
            Anchor::Center => extent.height / 2.0,
            Anchor::End => extent.height,
        };
    PlacementBox {
        min: (x_min, y_min),
        max: (x_min + extent.width, y_min + extent.height),
    }
}

/// Find the largest size in `{start, start-step, ...} ∩ [floor, start]` at
/// which every placement fits the canvas.
pub fn fit_size(
    renderer: &dyn TextRenderer,
    placements: &[TextPlacement],
    canvas: (u32, u32),
    search: SizeSearch,
) -> Result<FitOutcome, FitError> {
    if placements.is_empty() {
        return Err(FitError::NoPlacements);
    }
    search.validate()?;

    let (width, height) = canvas;
    // the outline stroke draws at offsets up to STROKE_WIDTH around the
    // measured box, so the stroke rim is part of the fit
    let margin = STROKE_WIDTH as f32;
    let mut size = search.start;
    loop {
        let fits = placements
            .iter()
            .all(|p| placement_box(renderer, p, size).inflate(margin).within(width, height));
        if fits {
            return Ok(FitOutcome { size, fitted: true });
        }
        if size <= search.floor {
            warn!(
                "text does not fit {}x{} canvas even at floor size {}",
                width, height, search.floor
            );
            return Ok(FitOutcome { size: search.floor, fitted: false });
        }
        size = size.saturating_sub(search.step).max(search.floor);
    }
}
