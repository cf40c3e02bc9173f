//! Layout templates: where text goes on the canvas.
//!
//! A template is pure geometry — fractional anchor points plus anchor and
//! alignment rules per text slot — resolved to absolute pixels against a
//! concrete canvas at composition time. No measurement or rendering happens
//! here; the fitting pass owns that.
//!
//! Two templates ship:
//! - [`LayoutTemplate::CenteredStacked`]: both lines horizontally centered,
//!   greeting near the top, blessing at 70% height.
//! - [`LayoutTemplate::DiagonalCorners`]: greeting tucked into the top-left,
//!   blessing into the bottom-right, each aligned to lean inward.

use rand::Rng;

/// Which edge of the text box the anchor point pins, per axis.
/// `Start` = left/top edge, `End` = right/bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Center,
    End,
}

/// Horizontal alignment of lines within the text box. For the single-line
/// strings this pipeline draws it coincides with the horizontal anchor, but
/// it is part of a placement's identity and carried through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// One text string plus the rule for positioning it, in absolute pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    pub text: String,
    pub anchor_point: (f32, f32),
    pub h_anchor: Anchor,
    pub v_anchor: Anchor,
    pub alignment: Alignment,
}

/// One slot of a template, in canvas fractions.
#[derive(Debug, Clone, Copy)]
struct Slot {
    fx: f32,
    fy: f32,
    h_anchor: Anchor,
    v_anchor: Anchor,
    alignment: Alignment,
}

impl Slot {
    fn resolve(&self, text: &str, width: u32, height: u32) -> TextPlacement {
        TextPlacement {
            text: text.to_string(),
            anchor_point: (self.fx * width as f32, self.fy * height as f32),
            h_anchor: self.h_anchor,
            v_anchor: self.v_anchor,
            alignment: self.alignment,
        }
    }
}

/// The template catalog. Selection is uniform over variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutTemplate {
    CenteredStacked,
    DiagonalCorners,
}

impl LayoutTemplate {
    pub const ALL: [LayoutTemplate; 2] =
        [LayoutTemplate::CenteredStacked, LayoutTemplate::DiagonalCorners];

    /// Pick a template uniformly at random.
    pub fn choose(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    fn slots(self) -> [Slot; 2] {
        match self {
            LayoutTemplate::CenteredStacked => [
                Slot {
                    fx: 0.50,
                    fy: 0.10,
                    h_anchor: Anchor::Center,
                    v_anchor: Anchor::Start,
                    alignment: Alignment::Center,
                },
                Slot {
                    fx: 0.50,
                    fy: 0.70,
                    h_anchor: Anchor::Center,
                    v_anchor: Anchor::Start,
                    alignment: Alignment::Center,
                },
            ],
            LayoutTemplate::DiagonalCorners => [
                Slot {
                    fx: 0.05,
                    fy: 0.05,
                    h_anchor: Anchor::Start,
                    v_anchor: Anchor::Start,
                    alignment: Alignment::Left,
                },
                Slot {
                    fx: 0.95,
                    fy: 0.90,
                    h_anchor: Anchor::End,
                    v_anchor: Anchor::End,
                    alignment: Alignment::Right,
                },
            ],
        }
    }

    /// Resolve the template against a canvas: greeting in the first slot,
    /// blessing in the second.
    pub fn resolve(
        self,
        greeting: &str,
        blessing: &str,
        width: u32,
        height: u32,
    ) -> Vec<TextPlacement> {
        let [first, second] = self.slots();
        vec![
            first.resolve(greeting, width, height),
            second.resolve(blessing, width, height),
        ]
    }
}
