//! The predictor family: static predictors plus history-based ones,
//! sharing one `analyze`/`report` surface.

use std::collections::HashMap;
use std::io::{self, Write};

use log::debug;

use crate::state::{OneBitState, SaturationState};

/// Variant-specific state. Counters (`predictions`/`hits`) live on
/// `Predictor` itself since every variant accumulates them the same way;
/// only the prediction logic differs per kind.
#[derive(Debug)]
enum Kind {
    NeverJump,
    AlwaysJump,
    JumpIfTargetIsLower,
    OneBitHistory(HashMap<u64, OneBitState>),
    TwoBitSaturation(HashMap<u64, SaturationState>),
    TwoBitHysteresis(HashMap<u64, SaturationState>),
}

/// A branch predictor: one of six variants, each with independent hit
/// statistics. History tables grow monotonically and are never evicted —
/// acceptable for bounded traces.
#[derive(Debug)]
pub struct Predictor {
    description: &'static str,
    kind: Kind,
    predictions: u64,
    hits: u64,
}

impl Predictor {
    #[must_use]
    pub fn never_jump() -> Self {
        Self::new("Never Jump Predictor", Kind::NeverJump)
    }

    #[must_use]
    pub fn always_jump() -> Self {
        Self::new("Always Jump Predictor", Kind::AlwaysJump)
    }

    #[must_use]
    pub fn jump_if_target_is_lower() -> Self {
        Self::new("Jump If Target Is Lower Predictor", Kind::JumpIfTargetIsLower)
    }

    #[must_use]
    pub fn one_bit_history() -> Self {
        Self::new("1 Bit History Predictor", Kind::OneBitHistory(HashMap::new()))
    }

    #[must_use]
    pub fn two_bit_saturation() -> Self {
        Self::new(
            "2 Bit Saturation History Predictor",
            Kind::TwoBitSaturation(HashMap::new()),
        )
    }

    #[must_use]
    pub fn two_bit_hysteresis() -> Self {
        Self::new(
            "2 Bit Hysteresis History Predictor",
            Kind::TwoBitHysteresis(HashMap::new()),
        )
    }

    fn new(description: &'static str, kind: Kind) -> Self {
        debug!("registering predictor: {description}");
        Self {
            description,
            kind,
            predictions: 0,
            hits: 0,
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }

    #[must_use]
    pub const fn predictions(&self) -> u64 {
        self.predictions
    }

    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Analyzes one conditional-branch outcome, updating counters and
    /// any history state, and returns whether the prediction hit.
    pub fn analyze(&mut self, ip: u64, target: u64, taken: bool) -> bool {
        self.predictions += 1;

        let hit = match &mut self.kind {
            Kind::NeverJump => !taken,
            Kind::AlwaysJump => taken,
            Kind::JumpIfTargetIsLower => (target < ip) == taken,
            Kind::OneBitHistory(history) => {
                let state = history.entry(ip).or_default();
                let hit = matches!(
                    (*state, taken),
                    (OneBitState::Taken, true) | (OneBitState::NotTaken, false)
                );
                if !hit {
                    *state = if *state == OneBitState::Taken {
                        OneBitState::NotTaken
                    } else {
                        OneBitState::Taken
                    };
                }
                hit
            }
            Kind::TwoBitSaturation(history) => {
                let state = history.entry(ip).or_default();
                let (hit, next) = state.saturation_step(taken);
                *state = next;
                hit
            }
            Kind::TwoBitHysteresis(history) => {
                let state = history.entry(ip).or_default();
                let (hit, next) = state.hysteresis_step(taken);
                *state = next;
                hit
            }
        };

        if hit {
            self.hits += 1;
        }
        hit
    }

    pub fn report(&self, sink: &mut dyn Write) -> io::Result<()> {
        let quotient = self.hits as f64 / self.predictions as f64;
        writeln!(sink, "=====")?;
        writeln!(sink, "{}", self.description)?;
        writeln!(
            sink,
            "\thits/predictions: {} / {} = {quotient}",
            self.hits, self.predictions
        )
    }
}
