//! History state machines shared by the history-based predictors.

/// One-bit branch history: taken or not-taken, flipped on every miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneBitState {
    Taken,
    NotTaken,
}

impl Default for OneBitState {
    /// Default is strong-taken, same as the two-bit variants.
    fn default() -> Self {
        Self::Taken
    }
}

/// The four-valued counter shared by the saturation and hysteresis
/// predictors: `N <-> n <-> t <-> T`, strongly-not-taken to
/// strongly-taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaturationState {
    StronglyNotTaken,
    WeaklyNotTaken,
    WeaklyTaken,
    StronglyTaken,
}

impl Default for SaturationState {
    fn default() -> Self {
        Self::StronglyTaken
    }
}

impl SaturationState {
    #[must_use]
    pub const fn predicts_taken(self) -> bool {
        matches!(self, Self::WeaklyTaken | Self::StronglyTaken)
    }

    /// Transition table for the saturation variant. Returns
    /// `(hit, next_state)`.
    ///
    /// The `WeaklyNotTaken` + not-taken row counts as a hit even though it
    /// leaves the chain at its weakest pole rather than at a strong one —
    /// a known architecture-textbook quirk that is preserved here rather
    /// than "fixed".
    #[must_use]
    pub const fn saturation_step(self, taken: bool) -> (bool, Self) {
        use SaturationState::{StronglyNotTaken, StronglyTaken, WeaklyNotTaken, WeaklyTaken};
        match (self, taken) {
            (StronglyTaken, true) => (true, StronglyTaken),
            (StronglyTaken, false) => (false, WeaklyTaken),
            (WeaklyTaken, true) => (true, StronglyTaken),
            (WeaklyTaken, false) => (false, WeaklyNotTaken),
            (WeaklyNotTaken, true) => (false, WeaklyTaken),
            (WeaklyNotTaken, false) => (true, StronglyNotTaken),
            (StronglyNotTaken, true) => (false, WeaklyNotTaken),
            (StronglyNotTaken, false) => (true, StronglyNotTaken),
        }
    }

    /// Transition table for the hysteresis variant: weak states jump
    /// directly to the opposite strong pole on a miss instead of
    /// stepping one position.
    #[must_use]
    pub const fn hysteresis_step(self, taken: bool) -> (bool, Self) {
        use SaturationState::{StronglyNotTaken, StronglyTaken, WeaklyNotTaken, WeaklyTaken};
        match (self, taken) {
            (StronglyTaken, true) => (true, StronglyTaken),
            (StronglyTaken, false) => (false, WeaklyTaken),
            (WeaklyTaken, true) => (true, StronglyTaken),
            (WeaklyTaken, false) => (false, StronglyNotTaken),
            (WeaklyNotTaken, true) => (false, StronglyTaken),
            (WeaklyNotTaken, false) => (true, StronglyNotTaken),
            (StronglyNotTaken, true) => (false, WeaklyNotTaken),
            (StronglyNotTaken, false) => (true, StronglyNotTaken),
        }
    }
}
