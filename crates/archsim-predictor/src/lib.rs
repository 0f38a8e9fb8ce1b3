//! The branch predictor family: static predictors and history-based
//! predictors sharing one `analyze`/`report` interface.

mod predictor;
mod state;

pub use predictor::Predictor;
pub use state::{OneBitState, SaturationState};
