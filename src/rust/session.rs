use std::fmt;

use log::debug;

use crate::application::RawApplication;
use crate::encoder::encode;
use crate::model::{JsonForestLoader, ModelLoader};
use crate::predictor::{PredictionError, PredictionOutcome, PredictorAdapter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the user to ask for a prediction
    Idle,
    /// Encoding, loading the model and predicting
    Predicting,
}

/// What the prediction page shows after one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Outcome(PredictionOutcome),
    Failure(PredictionError),
    /// The model answered with a label that has no outcome.
    Nothing,
}

impl Feedback {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Success-style feedback (approval) as opposed to error-style feedback
    /// (rejection or failure).
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Outcome(outcome) if outcome.is_approved())
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outcome(outcome) => write!(f, "{}", outcome.message()),
            Self::Failure(err) => write!(f, "{}", err),
            Self::Nothing => Ok(()),
        }
    }
}

/// Drives the prediction page: one submission runs the whole pipeline once.
pub struct PredictionSession<L = JsonForestLoader> {
    adapter: PredictorAdapter<L>,
    state: SessionState,
    submissions: u64,
}

impl<L: ModelLoader> PredictionSession<L> {
    pub fn new(adapter: PredictorAdapter<L>) -> Self {
        Self {
            adapter,
            state: SessionState::Idle,
            submissions: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn submissions(&self) -> u64 {
        self.submissions
    }

    /// Handles one "Click to Predict". Always returns to [`SessionState::Idle`].
    pub fn submit(&mut self, application: &RawApplication) -> Feedback {
        self.transition(SessionState::Predicting);
        self.submissions += 1;

        let features = encode(application);
        let feedback = match self.adapter.predict(&features) {
            Ok(Some(outcome)) => Feedback::Outcome(outcome),
            Ok(None) => Feedback::Nothing,
            Err(err) => Feedback::Failure(err),
        };

        self.transition(SessionState::Idle);
        feedback
    }

    fn transition(&mut self, next: SessionState) {
        debug!("Session state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
