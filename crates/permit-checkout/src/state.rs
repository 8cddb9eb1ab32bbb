//! Submission State
//!
//! `Idle -> Loading -> Error(msg)`; success leaves through navigation and is
//! never observed here.

use serde::{Deserialize, Serialize};

use crate::currency::{BASE_FEE, CurrencyCode, format_fee};

/// Submission status owned by the presentation surface
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading,
    Error(String),
}

impl SubmissionState {
    pub const fn is_loading(&self) -> bool {
        matches!(self, SubmissionState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Everything the modal lets the user control
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalState {
    pub currency: CurrencyCode,
    pub submission: SubmissionState,
}

impl ModalState {
    /// Submit control is enabled unless a submission is loading
    pub const fn can_submit(&self) -> bool {
        !self.submission.is_loading()
    }

    pub fn select_currency(&mut self, code: impl AsRef<str>) {
        self.currency = CurrencyCode::new(code);
    }

    /// Record a transition reported by the checkout flow
    pub fn apply(&mut self, state: SubmissionState) {
        self.submission = state;
    }

    /// Fee shown next to the selector
    pub fn fee_label(&self) -> String {
        format_fee(BASE_FEE, &self.currency)
    }
}
