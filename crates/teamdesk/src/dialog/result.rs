//! How a dialog ended.

use serde::{Deserialize, Serialize};

/// How a dialog ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DialogResult {
    /// The dialog was rejected (cancelled, or closed without confirming).
    #[default]
    Rejected,

    /// The dialog was accepted.
    Accepted,
}

impl DialogResult {
    /// Check if the dialog was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, DialogResult::Accepted)
    }

    /// Check if the dialog was rejected.
    pub fn is_rejected(&self) -> bool {
        matches!(self, DialogResult::Rejected)
    }

    /// The result of a close request carrying `is_canceled`.
    pub fn from_canceled(is_canceled: bool) -> Self {
        DialogResult::from(!is_canceled)
    }
}

impl From<bool> for DialogResult {
    fn from(accepted: bool) -> Self {
        if accepted {
            DialogResult::Accepted
        } else {
            DialogResult::Rejected
        }
    }
}

impl From<DialogResult> for bool {
    fn from(result: DialogResult) -> Self {
        result.is_accepted()
    }
}
