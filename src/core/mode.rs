use serde::{Deserialize, Serialize};

/// How a transition reports business-rule failures.
///
/// Soft transitions return `false` and leave reasons on the subject; hard
/// transitions turn the same outcomes into typed errors.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Soft,
    Hard,
}

impl Mode {
    pub fn is_hard(self) -> bool {
        matches!(self, Mode::Hard)
    }

    /// Hard when either side is hard.
    pub fn escalate(self, hard: bool) -> Self {
        if hard {
            Mode::Hard
        } else {
            self
        }
    }
}
