use crate::foundation::error::{TitleError, TitleResult};

/// Default exponent of the ease-out power curve.
pub const DEFAULT_EASING_EXPONENT: f64 = 4.0;

/// Remapping of normalized progress `[0, 1]` onto `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ease {
    /// `1 - (1 - t)^exponent`.
    OutPow {
        /// Curve exponent, must be `> 0`.
        exponent: f64,
    },
}

impl Default for Ease {
    fn default() -> Self {
        Self::OutPow {
            exponent: DEFAULT_EASING_EXPONENT,
        }
    }
}

impl Ease {
    /// Apply the curve. Input and output are both clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let eased = match self {
            Self::OutPow { exponent } => 1.0 - (1.0 - t).powf(exponent),
        };
        eased.clamp(0.0, 1.0)
    }

    /// Reject curves that are not monotonic on `[0, 1]`.
    pub fn validate(self) -> TitleResult<()> {
        match self {
            Self::OutPow { exponent } if !(exponent.is_finite() && exponent > 0.0) => Err(
                TitleError::validation(format!("easing exponent must be > 0 (got {exponent})")),
            ),
            Self::OutPow { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
