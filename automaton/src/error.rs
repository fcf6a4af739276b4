//! Error types for the automaton engine.

use thiserror::Error;

/// Setup-time failures. Every variant aborts the run before the first
/// generation is computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AutomatonError {
    /// The rule string is not of the form `B<set>/S<set>`.
    #[error("invalid rule format {rule:?}: {reason}")]
    InvalidRuleFormat {
        /// The offending rule string.
        rule: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A birth or survival threshold cannot be reached with the active kernel.
    #[error("rule {rule:?}: threshold {count} exceeds the kernel's maximum neighbor count {max}")]
    RuleOutOfRange {
        /// The offending rule string.
        rule: String,
        /// The threshold that is too large.
        count: u16,
        /// Largest neighbor count the kernel can produce.
        max: u16,
    },

    /// Both birth and survival sets are empty and the configuration forbids it.
    #[error("rule {rule:?} has empty birth and survival sets")]
    EmptyRule {
        /// The offending rule string.
        rule: String,
    },

    /// Kernel side length is even or smaller than 3.
    #[error("invalid kernel size {size}: must be odd and at least 3")]
    InvalidKernelSize {
        /// The requested side length.
        size: usize,
    },

    /// Grid dimensions do not fit the configured kernel or a previous grid.
    #[error("dimension mismatch: expected {expected}, got {width}x{height}")]
    DimensionMismatch {
        /// Human-readable requirement, e.g. `"at least 3x3"`.
        expected: String,
        /// Width of the offending grid.
        width: usize,
        /// Height of the offending grid.
        height: usize,
    },

    /// Random-fill probability outside `[0, 1]`.
    #[error("invalid live-cell density {0}: must be within [0, 1]")]
    InvalidDensity(f64),
}

impl AutomatonError {
    pub(crate) fn rule_format(rule: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRuleFormat {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn dimensions(expected: impl Into<String>, width: usize, height: usize) -> Self {
        Self::DimensionMismatch {
            expected: expected.into(),
            width,
            height,
        }
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, AutomatonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_offending_value() {
        let err = AutomatonError::rule_format("B3/S23/x", "expected exactly one '/'");
        assert!(err.to_string().contains("B3/S23/x"));

        let err = AutomatonError::InvalidKernelSize { size: 4 };
        assert!(err.to_string().contains('4'));

        let err = AutomatonError::RuleOutOfRange {
            rule: "B9/S".into(),
            count: 9,
            max: 8,
        };
        assert!(err.to_string().contains("threshold 9"));
    }
}
