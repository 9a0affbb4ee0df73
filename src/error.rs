//! Failure taxonomy for trajectory construction and editing.
//!
//! Every build step returns a `Result`; composite layers wrap a lower-layer
//! failure with the name of the channel being built, forming a causal chain.
//! Out-of-range queries are clamped, never surfaced as errors.

use thiserror::Error;

/// A single interpolator build failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolationError {
    #[error("input has no samples")]
    EmptyInput,

    #[error("{interpolator} interpolation needs at least {min} samples, got {got}")]
    InsufficientSamples {
        interpolator: &'static str,
        min: usize,
        got: usize,
    },

    #[error("bases must be strictly increasing (violated at index {index})")]
    NonMonotonicBases { index: usize },

    #[error("{bases} bases but {values} values")]
    LengthMismatch { bases: usize, values: usize },
}

/// A trajectory-level failure, possibly wrapping the failure of an inner
/// channel or layer.
#[derive(Debug, Error)]
pub enum TrajectoryError {
    /// Building the named channel failed; `source` holds the cause.
    #[error("failed to build channel `{channel}`")]
    Channel {
        channel: &'static str,
        #[source]
        source: Box<TrajectoryError>,
    },

    #[error("invalid range [{from}, {to}]")]
    InvalidRange { from: f64, to: f64 },

    #[error(transparent)]
    Interpolation(#[from] InterpolationError),
}

impl TrajectoryError {
    /// Wrap this error as the failure of the named channel.
    pub fn in_channel(self, channel: &'static str) -> Self {
        TrajectoryError::Channel {
            channel,
            source: Box::new(self),
        }
    }

    /// Walk the channel wrappers down to the innermost cause.
    pub fn root_cause(&self) -> &TrajectoryError {
        match self {
            TrajectoryError::Channel { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_cause_unwraps_channel_chain() {
        let root = TrajectoryError::from(InterpolationError::EmptyInput);
        let wrapped = root.in_channel("x").in_channel("position").in_channel("pose");
        assert!(matches!(
            wrapped.root_cause(),
            TrajectoryError::Interpolation(InterpolationError::EmptyInput)
        ));
        assert_eq!(
            wrapped.to_string(),
            "failed to build channel `pose`"
        );
    }
}
