use thiserror::Error;

/// Caller misuse detected while building a transform. Never retried or patched up with a default.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum MathError {
    #[error("rotation axis has zero length")]
    ZeroLengthAxis,
    #[error("camera up vector is collinear with the view direction")]
    CollinearCameraBasis,
}
