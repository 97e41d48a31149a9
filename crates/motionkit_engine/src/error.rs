use thiserror::Error;

/// Misuse of the animation lifecycle.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationError {
    /// An owned animation is started through its owner, never
    /// directly.
    #[error("cannot begin a non-independent animation")]
    NotIndependent,
}
