//! [`Animation`]: node::Animation
//! [`Backend`]: node::Backend
//! [`Tween`]: tween::Tween
//! [`Chain`]: chain::Chain
//! [`Group`]: group::Group
//!
//! # MotionKit Engine
//!
//! Animation nodes and the single-threaded runtime that drives them.
//!
//! - **[`Animation`]**: a shared handle to a node. A node tracks a
//!   playback position, derives its progress state from it, emits
//!   `Begin`/`End` events and reports to its owner.
//!
//! - **[`Backend`]**: the behaviour plugged into a node. [`Tween`]
//!   eases a progress value into a closure, [`Chain`] and [`Group`]
//!   drive child nodes in sequence or in parallel.
//!
//! - **[`runtime`]**: deferred starts and per-frame tickers. The host
//!   calls [`runtime::advance`] once per frame.
//!
//! Nodes that nothing owns are kept alive by the [`registry`] until
//! they end, so animations can be fire-and-forget.

extern crate alloc;

pub mod chain;
pub mod ease;
pub mod error;
pub mod event;
pub mod group;
pub mod node;
pub mod playback;
pub mod registry;
pub mod runtime;
pub mod tween;

pub mod prelude {
    pub use crate::chain::chain;
    pub use crate::ease::{self, EaseFn};
    pub use crate::error::AnimationError;
    pub use crate::event::AnimationEvent;
    pub use crate::group::{group, group_with_completion};
    pub use crate::node::{
        Animation, AnimationId, Backend, Inert, ProgressState,
        WeakAnimation,
    };
    pub use crate::runtime;
    pub use crate::tween::{property, tween, Completion, Timing, Tween};
}
