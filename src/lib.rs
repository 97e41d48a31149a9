//! [`Value`]: motionkit_interp::value::Value
//! [`Animation`]: motionkit_engine::node::Animation
//! [`Tween`]: motionkit_engine::tween::Tween
//! [`runtime`]: motionkit_engine::runtime
//!
//! # MotionKit
//!
//! **MotionKit** is a declarative animation sequencing library.
//! Describe "animate this property from A to B over D seconds", then
//! compose those descriptions into sequential and parallel timelines.
//!
//! ## Core Concepts
//!
//! - **[`Value`]**: a shape-tagged interpolation endpoint. Scalars,
//!   booleans, points, sizes, rectangles, colors and 3D transforms
//!   blend without the caller knowing the concrete shape.
//!
//! - **[`Animation`]**: a node that tracks a playback position,
//!   derives a progress state from it and emits lifecycle events.
//!   Nodes compose with
//!   [`then`](motionkit_engine::node::Animation::then) (one after
//!   another) and [`and`](motionkit_engine::node::Animation::and)
//!   (side by side).
//!
//! - **[`Tween`]**: the timed node that turns its position into an
//!   eased progress and applies it.
//!
//! - **[`runtime`]**: a single-threaded loop of deferred tasks and
//!   per-frame tickers. The host calls
//!   [`runtime::advance`](motionkit_engine::runtime::advance) once per
//!   frame.
//!
//! ## Using MotionKit
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use motionkit::prelude::*;
//!
//! let offset = Rc::new(RefCell::new(DVec2::ZERO));
//! let visible = Rc::new(RefCell::new(false));
//!
//! // Slide in, then show.
//! let o = offset.clone();
//! let slide = property(
//!     Value::from(DVec2::new(0.0, 0.0)),
//!     Value::from(DVec2::new(10.0, 20.0)),
//!     Timing::new(1.0),
//!     move |value| {
//!         if let Value::Point(p) = value {
//!             *o.borrow_mut() = p;
//!         }
//!     },
//! )
//! .unwrap();
//!
//! let v = visible.clone();
//! let timeline = slide.then_completion(move |_| *v.borrow_mut() = true);
//!
//! // Nothing moves until the loop turns.
//! assert_eq!(*offset.borrow(), DVec2::ZERO);
//!
//! runtime::advance(0.25);
//! assert_eq!(*offset.borrow(), DVec2::new(2.5, 5.0));
//! assert!(!*visible.borrow());
//!
//! runtime::advance(1.0);
//! assert_eq!(*offset.borrow(), DVec2::new(10.0, 20.0));
//! assert!(*visible.borrow());
//! assert_eq!(timeline.progress_state(), ProgressState::End);
//! ```

pub use motionkit_engine;
pub use motionkit_interp;

pub mod prelude {
    pub use motionkit_engine::prelude::*;
    pub use motionkit_interp::prelude::*;
}
