//! Timed nodes that drive a value.
//!
//! A [`Tween`] turns its position into an eased progress in `[0, 1]`
//! and hands it to a mutation closure on every change. [`property`]
//! builds on it to interpolate a pair of [`Value`]s.

use alloc::boxed::Box;
use core::cell::RefCell;

use motionkit_interp::error::InterpolationError;
use motionkit_interp::value::Value;

use crate::ease::{self, EaseFn};
use crate::event::AnimationEvent;
use crate::node::{Animation, Backend, ProgressState};
use crate::playback::Playback;

/// Called once with the node's `finished` flag when it reaches its
/// end.
pub type Completion = Box<dyn Fn(bool)>;

/// When and how fast a tween runs.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    pub duration: f64,
    pub delay: f64,
    pub curve: EaseFn,
}

impl Timing {
    /// Linear timing without delay.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            delay: 0.0,
            curve: ease::linear,
        }
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_curve(mut self, curve: EaseFn) -> Self {
        self.curve = curve;
        self
    }

    /// Eased progress at `position`.
    ///
    /// The raw progress is clamped to `[0, 1]` before easing. A
    /// zero-length tween jumps from `0` to `1` once past its delay.
    pub fn progress_at(&self, position: f64) -> f64 {
        let raw = if self.duration > 0.0 {
            (position - self.delay) / self.duration
        } else if position > 0.0 && position >= self.delay {
            1.0
        } else {
            0.0
        };

        (self.curve)(raw.clamp(0.0, 1.0))
    }
}

/// Backend calling a mutation closure with the eased progress.
pub struct Tween {
    timing: Timing,
    mutation: RefCell<Box<dyn FnMut(f64)>>,
    playback: Playback,
}

impl Tween {
    pub fn new(timing: Timing, mutation: impl FnMut(f64) + 'static) -> Self {
        Self {
            timing,
            mutation: RefCell::new(Box::new(mutation)),
            playback: Playback::default(),
        }
    }
}

impl Backend for Tween {
    fn duration(&self) -> f64 {
        self.timing.duration
    }

    fn delay(&self) -> f64 {
        self.timing.delay
    }

    fn is_finished(&self, node: &Animation) -> bool {
        node.progress_state() == ProgressState::End
    }

    fn commit(&self, node: &Animation) {
        self.playback.start(node);
    }

    fn position_changed(&self, _node: &Animation, _from: f64, to: f64) {
        let progress = self.timing.progress_at(to);
        (&mut *self.mutation.borrow_mut())(progress);
    }
}

/// Create an independent [`Tween`] node.
pub fn tween(
    timing: Timing,
    mutation: impl FnMut(f64) + 'static,
    completion: Option<Completion>,
) -> Animation {
    let animation = Animation::new(Tween::new(timing, mutation));
    match completion {
        Some(completion) => animation
            .on(AnimationEvent::End, move |a| completion(a.is_finished())),
        None => animation,
    }
}

/// Animate a property from `from` to `to`, feeding every intermediate
/// value to `setter`.
///
/// Fails if the endpoints cannot be interpolated with each other.
pub fn property(
    from: Value,
    to: Value,
    timing: Timing,
    mut setter: impl FnMut(Value) + 'static,
) -> Result<Animation, InterpolationError> {
    from.try_interpolate(&to, 0.0)?;

    Ok(tween(
        timing,
        move |t| setter(from.interpolate(&to, t)),
        None,
    ))
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::Cell;

    use bevy_math::DVec2;
    use motionkit_interp::geometry::Size;

    use super::*;
    use crate::registry;
    use crate::runtime;

    #[test]
    fn progress_respects_delay_and_clamps() {
        let timing = Timing::new(2.0).with_delay(1.0);

        assert_eq!(timing.progress_at(0.0), 0.0);
        assert_eq!(timing.progress_at(1.0), 0.0);
        assert_eq!(timing.progress_at(2.0), 0.5);
        assert_eq!(timing.progress_at(3.0), 1.0);
        assert_eq!(timing.progress_at(10.0), 1.0);
    }

    #[test]
    fn zero_duration_jumps_after_delay() {
        let timing = Timing::new(0.0).with_delay(1.0);

        assert_eq!(timing.progress_at(0.5), 0.0);
        assert_eq!(timing.progress_at(1.0), 1.0);
        assert_eq!(Timing::new(0.0).progress_at(0.0), 0.0);
        assert_eq!(Timing::new(0.0).progress_at(f64::MIN_POSITIVE), 1.0);
    }

    #[test]
    fn curve_is_applied() {
        let timing = Timing::new(1.0).with_curve(ease::quad_in);
        assert_eq!(timing.progress_at(0.5), 0.25);
    }

    #[test]
    fn tween_runs_to_completion() {
        let values = Rc::new(RefCell::new(Vec::new()));
        let finished = Rc::new(Cell::new(None));

        let v = values.clone();
        let f = finished.clone();
        let animation = tween(
            Timing::new(1.0),
            move |t| v.borrow_mut().push(t),
            Some(Box::new(move |done: bool| f.set(Some(done)))),
        );

        // First frame starts the playback and ticks it once.
        runtime::advance(0.25);
        assert_eq!(animation.position(), 0.25);
        assert_eq!(animation.progress_state(), ProgressState::InProgress);

        runtime::advance(0.25);
        runtime::advance(0.75);

        assert_eq!(*values.borrow(), [0.25, 0.5, 1.0]);
        assert_eq!(animation.progress_state(), ProgressState::End);
        assert_eq!(finished.get(), Some(true));
        assert!(!registry::contains(&animation));
        assert_eq!(runtime::active_tickers(), 0);
    }

    #[test]
    fn owned_tween_does_not_start_itself() {
        let ticks = Rc::new(Cell::new(0));
        let t = ticks.clone();
        let animation = tween(
            Timing::new(1.0),
            move |_| t.set(t.get() + 1),
            None,
        );
        animation.set_owner(&Animation::inert());

        runtime::advance(0.5);
        assert_eq!(ticks.get(), 0);
        assert_eq!(animation.position(), 0.0);
    }

    #[test]
    fn property_drives_setter_with_values() {
        let last = Rc::new(RefCell::new(None));

        let l = last.clone();
        let animation = property(
            Value::from(DVec2::new(0.0, 0.0)),
            Value::from(DVec2::new(10.0, 20.0)),
            Timing::new(1.0),
            move |value| *l.borrow_mut() = Some(value),
        )
        .unwrap();

        runtime::advance(0.25);
        assert_eq!(*last.borrow(), Some(Value::from(DVec2::new(2.5, 5.0))));

        runtime::advance(1.0);
        assert_eq!(
            *last.borrow(),
            Some(Value::from(DVec2::new(10.0, 20.0)))
        );
        assert!(animation.is_finished());
    }

    #[test]
    fn property_rejects_mismatched_endpoints() {
        let result = property(
            Value::from(DVec2::ZERO),
            Value::from(Size::ZERO),
            Timing::new(1.0),
            |_| {},
        );

        assert!(matches!(
            result,
            Err(InterpolationError::TypeMismatch { .. })
        ));
    }
}
