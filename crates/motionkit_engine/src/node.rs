//! The animation node state machine.
//!
//! An [`Animation`] tracks a playback position and derives a coarse
//! [`ProgressState`] from it. Writing the position is the only thing
//! that moves the state machine. Whatever actually animates (tweening
//! a value, sequencing children) lives in a [`Backend`].
//!
//! Nodes compose through ownership: a container such as a
//! [chain](crate::chain) or [group](crate::group) becomes the owner
//! of its children. Owned nodes stop scheduling themselves and route
//! start requests to their owner, so starting any node of a
//! composition starts the whole composition.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use core::fmt::{self, Debug};

use log::{debug, trace, warn};
use motionkit_interp::interpolation::Interpolation;

use crate::ease;
use crate::error::AnimationError;
use crate::event::{AnimationEvent, Listeners};
use crate::registry;
use crate::runtime::{self, TaskHandle};
use crate::tween::{self, Completion, Timing};
use crate::{chain, group};

/// Coarse playback phase derived from the position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressState {
    /// `position <= 0`.
    #[default]
    Beginning,
    /// `0 < position < delay + duration`.
    InProgress,
    /// `position >= delay + duration`. Terminal.
    End,
}

impl ProgressState {
    /// State of a node of length `total` at `position`.
    pub fn at(position: f64, total: f64) -> Self {
        if position <= 0.0 {
            ProgressState::Beginning
        } else if position < total {
            ProgressState::InProgress
        } else {
            ProgressState::End
        }
    }
}

/// Unique identity of an [`Animation`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct AnimationId(u64);

impl AnimationId {
    fn next() -> Self {
        thread_local! {
            static NEXT_ID: Cell<u64> = const { Cell::new(0) };
        }

        NEXT_ID.with(|id| {
            id.set(id.get() + 1);
            AnimationId(id.get())
        })
    }
}

/// The behaviour behind an [`Animation`].
///
/// Every method has a default, so the unit-like [`Inert`] backend is a
/// valid (if idle) animation. Backends get shared access only and use
/// interior mutability for their own state.
pub trait Backend: 'static {
    fn duration(&self) -> f64 {
        0.0
    }

    fn delay(&self) -> f64 {
        0.0
    }

    /// Whether the animation ran to its end naturally. Reported to the
    /// owner when the animation completes.
    fn is_finished(&self, _node: &Animation) -> bool {
        false
    }

    /// Start driving the position over time.
    fn commit(&self, _node: &Animation) {}

    /// Called on every position change, after the new position and
    /// progress state are stored and before the owner and listeners
    /// are notified.
    fn position_changed(&self, _node: &Animation, _from: f64, _to: f64) {
    }

    /// Owner hook: a child changed its progress state.
    fn child_state_changed(
        &self,
        _node: &Animation,
        _child: &Animation,
        _state: ProgressState,
    ) {
    }

    /// Owner hook: a child reached its end.
    fn child_completed(
        &self,
        _node: &Animation,
        _child: &Animation,
        _finished: bool,
    ) {
    }
}

/// A backend that never drives itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct Inert;

impl Backend for Inert {}

struct Node {
    id: AnimationId,
    backend: Box<dyn Backend>,
    state: RefCell<NodeState>,
}

#[derive(Default)]
struct NodeState {
    position: f64,
    progress: ProgressState,
    owner: Option<WeakAnimation>,
    listeners: Listeners,
    /// The deferred self-start, if one is queued.
    pending_start: Option<TaskHandle>,
}

/// Shared handle to an animation node.
///
/// Cloning the handle does not clone the animation.
#[derive(Clone)]
pub struct Animation(Rc<Node>);

/// Non-owning handle to an animation node.
#[derive(Clone)]
pub struct WeakAnimation(Weak<Node>);

impl WeakAnimation {
    pub fn upgrade(&self) -> Option<Animation> {
        self.0.upgrade().map(Animation)
    }
}

impl Debug for WeakAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WeakAnimation")
    }
}

impl Animation {
    /// Create an independent animation and schedule it to start on the
    /// next turn of the [runtime](crate::runtime).
    pub fn new(backend: impl Backend) -> Self {
        let animation = Self(Rc::new(Node {
            id: AnimationId::next(),
            backend: Box::new(backend),
            state: RefCell::new(NodeState::default()),
        }));

        registry::insert(&animation);
        animation.schedule_start();

        animation
    }

    /// An animation with the [`Inert`] backend.
    pub fn inert() -> Self {
        Self::new(Inert)
    }

    #[inline]
    pub fn id(&self) -> AnimationId {
        self.0.id
    }

    #[inline]
    pub fn downgrade(&self) -> WeakAnimation {
        WeakAnimation(Rc::downgrade(&self.0))
    }

    /// Returns `true` if both handles point to the same animation.
    #[inline]
    pub fn ptr_eq(&self, other: &Animation) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// Getter methods.
impl Animation {
    #[inline]
    pub fn duration(&self) -> f64 {
        self.0.backend.duration()
    }

    #[inline]
    pub fn delay(&self) -> f64 {
        self.0.backend.delay()
    }

    /// `delay + duration`.
    #[inline]
    pub fn total_duration(&self) -> f64 {
        self.delay() + self.duration()
    }

    /// The position that puts this animation in
    /// [`ProgressState::End`].
    ///
    /// This is the total duration, except for zero-length animations:
    /// position `0` always means [`ProgressState::Beginning`], so they
    /// end at the smallest positive position instead.
    pub fn end_position(&self) -> f64 {
        let total = self.total_duration();
        if total > 0.0 {
            total
        } else {
            f64::MIN_POSITIVE
        }
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.0.state.borrow().position
    }

    #[inline]
    pub fn progress_state(&self) -> ProgressState {
        self.0.state.borrow().progress
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.0.backend.is_finished(self)
    }

    /// The container driving this animation, if any.
    pub fn owner(&self) -> Option<Animation> {
        self.0.state.borrow().owner.as_ref()?.upgrade()
    }

    /// Returns `true` if nothing owns this animation.
    #[inline]
    pub fn is_independent(&self) -> bool {
        self.owner().is_none()
    }

    /// Returns `true` while a deferred self-start is queued.
    pub fn has_pending_start(&self) -> bool {
        self.0
            .state
            .borrow()
            .pending_start
            .as_ref()
            .is_some_and(TaskHandle::is_pending)
    }

    /// Number of registered event listeners.
    pub fn listener_count(&self) -> usize {
        self.0.state.borrow().listeners.len()
    }
}

// State machine.
impl Animation {
    /// Move the playback position.
    ///
    /// Writing the current position again does nothing. Otherwise the
    /// backend is told first, then the progress state is re-evaluated
    /// and, if it changed, the owner and listeners are notified.
    pub fn set_position(&self, position: f64) {
        let total = self.total_duration();

        let (previous, old_state, new_state) = {
            let mut state = self.0.state.borrow_mut();
            if state.position == position {
                return;
            }

            let previous = state.position;
            let old_state = state.progress;
            let new_state = ProgressState::at(position, total);

            state.position = position;
            state.progress = new_state;
            (previous, old_state, new_state)
        };

        trace!("{:?} position {previous} -> {position}", self.id());
        self.0.backend.position_changed(self, previous, position);

        if new_state != old_state {
            self.progress_changed(old_state, new_state);
        }
    }

    fn progress_changed(&self, old: ProgressState, new: ProgressState) {
        trace!("{:?} {old:?} -> {new:?}", self.id());
        let owner = self.owner();

        if let Some(owner) = &owner {
            owner.0.backend.child_state_changed(owner, self, new);
        }

        match (old, new) {
            (_, ProgressState::End) => {
                let finished = self.is_finished();
                if let Some(owner) = &owner {
                    owner.0.backend.child_completed(owner, self, finished);
                }

                self.emit(AnimationEvent::End);
                registry::remove(self);
            }
            (ProgressState::Beginning, ProgressState::InProgress)
            | (ProgressState::InProgress, ProgressState::Beginning) => {
                self.emit(AnimationEvent::Begin);
            }
            _ => {}
        }
    }

    fn emit(&self, event: AnimationEvent) {
        let listeners = self.0.state.borrow().listeners.matching(event);
        for listener in listeners {
            listener(self);
        }
    }

    /// Register a listener for `event`. Listeners run synchronously, in
    /// registration order.
    pub fn on(
        &self,
        event: AnimationEvent,
        then: impl Fn(&Animation) + 'static,
    ) -> Animation {
        self.0
            .state
            .borrow_mut()
            .listeners
            .push(event, Rc::new(then));
        self.clone()
    }

    /// Hand this animation over to `owner`.
    ///
    /// The animation leaves the independent registry and drops any
    /// queued self-start: from now on the owner decides when it runs.
    pub fn set_owner(&self, owner: &Animation) {
        let previous = self
            .0
            .state
            .borrow_mut()
            .owner
            .replace(owner.downgrade());

        if let Some(previous) = previous.and_then(|p| p.upgrade()) {
            if previous.ptr_eq(owner) == false {
                warn!(
                    "{:?} moved from owner {:?} to {:?}",
                    self.id(),
                    previous.id(),
                    owner.id()
                );
            }
        }

        registry::remove(self);
        self.postpone();
    }
}

// Lifecycle.
impl Animation {
    /// Start the animation on the next turn, or rewind it to the
    /// beginning when `reversed`.
    ///
    /// # Panics
    ///
    /// Panics if the animation has an owner. See
    /// [`Animation::try_begin`].
    pub fn begin(&self, reversed: bool) {
        if let Err(err) = self.try_begin(reversed) {
            panic!("{err}");
        }
    }

    /// Start the animation on the next turn, or rewind it to the
    /// beginning when `reversed`.
    ///
    /// The rewind walks the position linearly down to `0` over as many
    /// seconds as the current position.
    pub fn try_begin(&self, reversed: bool) -> Result<(), AnimationError> {
        if self.is_independent() == false {
            return Err(AnimationError::NotIndependent);
        }

        self.postpone();

        if reversed {
            self.rewind();
        } else {
            self.schedule_start();
        }

        Ok(())
    }

    /// Cancel the queued self-start, if any.
    pub fn postpone(&self) -> Animation {
        let pending = self.0.state.borrow_mut().pending_start.take();
        if pending.is_some() {
            trace!("{:?} postponed", self.id());
        }
        drop(pending);

        self.clone()
    }

    /// Start the animation, or the outermost composition it belongs
    /// to.
    pub fn go(&self) {
        match self.owner() {
            Some(owner) => owner.go(),
            None => self.commit(),
        }
    }

    /// Let the backend start driving the position.
    pub fn commit(&self) {
        trace!("{:?} committed", self.id());
        self.0.backend.commit(self);
    }

    fn schedule_start(&self) {
        let target = self.downgrade();
        let handle = runtime::defer(move || {
            let Some(animation) = target.upgrade() else {
                return;
            };

            let handle = animation.0.state.borrow_mut().pending_start.take();
            drop(handle);
            animation.go();
        });

        let previous =
            self.0.state.borrow_mut().pending_start.replace(handle);
        drop(previous);
        debug!("{:?} scheduled to start", self.id());
    }

    fn rewind(&self) {
        let start = self.position();
        let target = self.downgrade();

        tween::tween(
            Timing::new(start).with_curve(ease::linear),
            move |t| {
                if let Some(animation) = target.upgrade() {
                    animation.set_position(f64::interp(&start, &0.0, t));
                }
            },
            None,
        );
    }
}

// Composition.
impl Animation {
    /// Run `next` after this animation.
    pub fn then(&self, next: &Animation) -> Animation {
        self.then_all([next.clone()])
    }

    /// Run `animations` one after another, after this animation.
    pub fn then_all(
        &self,
        animations: impl IntoIterator<Item = Animation>,
    ) -> Animation {
        chain::chain(self.clone(), animations)
    }

    /// Run a new [tween](crate::tween) after this animation.
    pub fn then_tween(
        &self,
        timing: Timing,
        mutation: impl FnMut(f64) + 'static,
        completion: Option<Completion>,
    ) -> Animation {
        self.then(&tween::tween(timing, mutation, completion))
    }

    /// Call `completion` once this animation is done.
    pub fn then_completion(
        &self,
        completion: impl Fn(bool) + 'static,
    ) -> Animation {
        self.then(&group::group_with_completion(
            [],
            Box::new(completion),
        ))
    }

    /// Run `other` alongside this animation.
    pub fn and(&self, other: &Animation) -> Animation {
        self.and_all([other.clone()])
    }

    /// Run `animations` alongside this animation.
    pub fn and_all(
        &self,
        animations: impl IntoIterator<Item = Animation>,
    ) -> Animation {
        group::group(core::iter::once(self.clone()).chain(animations))
    }

    /// Run a new [tween](crate::tween) alongside this animation.
    pub fn and_tween(
        &self,
        timing: Timing,
        mutation: impl FnMut(f64) + 'static,
        completion: Option<Completion>,
    ) -> Animation {
        self.and(&tween::tween(timing, mutation, completion))
    }
}

impl Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.state.borrow();
        f.debug_struct("Animation")
            .field("id", &self.0.id)
            .field("position", &state.position)
            .field("progress", &state.progress)
            .finish()
    }
}

/// Position of a child that starts at `offset` inside a container
/// currently at `position`.
///
/// Children before their span sit at `0`, children past it sit at
/// their [end position](Animation::end_position).
pub(crate) fn local_position(
    child: &Animation,
    position: f64,
    offset: f64,
) -> f64 {
    let local = position - offset;
    if local <= 0.0 {
        0.0
    } else if local >= child.total_duration() {
        child.end_position()
    } else {
        local
    }
}
