use alloc::rc::Rc;

use smallvec::SmallVec;

use crate::node::Animation;

/// Lifecycle events emitted by an [`Animation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationEvent {
    /// The animation crossed between `Beginning` and `InProgress`,
    /// in either direction.
    Begin,
    /// The animation reached its end.
    End,
}

/// Callback invoked with the emitting animation.
pub type Listener = Rc<dyn Fn(&Animation)>;

#[derive(Clone)]
pub struct EventListener {
    pub event: AnimationEvent,
    pub then: Listener,
}

/// Listeners of a single animation, in registration order.
#[derive(Default, Clone)]
pub struct Listeners {
    listeners: SmallVec<[EventListener; 2]>,
}

impl Listeners {
    pub fn push(&mut self, event: AnimationEvent, then: Listener) {
        self.listeners.push(EventListener { event, then });
    }

    /// Collect the callbacks registered for `event` so they can be
    /// invoked without holding a borrow on the animation.
    pub fn matching(
        &self,
        event: AnimationEvent,
    ) -> SmallVec<[Listener; 2]> {
        self.listeners
            .iter()
            .filter(|l| l.event == event)
            .map(|l| l.then.clone())
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
