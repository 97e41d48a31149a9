//! Independent animations, kept alive while they run.
//!
//! An animation enters the registry when it is created and leaves it
//! once it gets an owner or reaches its end. Until then the registry
//! holds a strong handle, so fire-and-forget animations survive
//! without the caller storing them.

use core::cell::RefCell;

use bevy_platform::collections::HashMap;
use log::debug;

use crate::node::{Animation, AnimationId};

thread_local! {
    static INDEPENDENT: RefCell<HashMap<AnimationId, Animation>> =
        RefCell::new(HashMap::new());
}

pub(crate) fn insert(animation: &Animation) {
    let previous = INDEPENDENT.with(|r| {
        r.borrow_mut().insert(animation.id(), animation.clone())
    });

    if previous.is_none() {
        debug!("{:?} registered as independent", animation.id());
    }
}

/// Returns `true` if the animation was registered.
pub(crate) fn remove(animation: &Animation) -> bool {
    // Dropping the handle may drop the animation, do it outside the
    // borrow.
    let removed = INDEPENDENT
        .try_with(|r| r.borrow_mut().remove(&animation.id()))
        .ok()
        .flatten();

    let was_registered = removed.is_some();
    if was_registered {
        debug!("{:?} left the independent registry", animation.id());
    }
    drop(removed);

    was_registered
}

/// Returns `true` if `animation` is currently independent and
/// unfinished.
pub fn contains(animation: &Animation) -> bool {
    INDEPENDENT.with(|r| r.borrow().contains_key(&animation.id()))
}

/// Number of registered animations.
pub fn len() -> usize {
    INDEPENDENT.with(|r| r.borrow().len())
}

pub fn is_empty() -> bool {
    len() == 0
}
