use alloc::vec::Vec;

use log::{debug, trace};

use crate::event::AnimationEvent;
use crate::node::{local_position, Animation, Backend, ProgressState};
use crate::playback::Playback;
use crate::tween::Completion;

/// Runs its children side by side and waits for all of them.
pub struct Group {
    children: Vec<Animation>,
    playback: Playback,
}

impl Backend for Group {
    fn duration(&self) -> f64 {
        self.children
            .iter()
            .map(Animation::total_duration)
            .fold(0.0, f64::max)
    }

    fn is_finished(&self, node: &Animation) -> bool {
        node.progress_state() == ProgressState::End
            && self.children.iter().all(Animation::is_finished)
    }

    fn commit(&self, node: &Animation) {
        self.playback.start(node);
    }

    fn position_changed(&self, node: &Animation, from: f64, to: f64) {
        let ended = to >= node.total_duration();
        let update = |child: &Animation| {
            let position = if ended {
                child.end_position()
            } else {
                local_position(child, to, 0.0)
            };
            child.set_position(position);
        };

        if to < from {
            self.children.iter().rev().for_each(update);
        } else {
            self.children.iter().for_each(update);
        }
    }

    fn child_state_changed(
        &self,
        node: &Animation,
        child: &Animation,
        state: ProgressState,
    ) {
        trace!("group {:?}: {:?} is {state:?}", node.id(), child.id());
    }

    fn child_completed(
        &self,
        node: &Animation,
        child: &Animation,
        finished: bool,
    ) {
        let completed = self
            .children
            .iter()
            .filter(|c| c.progress_state() == ProgressState::End)
            .count();
        debug!(
            "group {:?}: {:?} completed (finished: {finished}, {}/{})",
            node.id(),
            child.id(),
            completed,
            self.children.len(),
        );
    }
}

/// Run all `animations` at the same time.
#[must_use = "The group owns the given animations and has to be kept to be controlled."]
pub fn group(animations: impl IntoIterator<Item = Animation>) -> Animation {
    let children = animations.into_iter().collect::<Vec<_>>();

    let animation = Animation::new(Group {
        children: children.clone(),
        playback: Playback::default(),
    });

    for child in children.iter() {
        child.set_owner(&animation);
    }

    animation
}

/// Run all `animations` at the same time and call `completion` once
/// the group ends.
///
/// With no animations, this is a zero-length node that only runs the
/// completion.
#[must_use = "The group owns the given animations and has to be kept to be controlled."]
pub fn group_with_completion(
    animations: impl IntoIterator<Item = Animation>,
    completion: Completion,
) -> Animation {
    group(animations)
        .on(AnimationEvent::End, move |a| completion(a.is_finished()))
}
