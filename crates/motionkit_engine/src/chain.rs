use alloc::vec::Vec;

use log::{debug, trace};
use nonempty::NonEmpty;

use crate::node::{local_position, Animation, Backend, ProgressState};
use crate::playback::Playback;

/// Runs its children one after another.
///
/// Each child starts where the previous one ends, so the chain lasts
/// for the sum of its children's total durations.
pub struct Chain {
    children: NonEmpty<Animation>,
    playback: Playback,
}

impl Chain {
    /// Each child with the chain position it starts at.
    fn offsets(&self) -> Vec<(&Animation, f64)> {
        let mut offset = 0.0;
        self.children
            .iter()
            .map(|child| {
                let start = offset;
                offset += child.total_duration();
                (child, start)
            })
            .collect()
    }
}

impl Backend for Chain {
    fn duration(&self) -> f64 {
        self.children.iter().map(Animation::total_duration).sum()
    }

    fn is_finished(&self, _node: &Animation) -> bool {
        self.children.iter().all(Animation::is_finished)
    }

    fn commit(&self, node: &Animation) {
        self.playback.start(node);
    }

    fn position_changed(&self, node: &Animation, from: f64, to: f64) {
        let ended = to >= node.total_duration();
        let update = |(child, offset): (&Animation, f64)| {
            let position = if ended {
                child.end_position()
            } else {
                local_position(child, to, offset)
            };
            child.set_position(position);
        };

        // Backwards, the last child has to unwind first.
        let offsets = self.offsets();
        if to < from {
            offsets.into_iter().rev().for_each(update);
        } else {
            offsets.into_iter().for_each(update);
        }
    }

    fn child_state_changed(
        &self,
        node: &Animation,
        child: &Animation,
        state: ProgressState,
    ) {
        trace!("chain {:?}: {:?} is {state:?}", node.id(), child.id());
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
            "chain {:?}: {:?} completed (finished: {finished}, {}/{})",
            node.id(),
            child.id(),
            completed,
            self.children.len(),
        );
    }
}

/// Run `first`, then each of `rest` in order.
///
/// The chain takes ownership of every child and starts on its own,
/// like any other independent animation.
#[must_use = "The chain owns the given animations and has to be kept to be controlled."]
pub fn chain(
    first: Animation,
    rest: impl IntoIterator<Item = Animation>,
) -> Animation {
    let children =
        NonEmpty::from((first, rest.into_iter().collect::<Vec<_>>()));

    let animation = Animation::new(Chain {
        children: children.clone(),
        playback: Playback::default(),
    });

    for child in children.iter() {
        child.set_owner(&animation);
    }

    animation
}
