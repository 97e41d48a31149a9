use core::cell::RefCell;

use log::trace;

use crate::node::Animation;
use crate::runtime::{self, TickerHandle};

/// Drives a node's position forward with the runtime clock.
///
/// Each tick adds the elapsed time to the position. The tick that
/// would reach the total duration lands exactly on the node's
/// [end position](Animation::end_position) and stops the playback.
#[derive(Default)]
pub struct Playback {
    ticker: RefCell<Option<TickerHandle>>,
}

impl Playback {
    /// Restart ticking `node` from its current position.
    pub fn start(&self, node: &Animation) {
        let target = node.downgrade();
        let ticker = runtime::add_ticker(move |dt| {
            let Some(node) = target.upgrade() else {
                return false;
            };

            let next = node.position() + dt;
            if next >= node.total_duration() {
                node.set_position(node.end_position());
                false
            } else {
                node.set_position(next);
                true
            }
        });

        trace!("{:?} playback started", node.id());
        let previous = self.ticker.borrow_mut().replace(ticker);
        drop(previous);
    }
}
