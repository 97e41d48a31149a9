//! The single-threaded host loop that animations run on.
//!
//! Two kinds of work are queued here:
//! - **Deferred tasks**: one-shot closures that run on the next turn,
//!   used by animations to start themselves "as soon as possible".
//! - **Tickers**: per-frame callbacks receiving the elapsed time,
//!   used by backends to advance their position.
//!
//! The host drives both with [`advance`] once per frame (or calls
//! [`run_deferred`] alone when it has no notion of time yet).
//!
//! All state is thread-local: animations are `Rc` based and never
//! leave the thread that created them.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use log::trace;

type Task = Box<dyn FnOnce()>;
type Ticker = Rc<RefCell<dyn FnMut(f64) -> bool>>;

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::default());
}

#[derive(Default)]
struct Runtime {
    /// Shared by tasks and tickers, strictly increasing.
    next_id: u64,
    deferred: VecDeque<(u64, Task)>,
    tickers: Vec<(u64, Ticker)>,
}

impl Runtime {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn take_task(&mut self, id: u64) -> Option<Task> {
        let index = self.deferred.iter().position(|(i, _)| *i == id)?;
        self.deferred.remove(index).map(|(_, task)| task)
    }

    fn take_ticker(&mut self, id: u64) -> Option<Ticker> {
        let index = self.tickers.iter().position(|(i, _)| *i == id)?;
        Some(self.tickers.remove(index).1)
    }
}

fn with<R>(f: impl FnOnce(&mut Runtime) -> R) -> R {
    RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

/// Queue `task` to run on the next turn of the loop.
///
/// The task is cancelled when the returned handle is dropped or
/// [cancelled](TaskHandle::cancel) before it runs.
#[must_use = "Dropping the handle cancels the task."]
pub fn defer(task: impl FnOnce() + 'static) -> TaskHandle {
    let id = with(|rt| {
        let id = rt.next_id();
        rt.deferred.push_back((id, Box::new(task)));
        id
    });
    trace!("deferred task {id}");

    TaskHandle { id }
}

/// Run every task that was queued before this call. Tasks queued
/// while running wait for the next turn.
///
/// Returns the number of tasks that ran.
pub fn run_deferred() -> usize {
    let Some(last) = with(|rt| rt.deferred.back().map(|(id, _)| *id))
    else {
        return 0;
    };

    let mut count = 0;
    loop {
        // Pop one at a time so a running task can still cancel the
        // ones behind it.
        let next = with(|rt| match rt.deferred.front() {
            Some((id, _)) if *id <= last => rt.deferred.pop_front(),
            _ => None,
        });
        let Some((_, task)) = next else {
            break;
        };

        task();
        count += 1;
    }

    count
}

/// Register a callback that runs on every [`advance`] with the
/// elapsed time. Returning `false` unsubscribes it.
///
/// The ticker is also removed when the returned handle is dropped.
#[must_use = "Dropping the handle removes the ticker."]
pub fn add_ticker(
    ticker: impl FnMut(f64) -> bool + 'static,
) -> TickerHandle {
    let ticker: Ticker = Rc::new(RefCell::new(ticker));
    let id = with(|rt| {
        let id = rt.next_id();
        rt.tickers.push((id, ticker));
        id
    });
    trace!("added ticker {id}");

    TickerHandle { id }
}

/// Advance one frame: run deferred tasks, then tick every ticker
/// with `dt`.
///
/// Tickers added by the deferred tasks tick in this same frame.
/// Tickers added by another ticker wait for the next frame.
pub fn advance(dt: f64) {
    run_deferred();

    let tickers = with(|rt| rt.tickers.clone());
    for (id, ticker) in tickers {
        // Skip tickers removed by an earlier ticker this frame.
        if with(|rt| rt.tickers.iter().all(|(i, _)| *i != id)) {
            continue;
        }

        let keep = (&mut *ticker.borrow_mut())(dt);
        if keep == false {
            let removed = with(|rt| rt.take_ticker(id));
            drop(removed);
            trace!("ticker {id} finished");
        }
    }
}

/// Number of tasks waiting for the next turn.
pub fn pending_tasks() -> usize {
    with(|rt| rt.deferred.len())
}

/// Number of registered tickers.
pub fn active_tickers() -> usize {
    with(|rt| rt.tickers.len())
}

/// Handle to a task queued with [`defer`].
#[derive(Debug)]
pub struct TaskHandle {
    id: u64,
}

impl TaskHandle {
    /// Returns `true` while the task is still waiting to run.
    pub fn is_pending(&self) -> bool {
        with(|rt| rt.deferred.iter().any(|(id, _)| *id == self.id))
    }

    /// Cancel the task if it has not run yet.
    #[inline]
    pub fn cancel(self) {}
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        // The runtime may already be gone during thread teardown.
        let task = RUNTIME
            .try_with(|rt| rt.borrow_mut().take_task(self.id))
            .ok()
            .flatten();
        drop(task);
    }
}

/// Handle to a ticker registered with [`add_ticker`].
#[derive(Debug)]
pub struct TickerHandle {
    id: u64,
}

impl TickerHandle {
    /// Returns `true` while the ticker is still registered.
    pub fn is_active(&self) -> bool {
        with(|rt| rt.tickers.iter().any(|(id, _)| *id == self.id))
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        let ticker = RUNTIME
            .try_with(|rt| rt.borrow_mut().take_ticker(self.id))
            .ok()
            .flatten();
        drop(ticker);
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;

    #[test]
    fn deferred_runs_once_on_next_turn() {
        let count = Rc::new(Cell::new(0));

        let c = count.clone();
        let handle = defer(move || c.set(c.get() + 1));
        assert!(handle.is_pending());
        assert_eq!(count.get(), 0);

        assert_eq!(run_deferred(), 1);
        assert_eq!(count.get(), 1);
        assert!(!handle.is_pending());

        assert_eq!(run_deferred(), 0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn dropping_handle_cancels_task() {
        let ran = Rc::new(Cell::new(false));

        let r = ran.clone();
        let handle = defer(move || r.set(true));
        handle.cancel();

        assert_eq!(pending_tasks(), 0);
        run_deferred();
        assert!(!ran.get());
    }

    #[test]
    fn tasks_queued_while_running_wait() {
        let order = Rc::new(RefCell::new(Vec::new()));

        let o = order.clone();
        let _outer = defer(move || {
            o.borrow_mut().push(1);
            let o = o.clone();
            // Leaked on purpose so the inner task survives this turn.
            core::mem::forget(defer(move || o.borrow_mut().push(2)));
        });

        assert_eq!(run_deferred(), 1);
        assert_eq!(*order.borrow(), [1]);
        assert_eq!(run_deferred(), 1);
        assert_eq!(*order.borrow(), [1, 2]);
    }

    #[test]
    fn ticker_receives_dt_until_it_stops() {
        let total = Rc::new(Cell::new(0.0));

        let t = total.clone();
        let handle = add_ticker(move |dt| {
            t.set(t.get() + dt);
            t.get() < 1.0
        });
        assert_eq!(active_tickers(), 1);

        advance(0.25);
        advance(0.25);
        assert_eq!(total.get(), 0.5);
        assert!(handle.is_active());

        advance(0.5);
        assert_eq!(total.get(), 1.0);
        assert!(!handle.is_active());

        advance(0.5);
        assert_eq!(total.get(), 1.0);
    }

    #[test]
    fn ticker_start_frame_depends_on_who_adds_it() {
        let from_task = Rc::new(Cell::new(0));
        let from_ticker = Rc::new(Cell::new(0));
        let handles = Rc::new(RefCell::new(Vec::new()));

        let (t, h) = (from_task.clone(), handles.clone());
        let _task = defer(move || {
            let t = t.clone();
            h.borrow_mut().push(add_ticker(move |_| {
                t.set(t.get() + 1);
                true
            }));
        });

        let (t, h) = (from_ticker.clone(), handles.clone());
        let mut spawned = false;
        let _outer = add_ticker(move |_| {
            if spawned == false {
                spawned = true;
                let t = t.clone();
                h.borrow_mut().push(add_ticker(move |_| {
                    t.set(t.get() + 1);
                    true
                }));
            }
            true
        });

        advance(0.1);
        assert_eq!(from_task.get(), 1);
        assert_eq!(from_ticker.get(), 0);

        advance(0.1);
        assert_eq!(from_task.get(), 2);
        assert_eq!(from_ticker.get(), 1);
    }

    #[test]
    fn dropping_ticker_handle_unsubscribes() {
        let ticks = Rc::new(Cell::new(0));

        let t = ticks.clone();
        let handle = add_ticker(move |_| {
            t.set(t.get() + 1);
            true
        });

        advance(0.1);
        drop(handle);
        advance(0.1);

        assert_eq!(ticks.get(), 1);
        assert_eq!(active_tickers(), 0);
    }
}
