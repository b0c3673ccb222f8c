//! Join: the mutex-guarded reactor plus its queue of blocked callers.

use crate::error::ReadlineError;
use crossbeam_channel::{bounded, Sender};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// State machine driven by a [`Join`].
///
/// A reaction fires when a pending request meets a state that can answer it.
/// Both methods run inside the engine's critical section, so they must not
/// block or call back into the engine.
pub trait Reactor {
    /// Asynchronous message posted by [`Join::send`].
    type Signal;
    /// Synchronous message posted by [`Join::call`].
    type Request;
    /// Value handed back to a blocked caller.
    type Reply;

    /// Absorb an asynchronous signal into the current state.
    fn signal(&mut self, signal: Self::Signal);

    /// Try to answer `request` against the current state.
    ///
    /// Returns `None` when the request has to keep waiting. A request that
    /// is answered is consumed; the reactor must leave the state consistent
    /// either way.
    fn react(&mut self, request: &Self::Request) -> Option<Self::Reply>;
}

/// A caller parked until its request can be answered.
struct Waiter<R: Reactor> {
    request: R::Request,
    reply: Sender<R::Reply>,
}

struct Inner<R: Reactor> {
    reactor: R,
    /// Blocked callers in arrival order.
    waiting: VecDeque<Waiter<R>>,
}

impl<R: Reactor> Inner<R> {
    /// Fire every reaction that is ready, oldest caller first.
    ///
    /// Each reaction may change the state, so the scan restarts from the
    /// front after every firing. Terminates because each firing removes
    /// one waiter.
    fn resolve(&mut self) -> usize {
        let mut fired = 0;
        let mut index = 0;
        while index < self.waiting.len() {
            let reply = self.reactor.react(&self.waiting[index].request);
            match reply {
                Some(reply) => {
                    if let Some(waiter) = self.waiting.remove(index) {
                        // Capacity 1 and a single reply per waiter: never full.
                        let _ = waiter.reply.try_send(reply);
                    }
                    fired += 1;
                    index = 0;
                }
                None => index += 1,
            }
        }
        fired
    }
}

/// Synchronous/asynchronous rendezvous over a single [`Reactor`].
///
/// All posts and reaction evaluation happen under one mutex, so reactions
/// fire atomically with respect to each other. Replies are handed over on a
/// per-call `bounded(1)` channel, filled without blocking while the lock is
/// held and received by the caller after the lock is released.
pub struct Join<R: Reactor> {
    inner: Mutex<Inner<R>>,
}

impl<R: Reactor> Join<R> {
    /// Create an engine around the given initial state.
    pub const fn new(reactor: R) -> Self {
        Self {
            inner: Mutex::new(Inner {
                reactor,
                waiting: VecDeque::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<R>> {
        // Reactions never leave the state half-updated across a panic
        // boundary that matters to us, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Post an asynchronous signal.
    ///
    /// Never blocks beyond the critical section. Any caller the new state
    /// can answer is released before this returns.
    pub fn send(&self, signal: R::Signal) {
        let mut inner = self.lock();
        inner.reactor.signal(signal);
        let fired = inner.resolve();
        if fired > 0 {
            tracing::trace!(fired, waiting = inner.waiting.len(), "signal released callers");
        }
    }

    /// Post a request and block until a reaction answers it.
    ///
    /// There is no timeout: the reactor is expected to answer every request
    /// eventually (typically through a terminal state).
    pub fn call(&self, request: R::Request) -> Result<R::Reply, ReadlineError> {
        let rx = {
            let mut inner = self.lock();

            // Fast path: nobody ahead of us and the state can answer now.
            if inner.waiting.is_empty() {
                if let Some(reply) = inner.reactor.react(&request) {
                    return Ok(reply);
                }
            }

            let (tx, rx) = bounded(1);
            inner.waiting.push_back(Waiter { request, reply: tx });
            inner.resolve();
            rx
        };

        rx.recv().map_err(|_| ReadlineError::Disconnected)
    }

    /// Number of callers currently blocked in [`Join::call`].
    pub fn waiting(&self) -> usize {
        self.lock().waiting.len()
    }

    /// Run `f` against the current state.
    pub fn inspect<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(&self.lock().reactor)
    }
}

impl<R: Reactor + fmt::Debug> fmt::Debug for Join<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("Join")
            .field("reactor", &inner.reactor)
            .field("waiting", &inner.waiting.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    /// Counting semaphore: `Release` adds permits, `Acquire` takes one.
    #[derive(Debug, Default)]
    struct Permits {
        available: usize,
    }

    enum Request {
        Acquire(u32),
        Peek,
    }

    impl Reactor for Permits {
        type Signal = usize;
        type Request = Request;
        type Reply = u32;

        fn signal(&mut self, permits: usize) {
            self.available += permits;
        }

        fn react(&mut self, request: &Request) -> Option<u32> {
            match request {
                Request::Acquire(tag) if self.available > 0 => {
                    self.available -= 1;
                    Some(*tag)
                }
                Request::Acquire(_) => None,
                #[allow(clippy::cast_possible_truncation)]
                Request::Peek => Some(self.available as u32),
            }
        }
    }

    fn wait_for_waiters(join: &Join<Permits>, n: usize) {
        for _ in 0..500 {
            if join.waiting() == n {
                return;
            }
            thread::sleep(Duration::from_millis(2));
        }
        panic!("expected {n} waiters, found {}", join.waiting());
    }

    #[test]
    fn test_call_answers_immediately() {
        let join = Join::new(Permits { available: 1 });
        assert_eq!(join.call(Request::Acquire(7)), Ok(7));
        assert_eq!(join.inspect(|p| p.available), 0);
        assert_eq!(join.waiting(), 0);
    }

    #[test]
    fn test_call_blocks_until_signal() {
        let join = Arc::new(Join::new(Permits::default()));
        let worker = {
            let join = join.clone();
            thread::spawn(move || join.call(Request::Acquire(1)))
        };

        wait_for_waiters(&join, 1);
        join.send(1);

        assert_eq!(worker.join().unwrap(), Ok(1));
        assert_eq!(join.waiting(), 0);
    }

    #[test]
    fn test_waiters_released_in_arrival_order() {
        let join = Arc::new(Join::new(Permits::default()));
        let (done_tx, done_rx) = crossbeam_channel::unbounded();

        let mut handles = Vec::new();
        for tag in 0..3 {
            let worker_join = join.clone();
            let done_tx = done_tx.clone();
            handles.push(thread::spawn(move || {
                let got = worker_join.call(Request::Acquire(tag)).unwrap();
                done_tx.send(got).unwrap();
            }));
            wait_for_waiters(&join, tag as usize + 1);
        }

        for expected in 0..3 {
            join.send(1);
            let got = done_rx.recv_timeout(Duration::from_secs(1)).unwrap();
            assert_eq!(got, expected);
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_answerable_request_skips_blocked_one() {
        let join = Arc::new(Join::new(Permits::default()));
        let blocked = {
            let join = join.clone();
            thread::spawn(move || join.call(Request::Acquire(9)))
        };
        wait_for_waiters(&join, 1);

        // A request the state can answer is not stuck behind the blocked one.
        assert_eq!(join.call(Request::Peek), Ok(0));

        join.send(1);
        assert_eq!(blocked.join().unwrap(), Ok(9));
    }

    #[test]
    fn test_one_signal_releases_many() {
        let join = Arc::new(Join::new(Permits::default()));
        let handles: Vec<_> = (0..4)
            .map(|tag| {
                let join = join.clone();
                thread::spawn(move || join.call(Request::Acquire(tag)))
            })
            .collect();
        wait_for_waiters(&join, 4);

        join.send(4);

        let mut tags: Vec<u32> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        tags.sort_unstable();
        assert_eq!(tags, vec![0, 1, 2, 3]);
    }
}
