//! Rendezvous: joins asynchronous signals with blocking calls.
//!
//! The engine owns one piece of state (a [`Reactor`]) behind a single mutex.
//! Producers post signals without ever blocking; consumers post requests and
//! block until the reactor can answer them.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    send(Signal)     ┌──────────────────────┐
//! │  UI Thread   │ ──────────────────▶ │        Join          │
//! └──────────────┘                     │  Mutex<Reactor +     │
//!                                      │        waiters>      │
//! ┌──────────────┐   call(Request)     │                      │
//! │  Consumer    │ ──────────────────▶ │                      │
//! │  Thread(s)   │ ◀────────────────── │  reply channel (1)   │
//! └──────────────┘       Reply         └──────────────────────┘
//! ```

mod join;

pub use join::{Join, Reactor};
