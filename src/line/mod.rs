//! Line source: one typed line at a time, readable as lines or as bytes.

mod channel;
mod cursor;
mod request;
mod source;

pub use channel::{Channel, LineState, Reply, Request, Signal};
pub use cursor::ByteCursor;
pub use request::ReadRequest;
pub use source::LineSource;
