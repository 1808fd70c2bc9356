//! Storage side of the scoring tracker: the compact round codec, decoding of remote snapshots, and a history that
//! keeps a [`RoundStore`] in step with local edits.

pub use codec::*;
pub use error::*;
pub use snapshot::*;
pub use store::*;
pub use sync::*;

mod codec;
mod error;
mod snapshot;
mod store;
mod sync;
