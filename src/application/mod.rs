// Application layer - report assembly on top of the in-memory ledger.
// The shell in `cli` only ever talks to the ledger through these types.

pub mod error;
pub mod reporting;

pub use error::*;
pub use reporting::*;
