//! Data models for the discussion viewer.
//!
//! Field names follow the GitHub GraphQL schema (camelCase on the wire) so the
//! same types decode live responses and the static snapshot.

mod comment;
mod discussion;
mod mutation;
mod page;
mod snapshot;
mod taxonomy;
mod viewer;

pub use comment::*;
pub use discussion::*;
pub use mutation::*;
pub use page::*;
pub use snapshot::*;
pub use taxonomy::*;
pub use viewer::*;
