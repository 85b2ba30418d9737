//! GitHub GraphQL access: the transport-level executor and the typed
//! operations built on it.

mod client;
mod executor;
mod queries;

pub use client::*;
pub use executor::*;
