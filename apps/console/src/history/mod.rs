//! History tab: the resume collection and per-row detail retrieval.
//!
//! Both components issue a ticket per request. Only the most recently issued
//! request may write shared state; older responses are dropped when they land.

pub mod detail;
pub mod list_store;

pub use detail::{DetailFetcher, RowStatus};
pub use list_store::{ListStatus, ResumeListStore};

/// How a completed request affected shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled<T> {
    Applied(T),
    /// A newer request was issued before this one resolved.
    Superseded,
}
