//! Per-resource writers over the document store.
//!
//! Each logical resource (today's prayer record, the haid settings) owns its
//! document path and an explicit request-in-flight flag: a second write while
//! one is outstanding is refused with [`WriteOutcome::Busy`] rather than
//! queued. Failed writes are logged and dropped; local state catches up on
//! the next pushed snapshot.

pub mod haid;
pub mod prayer;

pub use haid::HaidSettings;
pub use prayer::PrayerRecords;

/// Result of a fire-and-forget write request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The merge was issued (it may still have failed; failures are logged).
    Accepted,
    /// A write to this resource was already outstanding.
    Busy,
}
