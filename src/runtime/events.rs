//! Runtime event stream payloads.

use crate::types::PersonId;

/// Events emitted from the single-writer runtime loop after a mutation commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    /// A person was created.
    Created {
        /// Assigned id.
        id: PersonId,
    },
    /// A person was replaced.
    Updated {
        /// Updated id.
        id: PersonId,
        /// Position of the record in store order.
        index: usize,
    },
    /// A person was removed.
    Deleted {
        /// Removed id.
        id: PersonId,
    },
}
