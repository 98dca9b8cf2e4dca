//! Relative-order divergence scan over the shared mod sub-sequence
//!
//! Absolute load-order indices cannot be compared directly: a mod that
//! exists on only one side shifts every later index on that side and would
//! flag mods that actually agree. Both sides are therefore first filtered
//! down to the shared sub-sequence and compared rank by rank.

/// First point at which two orderings of the same key set disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    /// Identifier at the first divergent rank, taken from the host ordering.
    pub key: String,
    /// Rank of that identifier within the host's shared ordering.
    pub host_rank: usize,
    /// Rank of the same identifier within the guest's shared ordering.
    pub guest_rank: usize,
}

/// Scan two orderings of the same identifier set for the first divergence.
///
/// Returns `None` when the relative orderings agree. Callers filter both
/// sides down to the shared, enabled, version-matched sub-sequence first,
/// so both slices hold the same keys and only their order can differ.
#[must_use]
pub fn first_divergence(host: &[&str], guest: &[&str]) -> Option<Divergence> {
    debug_assert_eq!(host.len(), guest.len());

    for (rank, (h, g)) in host.iter().zip(guest.iter()).enumerate() {
        if h != g {
            let guest_rank = guest
                .iter()
                .position(|key| key == h)
                .unwrap_or(rank);
            return Some(Divergence {
                key: (*h).to_string(),
                host_rank: rank,
                guest_rank,
            });
        }
    }

    None
}
