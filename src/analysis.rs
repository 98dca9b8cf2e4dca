//! Conflict detection between one host manifest and any number of guests
//!
//! The analyzer is total: given well-formed manifests it never fails, and
//! every anomaly comes back as data. Guests are analyzed independently of
//! each other, and the per-guest conflict list is emitted in a fixed order
//! so repeated runs over the same inputs are byte-identical.

pub mod order;

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::manifest::{Manifest, ModRecord};

/// Classification of a single discrepancy between a guest and the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictKind {
    /// The host has the mod, the guest does not.
    MissingOnGuest,
    /// The guest has a mod the host does not.
    MissingOnHost,
    /// Both sides have the mod with differing version strings.
    VersionMismatch,
    /// Both sides have the mod but only one has it enabled.
    DisabledMismatch,
    /// Shared mods load in a different relative order.
    OrderMismatch,
}

impl ConflictKind {
    /// Stable string form, matching the serialized representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingOnGuest => "missing-on-guest",
            Self::MissingOnHost => "missing-on-host",
            Self::VersionMismatch => "version-mismatch",
            Self::DisabledMismatch => "disabled-mismatch",
            Self::OrderMismatch => "order-mismatch",
        }
    }
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected discrepancy, ready for tabular or JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictRecord {
    /// Guest this conflict was found for.
    pub guest: String,
    /// Raw mod identifier (host's spelling where the mod exists on both sides).
    pub mod_id: String,
    /// What kind of discrepancy this is.
    pub kind: ConflictKind,
    /// Host-side value; `None` when the mod is absent on the host.
    pub host_value: Option<String>,
    /// Guest-side value; `None` when the mod is absent on the guest.
    pub guest_value: Option<String>,
}

/// Conflicts per guest, keyed by guest label.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Label of the host manifest everything was compared against.
    pub host: String,
    /// Ordered conflict list per guest label.
    pub guests: BTreeMap<String, Vec<ConflictRecord>>,
}

impl AnalysisReport {
    /// Total number of conflicts across all guests.
    #[must_use]
    pub fn total_conflicts(&self) -> usize {
        self.guests.values().map(Vec::len).sum()
    }

    /// Whether no guest has any conflict with the host.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.guests.values().all(Vec::is_empty)
    }
}

/// Compare every guest manifest against the host.
///
/// Per guest, conflicts are emitted as: presence mismatches (both
/// directions, ascending by identifier), then version and enablement
/// mismatches per shared identifier in ascending identifier order (version
/// before enablement for the same mod), then at most one order divergence.
#[must_use]
pub fn analyze(host: &Manifest, guests: &[Manifest]) -> AnalysisReport {
    let mut report = AnalysisReport {
        host: host.label().to_string(),
        guests: BTreeMap::new(),
    };

    for guest in guests {
        report
            .guests
            .insert(guest.label().to_string(), analyze_guest(host, guest));
    }

    report
}

fn analyze_guest(host: &Manifest, guest: &Manifest) -> Vec<ConflictRecord> {
    let host_by_key: HashMap<&str, &ModRecord> =
        host.records().iter().map(|r| (r.key.as_str(), r)).collect();
    let guest_by_key: HashMap<&str, &ModRecord> =
        guest.records().iter().map(|r| (r.key.as_str(), r)).collect();

    let mut conflicts = Vec::new();

    // Presence, both directions, sorted together by comparison key.
    let mut presence: Vec<(&str, ConflictRecord)> = Vec::new();
    for record in host.records() {
        if !guest_by_key.contains_key(record.key.as_str()) {
            presence.push((
                record.key.as_str(),
                ConflictRecord {
                    guest: guest.label().to_string(),
                    mod_id: record.id.clone(),
                    kind: ConflictKind::MissingOnGuest,
                    host_value: Some(record.describe()),
                    guest_value: None,
                },
            ));
        }
    }
    for record in guest.records() {
        if !host_by_key.contains_key(record.key.as_str()) {
            presence.push((
                record.key.as_str(),
                ConflictRecord {
                    guest: guest.label().to_string(),
                    mod_id: record.id.clone(),
                    kind: ConflictKind::MissingOnHost,
                    host_value: None,
                    guest_value: Some(record.describe()),
                },
            ));
        }
    }
    presence.sort_by(|a, b| a.0.cmp(&b.0));
    conflicts.extend(presence.into_iter().map(|(_, c)| c));

    // Version and enablement over the shared set, ascending by key.
    let mut shared: Vec<&ModRecord> = host
        .records()
        .iter()
        .filter(|r| guest_by_key.contains_key(r.key.as_str()))
        .collect();
    shared.sort_by(|a, b| a.key.cmp(&b.key));

    for host_record in &shared {
        let guest_record = guest_by_key[host_record.key.as_str()];

        if host_record.version != guest_record.version {
            conflicts.push(ConflictRecord {
                guest: guest.label().to_string(),
                mod_id: host_record.id.clone(),
                kind: ConflictKind::VersionMismatch,
                host_value: Some(host_record.version.clone()),
                guest_value: Some(guest_record.version.clone()),
            });
        }

        if host_record.enabled != guest_record.enabled {
            conflicts.push(ConflictRecord {
                guest: guest.label().to_string(),
                mod_id: host_record.id.clone(),
                kind: ConflictKind::DisabledMismatch,
                host_value: Some(enablement(host_record.enabled).to_string()),
                guest_value: Some(enablement(guest_record.enabled).to_string()),
            });
        }
    }

    // Order over the qualifying sub-sequence: present on both sides, enabled
    // on both sides, and version-equal. Mods already flagged above must not
    // also produce an order conflict.
    let qualifies = |h: &ModRecord, g: &ModRecord| {
        h.enabled && g.enabled && h.version == g.version
    };
    let host_seq: Vec<&str> = host
        .records()
        .iter()
        .filter(|h| {
            guest_by_key
                .get(h.key.as_str())
                .is_some_and(|g| qualifies(h, g))
        })
        .map(|h| h.key.as_str())
        .collect();
    let guest_seq: Vec<&str> = guest
        .records()
        .iter()
        .filter(|g| {
            host_by_key
                .get(g.key.as_str())
                .is_some_and(|h| qualifies(h, g))
        })
        .map(|g| g.key.as_str())
        .collect();

    if let Some(divergence) = order::first_divergence(&host_seq, &guest_seq) {
        let display_id = host_by_key
            .get(divergence.key.as_str())
            .map_or_else(|| divergence.key.clone(), |r| r.id.clone());
        conflicts.push(ConflictRecord {
            guest: guest.label().to_string(),
            mod_id: display_id,
            kind: ConflictKind::OrderMismatch,
            host_value: Some(format!("shared rank {}", divergence.host_rank)),
            guest_value: Some(format!("shared rank {}", divergence.guest_rank)),
        });
    }

    conflicts
}

const fn enablement(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::LoadOptions;
    use std::path::Path;

    /// Build a manifest from `(id, version, enabled)` triples, in load order.
    fn manifest(label: &str, mods: &[(&str, &str, bool)]) -> Manifest {
        let entries: Vec<String> = mods
            .iter()
            .map(|(id, version, enabled)| {
                format!(
                    r#"{{"id": "{id}", "name": "{id} mod", "version": "{version}", "enabled": {enabled}}}"#
                )
            })
            .collect();
        let doc = format!(
            r#"{{"player": "{label}", "mods": [{}]}}"#,
            entries.join(",")
        );
        Manifest::from_slice(doc.as_bytes(), Path::new("test.json"), LoadOptions::default())
            .unwrap()
    }

    fn kinds(conflicts: &[ConflictRecord]) -> Vec<ConflictKind> {
        conflicts.iter().map(|c| c.kind).collect()
    }

    #[test]
    fn test_identical_manifests_yield_no_conflicts() {
        let host = manifest("host", &[("A", "1.0", true), ("B", "2.0", true)]);
        let guest = manifest("guest", &[("A", "1.0", true), ("B", "2.0", true)]);

        let report = analyze(&host, std::slice::from_ref(&guest));
        assert!(report.is_clean());
        assert_eq!(report.guests["guest"], Vec::new());
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let host = manifest("host", &[("A", "1.0", true), ("B", "2.0", true), ("C", "1.5", false)]);
        let guest = manifest("guest", &[("B", "2.1", true), ("D", "0.1", true), ("A", "1.0", false)]);

        let first = analyze(&host, std::slice::from_ref(&guest));
        let second = analyze(&host, std::slice::from_ref(&guest));

        assert_eq!(first.guests, second.guests);
        // Byte-identical once serialized, too
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_extra_guest_mod_is_the_only_conflict() {
        let host = manifest("host", &[("A", "1.0", true), ("B", "2.0", true)]);
        let guest = manifest(
            "guest",
            &[("A", "1.0", true), ("B", "2.0", true), ("X", "0.9", true)],
        );

        let report = analyze(&host, std::slice::from_ref(&guest));
        let conflicts = &report.guests["guest"];

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::MissingOnHost);
        assert_eq!(conflicts[0].mod_id, "X");
        assert_eq!(conflicts[0].host_value, None);
        assert_eq!(conflicts[0].guest_value, Some("X mod (0.9)".to_string()));
    }

    #[test]
    fn test_missing_guest_mod_carries_host_side_value() {
        let host = manifest("host", &[("A", "1.0", true), ("B", "2.0", true)]);
        let guest = manifest("guest", &[("A", "1.0", true)]);

        let report = analyze(&host, std::slice::from_ref(&guest));
        let conflicts = &report.guests["guest"];

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::MissingOnGuest);
        assert_eq!(conflicts[0].host_value, Some("B mod (2.0)".to_string()));
        assert_eq!(conflicts[0].guest_value, None);
    }

    #[test]
    fn test_swapped_pair_yields_exactly_one_order_mismatch() {
        let host = manifest("host", &[("A", "1.0", true), ("B", "2.0", true)]);
        let guest = manifest("guest", &[("B", "2.0", true), ("A", "1.0", true)]);

        let report = analyze(&host, std::slice::from_ref(&guest));
        let conflicts = &report.guests["guest"];

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::OrderMismatch);
        assert_eq!(conflicts[0].mod_id, "A");
    }

    #[test]
    fn test_one_sided_mods_do_not_cause_spurious_order_mismatch() {
        // Guest-only "Extra" mods interleave with the shared set and shift
        // every absolute index, but the shared relative order agrees.
        let host = manifest("host", &[("A", "1.0", true), ("B", "2.0", true), ("C", "3.0", true)]);
        let guest = manifest(
            "guest",
            &[
                ("Extra1", "0.1", true),
                ("A", "1.0", true),
                ("Extra2", "0.2", true),
                ("B", "2.0", true),
                ("C", "3.0", true),
            ],
        );

        let report = analyze(&host, std::slice::from_ref(&guest));
        let conflicts = &report.guests["guest"];

        assert!(conflicts
            .iter()
            .all(|c| c.kind == ConflictKind::MissingOnHost));
        assert_eq!(conflicts.len(), 2);
    }

    #[test]
    fn test_version_and_enablement_disqualify_from_order_check() {
        // Host: A 1.0 enabled, B 2.0 enabled
        // Guest: B 2.1 enabled, A 1.0 disabled
        // Both shared mods are disqualified from the order check, so the
        // swapped positions must not add an OrderMismatch.
        let host = manifest("host", &[("A", "1.0", true), ("B", "2.0", true)]);
        let guest = manifest("guest", &[("B", "2.1", true), ("A", "1.0", false)]);

        let report = analyze(&host, std::slice::from_ref(&guest));
        let conflicts = &report.guests["guest"];

        assert_eq!(
            kinds(conflicts),
            vec![ConflictKind::DisabledMismatch, ConflictKind::VersionMismatch]
        );
        assert_eq!(conflicts[0].mod_id, "A");
        assert_eq!(conflicts[0].host_value, Some("enabled".to_string()));
        assert_eq!(conflicts[0].guest_value, Some("disabled".to_string()));
        assert_eq!(conflicts[1].mod_id, "B");
        assert_eq!(conflicts[1].host_value, Some("2.0".to_string()));
        assert_eq!(conflicts[1].guest_value, Some("2.1".to_string()));
    }

    #[test]
    fn test_version_before_enablement_for_the_same_mod() {
        let host = manifest("host", &[("A", "1.0", true)]);
        let guest = manifest("guest", &[("A", "1.1", false)]);

        let report = analyze(&host, std::slice::from_ref(&guest));
        assert_eq!(
            kinds(&report.guests["guest"]),
            vec![ConflictKind::VersionMismatch, ConflictKind::DisabledMismatch]
        );
    }

    #[test]
    fn test_empty_host_yields_missing_on_host_for_every_guest_mod() {
        let host = manifest("host", &[]);
        let guest = manifest("guest", &[("A", "1.0", true), ("B", "2.0", false), ("C", "3.0", true)]);

        let report = analyze(&host, std::slice::from_ref(&guest));
        let conflicts = &report.guests["guest"];

        assert_eq!(conflicts.len(), 3);
        assert!(conflicts
            .iter()
            .all(|c| c.kind == ConflictKind::MissingOnHost));
    }

    #[test]
    fn test_empty_guest_yields_missing_on_guest_for_every_host_mod() {
        let host = manifest("host", &[("A", "1.0", true), ("B", "2.0", true)]);
        let guest = manifest("guest", &[]);

        let report = analyze(&host, std::slice::from_ref(&guest));
        let conflicts = &report.guests["guest"];

        assert_eq!(conflicts.len(), 2);
        assert!(conflicts
            .iter()
            .all(|c| c.kind == ConflictKind::MissingOnGuest));
    }

    #[test]
    fn test_presence_conflicts_sorted_by_identifier_across_directions() {
        let host = manifest("host", &[("Zeta", "1.0", true), ("Alpha", "1.0", true)]);
        let guest = manifest("guest", &[("Mid", "1.0", true)]);

        let report = analyze(&host, std::slice::from_ref(&guest));
        let ids: Vec<&str> = report.guests["guest"]
            .iter()
            .map(|c| c.mod_id.as_str())
            .collect();

        assert_eq!(ids, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn test_case_differences_in_identifiers_do_not_conflict() {
        let host = manifest("host", &[("ImpUI", "2.3", true)]);
        let guest = manifest("guest", &[("impui", "2.3", true)]);

        let report = analyze(&host, std::slice::from_ref(&guest));
        assert!(report.is_clean());
    }

    #[test]
    fn test_guests_are_independent() {
        let host = manifest("host", &[("A", "1.0", true)]);
        let clean = manifest("clean", &[("A", "1.0", true)]);
        let drifted = manifest("drifted", &[("A", "2.0", true)]);

        let report = analyze(&host, &[clean, drifted]);

        assert!(report.guests["clean"].is_empty());
        assert_eq!(report.guests["drifted"].len(), 1);
        assert_eq!(report.total_conflicts(), 1);
    }
}
