use pdbref_core::provenance::{Provenance, DEFAULT_ADDED_BY};

#[test]
fn current_provenance_has_iso_date_and_versions() {
    let provenance = Provenance::current();
    assert_eq!(provenance.added_by, DEFAULT_ADDED_BY);
    assert_eq!(provenance.added_date.len(), 10);
    assert_eq!(provenance.added_date.as_bytes()[4], b'-');
    assert_eq!(provenance.added_date.as_bytes()[7], b'-');
    let keys: Vec<_> = provenance.versions.keys().cloned().collect();
    assert_eq!(keys, vec!["pdbref_version", "platform"]);
}

#[test]
fn version_entries_keep_insertion_order() {
    let provenance = Provenance::current()
        .with_added_by("tester")
        .with_version("cmdstan_version", "2.36.0");
    assert_eq!(provenance.added_by, "tester");
    assert_eq!(
        provenance.versions.keys().last().map(String::as_str),
        Some("cmdstan_version")
    );
}
