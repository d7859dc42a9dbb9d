use pdbref_draws::{resolve, ParameterName};
use proptest::prelude::*;

proptest! {
    #[test]
    fn display_reconstructs_resolved_name(base in "[A-Za-z_][A-Za-z0-9_.]{0,12}", index in proptest::option::of(1usize..10_000)) {
        let raw = match index {
            Some(index) => format!("{base}[{index}]"),
            None => base.clone(),
        };
        let name = resolve(&raw).unwrap();
        prop_assert_eq!(name.base(), base.as_str());
        prop_assert_eq!(name.index(), index);
        prop_assert_eq!(name.to_string(), raw);
    }
}

#[test]
fn from_str_matches_resolve() {
    let parsed: ParameterName = "eta[12]".parse().expect("parse");
    assert_eq!(parsed, ParameterName::indexed("eta", 12).expect("indexed"));
    assert_eq!(parsed.to_string(), "eta[12]");
}

#[test]
fn constructors_reject_invalid_parts() {
    assert!(ParameterName::scalar("").is_err());
    assert!(ParameterName::scalar("a[1]").is_err());
    assert!(ParameterName::indexed("a", 0).is_err());
}
