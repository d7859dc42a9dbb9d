pub mod generate;
pub mod inspect;
pub mod version;

use pdbref_diag::QualityChecks;

/// Prints the check outcome, listing failures.
pub(crate) fn print_checks(checks: &QualityChecks) {
    let all_passed = checks.all_passed();
    println!("  All quality checks passed: {}", if all_passed { "True" } else { "False" });
    if !all_passed {
        println!("  Failed checks:");
        for name in checks.failed() {
            println!("    - {name}");
        }
    }
}
