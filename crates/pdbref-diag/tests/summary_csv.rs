use std::fs;

use pdbref_core::PdbError;
use pdbref_diag::{aggregate, SummaryRow, SummaryTable};
use tempfile::tempdir;

const MODERN: &str = "\
# Inference for Stan model: eight_schools
name,Mean,MCSE,StdDev,ESS_bulk,ESS_tail,R_hat
lp__,-39.5,0.05,2.6,1450.2,2210.0,1.001
mu,4.4,0.03,3.3,9120.5,7012.3,1.0003
tau,3.6,0.04,3.2,5830.0,4921.7,1.0011
theta[1],6.2,0.06,5.6,10012.4,8210.9,0.9999
";

const LEGACY: &str = "\
name,Mean,N_Eff,N_Eff/s,R_hat
lp__,-39.5,1200,400,1.0
mu,4.4,845.5,210,1.004
tau,3.6,nan,0,
";

#[test]
fn modern_columns_are_read_in_order() {
    let table = SummaryTable::from_csv_reader(MODERN.as_bytes()).expect("parse");
    assert_eq!(table.len(), 4);
    assert_eq!(table.parameter_names(), vec!["mu", "tau", "theta[1]"]);
    let theta = table.get("theta[1]").expect("theta");
    assert_eq!(theta.ess_bulk, 10012.4);
    assert_eq!(theta.ess_tail, 8210.9);
    assert_eq!(theta.r_hat, 0.9999);
}

#[test]
fn legacy_n_eff_feeds_both_ess_columns() {
    let table = SummaryTable::from_csv_reader(LEGACY.as_bytes()).expect("parse");
    let mu = table.get("mu").expect("mu");
    assert_eq!(mu.ess_bulk, 845.5);
    assert_eq!(mu.ess_tail, 845.5);
    assert_eq!(mu.r_hat, 1.004);
    // Empty R_hat cell falls back to the neutral default.
    let tau = table.get("tau").expect("tau");
    assert!(tau.ess_bulk.is_nan());
    assert_eq!(tau.r_hat, 1.0);
}

#[test]
fn n_eff_takes_precedence_over_ess_columns() {
    let row = SummaryRow::from_fields([("ESS_bulk", 10.0), ("N_Eff", 20.0), ("ESS_tail", 30.0)]);
    assert_eq!(row.ess_bulk, 20.0);
    assert_eq!(row.ess_tail, 20.0);
    assert_eq!(row.r_hat, 1.0);
}

#[test]
fn aggregate_reads_table_rows() {
    let table = SummaryTable::from_csv_reader(MODERN.as_bytes()).expect("parse");
    let names = table.parameter_names();
    let record = aggregate(&names, &table, 10, 10_000, &["divergent__"]);
    assert_eq!(record.parameter_names, names);
    assert_eq!(record.ess_bulk, vec![9120.5, 5830.0, 10012.4]);
    assert_eq!(record.divergent_transitions, vec![0; 10]);
}

#[test]
fn missing_file_is_an_input_error() {
    let dir = tempdir().expect("dir");
    let err = SummaryTable::from_csv_path(&dir.path().join("absent.csv")).expect_err("missing");
    match err {
        PdbError::Input(info) => {
            assert_eq!(info.code, "pdbref_diag.summary_open");
            assert!(info.context.contains_key("path"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn csv_path_roundtrip() {
    let dir = tempdir().expect("dir");
    let path = dir.path().join("summary.csv");
    fs::write(&path, MODERN).expect("write");
    let table = SummaryTable::from_csv_path(&path).expect("read");
    assert_eq!(table.row_or_default("absent"), SummaryRow::default());
    assert_eq!(table.get("mu").map(|row| row.ess_bulk), Some(9120.5));
}
