use std::fs::{self, File};
use std::io::Read;

use pdbref_artifact::{
    draws_archive_path, draws_entry_name, read_draws_archive, save_artifacts, write_atomic,
    write_draws_archive, InfoDocument,
};
use pdbref_core::{Provenance, RunConfig};
use pdbref_diag::DiagnosticsRecord;
use pdbref_draws::{ChainDraws, ParameterDraws};
use sha2::{Digest, Sha256};
use tempfile::tempdir;
use zip::{CompressionMethod, ZipArchive};

fn chains() -> Vec<ChainDraws> {
    (0..2)
        .map(|chain| {
            let mut draws = ChainDraws::new();
            let base = chain as f64 * 3.0;
            draws.insert("theta", ParameterDraws::Scalar(vec![base + 1.0, base + 2.0, base + 3.0]));
            draws
        })
        .collect()
}

#[test]
fn archive_holds_one_deflated_json_entry() {
    let dir = tempdir().expect("dir");
    let path = draws_archive_path(dir.path(), "toy-model");
    write_draws_archive(&path, &draws_entry_name("toy-model"), &chains()).expect("write");
    assert!(path.ends_with("toy-model.json.zip"));

    let mut archive = ZipArchive::new(File::open(&path).expect("open")).expect("zip");
    assert_eq!(archive.len(), 1);
    let mut entry = archive.by_index(0).expect("entry");
    assert_eq!(entry.name(), "toy-model.json");
    assert_eq!(entry.compression(), CompressionMethod::Deflated);
    let mut text = String::new();
    entry.read_to_string(&mut text).expect("read");
    let json: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(
        json,
        serde_json::json!([{"theta": [1.0, 2.0, 3.0]}, {"theta": [4.0, 5.0, 6.0]}])
    );
}

#[test]
fn archive_reads_back_into_chains() {
    let dir = tempdir().expect("dir");
    let path = draws_archive_path(dir.path(), "toy");
    write_draws_archive(&path, "toy.json", &chains()).expect("write");
    let restored = read_draws_archive(&path).expect("read");
    assert_eq!(restored, chains());
}

#[test]
fn non_finite_draws_read_back_as_nan() {
    let dir = tempdir().expect("dir");
    let path = draws_archive_path(dir.path(), "toy");
    let mut chain = ChainDraws::new();
    chain.insert("sigma", ParameterDraws::Scalar(vec![1.0, f64::NAN, f64::INFINITY]));
    chain.insert(
        "beta",
        ParameterDraws::Rows(vec![vec![f64::NEG_INFINITY, 2.0]]),
    );
    write_draws_archive(&path, "toy.json", &[chain]).expect("write");

    let restored = read_draws_archive(&path).expect("read");
    let sigma = restored[0]
        .get("sigma")
        .and_then(ParameterDraws::as_scalar)
        .expect("sigma");
    assert_eq!(sigma[0], 1.0);
    assert!(sigma[1].is_nan());
    assert!(sigma[2].is_nan());
    match restored[0].get("beta") {
        Some(ParameterDraws::Rows(rows)) => {
            assert!(rows[0][0].is_nan());
            assert_eq!(rows[0][1], 2.0);
        }
        other => panic!("unexpected beta draws {other:?}"),
    }
}

#[test]
fn failed_commit_leaves_no_file_behind() {
    let dir = tempdir().expect("dir");
    // A directory squatting on the final name makes the rename fail.
    let target = dir.path().join("blocked.json.zip");
    fs::create_dir(&target).expect("mkdir");
    let err = write_atomic(&target, b"payload").expect_err("rename onto directory");
    assert_eq!(err.info().code, "pdbref_artifact.persist");
    let entries: Vec<_> = fs::read_dir(dir.path())
        .expect("list")
        .map(|entry| entry.expect("entry").file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("blocked.json.zip")]);
    assert!(target.is_dir());
}

#[test]
fn atomic_write_replaces_existing_contents() {
    let dir = tempdir().expect("dir");
    let target = dir.path().join("nested").join("out.json");
    write_atomic(&target, b"first").expect("first");
    write_atomic(&target, b"second").expect("second");
    assert_eq!(fs::read(&target).expect("read"), b"second");
}

#[test]
fn save_artifacts_reports_paths_and_digest() {
    let dir = tempdir().expect("dir");
    let config = RunConfig {
        chains: 2,
        draws_per_chain: 3,
        warmup: 0,
        thin: 1,
        seed: 1,
    };
    let record = DiagnosticsRecord {
        parameter_names: vec!["theta".into()],
        ndraws: 6,
        nchains: 2,
        ess_bulk: vec![5.0],
        ess_tail: vec![5.0],
        r_hat: vec![1.0],
        divergent_transitions: vec![0, 0],
    };
    let doc = InfoDocument::build("toy", &config, &record, &Provenance::current());
    let saved = save_artifacts(dir.path(), &chains(), &doc).expect("save");
    let bytes = fs::read(&saved.draws_path).expect("read archive");
    assert_eq!(saved.draws_sha256, hex::encode(Sha256::digest(&bytes)));
    assert_eq!(InfoDocument::load(&saved.info_path).expect("load"), doc);
}
