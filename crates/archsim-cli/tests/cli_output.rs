//! Exercises the `archsim` binary end to end: a real trace file in,
//! a report file out, canonical configuration.

use std::io::Write;
use std::process::Command;

#[test]
fn writes_a_report_file_for_a_small_trace() {
    let dir = tempfile::tempdir().unwrap();
    let trace_path = dir.path().join("trace.jsonl");
    let mut trace_file = std::fs::File::create(&trace_path).unwrap();
    writeln!(trace_file, r#"{{"kind":"mem_read","ip":0,"addr":0,"write_regs":[1]}}"#).unwrap();
    writeln!(trace_file, r#"{{"kind":"cond_branch","ip":4,"target":8,"taken":true}}"#).unwrap();
    writeln!(trace_file, r#"{{"kind":"finalize"}}"#).unwrap();
    drop(trace_file);

    let output_path = dir.path().join("report.txt");
    let status = Command::new(env!("CARGO_BIN_EXE_archsim"))
        .arg("--trace")
        .arg(&trace_path)
        .arg("--output")
        .arg(&output_path)
        .status()
        .unwrap();
    assert!(status.success());

    let report = std::fs::read_to_string(&output_path).unwrap();
    assert!(report.contains("cycles/instructions"));
    assert!(report.contains("L1:"));
    assert!(report.contains("L2:"));
    assert!(report.contains("Always Jump Predictor"));
}

#[test]
fn reports_a_failure_for_a_missing_trace_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.jsonl");

    let status = Command::new(env!("CARGO_BIN_EXE_archsim"))
        .arg("--trace")
        .arg(&missing)
        .status()
        .unwrap();
    assert!(!status.success());
}
