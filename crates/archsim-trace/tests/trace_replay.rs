//! Replays a fixture trace end to end: canonical configuration, every
//! event shape, and a finalize.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use archsim_cpu::Cpu;
use archsim_trace::{to_register_ids, Config, EventSource, TraceEvent, TraceReader};

fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn replays_every_event_shape_from_a_fixture_file() {
    let config = Config::default();
    let memory = config.build_memory().unwrap();
    let predictors = config.build_predictors().unwrap();
    let mut cpu = Cpu::new(memory, predictors);

    let file = File::open(fixture_path("sample_trace.jsonl")).unwrap();
    let mut reader = TraceReader::new(BufReader::new(file));

    let mut events = 0;
    while let Some(event) = reader.next_event().unwrap() {
        events += 1;
        match event {
            TraceEvent::MemRead { ip, addr, write_regs } => {
                cpu.on_mem_read(ip, addr, &to_register_ids(&write_regs));
            }
            TraceEvent::MemWrite { ip, addr } => cpu.on_mem_write(ip, addr),
            TraceEvent::CondBranch { ip, target, taken } => cpu.on_cond_branch(ip, target, taken),
            TraceEvent::Other { read_regs, write_regs } => {
                cpu.on_other(&to_register_ids(&read_regs), &to_register_ids(&write_regs));
            }
            TraceEvent::Finalize => cpu.finalize(),
        }
    }

    assert_eq!(events, 6);
    assert_eq!(cpu.instrs(), 5);
    assert!(cpu.cycles() > 0);

    let mut report = Vec::new();
    cpu.report(&mut report).unwrap();
    let text = String::from_utf8(report).unwrap();
    assert!(text.contains("cycles/instructions"));
    assert!(text.contains("L1:"));
    assert!(text.contains("L2:"));
    assert!(text.contains("Always Jump Predictor"));
}

#[test]
fn custom_toml_config_changes_the_geometry_the_trace_runs_against() {
    let toml = r#"
        [cache.l1]
        size = 1024
        ways = 1
        line_len = 16

        predictors = ["never-jump"]
    "#;
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("archsim.toml");
    std::fs::write(&config_path, toml).unwrap();

    let config = Config::load(&config_path).unwrap();
    let memory = config.build_memory().unwrap();
    let predictors = config.build_predictors().unwrap();
    assert_eq!(predictors.len(), 1);
    assert_eq!(predictors[0].description(), "Never Jump Predictor");

    let mut cpu = Cpu::new(memory, predictors);
    cpu.on_mem_read(0, 0, &[]);
    cpu.finalize();
    assert_eq!(cpu.instrs(), 1);
}
