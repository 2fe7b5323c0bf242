//! Integration tests driving a stub engine binary with controlled behavior

#![cfg(unix)]

use ophion_core::OphionError;
use ophion_engine::{EngineDriver, EngineSettings, JobSpec, RunMode, RunOutcome};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

/// Write an executable stub engine script and return its path
fn write_stub_engine(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("stub-engine");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();

    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();

    path
}

fn driver_for(binary: &Path, jobs_dir: &Path) -> EngineDriver {
    EngineDriver::new(EngineSettings {
        binary: binary.to_string_lossy().into_owned(),
        sdm: "conda".to_string(),
        wrapper_prefix: "https://example.org/wrappers/".to_string(),
        jobs_dir: jobs_dir.to_path_buf(),
        preserve_jobs: false,
    })
}

fn demo_spec() -> JobSpec {
    JobSpec::new("demo", "loc")
        .input("a", "x.txt")
        .output("b", "y.txt")
        .threads(2)
}

fn completed(outcome: RunOutcome) -> ophion_engine::ExecutionResult {
    match outcome {
        RunOutcome::Completed(result) => result,
        RunOutcome::Previewed(_) => panic!("execute mode must complete a run"),
    }
}

#[test]
fn test_execute_returns_real_exit_codes() {
    let temp = TempDir::new().unwrap();
    let jobs_dir = temp.path().join("jobs");

    for code in [0, 1, 17] {
        let stub = write_stub_engine(temp.path(), &format!("exit {}", code));
        let driver = driver_for(&stub, &jobs_dir);

        let result = completed(driver.run(&demo_spec(), RunMode::Execute).unwrap());
        assert_eq!(result.return_code, code);
    }
}

#[test]
fn test_execute_captures_both_streams() {
    let temp = TempDir::new().unwrap();
    let stub = write_stub_engine(
        temp.path(),
        "echo engine says hello\necho engine complains >&2\nexit 3",
    );
    let driver = driver_for(&stub, &temp.path().join("jobs"));

    let result = completed(driver.run(&demo_spec(), RunMode::Execute).unwrap());
    assert_eq!(result.return_code, 3);
    assert_eq!(result.stdout, "engine says hello\n");
    assert_eq!(result.stderr, "engine complains\n");
}

#[test]
fn test_execute_passes_rendered_rule_to_engine() {
    let temp = TempDir::new().unwrap();
    let jobs_dir = temp.path().join("jobs");
    // The job-file path is the final argument; dump its content
    let stub = write_stub_engine(temp.path(), "cat \"$7\"");
    let driver = driver_for(&stub, &jobs_dir);

    let result = completed(driver.run(&demo_spec(), RunMode::Execute).unwrap());
    assert_eq!(result.return_code, 0);
    assert!(result.stdout.starts_with("rule demo:\n"));
    assert!(result.stdout.contains("a=r\"x.txt\","));
    assert!(result.stdout.contains("threads: 2"));
    assert!(result.stdout.contains("wrapper: r\"loc\""));

    // The job file is cleaned up once the run completes
    let leftovers: Vec<_> = std::fs::read_dir(&jobs_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_execute_argv_shape() {
    let temp = TempDir::new().unwrap();
    let stub = write_stub_engine(temp.path(), "exit 0");
    let driver = driver_for(&stub, &temp.path().join("jobs"));

    let result = completed(driver.run(&demo_spec(), RunMode::Execute).unwrap());
    assert_eq!(result.argv[0], stub.to_string_lossy());
    assert_eq!(result.argv[1], "--cores");
    assert_eq!(result.argv[2], "2");
    assert_eq!(result.argv[3], "--sdm");
    assert_eq!(result.argv[4], "conda");
    assert_eq!(result.argv[5], "--wrapper-prefix");
    assert_eq!(result.argv[6], "https://example.org/wrappers/");
    assert!(result.argv[7].ends_with(".smk"));
    assert!(result.argv[7].contains("demo_"));
}

#[test]
fn test_nonzero_exit_is_data_not_error() {
    let temp = TempDir::new().unwrap();
    let stub = write_stub_engine(temp.path(), "exit 42");
    let driver = driver_for(&stub, &temp.path().join("jobs"));

    // No Err: the caller branches on return_code themselves
    let outcome = driver.run(&demo_spec(), RunMode::Execute).unwrap();
    assert_eq!(outcome.return_code(), 42);
}

#[test]
fn test_spawn_failure_is_an_error() {
    let temp = TempDir::new().unwrap();
    let driver = driver_for(
        Path::new("/no/such/dir/stub-engine"),
        &temp.path().join("jobs"),
    );

    let err = driver.run(&demo_spec(), RunMode::Execute).unwrap_err();
    let spawn = err
        .downcast_ref::<OphionError>()
        .expect("spawn failure surfaces as OphionError");
    assert!(matches!(spawn, OphionError::Spawn(_)));
}

#[test]
fn test_preview_spawns_nothing_even_with_failing_engine() {
    let temp = TempDir::new().unwrap();
    let jobs_dir = temp.path().join("jobs");
    // A binary that does not exist: preview must never try to spawn it
    let driver = driver_for(Path::new("/no/such/dir/stub-engine"), &jobs_dir);

    let outcome = driver.run(&demo_spec(), RunMode::Preview).unwrap();
    assert_eq!(outcome.return_code(), 0);
    assert!(!jobs_dir.exists());
}

#[test]
fn test_stub_engine_version_probe() {
    let temp = TempDir::new().unwrap();
    let stub = write_stub_engine(temp.path(), "echo 9.1.1");

    let binary =
        ophion_engine::EngineBinary::locate(&stub.to_string_lossy()).unwrap();
    assert!(binary.is_available());
    assert_eq!(binary.version().unwrap(), "9.1.1");
}
