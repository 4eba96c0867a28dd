/// Acceptance tests for `cachegate check` and `cachegate config`
///
/// These run the binary against the manifests in fixtures/manifests/
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory and HOME so no stray config is discovered
struct TestWorkspace {
    temp_dir: TempDir,
    fixtures_dir: PathBuf,
}

impl TestWorkspace {
    fn new() -> Self {
        let project_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        Self {
            temp_dir: TempDir::new().unwrap(),
            fixtures_dir: project_root.join("fixtures/manifests"),
        }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn fixture(&self, name: &str) -> PathBuf {
        self.fixtures_dir.join(name)
    }

    fn cachegate(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_cachegate"));
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("CACHEGATE_LOG_FORMAT", "compact")
            .env_remove("CACHEGATE_CONFIG")
            .env_remove("CACHEGATE_FORMAT")
            .env_remove("CACHEGATE_JOBS")
            .env_remove("CACHEGATE_ROOT")
            .env_remove("RUST_LOG");
        cmd
    }

    fn copy_fixture(&self, name: &str, dest: &str) -> PathBuf {
        let dest = self.path().join(dest);
        fs::copy(self.fixture(name), &dest).unwrap();
        dest
    }

    fn create_file(&self, path: &str, content: &str) {
        let file_path = self.path().join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(file_path, content).unwrap();
    }
}

#[test]
fn test_check_reports_each_category() {
    let ws = TestWorkspace::new();

    ws.cachegate()
        .arg("check")
        .arg(ws.fixture("build.kdl"))
        .arg("--root")
        .arg(&ws.fixtures_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "clean: not cacheable [NOT_CACHEABLE] Caching has not been enabled for the task.",
        ))
        .stdout(predicate::str::contains(
            "check: not cacheable [NO_OUTPUTS_DECLARED] No outputs declared",
        ))
        .stdout(predicate::str::contains(
            "processResources: not cacheable [OVERLAPPING_OUTPUTS]",
        ))
        .stdout(predicate::str::contains(
            "javadoc: not cacheable [NON_CACHEABLE_OUTPUT] Output property 'destinationDir' contains a file tree",
        ))
        .stdout(predicate::str::contains(
            "publish: not cacheable [ENABLE_CONDITION_NOT_SATISFIED] 'release builds' not satisfied",
        ))
        .stdout(predicate::str::contains(
            "jar: not cacheable [DISABLE_CONDITION_SATISFIED] 'snapshot version' satisfied",
        ))
        .stdout(predicate::str::contains("compileJava: cacheable"))
        .stdout(predicate::str::contains(
            "7 tasks: 1 cacheable, 6 not cacheable",
        ));
}

#[cfg(unix)]
#[test]
fn test_overlap_path_displayed_relative_to_root() {
    let ws = TestWorkspace::new();

    ws.cachegate()
        .arg("check")
        .arg(ws.fixture("build.kdl"))
        .args(["--task", "processResources", "--root"])
        .arg(&ws.fixtures_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "file 'build/resources/main/stale.properties' was created (output property 'destinationDir')",
        ));
}

const OVERLAP_MANIFEST: &str = r#"task "copy" {
    output "out" kind="dir"
    cache-if "always"
    overlap "out" path="build/x.txt"
}
"#;

#[cfg(unix)]
#[test]
fn test_relative_manifest_overlap_displayed_relative_to_root() {
    let ws = TestWorkspace::new();
    ws.create_file("sub/tasks.kdl", OVERLAP_MANIFEST);

    ws.cachegate()
        .args(["check", "sub/tasks.kdl", "--root", "sub"])
        .assert()
        .success()
        .stdout(predicate::str::contains("file 'build/x.txt' was created"));
}

#[cfg(unix)]
#[test]
fn test_manifest_in_cwd_overlap_displayed_relative_to_cwd() {
    let ws = TestWorkspace::new();
    ws.create_file("tasks.kdl", OVERLAP_MANIFEST);

    ws.cachegate()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("file 'build/x.txt' was created"));
}

#[test]
fn test_results_keep_manifest_order_with_many_jobs() {
    let ws = TestWorkspace::new();

    let output = ws
        .cachegate()
        .arg("check")
        .arg(ws.fixture("build.kdl"))
        .args(["--jobs", "8"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let names: Vec<&str> = stdout
        .lines()
        .take_while(|line| !line.is_empty())
        .filter_map(|line| line.split(':').next())
        .collect();
    assert_eq!(
        names,
        vec![
            "clean",
            "check",
            "processResources",
            "javadoc",
            "publish",
            "jar",
            "compileJava"
        ]
    );
}

#[test]
fn test_json_output() {
    let ws = TestWorkspace::new();

    let output = ws
        .cachegate()
        .arg("check")
        .arg(ws.fixture("build.kdl"))
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tasks = report["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 7);
    assert_eq!(tasks[0]["task"], "clean");
    assert_eq!(tasks[0]["cacheable"], false);
    assert_eq!(tasks[0]["reason"]["category"], "NOT_CACHEABLE");
    assert_eq!(tasks[6]["task"], "compileJava");
    assert_eq!(tasks[6]["cacheable"], true);
    assert!(tasks[6]["reason"].is_null());

    assert_eq!(report["summary"]["cacheable"], 1);
    assert_eq!(report["summary"]["disabled"]["NOT_CACHEABLE"], 1);
    assert_eq!(report["summary"]["disabled"]["OVERLAPPING_OUTPUTS"], 1);
}

#[test]
fn test_fail_on_disabled() {
    let ws = TestWorkspace::new();

    ws.cachegate()
        .arg("check")
        .arg(ws.fixture("build.kdl"))
        .arg("--fail-on-disabled")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("clean: not cacheable"));

    ws.cachegate()
        .arg("check")
        .arg(ws.fixture("cacheable.kdl"))
        .arg("--fail-on-disabled")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 tasks: 2 cacheable, 0 not cacheable"));
}

#[test]
fn test_unknown_task_fails() {
    let ws = TestWorkspace::new();

    ws.cachegate()
        .arg("check")
        .arg(ws.fixture("build.kdl"))
        .args(["--task", "deploy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task not found in manifest: deploy"));
}

#[test]
fn test_invalid_manifest_fails_with_context() {
    let ws = TestWorkspace::new();
    ws.create_file("tasks.kdl", "task \"jar\" {\n    output \"archive\" kind=\"glob\"\n}\n");

    ws.cachegate()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse manifest"))
        .stderr(predicate::str::contains("Invalid output kind: glob"));
}

#[test]
fn test_discovered_config_supplies_defaults() {
    let ws = TestWorkspace::new();
    ws.copy_fixture("cacheable.kdl", "ci-tasks.kdl");
    ws.create_file(
        "cachegate.toml",
        "[check]\nmanifest = \"ci-tasks.kdl\"\nformat = \"json\"\n",
    );

    let output = ws.cachegate().arg("check").output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["tasks"].as_array().unwrap().len(), 2);
}

#[test]
fn test_invalid_discovered_config_fails() {
    let ws = TestWorkspace::new();
    ws.create_file("cachegate.toml", "[observability]\nlog_level = \"loud\"\n");

    ws.cachegate()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("observability.log_level"));
}

#[test]
fn test_unknown_format_in_config_fails() {
    let ws = TestWorkspace::new();
    ws.copy_fixture("cacheable.kdl", "tasks.kdl");
    ws.create_file("cachegate.toml", "[check]\nformat = \"yaml\"\n");

    ws.cachegate()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"))
        .stderr(predicate::str::contains("yaml"));
}

#[test]
fn test_config_example_is_valid() {
    let ws = TestWorkspace::new();

    let output = ws.cachegate().args(["config", "example"]).output().unwrap();
    assert!(output.status.success());

    let example = String::from_utf8(output.stdout).unwrap();
    ws.create_file("cachegate.toml", &example);

    ws.cachegate()
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"))
        .stdout(predicate::str::contains("Manifest: build/tasks.kdl"));
}
