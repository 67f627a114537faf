use {
    assert_cmd::cargo::cargo_bin_cmd,
    predicates::prelude::*,
    pretty_assertions::assert_eq,
    std::{fs, path::Path},
};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/dummy-monorepo");

fn write_package(root: &Path, name: &str, version: &str) {
    let dir = root.join("packages").join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("package.json"),
        format!("{{\n  \"name\": \"{name}\",\n  \"version\": \"{version}\",\n  \"private\": false\n}}\n"),
    )
    .unwrap();
}

#[test]
fn test_list_fixture() {
    cargo_bin_cmd!("pkgtask")
        .args(["--root", FIXTURE, "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("force-ratio\t0.3.1"))
        .stdout(predicate::str::contains("flexible-cards\t1.0.0"));
}

#[test]
fn test_list_fixture_json_keeps_registry_order() {
    let assert = cargo_bin_cmd!("pkgtask")
        .args(["--root", FIXTURE, "list", "--json"])
        .assert()
        .success();
    let packages: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let names: Vec<&str> = packages
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["force-ratio", "flexible-cards"]);
}

#[test]
fn test_publish_requires_package() {
    let root_dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("pkgtask")
        .args(["--root"])
        .arg(root_dir.path())
        .arg("publish")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_publish_missing_manifest() {
    let root_dir = tempfile::tempdir().unwrap();
    fs::write(
        root_dir.path().join("pkgtask.toml"),
        "build_command = [\"sh\", \"-c\", \"touch ../../built\"]\n",
    )
    .unwrap();

    cargo_bin_cmd!("pkgtask")
        .args(["--root"])
        .arg(root_dir.path())
        .args(["publish", "@myorg/ghost", "minor"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("package directory not found"));
    assert!(!root_dir.path().join("built").exists());
}

#[cfg(unix)]
#[test]
fn test_build_all_stops_at_first_failure() {
    let root_dir = tempfile::tempdir().unwrap();
    for name in ["a", "b", "c"] {
        write_package(root_dir.path(), name, "0.1.0");
    }
    fs::write(root_dir.path().join("packages/b/fail"), "").unwrap();
    fs::write(
        root_dir.path().join("pkgtask.toml"),
        r#"packages = ["c", "b", "a"]
build_command = ["sh", "-c", "test ! -f fail && basename \"$(pwd -P)\" >> ../../build.log"]
"#,
    )
    .unwrap();

    cargo_bin_cmd!("pkgtask")
        .args(["--root"])
        .arg(root_dir.path())
        .arg("build")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to build"));

    assert_eq!(
        fs::read_to_string(root_dir.path().join("build.log")).unwrap(),
        "c\n"
    );
}

#[cfg(unix)]
#[test]
fn test_build_single_package() {
    let root_dir = tempfile::tempdir().unwrap();
    for name in ["a", "b"] {
        write_package(root_dir.path(), name, "0.1.0");
    }
    fs::write(
        root_dir.path().join("pkgtask.toml"),
        "build_command = [\"sh\", \"-c\", \"basename \\\"$(pwd -P)\\\" >> ../../build.log\"]\n",
    )
    .unwrap();

    cargo_bin_cmd!("pkgtask")
        .args(["--root"])
        .arg(root_dir.path())
        .args(["build", "@scope/b"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(root_dir.path().join("build.log")).unwrap(),
        "b\n"
    );
}

#[cfg(unix)]
#[test]
fn test_publish_skip_git() {
    let root_dir = tempfile::tempdir().unwrap();
    write_package(root_dir.path(), "core", "1.2.3");
    fs::write(
        root_dir.path().join("pkgtask.toml"),
        r#"build_command = ["sh", "-c", "true"]
publish_command = ["sh", "-c", "basename \"$(pwd -P)\" >> ../../publish.log"]
"#,
    )
    .unwrap();

    cargo_bin_cmd!("pkgtask")
        .args(["--root"])
        .arg(root_dir.path())
        .args(["publish", "@myorg/core", "minor", "--skip-git"])
        .assert()
        .success()
        .stderr(predicate::str::contains("successfully published @myorg/core@1.3.0"));

    assert_eq!(
        fs::read_to_string(root_dir.path().join("packages/core/package.json")).unwrap(),
        "{\n  \"name\": \"core\",\n  \"version\": \"1.3.0\",\n  \"private\": false\n}\n"
    );
    assert_eq!(
        fs::read_to_string(root_dir.path().join("publish.log")).unwrap(),
        "core\n"
    );
}

#[cfg(unix)]
#[test]
fn test_publish_build_failure_keeps_manifest() {
    let root_dir = tempfile::tempdir().unwrap();
    write_package(root_dir.path(), "core", "0.0.9");
    fs::write(
        root_dir.path().join("pkgtask.toml"),
        r#"build_command = ["sh", "-c", "exit 1"]
publish_command = ["sh", "-c", "touch ../../published"]
"#,
    )
    .unwrap();

    cargo_bin_cmd!("pkgtask")
        .args(["--root"])
        .arg(root_dir.path())
        .args(["publish", "core"])
        .assert()
        .code(1);

    assert!(fs::read_to_string(root_dir.path().join("packages/core/package.json"))
        .unwrap()
        .contains("\"version\": \"0.0.9\""));
    assert!(!root_dir.path().join("published").exists());
}

#[cfg(unix)]
fn write_release_workspace(root: &Path, extra_config: &str) {
    write_package(root, "core", "1.2.3");
    fs::write(
        root.join("pkgtask.toml"),
        format!(
            "build_command = [\"sh\", \"-c\", \"true\"]\npublish_command = [\"sh\", \"-c\", \"touch ../../published\"]\n{extra_config}"
        ),
    )
    .unwrap();
}

#[cfg(unix)]
#[test]
fn test_publish_git_failure_is_fatal_when_not_tolerated() {
    let root_dir = tempfile::tempdir().unwrap();
    write_release_workspace(root_dir.path(), "tolerate_bookkeeping_failure = false\n");

    cargo_bin_cmd!("pkgtask")
        .env("GIT_DIR", root_dir.path().join("missing-git-dir"))
        .args(["--root"])
        .arg(root_dir.path())
        .args(["publish", "core"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("git status"));

    // the registry publish already happened and is not rolled back
    assert!(root_dir.path().join("published").exists());
}

#[cfg(unix)]
#[test]
fn test_publish_git_failure_tolerated_by_default() {
    let root_dir = tempfile::tempdir().unwrap();
    write_release_workspace(root_dir.path(), "");

    let assert = cargo_bin_cmd!("pkgtask")
        .env("GIT_DIR", root_dir.path().join("missing-git-dir"))
        .args(["--root"])
        .arg(root_dir.path())
        .args(["publish", "core", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("git operations failed"));

    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["version"], "1.2.4");
    assert_eq!(report["bookkeeping"]["status"], "failed");
}

#[cfg(unix)]
#[test]
fn test_publish_strict_git_flag_overrides_config() {
    let root_dir = tempfile::tempdir().unwrap();
    write_release_workspace(root_dir.path(), "");

    cargo_bin_cmd!("pkgtask")
        .env("GIT_DIR", root_dir.path().join("missing-git-dir"))
        .args(["--root"])
        .arg(root_dir.path())
        .args(["publish", "core", "--strict-git"])
        .assert()
        .code(1);
}

#[test]
fn test_publish_skip_git_conflicts_with_strict_git() {
    let root_dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("pkgtask")
        .args(["--root"])
        .arg(root_dir.path())
        .args(["publish", "core", "--skip-git", "--strict-git"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}
