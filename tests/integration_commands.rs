//! Integration tests for `pagedeps validate`, `tree` and `list`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use pagedeps::test_utils::ManifestFixture;

fn pagedeps(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pagedeps").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("PAGEDEPS_PROFILE")
        .env_remove("PAGEDEPS_MANIFEST")
        .env_remove("RUST_LOG");
    cmd
}

fn project(fixture: ManifestFixture) -> TempDir {
    let temp = TempDir::new().unwrap();
    fixture.write_to(temp.path()).unwrap();
    temp
}

#[test]
fn test_validate_valid_manifest() {
    let temp = project(ManifestFixture::basic());

    pagedeps(&temp)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 'development' builds"))
        .stdout(predicate::str::contains("Profile 'production' builds"))
        .stdout(predicate::str::contains("Manifest is valid"));
}

#[test]
fn test_validate_json() {
    let temp = project(ManifestFixture::basic());

    let output = pagedeps(&temp).args(["validate", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(results["valid"], true);
    assert_eq!(results["packages_resolvable"], true);
    assert_eq!(results["errors"], serde_json::json!([]));
}

#[test]
fn test_validate_broken_package() {
    let temp = project(ManifestFixture::broken_package());

    pagedeps(&temp)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("package 'widgets'"))
        .stdout(predicate::str::contains("unknown stylesheet 'widgets'"))
        .stdout(predicate::str::contains("Manifest is invalid"));
}

#[test]
fn test_validate_out_of_order_dependency() {
    let temp = project(ManifestFixture::out_of_order());

    pagedeps(&temp)
        .args(["validate", "--format", "json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("depends on unknown library 'jquery'"));
}

#[test]
fn test_validate_no_manifest() {
    let temp = TempDir::new().unwrap();

    pagedeps(&temp)
        .args(["--manifest-path", "assets.toml", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Manifest is invalid"));
}

#[test]
fn test_validate_strict_fails_on_unused_library() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("assets.toml"),
        r#"
[[library]]
name = "jquery"
url = "/jq.js"

[[library]]
name = "legacy"
url = "/legacy.js"

[[package]]
name = "base"
libraries = ["jquery"]
"#,
    )
    .unwrap();

    pagedeps(&temp)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("library 'legacy' is not used by any package"));

    pagedeps(&temp).args(["validate", "--strict"]).assert().failure();
}

#[test]
fn test_tree_for_library() {
    let temp = project(ManifestFixture::basic());

    pagedeps(&temp)
        .args(["tree", "jquery.ui"])
        .assert()
        .success()
        .stdout(predicate::eq("jquery.ui\n└── jquery\n"));
}

#[test]
fn test_tree_roots() {
    let temp = project(ManifestFixture::basic());

    pagedeps(&temp)
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::contains("jquery.ui\n└── jquery"))
        .stdout(predicate::str::contains("deform\n└── jquery"));
}

#[test]
fn test_tree_unknown_library() {
    let temp = project(ManifestFixture::basic());

    pagedeps(&temp)
        .args(["tree", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown library 'nope'"));
}

#[test]
fn test_list_table() {
    let temp = project(ManifestFixture::basic());

    pagedeps(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("development"))
        .stdout(predicate::str::contains("jquery.ui"))
        .stdout(predicate::str::contains("autofocus"))
        .stdout(predicate::str::contains("forms"));
}

#[test]
fn test_list_json_filtered() {
    let temp = project(ManifestFixture::basic());

    let output = pagedeps(&temp)
        .args(["--profile", "production", "list", "--kind", "lib", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["jquery", "jquery.ui", "deform"]);
    assert_eq!(entries[0]["url"], "/static/jquery.min.js");
    assert_eq!(entries[1]["detail"], "jquery");
}
