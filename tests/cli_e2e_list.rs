//! End-to-end tests for the `list` command.
//!
//! These tests invoke the actual CLI binary against a sample library.

mod common;
use common::prelude::*;

#[test]
fn test_list_without_resources_section_selects_everything() {
    let fixture = TestFixture::new()
        .with_sample_library()
        .with_config(configs::SELECT_ALL);

    fixture
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("code-legacy.md"))
        .stdout(predicate::str::contains("testing/experimental/fuzz.md"))
        .stdout(predicate::str::contains("prettier-config.json"));
}

#[test]
fn test_list_applies_rules() {
    let fixture = TestFixture::new()
        .with_sample_library()
        .with_config(configs::WITH_RULES);

    fixture
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("# prompts (3)"))
        .stdout(predicate::str::contains("  code-review.md\n"))
        .stdout(predicate::str::contains("  testing/unit.md\n"))
        .stdout(predicate::str::contains("code-legacy.md").not())
        .stdout(predicate::str::contains("fuzz.md").not())
        .stdout(predicate::str::contains("auth/legacy").not())
        .stdout(predicate::str::contains("  eslint-config.json\n"))
        .stdout(predicate::str::contains("prettier-config.json").not());
}

#[test]
fn test_list_single_category() {
    let fixture = TestFixture::new()
        .with_sample_library()
        .with_config(configs::WITH_RULES);

    fixture
        .command()
        .args(["list", "patterns"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# patterns (2)"))
        .stdout(predicate::str::contains("auth/oauth.md"))
        .stdout(predicate::str::contains("prompts").not());
}

#[test]
fn test_list_unknown_category_suggests_fix() {
    let fixture = TestFixture::new()
        .with_sample_library()
        .with_config(configs::SELECT_ALL);

    fixture
        .command()
        .args(["list", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown resource category: config"))
        .stderr(predicate::str::contains("Did you mean 'configs'?"));
}

#[test]
fn test_list_json() {
    let fixture = TestFixture::new()
        .with_sample_library()
        .with_config(configs::WITH_RULES);

    let output = fixture
        .command()
        .args(["list", "configs", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let configs = &json["categories"][0];
    assert_eq!(configs["category"], "configs");
    assert_eq!(configs["selected"], serde_json::json!(["eslint-config.json"]));
    assert_eq!(
        configs["dependencies"][0]["required_by"],
        "templates/nextjs-app"
    );
    assert_eq!(configs["counts"]["unmatched"], 1);
}

#[test]
fn test_list_tree() {
    let fixture = TestFixture::new()
        .with_sample_library()
        .with_config(configs::WITH_RULES);

    fixture
        .command()
        .args(["list", "--tree"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("library\n"))
        .stdout(predicate::str::contains("nextjs-app"))
        .stdout(predicate::str::contains("oauth.md"));
}

#[test]
fn test_list_search() {
    let fixture = TestFixture::new()
        .with_sample_library()
        .with_config(configs::SELECT_ALL);

    fixture
        .command()
        .args(["list", "--search", "REVIEW"])
        .assert()
        .success()
        .stdout(predicate::str::contains("code-review.md"))
        .stdout(predicate::str::contains("deployment.md").not())
        .stdout(predicate::str::contains("1 resource(s) selected"));
}

#[test]
fn test_list_missing_config() {
    let fixture = TestFixture::new().with_sample_library();

    fixture
        .command()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn test_list_library_flag_overrides_config() {
    let fixture = TestFixture::new()
        .with_file("elsewhere/prompts/only.md", "only")
        .with_config(configs::SELECT_ALL);

    fixture
        .command()
        .arg("list")
        .arg("--library")
        .arg(fixture.path().join("elsewhere"))
        .assert()
        .success()
        .stdout(predicate::str::contains("only.md"));
}

#[test]
fn test_list_missing_library() {
    let fixture = TestFixture::new().with_config(configs::SELECT_ALL);

    fixture
        .command()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Library not found"));
}

#[test]
fn test_list_category_includes_its_dependencies() {
    let fixture = TestFixture::new()
        .with_sample_library()
        .with_config(
            r#"
library_path: library
resources:
  templates:
    include: ["nextjs-app"]
  configs:
    include: []
"#,
        );

    let output = fixture
        .command()
        .args(["list", "templates", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let categories = json["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["category"], "templates");
    assert_eq!(categories[1]["category"], "configs");
    assert_eq!(
        categories[1]["selected"],
        serde_json::json!(["eslint-config.json"])
    );
    assert_eq!(
        categories[1]["dependencies"][0]["required_by"],
        "templates/nextjs-app"
    );

    fixture
        .command()
        .args(["list", "templates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("eslint-config.json"))
        .stdout(predicate::str::contains("prettier-config.json").not());
}
