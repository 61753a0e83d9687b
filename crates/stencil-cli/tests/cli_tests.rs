//! End-to-end tests for the `stencil` binary.

use std::{fs, path::Path};

use assert_cmd::Command;
use flate2::read::GzDecoder;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the user's config file and environment.
fn stencil(home: &Path) -> Command {
    let config = home.join("stencil.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("stencil").unwrap();
    cmd.current_dir(home)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(&config);
    cmd
}

#[test]
fn help_lists_commands() {
    let tmp = TempDir::new().unwrap();
    stencil(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("preview"))
        .stdout(predicate::str::contains("download"));
}

#[test]
fn list_filters_by_category() {
    let tmp = TempDir::new().unwrap();
    stencil(tmp.path())
        .args(["list", "--category", "container", "--format", "list"])
        .assert()
        .success()
        .stdout("dockerfile-nodejs\ndockerfile-python\n");
}

#[test]
fn list_json_is_parseable() {
    let tmp = TempDir::new().unwrap();
    let out = stencil(tmp.path())
        .args(["list", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let templates: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(templates.as_array().map(Vec::len), Some(9));
    assert_eq!(templates[0]["id"], "jenkins-pipeline");
}

#[test]
fn categories_in_display_order() {
    let tmp = TempDir::new().unwrap();
    let out = stencil(tmp.path())
        .args(["--output-format", "json", "categories"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let listings: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let listings = listings.as_array().unwrap();
    let ids: Vec<_> = listings
        .iter()
        .map(|l| l["id"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(ids, ["cicd", "container", "kubernetes", "security"]);

    for listing in listings {
        let category = listing["id"].as_str().unwrap();
        let out = stencil(tmp.path())
            .args(["list", "--category", category, "--format", "json"])
            .output()
            .unwrap();
        let listed: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
        let embedded: Vec<_> = listing["templates"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].clone())
            .collect();
        let filtered: Vec<_> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].clone())
            .collect();
        assert_eq!(embedded, filtered, "templates of {category}");
    }
}

#[test]
fn no_color_accepts_conventional_values() {
    let tmp = TempDir::new().unwrap();
    for value in ["1", "yes", "0", ""] {
        stencil(tmp.path())
            .env("NO_COLOR", value)
            .args(["list", "--format", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("dockerfile-nodejs"));
    }
}

#[test]
fn show_describes_fields() {
    let tmp = TempDir::new().unwrap();
    stencil(tmp.path())
        .args(["show", "dockerfile-nodejs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("packageManager"))
        .stdout(predicate::str::contains("[npm|yarn|pnpm]"))
        .stdout(predicate::str::contains("express-app"));
}

#[test]
fn preview_prints_rendered_dockerfile() {
    let tmp = TempDir::new().unwrap();
    stencil(tmp.path())
        .args(["preview", "dockerfile-nodejs", "--set", "nodeVersion=20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# ./Dockerfile"))
        .stdout(predicate::str::contains("FROM node:20-alpine AS builder"))
        .stdout(predicate::str::contains("yarn").not());
}

#[test]
fn preview_reports_missing_field() {
    let tmp = TempDir::new().unwrap();
    stencil(tmp.path())
        .args(["preview", "jenkins-pipeline"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("projectName"));
}

#[test]
fn unknown_template_exits_with_not_found() {
    let tmp = TempDir::new().unwrap();
    stencil(tmp.path())
        .args(["preview", "nope"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("stencil list"));
}

#[test]
fn bad_set_value_is_a_user_error() {
    let tmp = TempDir::new().unwrap();
    stencil(tmp.path())
        .args(["preview", "dockerfile-nodejs", "--set", "port=abc"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("port"));
}

#[test]
fn generate_writes_files_and_refuses_overwrite() {
    let tmp = TempDir::new().unwrap();
    let args = [
        "generate",
        "k8s-deployment",
        "--example",
        "web-app",
        "--output",
        "deploy",
    ];

    stencil(tmp.path()).args(args).assert().success();
    let deployment = fs::read_to_string(tmp.path().join("deploy/k8s/deployment.yaml")).unwrap();
    assert!(deployment.contains("image: my-registry/my-web-app:latest"));
    assert!(tmp.path().join("deploy/k8s/ingress.yaml").is_file());

    stencil(tmp.path())
        .args(args)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    stencil(tmp.path()).args(args).arg("--force").assert().success();
}

#[test]
fn download_saves_archive() {
    let tmp = TempDir::new().unwrap();
    stencil(tmp.path())
        .args([
            "download",
            "network-policy",
            "--set",
            "policyName=web",
            "--output",
            "artifacts",
        ])
        .assert()
        .success();

    let archives: Vec<_> = fs::read_dir(tmp.path().join("artifacts"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(archives.len(), 1);
    let name = archives[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("network-policy_") && name.ends_with(".tar.gz"));

    let bytes = fs::read(&archives[0]).unwrap();
    let mut archive = tar::Archive::new(GzDecoder::new(bytes.as_slice()));
    let paths: Vec<_> = archive
        .entries()
        .unwrap()
        .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        paths,
        [
            "security/network-policy.yaml",
            "security/deny-all-network-policy.yaml"
        ]
    );
}

#[test]
fn download_directory_comes_from_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("stencil.toml"),
        "[download]\ndirectory = \"from-config\"\n",
    )
    .unwrap();

    stencil(tmp.path())
        .args(["download", "dockerfile-python"])
        .assert()
        .success();

    assert_eq!(fs::read_dir(tmp.path().join("from-config")).unwrap().count(), 1);
}

#[test]
fn local_templates_are_loaded() {
    let tmp = TempDir::new().unwrap();
    let templates = tmp.path().join("templates");
    fs::create_dir(&templates).unwrap();
    fs::write(
        templates.join("hello.toml"),
        r#"
id = "hello"
name = "Hello"
category = "misc"

[[files]]
name = "hello.txt"
path = "./hello.txt"
content = "Hello, <%= who | upper %>!"

[[fields]]
name = "who"
label = "Who"
type = "text"
default = "world"
"#,
    )
    .unwrap();
    fs::write(
        tmp.path().join("stencil.toml"),
        "[templates]\nlocal_path = \"templates\"\n",
    )
    .unwrap();

    stencil(tmp.path())
        .args(["preview", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello, WORLD!"));
}

#[test]
fn environment_overrides_file() {
    let tmp = TempDir::new().unwrap();
    stencil(tmp.path())
        .env("STENCIL_OUTPUT__FORMAT", "json")
        .args(["config", "get", "output.format"])
        .assert()
        .success()
        .stdout("json\n");
}

#[test]
fn init_writes_loadable_config() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested/stencil.toml");

    Command::cargo_bin("stencil")
        .unwrap()
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(&path)
        .arg("init")
        .assert()
        .success();
    assert!(path.is_file());

    Command::cargo_bin("stencil")
        .unwrap()
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "output.no_color"])
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn missing_explicit_config_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();
    Command::cargo_bin("stencil")
        .unwrap()
        .arg("--config")
        .arg(tmp.path().join("absent.toml"))
        .arg("list")
        .assert()
        .code(4);
}

#[test]
fn completions_for_bash() {
    let tmp = TempDir::new().unwrap();
    stencil(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stencil"));
}
