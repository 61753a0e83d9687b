//! Archive round-trips through the real packager.

use std::{io::Read, sync::Arc};

use flate2::read::GzDecoder;
use stencil_adapters::{TarGzPackager, TemplateRegistry};
use stencil_core::{
    application::GenerationService,
    domain::{ConfigMap, ConfigValue},
};

fn generator() -> GenerationService {
    GenerationService::new(
        Arc::new(TemplateRegistry::with_builtin().unwrap()),
        Arc::new(TarGzPackager::new()),
    )
}

fn unpack(bytes: &[u8]) -> Vec<(String, String)> {
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    archive
        .entries()
        .unwrap()
        .map(|entry| {
            let mut entry = entry.unwrap();
            let path = entry.path().unwrap().to_string_lossy().into_owned();
            let mut body = String::new();
            entry.read_to_string(&mut body).unwrap();
            (path, body)
        })
        .collect()
}

#[test]
fn two_file_definition_round_trips() {
    let generator = generator();
    let mut config = ConfigMap::new();
    config.insert("policyName".into(), ConfigValue::text("web-policy"));
    config.insert("namespace".into(), ConfigValue::text("shop"));

    let manifest = generator.generate("network-policy", &config).unwrap();
    let artifact = generator.package(&manifest).unwrap();

    let entries = unpack(&artifact.bytes);
    assert_eq!(entries.len(), 2);
    for (file, (path, body)) in manifest.files.iter().zip(&entries) {
        assert_eq!(file.path.trim_start_matches("./"), path);
        assert_eq!(&file.content, body);
    }
    assert_eq!(artifact.filename, format!("{}.tar.gz", manifest.archive_stem()));
    assert!(artifact.filename.starts_with("network-policy_"));
}

#[test]
fn download_runs_generation_first() {
    let generator = generator();
    let mut config = ConfigMap::new();
    config.insert("policyName".into(), ConfigValue::text("restrictive"));

    let artifact = generator
        .download("pod-security-policy", Some(&config))
        .unwrap();
    let entries = unpack(&artifact.bytes);

    let paths: Vec<_> = entries.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(paths, ["security/pod-security-policy.yaml", "security/rbac.yaml"]);
    assert!(entries[0].1.contains("name: restrictive"));
    assert!(entries[0].1.contains("privileged: false"));
}

#[test]
fn download_without_config_uses_defaults() {
    let artifact = generator().download("dockerfile-python", None).unwrap();
    let entries = unpack(&artifact.bytes);
    assert_eq!(entries[0].0, "Dockerfile");
    assert!(entries[0].1.contains("FROM python:3.11-slim AS builder"));
}

#[test]
fn download_never_fabricates_content() {
    let err = generator().download("k8s-deployment", None).unwrap_err();
    assert_eq!(err.as_validation().map(|e| e.field()), Some("appName"));
}
