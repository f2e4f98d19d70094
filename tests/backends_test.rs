//! Integration tests for the built-in backends driven from configuration.

use std::fs;
use std::path::Path;

use depchain::backends::build_manager;
use depchain::config::{parse_config, validate};
use depchain::requirements::{
    DependencyKind, DependencyRequest, Exactness, InstallStatus, Requirement, ResolverApi,
};
use tempfile::TempDir;

fn create_fake_binary(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "#!/bin/sh\n").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}

/// Package tree with samtools 1.9, plus a bin dir holding samtools and bwa.
fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("tree/samtools/1.9/bin")).unwrap();
    create_fake_binary(&temp.path().join("bin/bwa"));
    create_fake_binary(&temp.path().join("bin/samtools"));
    temp
}

fn config_yaml(root: &Path, install: Option<&str>) -> String {
    let mut yaml = format!(
        "resolvers:\n  - kind: directory\n    base_path: {tree}\n    resolver_type: packages\n  - kind: command\n    packages: [samtools, bwa, seqtk]\n    search_path: [{bin}]\n",
        tree = root.join("tree").display(),
        bin = root.join("bin").display(),
    );
    if let Some(template) = install {
        yaml.push_str(&format!("    install: \"{}\"\n", template));
    }
    yaml
}

fn req(name: &str, version: Option<&str>) -> Requirement {
    let r = Requirement::new(name).unwrap();
    match version {
        Some(v) => r.with_version(v),
        None => r,
    }
}

#[test]
fn configured_chain_resolves_by_priority() {
    let temp = workspace();
    let config = parse_config(&config_yaml(temp.path(), None), Path::new("test.yml")).unwrap();
    validate(&config).unwrap();
    let manager = build_manager(&config);
    let api = ResolverApi::new(&manager);

    let samtools = api
        .find_dependency(&DependencyRequest::new(req("samtools", Some("1.9"))))
        .unwrap();
    assert_eq!(samtools.resolver_type.as_deref(), Some("packages"));
    assert_eq!(samtools.dependency_type, Some(DependencyKind::Path));
    assert_eq!(
        samtools.path,
        Some(temp.path().join("tree/samtools/1.9/bin"))
    );
    assert!(samtools.exact);

    // Not in the tree at this version, falls through to the command resolver.
    let fallback = api
        .find_dependency(&DependencyRequest::new(req("samtools", Some("2.0"))))
        .unwrap();
    assert_eq!(fallback.resolver_index, Some(1));
    assert_eq!(fallback.dependency_type, Some(DependencyKind::Executable));
    assert!(!fallback.exact);

    let bwa = api
        .find_dependency(&DependencyRequest::new(req("bwa", None)))
        .unwrap();
    assert_eq!(bwa.path, Some(temp.path().join("bin/bwa")));
    assert!(bwa.exact);
}

#[test]
fn configured_chain_reports_installed_and_status() {
    let temp = workspace();
    let config = parse_config(&config_yaml(temp.path(), None), Path::new("test.yml")).unwrap();
    let manager = build_manager(&config);
    let api = ResolverApi::new(&manager);

    let all: Vec<(usize, String)> = api
        .list_all_installed()
        .into_iter()
        .map(|e| (e.index, e.requirement.name))
        .collect();
    assert_eq!(
        all,
        vec![
            (0, "samtools".to_string()),
            (1, "samtools".to_string()),
            (1, "bwa".to_string()),
        ]
    );

    let statuses = api.reconcile_status(&[
        req("samtools", Some("1.9")),
        req("bwa", Some("0.7.17")),
        req("seqtk", None),
    ]);
    assert_eq!(statuses[0].exact, Exactness::Exact);
    assert_eq!(statuses[0].resolver_type.as_deref(), Some("packages"));
    assert_eq!(statuses[1].exact, Exactness::Inexact);
    assert_eq!(statuses[1].resolver_type.as_deref(), Some("command"));
    assert_eq!(statuses[2].status, InstallStatus::NotInstalled);
}

#[test]
fn version_mismatch_falls_through_to_versionless_resolver() {
    let temp = workspace();
    let config = parse_config(&config_yaml(temp.path(), None), Path::new("test.yml")).unwrap();
    let manager = build_manager(&config);

    let status = &ResolverApi::new(&manager).reconcile_status(&[req("samtools", Some("2.0"))])[0];
    assert_eq!(status.status, InstallStatus::Installed);
    assert_eq!(status.exact, Exactness::Inexact);
    assert_eq!(status.resolver_type.as_deref(), Some("command"));
}

#[cfg(unix)]
#[test]
fn install_through_command_template() {
    let temp = workspace();
    let bin = temp.path().join("bin");
    let template = format!(
        "touch {dir}/{{name}} && chmod +x {dir}/{{name}}",
        dir = bin.display()
    );
    let config = parse_config(
        &config_yaml(temp.path(), Some(&template)),
        Path::new("test.yml"),
    )
    .unwrap();
    validate(&config).unwrap();
    let manager = build_manager(&config);
    let api = ResolverApi::new(&manager);

    let request = DependencyRequest::new(req("seqtk", None));
    assert!(!api.find_dependency(&request).unwrap().is_resolved());
    assert!(api.install_dependency(&request).unwrap());

    let found = api.find_dependency(&request).unwrap();
    assert_eq!(found.path, Some(bin.join("seqtk")));
}

#[test]
fn install_targeting_directory_resolver_is_unsupported() {
    let temp = workspace();
    let config = parse_config(&config_yaml(temp.path(), None), Path::new("test.yml")).unwrap();
    let manager = build_manager(&config);
    let err = ResolverApi::new(&manager)
        .install_dependency(&DependencyRequest::new(req("seqtk", None)).at_index(0))
        .unwrap_err();
    assert!(err.to_string().contains("does not support install"));
}
