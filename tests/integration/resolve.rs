use predicates::prelude::*;
use runtime_resolver::plan::{PlanRequest, VersionSource};

use super::{TestEnv, path_arg};

fn request(version: &str, source: VersionSource) -> PlanRequest {
    PlanRequest::new("dotnet-runtime", version, source)
}

#[test]
fn test_resolve_rolls_forward_for_runtime_config() {
    let env = TestEnv::new()
        .with_catalog(&["1.2.3", "1.2.4", "1.3.0"])
        .with_plan(&[request("1.2.0", VersionSource::RuntimeConfigFile)]);

    env.command()
        .args(["resolve", "--plan", &path_arg(&env.plan_path())])
        .assert()
        .success()
        .stdout(predicate::str::contains("dotnet-runtime 1.2.4"))
        .stdout(predicate::str::contains("sha256:dotnet-runtime-1.2.4"))
        .stderr(predicate::str::contains("Candidate version sources (in priority order):"))
        .stderr(predicate::str::contains("attempting version roll-forward"))
        .stderr(predicate::str::contains("Selected dotnet-runtime version (using runtimeconfig.json): 1.2.4"));
}

#[test]
fn test_resolve_override_does_not_roll_forward() {
    let env = TestEnv::new()
        .with_catalog(&["1.2.3", "1.2.4"])
        .with_plan(&[
            request("1.2.0", VersionSource::ExplicitOverrideEnv),
            request("1.2.3", VersionSource::RuntimeConfigFile),
        ]);

    env.command()
        .args(["resolve", "--plan", &path_arg(&env.plan_path())])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "with version constraint \"1.2.0\": no compatible versions. Supported versions are: [1.2.3, 1.2.4]",
        ))
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn test_resolve_legacy_config_warns() {
    let env = TestEnv::new()
        .with_catalog(&["1.2.3"])
        .with_plan(&[request("1.2.3", VersionSource::LegacyConfigFile)]);

    env.command()
        .args(["resolve", "--plan", &path_arg(&env.plan_path())])
        .assert()
        .success()
        .stderr(predicate::str::contains("buildpack.yml will be deprecated soon in v2.0.0."))
        .stderr(predicate::str::contains("$BP_DOTNET_FRAMEWORK_VERSION"));
}

#[test]
fn test_resolve_quiet_hides_info() {
    let env = TestEnv::new()
        .with_catalog(&["1.2.3"])
        .with_plan(&[request("1.2.3", VersionSource::RuntimeConfigFile)]);

    env.command()
        .args(["--quiet", "resolve", "--plan", &path_arg(&env.plan_path())])
        .assert()
        .success()
        .stderr(predicate::str::contains("Candidate version sources").not());
}

#[test]
fn test_resolve_platform_filter() {
    let env = TestEnv::new()
        .with_catalog(&["1.2.3"])
        .with_plan(&[request("1.2.3", VersionSource::RuntimeConfigFile)]);

    env.command()
        .args(["resolve", "--plan", &path_arg(&env.plan_path()), "--platform", "other-stack"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("for platform \"other-stack\""))
        .stderr(predicate::str::contains("Supported versions are: []"));
}

#[test]
fn test_resolve_missing_catalog() {
    let env = TestEnv::new().with_plan(&[request("1.2.3", VersionSource::RuntimeConfigFile)]);

    env.command()
        .args(["resolve", "--plan", &path_arg(&env.plan_path())])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read dependency catalog"));
}

#[test]
fn test_resolve_reports_layer_status() {
    let env = TestEnv::new()
        .with_catalog(&["1.2.3"])
        .with_plan(&[request("1.2.3", VersionSource::RuntimeConfigFile)]);

    env.command()
        .args(["resolve", "--plan", &path_arg(&env.plan_path()), "--layers", &path_arg(&env.layers_dir())])
        .assert()
        .success()
        .stdout(predicate::str::contains("install required"));

    // resolve never writes
    assert!(!env.layer_metadata().exists());
}
