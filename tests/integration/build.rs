use predicates::prelude::*;
use runtime_resolver::plan::{PlanRequest, VersionSource};
use std::fs;

use super::{TestEnv, path_arg, runtime_record};

fn launch_request(version: &str) -> PlanRequest {
    PlanRequest::new("dotnet-runtime", version, VersionSource::RuntimeConfigFile).launch(true)
}

#[test]
fn test_build_installs_then_reuses() {
    let env = TestEnv::new()
        .with_installable_catalog(&["6.0.4", "6.0.5"])
        .with_plan(&[launch_request("6.0.0")]);
    let layers = path_arg(&env.layers_dir());
    let plan = path_arg(&env.plan_path());

    env.command()
        .args(["build", "--plan", &plan, "--layers", &layers])
        .assert()
        .success()
        .stdout(predicate::str::contains("dotnet-runtime 6.0.5 installed"))
        .stderr(predicate::str::contains("Installing dotnet-runtime 6.0.5"))
        .stderr(predicate::str::contains("Completed in"));

    let artifact = env.layers_dir().join("dotnet-core-runtime").join("dotnet-runtime-6.0.5.tar.xz");
    assert_eq!(fs::read_to_string(&artifact).unwrap(), "runtime 6.0.5");

    let metadata = fs::read_to_string(env.layer_metadata()).unwrap();
    assert!(metadata.contains("launch = true"));
    assert!(metadata.contains("cache = false"));
    assert!(metadata.contains("dependency-sha = \"sha256:"));

    env.command()
        .args(["build", "--plan", &plan, "--layers", &layers])
        .assert()
        .success()
        .stdout(predicate::str::contains("reused"))
        .stderr(predicate::str::contains("Reusing cached layer"));

    assert_eq!(fs::read_to_string(env.layer_metadata()).unwrap(), metadata);
}

#[test]
fn test_build_rejects_remote_artifacts() {
    let mut remote = runtime_record("6.0.5");
    remote.uri = "https://example.com/dotnet-runtime-6.0.5.tar.xz".into();

    let env = TestEnv::new().with_plan(&[launch_request("6.0.5")]);
    runtime_resolver::test_utils::fixtures::BuildpackFixture::new(&env.buildpack_dir(), "1.4.0")
        .with_record(remote)
        .write()
        .unwrap();

    env.command()
        .args(["build", "--plan", &path_arg(&env.plan_path()), "--layers", &path_arg(&env.layers_dir())])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unsupported artifact URI"));
}

#[test]
fn test_build_requires_layers() {
    let env = TestEnv::new().with_catalog(&["6.0.5"]).with_plan(&[launch_request("6.0.5")]);

    env.command()
        .args(["build", "--plan", &path_arg(&env.plan_path())])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--layers"));
}

#[test]
fn test_build_without_runtime_entry() {
    let env = TestEnv::new().with_catalog(&["6.0.5"]).with_plan(&[]);

    env.command()
        .args(["build", "--plan", &path_arg(&env.plan_path()), "--layers", &path_arg(&env.layers_dir())])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No build plan entry requires 'dotnet-runtime'"));
}
