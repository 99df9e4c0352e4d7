use predicates::prelude::*;

use super::{TestEnv, path_arg};

const RUNTIME_CONFIG: &str = r#"{
  // written by the SDK
  "runtimeOptions": {
    "framework": { "name": "Microsoft.NETCore.App", "version": "2.1.0" }
  }
}"#;

#[test]
fn test_detect_runtime_config() {
    let env = TestEnv::new().with_app_file("app.runtimeconfig.json", RUNTIME_CONFIG);

    env.command()
        .args(["detect", "--working-dir", &path_arg(&env.app_dir())])
        .assert()
        .success()
        .stdout(predicate::str::contains("name = \"dotnet-runtime\""))
        .stdout(predicate::str::contains("version = \"2.1.0\""))
        .stdout(predicate::str::contains("version-source = \"runtimeconfig.json\""))
        .stdout(predicate::str::contains("launch = true"));
}

#[test]
fn test_detect_env_override_and_legacy_config() {
    let env = TestEnv::new().with_app_file("buildpack.yml", "dotnet-framework:\n  version: 2.1.5\n");

    env.command()
        .env("BP_DOTNET_FRAMEWORK_VERSION", "2.1.14")
        .args(["detect", "--working-dir", &path_arg(&env.app_dir())])
        .assert()
        .success()
        .stdout(predicate::str::contains("version-source = \"BP_DOTNET_FRAMEWORK_VERSION\""))
        .stdout(predicate::str::contains("version = \"2.1.14\""))
        .stdout(predicate::str::contains("version-source = \"buildpack.yml\""));
}

#[test]
fn test_detect_nothing_exits_100() {
    let env = TestEnv::new();

    env.command()
        .args(["detect", "--working-dir", &path_arg(&env.app_dir())])
        .assert()
        .code(100)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_detect_multiple_runtime_configs_fails() {
    let env = TestEnv::new()
        .with_app_file("a.runtimeconfig.json", RUNTIME_CONFIG)
        .with_app_file("b.runtimeconfig.json", RUNTIME_CONFIG);

    env.command()
        .args(["detect", "--working-dir", &path_arg(&env.app_dir())])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Multiple *.runtimeconfig.json files present"));
}

#[test]
fn test_detect_writes_plan_consumed_by_resolve() {
    let env = TestEnv::new()
        .with_catalog(&["2.1.0", "2.1.14"])
        .with_app_file("app.runtimeconfig.json", RUNTIME_CONFIG);

    env.command()
        .args([
            "detect",
            "--working-dir",
            &path_arg(&env.app_dir()),
            "--output",
            &path_arg(&env.plan_path()),
        ])
        .assert()
        .success();

    env.command()
        .args(["resolve", "--plan", &path_arg(&env.plan_path())])
        .assert()
        .success()
        .stdout(predicate::str::contains("dotnet-runtime 2.1.0"));
}
