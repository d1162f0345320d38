//! Integration tests for the Glossa CLI.

#![allow(clippy::unwrap_used)] // Tests can use unwrap for cleaner assertions

mod common;

use assert_cmd::Command;
use common::TestEnv;
use predicates::prelude::*;

/// Helper to create a command for the glossa binary.
fn glossa_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("glossa"))
}

/// Test that the CLI shows help.
#[test]
fn test_help() {
    glossa_cmd().arg("--help").assert().success().stdout(predicate::str::contains("Glossa"));
}

/// Test that the CLI shows version.
#[test]
fn test_version() {
    glossa_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test that unrecognized commands fail.
#[test]
fn test_unknown_command() {
    glossa_cmd().arg("unknown-command").assert().failure();
}

/// Test locale discovery and per-locale summaries.
#[test]
fn test_locales() {
    let env = TestEnv::new();
    env.cmd()
        .arg("locales")
        .assert()
        .success()
        .stdout(predicate::str::contains("en*"))
        .stdout(predicate::str::contains("messages, views"));
}

/// Test locales as JSON.
#[test]
fn test_locales_json() {
    let env = TestEnv::new();
    let output = env.cmd().args(["-o", "json", "locales"]).output().unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let locales: Vec<&str> =
        rows.as_array().unwrap().iter().map(|row| row["locale"].as_str().unwrap()).collect();
    assert_eq!(locales, vec!["en", "ru"]);
}

/// Test translation in the active locale with parameters.
#[test]
fn test_trans() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--locale", "ru", "trans", "hello", "-p", "name=Ann"])
        .assert()
        .success()
        .stdout("Привет, Ann!\n");
}

/// Test that a missing message falls back to the fallback locale.
#[test]
fn test_trans_fallback() {
    let env = TestEnv::new();
    let config = env.write_config("locale: ru\nfallback_locale: en\n");
    env.cmd()
        .arg("--config")
        .arg(&config)
        .args(["trans", "app.title"])
        .assert()
        .success()
        .stdout("Catalogue\n");
}

/// Test that unknown messages are passed through.
#[test]
fn test_trans_passthrough() {
    let env = TestEnv::new();
    env.cmd().args(["trans", "Not translated"]).assert().success().stdout("Not translated\n");
}

/// Test plural selection with Russian rules.
#[test]
fn test_choice_russian() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--locale", "ru", "choice", "{n} dog|{n} dogs", "21"])
        .assert()
        .success()
        .stdout("21 собака\n");

    env.cmd()
        .args(["--locale", "ru", "choice", "{n} dog|{n} dogs", "5"])
        .assert()
        .success()
        .stdout("5 собак\n");
}

/// Test that `{n}` is formatted with thousands separators.
#[test]
fn test_choice_formats_number() {
    let env = TestEnv::new();
    env.cmd()
        .args(["choice", "{n} dog|{n} dogs", "2220"])
        .assert()
        .success()
        .stdout("2,220 dogs\n");
}

/// Test unknown locale error and exit code.
#[test]
fn test_unknown_locale() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--locale", "fr", "trans", "hello"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Undefined locale 'fr'"));
}

/// Test that malformed parameters are rejected.
#[test]
fn test_trans_invalid_param() {
    let env = TestEnv::new();
    env.cmd().args(["trans", "hello", "-p", "name"]).assert().code(2);
}

/// Test domain resolution with and without configured patterns.
#[test]
fn test_domain() {
    let env = TestEnv::new();
    env.cmd().args(["domain", "App::Views"]).assert().success().stdout("app-views\n");

    let config = env.write_config("domains:\n  spiral: ['spiral-*']\n  messages: ['*']\n");
    env.cmd()
        .arg("--config")
        .arg(&config)
        .args(["domain", "Spiral\\Views"])
        .assert()
        .success()
        .stdout("spiral\n");
}

/// Test showing one domain of a locale.
#[test]
fn test_show_domain() {
    let env = TestEnv::new();
    env.cmd()
        .args(["show", "ru", "--domain", "views"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Добро пожаловать"))
        .stdout(predicate::str::contains("translation").not());
}

/// Test that JSON files are flattened into dotted ids.
#[test]
fn test_show_json_domain() {
    let env = TestEnv::new();
    let output =
        env.cmd().args(["-o", "json", "show", "en", "--domain", "views"]).output().unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> =
        rows.as_array().unwrap().iter().map(|row| row["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["menu.home", "title"]);
}

/// Test exporting a locale.
#[test]
fn test_export() {
    let env = TestEnv::new();
    let out = env.path("export");
    env.cmd()
        .args(["export", "ru"])
        .arg(&out)
        .args(["--format", "json"])
        .assert()
        .success();

    let contents = std::fs::read_to_string(out.join("ru").join("messages.json")).unwrap();
    let messages: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(messages["message"], "translation");
    assert!(out.join("ru").join("views.json").exists());
}

/// Test that export rejects formats without a dumper.
#[test]
fn test_export_unknown_format() {
    let env = TestEnv::new();
    env.cmd()
        .args(["export", "ru"])
        .arg(env.path("export"))
        .args(["--format", "xliff"])
        .assert()
        .code(2);
}

/// Test indexing a manifest and dumping the result.
#[test]
fn test_index() {
    let env = TestEnv::new();
    let out = env.path("indexed");
    env.cmd()
        .arg("index")
        .arg(common::fixtures_dir().join("manifest.yaml"))
        .arg("--dump")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"found\": 4"))
        .stdout(predicate::str::contains("\"registered\": 3"));

    let messages = std::fs::read_to_string(out.join("en").join("messages.yaml")).unwrap();
    assert!(messages.contains("{n} cat|{n} cats"));
    let home =
        std::fs::read_to_string(out.join("en").join("app-controllers-home.yaml")).unwrap();
    assert!(home.contains("Welcome home"));
    assert!(home.contains("Sign in"));
}

/// Test that reset clears the on-disk cache.
#[test]
fn test_reset_clears_cache() {
    let env = TestEnv::new();
    let cache = env.path("cache");
    let config = env.write_config(&format!("cache_directory: {}\n", cache.display()));

    env.cmd().arg("--config").arg(&config).arg("locales").assert().success();
    assert!(cache.join("locales.json").exists());

    env.cmd()
        .arg("--config")
        .arg(&config)
        .arg("index")
        .arg(common::fixtures_dir().join("manifest.yaml"))
        .assert()
        .success();
    assert!(cache.join("locales").join("en.json").exists());

    env.cmd().arg("--config").arg(&config).arg("reset").assert().success();
    assert!(!cache.join("locales.json").exists());
    assert!(!cache.join("locales").join("en.json").exists());
}

/// Test completion script generation.
#[test]
fn test_completion() {
    glossa_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("glossa"));
}

#[cfg(test)]
mod config_tests {
    use glossa::config::TranslatorConfig;
    use tempfile::TempDir;

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("glossa.yaml");

        let config = TranslatorConfig::builder()
            .locale("ru")
            .fallback_locale("en")
            .domains(vec![("views".to_string(), vec!["*-views".to_string()])])
            .build();
        config.save(&config_path).unwrap();

        let loaded = TranslatorConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.locale, "ru");
        assert_eq!(loaded.fallback_locale(), "en");
        assert_eq!(loaded.resolve_domain("admin/views"), "views");
    }
}
