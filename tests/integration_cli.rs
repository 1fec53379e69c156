// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the `multi` binary.
//!
//! Every run pins the registry and settings into a temporary directory and
//! skips the local `multi.toml`.

use clap::Parser;
use multi_rs::cli::{Cli, Command as CliCommand};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn run(&self, args: &[&str]) -> Output {
        let registry = self.path().join("repos.json");
        let settings = format!("paths/settings={}", self.path().join("settings.json").display());
        Command::new(env!("CARGO_BIN_EXE_multi"))
            .current_dir(self.path())
            .arg("--no-local-config")
            .arg("--registry")
            .arg(&registry)
            .args(["--set", &settings])
            .args(args)
            .env_remove("OPENAI_API_KEY")
            .output()
            .expect("failed to run multi")
    }

    fn stdout(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "multi {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}

fn git(cwd: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to spawn git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn init_repo(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    git(dir, &["init", "-q", "-b", "main"]);
    git(dir, &["config", "user.email", "test@test.com"]);
    git(dir, &["config", "user.name", "Test"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn cli_discard_lines_with_selections() {
    let cli = Cli::try_parse_from([
        "multi",
        "discard-lines",
        "/w/app",
        "--patch",
        "p.diff",
        "--select",
        "src/lib.rs=1,4",
        "--select",
        "README.md=all",
    ])
    .unwrap();

    let Some(CliCommand::DiscardLines(args)) = cli.command else {
        panic!("expected discard-lines");
    };
    let selections: Vec<(String, Option<Vec<usize>>)> = args
        .input
        .select
        .into_iter()
        .map(|s| (s.file, s.lines))
        .collect();
    assert_eq!(
        selections,
        vec![
            ("src/lib.rs".to_string(), Some(vec![1, 4])),
            ("README.md".to_string(), None),
        ]
    );
}

#[test]
fn cli_push_create_missing() {
    let cli = Cli::try_parse_from(["multi", "push", "--create-missing"]).unwrap();
    let Some(CliCommand::Push(args)) = cli.command else {
        panic!("expected push");
    };
    assert!(args.create_missing);
    assert_eq!(args.repo.path, Path::new("."));
}

#[test]
fn cli_show_requires_group() {
    assert!(Cli::try_parse_from(["multi", "show"]).is_err());
}

// =============================================================================
// Binary
// =============================================================================

#[test]
fn binary_prints_version() {
    let sandbox = Sandbox::new();
    assert_eq!(
        sandbox.stdout(&["version"]).trim(),
        env!("CARGO_PKG_VERSION")
    );
}

#[test]
fn binary_options_reflect_overrides() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout(&["--set", "git/read_timeout_secs=42", "options"]);

    assert!(out.contains("git.read_timeout_secs    = 42"), "{out}");
    assert!(
        out.contains(&format!(
            "paths.registry           = {}",
            sandbox.path().join("repos.json").display()
        )),
        "{out}"
    );
}

#[test]
fn binary_rejects_invalid_override() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["--set", "git/status_timeout_secs=0", "options"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config"), "{stderr}");
    assert!(stderr.contains("status_timeout_secs"), "{stderr}");
}

#[test]
fn binary_registers_and_lists_repositories() {
    let sandbox = Sandbox::new();
    let plain = sandbox.path().join("plain");
    fs::create_dir_all(&plain).unwrap();
    let plain_str = plain.to_str().unwrap();

    assert!(sandbox.stdout(&["repos", "list"]).starts_with("No repositories registered in"));
    assert_eq!(
        sandbox.stdout(&["repos", "add", plain_str]).trim(),
        format!("Added {plain_str}")
    );
    assert_eq!(
        sandbox.stdout(&["repos", "add", plain_str]).trim(),
        format!("Already registered: {plain_str}")
    );

    let listing = sandbox.stdout(&["repos", "list"]);
    let fields: Vec<&str> = listing.split_whitespace().collect();
    assert_eq!(fields, vec!["plain", "not-a-repo", "-", plain_str]);

    assert_eq!(
        sandbox.stdout(&["repos", "remove", plain_str]).trim(),
        format!("Removed {plain_str}")
    );
    let stored = fs::read_to_string(sandbox.path().join("repos.json")).unwrap();
    assert_eq!(serde_json::from_str::<serde_json::Value>(&stored).unwrap(), serde_json::json!([]));
}

#[test]
fn binary_stores_api_key_in_settings() {
    let sandbox = Sandbox::new();
    let settings_path = sandbox.path().join("settings.json");

    assert!(sandbox.stdout(&["settings", "show"]).contains("openAIApiKey = (not set)"));
    sandbox.stdout(&["settings", "set-key", "  sk-test  "]);
    assert!(sandbox.stdout(&["settings", "show"]).contains("openAIApiKey = [hidden]"));

    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(settings_path).unwrap()).unwrap();
    assert_eq!(stored["openAIApiKey"], "sk-test");
}

#[test]
fn binary_message_without_key_fails() {
    let sandbox = Sandbox::new();
    let repo = sandbox.path().join("app");
    init_repo(&repo);
    fs::write(repo.join("a.txt"), "one\n").unwrap();

    let output = sandbox.run(&["message", repo.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("API key"), "{stderr}");
}

#[test]
fn binary_stage_paths_and_commit() {
    let sandbox = Sandbox::new();
    let repo = sandbox.path().join("app");
    init_repo(&repo);
    fs::write(repo.join("a.txt"), "one\n").unwrap();
    fs::write(repo.join("b.txt"), "two\n").unwrap();
    let repo_str = repo.to_str().unwrap();

    let out = sandbox.stdout(&["stage", repo_str, "--paths", "a.txt", "-m", "Add a"]);
    assert!(out.contains("Committed app"), "{out}");

    assert_eq!(git(&repo, &["log", "--format=%s"]).trim(), "Add a");
    assert_eq!(git(&repo, &["status", "--porcelain"]).trim(), "?? b.txt");
}

#[test]
fn binary_stage_selected_lines_from_patch() {
    let sandbox = Sandbox::new();
    let repo = sandbox.path().join("app");
    init_repo(&repo);
    fs::write(repo.join("a.txt"), "one\ntwo\nthree\n").unwrap();
    git(&repo, &["add", "a.txt"]);
    git(&repo, &["commit", "-q", "-m", "init"]);
    fs::write(repo.join("a.txt"), "one\n1.5\ntwo\nthree\nfour\n").unwrap();

    let patch = sandbox.path().join("p.diff");
    fs::write(&patch, git(&repo, &["diff"])).unwrap();

    sandbox.stdout(&[
        "stage",
        repo.to_str().unwrap(),
        "--patch",
        patch.to_str().unwrap(),
        "--select",
        "a.txt=1",
        "-m",
        "Add 1.5",
    ]);

    assert_eq!(git(&repo, &["show", "HEAD:a.txt"]), "one\n1.5\ntwo\nthree\n");
    assert_eq!(git(&repo, &["diff"]).lines().filter(|l| l.starts_with('+') && !l.starts_with("+++")).count(), 1);
}

#[test]
fn binary_status_of_plain_directory() {
    let sandbox = Sandbox::new();
    let plain = sandbox.path().join("plain");
    fs::create_dir_all(&plain).unwrap();

    let out = sandbox.stdout(&["status", plain.to_str().unwrap()]);
    assert_eq!(out.trim(), "plain: not-a-repo (-)");
}
