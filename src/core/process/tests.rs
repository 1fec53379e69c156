// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

use super::builder::{ProcessBuilder, ProcessFlags};
use crate::error::{MultiError, ProcessError};

fn sh(script: &str) -> ProcessBuilder {
    ProcessBuilder::new("sh").args(["-c", script])
}

fn process_error(err: MultiError) -> ProcessError {
    match err {
        MultiError::Process(e) => *e,
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_output_keeps_trailing_newline() {
    let output = sh("printf 'a\\nb\\n'")
        .capture_output()
        .run()
        .await
        .unwrap();

    assert!(output.success());
    assert_eq!(output.stdout(), "a\nb\n");
}

#[tokio::test]
async fn test_uncaptured_streams_are_empty() {
    let output = sh("echo hidden; echo noisy >&2").run().await.unwrap();
    assert_eq!(output.into_streams(), (String::new(), String::new()));
}

#[tokio::test]
async fn test_allow_failure_returns_output() {
    let output = sh("echo 'fatal: nope' >&2; exit 42")
        .flag(ProcessFlags::ALLOW_FAILURE)
        .capture_output()
        .run()
        .await
        .unwrap();

    assert_eq!(output.exit_code(), 42);
    assert_eq!(output.stderr(), "fatal: nope\n");
}

#[tokio::test]
async fn test_failure_carries_trimmed_stderr() {
    let err = sh("echo '  bad things  ' >&2; exit 3")
        .name("git")
        .capture_output()
        .run()
        .await
        .unwrap_err();

    match process_error(err) {
        ProcessError::Failed {
            command,
            code,
            stderr,
        } => {
            assert_eq!((command.as_str(), code), ("git -c \"echo '  bad things  ' >&2; exit 3\"", 3));
            assert_eq!(stderr, "bad things");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_non_interactive_env_is_added() {
    let output = sh("echo \"$GIT_TERMINAL_PROMPT:$GCM_INTERACTIVE:${PATH:+path}\"")
        .non_interactive()
        .capture_output()
        .run()
        .await
        .unwrap();

    insta::assert_snapshot!(output.stdout().trim(), @"0:never:path");
}

#[tokio::test]
async fn test_runs_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "").unwrap();

    let output = ProcessBuilder::new("ls")
        .cwd(dir.path())
        .capture_output()
        .run()
        .await
        .unwrap();

    assert_eq!(output.stdout(), "marker.txt\n");
}

#[tokio::test]
async fn test_stdin_larger_than_pipe_buffer() {
    // Both pipes must be serviced together or `cat` blocks on a full stdout.
    let payload = "0123456789abcdef\n".repeat(64 * 1024);
    let output = ProcessBuilder::new("cat")
        .stdin(payload.clone())
        .capture_output()
        .run()
        .await
        .unwrap();

    assert_eq!(output.stdout().len(), payload.len());
}

#[tokio::test]
async fn test_timeout_kills_child() {
    let started = std::time::Instant::now();
    let err = sh("sleep 5")
        .timeout(Duration::from_millis(200))
        .run()
        .await
        .unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(matches!(
        process_error(err),
        ProcessError::Timeout { timeout_secs: 1, .. }
    ));
}

#[tokio::test]
async fn test_timeout_covers_pipes_held_by_grandchild() {
    let started = std::time::Instant::now();
    // The shell exits at once; the background sleep keeps stdout open.
    let err = sh("sleep 5 & echo started")
        .capture_output()
        .timeout(Duration::from_millis(300))
        .run()
        .await
        .unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(matches!(
        process_error(err),
        ProcessError::Timeout { timeout_secs: 1, .. }
    ));
}

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("/usr/bin/git").args(["commit", "-m", "two words"]);
    insta::assert_snapshot!(builder.command_line(), @r#"git commit -m "two words""#);
}

#[test]
fn test_executable_lookup() {
    let path = ProcessBuilder::find("git").expect("git should be on PATH");
    assert!(path.exists());
    assert_eq!(ProcessBuilder::find("git"), Some(path));

    let program = "nonexistent_program_12345";
    assert!(ProcessBuilder::find(program).is_none());
    let err = ProcessBuilder::which(program).unwrap_err();
    assert!(err.to_string().contains(program));
}
