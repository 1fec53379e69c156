// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{
    CommitMessageGenerator, RepoMessages, TRUNCATION_MARKER, concise_error_body,
    first_message_line, prepare_diff,
};
use crate::config::types::AiConfig;
use crate::error::{AiError, MultiError};

#[test]
fn test_prepare_diff_trims_and_rejects_blank() {
    assert_eq!(prepare_diff("  \n\t ", 10), None);
    assert_eq!(prepare_diff("\n+a\n", 10).as_deref(), Some("+a"));
}

#[test]
fn test_prepare_diff_truncates_on_chars() {
    let diff = "é".repeat(12);
    let cut = prepare_diff(&diff, 10).unwrap();

    assert_eq!(cut, format!("{}{TRUNCATION_MARKER}", "é".repeat(10)));
    assert_eq!(prepare_diff(&"x".repeat(10), 10).unwrap(), "x".repeat(10));
}

#[test]
fn test_first_message_line() {
    assert_eq!(
        first_message_line("\n  \n  Add login form  \nBody text", 120).as_deref(),
        Some("Add login form")
    );
    assert_eq!(first_message_line("abcdef", 3).as_deref(), Some("abc"));
    assert_eq!(first_message_line(" \n\n", 120), None);
}

#[test]
fn test_concise_error_body() {
    let body = "{\n  \"error\": {\n    \"message\": \"Incorrect API key\"\n  }\n}";
    insta::assert_snapshot!(
        concise_error_body(body),
        @r#"{ "error": { "message": "Incorrect API key" } }"#
    );
    assert_eq!(concise_error_body(&"y ".repeat(300)).chars().count(), 240);
}

#[test]
fn test_repo_messages_summary() {
    let mut batch = RepoMessages::default();
    assert_eq!(batch.summary(), None);

    for name in ["api", "web", "docs", "infra"] {
        batch.failures.push(name, "No selected changes to summarize.");
    }
    insta::assert_snapshot!(batch.summary().unwrap(), @"Some descriptions failed: api: No selected changes to summarize. | web: No selected changes to summarize. | docs: No selected changes to summarize. (+1 more)");
}

#[tokio::test]
async fn test_generate_checks_diff_before_key() {
    let generator = CommitMessageGenerator::new(AiConfig::default());

    let empty = generator.generate("   ", None).await.unwrap_err();
    assert!(matches!(&empty, MultiError::Ai(e) if matches!(**e, AiError::EmptyDiff)));

    let no_key = generator.generate("+line", Some("  ")).await.unwrap_err();
    insta::assert_snapshot!(no_key.to_string(), @"OpenAI API key not set. Add it in Settings.");
}

#[tokio::test]
async fn test_generate_per_repo_collects_failures() {
    let generator = CommitMessageGenerator::new(AiConfig::default());
    let repos = vec![
        ("api".to_string(), String::new()),
        ("web".to_string(), "\n".to_string()),
    ];

    let batch = generator.generate_per_repo(&repos, Some("k")).await;
    assert!(batch.messages.is_empty());
    assert_eq!(batch.failures.len(), 2);
}
