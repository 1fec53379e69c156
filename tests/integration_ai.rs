// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for commit message generation using wiremock.

use multi_rs::ai::{CommitMessageGenerator, TRUNCATION_MARKER};
use multi_rs::config::types::AiConfig;
use multi_rs::error::{AiError, MultiError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1/chat/completions";

fn generator(server: &MockServer, max_diff_chars: usize) -> CommitMessageGenerator {
    CommitMessageGenerator::new(AiConfig {
        endpoint: format!("{}{ENDPOINT}", server.uri()),
        model: "test-model".to_string(),
        max_diff_chars,
        max_message_chars: 40,
        ..AiConfig::default()
    })
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    }))
}

fn ai_error(err: &MultiError) -> &AiError {
    match err {
        MultiError::Ai(e) => &**e,
        other => panic!("expected an AI error, got {other}"),
    }
}

// =============================================================================
// Success
// =============================================================================

#[tokio::test]
async fn generate_returns_first_line() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "test-model", "max_tokens": 120 })))
        .respond_with(completion("\n  Add login form  \n\nLonger explanation"))
        .expect(1)
        .mount(&server)
        .await;

    let message = generator(&server, 1000)
        .generate("+fn login() {}\n", Some("  sk-test "))
        .await
        .unwrap();

    assert_eq!(message, "Add login form");
}

#[tokio::test]
async fn generate_truncates_long_diffs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(completion("Update data"))
        .mount(&server)
        .await;

    let diff = "x".repeat(50);
    generator(&server, 10)
        .generate(&diff, Some("sk-test"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(
        user.ends_with(&format!("xxxxxxxxxx{TRUNCATION_MARKER}")),
        "{user}"
    );
    assert_eq!(body["messages"][0]["role"], "system");
}

#[tokio::test]
async fn generate_caps_message_length() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(completion(&"a".repeat(100)))
        .mount(&server)
        .await;

    let message = generator(&server, 1000)
        .generate("+x\n", Some("sk-test"))
        .await
        .unwrap();

    assert_eq!(message.chars().count(), 40);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn generate_reports_http_errors_concisely() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string("{\n  \"error\":   \"invalid key\"\n}"),
        )
        .mount(&server)
        .await;

    let err = generator(&server, 1000)
        .generate("+x\n", Some("sk-bad"))
        .await
        .unwrap_err();

    insta::assert_snapshot!(err.to_string(), @r#"OpenAI error (401): { "error": "invalid key" }"#);
    assert!(matches!(ai_error(&err), AiError::Http { status: 401, .. }));
}

#[tokio::test]
async fn generate_rejects_empty_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = generator(&server, 1000)
        .generate("+x\n", Some("sk-test"))
        .await
        .unwrap_err();

    assert!(matches!(ai_error(&err), AiError::EmptyResponse));
}

#[tokio::test]
async fn generate_without_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(completion("never"))
        .expect(0)
        .mount(&server)
        .await;

    let err = generator(&server, 1000)
        .generate("+x\n", Some("   "))
        .await
        .unwrap_err();

    assert!(matches!(ai_error(&err), AiError::MissingApiKey));
}

#[tokio::test]
async fn generate_per_repo_isolates_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(completion("Bump version"))
        .mount(&server)
        .await;

    let repos = vec![
        ("core".to_string(), "+version = 2\n".to_string()),
        ("docs".to_string(), "   \n".to_string()),
        ("ui".to_string(), "+color = red\n".to_string()),
    ];
    let result = generator(&server, 1000)
        .generate_per_repo(&repos, Some("sk-test"))
        .await;

    assert_eq!(
        result.messages,
        vec![
            ("core".to_string(), "Bump version".to_string()),
            ("ui".to_string(), "Bump version".to_string()),
        ]
    );
    insta::assert_snapshot!(
        result.summary().unwrap(),
        @"Some descriptions failed: docs: No selected changes to summarize."
    );
}
