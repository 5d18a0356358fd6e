mod common;

use common::TestContext;
use predicates::prelude::*;

const GEMINI_JOKE_BODY: &str =
    r#"{"candidates":[{"content":{"parts":[{"text":"Why do pythons live on land? They are above C level."}]}}]}"#;

fn gemini_generate_path(model: &str) -> String {
    format!("/v1beta/models/{model}:generateContent")
}

#[test]
fn generate_dry_run_prints_rendered_prompt() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["generate", "--topic", "python", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== DRY RUN ==="))
        .stdout(predicate::str::contains("Tell a joke about python"));
}

#[test]
fn generate_fails_without_credential() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["generate", "--topic", "python"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn generate_mock_mode_needs_no_credential() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["generate", "--topic", "python", "--mock"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== MOCK MODE ==="))
        .stdout(predicate::str::contains("mock completion"));
}

#[test]
fn generate_prints_exactly_the_completion_and_a_newline() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", gemini_generate_path("gemini-2.5-pro").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(GEMINI_JOKE_BODY)
        .expect(1)
        .create();

    ctx.cli()
        .args(["generate", "--topic", "python"])
        .env("GEMINI_API_KEY", "test-key")
        .env("PROMPTLINE_BASE_URL", server.url())
        .assert()
        .success()
        .stdout("Why do pythons live on land? They are above C level.\n");

    mock.assert();
}

#[test]
fn generate_reports_service_errors() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", gemini_generate_path("gemini-2.5-pro").as_str())
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"message":"backend unavailable"}}"#)
        .create();

    ctx.cli()
        .args(["generate", "--topic", "python"])
        .env("GEMINI_API_KEY", "test-key")
        .env("PROMPTLINE_BASE_URL", server.url())
        .assert()
        .failure()
        .stderr(predicate::str::contains("backend unavailable"));
}

#[test]
fn model_flag_selects_the_model_variant() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", gemini_generate_path("gemini-2.5-flash").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(GEMINI_JOKE_BODY)
        .expect(1)
        .create();

    ctx.cli()
        .args(["generate", "--topic", "python", "--model", "gemini-2.5-flash"])
        .env("GEMINI_API_KEY", "test-key")
        .env("PROMPTLINE_BASE_URL", server.url())
        .assert()
        .success();

    mock.assert();
}

#[test]
fn ask_appends_markdown_and_renders_pdf() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", gemini_generate_path("gemini-2.5-pro").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(GEMINI_JOKE_BODY)
        .create();

    ctx.cli()
        .args(["ask", "Tell me something", "--markdown", "result.md", "--pdf", "output.pdf"])
        .env("GEMINI_API_KEY", "test-key")
        .env("PROMPTLINE_BASE_URL", server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote markdown result.md"))
        .stdout(predicate::str::contains("Wrote pdf output.pdf"));

    let markdown = std::fs::read_to_string(ctx.path("result.md")).unwrap();
    assert_eq!(markdown, "Why do pythons live on land? They are above C level.");

    let pdf = std::fs::read(ctx.path("output.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn ask_twice_appends_twice() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", gemini_generate_path("gemini-2.5-pro").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(GEMINI_JOKE_BODY)
        .expect(2)
        .create();

    for _ in 0..2 {
        ctx.cli()
            .args(["ask", "Tell me something", "--markdown", "result.md"])
            .env("GEMINI_API_KEY", "test-key")
            .env("PROMPTLINE_BASE_URL", server.url())
            .assert()
            .success();
    }

    let markdown = std::fs::read_to_string(ctx.path("result.md")).unwrap();
    let single = "Why do pythons live on land? They are above C level.";
    assert_eq!(markdown.len(), single.len() * 2);
    assert_eq!(markdown, format!("{single}{single}"));
}

#[test]
fn config_file_selects_provider_and_model() {
    let ctx = TestContext::new();
    ctx.write_config(
        r#"
[model]
provider = "openai"
name = "gpt-4o-mini"
"#,
    );

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Hello."}}]}"#)
        .expect(1)
        .create();

    ctx.cli()
        .args(["ask", "Say hello"])
        .env("OPENAI_API_KEY", "test-key")
        .env("PROMPTLINE_BASE_URL", server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello."));

    mock.assert();
}

#[test]
fn unknown_provider_flag_fails() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["generate", "--topic", "x", "--provider", "mistral"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown provider"));
}

#[test]
fn summarize_fails_for_missing_document() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["summarize", "missing.pdf", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load document"));
}

#[test]
fn summarize_rejects_overlap_not_smaller_than_chunk_size() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["summarize", "missing.pdf", "--chunk-size", "100", "--chunk-overlap", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chunk_overlap"));
}
