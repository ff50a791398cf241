use std::fs;
use std::time::{Duration, Instant};

use promptsite::config::AppConfig;
use promptsite::error::ApiError;
use promptsite::generation::{
    CompletionClient, CompletionRequest, EndpointConfig, HttpCompletionClient,
};
use promptsite::templates::find_template;
use promptsite::tooling::cli::{CliContext, Commands};
use tempfile::TempDir;

use crate::cli::support::{
    closed_port_url, completion_body, context_for, serve_once, serve_silently,
};

const PROJECT_JSON: &str = r#"{"files":[{"path":"index.html","content":"<html><head><link rel=\"stylesheet\" href=\"styles.css\"></head><body>Bakery</body></html>"},{"path":"styles.css","content":"body{color:brown}"}],"entry":"index.html"}"#;

fn generate(prompt: Option<&str>, template: Option<&str>, out: Option<&str>, export: bool) -> Commands {
    Commands::Generate {
        prompt: prompt.map(str::to_string),
        template: template.map(str::to_string),
        out: out.map(Into::into),
        export,
        format: "json".to_string(),
    }
}

fn file_paths(report: &serde_json::Value) -> Vec<String> {
    report["project"]["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["path"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn model_project_is_written_and_exported() {
    let temp = TempDir::new().unwrap();
    let (url, server) = serve_once(200, &completion_body(PROJECT_JSON));
    let cli = context_for(temp.path(), &url);

    let output = cli
        .execute(&generate(Some("a bakery"), None, Some("site"), true))
        .unwrap();
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(report["source"], "model");
    assert_eq!(report["prompt"], "a bakery");
    assert_eq!(file_paths(&report), vec!["index.html", "styles.css"]);
    assert_eq!(report["files_written"].as_array().unwrap().len(), 2);
    assert_eq!(
        fs::read_to_string(temp.path().join("site/styles.css")).unwrap(),
        "body{color:brown}"
    );
    assert!(temp.path().join("site/generated-website.zip").is_file());
    assert!(report["archive"].as_str().unwrap().ends_with("generated-website.zip"));

    let request: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
    assert_eq!(request["model"], "local-model");
    assert_eq!(request["max_tokens"], 2000);
    assert_eq!(request["stream"], false);
    assert!(request["prompt"].as_str().unwrap().contains("\"a bakery\""));
}

#[test]
fn template_prompt_is_sent() {
    let temp = TempDir::new().unwrap();
    let (url, server) = serve_once(200, &completion_body(PROJECT_JSON));
    let cli = context_for(temp.path(), &url);

    let output = cli.execute(&generate(None, Some("blog"), None, false)).unwrap();
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    let template = find_template("blog").unwrap();
    assert_eq!(report["prompt"], template.prompt);

    let request: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
    assert!(request["prompt"].as_str().unwrap().contains(template.prompt));
}

#[test]
fn server_error_installs_offline_demo() {
    let temp = TempDir::new().unwrap();
    let (url, server) = serve_once(500, r#"{"error":"overloaded"}"#);
    let cli = context_for(temp.path(), &url);

    let output = cli.execute(&generate(Some("a bakery"), None, None, false)).unwrap();
    server.join().unwrap();
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(report["source"], "fallback");
    assert_eq!(report["reason"]["kind"], "status");
    assert_eq!(report["reason"]["code"], 500);
    assert_eq!(file_paths(&report), vec!["index.html", "style.css"]);
    assert_eq!(report["project"]["entry"], "index.html");
}

#[test]
fn unreachable_endpoint_installs_offline_demo() {
    let temp = TempDir::new().unwrap();
    let cli = context_for(temp.path(), &closed_port_url());

    let output = cli.execute(&generate(Some("a bakery"), None, None, false)).unwrap();
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(report["source"], "fallback");
    assert_eq!(report["reason"]["kind"], "network");
    assert_eq!(file_paths(&report), vec!["index.html", "style.css"]);
    let notices = report["notices"].as_array().unwrap();
    assert_eq!(notices.last().unwrap()["level"], "warning");
}

#[test]
fn unusable_completion_text_falls_back() {
    let temp = TempDir::new().unwrap();
    let body = serde_json::json!({ "choices": [{ "text": "Sorry, I can only chat." }] }).to_string();
    let (url, server) = serve_once(200, &body);
    let cli = context_for(temp.path(), &url);

    let output = cli.execute(&generate(Some("x"), None, None, false)).unwrap();
    server.join().unwrap();
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["reason"]["kind"], "invalid_project");
    assert_eq!(file_paths(&report), vec!["index.html", "styles.css", "app.js"]);
}

#[test]
fn blank_prompt_is_rejected_before_any_request() {
    let temp = TempDir::new().unwrap();
    let cli = context_for(temp.path(), &closed_port_url());
    let err = cli.execute(&generate(Some("   "), None, None, false)).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn export_failure_keeps_report_with_error_notice() {
    let temp = TempDir::new().unwrap();
    // A directory squatting on the archive name makes the export fail.
    fs::create_dir(temp.path().join("generated-website.zip")).unwrap();
    let (url, server) = serve_once(200, &completion_body(PROJECT_JSON));
    let cli = context_for(temp.path(), &url);

    let output = cli
        .execute(&generate(Some("a bakery"), None, None, true))
        .unwrap();
    server.join().unwrap();
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(report["source"], "model");
    assert_eq!(file_paths(&report), vec!["index.html", "styles.css"]);
    assert!(report.get("archive").is_none());
    let last = report["notices"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["level"], "error");
    assert!(last["message"].as_str().unwrap().starts_with("Export failed"));
    assert!(temp.path().join("generated-website.zip").is_dir());
}

#[test]
fn silent_endpoint_times_out_to_offline_demo() {
    let temp = TempDir::new().unwrap();
    let (url, server) = serve_silently();
    let mut config = AppConfig::default();
    config.endpoint.url = url;
    config.endpoint.timeout_secs = 1;
    let cli = CliContext::with_config(temp.path().to_path_buf(), config);

    let started = Instant::now();
    let output = cli.execute(&generate(Some("a bakery"), None, None, false)).unwrap();
    let elapsed = started.elapsed();
    server.join().unwrap();
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(report["source"], "fallback");
    assert_eq!(report["reason"]["kind"], "network");
    assert_eq!(file_paths(&report), vec!["index.html", "style.css"]);
    assert!(elapsed >= Duration::from_secs(1));
    assert!(elapsed < Duration::from_secs(10));
}

#[test]
fn saved_report_reopens_as_project() {
    let temp = TempDir::new().unwrap();
    let (url, server) = serve_once(200, &completion_body(PROJECT_JSON));
    let cli = context_for(temp.path(), &url);

    let output = cli.execute(&generate(Some("a bakery"), None, None, false)).unwrap();
    server.join().unwrap();
    fs::write(temp.path().join("report.json"), &output).unwrap();

    let preview = cli
        .execute(&Commands::Preview {
            project: "report.json".into(),
            entry: None,
            out: "preview.html".into(),
            host_page: false,
            watch: false,
            debounce_ms: 150,
        })
        .unwrap();
    assert!(preview.contains("preview.html"));
    let html = fs::read_to_string(temp.path().join("preview.html")).unwrap();
    assert!(html.contains("<style>body{color:brown}</style>"));
}

#[test]
fn http_client_classifies_status_and_body() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let request = CompletionRequest::for_prompt(&EndpointConfig::default(), "x");

    let (url, server) = serve_once(404, "{}");
    let endpoint = EndpointConfig {
        url,
        ..EndpointConfig::default()
    };
    let client = HttpCompletionClient::new(&endpoint).unwrap();
    let err = rt.block_on(client.complete(&request)).unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, ApiError::ProviderStatus(404)));

    let (url, server) = serve_once(200, "not json");
    let endpoint = EndpointConfig {
        url,
        ..EndpointConfig::default()
    };
    let client = HttpCompletionClient::new(&endpoint).unwrap();
    let err = rt.block_on(client.complete(&request)).unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, ApiError::InvalidResponse(_)));

    let endpoint = EndpointConfig {
        url: closed_port_url(),
        ..EndpointConfig::default()
    };
    let client = HttpCompletionClient::new(&endpoint).unwrap();
    let err = rt.block_on(client.complete(&request)).unwrap_err();
    assert!(matches!(err, ApiError::ProviderError(_)));
}
