use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::sync::Mutex;
use std::thread;

use promptsite::config::AppConfig;
use promptsite::tooling::cli::CliContext;
use tempfile::TempDir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with XDG config and PROMPTSITE variables pointed away from the host.
pub(crate) fn with_xdg_env<F: FnOnce()>(temp_dir: &TempDir, f: F) {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let original = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path().join("xdg"));
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));
    match original {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
}

/// Context whose endpoint points at `url`, without reading any config files.
pub(crate) fn context_for(workspace: &Path, url: &str) -> CliContext {
    let mut config = AppConfig::default();
    config.endpoint.url = url.to_string();
    config.endpoint.timeout_secs = 10;
    CliContext::with_config(workspace.to_path_buf(), config)
}

/// Write a small multi-folder project under `root`.
pub(crate) fn write_site(root: &Path) {
    let files = [
        (
            "index.html",
            r#"<!DOCTYPE html><html><head><link rel="stylesheet" href="css/site.css"></head><body><h1>Bakery</h1><script src="js/app.js"></script></body></html>"#,
        ),
        ("css/site.css", "h1 { color: brown; }"),
        ("js/app.js", "console.log('fresh');"),
        ("about/index.html", "<p>about</p>"),
    ];
    for (path, content) in files {
        let dest = root.join(path);
        fs::create_dir_all(dest.parent().unwrap()).unwrap();
        fs::write(dest, content).unwrap();
    }
}

/// One-shot HTTP server on a loopback port. The join handle yields the
/// request body it received.
pub(crate) fn serve_once(status: u16, body: &str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut content_length = 0usize;
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }
        let mut request = vec![0u8; content_length];
        reader.read_exact(&mut request).unwrap();

        let reason = if status < 400 { "OK" } else { "Error" };
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        );
        let mut stream = stream;
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        String::from_utf8(request).unwrap()
    });
    (format!("http://{}/v1/completions", addr), handle)
}

/// URL of a loopback port with nothing listening.
pub(crate) fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1/completions", addr)
}

/// Completion body whose text wraps `project_json` in chatter.
pub(crate) fn completion_body(project_json: &str) -> String {
    let text = format!("Here is your website:\n```json\n{}\n```", project_json);
    serde_json::json!({ "choices": [{ "text": text }] }).to_string()
}

/// Loopback server that accepts one connection and never answers. The join
/// handle returns once the client hangs up.
pub(crate) fn serve_silently() -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut sink = Vec::new();
        let _ = stream.read_to_end(&mut sink);
    });
    (format!("http://{}/v1/completions", addr), handle)
}
