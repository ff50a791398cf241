use std::fs;
use std::io::Read;

use pretty_assertions::assert_eq;
use promptsite::error::ApiError;
use promptsite::tooling::cli::{CliContext, Commands, ConfigCommands};
use tempfile::TempDir;

use crate::cli::support::{with_xdg_env, write_site};

fn workspace_with_site() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_site(&temp.path().join("site"));
    temp
}

fn tree(expand: &[&str], all: bool, select: Option<&str>, format: &str) -> Commands {
    Commands::Tree {
        project: "site".into(),
        entry: None,
        expand: expand.iter().map(|s| s.to_string()).collect(),
        all,
        select: select.map(str::to_string),
        format: format.to_string(),
    }
}

fn preview(host_page: bool) -> Commands {
    Commands::Preview {
        project: "site".into(),
        entry: None,
        out: "out/preview.html".into(),
        host_page,
        watch: false,
        debounce_ms: 150,
    }
}

#[test]
fn templates_json_contract() {
    let temp = TempDir::new().unwrap();
    let cli = CliContext::with_config(temp.path().to_path_buf(), Default::default());
    let output = cli
        .execute(&Commands::Templates {
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let templates = parsed.as_array().unwrap();
    assert_eq!(templates.len(), 4);
    for template in templates {
        for key in ["name", "slug", "description", "prompt"] {
            assert!(template.get(key).and_then(|v| v.as_str()).is_some());
        }
    }
}

#[test]
fn config_show_reflects_workspace_file() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let workspace = temp.path().join("workspace");
        fs::create_dir_all(&workspace).unwrap();
        fs::write(
            workspace.join("promptsite.toml"),
            "[endpoint]\nmodel = \"tiny-coder\"\n\n[export]\nfile_name = \"bakery.zip\"\n",
        )
        .unwrap();

        let cli = CliContext::new(workspace, None).unwrap();
        let output = cli
            .execute(&Commands::Config {
                command: ConfigCommands::Show,
            })
            .unwrap();
        let parsed: toml::Value = toml::from_str(&output).unwrap();
        assert_eq!(parsed["endpoint"]["model"].as_str(), Some("tiny-coder"));
        assert_eq!(parsed["export"]["file_name"].as_str(), Some("bakery.zip"));
        assert_eq!(
            parsed["endpoint"]["url"].as_str(),
            Some("http://localhost:1234/v1/completions")
        );
    });
}

#[test]
fn invalid_workspace_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let workspace = temp.path().join("workspace");
        fs::create_dir_all(&workspace).unwrap();
        fs::write(
            workspace.join("promptsite.toml"),
            "[endpoint]\ntemperature = 9.5\n",
        )
        .unwrap();
        assert!(matches!(
            CliContext::new(workspace, None),
            Err(ApiError::ConfigError(_))
        ));
    });
}

#[test]
fn tree_json_lists_top_level_rows() {
    let temp = workspace_with_site();
    let cli = CliContext::with_config(temp.path().to_path_buf(), Default::default());

    let output = cli.execute(&tree(&[], false, None, "json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let paths: Vec<&str> = parsed["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["about", "css", "index.html", "js"]);
    assert_eq!(parsed["selected"], "index.html");

    let output = cli.execute(&tree(&["css"], false, None, "json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let rows = parsed["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[2]["path"], "css/site.css");
    assert_eq!(rows[2]["depth"], 1);
    assert_eq!(rows[2]["file_path"], "css/site.css");
}

#[test]
fn tree_text_shows_selected_file() {
    let temp = workspace_with_site();
    let cli = CliContext::with_config(temp.path().to_path_buf(), Default::default());

    let output = cli.execute(&tree(&[], true, Some("js/app.js"), "text")).unwrap();
    assert!(output.contains("> "));
    assert!(output.contains("app.js"));
    assert!(output.contains("[javascript]"));
    assert!(output.contains("console.log('fresh');"));

    let err = cli.execute(&tree(&[], false, Some("missing.js"), "text")).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn preview_inlines_assets() {
    let temp = workspace_with_site();
    let cli = CliContext::with_config(temp.path().to_path_buf(), Default::default());

    cli.execute(&preview(false)).unwrap();
    let html = fs::read_to_string(temp.path().join("out/preview.html")).unwrap();
    assert_eq!(
        html,
        "<!DOCTYPE html><html><head><style>h1 { color: brown; }</style></head><body><h1>Bakery</h1><script>console.log('fresh');</script></body></html>"
    );
}

#[test]
fn preview_host_page_is_sandboxed() {
    let temp = workspace_with_site();
    let cli = CliContext::with_config(temp.path().to_path_buf(), Default::default());

    cli.execute(&preview(true)).unwrap();
    let html = fs::read_to_string(temp.path().join("out/preview.html")).unwrap();
    assert!(html.contains(r#"sandbox="allow-scripts""#));
    assert!(!html.contains("allow-same-origin"));
    assert!(html.contains("srcdoc=\""));
    assert!(html.contains("&lt;h1&gt;Bakery&lt;/h1&gt;"));
}

#[test]
fn export_writes_zip_with_every_file() {
    let temp = workspace_with_site();
    let cli = CliContext::with_config(temp.path().to_path_buf(), Default::default());

    let output = cli
        .execute(&Commands::Export {
            project: "site".into(),
            entry: None,
            out: "dist".into(),
        })
        .unwrap();
    assert!(output.contains("generated-website.zip"));

    let file = fs::File::open(temp.path().join("dist/generated-website.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(
        names,
        vec!["about/index.html", "css/site.css", "index.html", "js/app.js"]
    );

    let mut css = String::new();
    archive
        .by_name("css/site.css")
        .unwrap()
        .read_to_string(&mut css)
        .unwrap();
    assert_eq!(css, "h1 { color: brown; }");
}

#[test]
fn missing_project_is_an_error() {
    let temp = TempDir::new().unwrap();
    let cli = CliContext::with_config(temp.path().to_path_buf(), Default::default());
    assert!(cli
        .execute(&Commands::Export {
            project: "nowhere.json".into(),
            entry: None,
            out: ".".into(),
        })
        .is_err());
}
