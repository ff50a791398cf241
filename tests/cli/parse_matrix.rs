use clap::{CommandFactory, Parser};
use promptsite::logging::LoggingConfig;
use promptsite::tooling::cli::{Cli, Commands};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["promptsite", "generate", "a bakery website"],
        vec!["promptsite", "generate", "--template", "blog", "--out", "site", "--export"],
        vec!["promptsite", "generate", "--format", "json"],
        vec!["promptsite", "preview", "site"],
        vec!["promptsite", "preview", "site.json", "--out", "p.html", "--host-page"],
        vec!["promptsite", "preview", "site", "--watch", "--debounce-ms", "300"],
        vec!["promptsite", "tree", "site", "--expand", "css", "--expand", "js", "--select", "js/app.js"],
        vec!["promptsite", "tree", "site", "--all", "--format", "json"],
        vec!["promptsite", "export", "site", "--out", "dist"],
        vec!["promptsite", "templates"],
        vec!["promptsite", "config", "show"],
        vec!["promptsite", "--workspace", "/tmp", "--log-level", "debug", "templates"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_invalid_commands() {
    let invalid: Vec<Vec<&str>> = vec![
        vec!["promptsite", "generate", "a bakery", "--template", "blog"],
        vec!["promptsite", "preview"],
        vec!["promptsite", "export"],
        vec!["promptsite", "config"],
        vec!["promptsite", "deploy"],
    ];
    for args in invalid {
        assert!(
            Cli::try_parse_from(args.clone()).is_err(),
            "expected parse failure for args: {args:?}"
        );
    }
}

#[test]
fn tree_expand_is_repeatable() {
    let cli = Cli::try_parse_from(["promptsite", "tree", "site", "--expand", "a", "--expand", "a/b"]).unwrap();
    match cli.command {
        Commands::Tree { expand, all, .. } => {
            assert_eq!(expand, vec!["a", "a/b"]);
            assert!(!all);
        }
        _ => panic!("expected tree command"),
    }
}

#[test]
fn logging_flags_override_config() {
    let cli = Cli::try_parse_from([
        "promptsite",
        "--verbose",
        "--log-format",
        "json",
        "--log-file",
        "/tmp/p.log",
        "templates",
    ])
    .unwrap();
    let config = cli.logging_config(&LoggingConfig::default());
    assert_eq!(config.level, "debug");
    assert_eq!(config.format, "json");
    assert_eq!(config.file.as_deref(), Some(std::path::Path::new("/tmp/p.log")));

    let cli = Cli::try_parse_from(["promptsite", "--verbose", "--log-level", "trace", "templates"]).unwrap();
    assert_eq!(cli.logging_config(&LoggingConfig::default()).level, "trace");
}

#[test]
fn logging_flags_beat_environment_values() {
    // A base as produced by folding PROMPTSITE_LOG=info and PROMPTSITE_LOG_FILE.
    let mut from_env = LoggingConfig::default();
    from_env.level = "info".to_string();
    from_env.file = Some("/tmp/env.log".into());

    let cli = Cli::try_parse_from([
        "promptsite",
        "--log-level",
        "error",
        "--log-file",
        "/tmp/cli.log",
        "templates",
    ])
    .unwrap();
    let config = cli.logging_config(&from_env);
    assert_eq!(config.level, "error");
    assert_eq!(config.file.as_deref(), Some(std::path::Path::new("/tmp/cli.log")));

    let cli = Cli::try_parse_from(["promptsite", "templates"]).unwrap();
    assert_eq!(cli.logging_config(&from_env), from_env);
}

#[test]
fn help_lists_every_command() {
    let mut command = Cli::command();
    let mut output = Vec::new();
    command.write_long_help(&mut output).unwrap();
    let output = String::from_utf8(output).unwrap();
    for name in ["generate", "preview", "tree", "export", "templates", "config"] {
        assert!(output.contains(name), "help is missing {name}");
    }
}
