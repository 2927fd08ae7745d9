use fxlayout_migrator::{rewrite, MigratorError, RewriteArgs};
use std::fs;
use tempfile::TempDir;

fn args(temp_dir: &TempDir) -> RewriteArgs {
    RewriteArgs {
        input: vec![format!("{}/*.json", temp_dir.path().display())],
        out_dir: Some(temp_dir.path().join("out")),
        in_place: false,
        manifest: None,
        config: None,
        compact: false,
        verbose: false,
        jobs: None,
        exclude: vec![],
        dry_run: false,
    }
}

#[tokio::test]
async fn test_helpful_error_messages_for_parse_errors() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("broken.json"),
        r#"{"type": "element", "attrs": [{"name": "fxFlex""#,
    )
    .unwrap();

    let result = rewrite(args(&temp_dir)).await;

    match result {
        Err(e @ MigratorError::ParseError { .. }) => {
            let message = e.to_string();
            assert!(message.contains("broken.json"), "Error should name the file: {}", message);
            assert!(message.contains("parse"), "Error should mention parsing: {}", message);
        }
        other => panic!("Expected a parse error, got {:?}", other.map(|r| r.total_files_processed)),
    }
}

#[tokio::test]
async fn test_attribute_without_name_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("nameless.json"),
        r#"{"type": "element", "attrs": [{"value": "row"}], "children": []}"#,
    )
    .unwrap();

    let result = rewrite(args(&temp_dir)).await;
    assert!(matches!(result, Err(MigratorError::ParseError { .. })));
}

#[tokio::test]
async fn test_error_message_for_no_files_found() {
    let temp_dir = TempDir::new().unwrap();

    let result = rewrite(args(&temp_dir)).await;

    assert!(matches!(result, Err(MigratorError::NoFilesFound)));
}

#[tokio::test]
async fn test_invalid_glob_pattern() {
    let temp_dir = TempDir::new().unwrap();
    let mut args = args(&temp_dir);
    args.input = vec!["[".to_string()];

    let result = rewrite(args).await;
    assert!(matches!(result, Err(MigratorError::Pattern(_))));
}

#[tokio::test]
async fn test_invalid_arguments_are_reported() {
    let temp_dir = TempDir::new().unwrap();
    let mut args = args(&temp_dir);
    args.out_dir = None;

    let result = rewrite(args).await;
    match result {
        Err(MigratorError::InvalidInput(message)) => assert!(message.contains("--in-place")),
        other => panic!("Expected invalid input, got {:?}", other.map(|r| r.total_files_processed)),
    }
}

#[tokio::test]
async fn test_broken_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("migrator.yaml");
    fs::write(&config_path, "content: [unclosed").unwrap();

    let mut args = args(&temp_dir);
    args.config = Some(config_path);

    let result = rewrite(args).await;
    match result {
        Err(e @ MigratorError::ConfigError { .. }) => {
            assert!(e.to_string().contains("YAML"), "{}", e);
        }
        other => panic!(
            "Expected a config error, got {:?}",
            other.map(|r| r.total_files_processed)
        ),
    }
}
