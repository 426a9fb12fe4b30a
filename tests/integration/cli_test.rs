use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use es5check::cli::{
    args::{Args, OutputFormat},
    commands::{Command, EXIT_FAILURE, EXIT_NON_CONFORMING, EXIT_OK},
};

fn project_with(script: &str) -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "app", "dependencies": {"dep": "1.0.0"}}"#,
    )
    .unwrap();
    let dep = dir.path().join("node_modules").join("dep");
    fs::create_dir_all(&dep).unwrap();
    fs::write(dep.join("package.json"), r#"{"name": "dep"}"#).unwrap();
    fs::write(dep.join("index.js"), script).unwrap();
    dir
}

fn run(project: &std::path::Path, extra: &[&str]) -> i32 {
    let report = project.join("report.txt");
    let mut argv = vec![
        "es5check".to_string(),
        "--path".to_string(),
        project.display().to_string(),
        "--no-progress".to_string(),
        "--no-colors".to_string(),
        "--output-file".to_string(),
        report.display().to_string(),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));
    Command::from_args(Args::parse_from(argv)).run()
}

#[test]
fn test_cli_args_parsing() {
    let args = Args::parse_from(["es5check"]);
    assert_eq!(args.path, None);
    assert!(args.ignore.is_empty());
    assert_eq!(args.output, None);
    assert!(!args.quiet);
    assert!(!args.verbose);

    let args = Args::parse_from([
        "es5check",
        "--path",
        "/test/path",
        "--target",
        "es2017",
        "--ignore",
        "@types/*",
        "--output",
        "json",
        "--output-file",
        "results.json",
        "--log-conforming",
        "--optional-deps",
    ]);

    assert_eq!(args.path, Some(PathBuf::from("/test/path")));
    assert_eq!(args.target.as_deref(), Some("es2017"));
    assert_eq!(args.ignore, vec!["@types/*".to_string()]);
    assert_eq!(args.output, Some(OutputFormat::Json));
    assert_eq!(args.output_file, Some(PathBuf::from("results.json")));
    assert!(args.log_conforming);
    assert!(args.optional_deps);
    assert!(!args.dev_deps);
}

#[test]
fn test_cli_invalid_output_format() {
    assert!(Args::try_parse_from(["es5check", "--output", "invalid"]).is_err());
}

#[test]
fn test_exit_codes() {
    let conforming = project_with("var x = 1;");
    assert_eq!(run(conforming.path(), &[]), EXIT_OK);

    let failing = project_with("let x = 1;");
    assert_eq!(run(failing.path(), &[]), EXIT_NON_CONFORMING);
    assert_eq!(run(failing.path(), &["--no-fail"]), EXIT_OK);
    assert_eq!(run(failing.path(), &["--target", "es2015"]), EXIT_OK);

    let report = fs::read_to_string(failing.path().join("report.txt")).unwrap();
    assert!(report.contains("All checked dependencies conform to ES2015"));
}

#[test]
fn test_exit_code_without_manifest() {
    let empty = tempdir().unwrap();
    assert_eq!(run(empty.path(), &[]), EXIT_FAILURE);
}

#[test]
fn test_exit_code_for_invalid_target() {
    let project = project_with("var x = 1;");
    assert_eq!(run(project.path(), &["--target", "es3"]), EXIT_FAILURE);
}

#[test]
fn test_quiet_json_report_file() {
    let project = project_with("var f = () => 1;");
    let code = run(project.path(), &["--output", "json", "--quiet"]);
    assert_eq!(code, EXIT_NON_CONFORMING);

    let report = fs::read_to_string(project.path().join("report.txt")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(json["report"], serde_json::json!(["dep"]));
}
