use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;
use es5check::{
    models::config::OutputFormat,
    output::{create_formatter, create_writer, NullSink},
    CheckOptions, CheckResults, CompatibilityChecker,
};

fn checked_project(dir: &Path) -> CheckResults {
    fs::write(
        dir.join("package.json"),
        r#"{"name": "app", "dependencies": {"old": "1.0.0", "new": "2.0.0", "absent": "3.0.0"}}"#,
    )
    .unwrap();

    for (name, script) in [("old", "var a = 1;"), ("new", "const b = `tpl`;")] {
        let package_dir = dir.join("node_modules").join(name);
        fs::create_dir_all(&package_dir).unwrap();
        fs::write(package_dir.join("package.json"), format!("{{\"name\": \"{}\"}}", name)).unwrap();
        fs::write(package_dir.join("index.js"), script).unwrap();
    }

    CompatibilityChecker::new(dir, CheckOptions::default())
        .with_sink(Arc::new(NullSink))
        .check_detailed()
}

#[test]
fn test_text_report_from_real_check() {
    let dir = tempdir().unwrap();
    let results = checked_project(dir.path());

    let text = create_formatter(OutputFormat::Text, false, false, false).format(&results).unwrap();
    assert!(text.contains("Dependencies checked: 3"));
    assert!(text.contains("Conforming: 1"));
    assert!(text.contains("Non-conforming: 1"));
    assert!(text.contains("Unchecked: 1"));
    assert!(text.contains("[FAIL] new"));
}

#[test]
fn test_json_report_written_to_file() {
    let dir = tempdir().unwrap();
    let results = checked_project(dir.path());

    let output_path = dir.path().join("report.json");
    let json = create_formatter(OutputFormat::Json, false, false, false).format(&results).unwrap();
    create_writer(Some(&output_path)).write(&json).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(parsed["report"], serde_json::json!(["new"]));
    assert_eq!(parsed["dependencies"][0]["name"], "old");
    assert_eq!(parsed["dependencies"][2]["verdict"]["reason"], "manifest_unreadable");
    assert!(parsed["checked_at"].is_string());
}

#[test]
fn test_csv_report_rows() {
    let dir = tempdir().unwrap();
    let results = checked_project(dir.path());

    let csv = create_formatter(OutputFormat::Csv, false, false, false).format(&results).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("old,dependencies,conforming,"));
    assert!(lines[2].starts_with("new,dependencies,non-conforming,"));
    assert!(lines[3].starts_with("absent,dependencies,unchecked,"));
}
