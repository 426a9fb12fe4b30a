//! Tests for output formatting

#[cfg(test)]
mod tests {
    use crate::models::package::DependencyKind;
    use crate::models::report::{CheckResults, DependencyVerdict, UncheckedReason, Verdict};
    use crate::models::syntax::{EcmaVersion, SyntaxFailure, SyntaxFeature};
    use crate::models::OutputFormat;
    use crate::output::{
        create_formatter, format_duration, CsvFormatter, FileWriter, Formatter, JsonFormatter, OutputWriter,
        ProgressReporter, TextFormatter,
    };
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::tempdir;

    // Helper function to create test results
    fn create_test_results() -> CheckResults {
        let mut results = CheckResults::new(PathBuf::from("/test/project"), EcmaVersion::Es5);

        results.add_verdict(DependencyVerdict {
            name: "legacy".to_string(),
            kind: DependencyKind::Production,
            entry_script: Some(PathBuf::from("/test/project/node_modules/legacy/index.js")),
            verdict: Verdict::Conforming,
        });
        results.add_verdict(DependencyVerdict {
            name: "modern".to_string(),
            kind: DependencyKind::Production,
            entry_script: Some(PathBuf::from("/test/project/node_modules/modern/dist/index.js")),
            verdict: Verdict::NonConforming {
                failure: SyntaxFailure::unsupported_feature(SyntaxFeature::ArrowFunction, EcmaVersion::Es5, 3, 12),
            },
        });
        results.add_verdict(DependencyVerdict {
            name: "types-only".to_string(),
            kind: DependencyKind::Development,
            entry_script: None,
            verdict: Verdict::Unchecked(UncheckedReason::NoEntryScript),
        });

        results.set_duration(Duration::from_millis(42));
        results
    }

    #[test]
    fn test_text_formatter() {
        let results = create_test_results();

        let normal_output = TextFormatter::new(false, false, false).format(&results).unwrap();
        assert!(normal_output.contains("Dependency Check Summary (ES5)"));
        assert!(normal_output.contains("Dependencies checked: 3"));
        assert!(normal_output.contains("Non-conforming: 1"));
        assert!(normal_output.contains("Unchecked: 1"));
        assert!(normal_output.contains("Check duration: 42ms"));
        assert!(normal_output.contains("[FAIL] modern: arrow functions (ES2015) not allowed in ES5 at 3:12"));
        assert!(!normal_output.contains("[PASS] legacy"));

        let verbose_output = TextFormatter::new(false, true, false).format(&results).unwrap();
        assert!(verbose_output.contains("[PASS] legacy"));
        assert!(verbose_output.contains("[SKIP] types-only: no entry script found"));
        assert!(verbose_output.contains("/test/project/node_modules/modern/dist/index.js"));

        let quiet_output = TextFormatter::new(false, false, true).format(&results).unwrap();
        assert_eq!(quiet_output, "modern\n");
    }

    #[test]
    fn test_text_formatter_root_manifest_error() {
        let mut results = CheckResults::new(PathBuf::from("/missing"), EcmaVersion::Es5);
        results.root_manifest_error = Some("package.json not found".to_string());

        let output = TextFormatter::new(false, false, false).format(&results).unwrap();
        assert!(output.contains("Could not load package.json: package.json not found"));
        assert!(!output.contains("Dependencies checked"));
    }

    #[test]
    fn test_text_formatter_all_conforming() {
        let mut results = CheckResults::new(PathBuf::from("/p"), EcmaVersion::Es2015);
        results.add_verdict(DependencyVerdict {
            name: "ok".to_string(),
            kind: DependencyKind::Production,
            entry_script: None,
            verdict: Verdict::Conforming,
        });

        let output = TextFormatter::new(false, false, false).format(&results).unwrap();
        assert!(output.contains("All checked dependencies conform to ES2015"));
    }

    #[test]
    fn test_colored_text_output() {
        let results = create_test_results();
        let output = TextFormatter::new(true, false, false).format(&results).unwrap();
        assert!(output.contains("\u{1b}["));
        assert!(output.contains("modern"));
    }

    #[test]
    fn test_json_formatter() {
        let results = create_test_results();
        let output = JsonFormatter::new(true).format(&results).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["target"], "es5");
        assert_eq!(json["report"], serde_json::json!(["modern"]));
        assert_eq!(json["summary"]["duration"], 42);
        assert_eq!(json["dependencies"][1]["verdict"]["status"], "non_conforming");
        assert_eq!(json["dependencies"][1]["verdict"]["failure"]["feature"], "arrow_function");
        assert_eq!(json["dependencies"][2]["verdict"]["reason"], "no_entry_script");

        let compact = JsonFormatter::new(false).format(&results).unwrap();
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn test_csv_formatter() {
        let results = create_test_results();
        let output = CsvFormatter::new().format(&results).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Dependency,Kind,Status,Entry Script,Feature,Line,Column,Detail");
        assert!(lines[1].starts_with("legacy,dependencies,conforming,"));
        assert!(lines[2].starts_with("modern,dependencies,non-conforming,"));
        assert!(lines[2].contains(",arrow functions,3,12,"));
        assert!(lines[3].starts_with("types-only,devDependencies,unchecked,,"));
    }

    #[test]
    fn test_create_formatter() {
        let results = create_test_results();

        let json = create_formatter(OutputFormat::Json, false, false, false).format(&results).unwrap();
        assert!(json.trim_start().starts_with('{'));

        let csv = create_formatter(OutputFormat::Csv, false, false, false).format(&results).unwrap();
        assert!(csv.starts_with("Dependency,"));

        let text = create_formatter(OutputFormat::Text, false, false, false).format(&results).unwrap();
        assert!(text.starts_with("Dependency Check Summary"));
    }

    #[test]
    fn test_file_writer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        FileWriter::new(&path).write("[\"modern\"]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[\"modern\"]");
    }

    #[test]
    fn test_file_writer_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("report.txt");

        let err = FileWriter::new(&path).write("x").unwrap_err();
        assert!(matches!(err, crate::error::CheckerError::OutputDirectoryNotFound { .. }));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(5)), "5ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
    }

    #[test]
    fn test_progress_reporter_modes() {
        let quiet = ProgressReporter::new(true, false, true, false);
        assert!(quiet.is_quiet());
        assert!(!quiet.has_bar());

        let hidden = ProgressReporter::new(false, true, false, false);
        assert!(hidden.is_verbose());
        assert!(!hidden.has_bar());

        let shown = ProgressReporter::new(false, false, true, false);
        assert!(shown.has_bar());
        shown.start(2, "checking");
        shown.update(1, 2, "dep");
        shown.finish("done");
    }
}
