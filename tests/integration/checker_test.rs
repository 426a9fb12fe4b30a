//! End-to-end checks over projects laid out on disk

use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};
use es5check::{
    check,
    models::report::UncheckedReason,
    CheckOptions, CollectingSink, CompatibilityChecker, DiagnosticLevel, EcmaVersion, Verdict,
};

/// Write a project package.json declaring `dependencies` in the given order
fn create_project(dependencies: &[&str]) -> TempDir {
    let dir = tempdir().unwrap();
    let entries: Vec<String> = dependencies.iter().map(|name| format!("\"{}\": \"^1.0.0\"", name)).collect();
    fs::write(
        dir.path().join("package.json"),
        format!("{{\"name\": \"app\", \"version\": \"1.0.0\", \"dependencies\": {{{}}}}}", entries.join(", ")),
    )
    .unwrap();
    dir
}

/// Install a dependency with the given manifest and files
fn install(project: &Path, name: &str, manifest: &str, files: &[(&str, &str)]) {
    let package_dir = project.join("node_modules").join(name);
    fs::create_dir_all(&package_dir).unwrap();
    fs::write(package_dir.join("package.json"), manifest).unwrap();

    for (relative, content) in files {
        let path = package_dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

fn checker(project: &Path, options: CheckOptions) -> (CompatibilityChecker, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::new());
    let checker = CompatibilityChecker::new(project, options).with_sink(sink.clone());
    (checker, sink)
}

#[test]
fn test_conforming_and_non_conforming_dependencies() {
    let project = create_project(&["legacy", "modern", "scoped-let"]);
    install(project.path(), "legacy", r#"{"name": "legacy"}"#, &[("index.js", "var x = 1;\nmodule.exports = x;\n")]);
    install(
        project.path(),
        "modern",
        r#"{"name": "modern", "main": "lib/main.js"}"#,
        &[("lib/main.js", "module.exports = () => 1;\n")],
    );
    install(project.path(), "scoped-let", r#"{"name": "scoped-let"}"#, &[("index.js", "let y = 2;\n")]);

    let report = check(project.path(), CheckOptions::default());
    assert_eq!(report, vec!["modern".to_string(), "scoped-let".to_string()]);
}

#[test]
fn test_report_follows_declaration_order() {
    let project = create_project(&["zeta", "alpha", "mid"]);
    for name in ["zeta", "alpha", "mid"] {
        install(project.path(), name, &format!("{{\"name\": \"{}\"}}", name), &[("index.js", "const a = 1;")]);
    }

    let report = check(project.path(), CheckOptions::default());
    assert_eq!(report, vec!["zeta".to_string(), "alpha".to_string(), "mid".to_string()]);
}

#[test]
fn test_check_is_idempotent() {
    let project = create_project(&["a", "b"]);
    install(project.path(), "a", r#"{"name": "a"}"#, &[("index.js", "var a = [1, 2].map(function (x) { return x; });")]);
    install(project.path(), "b", r#"{"name": "b"}"#, &[("index.js", "class B {}")]);

    let first = check(project.path(), CheckOptions::default());
    let second = check(project.path(), CheckOptions::default());
    assert_eq!(first, second);
    assert_eq!(first, vec!["b".to_string()]);
}

#[test]
fn test_zero_dependencies() {
    let project = create_project(&[]);
    let (checker, sink) = checker(project.path(), CheckOptions::default());

    let results = checker.check_detailed();
    assert!(results.report.is_empty());
    assert!(results.root_manifest_error.is_none());
    assert_eq!(results.summary.total_dependencies, 0);
    assert_eq!(sink.count(DiagnosticLevel::Error), 0);
}

#[test]
fn test_missing_root_manifest() {
    let project = tempdir().unwrap();
    let (checker, sink) = checker(project.path(), CheckOptions::default());

    let results = checker.check_detailed();
    assert!(results.report.is_empty());
    assert!(results.dependencies.is_empty());
    assert!(results.root_manifest_error.is_some());
    assert_eq!(sink.count(DiagnosticLevel::Error), 1);
}

#[test]
fn test_main_pointing_to_directory() {
    let project = create_project(&["dir-main"]);
    install(
        project.path(),
        "dir-main",
        r#"{"name": "dir-main", "main": "./lib"}"#,
        &[("lib/index.js", "export default 1;"), ("index.js", "var ok = true;")],
    );

    let (checker, _) = checker(project.path(), CheckOptions::default());
    let results = checker.check_detailed();

    let verdict = &results.dependencies[0];
    assert!(verdict.entry_script.as_ref().unwrap().ends_with("lib/index.js"));
    assert!(matches!(verdict.verdict, Verdict::NonConforming { .. }));
}

#[test]
fn test_missing_main_falls_back_to_index() {
    let project = create_project(&["fallback"]);
    install(
        project.path(),
        "fallback",
        r#"{"name": "fallback", "main": "dist/missing.js"}"#,
        &[("index.js", "async function f() {}")],
    );

    let (checker, _) = checker(project.path(), CheckOptions::default());
    let results = checker.check_detailed();

    let verdict = &results.dependencies[0];
    assert!(verdict.entry_script.as_ref().unwrap().ends_with("fallback/index.js"));
    assert_eq!(results.non_conforming(), ["fallback".to_string()]);
}

#[test]
fn test_missing_main_without_index_is_skipped() {
    let project = create_project(&["nothing-here"]);
    install(project.path(), "nothing-here", r#"{"name": "nothing-here", "main": "gone.js"}"#, &[]);

    let (checker, sink) = checker(project.path(), CheckOptions::default());
    let results = checker.check_detailed();

    assert!(results.report.is_empty());
    assert_eq!(results.dependencies[0].verdict, Verdict::Unchecked(UncheckedReason::NoEntryScript));
    assert!(sink
        .messages()
        .iter()
        .any(|message| message.contains("nothing-here was not checked because no entry script was found")));
}

#[test]
fn test_uninstalled_dependency_does_not_stop_the_batch() {
    let project = create_project(&["not-installed", "modern"]);
    install(project.path(), "modern", r#"{"name": "modern"}"#, &[("index.js", "for (const x of []) {}")]);

    let (checker, _) = checker(project.path(), CheckOptions::default());
    let results = checker.check_detailed();

    assert!(matches!(
        results.dependencies[0].verdict,
        Verdict::Unchecked(UncheckedReason::ManifestUnreadable { .. })
    ));
    assert_eq!(results.non_conforming(), ["modern".to_string()]);
}

#[test]
fn test_target_edition_changes_the_verdict() {
    let project = create_project(&["arrows"]);
    install(project.path(), "arrows", r#"{"name": "arrows"}"#, &[("index.js", "var f = (a) => a * 2;")]);

    assert_eq!(check(project.path(), CheckOptions::default()), vec!["arrows".to_string()]);

    let options = CheckOptions {
        target: EcmaVersion::Es2015,
        ..Default::default()
    };
    assert!(check(project.path(), options).is_empty());
}

#[test]
fn test_module_packages_parse_as_modules() {
    let project = create_project(&["esm"]);
    install(
        project.path(),
        "esm",
        r#"{"name": "esm", "type": "module"}"#,
        &[("index.js", "import a from './a.js';\nexport default a;\n")],
    );

    let options = CheckOptions {
        target: EcmaVersion::Es2015,
        ..Default::default()
    };
    assert!(check(project.path(), options).is_empty());
    assert_eq!(check(project.path(), CheckOptions::default()), vec!["esm".to_string()]);
}

#[test]
fn test_ignore_patterns_and_log_conforming() {
    let project = create_project(&["@types/node", "legacy"]);
    install(project.path(), "legacy", r#"{"name": "legacy"}"#, &[("index.js", "var legacy = 1;")]);

    let options = CheckOptions {
        ignore: vec!["@types/*".to_string()],
        log_conforming_packages: true,
        ..Default::default()
    };
    let (checker, sink) = checker(project.path(), options);
    let results = checker.check_detailed();

    assert!(matches!(
        results.dependencies[0].verdict,
        Verdict::Unchecked(UncheckedReason::Ignored { .. })
    ));
    assert_eq!(results.dependencies[1].verdict, Verdict::Conforming);
    assert_eq!(
        sink.messages(),
        vec![
            "@types/node was not checked because it matches ignore pattern '@types/*'".to_string(),
            "legacy is ES5".to_string(),
        ]
    );
}

#[test]
fn test_dev_dependencies_are_opt_in() {
    let project = tempdir().unwrap();
    fs::write(
        project.path().join("package.json"),
        r#"{"name": "app", "dependencies": {}, "devDependencies": {"tooling": "1.0.0"}}"#,
    )
    .unwrap();
    install(project.path(), "tooling", r#"{"name": "tooling"}"#, &[("index.js", "let t;")]);

    assert!(check(project.path(), CheckOptions::default()).is_empty());

    let options = CheckOptions {
        include_dev_dependencies: true,
        ..Default::default()
    };
    assert_eq!(check(project.path(), options), vec!["tooling".to_string()]);
}

#[cfg(unix)]
#[test]
fn test_symlinked_main_is_not_followed() {
    let project = create_project(&["linked"]);
    install(
        project.path(),
        "linked",
        r#"{"name": "linked", "main": "entry.js"}"#,
        &[("real.js", "let x = 1;"), ("index.js", "let y = 1;")],
    );
    let package_dir = project.path().join("node_modules").join("linked");
    std::os::unix::fs::symlink(package_dir.join("real.js"), package_dir.join("entry.js")).unwrap();

    let (checker, _) = checker(project.path(), CheckOptions::default());
    let results = checker.check_detailed();

    assert!(results.report.is_empty());
    assert_eq!(results.dependencies[0].verdict, Verdict::Unchecked(UncheckedReason::NoEntryScript));
}
