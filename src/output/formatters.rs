//! Output formatting functionality
//!
//! This module provides formatters for different output formats.

use crate::error::{CheckerError, Result};
use crate::models::report::{CheckResults, DependencyVerdict, Verdict};
use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Style;
use std::time::Duration;

/// Format a single dependency verdict as one text line
pub fn format_dependency_text(dependency: &DependencyVerdict, use_colors: bool, verbose: bool) -> String {
    let status = match &dependency.verdict {
        Verdict::Conforming => {
            if use_colors { Green.paint("PASS").to_string() } else { "PASS".to_string() }
        }
        Verdict::NonConforming { .. } => {
            if use_colors { Red.bold().paint("FAIL").to_string() } else { "FAIL".to_string() }
        }
        Verdict::Unchecked(_) => {
            if use_colors { Yellow.paint("SKIP").to_string() } else { "SKIP".to_string() }
        }
    };

    let mut line = format!("  [{}] {}", status, dependency.name);

    match &dependency.verdict {
        Verdict::NonConforming { failure } => line.push_str(&format!(": {}", failure)),
        Verdict::Unchecked(reason) => line.push_str(&format!(": {}", reason.describe())),
        Verdict::Conforming => {}
    }

    if verbose {
        if let Some(script) = &dependency.entry_script {
            let script = script.display().to_string();
            if use_colors {
                line.push_str(&format!("\n      {}", Style::new().dimmed().paint(script)));
            } else {
                line.push_str(&format!("\n      {}", script));
            }
        }
    }

    line.push('\n');
    line
}

/// Format check results as text
pub fn format_results_text(results: &CheckResults, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    let header = format!("Dependency Check Summary ({})", results.target);
    if use_colors {
        output.push_str(&format!("{}\n\n", Blue.bold().paint(header)));
    } else {
        output.push_str(&format!("{}\n\n", header));
    }

    output.push_str(&format!("Project: {}\n", results.project_dir.display()));

    if let Some(error) = &results.root_manifest_error {
        let line = format!("Could not load package.json: {}", error);
        if use_colors {
            output.push_str(&format!("\n{}\n", Red.bold().paint(line)));
        } else {
            output.push_str(&format!("\n{}\n", line));
        }
        return output;
    }

    let summary = &results.summary;
    output.push_str(&format!("Dependencies checked: {}\n", summary.total_dependencies));
    output.push_str(&format!("Conforming: {}\n", summary.conforming));
    output.push_str(&format!("Non-conforming: {}\n", summary.non_conforming));
    output.push_str(&format!("Unchecked: {}\n", summary.unchecked));
    output.push_str(&format!("Check duration: {}\n", format_duration(summary.duration)));

    let shown: Vec<&DependencyVerdict> = if verbose {
        results.dependencies.iter().collect()
    } else {
        results
            .dependencies
            .iter()
            .filter(|dep| matches!(dep.verdict, Verdict::NonConforming { .. }))
            .collect()
    };

    if !shown.is_empty() {
        output.push_str(if verbose { "\nDependencies:\n" } else { "\nNon-conforming dependencies:\n" });
        for dependency in shown {
            output.push_str(&format_dependency_text(dependency, use_colors, verbose));
        }
    } else if summary.non_conforming == 0 && summary.total_dependencies > 0 {
        let line = format!("\nAll checked dependencies conform to {}\n", results.target);
        if use_colors {
            output.push_str(&Green.paint(line).to_string());
        } else {
            output.push_str(&line);
        }
    }

    output
}

/// Format a duration in a human-readable way
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Format check results as JSON
pub fn format_results_json(results: &CheckResults, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(results)
    } else {
        serde_json::to_string(results)
    };
    json.map_err(|e| CheckerError::JsonSerialize {
        source: e,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace::capture(),
    })
}

/// Format check results as CSV, one row per dependency
pub fn format_results_csv(results: &CheckResults) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record([
        "Dependency",
        "Kind",
        "Status",
        "Entry Script",
        "Feature",
        "Line",
        "Column",
        "Detail",
    ])?;

    for dependency in &results.dependencies {
        let entry_script = dependency
            .entry_script
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_default();

        let (feature, line, column, detail) = match &dependency.verdict {
            Verdict::Conforming => (String::new(), String::new(), String::new(), String::new()),
            Verdict::NonConforming { failure } => (
                failure.feature.map(|f| f.description().to_string()).unwrap_or_default(),
                failure.line.map(|l| l.to_string()).unwrap_or_default(),
                failure.column.map(|c| c.to_string()).unwrap_or_default(),
                failure.message.clone(),
            ),
            Verdict::Unchecked(reason) => (String::new(), String::new(), String::new(), reason.describe()),
        };

        writer.write_record([
            dependency.name.as_str(),
            dependency.kind.manifest_key(),
            dependency.verdict.label(),
            entry_script.as_str(),
            feature.as_str(),
            line.as_str(),
            column.as_str(),
            detail.as_str(),
        ])?;
    }

    let data = String::from_utf8(writer.into_inner()?).map_err(|e| CheckerError::CsvSerialize {
        source: e,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace::capture(),
    })?;

    Ok(data)
}
