use std::fs;
use tempfile::tempdir;
use es5check::{
    config::{self, CliArgs},
    models::config::OutputFormat,
    CheckerError, EcmaVersion,
};

#[test]
fn test_config_file_and_cli_layers() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("es5check.toml");
    fs::write(
        &config_path,
        r#"
            target = "es2016"
            include_optional_deps = true
            ignore_patterns = ["@types/*"]
            output_format = "csv"
        "#,
    )
    .unwrap();

    let cli_args = CliArgs {
        path: Some(dir.path().to_path_buf()),
        config: Some(config_path),
        dev_deps: true,
        ..Default::default()
    };

    let settings = config::load_config_with_env_prefix(cli_args, "ES5CHECK_IT_LAYERS").unwrap();
    assert_eq!(settings.target, EcmaVersion::Es2016);
    assert_eq!(settings.output_format, OutputFormat::Csv);
    assert!(settings.include_dev_deps);
    assert!(settings.include_optional_deps);

    let options = settings.check_options();
    assert_eq!(options.ignore, vec!["@types/*".to_string()]);
    assert_eq!(options.modules_dir, "node_modules");
}

#[test]
fn test_malformed_config_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("broken.toml");
    fs::write(&config_path, "target = [").unwrap();

    let cli_args = CliArgs {
        path: Some(dir.path().to_path_buf()),
        config: Some(config_path),
        ..Default::default()
    };

    let err = config::load_config_with_env_prefix(cli_args, "ES5CHECK_IT_BROKEN").unwrap_err();
    assert!(matches!(err, CheckerError::ConfigParse { .. }));
}

#[test]
fn test_default_config_round_trip() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join(".es5check.toml");
    config::create_default_config(&config_path).unwrap();

    let partial = config::parse_config_file(&config_path).unwrap();
    let settings = partial.to_settings();
    assert_eq!(settings.target, EcmaVersion::Es5);
    assert!(settings.fail_on_nonconforming);
    assert!(settings.ignore_patterns.is_empty());
}
