//! Configuration Tests
//!
//! File-based loading of `AsyncForConfig` and its use by handles and options.

use std::io::Write;
use tasker_async_for::{AsyncFor, AsyncForConfig, AsyncForError, DispatchMode, ExecutionOptions};

#[test]
fn config_has_expected_defaults() {
    let config = AsyncForConfig::default();

    assert_eq!(config.concurrency_limit, 0);
    assert!(!config.run_synchronously);
    assert!(config.message.is_none());
    assert_eq!(
        ExecutionOptions::from(&config).dispatch_mode(),
        DispatchMode::Unbounded
    );
}

#[test]
fn config_loads_from_toml_file() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "concurrency_limit = 6")?;
    writeln!(file, "message = \"Importing\"")?;
    file.flush()?;

    let config = AsyncForConfig::from_file(file.path())?;
    assert_eq!(config.concurrency_limit, 6);
    assert!(!config.run_synchronously);
    assert_eq!(config.message.as_deref(), Some("Importing"));

    let runner = AsyncFor::from_config(&config);
    assert_eq!(runner.concurrency_limit(), 6);
    assert_eq!(runner.message(), "Importing");
    assert_eq!(runner.options().dispatch_mode(), DispatchMode::Bounded(6));
    Ok(())
}

#[test]
fn config_loads_from_yaml_file() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
    writeln!(file, "run_synchronously: true")?;
    file.flush()?;

    let config = AsyncForConfig::from_file(file.path())?;
    assert!(config.run_synchronously);
    assert_eq!(
        ExecutionOptions::from(&config).dispatch_mode(),
        DispatchMode::Sequential
    );
    Ok(())
}

#[test]
fn missing_file_is_a_configuration_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = AsyncForConfig::from_file(dir.path().join("absent.toml"));

    assert!(matches!(result, Err(AsyncForError::ConfigurationError(_))));
}

#[test]
fn malformed_value_is_a_configuration_error() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "concurrency_limit = \"lots\"")?;
    file.flush()?;

    let result = AsyncForConfig::from_file(file.path());
    assert!(matches!(result, Err(AsyncForError::ConfigurationError(_))));
    Ok(())
}
