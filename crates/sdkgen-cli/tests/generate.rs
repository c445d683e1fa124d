//! End-to-end tests for the sdkgen CLI

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::tempdir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/billing.yaml")
}

/// Run the built binary with the built-in templates
fn sdkgen(args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_sdkgen"))
        .args(args)
        .env("RUST_LOG", "warn")
        .env_remove("SDKGEN_TEMPLATE_DIR")
        .output()
        .context("Failed to run sdkgen")
}

#[test]
fn test_languages_lists_every_target() -> Result<()> {
    let output = sdkgen(&["languages"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["java", "python", "ruby"]);
    Ok(())
}

#[test]
fn test_generate_java_sdk() -> Result<()> {
    let dir = tempdir()?;
    let out = dir.path().join("sdk");
    let output = sdkgen(&[
        "generate",
        "--schema-path",
        fixture().to_str().unwrap(),
        "--language",
        "java",
        "--output-dir",
        out.to_str().unwrap(),
        "--sdk-name",
        "billing",
    ])?;
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    for file in [
        "models/Customer.java",
        "params/customer/ListCustomersParams.java",
        "params/customer/CreateCustomerParams.java",
        "params/invoice/BatchCreateInvoicesParams.java",
        "responses/customer/ListCustomersResponse.java",
        "responses/customer/RetrieveCustomerResponse.java",
        "services/CustomerService.java",
        "services/InvoiceService.java",
        "enums/AutoCollection.java",
        "exceptions/ApiException.java",
        "exceptions/BadRequestApiErrorCode.java",
        "exceptions/ErrorType.java",
    ] {
        assert!(out.join(file).is_file(), "missing {file}");
    }

    let params = std::fs::read_to_string(out.join("params/customer/CreateCustomerParams.java"))?;
    assert!(params.contains("class BillingAddress"));
    assert!(params.contains("class CustomerBillingAddress"));

    let service = std::fs::read_to_string(out.join("services/CustomerService.java"))?;
    let create = service.find("CreateCustomerResponse create(").unwrap();
    let list = service.find("ListCustomersResponse list(").unwrap();
    assert!(create < list, "operations follow sort order");

    let invoices = std::fs::read_to_string(out.join("services/InvoiceService.java"))?;
    assert!(invoices.contains("batchCreate("));
    Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let dir = tempdir()?;
    let out = dir.path().join("sdk");
    let output = sdkgen(&[
        "generate",
        "--schema-path",
        fixture().to_str().unwrap(),
        "--language",
        "python",
        "--output-dir",
        out.to_str().unwrap(),
        "--artifact",
        "enums",
        "--dry-run",
    ])?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().next().unwrap().starts_with("mkdir "));
    assert!(stdout.contains("auto_collection.py"));
    assert!(!out.exists());
    Ok(())
}

#[test]
fn test_config_file_with_flag_override() -> Result<()> {
    let dir = tempdir()?;
    let out = dir.path().join("sdk");
    let config = dir.path().join("sdkgen.yaml");
    std::fs::write(
        &config,
        format!(
            "sdk_name: billing\nopenapi_schema_path: {}\noutput_dir: {}\nlanguage: java\nartifacts: [models]\n",
            fixture().display(),
            out.display()
        ),
    )?;

    let output = sdkgen(&[
        "generate",
        "--config",
        config.to_str().unwrap(),
        "--language",
        "ruby",
    ])?;
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(out.join("models/customer.rb").is_file());
    assert!(!out.join("services").exists());
    Ok(())
}

#[test]
fn test_unknown_artifact_fails() -> Result<()> {
    let dir = tempdir()?;
    let output = sdkgen(&[
        "generate",
        "--schema-path",
        fixture().to_str().unwrap(),
        "--output-dir",
        dir.path().to_str().unwrap(),
        "--artifact",
        "widgets",
    ])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("widgets"));
    Ok(())
}
