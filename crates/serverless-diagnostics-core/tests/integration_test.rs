// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use chrono::{TimeZone, Utc};
use serial_test::serial;
use serverless_diagnostics_core::{
    build_report, handle, response::MARKER_HEADER, CommandSpec, Config, InvocationContext,
};
use std::env;
use std::fs::{self, File};
use std::path::Path;
use tempfile::{tempdir, TempDir};

struct Fixture {
    _root: TempDir,
    populated: String,
    empty: String,
    missing: String,
    runtime: String,
}

fn fixture() -> Fixture {
    let root = tempdir().unwrap();
    let populated = root.path().join("populated");
    let empty = root.path().join("empty");
    let runtime = root.path().join("runtime");
    fs::create_dir(&populated).unwrap();
    fs::create_dir(&empty).unwrap();
    fs::create_dir(&runtime).unwrap();
    for name in ["b", "a", "c"] {
        File::create(populated.join(name)).unwrap();
    }
    File::create(runtime.join("bootstrap")).unwrap();

    let path = |p: &Path| p.display().to_string();
    Fixture {
        populated: path(&populated),
        empty: path(&empty),
        missing: path(&root.path().join("missing")),
        runtime: path(&runtime),
        _root: root,
    }
}

fn config_for(fixture: &Fixture) -> Config {
    Config {
        list_dirs: vec![
            fixture.populated.clone(),
            fixture.empty.clone(),
            fixture.missing.clone(),
        ],
        commands: vec![
            CommandSpec::parse("echo disk usage").unwrap(),
            CommandSpec::parse("no-such-diagnostic-tool -b").unwrap(),
        ],
        include_cpuinfo: false,
        ..Default::default()
    }
}

#[tokio::test]
#[serial]
async fn test_report_sections_in_order() {
    let fixture = fixture();
    env::set_var("LAMBDA_RUNTIME_DIR", &fixture.runtime);

    let ctx = InvocationContext {
        request_id: "req-42".to_string(),
        deadline: Some(Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap()),
    };
    let body = build_report(&ctx, &config_for(&fixture)).await.into_body();
    env::remove_var("LAMBDA_RUNTIME_DIR");

    assert!(body.starts_with("Hello from Amazon λ!\nVersion:    "));
    assert!(body.contains("\nDeadline:   2030-01-02 03:04:05 UTC\n"));
    assert!(body.contains("\nRequest:    req-42\n"));
    assert!(body.contains(&format!("\n{}:\na b c\n", fixture.populated)));
    assert!(body.contains(&format!("\n{}:\n(none)\n", fixture.empty)));
    assert!(body.contains(&format!("\n{}:\n   Cannot open: ", fixture.missing)));
    assert!(body.contains(&format!("\n{}:\nbootstrap\n", fixture.runtime)));
    assert!(body.contains("\n$ echo disk usage\ndisk usage\n"));
    assert!(body.contains("\n$ no-such-diagnostic-tool -b\nCannot run no-such-diagnostic-tool: "));

    let order: [&str; 7] = [
        "\nUID:",
        "\nTime:",
        "\nSysname:",
        "\nEnvironment:\n",
        &format!("\n{}:", fixture.populated),
        &format!("\n{}:", fixture.runtime),
        "\n$ echo disk usage",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|needle| body.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
}

#[tokio::test]
#[serial]
async fn test_environment_redaction() {
    env::set_var("DIAG_TEST_API_KEY", "secret-one");
    env::set_var("DIAG_TEST_SESSION_TOKEN", "secret-two");
    env::set_var("DIAG_TEST_REGION", "us-east-1");

    let config = Config {
        list_dirs: vec![],
        commands: vec![],
        include_cpuinfo: false,
        ..Default::default()
    };
    let body = build_report(&InvocationContext::default(), &config)
        .await
        .into_body();

    env::remove_var("DIAG_TEST_API_KEY");
    env::remove_var("DIAG_TEST_SESSION_TOKEN");
    env::remove_var("DIAG_TEST_REGION");

    assert!(body.contains("\n   DIAG_TEST_REGION=us-east-1\n"));
    assert!(!body.contains("DIAG_TEST_API_KEY"));
    assert!(!body.contains("secret-one"));
    assert!(!body.contains("DIAG_TEST_SESSION_TOKEN"));
    assert!(!body.contains("secret-two"));
}

#[tokio::test]
#[serial]
async fn test_no_runtime_directory_and_no_deadline() {
    env::remove_var("LAMBDA_RUNTIME_DIR");
    let config = Config {
        list_dirs: vec![],
        commands: vec![],
        include_cpuinfo: false,
        ..Default::default()
    };
    let body = build_report(&InvocationContext::default(), &config)
        .await
        .into_body();
    assert!(body.contains("\nDeadline:   <none>\n"));
    assert!(body.contains("\nNo runtime directory\n"));
    assert!(!body.contains("\nRequest:"));
}

#[tokio::test]
#[serial]
async fn test_failures_do_not_change_status() {
    let fixture = fixture();
    let config = Config {
        marker_header: Some("hello, Lambda".to_string()),
        ..config_for(&fixture)
    };
    let response = handle(&InvocationContext::default(), &config)
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    assert!(!response.is_base64_encoded);
    assert_eq!(
        response.headers.get("content-type").map(String::as_str),
        Some("text/plain; charset=utf-8")
    );
    assert_eq!(
        response.headers.get(MARKER_HEADER).map(String::as_str),
        Some("hello, Lambda")
    );
    assert!(response.body.contains("Cannot open: "));
    assert!(response.body.contains("Cannot run no-such-diagnostic-tool: "));
}

#[tokio::test]
#[serial]
async fn test_invalid_marker_is_the_only_propagated_error() {
    let config = Config {
        list_dirs: vec![],
        commands: vec![],
        include_cpuinfo: false,
        marker_header: Some("bad\r\nvalue".to_string()),
        ..Default::default()
    };
    let err = handle(&InvocationContext::default(), &config)
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("Failed to build response: "));
}

#[cfg(target_os = "linux")]
#[tokio::test]
#[serial]
async fn test_cpuinfo_embedded() {
    let config = Config {
        list_dirs: vec![],
        commands: vec![],
        include_cpuinfo: true,
        ..Default::default()
    };
    let body = build_report(&InvocationContext::default(), &config)
        .await
        .into_body();
    assert!(body.contains("\n/proc/cpuinfo:\n") || body.contains("\nCannot read /proc/cpuinfo: "));
}
