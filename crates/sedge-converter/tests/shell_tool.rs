//! End-to-end runs against a shell script standing in for the
//! translation tool.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use sedge_converter::{ConversionError, DraftConverter, Quality, Resolution};

const ECHO_ARGS: &str = r#"#!/bin/sh
for arg in "$@"; do
  echo "arg: $arg"
  case "$arg" in
    -o=*) : > "${arg#-o=}" ;;
  esac
done
echo "Conversion finished"
"#;

const REPORTS_ERROR: &str = r#"#!/bin/sh
echo "Opening draft"
printf 'B\263\271d: ERROR missing layer\n'
exit 0
"#;

const SILENT_FAILURE: &str = r#"#!/bin/sh
echo "Aborted"
exit 4
"#;

fn write_tool(dir: &Path, script: &str) -> PathBuf {
    let tool = dir.join("SolidEdgeTranslationServices.exe");
    std::fs::write(&tool, script).expect("write tool");
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    tool
}

fn write_draft(dir: &Path) -> PathBuf {
    let input = dir.join("bracket.dft");
    std::fs::write(&input, "draft").expect("write draft");
    input
}

#[tokio::test]
async fn converts_and_passes_flags_to_tool() {
    let temp = tempfile::tempdir().expect("tempdir");
    let tool = write_tool(temp.path(), ECHO_ARGS);
    let input = write_draft(temp.path());
    let output = temp.path().join("bracket.jpg");

    let mut converter = DraftConverter::new();
    converter
        .set_tool_path(&tool)
        .expect("tool")
        .from(&input)
        .expect("input")
        .to(&output)
        .expect("output")
        .resolution(Resolution::Dpi300)
        .quality(Quality::High);

    let report = converter.try_convert().await.expect("report");

    assert_eq!(report.exit_code, 0);
    assert!(output.exists());
    assert!(report.lines.contains(&format!("arg: -i={}", input.display())));
    assert!(report.lines.contains(&"arg: -t=jpg".to_string()));
    assert!(report.lines.contains(&"arg: -r=300".to_string()));
    assert!(report.lines.contains(&"arg: -q=HIGH".to_string()));
    assert_eq!(report.lines.last().map(String::as_str), Some("Conversion finished"));
    assert!(converter.errors().is_empty());
}

#[tokio::test]
async fn error_text_fails_conversion_despite_zero_exit() {
    let temp = tempfile::tempdir().expect("tempdir");
    let tool = write_tool(temp.path(), REPORTS_ERROR);
    let input = write_draft(temp.path());

    let mut converter = DraftConverter::new();
    converter
        .set_tool_path(&tool)
        .expect("tool")
        .from(&input)
        .expect("input")
        .to(temp.path().join("bracket.pdf"))
        .expect("output");

    assert!(!converter.convert().await.expect("convert"));
    assert_eq!(converter.last_exit_code(), Some(0));
    assert_eq!(converter.errors(), &["Błąd: ERROR missing layer".to_string()]);
}

#[tokio::test]
async fn nonzero_exit_without_error_text_is_reported_not_failed() {
    let temp = tempfile::tempdir().expect("tempdir");
    let tool = write_tool(temp.path(), SILENT_FAILURE);
    let input = write_draft(temp.path());

    let mut converter = DraftConverter::new();
    converter
        .set_tool_path(&tool)
        .expect("tool")
        .from(&input)
        .expect("input")
        .to(temp.path().join("bracket.pdf"))
        .expect("output");

    let report = converter.try_convert().await.expect("report");
    assert_eq!(report.exit_code, 4);
    assert_eq!(report.lines, vec!["Aborted"]);
}

#[tokio::test]
async fn tool_removed_after_configuration_is_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    let tool = write_tool(temp.path(), ECHO_ARGS);
    let input = write_draft(temp.path());

    let mut converter = DraftConverter::new();
    converter
        .set_tool_path(&tool)
        .expect("tool")
        .from(&input)
        .expect("input")
        .to(temp.path().join("bracket.pdf"))
        .expect("output");
    std::fs::remove_file(&tool).expect("remove");

    assert!(matches!(
        converter.convert().await,
        Err(ConversionError::InvalidToolPath { .. })
    ));
}
