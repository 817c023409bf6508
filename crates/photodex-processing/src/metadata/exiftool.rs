//! Metadata extraction through the external `exiftool` program.

use super::{ExtractorError, MetadataExtractor, MetadataFields};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error};

const NAME: &str = "exiftool";

/// Runs `exiftool -json <file>` and returns the single result object.
pub struct ExifToolExtractor {
    binary_path: String,
    timeout: Duration,
}

impl ExifToolExtractor {
    pub fn new(binary_path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary_path: binary_path.into(),
            timeout,
        }
    }

    pub fn binary_path(&self) -> &str {
        &self.binary_path
    }
}

/// exiftool reads a leading `-` as an option, so relative paths get a `./` prefix.
/// The normalizer always passes canonical absolute paths; this covers direct callers.
fn file_argument(path: &Path) -> PathBuf {
    if path.to_string_lossy().starts_with('-') {
        Path::new(".").join(path)
    } else {
        path.to_path_buf()
    }
}

/// Parse exiftool's `-json` output for a single file.
///
/// exiftool emits an array with one object per file; a per-file failure is
/// reported through an `Error` entry on that object.
pub fn parse_exiftool_output(stdout: &[u8]) -> Result<MetadataFields, ExtractorError> {
    let parsed: Vec<MetadataFields> =
        serde_json::from_slice(stdout).map_err(|e| ExtractorError::File {
            extractor: NAME,
            reason: format!("failed to parse exiftool output: {}", e),
        })?;
    first_result(parsed)
}

fn first_result(parsed: Vec<MetadataFields>) -> Result<MetadataFields, ExtractorError> {
    let fields = parsed.into_iter().next().ok_or_else(|| ExtractorError::File {
        extractor: NAME,
        reason: "exiftool returned no results".to_string(),
    })?;

    if let Some(err) = fields.get("Error") {
        let reason = match err {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(ExtractorError::File {
            extractor: NAME,
            reason,
        });
    }

    Ok(fields)
}

#[async_trait]
impl MetadataExtractor for ExifToolExtractor {
    fn name(&self) -> &'static str {
        NAME
    }

    #[tracing::instrument(skip(self), fields(extractor = NAME))]
    async fn extract(&self, path: &Path) -> Result<MetadataFields, ExtractorError> {
        let run = Command::new(&self.binary_path)
            .arg("-json")
            .arg(file_argument(path))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, run).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                error!(binary = %self.binary_path, error = %e, "Failed to run exiftool");
                return Err(ExtractorError::Unavailable {
                    extractor: NAME,
                    reason: e.to_string(),
                });
            }
            Err(_) => {
                error!(timeout_secs = self.timeout.as_secs(), "exiftool timed out");
                return Err(ExtractorError::Timeout {
                    extractor: NAME,
                    timeout: self.timeout,
                });
            }
        };

        // exiftool exits non-zero on per-file errors but still prints JSON
        // describing them; stderr is only consulted when stdout is not JSON.
        match serde_json::from_slice::<Vec<MetadataFields>>(&output.stdout) {
            Ok(parsed) => {
                let fields = first_result(parsed)?;
                debug!(field_count = fields.len(), "exiftool metadata extracted");
                Ok(fields)
            }
            Err(e) if output.status.success() => Err(ExtractorError::File {
                extractor: NAME,
                reason: format!("failed to parse exiftool output: {}", e),
            }),
            Err(_) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                error!(status = %output.status, stderr = %stderr, "exiftool failed");
                Err(ExtractorError::File {
                    extractor: NAME,
                    reason: stderr.trim().to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    /// Write an executable shell script standing in for exiftool.
    #[cfg(unix)]
    fn fake_exiftool(dir: &Path, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("exiftool");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_parse_single_object() {
        let stdout = br#"[{
            "SourceFile": "/photos/a.jpg",
            "ExifToolVersion": 12.76,
            "FileSize": "12 kB",
            "FileType": "JPEG",
            "ImageWidth": 640,
            "ImageHeight": 480,
            "CreateDate": "2023:04:05 10:00:00",
            "ImageSize": "640x480",
            "Megapixels": 0.307
        }]"#;

        let fields = parse_exiftool_output(stdout).unwrap();
        assert_eq!(fields["FileType"], "JPEG");
        assert_eq!(fields["ImageWidth"], 640);
        assert_eq!(fields["CreateDate"], "2023:04:05 10:00:00");
    }

    #[test]
    fn test_parse_per_file_error() {
        let stdout = br#"[{"SourceFile": "/photos/a.txt", "Error": "Unknown file type"}]"#;
        let err = parse_exiftool_output(stdout).unwrap_err();
        match err {
            ExtractorError::File { reason, .. } => assert_eq!(reason, "Unknown file type"),
            other => panic!("Expected File error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_exiftool_output(b"Error: File not found - nope.jpg").is_err());
        assert!(parse_exiftool_output(b"[]").is_err());
    }

    #[test]
    fn test_file_argument_guards_leading_dash() {
        assert_eq!(
            file_argument(Path::new("-evil.jpg")),
            PathBuf::from("./-evil.jpg")
        );
        assert_eq!(
            file_argument(Path::new("/photos/a.jpg")),
            PathBuf::from("/photos/a.jpg")
        );
    }

    #[tokio::test]
    async fn test_missing_binary_is_unavailable() {
        let extractor = ExifToolExtractor::new(
            "/nonexistent/photodex-test/exiftool",
            Duration::from_secs(5),
        );
        let err = extractor
            .extract(Path::new("/tmp/whatever.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractorError::Unavailable { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_binary_and_parses_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let binary = fake_exiftool(
            dir.path(),
            r#"echo '[{"SourceFile":"'"$2"'","FileType":"PNG","ImageWidth":64}]'"#,
        );

        let fields = ExifToolExtractor::new(binary, Duration::from_secs(5))
            .extract(Path::new("/photos/a.png"))
            .await
            .unwrap();

        assert_eq!(fields["SourceFile"], "/photos/a.png");
        assert_eq!(fields["FileType"], "PNG");
        assert_eq!(fields["ImageWidth"], 64);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_per_file_error_keeps_reason_on_failed_exit() {
        let dir = tempfile::tempdir().unwrap();
        let binary = fake_exiftool(
            dir.path(),
            r#"echo '[{"SourceFile":"x","Error":"File not found"}]'
exit 1"#,
        );

        let err = ExifToolExtractor::new(binary, Duration::from_secs(5))
            .extract(Path::new("/photos/x.jpg"))
            .await
            .unwrap_err();

        match err {
            ExtractorError::File { reason, .. } => assert_eq!(reason, "File not found"),
            other => panic!("Expected File error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_json_failure_reports_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let binary = fake_exiftool(dir.path(), "echo 'Error: boom' >&2\nexit 2");

        let err = ExifToolExtractor::new(binary, Duration::from_secs(5))
            .extract(Path::new("/photos/x.jpg"))
            .await
            .unwrap_err();

        match err {
            ExtractorError::File { reason, .. } => assert_eq!(reason, "Error: boom"),
            other => panic!("Expected File error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_binary_times_out_and_is_killed() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("finished");
        let binary = fake_exiftool(
            dir.path(),
            &format!("sleep 1\ntouch '{}'", marker.display()),
        );

        let started = Instant::now();
        let err = ExifToolExtractor::new(binary, Duration::from_millis(100))
            .extract(Path::new("/photos/slow.jpg"))
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractorError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_millis(900));

        // the child is killed with the dropped future, so it never gets past the sleep
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!marker.exists());
    }
}
