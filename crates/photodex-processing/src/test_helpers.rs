//! Scripted extractor for tests that must not depend on exiftool being installed.

use crate::metadata::{ExtractorError, MetadataExtractor, MetadataFields};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

enum Script {
    Fields(MetadataFields),
    Fail(String),
}

/// Returns the same result for every file and counts its invocations.
pub struct FixedExtractor {
    script: Script,
    delay: Option<Duration>,
    timeout: Option<Duration>,
    calls: AtomicUsize,
}

impl FixedExtractor {
    /// Succeeds with `fields`, which must be a JSON object.
    pub fn new(fields: Value) -> Self {
        let fields = match fields {
            Value::Object(map) => map,
            other => panic!("FixedExtractor expects a JSON object, got {other}"),
        };
        Self::with_script(Script::Fields(fields))
    }

    /// Fails every extraction with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_script(Script::Fail(reason.into()))
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            delay: None,
            timeout: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn run(&self) -> Result<MetadataFields, ExtractorError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.script {
            Script::Fields(fields) => Ok(fields.clone()),
            Script::Fail(reason) => Err(ExtractorError::File {
                extractor: "fixed",
                reason: reason.clone(),
            }),
        }
    }
}

#[async_trait]
impl MetadataExtractor for FixedExtractor {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn extract(&self, _path: &Path) -> Result<MetadataFields, ExtractorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.run())
                .await
                .unwrap_or(Err(ExtractorError::Timeout {
                    extractor: "fixed",
                    timeout,
                })),
            None => self.run().await,
        }
    }
}
