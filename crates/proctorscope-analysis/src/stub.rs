//! Stub detector backend for tests and model-less deployments

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::debug;

use proctorscope_core::{Detection, Error, Result};

use crate::detector::Detector;

/// Stub backend. Decodes the submitted bytes for real (so decode failures
/// behave like a live backend), then returns a canned detection list
/// filtered by the configured confidence threshold. Scripted outcomes, when
/// queued, take priority and skip decoding; they drive failure-isolation
/// tests.
pub struct StubDetector {
    confidence_threshold: f32,
    canned: Vec<Detection>,
    script: Mutex<VecDeque<Result<Vec<Detection>>>>,
}

impl StubDetector {
    /// Create a stub with no canned detections
    pub fn new(confidence_threshold: f32) -> Self {
        Self {
            confidence_threshold,
            canned: Vec::new(),
            script: Mutex::new(VecDeque::new()),
        }
    }

    /// Set the canned detections returned for every decodable image
    pub fn with_detections(mut self, detections: Vec<Detection>) -> Self {
        self.canned = detections;
        self
    }

    /// Queue a successful scripted outcome for the next `detect` call
    pub fn script_detections(&self, detections: Vec<Detection>) {
        self.script
            .lock()
            .expect("script queue poisoned")
            .push_back(Ok(detections));
    }

    /// Queue a failing scripted outcome for the next `detect` call
    pub fn script_failure(&self, error: Error) {
        self.script
            .lock()
            .expect("script queue poisoned")
            .push_back(Err(error));
    }
}

#[async_trait]
impl Detector for StubDetector {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn detect(&self, image: &[u8]) -> Result<Vec<Detection>> {
        if let Some(outcome) = self
            .script
            .lock()
            .expect("script queue poisoned")
            .pop_front()
        {
            return outcome;
        }

        image::load_from_memory(image).map_err(|e| Error::decode(e.to_string()))?;

        let detections: Vec<Detection> = self
            .canned
            .iter()
            .filter(|d| d.confidence >= self.confidence_threshold)
            .cloned()
            .collect();
        debug!(
            backend = self.name(),
            count = detections.len(),
            "stub detection complete"
        );
        Ok(detections)
    }
}
