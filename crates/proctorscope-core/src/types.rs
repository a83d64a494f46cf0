//! Wire types for ProctorScope

use serde::{Deserialize, Serialize};

use crate::classify::ClassifiedDetections;
use crate::risk::RiskAssessment;

/// One labeled, confidence-scored bounding box from the detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Detector category index (COCO id for the default taxonomy)
    pub class_id: u32,

    /// Label for `class_id`, as reported by the detector
    pub class_name: String,

    /// Detection confidence (0.0-1.0)
    pub confidence: f32,

    /// Box corners `[x1, y1, x2, y2]` in image pixel coordinates
    pub bbox: [f32; 4],
}

impl Detection {
    /// Create a new detection
    pub fn new(class_id: u32, class_name: impl Into<String>, confidence: f32, bbox: [f32; 4]) -> Self {
        Self {
            class_id,
            class_name: class_name.into(),
            confidence,
            bbox,
        }
    }
}

/// Final assessment for one analyzed snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// Always true for a returned assessment; failures are surfaced as errors
    pub success: bool,

    /// Number of persons detected in the snapshot
    pub person_count: usize,

    /// Suspicious detections (prohibited ones included), input order
    pub suspicious_objects: Vec<Detection>,

    /// Prohibited detections, input order
    pub prohibited_objects: Vec<Detection>,

    /// Every detection the detector reported, input order
    pub all_detections: Vec<Detection>,

    /// Bounded integrity risk score (0-100)
    pub risk_score: u8,

    /// Wall-clock analysis time in milliseconds
    pub processing_time_ms: f64,

    /// Operator-facing summary message
    pub message: String,
}

impl Assessment {
    /// Build an assessment from classified detections and their risk evaluation
    pub fn new(classified: &ClassifiedDetections, risk: RiskAssessment, processing_time_ms: f64) -> Self {
        Self {
            success: true,
            person_count: classified.person_count(),
            suspicious_objects: classified.suspicious().cloned().collect(),
            prohibited_objects: classified.prohibited().cloned().collect(),
            all_detections: classified.all().cloned().collect(),
            risk_score: risk.score,
            processing_time_ms,
            message: risk.message,
        }
    }
}

/// One raw image submitted as part of a batch
#[derive(Debug, Clone)]
pub struct SnapshotUpload {
    /// Client-supplied filename, echoed back in the batch result
    pub filename: String,

    /// Raw image bytes
    pub bytes: Vec<u8>,
}

impl SnapshotUpload {
    /// Create a new upload
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// Per-item outcome of a batch analysis: a summary or an error record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchItemResult {
    /// The item was analyzed successfully
    Summary(BatchSummary),

    /// The item failed; the rest of the batch is unaffected
    Failure(BatchFailure),
}

impl BatchItemResult {
    /// Filename this result belongs to
    pub fn filename(&self) -> &str {
        match self {
            Self::Summary(s) => &s.filename,
            Self::Failure(f) => &f.filename,
        }
    }

    /// True when this item failed
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

/// Lightweight per-image summary for batch responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Filename of the analyzed image
    pub filename: String,

    /// Number of persons detected
    pub person_count: usize,

    /// One class name per prohibited detection, input order
    pub prohibited_objects: Vec<String>,

    /// True when the image warrants operator attention
    pub has_issues: bool,
}

/// Error record for a batch item that could not be analyzed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Filename of the failed image
    pub filename: String,

    /// Human-readable failure description
    pub error: String,
}

/// Envelope for batch responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    /// True whenever the batch itself was accepted, regardless of item outcomes
    pub success: bool,

    /// Per-item results, one per input image, input order
    pub results: Vec<BatchItemResult>,
}

impl BatchResponse {
    /// Wrap per-item results of an accepted batch
    pub fn new(results: Vec<BatchItemResult>) -> Self {
        Self {
            success: true,
            results,
        }
    }
}
