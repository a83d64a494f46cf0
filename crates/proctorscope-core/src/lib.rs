//! ProctorScope Core
//!
//! Decision logic and shared types for the ProctorScope exam-proctoring
//! pipeline.
//!
//! This crate provides:
//! - Wire types for detections, assessments, and batch results
//! - The static detection taxonomy (suspicious / prohibited class tables)
//! - The single-pass detection classifier
//! - The risk evaluator (bounded 0-100 score plus operator message)
//! - Error types and result handling
//!
//! Everything here is pure and synchronous: detector I/O and HTTP live in
//! the `proctorscope-analysis` and `proctorscope-server` crates.

pub mod classify;
pub mod error;
pub mod risk;
pub mod taxonomy;
pub mod types;

pub use classify::{classify_detections, ClassifiedDetection, ClassifiedDetections};
pub use error::{Error, Result};
pub use risk::{evaluate_risk, RiskAssessment};
pub use taxonomy::{DetectionKind, Taxonomy};
pub use types::{
    Assessment, BatchFailure, BatchItemResult, BatchResponse, BatchSummary, Detection,
    SnapshotUpload,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::classify::{classify_detections, ClassifiedDetections};
    pub use crate::error::{Error, Result};
    pub use crate::risk::{evaluate_risk, RiskAssessment};
    pub use crate::taxonomy::{DetectionKind, Taxonomy};
    pub use crate::types::{Assessment, BatchItemResult, BatchResponse, Detection, SnapshotUpload};
}
