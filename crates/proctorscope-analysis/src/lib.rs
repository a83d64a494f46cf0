//! ProctorScope Analysis
//!
//! The orchestration layer between the detector collaborator and the pure
//! decision logic in `proctorscope-core`:
//! - The [`Detector`] trait, the seam to the external object detector
//! - A [`StubDetector`] backend used for tests and default server wiring
//! - The single-snapshot pipeline ([`analyze_snapshot`])
//! - The batch runner ([`analyze_batch`]) with per-item failure isolation

pub mod batch;
pub mod detector;
pub mod pipeline;
pub mod stub;

pub use batch::{analyze_batch, MAX_BATCH_SIZE};
pub use detector::Detector;
pub use pipeline::analyze_snapshot;
pub use stub::StubDetector;
