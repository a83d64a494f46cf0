//! Batch runner with per-item failure isolation

use tracing::{debug, warn};

use proctorscope_core::{
    classify_detections, BatchFailure, BatchItemResult, BatchSummary, Error, Result,
    SnapshotUpload, Taxonomy,
};

use crate::detector::Detector;

/// Maximum number of images accepted per batch
pub const MAX_BATCH_SIZE: usize = 10;

/// Analyze a batch of snapshots, one result per input in input order.
///
/// An oversize batch is rejected before any per-item work. After that,
/// each item reaches a terminal state on its own: a failure is captured
/// in that item's error record and never aborts the rest. Items are
/// processed sequentially since the detector collaborator is treated as
/// a serialized resource; batch items carry only the person count and
/// prohibited class names, not the full risk evaluation.
pub async fn analyze_batch(
    detector: &dyn Detector,
    taxonomy: &Taxonomy,
    uploads: Vec<SnapshotUpload>,
) -> Result<Vec<BatchItemResult>> {
    if uploads.len() > MAX_BATCH_SIZE {
        return Err(Error::BatchTooLarge {
            got: uploads.len(),
            limit: MAX_BATCH_SIZE,
        });
    }

    let mut results = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let result = match detector.detect(&upload.bytes).await {
            Ok(detections) => {
                let classified = classify_detections(detections, taxonomy);
                let prohibited: Vec<String> = classified
                    .prohibited()
                    .map(|d| d.class_name.clone())
                    .collect();
                let person_count = classified.person_count();
                debug!(
                    filename = %upload.filename,
                    person_count,
                    prohibited = prohibited.len(),
                    "batch item analyzed"
                );
                BatchItemResult::Summary(BatchSummary {
                    filename: upload.filename,
                    person_count,
                    has_issues: person_count > 1 || !prohibited.is_empty(),
                    prohibited_objects: prohibited,
                })
            }
            Err(e) => {
                warn!(filename = %upload.filename, error = %e, "batch item failed");
                BatchItemResult::Failure(BatchFailure {
                    filename: upload.filename,
                    error: e.to_string(),
                })
            }
        };
        results.push(result);
    }

    Ok(results)
}
