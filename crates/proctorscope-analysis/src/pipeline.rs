//! Single-snapshot analysis pipeline

use std::time::Instant;
use tracing::{debug, info};

use proctorscope_core::{classify_detections, evaluate_risk, Assessment, Result, Taxonomy};

use crate::detector::Detector;

/// Analyze one snapshot: run the detector, classify its output, evaluate
/// risk, and assemble the assessment. Failures surface whole; a partial
/// assessment is never returned.
pub async fn analyze_snapshot(
    detector: &dyn Detector,
    taxonomy: &Taxonomy,
    image: &[u8],
) -> Result<Assessment> {
    let start = Instant::now();

    let detections = detector.detect(image).await?;
    debug!(
        backend = detector.name(),
        detections = detections.len(),
        "detection complete"
    );

    let classified = classify_detections(detections, taxonomy);
    let risk = evaluate_risk(&classified);

    info!(
        person_count = classified.person_count(),
        prohibited = classified.prohibited().count(),
        risk_score = risk.score,
        "snapshot analyzed"
    );

    let elapsed_ms = round2(start.elapsed().as_secs_f64() * 1000.0);
    Ok(Assessment::new(&classified, risk, elapsed_ms))
}

/// Round to two decimal places for the wire
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
