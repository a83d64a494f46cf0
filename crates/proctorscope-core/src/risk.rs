//! Risk scoring and operator message synthesis

use crate::classify::ClassifiedDetections;

/// Points per extra person beyond the first
const CROWDING_POINTS: i64 = 15;

/// Cap on the crowding term so crowding alone cannot dominate
const CROWDING_CAP: i64 = 30;

/// Weight of one prohibited detection at full confidence
const PROHIBITED_WEIGHT: f64 = 40.0;

/// Weight of one suspicious-but-not-prohibited detection at full confidence
const SUSPICIOUS_WEIGHT: f64 = 10.0;

/// Upper bound of the risk score
const MAX_SCORE: i64 = 100;

/// Output of the risk evaluator
#[derive(Debug, Clone)]
pub struct RiskAssessment {
    /// Bounded integrity risk score (0-100)
    pub score: u8,

    /// Operator-facing summary message
    pub message: String,
}

/// Evaluate integrity risk for one classified snapshot.
///
/// Terms are additive and clamped exactly once, after all terms are
/// summed. Accumulation is done in `i64` so out-of-contract confidences
/// (negative or above 1.0) still land inside the 0-100 bound:
/// 1. crowding: `min(30, (person_count - 1) * 15)` once more than one
///    person is present;
/// 2. prohibited: `floor(confidence * 40)` per prohibited detection;
/// 3. suspicious-only: `floor(confidence * 10)` per detection tagged
///    suspicious but not prohibited.
pub fn evaluate_risk(classified: &ClassifiedDetections) -> RiskAssessment {
    let mut score: i64 = 0;

    let person_count = classified.person_count();
    if person_count > 1 {
        let extra = person_count.saturating_sub(1).min(i64::MAX as usize) as i64;
        score += CROWDING_CAP.min(extra.saturating_mul(CROWDING_POINTS));
    }

    for detection in classified.prohibited() {
        score += (f64::from(detection.confidence) * PROHIBITED_WEIGHT).floor() as i64;
    }

    for detection in classified.suspicious_only() {
        score += (f64::from(detection.confidence) * SUSPICIOUS_WEIGHT).floor() as i64;
    }

    RiskAssessment {
        score: score.clamp(0, MAX_SCORE) as u8,
        message: synthesize_message(classified),
    }
}

/// Build the operator message: crowding clause, then prohibited clause,
/// joined with "; ". Prohibited class names are deduplicated in first-seen
/// order. With neither clause, report that nothing suspicious was found.
fn synthesize_message(classified: &ClassifiedDetections) -> String {
    let mut clauses: Vec<String> = Vec::new();

    let person_count = classified.person_count();
    if person_count > 1 {
        clauses.push(format!("{person_count} orang terdeteksi"));
    }

    let mut names: Vec<&str> = Vec::new();
    for detection in classified.prohibited() {
        if !names.contains(&detection.class_name.as_str()) {
            names.push(&detection.class_name);
        }
    }
    if !names.is_empty() {
        clauses.push(format!("Objek terlarang: {}", names.join(", ")));
    }

    if clauses.is_empty() {
        clauses.push("Tidak ada objek mencurigakan".to_string());
    }

    clauses.join("; ")
}
