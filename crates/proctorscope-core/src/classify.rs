//! Single-pass detection classification
//!
//! Every detection receives exactly one [`DetectionKind`] tag during one
//! linear pass over the input. All later consumers (risk scoring, the
//! assessment buckets) read the tag instead of re-deriving membership by
//! value equality, so two detections of the same class with different
//! boxes stay independent, and degenerate duplicates never conflate.

use crate::taxonomy::{DetectionKind, Taxonomy};
use crate::types::Detection;

/// One detection together with its classification tag
#[derive(Debug, Clone)]
pub struct ClassifiedDetection {
    /// The detection as the detector reported it
    pub detection: Detection,

    /// Semantic category assigned during classification
    pub kind: DetectionKind,
}

/// All detections of one snapshot, tagged and in input order
#[derive(Debug, Clone, Default)]
pub struct ClassifiedDetections {
    entries: Vec<ClassifiedDetection>,
    person_count: usize,
}

impl ClassifiedDetections {
    /// Number of person-tagged detections
    pub fn person_count(&self) -> usize {
        self.person_count
    }

    /// Every detection, input order
    pub fn all(&self) -> impl Iterator<Item = &Detection> {
        self.entries.iter().map(|e| &e.detection)
    }

    /// Suspicious detections, prohibited ones included, input order
    pub fn suspicious(&self) -> impl Iterator<Item = &Detection> {
        self.entries
            .iter()
            .filter(|e| matches!(e.kind, DetectionKind::Suspicious | DetectionKind::Prohibited))
            .map(|e| &e.detection)
    }

    /// Prohibited detections, input order
    pub fn prohibited(&self) -> impl Iterator<Item = &Detection> {
        self.entries
            .iter()
            .filter(|e| e.kind == DetectionKind::Prohibited)
            .map(|e| &e.detection)
    }

    /// Suspicious detections that are not prohibited, input order
    pub fn suspicious_only(&self) -> impl Iterator<Item = &Detection> {
        self.entries
            .iter()
            .filter(|e| e.kind == DetectionKind::Suspicious)
            .map(|e| &e.detection)
    }

    /// Tagged entries, input order
    pub fn entries(&self) -> &[ClassifiedDetection] {
        &self.entries
    }

    /// True when no detections were classified
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Partition raw detections into semantic buckets.
///
/// One linear pass; each detection is tagged via a single taxonomy lookup.
/// Persons are counted but never enter the suspicious or prohibited
/// buckets; classes outside the taxonomy are kept as untracked so they
/// still appear in `all()`. An empty input is a valid empty result.
pub fn classify_detections(detections: Vec<Detection>, taxonomy: &Taxonomy) -> ClassifiedDetections {
    let mut entries = Vec::with_capacity(detections.len());
    let mut person_count = 0;

    for detection in detections {
        let kind = taxonomy.kind_of(detection.class_id);
        if kind == DetectionKind::Person {
            person_count += 1;
        }
        entries.push(ClassifiedDetection { detection, kind });
    }

    ClassifiedDetections {
        entries,
        person_count,
    }
}
