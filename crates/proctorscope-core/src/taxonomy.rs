//! Static detection taxonomy
//!
//! Maps detector class ids to the semantic categories the risk evaluator
//! works with. The taxonomy is process-wide, read-only configuration:
//! constructed once at startup (defaults or a YAML file) and passed
//! explicitly into the classifier, never consulted as global state.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};

/// Semantic category of a single detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionKind {
    /// The distinguished person class; counted, never flagged as an object
    Person,

    /// Prohibited object; presence alone is an integrity violation
    Prohibited,

    /// Suspicious but not prohibited object
    Suspicious,

    /// Class outside the taxonomy; reported, never flagged
    Untracked,
}

/// Class tables for exam-integrity classification
#[derive(Debug, Clone)]
pub struct Taxonomy {
    suspicious: HashMap<u32, String>,
    prohibited: HashMap<u32, String>,
    person_class: u32,
}

/// On-disk taxonomy file shape
#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    #[serde(default)]
    person_class: Option<u32>,
    suspicious: HashMap<u32, String>,
    prohibited: HashMap<u32, String>,
}

impl Taxonomy {
    /// Build a taxonomy from explicit tables, validating the invariants:
    /// every prohibited class must also be suspicious, and the person class
    /// must never be prohibited.
    pub fn new(
        suspicious: HashMap<u32, String>,
        prohibited: HashMap<u32, String>,
        person_class: u32,
    ) -> Result<Self> {
        for (id, label) in &prohibited {
            if !suspicious.contains_key(id) {
                return Err(Error::config(format!(
                    "prohibited class {id} ({label}) is not listed as suspicious"
                )));
            }
        }
        if prohibited.contains_key(&person_class) {
            return Err(Error::config(format!(
                "person class {person_class} must not be prohibited"
            )));
        }
        Ok(Self {
            suspicious,
            prohibited,
            person_class,
        })
    }

    /// Load a taxonomy override from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let file: TaxonomyFile = serde_yaml::from_str(&content)
            .map_err(|e| Error::config(format!("invalid taxonomy file: {e}")))?;
        Self::new(
            file.suspicious,
            file.prohibited,
            file.person_class.unwrap_or(0),
        )
    }

    /// Classify a detector class id into its semantic category
    pub fn kind_of(&self, class_id: u32) -> DetectionKind {
        if class_id == self.person_class {
            DetectionKind::Person
        } else if self.prohibited.contains_key(&class_id) {
            DetectionKind::Prohibited
        } else if self.suspicious.contains_key(&class_id) {
            DetectionKind::Suspicious
        } else {
            DetectionKind::Untracked
        }
    }

    /// The distinguished person class id
    pub fn person_class(&self) -> u32 {
        self.person_class
    }
}

impl Default for Taxonomy {
    /// COCO-indexed defaults for exam monitoring. "tv" covers second
    /// monitors/screens.
    fn default() -> Self {
        let suspicious = HashMap::from([
            (0, "person".to_string()),
            (62, "tv".to_string()),
            (63, "laptop".to_string()),
            (64, "mouse".to_string()),
            (66, "keyboard".to_string()),
            (67, "cell phone".to_string()),
            (73, "book".to_string()),
            (74, "clock".to_string()),
        ]);
        let prohibited = HashMap::from([
            (62, "tv".to_string()),
            (63, "laptop".to_string()),
            (67, "cell phone".to_string()),
            (73, "book".to_string()),
        ]);
        // Tables validated above; defaults cannot fail
        Self::new(suspicious, prohibited, 0).expect("default taxonomy is valid")
    }
}
