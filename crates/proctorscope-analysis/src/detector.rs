//! Detector collaborator seam

use async_trait::async_trait;
use proctorscope_core::{Detection, Result};

/// Trait for object detector backends.
///
/// The detector owns image decoding and inference; the pipeline consumes
/// only its output contract, a list of [`Detection`] values. Backends
/// wrapping a non-reentrant resource (a single accelerator, a scripted
/// queue) must serialize internally: `detect` takes `&self` and may be
/// called from any number of in-flight requests.
#[async_trait]
pub trait Detector: Send + Sync {
    /// Backend identifier, surfaced in logs
    fn name(&self) -> &'static str;

    /// Decode the raw image bytes and run detection on them
    async fn detect(&self, image: &[u8]) -> Result<Vec<Detection>>;

    /// Optional warm-up hook, run once at startup
    async fn warm_up(&self) -> Result<()> {
        Ok(())
    }
}
