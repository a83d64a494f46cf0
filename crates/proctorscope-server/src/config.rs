//! Server configuration
//!
//! All values are resolved once at startup from CLI flags and their
//! environment fallbacks, then treated as immutable for the process
//! lifetime.

use clap::Parser;
use proctorscope_core::{Result, Taxonomy};

/// Command-line interface, with environment fallbacks matching the
/// deployment convention of the surrounding exam platform.
#[derive(Parser, Debug)]
#[command(name = "proctorscope-server")]
#[command(about = "ProctorScope exam snapshot analysis service", long_about = None)]
pub struct Cli {
    /// Minimum detector confidence for a detection to be reported
    #[arg(long, env = "CONFIDENCE_THRESHOLD", default_value_t = 0.4)]
    pub confidence_threshold: f32,

    /// Inference device label, surfaced in /health ("0" for GPU, "cpu")
    #[arg(long, env = "DEVICE", default_value = "cpu")]
    pub device: String,

    /// Taxonomy override file (YAML); COCO defaults when omitted
    #[arg(long, env = "TAXONOMY_FILE")]
    pub taxonomy: Option<String>,

    /// Listen address
    #[arg(short = 'l', long, default_value = "0.0.0.0")]
    pub listen: String,

    /// Listen port
    #[arg(short = 'P', long, env = "PORT", default_value_t = 8001)]
    pub port: u16,

    /// Allow any CORS origin (for explicit demo/dev use only)
    #[arg(long)]
    pub permissive_cors: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Confidence threshold handed to the detector backend
    pub confidence_threshold: f32,

    /// Device label reported by /health
    pub device: String,

    /// Listen address
    pub listen: String,

    /// Listen port
    pub port: u16,

    /// Permissive CORS toggle
    pub permissive_cors: bool,
}

impl ServerConfig {
    /// Resolve configuration from parsed CLI values
    pub fn resolve(cli: &Cli) -> Self {
        Self {
            confidence_threshold: cli.confidence_threshold,
            device: cli.device.clone(),
            listen: cli.listen.clone(),
            port: cli.port,
            permissive_cors: cli.permissive_cors,
        }
    }
}

/// Load the taxonomy: the override file when one is configured, the COCO
/// defaults otherwise. An invalid file fails startup.
pub fn load_taxonomy(path: Option<&str>) -> Result<Taxonomy> {
    match path {
        Some(path) => Taxonomy::from_yaml(path),
        None => Ok(Taxonomy::default()),
    }
}
