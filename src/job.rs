//! JSON description of a single composite, as consumed by the `overlay job` subcommand.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::core::Placement;
use crate::foundation::error::{OverlayError, OverlayResult};

/// One foreground-over-background composite read from JSON.
///
/// ```json
/// { "background": "bg.png", "foreground": "fg.png", "out": "out.png",
///   "opacity": 0.75, "placement": { "x": 10, "y": -4 } }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositeJob {
    pub background: PathBuf,
    pub foreground: PathBuf,
    pub out: PathBuf,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub placement: Placement,
}

fn default_opacity() -> f64 {
    1.0
}

impl CompositeJob {
    /// Parse and validate a job from a JSON reader. Paths are kept as written.
    pub fn from_reader<R: std::io::Read>(r: R) -> OverlayResult<Self> {
        let job: Self = serde_json::from_reader(r)
            .map_err(|e| OverlayError::serde(format!("parse composite job JSON: {e}")))?;
        job.validate()?;
        Ok(job)
    }

    /// Parse a job file; relative paths are resolved against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> OverlayResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            OverlayError::validation(format!("open composite job JSON '{}': {e}", path.display()))
        })?;
        let job = Self::from_reader(BufReader::new(f))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(job.resolve_paths(base))
    }

    pub fn validate(&self) -> OverlayResult<()> {
        for (field, p) in [
            ("background", &self.background),
            ("foreground", &self.foreground),
            ("out", &self.out),
        ] {
            if p.as_os_str().is_empty() {
                return Err(OverlayError::validation(format!(
                    "composite job '{field}' path must not be empty"
                )));
            }
        }
        if !self.opacity.is_finite() {
            return Err(OverlayError::validation(format!(
                "composite job 'opacity' must be finite, got {}",
                self.opacity
            )));
        }
        Ok(())
    }

    pub fn resolve_paths(self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        Self {
            background: resolve(self.background),
            foreground: resolve(self.foreground),
            out: resolve(self.out),
            ..self
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/job.rs"]
mod tests;
