use std::{fs::File, io::BufReader, path::Path};

use crate::{
    foundation::error::{StageError, StageResult},
    layers::section::LayerConfig,
    reveal::{hysteresis::Hysteresis, sequencer::RevealTiming},
    scroll::{segment::SegmentDef, tracker::TrackingMode},
    shutter::machine::ShutterConfig,
};

/// Text reveal attached to a section.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealDef {
    /// Copy to split into word units.
    pub text: String,
    /// Hide below this progress.
    #[serde(default = "default_lower")]
    pub lower: f64,
    /// Reveal above this progress.
    #[serde(default = "default_upper")]
    pub upper: f64,
    /// Delay, stagger and motion.
    #[serde(default)]
    pub timing: RevealTiming,
}

fn default_lower() -> f64 {
    0.3
}

fn default_upper() -> f64 {
    0.6
}

impl RevealDef {
    /// Threshold band, validated.
    pub fn band(&self) -> StageResult<Hysteresis> {
        Hysteresis::new(self.lower, self.upper)
    }
}

/// One full-viewport section of the page, in stacking order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionDef {
    /// Human-readable name, used in logs and CLI output.
    pub name: String,
    /// Scroll window over which the section enters. `None` means always fully entered.
    #[serde(default)]
    pub enter: Option<SegmentDef>,
    /// Optional staggered text reveal.
    #[serde(default)]
    pub reveal: Option<RevealDef>,
}

/// Everything tunable about a stage, loadable from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Sections bottom to top.
    pub sections: Vec<SectionDef>,
    /// Layer mapping tunables.
    pub layer: LayerConfig,
    /// Shutter timings.
    pub shutter: ShutterConfig,
    /// Progress smoothing.
    pub tracking: TrackingMode,
    /// Quiet period before a viewport change is applied.
    pub resize_debounce_ms: u64,
}

impl Default for StageConfig {
    fn default() -> Self {
        let section = |name: &str, start_vh: Option<f64>, text: &str, upper: f64| SectionDef {
            name: name.to_owned(),
            enter: start_vh.map(|start_vh| SegmentDef {
                start_vh,
                length_vh: 1.0,
            }),
            reveal: Some(RevealDef {
                text: text.to_owned(),
                lower: 0.3,
                upper,
                timing: RevealTiming::default(),
            }),
        };
        Self {
            sections: vec![
                section("hero", None, "Made to be worn", 0.6),
                section("collection", Some(0.0), "The autumn collection", 0.6),
                section("craft", Some(1.0), "Cut and sewn by hand", 0.7),
                section("lookbook", Some(2.0), "Seen on the street", 0.6),
                section("visit", Some(3.0), "Find us in store", 0.7),
            ],
            layer: LayerConfig::default(),
            shutter: ShutterConfig::default(),
            tracking: TrackingMode::default(),
            resize_debounce_ms: 150,
        }
    }
}

impl StageConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> StageResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| StageError::serde(format!("parse stage config JSON: {e}")))
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> StageResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| StageError::serde(format!("parse stage config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> StageResult<Self> {
        let f = File::open(path).map_err(|e| {
            StageError::config(format!("open stage config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Total page length in viewport heights.
    pub fn total_vh(&self) -> f64 {
        self.sections.len() as f64
    }

    /// Check every section and tunable.
    pub fn validate(&self) -> StageResult<()> {
        if self.sections.is_empty() {
            return Err(StageError::config("stage needs at least one section"));
        }
        let max_scroll_vh = self.total_vh() - 1.0;
        for (i, s) in self.sections.iter().enumerate() {
            if let Some(enter) = &s.enter {
                enter
                    .validate()
                    .map_err(|e| StageError::config(format!("section {i} '{}': {e}", s.name)))?;
                let end = enter.start_vh + enter.length_vh;
                if end > max_scroll_vh + f64::EPSILON {
                    return Err(StageError::config(format!(
                        "section {i} '{}' finishes entering at {end}vh, past the last scroll position {max_scroll_vh}vh",
                        s.name
                    )));
                }
            }
            if let Some(reveal) = &s.reveal {
                reveal
                    .band()
                    .and_then(|_| reveal.timing.validate())
                    .map_err(|e| StageError::config(format!("section {i} '{}': {e}", s.name)))?;
            }
        }
        self.layer.validate()?;
        self.shutter.validate()?;
        self.tracking.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/config.rs"]
mod tests;
