use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Envelope of the external detector's JSON report. Finding payloads stay
/// opaque `serde_json::Value`s; the dataset carries them through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub results: DetectorFindings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectorFindings {
    #[serde(default)]
    pub detectors: Vec<serde_json::Value>,
}

impl AnalysisReport {
    #[allow(dead_code)]
    pub fn finding_count(&self) -> usize {
        self.results.detectors.len()
    }
}

/// Runs an external static analyzer over one contract and parses its JSON
/// report. Every failure mode (missing tool, no report, unreadable report)
/// degrades to `None` with a warning, so a batch never aborts because the
/// analyzer is absent.
pub struct DetectorRunner {
    program: String,
}

impl DetectorRunner {
    pub fn new(program: String) -> Self {
        Self { program }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Analysis result for one contract, or `None` when unavailable.
    pub fn analyze(&self, contract: &Path) -> Option<AnalysisReport> {
        match self.run_detector(contract) {
            Ok(report) => Some(report),
            Err(err) => {
                eprintln!(
                    "Warning: {} analysis unavailable for {}: {}",
                    self.program,
                    contract.display(),
                    err
                );
                None
            }
        }
    }

    fn run_detector(&self, contract: &Path) -> Result<AnalysisReport> {
        let report_path = self.report_path(contract);
        // A stale report from an earlier run must not be mistaken for output
        let _ = fs::remove_file(&report_path);

        Command::new(&self.program)
            .arg(contract)
            .arg("--json")
            .arg(&report_path)
            .output()
            .with_context(|| format!("Failed to run {}", self.program))?;

        // The detector signals findings through its exit code; success is
        // judged by the report file, not the status
        let data = fs::read(&report_path)
            .with_context(|| format!("{} produced no report", self.program))?;
        let _ = fs::remove_file(&report_path);
        if data.is_empty() {
            bail!("{} produced an empty report", self.program);
        }

        let report: AnalysisReport = serde_json::from_slice(&data)
            .with_context(|| format!("{} produced an unreadable report", self.program))?;
        Ok(report)
    }

    /// Per-contract report path under the system temp dir, so parallel
    /// batches never share a report file.
    fn report_path(&self, contract: &Path) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        contract.hash(&mut hasher);
        std::env::temp_dir().join(format!("solgraph_report_{:x}.json", hasher.finish()))
    }
}
