pub mod analysis;
pub mod tokenizer;

pub use analysis::{AnalysisReport, DetectorFindings, DetectorRunner};
pub use tokenizer::{
    HashingEncoder, SequenceEncoder, TokenSequence, BOS_TOKEN_ID, DEFAULT_SEQUENCE_LENGTH,
    EOS_TOKEN_ID, PAD_TOKEN_ID, VOCAB_SIZE,
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{ContractExtractor, ContractGraph, ContractScanner, ExtractionCache};

/// One dataset record: everything downstream training needs for one
/// contract. `analysis` is `None` when the detector was skipped or
/// unavailable, which serializes as JSON null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractRecord {
    pub file_name: String,
    pub tokens: TokenSequence,
    pub analysis: Option<AnalysisReport>,
    pub graph: ContractGraph,
}

/// Batch orchestrator: scan, extract (through the cache), encode, and
/// optionally label every contract under an input path. Collaborators are
/// borrowed, not owned; the builder holds no model or detector state of
/// its own.
pub struct DatasetBuilder<'a> {
    contract_scanner: ContractScanner,
    extractor: ContractExtractor,
    extraction_cache: ExtractionCache,
    encoder: &'a dyn SequenceEncoder,
    detector: Option<&'a DetectorRunner>,
}

impl<'a> DatasetBuilder<'a> {
    pub fn new(encoder: &'a dyn SequenceEncoder) -> Self {
        Self {
            contract_scanner: ContractScanner::new(),
            extractor: ContractExtractor::new(),
            extraction_cache: ExtractionCache::new(None).unwrap_or_else(|err| {
                eprintln!("Warning: Failed to initialize disk extraction cache: {err}");
                ExtractionCache::in_memory_only()
            }),
            encoder,
            detector: None,
        }
    }

    pub fn with_detector(mut self, detector: &'a DetectorRunner) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Builds records for every contract under `input` (a directory or a
    /// single contract file). Files are processed in parallel; records keep
    /// scan order. A file that cannot be read is reported and skipped, never
    /// fatal to the batch.
    pub fn build(&self, input: &Path) -> Result<Vec<ContractRecord>> {
        println!("Scanning for contracts...");
        let contracts = if input.is_file() {
            vec![input.to_path_buf()]
        } else {
            self.contract_scanner.scan_directory(input)?
        };
        println!("Found {} contract files", contracts.len());

        let results: Vec<(PathBuf, Result<ContractRecord>)> = contracts
            .into_par_iter()
            .map(|path| {
                let record = self.process_contract(&path);
                (path, record)
            })
            .collect();

        let mut records = Vec::with_capacity(results.len());
        for (path, result) in results {
            match result {
                Ok(record) => records.push(record),
                Err(err) => eprintln!("Warning: Skipping {}: {}", path.display(), err),
            }
        }
        println!("Assembled {} dataset records", records.len());

        Ok(records)
    }

    /// Builds the record for one contract. An unreadable file is the only
    /// error; the caller decides whether to skip or abort.
    pub fn process_contract(&self, path: &Path) -> Result<ContractRecord> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read contract file: {}", path.display()))?;

        let tokens = self.encoder.encode(&source);
        let graph = self.cached_or_extracted(path, &source);
        let analysis = self.detector.and_then(|runner| runner.analyze(path));

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(ContractRecord {
            file_name,
            tokens,
            analysis,
            graph,
        })
    }

    fn cached_or_extracted(&self, path: &Path, source: &str) -> ContractGraph {
        match self.extraction_cache.needs_update(path) {
            Ok(false) => {
                if let Some(graph) = self.extraction_cache.get(path) {
                    return graph;
                }
            }
            Ok(true) => {}
            Err(err) => {
                eprintln!(
                    "Warning: Failed to validate cache entry for {}: {}",
                    path.display(),
                    err
                );
            }
        }

        let graph = self.extractor.extract_source(source);
        if let Err(err) = self.extraction_cache.store(path, &graph) {
            eprintln!("Warning: Failed to cache {}: {}", path.display(), err);
        }
        graph
    }
}

/// Writes a dataset as one JSON document, one record per contract.
pub struct DatasetWriter {
    pretty: bool,
}

impl DatasetWriter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn format(&self, records: &[ContractRecord]) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(records)?
        } else {
            serde_json::to_string(records)?
        };
        Ok(json)
    }

    pub fn format_to_file(&self, records: &[ContractRecord], output_path: &Path) -> Result<()> {
        let content = self.format(records)?;
        fs::write(output_path, content)
            .with_context(|| format!("Failed to write dataset to {}", output_path.display()))?;
        Ok(())
    }
}

impl Default for DatasetWriter {
    fn default() -> Self {
        Self::new()
    }
}
