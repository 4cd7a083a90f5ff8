use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursive scanner for Solidity sources. Only files with the exact
/// extension `sol` are kept.
pub struct ContractScanner;

impl ContractScanner {
    pub fn new() -> Self {
        Self
    }

    /// Walks `root_path` and returns every contract file, sorted by path so
    /// batch output is reproducible regardless of directory listing order.
    pub fn scan_directory(&self, root_path: &Path) -> Result<Vec<PathBuf>> {
        // Collect all entries first for parallel processing
        let entries: Vec<_> = WalkDir::new(root_path)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.path().is_file())
            .collect();

        let mut contracts: Vec<PathBuf> = entries
            .par_iter()
            .filter_map(|entry| {
                let path = entry.path();
                match path.extension().and_then(|ext| ext.to_str()) {
                    Some("sol") => Some(path.to_path_buf()),
                    _ => None,
                }
            })
            .collect();

        contracts.sort();
        Ok(contracts)
    }
}
