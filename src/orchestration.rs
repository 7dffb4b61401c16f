//! High-level generation pipeline.
//!
//! Lists the chain directory, reads and parses every document concurrently,
//! waits for all of them, then renders and writes the TypeScript module.
//! Documents that cannot be read or parsed are logged and skipped; only an
//! unreadable directory or a failed write stops the run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tokio::fs;
use tokio::task::JoinHandle;

use crate::chain::ChainConfig;
use crate::codegen::{emit_fragment, fs_utils, render_module, IdentifierCheck};
use crate::config::GeneratorConfig;
use crate::error::{GenerateError, SkipReason};
use crate::parser::parse_document;
use crate::schema::Schema;

/// A document queued for parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub path: PathBuf,
}

/// A chain that made it into the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedChain {
    pub file_name: String,
    #[serde(flatten)]
    pub chain: ChainConfig,
}

/// A document that was left out, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedDocument {
    pub file_name: String,
    pub reason: SkipReason,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    /// Chains in output order
    pub chains: Vec<ProcessedChain>,
    pub skipped: Vec<SkippedDocument>,
    /// Non-fatal problems with the generated code
    pub warnings: Vec<String>,
    /// Set once the module has been written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl GenerationReport {
    /// Display names of the processed chains, in output order.
    pub fn chain_names(&self) -> impl Iterator<Item = &str> {
        self.chains.iter().map(|processed| processed.chain.name.as_str())
    }

    pub fn has_skips(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Parse every document and write the generated module.
///
/// # Errors
/// [`GenerateError::DirectoryUnreadable`] if the chain directory cannot be
/// listed, [`GenerateError::WriteFailure`] if the module cannot be written.
pub async fn generate(config: &GeneratorConfig) -> Result<GenerationReport, GenerateError> {
    let mut report = validate(config).await?;

    let module = render_module(
        &config.header,
        report
            .chains
            .iter()
            .map(|processed| emit_fragment(&processed.chain, config.quote_style)),
    );

    fs_utils::write_output(&config.output, module)
        .await
        .map_err(|source| GenerateError::WriteFailure {
            path: config.output.clone(),
            source,
        })?;

    tracing::info!(
        output = %config.output.display(),
        chains = report.chains.len(),
        "Wrote chain module"
    );
    report.output = Some(config.output.clone());
    Ok(report)
}

/// Parse every document without writing anything.
pub async fn validate(config: &GeneratorConfig) -> Result<GenerationReport, GenerateError> {
    let documents = list_documents(&config.source_dir, config).await?;
    tracing::debug!(count = documents.len(), dir = %config.source_dir.display(), "Found chain documents");

    let schema = Arc::new(Schema::for_kind(config.schema));
    let outcomes = process_documents(documents, schema).await;

    let mut report = GenerationReport::default();
    for (document, outcome) in outcomes {
        match outcome {
            Ok(chain) => report.chains.push(ProcessedChain {
                file_name: document.file_name,
                chain,
            }),
            Err(reason) => {
                match &reason {
                    SkipReason::DocumentUnreadable(message) => {
                        tracing::error!(file = %document.file_name, "Unable to read '{}': {}", document.file_name, message);
                    }
                    SkipReason::InvalidRecord(invalid) => {
                        tracing::warn!(file = %document.file_name, "There is a mistake inside {}: {}", document.file_name, invalid);
                    }
                }
                report.skipped.push(SkippedDocument {
                    file_name: document.file_name,
                    reason,
                });
            }
        }
    }

    report.warnings = identifier_warnings(&report.chains);
    for warning in &report.warnings {
        tracing::warn!("{}", warning);
    }

    Ok(report)
}

/// List the documents in `dir`, minus excluded names and directories, sorted by file name.
pub async fn list_documents(dir: &Path, config: &GeneratorConfig) -> Result<Vec<Document>, GenerateError> {
    let unreadable = |source: std::io::Error| GenerateError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir).await.map_err(unreadable)?;
    let mut documents = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(unreadable)? {
        let path = entry.path();
        let file_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                tracing::warn!("Skipping non UTF-8 file name {:?}", raw);
                continue;
            }
        };

        if config.is_excluded(&file_name) {
            tracing::debug!(file = %file_name, "Excluded");
            continue;
        }

        // Follows symlinks. A broken link stays in the list and fails on read.
        if matches!(fs::metadata(&path).await, Ok(metadata) if metadata.is_dir()) {
            continue;
        }

        documents.push(Document { file_name, path });
    }

    documents.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(documents)
}

/// Read and parse every document on its own task, then wait for all of them.
///
/// Outcomes are returned in the order of `documents`, whatever order the
/// tasks finish in.
pub async fn process_documents(
    documents: Vec<Document>,
    schema: Arc<Schema>,
) -> Vec<(Document, Result<ChainConfig, SkipReason>)> {
    let handles: Vec<(Document, JoinHandle<Result<ChainConfig, SkipReason>>)> = documents
        .into_iter()
        .map(|document| {
            let path = document.path.clone();
            let schema = Arc::clone(&schema);
            let handle = tokio::spawn(async move {
                let bytes = fs::read(&path)
                    .await
                    .map_err(|e| SkipReason::DocumentUnreadable(e.to_string()))?;
                // Invalid UTF-8 becomes U+FFFD rather than skipping the document.
                let content = String::from_utf8_lossy(&bytes);
                parse_document(&content, &schema).map_err(SkipReason::from)
            });
            (document, handle)
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (document, handle) in handles {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(SkipReason::DocumentUnreadable(format!("parse task failed: {}", e))),
        };
        outcomes.push((document, outcome));
    }
    outcomes
}

/// Duplicate and malformed constant names. Neither is fixed up; both end up
/// in the output as-is.
fn identifier_warnings(chains: &[ProcessedChain]) -> Vec<String> {
    let check = IdentifierCheck::new();
    let mut seen: HashMap<&str, &str> = HashMap::new();
    let mut warnings = Vec::new();

    for processed in chains {
        let identifier = processed.chain.object_name.as_str();

        if !check.is_valid(identifier) {
            warnings.push(format!(
                "'{}' from {} is not a valid TypeScript identifier",
                identifier, processed.file_name
            ));
        }

        if let Some(first) = seen.insert(identifier, &processed.file_name) {
            warnings.push(format!(
                "'{}' is declared by both {} and {}",
                identifier, first, processed.file_name
            ));
        }
    }

    warnings
}
