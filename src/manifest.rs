use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use chrono::{DateTime, Utc};

use crate::walker::RewriteStats;

/// Metadata for the generated manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// Version of the manifest format
    pub version: String,

    /// Timestamp when the manifest was generated
    pub generated_at: DateTime<Utc>,

    /// Number of files processed
    pub files_processed: usize,

    /// Number of files in which anything was rewritten
    pub files_changed: usize,

    /// Number of elements whose attributes were folded
    pub elements_visited: usize,

    /// Number of plain directives consumed into utility classes
    pub directives_rewritten: usize,

    /// Number of bound directives turned into class bindings
    pub bindings_rewritten: usize,

    /// Migrator version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrator_version: Option<String>,
}

/// Usage information for one directive name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestDirectiveInfo {
    /// Number of occurrences rewritten
    pub count: usize,

    /// Files the directive was found in
    pub files: Vec<String>,
}

/// Complete manifest structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Metadata about the run
    pub metadata: ManifestMetadata,

    /// Map of directive names to their usage information
    pub directives: IndexMap<String, ManifestDirectiveInfo>,

    /// Statistics about the run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ManifestStatistics>,
}

/// Statistics about the rewrite process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestStatistics {
    /// Number of files that matched patterns
    pub files_matched: usize,

    /// Processing time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,

    /// Most frequently rewritten directives
    pub top_directives: Vec<TopDirective>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopDirective {
    pub name: String,
    pub count: usize,
    pub file_count: usize,
}

impl Manifest {
    /// Create a new manifest with default metadata
    pub fn new() -> Self {
        Self {
            metadata: ManifestMetadata {
                version: "1.0.0".to_string(),
                generated_at: Utc::now(),
                files_processed: 0,
                files_changed: 0,
                elements_visited: 0,
                directives_rewritten: 0,
                bindings_rewritten: 0,
                migrator_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            },
            directives: IndexMap::new(),
            statistics: None,
        }
    }

    /// Record the result of rewriting one file
    pub fn add_file(&mut self, file: &str, stats: &RewriteStats) {
        self.metadata.files_processed += 1;
        if !stats.is_unchanged() {
            self.metadata.files_changed += 1;
        }
        self.metadata.elements_visited += stats.elements_visited;
        self.metadata.directives_rewritten += stats.directives_rewritten;
        self.metadata.bindings_rewritten += stats.bindings_rewritten;

        for (name, count) in &stats.directives {
            let entry = self
                .directives
                .entry(name.clone())
                .or_insert_with(|| ManifestDirectiveInfo {
                    count: 0,
                    files: Vec::new(),
                });

            entry.count += count;
            if !entry.files.iter().any(|f| f == file) {
                entry.files.push(file.to_string());
            }
        }
    }

    /// Calculate and set statistics
    pub fn calculate_statistics(&mut self, files_matched: usize, processing_time_ms: Option<u64>) {
        let mut top: Vec<_> = self.directives.iter()
            .map(|(name, info)| TopDirective {
                name: name.clone(),
                count: info.count,
                file_count: info.files.len(),
            })
            .collect();

        // Stable sort keeps first-seen order among equal counts
        top.sort_by(|a, b| b.count.cmp(&a.count));
        top.truncate(10);

        self.statistics = Some(ManifestStatistics {
            files_matched,
            processing_time_ms,
            top_directives: top,
        });
    }

    /// Convert manifest to pretty JSON string
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert manifest to compact JSON string
    pub fn to_compact_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder pattern for creating manifests
pub struct ManifestBuilder {
    manifest: Manifest,
    start_time: Option<std::time::Instant>,
}

impl ManifestBuilder {
    /// Create a new manifest builder
    pub fn new() -> Self {
        Self {
            manifest: Manifest::new(),
            start_time: None,
        }
    }

    /// Start timing the rewrite process
    pub fn start_timing(mut self) -> Self {
        self.start_time = Some(std::time::Instant::now());
        self
    }

    /// Record one rewritten file
    pub fn add_file(mut self, file: &str, stats: &RewriteStats) -> Self {
        self.manifest.add_file(file, stats);
        self
    }

    /// Build the final manifest
    pub fn build(mut self, files_matched: usize) -> Manifest {
        let processing_time_ms = self.start_time
            .map(|start| start.elapsed().as_millis() as u64);

        self.manifest.calculate_statistics(files_matched, processing_time_ms);
        self.manifest
    }
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
