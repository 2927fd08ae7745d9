//! File-level driver behind the CLI: collects template trees, rewrites them in
//! parallel, writes the results and an optional manifest.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::args::{PipeArgs, RewriteArgs};
use crate::config::{MigratorConfig, SecurityConfig};
use crate::errors::{MigratorError, Result};
use crate::manifest::{Manifest, ManifestBuilder};
use crate::transform::{transform_source, TransformConfig};
use crate::walker::RewriteStats;

/// Performance statistics
#[derive(Debug, Clone)]
pub struct PerformanceStats {
    pub total_duration: Duration,
    pub rewrite_duration: Duration,
    pub files_per_second: f64,
    pub bytes_processed: u64,
}

/// One rewritten template tree
#[derive(Debug, Clone)]
pub struct RewrittenFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub content: String,
    pub stats: RewriteStats,
}

/// Result of a rewrite run
#[derive(Debug)]
pub struct RewriteResult {
    pub files: Vec<RewrittenFile>,
    pub manifest: Manifest,
    pub total_files_processed: usize,
    pub total_directives_rewritten: usize,
    pub performance_stats: Option<PerformanceStats>,
}

/// Rewrite every template tree matched by `args`
pub async fn rewrite(args: RewriteArgs) -> Result<RewriteResult> {
    let start_time = Instant::now();

    args.validate().map_err(MigratorError::InvalidInput)?;

    let config = match &args.config {
        Some(path) => MigratorConfig::from_file(path)?,
        None => MigratorConfig::default(),
    };
    let cli_config = MigratorConfig {
        content: args.input.clone(),
        exclude: args.exclude.clone(),
        ..config.clone()
    };
    let config = cli_config.merge(config);
    let pretty = config.output.pretty && !args.compact;

    if args.verbose {
        eprintln!("Starting Flex-Layout migration...");
        eprintln!("Input patterns: {:?}", config.content);
        match &args.out_dir {
            Some(dir) => eprintln!("Output directory: {}", dir.display()),
            None => eprintln!("Rewriting files in place"),
        }
        eprintln!("Security: max file size = {} MB", config.security.max_file_size / (1024 * 1024));
    }

    let files = collect_files_with_security(&config.content, &config.exclude, &config.security)?;
    if files.is_empty() {
        return Err(MigratorError::NoFilesFound);
    }

    let destinations = plan_destinations(&files, &args)?;
    let bytes_processed: u64 = files.iter().map(|(_, size)| size).sum();

    if args.verbose {
        eprintln!("Found {} files to rewrite", files.len());
        eprintln!("Total size: {:.2} MB", bytes_processed as f64 / (1024.0 * 1024.0));
    }

    let multi_progress = if !args.verbose {
        MultiProgress::new()
    } else {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    };
    let progress_bar = if !args.verbose {
        let pb = multi_progress.add(ProgressBar::new(files.len() as u64));
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({msg})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        pb.set_message("Starting rewrite...");
        Some(pb)
    } else {
        None
    };

    let manifest_builder = ManifestBuilder::new().start_timing();
    let rewrite_start = Instant::now();

    let jobs: Vec<(PathBuf, PathBuf)> = files
        .iter()
        .map(|(path, _)| path.clone())
        .zip(destinations)
        .collect();
    let rewritten = rewrite_files_parallel(&jobs, args.jobs, pretty, progress_bar.as_ref())?;
    let rewrite_duration = rewrite_start.elapsed();

    let manifest_builder = rewritten.iter().fold(manifest_builder, |builder, file| {
        builder.add_file(&file.source.display().to_string(), &file.stats)
    });
    let manifest = manifest_builder.build(files.len());

    if !args.dry_run {
        write_outputs(&rewritten, args.in_place)?;
        if let Some(manifest_path) = &args.manifest {
            write_manifest(manifest_path, &manifest, args.compact)?;
        }
    }

    let total_duration = start_time.elapsed();
    let stats = PerformanceStats {
        total_duration,
        rewrite_duration,
        files_per_second: files.len() as f64 / total_duration.as_secs_f64().max(f64::EPSILON),
        bytes_processed,
    };

    if let Some(pb) = progress_bar {
        pb.finish_with_message(format!("✓ Complete ({:.1} files/sec)", stats.files_per_second));
    }

    let result = RewriteResult {
        total_files_processed: rewritten.len(),
        total_directives_rewritten: manifest.metadata.directives_rewritten,
        files: rewritten,
        manifest,
        performance_stats: Some(stats.clone()),
    };

    if args.verbose {
        eprintln!("\nMigration complete:");
        eprintln!(
            "  - Processed {} files ({} changed)",
            result.total_files_processed, result.manifest.metadata.files_changed
        );
        eprintln!("  - Rewrote {} directives", result.total_directives_rewritten);
        eprintln!("  - Rewrote {} bindings", result.manifest.metadata.bindings_rewritten);
        eprintln!("\nPerformance:");
        eprintln!("  - Total time: {:.2}s", stats.total_duration.as_secs_f64());
        eprintln!("  - Rewrite: {:.2}s", stats.rewrite_duration.as_secs_f64());
        eprintln!("  - Processing rate: {:.1} files/sec", stats.files_per_second);
    }

    Ok(result)
}

/// Check if a file is safe to read
fn validate_input_file(path: &Path, security: &SecurityConfig) -> Result<()> {
    if path.is_symlink() {
        if !security.allow_symlinks {
            return Err(MigratorError::SecurityError(format!(
                "Symbolic link not allowed: {}",
                path.display()
            )));
        }

        let target = fs::canonicalize(path).map_err(|e| {
            MigratorError::SecurityError(format!(
                "Cannot resolve symlink target for '{}': {}",
                path.display(),
                e
            ))
        })?;
        let working_dir = security
            .working_directory
            .canonicalize()
            .unwrap_or_else(|_| security.working_directory.clone());

        if !target.starts_with(&working_dir) {
            return Err(MigratorError::SecurityError(format!(
                "Symlink target '{}' is outside working directory",
                target.display()
            )));
        }
    }

    let metadata = fs::metadata(path).map_err(|e| {
        MigratorError::SecurityError(format!(
            "Cannot read file metadata for '{}': {}",
            path.display(),
            e
        ))
    })?;

    if metadata.len() > security.max_file_size {
        return Err(MigratorError::SecurityError(format!(
            "File '{}' exceeds maximum size limit ({} MB > {} MB)",
            path.display(),
            metadata.len() / (1024 * 1024),
            security.max_file_size / (1024 * 1024)
        )));
    }

    Ok(())
}

/// Collect files matching the given patterns with security checks
fn collect_files_with_security(
    patterns: &[String],
    exclude_patterns: &[String],
    security: &SecurityConfig,
) -> Result<Vec<(PathBuf, u64)>> {
    let exclude = exclude_patterns
        .iter()
        .map(|pattern| glob::Pattern::new(pattern))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut files = Vec::new();
    let mut seen = HashSet::new();
    let mut skipped_count = 0;

    for pattern in patterns {
        for entry in glob::glob(pattern)? {
            let path = entry?;

            if exclude.iter().any(|pattern| pattern.matches_path(&path)) || path.is_dir() {
                continue;
            }

            if let Err(e) = validate_input_file(&path, security) {
                warn!("Skipping file - {}", e);
                skipped_count += 1;
                continue;
            }

            let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            if seen.insert(path.clone()) {
                files.push((path, size));
            }
        }
    }

    if skipped_count > 0 {
        warn!("Skipped {} files due to security constraints", skipped_count);
    }

    Ok(files)
}

/// Decide where each rewritten tree goes
fn plan_destinations(files: &[(PathBuf, u64)], args: &RewriteArgs) -> Result<Vec<PathBuf>> {
    let Some(out_dir) = &args.out_dir else {
        return Ok(files.iter().map(|(path, _)| path.clone()).collect());
    };

    let mut taken = HashSet::new();
    files
        .iter()
        .map(|(path, _)| {
            let file_name = path.file_name().ok_or_else(|| {
                MigratorError::InvalidInput(format!("'{}' has no file name", path.display()))
            })?;
            let destination = out_dir.join(file_name);
            if !taken.insert(destination.clone()) {
                return Err(MigratorError::InvalidInput(format!(
                    "Several inputs would be written to '{}'",
                    destination.display()
                )));
            }
            Ok(destination)
        })
        .collect()
}

/// Rewrite files on a dedicated thread pool, ticking the progress bar
fn rewrite_files_parallel(
    jobs: &[(PathBuf, PathBuf)],
    threads: Option<usize>,
    pretty: bool,
    progress_bar: Option<&ProgressBar>,
) -> Result<Vec<RewrittenFile>> {
    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = threads {
        pool = pool.num_threads(threads);
    }
    let pool = pool
        .build()
        .map_err(|e| MigratorError::InvalidInput(format!("Cannot start worker threads: {}", e)))?;

    pool.install(|| {
        jobs.par_iter()
            .map(|(source, destination)| {
                let result = rewrite_file(source, destination, pretty);
                if let Some(pb) = progress_bar {
                    pb.inc(1);
                    pb.set_message(format!(
                        "Rewriting: {}",
                        source.file_name().unwrap_or_default().to_string_lossy()
                    ));
                }
                result
            })
            .collect()
    })
}

fn rewrite_file(source: &Path, destination: &Path, pretty: bool) -> Result<RewrittenFile> {
    let input = fs::read_to_string(source)?;
    let config = TransformConfig {
        pretty,
        source_name: Some(source.display().to_string()),
    };
    let (content, stats) = transform_source(&input, &config)?;
    debug!(
        file = %source.display(),
        directives = stats.directives_rewritten,
        "rewrote file"
    );

    Ok(RewrittenFile {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        content,
        stats,
    })
}

/// Write rewritten trees; unchanged inputs are not touched when rewriting in place
fn write_outputs(files: &[RewrittenFile], in_place: bool) -> Result<()> {
    for file in files {
        if in_place && file.stats.is_unchanged() {
            continue;
        }
        if let Some(parent) = file.destination.parent() {
            fs::create_dir_all(parent)?;
        }
        write_atomic(&file.destination, &file.content).map_err(|e| MigratorError::OutputError {
            path: file.destination.display().to_string(),
            message: e.to_string(),
        })?;
    }
    Ok(())
}

fn write_manifest(path: &Path, manifest: &Manifest, compact: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = if compact {
        manifest.to_compact_json()?
    } else {
        manifest.to_pretty_json()?
    };
    write_atomic(path, &content).map_err(|e| MigratorError::OutputError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Write file atomically by writing to temp file then renaming
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    use std::io::Write;

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;

    fs::rename(&temp_path, path)
}

/// Handle pipe command - read a template tree from stdin, write the rewritten tree to stdout
pub async fn handle_pipe_command(args: PipeArgs) -> Result<()> {
    use tokio::io::{self, AsyncReadExt, AsyncWriteExt};

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .await
        .map_err(|e| MigratorError::InputError(format!("Failed to read from stdin: {}", e)))?;

    if input.trim().is_empty() {
        return Ok(());
    }

    let config = TransformConfig {
        pretty: !args.compact,
        source_name: Some("stdin".to_string()),
    };
    let (mut output, stats) = transform_source(&input, &config)?;
    output.push('\n');
    debug!(directives = stats.directives_rewritten, "rewrote stdin tree");

    let mut stdout = io::stdout();
    stdout
        .write_all(output.as_bytes())
        .await
        .map_err(|e| MigratorError::OutputError {
            path: "stdout".to_string(),
            message: e.to_string(),
        })?;
    stdout.flush().await.map_err(|e| MigratorError::OutputError {
        path: "stdout".to_string(),
        message: e.to_string(),
    })?;

    Ok(())
}
