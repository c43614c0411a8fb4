//! snappy-cli - Command-line interface for snappy-block
//!
//! A command-line tool for compressing and decompressing files in the Snappy
//! block format. Each input file becomes one block in the output directory.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use snappy_block::{
    compress_with_stats, decompress_with_stats, decompressed_len, CompressionLevel,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Extension appended to compressed files
const SNAPPY_EXTENSION: &str = "snappy";

/// Extension appended to extracted files whose name has no extension
const UNSNAPPY_EXTENSION: &str = "unsnappy";

#[derive(Parser)]
#[command(name = "snappy-cli")]
#[command(about = "A CLI tool for Snappy block compression and decompression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, visible_alias = "silent", short_alias = 's', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress files to Snappy format
    #[command(visible_alias = "c")]
    Compress {
        /// Files to compress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output directory (defaults to the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compression level
        #[arg(short, long, value_enum, default_value_t = CliCompressionLevel::Default)]
        level: CliCompressionLevel,

        /// Force overwrite of output files
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress Snappy format files
    #[command(visible_alias = "x")]
    Decompress {
        /// Files to decompress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output directory (defaults to the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite of output files
        #[arg(short, long)]
        force: bool,
    },

    /// Get information about a compressed file
    Info {
        /// Compressed file to analyze
        input: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CliCompressionLevel {
    /// Record only match ends in the hash table
    Fast,
    /// Record every matched position - Default
    Default,
}

impl From<CliCompressionLevel> for CompressionLevel {
    fn from(level: CliCompressionLevel) -> Self {
        match level {
            CliCompressionLevel::Fast => CompressionLevel::Fast,
            CliCompressionLevel::Default => CompressionLevel::Default,
        }
    }
}

/// Direction of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Compress(CompressionLevel),
    Decompress,
}

/// Output options shared by every file of a batch
#[derive(Debug, Clone, Copy)]
struct BatchOptions {
    force: bool,
    verbose: bool,
    quiet: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let options = BatchOptions {
        force: false,
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Compress {
            files,
            output,
            level,
            force,
        } => process_batch(
            &files,
            output.as_deref(),
            Operation::Compress(level.into()),
            BatchOptions { force, ..options },
        ),
        Commands::Decompress {
            files,
            output,
            force,
        } => process_batch(
            &files,
            output.as_deref(),
            Operation::Decompress,
            BatchOptions { force, ..options },
        ),
        Commands::Info { input } => show_file_info(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Resolve the output directory, creating it if needed
fn resolve_output_dir(output: Option<&Path>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dir = match output {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };

    if !dir.exists() {
        log::info!("creating output directory '{}'", dir.display());
        fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

/// Name of the file produced for `input`
///
/// Compression appends `.snappy`. Extraction strips the last extension, or
/// appends `.unsnappy` when the name has none.
fn output_file_name(input: &Path, operation: Operation) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();

    match operation {
        Operation::Compress(_) => {
            let mut name = file_name;
            name.push(".");
            name.push(SNAPPY_EXTENSION);
            PathBuf::from(name)
        }
        Operation::Decompress => {
            let path = PathBuf::from(&file_name);
            match (path.extension(), path.file_stem()) {
                (Some(_), Some(stem)) => PathBuf::from(stem),
                _ => path.with_extension(UNSNAPPY_EXTENSION),
            }
        }
    }
}

/// Compress or decompress every file, continuing past per-file failures
fn process_batch(
    files: &[PathBuf],
    output: Option<&Path>,
    operation: Operation,
    options: BatchOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = resolve_output_dir(output)?;

    // Show progress bar for batches
    let progress = if !options.quiet && files.len() > 1 {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut failures = 0usize;
    for input in files {
        let target = output_dir.join(output_file_name(input, operation));

        if let Some(ref pb) = progress {
            pb.set_message(input.display().to_string());
        }

        let result = match operation {
            Operation::Compress(level) => compress_file(input, &target, level, options),
            Operation::Decompress => decompress_file(input, &target, options),
        };

        if let Err(e) = result {
            failures += 1;
            log::warn!("skipping '{}': {}", input.display(), e);
            eprintln!("Error: {}: {}", input.display(), e);
        }

        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message("done");
    }

    match failures {
        0 => Ok(()),
        n => Err(format!("{} of {} files failed", n, files.len()).into()),
    }
}

/// Refuse to clobber an existing output unless forced
fn check_paths(
    input: &Path,
    output: &Path,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Check if input file exists
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    // Check if output file exists and force flag
    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }

    Ok(())
}

fn compress_file(
    input: &Path,
    output: &Path,
    level: CompressionLevel,
    options: BatchOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, options.force)?;

    if options.verbose {
        println!(
            "Compressing '{}' to '{}'",
            input.display(),
            output.display()
        );
        println!("Level: {:?}", level);
    }

    let start_time = Instant::now();

    // Read input file
    let input_data = fs::read(input)?;
    if input_data.len() as u64 > snappy_block::MAX_INPUT_SIZE {
        return Err(snappy_block::SnappyError::InputTooLarge(input_data.len() as u64).into());
    }

    let (compressed_data, stats) = compress_with_stats(&input_data, level);

    // Write output file
    fs::write(output, &compressed_data)?;

    if !options.quiet {
        println!("✓ Compressed '{}'", input.display());
        println!("  Input:  {} bytes", stats.input_bytes);
        println!("  Output: {} bytes", stats.output_bytes);
        println!("  Ratio:  {:.1}%", stats.compression_ratio() * 100.0);
        println!("  Time:   {:.2?}", start_time.elapsed());

        if stats.output_bytes > stats.input_bytes {
            println!("  Note: File expanded during compression (common for small/random data)");
        }
    }

    Ok(())
}

fn decompress_file(
    input: &Path,
    output: &Path,
    options: BatchOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, options.force)?;

    if options.verbose {
        println!(
            "Decompressing '{}' to '{}'",
            input.display(),
            output.display()
        );
    }

    let start_time = Instant::now();

    // Read input file
    let compressed_data = fs::read(input)?;

    // Decompress data
    let (decompressed_data, stats) = decompress_with_stats(&compressed_data)
        .map_err(|e| format!("Decompression failed: {}", e))?;

    // Write output file
    fs::write(output, &decompressed_data)?;

    if !options.quiet {
        println!("✓ Decompressed '{}'", input.display());
        println!("  Input:  {} bytes", stats.output_bytes);
        println!("  Output: {} bytes", stats.input_bytes);
        println!("  Ratio:  {:.1}%", stats.compression_ratio() * 100.0);
        println!("  Time:   {:.2?}", start_time.elapsed());
    }

    Ok(())
}

fn show_file_info(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Check if input file exists
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;

    println!("Snappy Block Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", data.len());

    match decompressed_len(&data) {
        Ok(len) => println!("  Declared Size: {} bytes", len),
        Err(e) => {
            println!("  Status: ✗ Invalid Snappy block ({})", e);
            return Err(e.into());
        }
    }

    match decompress_with_stats(&data) {
        Ok((_, stats)) => {
            println!(
                "  Literals: {} ({} bytes)",
                stats.literal_count, stats.literal_bytes
            );
            println!(
                "  Copies: {} ({} bytes)",
                stats.copy_count, stats.copied_bytes
            );
            if verbose {
                println!("  Longest Copy: {} bytes", stats.longest_match);
            }
            println!("  Compression Ratio: {:.1}%", stats.compression_ratio() * 100.0);
            println!("  Status: ✓ Valid Snappy block");
        }
        Err(e) => {
            println!("  Status: ✗ Invalid or corrupted Snappy block");
            return Err(e.into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const QUIET: BatchOptions = BatchOptions {
        force: false,
        verbose: false,
        quiet: true,
    };

    #[test]
    fn test_output_file_name() {
        let level = Operation::Compress(CompressionLevel::Default);
        assert_eq!(
            output_file_name(Path::new("dir/example.txt"), level),
            PathBuf::from("example.txt.snappy")
        );
        assert_eq!(
            output_file_name(Path::new("example.txt.snappy"), Operation::Decompress),
            PathBuf::from("example.txt")
        );
        assert_eq!(
            output_file_name(Path::new("/tmp/README"), Operation::Decompress),
            PathBuf::from("README.unsnappy")
        );
    }

    #[test]
    fn test_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let input_path = dir.path().join("input.txt");
        let compressed_path = dir.path().join("input.txt.snappy");
        let output_path = dir.path().join("output.txt");

        // Create test data
        let test_data = b"Hello, World! This is a test of the Snappy CLI tool. Hello, World!";
        fs::write(&input_path, test_data)?;

        compress_file(&input_path, &compressed_path, CompressionLevel::Default, QUIET)?;
        decompress_file(&compressed_path, &output_path, QUIET)?;

        // Verify
        let result_data = fs::read(&output_path)?;
        assert_eq!(test_data, &result_data[..]);

        Ok(())
    }

    #[test]
    fn test_refuses_overwrite() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let input_path = dir.path().join("a.bin");
        let output_path = dir.path().join("a.bin.snappy");
        fs::write(&input_path, b"abc")?;
        fs::write(&output_path, b"existing")?;

        assert!(compress_file(&input_path, &output_path, CompressionLevel::Fast, QUIET).is_err());
        assert_eq!(fs::read(&output_path)?, b"existing");

        let forced = BatchOptions {
            force: true,
            ..QUIET
        };
        compress_file(&input_path, &output_path, CompressionLevel::Fast, forced)?;
        assert_ne!(fs::read(&output_path)?, b"existing");

        Ok(())
    }

    #[test]
    fn test_batch_continues_after_failure() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let out_dir = dir.path().join("out");
        let good = dir.path().join("good.txt");
        let missing = dir.path().join("missing.txt");
        fs::write(&good, b"good data good data good data")?;

        let files = vec![missing, good];
        let result = process_batch(
            &files,
            Some(&out_dir),
            Operation::Compress(CompressionLevel::Default),
            QUIET,
        );

        assert!(result.is_err());
        assert!(out_dir.join("good.txt.snappy").exists());

        let extract_dir = dir.path().join("extracted");
        process_batch(
            &[out_dir.join("good.txt.snappy")],
            Some(&extract_dir),
            Operation::Decompress,
            QUIET,
        )?;
        assert_eq!(
            fs::read(extract_dir.join("good.txt"))?,
            b"good data good data good data"
        );

        Ok(())
    }

    #[test]
    fn test_corrupt_input_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let input_path = dir.path().join("bad.snappy");
        let output_path = dir.path().join("bad");
        fs::write(&input_path, [0x10, 0x03, 0x00])?;

        assert!(decompress_file(&input_path, &output_path, QUIET).is_err());
        assert!(!output_path.exists());
        Ok(())
    }

    #[test]
    fn test_info_reports_invalid_blocks() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;

        let truncated_header = dir.path().join("header.snappy");
        fs::write(&truncated_header, [0x80])?;
        assert!(show_file_info(&truncated_header, false).is_err());

        let bad_offset = dir.path().join("offset.snappy");
        fs::write(&bad_offset, [0x10, 0x03, 0x00])?;
        assert!(show_file_info(&bad_offset, true).is_err());

        let valid = dir.path().join("valid.snappy");
        fs::write(&valid, snappy_block::compress(b"info info info info"))?;
        show_file_info(&valid, true)?;
        Ok(())
    }
}
