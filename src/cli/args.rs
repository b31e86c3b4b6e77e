use crate::file_scanner::FileScanner;
use crate::processing::{BatchConfig, ConsoleProgressReporter, FailurePolicy};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "clahe_batch")]
#[command(about = "Apply CLAHE to every image under a directory tree")]
#[command(version)]
pub struct Cli {
    /// Directory scanned recursively for input images
    pub input_directory: PathBuf,

    /// Directory that receives the enhanced copies (mirrored tree)
    pub output_directory: PathBuf,

    /// Image file extension to process (case-insensitive, leading dot optional)
    #[arg(short, long, default_value = "png")]
    pub extension: String,

    /// Number of worker threads. Omit to process sequentially.
    ///
    /// A bare `-t` uses the number of logical CPUs. It takes the next argument as
    /// its value, so put it after the directories (`in out -t`) or pass `-t N`.
    #[arg(short, long, num_args = 0..=1, value_name = "N")]
    pub threads: Option<Option<usize>>,

    /// Stop a worker at its first unreadable image
    #[arg(long)]
    pub fail_fast: bool,

    /// Write a JSON report of the run to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Log only the run start, failures and the final summary
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// `-t` の指定からワーカー数を決める
    pub fn resolve_threads(&self) -> Option<usize> {
        match self.threads {
            None => None,
            Some(None) => Some(num_cpus::get()),
            Some(Some(n)) => Some(n),
        }
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        if self.fail_fast {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::Continue
        }
    }

    /// 正規化済みの拡張子（`.png` 形式）
    pub fn normalized_extension(&self) -> String {
        FileScanner::normalize_extension(&self.extension)
    }

    /// `--quiet` ならファイル単位のログを出さない
    pub fn reporter(&self) -> ConsoleProgressReporter {
        if self.quiet {
            ConsoleProgressReporter::quiet()
        } else {
            ConsoleProgressReporter::new()
        }
    }

    pub fn to_config(&self) -> BatchConfig {
        BatchConfig::new(&self.input_directory, &self.output_directory)
            .with_extension(&self.extension)
            .with_threads(self.resolve_threads())
            .with_failure_policy(self.failure_policy())
    }
}
