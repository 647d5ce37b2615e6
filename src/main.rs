use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use getctx::build::{BuildResult, ContextBuilder};
use getctx::core::config::{self, EnvOverrides, GetctxConfig};
use getctx::core::logging::{FacadeLogger, LogPort};
use getctx::core::state::Browser;
use getctx::fs::{FileSystem, OsFileSystem};
use getctx::tui;

#[derive(Parser)]
#[command(
    name = "getctx",
    version,
    about = "Browse a directory tree, pick files, and bundle them into a single context file"
)]
struct Args {
    /// Directory to start browsing in
    #[arg(default_value = ".")]
    start_path: PathBuf,

    /// File to write the combined content to [default: context.txt]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a debug log to debug.log in the current directory
    #[arg(long)]
    debug: bool,

    /// Read settings from this file instead of ~/.getctx/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let loaded = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    let file_config = loaded.unwrap_or_else(|e| {
        eprintln!("⚠️ Ignoring config file: {e}");
        GetctxConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &EnvOverrides::from_env(),
        args.output.as_deref(),
        args.debug,
    );

    if resolved.debug {
        init_debug_log();
    }
    log::info!(
        "getctx starting in {} (output: {})",
        args.start_path.display(),
        resolved.output.display()
    );
    log::debug!(
        "excluded names: {}; excluded extensions: {}",
        resolved.policy.excluded_names().collect::<Vec<_>>().join(", "),
        resolved.policy.excluded_extensions().collect::<Vec<_>>().join(", ")
    );

    let fs: Arc<dyn FileSystem> = Arc::new(OsFileSystem::new());
    let policy = Arc::new(resolved.policy);
    let logger: Arc<dyn LogPort> = Arc::new(FacadeLogger);

    let browser = match Browser::new(&args.start_path, fs.clone(), policy.clone(), logger.clone()) {
        Ok(browser) => browser,
        Err(e) => {
            eprintln!("Initialization error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let browser = match tui::run(browser) {
        Ok(browser) => browser,
        Err(e) => {
            eprintln!("Runtime error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if browser.state.aborted {
        println!("Operation cancelled.");
        return ExitCode::SUCCESS;
    }

    let builder = ContextBuilder::new(fs, policy, logger, resolved.output);
    match builder.build_from_selection(&browser.selected_paths()) {
        Ok(result) => {
            for line in summary(&result, &builder.output().display().to_string()) {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Build failed: {e}");
            eprintln!("Runtime error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize file logger - writes to debug.log in current directory
fn init_debug_log() {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    match File::create("debug.log") {
        Ok(log_file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
        }
        Err(e) => eprintln!("⚠️ Could not open debug.log: {e}"),
    }
}

/// What to tell the user once the build is over.
fn summary(result: &BuildResult, output: &str) -> Vec<String> {
    let mut lines = Vec::new();

    // Nothing was selected, or only things that were silently excluded.
    if result.files_processed == 0 && result.paths_with_error.is_empty() {
        lines.push("ℹ️ No files selected. The output file was not created.".to_string());
        return lines;
    }

    if !result.paths_with_error.is_empty() {
        lines.push("⚠️ Some paths were skipped due to errors:".to_string());
        lines.extend(
            result
                .paths_with_error
                .iter()
                .map(|warning| format!("   - {warning}")),
        );
        lines.push(String::new());
    }

    if result.files_processed == 0 {
        let mut message = "ℹ️ No text files found to include.".to_string();
        if result.files_skipped > 0 {
            message.push_str(&format!(
                " {} file(s) were skipped (non-text or unreadable).",
                result.files_skipped
            ));
        }
        message.push_str(" The output file was not created.");
        lines.push(message);
        return lines;
    }

    lines.push(format!(
        "🚀 Processing finished. Found {} files to process.",
        result.files_processed
    ));
    lines.push(format!(
        "✅ Done! All content has been combined into the file {output}"
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_nothing_selected() {
        let lines = summary(&BuildResult::default(), "context.txt");
        assert_eq!(
            lines,
            vec!["ℹ️ No files selected. The output file was not created."]
        );
    }

    #[test]
    fn test_summary_success() {
        let result = BuildResult {
            files_processed: 1,
            files_skipped: 1,
            paths_with_error: Vec::new(),
        };
        assert_eq!(
            summary(&result, "context.txt"),
            vec![
                "🚀 Processing finished. Found 1 files to process.",
                "✅ Done! All content has been combined into the file context.txt",
            ]
        );
    }

    #[test]
    fn test_summary_warnings_then_nothing_written() {
        let result = BuildResult {
            files_processed: 0,
            files_skipped: 2,
            paths_with_error: vec!["Could not read file /p/a.txt: denied".to_string()],
        };
        assert_eq!(
            summary(&result, "context.txt"),
            vec![
                "⚠️ Some paths were skipped due to errors:",
                "   - Could not read file /p/a.txt: denied",
                "",
                "ℹ️ No text files found to include. 2 file(s) were skipped (non-text or unreadable). The output file was not created.",
            ]
        );
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["getctx"]);
        assert_eq!(args.start_path, PathBuf::from("."));
        assert!(args.output.is_none());
        assert!(!args.debug);

        let args = Args::parse_from(["getctx", "src", "-o", "out.txt", "--debug"]);
        assert_eq!(args.start_path, PathBuf::from("src"));
        assert_eq!(args.output, Some(PathBuf::from("out.txt")));
        assert!(args.debug);
    }
}
