mod args;

use clap::Parser;
use log::{error, info, warn};
use std::error;
use std::io::Read;
use std::path::Path;
use std::process;

use args::{Cli, Commands, ConfigAction};
use stroke_hub::analysis::{build_result, failure_result, run_pipeline, AnalysisParams};
use stroke_hub::config::AppConfig;
use stroke_hub::jobs::{
    export_windows_csv, handle_request_body, read_csv_file, read_failure, run_batch, write_result_json,
};
use stroke_hub::logger;
use stroke_hub::types::AnalysisResult;
use stroke_hub::utils::format_seconds;

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logger::init_logger(&Default::default());
            error!("Failed to load configuration: {}", e);
            process::exit(2);
        }
    };
    logger::init_logger(&config.logging);
    info!("stroke-hub {} starting", env!("CARGO_PKG_VERSION"));

    match run(cli.command, config) {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn error::Error>> {
    let mut config = match path {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };
    config.apply_env_overrides()?;
    Ok(config)
}

fn run(command: Commands, mut config: AppConfig) -> Result<i32, Box<dyn error::Error>> {
    match command {
        Commands::Analyze {
            file,
            threshold,
            window_len,
            min_gap,
            sampling_rate,
            windows,
            export_windows,
            output,
        } => {
            let mut params = config.analysis_params();
            if let Some(v) = threshold {
                params.threshold = v;
            }
            if let Some(v) = window_len {
                params.window_len = v;
            }
            if let Some(v) = min_gap {
                params.min_gap = v;
            }
            if let Some(v) = sampling_rate {
                params.sampling_rate_hz = v;
            }
            params.include_windows |= windows;
            params.validate()?;

            let result = analyze_file(&file, &params, export_windows.as_deref())?;
            emit(&result, output.as_deref())
        }
        Commands::Request { input, output } => {
            let payload = if input == "-" {
                let mut buf = Vec::new();
                std::io::stdin().read_to_end(&mut buf)?;
                buf
            } else {
                std::fs::read(&input)?
            };
            let result = handle_request_body(&payload, &config.analysis_params());
            emit(&result, output.as_deref())
        }
        Commands::Batch { dir, workers } => {
            if let Some(workers) = workers {
                config.batch.workers = workers;
            }
            config.validate()?;

            let summary = run_batch(&dir, &config.analysis_params(), &config.batch)?;
            for outcome in &summary.outcomes {
                match &outcome.error {
                    None => println!("ok    {} ({} strokes)", outcome.input.display(), outcome.strokes_detected),
                    Some(e) => println!("fail  {}: {}", outcome.input.display(), e),
                }
            }
            println!("{}", summary.message);
            Ok(if summary.error_count > 0 { 1 } else { 0 })
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { path } => {
                AppConfig::default().save_to_file(&path)?;
                println!("Wrote default configuration to {}", path.display());
                Ok(0)
            }
        },
    }
}

/// Runs one file through the pipeline, optionally exporting the windows.
fn analyze_file(
    file: &Path,
    params: &AnalysisParams,
    export_dir: Option<&Path>,
) -> Result<AnalysisResult, Box<dyn error::Error>> {
    let content = match read_csv_file(file) {
        Ok(content) => content,
        Err(e) => return Ok(read_failure(file, &e)),
    };

    let started = std::time::Instant::now();
    let analysis = match run_pipeline(&content, params) {
        Ok(analysis) => analysis,
        Err(e) => return Ok(failure_result(&e)),
    };

    if let Some(dir) = export_dir {
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "recording".to_string());
        let written = export_windows_csv(dir, &stem, &analysis.windows)?;
        info!("Exported {} stroke windows to {}", written.len(), dir.display());
    }

    let statistics = analysis.statistics(params);
    info!(
        "{} strokes in {} of data",
        analysis.events.len(),
        format_seconds(statistics.data_duration_seconds)
    );
    if let Some(interval) = statistics.average_interval_seconds {
        info!("Average interval between strokes: {}", format_seconds(interval));
    }

    Ok(build_result(analysis, params, started))
}

fn emit(result: &AnalysisResult, output: Option<&Path>) -> Result<i32, Box<dyn error::Error>> {
    match output {
        Some(path) => write_result_json(path, result)?,
        None => println!("{}", serde_json::to_string_pretty(result)?),
    }
    if !result.success {
        warn!("Analysis failed: {}", result.error.as_deref().unwrap_or("unknown error"));
        return Ok(1);
    }
    Ok(0)
}
