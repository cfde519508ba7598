use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use log::{info, error, warn};

use crate::analysis::{analyze_csv_content, AnalysisParams};
use crate::config::BatchConfig;
use crate::error::AnalysisError;
use crate::types::{AnalysisResult, AnalysisTask, BatchSummary, FileOutcome};
use crate::utils::{is_csv, output_path_for};
use super::source::analyze_csv_file;
use super::tasks::write_result_json;

/// Worker loop: pulls tasks until the queue is closed or shutdown is signalled.
pub fn run_analysis_worker(
    worker_id: usize,
    task_receiver: Receiver<AnalysisTask>,
    outcome_sender: Sender<FileOutcome>,
    params: AnalysisParams,
    shutdown_signal: Arc<AtomicBool>,
    poll_interval: Duration,
) {
    info!("Analysis worker {} started", worker_id);

    while !shutdown_signal.load(Ordering::Relaxed) {
        match task_receiver.recv_timeout(poll_interval) {
            Ok(task) => {
                info!("Analysis worker {}: processing {}", worker_id, task.name());
                match task {
                    AnalysisTask::AnalyzeFile { input, output } => {
                        let outcome = handle_file_task(&params, input, output);
                        if outcome_sender.send(outcome).is_err() {
                            info!("Analysis worker {}: outcome channel disconnected, exiting", worker_id);
                            break;
                        }
                    }
                    AnalysisTask::AnalyzeText { name, csv_content, response_sender } => {
                        let result = analyze_csv_content(&csv_content, &params);
                        if let Err(e) = response_sender.try_send(result) {
                            warn!("Analysis worker {}: failed to return result for {}: {}", worker_id, name, e);
                        }
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                // 超时，继续循环检查关闭信号
                continue;
            }
            Err(RecvTimeoutError::Disconnected) => {
                // 队列关闭且已清空
                info!("Analysis worker {}: task queue closed, exiting", worker_id);
                break;
            }
        }
    }

    info!("Analysis worker {} exiting", worker_id);
}

fn handle_file_task(params: &AnalysisParams, input: PathBuf, output: PathBuf) -> FileOutcome {
    let result = analyze_csv_file(&input, params);
    let strokes_detected = result.strokes_detected();
    let mut error_msg = result.error.clone();

    let written = match write_result_json(&output, &result) {
        Ok(()) => Some(output),
        Err(e) => {
            error!("Failed to save analysis for {}: {}", input.display(), e);
            error_msg.get_or_insert(e);
            None
        }
    };

    if let Some(e) = &error_msg {
        warn!("Analysis of {} failed: {}", input.display(), e);
    } else {
        info!("Analysis of {} found {} strokes", input.display(), strokes_detected);
    }

    FileOutcome {
        input,
        output: written,
        strokes_detected,
        error: error_msg,
    }
}

/// Fixed-size worker pool behind a bounded queue. The queue capacity bounds
/// how much work callers can pile up; `submit` blocks when it is full.
pub struct AnalysisPool {
    task_sender: Option<Sender<AnalysisTask>>,
    outcome_receiver: Receiver<FileOutcome>,
    handles: Vec<JoinHandle<()>>,
    shutdown_signal: Arc<AtomicBool>,
}

impl AnalysisPool {
    pub fn start(params: AnalysisParams, config: &BatchConfig) -> std::io::Result<Self> {
        let (task_sender, task_receiver) = crossbeam_channel::bounded(config.queue_capacity.max(1));
        let (outcome_sender, outcome_receiver) = crossbeam_channel::unbounded();
        let shutdown_signal = Arc::new(AtomicBool::new(false));
        let poll_interval = Duration::from_millis(config.poll_interval_ms.max(1));

        let worker_count = config.workers.max(1);
        let mut handles = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let task_receiver = task_receiver.clone();
            let outcome_sender = outcome_sender.clone();
            let params = params.clone();
            let shutdown = Arc::clone(&shutdown_signal);
            let handle = thread::Builder::new()
                .name(format!("analysis-worker-{}", worker_id))
                .spawn(move || {
                    run_analysis_worker(worker_id, task_receiver, outcome_sender, params, shutdown, poll_interval)
                })?;
            handles.push(handle);
        }

        info!("Analysis pool started with {} workers", handles.len());

        Ok(Self {
            task_sender: Some(task_sender),
            outcome_receiver,
            handles,
            shutdown_signal,
        })
    }

    /// Queues a task, waiting for room if the queue is full.
    pub fn submit(&self, task: AnalysisTask) -> Result<(), String> {
        match &self.task_sender {
            Some(sender) => sender
                .send(task)
                .map_err(|e| format!("Analysis queue closed: {}", e.into_inner().name())),
            None => Err("Analysis pool is shut down".to_string()),
        }
    }

    /// Queues a task without waiting; a full queue is reported back.
    pub fn try_submit(&self, task: AnalysisTask) -> Result<(), String> {
        match &self.task_sender {
            Some(sender) => match sender.try_send(task) {
                Ok(()) => Ok(()),
                Err(TrySendError::Full(task)) => Err(format!("Analysis queue is full, rejected {}", task.name())),
                Err(TrySendError::Disconnected(task)) => Err(format!("Analysis queue closed, rejected {}", task.name())),
            },
            None => Err("Analysis pool is shut down".to_string()),
        }
    }

    /// Runs in-memory CSV text on the pool and waits for its result.
    pub fn analyze_text(&self, name: &str, csv_content: String) -> Result<AnalysisResult, String> {
        let (response_sender, response_receiver) = crossbeam_channel::bounded(1);
        self.submit(AnalysisTask::AnalyzeText {
            name: name.to_string(),
            csv_content,
            response_sender,
        })?;
        response_receiver
            .recv()
            .map_err(|e| format!("Worker dropped request {}: {}", name, e))
    }

    /// Closes the queue, lets the workers drain it and returns the file outcomes.
    pub fn finish(mut self) -> Vec<FileOutcome> {
        self.task_sender.take();
        self.join_workers();
        self.outcome_receiver.try_iter().collect()
    }

    /// Stops the workers after their current task; queued work is abandoned.
    pub fn shutdown(mut self) {
        self.shutdown_signal.store(true, Ordering::Relaxed);
        self.task_sender.take();
        self.join_workers();
    }

    fn join_workers(&mut self) {
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                error!("Analysis worker panicked");
            }
        }
    }
}

impl Drop for AnalysisPool {
    fn drop(&mut self) {
        self.shutdown_signal.store(true, Ordering::Relaxed);
        self.task_sender.take();
        self.join_workers();
    }
}

/// CSV recordings directly inside `dir`, sorted, excluding our own outputs.
pub fn collect_csv_files(dir: &Path, output_suffix: &str) -> Result<Vec<PathBuf>, AnalysisError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || !is_csv(&path) {
            continue;
        }
        let is_output = path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(output_suffix))
            .unwrap_or(false);
        if !is_output {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Analyzes the given files on a worker pool, writing one JSON result next to each.
pub fn run_batch_files(
    files: Vec<PathBuf>,
    params: &AnalysisParams,
    config: &BatchConfig,
) -> Result<BatchSummary, AnalysisError> {
    if files.is_empty() {
        info!("No CSV recordings to analyze");
        return Ok(BatchSummary::no_data());
    }

    let pool = AnalysisPool::start(params.clone(), config)?;
    let total = files.len();
    let mut rejected = Vec::new();

    for input in files {
        let output = output_path_for(&input, &config.output_suffix);
        if let Err(e) = pool.submit(AnalysisTask::AnalyzeFile { input: input.clone(), output }) {
            error!("{}", e);
            rejected.push(FileOutcome {
                input,
                output: None,
                strokes_detected: 0,
                error: Some(e),
            });
        }
    }

    let mut outcomes = pool.finish();
    outcomes.extend(rejected);

    let summary = BatchSummary::from_outcomes(outcomes);
    info!("{} ({} files queued)", summary.message, total);
    Ok(summary)
}

pub fn run_batch(dir: &Path, params: &AnalysisParams, config: &BatchConfig) -> Result<BatchSummary, AnalysisError> {
    let files = collect_csv_files(dir, &config.output_suffix)?;
    info!("Found {} CSV recordings in {}", files.len(), dir.display());
    run_batch_files(files, params, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_workers_still_runs_one() {
        let config = BatchConfig {
            workers: 0,
            poll_interval_ms: 10,
            ..Default::default()
        };
        let pool = AnalysisPool::start(AnalysisParams::default(), &config).unwrap();
        assert_eq!(pool.handles.len(), 1);

        let result = pool.analyze_text("header-only", "AX,AY,AZ,GX,GY,GZ".to_string()).unwrap();
        assert!(!result.success);
        assert!(pool.finish().is_empty());
    }
}
