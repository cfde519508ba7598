pub mod source;
pub mod tasks;
pub mod handlers;

pub use source::{analyze_csv_file, handle_request_body, read_csv_file, read_failure};
pub use tasks::{export_windows_csv, write_result_json};
pub use handlers::{collect_csv_files, run_analysis_worker, run_batch, run_batch_files, AnalysisPool};
