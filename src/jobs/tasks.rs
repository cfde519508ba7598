use std::io::Write;
use std::path::{Path, PathBuf};
use log::info;

use crate::types::{AnalysisResult, StrokeWindow};

/// 将分析结果写为格式化 JSON
pub fn write_result_json(path: &Path, result: &AnalysisResult) -> Result<(), String> {
    let content = serde_json::to_string_pretty(result)
        .map_err(|e| format!("Failed to serialize result: {}", e))?;

    std::fs::write(path, content)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

    info!("Analysis result written to {}", path.display());
    Ok(())
}

/// Writes every window to `<dir>/<stem>_stroke_<k>.csv` (k is 1-based) so an
/// external plotting tool can pick them up. Returns the written paths.
pub fn export_windows_csv(dir: &Path, stem: &str, windows: &[StrokeWindow]) -> Result<Vec<PathBuf>, String> {
    // 确保导出目录存在
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create export directory: {}", e))?;

    let mut written = Vec::with_capacity(windows.len());

    for (k, window) in windows.iter().enumerate() {
        let filename = dir.join(format!("{}_stroke_{}.csv", stem, k + 1));
        let file = std::fs::File::create(&filename)
            .map_err(|e| format!("Failed to create file: {}", e))?;
        let mut writer = std::io::BufWriter::new(file);

        writeln!(writer, "index,ax,ay,az,gx,gy,gz")
            .map_err(|e| format!("Failed to write CSV header: {}", e))?;

        for (offset, (acc, gyro)) in window.acc.iter().zip(window.gyro.iter()).enumerate() {
            writeln!(
                writer,
                "{},{},{},{},{},{},{}",
                window.start + offset,
                acc[0], acc[1], acc[2],
                gyro[0], gyro[1], gyro[2]
            )
            .map_err(|e| format!("Failed to write window data: {}", e))?;
        }

        writer.flush()
            .map_err(|e| format!("Failed to flush {}: {}", filename.display(), e))?;

        info!(
            "Exported stroke {} (event {}) to {} ({} rows)",
            k + 1,
            window.event_index,
            filename.display(),
            window.len()
        );
        written.push(filename);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::parse_csv;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stroke_hub_tasks_{}_{}", std::process::id(), name));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_export_windows_round_trips_through_parser() {
        let dir = temp_dir("export");
        let window = StrokeWindow {
            event_index: 5,
            start: 4,
            acc: vec![[0.5, -1.0, 9.8], [1.5, 0.0, 9.7]],
            gyro: vec![[10.0, 20.0, 30.0], [-40.0, 50.0, 60.0]],
        };

        let paths = export_windows_csv(&dir, "session", &[window.clone()]).unwrap();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with("session_stroke_1.csv"));

        let text = std::fs::read_to_string(&paths[0]).unwrap();
        assert!(text.starts_with("index,ax,ay,az,gx,gy,gz\n4,"));
        let parsed = parse_csv(&text).unwrap();
        assert_eq!(parsed.series.acc, window.acc);
        assert_eq!(parsed.series.gyro, window.gyro);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_result_json() {
        let dir = temp_dir("json");
        let path = dir.join("out.json");
        write_result_json(&path, &AnalysisResult::error("boom".to_string())).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "boom");

        std::fs::remove_dir_all(&dir).ok();
    }
}
