use super::args::Cli;
use crate::clahe::ClaheTransform;
use crate::core::{BatchSummary, ProcessingError};
use crate::processing::{BatchRunner, RunReport};
use anyhow::Result;
use chrono::Utc;
use tracing::info;

/// CLI 引数から実行を組み立てて最後まで走らせる
///
/// ファイル単位の失敗は `Ok` のサマリーに含まれる。`Err` は実行全体の失敗のみ。
pub async fn execute(cli: &Cli) -> Result<BatchSummary> {
    let config = cli.to_config();
    let transform = ClaheTransform::new(*config.params())?;
    let runner = BatchRunner::new(transform, cli.reporter(), config)?;

    let started_at = Utc::now();
    let summary = runner.run().await?;
    let finished_at = Utc::now();

    if let Some(report_path) = &cli.report {
        let report = RunReport::from_summary(
            runner.config(),
            &summary,
            runner.transform_name(),
            started_at,
            finished_at,
        );
        report.write_json(report_path).await?;
        info!("Report written to \"{}\"", report_path.display());
    }

    Ok(summary)
}

/// 致命的エラーの表示行（メッセージ・操作・対象・提案）
///
/// 原因はメッセージに含まれているので、エラーチェーンは展開しない。
pub fn fatal_error_lines(err: &anyhow::Error) -> Vec<String> {
    let mut lines = vec![format!("❌ エラー: {err}")];

    if let Some(context) = err.downcast_ref::<ProcessingError>().map(|e| e.context()) {
        lines.push(format!("   操作: {}", context.operation));
        if let Some(resource) = context.resource {
            lines.push(format!("   対象: {resource}"));
        }
        if let Some(suggestion) = context.suggestion {
            lines.push(format!("💡 {suggestion}"));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use image::{GrayImage, Luma};
    use std::ffi::OsStr;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_execute_writes_outputs_and_report() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        std::fs::create_dir_all(&input).unwrap();
        GrayImage::from_fn(10, 10, |x, _| Luma([(x * 20) as u8]))
            .save(input.join("a.png"))
            .unwrap();
        let output = temp_dir.path().join("out");
        let report = temp_dir.path().join("report.json");

        let cli = Cli::parse_from([
            OsStr::new("clahe_batch"),
            input.as_os_str(),
            output.as_os_str(),
            OsStr::new("--report"),
            report.as_os_str(),
        ]);
        let summary = execute(&cli).await.unwrap();

        assert_eq!(summary.output_count, 1);
        assert!(output.join("a__CLAHE.png").exists());
        let written: RunReport =
            serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
        assert_eq!(written.succeeded, 1);
        assert_eq!(written.transform, "clahe");
    }

    #[tokio::test]
    async fn test_execute_missing_input_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let cli = Cli::parse_from([
            OsStr::new("clahe_batch"),
            temp_dir.path().join("missing").as_os_str(),
            temp_dir.path().join("out").as_os_str(),
        ]);

        let error = execute(&cli).await.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<ProcessingError>(),
            Some(ProcessingError::ScanError { .. })
        ));
    }

    #[test]
    fn test_fatal_error_lines_show_cause_once() {
        let cause = image::load_from_memory(b"NOT_A_PNG").unwrap_err();
        let cause_text = cause.to_string();
        let err = anyhow::Error::from(ProcessingError::decode("in/bad.png", cause));

        let lines = fatal_error_lines(&err);

        assert_eq!(lines[0].matches(cause_text.as_str()).count(), 1);
        assert!(lines[0].contains("in/bad.png"));
        assert_eq!(lines[1], "   操作: decode");
        assert_eq!(lines[2], "   対象: in/bad.png");
        assert!(lines[3].starts_with("💡 "));
    }

    #[test]
    fn test_fatal_error_lines_for_plain_error() {
        let err = anyhow::anyhow!("ファイル書き込みエラー: report.json");
        assert_eq!(
            fatal_error_lines(&err),
            vec!["❌ エラー: ファイル書き込みエラー: report.json".to_string()]
        );
    }
}
