use crate::core::{ImagePath, ProcessingError};
use std::io;
use std::path::Path;
use walkdir::WalkDir;

pub struct FileScanner;

impl FileScanner {
    /// `root` 以下を再帰的に走査し、パス文字列が `suffix` で終わるファイルを返す
    ///
    /// 比較は大文字小文字を区別する。同じファイルシステム状態なら順序は一定
    /// （ディレクトリ内はファイル名順）。
    pub fn scan_directory(root: &Path, suffix: &str) -> Result<Vec<ImagePath>, ProcessingError> {
        if !root.exists() {
            return Err(ProcessingError::scan(
                root.display().to_string(),
                io::Error::new(io::ErrorKind::NotFound, "directory does not exist"),
            ));
        }
        if !root.is_dir() {
            return Err(ProcessingError::scan(
                root.display().to_string(),
                io::Error::new(io::ErrorKind::InvalidInput, "path is not a directory"),
            ));
        }

        let mut file_paths = Vec::new();

        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .unwrap_or(root)
                    .display()
                    .to_string();
                ProcessingError::scan(path, io::Error::from(e))
            })?;

            if Self::is_file_entry(&entry) && entry.path().to_string_lossy().ends_with(suffix) {
                file_paths.push(entry.into_path());
            }
        }

        Ok(file_paths)
    }

    /// 入力と出力の拡張子表記を揃える（`PNG` / `.png` → `.png`）
    pub fn normalize_extension(extension: &str) -> String {
        let trimmed = extension.trim().trim_start_matches('.');
        format!(".{}", trimmed.to_lowercase())
    }

    // シンボリックリンクはリンク先がファイルなら対象に含める
    fn is_file_entry(entry: &walkdir::DirEntry) -> bool {
        entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
    }
}
