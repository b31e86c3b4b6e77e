// 単一ファイルの読み込み・変換・書き出し

use super::config::BatchConfig;
use crate::clahe::ImageTransform;
use crate::core::ProcessingError;
use std::path::{Path, PathBuf};

/// 書き出しに成功したファイルの情報
#[derive(Debug, Clone, PartialEq)]
pub struct EnhancedImage {
    pub output: PathBuf,
    pub dimensions: (u32, u32),
}

/// 入力ツリーの画像を変換して出力ツリーへ書き出す
pub struct ImageEnhancer<T> {
    transform: T,
    input_root: PathBuf,
    output_root: PathBuf,
    extension: String,
    tag: String,
}

impl<T: ImageTransform> ImageEnhancer<T> {
    pub fn new(
        transform: T,
        input_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        extension: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            transform,
            input_root: input_root.into(),
            output_root: output_root.into(),
            extension: extension.into(),
            tag: tag.into(),
        }
    }

    pub fn from_config(transform: T, config: &BatchConfig) -> Self {
        Self::new(
            transform,
            config.input_dir(),
            config.output_dir(),
            config.extension(),
            config.tag(),
        )
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// 入力パスに対応する出力パスを求める
    ///
    /// 入力ルートからの相対ディレクトリを出力ルートの下に再現し、
    /// ファイル名は `<stem><tag><ext>` にする。
    pub fn output_path(&self, path: &Path) -> PathBuf {
        let relative_dir = path
            .strip_prefix(&self.input_root)
            .ok()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default();

        self.output_root
            .join(relative_dir)
            .join(self.tagged_file_name(path))
    }

    fn tagged_file_name(&self, path: &Path) -> String {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = name.strip_suffix(self.extension.as_str()).unwrap_or(&name);
        format!("{stem}{}{}", self.tag, self.extension)
    }

    /// 1ファイルを処理する
    pub fn enhance(&self, path: &Path) -> Result<EnhancedImage, ProcessingError> {
        let image = image::open(path)
            .map_err(|e| ProcessingError::decode(path.display().to_string(), e))?
            .into_luma8();

        let enhanced = self.transform.apply(&image);
        let output = self.output_path(path);

        if let Some(parent) = output.parent() {
            // 既存ディレクトリや他ワーカーとの同時作成はエラーにならない
            std::fs::create_dir_all(parent)
                .map_err(|e| ProcessingError::directory(parent.display().to_string(), e))?;
        }

        enhanced
            .save(&output)
            .map_err(|e| ProcessingError::write(output.display().to_string(), e))?;

        Ok(EnhancedImage {
            output,
            dimensions: enhanced.dimensions(),
        })
    }
}
