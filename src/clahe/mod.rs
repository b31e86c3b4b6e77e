use crate::core::ProcessingError;
use image::GrayImage;
use mockall::automock;
use serde::{Deserialize, Serialize};

pub mod transform;

pub use transform::ClaheTransform;

/// CLAHE のパラメータ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClaheParams {
    /// コントラスト制限（0 以下で制限なし）
    pub clip_limit: f32,
    /// 横方向のタイル数
    pub tiles_x: u32,
    /// 縦方向のタイル数
    pub tiles_y: u32,
}

impl Default for ClaheParams {
    fn default() -> Self {
        Self {
            clip_limit: 5.0,
            tiles_x: 8,
            tiles_y: 8,
        }
    }
}

impl ClaheParams {
    pub fn new(clip_limit: f32, tiles_x: u32, tiles_y: u32) -> Self {
        Self {
            clip_limit,
            tiles_x,
            tiles_y,
        }
    }

    pub fn validate(&self) -> Result<(), ProcessingError> {
        if self.tiles_x == 0 || self.tiles_y == 0 {
            return Err(ProcessingError::validation(
                "tile_grid",
                format!(
                    "タイル数は1以上である必要があります ({}x{})",
                    self.tiles_x, self.tiles_y
                ),
            ));
        }
        if !self.clip_limit.is_finite() {
            return Err(ProcessingError::validation(
                "clip_limit",
                "有限の値である必要があります",
            ));
        }
        Ok(())
    }
}

/// グレースケール画像の変換処理のトレイト
///
/// 同じ入力には常に同じ出力を返し、画像サイズは変えないこと。
#[automock]
pub trait ImageTransform: Send + Sync {
    /// 画像を変換して新しい画像を返す
    fn apply(&self, input: &GrayImage) -> GrayImage;

    /// 変換の名前を取得
    fn name(&self) -> &'static str;
}
