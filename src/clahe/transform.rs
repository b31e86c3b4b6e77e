use super::{ClaheParams, ImageTransform};
use crate::core::ProcessingError;
use image::{GrayImage, ImageBuffer, Luma};
use std::borrow::Cow;

const HIST_SIZE: usize = 256;

/// 8bit グレースケール画像用の CLAHE 実装
#[derive(Debug, Clone, Default)]
pub struct ClaheTransform {
    params: ClaheParams,
}

impl ClaheTransform {
    pub fn new(params: ClaheParams) -> Result<Self, ProcessingError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ClaheParams {
        &self.params
    }
}

impl ImageTransform for ClaheTransform {
    fn apply(&self, input: &GrayImage) -> GrayImage {
        clahe(input, &self.params)
    }

    fn name(&self) -> &'static str {
        "clahe"
    }
}

/// CLAHE を適用する
///
/// 画像をタイルに分割してタイルごとに制限付きヒストグラム平坦化の LUT を作り、
/// 各画素は近傍4タイルの LUT を双線形補間して変換する。画像サイズがタイル数で
/// 割り切れない場合は reflect-101 で拡張した画像から LUT を作る。
pub fn clahe(input: &GrayImage, params: &ClaheParams) -> GrayImage {
    let (width, height) = input.dimensions();
    if width == 0 || height == 0 || params.tiles_x == 0 || params.tiles_y == 0 {
        return input.clone();
    }

    let tiles_x = params.tiles_x as usize;
    let tiles_y = params.tiles_y as usize;
    let tile_w = (width as usize).div_ceil(tiles_x);
    let tile_h = (height as usize).div_ceil(tiles_y);

    let src_for_lut: Cow<'_, GrayImage> =
        if width as usize % tiles_x == 0 && height as usize % tiles_y == 0 {
            Cow::Borrowed(input)
        } else {
            Cow::Owned(pad_reflect_101(
                input,
                (tile_w * tiles_x) as u32,
                (tile_h * tiles_y) as u32,
            ))
        };

    let tile_area = tile_w * tile_h;
    let clip_limit = if params.clip_limit > 0.0 {
        ((params.clip_limit * tile_area as f32 / HIST_SIZE as f32) as u32).max(1)
    } else {
        0
    };
    let lut_scale = (HIST_SIZE - 1) as f32 / tile_area as f32;

    let mut luts = vec![[0u8; HIST_SIZE]; tiles_x * tiles_y];
    for tile_y in 0..tiles_y {
        for tile_x in 0..tiles_x {
            let mut hist = tile_histogram(
                &src_for_lut,
                (tile_x * tile_w) as u32,
                (tile_y * tile_h) as u32,
                tile_w as u32,
                tile_h as u32,
            );
            if clip_limit > 0 {
                clip_histogram(&mut hist, clip_limit);
            }
            luts[tile_y * tiles_x + tile_x] = build_lut(&hist, lut_scale);
        }
    }

    let columns = interpolation_axis(width as usize, tile_w, tiles_x);
    let rows = interpolation_axis(height as usize, tile_h, tiles_y);

    ImageBuffer::from_fn(width, height, |x, y| {
        let (tx1, tx2, xa) = columns[x as usize];
        let (ty1, ty2, ya) = rows[y as usize];
        let p = input.get_pixel(x, y).0[0] as usize;

        let top = luts[ty1 * tiles_x + tx1][p] as f32 * (1.0 - xa)
            + luts[ty1 * tiles_x + tx2][p] as f32 * xa;
        let bottom = luts[ty2 * tiles_x + tx1][p] as f32 * (1.0 - xa)
            + luts[ty2 * tiles_x + tx2][p] as f32 * xa;
        let value = top * (1.0 - ya) + bottom * ya;

        Luma([saturate_u8(value)])
    })
}

// 0.5 ちょうどは偶数側に丸める
fn saturate_u8(value: f32) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

fn tile_histogram(src: &GrayImage, x0: u32, y0: u32, w: u32, h: u32) -> [u32; HIST_SIZE] {
    let mut hist = [0u32; HIST_SIZE];
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            hist[src.get_pixel(x, y).0[0] as usize] += 1;
        }
    }
    hist
}

/// 制限を超えた分を全ビンに均等に再分配し、端数は等間隔に1ずつ配る
fn clip_histogram(hist: &mut [u32; HIST_SIZE], clip_limit: u32) {
    let mut clipped: usize = 0;
    for bin in hist.iter_mut() {
        if *bin > clip_limit {
            clipped += (*bin - clip_limit) as usize;
            *bin = clip_limit;
        }
    }

    let redist_batch = clipped / HIST_SIZE;
    let mut residual = clipped - redist_batch * HIST_SIZE;
    for bin in hist.iter_mut() {
        *bin += redist_batch as u32;
    }

    if residual != 0 {
        let residual_step = (HIST_SIZE / residual).max(1);
        let mut i = 0;
        while i < HIST_SIZE && residual > 0 {
            hist[i] += 1;
            i += residual_step;
            residual -= 1;
        }
    }
}

fn build_lut(hist: &[u32; HIST_SIZE], lut_scale: f32) -> [u8; HIST_SIZE] {
    let mut lut = [0u8; HIST_SIZE];
    let mut sum: u32 = 0;
    for (entry, count) in lut.iter_mut().zip(hist.iter()) {
        sum += count;
        *entry = saturate_u8(sum as f32 * lut_scale);
    }
    lut
}

// 各座標について（左(上)タイル, 右(下)タイル, 右(下)側の重み）を返す
// タイル中心は半タイル分ずれた位置にあり、端では同じタイルに張り付く
fn interpolation_axis(len: usize, tile_len: usize, tiles: usize) -> Vec<(usize, usize, f32)> {
    let inv = 1.0 / tile_len as f32;
    (0..len)
        .map(|i| {
            let f = i as f32 * inv - 0.5;
            let t1 = f.floor() as i64;
            let weight = f - t1 as f32;
            let lo = t1.max(0) as usize;
            let hi = ((t1 + 1) as usize).min(tiles - 1);
            (lo.min(tiles - 1), hi, weight)
        })
        .collect()
}

fn pad_reflect_101(input: &GrayImage, new_width: u32, new_height: u32) -> GrayImage {
    let (width, height) = input.dimensions();
    ImageBuffer::from_fn(new_width, new_height, |x, y| {
        *input.get_pixel(reflect_101(x, width), reflect_101(y, height))
    })
}

// dcb|abcd|cba の折り返し（端の画素は繰り返さない）
fn reflect_101(i: u32, len: u32) -> u32 {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let m = i % period;
    if m < len {
        m
    } else {
        period - m
    }
}
