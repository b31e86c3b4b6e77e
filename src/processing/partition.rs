// 静的なワーク分割

use crate::core::ProcessingError;

/// `items` を順序を保ったまま `k` 個の連続したバッチに分割する
///
/// 先頭の `k - 1` 個はそれぞれ `len / k` 件、残り全てが最後のバッチに入る。
/// 最後のバッチは他より小さくならない。`k > len` の場合は空のバッチが含まれる。
pub fn partition<T>(items: Vec<T>, k: usize) -> Result<Vec<Vec<T>>, ProcessingError> {
    if k == 0 {
        return Err(ProcessingError::validation(
            "threads",
            "分割数は1以上である必要があります",
        ));
    }

    let chunk = items.len() / k;
    let mut rest = items.into_iter();
    let mut batches = Vec::with_capacity(k);

    for _ in 0..k - 1 {
        batches.push(rest.by_ref().take(chunk).collect());
    }
    batches.push(rest.collect());

    Ok(batches)
}
