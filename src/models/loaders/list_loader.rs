use std::path::Path;

use tokio::fs;
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::models::vocabulary::{CorrectionIndex, RecognizedNameSet};

/// 按行读取纯文本文件，每行一项
pub async fn read_lines(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path, e))?;

    Ok(content
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect())
}

/// 读取角色名单，全部转成小写
pub async fn load_recognized_names(path: &Path) -> AppResult<RecognizedNameSet> {
    let names = RecognizedNameSet::from_names(read_lines(path).await?);

    for name in names.multi_word_names() {
        warn!("⚠️ 角色名 '{}' 含有空白，无法匹配单个词", name);
    }

    if names.is_empty() {
        warn!("⚠️ 角色名单 {} 为空", path.display());
    }

    Ok(names)
}

/// 读取需要改名的漫画日期名单
pub async fn load_correction_index(path: &Path) -> AppResult<CorrectionIndex> {
    Ok(CorrectionIndex::from_ids(read_lines(path).await?))
}
