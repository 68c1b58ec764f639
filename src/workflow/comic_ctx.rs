//! 漫画处理上下文
//!
//! 封装"我正在处理第几行的哪一个漫画"这一信息

use std::fmt::Display;

/// 漫画处理上下文（仅用于日志显示）
#[derive(Debug, Clone)]
pub struct ComicCtx {
    /// 漫画标识
    pub comic_id: String,

    /// 表格中的行号（从1开始）
    pub row_index: usize,

    /// 漫画总数
    pub total: usize,
}

impl ComicCtx {
    /// 创建新的漫画上下文
    pub fn new(comic_id: String, row_index: usize, total: usize) -> Self {
        Self {
            comic_id,
            row_index,
            total,
        }
    }
}

impl Display for ComicCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[漫画 {}/{} ID#{}]",
            self.row_index, self.total, self.comic_id
        )
    }
}
