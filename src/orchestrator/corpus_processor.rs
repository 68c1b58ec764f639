//! 语料处理器 - 编排层
//!
//! ## 职责
//!
//! 对表格中的每一个漫画调用 `ComicFlow`，收集三列平行结果：
//! 说话人结构、无引号分格数、奇数引号分格数。
//!
//! ## 设计特点
//!
//! - **漫画之间相互独立**：没有任何状态跨越漫画边界，可以并发处理
//! - **漫画内部严格顺序**：分格之间的"最近说话人"链由 `ComicFlow` 负责
//! - **结果保序**：无论任务完成顺序如何，结果顺序与输入行顺序一致

use anyhow::{Context, Result};

use crate::models::{Comic, CorpusResult};
use crate::utils::logging::log_progress;
use crate::workflow::{ComicCtx, ComicFlow};

/// 进度观察者
pub trait ProgressSink: Send + Sync {
    /// `index` 从 0 开始
    fn observe(&self, index: usize, total: usize);
}

/// 每隔 `interval` 个漫画输出一次进度日志
#[derive(Debug, Clone, Copy)]
pub struct LogProgress {
    interval: usize,
}

impl LogProgress {
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl ProgressSink for LogProgress {
    fn observe(&self, index: usize, total: usize) {
        if index % self.interval == 0 {
            log_progress(index + 1, total);
        }
    }
}

/// 不输出任何进度
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn observe(&self, _index: usize, _total: usize) {}
}

/// 单线程逐个处理所有漫画
pub fn resolve_corpus(comics: &[Comic], flow: &ComicFlow, progress: &dyn ProgressSink) -> CorpusResult {
    let total = comics.len();

    comics
        .iter()
        .enumerate()
        .map(|(idx, comic)| {
            progress.observe(idx, total);
            let ctx = ComicCtx::new(comic.id.clone(), idx + 1, total);
            flow.run_with_ctx(comic.panels.as_slice(), &ctx)
        })
        .collect()
}

/// 分批并发处理所有漫画
///
/// 每批最多 `max_concurrent` 个漫画，每个漫画是一个独立的阻塞任务；
/// 按提交顺序等待任务，保证结果与 [`resolve_corpus`] 完全一致
///
/// # 参数
/// - `comics`: 按行顺序排列的漫画
/// - `flow`: 漫画处理流程（内部只读共享）
/// - `max_concurrent`: 每批的漫画数
/// - `progress`: 进度观察者
pub async fn resolve_corpus_concurrent(
    comics: &[Comic],
    flow: &ComicFlow,
    max_concurrent: usize,
    progress: &dyn ProgressSink,
) -> Result<CorpusResult> {
    let total = comics.len();
    let batch_size = max_concurrent.max(1);
    let mut result = CorpusResult::with_capacity(total);

    for (batch_num, batch) in comics.chunks(batch_size).enumerate() {
        let batch_start = batch_num * batch_size;

        // 为本批创建任务
        let handles: Vec<_> = batch
            .iter()
            .enumerate()
            .map(|(offset, comic)| {
                let idx = batch_start + offset;
                let flow = flow.clone();
                let panels = comic.panels.clone();
                let ctx = ComicCtx::new(comic.id.clone(), idx + 1, total);
                let handle = tokio::task::spawn_blocking(move || flow.run_with_ctx(panels.as_slice(), &ctx));
                (idx, handle)
            })
            .collect();

        // 按提交顺序等待本批任务
        for (idx, handle) in handles {
            progress.observe(idx, total);
            let comic = handle
                .await
                .with_context(|| format!("第 {} 个漫画的处理任务失败", idx + 1))?;
            result.push(comic);
        }
    }

    Ok(result)
}
