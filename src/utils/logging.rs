//! 日志工具模块
//!
//! 提供日志初始化以及运行过程中的格式化输出

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::models::CorpusStats;

/// 初始化日志
///
/// 读取 `RUST_LOG`，未设置时默认 `info`；重复调用不会报错
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `table_path`: 输入表格路径
/// - `max_concurrent`: 最大并发数
pub fn log_startup(table_path: &str, max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - 对白说话人识别 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📄 输入表格: {}", table_path);
    info!("📊 最大并发数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录名单加载信息
pub fn log_vocabulary_loaded(names: usize, correction_dates: usize) {
    info!("✓ 读取到 {} 个角色名", names);
    info!("✓ 读取到 {} 个需要改名的日期", correction_dates);
}

/// 记录表格加载信息
pub fn log_table_loaded(total: usize, columns: usize) {
    info!("✓ 找到 {} 个待处理的漫画（{} 列）", total, columns);
}

/// 记录处理进度
///
/// # 参数
/// - `current`: 当前漫画编号（从 1 开始）
/// - `total`: 漫画总数
pub fn log_progress(current: usize, total: usize) {
    let percent = if total == 0 {
        100.0
    } else {
        100.0 * current as f64 / total as f64
    };
    info!("⏳ 正在处理第 {} / {} 个漫画 ({:.0}%)", current, total, percent);
}

/// 打印最终统计信息
///
/// # 参数
/// - `stats`: 汇总统计
/// - `rewritten`: 改名的说话人数量
/// - `output_path`: 输出表格路径
pub fn print_final_stats(stats: &CorpusStats, rewritten: usize, output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("漫画: {} | 分格: {}", stats.comics, stats.panels);
    info!(
        "✅ 对白: {} 段，其中 {} 段没有说话人",
        stats.spans, stats.unattributed
    );
    info!("无引号分格: {}", stats.no_quotes);
    info!("⚠️ 引号数为奇数的分格: {}", stats.odd_quotes);
    info!("改名的说话人: {}", rewritten);
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", output_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
