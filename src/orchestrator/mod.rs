//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责整个语料的处理和调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 应用入口
//! - 管理应用生命周期（初始化、运行）
//! - 读取名单与表格，写出结果表格
//! - 调用同名区分
//! - 输出全局统计信息
//!
//! ### `corpus_processor` - 语料处理器
//! - 遍历所有漫画（Vec<Comic>）
//! - 控制并发数量，保证结果顺序
//! - 输出处理进度
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理整张表格)
//!     ↓
//! corpus_processor (处理 Vec<Comic>)
//!     ↓
//! workflow::ComicFlow (处理单个漫画的分格链)
//!     ↓
//! services (能力层：quote_locator / panel_resolver / name_disambiguator)
//!     ↓
//! infrastructure (基础设施：Tokenizer)
//! ```

pub mod batch_processor;
pub mod corpus_processor;

// 重新导出主要类型
pub use batch_processor::{attach_result_columns, App, RunSummary};
pub use corpus_processor::{resolve_corpus, resolve_corpus_concurrent, LogProgress, NoProgress, ProgressSink};
