//! # Comic Speakers
//!
//! 根据分格文字描述，为漫画中的每一段对白找出说话人
//!
//! 判定规则只依赖词的位置：对白（一对双引号）之前最近出现的角色名就是说话人；
//! 找不到时沿用上一个分格最后提到的角色。不做句法分析，也不做指代消解。
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 只暴露能力
//! - `Tokenizer` - 把文本切成 (词, 字符偏移)
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个分格
//! - `quote_locator` - 找出所有双引号
//! - `PanelResolver` - 单个分格的说话人判定
//! - `NameDisambiguator` - 区分 Patty 与 Peppermint Patty
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个漫画"的完整处理流程
//! - `ComicCtx` - 上下文封装（漫画标识 + 行号）
//! - `ComicFlow` - 按顺序处理分格，串联"最近说话人"
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/corpus_processor` - 处理所有漫画，控制并发并保证顺序
//! - `orchestrator/batch_processor` - 读名单、读表格、写结果
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, SpeakersFormat};
pub use error::{AppError, AppResult};
pub use infrastructure::{Token, Tokenizer, WordTokenizer};
pub use models::{Comic, ComicResult, CorpusResult, SpeakerAssignment};
pub use orchestrator::{resolve_corpus, resolve_corpus_concurrent, App, RunSummary};
pub use services::{NameDisambiguator, PanelResolver};
pub use utils::logging as logger;
pub use workflow::{ComicCtx, ComicFlow};
