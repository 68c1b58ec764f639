//! 批量处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整的语料处理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：读取角色名单和改名日期，构建 `ComicFlow`
//! 2. **表格加载**：读取分隔文本表格并解析分格列
//! 3. **并发处理**：把漫画分批交给 `corpus_processor`
//! 4. **同名区分**：按日期把 "patty" 改写为 "pep_patty"
//! 5. **结果写出**：追加 `no_quotes_n` / `odd_quotes_n` / `comics_speakers` 三列
//! 6. **全局统计**：汇总所有漫画的处理结果

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::{Config, SpeakersFormat};
use crate::error::{AppResult, TableError};
use crate::infrastructure::WordTokenizer;
use crate::models::literal::format_speakers;
use crate::models::{
    load_comic_table, load_correction_index, load_recognized_names, write_comic_table, ComicTable,
    CorpusResult, CorpusStats, TableLayout,
};
use crate::orchestrator::corpus_processor::{resolve_corpus_concurrent, LogProgress};
use crate::services::{NameDisambiguator, PanelResolver};
use crate::utils::logging::{
    log_startup, log_table_loaded, log_vocabulary_loaded, print_final_stats,
};
use crate::workflow::ComicFlow;

/// 输出表格中新增的列
pub const NO_QUOTES_COLUMN: &str = "no_quotes_n";
pub const ODD_QUOTES_COLUMN: &str = "odd_quotes_n";
pub const SPEAKERS_COLUMN: &str = "comics_speakers";

/// 应用主结构
pub struct App {
    config: Config,
    table_path: PathBuf,
    flow: ComicFlow,
    disambiguator: NameDisambiguator,
}

/// 一次运行的结果摘要
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub stats: CorpusStats,
    /// 改名的说话人数量
    pub rewritten: usize,
    pub output_path: PathBuf,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;
        let table_path = config.resolve_table_path()?;

        log_startup(&table_path.display().to_string(), config.max_concurrent_comics);

        // 名单在整个运行期间只读共享
        let names = load_recognized_names(Path::new(&config.character_names_file))
            .await
            .with_context(|| format!("无法读取角色名单: {}", config.character_names_file))?;
        let corrections = load_correction_index(Path::new(&config.correction_dates_file))
            .await
            .with_context(|| format!("无法读取改名日期: {}", config.correction_dates_file))?;

        log_vocabulary_loaded(names.len(), corrections.len());

        let resolver = PanelResolver::new(Arc::new(WordTokenizer::new()), Arc::new(names))
            .with_trailing_mention_fallback(config.trailing_mention_fallback);
        let flow = ComicFlow::new(resolver).with_verbose_logging(config.verbose_logging);

        Ok(Self {
            config,
            table_path,
            flow,
            disambiguator: NameDisambiguator::peppermint_patty(corrections),
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunSummary> {
        let delimiter = self.config.delimiter_byte()?;

        info!("\n📁 正在读取表格...");
        let mut table = self.load_table(delimiter).await?;

        if table.is_empty() {
            warn!("⚠️ 表格中没有漫画，只写出表头");
        }
        log_table_loaded(table.len(), table.headers.len());

        // 处理所有漫画
        let progress = LogProgress::new(self.config.progress_interval);
        let mut corpus = resolve_corpus_concurrent(
            &table.comics,
            &self.flow,
            self.config.max_concurrent_comics,
            &progress,
        )
        .await?;

        // 区分 Patty 与 Peppermint Patty
        let rewritten = self
            .disambiguator
            .apply(&mut corpus.comics_speakers, &table.ids());

        attach_result_columns(&mut table, &corpus, self.config.speakers_format)?;

        let output_path = PathBuf::from(&self.config.output_file);
        write_comic_table(&output_path, delimiter, &table)
            .await
            .with_context(|| format!("无法写出表格: {}", output_path.display()))?;

        // 输出最终统计
        let stats = corpus.stats();
        print_final_stats(&stats, rewritten, &output_path.display().to_string());

        Ok(RunSummary {
            stats,
            rewritten,
            output_path,
        })
    }

    /// 加载表格
    async fn load_table(&self, delimiter: u8) -> Result<ComicTable> {
        let layout = TableLayout {
            delimiter,
            text_column: &self.config.text_column,
            id_column: &self.config.id_column,
        };
        load_comic_table(&self.table_path, layout)
            .await
            .with_context(|| format!("无法读取表格: {}", self.table_path.display()))
    }
}

/// 把三列结果写进表格（同名列被覆盖）
pub fn attach_result_columns(
    table: &mut ComicTable,
    corpus: &CorpusResult,
    format: SpeakersFormat,
) -> AppResult<()> {
    let no_quotes = corpus.no_quotes_n.iter().map(ToString::to_string).collect();
    let odd_quotes = corpus.odd_quotes_n.iter().map(ToString::to_string).collect();

    let speakers = match format {
        SpeakersFormat::Literal => corpus
            .comics_speakers
            .iter()
            .map(|panels| format_speakers(panels))
            .collect(),
        SpeakersFormat::Json => corpus
            .comics_speakers
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()
            .map_err(TableError::from)?,
    };

    table.set_column(NO_QUOTES_COLUMN, no_quotes)?;
    table.set_column(ODD_QUOTES_COLUMN, odd_quotes)?;
    table.set_column(SPEAKERS_COLUMN, speakers)?;
    Ok(())
}
