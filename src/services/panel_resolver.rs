//! 分格说话人判定 - 业务能力层
//!
//! 只处理单个分格：找出分格中的角色名和对白，
//! 为每段对白选出引号前最近出现的角色名。不关心分格之间的顺序，
//! "最近说话人"由调用方传入并接收更新后的值。

use std::sync::Arc;

use crate::infrastructure::{Token, Tokenizer};
use crate::models::{PanelClass, PanelResolution, RecognizedNameSet, SpeakerAssignment};
use crate::services::quote_locator::{locate_quotes, pair_spans, QuoteSpan};

/// 分格说话人判定
///
/// 持有只读共享的分词器和角色名集合，克隆开销很小
#[derive(Clone)]
pub struct PanelResolver {
    tokenizer: Arc<dyn Tokenizer>,
    names: Arc<RecognizedNameSet>,
    trailing_mention_fallback: bool,
}

impl PanelResolver {
    pub fn new(tokenizer: Arc<dyn Tokenizer>, names: Arc<RecognizedNameSet>) -> Self {
        Self {
            tokenizer,
            names,
            trailing_mention_fallback: false,
        }
    }

    /// 引号前没有角色名且最近说话人为空时，改用引号之后第一个出现的角色名
    pub fn with_trailing_mention_fallback(mut self, enabled: bool) -> Self {
        self.trailing_mention_fallback = enabled;
        self
    }

    /// 分格中出现的角色名（小写），按出现顺序排列
    pub fn mentions(&self, text: &str) -> Vec<Token> {
        self.tokenizer
            .tokenize(text)
            .into_iter()
            .filter_map(|token| {
                let word = token.word.to_lowercase();
                self.names
                    .contains(&word)
                    .then(|| Token::new(word, token.start))
            })
            .collect()
    }

    /// 判定一个分格
    ///
    /// # 参数
    /// - `text`: 分格文本
    /// - `last_speaker`: 之前分格留下的最近说话人（可能为空）
    ///
    /// # 返回
    /// 本分格的说话人列表、更新后的最近说话人以及分格分类
    pub fn resolve(&self, text: &str, last_speaker: &str) -> PanelResolution {
        let mentions = self.mentions(text);
        let quotes = locate_quotes(text);

        let (class, assignments) = if quotes.is_empty() {
            (PanelClass::NoQuotes, Vec::new())
        } else if quotes.len() % 2 != 0 {
            (PanelClass::OddQuotes, Vec::new())
        } else {
            let assignments = pair_spans(&quotes)
                .into_iter()
                .map(|span| {
                    let speaker = self.speaker_for(span, &mentions, last_speaker);
                    SpeakerAssignment::new(speaker, span.start, span.end)
                })
                .collect();
            (PanelClass::Resolved, assignments)
        };

        // 无论分类如何，分格中最后出现的角色名都成为新的最近说话人
        let last_speaker = mentions
            .iter()
            .max_by_key(|token| token.start)
            .map(|token| token.word.clone())
            .unwrap_or_else(|| last_speaker.to_string());

        PanelResolution {
            assignments,
            last_speaker,
            class,
        }
    }

    fn speaker_for(&self, span: QuoteSpan, mentions: &[Token], last_speaker: &str) -> String {
        if let Some(token) = nearest_preceding(mentions, span.start) {
            return token.word.clone();
        }

        if self.trailing_mention_fallback && last_speaker.is_empty() {
            if let Some(token) = mentions
                .iter()
                .filter(|t| t.start > span.end)
                .min_by_key(|t| t.start)
            {
                return token.word.clone();
            }
        }

        last_speaker.to_string()
    }
}

/// 起始位置严格小于 `offset` 的角色名中最靠后的一个
pub fn nearest_preceding(mentions: &[Token], offset: usize) -> Option<&Token> {
    mentions
        .iter()
        .filter(|token| token.start < offset)
        .max_by_key(|token| token.start)
}
