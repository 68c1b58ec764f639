//! 分词器 - 基础设施层
//!
//! 只暴露一种能力：把一段文本切成有序的 (词, 起始字符偏移) 序列。
//! 核心算法只依赖 [`Tokenizer`] trait，具体的切词规则可以替换。

use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

/// 分词结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// 词本身
    pub word: String,
    /// 词在原文中的起始位置（字符偏移，不是字节偏移）
    pub start: usize,
}

impl Token {
    pub fn new(word: impl Into<String>, start: usize) -> Self {
        Self {
            word: word.into(),
            start,
        }
    }
}

/// 分词能力
///
/// 实现必须按从左到右的顺序返回词
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// 基于 Unicode 词边界（UAX #29）的英文分词器
///
/// 只保留含有字母或数字的片段，标点和空白被丢弃。
/// 所有格词尾 `'s` / `’s` 会被去掉，`lucy's` 切成 `lucy`
#[derive(Debug, Default, Clone, Copy)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        WordTokenizer
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut char_offset = 0;
        let mut byte_cursor = 0;

        text.unicode_word_indices()
            .map(|(byte_start, word)| {
                char_offset += text[byte_cursor..byte_start].chars().count();
                byte_cursor = byte_start;
                Token::new(strip_possessive(word), char_offset)
            })
            .collect()
    }
}

const POSSESSIVE_SUFFIXES: [&str; 4] = ["'s", "'S", "\u{2019}s", "\u{2019}S"];

/// 去掉所有格词尾，只剩词尾时保持原样
fn strip_possessive(word: &str) -> &str {
    POSSESSIVE_SUFFIXES
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(word)
}
