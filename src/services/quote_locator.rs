//! 引号定位 - 业务能力层

/// 对白定界符
pub const QUOTE: char = '"';

/// 一段对白的两个引号位置（字符偏移），对白内容严格位于两者之间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteSpan {
    pub start: usize,
    pub end: usize,
}

/// 按从左到右的顺序返回所有双引号的字符偏移；没有引号时返回空列表
pub fn locate_quotes(text: &str) -> Vec<usize> {
    text.chars()
        .enumerate()
        .filter(|&(_, ch)| ch == QUOTE)
        .map(|(idx, _)| idx)
        .collect()
}

/// 把引号位置两两配对：第 1 与第 2 个、第 3 与第 4 个……
///
/// 奇数个时最后一个落单的引号被忽略，调用方应先检查数量
pub fn pair_spans(offsets: &[usize]) -> Vec<QuoteSpan> {
    offsets
        .chunks_exact(2)
        .map(|pair| QuoteSpan {
            start: pair[0],
            end: pair[1],
        })
        .collect()
}
