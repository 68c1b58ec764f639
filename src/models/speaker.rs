use serde::{Deserialize, Serialize};

/// 一段对白的说话人
///
/// `start` / `end` 是包住对白的两个双引号在分格文本中的字符偏移
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerAssignment {
    /// 说话人，无法判定时为空字符串
    pub speaker: String,
    pub start: usize,
    pub end: usize,
}

impl SpeakerAssignment {
    pub fn new(speaker: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            speaker: speaker.into(),
            start,
            end,
        }
    }

    pub fn is_attributed(&self) -> bool {
        !self.speaker.is_empty()
    }
}

/// 分格分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelClass {
    /// 没有双引号，无法识别对白
    NoQuotes,
    /// 双引号数为奇数，无法可靠地划分对白
    OddQuotes,
    /// 双引号成对出现，已为每段对白指定说话人
    Resolved,
}

/// 单个分格的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelResolution {
    /// 按对白顺序排列的说话人
    pub assignments: Vec<SpeakerAssignment>,
    /// 处理完本分格后的"最近说话人"
    pub last_speaker: String,
    pub class: PanelClass,
}

/// 单个漫画的处理结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComicResult {
    /// 外层按分格，内层按对白
    pub speakers: Vec<Vec<SpeakerAssignment>>,
    /// 没有双引号的分格数
    pub no_quotes: usize,
    /// 双引号数为奇数的分格数
    pub odd_quotes: usize,
}

impl ComicResult {
    /// 累加一个分格的结果
    pub fn record(&mut self, panel: PanelResolution) {
        match panel.class {
            PanelClass::NoQuotes => self.no_quotes += 1,
            PanelClass::OddQuotes => self.odd_quotes += 1,
            PanelClass::Resolved => {}
        }
        self.speakers.push(panel.assignments);
    }

    pub fn span_count(&self) -> usize {
        self.speakers.iter().map(Vec::len).sum()
    }
}

/// 整个语料的处理结果：三列按输入行顺序平行排列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusResult {
    pub comics_speakers: Vec<Vec<Vec<SpeakerAssignment>>>,
    pub no_quotes_n: Vec<usize>,
    pub odd_quotes_n: Vec<usize>,
}

impl CorpusResult {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            comics_speakers: Vec::with_capacity(capacity),
            no_quotes_n: Vec::with_capacity(capacity),
            odd_quotes_n: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, comic: ComicResult) {
        self.comics_speakers.push(comic.speakers);
        self.no_quotes_n.push(comic.no_quotes);
        self.odd_quotes_n.push(comic.odd_quotes);
    }

    pub fn len(&self) -> usize {
        self.comics_speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comics_speakers.is_empty()
    }

    /// 汇总统计，用于日志
    pub fn stats(&self) -> CorpusStats {
        let assignments = || self.comics_speakers.iter().flatten().flatten();
        CorpusStats {
            comics: self.len(),
            panels: self.comics_speakers.iter().map(Vec::len).sum(),
            spans: assignments().count(),
            unattributed: assignments().filter(|a| !a.is_attributed()).count(),
            no_quotes: self.no_quotes_n.iter().sum(),
            odd_quotes: self.odd_quotes_n.iter().sum(),
        }
    }
}

impl FromIterator<ComicResult> for CorpusResult {
    fn from_iter<I: IntoIterator<Item = ComicResult>>(iter: I) -> Self {
        let mut result = CorpusResult::default();
        for comic in iter {
            result.push(comic);
        }
        result
    }
}

/// 语料汇总统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusStats {
    pub comics: usize,
    pub panels: usize,
    pub spans: usize,
    pub unattributed: usize,
    pub no_quotes: usize,
    pub odd_quotes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(class: PanelClass, assignments: Vec<SpeakerAssignment>) -> PanelResolution {
        PanelResolution {
            assignments,
            last_speaker: String::new(),
            class,
        }
    }

    #[test]
    fn test_record_counts_only_matching_class() {
        let mut comic = ComicResult::default();
        comic.record(panel(PanelClass::NoQuotes, vec![]));
        comic.record(panel(PanelClass::OddQuotes, vec![]));
        comic.record(panel(
            PanelClass::Resolved,
            vec![SpeakerAssignment::new("", 0, 4)],
        ));

        assert_eq!(comic.no_quotes, 1);
        assert_eq!(comic.odd_quotes, 1);
        assert_eq!(comic.speakers.len(), 3);
        assert_eq!(comic.span_count(), 1);
    }

    #[test]
    fn test_corpus_stats() {
        let corpus: CorpusResult = vec![
            ComicResult {
                speakers: vec![vec![], vec![SpeakerAssignment::new("lucy", 0, 7)]],
                no_quotes: 1,
                odd_quotes: 0,
            },
            ComicResult {
                speakers: vec![vec![SpeakerAssignment::new("", 3, 9)]],
                no_quotes: 0,
                odd_quotes: 2,
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(
            corpus.stats(),
            CorpusStats {
                comics: 2,
                panels: 3,
                spans: 2,
                unattributed: 1,
                no_quotes: 1,
                odd_quotes: 2,
            }
        );
        assert_eq!(corpus.no_quotes_n, vec![1, 0]);
        assert_eq!(corpus.odd_quotes_n, vec![0, 2]);
    }
}
