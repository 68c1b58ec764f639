//! 同名角色区分 - 业务能力层
//!
//! Patty 与 Peppermint Patty 在名单中共用 "patty" 这个词，但两人从未在同一天的漫画中出现。
//! 在 Peppermint Patty 出场的日期里，把说话人 "patty" 改写为 "pep_patty"。

use tracing::debug;

use crate::models::{CorrectionIndex, SpeakerAssignment};

/// 名单中的原始名字
pub const PATTY: &str = "patty";
/// Peppermint Patty 的缩写
pub const PEP_PATTY: &str = "pep_patty";

/// 按漫画标识改写说话人
pub struct NameDisambiguator {
    target: String,
    replacement: String,
    index: CorrectionIndex,
}

impl NameDisambiguator {
    pub fn new(target: impl Into<String>, replacement: impl Into<String>, index: CorrectionIndex) -> Self {
        Self {
            target: target.into(),
            replacement: replacement.into(),
            index,
        }
    }

    /// `index` 为 Peppermint Patty 出场日期
    pub fn peppermint_patty(index: CorrectionIndex) -> Self {
        Self::new(PATTY, PEP_PATTY, index)
    }

    /// 改写整个语料
    ///
    /// # 参数
    /// - `comics_speakers`: 每个漫画的说话人结构，与 `ids` 一一对应
    /// - `ids`: 漫画标识
    ///
    /// # 返回
    /// 被改写的说话人数量
    pub fn apply(&self, comics_speakers: &mut [Vec<Vec<SpeakerAssignment>>], ids: &[String]) -> usize {
        let mut rewritten = 0;

        for (panels, id) in comics_speakers.iter_mut().zip(ids) {
            if !self.index.contains(id) {
                continue;
            }

            let mut count = 0;
            for assignment in panels.iter_mut().flatten() {
                if assignment.speaker == self.target {
                    assignment.speaker.clone_from(&self.replacement);
                    count += 1;
                }
            }

            if count > 0 {
                debug!("[漫画 {}] 改写 {} 个说话人: {} → {}", id, count, self.target, self.replacement);
            }
            rewritten += count;
        }

        rewritten
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> (Vec<Vec<Vec<SpeakerAssignment>>>, Vec<String>) {
        let speakers = vec![
            vec![
                vec![],
                vec![
                    SpeakerAssignment::new("patty", 0, 5),
                    SpeakerAssignment::new("charlie", 10, 20),
                ],
            ],
            vec![vec![SpeakerAssignment::new("patty", 3, 9)]],
        ];
        let ids = vec!["1966-08-22".to_string(), "1955-01-01".to_string()];
        (speakers, ids)
    }

    fn disambiguator() -> NameDisambiguator {
        NameDisambiguator::peppermint_patty(CorrectionIndex::from_ids(["1966-08-22"]))
    }

    #[test]
    fn test_rewrites_only_listed_comics() {
        let (mut speakers, ids) = corpus();

        let rewritten = disambiguator().apply(&mut speakers, &ids);

        assert_eq!(rewritten, 1);
        assert!(speakers[0][0].is_empty());
        assert_eq!(speakers[0][1][0].speaker, "pep_patty");
        assert_eq!(speakers[0][1][1].speaker, "charlie");
        assert_eq!(speakers[1][0][0].speaker, "patty");
    }

    #[test]
    fn test_second_pass_changes_nothing() {
        let (mut once, ids) = corpus();
        disambiguator().apply(&mut once, &ids);

        let mut twice = once.clone();
        let rewritten = disambiguator().apply(&mut twice, &ids);

        assert_eq!(rewritten, 0);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_spans_are_untouched() {
        let (mut speakers, ids) = corpus();
        disambiguator().apply(&mut speakers, &ids);
        assert_eq!(speakers[0][1][0], SpeakerAssignment::new("pep_patty", 0, 5));
    }
}
