//! 漫画处理流程 - 流程层
//!
//! 核心职责：按顺序处理"一个漫画"的所有分格
//!
//! 分格之间通过"最近说话人"串联：上一格最后出现的角色名，
//! 是下一格中找不到前置角色名的对白的兜底说话人。
//! 这条链决定了分格必须严格按顺序处理，流程在漫画边界处重置。

use tracing::debug;

use crate::models::ComicResult;
use crate::services::PanelResolver;
use crate::utils::logging::truncate_text;
use crate::workflow::comic_ctx::ComicCtx;

/// 漫画处理流程
///
/// - 不持有可变状态，"最近说话人"只存在于单次 `run` 中
/// - 只依赖业务能力（services）
#[derive(Clone)]
pub struct ComicFlow {
    panel_resolver: PanelResolver,
    verbose_logging: bool,
}

impl ComicFlow {
    /// 创建新的漫画处理流程
    pub fn new(panel_resolver: PanelResolver) -> Self {
        Self {
            panel_resolver,
            verbose_logging: false,
        }
    }

    pub fn with_verbose_logging(mut self, verbose: bool) -> Self {
        self.verbose_logging = verbose;
        self
    }

    /// 处理一个漫画
    ///
    /// # 参数
    /// - `panels`: 按顺序排列的分格文本
    ///
    /// # 返回
    /// 每个分格的说话人以及无引号/奇数引号分格数
    pub fn run<S: AsRef<str>>(&self, panels: &[S]) -> ComicResult {
        let (result, _last_speaker) = panels.iter().fold(
            (ComicResult::default(), String::new()),
            |(mut result, last_speaker), panel| {
                let resolution = self.panel_resolver.resolve(panel.as_ref(), &last_speaker);
                let next_speaker = resolution.last_speaker.clone();
                result.record(resolution);
                (result, next_speaker)
            },
        );
        result
    }

    /// 带上下文的处理，开启详细日志时输出每个分格的结果
    pub fn run_with_ctx<S: AsRef<str>>(&self, panels: &[S], ctx: &ComicCtx) -> ComicResult {
        let result = self.run(panels);

        if self.verbose_logging {
            for (panel, speakers) in panels.iter().zip(&result.speakers) {
                let names: Vec<&str> = speakers.iter().map(|a| a.speaker.as_str()).collect();
                debug!(
                    "{} 📝 {} → {:?}",
                    ctx,
                    truncate_text(panel.as_ref(), 40),
                    names
                );
            }
            debug!(
                "{} ✓ 对白 {} 段 | 无引号 {} | 奇数引号 {}",
                ctx,
                result.span_count(),
                result.no_quotes,
                result.odd_quotes
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::WordTokenizer;
    use crate::models::{RecognizedNameSet, SpeakerAssignment};
    use std::sync::Arc;

    fn flow(names: &[&str]) -> ComicFlow {
        let resolver = PanelResolver::new(
            Arc::new(WordTokenizer),
            Arc::new(RecognizedNameSet::from_names(names.iter().copied())),
        );
        ComicFlow::new(resolver)
    }

    #[test]
    fn test_speaker_carries_over_from_previous_panel() {
        let result = flow(&["lucy", "linus"]).run(&["lucy walks in.", "\"hello,\" said linus."]);

        assert_eq!(result.no_quotes, 1);
        assert_eq!(result.odd_quotes, 0);
        assert_eq!(
            result.speakers,
            vec![vec![], vec![SpeakerAssignment::new("lucy", 0, 7)]]
        );
    }

    #[test]
    fn test_first_panel_has_empty_carried_speaker() {
        let result = flow(&["lucy"]).run(&["\"who's there?\"", "lucy opens the door."]);

        assert_eq!(result.speakers[0], vec![SpeakerAssignment::new("", 0, 13)]);
        assert_eq!(result.no_quotes, 1);
    }

    #[test]
    fn test_carry_over_skips_panels_without_names() {
        let result = flow(&["charlie"]).run(&[
            "charlie stands on the mound.",
            "the wind blows.",
            "\"sigh.\"",
        ]);

        assert_eq!(result.speakers[2], vec![SpeakerAssignment::new("charlie", 0, 6)]);
        assert_eq!(result.no_quotes, 2);
    }

    #[test]
    fn test_odd_quote_panel_still_passes_its_names_on() {
        let result = flow(&["lucy", "snoopy"]).run(&[
            "snoopy barks \"woof.",
            "\"down, boy.\"",
        ]);

        assert_eq!(result.odd_quotes, 1);
        assert!(result.speakers[0].is_empty());
        assert_eq!(result.speakers[1][0].speaker, "snoopy");
    }

    #[test]
    fn test_state_does_not_leak_between_comics() {
        let flow = flow(&["lucy"]);
        flow.run(&["lucy walks in."]);
        let second = flow.run(&["\"hi.\""]);

        assert_eq!(second.speakers[0][0].speaker, "");
    }

    #[test]
    fn test_empty_comic() {
        let panels: [&str; 0] = [];
        assert_eq!(flow(&["lucy"]).run(&panels), ComicResult::default());
    }

    #[test]
    fn test_run_with_ctx_matches_run() {
        let flow = flow(&["lucy"]).with_verbose_logging(true);
        let panels = ["lucy: \"hi\"".to_string()];
        let ctx = ComicCtx::new("1960-05-01".to_string(), 1, 1);
        assert_eq!(flow.run_with_ctx(&panels, &ctx), flow.run(&panels));
    }
}
