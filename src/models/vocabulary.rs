use std::collections::HashSet;

/// 已知角色名集合（全部小写）
///
/// 整个语料运行期间只加载一次，所有漫画只读共享
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognizedNameSet {
    names: HashSet<String>,
}

impl RecognizedNameSet {
    /// 去掉首尾空白并转成小写，空行被忽略
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }

    /// `word` 应当已经是小写
    pub fn contains(&self, word: &str) -> bool {
        self.names.contains(word)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// 含有空白的名字永远不会匹配到单个词
    pub fn multi_word_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .names
            .iter()
            .filter(|name| name.chars().any(char::is_whitespace))
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }
}

/// 需要改名的漫画标识（日期）集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionIndex {
    ids: HashSet<String>,
}

impl CorrectionIndex {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = ids
            .into_iter()
            .map(|id| id.as_ref().trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        Self { ids }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
