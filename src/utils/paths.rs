use std::path::{Path, PathBuf};

use crate::error::{AppResult, FileError};

/// 返回与当前工作目录同级的目录路径
///
/// 例如当前目录为 `/work/06_speakers` 时，`sibling_directory_path("05_spell_check")`
/// 返回 `/work/05_spell_check`
pub fn sibling_directory_path(sibling_directory_name: &str) -> AppResult<PathBuf> {
    let current = std::env::current_dir().map_err(FileError::CurrentDirUnavailable)?;
    Ok(sibling_of(&current, sibling_directory_name))
}

/// 计算 `dir` 的兄弟目录；`dir` 没有父目录时（根目录）直接拼在 `dir` 下
pub fn sibling_of(dir: &Path, sibling_directory_name: &str) -> PathBuf {
    dir.parent().unwrap_or(dir).join(sibling_directory_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_of_replaces_last_component() {
        let dir = Path::new("/work/06_speakers");
        assert_eq!(
            sibling_of(dir, "05_spell_check"),
            PathBuf::from("/work/05_spell_check")
        );
    }

    #[test]
    fn test_sibling_of_root_stays_under_root() {
        assert_eq!(sibling_of(Path::new("/"), "data"), PathBuf::from("/data"));
    }
}
