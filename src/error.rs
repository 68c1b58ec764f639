use std::path::Path;

use thiserror::Error;

use crate::models::literal::LiteralError;

/// 应用程序错误类型
///
/// 核心算法（分词、引号定位、说话人判定）不会失败，
/// 这里只描述 I/O 层（表格、名单、配置）的错误。
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 表格读写错误
    #[error("表格错误: {0}")]
    Table(#[from] TableError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 无法确定当前工作目录
    #[error("无法获取当前工作目录: {0}")]
    CurrentDirUnavailable(#[source] std::io::Error),
}

/// 表格读写错误
#[derive(Debug, Error)]
pub enum TableError {
    /// 表头中缺少必需的列
    #[error("表格 {path} 缺少列 '{column}'")]
    MissingColumn { path: String, column: String },
    /// 某一行的列表字面量无法解析
    #[error("第 {row} 行的列 '{column}' 无法解析: {source}")]
    LiteralParseFailed {
        row: usize,
        column: String,
        #[source]
        source: LiteralError,
    },
    /// 分隔文本解析或写入失败
    #[error("CSV 处理失败 ({path}): {source}")]
    Csv {
        path: String,
        #[source]
        source: csv_async::Error,
    },
    /// 结果列与表格行数不一致
    #[error("结果行数 {actual} 与表格行数 {expected} 不一致")]
    RowCountMismatch { expected: usize, actual: usize },
    /// 说话人结构序列化失败
    #[error("说话人列序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 分隔符不是单个 ASCII 字符
    #[error("分隔符 '{value}' 必须是单个 ASCII 字符")]
    InvalidDelimiter { value: char },
    /// 数值配置超出范围
    #[error("配置项 {name} 必须大于等于 1")]
    MustBePositive { name: String },
    /// 未知的说话人列格式
    #[error("未知的说话人列格式: {value}")]
    UnknownSpeakersFormat { value: String },
    /// TOML 配置文件解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误，不存在的文件单独归类
    pub fn file_read_failed(path: &Path, source: std::io::Error) -> Self {
        let path = path.display().to_string();
        if source.kind() == std::io::ErrorKind::NotFound {
            AppError::File(FileError::NotFound { path })
        } else {
            AppError::File(FileError::ReadFailed { path, source })
        }
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: &Path, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 创建 CSV 错误
    pub fn csv(path: &Path, source: csv_async::Error) -> Self {
        AppError::Table(TableError::Csv {
            path: path.display().to_string(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_reported_as_not_found() {
        let err = AppError::file_read_failed(
            Path::new("character_names.txt"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, AppError::File(FileError::NotFound { .. })));
        assert!(err.to_string().contains("character_names.txt"));
    }

    #[test]
    fn test_other_io_errors_keep_their_source() {
        let err = AppError::file_read_failed(
            Path::new("table.csv"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, AppError::File(FileError::ReadFailed { .. })));
        assert!(std::error::Error::source(&err).is_some());
    }
}
