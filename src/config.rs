use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, AppResult, ConfigError};
use crate::utils::paths::sibling_directory_path;

/// 指向 TOML 配置文件的环境变量
pub const CONFIG_FILE_ENV: &str = "COMIC_SPEAKERS_CONFIG";

/// `comics_speakers` 列的输出格式
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SpeakersFormat {
    /// 嵌套列表字面量，例如 `[[], [['lucy', 0, 7]]]`
    #[default]
    Literal,
    /// 带字段名的 JSON 记录
    Json,
}

impl std::str::FromStr for SpeakersFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "literal" => Ok(SpeakersFormat::Literal),
            "json" => Ok(SpeakersFormat::Json),
            other => Err(ConfigError::UnknownSpeakersFormat {
                value: other.to_string(),
            }),
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 输入表格所在的兄弟目录名
    pub table_folder: String,
    /// 输入表格文件名
    pub table_file: String,
    /// 显式指定的输入表格路径（优先于兄弟目录）
    pub table_path: Option<String>,
    /// 存放分格文本列表的列名
    pub text_column: String,
    /// 漫画标识列名（日期/文件名）
    pub id_column: String,
    /// 表格分隔符
    pub delimiter: char,
    /// 角色名单文件
    pub character_names_file: String,
    /// 需要改名的漫画日期名单
    pub correction_dates_file: String,
    /// 输出表格文件
    pub output_file: String,
    /// `comics_speakers` 列的格式
    pub speakers_format: SpeakersFormat,
    /// 同时处理的漫画数量
    pub max_concurrent_comics: usize,
    /// 每处理多少个漫画输出一次进度
    pub progress_interval: usize,
    /// 引号前后都找不到说话人时，是否采用引号之后第一个出现的名字
    pub trailing_mention_fallback: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_folder: "05_spell_check".to_string(),
            table_file: "table.csv".to_string(),
            table_path: None,
            text_column: "text_spell_corrected".to_string(),
            id_column: "filename".to_string(),
            delimiter: '^',
            character_names_file: "character_names.txt".to_string(),
            correction_dates_file: "peppermint_patty_dates.txt".to_string(),
            output_file: "table.csv".to_string(),
            speakers_format: SpeakersFormat::Literal,
            max_concurrent_comics: 8,
            progress_interval: 100,
            trailing_mention_fallback: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 默认值加上环境变量覆盖
    pub fn from_env() -> AppResult<Self> {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件读取配置，未给出的字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| AppError::file_read_failed(path, e))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    fn from_toml_str(content: &str, origin: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            AppError::Config(ConfigError::TomlParseFailed {
                path: origin.to_string(),
                source,
            })
        })
    }

    /// 加载配置：先读 `COMIC_SPEAKERS_CONFIG` 指向的 TOML 文件（如果有），再应用环境变量
    pub fn load() -> AppResult<Self> {
        let config = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::from_toml_file(Path::new(&path))?.with_env_overrides()?,
            Err(_) => Self::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    fn with_env_overrides(self) -> AppResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// 用 `lookup` 返回的值覆盖对应字段
    ///
    /// 数字和布尔值无法解析时沿用原值；`SPEAKERS_FORMAT` 无法识别时报错
    fn with_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let current = self;
        let parsed = |key: &str| lookup(key).and_then(|v| v.parse().ok());

        let speakers_format = match lookup("SPEAKERS_FORMAT") {
            Some(value) => value.parse::<SpeakersFormat>()?,
            None => current.speakers_format,
        };

        Ok(Self {
            table_folder: lookup("TABLE_FOLDER").unwrap_or(current.table_folder),
            table_file: lookup("TABLE_FILE").unwrap_or(current.table_file),
            table_path: lookup("TABLE_PATH").or(current.table_path),
            text_column: lookup("TEXT_COLUMN").unwrap_or(current.text_column),
            id_column: lookup("ID_COLUMN").unwrap_or(current.id_column),
            delimiter: lookup("TABLE_DELIMITER")
                .and_then(|v| v.parse().ok())
                .unwrap_or(current.delimiter),
            character_names_file: lookup("CHARACTER_NAMES_FILE")
                .unwrap_or(current.character_names_file),
            correction_dates_file: lookup("CORRECTION_DATES_FILE")
                .unwrap_or(current.correction_dates_file),
            output_file: lookup("OUTPUT_FILE").unwrap_or(current.output_file),
            speakers_format,
            max_concurrent_comics: parsed("MAX_CONCURRENT_COMICS")
                .unwrap_or(current.max_concurrent_comics),
            progress_interval: parsed("PROGRESS_INTERVAL").unwrap_or(current.progress_interval),
            trailing_mention_fallback: lookup("TRAILING_MENTION_FALLBACK")
                .and_then(|v| v.parse().ok())
                .unwrap_or(current.trailing_mention_fallback),
            verbose_logging: lookup("VERBOSE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(current.verbose_logging),
        })
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> AppResult<()> {
        self.delimiter_byte()?;
        if self.max_concurrent_comics == 0 {
            return Err(ConfigError::MustBePositive {
                name: "max_concurrent_comics".to_string(),
            }
            .into());
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::MustBePositive {
                name: "progress_interval".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// 分隔符对应的字节，CSV 读写只接受单字节分隔符
    pub fn delimiter_byte(&self) -> AppResult<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ConfigError::InvalidDelimiter {
                value: self.delimiter,
            }
            .into())
        }
    }

    /// 输入表格路径：显式路径优先，否则为当前目录的兄弟目录下的表格
    pub fn resolve_table_path(&self) -> AppResult<PathBuf> {
        match &self.table_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(sibling_directory_path(&self.table_folder)?.join(&self.table_file)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_corpus_layout() {
        let config = Config::default();
        assert_eq!(config.delimiter, '^');
        assert_eq!(config.text_column, "text_spell_corrected");
        assert_eq!(config.id_column, "filename");
        assert_eq!(config.progress_interval, 100);
        assert_eq!(config.speakers_format, SpeakersFormat::Literal);
        assert!(!config.trailing_mention_fallback);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            "table_path = \"/data/table.csv\"\nspeakers_format = \"json\"\nmax_concurrent_comics = 2\n",
            "inline",
        )
        .unwrap();

        assert_eq!(config.table_path.as_deref(), Some("/data/table.csv"));
        assert_eq!(config.speakers_format, SpeakersFormat::Json);
        assert_eq!(config.max_concurrent_comics, 2);
        assert_eq!(config.output_file, "table.csv");
        assert_eq!(
            config.resolve_table_path().unwrap(),
            PathBuf::from("/data/table.csv")
        );
    }

    #[test]
    fn test_bad_toml_is_a_config_error() {
        let err = Config::from_toml_str("max_concurrent_comics = \"many\"", "inline").unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::TomlParseFailed { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_ascii_delimiter_and_zero_sizes() {
        let config = Config {
            delimiter: '¦',
            ..Config::default()
        };
        assert!(config.delimiter_byte().is_err());

        let config = Config {
            progress_interval: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_overrides_replace_fields_and_keep_the_rest() {
        let vars = [
            ("TABLE_PATH", "/data/table.csv"),
            ("SPEAKERS_FORMAT", "json"),
            ("MAX_CONCURRENT_COMICS", "3"),
            ("PROGRESS_INTERVAL", "lots"),
        ];
        let config = Config::default().with_overrides(lookup(&vars)).unwrap();

        assert_eq!(config.table_path.as_deref(), Some("/data/table.csv"));
        assert_eq!(config.speakers_format, SpeakersFormat::Json);
        assert_eq!(config.max_concurrent_comics, 3);
        assert_eq!(config.progress_interval, 100);
        assert_eq!(config.text_column, "text_spell_corrected");
    }

    #[test]
    fn test_unknown_speakers_format_override_is_an_error() {
        let vars = [("SPEAKERS_FORMAT", "yaml")];
        let err = Config::default().with_overrides(lookup(&vars)).unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::UnknownSpeakersFormat { ref value }) if value == "yaml"
        ));
    }

    #[test]
    fn test_speakers_format_from_str() {
        assert_eq!("JSON".parse::<SpeakersFormat>().unwrap(), SpeakersFormat::Json);
        assert_eq!(" literal ".parse::<SpeakersFormat>().unwrap(), SpeakersFormat::Literal);
        assert!("yaml".parse::<SpeakersFormat>().is_err());
    }
}
