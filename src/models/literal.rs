//! 列表字面量的读写
//!
//! 表格中的分格文本列保存为 `['lucy walks in.', '"hi," said linus.']` 形式的
//! 字符串列表字面量；输出的 `comics_speakers` 列使用同样风格的嵌套列表。

use std::fmt::Write as _;

use thiserror::Error;

use crate::models::speaker::SpeakerAssignment;

/// 字面量解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("位置 {position}: {message}")]
pub struct LiteralError {
    /// 出错位置（字符偏移）
    pub position: usize,
    pub message: String,
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> LiteralError {
        LiteralError {
            position: self.pos,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), LiteralError> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(ch) => Err(self.error(format!("期望 '{}'，实际为 '{}'", expected, ch))),
            None => Err(self.error(format!("期望 '{}'，但已到结尾", expected))),
        }
    }

    fn hex_escape(&mut self, digits: usize) -> Result<char, LiteralError> {
        let start = self.pos;
        let mut value = 0u32;
        for _ in 0..digits {
            let digit = self
                .bump()
                .and_then(|ch| ch.to_digit(16))
                .ok_or_else(|| self.error("无效的十六进制转义"))?;
            value = value * 16 + digit;
        }
        char::from_u32(value).ok_or(LiteralError {
            position: start,
            message: format!("无效的码点 {:#x}", value),
        })
    }

    fn string(&mut self) -> Result<String, LiteralError> {
        let quote = match self.bump() {
            Some(q @ ('\'' | '"')) => q,
            Some(other) => return Err(self.error(format!("期望字符串，实际为 '{}'", other))),
            None => return Err(self.error("期望字符串，但已到结尾")),
        };

        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("字符串没有结束")),
                Some(ch) if ch == quote => return Ok(out),
                Some('\\') => {
                    let escaped = self.bump().ok_or_else(|| self.error("转义没有结束"))?;
                    match escaped {
                        '\\' | '\'' | '"' => out.push(escaped),
                        'n' => out.push('\n'),
                        'r' => out.push('\r'),
                        't' => out.push('\t'),
                        '0' => out.push('\0'),
                        'a' => out.push('\x07'),
                        'b' => out.push('\x08'),
                        'f' => out.push('\x0c'),
                        'v' => out.push('\x0b'),
                        '\n' => {}
                        'x' => out.push(self.hex_escape(2)?),
                        'u' => out.push(self.hex_escape(4)?),
                        'U' => out.push(self.hex_escape(8)?),
                        other => {
                            // 未知转义按原样保留
                            out.push('\\');
                            out.push(other);
                        }
                    }
                }
                Some(ch) => out.push(ch),
            }
        }
    }
}

/// 解析字符串列表字面量
///
/// 支持单引号/双引号字符串、常见反斜杠转义、任意空白以及末尾多余的逗号
pub fn parse_string_list(input: &str) -> Result<Vec<String>, LiteralError> {
    let mut cursor = Cursor::new(input);
    let mut items = Vec::new();

    cursor.skip_whitespace();
    cursor.expect('[')?;
    cursor.skip_whitespace();

    if cursor.peek() == Some(']') {
        cursor.pos += 1;
    } else {
        loop {
            items.push(cursor.string()?);
            cursor.skip_whitespace();
            match cursor.bump() {
                Some(']') => break,
                Some(',') => {
                    cursor.skip_whitespace();
                    if cursor.peek() == Some(']') {
                        cursor.pos += 1;
                        break;
                    }
                }
                Some(other) => {
                    cursor.pos -= 1;
                    return Err(cursor.error(format!("期望 ',' 或 ']'，实际为 '{}'", other)));
                }
                None => return Err(cursor.error("列表没有结束")),
            }
        }
    }

    cursor.skip_whitespace();
    match cursor.peek() {
        None => Ok(items),
        Some(other) => Err(cursor.error(format!("列表之后还有多余内容 '{}'", other))),
    }
}

/// 按 Python `repr` 的规则给字符串加引号
pub fn quote_str(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c == '\x7f' => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// 把一个漫画的说话人结构写成嵌套列表字面量
///
/// 例如 `[[], [['lucy', 0, 7]]]`
pub fn format_speakers(panels: &[Vec<SpeakerAssignment>]) -> String {
    let panels: Vec<String> = panels
        .iter()
        .map(|panel| {
            let spans: Vec<String> = panel
                .iter()
                .map(|a| format!("[{}, {}, {}]", quote_str(&a.speaker), a.start, a.end))
                .collect();
            format!("[{}]", spans.join(", "))
        })
        .collect();
    format!("[{}]", panels.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_quotes() {
        let panels =
            parse_string_list(r#"['lucy walks in.', '"hello," said linus.', "it's snoopy"]"#)
                .unwrap();
        assert_eq!(
            panels,
            vec![
                "lucy walks in.".to_string(),
                "\"hello,\" said linus.".to_string(),
                "it's snoopy".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_escapes() {
        let panels = parse_string_list(r#"['he said \'no\' \"twice\"', 'tab\there', 'caf\xe9']"#)
            .unwrap();
        assert_eq!(panels[0], "he said 'no' \"twice\"");
        assert_eq!(panels[1], "tab\there");
        assert_eq!(panels[2], "café");
    }

    #[test]
    fn test_parse_empty_and_trailing_comma() {
        assert!(parse_string_list("[]").unwrap().is_empty());
        assert!(parse_string_list("  [ ]  ").unwrap().is_empty());
        assert_eq!(parse_string_list("['a', ]").unwrap(), vec!["a".to_string()]);
    }

    #[test]
    fn test_parse_errors_report_position() {
        let err = parse_string_list("['a' 'b']").unwrap_err();
        assert_eq!(err.position, 5);

        assert!(parse_string_list("").is_err());
        assert!(parse_string_list("['unterminated]").is_err());
        assert!(parse_string_list("['a'] extra").is_err());
        assert!(parse_string_list("[1, 2]").is_err());
    }

    #[test]
    fn test_quote_str_follows_repr_rules() {
        assert_eq!(quote_str("lucy"), "'lucy'");
        assert_eq!(quote_str("it's"), "\"it's\"");
        assert_eq!(quote_str("both ' and \""), "'both \\' and \"'");
        assert_eq!(quote_str("a\\b"), "'a\\\\b'");
        assert_eq!(quote_str(""), "''");
    }

    #[test]
    fn test_format_speakers_nested_lists() {
        let panels = vec![
            vec![],
            vec![
                SpeakerAssignment::new("lucy", 0, 7),
                SpeakerAssignment::new("", 20, 31),
            ],
        ];
        assert_eq!(
            format_speakers(&panels),
            "[[], [['lucy', 0, 7], ['', 20, 31]]]"
        );
        assert_eq!(format_speakers(&[]), "[]");
    }
}
