use crate::error::{AppResult, TableError};

/// 一个漫画：按顺序排列的分格文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comic {
    /// 漫画标识（通常是日期/文件名）
    pub id: String,
    pub panels: Vec<String>,
}

impl Comic {
    pub fn new(id: impl Into<String>, panels: Vec<String>) -> Self {
        Self {
            id: id.into(),
            panels,
        }
    }
}

/// 读入的整张表格
///
/// 保留所有原始列，写出时在末尾追加（或替换）结果列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// 与 `rows` 一一对应
    pub comics: Vec<Comic>,
}

impl ComicTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.comics.iter().map(|c| c.id.clone()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 设置一整列：已存在的同名列被覆盖，否则追加到末尾
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> AppResult<()> {
        if values.len() != self.rows.len() {
            return Err(TableError::RowCountMismatch {
                expected: self.rows.len(),
                actual: values.len(),
            }
            .into());
        }

        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    if idx < row.len() {
                        row[idx] = value;
                    } else {
                        row.resize(idx, String::new());
                        row.push(value);
                    }
                }
            }
            None => {
                self.headers.push(name.to_string());
                let width = self.headers.len() - 1;
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.resize(width, String::new());
                    row.push(value);
                }
            }
        }
        Ok(())
    }
}
