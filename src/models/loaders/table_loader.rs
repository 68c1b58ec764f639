use std::path::Path;

use csv_async::{AsyncReaderBuilder, AsyncWriterBuilder};
use futures::StreamExt;
use tokio::fs::File;

use crate::error::{AppError, AppResult, TableError};
use crate::models::comic::{Comic, ComicTable};
use crate::models::literal::parse_string_list;

/// 表格中需要用到的列
#[derive(Debug, Clone, Copy)]
pub struct TableLayout<'a> {
    /// 分隔符（单字节）
    pub delimiter: u8,
    /// 存放分格文本列表的列
    pub text_column: &'a str,
    /// 漫画标识列
    pub id_column: &'a str,
}

fn require_column(headers: &[String], column: &str, path: &Path) -> AppResult<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| {
            TableError::MissingColumn {
                path: path.display().to_string(),
                column: column.to_string(),
            }
            .into()
        })
}

/// 读取分隔文本表格，并把分格列解析为漫画
///
/// # 参数
/// - `path`: 表格路径
/// - `layout`: 分隔符与列名
///
/// # 返回
/// 保留全部原始列的表格，`comics` 与行一一对应
pub async fn load_comic_table(path: &Path, layout: TableLayout<'_>) -> AppResult<ComicTable> {
    let file = File::open(path)
        .await
        .map_err(|e| AppError::file_read_failed(path, e))?;

    let mut reader = AsyncReaderBuilder::new()
        .delimiter(layout.delimiter)
        .create_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .await
        .map_err(|e| AppError::csv(path, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let text_idx = require_column(&headers, layout.text_column, path)?;
    let id_idx = require_column(&headers, layout.id_column, path)?;

    let mut rows = Vec::new();
    let mut comics = Vec::new();
    let mut records = reader.records();

    while let Some(record) = records.next().await {
        let record = record.map_err(|e| AppError::csv(path, e))?;
        let row: Vec<String> = record.iter().map(str::to_string).collect();

        let text = row.get(text_idx).map(String::as_str).unwrap_or_default();
        let panels =
            parse_string_list(text).map_err(|source| TableError::LiteralParseFailed {
                row: rows.len(),
                column: layout.text_column.to_string(),
                source,
            })?;
        let id = row.get(id_idx).cloned().unwrap_or_default();

        comics.push(Comic::new(id, panels));
        rows.push(row);
    }

    tracing::debug!("读取表格 {}: {} 行", path.display(), rows.len());

    Ok(ComicTable {
        headers,
        rows,
        comics,
    })
}

/// 把表格写回分隔文本文件
pub async fn write_comic_table(path: &Path, delimiter: u8, table: &ComicTable) -> AppResult<()> {
    let file = File::create(path)
        .await
        .map_err(|e| AppError::file_write_failed(path, e))?;

    let mut writer = AsyncWriterBuilder::new()
        .delimiter(delimiter)
        .create_writer(file);

    writer
        .write_record(&table.headers)
        .await
        .map_err(|e| AppError::csv(path, e))?;

    for row in &table.rows {
        writer
            .write_record(row)
            .await
            .map_err(|e| AppError::csv(path, e))?;
    }

    writer
        .flush()
        .await
        .map_err(|e| AppError::file_write_failed(path, e))?;

    Ok(())
}
