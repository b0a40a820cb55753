// ==========================================
// 餐饮备餐聚合引擎 - 备餐清单 CSV 导出
// ==========================================
// 列: section,rank,tag,name,quantity
// section: PRIORITY / OTHER; 非优先条目 rank 与 tag 留空
// ==========================================

use crate::domain::prep::{AggregatedItem, PrepList};
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const CSV_HEADER: [&str; 5] = ["section", "rank", "tag", "name", "quantity"];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// 写入任意 Writer; 优先条目在前
pub fn write_prep_csv<W: Write>(list: &PrepList, writer: W) -> ExportResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for item in &list.priority {
        wtr.write_record(to_row("PRIORITY", item))?;
    }
    for item in &list.others {
        wtr.write_record(to_row("OTHER", item))?;
    }

    wtr.flush()?;
    Ok(())
}

/// 写入文件（覆盖）
pub fn write_prep_csv_to_path<P: AsRef<Path>>(list: &PrepList, path: P) -> ExportResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_prep_csv(list, file)?;
    info!(
        path = %path.display(),
        rows = list.priority.len() + list.others.len(),
        "备餐清单已导出"
    );
    Ok(())
}

fn to_row(section: &str, item: &AggregatedItem) -> [String; 5] {
    let (rank, tag) = match item.priority_tag {
        Some(tag) => (tag.rank().to_string(), tag.as_str().to_string()),
        None => (String::new(), String::new()),
    };
    [
        section.to_string(),
        rank,
        tag,
        item.name.clone(),
        item.quantity.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::PriorityTag;

    fn item(name: &str, quantity: i64, tag: Option<PriorityTag>) -> AggregatedItem {
        AggregatedItem {
            name: name.to_string(),
            merge_key: name.to_lowercase(),
            quantity,
            priority_tag: tag,
        }
    }

    #[test]
    fn test_rows_in_display_order() {
        let list = PrepList {
            priority: vec![item("Hot Nugget Tray", 2, Some(PriorityTag::HotNuggetTray))],
            others: vec![item("Cookies, Chocolate Chunk", 24, None)],
        };

        let mut buf = Vec::new();
        write_prep_csv(&list, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "section,rank,tag,name,quantity");
        assert_eq!(lines[1], "PRIORITY,2,HOT_NUGGET_TRAY,Hot Nugget Tray,2");
        assert_eq!(lines[2], "OTHER,,,\"Cookies, Chocolate Chunk\",24");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_list_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prep.csv");
        write_prep_csv_to_path(&PrepList::default(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), "section,rank,tag,name,quantity");
    }
}
