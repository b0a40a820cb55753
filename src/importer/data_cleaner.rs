// ==========================================
// 餐饮备餐聚合引擎 - 数据清洗器实现
// ==========================================
// 职责: JSON 单值 → 文本 / 数量 / 时间戳字符串
// 红线: 永不失败,无法识别的值降级为默认值
// ==========================================

use crate::importer::order_importer_trait::DataCleaner as DataCleanerTrait;
use serde_json::Value;

/// 数量缺失或无法解析时的默认值
pub const DEFAULT_QUANTITY: i64 = 1;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn text_value(&self, value: &Value) -> Option<String> {
        match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn quantity_value(&self, value: &Value) -> i64 {
        match value {
            Value::Number(n) => number_to_quantity(n),
            Value::String(s) => parse_quantity_text(s),
            _ => DEFAULT_QUANTITY,
        }
    }

    fn timestamp_value(&self, value: &Value) -> Option<String> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .map(|ms| ms.to_string()),
            _ => None,
        }
    }

    fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }
}

fn number_to_quantity(n: &serde_json::Number) -> i64 {
    if let Some(i) = n.as_i64() {
        return i;
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => f.trunc() as i64,
        _ => DEFAULT_QUANTITY,
    }
}

// 小数截断取整; 空串 / 非数字 → 默认值
fn parse_quantity_text(s: &str) -> i64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return DEFAULT_QUANTITY;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return i;
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => f.trunc() as i64,
        _ => DEFAULT_QUANTITY,
    }
}
