// ==========================================
// 餐饮备餐聚合引擎 - 订单导入 Trait
// ==========================================
// 职责: 定义边界归一化接口（不包含实现）
// 红线: 接口不返回错误,字段缺失或类型不符时降级为默认值
// ==========================================

use crate::domain::order::{LineItem, Order};
use serde_json::{Map, Value};

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 原始订单 JSON（多套历史字段名）→ 严格 Order
// 实现者: field_mapper::FieldMapper
pub trait FieldMapper: Send + Sync {
    /// 映射单条订单
    ///
    /// # 参数
    /// - record: 订单 JSON 对象
    /// - index: 在响应中的位置（0 起，用于缺失 id 时的日志）
    fn map_to_order(&self, record: &Map<String, Value>, index: usize) -> Order;

    /// 映射单条明细
    fn map_to_line_item(&self, record: &Value) -> LineItem;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 单值清洗与类型转换
// 实现者: data_cleaner::DataCleaner
pub trait DataCleaner: Send + Sync {
    /// 文本取值: 非空字符串原样返回，数字转为字符串，其他为 None
    fn text_value(&self, value: &Value) -> Option<String>;

    /// 数量转换: 数字截断为整数，数字字符串解析，其余为 1
    fn quantity_value(&self, value: &Value) -> i64;

    /// 时间取值: 字符串原样保留，数字视为毫秒时间戳
    fn timestamp_value(&self, value: &Value) -> Option<String>;

    /// TRIM + 空串转 None
    fn normalize_null(&self, value: Option<String>) -> Option<String>;
}
