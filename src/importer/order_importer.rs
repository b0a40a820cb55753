// ==========================================
// 餐饮备餐聚合引擎 - 订单导入器
// ==========================================
// 职责: 订单列表响应（文件 / 字符串 / JSON 值）→ Vec<Order>
// 响应格式: 顶层数组，或 { "data": [...] }
// ==========================================

use crate::domain::order::Order;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper as DefaultFieldMapper;
use crate::importer::order_importer_trait::FieldMapper;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

pub struct OrderImporter {
    field_mapper: Box<dyn FieldMapper>,
}

impl Default for OrderImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderImporter {
    pub fn new() -> Self {
        Self::with_field_mapper(Box::new(DefaultFieldMapper::new()))
    }

    /// 注入自定义字段映射（例如新的后端字段命名）
    pub fn with_field_mapper(field_mapper: Box<dyn FieldMapper>) -> Self {
        Self { field_mapper }
    }

    /// 从 JSON 文件导入订单
    ///
    /// # 返回
    /// - Err(FileNotFound / FileReadError): 文件不可读
    /// - Err(JsonParseError): JSON 语法错误
    #[instrument(skip(self, file_path))]
    pub fn import_from_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<Order>> {
        let path = file_path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        info!(file_path = %path.display(), "开始导入订单");
        let content = std::fs::read_to_string(path)?;
        self.import_from_str(&content)
    }

    /// 从 JSON 字符串导入订单
    pub fn import_from_str(&self, content: &str) -> ImportResult<Vec<Order>> {
        let value: Value = serde_json::from_str(content)?;
        Ok(self.import_from_value(&value))
    }

    /// 从已解码的 JSON 响应导入订单（永不失败）
    #[instrument(skip(self, response))]
    pub fn import_from_value(&self, response: &Value) -> Vec<Order> {
        let records = match response {
            Value::Array(arr) => arr.as_slice(),
            Value::Object(obj) => match obj.get("data") {
                Some(Value::Array(arr)) => arr.as_slice(),
                _ => {
                    warn!("响应对象缺少 data 数组，按空列表处理");
                    &[]
                }
            },
            _ => {
                warn!("响应既不是数组也不是对象，按空列表处理");
                &[]
            }
        };

        let mut orders = Vec::with_capacity(records.len());
        let mut skipped = 0usize;
        for (index, record) in records.iter().enumerate() {
            match record.as_object() {
                Some(obj) => orders.push(self.field_mapper.map_to_order(obj, index)),
                None => {
                    skipped += 1;
                    warn!(index, "订单记录不是 JSON 对象，已跳过");
                }
            }
        }

        debug!(total = records.len(), imported = orders.len(), skipped, "订单映射完成");
        orders
    }
}
