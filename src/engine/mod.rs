// ==========================================
// 餐饮备餐聚合引擎 - 引擎层
// ==========================================
// 职责: 归一化 / 分类 / 聚合 / 营业日与时段划分
// 红线: 纯函数式计算，无 I/O、不返回错误;
//       只消费边界层产出的 Order
// ==========================================

pub mod aggregator;
pub mod classifier;
pub mod clock;
pub mod normalizer;
pub mod order_detail;
pub mod partitioner;
pub mod prep_board;
pub mod status;

// 重导出核心引擎
pub use aggregator::PrepAggregator;
pub use classifier::{ItemClassifier, PriorityRule, RuleCondition, EXCLUDE_KEYWORDS, PRIORITY_RULES};
pub use clock::{Clock, FixedClock, SystemClock};
pub use normalizer::{merge_key, ItemNormalizer};
pub use order_detail::group_order_items;
pub use partitioner::{format_day_key, DayKey, DayPartitioner};
pub use prep_board::PrepBoard;
pub use status::{
    StatusEngine, StatusRules, DEFAULT_AUTO_PROGRESS_LEAD_MINUTES, DUE_SOON_AHEAD_MINUTES,
    DUE_SOON_GRACE_MINUTES,
};
