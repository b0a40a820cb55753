// ==========================================
// 餐饮备餐聚合引擎 - 领域类型定义
// ==========================================
// 职责: 订单状态 / 备餐优先标签 / 服务时段 / 取餐方式
// 序列化格式: SCREAMING_SNAKE_CASE (与后端订单 JSON 一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 订单状态 (Order Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    PendingReview, // 待审核
    Received,      // 已接收
    Accepted,      // 已接单
    Pending,       // 待处理
    InProgress,    // 制作中
    Ready,         // 待取餐
    Completed,     // 已完成
    Canceled,      // 已取消
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl OrderStatus {
    /// 从字符串解析订单状态（大小写不敏感，未知值返回 None）
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PENDING_REVIEW" => Some(OrderStatus::PendingReview),
            "RECEIVED" => Some(OrderStatus::Received),
            "ACCEPTED" => Some(OrderStatus::Accepted),
            "PENDING" => Some(OrderStatus::Pending),
            "IN_PROGRESS" => Some(OrderStatus::InProgress),
            "READY" => Some(OrderStatus::Ready),
            "COMPLETED" => Some(OrderStatus::Completed),
            "CANCELED" => Some(OrderStatus::Canceled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PendingReview => "PENDING_REVIEW",
            OrderStatus::Received => "RECEIVED",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Pending => "PENDING",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Ready => "READY",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Canceled => "CANCELED",
        }
    }

    /// 状态归组
    pub fn group(&self) -> StatusGroup {
        match self {
            OrderStatus::PendingReview
            | OrderStatus::Received
            | OrderStatus::Accepted
            | OrderStatus::Pending => StatusGroup::Pending,
            OrderStatus::InProgress | OrderStatus::Ready => StatusGroup::InProgress,
            OrderStatus::Completed | OrderStatus::Canceled => StatusGroup::Completed,
        }
    }
}

// ==========================================
// 状态组 (Status Group)
// ==========================================
// 看板列: 待处理 → 制作中 → 已完成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusGroup {
    Pending,
    InProgress,
    Completed,
}

impl fmt::Display for StatusGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusGroup::Pending => write!(f, "PENDING"),
            StatusGroup::InProgress => write!(f, "IN_PROGRESS"),
            StatusGroup::Completed => write!(f, "COMPLETED"),
        }
    }
}

// ==========================================
// 状态筛选 (Status Filter)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
    #[default]
    Active, // 待处理 + 制作中
    Pending,
    InProgress,
    Completed,
    All,
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::Active => write!(f, "ACTIVE"),
            StatusFilter::Pending => write!(f, "PENDING"),
            StatusFilter::InProgress => write!(f, "IN_PROGRESS"),
            StatusFilter::Completed => write!(f, "COMPLETED"),
            StatusFilter::All => write!(f, "ALL"),
        }
    }
}

impl StatusFilter {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Some(StatusFilter::Active),
            "PENDING" => Some(StatusFilter::Pending),
            "IN_PROGRESS" => Some(StatusFilter::InProgress),
            "COMPLETED" => Some(StatusFilter::Completed),
            "ALL" => Some(StatusFilter::All),
            _ => None,
        }
    }
}

// ==========================================
// 备餐优先标签 (Priority Tag)
// ==========================================
// 声明顺序即展示优先级（rank 越小越靠前）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityTag {
    Sandwich,
    HotNuggetTray,
    HotStripTray,
    ColdNuggetTray,
    MacTray,
    SaladTray,
    WrapTray,
    Tray,
    GrilledBundle,
}

/// 无标签条目的展示排序值
pub const UNRANKED: u8 = 99;

impl fmt::Display for PriorityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PriorityTag {
    pub const ALL: [PriorityTag; 9] = [
        PriorityTag::Sandwich,
        PriorityTag::HotNuggetTray,
        PriorityTag::HotStripTray,
        PriorityTag::ColdNuggetTray,
        PriorityTag::MacTray,
        PriorityTag::SaladTray,
        PriorityTag::WrapTray,
        PriorityTag::Tray,
        PriorityTag::GrilledBundle,
    ];

    /// 展示排序值（1 最高）
    pub fn rank(&self) -> u8 {
        match self {
            PriorityTag::Sandwich => 1,
            PriorityTag::HotNuggetTray => 2,
            PriorityTag::HotStripTray => 3,
            PriorityTag::ColdNuggetTray => 4,
            PriorityTag::MacTray => 5,
            PriorityTag::SaladTray => 6,
            PriorityTag::WrapTray => 7,
            PriorityTag::Tray => 8,
            PriorityTag::GrilledBundle => 9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTag::Sandwich => "SANDWICH",
            PriorityTag::HotNuggetTray => "HOT_NUGGET_TRAY",
            PriorityTag::HotStripTray => "HOT_STRIP_TRAY",
            PriorityTag::ColdNuggetTray => "COLD_NUGGET_TRAY",
            PriorityTag::MacTray => "MAC_TRAY",
            PriorityTag::SaladTray => "SALAD_TRAY",
            PriorityTag::WrapTray => "WRAP_TRAY",
            PriorityTag::Tray => "TRAY",
            PriorityTag::GrilledBundle => "GRILLED_BUNDLE",
        }
    }

    /// 展示文案
    pub fn label(&self) -> String {
        crate::i18n::t(&format!("priority.{}", self.as_str().to_lowercase()))
    }
}

/// Option<PriorityTag> 的排序值，None → 99
pub fn rank_of(tag: Option<PriorityTag>) -> u8 {
    tag.map(|t| t.rank()).unwrap_or(UNRANKED)
}

// ==========================================
// 服务时段 (Service Bucket)
// ==========================================
// 红线: 17 点以后（含次日 5 点前）统一归 DINNER，无 LATE 时段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceBucket {
    Morning,     // [5, 11)
    Lunch,       // [11, 14)
    Afternoon,   // [14, 17)
    Dinner,      // [17, 24) ∪ [0, 5)
    Unscheduled, // 无可用时间
}

impl fmt::Display for ServiceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ServiceBucket {
    /// 时间线展示顺序
    pub const ALL: [ServiceBucket; 5] = [
        ServiceBucket::Morning,
        ServiceBucket::Lunch,
        ServiceBucket::Afternoon,
        ServiceBucket::Dinner,
        ServiceBucket::Unscheduled,
    ];

    /// 按本地小时判定时段
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=10 => ServiceBucket::Morning,
            11..=13 => ServiceBucket::Lunch,
            14..=16 => ServiceBucket::Afternoon,
            _ => ServiceBucket::Dinner,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceBucket::Morning => "MORNING",
            ServiceBucket::Lunch => "LUNCH",
            ServiceBucket::Afternoon => "AFTERNOON",
            ServiceBucket::Dinner => "DINNER",
            ServiceBucket::Unscheduled => "UNSCHEDULED",
        }
    }

    pub fn title(&self) -> String {
        crate::i18n::t(&format!("bucket.{}.title", self.as_str().to_lowercase()))
    }

    /// 时间范围提示，例如 "11am–2pm"
    pub fn hint(&self) -> String {
        crate::i18n::t(&format!("bucket.{}.hint", self.as_str().to_lowercase()))
    }
}

// ==========================================
// 取餐方式 (Service Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    #[default]
    Pickup,
    Delivery,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::Pickup => write!(f, "PICKUP"),
            ServiceType::Delivery => write!(f, "DELIVERY"),
        }
    }
}

impl ServiceType {
    pub fn label(&self) -> String {
        match self {
            ServiceType::Pickup => crate::i18n::t("service.pickup"),
            ServiceType::Delivery => crate::i18n::t("service.delivery"),
        }
    }
}
