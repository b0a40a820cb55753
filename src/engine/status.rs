// ==========================================
// 餐饮备餐聚合引擎 - 订单状态引擎
// ==========================================
// 职责: 状态筛选 / 下一状态 / 临近取餐自动开工判定
// 红线: "当前时间" 由 Clock 注入
// ==========================================

use crate::domain::order::Order;
use crate::domain::types::{OrderStatus, StatusFilter, StatusGroup};
use crate::engine::clock::Clock;
use crate::engine::partitioner::DayPartitioner;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tracing::{debug, instrument};

/// 默认提前量: 取餐前 15 分钟
pub const DEFAULT_AUTO_PROGRESS_LEAD_MINUTES: i64 = 15;

/// "即将取餐" 窗口: 取餐前 15 分钟至取餐后 10 分钟
pub const DUE_SOON_AHEAD_MINUTES: i64 = 15;
pub const DUE_SOON_GRACE_MINUTES: i64 = 10;

// ==========================================
// StatusRules - 状态规则（纯函数）
// ==========================================
pub struct StatusRules;

impl StatusRules {
    /// 订单状态组（未知状态为 None）
    pub fn group_of(order: &Order) -> Option<StatusGroup> {
        order.status.map(|s| s.group())
    }

    /// 状态筛选
    ///
    /// ALL 匹配所有订单（含未知状态）；其他筛选不匹配未知状态
    pub fn matches_filter(order: &Order, filter: StatusFilter) -> bool {
        let group = Self::group_of(order);
        match filter {
            StatusFilter::All => true,
            StatusFilter::Active => matches!(
                group,
                Some(StatusGroup::Pending) | Some(StatusGroup::InProgress)
            ),
            StatusFilter::Pending => group == Some(StatusGroup::Pending),
            StatusFilter::InProgress => group == Some(StatusGroup::InProgress),
            StatusFilter::Completed => group == Some(StatusGroup::Completed),
        }
    }

    /// 滑动操作的下一状态
    ///
    /// 待处理类 → IN_PROGRESS; 制作中类 → COMPLETED; 已完成类或未知 → None（锁定）
    pub fn next_status(order: &Order) -> Option<OrderStatus> {
        match Self::group_of(order)? {
            StatusGroup::Pending => Some(OrderStatus::InProgress),
            StatusGroup::InProgress => Some(OrderStatus::Completed),
            StatusGroup::Completed => None,
        }
    }

    /// 状态展示文案
    pub fn status_label(order: &Order) -> String {
        let key = match Self::group_of(order) {
            Some(StatusGroup::Pending) => "status.pending",
            Some(StatusGroup::InProgress) => "status.in_progress",
            Some(StatusGroup::Completed) => "status.completed",
            None => "status.unknown",
        };
        crate::i18n::t(key)
    }
}

// ==========================================
// StatusEngine - 自动开工判定
// ==========================================
#[derive(Debug, Clone)]
pub struct StatusEngine<Tz: TimeZone> {
    partitioner: DayPartitioner<Tz>,
    auto_progress_lead: Duration,
}

impl<Tz: TimeZone> StatusEngine<Tz> {
    pub fn new(partitioner: DayPartitioner<Tz>, auto_progress_lead_minutes: i64) -> Self {
        Self {
            partitioner,
            auto_progress_lead: Duration::minutes(auto_progress_lead_minutes),
        }
    }

    /// 是否应自动转为制作中
    ///
    /// 条件: 待处理类，且取餐时间（pickupTime → pickupAt → scheduledFor）
    /// 可解析并且距 now 不超过提前量（已过取餐时间的同样满足）
    pub fn should_auto_progress(&self, order: &Order, now: DateTime<Utc>) -> bool {
        self.pending_time_to_pickup(order, now)
            .is_some_and(|diff| diff <= self.auto_progress_lead)
    }

    /// 是否即将取餐（看板提示 "N due soon"）
    ///
    /// 条件: 待处理类，取餐时间落在 [now - 10 分钟, now + 15 分钟]
    pub fn is_due_soon(&self, order: &Order, now: DateTime<Utc>) -> bool {
        self.pending_time_to_pickup(order, now).is_some_and(|diff| {
            diff >= -Duration::minutes(DUE_SOON_GRACE_MINUTES)
                && diff <= Duration::minutes(DUE_SOON_AHEAD_MINUTES)
        })
    }

    /// 即将取餐的订单 id（保持输入顺序）
    pub fn due_soon_ids(&self, orders: &[&Order], clock: &dyn Clock) -> Vec<String> {
        let now = clock.now();
        orders
            .iter()
            .filter(|o| self.is_due_soon(o, now))
            .map(|o| o.id.clone())
            .collect()
    }

    pub fn due_soon_count(&self, orders: &[&Order], clock: &dyn Clock) -> usize {
        let now = clock.now();
        orders.iter().filter(|o| self.is_due_soon(o, now)).count()
    }

    // 待处理类订单距取餐的时长; 非待处理或取餐时间不可解析为 None
    fn pending_time_to_pickup(&self, order: &Order, now: DateTime<Utc>) -> Option<Duration> {
        if StatusRules::group_of(order) != Some(StatusGroup::Pending) {
            return None;
        }
        let raw = order.schedule.pickup_raw()?;
        let pickup = self.partitioner.parse_timestamp(raw)?;
        Some(pickup.with_timezone(&Utc) - now)
    }

    /// 需自动开工的订单 id（保持输入顺序）
    #[instrument(skip(self, orders, clock), fields(count = orders.len()))]
    pub fn auto_progress_candidates(&self, orders: &[&Order], clock: &dyn Clock) -> Vec<String> {
        let now = clock.now();
        let ids: Vec<String> = orders
            .iter()
            .filter(|o| self.should_auto_progress(o, now))
            .map(|o| o.id.clone())
            .collect();
        debug!(candidates = ids.len(), "自动开工判定完成");
        ids
    }
}
