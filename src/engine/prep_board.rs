// ==========================================
// 餐饮备餐聚合引擎 - 备餐看板
// ==========================================
// 职责: 组合 营业日划分 + 聚合，输出看板视图
//   daily    → 当日备餐汇总
//   timeline → 五个服务时段的备餐卡片
//   week     → 周一至周日订单分布
// 红线: 无 I/O; "今天" 只能从注入的 Clock 取得
// ==========================================

use crate::config::PrepConfig;
use crate::domain::order::Order;
use crate::domain::prep::{BucketPrep, DailyPrep, PrepList, WeekDay};
use crate::domain::types::ServiceBucket;
use crate::engine::aggregator::PrepAggregator;
use crate::engine::classifier::ItemClassifier;
use crate::engine::clock::Clock;
use crate::engine::partitioner::{format_day_key, DayPartitioner};
use chrono::{NaiveDate, TimeZone};
use tracing::{debug, info, instrument};

// ==========================================
// PrepBoard
// ==========================================
#[derive(Debug, Clone)]
pub struct PrepBoard<Tz: TimeZone> {
    partitioner: DayPartitioner<Tz>,
    aggregator: PrepAggregator,
    preview_limit: usize,
}

impl<Tz: TimeZone> PrepBoard<Tz> {
    pub fn new(partitioner: DayPartitioner<Tz>, aggregator: PrepAggregator, preview_limit: usize) -> Self {
        Self {
            partitioner,
            aggregator,
            preview_limit,
        }
    }

    /// 按配置构建（追加排除关键字、预览条数）
    pub fn from_config(partitioner: DayPartitioner<Tz>, config: &PrepConfig) -> Self {
        let classifier = ItemClassifier::new().with_extra_exclusions(config.extra_exclude_keywords.as_slice());
        Self::new(partitioner, PrepAggregator::new(classifier), config.preview_limit)
    }

    pub fn partitioner(&self) -> &DayPartitioner<Tz> {
        &self.partitioner
    }

    pub fn aggregator(&self) -> &PrepAggregator {
        &self.aggregator
    }

    // ==========================================
    // 订单筛选
    // ==========================================

    /// 今日订单（按排序时间升序）
    pub fn todays_orders<'a>(&self, orders: &'a [Order], clock: &dyn Clock) -> Vec<&'a Order> {
        let today = self.partitioner.today_key(clock);
        self.partitioner.orders_for_day(orders, &today)
    }

    // ==========================================
    // 备餐视图
    // ==========================================

    /// 全部订单的备餐清单（不做营业日筛选）
    pub fn all_items(&self, orders: &[Order]) -> PrepList {
        self.aggregator.aggregate(orders)
    }

    /// 指定营业日的备餐汇总
    #[instrument(skip(self, orders), fields(count = orders.len()))]
    pub fn daily(&self, orders: &[Order], day_key: &str) -> DailyPrep {
        let selected = self.partitioner.orders_for_day(orders, day_key);
        let items = self.aggregator.aggregate(selected.iter().copied());
        let total_quantity = items.total_quantity();
        let priority_quantity = items.priority_quantity();

        info!(
            day_key,
            orders = selected.len(),
            total_quantity,
            priority_quantity,
            "当日备餐汇总完成"
        );

        DailyPrep {
            day_key: day_key.to_string(),
            order_count: selected.len(),
            items,
            total_quantity,
            priority_quantity,
        }
    }

    /// 今日备餐汇总
    pub fn today(&self, orders: &[Order], clock: &dyn Clock) -> DailyPrep {
        let today = self.partitioner.today_key(clock);
        self.daily(orders, &today)
    }

    /// 指定营业日的服务时段卡片
    ///
    /// 五个时段按固定顺序全部返回（可能为空）
    #[instrument(skip(self, orders), fields(count = orders.len()))]
    pub fn timeline(&self, orders: &[Order], day_key: &str) -> Vec<BucketPrep> {
        let selected = self.partitioner.orders_for_day(orders, day_key);

        let buckets: Vec<BucketPrep> = self
            .partitioner
            .group_by_bucket(&selected)
            .into_iter()
            .map(|(bucket, bucket_orders)| self.bucket_prep(bucket, bucket_orders))
            .collect();

        debug!(
            day_key,
            non_empty = buckets.iter().filter(|b| !b.orders.is_empty()).count(),
            "时段划分完成"
        );
        buckets
    }

    fn bucket_prep(&self, bucket: ServiceBucket, orders: Vec<&Order>) -> BucketPrep {
        let items = self.aggregator.aggregate(orders.iter().copied());
        let preview = items.iter().take(self.preview_limit).cloned().collect();

        BucketPrep {
            bucket,
            total_quantity: items.total_quantity(),
            priority_quantity: items.priority_quantity(),
            orders: orders.into_iter().cloned().collect(),
            items,
            preview,
        }
    }

    /// 本周视图（周一开始，包含 today）
    pub fn week(&self, orders: &[Order], today: NaiveDate) -> Vec<WeekDay> {
        let days = self.partitioner.week_days(today);
        self.partitioner
            .group_by_day(orders, &days)
            .into_iter()
            .map(|(date, day_orders)| WeekDay {
                date,
                day_key: format_day_key(date),
                item_count: day_orders
                    .iter()
                    .map(|o| self.order_item_count(o))
                    .fold(0i64, i64::saturating_add),
                orders: day_orders.into_iter().cloned().collect(),
            })
            .collect()
    }

    // ==========================================
    // 单订单展示
    // ==========================================

    /// 订单明细总件数（不做排除）
    pub fn order_item_count(&self, order: &Order) -> i64 {
        self.aggregator.normalizer().item_count(order)
    }

    /// 计划时间标签，如 "Pickup · 11:30 AM"；无时间为 "Unscheduled"
    pub fn scheduled_label(&self, order: &Order) -> String {
        match self.partitioner.scheduled_time(order) {
            Some(dt) => format!(
                "{} · {}",
                order.service_type.label(),
                dt.naive_local().format("%-I:%M %p")
            ),
            None => crate::i18n::t("service.unscheduled"),
        }
    }
}
