// ==========================================
// 集成测试公共辅助
// ==========================================

#![allow(dead_code)]

pub mod order_builder;

use chrono::{FixedOffset, TimeZone, Utc};
use catering_prep::{DayPartitioner, FixedClock};

/// 测试时区 UTC-5
pub fn test_zone() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).unwrap()
}

pub fn test_partitioner() -> DayPartitioner<FixedOffset> {
    DayPartitioner::new(test_zone())
}

/// 本地时间 → 固定时钟
pub fn clock_at_local(y: i32, m: u32, d: u32, h: u32, min: u32) -> FixedClock {
    let local = test_zone().with_ymd_and_hms(y, m, d, h, min, 0).unwrap();
    FixedClock(local.with_timezone(&Utc))
}
