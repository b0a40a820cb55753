// ==========================================
// 餐饮备餐聚合引擎 - prep-report 命令行
// ==========================================
// 用法:
//   prep-report <orders.json> [--date YYYY-MM-DD] [--csv out.csv] [--json-log]
//
// 读取订单 JSON，输出当日备餐清单与服务时段卡片;
// 未指定 --date 时取系统本地今天
// ==========================================

use anyhow::{bail, Context, Result};
use catering_prep::engine::{format_day_key, StatusEngine, StatusRules};
use catering_prep::export::write_prep_csv_to_path;
use catering_prep::i18n::t;
use catering_prep::{
    logging, DayPartitioner, OrderImporter, PrepBoard, PrepConfig, PrepList, SystemClock,
};
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Default)]
struct CliArgs {
    orders_path: PathBuf,
    date: Option<NaiveDate>,
    csv_path: Option<PathBuf>,
    json_log: bool,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = std::env::args().skip(1);
    let mut cli = CliArgs::default();
    let mut orders_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--date" => {
                let raw = args.next().context("--date 需要参数 YYYY-MM-DD")?;
                let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .with_context(|| format!("无效日期: {}", raw))?;
                cli.date = Some(date);
            }
            "--csv" => {
                let raw = args.next().context("--csv 需要输出路径")?;
                cli.csv_path = Some(PathBuf::from(raw));
            }
            "--json-log" => cli.json_log = true,
            other if other.starts_with("--") => bail!("未知参数: {}", other),
            other => orders_path = Some(PathBuf::from(other)),
        }
    }

    cli.orders_path = orders_path
        .context("用法: prep-report <orders.json> [--date YYYY-MM-DD] [--csv out.csv]")?;
    Ok(cli)
}

fn main() -> Result<()> {
    let cli = parse_args()?;

    if cli.json_log {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("{} v{}", catering_prep::APP_NAME, catering_prep::VERSION);

    let config = PrepConfig::load_or_default().context("加载配置失败")?;
    catering_prep::i18n::set_locale(&config.locale);

    let orders = OrderImporter::new()
        .import_from_file(&cli.orders_path)
        .with_context(|| format!("导入订单失败: {}", cli.orders_path.display()))?;

    let clock = SystemClock;
    let board = PrepBoard::from_config(DayPartitioner::local(), &config);
    let day_key = match cli.date {
        Some(date) => format_day_key(date),
        None => board.partitioner().today_key(&clock),
    };

    let daily = board.daily(&orders, &day_key);
    println!("== {} ({}) ==", daily.day_key, daily.order_count);
    if daily.order_count == 0 {
        println!("{}", t("report.no_orders"));
    }
    print_prep_list(&daily.items);

    for bucket in board.timeline(&orders, &day_key) {
        if bucket.orders.is_empty() {
            continue;
        }
        println!();
        println!(
            "-- {} [{}] {}/{} --",
            bucket.bucket.title(),
            bucket.bucket.hint(),
            bucket.priority_quantity,
            bucket.total_quantity
        );
        for order in &bucket.orders {
            println!(
                "  #{} {} | {} | {}",
                order.id,
                order.customer_label(),
                board.scheduled_label(order),
                StatusRules::status_label(order)
            );
        }
        for item in &bucket.preview {
            println!("    {:>4} x {}", item.quantity, item.name);
        }
    }

    let day_orders = board.partitioner().orders_for_day(&orders, &day_key);
    let status_engine = StatusEngine::new(DayPartitioner::local(), config.auto_progress_lead_minutes);
    let due_soon = status_engine.due_soon_count(&day_orders, &clock);
    if due_soon > 0 {
        println!();
        println!("{} {}", due_soon, t("report.due_soon"));
    }

    let due = status_engine.auto_progress_candidates(&day_orders, &clock);
    if !due.is_empty() {
        println!();
        println!("auto-progress: {}", due.join(", "));
    }

    if let Some(csv_path) = &cli.csv_path {
        write_prep_csv_to_path(&daily.items, csv_path)
            .with_context(|| format!("导出 CSV 失败: {}", csv_path.display()))?;
    }

    Ok(())
}

fn print_prep_list(list: &PrepList) {
    if !list.priority.is_empty() {
        println!("{}", t("report.priority_first"));
        for item in &list.priority {
            let label = item.priority_tag.map(|tag| tag.label()).unwrap_or_default();
            println!("  {:>4} x {} ({})", item.quantity, item.name, label);
        }
    }
    if !list.others.is_empty() {
        println!("{}", t("report.everything_else"));
        for item in &list.others {
            println!("  {:>4} x {}", item.quantity, item.name);
        }
    }
}
