//! 月曆畫面示例
//!
//! 用法：`cargo run --example month_view -- [種子]`

use chrono::Local;
use maint_calc::NavigationController;
use maint_mock::TaskFactory;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,maint_calc=debug")),
        )
        .init();

    let seed = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<u64>())
        .transpose()?
        .unwrap_or(42);

    let today = Local::now().date_naive();
    let store = TaskFactory::new(seed).generate_store(45, today)?;
    let mut nav = NavigationController::new(store)?;

    println!("=== 維護排程月曆（種子 {}）===\n", seed);
    print_month(&nav);

    nav.go_to_next_month()?;
    print_month(&nav);

    nav.go_to_today()?;
    let counts = nav.counts();
    println!(
        "今日 {} 筆，七天內 {} 筆，總計 {} 筆，逾期 {} 筆\n",
        counts.today, counts.this_week, counts.total, counts.overdue
    );

    println!("即將到來:");
    for task in nav.upcoming_tasks() {
        println!(
            "  - {} {}-{} {} @ {} ({})",
            task.date,
            task.start_time.format("%H:%M"),
            task.end_time.format("%H:%M"),
            task.title,
            task.equipment_name,
            task.technician
        );
    }

    Ok(())
}

fn print_month(nav: &NavigationController) {
    let snapshot = nav.snapshot();
    println!("{}", snapshot.month_label);
    println!(" Sun  Mon  Tue  Wed  Thu  Fri  Sat");

    for week in snapshot.grid.weeks() {
        let line: Vec<String> = week
            .iter()
            .map(|day| {
                let marker = if day.is_today {
                    '*'
                } else if day.tasks.is_empty() {
                    ' '
                } else {
                    '•'
                };
                if day.is_current_month {
                    format!("{:>3}{}", chrono::Datelike::day(&day.date), marker)
                } else {
                    format!("  .{}", marker)
                }
            })
            .collect();
        println!("{}", line.join(" "));
    }
    println!();
}
