//! 任務表格查詢示例

use chrono::Local;
use maint_calc::{SortKey, SortSpec, TaskListProjector, TaskQuery};
use maint_core::{TaskPriority, TaskStatus};
use maint_mock::TaskFactory;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let today = Local::now().date_naive();
    let store = TaskFactory::new(2024).generate_store(50, today)?;

    let breakdown = TaskListProjector::status_breakdown(&store);
    println!(
        "狀態統計：Scheduled {}，In Progress {}，Completed {}，Overdue {}\n",
        breakdown.scheduled, breakdown.in_progress, breakdown.completed, breakdown.overdue
    );

    let query = TaskQuery::new()
        .with_status(TaskStatus::Scheduled)
        .with_priority(TaskPriority::High)
        .with_sort(SortSpec::asc(SortKey::Date))
        .with_page(0, 5);

    let mut page_index = 0;
    loop {
        let page = query.clone().with_page(page_index, 5).execute(&store)?;
        if page.items.is_empty() {
            break;
        }

        println!("第 {}/{} 頁（共 {} 筆）", page_index + 1, page.page_count, page.total_matches);
        for task in &page.items {
            println!(
                "  {} | {:<18} | {:<16} | {:<14} | {}h",
                task.date,
                task.title,
                task.equipment_name,
                task.technician,
                task.duration_hours
            );
        }
        page_index += 1;
    }

    Ok(())
}
