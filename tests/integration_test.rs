//! 集成測試

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use maint_calc::{
    CalendarGridBuilder, NavigationController, SortKey, SortSpec, TaskListProjector, TaskQuery,
    GRID_CELLS,
};
use maint_core::*;
use maint_mock::TaskFactory;
use rstest::rstest;
use rust_decimal::Decimal;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_month_view_with_generated_tasks() {
    // 場景：以固定種子產生 45 筆任務，今天是 2024-02-15

    // 1. 任務資料
    let today = ymd(2024, 2, 15);
    let store = TaskFactory::new(42).generate_store(45, today).unwrap();

    // 2. 導覽控制器
    let nav = NavigationController::with_clock(
        store.clone(),
        ScheduleConfig::default(),
        FixedClock::new(today),
    )
    .unwrap();

    // 3. 驗證月曆
    let grid = nav.grid();
    assert_eq!(grid.len(), GRID_CELLS);
    assert_eq!(grid.cells()[0].date.weekday(), Weekday::Sun);
    assert_eq!(grid.cells().iter().filter(|d| d.is_current_month).count(), 29);
    assert_eq!(grid.cells().iter().filter(|d| d.is_today).count(), 1);

    // 每筆落在月曆範圍內的任務只出現一次，且在正確的格子
    let (start, end) = grid.range().unwrap();
    let visible = store.between(start, end).count();
    assert_eq!(grid.task_count(), visible);
    for day in grid.cells() {
        assert!(day.tasks.iter().all(|t| t.date == day.date));
    }

    // 4. 清單與統計
    let upcoming = nav.upcoming_tasks();
    assert!(upcoming.len() <= 5);
    assert!(upcoming
        .iter()
        .all(|t| t.date > today && t.date <= today + Duration::days(7)));

    let counts = nav.counts();
    assert_eq!(counts.total, 45);
    assert_eq!(counts.today, nav.todays_tasks().len());
    assert_eq!(
        counts.overdue,
        store
            .iter()
            .filter(|t| t.date < today && t.status != TaskStatus::Completed)
            .count()
    );
}

#[test]
fn test_navigation_round_trip_from_month_end() {
    // 1/31 → 2/29（夾到月底）→ 1/29，仍在一月
    let store = TaskStore::empty();
    let mut nav = NavigationController::with_clock(
        store,
        ScheduleConfig::default(),
        FixedClock::new(ymd(2024, 1, 31)),
    )
    .unwrap();

    nav.go_to_next_month().unwrap();
    assert_eq!(nav.reference_date(), ymd(2024, 2, 29));
    assert_eq!(
        nav.grid().cells().iter().filter(|d| d.is_current_month).count(),
        29
    );

    nav.go_to_previous_month().unwrap();
    assert_eq!(nav.reference_date().month(), 1);
    assert_eq!(nav.reference_date().year(), 2024);
}

#[test]
fn test_selection_does_not_touch_grid() {
    let today = ymd(2024, 6, 1);
    let store = TaskFactory::new(7).generate_store(30, today).unwrap();
    let mut nav =
        NavigationController::with_clock(store, ScheduleConfig::default(), FixedClock::new(today))
            .unwrap();

    let grid_before = nav.grid().clone();
    for offset in [-3, 0, 5, 40] {
        let day = today + Duration::days(offset);
        nav.select_date(day);

        assert_eq!(nav.grid(), &grid_before);
        assert_eq!(nav.reference_date(), today);
        assert!(nav.selected_day_tasks().iter().all(|t| t.date == day));
    }
}

#[rstest]
#[case(7, 5, &["Filter Replacement"])]
#[case(8, 5, &["Filter Replacement", "Belt Replacement"])]
#[case(8, 1, &["Filter Replacement"])]
#[case(6, 5, &[])]
fn test_upcoming_bounds_from_json_ingestion(
    #[case] window_days: u32,
    #[case] limit: usize,
    #[case] expected: &[&str],
) {
    let json = r#"[
        {"title": "Filter Replacement", "date": "2024-06-08", "startTime": "08:00", "duration": 2},
        {"title": "Belt Replacement", "date": "2024-06-09", "startTime": "09:00", "duration": 1},
        {"title": "Oil Change", "date": "2024-05-31", "startTime": "10:00", "duration": 1},
        {"title": "Battery Check", "date": "2024-05-31", "startTime": "11:00", "duration": 1,
         "status": "Completed"}
    ]"#;
    let store = TaskStore::from_json(json).unwrap();
    let today = ymd(2024, 6, 1);
    let config = ScheduleConfig::default()
        .with_upcoming_window(window_days)
        .with_upcoming_limit(limit);
    let projector = TaskListProjector::new(&config);

    let upcoming = projector.upcoming_tasks(&store, today);
    let titles: Vec<_> = upcoming.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, expected);

    // 昨天未完成計入逾期，已完成不計
    assert_eq!(projector.counts(&store, today).overdue, 1);
}

#[test]
fn test_ingestion_rejects_undated_task() {
    let json = r#"[
        {"title": "Motor Repair", "date": "2024-06-03", "startTime": "08:00", "duration": 4},
        {"title": "Pressure Test", "date": "not-a-date", "startTime": "08:00", "duration": 1}
    ]"#;

    match TaskStore::from_json(json) {
        Err(MaintError::InvalidDate { task, value }) => {
            assert_eq!(task, "Pressure Test");
            assert_eq!(value, "not-a-date");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_new_task_form_appears_on_calendar() {
    // 1. 既有任務
    let today = ymd(2024, 6, 1);
    let mut tasks = TaskFactory::new(3).generate(10, today);

    // 2. 從表單新增任務（預設排在明天）
    let form = NewTaskForm {
        title: "Vibration Analysis".to_string(),
        description: "Measure spindle vibration after bearing swap".to_string(),
        equipment: "Lathe 008".to_string(),
        technician: "Lisa Anderson".to_string(),
        location: "Production Line 1".to_string(),
        start_time: "13:00".to_string(),
        duration_hours: Some(Decimal::new(15, 1)),
        priority: TaskPriority::High,
        ..NewTaskForm::from_settings(today, &ScheduleConfig::default())
    };
    let new_task = form.into_task().unwrap();
    let new_id = new_task.id;
    tasks.push(new_task);

    // 3. 重建集合與月曆
    let store = TaskStore::new(tasks).unwrap();
    let grid = CalendarGridBuilder::build(today, &store, today).unwrap();

    let cell = grid.cell(ymd(2024, 6, 2)).unwrap();
    assert!(cell.tasks.iter().any(|t| t.id == new_id));
    assert!(cell.is_weekend);
    assert_eq!(store.get(new_id).unwrap().end_time.to_string(), "14:30:00");
}

#[test]
fn test_settings_drive_projection() {
    let mut settings = SettingsStore::default();
    settings
        .update(|cfg| {
            cfg.upcoming_window_days = 14;
            cfg.upcoming_limit = 10;
        })
        .unwrap();

    let today = ymd(2024, 6, 1);
    let store = TaskFactory::new(11).generate_store(60, today).unwrap();
    let nav =
        NavigationController::with_clock(store, settings.current().clone(), FixedClock::new(today))
            .unwrap();

    let upcoming = nav.upcoming_tasks();
    assert!(upcoming.len() <= 10);
    assert!(upcoming
        .iter()
        .all(|t| t.date > today && t.date <= today + Duration::days(14)));
}

#[test]
fn test_task_table_query_over_fixtures() {
    let today = ymd(2024, 6, 1);
    let store = TaskFactory::new(99).generate_store(50, today).unwrap();

    let query = TaskQuery::new()
        .with_status(TaskStatus::Scheduled)
        .with_sort(SortSpec::desc(SortKey::Priority))
        .with_page(0, 5);
    let page = query.execute(&store).unwrap();

    let expected_total = store
        .iter()
        .filter(|t| t.status == TaskStatus::Scheduled)
        .count();
    assert_eq!(page.total_matches, expected_total);
    assert!(page.items.len() <= 5);
    assert!(page.items.windows(2).all(|w| w[0].priority >= w[1].priority));
}

#[test]
fn test_snapshot_serializes_for_rendering() {
    let today = ymd(2024, 2, 15);
    let store = TaskFactory::new(5).generate_store(20, today).unwrap();
    let mut nav =
        NavigationController::with_clock(store, ScheduleConfig::default(), FixedClock::new(today))
            .unwrap();
    nav.select_date(ymd(2024, 2, 20));

    let snapshot = nav.snapshot();
    let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();

    assert_eq!(value["monthLabel"], "February 2024");
    assert_eq!(value["selectedDate"], "2024-02-20");
    assert_eq!(value["grid"]["days"].as_array().unwrap().len(), 42);
    assert_eq!(value["grid"]["days"][0]["date"], "2024-01-28");
    assert_eq!(value["counts"]["total"], 20);
}
