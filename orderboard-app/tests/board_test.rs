use std::fs;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use orderboard_app::Board;
use orderboard_schedule::{Category, PackingMarker, SchedulingRules};
use orderboard_shared::OrderKey;
use orderboard_store::app_config::{BoardConfig, Config, SourceConfig};
use orderboard_store::{FileOrderSource, OrderRepository};

fn now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(3 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 5, 15, 12, 0, 0)
        .unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

fn snapshot() -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "items": [
            {
                "shopDomain": "shop.myshopify.com", "orderId": "1001", "orderName": "#1001",
                "createdAt": "2024-05-15T08:00:00+03:00", "shippingMethod": "Express Delivery",
                "shippingCountry": "Lebanon", "paymentGateway": "Cash on Delivery (COD)",
                "total": "25.00", "currency": "USD"
            },
            {
                "shopDomain": "shop.myshopify.com", "orderId": "1002", "orderName": "#1002",
                "createdAt": "2024-05-15T09:00:00+03:00", "updatedAt": "",
                "shippingMethod": "Standard", "shippingCountry": "Lebanon", "total": 40
            },
            {
                "shopDomain": "shop.myshopify.com", "orderId": "1003", "orderName": "#1003",
                "createdAt": "2024-05-04T10:00:00+03:00", "tags": "processing",
                "shippingMethod": "Standard", "shippingCountry": "Lebanon"
            },
            {
                "shopDomain": "shop.myshopify.com", "orderId": "1004", "orderName": "#1004",
                "createdAt": "2024-05-14T10:00:00+03:00", "tags": ["shipped"]
            },
            {
                "shopDomain": "shop.myshopify.com", "orderId": "1005", "orderName": "#1005",
                "createdAt": "2024-05-13T10:00:00+03:00", "deliverBy": "2024-05-14",
                "note": "call before arriving", "shippingMethod": "South Lebanon",
                "shippingCountry": "Lebanon"
            }
        ]
    })
}

fn board(dir: &tempfile::TempDir) -> Board {
    let path = dir.path().join("orders.json");
    fs::write(&path, serde_json::to_vec(&snapshot()).unwrap()).unwrap();

    let config = Config {
        source: SourceConfig {
            snapshot_path: path.display().to_string(),
            limit: 50,
        },
        board: BoardConfig::default(),
        scheduling: SchedulingRules::default(),
    };
    let source = Arc::new(FileOrderSource::new(path));
    Board::new(config, source, Arc::new(OrderRepository::new()))
}

fn names_on(view: &orderboard_app::BoardView, date: NaiveDate) -> Vec<String> {
    view.cards
        .iter()
        .find(|c| c.date == date)
        .map(|c| c.orders.iter().map(|o| o.order_name.clone()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_tick_schedules_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let board = board(&dir);

    let view = board.tick(now()).await;

    assert_eq!(view.cards.len(), 20);
    assert_eq!(view.cards[0].date, day(16));
    assert_eq!(names_on(&view, day(16)), vec!["#1001", "#1005"]);
    assert_eq!(names_on(&view, day(24)), vec!["#1002"]);
    assert_eq!(names_on(&view, day(29)), vec!["#1003"]);

    let scheduled: usize = view.cards.iter().map(|c| c.orders.len()).sum();
    assert_eq!(scheduled, 4);

    assert_eq!(view.print_run.len(), 1);
    assert_eq!(view.print_run[0].date, day(16));
    let entries = &view.print_run[0].entries;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].order.order_name, "#1001");
    assert_eq!(entries[0].category, Category::Express);
    assert_eq!(entries[0].marker, Some(PackingMarker::Express));
    assert!(entries[0].cash_on_delivery);
    assert_eq!(entries[1].order.order_name, "#1005");
    assert_eq!(entries[1].category, Category::Note);
    assert_eq!(entries[1].marker, Some(PackingMarker::South));
    assert!(!entries[1].cash_on_delivery);

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["print_run"][0]["entries"][1]["marker"], "A");

    assert_eq!(view.grand_total, 65.0);
    assert_eq!(view.currency.as_deref(), Some("USD"));
}

#[tokio::test]
async fn test_staff_dates_survive_refresh() {
    let dir = tempfile::tempdir().unwrap();
    let board = board(&dir);
    board.tick(now()).await;

    board
        .repo()
        .set_delivery(
            &OrderKey::new("shop.myshopify.com", "1002"),
            Some(day(17)),
            Some("moved by phone".to_string()),
        )
        .await
        .unwrap();

    let view = board.tick(now()).await;
    assert_eq!(names_on(&view, day(17)), vec!["#1002"]);
    assert!(names_on(&view, day(24)).is_empty());
    // The local note makes it printable.
    assert!(view.print_run.iter().any(|c| c.date == day(17)));
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_board() {
    let dir = tempfile::tempdir().unwrap();
    let board = board(&dir);
    let first = board.tick(now()).await;

    fs::remove_file(dir.path().join("orders.json")).unwrap();
    assert!(!board.refresh_once().await);

    let second = board.tick(now()).await;
    assert_eq!(first, second);
}
