//! Subcommand handlers against a mocked tracker backend.

use std::path::PathBuf;

use mtrack_cli::commands::{
    render_view, run_assign, run_create, run_delete, run_preview, run_update, AssignArgs,
    CreateArgs, DeleteArgs, PreviewArgs, RecordKind, UpdateArgs,
};
use mtrack_cli::route::Route;
use mtrack_client::{TrackerClient, TrackerConfig};
use mtrack_store::AppStores;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn stores(mock_server: &MockServer) -> AppStores {
    let config = TrackerConfig {
        api_base_url: format!("{}/api", mock_server.uri()).parse().unwrap(),
        timeout_secs: Some(5),
    };
    AppStores::new(&TrackerClient::new(config).unwrap())
}

fn structure_json() -> serde_json::Value {
    serde_json::json!({
        "id": 2,
        "name": "Standard",
        "milestones": [
            {"id": 1, "name": "Deposit", "payment_percentage": "25.00",
             "net_terms_days": 0, "days_after_previous": 0, "order": 1},
            {"id": 2, "name": "Delivery", "payment_percentage": "75.00",
             "net_terms_days": 30, "days_after_previous": 60, "order": 2}
        ]
    })
}

fn write_draft(dir: &tempfile::TempDir, name: &str, draft: serde_json::Value) -> PathBuf {
    let file = dir.path().join(name);
    std::fs::write(&file, draft.to_string()).unwrap();
    file
}

fn sale_draft_json() -> serde_json::Value {
    serde_json::json!({
        "name": "Loader",
        "vendor": "Acme",
        "quantity": 2,
        "total_amount": "40000.00",
        "milestone_structure_id": 2,
        "project_start_date": "2024-03-01"
    })
}

fn preview_args(structure: u64, total: f64) -> PreviewArgs {
    PreviewArgs {
        structure,
        total,
        start: chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        name: "Loader".into(),
        vendor: "Acme".into(),
        quantity: 1,
    }
}

#[tokio::test]
async fn dashboard_view_renders_fetched_projects() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "Harbor", "start_date": "2024-03-01", "total_value": "12000.00"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (page, failed) = render_view(Route::Dashboard, &stores(&mock_server)).await;
    assert!(!failed);
    assert!(page.contains("Harbor"));
    assert!(page.contains("$12,000.00"));
}

#[tokio::test]
async fn failed_fetch_still_renders_page() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/equipment/sales/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let (page, failed) = render_view(Route::EquipmentSales, &stores(&mock_server)).await;
    assert!(failed);
    assert!(page.contains("Error: Failed to fetch equipment sales"));
}

#[tokio::test]
async fn chart_view_reports_timeline_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/timelines/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let (page, failed) = render_view(Route::GanttChart, &stores(&mock_server)).await;
    assert!(failed);
    assert!(page.contains("Error: Failed to fetch project timelines"));
}

#[tokio::test]
async fn preview_computes_schedule_for_known_structure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/milestones/structures/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([structure_json()])))
        .mount(&mock_server)
        .await;

    let code = run_preview(&preview_args(2, 40_000.0), &stores(&mock_server))
        .await
        .unwrap();
    assert_eq!(code, 0);
}

#[tokio::test]
async fn preview_rejects_unknown_structure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/milestones/structures/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([structure_json()])))
        .mount(&mock_server)
        .await;

    let err = run_preview(&preview_args(9, 40_000.0), &stores(&mock_server))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("milestone structure not found: 9"));
}

#[tokio::test]
async fn preview_validates_before_fetching() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/milestones/structures/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = run_preview(&preview_args(2, 0.0), &stores(&mock_server))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("invalid equipment sale"));
}

#[tokio::test]
async fn assign_and_delete_return_zero() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/equipment/sales/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/equipment/sales/4/assign_milestone/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 4, "name": "Loader", "milestone_structure": structure_json()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/milestones/structures/2/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    let code = run_assign(&AssignArgs { sale: 4, structure: 2 }, &stores)
        .await
        .unwrap();
    assert_eq!(code, 0);

    let code = run_delete(
        &DeleteArgs {
            kind: RecordKind::Structure,
            id: 2,
        },
        &stores,
    )
    .await
    .unwrap();
    assert_eq!(code, 0);
}

#[tokio::test]
async fn delete_failure_carries_store_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/projects/3/"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(serde_json::json!({"detail": "Project has equipment sales."})),
        )
        .mount(&mock_server)
        .await;

    let err = run_delete(
        &DeleteArgs {
            kind: RecordKind::Project,
            id: 3,
        },
        &stores(&mock_server),
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Project has equipment sales.");
}

#[tokio::test]
async fn create_structure_posts_validated_draft() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/milestones/structures/"))
        .and(body_json(serde_json::json!({
            "name": "Standard",
            "description": "",
            "milestones": [
                {"name": "Deposit", "payment_percentage": "25.00",
                 "net_terms_days": 0, "days_after_previous": 0, "order": 1},
                {"name": "Delivery", "payment_percentage": "75.00",
                 "net_terms_days": 30, "days_after_previous": 60, "order": 2}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(structure_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = write_draft(
        &dir,
        "structure.json",
        serde_json::json!({
            "name": "Standard",
            "milestones": [
                {"name": "Deposit", "payment_percentage": 25, "order": 1},
                {"name": "Delivery", "payment_percentage": "75.00",
                 "net_terms_days": 30, "days_after_previous": 60, "order": 2}
            ]
        }),
    );

    let stores = stores(&mock_server);
    let args = CreateArgs {
        kind: RecordKind::Structure,
        file,
    };
    assert_eq!(run_create(&args, &stores).await.unwrap(), 0);
    let cached = stores.milestone_structures.items();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].name, "Standard");
}

#[tokio::test]
async fn create_structure_rejects_overfull_percentages_without_posting() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/milestones/structures/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(structure_json()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = write_draft(
        &dir,
        "structure.json",
        serde_json::json!({
            "name": "Greedy",
            "milestones": [
                {"name": "Deposit", "payment_percentage": "60.00", "order": 1},
                {"name": "Balance", "payment_percentage": "60.00", "order": 2}
            ]
        }),
    );

    let args = CreateArgs {
        kind: RecordKind::Structure,
        file,
    };
    assert_eq!(run_create(&args, &stores(&mock_server)).await.unwrap(), 1);
}

#[tokio::test]
async fn create_sale_reports_backend_detail() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/equipment/sales/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"detail": "Vendor is not approved."})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = write_draft(&dir, "sale.json", sale_draft_json());

    let stores = stores(&mock_server);
    let args = CreateArgs {
        kind: RecordKind::Sale,
        file,
    };
    assert_eq!(run_create(&args, &stores).await.unwrap(), 1);
    assert_eq!(
        stores.equipment_sales.error().as_deref(),
        Some("Vendor is not approved.")
    );
    assert!(stores.equipment_sales.items().is_empty());
}

#[tokio::test]
async fn update_sale_puts_draft_and_returns_zero() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/equipment/sales/4/"))
        .and(body_json(serde_json::json!({
            "name": "Loader",
            "vendor": "Acme",
            "quantity": 2,
            "total_amount": "40000.00",
            "milestone_structure_id": 2,
            "project_start_date": "2024-03-01"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 4,
            "name": "Loader",
            "vendor": "Acme",
            "quantity": 2,
            "total_amount": "40000.00",
            "project_start_date": "2024-03-01",
            "milestone_structure": structure_json()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = write_draft(&dir, "sale.json", sale_draft_json());

    let args = UpdateArgs {
        kind: RecordKind::Sale,
        id: 4,
        file,
    };
    assert_eq!(run_update(&args, &stores(&mock_server)).await.unwrap(), 0);
}

#[tokio::test]
async fn update_project_requires_a_name() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/projects/3/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = write_draft(
        &dir,
        "project.json",
        serde_json::json!({"name": "  ", "start_date": "2024-03-01"}),
    );

    let args = UpdateArgs {
        kind: RecordKind::Project,
        id: 3,
        file,
    };
    assert_eq!(run_update(&args, &stores(&mock_server)).await.unwrap(), 1);
}

#[tokio::test]
async fn unreadable_draft_is_an_error() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("missing.json");

    let args = CreateArgs {
        kind: RecordKind::Project,
        file,
    };
    let err = run_create(&args, &stores(&mock_server)).await.unwrap_err();
    assert!(err.to_string().contains("failed to read draft"));
}
