//! Store behavior against a mocked tracker backend.
//!
//! Covers the cache effects of every action, the loading/error envelope,
//! and the `detail`-or-fallback error message policy.

use std::time::Duration;

use chrono::NaiveDate;
use mtrack_client::{TrackerClient, TrackerConfig};
use mtrack_core::{
    EquipmentSaleId, MilestoneStructureId, ProjectDraft, ProjectId,
};
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

fn project_json(id: u64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "start_date": "2024-03-01",
        "description": "",
        "equipment_sales": [],
        "total_value": "0.00"
    })
}

fn sale_json(id: u64, structure_id: u64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("Sale {id}"),
        "vendor": "Acme",
        "quantity": 1,
        "total_amount": "1000.00",
        "milestone_structure": {"id": structure_id, "name": format!("Structure {structure_id}"), "milestones": []},
        "project_start_date": "2024-01-15"
    })
}

fn draft(name: &str) -> ProjectDraft {
    ProjectDraft {
        name: name.into(),
        start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        description: String::new(),
    }
}

async fn mount_projects(mock_server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/projects/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}

fn names(stores: &AppStores) -> Vec<String> {
    stores.projects.items().into_iter().map(|p| p.name).collect()
}

// -- fetch_all ----------------------------------------------------------------

#[tokio::test]
async fn fetch_all_replaces_items_in_server_order() {
    let mock_server = MockServer::start().await;
    mount_projects(
        &mock_server,
        serde_json::json!([project_json(3, "C"), project_json(1, "A"), project_json(2, "B")]),
    )
    .await;

    let stores = stores(&mock_server);
    assert!(!stores.projects.is_loading());
    stores.projects.fetch_all().await;

    assert_eq!(names(&stores), vec!["C", "A", "B"]);
    assert!(!stores.projects.is_loading());
    assert_eq!(stores.projects.error(), None);
}

#[tokio::test]
async fn fetch_all_failure_keeps_items_and_uses_fallback() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([project_json(1, "A")])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/projects/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    stores.projects.fetch_all().await;
    assert_eq!(names(&stores), vec!["A"]);

    stores.projects.fetch_all().await;
    assert_eq!(names(&stores), vec!["A"]);
    assert_eq!(stores.projects.error().as_deref(), Some("Failed to fetch projects"));
    assert!(!stores.projects.is_loading());
}

#[tokio::test]
async fn fetch_all_failure_prefers_backend_detail() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/milestones/structures/"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({"detail": "Database unavailable"})),
        )
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    stores.milestone_structures.fetch_all().await;
    assert!(stores.milestone_structures.items().is_empty());
    assert_eq!(
        stores.milestone_structures.error().as_deref(),
        Some("Database unavailable")
    );
}

#[tokio::test]
async fn next_action_clears_previous_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/equipment/sales/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/equipment/sales/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([sale_json(1, 2)])))
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    stores.equipment_sales.fetch_all().await;
    assert_eq!(
        stores.equipment_sales.error().as_deref(),
        Some("Failed to fetch equipment sales")
    );

    stores.equipment_sales.fetch_all().await;
    assert_eq!(stores.equipment_sales.error(), None);
    assert_eq!(stores.equipment_sales.items().len(), 1);
}

// -- create -------------------------------------------------------------------

#[tokio::test]
async fn create_appends_returned_record() {
    let mock_server = MockServer::start().await;
    mount_projects(&mock_server, serde_json::json!([project_json(1, "A")])).await;
    Mock::given(method("POST"))
        .and(path("/api/projects/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(project_json(2, "New")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    stores.projects.fetch_all().await;
    let created = stores.projects.create(&draft("New")).await.unwrap();

    assert_eq!(created.id, ProjectId::new(2));
    assert_eq!(names(&stores), vec!["A", "New"]);
    assert!(!stores.projects.is_loading());
}

#[tokio::test]
async fn failed_create_leaves_items_and_reports_error() {
    let mock_server = MockServer::start().await;
    mount_projects(&mock_server, serde_json::json!([project_json(1, "A")])).await;
    Mock::given(method("POST"))
        .and(path("/api/projects/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({"name": ["required"]})))
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    stores.projects.fetch_all().await;
    let err = stores.projects.create(&draft("")).await.unwrap_err();

    assert_eq!(err.message(), "Failed to create project");
    assert_eq!(err.api_error().status(), Some(400));
    assert_eq!(names(&stores), vec!["A"]);
    assert_eq!(stores.projects.error().as_deref(), Some("Failed to create project"));
    assert!(!stores.projects.is_loading());
}

// -- update -------------------------------------------------------------------

#[tokio::test]
async fn update_replaces_in_place() {
    let mock_server = MockServer::start().await;
    mount_projects(
        &mock_server,
        serde_json::json!([project_json(1, "A"), project_json(2, "B"), project_json(3, "C")]),
    )
    .await;
    Mock::given(method("PUT"))
        .and(path("/api/projects/2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json(2, "B2")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    stores.projects.fetch_all().await;
    stores.projects.update(ProjectId::new(2), &draft("B2")).await.unwrap();

    assert_eq!(names(&stores), vec!["A", "B2", "C"]);
}

#[tokio::test]
async fn update_of_uncached_record_leaves_cache_unchanged() {
    let mock_server = MockServer::start().await;
    mount_projects(&mock_server, serde_json::json!([project_json(1, "A")])).await;
    Mock::given(method("PUT"))
        .and(path("/api/projects/9/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json(9, "Z")))
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    stores.projects.fetch_all().await;
    let updated = stores.projects.update(ProjectId::new(9), &draft("Z")).await.unwrap();

    assert_eq!(updated.name, "Z");
    assert_eq!(names(&stores), vec!["A"]);
    assert_eq!(stores.projects.error(), None);
}

#[tokio::test]
async fn failed_update_uses_detail() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/projects/1/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "Not found."})))
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    let err = stores.projects.update(ProjectId::new(1), &draft("A")).await.unwrap_err();
    assert_eq!(err.to_string(), "Not found.");
    assert_eq!(stores.projects.error().as_deref(), Some("Not found."));
}

// -- delete -------------------------------------------------------------------

#[tokio::test]
async fn delete_removes_every_match_and_keeps_order() {
    let mock_server = MockServer::start().await;
    mount_projects(
        &mock_server,
        serde_json::json!([
            project_json(1, "A"),
            project_json(2, "B"),
            project_json(3, "C"),
            project_json(2, "B again")
        ]),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path("/api/projects/2/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    stores.projects.fetch_all().await;
    stores.projects.delete(ProjectId::new(2)).await.unwrap();

    assert_eq!(names(&stores), vec!["A", "C"]);
}

#[tokio::test]
async fn failed_delete_keeps_record() {
    let mock_server = MockServer::start().await;
    mount_projects(&mock_server, serde_json::json!([project_json(1, "A")])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/projects/1/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    stores.projects.fetch_all().await;
    let err = stores.projects.delete(ProjectId::new(1)).await.unwrap_err();

    assert_eq!(err.message(), "Failed to delete project");
    assert_eq!(names(&stores), vec!["A"]);
}

// -- Sub-actions ----------------------------------------------------------------

#[tokio::test]
async fn timeline_failure_is_returned_with_fallback() {
    let mock_server = MockServer::start().await;
    mount_projects(&mock_server, serde_json::json!([project_json(1, "A")])).await;
    Mock::given(method("GET"))
        .and(path("/api/projects/1/timeline/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/projects/timelines/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    stores.projects.fetch_all().await;

    let err = stores.projects.timeline(ProjectId::new(1)).await.unwrap_err();
    assert_eq!(err.message(), "Failed to fetch project timeline");
    let err = stores.projects.timelines().await.unwrap_err();
    assert_eq!(err.message(), "Failed to fetch project timelines");
    assert_eq!(names(&stores), vec!["A"]);
}

#[tokio::test]
async fn schedule_reads_do_not_touch_cache() {
    let mock_server = MockServer::start().await;
    let mut body = sale_json(4, 2);
    body["milestone_schedule"] = serde_json::json!([]);
    Mock::given(method("GET"))
        .and(path("/api/equipment/sales/4/schedule/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/equipment/sales/schedules/"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"detail": "boom"})),
        )
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    let schedule = stores.equipment_sales.schedule(EquipmentSaleId::new(4)).await.unwrap();
    assert_eq!(schedule.sale.id, EquipmentSaleId::new(4));
    assert!(stores.equipment_sales.items().is_empty());

    let err = stores.equipment_sales.schedules().await.unwrap_err();
    assert_eq!(err.message(), "boom");
    assert_eq!(stores.equipment_sales.error().as_deref(), Some("boom"));
}

#[tokio::test]
async fn assign_milestone_structure_replaces_cached_sale() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/equipment/sales/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([sale_json(1, 2), sale_json(4, 2), sale_json(5, 2)])),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/equipment/sales/4/assign_milestone/"))
        .and(body_json(serde_json::json!({"milestone_structure_id": 7})))
        .respond_with(ResponseTemplate::new(200).set_body_json(sale_json(4, 7)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    stores.equipment_sales.fetch_all().await;
    stores
        .equipment_sales
        .assign_milestone_structure(EquipmentSaleId::new(4), MilestoneStructureId::new(7))
        .await
        .unwrap();

    let structures: Vec<Option<MilestoneStructureId>> = stores
        .equipment_sales
        .items()
        .iter()
        .map(|s| s.milestone_structure.as_ref().map(|m| m.id))
        .collect();
    assert_eq!(
        structures,
        vec![
            Some(MilestoneStructureId::new(2)),
            Some(MilestoneStructureId::new(7)),
            Some(MilestoneStructureId::new(2)),
        ]
    );
}

#[tokio::test]
async fn failed_assignment_uses_fallback() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/equipment/sales/4/assign_milestone/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    let err = stores
        .equipment_sales
        .assign_milestone_structure(EquipmentSaleId::new(4), MilestoneStructureId::new(7))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Failed to assign milestone structure");
}

// -- Loading flag ---------------------------------------------------------------

#[tokio::test]
async fn loading_is_set_while_request_is_in_flight() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([project_json(1, "A")]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    let projects = stores.projects.clone();
    let task = tokio::spawn(async move { projects.fetch_all().await });

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(stores.projects.is_loading());

    task.await.unwrap();
    assert!(!stores.projects.is_loading());
    assert_eq!(names(&stores), vec!["A"]);
}

#[tokio::test]
async fn dropped_action_clears_loading() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([project_json(1, "A")]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let stores = stores(&mock_server);
    let outcome =
        tokio::time::timeout(Duration::from_millis(100), stores.projects.fetch_all()).await;

    assert!(outcome.is_err());
    assert!(!stores.projects.is_loading());
    assert!(stores.projects.items().is_empty());
}
