// HTTP handlers organized by feature. Every route resolves the caller's role
// first and checks one capability before touching the store.

pub mod audit;
pub mod auth;
pub mod blocks;
pub mod calendar;
mod dtos;
mod extract;
pub mod overrides;
pub mod summary;

use crate::state::AppState;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(blocks::router())
        .merge(overrides::router())
        .merge(summary::router())
        .merge(calendar::router())
        .merge(audit::router())
        .with_state(state)
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLog, AuditWorker};
    use crate::config::CalendarConfig;
    use crate::models::{AuditEntry, Category, Template, Weekday};
    use crate::roles::RoleDirectory;
    use crate::test_utils::setup_test_db;
    use axum::body::Body;
    use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tower::ServiceExt;

    const OWNER: &str = "owner@example.com";
    const EA: &str = "ea@example.com";

    struct Harness {
        app: Router,
        state: AppState,
        _worker: AuditWorker,
        _dir: TempDir,
    }

    fn harness_with(calendars: Vec<CalendarConfig>) -> Harness {
        let (db, dir) = setup_test_db();
        let db = Arc::new(Mutex::new(db));
        let (audit, worker) = AuditLog::spawn(Arc::clone(&db));
        let state = AppState::new(db, audit, RoleDirectory::new(Some(OWNER), Some(EA)), calendars);
        Harness {
            app: router(state.clone()),
            state,
            _worker: worker,
            _dir: dir,
        }
    }

    fn harness() -> Harness {
        harness_with(Vec::new())
    }

    impl Harness {
        async fn send(&self, method: Method, uri: &str, user: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
            let mut request = Request::builder().method(method).uri(uri);
            if let Some(user) = user {
                request = request.header("x-user-email", user);
            }
            let body = match body {
                Some(json) => {
                    request = request.header(CONTENT_TYPE, "application/json");
                    Body::from(json.to_string())
                }
                None => Body::empty(),
            };
            self.dispatch(request.body(body).unwrap()).await
        }

        async fn dispatch(&self, request: Request<Body>) -> (StatusCode, Value) {
            let response = self.app.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        fn audit_entries(&self) -> Vec<AuditEntry> {
            self.state.audit.flush();
            let db = self.state.db.lock().unwrap();
            AuditEntry::find_recent(db.connection(), 100).unwrap()
        }

        fn template(&self, day: Weekday) -> Vec<crate::models::Block> {
            let db = self.state.db.lock().unwrap();
            Template::list(db.connection(), Some(day)).unwrap()
        }
    }

    #[tokio::test]
    async fn test_unknown_or_missing_identity_is_unauthorized() {
        let h = harness();

        let (status, body) = h.send(Method::GET, "/api/blocks", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");

        let (status, body) = h.send(Method::GET, "/api/blocks", Some("stranger@example.com"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_identity_match_ignores_case() {
        let h = harness();
        let (status, _) = h.send(Method::GET, "/api/blocks", Some("OWNER@Example.com"), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_blocks_for_day() {
        let h = harness();
        let (status, body) = h.send(Method::GET, "/api/blocks?day=Monday", Some(EA), None).await;

        assert_eq!(status, StatusCode::OK);
        let blocks = body["blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), h.template(Weekday::Monday).len());
        assert!(blocks.iter().all(|b| b["day"] == "Monday"));
        assert_eq!(blocks[0]["sort_order"], 0);
    }

    #[tokio::test]
    async fn test_list_blocks_rejects_unknown_day() {
        let h = harness();
        let (status, body) = h.send(Method::GET, "/api/blocks?day=Funday", Some(OWNER), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("day"));
    }

    #[tokio::test]
    async fn test_create_block_records_audit() {
        let h = harness();
        let body = json!({
            "day": "Sunday",
            "sort_order": 0,
            "time_label": "4:00 – 5:00 AM",
            "category": "gym",
            "description": "Early lift",
            "hours": 1
        });

        let (status, response) = h.send(Method::POST, "/api/blocks", Some(EA), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response["block"]["description"], "Early lift");
        assert_eq!(response["block"]["sort_order"], 0);

        let entries = h.audit_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].performed_by, EA);
        assert_eq!(entries[0].day, Some(Weekday::Sunday));
        assert_eq!(
            entries[0].record_id,
            response["block"]["id"].as_i64().map(|id| id.to_string())
        );
    }

    #[tokio::test]
    async fn test_create_with_empty_time_label_persists_nothing() {
        let h = harness();
        let before = h.template(Weekday::Monday);
        let body = json!({
            "day": "Monday",
            "sort_order": 0,
            "time_label": "",
            "category": "gym",
            "description": "x",
            "hours": 1
        });

        let (status, response) = h.send(Method::POST, "/api/blocks", Some(OWNER), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["error"].as_str().unwrap().contains("time_label"));
        assert_eq!(h.template(Weekday::Monday), before);
        assert!(h.audit_entries().is_empty());
    }

    #[tokio::test]
    async fn test_create_without_sort_order_persists_nothing() {
        let h = harness();
        let before = h.template(Weekday::Monday);
        let body = json!({
            "day": "Monday",
            "time_label": "x",
            "category": "gym",
            "description": "x",
            "hours": 1
        });

        let (status, response) = h.send(Method::POST, "/api/blocks", Some(OWNER), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "Invalid sort_order: is required");
        assert_eq!(h.template(Weekday::Monday), before);
        assert!(h.audit_entries().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_bad_request() {
        let h = harness();
        let before = h.template(Weekday::Monday);
        let body = json!({
            "day": "Monday",
            "sort_order": 0,
            "time_label": "x",
            "category": "gym",
            "description": "x"
        });

        let (status, response) = h.send(Method::POST, "/api/blocks", Some(OWNER), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error = response["error"].as_str().unwrap();
        assert!(error.starts_with("Invalid body:"), "{error}");
        assert!(error.contains("missing field `hours`"), "{error}");

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/blocks/reorder")
            .header("x-user-email", OWNER)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{\"day\": \"Monday\","))
            .unwrap();
        let (status, response) = h.dispatch(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["error"].is_string());

        assert_eq!(h.template(Weekday::Monday), before);
        assert!(h.audit_entries().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_block() {
        let h = harness();
        let target = h.template(Weekday::Tuesday)[1].clone();
        let id = target.id.unwrap();

        let (status, body) = h
            .send(
                Method::PATCH,
                &format!("/api/blocks/{id}"),
                Some(OWNER),
                Some(json!({ "hours": 2, "category": "life" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["block"]["category"], "life");
        assert_eq!(body["block"]["time_label"], target.time_label);

        let (status, body) = h.send(Method::DELETE, &format!("/api/blocks/{id}"), Some(OWNER), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], true);

        // Deleting again is tolerated but not audited.
        let (status, _) = h.send(Method::DELETE, &format!("/api/blocks/{id}"), Some(OWNER), None).await;
        assert_eq!(status, StatusCode::OK);

        let entries = h.audit_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, crate::models::AuditAction::Delete);
        assert_eq!(entries[1].action, crate::models::AuditAction::Update);
    }

    #[tokio::test]
    async fn test_update_unknown_block_is_not_found() {
        let h = harness();
        let (status, body) = h
            .send(Method::PATCH, "/api/blocks/999999", Some(OWNER), Some(json!({ "hours": 1 })))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Block not found");
    }

    #[tokio::test]
    async fn test_update_without_fields_is_rejected() {
        let h = harness();
        let id = h.template(Weekday::Monday)[0].id.unwrap();
        let (status, _) = h
            .send(Method::PATCH, &format!("/api/blocks/{id}"), Some(OWNER), Some(json!({})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reorder_reverses_day() {
        let h = harness();
        let mut ids: Vec<i64> = h.template(Weekday::Saturday).iter().filter_map(|b| b.id).collect();
        ids.reverse();

        let (status, body) = h
            .send(
                Method::POST,
                "/api/blocks/reorder",
                Some(EA),
                Some(json!({ "day": "Saturday", "orderedIds": ids })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let now: Vec<i64> = h.template(Weekday::Saturday).iter().filter_map(|b| b.id).collect();
        assert_eq!(now, ids);

        let entries = h.audit_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, crate::models::AuditAction::Reorder);
        assert_eq!(entries[0].day, Some(Weekday::Saturday));
        assert_eq!(entries[0].performed_by, EA);
    }

    #[tokio::test]
    async fn test_reorder_with_foreign_id_changes_nothing() {
        let h = harness();
        let before = h.template(Weekday::Monday);
        let mut ids: Vec<i64> = before.iter().filter_map(|b| b.id).rev().collect();
        ids.push(h.template(Weekday::Sunday)[0].id.unwrap());

        let (status, _) = h
            .send(
                Method::POST,
                "/api/blocks/reorder",
                Some(OWNER),
                Some(json!({ "day": "Monday", "orderedIds": ids })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(h.template(Weekday::Monday), before);
        assert!(h.audit_entries().is_empty());
    }

    #[tokio::test]
    async fn test_override_lifecycle() {
        let h = harness();
        let body = json!({
            "weekStart": "2026-03-09",
            "day": "Monday",
            "blocks": [{
                "time_label": "All day",
                "category": "personal",
                "description": "Day off",
                "hours": 24
            }],
            "note": "Public holiday"
        });

        let (status, created) = h.send(Method::POST, "/api/overrides", Some(EA), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["blocks"].as_array().unwrap().len(), 1);

        let (status, week) = h.send(Method::GET, "/api/overrides?week=2026-03-09", Some(OWNER), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(week["overrideDays"], json!(["Monday"]));

        let (_, day) = h
            .send(Method::GET, "/api/overrides?week=2026-03-09&day=Monday", Some(OWNER), None)
            .await;
        assert_eq!(day["isOverride"], true);
        assert_eq!(day["blocks"].as_array().unwrap().len(), 1);
        assert_eq!(day["blocks"][0]["description"], "Day off");
        assert_eq!(day["blocks"][0]["sort_order"], 0);

        let (status, reverted) = h
            .send(Method::DELETE, "/api/overrides?week=2026-03-09&day=Monday", Some(OWNER), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reverted["reverted"], true);

        let (_, day) = h
            .send(Method::GET, "/api/overrides?week=2026-03-09&day=Monday", Some(OWNER), None)
            .await;
        assert_eq!(day["isOverride"], false);
        assert_eq!(
            day["blocks"].as_array().unwrap().len(),
            h.template(Weekday::Monday).len()
        );

        let actions: Vec<_> = h.audit_entries().iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                crate::models::AuditAction::OverrideDelete,
                crate::models::AuditAction::OverrideCreate
            ]
        );
    }

    #[tokio::test]
    async fn test_rejected_override_keeps_existing_one() {
        let h = harness();
        let day_off = json!({
            "weekStart": "2026-03-09",
            "day": "Monday",
            "blocks": [{ "time_label": "All day", "category": "personal", "description": "Day off", "hours": 24 }]
        });
        let (status, _) = h.send(Method::POST, "/api/overrides", Some(OWNER), Some(day_off)).await;
        assert_eq!(status, StatusCode::CREATED);

        let zero_hours = json!({
            "weekStart": "2026-03-09",
            "day": "Monday",
            "blocks": [
                { "time_label": "AM", "category": "gym", "description": "Lift", "hours": 1 },
                { "time_label": "PM", "category": "gym", "description": "Nothing", "hours": 0 }
            ]
        });
        let (status, body) = h.send(Method::POST, "/api/overrides", Some(OWNER), Some(zero_hours)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("hours"));

        let missing_category = json!({
            "weekStart": "2026-03-09",
            "day": "Monday",
            "blocks": [{ "time_label": "AM", "description": "Lift", "hours": 1 }]
        });
        let (status, body) = h
            .send(Method::POST, "/api/overrides", Some(OWNER), Some(missing_category))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (_, day) = h
            .send(Method::GET, "/api/overrides?week=2026-03-09&day=Monday", Some(OWNER), None)
            .await;
        assert_eq!(day["isOverride"], true);
        assert_eq!(day["blocks"].as_array().unwrap().len(), 1);
        assert_eq!(day["blocks"][0]["description"], "Day off");

        let actions: Vec<_> = h.audit_entries().iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![crate::models::AuditAction::OverrideCreate]);
    }

    #[tokio::test]
    async fn test_override_requires_monday_week() {
        let h = harness();
        let (status, body) = h.send(Method::GET, "/api/overrides?week=2026-03-10", Some(OWNER), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("week_start"));

        let (status, _) = h.send(Method::GET, "/api/overrides", Some(OWNER), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_summary_reflects_override() {
        let h = harness();
        let (status, template) = h.send(Method::GET, "/api/summary", Some(OWNER), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(template["tracked"][0]["category"], "immutable");
        assert_eq!(template["tracked"][0]["hit"], true);

        let body = json!({
            "weekStart": "2026-03-09",
            "day": "Monday",
            "blocks": [{ "time_label": "All day", "category": "personal", "description": "Day off", "hours": 24 }]
        });
        h.send(Method::POST, "/api/overrides", Some(OWNER), Some(body)).await;

        let (_, week) = h.send(Method::GET, "/api/summary?week=2026-03-09", Some(OWNER), None).await;
        // Losing Monday's 7.75h of immutable misses the target.
        assert_eq!(week["tracked"][0]["hit"], false);
        assert_eq!(week["overrideDays"], json!(["Monday"]));
    }

    #[tokio::test]
    async fn test_categories_table() {
        let h = harness();
        let (status, body) = h.send(Method::GET, "/api/categories", Some(EA), None).await;
        assert_eq!(status, StatusCode::OK);

        let categories = body["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 10);
        let meeting = categories.iter().find(|c| c["category"] == "meeting").unwrap();
        assert_eq!(meeting["resolves_to"], "engineroom");
        assert_eq!(meeting["label"], "ER Meeting");
        assert_eq!(body["days"][2]["tag"], "remote");
    }

    #[tokio::test]
    async fn test_audit_requires_manage_settings() {
        let h = harness();
        let (status, body) = h.send(Method::GET, "/api/audit", Some(EA), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Not permitted to manage_settings");

        let (status, body) = h.send(Method::GET, "/api/audit?limit=5", Some(OWNER), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["entries"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_calendar_requires_token() {
        let h = harness();
        let (status, _) = h.send(Method::GET, "/api/calendar", Some(OWNER), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_calendar_without_configured_sources() {
        let h = harness();
        let request = Request::builder()
            .uri("/api/calendar")
            .header("x-user-email", OWNER)
            .header(AUTHORIZATION, "Bearer token")
            .body(Body::empty())
            .unwrap();

        let (status, body) = h.dispatch(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["events"], json!([]));
        assert!(body["message"].as_str().unwrap().contains("GCAL_ID_"));
    }

    #[tokio::test]
    async fn test_calendar_writes_limited_to_configured_calendars() {
        let h = harness_with(vec![CalendarConfig {
            id: "work".to_string(),
            label: "Immutable".to_string(),
            color: "#22c55e".to_string(),
            role: Category::Immutable,
        }]);
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/api/calendar?calendarId=elsewhere&eventId=abc")
            .header("x-user-email", EA)
            .header(AUTHORIZATION, "Bearer token")
            .body(Body::empty())
            .unwrap();

        let (status, body) = h.dispatch(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Calendar not found");
    }

    #[tokio::test]
    async fn test_list_configured_calendars() {
        let h = harness_with(vec![CalendarConfig {
            id: "work".to_string(),
            label: "Immutable".to_string(),
            color: "#22c55e".to_string(),
            role: Category::Immutable,
        }]);

        let (status, _) = h.send(Method::GET, "/api/calendars", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = h.send(Method::GET, "/api/calendars", Some(EA), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["calendars"],
            json!([{ "id": "work", "label": "Immutable", "color": "#22c55e", "role": "immutable" }])
        );
    }
}
