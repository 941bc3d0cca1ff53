//! Board operations driven over the HTTP store

use leads_kanban::board::GetBoard;
use leads_kanban::column::{AddColumn, DeleteColumn};
use leads_kanban::lead::MoveLead;
use leads_kanban::{
    BoardContext, BoardOperationProcessor, HttpStore, HttpStoreOptions, KanbanError,
    OperationProcessor, StoreError,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

async fn mount_board(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/leads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"_id": "1", "status": "New", "companyName": "Acme"},
                {"_id": "2", "status": "Contacted"},
                {"_id": "3", "status": "Lost", "customColumnId": "custom-1"}
            ]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/leads/columns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "custom-1", "title": "Hot Leads", "order": 0}
        ])))
        .mount(server)
        .await;
}

fn context(server: &MockServer) -> BoardContext {
    let store = HttpStore::new(
        HttpStoreOptions::new(format!("{}/api", server.uri())).with_token("t0ken"),
    )
    .unwrap();
    BoardContext::from_store(Arc::new(store))
}

#[tokio::test]
async fn test_board_from_http_store() {
    let server = MockServer::start().await;
    mount_board(&server).await;
    let ctx = context(&server);

    let board = BoardOperationProcessor::new()
        .process(&GetBoard, &ctx)
        .await
        .unwrap();

    let ids: Vec<&str> = board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["New", "Contacted", "custom-1"]);
    assert_eq!(board["columns"][0]["leads"][0]["companyName"], "Acme");
}

#[tokio::test]
async fn test_move_sends_only_changed_fields() {
    let server = MockServer::start().await;
    mount_board(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/api/leads/3"))
        .and(header("authorization", "Bearer t0ken"))
        .and(body_json(json!({"status": "Contacted", "customColumnId": null})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"_id": "3", "status": "Contacted"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let ctx = context(&server);

    let result = BoardOperationProcessor::new()
        .process(&MoveLead::new("3", "2"), &ctx)
        .await
        .unwrap();

    assert_eq!(result["result"], "reassign");
    assert_eq!(result["lead"]["status"], "Contacted");
}

#[tokio::test]
async fn test_rejected_move_surfaces_persistence_failure() {
    let server = MockServer::start().await;
    mount_board(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/api/leads/1"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    let ctx = context(&server);

    let err = BoardOperationProcessor::new()
        .process(&MoveLead::new("1", "custom-1"), &ctx)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        KanbanError::Persistence(StoreError::Unauthorized)
    ));
    let board = ctx.board().await.unwrap();
    assert_eq!(board.column_by_id("New").unwrap().lead_ids(), vec!["1"]);
}

#[tokio::test]
async fn test_add_column_puts_full_list() {
    let server = MockServer::start().await;
    mount_board(&server).await;
    Mock::given(method("PUT"))
        .and(path("/api/leads/columns"))
        .and(|request: &Request| {
            let body: serde_json::Value = match serde_json::from_slice(&request.body) {
                Ok(body) => body,
                Err(_) => return false,
            };
            body.as_array().is_some_and(|columns| {
                columns.len() == 2
                    && columns[0]["id"] == "custom-1"
                    && columns[1]["title"] == "Follow Up"
                    && columns[1]["order"] == 1
            })
        })
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let ctx = context(&server);

    let column = BoardOperationProcessor::new()
        .process(&AddColumn::new("Follow Up"), &ctx)
        .await
        .unwrap();
    assert!(column["id"].as_str().unwrap().starts_with("custom-"));
}

#[tokio::test]
async fn test_delete_custom_column_over_http() {
    let server = MockServer::start().await;
    mount_board(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/api/leads/3"))
        .and(body_json(json!({"customColumnId": null})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"_id": "3", "status": "Lost"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/leads/columns/custom-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/leads/columns"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    let ctx = context(&server);

    let result = BoardOperationProcessor::new()
        .process(&DeleteColumn::new("custom-1"), &ctx)
        .await
        .unwrap();

    assert_eq!(result["report"]["succeeded"], 1);
    assert_eq!(ctx.read_activity(None).await[0].op, "delete column");
}
