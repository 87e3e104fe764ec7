mod common;

use axum::http::StatusCode;
use axum_test_helper::TestClient;
use serde_json::{json, Value};
use similar_asserts::assert_eq;

#[tokio::test]
async fn health_is_ok() {
    let client = common::create_client().await;
    let response = client.get("/health").send().await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unmatched_paths_are_bad_requests() {
    let client = common::create_client().await;

    let response = client.get("/only_a_database").send().await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await;
    assert_eq!(
        body,
        json!({"message": "No route matches GET /only_a_database"})
    );
}

#[tokio::test]
async fn create_with_an_id_is_a_bad_request() {
    let client = common::create_client().await;
    let response = client
        .post("/geo_rest_test/places/5")
        .body(r#"{"name": "somewhere"}"#)
        .header("Content-Type", "application/json")
        .send()
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn failures_are_counted_by_kind() {
    let client = common::create_client().await;
    client.get("/only_a_database").send().await;

    let response = client.get("/metrics").send().await;
    assert_eq!(response.status(), StatusCode::OK);
    let text = response.text().await;
    assert!(
        text.contains(r#"geo_rest_error_total{kind="bad_request"} 1"#),
        "{text}"
    );
}

#[tokio::test]
async fn unreachable_databases_do_not_keep_a_pool() {
    let (connection, pool) = common::unreachable_settings();
    let state = geo_rest::create_state(connection, pool, prometheus::Registry::new())
        .await
        .unwrap();
    let client = TestClient::new(geo_rest::create_router(state.clone()));

    for i in 0..3 {
        let response = client.get(&format!("/no_such_db_{i}/places/1")).send().await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    assert!(state.pools.read().await.is_empty());
    let text = client.get("/metrics").send().await.text().await;
    assert!(!text.contains("no_such_db"), "{text}");
}

mod database {
    //! These need a PostGIS server with the `geo_rest_test` database loaded.

    use super::*;
    use similar_asserts::assert_eq;

    fn feature_path(id: &Value) -> String {
        format!("/{}/places/{id}", common::TEST_DATABASE)
    }

    #[tokio::test]
    #[ignore]
    async fn create_read_and_delete_a_feature() {
        let client = common::create_client().await;

        let created = client
            .post(&format!("/{}/places", common::TEST_DATABASE))
            .body(
                json!({
                    "type": "Feature",
                    "properties": {"name": "round trip"},
                    "geometry": {"type": "Point", "coordinates": [145.0, -38.0]}
                })
                .to_string(),
            )
            .header("Content-Type", "application/json")
            .send()
            .await;
        assert_eq!(created.status(), StatusCode::OK);
        let created: Value = created.json().await;
        assert_eq!(created["type"], "Feature");
        assert_eq!(created["properties"]["name"], "round trip");
        assert_eq!(
            created["geometry"],
            json!({"type": "Point", "coordinates": [145, -38]})
        );

        let id = &created["properties"]["id"];
        let read: Value = client.get(&feature_path(id)).send().await.json().await;
        assert_eq!(read, created);

        let deleted = client.delete(&feature_path(id)).send().await;
        assert_eq!(deleted.status(), StatusCode::OK);

        let missing = client.get(&feature_path(id)).send().await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[ignore]
    async fn unknown_tables_are_not_found() {
        let client = common::create_client().await;
        let response = client
            .get(&format!("/{}/no_such_table/1", common::TEST_DATABASE))
            .send()
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[ignore]
    async fn queries_return_a_collection() {
        let client = common::create_client().await;
        let response = client
            .get(&format!(
                "/{}/places/closest/145/-38",
                common::TEST_DATABASE
            ))
            .send()
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await;
        assert_eq!(body["type"], "FeatureCollection");
    }
}
