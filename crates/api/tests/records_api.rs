//! HTTP-level integration tests for the review queue (`GET /records/list`)
//! and single-record lookup.

mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json_auth, record_id, seed_records, token_for};
use sqlx::PgPool;

const REVIEWER: i64 = 101;
const OTHER_REVIEWER: i64 = 202;

async fn approve(pool: &PgPool, record_id: i64, user_id: i64) {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/records/{record_id}/feedback"),
        serde_json::json!({ "choice": "approved" }),
        &token_for(user_id, "reviewer"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

fn returned_ids(json: &serde_json::Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .expect("data must be an array")
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unauthenticated_request_is_rejected_regardless_of_params(pool: PgPool) {
    seed_records(&pool, &[("k1", "exam-a", 0)]).await;

    for uri in [
        "/api/v1/records/list",
        "/api/v1/records/list?limit=5",
        "/api/v1/records/list?limit=abc&exams%5B%5D=exam-a",
        "/api/v1/records/list?exams%5B%5D=exam-a&exams%5B%5D=exam-b",
    ] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "uri: {uri}");

        let json = body_json(response).await;
        assert_eq!(json["code"], "UNAUTHORIZED");
        assert_eq!(json["error"], "Missing identity token");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_token_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/records/list", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "Identity token is invalid or expired"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_bearer_authorization_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = axum::http::Request::builder()
        .uri("/api/v1/records/list")
        .header("authorization", format!("Token {}", token_for(REVIEWER, "reviewer")))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "Authorization header must carry a Bearer token"
    );
}

// ---------------------------------------------------------------------------
// Selection contract
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn total_counts_only_records_the_user_has_not_reviewed(pool: PgPool) {
    seed_records(
        &pool,
        &[
            ("k1", "exam-a", 0),
            ("k2", "exam-a", 1),
            ("k3", "exam-b", 0),
            ("k4", "exam-b", 1),
            ("k5", "exam-c", 0),
        ],
    )
    .await;
    let reviewed_1 = record_id(&pool, "k1").await;
    let reviewed_2 = record_id(&pool, "k4").await;
    approve(&pool, reviewed_1, REVIEWER).await;
    approve(&pool, reviewed_2, REVIEWER).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        "/api/v1/records/list?limit=10",
        &token_for(REVIEWER, "reviewer"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 3);
    assert_eq!(json["limit"], 10);

    let ids = returned_ids(&json);
    assert_eq!(ids.len(), 3);
    assert!(!ids.contains(&reviewed_1));
    assert!(!ids.contains(&reviewed_2));

    // None of the attached decisions can belong to the requesting reviewer.
    for record in json["data"].as_array().unwrap() {
        for check in record["data_checks"].as_array().unwrap() {
            assert_ne!(check["user_id"], REVIEWER);
        }
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn other_reviewers_decisions_are_attached(pool: PgPool) {
    seed_records(&pool, &[("k1", "exam-a", 0)]).await;
    let id = record_id(&pool, "k1").await;
    approve(&pool, id, REVIEWER).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        "/api/v1/records/list",
        &token_for(OTHER_REVIEWER, "reviewer"),
    )
    .await;
    let json = body_json(response).await;

    assert_eq!(json["total"], 1);
    let record = &json["data"][0];
    assert_eq!(record["id"], id);
    assert_eq!(record["key"], "k1");
    assert_eq!(record["exam_uid"], "exam-a");
    let checks = record["data_checks"].as_array().unwrap();
    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0]["user_id"], REVIEWER);
    assert_eq!(checks[0]["choice"], "approved");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn exam_filter_restricts_records_and_total(pool: PgPool) {
    seed_records(
        &pool,
        &[
            ("a1", "exam-a", 0),
            ("a2", "exam-a", 1),
            ("b1", "exam-b", 0),
            ("c1", "exam-c", 0),
            ("c2", "exam-c", 1),
        ],
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        "/api/v1/records/list?limit=50&exams%5B%5D=exam-a&exams%5B%5D=exam-c",
        &token_for(REVIEWER, "reviewer"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 4);

    let allowed: HashSet<&str> = ["exam-a", "exam-c"].into_iter().collect();
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 4);
    for record in data {
        let exam = record["exam_uid"].as_str().unwrap();
        assert!(allowed.contains(exam), "unexpected exam {exam}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn single_exam_without_brackets_is_accepted(pool: PgPool) {
    seed_records(&pool, &[("a1", "exam-a", 0), ("b1", "exam-b", 0)]).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        "/api/v1/records/list?exams=exam-b",
        &token_for(REVIEWER, "reviewer"),
    )
    .await;
    let json = body_json(response).await;

    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["exam_uid"], "exam-b");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mixed_exam_spellings_are_combined(pool: PgPool) {
    seed_records(
        &pool,
        &[("a1", "exam-a", 0), ("b1", "exam-b", 0), ("c1", "exam-c", 0)],
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        "/api/v1/records/list?exams%5B%5D=exam-a&exams=exam-b",
        &token_for(REVIEWER, "reviewer"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 2);
    for record in json["data"].as_array().unwrap() {
        assert_ne!(record["exam_uid"], "exam-c");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn page_never_exceeds_limit_or_total(pool: PgPool) {
    let seeds: Vec<(String, i32)> = (0..12).map(|i| (format!("k{i}"), i)).collect();
    let seeds: Vec<(&str, &str, i32)> = seeds
        .iter()
        .map(|(key, pos)| (key.as_str(), "exam-a", *pos))
        .collect();
    seed_records(&pool, &seeds).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get_auth(
            app,
            "/api/v1/records/list?limit=5",
            &token_for(REVIEWER, "reviewer"),
        )
        .await,
    )
    .await;
    assert_eq!(json["total"], 12);
    assert_eq!(json["limit"], 5);
    let ids = returned_ids(&json);
    assert_eq!(ids.len(), 5);
    let unique: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), 5, "sample must not repeat records");

    // Filter matching nothing: empty page, zero total.
    let app = common::build_test_app(pool);
    let json = body_json(
        get_auth(
            app,
            "/api/v1/records/list?exams%5B%5D=exam-z",
            &token_for(REVIEWER, "reviewer"),
        )
        .await,
    )
    .await;
    assert_eq!(json["total"], 0);
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unusable_limit_falls_back_to_default(pool: PgPool) {
    for uri in [
        "/api/v1/records/list",
        "/api/v1/records/list?limit=abc",
        "/api/v1/records/list?limit=0",
    ] {
        let app = common::build_test_app(pool.clone());
        let json = body_json(get_auth(app, uri, &token_for(REVIEWER, "reviewer")).await).await;
        assert_eq!(json["limit"], 10, "uri: {uri}");
    }

    let app = common::build_test_app(pool);
    let json = body_json(
        get_auth(
            app,
            "/api/v1/records/list?limit=100000",
            &token_for(REVIEWER, "reviewer"),
        )
        .await,
    )
    .await;
    assert_eq!(json["limit"], 100);
}

// ---------------------------------------------------------------------------
// Single record
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_record_returns_record_with_checks(pool: PgPool) {
    seed_records(&pool, &[("k1", "exam-a", 3)]).await;
    let id = record_id(&pool, "k1").await;
    approve(&pool, id, REVIEWER).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/records/{id}"),
        &token_for(OTHER_REVIEWER, "reviewer"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["position"], 3);
    assert_eq!(json["data"]["data_checks"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_missing_record_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        "/api/v1/records/999999",
        &token_for(REVIEWER, "reviewer"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
