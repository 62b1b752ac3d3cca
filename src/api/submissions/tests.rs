use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::db::types::UserRole;
use crate::test_support;

#[tokio::test]
async fn duplicate_submission_returns_conflict() {
    let ctx = test_support::setup_test_context().await;

    let teacher =
        test_support::insert_user(ctx.state.db(), "teacher@example.com", UserRole::Teacher, "pw-teacher-1")
            .await;
    let student =
        test_support::insert_user(ctx.state.db(), "student@example.com", UserRole::Student, "pw-student-1")
            .await;
    let course = test_support::insert_course(ctx.state.db(), "CS-201", &teacher.id).await;
    test_support::enroll_student(ctx.state.db(), &student.id, &course.id).await;
    let assignment = test_support::insert_assignment(ctx.state.db(), &course.id).await;

    let token = test_support::bearer_token(&student.id, ctx.state.settings());
    let submit_request = || {
        test_support::json_request(
            Method::POST,
            "/api/v1/submissions",
            Some(&token),
            Some(json!({ "assignment_id": assignment.id, "content": "my answer" })),
        )
    };

    let response = ctx.app.clone().oneshot(submit_request()).await.expect("submit");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = test_support::read_json(response).await;
    assert_eq!(created["student_id"], student.id);
    assert_eq!(created["is_late"], false);

    let response = ctx.app.clone().oneshot(submit_request()).await.expect("submit again");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = test_support::read_json(response).await;
    assert_eq!(body["detail"], "Submission already exists for this assignment");

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM submissions WHERE assignment_id = $1 AND student_id = $2",
    )
    .bind(&assignment.id)
    .bind(&student.id)
    .fetch_one(ctx.state.db())
    .await
    .expect("count submissions");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn submission_requires_active_enrollment() {
    let ctx = test_support::setup_test_context().await;

    let teacher =
        test_support::insert_user(ctx.state.db(), "teacher@example.com", UserRole::Teacher, "pw-teacher-2")
            .await;
    let outsider =
        test_support::insert_user(ctx.state.db(), "outsider@example.com", UserRole::Student, "pw-student-2")
            .await;
    let course = test_support::insert_course(ctx.state.db(), "CS-202", &teacher.id).await;
    let assignment = test_support::insert_assignment(ctx.state.db(), &course.id).await;

    let token = test_support::bearer_token(&outsider.id, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/submissions",
            Some(&token),
            Some(json!({ "assignment_id": assignment.id, "content": "uninvited" })),
        ))
        .await
        .expect("submit without enrollment");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
