use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::db::types::UserRole;
use crate::test_support;

#[tokio::test]
async fn enrollment_reactivates_instead_of_duplicating() {
    let ctx = test_support::setup_test_context().await;

    let teacher =
        test_support::insert_user(ctx.state.db(), "teacher@example.com", UserRole::Teacher, "pw-teacher-1")
            .await;
    let student =
        test_support::insert_user(ctx.state.db(), "student@example.com", UserRole::Student, "pw-student-1")
            .await;
    let course = test_support::insert_course(ctx.state.db(), "CS-101", &teacher.id).await;
    let token = test_support::bearer_token(&student.id, ctx.state.settings());

    let enroll_request = || {
        test_support::json_request(
            Method::POST,
            "/api/v1/enrollments",
            Some(&token),
            Some(json!({ "course_id": course.id })),
        )
    };

    let response = ctx.app.clone().oneshot(enroll_request()).await.expect("enroll");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = ctx.app.clone().oneshot(enroll_request()).await.expect("enroll again");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = test_support::read_json(response).await;
    assert_eq!(body["detail"], "Already enrolled in this course");

    sqlx::query("UPDATE enrollments SET is_active = FALSE WHERE student_id = $1 AND course_id = $2")
        .bind(&student.id)
        .bind(&course.id)
        .execute(ctx.state.db())
        .await
        .expect("deactivate enrollment");

    let response = ctx.app.clone().oneshot(enroll_request()).await.expect("re-enroll");
    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["message"], "Enrollment reactivated");

    // Reactivation must reuse the existing row for the pair.
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM enrollments WHERE student_id = $1 AND course_id = $2",
    )
    .bind(&student.id)
    .bind(&course.id)
    .fetch_one(ctx.state.db())
    .await
    .expect("count enrollments");
    assert_eq!(count, 1);

    let active: bool = sqlx::query_scalar(
        "SELECT is_active FROM enrollments WHERE student_id = $1 AND course_id = $2",
    )
    .bind(&student.id)
    .bind(&course.id)
    .fetch_one(ctx.state.db())
    .await
    .expect("enrollment active flag");
    assert!(active);
}

#[tokio::test]
async fn teacher_cannot_enroll() {
    let ctx = test_support::setup_test_context().await;

    let teacher =
        test_support::insert_user(ctx.state.db(), "owner@example.com", UserRole::Teacher, "pw-teacher-2")
            .await;
    let course = test_support::insert_course(ctx.state.db(), "CS-102", &teacher.id).await;
    let token = test_support::bearer_token(&teacher.id, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/enrollments",
            Some(&token),
            Some(json!({ "course_id": course.id })),
        ))
        .await
        .expect("enroll as teacher");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
