use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::db::types::UserRole;
use crate::test_support;

#[tokio::test]
async fn duplicate_grade_returns_conflict() {
    let ctx = test_support::setup_test_context().await;

    let teacher =
        test_support::insert_user(ctx.state.db(), "teacher@example.com", UserRole::Teacher, "pw-teacher-1")
            .await;
    let student =
        test_support::insert_user(ctx.state.db(), "student@example.com", UserRole::Student, "pw-student-1")
            .await;
    let course = test_support::insert_course(ctx.state.db(), "CS-301", &teacher.id).await;
    test_support::enroll_student(ctx.state.db(), &student.id, &course.id).await;
    let assignment = test_support::insert_assignment(ctx.state.db(), &course.id).await;

    let token = test_support::bearer_token(&teacher.id, ctx.state.settings());
    let grade_request = || {
        test_support::json_request(
            Method::POST,
            "/api/v1/grades",
            Some(&token),
            Some(json!({
                "assignment_id": assignment.id,
                "student_id": student.id,
                "score": 88.5,
                "feedback": "Good work"
            })),
        )
    };

    let response = ctx.app.clone().oneshot(grade_request()).await.expect("grade");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = test_support::read_json(response).await;
    assert_eq!(created["score"], 88.5);
    assert_eq!(created["graded_by"], teacher.id);

    let response = ctx.app.clone().oneshot(grade_request()).await.expect("grade again");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = test_support::read_json(response).await;
    assert_eq!(body["detail"], "Grade already exists for this assignment and student");

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM grades WHERE assignment_id = $1 AND student_id = $2",
    )
    .bind(&assignment.id)
    .bind(&student.id)
    .fetch_one(ctx.state.db())
    .await
    .expect("count grades");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn grade_score_cannot_exceed_max_score() {
    let ctx = test_support::setup_test_context().await;

    let teacher =
        test_support::insert_user(ctx.state.db(), "teacher@example.com", UserRole::Teacher, "pw-teacher-2")
            .await;
    let student =
        test_support::insert_user(ctx.state.db(), "student@example.com", UserRole::Student, "pw-student-2")
            .await;
    let course = test_support::insert_course(ctx.state.db(), "CS-302", &teacher.id).await;
    let assignment = test_support::insert_assignment(ctx.state.db(), &course.id).await;

    let token = test_support::bearer_token(&teacher.id, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/grades",
            Some(&token),
            Some(json!({
                "assignment_id": assignment.id,
                "student_id": student.id,
                "score": 150.0
            })),
        ))
        .await
        .expect("grade over max");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
