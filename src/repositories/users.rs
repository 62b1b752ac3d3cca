use sqlx::PgPool;

use crate::db::models::User;
use crate::db::types::UserRole;

const COLUMNS: &str = "\
    id, first_name, last_name, email, roll_number, hashed_password, role, \
    is_active, created_at, updated_at";

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE email = $1"))
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    let found = sqlx::query_scalar::<_, String>("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

pub(crate) async fn roll_number_exists(
    pool: &PgPool,
    roll_number: &str,
) -> Result<bool, sqlx::Error> {
    let found = sqlx::query_scalar::<_, String>("SELECT id FROM users WHERE roll_number = $1")
        .bind(roll_number)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

pub(crate) struct CreateUser<'a> {
    pub id: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub roll_number: Option<&'a str>,
    pub hashed_password: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: time::PrimitiveDateTime,
    pub updated_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateUser<'_>) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (
            id, first_name, last_name, email, roll_number, hashed_password,
            role, is_active, created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)
        RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.first_name)
    .bind(params.last_name)
    .bind(params.email)
    .bind(params.roll_number)
    .bind(params.hashed_password)
    .bind(params.role)
    .bind(params.is_active)
    .bind(params.created_at)
    .bind(params.updated_at)
    .fetch_one(pool)
    .await
}
