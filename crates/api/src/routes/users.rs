//! Admin users CRUD.
//!
//! Collaborator handlers: the gate in front of them is the interesting
//! part. Field validation here is deliberately minimal.

use core::str::FromStr;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatehouse_auth::{CredentialStore, LoginRecord, Role, User, password};
use gatehouse_core::UserId;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// `POST /admin/users`
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_names(&body.first_name, &body.last_name)?;
    validate_password(&body.password)?;

    let hash = password::hash_password(&body.password)?;
    let user = User::new(
        body.first_name,
        body.last_name,
        &body.email,
        &body.phone,
        hash,
        body.role.unwrap_or_default(),
    )?;

    state.users.insert(user).await?;
    Ok((StatusCode::OK, "User created successfully."))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub page_no: usize,
    #[serde(default = "default_row")]
    pub row: usize,
}

fn default_row() -> usize {
    20
}

/// Row shape for listings: credentials and the canonical token never leave
/// the store through this endpoint.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub login_history: Vec<LoginRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            phone: u.phone,
            role: u.role,
            login_history: u.login_history,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub count: usize,
    pub result: Vec<UserView>,
}

/// `GET /admin/users?pageNo=0&row=20`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, ApiError> {
    let per_page = query.row.clamp(1, 100);
    let (count, users) = state.users.list(query.page_no, per_page).await?;

    Ok(Json(ListResponse {
        count,
        result: users.into_iter().map(UserView::from).collect(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    #[serde(default)]
    pub password: Option<String>,
}

/// `PUT /admin/users/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_user_id(&id)?;
    let Some(mut user) = state.users.find_by_id(id).await? else {
        return Err(ApiError::bad_request("Invalid user."));
    };

    validate_names(&body.first_name, &body.last_name)?;

    let email = body.email.trim().to_lowercase();
    if email.len() < 5 || !email.contains('@') {
        return Err(ApiError::bad_request("invalid email format"));
    }
    let phone = body.phone.trim().to_string();
    if phone.is_empty() {
        return Err(ApiError::bad_request("phone cannot be empty"));
    }

    user.first_name = body.first_name;
    user.last_name = body.last_name;
    user.email = email;
    user.phone = phone;
    user.role = body.role;
    if let Some(new_password) = body.password {
        validate_password(&new_password)?;
        user.password_hash = password::hash_password(&new_password)?;
    }
    user.updated_at = Utc::now();

    state.users.update(user).await?;
    Ok((StatusCode::OK, "User updated successfully."))
}

/// `DELETE /admin/users/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_user_id(&id)?;
    if !state.users.delete(id).await? {
        return Err(ApiError::bad_request("Invalid user."));
    }
    Ok((StatusCode::OK, "User deleted successfully."))
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::from_str(raw).map_err(|_| ApiError::bad_request("Invalid user."))
}

fn validate_names(first: &str, last: &str) -> Result<(), ApiError> {
    if first.trim().len() < 2 || last.trim().len() < 2 {
        return Err(ApiError::bad_request(
            "first and last name must be at least 2 characters",
        ));
    }
    Ok(())
}

fn validate_password(candidate: &str) -> Result<(), ApiError> {
    if candidate.len() < 8 {
        return Err(ApiError::bad_request(
            "password must be at least 8 characters",
        ));
    }
    Ok(())
}
