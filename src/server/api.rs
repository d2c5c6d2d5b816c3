//! 收藏与判分接口
//!
//! 判分接口的返回格式是与页面脚本之间的固定契约：
//! `is_correct` / `correct_answers` / `question_type` 三个字段，
//! 判定逻辑必须与页面内嵌脚本一致（以服务端为权威）。

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::grading::grade;
use crate::models::QuestionType;
use crate::server::auth::CurrentUser;
use crate::server::error::{ApiError, ApiResult};
use crate::server::questions::load_questions;
use crate::server::AppState;

/// GET /api/bookmarks 响应
#[derive(Debug, Serialize)]
pub struct BookmarksResponse {
    pub bookmarks: Vec<String>,
}

/// GET /api/bookmarks
pub async fn get_bookmarks(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<BookmarksResponse>> {
    let bookmarks = state.db.list_bookmarks(user.id).await?;
    Ok(Json(BookmarksResponse { bookmarks }))
}

/// POST /api/bookmark 请求
#[derive(Debug, Deserialize)]
pub struct BookmarkRequest {
    pub question_id: String,
}

/// POST /api/bookmark 响应
#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub status: &'static str,
}

/// POST /api/bookmark（切换收藏状态）
pub async fn toggle_bookmark(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<BookmarkRequest>,
) -> ApiResult<Json<BookmarkResponse>> {
    let added = state
        .db
        .toggle_bookmark(user.id, &request.question_id)
        .await?;
    Ok(Json(BookmarkResponse {
        status: if added { "added" } else { "removed" },
    }))
}

/// POST /api/check_answer 请求
#[derive(Debug, Deserialize)]
pub struct CheckAnswerRequest {
    pub question_id: String,
    #[serde(default)]
    pub user_answer: Vec<String>,
}

/// POST /api/check_answer 响应
#[derive(Debug, Serialize)]
pub struct CheckAnswerResponse {
    pub is_correct: bool,
    pub correct_answers: Vec<String>,
    pub question_type: QuestionType,
}

/// POST /api/check_answer（服务端权威判分）
pub async fn check_answer(
    State(state): State<AppState>,
    Json(request): Json<CheckAnswerRequest>,
) -> ApiResult<Json<CheckAnswerResponse>> {
    let questions = load_questions(&state.config.questions_file)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let question = questions
        .into_iter()
        .find(|q| q.anchor_id == request.question_id)
        .ok_or(ApiError::QuestionNotFound)?;

    let is_correct = grade(question.q_type, &question.correct_letters, &request.user_answer);

    Ok(Json(CheckAnswerResponse {
        is_correct,
        correct_answers: question.correct_letters,
        question_type: question.q_type,
    }))
}
