//! 登录与会话
//!
//! 密码以加盐 SHA-256 存储；会话令牌是不透明的 UUID，
//! 落库并通过 HttpOnly Cookie 携带。中间件把 Cookie 解析成
//! 当前用户注入请求扩展：页面请求未登录时重定向到登录页，
//! 接口请求未登录时返回 401 JSON。

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::server::error::{ApiError, ApiResult};
use crate::server::pages::render_login_page;
use crate::server::AppState;

/// 会话 Cookie 名
pub const SESSION_COOKIE: &str = "session";

/// 注入到请求扩展中的当前用户
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub display_name: String,
}

/// 会话中间件
///
/// 受保护路由统一挂载：解析会话 Cookie，查出用户后注入
/// 请求扩展；未登录时按路径区分页面重定向和接口 401。
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = session_token(request.headers());

    let user = match token {
        Some(token) => match state.db.user_for_session(&token).await {
            Ok(user) => user,
            Err(e) => return ApiError::Database(e).into_response(),
        },
        None => None,
    };

    match user {
        Some(user) => {
            request.extensions_mut().insert(CurrentUser {
                id: user.id,
                username: user.username,
                display_name: user.display_name,
            });
            next.run(request).await
        }
        None if request.uri().path().starts_with("/api/") => {
            ApiError::Unauthorized.into_response()
        }
        None => Redirect::to("/login").into_response(),
    }
}

/// 从请求头解析会话令牌
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().strip_prefix(&format!("{SESSION_COOKIE}=")))
        .next()
        .map(str::to_string)
}

/// 登录表单
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// GET /login
pub async fn login_page() -> Html<String> {
    Html(render_login_page(None))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Response> {
    let user = state.db.find_user_by_username(&form.username).await?;

    match user.filter(|u| verify_password(&u.password, &form.password)) {
        Some(user) => {
            let token = state.db.create_session(user.id).await?;
            let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly");
            Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response())
        }
        None => Ok(Html(render_login_page(Some("用户名或密码错误"))).into_response()),
    }
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    if let Some(token) = session_token(&headers) {
        state.db.delete_session(&token).await?;
    }
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/login")).into_response())
}

// ========== 密码哈希 ==========

/// 生成加盐密码哈希（sha256$盐$摘要）
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!("sha256${salt}${}", digest_hex(&salt, password))
}

/// 校验密码
pub fn verify_password(stored: &str, password: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("sha256"), Some(salt), Some(digest)) => digest_hex(salt, password) == digest,
        _ => false,
    }
}

fn digest_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
