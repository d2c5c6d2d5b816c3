//! 在线学习服务
//!
//! axum 应用：登录后浏览题库、收藏题目、请求服务端判分。
//! 题目编号用全局单计数器，锚点在整个文档内唯一，
//! 收藏记录以 (用户, 锚点 ID) 落在 SQLite。

pub mod api;
pub mod auth;
pub mod db;
pub mod error;
pub mod pages;
pub mod questions;

use anyhow::Result;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use db::Database;

/// 共享应用状态
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub config: Arc<Config>,
}

/// 启动在线服务
pub async fn run(config: Config) -> Result<()> {
    info!("正在连接数据库: {}", config.database_url);
    let db = Database::connect(&config.database_url).await?;
    db.run_migrations().await?;

    // 默认管理员账号（已存在时跳过）
    let password_hash = auth::hash_password(&config.admin_password);
    if db
        .seed_admin(
            &config.admin_username,
            &config.admin_display_name,
            &password_hash,
        )
        .await?
    {
        info!("✓ 已创建默认管理员账号: {}", config.admin_username);
    }

    let bind_addr = config.bind_addr.clone();
    let state = AppState {
        db: Arc::new(db),
        config: Arc::new(config),
    };

    let protected_routes = Router::new()
        .route("/", get(pages::index))
        .route("/api/bookmarks", get(api::get_bookmarks))
        .route("/api/bookmark", post(api::toggle_bookmark))
        .route("/api/check_answer", post(api::check_answer))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let app = Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("🚀 服务启动: http://{}", bind_addr);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
