//! 数据持久层
//!
//! SQLite 里只存三样东西：用户、会话令牌、收藏记录。
//! 题目本身每次请求都从题库文件重新解析，不落库；
//! 收藏记录通过 (user_id, question_id) 关联锚点 ID。

use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use uuid::Uuid;

/// 用户记录
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub password: String,
}

/// 数据库访问封装
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// 连接数据库
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .with_context(|| format!("无法连接数据库: {}", url))?;
        Ok(Self { pool })
    }

    /// 建表（幂等）
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                display_name TEXT NOT NULL,
                password TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("创建 users 表失败")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES users(id),
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("创建 sessions 表失败")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bookmarks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                question_id TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                UNIQUE(user_id, question_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("创建 bookmarks 表失败")?;

        Ok(())
    }

    /// 创建默认管理员账号（已存在时不做任何事）
    ///
    /// # 返回
    /// 是否新建了账号
    pub async fn seed_admin(
        &self,
        username: &str,
        display_name: &str,
        password_hash: &str,
    ) -> sqlx::Result<bool> {
        if self.find_user_by_username(username).await?.is_some() {
            return Ok(false);
        }
        sqlx::query("INSERT INTO users (username, display_name, password) VALUES (?, ?, ?)")
            .bind(username)
            .bind(display_name)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(true)
    }

    pub async fn find_user_by_username(&self, username: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, display_name, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    /// 为用户创建新会话，返回会话令牌
    pub async fn create_session(&self, user_id: i64) -> sqlx::Result<String> {
        let token = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO sessions (token, user_id) VALUES (?, ?)")
            .bind(&token)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(token)
    }

    /// 按会话令牌查用户
    pub async fn user_for_session(&self, token: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.display_name, u.password
            FROM sessions s JOIN users u ON u.id = s.user_id
            WHERE s.token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete_session(&self, token: &str) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// 用户收藏的全部锚点 ID（按收藏时间排序）
    pub async fn list_bookmarks(&self, user_id: i64) -> sqlx::Result<Vec<String>> {
        let rows = sqlx::query(
            "SELECT question_id FROM bookmarks WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(|r| r.get::<String, _>(0)).collect())
    }

    /// 切换收藏状态
    ///
    /// # 返回
    /// true 表示新增收藏，false 表示取消收藏
    pub async fn toggle_bookmark(&self, user_id: i64, question_id: &str) -> sqlx::Result<bool> {
        let existing =
            sqlx::query("SELECT id FROM bookmarks WHERE user_id = ? AND question_id = ?")
                .bind(user_id)
                .bind(question_id)
                .fetch_optional(&self.pool)
                .await?;

        match existing {
            Some(row) => {
                sqlx::query("DELETE FROM bookmarks WHERE id = ?")
                    .bind(row.get::<i64, _>(0))
                    .execute(&self.pool)
                    .await?;
                Ok(false)
            }
            None => {
                sqlx::query("INSERT INTO bookmarks (user_id, question_id) VALUES (?, ?)")
                    .bind(user_id)
                    .bind(question_id)
                    .execute(&self.pool)
                    .await?;
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 内存库必须限制为单连接，否则每个连接各有一份空库
    async fn test_db() -> Database {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("无法创建内存数据库");
        let db = Database { pool };
        db.run_migrations().await.expect("建表失败");
        db
    }

    #[tokio::test]
    async fn test_seed_admin_idempotent() {
        let db = test_db().await;
        assert!(db.seed_admin("admin", "管理员", "hash").await.unwrap());
        assert!(!db.seed_admin("admin", "管理员", "hash").await.unwrap());

        let user = db.find_user_by_username("admin").await.unwrap().unwrap();
        assert_eq!(user.display_name, "管理员");
    }

    #[tokio::test]
    async fn test_session_roundtrip() {
        let db = test_db().await;
        db.seed_admin("admin", "管理员", "hash").await.unwrap();
        let user = db.find_user_by_username("admin").await.unwrap().unwrap();

        let token = db.create_session(user.id).await.unwrap();
        let found = db.user_for_session(&token).await.unwrap().unwrap();
        assert_eq!(found.username, "admin");

        db.delete_session(&token).await.unwrap();
        assert!(db.user_for_session(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bookmark_toggle() {
        let db = test_db().await;
        db.seed_admin("admin", "管理员", "hash").await.unwrap();
        let user = db.find_user_by_username("admin").await.unwrap().unwrap();

        assert!(db.toggle_bookmark(user.id, "q1").await.unwrap());
        assert!(db.toggle_bookmark(user.id, "q3").await.unwrap());
        assert_eq!(db.list_bookmarks(user.id).await.unwrap(), vec!["q1", "q3"]);

        assert!(!db.toggle_bookmark(user.id, "q1").await.unwrap());
        assert_eq!(db.list_bookmarks(user.id).await.unwrap(), vec!["q3"]);
    }
}
