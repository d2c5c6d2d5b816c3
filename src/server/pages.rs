//! 页面路由

use axum::{extract::State, response::Html, Extension};

use crate::render::render_app_page;
use crate::server::auth::CurrentUser;
use crate::server::error::{ApiError, ApiResult};
use crate::server::questions::load_questions;
use crate::server::AppState;

/// GET /（在线学习页）
pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Html<String>> {
    let questions = load_questions(&state.config.questions_file)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Html(render_app_page(
        &questions,
        &state.config.page_title,
        &user.display_name,
    )))
}

/// 登录页
pub fn render_login_page(error: Option<&str>) -> String {
    let error_html = match error {
        Some(message) => format!(
            r#"    <div class="login-error">{}</div>"#,
            html_escape::encode_text(message)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>登录</title>
  <style>
    body {{
      font-family: "Microsoft YaHei", sans-serif;
      background-color: #f5f5f5;
      display: flex;
      justify-content: center;
      align-items: center;
      min-height: 100vh;
      margin: 0;
    }}
    .login-box {{
      background: white;
      border-radius: 8px;
      padding: 30px;
      width: 300px;
      box-shadow: 0 2px 5px rgba(0,0,0,0.1);
    }}
    .login-box h1 {{
      text-align: center;
      color: #2c3e50;
      font-size: 1.3em;
    }}
    .login-box input {{
      width: 100%;
      padding: 8px;
      margin-bottom: 12px;
      box-sizing: border-box;
      border: 1px solid #ccc;
      border-radius: 4px;
    }}
    .login-box button {{
      width: 100%;
      padding: 8px;
      background-color: #1e88e5;
      color: white;
      border: none;
      border-radius: 4px;
      cursor: pointer;
    }}
    .login-box button:hover {{ background-color: #1565c0; }}
    .login-error {{
      color: #c62828;
      text-align: center;
      margin-bottom: 12px;
    }}
  </style>
</head>
<body>
  <div class="login-box">
    <h1>题库练习系统</h1>
{error_html}
    <form method="post" action="/login">
      <input type="text" name="username" placeholder="用户名" required>
      <input type="password" name="password" placeholder="密码" required>
      <button type="submit">登录</button>
    </form>
  </div>
</body>
</html>
"#
    )
}
