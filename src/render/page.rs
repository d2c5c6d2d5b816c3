//! 整页渲染
//!
//! 把题目片段装进自包含的页面外壳：内嵌样式、导航面板和页面脚本。
//! 两种外壳对应两个入口：
//! - 转换页：三个题型分区 + localStorage 收藏 + 纯前端判分；
//! - 在线页：全局编号的平铺列表 + 收藏 / 判分走服务端接口。
//!
//! 页面脚本里的判分逻辑必须与 [`crate::grading::grade`] 保持一致。

use crate::models::ParsedQuestion;
use crate::parser::QuestionBuckets;
use crate::render::question::render_question;

/// 页面外壳，占位符替换后输出
const PAGE_SHELL: &str = r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no">
  <title>{{TITLE}}</title>
  <style>
{{STYLE}}
  </style>
</head>
<body>
  <button class="mobile-menu-btn" onclick="toggleMobileMenu()">☰</button>

  <div class="nav-panel" id="navPanel">
    <div class="nav-buttons">
      <button onclick="scrollToTop()">顶部</button>
      <button onclick="scrollToBottom()">底部</button>
      <button class="toggle-answers-btn" id="toggleAnswersBtn" onclick="toggleAllAnswers()">显示所有答案</button>
      <button class="clear-bookmarks-btn" onclick="clearAllBookmarks()">清除所有标记</button>
    </div>

{{SECTION_NAV}}

    <h3>题目导航</h3>
    <div>
      <input type="text" id="searchInput" placeholder="搜索题目..." oninput="searchQuestions()">
    </div>
    <h3>标记题目</h3>
    <div class="bookmark-list" id="bookmarkList">
      <div style="color:#999; text-align:center;">暂无标记题目</div>
    </div>
  </div>

{{USER_BAR}}
  <h1>{{TITLE}}</h1>
  <div class="info-bar">{{INFO}}</div>

{{BODY}}

  <script>
{{SCRIPT}}
  </script>
</body>
</html>
"#;

const PAGE_STYLE: &str = r#"    body {
      font-family: "Microsoft YaHei", sans-serif;
      line-height: 1.6;
      max-width: 800px;
      margin: 0 auto;
      padding: 20px;
      background-color: #f5f5f5;
      padding-right: 280px;
    }
    .question-block {
      background-color: white;
      border-radius: 8px;
      padding: 15px;
      margin-bottom: 20px;
      box-shadow: 0 2px 5px rgba(0,0,0,0.1);
      position: relative;
    }
    .question-header {
      margin-bottom: 10px;
      font-weight: bold;
      padding-left: 30px;
    }
    .question-type {
      font-size: 0.8em;
      color: #1e88e5;
      border: 1px solid #1e88e5;
      border-radius: 3px;
      padding: 0 4px;
      margin-right: 6px;
    }
    .question-marker {
      position: absolute;
      left: 10px;
      top: 10px;
      cursor: pointer;
      font-size: 1.2em;
      user-select: none;
    }
    .question-marker.marked {
      color: gold;
      text-shadow: 0 0 2px black;
    }
    .options { margin-left: 20px; }
    .option {
      margin-bottom: 5px;
      padding: 5px;
      border-radius: 4px;
      cursor: pointer;
      transition: all 0.2s;
    }
    .option:hover { background-color: #f0f0f0; }
    .option.selected { background-color: #e0e0e0 !important; }
    .option.correct {
      background-color: #e8f5e9 !important;
      color: #2e7d32;
      font-weight: bold;
    }
    .option.wrong {
      background-color: #ffebee !important;
      color: #c62828;
      text-decoration: line-through;
    }
    .correct-answer {
      margin-top: 10px;
      padding-top: 10px;
      border-top: 1px dashed #ccc;
      font-style: italic;
      color: #2c3e50;
      display: none;
    }
    .answer-feedback {
      margin-top: 10px;
      font-weight: bold;
      display: none;
    }
    .question-footer {
      display: flex;
      justify-content: space-between;
      margin-top: 10px;
    }
    .check-btn {
      padding: 5px 10px;
      background-color: #1e88e5;
      color: white;
      border: none;
      border-radius: 3px;
      cursor: pointer;
    }
    .check-btn:hover { background-color: #1565c0; }
    .reset-btn {
      padding: 5px 10px;
      background-color: #757575;
      color: white;
      border: none;
      border-radius: 3px;
      cursor: pointer;
    }
    .reset-btn:hover { background-color: #616161; }
    h1 { text-align: center; color: #2c3e50; }
    h2 {
      color: #1e88e5;
      margin-top: 30px;
      border-bottom: 1px solid #eee;
      padding-bottom: 5px;
      scroll-margin-top: 20px;
    }
    .info-bar {
      text-align: center;
      margin-bottom: 20px;
      font-size: 0.9em;
      color: #7f8c8d;
    }
    .user-bar {
      text-align: right;
      font-size: 0.9em;
      color: #7f8c8d;
      margin-bottom: 10px;
    }
    .user-bar a { color: #1e88e5; }
    .nav-panel {
      position: fixed;
      top: 20px;
      right: 20px;
      background: white;
      padding: 10px;
      border-radius: 5px;
      box-shadow: 0 2px 5px rgba(0,0,0,0.1);
      max-height: 80vh;
      overflow-y: auto;
      width: 250px;
      z-index: 1000;
    }
    .nav-buttons {
      display: flex;
      justify-content: center;
      gap: 10px;
      margin-bottom: 15px;
      flex-wrap: wrap;
    }
    .bookmark-list {
      max-height: 300px;
      overflow-y: auto;
      margin-top: 10px;
    }
    .bookmark-item {
      padding: 5px;
      cursor: pointer;
      border-bottom: 1px solid #eee;
      display: flex;
      justify-content: space-between;
    }
    .bookmark-item:hover { background-color: #f0f0f0; }
    button {
      padding: 5px 10px;
      background-color: #1e88e5;
      color: white;
      border: none;
      border-radius: 3px;
      cursor: pointer;
    }
    button:hover { background-color: #1565c0; }
    #searchInput {
      width: 100%;
      padding: 5px;
      margin-bottom: 10px;
      box-sizing: border-box;
    }
    .section-nav { margin-bottom: 15px; }
    .section-nav h3 { margin-bottom: 5px; color: #1e88e5; }
    .section-nav-list {
      list-style: none;
      padding-left: 10px;
    }
    .section-nav-list li {
      margin-bottom: 5px;
      cursor: pointer;
      color: #1e88e5;
    }
    .section-nav-list li:hover { text-decoration: underline; }
    .toggle-answers-btn { background-color: #43a047; }
    .toggle-answers-btn:hover { background-color: #2e7d32; }
    .clear-bookmarks-btn { background-color: #e53935; }
    .clear-bookmarks-btn:hover { background-color: #c62828; }
    .correct-highlight {
      background-color: #ffebee !important;
      color: #c62828 !important;
      font-weight: bold !important;
      border-left: 3px solid #c62828;
      padding-left: 8px;
    }
    .question-block.highlight {
      animation: highlight-fade 2s ease-out;
      box-shadow: 0 0 0 2px #1e88e5;
    }
    @keyframes highlight-fade {
      0% {
        box-shadow: 0 0 0 6px rgba(30, 136, 229, 0.5);
        transform: scale(1.02);
      }
      100% {
        box-shadow: 0 0 0 2px rgba(30, 136, 229, 0);
        transform: scale(1);
      }
    }
    .mobile-menu-btn {
      display: none;
      position: fixed;
      top: 10px;
      right: 10px;
      background: #1e88e5;
      color: white;
      border: none;
      border-radius: 50%;
      width: 40px;
      height: 40px;
      font-size: 20px;
      z-index: 1001;
    }
    @media (max-width: 768px) {
      body { padding-right: 20px; }
      .mobile-menu-btn { display: block; }
      .nav-panel {
        display: none;
        position: fixed;
        top: 60px;
        right: 10px;
        width: calc(100% - 20px);
        max-height: calc(100vh - 80px);
      }
      .nav-panel.show { display: block; }
    }"#;

/// 两种页面共用的交互脚本（选项点击、重置、导航、搜索）
const COMMON_SCRIPT: &str = r#"    const userSelections = {};

    function selectOption(option) {
      const block = option.closest('.question-block');
      const questionId = block.id;
      const optionLetter = option.dataset.letter;
      if (!(questionId in userSelections)) userSelections[questionId] = [];

      // 单选题和判断题先清空已有选择
      if (block.classList.contains('single-choice') || block.classList.contains('judge-question')) {
        block.querySelectorAll('.option').forEach(opt => opt.classList.remove('selected'));
        userSelections[questionId] = [];
      }

      if (option.classList.contains('selected')) {
        option.classList.remove('selected');
        const index = userSelections[questionId].indexOf(optionLetter);
        if (index !== -1) userSelections[questionId].splice(index, 1);
      } else {
        option.classList.add('selected');
        userSelections[questionId].push(optionLetter);
      }
    }

    function resetQuestion(questionId) {
      const block = document.getElementById(questionId);
      block.querySelectorAll('.option').forEach(opt => {
        opt.classList.remove('selected', 'correct', 'wrong', 'correct-highlight');
      });
      userSelections[questionId] = [];
      const feedback = block.querySelector('.answer-feedback');
      if (feedback) feedback.style.display = 'none';
      const correctAnswerDiv = block.querySelector('.correct-answer');
      if (correctAnswerDiv) correctAnswerDiv.style.display = 'none';
    }

    function showFeedback(block, isCorrect) {
      const feedback = block.querySelector('.answer-feedback');
      if (isCorrect) {
        feedback.textContent = '✓ 回答正确';
        feedback.style.color = 'green';
      } else {
        feedback.textContent = '✗ 回答错误';
        feedback.style.color = 'red';
      }
      feedback.style.display = 'block';
      const correctAnswerDiv = block.querySelector('.correct-answer');
      if (correctAnswerDiv) correctAnswerDiv.style.display = 'block';
    }

    function markOptions(block, correctLetters, userAnswer) {
      block.querySelectorAll('.option').forEach(option => {
        option.classList.remove('selected', 'correct', 'wrong');
        if (correctLetters.includes(option.dataset.letter)) {
          option.classList.add('correct');
        } else if (userAnswer.includes(option.dataset.letter)) {
          option.classList.add('wrong');
        }
      });
    }

    function scrollToSection(sectionId) {
      const element = document.getElementById(sectionId);
      if (element) element.scrollIntoView({ behavior: 'smooth', block: 'start' });
    }

    function scrollToQuestion(id) {
      const element = document.getElementById(id);
      if (element) {
        document.querySelectorAll('.question-block.highlight').forEach(el => {
          el.classList.remove('highlight');
        });
        element.classList.add('highlight');
        setTimeout(() => element.classList.remove('highlight'), 2000);
        element.scrollIntoView({ behavior: 'smooth', block: 'center' });
      }
    }

    function updateBookmarkList() {
      const list = document.getElementById('bookmarkList');
      list.innerHTML = '';
      let hasBookmarks = false;

      Object.keys(bookmarks).forEach(id => {
        if (bookmarks[id]) {
          hasBookmarks = true;
          const question = document.getElementById(id);
          if (question) {
            const title = question.querySelector('.question-desc').textContent.trim();
            const item = document.createElement('div');
            item.className = 'bookmark-item';
            const label = title.substring(0, 30) + (title.length > 30 ? '...' : '');
            item.innerHTML = label + ' <button onclick="scrollToQuestion(\'' + id + '\')">跳转</button>';
            list.appendChild(item);
          }
        }
      });

      if (!hasBookmarks) {
        list.innerHTML = '<div style="color:#999; text-align:center;">暂无标记题目</div>';
      }
    }

    function searchQuestions() {
      const searchTerm = document.getElementById('searchInput').value.toLowerCase();
      document.querySelectorAll('.question-block').forEach(block => {
        const text = block.textContent.toLowerCase();
        block.style.display = (searchTerm === '' || text.includes(searchTerm)) ? 'block' : 'none';
      });
    }

    function scrollToTop() {
      window.scrollTo({ top: 0, behavior: 'smooth' });
    }

    function scrollToBottom() {
      window.scrollTo({ top: document.body.scrollHeight, behavior: 'smooth' });
    }

    function toggleMobileMenu() {
      document.getElementById('navPanel').classList.toggle('show');
    }

    let answersVisible = false;
    function toggleAllAnswers() {
      const btn = document.getElementById('toggleAnswersBtn');
      answersVisible = !answersVisible;
      document.querySelectorAll('.question-block').forEach(block => {
        const correctAnswerDiv = block.querySelector('.correct-answer');
        if (correctAnswerDiv) correctAnswerDiv.style.display = answersVisible ? 'block' : 'none';
        block.querySelectorAll('.option').forEach(option => {
          if (option.dataset.correct === 'true') {
            option.classList.toggle('correct-highlight', answersVisible);
          }
        });
      });
      btn.textContent = answersVisible ? '隐藏所有答案' : '显示所有答案';
    }"#;

/// 转换页脚本：收藏存 localStorage，判分在前端完成。
/// 判分规则与服务端 grade 函数一一对应：多选题集合相等，
/// 单选 / 判断恰好一个且等于第一个正确字母，正确集合为空恒判错。
const CONVERTER_SCRIPT: &str = r#"    let bookmarks = loadBookmarks() || {};
    const correctAnswers = {};

    function loadBookmarks() {
      const saved = localStorage.getItem('questionBookmarks');
      return saved ? JSON.parse(saved) : null;
    }

    function saveBookmarks() {
      localStorage.setItem('questionBookmarks', JSON.stringify(bookmarks));
    }

    document.addEventListener('DOMContentLoaded', function() {
      Object.keys(bookmarks).forEach(id => {
        if (bookmarks[id]) {
          const marker = document.querySelector('#' + id + ' .question-marker');
          if (marker) marker.classList.add('marked');
        }
      });
      updateBookmarkList();

      document.querySelectorAll('.question-block').forEach(block => {
        const correctOptions = [];
        block.querySelectorAll('.option').forEach(option => {
          if (option.dataset.correct === 'true') correctOptions.push(option.dataset.letter);
        });
        correctAnswers[block.id] = correctOptions;
        userSelections[block.id] = [];
      });
    });

    function checkAnswer(questionId) {
      const block = document.getElementById(questionId);
      const userAnswer = [...(userSelections[questionId] || [])];
      const correctAnswer = [...(correctAnswers[questionId] || [])];

      markOptions(block, correctAnswer, userAnswer);

      let isCorrect = false;
      if (correctAnswer.length > 0) {
        if (block.classList.contains('multi-choice')) {
          isCorrect = userAnswer.length === correctAnswer.length &&
                      userAnswer.every(l => correctAnswer.includes(l)) &&
                      correctAnswer.every(l => userAnswer.includes(l));
        } else {
          isCorrect = userAnswer.length === 1 && userAnswer[0] === correctAnswer[0];
        }
      }

      userSelections[questionId] = [];
      showFeedback(block, isCorrect);
    }

    function toggleBookmark(id) {
      bookmarks[id] = !bookmarks[id];
      const marker = document.querySelector('#' + id + ' .question-marker');
      if (marker) marker.classList.toggle('marked', bookmarks[id]);
      updateBookmarkList();
      saveBookmarks();
    }

    function clearAllBookmarks() {
      if (confirm('确定要清除所有标记题目吗？')) {
        Object.keys(bookmarks).forEach(id => {
          bookmarks[id] = false;
          const marker = document.querySelector('#' + id + ' .question-marker');
          if (marker) marker.classList.remove('marked');
        });
        updateBookmarkList();
        saveBookmarks();
      }
    }"#;

/// 在线页脚本：收藏与判分走服务端接口，判分以接口返回为准
const APP_SCRIPT: &str = r#"    let bookmarks = {};

    document.addEventListener('DOMContentLoaded', function() {
      document.querySelectorAll('.question-block').forEach(block => {
        userSelections[block.id] = [];
      });
      fetch('/api/bookmarks')
        .then(resp => resp.json())
        .then(data => {
          (data.bookmarks || []).forEach(id => {
            bookmarks[id] = true;
            const marker = document.querySelector('#' + id + ' .question-marker');
            if (marker) marker.classList.add('marked');
          });
          updateBookmarkList();
        });
    });

    function checkAnswer(questionId) {
      const block = document.getElementById(questionId);
      const userAnswer = [...(userSelections[questionId] || [])];

      fetch('/api/check_answer', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ question_id: questionId, user_answer: userAnswer })
      })
        .then(resp => resp.json())
        .then(data => {
          markOptions(block, data.correct_answers || [], userAnswer);
          userSelections[questionId] = [];
          showFeedback(block, data.is_correct === true);
        });
    }

    function toggleBookmark(id) {
      fetch('/api/bookmark', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ question_id: id })
      })
        .then(resp => resp.json())
        .then(data => {
          bookmarks[id] = data.status === 'added';
          const marker = document.querySelector('#' + id + ' .question-marker');
          if (marker) marker.classList.toggle('marked', bookmarks[id]);
          updateBookmarkList();
        });
    }

    function clearAllBookmarks() {
      if (!confirm('确定要清除所有标记题目吗？')) return;
      const marked = Object.keys(bookmarks).filter(id => bookmarks[id]);
      Promise.all(marked.map(id =>
        fetch('/api/bookmark', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ question_id: id })
        })
      )).then(() => {
        marked.forEach(id => {
          bookmarks[id] = false;
          const marker = document.querySelector('#' + id + ' .question-marker');
          if (marker) marker.classList.remove('marked');
        });
        updateBookmarkList();
      });
    }"#;

/// 渲染批量转换页（按题型分区，编号在各分区内独立）
///
/// 三个分区由各自的 h2 标题隔开，跨分区重复的锚点
/// 依靠分区隔离而不是字符串唯一性来避免歧义。
pub fn render_page(buckets: &QuestionBuckets, title: &str) -> String {
    let section_nav = format!(
        r#"    <div class="section-nav">
      <h3>题目分类</h3>
      <ul class="section-nav-list">
        <li onclick="scrollToSection('single-choice-section')">一、单选题 ({})</li>
        <li onclick="scrollToSection('multi-choice-section')">二、多选题 ({})</li>
        <li onclick="scrollToSection('judge-section')">三、判断题 ({})</li>
      </ul>
    </div>"#,
        buckets.single.len(),
        buckets.multi.len(),
        buckets.judge.len()
    );

    let mut body = String::new();
    body.push_str("  <h2 id=\"single-choice-section\">一、单选题</h2>\n");
    body.push_str(&render_fragments(&buckets.single));
    body.push_str("  <h2 id=\"multi-choice-section\">二、多选题</h2>\n");
    body.push_str(&render_fragments(&buckets.multi));
    body.push_str("  <h2 id=\"judge-section\">三、判断题</h2>\n");
    body.push_str(&render_fragments(&buckets.judge));

    let info = format!(
        "共 {} 道题目 | 生成时间: {}",
        buckets.total(),
        chrono::Local::now().format("%Y.%m")
    );

    let script = format!("{COMMON_SCRIPT}\n\n{CONVERTER_SCRIPT}");
    fill_shell(title, &section_nav, "", &info, &body, &script)
}

/// 渲染在线学习页（全局编号的平铺列表）
pub fn render_app_page(questions: &[ParsedQuestion], title: &str, display_name: &str) -> String {
    use crate::models::QuestionType;

    let count_of = |t: QuestionType| questions.iter().filter(|q| q.q_type == t).count();
    let section_nav = format!(
        r#"    <div class="section-nav">
      <h3>题目分类</h3>
      <ul class="section-nav-list">
        <li>单选题 ({})</li>
        <li>多选题 ({})</li>
        <li>判断题 ({})</li>
      </ul>
    </div>"#,
        count_of(QuestionType::Single),
        count_of(QuestionType::Multi),
        count_of(QuestionType::Judge)
    );

    let user_bar = format!(
        r#"  <div class="user-bar">当前用户: {} | <a href="/logout">退出登录</a></div>"#,
        html_escape::encode_text(display_name)
    );

    let body = render_fragments(questions);
    let info = format!("共 {} 道题目", questions.len());
    let script = format!("{COMMON_SCRIPT}\n\n{APP_SCRIPT}");
    fill_shell(title, &section_nav, &user_bar, &info, &body, &script)
}

fn render_fragments(questions: &[ParsedQuestion]) -> String {
    let mut out = String::new();
    for question in questions {
        out.push_str(&render_question(question));
        out.push('\n');
    }
    out
}

fn fill_shell(
    title: &str,
    section_nav: &str,
    user_bar: &str,
    info: &str,
    body: &str,
    script: &str,
) -> String {
    PAGE_SHELL
        .replace("{{TITLE}}", &html_escape::encode_text(title))
        .replace("{{STYLE}}", PAGE_STYLE)
        .replace("{{SECTION_NAV}}", section_nav)
        .replace("{{USER_BAR}}", user_bar)
        .replace("{{INFO}}", info)
        .replace("{{BODY}}", body)
        .replace("{{SCRIPT}}", script)
}
