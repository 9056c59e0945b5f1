use crate::history::NO_TOPICS;
use crate::models::{FormFields, History, HistoryItem};

pub struct IndexPage<'a> {
    pub today: String,
    /// Key of a history entry loaded into the form, if any.
    pub selected: Option<&'a str>,
    pub form: &'a FormFields,
    pub history: &'a History,
}

pub fn render_index(page: &IndexPage<'_>) -> String {
    let loaded = match page.selected {
        Some(key) => format!(
            r#"<p class="hint">Showing saved entry for {}. <a href="/">Back to today</a></p>"#,
            escape(key)
        ),
        None => String::new(),
    };

    INDEX_HTML
        .replace("{{DATE}}", &escape(&page.today))
        .replace("{{LOADED}}", &loaded)
        .replace("{{CHECK_IN}}", &escape(&page.form.check_in))
        .replace("{{CHECK_OUT}}", &escape(&page.form.check_out))
        .replace("{{SAVED_TOPICS}}", &escape(&page.form.saved_topics))
        .replace("{{TOPICS_INPUT}}", &escape(&page.form.topics_input))
        .replace("{{HISTORY}}", &render_history(page.history))
}

fn render_history(history: &History) -> String {
    match history {
        History::Empty { message } => {
            format!(r#"<p class="muted-small">{}</p>"#, escape(message))
        }
        History::Items { items } => items.iter().map(render_card).collect(),
    }
}

fn render_card(item: &HistoryItem) -> String {
    let preview = match &item.preview {
        Some(text) => escape(text),
        None => format!(r#"<span class="muted-small">{NO_TOPICS}</span>"#),
    };
    let key = escape(&item.key);

    format!(
        r#"
      <div class="card">
        <div class="card-header">
          <div>
            <div class="card-title">{date}</div>
            <div class="card-sub">{check_in} · {check_out}</div>
          </div>
          <div class="card-side">
            <span class="badge {class}">{label}</span>
            <a class="btn btn-ghost" href="/?key={key}" data-key="{key}">Load</a>
          </div>
        </div>
        <div>{preview}</div>
      </div>"#,
        date = escape(&item.display_date),
        check_in = escape(&item.check_in),
        check_out = escape(&item.check_out),
        class = item.status.css_class(),
        label = item.status.label(),
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>DayLog</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --ok: #2d7a4b;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    button, .btn {
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      text-decoration: none;
      display: inline-flex;
      justify-content: center;
    }

    .btn-in { background: var(--accent); color: white; }
    .btn-out { background: var(--accent-2); color: white; }
    .btn-ghost { background: transparent; color: var(--accent-2); border: 1px solid rgba(47, 72, 88, 0.25); padding: 6px 14px; }

    textarea {
      width: 100%;
      min-height: 96px;
      border-radius: 14px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      padding: 12px;
      font: inherit;
    }

    .card {
      background: white;
      border-radius: 18px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 10px;
    }

    .card-header { display: flex; justify-content: space-between; gap: 12px; }
    .card-title { font-weight: 600; }
    .card-sub, .muted-small, .hint { color: #6f6a65; font-size: 0.9rem; }
    .card-side { display: flex; flex-direction: column; align-items: flex-end; gap: 8px; }

    .badge { border-radius: 999px; padding: 4px 10px; font-size: 0.8rem; color: white; }
    .badge--checkin { background: #8b857d; }
    .badge--active { background: var(--accent); }
    .badge--checkout { background: var(--ok); }

    #history { display: grid; gap: 12px; }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>DayLog</h1>
      <p class="hint">Today is <span id="currentDate">{{DATE}}</span></p>
      {{LOADED}}
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Checked in</span>
        <span id="checkInTime" class="value">{{CHECK_IN}}</span>
        <form method="post" action="/check-in"><button class="btn-in" id="checkInBtn" type="submit">Check in</button></form>
      </div>
      <div class="stat">
        <span class="label">Checked out</span>
        <span id="checkOutTime" class="value">{{CHECK_OUT}}</span>
        <form method="post" action="/check-out"><button class="btn-out" id="checkOutBtn" type="submit">Check out</button></form>
      </div>
    </section>

    <section class="stat">
      <span class="label">Topics covered</span>
      <form method="post" action="/topics">
        <textarea id="topicsInput" name="topics">{{TOPICS_INPUT}}</textarea>
        <button class="btn-ghost" id="saveTopicsBtn" type="submit">Save topics</button>
      </form>
      <div id="savedTopics">{{SAVED_TOPICS}}</div>
    </section>

    <section>
      <h2>History</h2>
      <div id="history">{{HISTORY}}</div>
    </section>
  </main>
</body>
</html>
"#;
