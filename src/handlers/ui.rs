use axum::Json;
use axum::response::{Html, IntoResponse};

// landing route - mirrors the JSON greeting at the API root
pub async fn home_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "prompt-gateway is running. POST /api/generate, chat page at /ui"
    }))
}

// minimal chat page talking to /api/generate; styling is not the point
const CHAT_PAGE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>Prompt Gateway</title>
<style>
  body { font-family: sans-serif; max-width: 640px; margin: 2rem auto; }
  #log { border: 1px solid #ccc; padding: 1rem; min-height: 200px; white-space: pre-wrap; }
  .cached { color: #777; font-size: 0.8rem; }
  form { display: flex; gap: 0.5rem; margin-top: 1rem; }
  input { flex: 1; padding: 0.5rem; }
</style>
</head>
<body>
<h2>Prompt Gateway</h2>
<div id="log"></div>
<form id="f">
  <input id="prompt" placeholder="Ask anything..." autocomplete="off">
  <button>Send</button>
</form>
<script>
const log = document.getElementById('log');
document.getElementById('f').addEventListener('submit', async (e) => {
  e.preventDefault();
  const input = document.getElementById('prompt');
  const prompt = input.value.trim();
  if (!prompt) return;
  input.value = '';
  log.textContent += '> ' + prompt + '\n';
  try {
    const res = await fetch('/api/generate', {
      method: 'POST',
      headers: {'Content-Type': 'application/json'},
      body: JSON.stringify({prompt})
    });
    const data = await res.json();
    if (!res.ok) {
      log.textContent += 'error: ' + (data.error || res.status) + '\n\n';
      return;
    }
    log.textContent += data.response + (data.cached ? ' [cached]' : '') + '\n\n';
  } catch (err) {
    log.textContent += 'error: ' + err + '\n\n';
  }
});
</script>
</body>
</html>
"#;

pub async fn ui_handler() -> Html<&'static str> {
    Html(CHAT_PAGE)
}
