//! The single page served at `/`.
//!
//! Capture happens in the browser; the page posts the frame to `/capture`
//! and renders the returned report and the `/history` panel.

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>FeelTune AI</title>
<style>
@keyframes gradientBG {
    0% { background-color: #1a2a6c; }
    25% { background-color: #b21f1f; }
    50% { background-color: #fdbb2d; }
    75% { background-color: #00c6ff; }
    100% { background-color: #1a2a6c; }
}
body {
    animation: gradientBG 30s ease infinite;
    color: #eaeaea;
    font-family: 'Arial', sans-serif;
    max-width: 1080px;
    margin: 0 auto;
    padding: 24px;
}
h1, h2, h3 { color: #ffffff; }
button {
    background-color: rgba(255,255,255,0.2);
    color: #ffffff;
    font-weight: bold;
    border: none;
    border-radius: 10px;
    height: 3em;
    padding: 0 1.5em;
    cursor: pointer;
}
.columns { display: flex; gap: 24px; flex-wrap: wrap; }
.main { flex: 2; min-width: 320px; }
.side { flex: 1; min-width: 240px; }
video, img.snapshot { width: 100%; border-radius: 10px; }
.notice { padding: 10px; border-radius: 8px; margin: 10px 0; background: rgba(0,0,0,0.35); }
.notice.error { background: rgba(178,31,31,0.6); }
.mood-text {
    font-size: 1.4em;
    font-weight: bold;
    padding: 10px;
    border-radius: 10px;
    margin-bottom: 15px;
    text-align: center;
}
.mood-happy { background: linear-gradient(90deg,#fddb92,#d1fdff); color: #1a2a6c; }
.mood-sad { background: linear-gradient(90deg,#667db6,#0082c8); color: #f5f5f5; }
.mood-angry { background: linear-gradient(90deg,#ff416c,#ff4b2b); color: #fff; }
.mood-surprise { background: linear-gradient(90deg,#f9ff00,#ff4b1f); color: #1a1a2e; }
.mood-fear { background: linear-gradient(90deg,#0f0c29,#302b63,#24243e); color: #fff; }
.mood-disgust { background: linear-gradient(90deg,#11998e,#38ef7d); color: #1a1a2e; }
.mood-unknown { background: rgba(0,0,0,0.35); color: #fff; }
table { width: 100%; border-collapse: collapse; font-size: 0.9em; }
th, td { text-align: left; padding: 4px 6px; border-bottom: 1px solid rgba(255,255,255,0.2); }
.bar-row { display: flex; align-items: center; gap: 6px; margin: 4px 0; }
.bar-label { width: 70px; }
.bar { height: 16px; background: #00c6ff; border-radius: 4px; }
footer { text-align: center; margin-top: 32px; border-top: 1px solid rgba(255,255,255,0.3); padding-top: 12px; }
</style>
</head>
<body>
<h1>🎧 FeelTune AI — Mood-Based Music Player</h1>
<p>Capture your face and FeelTune AI will instantly play mood-matching music! 🎶</p>
<div class="columns">
  <div class="main">
    <video id="camera" autoplay playsinline></video>
    <canvas id="frame" hidden></canvas>
    <p><button id="shoot">📷 Take a photo</button></p>
    <img id="snapshot" class="snapshot" alt="Captured Image" hidden>
    <div id="result"></div>
  </div>
  <div class="side">
    <h3>📈 Mood History</h3>
    <div id="history"></div>
  </div>
</div>
<footer>DEVELOPED BY AETHERION TEAM</footer>
<script>
const camera = document.getElementById('camera');
const frame = document.getElementById('frame');
const snapshot = document.getElementById('snapshot');
const result = document.getElementById('result');
const history = document.getElementById('history');

function escapeHtml(value) {
  return String(value).replace(/[&<>"']/g, c => ({'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;',"'":'&#39;'}[c]));
}

function notice(text, kind) {
  return `<div class="notice ${kind || ''}">${escapeHtml(text)}</div>`;
}

function renderReport(report) {
  let html = '';
  if (report.detector_error) html += notice(report.detector_error, 'error');
  const outcome = report.outcome;
  if (outcome.status !== 'detected') {
    html += notice(report.notice);
    result.innerHTML = html;
    return;
  }
  html += notice(outcome.headline);
  html += `<div class="mood-text ${escapeHtml(outcome.style_class)}">${escapeHtml(outcome.message)}</div>`;
  html += '<table><tr><th>Emotion</th><th>Confidence</th></tr>';
  for (const row of outcome.breakdown) {
    html += `<tr><td>${escapeHtml(row.emotion)}</td><td>${row.score.toFixed(2)}</td></tr>`;
  }
  html += '</table>';
  const playback = outcome.playback;
  if (playback && playback.kind === 'embedded') {
    html += `<iframe width="100%" height="315" src="${escapeHtml(playback.embed_url)}"
      title="YouTube video player" frameborder="0"
      allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
      allowfullscreen></iframe>`;
  } else if (playback && playback.kind === 'link') {
    html += `<p><a href="${escapeHtml(playback.url)}" target="_blank">Open Playlist</a></p>`;
  }
  if (report.history_error) html += notice(report.history_error, 'error');
  result.innerHTML = html;
}

async function refreshHistory() {
  const response = await fetch('/history');
  const panel = await response.json();
  if (panel.unavailable) {
    history.innerHTML = notice('Mood history is unavailable: ' + panel.unavailable, 'error');
    return;
  }
  if (panel.total === 0) {
    history.innerHTML = notice('Mood history will appear here after detecting your first emotion.');
    return;
  }
  let html = '<table><tr><th>Time</th><th>Emotion</th><th>Score</th></tr>';
  for (const entry of panel.recent) {
    html += `<tr><td>${escapeHtml(entry.timestamp)}</td><td>${escapeHtml(entry.emotion)}</td><td>${entry.score.toFixed(2)}</td></tr>`;
  }
  html += '</table><p><strong>Counts by emotion:</strong></p>';
  const max = Math.max(...panel.counts.map(c => c.count));
  for (const c of panel.counts) {
    const width = Math.round(100 * c.count / max);
    html += `<div class="bar-row"><span class="bar-label">${escapeHtml(c.emotion)}</span><div class="bar" style="width:${width}%"></div><span>${c.count}</span></div>`;
  }
  history.innerHTML = html;
}

async function capture() {
  frame.width = camera.videoWidth;
  frame.height = camera.videoHeight;
  frame.getContext('2d').drawImage(camera, 0, 0);
  const blob = await new Promise(resolve => frame.toBlob(resolve, 'image/jpeg', 0.92));
  snapshot.src = URL.createObjectURL(blob);
  snapshot.hidden = false;
  result.innerHTML = notice('Detecting emotion...');
  const response = await fetch('/capture', {
    method: 'POST',
    headers: { 'Content-Type': 'image/jpeg' },
    body: blob,
  });
  const body = await response.json();
  if (!response.ok) {
    result.innerHTML = notice(body.error || response.statusText, 'error');
    return;
  }
  renderReport(body);
  await refreshHistory();
}

document.getElementById('shoot').addEventListener('click', () => {
  capture().catch(err => { result.innerHTML = notice(String(err), 'error'); });
});

navigator.mediaDevices.getUserMedia({ video: true })
  .then(stream => { camera.srcObject = stream; })
  .catch(err => { result.innerHTML = notice('Camera unavailable: ' + err, 'error'); });

refreshHistory().catch(() => {});
</script>
</body>
</html>
"##;
