use crate::display::DisplaySnapshot;
use crate::entrance::EntrancePlan;
use crate::models::Scope;

pub const PANEL_COUNT: usize = 3;

pub struct PageView {
    pub display: DisplaySnapshot,
    pub frames: Vec<u64>,
    pub frame_ms: u128,
    pub badge_ms: u128,
    pub scope: Scope,
    pub entrance: EntrancePlan,
}

pub fn render_index(view: &PageView) -> String {
    let frames = serde_json::to_string(&view.frames).unwrap_or_else(|_| "[]".to_string());
    let scope = match view.scope {
        Scope::Global => "GLOBAL &middot; shared across all users",
        Scope::Local => "LOCAL &middot; this browser only",
    };
    let badge_class = if view.display.badge_active { "increment active" } else { "increment" };

    let mut html = INDEX_HTML
        .replace("{{COUNTER}}", &view.display.counter)
        .replace("{{VISITS}}", &view.display.visits)
        .replace("{{TIME}}", &view.display.time)
        .replace("{{BADGE_CLASS}}", badge_class)
        .replace("{{FRAME_MS}}", &view.frame_ms.to_string())
        .replace("{{BADGE_MS}}", &view.badge_ms.to_string())
        .replace("{{FRAMES}}", &frames)
        .replace("{{SCOPE}}", scope)
        .replace("{{HEADER_STYLE}}", &view.entrance.header.style());

    for index in 0..PANEL_COUNT {
        let style = view
            .entrance
            .panels
            .get(index)
            .map(|transition| transition.style())
            .unwrap_or_default();
        html = html.replace(&format!("{{{{PANEL_STYLE_{index}}}}}"), &style);
    }
    html
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Space Mission Control</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Orbitron:wght@500;700&family=Space+Grotesk:wght@400;500&display=swap');

    :root {
      --bg: #0a0e27;
      --panel: rgba(16, 24, 58, 0.82);
      --ink: #e6f1ff;
      --muted: #a0b8c5;
      --cyan: #00f0ff;
      --green: #00ff88;
      --violet: #9d4edd;
      --shadow: 0 24px 60px rgba(0, 240, 255, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, #1b2250, transparent 60%),
        linear-gradient(160deg, var(--bg), #050716 70%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(880px, 100%);
      display: grid;
      gap: 24px;
    }

    .header,
    .panel {
      opacity: 0;
      transform: translateY(var(--enter-offset, 0));
      animation: enter var(--enter-duration, 600ms) ease var(--enter-delay, 0ms) forwards;
    }

    @keyframes enter {
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    .header h1 {
      font-family: "Orbitron", "Georgia", sans-serif;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
      letter-spacing: 0.08em;
      margin: 0;
      color: var(--cyan);
    }

    .header p {
      margin: 6px 0 0;
      color: var(--muted);
    }

    .panel {
      background: var(--panel);
      border: 1px solid rgba(0, 240, 255, 0.18);
      border-radius: 22px;
      box-shadow: var(--shadow);
      padding: 28px;
    }

    .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.16em;
      color: var(--muted);
    }

    .counter-wrap {
      position: relative;
      display: flex;
      align-items: baseline;
      gap: 16px;
    }

    #counter {
      font-family: "Orbitron", sans-serif;
      font-size: clamp(3rem, 10vw, 5.5rem);
      font-weight: 700;
      color: var(--ink);
      text-shadow: 0 0 24px rgba(0, 240, 255, 0.45);
    }

    .increment {
      font-family: "Orbitron", sans-serif;
      font-size: 1.4rem;
      color: var(--green);
      opacity: 0;
      transform: translateY(0);
    }

    .increment.active {
      animation: bump 1s ease forwards;
    }

    @keyframes bump {
      0% { opacity: 0; transform: translateY(10px); }
      30% { opacity: 1; }
      100% { opacity: 0; transform: translateY(-24px); }
    }

    .scope {
      margin-top: 8px;
      color: var(--violet);
      font-size: 0.9rem;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat .value {
      font-family: "Orbitron", sans-serif;
      font-size: 1.6rem;
      color: var(--cyan);
    }

    .hint {
      color: var(--muted);
      font-size: 0.85rem;
      line-height: 1.6;
    }

    kbd {
      border: 1px solid rgba(160, 184, 197, 0.4);
      border-radius: 6px;
      padding: 1px 6px;
      font-size: 0.8rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header class="header" style="{{HEADER_STYLE}}">
      <h1>MISSION CONTROL</h1>
      <p>Astronaut briefing log</p>
    </header>

    <section class="panel" style="{{PANEL_STYLE_0}}">
      <span class="label">Astronauts briefed</span>
      <div class="counter-wrap">
        <span id="counter">{{COUNTER}}</span>
        <span id="incrementAnimation" class="{{BADGE_CLASS}}">+1</span>
      </div>
      <div class="scope">{{SCOPE}}</div>
    </section>

    <section class="panel stats" style="{{PANEL_STYLE_1}}">
      <div class="stat">
        <span class="label">Visits</span>
        <span class="value" id="statVisits">{{VISITS}}</span>
      </div>
      <div class="stat">
        <span class="label">Mission time</span>
        <span class="value" id="statTime">{{TIME}}</span>
      </div>
    </section>

    <section class="panel hint" style="{{PANEL_STYLE_2}}">
      <kbd>Ctrl</kbd>+<kbd>Shift</kbd>+<kbd>R</kbd> reset counter &middot;
      <kbd>Ctrl</kbd>+<kbd>Shift</kbd>+<kbd>I</kbd> system information
    </section>
  </main>

  <script>
    const frames = {{FRAMES}};
    const frameMs = {{FRAME_MS}};
    const badgeMs = {{BADGE_MS}};
    const counterEl = document.getElementById('counter');
    const badgeEl = document.getElementById('incrementAnimation');
    const visitsEl = document.getElementById('statVisits');
    const timeEl = document.getElementById('statTime');

    const playFrames = () => {
      if (frames.length === 0) {
        return;
      }
      const last = frames.length - 1;
      const start = performance.now();
      const step = (now) => {
        const index = Math.min(Math.floor((now - start) / frameMs), last);
        counterEl.textContent = frames[Math.max(index, 0)];
        if (index < last) {
          requestAnimationFrame(step);
        }
      };
      requestAnimationFrame(step);
    };

    const restartBadge = () => {
      badgeEl.classList.remove('active');
      void badgeEl.offsetWidth;
      badgeEl.classList.add('active');
      setTimeout(() => badgeEl.classList.remove('active'), badgeMs);
    };

    const refreshDisplay = async () => {
      const res = await fetch('/api/display');
      if (!res.ok) {
        return;
      }
      const display = await res.json();
      timeEl.textContent = display.time;
    };

    const fetchStatus = async () => {
      const res = await fetch('/api/count');
      return res.json();
    };

    const getVisitorCount = async () => {
      const body = await fetchStatus();
      console.log(`Current visitor count: ${body.count}`);
      console.log(body.scope === 'global'
        ? 'This is a GLOBAL count shared across all users'
        : 'This is a LOCAL count (this origin only)');
      return body.count;
    };

    const getCurrentCount = async () => {
      const res = await fetch('/api/remote');
      const body = await res.json();
      console.log(`Current global visitor count: ${body.count}`);
      return body.count;
    };

    const resetVisitorCount = async () => {
      const status = await fetchStatus();
      const confirmed = !status.service_available && confirm('Reset local visitor count to 0?');
      const res = await fetch('/api/reset', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ confirmed })
      });
      if (res.status === 409) {
        alert(await res.text());
        return;
      }
      const body = await res.json();
      if (body.reset) {
        counterEl.textContent = body.count;
        visitsEl.textContent = body.count;
      }
    };

    const showInfo = async () => {
      const res = await fetch('/api/info');
      const info = await res.json();
      console.log('==============================================');
      console.log('MISSION CONTROL - System Information');
      console.log('==============================================');
      console.log(`Total Astronauts Briefed: ${info.total_visitors}`);
      console.log(`Storage Key: ${info.storage_key}`);
      console.log(`Mission Time: ${info.mission_time}`);
      console.log(`Counter Scope: ${info.scope}`);
      console.log('Available Commands:');
      info.commands.forEach((command) => console.log(`  - ${command}`));
      console.log('==============================================');
    };

    window.getVisitorCount = getVisitorCount;
    window.getCurrentCount = getCurrentCount;
    window.resetVisitorCount = resetVisitorCount;

    document.addEventListener('keydown', (event) => {
      if (event.ctrlKey && event.shiftKey && event.key === 'R') {
        event.preventDefault();
        resetVisitorCount().catch((err) => console.error(err));
      }
      if (event.ctrlKey && event.shiftKey && event.key === 'I') {
        event.preventDefault();
        showInfo().catch((err) => console.error(err));
      }
    });

    playFrames();
    restartBadge();
    setInterval(() => refreshDisplay().catch(() => {}), 1000);
  </script>
</body>
</html>
"#;
