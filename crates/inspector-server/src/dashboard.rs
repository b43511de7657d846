//! HTML dashboard served at `/`.
//!
//! The page has three panels: server-side data (edge metadata plus method
//! and protocol), the request headers, and a client fingerprint panel whose
//! cells are filled in by the embedded browser script. Only the first two
//! carry request data, and all of it goes through the escaper.

use inspector_core::{RequestSnapshot, escape, escape_html, render_html};

/// Element ids of the fingerprint cells, with their row labels.
///
/// The browser script looks these up by id, so they must stay stable.
pub const FINGERPRINT_SLOTS: [(&str, &str); 12] = [
    ("fp-screen", "Screen Res"),
    ("fp-depth", "Color Depth"),
    ("fp-tz", "Timezone"),
    ("fp-lang", "Language"),
    ("fp-platform", "Platform"),
    ("fp-cores", "Hardware"),
    ("fp-memory", "Memory"),
    ("fp-touch", "Touch"),
    ("fp-canvas", "Canvas Hash"),
    ("fp-webgl", "WebGL"),
    ("fp-fingerprintjs", "FingerprintJS"),
    ("fp-thumbmarkjs", "ThumbmarkJS"),
];

/// Raw-data containers revealed once a fingerprint library reports.
const RAW_SLOTS: [(&str, &str); 2] = [
    ("fp-raw-fpjs", "Show Raw FingerprintJS Data"),
    ("fp-raw-thumbmark", "Show Raw ThumbmarkJS Data"),
];

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Request Inspector</title>
  <style>
    :root { --bg: #f8fafc; --text: #0f172a; --accent: #f59e0b; --card-bg: #ffffff; --border: #e2e8f0; }
    html.dark { --bg: #0f172a; --text: #e2e8f0; --card-bg: #1e293b; --border: #334155; }
    body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; background: var(--bg); color: var(--text); margin: 0; padding: 40px 20px; line-height: 1.6; }
    .container { max-width: 1200px; margin: 0 auto; }
    .topbar { display: flex; justify-content: space-between; align-items: center; border-bottom: 2px solid var(--accent); margin-bottom: 30px; }
    .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(400px, 1fr)); gap: 25px; }
    .card { background: var(--card-bg); border: 1px solid var(--border); border-radius: 12px; overflow: hidden; }
    .card-header { display: flex; justify-content: space-between; align-items: flex-start; padding: 16px 20px; border-bottom: 1px solid var(--border); }
    .card-header h2 { font-size: 1.1rem; margin: 0; color: var(--accent); }
    .card-header p { font-size: 0.8rem; margin: 0; opacity: 0.7; }
    .hidden { display: none; }
    table { width: 100%; border-collapse: collapse; font-size: 0.9em; }
    th, td { text-align: left; padding: 8px 12px; border-bottom: 1px solid var(--border); word-break: break-all; vertical-align: top; }
    th { opacity: 0.7; font-weight: 600; }
    .header-name { font-family: monospace; color: var(--accent); white-space: nowrap; }
    .depth-limit { font-style: italic; opacity: 0.6; }
    pre { margin: 0; padding: 12px; font-size: 10px; white-space: pre-wrap; }
  </style>
</head>
<body>
  <div class="container">
    <div class="topbar">
      <div>
        <h1>Request Inspector</h1>
        <p>Real-time analysis of your connection and browser environment.</p>
      </div>
      <button id="theme-toggle" type="button" title="Toggle theme">
        <span id="icon-sun" class="hidden">&#9728;</span>
        <span id="icon-moon" class="hidden">&#9790;</span>
        <span id="icon-system" class="hidden">&#9881;</span>
      </button>
    </div>
    <div class="grid">
"#;

const PAGE_TAIL: &str = r#"    </div>
  </div>
  <script>
    (() => {
      const btn = document.getElementById('theme-toggle');
      const icons = {
        light: document.getElementById('icon-sun'),
        dark: document.getElementById('icon-moon'),
        system: document.getElementById('icon-system'),
      };
      function applyTheme() {
        const stored = localStorage.getItem('theme');
        const dark = stored === 'dark' || (!stored && window.matchMedia('(prefers-color-scheme: dark)').matches);
        document.documentElement.classList.toggle('dark', dark);
        Object.values(icons).forEach((el) => el.classList.add('hidden'));
        (stored ? icons[stored] : icons.system).classList.remove('hidden');
      }
      btn.addEventListener('click', () => {
        const stored = localStorage.getItem('theme');
        if (!stored) localStorage.setItem('theme', 'light');
        else if (stored === 'light') localStorage.setItem('theme', 'dark');
        else localStorage.removeItem('theme');
        applyTheme();
      });
      applyTheme();

      document.querySelectorAll('.minimize-btn').forEach((b) => {
        b.addEventListener('click', () => {
          b.closest('.card').querySelector('.widget-content').classList.toggle('hidden');
        });
      });
    })();

    (async () => {
      const set = (id, value) => { document.getElementById(id).textContent = value; };
      const showRaw = (id, data) => {
        set(id, JSON.stringify(data, null, 2));
        document.getElementById(id + '-container').classList.remove('hidden');
      };

      set('fp-screen', window.screen.width + 'x' + window.screen.height);
      set('fp-depth', window.screen.colorDepth + '-bit');
      set('fp-tz', Intl.DateTimeFormat().resolvedOptions().timeZone);
      set('fp-lang', navigator.language);
      set('fp-platform', navigator.platform);
      set('fp-cores', navigator.hardwareConcurrency || 'Unknown');
      set('fp-memory', (navigator.deviceMemory || 'Unknown') + ' GB');
      set('fp-touch', ('ontouchstart' in window || navigator.maxTouchPoints > 0) ? 'Yes' : 'No');

      try {
        const canvas = document.createElement('canvas');
        const ctx = canvas.getContext('2d');
        canvas.width = 200;
        canvas.height = 50;
        ctx.textBaseline = 'alphabetic';
        ctx.font = "14px 'Arial'";
        ctx.fillStyle = '#f60';
        ctx.fillRect(125, 1, 62, 20);
        ctx.fillStyle = '#069';
        ctx.fillText('Hello World', 2, 15);
        ctx.fillStyle = 'rgba(102, 204, 0, 0.7)';
        ctx.fillText('Hello World', 4, 17);
        const dataUrl = canvas.toDataURL();
        let hash = 0;
        for (let i = 0; i < dataUrl.length; i++) {
          hash = ((hash << 5) - hash) + dataUrl.charCodeAt(i);
          hash |= 0;
        }
        set('fp-canvas', hash.toString(16));
      } catch (e) {
        set('fp-canvas', 'Error');
      }

      try {
        const gl = document.createElement('canvas').getContext('webgl');
        if (gl) {
          const info = gl.getExtension('WEBGL_debug_renderer_info');
          set('fp-webgl', gl.getParameter(info.UNMASKED_RENDERER_WEBGL) + ' (' + gl.getParameter(info.UNMASKED_VENDOR_WEBGL) + ')');
        } else {
          set('fp-webgl', 'Not Supported');
        }
      } catch (e) {
        set('fp-webgl', 'Error');
      }

      try {
        const FingerprintJS = await import('https://openfpcdn.io/fingerprintjs/v4');
        const result = await (await FingerprintJS.load()).get();
        set('fp-fingerprintjs', result.visitorId);
        showRaw('fp-raw-fpjs', result);
      } catch (e) {
        set('fp-fingerprintjs', 'Error');
      }

      try {
        await import('https://cdn.jsdelivr.net/npm/@thumbmarkjs/thumbmarkjs/dist/thumbmark.umd.js');
        if (window.ThumbmarkJS) {
          const result = await new window.ThumbmarkJS.Thumbmark().get();
          set('fp-thumbmarkjs', result.thumbmark || result);
          showRaw('fp-raw-thumbmark', result);
        } else {
          set('fp-thumbmarkjs', 'Failed to load');
        }
      } catch (e) {
        set('fp-thumbmarkjs', 'Error');
      }
    })();
  </script>
</body>
</html>
"#;

/// Render the full dashboard page for a request.
pub fn render_dashboard(snapshot: &RequestSnapshot) -> String {
    let mut page = String::with_capacity(PAGE_HEAD.len() + PAGE_TAIL.len() + 4096);
    page.push_str(PAGE_HEAD);

    open_card(
        &mut page,
        "Server-Side",
        "Information visible to the edge network",
    );
    page.push_str(&render_html(&snapshot.server_view()));
    close_card(&mut page);

    open_card(&mut page, "Request Headers", "HTTP headers sent by your client");
    page.push_str("<table><thead><tr><th>Header</th><th>Value</th></tr></thead><tbody>\n");
    for (name, value) in snapshot.headers() {
        page.push_str(r#"<tr><td class="header-name">"#);
        page.push_str(&escape_html(name));
        page.push_str("</td><td>");
        page.push_str(&escape(Some(value)));
        page.push_str("</td></tr>\n");
    }
    page.push_str("</tbody></table>");
    close_card(&mut page);

    open_card(&mut page, "Client Fingerprint", "Browser signals gathered via JS");
    push_fingerprint_panel(&mut page);
    close_card(&mut page);

    page.push_str(PAGE_TAIL);
    page
}

fn open_card(page: &mut String, title: &str, description: &str) {
    page.push_str(r#"<div class="card"><div class="card-header"><div><h2>"#);
    page.push_str(title);
    page.push_str("</h2><p>");
    page.push_str(description);
    page.push_str(
        r#"</p></div><button class="minimize-btn" type="button">&#8211;</button></div><div class="widget-content">"#,
    );
    page.push('\n');
}

fn close_card(page: &mut String) {
    page.push_str("\n</div></div>\n");
}

fn push_fingerprint_panel(page: &mut String) {
    page.push_str(r#"<table id="fingerprint-table"><tbody>"#);
    page.push('\n');
    for (id, label) in FINGERPRINT_SLOTS {
        page.push_str("<tr><th>");
        page.push_str(label);
        page.push_str(r#"</th><td id=""#);
        page.push_str(id);
        page.push_str(r#"">...</td></tr>"#);
        page.push('\n');
    }
    page.push_str("</tbody></table>\n");

    for (id, summary) in RAW_SLOTS {
        page.push_str(r#"<div id=""#);
        page.push_str(id);
        page.push_str(r#"-container" class="hidden"><details><summary>"#);
        page.push_str(summary);
        page.push_str(r#"</summary><pre id=""#);
        page.push_str(id);
        page.push_str(r#""></pre></details></div>"#);
        page.push('\n');
    }
}
