//! Static responses: homepage and robots.txt.

use axum::http::header;
use axum::response::{Html, IntoResponse, Response};

pub const ROBOTS_TXT: &str = "User-agent: *\nDisallow: /";

pub fn robots() -> Response {
    ([(header::CONTENT_TYPE, "text/plain")], ROBOTS_TXT).into_response()
}

pub fn homepage() -> Response {
    Html(HOMEPAGE).into_response()
}

const HOMEPAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>GitHub Proxy</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
            max-width: 760px;
            margin: 0 auto;
            padding: 24px;
            background: #0d1117;
            color: #c9d1d9;
        }
        h1 { color: #58a6ff; }
        input {
            width: 100%;
            box-sizing: border-box;
            padding: 12px;
            border: 1px solid #30363d;
            border-radius: 6px;
            background: #21262d;
            color: #c9d1d9;
            font-size: 16px;
        }
        button {
            margin: 12px 6px 0 0;
            padding: 10px 20px;
            border: none;
            border-radius: 6px;
            background: #238636;
            color: #fff;
            font-size: 15px;
            cursor: pointer;
        }
        code { background: #21262d; padding: 2px 6px; border-radius: 3px; }
        li { margin: 6px 0; word-break: break-all; }
    </style>
</head>
<body>
    <h1>GitHub Proxy</h1>
    <p>Download GitHub release assets, archives, raw files and gists through this server.</p>

    <input type="text" id="url" placeholder="https://github.com/owner/repo/archive/main.zip">
    <button onclick="openProxy()">Download</button>
    <button onclick="copyProxy()">Copy link</button>

    <h3>Supported links</h3>
    <ul>
        <li>Archives: <code>https://github.com/owner/repo/archive/main.zip</code></li>
        <li>Releases: <code>https://github.com/owner/repo/releases/download/v1.0/app.tar.gz</code></li>
        <li>Files: <code>https://github.com/owner/repo/blob/main/README.md</code></li>
        <li>Raw: <code>https://raw.githubusercontent.com/owner/repo/main/README.md</code></li>
        <li>Gists: <code>https://gist.githubusercontent.com/owner/id/raw/file</code></li>
        <li>Clone: <code>git clone ORIGIN/https://github.com/owner/repo.git</code></li>
    </ul>

    <script>
        document.body.innerHTML = document.body.innerHTML.replace('ORIGIN', location.origin);

        function proxyUrl() {
            const url = document.getElementById('url').value.trim();
            if (!url) {
                alert('Enter a GitHub link');
                return null;
            }
            if (url.startsWith('https://') || url.startsWith('http://')) {
                return location.origin + '/' + url;
            }
            return location.origin + '/https://' + url;
        }

        function openProxy() {
            const link = proxyUrl();
            if (link) window.open(link, '_blank');
        }

        function copyProxy() {
            const link = proxyUrl();
            if (!link) return;
            navigator.clipboard.writeText(link)
                .then(() => alert('Link copied'))
                .catch(() => prompt('Copy link:', link));
        }

        document.addEventListener('keypress', (e) => {
            if (e.key === 'Enter' && e.target.id === 'url') openProxy();
        });
    </script>
</body>
</html>
"#;
