//! Built-in demo projects installed when generation fails.

use crate::preview::surface::escape_html;
use crate::types::{Project, ProjectFile};

/// Landing page demo echoing the prompt. Installed when the endpoint
/// answered but its output was not a usable project.
pub fn landing_demo(prompt: &str) -> Project {
    let index = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Generated Website</title>
    <link rel="stylesheet" href="styles.css">
</head>
<body>
    <header class="hero">
        <div class="container">
            <h1>Welcome to Your Generated Website</h1>
            <p class="subtitle">This is a website generated based on your prompt: "{}"</p>
            <button class="cta-button">Get Started</button>
        </div>
    </header>
    <main class="main-content">
        <section class="features">
            <div class="container">
                <h2>Key Features</h2>
                <div class="feature-grid">
                    <div class="feature-card"><h3>Responsive Design</h3><p>Looks great on all devices</p></div>
                    <div class="feature-card"><h3>Modern UI</h3><p>Clean and professional appearance</p></div>
                    <div class="feature-card"><h3>Fast Loading</h3><p>Optimized for performance</p></div>
                </div>
            </div>
        </section>
    </main>
    <footer class="footer">
        <div class="container"><p>&copy; Generated Website. All rights reserved.</p></div>
    </footer>
    <script src="app.js"></script>
</body>
</html>
"#,
        escape_html(prompt.trim())
    );

    let styles = r#"* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; }
.container { max-width: 1200px; margin: 0 auto; padding: 0 20px; }
.hero { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 80px 0; text-align: center; }
.hero h1 { font-size: 3rem; margin-bottom: 1rem; }
.subtitle { font-size: 1.25rem; margin-bottom: 2rem; opacity: 0.9; }
.cta-button { background: #fff; color: #667eea; padding: 12px 30px; border: none; border-radius: 8px; font-weight: 600; cursor: pointer; }
.main-content { padding: 80px 0; }
.features h2 { text-align: center; font-size: 2.5rem; margin-bottom: 3rem; color: #2c3e50; }
.feature-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 2rem; }
.feature-card { background: #f8f9fa; padding: 2rem; border-radius: 12px; text-align: center; border: 1px solid #e9ecef; }
.footer { background: #2c3e50; color: white; text-align: center; padding: 2rem 0; }
@media (max-width: 768px) { .hero h1 { font-size: 2rem; } .feature-grid { grid-template-columns: 1fr; } }
"#;

    let app = r#"document.addEventListener('DOMContentLoaded', function () {
    const ctaButton = document.querySelector('.cta-button');
    if (ctaButton) {
        ctaButton.addEventListener('click', function () {
            alert('Welcome! This is your generated website.');
        });
    }
});
"#;

    Project::new(
        vec![
            ProjectFile::new("index.html", index),
            ProjectFile::new("styles.css", styles),
            ProjectFile::new("app.js", app),
        ],
        "index.html",
    )
}

/// Minimal page installed when the endpoint was unreachable or refused the
/// request.
pub fn offline_demo() -> Project {
    let index = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Demo Website</title>
    <link rel="stylesheet" href="style.css">
</head>
<body>
    <main>
        <h1>Demo Website</h1>
        <p>The completion server could not be used, so this demo project was loaded instead.</p>
        <p>Start a local completion server and generate again.</p>
    </main>
</body>
</html>
"#;
    let style = "body { font-family: sans-serif; background: #0f172a; color: #e2e8f0; }\n\
main { max-width: 640px; margin: 15vh auto; padding: 0 1.5rem; }\n\
h1 { color: #38bdf8; }\n";

    Project::new(
        vec![
            ProjectFile::new("index.html", index),
            ProjectFile::new("style.css", style),
        ],
        "index.html",
    )
}
