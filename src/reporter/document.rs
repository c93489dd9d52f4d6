//! Self-contained HTML page around the rendered fragments.
//!
//! Embeds the CSS and JavaScript needed to expand feature rows and open the
//! scenario and environment modals. Fragments are inserted verbatim and in
//! the order they were rendered.

use crate::reporter::html_escape;
use crate::types::ReportSummary;

/// A complete report page.
#[derive(Debug, Clone, Copy)]
pub struct ReportDocument<'a> {
    /// Page title
    pub title: &'a str,
    /// Aggregate counts shown in the header
    pub summary: ReportSummary,
    /// Rendered feature rows
    pub feature_rows: &'a [String],
    /// Rendered modals (environment first)
    pub modals: &'a [String],
}

impl ReportDocument<'_> {
    /// Render the page.
    #[must_use]
    pub fn render(&self) -> String {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let version = env!("CARGO_PKG_VERSION");
        let summary = &self.summary;

        let (status_class, status_text) = if summary.has_failures() {
            ("status-failed", "Failures Found")
        } else {
            ("status-passed", "All Scenarios Passed")
        };

        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <header class="report-header {status_class}">
        <h1>{title}</h1>
        <p class="status-text">{status_text}</p>
        <div class="stats">
            <span class="stat">Features: {features} ({features_passed} passed, {features_failed} failed)</span>
            <span class="stat">Scenarios: {scenarios} ({scenarios_passed} passed, {scenarios_failed} failed)</span>
            <a href="#environment-info" class="modal-link env-link">Environment</a>
        </div>
    </header>

    <main>
        <table class="feature-table">
            <thead>
                <tr><th>Feature</th><th>Result</th></tr>
            </thead>
            <tbody>
{feature_rows}
            </tbody>
        </table>
    </main>

{modals}

    <footer class="report-footer">
        <span class="version">scenario-report v{version}</span>
        <span class="timestamp">{timestamp}</span>
    </footer>

    <script>
{js}
    </script>
</body>
</html>"##,
            title = html_escape(self.title),
            css = get_css(),
            js = get_js(),
            features = summary.features,
            features_passed = summary.features_passed,
            features_failed = summary.features_failed,
            scenarios = summary.scenarios,
            scenarios_passed = summary.scenarios_passed,
            scenarios_failed = summary.scenarios_failed,
            feature_rows = self.feature_rows.concat(),
            modals = self.modals.concat(),
        )
    }
}

/// Get the embedded CSS.
fn get_css() -> &'static str {
    r"
:root {
    --bg: #f7f8fa;
    --surface: #ffffff;
    --border: #e2e5ea;
    --text: #1f2430;
    --muted: #6b7280;
    --success: #16a34a;
    --danger: #dc2626;
    --warning: #d97706;
    --font-mono: ui-monospace, SFMono-Regular, Menlo, monospace;
}

* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--bg); color: var(--text); }

.report-header { padding: 1.5rem 2rem; background: var(--surface); border-bottom: 4px solid var(--border); }
.report-header.status-passed { border-bottom-color: var(--success); }
.report-header.status-failed { border-bottom-color: var(--danger); }
.report-header h1 { margin: 0 0 0.25rem; font-size: 1.5rem; }
.status-text { margin: 0 0 0.75rem; color: var(--muted); }
.stats { display: flex; gap: 1.5rem; flex-wrap: wrap; font-size: 0.875rem; }

main { padding: 2rem; }
table { width: 100%; border-collapse: collapse; }
.feature-table { background: var(--surface); border: 1px solid var(--border); }
.feature-table th { text-align: left; padding: 0.75rem 1rem; font-size: 0.75rem; text-transform: uppercase; color: var(--muted); }
.feature-row { cursor: pointer; border-top: 1px solid var(--border); }
.feature-row td, .scenario-row td { padding: 0.6rem 1rem; }
.feature-row:hover { background: var(--bg); }
.collapse { display: none; }
.collapse.open { display: table-row; }
.scenario-table { margin-left: 1.5rem; width: calc(100% - 1.5rem); }

.badge { display: inline-block; padding: 0.15rem 0.6rem; border-radius: 999px; font-size: 0.75rem; color: #fff; }
.badge-success { background: var(--success); }
.badge-danger { background: var(--danger); }
.badge-warning { background: var(--warning); }

.modal { display: none; position: fixed; inset: 0; background: rgba(0, 0, 0, 0.45); overflow-y: auto; z-index: 10; }
.modal.open { display: block; }
.modal-dialog { max-width: 960px; margin: 3rem auto; background: var(--surface); border-radius: 8px; }
.modal-header { display: flex; align-items: baseline; gap: 1rem; padding: 1rem 1.25rem; border-bottom: 1px solid var(--border); }
.modal-title { margin: 0; flex: 1; }
.modal-subtitle { color: var(--muted); font-size: 0.875rem; }
.modal-close { border: none; background: none; font-size: 1.5rem; cursor: pointer; }
.modal-body { padding: 1rem 1.25rem; }
.modal-row { padding: 0.4rem 0; font-family: var(--font-mono); font-size: 0.875rem; }

.step { padding: 0.6rem 0; border-bottom: 1px solid var(--border); }
.step-header { display: flex; gap: 1rem; align-items: center; }
.step-name { flex: 1; }
.step-duration { color: var(--muted); font-family: var(--font-mono); font-size: 0.75rem; }
.step-exception, .step-output { margin: 0.5rem 0 0; padding: 0.75rem; background: var(--bg); font-family: var(--font-mono); font-size: 0.75rem; white-space: pre-wrap; }
.step-exception { color: var(--danger); }
.step-datatable { margin-top: 0.5rem; width: auto; }
.step-datatable td { border: 1px solid var(--border); padding: 0.25rem 0.6rem; font-family: var(--font-mono); font-size: 0.75rem; }
.step-embedding-image { display: block; max-width: 100%; margin-top: 0.5rem; border: 1px solid var(--border); }

.report-footer { display: flex; justify-content: space-between; padding: 1rem 2rem; color: var(--muted); font-size: 0.75rem; }
"
}

/// Get the embedded JavaScript.
fn get_js() -> &'static str {
    r"
// Expand/collapse the scenarios of a feature
document.querySelectorAll('.feature-row').forEach(row => {
    row.addEventListener('click', () => {
        const target = document.querySelector(row.dataset.target);
        if (target) {
            target.classList.toggle('open');
        }
    });
});

// Open modals from scenario links
document.querySelectorAll('.modal-link').forEach(link => {
    link.addEventListener('click', e => {
        e.preventDefault();
        e.stopPropagation();
        const modal = document.querySelector(link.getAttribute('href'));
        if (modal) {
            modal.classList.add('open');
        }
    });
});

// Close on button, backdrop click or Escape
document.querySelectorAll('.modal').forEach(modal => {
    modal.addEventListener('click', e => {
        if (e.target === modal || e.target.classList.contains('modal-close')) {
            modal.classList.remove('open');
        }
    });
});

document.addEventListener('keydown', e => {
    if (e.key === 'Escape') {
        document.querySelectorAll('.modal.open').forEach(m => m.classList.remove('open'));
    }
});
"
}
