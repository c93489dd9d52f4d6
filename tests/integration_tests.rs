//! Integration tests for scenario-report.
//!
//! These tests verify the end-to-end functionality of the parser,
//! classifier, fragment builder, reporter, and binary.

use scenario_report::parser::{parse_run_results_file, CucumberParser};
use scenario_report::reporter::{HandlebarsRenderer, HtmlReportBuilder};
use scenario_report::{Feature, RunResult};
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn checkout_features() -> Vec<Feature> {
    CucumberParser::new()
        .parse_paths(&[fixtures_path().join("reports")])
        .unwrap()
}

fn run_results() -> Vec<RunResult> {
    parse_run_results_file(fixtures_path().join("run-results.json")).unwrap()
}

mod parser_tests {
    use super::*;

    #[test]
    fn test_parse_fixture_tree() {
        let features = checkout_features();
        assert_eq!(features.len(), 2);

        let checkout = &features[0];
        assert_eq!(checkout.id, "feature-0");
        assert_eq!(checkout.short_name(), "checkout.feature");
        assert_eq!(checkout.scenarios.len(), 3);
        assert!(checkout.scenarios[0].is_background());

        let card = &checkout.scenarios[1];
        assert_eq!(card.id, "scenario-0-1");
        assert_eq!(card.rerun_key(), "features/shop/checkout.feature:6");
        assert_eq!(card.before[0].location, "Hooks.openBrowser()");
        assert_eq!(card.steps.len(), 3);
        assert_eq!(card.after[0].embeddings[0].id, "embedding-0-1-0");
        assert_eq!(card.after[0].embeddings[1].id, "embedding-0-1-1");

        assert_eq!(features[1].scenarios[0].id, "scenario-1-0");
    }

    #[test]
    fn test_background_does_not_affect_feature_status() {
        let features = checkout_features();
        // Checkout fails because of "Pay with card", not its failing background
        assert!(!features[0].passed());
        // Login has no background and passes
        assert!(features[1].passed());
    }

    #[test]
    fn test_parse_run_results_fixture() {
        let runs = run_results();
        assert_eq!(runs.len(), 4);
        assert_eq!(runs[0].feature_uri, "features/shop/checkout.feature:6");
    }
}

mod builder_tests {
    use super::*;

    #[test]
    fn test_background_is_excluded_and_order_kept() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let builder = HtmlReportBuilder::new(&renderer);
        let features = checkout_features();

        let rows = builder.build_feature_rows(&features, &[]).unwrap();
        assert_eq!(rows.len(), 2);

        let checkout = &rows[0];
        assert!(!checkout.contains("Logged in shopper"));
        assert!(!checkout.contains("scenario-0-0"));
        let card = checkout.find("Pay with card").unwrap();
        let voucher = checkout.find("Pay with voucher").unwrap();
        assert!(card < voucher);

        let modals = builder.build_modals(&features, "").unwrap();
        assert_eq!(modals.len(), 4);
        assert!(modals.iter().all(|m| !m.contains("Logged in shopper")));
    }

    #[test]
    fn test_labels_without_reruns() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let builder = HtmlReportBuilder::new(&renderer);
        let rows = builder.build_feature_rows(&checkout_features(), &[]).unwrap();

        let joined = rows.concat();
        assert!(!joined.contains("after Rerun"));
        assert!(rows[0].contains(r#"<span class="badge badge-danger">Failed</span>"#));
        assert!(rows[1].contains(r#"<span class="badge badge-success">Passed</span>"#));
    }

    #[test]
    fn test_labels_with_reruns() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let builder = HtmlReportBuilder::new(&renderer);
        let rows = builder
            .build_feature_rows(&checkout_features(), &run_results())
            .unwrap();

        // Failing scenario in a run with reruns
        assert!(rows[0].contains(r#"<span class="badge badge-danger">Failed after Rerun</span>"#));
        // Its own key has PASSED_AFTER_RERUN
        assert!(rows[0].contains(r#"<span class="badge badge-success">Passed after Rerun</span>"#));
        // Passing scenario without PASSED_AFTER_RERUN for its key
        assert!(rows[1].contains("Valid login"));
        assert!(!rows[1].contains("after Rerun"));
        // Feature rows never get a rerun qualifier
        assert!(rows[0].contains(r#"<span class="badge badge-danger">Failed</span>"#));
    }

    #[test]
    fn test_scenario_modal_content() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let builder = HtmlReportBuilder::new(&renderer);
        let modals = builder.build_modals(&checkout_features(), "").unwrap();

        let card = &modals[1];
        assert!(card.contains(r#"id="scenario-0-1""#));
        assert!(card.contains("checkout.feature - line 6"));

        // Before hooks, then steps, then after hooks
        let before = card.find("Hooks.openBrowser()").unwrap();
        let step = card.find("I pay with card").unwrap();
        let after = card.find("Hooks.screenshot()").unwrap();
        assert!(before < step && step < after);

        assert!(card.contains("<td>item</td><td>qty</td>"));
        assert!(card.contains("AssertionError: expected 200 but was 502"));
        assert!(card.contains("1.500s"));
        assert!(card.contains(">Skipped</span>"));
        assert!(card.contains("<b>hi</b>"));
        assert!(card.contains(r#"src="images/embedding-0-1-0.png""#));

        let voucher = &modals[2];
        assert!(voucher.contains("voucher applied\ntotal 0.00"));
        assert!(voucher.contains("I redeem voucher &quot;SPRING&quot;"));
        assert!(!voucher.contains("step-exception"));
        assert!(!voucher.contains("step-datatable"));
    }

    #[test]
    fn test_environment_modal() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let builder = HtmlReportBuilder::new(&renderer);
        let modals = builder
            .build_modals(
                &checkout_features(),
                "browser=chrome; env = staging ;bad;also=bad=here",
            )
            .unwrap();

        let environment = &modals[0];
        assert!(environment.contains(r#"id="environment-info""#));
        assert!(environment.contains("browser = chrome"));
        assert!(environment.contains("env = staging"));
        assert!(!environment.contains("bad"));
        assert_eq!(environment.matches("modal-row").count(), 2);
    }

    #[test]
    fn test_build_is_idempotent() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let builder = HtmlReportBuilder::new(&renderer);
        let features = checkout_features();
        let runs = run_results();

        assert_eq!(
            builder.build_feature_rows(&features, &runs).unwrap(),
            builder.build_feature_rows(&features, &runs).unwrap()
        );
        assert_eq!(
            builder.build_modals(&features, "os=linux").unwrap(),
            builder.build_modals(&features, "os=linux").unwrap()
        );
    }

    #[test]
    fn test_template_override_directory() {
        let renderer =
            HandlebarsRenderer::with_templates_dir(fixtures_path().join("templates")).unwrap();
        let builder = HtmlReportBuilder::new(&renderer);
        let rows = builder
            .build_feature_rows(&checkout_features(), &run_results())
            .unwrap();

        assert!(rows[0].contains(
            r##"<li class="custom-scenario" data-modal="#scenario-0-1">Pay with card: Failed after Rerun</li>"##
        ));
        // Non-overridden templates stay built-in
        assert!(rows[0].contains(r#"class="feature-row""#));
    }
}

mod reporter_tests {
    use super::*;
    use scenario_report::reporter::{write_image_assets, Reporter};
    use scenario_report::Config;

    #[test]
    fn test_full_document() {
        let mut config = Config::default();
        config.report.title = "Nightly Regression".to_string();
        config.report.environment_info = "browser=firefox".to_string();

        let reporter = Reporter::new(&config).unwrap();
        let html = reporter
            .render_html(&checkout_features(), &run_results())
            .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Nightly Regression</title>"));
        assert!(html.contains("Failures Found"));
        assert!(html.contains("Features: 2 (1 passed, 1 failed)"));
        assert!(html.contains("Scenarios: 3 (2 passed, 1 failed)"));
        assert!(html.contains("browser = firefox"));

        let environment = html.find(r#"id="environment-info""#).unwrap();
        let first_modal = html.find(r#"id="scenario-0-1""#).unwrap();
        assert!(environment < first_modal);
    }

    #[test]
    fn test_text_summary() {
        let mut config = Config::default();
        config.output.colored = false;
        let reporter = Reporter::new(&config).unwrap();
        let text = reporter.render_text(&checkout_features(), &run_results());

        assert!(text.contains("Pay with card"));
        assert!(text.contains("Failed after Rerun"));
        assert!(text.contains("Passed after Rerun"));
        assert!(!text.contains("Logged in shopper"));
        assert!(text.contains("FAILED - some scenarios failed"));
    }

    #[test]
    fn test_image_assets_written() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images");
        let written = write_image_assets(&checkout_features(), &images).unwrap();

        assert_eq!(written, vec![images.join("embedding-0-1-0.png")]);
        assert_eq!(std::fs::read(&written[0]).unwrap(), b"hello");
    }
}

mod cli_tests {
    use super::*;
    use assert_cmd::Command;
    use scenario_report::Config;
    use predicates::prelude::*;

    fn bin() -> Command {
        let mut cmd = Command::cargo_bin("scenario-report").unwrap();
        cmd.env_remove("SCENARIO_REPORT_CONFIG")
            .env_remove("SCENARIO_REPORT_ENV_INFO")
            .env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn test_render_writes_report_and_images() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out/report.html");

        bin()
            .current_dir(dir.path())
            .arg("render")
            .arg(fixtures_path().join("reports"))
            .arg("--run-results")
            .arg(fixtures_path().join("run-results.json"))
            .args(["--env-info", "browser=chrome", "--title", "CLI Report", "-o"])
            .arg(&output)
            .assert()
            .success()
            .stdout(predicate::str::contains("Report written to"));

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("<title>CLI Report</title>"));
        assert!(html.contains("Passed after Rerun"));
        assert!(html.contains("browser = chrome"));
        assert_eq!(
            std::fs::read(dir.path().join("out/images/embedding-0-1-0.png")).unwrap(),
            b"hello"
        );
    }

    #[test]
    fn test_render_to_stdout() {
        let dir = tempfile::tempdir().unwrap();
        bin()
            .current_dir(dir.path())
            .arg("render")
            .arg(fixtures_path().join("passing.json"))
            .assert()
            .success()
            .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
            .stdout(predicate::str::contains("All Scenarios Passed"));
        assert!(!dir.path().join("images").exists());
    }

    #[test]
    fn test_render_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        bin()
            .current_dir(dir.path())
            .args(["render", "does-not-exist.json"])
            .assert()
            .code(14)
            .stderr(predicate::str::contains("File not found"));
    }

    #[test]
    fn test_summary_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        bin()
            .current_dir(dir.path())
            .arg("summary")
            .arg(fixtures_path().join("reports"))
            .assert()
            .code(2)
            .stdout(predicate::str::contains("Pay with card"));

        bin()
            .current_dir(dir.path())
            .arg("summary")
            .arg(fixtures_path().join("passing.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains("PASSED - all scenarios passed"));
    }

    #[test]
    fn test_init_then_validate() {
        let dir = tempfile::tempdir().unwrap();
        bin().current_dir(dir.path()).arg("init").assert().success();
        assert!(dir.path().join("scenario-report.yaml").exists());

        bin()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));

        bin()
            .current_dir(dir.path())
            .arg("validate")
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration is valid"));
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("bad.yaml");
        std::fs::write(&config, "report:\n  title: \"\"\n").unwrap();

        bin()
            .current_dir(dir.path())
            .arg("validate")
            .arg(&config)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("report.title"));
    }

    #[test]
    fn test_validate_ignores_default_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("scenario-report.yaml"), "report:\n  title: \"\"\n").unwrap();
        std::fs::write(dir.path().join("good.yaml"), Config::example_yaml()).unwrap();

        bin()
            .current_dir(dir.path())
            .args(["validate", "good.yaml"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration is valid: good.yaml"));

        bin()
            .current_dir(dir.path())
            .arg("validate")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Configuration error:"));
    }

    #[test]
    fn test_render_with_bad_image_writes_no_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("broken.json");
        std::fs::write(
            &report,
            r#"[{"uri": "a.feature", "name": "A", "elements": [
                {"name": "Shot", "keyword": "Scenario", "line": 3, "steps": [
                    {"name": "x", "keyword": "Given ", "result": {"status": "passed"},
                     "embeddings": [{"mime_type": "image/png", "data": "%%%"}]}
                ]}
            ]}]"#,
        )
        .unwrap();
        let output = dir.path().join("out/report.html");

        bin()
            .current_dir(dir.path())
            .arg("render")
            .arg(&report)
            .arg("-o")
            .arg(&output)
            .assert()
            .code(21);
        assert!(!output.exists());
        assert!(!dir.path().join("out/images").exists());
    }
}

mod config_tests {
    use scenario_report::Config;

    #[test]
    fn test_example_config_round_trip() {
        let config = Config::from_yaml(&Config::example_yaml()).unwrap();
        assert_eq!(config.report.title, "Test Execution Report");
        assert!(config.report.templates_dir.is_none());
    }
}
