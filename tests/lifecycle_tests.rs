//! Suite lifecycle: matrix execution, output enumeration, and processing.

mod common;

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use common::{FixtureBuilder, scripted_suite, tuples};
use perfwatch::harness::processors::{BrowserResultsProcessor, DromaeoProcessor, KeyValueProcessor, SizeProcessor};
use perfwatch::harness::suite::{FileOutcome, SuiteInfo, SuiteSpec};
use perfwatch::harness::{HarnessContext, Processor};
use perfwatch_trace::{Score, TraceError};

fn key_value_body(_platform: &str, _variant: &str) -> String {
    "foo: 10\nbar: 2.5\nchatter: not a number\n".to_string()
}

fn matrix_spec() -> SuiteSpec {
    SuiteSpec::new("matrix")
        .with_platforms(["P1", "P2"])
        .with_variants(["V1", "V2"])
        .with_metrics(["foo", "bar"])
}

fn no_p1_v2(platform: &str, variant: &str) -> bool {
    !(platform == "P1" && variant == "V2")
}

#[test]
fn full_matrix_writes_and_reports_every_cell() {
    let fx = FixtureBuilder::new().build();
    let runs = Rc::new(RefCell::new(0));
    let mut suite = scripted_suite(
        matrix_spec(),
        &fx.config,
        key_value_body,
        Box::new(KeyValueProcessor),
        runs.clone(),
    );
    let stamp = suite.info.run_stamp;

    let report = suite.run(&fx.ctx()).unwrap();

    assert_eq!(*runs.borrow(), 1);
    assert_eq!(report.matrix.attempted, 4);
    assert_eq!(report.matrix.completed, 4);
    let files: Vec<&str> = report.files.iter().map(|f| f.file.as_str()).collect();
    assert_eq!(
        files,
        vec![
            format!("matrix-{stamp}-P1-V1"),
            format!("matrix-{stamp}-P1-V2"),
            format!("matrix-{stamp}-P2-V1"),
            format!("matrix-{stamp}-P2-V2"),
        ]
    );
    assert_eq!(report.accepted(), 8);
    assert_eq!(fx.reports().len(), 8);
}

#[test]
fn invalid_cell_is_never_attempted() {
    let fx = FixtureBuilder::new().build();
    let mut suite = scripted_suite(
        matrix_spec().with_cell_filter(no_p1_v2),
        &fx.config,
        key_value_body,
        Box::new(KeyValueProcessor),
        Rc::new(RefCell::new(0)),
    );
    let stamp = suite.info.run_stamp;

    let report = suite.run(&fx.ctx()).unwrap();

    assert_eq!(report.matrix.attempted, 3);
    assert!(!suite.info.output_dir.join(format!("matrix-{stamp}-P1-V2")).exists());
    assert!(fx.reports().iter().all(|r| !(r.platform == "P1" && r.variant == "V2")));
}

#[test]
fn key_value_trace_reports_declared_metrics_with_revision() {
    let fx = FixtureBuilder::new().build();
    let info = SuiteInfo::new(matrix_spec(), &fx.config);
    fs::create_dir_all(&info.output_dir).unwrap();
    fs::write(
        info.output_dir.join("matrix-1-P1-V1"),
        "Revision: 1234\nfoo: 10\nbar: 2.5\nundeclared: 3\n",
    )
    .unwrap();

    let outcome = KeyValueProcessor.process_file(&info, &fx.ctx(), "matrix-1-P1-V1").unwrap();

    assert_eq!(
        tuples(&fx.reports()),
        vec![
            ("foo".to_string(), Score::Int(10), "P1".to_string(), "V1".to_string(), 1234),
            ("bar".to_string(), Score::Float(2.5), "P1".to_string(), "V1".to_string(), 1234),
        ]
    );
    assert!(matches!(outcome, FileOutcome::Reported { accepted: 2, rejected: 0, .. }));
}

#[test]
fn trace_without_revision_reports_nothing() {
    let fx = FixtureBuilder::new().build();
    let info = SuiteInfo::new(matrix_spec(), &fx.config);
    fs::create_dir_all(&info.output_dir).unwrap();
    fs::write(info.output_dir.join("matrix-1-P1-V1"), "foo: 10\nbar: 2.5\n").unwrap();
    fs::write(info.output_dir.join("matrix-1-P2-V1"), "Revision: unknown\nfoo: 10\n").unwrap();

    let ctx = fx.ctx();
    for file in ["matrix-1-P1-V1", "matrix-1-P2-V1"] {
        let outcome = KeyValueProcessor.process_file(&info, &ctx, file).unwrap();
        assert_eq!(outcome, FileOutcome::Incomplete(TraceError::MissingRevision));
    }
    assert!(fx.reports().is_empty());
}

#[test]
fn reprocessing_yields_identical_reports() {
    let fx = FixtureBuilder::new().build();
    let info = SuiteInfo::new(matrix_spec(), &fx.config);
    fs::create_dir_all(&info.output_dir).unwrap();
    fs::write(info.output_dir.join("matrix-1-P1-V1"), "Revision: 9\nfoo: 1\nbar: 0.5\n").unwrap();

    let ctx = fx.ctx();
    KeyValueProcessor.process_file(&info, &ctx, "matrix-1-P1-V1").unwrap();
    KeyValueProcessor.process_file(&info, &ctx, "matrix-1-P1-V1").unwrap();

    let all = tuples(&fx.reports());
    assert_eq!(all.len(), 4);
    assert_eq!(all[..2], all[2..]);
}

#[test]
fn rejected_report_does_not_stop_the_rest() {
    let fx = FixtureBuilder::new().reject("foo").build();
    let info = SuiteInfo::new(matrix_spec(), &fx.config);
    fs::create_dir_all(&info.output_dir).unwrap();
    fs::write(info.output_dir.join("matrix-1-P1-V1"), "Revision: 9\nfoo: 1\nbar: 0.5\n").unwrap();

    let outcome = KeyValueProcessor.process_file(&info, &fx.ctx(), "matrix-1-P1-V1").unwrap();

    assert_eq!(fx.reports().len(), 2);
    assert!(matches!(outcome, FileOutcome::Reported { accepted: 1, rejected: 1, .. }));
}

#[test]
fn enumeration_skips_dot_files_and_flags_foreign_names() {
    let fx = FixtureBuilder::new().build();
    let mut suite = scripted_suite(
        SuiteSpec::new("matrix").with_metrics(["foo"]),
        &fx.config,
        key_value_body,
        Box::new(KeyValueProcessor),
        Rc::new(RefCell::new(0)),
    );
    fs::create_dir_all(&suite.info.output_dir).unwrap();
    fs::write(suite.info.output_dir.join(".hidden-1-P-V"), "Revision: 1\nfoo: 1\n").unwrap();
    fs::write(suite.info.output_dir.join("README"), "Revision: 1\nfoo: 1\n").unwrap();

    let report = suite.run(&fx.ctx()).unwrap();

    assert_eq!(report.matrix.attempted, 0);
    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].file, "README");
    assert_eq!(report.files[0].outcome, FileOutcome::UnrecognizedName);
    assert!(fx.reports().is_empty());
}

#[test]
fn size_trace_reports_browser_platform_and_line_variant() {
    let fx = FixtureBuilder::new().build();
    let info = SuiteInfo::new(SuiteSpec::new("dromaeo-size"), &fx.config);
    fs::create_dir_all(&info.output_dir).unwrap();
    fs::write(
        info.output_dir.join("dromaeo-size-5-browser-frog_dom"),
        "Revision: 77\nSize (frog_dom, attr): 512\nSize (frog_dom, sum): 512\n",
    )
    .unwrap();

    SizeProcessor
        .process_file(&info, &fx.ctx(), "dromaeo-size-5-browser-frog_dom")
        .unwrap();

    assert_eq!(
        tuples(&fx.reports())[0],
        ("attr".to_string(), Score::Int(512), "browser".to_string(), "frog_dom".to_string(), 77)
    );
}

#[test]
fn browser_trace_maps_v8_to_js() {
    let fx = FixtureBuilder::new().build();
    let info = SuiteInfo::new(SuiteSpec::new("browser-perf"), &fx.config);
    fs::create_dir_all(&info.output_dir).unwrap();
    fs::write(
        info.output_dir.join("perf-5-chrome-v8"),
        "Revision: 300\n<html><div id=\"results\">\nDeltaBlue: 2000<br>Richards: 1500<br></div>\n",
    )
    .unwrap();

    BrowserResultsProcessor
        .process_file(&info, &fx.ctx(), "perf-5-chrome-v8")
        .unwrap();

    let reports = tuples(&fx.reports());
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|(_, _, platform, variant, rev)| platform == "chrome" && variant == "js" && *rev == 300));
}

#[test]
fn browser_trace_without_results_is_incomplete() {
    let fx = FixtureBuilder::new().build();
    let info = SuiteInfo::new(SuiteSpec::new("browser-perf"), &fx.config);
    fs::create_dir_all(&info.output_dir).unwrap();
    fs::write(info.output_dir.join("perf-5-ff-js"), "Revision: 300\nTimed out\n").unwrap();

    let outcome = BrowserResultsProcessor
        .process_file(&info, &fx.ctx(), "perf-5-ff-js")
        .unwrap();

    assert_eq!(outcome, FileOutcome::Incomplete(TraceError::MissingResults));
}

#[test]
fn dromaeo_trace_reports_legalized_names() {
    let fx = FixtureBuilder::new().build();
    let info = SuiteInfo::new(SuiteSpec::new("dromaeo"), &fx.config);
    fs::create_dir_all(&info.output_dir).unwrap();
    fs::write(
        info.output_dir.join("dromaeo-5-ff-frog_dom"),
        concat!(
            "Revision: 41\n",
            "<div class=\"result-item done\"><ol>",
            "<li><b>getElementsByTagName(*):</b>120.5<small> runs/s</small></li>",
            "</ol></div>\n"
        ),
    )
    .unwrap();

    DromaeoProcessor
        .process_file(&info, &fx.ctx(), "dromaeo-5-ff-frog_dom")
        .unwrap();

    assert_eq!(
        tuples(&fx.reports()),
        vec![(
            "getElementsByTagName_ALL_".to_string(),
            Score::Float(120.5),
            "ff".to_string(),
            "frog_dom".to_string(),
            41
        )]
    );
}

#[test]
fn unreadable_trace_is_a_failed_file_not_a_failed_suite() {
    struct Exploding;
    impl Processor for Exploding {
        fn process_file(
            &self,
            _suite: &SuiteInfo,
            _ctx: &HarnessContext<'_>,
            file_name: &str,
        ) -> Result<FileOutcome, perfwatch::HarnessError> {
            if file_name.ends_with("P1-V1") {
                Err(perfwatch::HarnessError::Config("boom".into()))
            } else {
                Ok(FileOutcome::UnrecognizedName)
            }
        }
    }

    let fx = FixtureBuilder::new().build();
    let mut suite = scripted_suite(
        matrix_spec(),
        &fx.config,
        key_value_body,
        Box::new(Exploding),
        Rc::new(RefCell::new(0)),
    );

    let report = suite.run(&fx.ctx()).unwrap();

    assert_eq!(report.files.len(), 4);
    assert!(matches!(report.files[0].outcome, FileOutcome::Failed(_)));
    assert!(
        report.files[1..]
            .iter()
            .all(|f| f.outcome == FileOutcome::UnrecognizedName)
    );
}
