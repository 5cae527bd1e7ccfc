use clap::Parser;
use reqwest::Client;
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use subsweep::{
    load_targets, merge_reports, run_source, Anubis, Args, CrtSh, SourceOutcome, SourceReport,
};

fn report(source: &'static str, candidates: &[&str]) -> SourceReport {
    SourceReport {
        source,
        candidates: candidates.iter().map(|c| c.to_string()).collect(),
        outcome: SourceOutcome::Found,
    }
}

#[test]
fn first_seen_attribution_follows_source_order() {
    let reports = vec![
        report("A", &["api.example.com", "www.example.com"]),
        report("B", &["mail.example.com", "www.example.com"]),
    ];

    let aggregation = merge_reports(&reports);

    let hosts: Vec<(&str, &str)> = aggregation
        .records
        .iter()
        .map(|r| (r.host.as_str(), r.source))
        .collect();
    assert_eq!(
        hosts,
        [
            ("api.example.com", "A"),
            ("www.example.com", "A"),
            ("mail.example.com", "B"),
        ]
    );
    assert_eq!(aggregation.stats, [("A", 2), ("B", 1)]);
}

#[tokio::test]
async fn a_failing_source_does_not_halt_the_others() {
    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&broken)
        .await;

    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["api.example.com"])))
        .mount(&healthy)
        .await;

    let client = Client::new();
    let crtsh = CrtSh::with_base_url(broken.uri());
    let anubis = Anubis::with_base_url(healthy.uri());

    let reports = vec![
        run_source(&crtsh, &client, "example.com").await,
        run_source(&anubis, &client, "example.com").await,
    ];

    assert!(matches!(reports[0].outcome, SourceOutcome::Failed(_)));
    assert_eq!(reports[1].outcome, SourceOutcome::Found);

    let aggregation = merge_reports(&reports);
    assert_eq!(aggregation.records.len(), 1);
    assert_eq!(aggregation.records[0].host, "api.example.com");
    assert_eq!(aggregation.records[0].source, "Anubis");
    assert_eq!(aggregation.stats, [("crt.sh", 0), ("Anubis", 1)]);
}

#[test]
fn no_targets_is_a_fatal_error() {
    let args = Args::try_parse_from(["subsweep"]).unwrap();
    assert!(load_targets(&args).is_err());
}

#[test]
fn missing_list_file_is_a_fatal_error() {
    let args = Args::try_parse_from(["subsweep", "-l", "/nonexistent/targets.txt"]).unwrap();
    assert!(load_targets(&args).is_err());
}

#[test]
fn positional_domain_and_list_file_are_combined() {
    let path = std::env::temp_dir().join("subsweep-targets-test.txt");
    std::fs::write(&path, "one.example\n\n  two.example  \n").unwrap();

    let args = Args::try_parse_from([
        "subsweep",
        "zero.example",
        "-l",
        path.to_str().unwrap(),
    ])
    .unwrap();
    let targets = load_targets(&args).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(targets, ["zero.example", "one.example", "two.example"]);
}

#[test]
fn an_empty_list_file_alone_is_a_fatal_error() {
    let path = std::env::temp_dir().join("subsweep-empty-targets-test.txt");
    std::fs::write(&path, "\n  \n").unwrap();

    let args = Args::try_parse_from(["subsweep", "-l", path.to_str().unwrap()]).unwrap();
    let result = load_targets(&args);
    std::fs::remove_file(&path).ok();

    assert!(result.is_err());
}
