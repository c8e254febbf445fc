//! End-to-end pipeline tests against a local mock DNS server.

mod helpers;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use domain_cname::{
    run_pipeline, DnsClient, LookupErrorKind, LookupStats, OutputSink, ResolverPool,
};
use helpers::MockDnsServer;
use hickory_proto::rr::RecordType;
use rand::rngs::StdRng;
use rand::SeedableRng;

struct Outcome {
    lines: Vec<String>,
    dispatched: usize,
    stats: Arc<LookupStats>,
}

async fn resolve(server: &MockDnsServer, input: &str, verbose: bool, workers: usize) -> Outcome {
    let pool = ResolverPool::new(vec![server.addr]).expect("non-empty pool");
    let mut rng = StdRng::seed_from_u64(3);
    let engine = Arc::new(DnsClient::new(Duration::from_secs(2)));
    let sink = Arc::new(OutputSink::new(Vec::new(), verbose));
    let stats = Arc::new(LookupStats::new());

    let dispatched = run_pipeline(
        input.as_bytes(),
        &pool,
        &mut rng,
        engine,
        Arc::clone(&sink),
        Arc::clone(&stats),
        workers,
    )
    .await;

    let output = String::from_utf8(sink.writer().await.clone()).expect("utf-8 output");
    Outcome {
        lines: output.lines().map(str::to_string).collect(),
        dispatched,
        stats,
    }
}

#[tokio::test]
async fn test_cname_answer_yields_one_line_without_trailing_dot() {
    let server = MockDnsServer::start().await;
    let outcome = resolve(&server, "a.com\n", false, 2).await;
    assert_eq!(outcome.lines, vec!["target.example.net"]);
}

#[tokio::test]
async fn test_verbose_output_pairs_target_with_domain() {
    let server = MockDnsServer::start().await;
    let outcome = resolve(&server, "a.com\n", true, 2).await;
    assert_eq!(outcome.lines, vec!["target.example.net,a.com"]);
}

#[tokio::test]
async fn test_query_is_recursive_cname_for_fqdn() {
    let server = MockDnsServer::start().await;
    resolve(&server, "a.com\n", false, 1).await;

    let queries = server.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].name, "a.com.");
    assert_eq!(queries[0].query_type, RecordType::CNAME);
    assert!(queries[0].recursion_desired);
}

#[tokio::test]
async fn test_empty_and_address_only_answers_produce_no_output() {
    let server = MockDnsServer::start().await;
    let outcome = resolve(&server, "empty-x.com\na-y.com\nz.com\n", true, 3).await;

    assert_eq!(outcome.lines, vec!["target.example.net,z.com"]);
    assert_eq!(outcome.dispatched, 3);
    assert_eq!(outcome.stats.failure_count(LookupErrorKind::NoAnswer), 1);
    assert_eq!(outcome.stats.failure_count(LookupErrorKind::NoCname), 1);
    assert_eq!(outcome.stats.resolved(), 1);
}

#[tokio::test]
async fn test_mixed_case_domains_send_identical_queries() {
    let server = MockDnsServer::start().await;
    resolve(&server, "Example.COM\nexample.com\n", false, 1).await;

    let names: Vec<String> = server.queries().into_iter().map(|q| q.name).collect();
    assert_eq!(names, vec!["example.com.", "example.com."]);
}

#[tokio::test]
async fn test_whitespace_only_lines_are_not_queried() {
    let server = MockDnsServer::start().await;
    let outcome = resolve(&server, "\n  \n\t\nb.com\n\n", false, 2).await;

    assert_eq!(outcome.dispatched, 1);
    assert_eq!(server.queries().len(), 1);
    assert_eq!(outcome.lines, vec!["target.example.net"]);
}

#[tokio::test]
async fn test_n_domains_yield_exactly_n_lines() {
    let server = MockDnsServer::start().await;
    let domains: Vec<String> = (0..200).map(|i| format!("host{i}.example.org")).collect();
    let outcome = resolve(&server, &domains.join("\n"), true, 20).await;

    assert_eq!(outcome.dispatched, 200);
    assert_eq!(outcome.lines.len(), 200);
    let unique: HashSet<_> = outcome.lines.iter().collect();
    assert_eq!(unique.len(), 200, "no result may be duplicated");
    for domain in &domains {
        assert!(outcome
            .lines
            .contains(&format!("target.example.net,{domain}")));
    }
}

#[tokio::test]
async fn test_unreachable_resolver_drops_items_silently() {
    // Bound but never answers
    let silent = tokio::net::UdpSocket::bind("127.0.0.1:0")
        .await
        .expect("bind silent socket");
    let pool = ResolverPool::new(vec![silent.local_addr().expect("address")])
        .expect("non-empty pool");
    let mut rng = StdRng::seed_from_u64(3);
    let sink = Arc::new(OutputSink::new(Vec::new(), false));
    let stats = Arc::new(LookupStats::new());

    let dispatched = run_pipeline(
        "a.com\nb.com\n".as_bytes(),
        &pool,
        &mut rng,
        Arc::new(DnsClient::new(Duration::from_millis(200))),
        Arc::clone(&sink),
        Arc::clone(&stats),
        2,
    )
    .await;

    assert_eq!(dispatched, 2);
    assert!(sink.writer().await.is_empty());
    assert_eq!(stats.failure_count(LookupErrorKind::Transport), 2);
}
