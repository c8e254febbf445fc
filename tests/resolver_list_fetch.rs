//! Tests for fetching the remote resolver list and falling back to defaults.

mod helpers;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use domain_cname::initialization::init_resolver_pool;
use domain_cname::{run_pipeline, Config, DnsClient, LookupStats, OutputSink, ResolverPool};
use helpers::MockDnsServer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config using the built-in resolvers, fetching the list from `url`.
fn config_fetching(url: String) -> Config {
    Config {
        resolver_list_url: url,
        ..Default::default()
    }
}

async fn serve_list(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nameservers.txt"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_successful_fetch_replaces_builtin_resolvers() {
    let server = serve_list(200, "9.9.9.9,1.1.1.1, 208.67.222.222\n").await;
    let config = config_fetching(format!("{}/nameservers.txt", server.uri()));

    let pool = init_resolver_pool(&config).await.expect("pool");

    let expected: Vec<SocketAddr> = ["9.9.9.9:53", "1.1.1.1:53", "208.67.222.222:53"]
        .iter()
        .map(|s| s.parse().expect("valid address"))
        .collect();
    assert_eq!(pool.servers(), expected.as_slice());
}

#[tokio::test]
async fn test_cli_resolvers_are_not_replaced_by_remote_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nameservers.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("9.9.9.9"))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config {
        resolvers: vec!["127.0.0.1:5353".to_string()],
        resolver_list_url: format!("{}/nameservers.txt", server.uri()),
        ..Default::default()
    };
    let pool = init_resolver_pool(&config).await.expect("pool");

    let expected: SocketAddr = "127.0.0.1:5353".parse().expect("valid address");
    assert_eq!(pool.servers(), &[expected]);
    server.verify().await;
}

#[tokio::test]
async fn test_server_error_keeps_builtin_resolvers() {
    let server = serve_list(500, "9.9.9.9").await;
    let config = config_fetching(format!("{}/nameservers.txt", server.uri()));

    let pool = init_resolver_pool(&config).await.expect("pool");
    assert_eq!(pool, ResolverPool::builtin());
}

#[tokio::test]
async fn test_empty_body_keeps_builtin_resolvers() {
    let server = serve_list(200, " \n").await;
    let config = config_fetching(format!("{}/nameservers.txt", server.uri()));

    let pool = init_resolver_pool(&config).await.expect("pool");
    assert_eq!(pool, ResolverPool::builtin());
}

#[tokio::test]
async fn test_malformed_body_keeps_builtin_resolvers() {
    let server = serve_list(200, "9.9.9.9,<html>not a resolver</html>").await;
    let config = config_fetching(format!("{}/nameservers.txt", server.uri()));

    let pool = init_resolver_pool(&config).await.expect("pool");
    assert_eq!(pool, ResolverPool::builtin(), "no partial list may be used");
}

#[tokio::test]
async fn test_missing_path_keeps_builtin_resolvers() {
    let server = serve_list(200, "9.9.9.9").await;
    let config = config_fetching(format!("{}/other.txt", server.uri()));

    let pool = init_resolver_pool(&config).await.expect("pool");
    assert_eq!(pool, ResolverPool::builtin());
}

#[tokio::test]
async fn test_unreachable_url_keeps_builtin_resolvers() {
    // Port 1 on localhost refuses connections
    let config = config_fetching("http://127.0.0.1:1/nameservers.txt".to_string());

    let pool = init_resolver_pool(&config).await.expect("pool");
    assert_eq!(pool, ResolverPool::builtin());
}

#[tokio::test]
async fn test_lookups_use_cli_resolvers_while_list_is_served() {
    let dns = MockDnsServer::start().await;
    let list = serve_list(200, "9.9.9.9").await;
    let config = Config {
        resolvers: vec![dns.addr.to_string()],
        resolver_list_url: format!("{}/nameservers.txt", list.uri()),
        ..Default::default()
    };

    let pool = init_resolver_pool(&config).await.expect("pool");
    assert_eq!(pool.servers(), &[dns.addr]);

    let sink = Arc::new(OutputSink::new(Vec::new(), true));
    let mut rng = StdRng::seed_from_u64(11);
    run_pipeline(
        "a.com\nb.com\n".as_bytes(),
        &pool,
        &mut rng,
        Arc::new(DnsClient::new(Duration::from_secs(2))),
        Arc::clone(&sink),
        Arc::new(LookupStats::new()),
        4,
    )
    .await;

    let output = String::from_utf8(sink.writer().await.clone()).expect("utf-8 output");
    let mut lines: Vec<&str> = output.lines().collect();
    lines.sort_unstable();
    assert_eq!(
        lines,
        vec!["target.example.net,a.com", "target.example.net,b.com"]
    );
    assert_eq!(dns.queries().len(), 2);
}
