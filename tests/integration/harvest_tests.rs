//! Integration tests for the harvester
//!
//! These tests use wiremock to create mock HTTP servers and run whole
//! harvests end-to-end against a temporary output file.

use link_harvest::config::{load_config, Config, HttpConfig, InputConfig, OutputConfig, UserAgentConfig};
use link_harvest::crawler::run;
use link_harvest::seeds::{parse_seeds, read_seeds, SeedUrl};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing to `output_path`
fn create_test_config(output_path: &Path) -> Config {
    Config {
        http: HttpConfig {
            request_timeout_secs: 5,
            connect_timeout_secs: 2,
            max_redirects: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        input: InputConfig {
            seeds_path: PathBuf::from("unused-urls.txt"),
        },
        output: OutputConfig {
            output_path: output_path.to_path_buf(),
        },
    }
}

/// Mounts a GET mock for `page` that must be requested exactly once
async fn mount_page(server: &MockServer, page: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn seed(url: String) -> SeedUrl {
    SeedUrl::parse(&url).expect("Failed to parse seed")
}

fn read_output(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("Failed to read output")
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_single_seed_scenario() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(
        &mock_server,
        "/",
        200,
        r#"<a href="/static/assets/">example</a>"#.to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("foundurls.txt");
    let config = create_test_config(&out);

    let report = run(&config, vec![seed(base_url.clone())])
        .await
        .expect("Harvest failed");

    assert_eq!(report.seeds, 1);
    assert_eq!(report.pages_written, 1);
    assert_eq!(report.records_written, 1);
    assert_eq!(
        read_output(&out),
        vec![
            "source -> target".to_string(),
            format!("{} -> {}/static/assets/", base_url, base_url),
        ]
    );
}

#[tokio::test]
async fn test_http_error_seed_leaves_no_lines() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(&mock_server, "/gone", 404, "not found".to_string()).await;
    mount_page(
        &mock_server,
        "/ok",
        200,
        r#"<a href="/one">1</a><a href="/two">2</a>"#.to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("foundurls.txt");
    let config = create_test_config(&out);
    let seeds = vec![
        seed(format!("{}/gone", base_url)),
        seed(format!("{}/ok", base_url)),
    ];

    let report = run(&config, seeds).await.expect("Harvest failed");

    assert_eq!(report.fetch_failures, 1);
    assert_eq!(report.fetch_failures_by_kind.get("http_status"), Some(&1));
    assert_eq!(report.pages_written, 1);

    let lines = read_output(&out);
    assert_eq!(lines.len(), 3);
    assert!(lines[1..]
        .iter()
        .all(|line| line.starts_with(&format!("{}/ok -> ", base_url))));
    assert!(!lines.iter().any(|line| line.contains("/gone")));
}

#[tokio::test]
async fn test_page_without_links_writes_nothing() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        200,
        "<html><body><p>No links</p></body></html>".to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("foundurls.txt");
    let config = create_test_config(&out);

    let report = run(&config, vec![seed(mock_server.uri())])
        .await
        .expect("Harvest failed");

    assert_eq!(report.pages_without_links, 1);
    assert_eq!(report.failures(), 0);
    assert_eq!(read_output(&out), vec!["source -> target".to_string()]);
}

#[tokio::test]
async fn test_all_seeds_failing_still_completes() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(&mock_server, "/a", 500, String::new()).await;
    mount_page(&mock_server, "/b", 403, String::new()).await;

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let closed = listener.local_addr().unwrap();
    drop(listener);

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("foundurls.txt");
    let config = create_test_config(&out);
    let seeds = vec![
        seed(format!("{}/a", base_url)),
        seed(format!("{}/b", base_url)),
        seed(format!("http://{}/", closed)),
    ];

    let report = run(&config, seeds).await.expect("Harvest failed");

    assert_eq!(report.seeds, 3);
    assert_eq!(report.completed(), 3);
    assert_eq!(report.fetch_failures, 3);
    assert_eq!(report.fetch_failures_by_kind.get("network"), Some(&1));
    assert_eq!(report.records_written, 0);
    assert_eq!(read_output(&out), vec!["source -> target".to_string()]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_seeds_write_contiguous_blocks() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let seed_count = 12;
    let mut expected_total = 0;
    let mut seeds = Vec::new();
    for i in 0..seed_count {
        let link_count = i + 1;
        let body: String = (0..link_count)
            .map(|j| format!(r#"<a href="/site{}/link{}">{}</a>"#, i, j, j))
            .collect();
        mount_page(&mock_server, &format!("/site{}", i), 200, body).await;
        seeds.push(seed(format!("{}/site{}", base_url, i)));
        expected_total += link_count;
    }

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("foundurls.txt");
    let config = create_test_config(&out);

    let report = run(&config, seeds).await.expect("Harvest failed");
    assert_eq!(report.pages_written, seed_count);
    assert_eq!(report.records_written, expected_total);

    let lines = read_output(&out);
    assert_eq!(lines[0], "source -> target");
    assert_eq!(lines.len() - 1, expected_total);

    // Every record belongs to its seed and each seed forms one block
    let mut blocks: HashMap<String, usize> = HashMap::new();
    let mut previous: Option<&str> = None;
    for line in &lines[1..] {
        let (source, target) = line.split_once(" -> ").expect("malformed line");
        let site = source.rsplit('/').next().unwrap();
        assert!(target.contains(&format!("/{}/", site)), "{}", line);

        if previous != Some(source) {
            *blocks.entry(source.to_string()).or_insert(0) += 1;
        }
        previous = Some(source);
    }
    assert_eq!(blocks.len(), seed_count);
    assert!(blocks.values().all(|&count| count == 1));
}

#[tokio::test]
async fn test_duplicate_seeds_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(&mock_server, "/", 200, r#"<a href="/x">x</a>"#.to_string()).await;

    let seeds = parse_seeds(&format!("{0}\n  {0}\n\n{0}  \n", base_url));
    assert_eq!(seeds.len(), 1);

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("foundurls.txt");
    let config = create_test_config(&out);

    let report = run(&config, seeds).await.expect("Harvest failed");
    assert_eq!(report.seeds, 1);
    assert_eq!(read_output(&out).len(), 2);
}

#[tokio::test]
async fn test_harvest_from_config_and_seed_files() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(
        &mock_server,
        "/home",
        200,
        format!(
            r#"<a href="about">About</a><a href="{}/contact">Contact</a><a href="https://other.org/">Other</a>"#,
            base_url
        ),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let seeds_path = dir.path().join("urls.txt");
    let out_path = dir.path().join("foundurls.txt");
    let config_path = dir.path().join("harvest.toml");

    std::fs::write(&seeds_path, format!("# seeds\n{}/home\n", base_url)).unwrap();
    std::fs::write(
        &config_path,
        format!(
            r#"
[http]
request-timeout-secs = 5
connect-timeout-secs = 2

[input]
seeds-path = "{}"

[output]
output-path = "{}"
"#,
            seeds_path.display(),
            out_path.display()
        ),
    )
    .unwrap();

    let config = load_config(&config_path).expect("Failed to load config");
    let seeds = read_seeds(&config.input.seeds_path).expect("Failed to read seeds");
    let report = run(&config, seeds).await.expect("Harvest failed");

    assert_eq!(report.records_written, 3);
    let lines = read_output(&out_path);
    let source = format!("{}/home", base_url);
    assert!(lines.contains(&format!("{} -> {}/about", source, base_url)));
    assert!(lines.contains(&format!("{} -> {}/contact", source, base_url)));
    assert!(lines.contains(&format!("{} -> https://other.org/", source)));
}
