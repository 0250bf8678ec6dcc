// End-to-end tests for execute_check against a mock site

use sitecheck_core::{CheckError, CheckOptions, RunConfig, build_checker, execute_check};
use sitecheck_scanner::{
    FailureRecording, HttpValidator, PauseToken, StatusRecord, TraversalOrder,
};
use std::sync::{Arc, Mutex};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn mount_site(mock_server: &MockServer, pages: &[(&str, u16)], extra_locs: &[String]) {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
    );
    for (page, status) in pages {
        xml.push_str(&format!("<url><loc>{}{}</loc></url>", mock_server.uri(), page));
        Mock::given(method("GET"))
            .and(path(*page))
            .respond_with(ResponseTemplate::new(*status))
            .expect(1)
            .mount(mock_server)
            .await;
    }
    for loc in extra_locs {
        xml.push_str(&format!("<url><loc>{}</loc></url>", loc));
    }
    xml.push_str("</urlset>");

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/xml")
                .set_body_string(xml),
        )
        .mount(mock_server)
        .await;
}

fn options(mock_server: &MockServer, concurrency: usize) -> CheckOptions {
    CheckOptions {
        config: RunConfig::new(
            &format!("{}/sitemap.xml", mock_server.uri()),
            concurrency,
            260,
            TraversalOrder::Sequential,
        )
        .unwrap(),
        progress: None,
    }
}

#[tokio::test]
async fn test_execute_check_sequential_example() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, &[("/a", 200), ("/b", 404)], &[]).await;

    let results = execute_check(options(&mock_server, 1), PauseToken::new(), None)
        .await
        .unwrap();

    let a = format!("{}/a", mock_server.uri());
    let b = format!("{}/b", mock_server.uri());
    assert_eq!(
        results.all,
        vec![StatusRecord::new(a, 200), StatusRecord::new(b.clone(), 404)]
    );
    assert_eq!(results.non_success, vec![StatusRecord::new(b, 404)]);
    assert_eq!(results.histogram.get(200), 1);
    assert_eq!(results.histogram.get(404), 1);
}

#[tokio::test]
async fn test_execute_check_reports_lifecycle_messages() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, &[("/", 200)], &[]).await;

    let messages = Arc::new(Mutex::new(Vec::new()));
    let messages_clone = messages.clone();
    let callback = Arc::new(move |msg: String| {
        messages_clone.lock().unwrap().push(msg);
    });

    execute_check(options(&mock_server, 1), PauseToken::new(), Some(callback))
        .await
        .unwrap();

    let messages = messages.lock().unwrap();
    assert!(messages[0].starts_with("Fetching sitemap"));
    assert_eq!(messages[1], "Found 1 URLs");
}

#[tokio::test]
async fn test_execute_check_many_pages_with_workers() {
    let mock_server = MockServer::start().await;
    let pages: Vec<(String, u16)> = (0..12)
        .map(|i| (format!("/page{}", i), if i % 4 == 0 { 503 } else { 200 }))
        .collect();
    let page_refs: Vec<(&str, u16)> = pages.iter().map(|(p, s)| (p.as_str(), *s)).collect();
    mount_site(&mock_server, &page_refs, &[]).await;

    let results = execute_check(options(&mock_server, 4), PauseToken::new(), None)
        .await
        .unwrap();

    assert_eq!(results.processed, 12);
    assert_eq!(results.total, 12);
    assert_eq!(results.histogram.total(), 12);
    assert_eq!(results.histogram.get(503), 3);
    assert_eq!(results.all.len(), 12);
    assert_eq!(results.non_success.len(), 3);
}

#[tokio::test]
async fn test_execute_check_unreachable_page() {
    let mock_server = MockServer::start().await;
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead = format!("http://{}/gone", listener.local_addr().unwrap());
    drop(listener);
    mount_site(&mock_server, &[("/", 200)], &[dead.clone()]).await;

    let results = execute_check(options(&mock_server, 2), PauseToken::new(), None)
        .await
        .unwrap();

    assert_eq!(results.processed, 2);
    assert_eq!(results.all, vec![StatusRecord::new(format!("{}/", mock_server.uri()), 200)]);
    assert_eq!(results.non_success, vec![StatusRecord::new(dead, 500)]);
}

#[tokio::test]
async fn test_execute_check_missing_sitemap() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let result = execute_check(options(&mock_server, 1), PauseToken::new(), None).await;

    assert!(matches!(
        result,
        Err(CheckError::SitemapStatus { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_build_checker_applies_config() {
    let mock_server = MockServer::start().await;
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);

    let config = RunConfig::new(
        &format!("{}/sitemap.xml", mock_server.uri()),
        1,
        260,
        TraversalOrder::Sequential,
    )
    .unwrap()
    .with_failure_recording(FailureRecording::Everywhere);

    let checker = build_checker(&config, HttpValidator::new().unwrap());
    let results = checker.run(vec![dead.clone()]).await.unwrap();

    assert_eq!(results.all, vec![StatusRecord::new(dead, 500)]);
}
