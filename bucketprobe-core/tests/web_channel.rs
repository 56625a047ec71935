//! Web channel behaviour against canned HTTP responses.

use bucketprobe_core::{
    Endpoint, ScanConfig, ScanContext, Scheme, WriteProbe, web_probe::probe_endpoint,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTABLE_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Name>acme</Name>
  <Contents><Key>readme.txt</Key></Contents>
</ListBucketResult>"#;

const DENIED_BODY: &str =
    "<Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>";

const MISSING_BODY: &str =
    "<Error><Code>NoSuchBucket</Code><Message>The specified bucket does not exist</Message></Error>";

fn endpoint_at(server: &MockServer, bucket: &str) -> Endpoint {
    Endpoint {
        scheme: Scheme::Http,
        host: server.address().to_string(),
        path: Some(bucket.to_string()),
        bucket: bucket.to_string(),
        region: None,
    }
}

fn context(config: ScanConfig) -> ScanContext {
    ScanContext::new("acme", config).expect("client construction")
}

#[tokio::test]
async fn listable_response_is_recorded_as_finding() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTABLE_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(ScanConfig::default());
    probe_endpoint(&ctx, endpoint_at(&server, "acme")).await;

    let snapshot = ctx.ledger.snapshot();
    assert!(snapshot.contains_key("acme"));
    assert!(ctx.ledger.base_found());
}

#[tokio::test]
async fn denied_but_present_is_recorded_as_finding() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/acme-dev"))
        .respond_with(ResponseTemplate::new(403).set_body_string(DENIED_BODY))
        .mount(&server)
        .await;

    let ctx = context(ScanConfig::default());
    probe_endpoint(&ctx, endpoint_at(&server, "acme-dev")).await;

    assert!(ctx.ledger.snapshot().contains_key("acme-dev"));
    // the variation, not the base, was found
    assert!(!ctx.ledger.base_found());
}

#[tokio::test]
async fn missing_bucket_is_checked_but_not_recorded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/acme"))
        .respond_with(ResponseTemplate::new(404).set_body_string(MISSING_BODY))
        .mount(&server)
        .await;

    let ctx = context(ScanConfig::default());
    probe_endpoint(&ctx, endpoint_at(&server, "acme")).await;

    assert!(ctx.ledger.snapshot().is_empty());
    assert_eq!(ctx.ledger.checked_count(), 1);
}

#[tokio::test]
async fn an_endpoint_is_probed_at_most_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTABLE_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(ScanConfig::default());
    probe_endpoint(&ctx, endpoint_at(&server, "acme")).await;
    probe_endpoint(&ctx, endpoint_at(&server, "acme")).await;

    assert_eq!(ctx.ledger.checked_count(), 1);
}

#[tokio::test]
async fn pair_found_by_other_channel_is_not_reprobed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTABLE_BODY))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = context(ScanConfig::default());
    // the tool channel already confirmed this pair
    ctx.ledger.record_finding("acme", None);
    probe_endpoint(&ctx, endpoint_at(&server, "acme")).await;
}

#[tokio::test]
async fn cancellation_before_start_touches_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTABLE_BODY))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = context(ScanConfig::default());
    ctx.request_stop();
    probe_endpoint(&ctx, endpoint_at(&server, "acme")).await;

    assert_eq!(ctx.ledger.checked_count(), 0);
    assert!(ctx.ledger.snapshot().is_empty());
}

#[tokio::test]
async fn write_checks_record_unlistable_but_writable_bucket() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/acme"))
        .respond_with(ResponseTemplate::new(404).set_body_string(MISSING_BODY))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/acme/bucketprobe-write-check.txt"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/acme/bucketprobe-write-check.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("bucketprobe write check\n"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/acme/bucketprobe-write-check.txt"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let config = ScanConfig {
        write_probe: Some(WriteProbe {
            verify_get: true,
            delete_after: true,
            ..WriteProbe::default()
        }),
        ..ScanConfig::default()
    };
    let ctx = context(config);
    probe_endpoint(&ctx, endpoint_at(&server, "acme")).await;

    assert!(ctx.ledger.snapshot().contains_key("acme"));
}

#[tokio::test]
async fn refused_put_gates_get_and_delete() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/acme"))
        .respond_with(ResponseTemplate::new(404).set_body_string(MISSING_BODY))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/acme/bucketprobe-write-check.txt"))
        .respond_with(ResponseTemplate::new(403).set_body_string(DENIED_BODY))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let config = ScanConfig {
        write_probe: Some(WriteProbe {
            verify_get: true,
            delete_after: true,
            ..WriteProbe::default()
        }),
        ..ScanConfig::default()
    };
    let ctx = context(config);
    probe_endpoint(&ctx, endpoint_at(&server, "acme")).await;

    assert!(ctx.ledger.snapshot().is_empty());
}
