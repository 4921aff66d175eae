use harvest_engine::{build_client, HttpSettings, RequestRetrier};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    harvest_logging::initialize_for_tests();
}

fn retrier() -> RequestRetrier {
    RequestRetrier::new(build_client(&HttpSettings::default()).unwrap())
}

#[tokio::test]
async fn retries_until_success_and_rebuilds_each_attempt() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("finally"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/flaky", server.uri());
    let mut built = 0;
    let body = retrier()
        .execute(|client| {
            built += 1;
            client.get(&url)
        })
        .await;

    assert_eq!(body, "finally");
    assert_eq!(built, 3);
}

#[tokio::test]
async fn first_success_is_returned_without_retry() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/ok", server.uri());
    let mut built = 0;
    let body = retrier()
        .execute(|client| {
            built += 1;
            client.get(&url)
        })
        .await;

    assert_eq!(body, "{}");
    assert_eq!(built, 1);
}

#[tokio::test]
async fn client_errors_are_retried_too() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/denied"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error": 401}"#))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/denied"))
        .respond_with(ResponseTemplate::new(200).set_body_string("let in"))
        .mount(&server)
        .await;

    let url = format!("{}/denied", server.uri());
    let body = retrier().execute(|client| client.get(&url)).await;
    assert_eq!(body, "let in");
}
