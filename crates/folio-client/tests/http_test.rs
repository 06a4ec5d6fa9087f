//! Content and contact clients over real HTTP

use folio_client::{
    ClientError, ContactClient, ContactConfig, ContactForm, ContentClient, ContentConfig,
    InquirySubject, ListOptions, SubmissionState, SubmissionTracker,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn content_client(server: &MockServer) -> ContentClient {
    let config = ContentConfig::new(server.uri()).unwrap();
    ContentClient::new(config).unwrap()
}

#[tokio::test]
async fn test_slug_lookup_sends_filter_and_populate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/artworks"))
        .and(query_param("filters[slug][$eq]", "ethereal-descent"))
        .and(query_param("populate", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 3, "attributes": {
                "title": "Ethereal Descent",
                "slug": "ethereal-descent",
                "year": 2023,
                "image": {"data": {"id": 1, "attributes": {"url": "/uploads/ed.jpg"}}}
            }}],
            "meta": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = content_client(&server).await;
    let artwork = client
        .artwork_by_slug("ethereal-descent")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(artwork.title.as_deref(), Some("Ethereal Descent"));
    assert_eq!(artwork.year.as_deref(), Some("2023"));
    assert_eq!(
        client.media().resolve_media(artwork.image.as_ref()),
        Some(format!("{}/uploads/ed.jpg", server.uri()))
    );
}

#[tokio::test]
async fn test_list_sends_sort_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/artworks"))
        .and(query_param("sort", "createdAt:desc"))
        .and(query_param("pagination[limit]", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = content_client(&server).await;
    let artworks = client.artworks(&ListOptions::newest(Some(4))).await.unwrap();
    assert!(artworks.is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/exhibitions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let client = content_client(&server).await;
    let err = client
        .exhibitions(&ListOptions::default())
        .await
        .unwrap_err();

    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream down");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_body_without_envelope_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let client = content_client(&server).await;
    assert!(matches!(
        client.categories().await,
        Err(ClientError::InvalidResponse(_))
    ));
}

fn form() -> ContactForm {
    ContactForm {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        subject: InquirySubject::ExhibitionInquiry,
        message: "Is the gallery open on Sundays?".into(),
    }
}

#[tokio::test]
async fn test_contact_submission() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/f/studio"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "Exhibition Inquiry",
            "message": "Is the gallery open on Sundays?"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ContactClient::new(&ContactConfig {
        endpoint: Some(format!("{}/f/studio", server.uri())),
    })
    .unwrap();
    let tracker = SubmissionTracker::new();

    assert_eq!(tracker.submit(&client, &form()).await, SubmissionState::Succeeded);
    assert_eq!(tracker.state().await, SubmissionState::Succeeded);
}

#[tokio::test]
async fn test_contact_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/f/studio"))
        .respond_with(ResponseTemplate::new(422).set_body_string("spam detected"))
        .mount(&server)
        .await;

    let client = ContactClient::new(&ContactConfig {
        endpoint: Some(format!("{}/f/studio", server.uri())),
    })
    .unwrap();

    assert!(matches!(
        client.submit(&form()).await,
        Err(ClientError::Server { status: 422, .. })
    ));
}

#[tokio::test]
async fn test_tracker_refuses_double_submit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/f/studio"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ContactClient::new(&ContactConfig {
        endpoint: Some(format!("{}/f/studio", server.uri())),
    })
    .unwrap();
    let tracker = SubmissionTracker::new();
    let inquiry = form();

    let (first, second) = tokio::join!(tracker.submit(&client, &inquiry), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        tracker.submit(&client, &inquiry).await
    });

    assert_eq!(first, SubmissionState::Succeeded);
    assert_eq!(second, SubmissionState::Pending);
    assert_eq!(tracker.state().await, SubmissionState::Succeeded);
}
