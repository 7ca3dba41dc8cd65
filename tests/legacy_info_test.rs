mod common;

use axum::http::Method;
use chrono::{TimeZone, Timelike, Utc};
use common::{Canned, MockRegistry, V1_MEDIA_TYPE, V2_MEDIA_TYPE, api_path, expected_basic_auth};
use nexus_registry_client::RegistryError;

fn manifest_with_config_digest(digest: &str) -> String {
    format!(
        r#"{{
            "schemaVersion": 2,
            "mediaType": "application/vnd.docker.distribution.manifest.v2+json",
            "config": {{
                "mediaType": "application/vnd.docker.container.image.v1+json",
                "size": 1512,
                "digest": "{}"
            }},
            "layers": []
        }}"#,
        digest
    )
}

#[tokio::test]
async fn test_two_hop_resolution_returns_created() {
    let registry = MockRegistry::start().await;
    registry.route(
        Method::GET,
        "app-a/manifests/v1",
        Canned::json(200, &manifest_with_config_digest("sha256:abc")),
    );
    registry.route(
        Method::GET,
        "app-a/blobs/sha256:abc",
        Canned::json(
            200,
            r#"{"architecture":"amd64","os":"linux","created":"2023-01-01T00:00:00Z","config":{}}"#,
        ),
    );

    let info = registry
        .client()
        .fetch_legacy_manifest_info("app-a", "v1")
        .await
        .unwrap();

    assert_eq!(info.name, "app-a");
    assert_eq!(info.tag, "v1");
    assert_eq!(info.schema_version, 2);
    assert_eq!(info.architecture, "amd64");
    assert_eq!(info.created, "2023-01-01T00:00:00Z");
    assert_eq!(info.created_at, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());

    let requests = registry.requests();
    assert_eq!(requests.len(), 2);

    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, api_path("app-a/manifests/v1"));
    assert_eq!(requests[0].accept, vec![V2_MEDIA_TYPE, V1_MEDIA_TYPE]);
    assert_eq!(requests[0].authorization, Some(expected_basic_auth()));

    assert_eq!(requests[1].method, "GET");
    assert_eq!(requests[1].path, api_path("app-a/blobs/sha256:abc"));
    assert_eq!(requests[1].accept, vec![V2_MEDIA_TYPE, V1_MEDIA_TYPE]);
    assert_eq!(requests[1].authorization, Some(expected_basic_auth()));
}

#[tokio::test]
async fn test_fractional_seconds_timestamp() {
    let registry = MockRegistry::start().await;
    registry.route(
        Method::GET,
        "app-a/manifests/v2",
        Canned::json(200, &manifest_with_config_digest("sha256:f00d")),
    );
    registry.route(
        Method::GET,
        "app-a/blobs/sha256:f00d",
        Canned::json(200, r#"{"created":"2024-03-15T08:45:12.345678901Z"}"#),
    );

    let info = registry
        .client()
        .fetch_legacy_manifest_info("app-a", "v2")
        .await
        .unwrap();

    assert_eq!(info.created, "2024-03-15T08:45:12.345678901Z");
    assert_eq!(info.created_at.hour(), 8);
    assert_eq!(info.created_at.nanosecond(), 345_678_901);
    assert!(info.architecture.is_empty());
}

#[tokio::test]
async fn test_missing_created_field_fails() {
    let registry = MockRegistry::start().await;
    registry.route(
        Method::GET,
        "app-a/manifests/v1",
        Canned::json(200, &manifest_with_config_digest("sha256:abc")),
    );
    registry.route(
        Method::GET,
        "app-a/blobs/sha256:abc",
        Canned::json(200, r#"{"architecture":"amd64","os":"linux"}"#),
    );

    let err = registry
        .client()
        .fetch_legacy_manifest_info("app-a", "v1")
        .await
        .unwrap_err();

    match err {
        RegistryError::MissingCreatedField { image, digest } => {
            assert_eq!(image, "app-a");
            assert_eq!(digest, "sha256:abc");
        }
        other => panic!("expected MissingCreatedField, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_config_digest_stops_after_manifest() {
    let registry = MockRegistry::start().await;
    registry.route(
        Method::GET,
        "app-a/manifests/v1",
        Canned::json(
            200,
            r#"{"schemaVersion":1,"name":"app-a","tag":"v1","architecture":"amd64","fsLayers":[]}"#,
        ),
    );

    let err = registry
        .client()
        .fetch_legacy_manifest_info("app-a", "v1")
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::MissingDigest { .. }), "got {:?}", err);
    assert_eq!(registry.requests().len(), 1);
}

#[tokio::test]
async fn test_empty_config_digest_is_missing() {
    let registry = MockRegistry::start().await;
    registry.route(
        Method::GET,
        "app-a/manifests/v1",
        Canned::json(200, &manifest_with_config_digest("")),
    );

    let err = registry
        .client()
        .fetch_legacy_manifest_info("app-a", "v1")
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::MissingDigest { .. }));
    assert_eq!(registry.requests().len(), 1);
}

#[tokio::test]
async fn test_manifest_hop_status_error() {
    let registry = MockRegistry::start().await;
    registry.route(Method::GET, "app-a/manifests/v1", Canned::status(500));

    let err = registry
        .client()
        .fetch_legacy_manifest_info("app-a", "v1")
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert_eq!(registry.requests().len(), 1);
}

#[tokio::test]
async fn test_blob_hop_status_error() {
    let registry = MockRegistry::start().await;
    registry.route(
        Method::GET,
        "app-a/manifests/v1",
        Canned::json(200, &manifest_with_config_digest("sha256:abc")),
    );

    let err = registry
        .client()
        .fetch_legacy_manifest_info("app-a", "v1")
        .await
        .unwrap_err();

    match err {
        RegistryError::UnexpectedStatus { code, .. } => assert_eq!(code, 404),
        other => panic!("expected UnexpectedStatus, got {:?}", other),
    }
    assert_eq!(registry.requests().len(), 2);
}

#[tokio::test]
async fn test_unparseable_created_is_invalid_timestamp() {
    let registry = MockRegistry::start().await;
    registry.route(
        Method::GET,
        "app-a/manifests/v1",
        Canned::json(200, &manifest_with_config_digest("sha256:abc")),
    );
    registry.route(
        Method::GET,
        "app-a/blobs/sha256:abc",
        Canned::json(200, r#"{"created":"last tuesday"}"#),
    );

    let err = registry
        .client()
        .fetch_legacy_manifest_info("app-a", "v1")
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::InvalidTimestamp { .. }));
}

#[tokio::test]
async fn test_each_call_refetches_both_hops() {
    let registry = MockRegistry::start().await;
    registry.route(
        Method::GET,
        "app-a/manifests/v1",
        Canned::json(200, &manifest_with_config_digest("sha256:abc")),
    );
    registry.route(
        Method::GET,
        "app-a/blobs/sha256:abc",
        Canned::json(200, r#"{"created":"2023-01-01T00:00:00Z"}"#),
    );

    let client = registry.client();
    client.fetch_legacy_manifest_info("app-a", "v1").await.unwrap();
    client.fetch_legacy_manifest_info("app-a", "v1").await.unwrap();

    assert_eq!(registry.requests().len(), 4);
}

#[tokio::test]
async fn test_non_ascii_config_digest_is_missing() {
    let registry = MockRegistry::start().await;
    registry.route(
        Method::GET,
        "app-a/manifests/v1",
        Canned::json(200, r#"{"schemaVersion":2,"config":{"digest":"sha256:aéééééé"}}"#),
    );

    let err = registry
        .client()
        .fetch_legacy_manifest_info("app-a", "v1")
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::MissingDigest { .. }), "got {:?}", err);
    assert_eq!(registry.requests().len(), 1);
}

#[tokio::test]
async fn test_non_object_config_is_missing_digest() {
    for body in [
        r#"{"schemaVersion":2,"config":"sha256:abc"}"#,
        r#"{"schemaVersion":2,"config":42}"#,
    ] {
        let registry = MockRegistry::start().await;
        registry.route(Method::GET, "app-a/manifests/v1", Canned::json(200, body));

        let err = registry
            .client()
            .fetch_legacy_manifest_info("app-a", "v1")
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::MissingDigest { .. }), "got {:?}", err);
        assert_eq!(registry.requests().len(), 1);
    }
}
