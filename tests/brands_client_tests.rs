//! Typed Brands client against the in-process service.

mod common;

use brands_contract::brands::{ApiOutcome, BrandUpdate, BrandsClient, NewBrand, messages};
use brands_contract::fixtures::BrandFixture;
use common::{MockBrandsServer, http_client};

fn new_brand(fixture: &BrandFixture) -> NewBrand {
    NewBrand {
        name: fixture.name.clone(),
        slug: fixture.slug.clone(),
    }
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let server = MockBrandsServer::spawn().await;
    let client = BrandsClient::new(http_client(&server.base_url));
    let fixture = BrandFixture::generate();

    let created = client
        .create(&new_brand(&fixture))
        .await
        .unwrap()
        .success()
        .expect("brand should be created");
    assert_eq!(created.name, fixture.name);
    assert_eq!(created.slug, fixture.slug);
    assert!(!created.id.is_empty());

    let fetched = client.get(&created.id).await.unwrap();
    assert_eq!(fetched, ApiOutcome::Success(created));
}

#[tokio::test]
async fn test_create_duplicate_slug_is_invalid() {
    let server = MockBrandsServer::spawn().await;
    let client = BrandsClient::new(http_client(&server.base_url));
    let brand = new_brand(&BrandFixture::generate());

    assert!(client.create(&brand).await.unwrap().success().is_some());

    match client.create(&brand).await.unwrap() {
        ApiOutcome::Invalid(errors) => {
            assert_eq!(errors["slug"], vec![messages::SLUG_TAKEN.to_string()]);
            assert!(!errors.contains_key("name"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_unknown_brand_is_not_found() {
    let server = MockBrandsServer::spawn().await;
    let client = BrandsClient::new(http_client(&server.base_url));

    let outcome = client.get("01JK0XXX0XXX0XXX0XXX0XXX").await.unwrap();
    assert_eq!(outcome, ApiOutcome::NotFound(messages::NOT_FOUND.to_string()));
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let server = MockBrandsServer::spawn().await;
    let client = BrandsClient::new(http_client(&server.base_url));
    let fixture = BrandFixture::generate();

    let created = client
        .create(&new_brand(&fixture))
        .await
        .unwrap()
        .success()
        .unwrap();

    let update = BrandUpdate {
        name: Some("Renamed Brand".into()),
        slug: None,
    };
    let outcome = client.update(&created.id, &update).await.unwrap();
    assert_eq!(outcome.success().map(|o| o.success), Some(true));

    let stored = server.brand(&created.id).unwrap();
    assert_eq!(stored.name, "Renamed Brand");
    assert_eq!(stored.slug, fixture.slug);
}

#[tokio::test]
async fn test_update_unknown_brand_reports_no_success() {
    let server = MockBrandsServer::spawn().await;
    let client = BrandsClient::new(http_client(&server.base_url));

    let update = BrandUpdate {
        name: Some("Nobody".into()),
        slug: Some("nobody".into()),
    };
    let outcome = client.update("01421421321312312", &update).await.unwrap();
    assert_eq!(outcome.success().map(|o| o.success), Some(false));
}

#[tokio::test]
async fn test_update_with_bad_slug_is_invalid() {
    let server = MockBrandsServer::spawn().await;
    let client = BrandsClient::new(http_client(&server.base_url));
    let created = client
        .create(&new_brand(&BrandFixture::generate()))
        .await
        .unwrap()
        .success()
        .unwrap();

    let update = BrandUpdate {
        name: None,
        slug: Some("Slug with space".into()),
    };
    match client.update(&created.id, &update).await.unwrap() {
        ApiOutcome::Invalid(errors) => {
            assert!(errors["slug"].contains(&messages::SLUG_CHARSET.to_string()));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}
