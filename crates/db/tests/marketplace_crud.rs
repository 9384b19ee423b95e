//! Integration tests for the marketplace repositories.
//!
//! Exercises the repository layer against a real PostGIS database:
//! - Tenant / manager creation and unique Cognito IDs
//! - Property creation with location and partial updates
//! - Search by floor area and lease availability
//! - Favorites and residents link tables
//! - Application submission with its lease, approval and denial
//! - Foreign key protection on property delete

use chrono::{Duration, Months, Utc};
use rentwise_core::geo::Coordinates;
use rentwise_core::search::PropertyFilter;
use rentwise_db::models::application::{ApplicationScope, CreateApplication};
use rentwise_db::models::enums::{Amenity, ApplicationStatus, Highlight, PaymentStatus, PropertyType};
use rentwise_db::models::lease::CreateLease;
use rentwise_db::models::location::CreateLocation;
use rentwise_db::models::manager::{CreateManager, UpdateManager};
use rentwise_db::models::payment::CreatePayment;
use rentwise_db::models::property::{CreateProperty, UpdateProperty};
use rentwise_db::models::tenant::{CreateTenant, UpdateTenant};
use rentwise_db::repositories::{
    ApplicationRepo, LeaseRepo, LocationRepo, ManagerRepo, PaymentRepo, PropertyRepo, TenantRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_tenant(cognito_id: &str) -> CreateTenant {
    CreateTenant {
        cognito_id: cognito_id.to_string(),
        name: "Tina Tenant".to_string(),
        email: "tina@example.com".to_string(),
        phone_number: "555-0100".to_string(),
    }
}

fn new_manager(cognito_id: &str) -> CreateManager {
    CreateManager {
        cognito_id: cognito_id.to_string(),
        name: "Max Manager".to_string(),
        email: "max@example.com".to_string(),
        phone_number: "555-0200".to_string(),
    }
}

fn new_property(manager_cognito_id: &str, name: &str) -> CreateProperty {
    CreateProperty {
        name: name.to_string(),
        description: "Sunny two-bed near the park".to_string(),
        price_per_month: 1800.0,
        security_deposit: 900.0,
        application_fee: 50.0,
        photo_urls: vec!["https://photos.example.com/properties/1-front.jpg".to_string()],
        amenities: vec![Amenity::Dishwasher, Amenity::Parking],
        highlights: vec![Highlight::GreatView],
        is_pets_allowed: true,
        is_parking_included: true,
        beds: 2,
        baths: 1.5,
        square_feet: 850,
        property_type: PropertyType::Apartment,
        manager_cognito_id: manager_cognito_id.to_string(),
        location: CreateLocation {
            address: "12 Elm Street".to_string(),
            city: "Portland".to_string(),
            state: "OR".to_string(),
            country: "United States".to_string(),
            postal_code: "97201".to_string(),
            coordinates: Coordinates::new(-122.6765, 45.5231),
        },
    }
}

fn new_application(property_id: i64, tenant_cognito_id: &str) -> CreateApplication {
    CreateApplication {
        application_date: Utc::now(),
        property_id,
        tenant_cognito_id: tenant_cognito_id.to_string(),
        name: "Tina Tenant".to_string(),
        email: "tina@example.com".to_string(),
        phone_number: "555-0100".to_string(),
        message: Some("Quiet, no smoking".to_string()),
    }
}

fn new_lease(property_id: i64, tenant_cognito_id: &str, rent: f64) -> CreateLease {
    let start = Utc::now();
    CreateLease {
        start_date: start,
        end_date: start + Months::new(12),
        rent,
        deposit: 900.0,
        property_id,
        tenant_cognito_id: tenant_cognito_id.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Test: tenants and managers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_update_tenant(pool: PgPool) {
    let tenant = TenantRepo::create(&pool, &new_tenant("t-1")).await.unwrap();
    assert_eq!(tenant.cognito_id, "t-1");

    let update = UpdateTenant {
        phone_number: Some("555-0199".to_string()),
        ..Default::default()
    };
    let updated = TenantRepo::update(&pool, "t-1", &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.phone_number, "555-0199");
    assert_eq!(updated.name, "Tina Tenant"); // unchanged

    let missing = TenantRepo::update(&pool, "nobody", &update).await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_cognito_id_rejected(pool: PgPool) {
    TenantRepo::create(&pool, &new_tenant("dup")).await.unwrap();
    let err = TenantRepo::create(&pool, &new_tenant("dup"))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_tenants_cognito_id"));

    ManagerRepo::create(&pool, &new_manager("dup-m")).await.unwrap();
    assert!(ManagerRepo::create(&pool, &new_manager("dup-m")).await.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_manager_email(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    let update = UpdateManager {
        email: Some("new@example.com".to_string()),
        ..Default::default()
    };
    let updated = ManagerRepo::update(&pool, "m-1", &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.email, "new@example.com");
}

// ---------------------------------------------------------------------------
// Test: properties
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_property_with_location(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    let listing = PropertyRepo::create(&pool, &new_property("m-1", "Elm Flat"))
        .await
        .unwrap();

    assert_eq!(listing.property.name, "Elm Flat");
    assert_eq!(listing.property.location_id, listing.location.id);
    assert_eq!(listing.property.amenities, vec![Amenity::Dishwasher, Amenity::Parking]);
    assert!((listing.location.coordinates.longitude - -122.6765).abs() < 1e-6);
    assert!((listing.location.coordinates.latitude - 45.5231).abs() < 1e-6);

    let location = LocationRepo::find_by_id(&pool, listing.location.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(location.postal_code, "97201");
    assert_eq!(location.coordinates, listing.location.coordinates);

    let detail = PropertyRepo::find_detail(&pool, listing.property.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.manager.cognito_id, "m-1");
    assert!(detail.leases.is_empty());
    assert!(detail.applications.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_property_unknown_manager_rolls_back(pool: PgPool) {
    let result = PropertyRepo::create(&pool, &new_property("ghost", "Orphan")).await;
    assert!(result.is_err());

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM locations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0, "location insert must roll back with the property");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_property_update(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    let listing = PropertyRepo::create(&pool, &new_property("m-1", "Elm Flat"))
        .await
        .unwrap();

    let update = UpdateProperty {
        price_per_month: Some(1650.0),
        highlights: Some(vec![Highlight::QuietNeighborhood, Highlight::SmokeFree]),
        ..Default::default()
    };
    let updated = PropertyRepo::update(&pool, listing.property.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.price_per_month, 1650.0);
    assert_eq!(
        updated.highlights,
        vec![Highlight::QuietNeighborhood, Highlight::SmokeFree]
    );
    assert_eq!(updated.name, "Elm Flat");
    assert_eq!(updated.amenities, listing.property.amenities);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_manager_newest_first(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    ManagerRepo::create(&pool, &new_manager("m-2")).await.unwrap();
    let first = PropertyRepo::create(&pool, &new_property("m-1", "First"))
        .await
        .unwrap();
    let second = PropertyRepo::create(&pool, &new_property("m-1", "Second"))
        .await
        .unwrap();
    PropertyRepo::create(&pool, &new_property("m-2", "Elsewhere"))
        .await
        .unwrap();

    let listings = PropertyRepo::list_by_manager(&pool, "m-1").await.unwrap();
    let ids: Vec<i64> = listings.iter().map(|l| l.property.id).collect();
    assert_eq!(ids, vec![second.property.id, first.property.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_square_feet_bounds(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    let mut ids = Vec::new();
    for (name, square_feet) in [("Studio", 400), ("Flat", 850), ("House", 1600)] {
        let input = CreateProperty {
            square_feet,
            ..new_property("m-1", name)
        };
        ids.push(PropertyRepo::create(&pool, &input).await.unwrap().property.id);
    }

    let filter = PropertyFilter {
        square_feet_min: Some(850),
        square_feet_max: Some(1600),
        ..Default::default()
    };
    let found: Vec<i64> = PropertyRepo::search(&pool, &filter)
        .await
        .unwrap()
        .iter()
        .map(|l| l.property.id)
        .collect();
    assert_eq!(found, vec![ids[2], ids[1]], "bounds are inclusive, newest first");

    let filter = PropertyFilter {
        square_feet_max: Some(399),
        ..Default::default()
    };
    assert!(PropertyRepo::search(&pool, &filter).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_available_from(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    TenantRepo::create(&pool, &new_tenant("t-1")).await.unwrap();
    let early = PropertyRepo::create(&pool, &new_property("m-1", "Early"))
        .await
        .unwrap();
    let late = PropertyRepo::create(&pool, &new_property("m-1", "Late"))
        .await
        .unwrap();
    PropertyRepo::create(&pool, &new_property("m-1", "Unleased"))
        .await
        .unwrap();

    let now = Utc::now();
    for (property_id, start) in [
        (early.property.id, now - Duration::days(30)),
        (late.property.id, now + Duration::days(30)),
    ] {
        let lease = CreateLease {
            start_date: start,
            end_date: start + Months::new(12),
            ..new_lease(property_id, "t-1", 1500.0)
        };
        LeaseRepo::create(&pool, &lease).await.unwrap();
    }

    let filter = PropertyFilter {
        available_from: Some(now),
        ..Default::default()
    };
    let found = PropertyRepo::search(&pool, &filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].property.id, early.property.id);

    let filter = PropertyFilter {
        available_from: Some(now + Duration::days(60)),
        ..Default::default()
    };
    let found = PropertyRepo::search(&pool, &filter).await.unwrap();
    assert_eq!(found.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_property_with_lease_is_blocked(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    TenantRepo::create(&pool, &new_tenant("t-1")).await.unwrap();
    let listing = PropertyRepo::create(&pool, &new_property("m-1", "Leased"))
        .await
        .unwrap();
    LeaseRepo::create(&pool, &new_lease(listing.property.id, "t-1", 1800.0))
        .await
        .unwrap();

    let err = PropertyRepo::delete(&pool, listing.property.id)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("fk_leases_property"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_unreferenced_property(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    let listing = PropertyRepo::create(&pool, &new_property("m-1", "Vacant"))
        .await
        .unwrap();

    let deleted = PropertyRepo::delete(&pool, listing.property.id)
        .await
        .unwrap();
    assert_eq!(deleted.map(|p| p.id), Some(listing.property.id));
    assert!(PropertyRepo::find_by_id(&pool, listing.property.id)
        .await
        .unwrap()
        .is_none());
    assert!(PropertyRepo::delete(&pool, listing.property.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: favorites
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_favorites_are_idempotent(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    let tenant = TenantRepo::create(&pool, &new_tenant("t-1")).await.unwrap();
    let listing = PropertyRepo::create(&pool, &new_property("m-1", "Fav"))
        .await
        .unwrap();
    let property_id = listing.property.id;

    assert!(TenantRepo::add_favorite(&pool, tenant.id, property_id)
        .await
        .unwrap());
    assert!(!TenantRepo::add_favorite(&pool, tenant.id, property_id)
        .await
        .unwrap());

    let detail = TenantRepo::find_detail(&pool, "t-1").await.unwrap().unwrap();
    assert_eq!(detail.favorites.len(), 1);
    assert_eq!(detail.favorites[0].property.id, property_id);

    assert!(TenantRepo::remove_favorite(&pool, tenant.id, property_id)
        .await
        .unwrap());
    assert!(!TenantRepo::remove_favorite(&pool, tenant.id, property_id)
        .await
        .unwrap());
}

// ---------------------------------------------------------------------------
// Test: applications and leases
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_application_created_with_lease(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    TenantRepo::create(&pool, &new_tenant("t-1")).await.unwrap();
    let listing = PropertyRepo::create(&pool, &new_property("m-1", "Elm Flat"))
        .await
        .unwrap();
    let property_id = listing.property.id;

    let detail = ApplicationRepo::create_with_lease(
        &pool,
        &new_application(property_id, "t-1"),
        &new_lease(property_id, "t-1", 1800.0),
    )
    .await
    .unwrap();

    assert_eq!(detail.application.status, ApplicationStatus::Pending);
    assert_eq!(detail.tenant.cognito_id, "t-1");
    assert_eq!(detail.property.id, property_id);
    let lease = detail.lease.expect("lease created with the application");
    assert_eq!(detail.application.lease_id, Some(lease.id));
    assert_eq!(lease.rent, 1800.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_application_for_unknown_property_writes_nothing(pool: PgPool) {
    TenantRepo::create(&pool, &new_tenant("t-1")).await.unwrap();
    let result = ApplicationRepo::create_with_lease(
        &pool,
        &new_application(9999, "t-1"),
        &new_lease(9999, "t-1", 1000.0),
    )
    .await;
    assert!(result.is_err());
    assert!(LeaseRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approve_creates_lease_and_adds_resident(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    TenantRepo::create(&pool, &new_tenant("t-1")).await.unwrap();
    let listing = PropertyRepo::create(&pool, &new_property("m-1", "Elm Flat"))
        .await
        .unwrap();
    let property_id = listing.property.id;
    let created = ApplicationRepo::create_with_lease(
        &pool,
        &new_application(property_id, "t-1"),
        &new_lease(property_id, "t-1", 1800.0),
    )
    .await
    .unwrap();

    let approved = ApplicationRepo::approve(
        &pool,
        created.application.id,
        &new_lease(property_id, "t-1", 1850.0),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(approved.status, ApplicationStatus::Approved);
    let lease_id = approved.lease_id.expect("approval links a lease");
    assert_ne!(Some(lease_id), created.application.lease_id);
    assert_eq!(LeaseRepo::list(&pool).await.unwrap().len(), 2);
    let lease = LeaseRepo::find_by_id(&pool, lease_id).await.unwrap().unwrap();
    assert_eq!(lease.rent, 1850.0);

    let tenant = TenantRepo::find_detail(&pool, "t-1").await.unwrap().unwrap();
    assert_eq!(tenant.properties.len(), 1);
    assert_eq!(tenant.properties[0].property.id, property_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approve_application_without_lease(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    TenantRepo::create(&pool, &new_tenant("t-1")).await.unwrap();
    let listing = PropertyRepo::create(&pool, &new_property("m-1", "Elm Flat"))
        .await
        .unwrap();
    let property_id = listing.property.id;
    let created = ApplicationRepo::create_with_lease(
        &pool,
        &new_application(property_id, "t-1"),
        &new_lease(property_id, "t-1", 1800.0),
    )
    .await
    .unwrap();
    sqlx::query("UPDATE applications SET lease_id = NULL WHERE id = $1")
        .bind(created.application.id)
        .execute(&pool)
        .await
        .unwrap();

    let approved = ApplicationRepo::approve(
        &pool,
        created.application.id,
        &new_lease(property_id, "t-1", 1800.0),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(approved.status, ApplicationStatus::Approved);
    let lease_id = approved.lease_id.expect("approval links a lease");
    assert!(LeaseRepo::find_by_id(&pool, lease_id).await.unwrap().is_some());
    let tenant = TenantRepo::find_detail(&pool, "t-1").await.unwrap().unwrap();
    assert_eq!(tenant.properties.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approve_after_deny(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    TenantRepo::create(&pool, &new_tenant("t-1")).await.unwrap();
    let listing = PropertyRepo::create(&pool, &new_property("m-1", "Elm Flat"))
        .await
        .unwrap();
    let property_id = listing.property.id;
    let created = ApplicationRepo::create_with_lease(
        &pool,
        &new_application(property_id, "t-1"),
        &new_lease(property_id, "t-1", 1800.0),
    )
    .await
    .unwrap();
    ApplicationRepo::set_status(&pool, created.application.id, ApplicationStatus::Denied)
        .await
        .unwrap()
        .unwrap();

    let approved = ApplicationRepo::approve(
        &pool,
        created.application.id,
        &new_lease(property_id, "t-1", 1800.0),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(approved.status, ApplicationStatus::Approved);
    assert_ne!(approved.lease_id, created.application.lease_id);
    assert_eq!(LeaseRepo::list(&pool).await.unwrap().len(), 2);
    let tenant = TenantRepo::find_detail(&pool, "t-1").await.unwrap().unwrap();
    assert_eq!(tenant.properties.len(), 1);
    assert_eq!(tenant.properties[0].property.id, property_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approve_missing_application(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    TenantRepo::create(&pool, &new_tenant("t-1")).await.unwrap();
    let listing = PropertyRepo::create(&pool, &new_property("m-1", "Elm Flat"))
        .await
        .unwrap();

    let result = ApplicationRepo::approve(&pool, 4242, &new_lease(listing.property.id, "t-1", 1.0))
        .await
        .unwrap();
    assert!(result.is_none());
    assert!(LeaseRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deny_leaves_residents_untouched(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    TenantRepo::create(&pool, &new_tenant("t-1")).await.unwrap();
    let listing = PropertyRepo::create(&pool, &new_property("m-1", "Elm Flat"))
        .await
        .unwrap();
    let property_id = listing.property.id;
    let created = ApplicationRepo::create_with_lease(
        &pool,
        &new_application(property_id, "t-1"),
        &new_lease(property_id, "t-1", 1800.0),
    )
    .await
    .unwrap();

    let denied = ApplicationRepo::set_status(&pool, created.application.id, ApplicationStatus::Denied)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(denied.status, ApplicationStatus::Denied);

    let tenant = TenantRepo::find_detail(&pool, "t-1").await.unwrap().unwrap();
    assert!(tenant.properties.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_application_scopes(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    ManagerRepo::create(&pool, &new_manager("m-2")).await.unwrap();
    TenantRepo::create(&pool, &new_tenant("t-1")).await.unwrap();
    TenantRepo::create(&pool, &new_tenant("t-2")).await.unwrap();
    let a = PropertyRepo::create(&pool, &new_property("m-1", "A")).await.unwrap();
    let b = PropertyRepo::create(&pool, &new_property("m-2", "B")).await.unwrap();

    for (property_id, tenant) in [(a.property.id, "t-1"), (b.property.id, "t-1"), (b.property.id, "t-2")] {
        ApplicationRepo::create_with_lease(
            &pool,
            &new_application(property_id, tenant),
            &new_lease(property_id, tenant, 1000.0),
        )
        .await
        .unwrap();
    }

    let all = ApplicationRepo::list(&pool, &ApplicationScope::All).await.unwrap();
    assert_eq!(all.len(), 3);

    let tenant_scope = ApplicationScope::Tenant("t-1".to_string());
    let mine = ApplicationRepo::list(&pool, &tenant_scope).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|app| app.tenant_cognito_id == "t-1"));

    let manager_scope = ApplicationScope::Manager("m-2".to_string());
    let managed = ApplicationRepo::list(&pool, &manager_scope).await.unwrap();
    assert_eq!(managed.len(), 2);
    assert!(managed.iter().all(|app| app.property_id == b.property.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_application_listing_has_next_payment(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    TenantRepo::create(&pool, &new_tenant("t-1")).await.unwrap();
    let listing = PropertyRepo::create(&pool, &new_property("m-1", "Elm Flat"))
        .await
        .unwrap();
    let property_id = listing.property.id;
    ApplicationRepo::create_with_lease(
        &pool,
        &new_application(property_id, "t-1"),
        &new_lease(property_id, "t-1", 1800.0),
    )
    .await
    .unwrap();

    let now = Utc::now() + Duration::days(3);
    let listings = ApplicationRepo::list_listings(&pool, &ApplicationScope::All, now)
        .await
        .unwrap();
    assert_eq!(listings.len(), 1);

    let entry = &listings[0];
    assert_eq!(entry.property.address, "12 Elm Street");
    assert_eq!(entry.manager.cognito_id, "m-1");
    assert_eq!(entry.tenant.cognito_id, "t-1");
    let lease = entry.lease.as_ref().expect("lease present");
    let next = lease.next_payment_date.expect("next payment date");
    assert!(next > now);
    assert_eq!(next, lease.lease.start_date + Months::new(1));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_application_listings_join_the_right_rows(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    ManagerRepo::create(&pool, &new_manager("m-2")).await.unwrap();
    TenantRepo::create(&pool, &new_tenant("t-1")).await.unwrap();
    TenantRepo::create(&pool, &new_tenant("t-2")).await.unwrap();
    let a = PropertyRepo::create(&pool, &new_property("m-1", "A")).await.unwrap();
    let b = PropertyRepo::create(&pool, &new_property("m-2", "B")).await.unwrap();

    let mut submitted = Vec::new();
    for (property_id, tenant, rent) in [
        (a.property.id, "t-1", 1000.0),
        (b.property.id, "t-1", 2000.0),
        (b.property.id, "t-2", 3000.0),
    ] {
        let detail = ApplicationRepo::create_with_lease(
            &pool,
            &new_application(property_id, tenant),
            &new_lease(property_id, tenant, rent),
        )
        .await
        .unwrap();
        submitted.push(detail.application);
    }

    // Approval adds a later lease; the listing must show it.
    let approval_lease = CreateLease {
        start_date: Utc::now() + Duration::days(1),
        end_date: Utc::now() + Duration::days(1) + Months::new(12),
        ..new_lease(b.property.id, "t-2", 3100.0)
    };
    ApplicationRepo::approve(&pool, submitted[2].id, &approval_lease)
        .await
        .unwrap()
        .unwrap();

    let plain = ApplicationRepo::list(&pool, &ApplicationScope::All).await.unwrap();
    let listings = ApplicationRepo::list_listings(&pool, &ApplicationScope::All, Utc::now())
        .await
        .unwrap();
    let plain_ids: Vec<i64> = plain.iter().map(|app| app.id).collect();
    let listing_ids: Vec<i64> = listings.iter().map(|l| l.application.id).collect();
    assert_eq!(listing_ids, plain_ids, "listing keeps the application order");

    let by_id = |id: i64| listings.iter().find(|l| l.application.id == id).unwrap();

    let first = by_id(submitted[0].id);
    assert_eq!(first.property.property.name, "A");
    assert_eq!(first.manager.cognito_id, "m-1");
    assert_eq!(first.tenant.cognito_id, "t-1");
    assert_eq!(first.lease.as_ref().unwrap().lease.rent, 1000.0);

    let second = by_id(submitted[1].id);
    assert_eq!(second.manager.cognito_id, "m-2");
    assert_eq!(second.tenant.cognito_id, "t-1");
    assert_eq!(second.lease.as_ref().unwrap().lease.rent, 2000.0);

    let third = by_id(submitted[2].id);
    assert_eq!(third.tenant.cognito_id, "t-2");
    assert_eq!(third.lease.as_ref().unwrap().lease.rent, 3100.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lease_payments_and_parties(pool: PgPool) {
    ManagerRepo::create(&pool, &new_manager("m-1")).await.unwrap();
    TenantRepo::create(&pool, &new_tenant("t-1")).await.unwrap();
    let listing = PropertyRepo::create(&pool, &new_property("m-1", "Elm Flat"))
        .await
        .unwrap();
    let lease = LeaseRepo::create(&pool, &new_lease(listing.property.id, "t-1", 1800.0))
        .await
        .unwrap();

    PaymentRepo::create(
        &pool,
        &CreatePayment {
            lease_id: lease.id,
            amount_due: 1800.0,
            amount_paid: 1800.0,
            due_date: lease.start_date,
            payment_date: Some(lease.start_date),
            payment_status: PaymentStatus::Paid,
        },
    )
    .await
    .unwrap();

    let payments = PaymentRepo::list_by_lease(&pool, lease.id).await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].payment_status, PaymentStatus::Paid);

    let with_parties = LeaseRepo::list_with_parties(&pool).await.unwrap();
    assert_eq!(with_parties.len(), 1);
    assert_eq!(with_parties[0].tenant.cognito_id, "t-1");
    assert_eq!(with_parties[0].property.id, listing.property.id);

    let tenant = TenantRepo::find_detail(&pool, "t-1").await.unwrap().unwrap();
    assert_eq!(tenant.leases.len(), 1);
    assert_eq!(tenant.leases[0].payments.len(), 1);
}
