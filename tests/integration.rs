use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use hangar::models::{NewMachine, NewService};
use hangar::persistence::relational::{MachineRelationalPersistence, ServiceRelationalPersistence};
use hangar::services::{MachineService, ServiceService};

// Single connection so the in-memory database is shared for the whole test.
async fn migrated_pool() -> Arc<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    hangar::schema::migrate(&pool).await.unwrap();

    Arc::new(pool)
}

#[tokio::test]
async fn test_e2e() {
    let db = migrated_pool().await;

    hangar::schema::verify(&db).await.unwrap();

    let service_service = ServiceService {
        persistence: Box::new(ServiceRelationalPersistence {
            db: Arc::clone(&db),
        }),
    };

    let machine_service = MachineService {
        persistence: Box::new(MachineRelationalPersistence {
            db: Arc::clone(&db),
        }),
    };

    // create a service
    let billing = service_service
        .create(NewService {
            name: Some("billing".to_string()),
            scale: Some(2),
            cpu: Some(2),
            ram: Some(4096),
            disk: Some(32),
            hostname: Some("billing".to_string()),
            domain: Some("example.com".to_string()),
        })
        .await
        .unwrap();

    assert!(billing.id > 0);
    assert_eq!(billing.created_at, billing.updated_at);

    // create two machines referencing it
    for vmid in [101, 102] {
        machine_service
            .create(NewMachine {
                hostname: Some(format!("pve-node-{vmid}")),
                ip_address: Some(format!("10.0.0.{vmid}")),
                vmid: Some(vmid),
                cpu: Some(2),
                ram: Some(4096),
                disk: Some(32),
                service_id: Some(billing.id),
            })
            .await
            .unwrap();
    }

    let billing_machines = machine_service.get_by_service_id(billing.id).await.unwrap();
    assert_eq!(billing_machines.len(), 2);

    // nothing stops a machine from referencing a service that does not exist
    let dangling_machine = machine_service
        .create(NewMachine {
            hostname: Some("pve-node-200".to_string()),
            service_id: Some(billing.id + 1000),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(dangling_machine.service_id, Some(billing.id + 1000));

    // no uniqueness constraints anywhere: duplicate names are accepted
    let second_billing = service_service
        .create(NewService {
            name: Some("billing".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_ne!(second_billing.id, billing.id);

    let billing_services = service_service.get_by_name("billing").await.unwrap();
    assert_eq!(billing_services.len(), 2);

    // update the desired scale
    let mut scaled_billing = billing.clone();
    scaled_billing.scale = Some(4);
    let scaled_billing = service_service.update(&scaled_billing).await.unwrap();
    assert_eq!(scaled_billing.scale, Some(4));
    assert_eq!(scaled_billing.created_at, billing.created_at);
    assert!(scaled_billing.updated_at >= billing.updated_at);

    // timestamps survive the round trip through the database intact
    let refetched_billing = service_service
        .get_by_id(billing.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refetched_billing.updated_at, scaled_billing.updated_at);

    // deleting the service leaves its machines behind, references dangling
    service_service.delete(billing.id).await.unwrap();

    let orphaned_machines = machine_service.get_by_service_id(billing.id).await.unwrap();
    assert_eq!(orphaned_machines.len(), 2);
    assert!(service_service
        .get_by_id(billing.id)
        .await
        .unwrap()
        .is_none());

    // machine with every business column NULL is valid
    let empty_machine = machine_service.create(NewMachine::default()).await.unwrap();
    assert_eq!(empty_machine.hostname, None);

    let machines = machine_service.list().await.unwrap();
    assert_eq!(machines.len(), 4);

    // the schema still verifies after use
    hangar::schema::verify(&db).await.unwrap();
}
