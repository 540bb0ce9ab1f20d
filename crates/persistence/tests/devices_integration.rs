//! Integration tests for the device repository.

mod common;

use persistence::repositories::{DeviceRepository, DeviceSearch, DeviceUpdate, NewDevice, NewDeviceType};
use persistence::PersistenceError;
use shared::pagination::PageRequest;

#[tokio::test]
async fn test_create_device_with_only_required_fields() {
    let repo = DeviceRepository::new(common::test_database().await);

    let device = repo
        .create_device(&common::new_device("core-sw-1", "10.0.0.1"))
        .await
        .unwrap();

    assert_eq!(device.name, "core-sw-1");
    assert_eq!(device.ip_address, "10.0.0.1");
    assert!(device.hostname.is_none());
    assert!(device.device_type_id.is_none());
    assert!(device.location.is_none());
    assert!(device.description.is_none());
    assert!(device.device_type_name.is_none());
}

#[tokio::test]
async fn test_create_device_joins_device_type() {
    let repo = DeviceRepository::new(common::test_database().await);
    let device_type = repo
        .create_device_type(&NewDeviceType {
            name: format!("UPS {}", common::unique_suffix()),
            icon: Some("battery".to_string()),
            description: None,
        })
        .await
        .unwrap();

    let device = repo
        .create_device(&NewDevice {
            device_type_id: Some(device_type.id),
            hostname: Some("ups-1.dc1".to_string()),
            ..common::new_device("ups-1", "10.0.5.1")
        })
        .await
        .unwrap();

    assert_eq!(device.device_type_name.as_deref(), Some(device_type.name.as_str()));
    assert_eq!(device.device_type_icon.as_deref(), Some("battery"));

    let listed = repo.get_devices().await.unwrap();
    let found = listed.iter().find(|d| d.id == device.id).unwrap();
    assert_eq!(found.device_type_name, device.device_type_name);
}

#[tokio::test]
async fn test_create_device_with_unknown_type_is_foreign_key_violation() {
    let repo = DeviceRepository::new(common::test_database().await);

    let err = repo
        .create_device(&NewDevice {
            device_type_id: Some(i64::MAX),
            ..common::new_device("orphan", "10.0.9.9")
        })
        .await
        .unwrap_err();

    assert!(err.is_foreign_key_violation());
}

#[tokio::test]
async fn test_get_devices_newest_first() {
    let repo = DeviceRepository::new(common::test_database().await);

    let older = repo.create_device(&common::new_device("edge-1", "10.1.0.1")).await.unwrap();
    let newer = repo.create_device(&common::new_device("edge-2", "10.1.0.2")).await.unwrap();

    let devices = repo.get_devices().await.unwrap();
    let position = |id: i64| devices.iter().position(|d| d.id == id).unwrap();

    assert!(position(newer.id) < position(older.id));
}

#[tokio::test]
async fn test_search_devices_matches_name_case_insensitively() {
    let repo = DeviceRepository::new(common::test_database().await);
    let tag = common::unique_suffix();

    repo.create_device(&common::new_device(&format!("Access-{tag}-a"), "10.2.0.1")).await.unwrap();
    repo.create_device(&common::new_device(&format!("access-{tag}-b"), "10.2.0.2")).await.unwrap();
    repo.create_device(&common::new_device("unrelated", "10.2.0.3")).await.unwrap();

    let (devices, total) = repo
        .search_devices(&DeviceSearch {
            search: Some(format!("ACCESS-{tag}")),
            page: PageRequest::new(Some(1), Some(1)),
        })
        .await
        .unwrap();

    assert_eq!(total, 2);
    assert_eq!(devices.len(), 1);
    assert!(devices[0].name.ends_with("-b"));
}

#[tokio::test]
async fn test_search_devices_treats_wildcards_literally() {
    let repo = DeviceRepository::new(common::test_database().await);
    let tag = common::unique_suffix();

    repo.create_device(&common::new_device(&format!("{tag}_x"), "10.3.0.1")).await.unwrap();
    repo.create_device(&common::new_device(&format!("{tag}ax"), "10.3.0.2")).await.unwrap();

    let (devices, total) = repo
        .search_devices(&DeviceSearch {
            search: Some(format!("{tag}_")),
            page: PageRequest::default(),
        })
        .await
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(devices[0].name, format!("{tag}_x"));
}

#[tokio::test]
async fn test_update_device_changes_only_given_fields() {
    let repo = DeviceRepository::new(common::test_database().await);
    let device = repo
        .create_device(&NewDevice {
            location: Some("DC1".to_string()),
            ..common::new_device("core-rtr-1", "10.4.0.1")
        })
        .await
        .unwrap();

    let updated = repo
        .update_device(
            device.id,
            &DeviceUpdate {
                ip_address: Some("10.4.0.254".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.ip_address, "10.4.0.254");
    assert_eq!(updated.location.as_deref(), Some("DC1"));
    assert_eq!(updated.name, "core-rtr-1");
}

#[tokio::test]
async fn test_update_device_rejects_empty_update() {
    let repo = DeviceRepository::new(common::test_database().await);

    let err = repo.update_device(1, &DeviceUpdate::default()).await.unwrap_err();

    assert!(matches!(err, PersistenceError::EmptyUpdate));
}

#[tokio::test]
async fn test_delete_device() {
    let repo = DeviceRepository::new(common::test_database().await);
    let device = repo.create_device(&common::new_device("tmp", "10.5.0.1")).await.unwrap();

    assert!(repo.delete_device(device.id).await.unwrap());
    assert!(repo.find_by_id(device.id).await.unwrap().is_none());
    assert!(!repo.delete_device(device.id).await.unwrap());
}

#[tokio::test]
async fn test_list_device_types_includes_seeded_types() {
    let repo = DeviceRepository::new(common::test_database().await);

    let types = repo.list_device_types().await.unwrap();

    assert!(types.iter().any(|t| t.name == "Router"));
    assert!(types.iter().any(|t| t.name == "Switch"));
}
