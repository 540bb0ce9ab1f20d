//! Device and device type endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::device::{
    CreateDeviceRequest, CreateDeviceTypeRequest, ListDevicesQuery, ListDevicesResponse,
    UpdateDeviceRequest,
};
use domain::models::{Device, DeviceType};
use persistence::repositories::{
    DeviceRepository, DeviceSearch, DeviceUpdate, NewDevice, NewDeviceType,
};
use shared::pagination::{PageInfo, PageRequest};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/v1/devices
///
/// Without query parameters every device is returned. With `search`,
/// `page` or `limit` the result is filtered and paginated.
pub async fn list_devices(
    State(state): State<AppState>,
    Query(query): Query<ListDevicesQuery>,
) -> Result<Json<ListDevicesResponse>, ApiError> {
    let repo = DeviceRepository::new(state.db.clone());

    if !query.is_filtered() {
        let devices = repo.get_devices().await?.into_iter().map(Device::from).collect();
        return Ok(Json(ListDevicesResponse {
            devices,
            pagination: None,
        }));
    }

    let page = PageRequest::new(query.page, query.limit);
    let search = query
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let (devices, total) = repo.search_devices(&DeviceSearch { search, page }).await?;

    Ok(Json(ListDevicesResponse {
        devices: devices.into_iter().map(Device::from).collect(),
        pagination: Some(PageInfo::new(page, total)),
    }))
}

/// GET /api/v1/devices/:device_id
pub async fn get_device(
    State(state): State<AppState>,
    Path(device_id): Path<i64>,
) -> Result<Json<Device>, ApiError> {
    let repo = DeviceRepository::new(state.db.clone());
    let device = repo
        .find_by_id(device_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Device not found".to_string()))?;

    Ok(Json(device.into()))
}

/// POST /api/v1/devices
pub async fn create_device(
    State(state): State<AppState>,
    Json(request): Json<CreateDeviceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let repo = DeviceRepository::new(state.db.clone());
    let device = repo
        .create_device(&NewDevice {
            name: request.name,
            hostname: request.hostname,
            ip_address: request.ip_address,
            device_type_id: request.device_type_id,
            location: request.location,
            description: request.description,
        })
        .await?;

    info!(device_id = device.id, ip_address = %device.ip_address, "Device created");

    Ok((StatusCode::CREATED, Json(Device::from(device))))
}

/// PATCH /api/v1/devices/:device_id
pub async fn update_device(
    State(state): State<AppState>,
    Path(device_id): Path<i64>,
    Json(request): Json<UpdateDeviceRequest>,
) -> Result<Json<Device>, ApiError> {
    request.validate()?;

    let update = DeviceUpdate {
        name: request.name,
        hostname: request.hostname,
        ip_address: request.ip_address,
        device_type_id: request.device_type_id,
        location: request.location,
        description: request.description,
    };

    let repo = DeviceRepository::new(state.db.clone());
    let device = repo
        .update_device(device_id, &update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Device not found".to_string()))?;

    info!(device_id = device.id, "Device updated");

    Ok(Json(device.into()))
}

/// DELETE /api/v1/devices/:device_id
pub async fn delete_device(
    State(state): State<AppState>,
    Path(device_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = DeviceRepository::new(state.db.clone());
    if !repo.delete_device(device_id).await? {
        return Err(ApiError::NotFound("Device not found".to_string()));
    }

    info!(device_id, "Device deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/device-types
pub async fn list_device_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<DeviceType>>, ApiError> {
    let repo = DeviceRepository::new(state.db.clone());
    let types = repo
        .list_device_types()
        .await?
        .into_iter()
        .map(DeviceType::from)
        .collect();

    Ok(Json(types))
}

/// POST /api/v1/device-types
pub async fn create_device_type(
    State(state): State<AppState>,
    Json(request): Json<CreateDeviceTypeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let repo = DeviceRepository::new(state.db.clone());
    let device_type = repo
        .create_device_type(&NewDeviceType {
            name: request.name,
            icon: request.icon,
            description: request.description,
        })
        .await?;

    info!(device_type_id = device_type.id, name = %device_type.name, "Device type created");

    Ok((StatusCode::CREATED, Json(DeviceType::from(device_type))))
}
