//! Device and device type repository.

use shared::pagination::PageRequest;

use crate::db::Database;
use crate::entities::{DeviceEntity, DeviceTypeEntity};
use crate::error::PersistenceError;
use crate::statement::Statement;

/// Input for inserting a device. Absent optional fields are stored as NULL.
#[derive(Debug, Clone, Default)]
pub struct NewDevice {
    pub name: String,
    pub hostname: Option<String>,
    pub ip_address: String,
    pub device_type_id: Option<i64>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Partial update of a device. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceUpdate {
    pub name: Option<String>,
    pub hostname: Option<String>,
    pub ip_address: Option<String>,
    pub device_type_id: Option<i64>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl DeviceUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.hostname.is_none()
            && self.ip_address.is_none()
            && self.device_type_id.is_none()
            && self.location.is_none()
            && self.description.is_none()
    }
}

/// Filtered, paginated device listing.
#[derive(Debug, Clone, Default)]
pub struct DeviceSearch {
    /// Case-insensitive substring matched against name, IP address and hostname.
    pub search: Option<String>,
    pub page: PageRequest,
}

/// Input for inserting a device type.
#[derive(Debug, Clone)]
pub struct NewDeviceType {
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
}

/// Repository for device-related database operations.
#[derive(Clone)]
pub struct DeviceRepository {
    db: Database,
}

impl DeviceRepository {
    /// Creates a new DeviceRepository over the given client.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All devices with their type name and icon, newest first.
    pub async fn get_devices(&self) -> Result<Vec<DeviceEntity>, PersistenceError> {
        self.db.execute_query_as(&get_devices_statement()).await
    }

    /// Find a device by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<DeviceEntity>, PersistenceError> {
        self.db.fetch_optional_as(&find_device_by_id_statement(id)).await
    }

    /// One page of devices matching the search, plus the total match count.
    pub async fn search_devices(
        &self,
        query: &DeviceSearch,
    ) -> Result<(Vec<DeviceEntity>, i64), PersistenceError> {
        let pattern = query.search.as_deref().map(like_pattern);
        let devices = self
            .db
            .execute_query_as(&search_devices_statement(pattern.as_deref(), query.page))
            .await?;
        let (total,): (i64,) = self
            .db
            .fetch_one_as(&count_devices_statement(pattern.as_deref()))
            .await?;
        Ok((devices, total))
    }

    /// Insert a device and return the stored row.
    pub async fn create_device(&self, device: &NewDevice) -> Result<DeviceEntity, PersistenceError> {
        self.db.fetch_one_as(&create_device_statement(device)).await
    }

    /// Apply a partial update. Returns `Ok(None)` when the device does not exist.
    pub async fn update_device(
        &self,
        id: i64,
        update: &DeviceUpdate,
    ) -> Result<Option<DeviceEntity>, PersistenceError> {
        let statement = update_device_statement(id, update)?;
        self.db.fetch_optional_as(&statement).await
    }

    /// Delete a device. Returns whether a row was removed.
    pub async fn delete_device(&self, id: i64) -> Result<bool, PersistenceError> {
        let affected = self.db.execute(&delete_device_statement(id)).await?;
        Ok(affected > 0)
    }

    /// All device types, by name.
    pub async fn list_device_types(&self) -> Result<Vec<DeviceTypeEntity>, PersistenceError> {
        self.db.execute_query_as(&list_device_types_statement()).await
    }

    /// Insert a device type.
    pub async fn create_device_type(
        &self,
        device_type: &NewDeviceType,
    ) -> Result<DeviceTypeEntity, PersistenceError> {
        self.db
            .fetch_one_as(&create_device_type_statement(device_type))
            .await
    }
}

const DEVICE_COLUMNS: &str = r#"
    d.id, d.name, d.hostname, d.ip_address, d.device_type_id, d.location, d.description,
    d.created_at, d.updated_at, dt.name AS device_type_name, dt.icon AS device_type_icon"#;

/// Wraps a search term in `%...%`, escaping LIKE wildcards so the term
/// matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn get_devices_statement() -> Statement {
    Statement::new(
        "get_devices",
        format!(
            r#"
            SELECT {DEVICE_COLUMNS}
            FROM devices d
            LEFT JOIN device_types dt ON d.device_type_id = dt.id
            ORDER BY d.created_at DESC, d.id DESC
            "#
        ),
    )
}

fn find_device_by_id_statement(id: i64) -> Statement {
    Statement::new(
        "find_device_by_id",
        format!(
            r#"
            SELECT {DEVICE_COLUMNS}
            FROM devices d
            LEFT JOIN device_types dt ON d.device_type_id = dt.id
            WHERE d.id = $1
            "#
        ),
    )
    .bind(id)
}

const SEARCH_FILTER: &str = r#"
    ($1::TEXT IS NULL
     OR d.name ILIKE $1
     OR d.ip_address ILIKE $1
     OR d.hostname ILIKE $1)"#;

fn search_devices_statement(pattern: Option<&str>, page: PageRequest) -> Statement {
    Statement::new(
        "search_devices",
        format!(
            r#"
            SELECT {DEVICE_COLUMNS}
            FROM devices d
            LEFT JOIN device_types dt ON d.device_type_id = dt.id
            WHERE {SEARCH_FILTER}
            ORDER BY d.created_at DESC, d.id DESC
            LIMIT $2 OFFSET $3
            "#
        ),
    )
    .bind(pattern)
    .bind(page.limit() as i64)
    .bind(page.offset())
}

fn count_devices_statement(pattern: Option<&str>) -> Statement {
    Statement::new(
        "count_devices",
        format!(
            r#"
            SELECT COUNT(*)
            FROM devices d
            WHERE {SEARCH_FILTER}
            "#
        ),
    )
    .bind(pattern)
}

fn create_device_statement(device: &NewDevice) -> Statement {
    Statement::new(
        "create_device",
        format!(
            r#"
            WITH d AS (
                INSERT INTO devices (name, hostname, ip_address, device_type_id, location, description)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            )
            SELECT {DEVICE_COLUMNS}
            FROM d
            LEFT JOIN device_types dt ON d.device_type_id = dt.id
            "#
        ),
    )
    .bind(device.name.as_str())
    .bind(device.hostname.as_deref())
    .bind(device.ip_address.as_str())
    .bind(device.device_type_id)
    .bind(device.location.as_deref())
    .bind(device.description.as_deref())
}

fn update_device_statement(id: i64, update: &DeviceUpdate) -> Result<Statement, PersistenceError> {
    if update.is_empty() {
        return Err(PersistenceError::EmptyUpdate);
    }

    Ok(Statement::new(
        "update_device",
        format!(
            r#"
            WITH d AS (
                UPDATE devices
                SET name = COALESCE($2, name),
                    hostname = COALESCE($3, hostname),
                    ip_address = COALESCE($4, ip_address),
                    device_type_id = COALESCE($5, device_type_id),
                    location = COALESCE($6, location),
                    description = COALESCE($7, description),
                    updated_at = CURRENT_TIMESTAMP
                WHERE id = $1
                RETURNING *
            )
            SELECT {DEVICE_COLUMNS}
            FROM d
            LEFT JOIN device_types dt ON d.device_type_id = dt.id
            "#
        ),
    )
    .bind(id)
    .bind(update.name.as_deref())
    .bind(update.hostname.as_deref())
    .bind(update.ip_address.as_deref())
    .bind(update.device_type_id)
    .bind(update.location.as_deref())
    .bind(update.description.as_deref()))
}

fn delete_device_statement(id: i64) -> Statement {
    Statement::new("delete_device", "DELETE FROM devices WHERE id = $1").bind(id)
}

fn list_device_types_statement() -> Statement {
    Statement::new(
        "list_device_types",
        r#"
        SELECT id, name, icon, description, created_at
        FROM device_types
        ORDER BY name
        "#,
    )
}

fn create_device_type_statement(device_type: &NewDeviceType) -> Statement {
    Statement::new(
        "create_device_type",
        r#"
        INSERT INTO device_types (name, icon, description)
        VALUES ($1, $2, $3)
        RETURNING id, name, icon, description, created_at
        "#,
    )
    .bind(device_type.name.as_str())
    .bind(device_type.icon.as_deref())
    .bind(device_type.description.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::SqlParam;

    #[test]
    fn test_get_devices_joins_type_and_orders_newest_first() {
        let stmt = get_devices_statement();
        assert!(stmt.sql().contains("LEFT JOIN device_types dt"));
        assert!(stmt.sql().contains("dt.icon AS device_type_icon"));
        assert!(stmt.sql().contains("ORDER BY d.created_at DESC"));
    }

    #[test]
    fn test_create_device_binds_omitted_fields_as_typed_nulls() {
        let device = NewDevice {
            name: "core-sw-1".to_string(),
            ip_address: "10.0.0.1".to_string(),
            ..Default::default()
        };
        let stmt = create_device_statement(&device);

        assert_eq!(
            stmt.params(),
            &[
                SqlParam::Text(Some("core-sw-1".to_string())),
                SqlParam::Text(None),
                SqlParam::Text(Some("10.0.0.1".to_string())),
                SqlParam::BigInt(None),
                SqlParam::Text(None),
                SqlParam::Text(None),
            ]
        );
        assert_eq!(stmt.max_placeholder(), 6);
    }

    #[test]
    fn test_update_device_rejects_empty_update() {
        let result = update_device_statement(1, &DeviceUpdate::default());
        assert!(matches!(result, Err(PersistenceError::EmptyUpdate)));
    }

    #[test]
    fn test_update_device_param_count_matches_placeholders() {
        let update = DeviceUpdate {
            location: Some("DC2".to_string()),
            ..Default::default()
        };
        let stmt = update_device_statement(3, &update).unwrap();
        assert_eq!(stmt.params().len(), stmt.max_placeholder());
        assert_eq!(stmt.params()[5], SqlParam::Text(Some("DC2".to_string())));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("core"), "%core%");
        assert_eq!(like_pattern("10.0_%"), "%10.0\\_\\%%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_search_devices_binds_pattern_and_page() {
        let page = PageRequest::new(Some(3), Some(25));
        let stmt = search_devices_statement(Some("%sw%"), page);

        assert_eq!(
            stmt.params(),
            &[
                SqlParam::Text(Some("%sw%".to_string())),
                SqlParam::BigInt(Some(25)),
                SqlParam::BigInt(Some(50)),
            ]
        );
        assert!(!stmt.sql().contains("%sw%"));
    }

    #[test]
    fn test_count_devices_without_search_binds_null() {
        let stmt = count_devices_statement(None);
        assert_eq!(stmt.params(), &[SqlParam::Text(None)]);
        assert_eq!(stmt.max_placeholder(), 1);
    }
}
