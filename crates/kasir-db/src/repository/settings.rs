//! # Settings Repository
//!
//! The singleton store-identity record: name, address, phone, and the
//! receipt footer line. Read and written wholesale; reads fall back to a
//! canned default until the cashier saves their own.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use kasir_core::AppSettings;

/// Raw settings row.
#[derive(Debug, sqlx::FromRow)]
struct SettingsRow {
    app_name: String,
    address: String,
    phone: String,
    receipt_footer: String,
}

impl From<SettingsRow> for AppSettings {
    fn from(row: SettingsRow) -> AppSettings {
        AppSettings {
            app_name: row.app_name,
            address: row.address,
            phone: row.phone,
            receipt_footer: row.receipt_footer,
        }
    }
}

/// Repository for the application settings record.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Loads the settings record, or the default when none was saved yet.
    pub async fn load(&self) -> DbResult<AppSettings> {
        let row: Option<SettingsRow> = sqlx::query_as(
            "SELECT app_name, address, phone, receipt_footer FROM settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AppSettings::from).unwrap_or_default())
    }

    /// Overwrites the settings record wholesale.
    pub async fn save(&self, settings: &AppSettings) -> DbResult<()> {
        debug!(app_name = %settings.app_name, "Saving settings");

        sqlx::query(
            r#"
            INSERT INTO settings (id, app_name, address, phone, receipt_footer)
            VALUES (1, ?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                app_name = excluded.app_name,
                address = excluded.address,
                phone = excluded.phone,
                receipt_footer = excluded.receipt_footer
            "#,
        )
        .bind(&settings.app_name)
        .bind(&settings.address)
        .bind(&settings.phone)
        .bind(&settings.receipt_footer)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
