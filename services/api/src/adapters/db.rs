//! services/api/src/adapters/db.rs
//!
//! This module contains the history store adapter, the concrete implementation
//! of the `InteractionStore` port from the `core` crate. It keeps every completed
//! interaction in an SQLite database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use writing_assistant_core::domain::{
    InteractionRecord, NewInteraction, OperationKind, TextCategory, Tone,
};
use writing_assistant_core::error::ValidationError;
use writing_assistant_core::ports::{InteractionStore, PortError, PortResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `InteractionStore` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: SqlitePool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database at `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct InteractionRow {
    id: i64,
    created_at: DateTime<Utc>,
    operation_type: String,
    model_used: String,
    input_text: String,
    output_text: String,
    text_type: Option<String>,
    tone: String,
}

impl InteractionRow {
    fn to_domain(self) -> PortResult<InteractionRecord> {
        let invalid = |e: ValidationError| {
            PortError::InvalidRecord(format!("interaction {}: {}", self.id, e))
        };
        let operation = self.operation_type.parse::<OperationKind>().map_err(invalid)?;
        let category = self
            .text_type
            .as_deref()
            .map(str::parse::<TextCategory>)
            .transpose()
            .map_err(invalid)?;
        let tone = self.tone.parse::<Tone>().map_err(invalid)?;

        Ok(InteractionRecord {
            id: self.id,
            created_at: self.created_at,
            operation,
            model: self.model_used,
            input_text: self.input_text,
            output_text: self.output_text,
            category,
            tone,
        })
    }
}

//=========================================================================================
// `InteractionStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl InteractionStore for DbAdapter {
    async fn append(&self, interaction: NewInteraction) -> PortResult<InteractionRecord> {
        let result = sqlx::query(
            "INSERT INTO interactions (created_at, operation_type, model_used, input_text, output_text, text_type, tone) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(interaction.created_at)
        .bind(interaction.operation.key())
        .bind(&interaction.model)
        .bind(&interaction.input_text)
        .bind(&interaction.output_text)
        .bind(interaction.category.map(|c| c.key()))
        .bind(interaction.tone.key())
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(InteractionRecord {
            id: result.last_insert_rowid(),
            created_at: interaction.created_at,
            operation: interaction.operation,
            model: interaction.model,
            input_text: interaction.input_text,
            output_text: interaction.output_text,
            category: interaction.category,
            tone: interaction.tone,
        })
    }

    async fn list_recent(&self, limit: u32) -> PortResult<Vec<InteractionRecord>> {
        let rows = sqlx::query_as::<_, InteractionRow>(
            "SELECT id, created_at, operation_type, model_used, input_text, output_text, text_type, tone \
             FROM interactions ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        rows.into_iter().map(InteractionRow::to_domain).collect()
    }
}
