//! Modelo de Report
//!
//! Reportes de baches con geolocalización. Relación de solo lectura con
//! Worker y Vehicle a través de las referencias reported_by_*.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del reporte - mapea al ENUM report_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Reported,
    InProgress,
    Resolved,
}

/// Severidad del bache - mapea al ENUM report_severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "report_severity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Report - mapea exactamente a la tabla reports
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub status: ReportStatus,
    pub severity: Severity,
    pub comments: Option<String>,
    pub images: Vec<String>,
    pub reported_by_worker_id: Option<Uuid>,
    pub reported_by_vehicle_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
