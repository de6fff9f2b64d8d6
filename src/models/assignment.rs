//! Modelo de Assignment
//!
//! Asignación de un trabajador a un vehículo. Una asignación se considera
//! activa mientras su progress_status sea not_started o in_progress; el
//! índice parcial assignments_one_active_per_vehicle garantiza a nivel de
//! storage que un vehículo tenga a lo sumo una activa.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Progreso de la asignación - mapea al ENUM progress_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "progress_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
    OnHold,
}

impl ProgressStatus {
    /// Una asignación activa reclama al vehículo y bloquea el borrado
    /// de sus entidades
    pub fn is_active(&self) -> bool {
        matches!(self, ProgressStatus::NotStarted | ProgressStatus::InProgress)
    }
}

/// Prioridad de la asignación - mapea al ENUM priority_level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "priority_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Assignment - mapea exactamente a la tabla assignments
#[derive(Debug, Clone, FromRow)]
pub struct Assignment {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub vehicle_id: Uuid,
    pub progress_status: ProgressStatus,
    pub priority: Priority,
    pub assigned_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_statuses() {
        assert!(ProgressStatus::NotStarted.is_active());
        assert!(ProgressStatus::InProgress.is_active());
        assert!(!ProgressStatus::Completed.is_active());
        assert!(!ProgressStatus::OnHold.is_active());
    }

    #[test]
    fn test_progress_status_serde_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&ProgressStatus::NotStarted).unwrap(),
            "\"not_started\""
        );
        let status: ProgressStatus = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(status, ProgressStatus::OnHold);
    }
}
