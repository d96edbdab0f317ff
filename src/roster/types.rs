use crate::model::{Clinic, Staff, StaffId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Statut journalier d'un membre du personnel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffStatus {
    Present,
    Visiting,
    WeeklyOff,
    ApprovedLeave,
    UnapprovedLeave,
    Available,
}

impl StaffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffStatus::Present => "present",
            StaffStatus::Visiting => "visiting",
            StaffStatus::WeeklyOff => "weekly_off",
            StaffStatus::ApprovedLeave => "approved_leave",
            StaffStatus::UnapprovedLeave => "unapproved_leave",
            StaffStatus::Available => "available",
        }
    }
}

/// Membre tel qu'il apparaît dans le planning d'un cabinet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffInRoster {
    pub id: StaffId,
    pub name: String,
    pub status: StaffStatus,
    pub is_visiting: bool,
}

/// Planning d'un cabinet pour une date (dérivé, jamais persisté).
///
/// Un cabinet sans personne affectée est représenté par des listes vides,
/// jamais par une erreur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicRoster {
    pub clinic: Clinic,
    pub doctors: Vec<StaffInRoster>,
    pub dental_assistants: Vec<StaffInRoster>,
    pub notes: Option<String>,
}

/// Membre annoté de son statut calculé pour la date interrogée
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffWithStatus {
    pub staff: Staff,
    pub status: StaffStatus,
}

/// Bilan de l'affectation automatique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoAssignReport {
    pub assigned_count: usize,
    pub skipped_count: usize,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("invalid date range: end must not be before start")]
    InvalidDateRange,
    #[error("invalid weekly off day: {0} (expected 0..=6)")]
    InvalidWeekday(u8),
    #[error("leave reason too short (minimum {min} characters)")]
    ReasonTooShort { min: usize },
    #[error("unknown staff: {0}")]
    UnknownStaff(String),
    #[error("inactive staff: {0}")]
    InactiveStaff(String),
    #[error("unknown clinic: {0}")]
    UnknownClinic(String),
    #[error("unknown leave request: {0}")]
    UnknownLeave(String),
    #[error("no assignment for staff {staff} at clinic {clinic} on {date}")]
    UnknownAssignment {
        clinic: String,
        staff: String,
        date: String,
    },
    #[error("no unapproved absence for staff {staff} on {date}")]
    UnknownAbsence { staff: String, date: String },
    #[error("staff {staff} already assigned to clinic {clinic} on {date}")]
    DoubleBooked {
        staff: String,
        clinic: String,
        date: String,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
