#![forbid(unsafe_code)]
//! Cabiplan — bibliothèque de planning quotidien de cabinets (sans BD).
//!
//! - Stockage fichiers (JSON/CSV).
//! - Statut journalier : affectation > repos hebdo > congé approuvé > en attente.
//! - Affectation automatique au cabinet de rattachement.
//! - Circuit des congés avec référence publique `LR-…`.
//! - Dates calendaires pures (`NaiveDate`) ; horodatages en UTC.

pub mod io;
pub mod leave;
pub mod model;
pub mod receipt;
pub mod roster;
pub mod storage;

pub use leave::{
    admin_create_leave_request, approve_leave, delete_leave, leaves_for_staff, leaves_with_status,
    mark_absence, reject_leave, remove_absence, submit_leave_request, LeaveReceipt,
    MIN_REASON_LEN,
};
pub use model::{
    AbsenceReason, AssignmentId, Clinic, ClinicId, LeaveId, LeaveRequest, LeaveStatus, LeaveType,
    Registry, Role, ShiftAssignment, Staff, StaffId, UnapprovedAbsence,
};
pub use receipt::{prepare_receipt, Receipt, ReceiptRenderer, TextReceipt};
pub use roster::{
    AutoAssignReport, ClinicRoster, PlanError, Planner, StaffInRoster, StaffStatus,
    StaffWithStatus,
};
pub use storage::{JsonStorage, Storage};
