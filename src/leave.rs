//! Circuit des congés : soumission publique, création admin, approbation,
//! refus, suppression, et absences non approuvées.

use crate::model::{
    AbsenceReason, LeaveId, LeaveRequest, LeaveStatus, LeaveType, Registry, StaffId,
    UnapprovedAbsence,
};
use crate::roster::PlanError;
use chrono::{Datelike, NaiveDate, Utc};

/// Longueur minimale du motif après trim.
pub const MIN_REASON_LEN: usize = 5;

/// Reçu remis au demandeur après soumission.
///
/// `status_path` est un lien de type capacité : quiconque détient l'URL voit
/// l'historique de congés du membre, sans authentification. Compromis de
/// confiance assumé du produit, pas un oubli.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveReceipt {
    pub leave_id: LeaveId,
    pub reference: String,
    pub status_path: String,
}

/// Référence lisible `LR-<année>-<8 premiers caractères de l'id, majuscules>`.
pub fn reference_for(request: &LeaveRequest) -> String {
    let head: String = request
        .id
        .as_str()
        .chars()
        .take(8)
        .collect::<String>()
        .to_uppercase();
    format!("LR-{}-{}", request.created_at.year(), head)
}

/// Chemin public de consultation du statut d'un membre.
pub fn status_path_for(staff_id: &StaffId) -> String {
    format!("/my-leaves/{}", staff_id.as_str())
}

/// Soumission publique : toujours `Pending`, motif obligatoire.
/// Toute validation échoue avant la moindre écriture.
pub fn submit_leave_request(
    registry: &mut Registry,
    staff_id: &StaffId,
    start_date: NaiveDate,
    end_date: NaiveDate,
    leave_type: LeaveType,
    reason: &str,
) -> Result<LeaveReceipt, PlanError> {
    let member = registry
        .find_staff_by_id(staff_id)
        .ok_or_else(|| PlanError::UnknownStaff(staff_id.as_str().to_string()))?;
    if !member.is_active {
        return Err(PlanError::InactiveStaff(member.email.clone()));
    }
    if end_date < start_date {
        return Err(PlanError::InvalidDateRange);
    }
    let reason = reason.trim();
    if reason.len() < MIN_REASON_LEN {
        return Err(PlanError::ReasonTooShort {
            min: MIN_REASON_LEN,
        });
    }

    let request = LeaveRequest::new(
        staff_id.clone(),
        start_date,
        end_date,
        leave_type,
        Some(reason.to_string()),
        LeaveStatus::Pending,
    )
    .map_err(anyhow::Error::msg)?;

    let receipt = LeaveReceipt {
        leave_id: request.id.clone(),
        reference: reference_for(&request),
        status_path: status_path_for(staff_id),
    };
    registry.leave_requests.push(request);
    Ok(receipt)
}

/// Saisie manuelle par un admin : peut démarrer `Approved` ou `Pending`.
pub fn admin_create_leave_request(
    registry: &mut Registry,
    staff_id: &StaffId,
    start_date: NaiveDate,
    end_date: NaiveDate,
    leave_type: LeaveType,
    reason: Option<String>,
    status: LeaveStatus,
    creator_id: &StaffId,
) -> Result<LeaveId, PlanError> {
    if registry.find_staff_by_id(staff_id).is_none() {
        return Err(PlanError::UnknownStaff(staff_id.as_str().to_string()));
    }
    if registry.find_staff_by_id(creator_id).is_none() {
        return Err(PlanError::UnknownStaff(creator_id.as_str().to_string()));
    }
    if end_date < start_date {
        return Err(PlanError::InvalidDateRange);
    }

    let mut request = LeaveRequest::new(
        staff_id.clone(),
        start_date,
        end_date,
        leave_type,
        reason,
        status,
    )
    .map_err(anyhow::Error::msg)?;
    if status == LeaveStatus::Approved {
        request.approved_by = Some(creator_id.clone());
        request.approved_at = Some(Utc::now());
    }
    let id = request.id.clone();
    registry.leave_requests.push(request);
    Ok(id)
}

pub fn approve_leave(
    registry: &mut Registry,
    id: &LeaveId,
    approver_id: &StaffId,
    notes: Option<String>,
) -> Result<LeaveRequest, PlanError> {
    resolve_leave(registry, id, approver_id, LeaveStatus::Approved, notes)
}

pub fn reject_leave(
    registry: &mut Registry,
    id: &LeaveId,
    approver_id: &StaffId,
    notes: Option<String>,
) -> Result<LeaveRequest, PlanError> {
    resolve_leave(registry, id, approver_id, LeaveStatus::Rejected, notes)
}

/// Approved/rejected sont terminaux côté workflow mais restent modifiables
/// et supprimables par un admin.
fn resolve_leave(
    registry: &mut Registry,
    id: &LeaveId,
    approver_id: &StaffId,
    status: LeaveStatus,
    notes: Option<String>,
) -> Result<LeaveRequest, PlanError> {
    if registry.find_staff_by_id(approver_id).is_none() {
        return Err(PlanError::UnknownStaff(approver_id.as_str().to_string()));
    }
    let request = registry
        .find_leave_mut_by_id(id)
        .ok_or_else(|| PlanError::UnknownLeave(id.as_str().to_string()))?;

    let now = Utc::now();
    request.status = status;
    request.approved_by = Some(approver_id.clone());
    request.approved_at = Some(now);
    request.notes = notes;
    request.updated_at = now;
    Ok(request.clone())
}

pub fn delete_leave(registry: &mut Registry, id: &LeaveId) -> Result<(), PlanError> {
    let before = registry.leave_requests.len();
    registry.leave_requests.retain(|lr| &lr.id != id);
    if registry.leave_requests.len() == before {
        return Err(PlanError::UnknownLeave(id.as_str().to_string()));
    }
    Ok(())
}

/// Historique d'un membre, plus récent d'abord.
pub fn leaves_for_staff<'a>(registry: &'a Registry, staff_id: &StaffId) -> Vec<&'a LeaveRequest> {
    let mut out: Vec<&LeaveRequest> = registry
        .leave_requests
        .iter()
        .filter(|lr| &lr.staff_id == staff_id)
        .collect();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out
}

pub fn leaves_with_status(registry: &Registry, status: LeaveStatus) -> Vec<&LeaveRequest> {
    let mut out: Vec<&LeaveRequest> = registry
        .leave_requests
        .iter()
        .filter(|lr| lr.status == status)
        .collect();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out
}

/// Consigne (upsert sur staff+date) une absence non approuvée.
pub fn mark_absence(
    registry: &mut Registry,
    staff_id: &StaffId,
    date: NaiveDate,
    reason: AbsenceReason,
    notes: Option<String>,
    marker_id: &StaffId,
) -> Result<(), PlanError> {
    if registry.find_staff_by_id(staff_id).is_none() {
        return Err(PlanError::UnknownStaff(staff_id.as_str().to_string()));
    }
    if registry.find_staff_by_id(marker_id).is_none() {
        return Err(PlanError::UnknownStaff(marker_id.as_str().to_string()));
    }

    if let Some(existing) = registry
        .absences
        .iter_mut()
        .find(|ab| &ab.staff_id == staff_id && ab.absence_date == date)
    {
        existing.reason = reason;
        existing.notes = notes;
        existing.marked_by = marker_id.clone();
        return Ok(());
    }

    registry.absences.push(UnapprovedAbsence {
        staff_id: staff_id.clone(),
        absence_date: date,
        reason,
        notes,
        marked_by: marker_id.clone(),
    });
    Ok(())
}

pub fn remove_absence(
    registry: &mut Registry,
    staff_id: &StaffId,
    date: NaiveDate,
) -> Result<(), PlanError> {
    let before = registry.absences.len();
    registry
        .absences
        .retain(|ab| !(&ab.staff_id == staff_id && ab.absence_date == date));
    if registry.absences.len() == before {
        return Err(PlanError::UnknownAbsence {
            staff: staff_id.as_str().to_string(),
            date: date.to_string(),
        });
    }
    Ok(())
}
