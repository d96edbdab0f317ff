use super::{util, StaffStatus};
use crate::model::{LeaveStatus, Registry, StaffId};
use chrono::NaiveDate;

/// Calcule le statut d'un membre pour une date. Priorité stricte :
/// affectation > repos hebdomadaire > congé approuvé > congé en attente >
/// disponible. Une fois planifié, le planning l'emporte : un membre affecté
/// n'est jamais rapporté en congé, même si une demande couvre la date.
///
/// Un id inconnu se dégrade en `UnapprovedLeave` au lieu de lever une
/// erreur : une ligne orpheline ne doit pas bloquer le rendu du reste.
pub(super) fn staff_status(registry: &Registry, staff_id: &StaffId, date: NaiveDate) -> StaffStatus {
    let Some(member) = registry.find_staff_by_id(staff_id) else {
        return StaffStatus::UnapprovedLeave;
    };

    if let Some(assignment) = registry.assignment_for(staff_id, date) {
        return if assignment.is_visiting {
            StaffStatus::Visiting
        } else {
            StaffStatus::Present
        };
    }

    if util::matches_weekly_off(member.weekly_off_day, date) {
        return StaffStatus::WeeklyOff;
    }

    if has_leave_covering(registry, staff_id, date, LeaveStatus::Approved) {
        return StaffStatus::ApprovedLeave;
    }

    if has_leave_covering(registry, staff_id, date, LeaveStatus::Pending) {
        return StaffStatus::UnapprovedLeave;
    }

    StaffStatus::Available
}

fn has_leave_covering(
    registry: &Registry,
    staff_id: &StaffId,
    date: NaiveDate,
    status: LeaveStatus,
) -> bool {
    registry
        .leave_requests
        .iter()
        .any(|lr| &lr.staff_id == staff_id && lr.status == status && lr.covers(date))
}
