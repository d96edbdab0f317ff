use super::{mutate, util, AutoAssignReport, PlanError, Planner};
use crate::model::{LeaveStatus, Staff};
use chrono::NaiveDate;

/// Affecte en une passe chaque membre actif à son cabinet de rattachement.
///
/// Zéro affectation existante pour une date est un état valide, pas une
/// erreur : c'est précisément le point de départ attendu de cette opération.
pub(super) fn auto_assign_to_primary_clinics(
    planner: &mut Planner,
    date: NaiveDate,
) -> Result<AutoAssignReport, PlanError> {
    let candidates: Vec<Staff> = planner
        .registry
        .staff
        .iter()
        .filter(|s| s.is_active)
        .cloned()
        .collect();

    let mut assigned_count = 0usize;
    let mut skipped_count = 0usize;

    for member in candidates {
        let Some(primary) = member.primary_clinic_id.clone() else {
            // admins et membres sans rattachement
            skipped_count += 1;
            continue;
        };
        if util::matches_weekly_off(member.weekly_off_day, date)
            || on_approved_leave(planner, &member, date)
            || planner.registry.assignment_for(&member.id, date).is_some()
        {
            skipped_count += 1;
            continue;
        }

        mutate::assign(planner, &primary, &member.id, date, None)?;
        assigned_count += 1;
    }

    let message = format!(
        "{assigned_count} staff assigned to their primary clinics, {skipped_count} skipped"
    );
    Ok(AutoAssignReport {
        assigned_count,
        skipped_count,
        message,
    })
}

fn on_approved_leave(planner: &Planner, member: &Staff, date: NaiveDate) -> bool {
    planner.registry.leave_requests.iter().any(|lr| {
        lr.staff_id == member.id && lr.status == LeaveStatus::Approved && lr.covers(date)
    })
}
