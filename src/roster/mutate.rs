use super::{PlanError, Planner};
use crate::model::{AssignmentId, ClinicId, ShiftAssignment, StaffId};
use chrono::NaiveDate;

pub(super) fn assign(
    planner: &mut Planner,
    clinic_id: &ClinicId,
    staff_id: &StaffId,
    date: NaiveDate,
    notes: Option<String>,
) -> Result<AssignmentId, PlanError> {
    let member = planner
        .registry
        .find_staff_by_id(staff_id)
        .ok_or_else(|| PlanError::UnknownStaff(staff_id.as_str().to_string()))?;
    if !member.is_active {
        return Err(PlanError::InactiveStaff(member.email.clone()));
    }
    let is_visiting = member.primary_clinic_id.as_ref() != Some(clinic_id);

    let clinic = planner
        .registry
        .find_clinic_by_id(clinic_id)
        .ok_or_else(|| PlanError::UnknownClinic(clinic_id.as_str().to_string()))?;
    if !clinic.is_active {
        return Err(PlanError::UnknownClinic(clinic.name.clone()));
    }

    // Unicité (clinic, staff, date) : upsert. Un même membre déjà posé
    // ailleurs le même jour est un double-booking, refusé explicitement.
    let existing_pos = planner
        .registry
        .assignments
        .iter()
        .position(|a| &a.staff_id == staff_id && a.shift_date == date);
    if let Some(pos) = existing_pos {
        if &planner.registry.assignments[pos].clinic_id != clinic_id {
            return Err(PlanError::DoubleBooked {
                staff: staff_id.as_str().to_string(),
                clinic: planner.registry.assignments[pos].clinic_id.as_str().to_string(),
                date: date.to_string(),
            });
        }
        let existing = &mut planner.registry.assignments[pos];
        existing.notes = notes;
        existing.is_visiting = is_visiting;
        return Ok(existing.id.clone());
    }

    let assignment = ShiftAssignment {
        id: AssignmentId::random(),
        clinic_id: clinic_id.clone(),
        staff_id: staff_id.clone(),
        shift_date: date,
        is_visiting,
        notes,
    };
    let id = assignment.id.clone();
    planner.registry.assignments.push(assignment);
    Ok(id)
}

pub(super) fn unassign(
    planner: &mut Planner,
    clinic_id: &ClinicId,
    staff_id: &StaffId,
    date: NaiveDate,
) -> Result<(), PlanError> {
    let before = planner.registry.assignments.len();
    planner.registry.assignments.retain(|a| {
        !(a.clinic_id == *clinic_id && a.staff_id == *staff_id && a.shift_date == date)
    });
    if planner.registry.assignments.len() == before {
        return Err(PlanError::UnknownAssignment {
            clinic: clinic_id.as_str().to_string(),
            staff: staff_id.as_str().to_string(),
            date: date.to_string(),
        });
    }
    Ok(())
}
