use super::{status, ClinicRoster, StaffInRoster, StaffStatus, StaffWithStatus};
use crate::model::{Registry, Role, ShiftAssignment};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Assemble le planning de chaque cabinet actif pour une date.
///
/// Cabinets parcourus par nom (ordre stable). Les affectations d'un cabinet
/// sont triées par staff_id avant le partitionnement, ce qui rend le choix
/// de la note déterministe (première note non vide).
pub(super) fn roster_for_date(registry: &Registry, date: NaiveDate) -> Vec<ClinicRoster> {
    let mut clinics: Vec<_> = registry.clinics.iter().filter(|c| c.is_active).collect();
    clinics.sort_by(|a, b| a.name.cmp(&b.name));

    clinics
        .into_iter()
        .map(|clinic| {
            let mut clinic_assignments: Vec<&ShiftAssignment> = registry
                .assignments_on(date)
                .filter(|a| a.clinic_id == clinic.id)
                .collect();
            clinic_assignments.sort_by(|a, b| a.staff_id.cmp(&b.staff_id));

            let mut doctors = Vec::new();
            let mut dental_assistants = Vec::new();
            for assignment in &clinic_assignments {
                let Some(member) = registry.find_staff_by_id(&assignment.staff_id) else {
                    // ligne orpheline : ignorée ici, le statut dégradé est
                    // rendu côté personnel non affecté
                    continue;
                };
                let entry = StaffInRoster {
                    id: member.id.clone(),
                    name: member.name.clone(),
                    status: if assignment.is_visiting {
                        StaffStatus::Visiting
                    } else {
                        StaffStatus::Present
                    },
                    is_visiting: assignment.is_visiting,
                };
                match member.role {
                    Role::Doctor => doctors.push(entry),
                    Role::DentalAssistant => dental_assistants.push(entry),
                    Role::Admin => {}
                }
            }

            let notes = clinic_assignments
                .iter()
                .find_map(|a| a.notes.clone());

            ClinicRoster {
                clinic: clinic.clone(),
                doctors,
                dental_assistants,
                notes,
            }
        })
        .collect()
}

/// Personnel actif sans affectation ce jour-là, trié par nom, annoté de son
/// statut. L'affectation étant exclue par construction, les statuts
/// possibles sont : weekly_off, approved_leave, unapproved_leave, available.
pub(super) fn unassigned_staff(registry: &Registry, date: NaiveDate) -> Vec<StaffWithStatus> {
    let assigned: BTreeSet<_> = registry.assignments_on(date).map(|a| &a.staff_id).collect();

    let mut out: Vec<StaffWithStatus> = registry
        .staff
        .iter()
        .filter(|s| s.is_active && !assigned.contains(&s.id))
        .map(|s| StaffWithStatus {
            status: status::staff_status(registry, &s.id, date),
            staff: s.clone(),
        })
        .collect();
    out.sort_by(|a, b| a.staff.name.cmp(&b.staff.name));
    out
}
