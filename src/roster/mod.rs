mod assemble;
mod auto;
mod mutate;
mod status;
mod types;
mod util;

pub use types::{
    AutoAssignReport, ClinicRoster, PlanError, StaffInRoster, StaffStatus, StaffWithStatus,
};

use crate::model::{AssignmentId, ClinicId, Registry, StaffId};
use chrono::NaiveDate;

/// Planner : encapsule le Registry et porte toutes les opérations de planning
#[derive(Debug, Default)]
pub struct Planner {
    registry: Registry,
}

impl Planner {
    pub fn new() -> Self {
        Self {
            registry: Registry::default(),
        }
    }

    pub fn from_registry(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Statut d'un membre pour une date (fonction pure, jamais d'erreur).
    pub fn staff_status(&self, staff_id: &StaffId, date: NaiveDate) -> StaffStatus {
        status::staff_status(&self.registry, staff_id, date)
    }

    /// Planning par cabinet pour une date.
    pub fn roster_for_date(&self, date: NaiveDate) -> Vec<ClinicRoster> {
        assemble::roster_for_date(&self.registry, date)
    }

    /// Personnel actif non affecté pour une date, avec statut.
    pub fn unassigned_staff(&self, date: NaiveDate) -> Vec<StaffWithStatus> {
        assemble::unassigned_staff(&self.registry, date)
    }

    /// Affecte (upsert) un membre à un cabinet pour une date.
    pub fn assign(
        &mut self,
        clinic_id: &ClinicId,
        staff_id: &StaffId,
        date: NaiveDate,
        notes: Option<String>,
    ) -> Result<AssignmentId, PlanError> {
        mutate::assign(self, clinic_id, staff_id, date, notes)
    }

    /// Retire une affectation.
    pub fn unassign(
        &mut self,
        clinic_id: &ClinicId,
        staff_id: &StaffId,
        date: NaiveDate,
    ) -> Result<(), PlanError> {
        mutate::unassign(self, clinic_id, staff_id, date)
    }

    /// Affectation automatique au cabinet de rattachement.
    pub fn auto_assign_to_primary_clinics(
        &mut self,
        date: NaiveDate,
    ) -> Result<AutoAssignReport, PlanError> {
        auto::auto_assign_to_primary_clinics(self, date)
    }
}
