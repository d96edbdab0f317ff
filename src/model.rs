use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiant fort pour Clinic
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClinicId(String);

impl ClinicId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Staff
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour ShiftAssignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentId(String);

impl AssignmentId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour LeaveRequest
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaveId(String);

impl LeaveId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rôle d'un membre du personnel (match exhaustif partout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Doctor,
    DentalAssistant,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::DentalAssistant => "dental_assistant",
            Role::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doctor" | "dr" => Ok(Role::Doctor),
            "dental_assistant" | "assistant" | "da" => Ok(Role::DentalAssistant),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Cabinet (site physique)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    pub id: ClinicId,
    pub name: String,
    pub location: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Clinic {
    pub fn new<N: Into<String>, L: Into<String>>(name: N, location: L) -> Self {
        Self {
            id: ClinicId::random(),
            name: name.into(),
            location: location.into(),
            is_active: true,
        }
    }
}

/// Membre du personnel (docteur, assistant dentaire ou admin).
///
/// `weekly_off_day` : jour de repos hebdomadaire fixe, 0=dimanche … 6=samedi.
/// `primary_clinic_id` : cabinet de rattachement ; `None` uniquement pour les admins.
/// Suppression logique via `is_active=false`, jamais physique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub primary_clinic_id: Option<ClinicId>,
    #[serde(default)]
    pub weekly_off_day: Option<u8>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Staff {
    /// Crée un membre en validant `weekly_off_day <= 6`.
    pub fn new<E: Into<String>, N: Into<String>>(
        email: E,
        name: N,
        role: Role,
        primary_clinic_id: Option<ClinicId>,
        weekly_off_day: Option<u8>,
    ) -> Result<Self, String> {
        if let Some(day) = weekly_off_day {
            if day > 6 {
                return Err(format!("weekly_off_day must be 0..=6, got {day}"));
            }
        }
        Ok(Self {
            id: StaffId::random(),
            email: email.into(),
            name: name.into(),
            role,
            primary_clinic_id,
            weekly_off_day,
            is_active: true,
        })
    }
}

/// Affectation d'un membre à un cabinet pour une date (sans composante horaire).
///
/// `is_visiting` : vrai ssi le cabinet diffère du cabinet de rattachement
/// au moment de l'affectation. Unicité sur (clinic_id, staff_id, shift_date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub id: AssignmentId,
    pub clinic_id: ClinicId,
    pub staff_id: StaffId,
    pub shift_date: NaiveDate,
    pub is_visiting: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Type de congé demandé
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    Planned,
    Emergency,
}

impl std::str::FromStr for LeaveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planned" => Ok(LeaveType::Planned),
            "emergency" => Ok(LeaveType::Emergency),
            other => Err(format!("unknown leave type: {other}")),
        }
    }
}

/// Statut d'une demande de congé
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for LeaveStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(LeaveStatus::Pending),
            "approved" => Ok(LeaveStatus::Approved),
            "rejected" => Ok(LeaveStatus::Rejected),
            other => Err(format!("unknown leave status: {other}")),
        }
    }
}

/// Demande de congé (intervalle de dates inclusif).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: LeaveId,
    pub staff_id: StaffId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: LeaveType,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: LeaveStatus,
    #[serde(default)]
    pub approved_by: Option<StaffId>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Crée une demande en validant `end_date >= start_date`.
    pub fn new(
        staff_id: StaffId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        leave_type: LeaveType,
        reason: Option<String>,
        status: LeaveStatus,
    ) -> Result<Self, String> {
        if end_date < start_date {
            return Err("end_date must not be before start_date".to_string());
        }
        let now = Utc::now();
        Ok(Self {
            id: LeaveId::random(),
            staff_id,
            start_date,
            end_date,
            leave_type,
            reason,
            status,
            approved_by: None,
            approved_at: None,
            notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Bornes inclusives des deux côtés.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Motif d'une absence non approuvée
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceReason {
    NoShow,
    RejectedLeave,
}

impl AbsenceReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbsenceReason::NoShow => "no_show",
            AbsenceReason::RejectedLeave => "rejected_leave",
        }
    }
}

impl std::str::FromStr for AbsenceReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "no_show" | "no-show" => Ok(AbsenceReason::NoShow),
            "rejected_leave" => Ok(AbsenceReason::RejectedLeave),
            other => Err(format!("unknown absence reason: {other}")),
        }
    }
}

/// Absence non approuvée consignée par un admin.
///
/// Indépendante du circuit des demandes de congé (no-show, suite d'un refus).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnapprovedAbsence {
    pub staff_id: StaffId,
    pub absence_date: NaiveDate,
    pub reason: AbsenceReason,
    #[serde(default)]
    pub notes: Option<String>,
    pub marked_by: StaffId,
}

/// Registre complet (l'agrégat persisté)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Registry {
    pub clinics: Vec<Clinic>,
    pub staff: Vec<Staff>,
    pub assignments: Vec<ShiftAssignment>,
    pub leave_requests: Vec<LeaveRequest>,
    #[serde(default)]
    pub absences: Vec<UnapprovedAbsence>,
}

impl Registry {
    pub fn find_staff_by_id<'a>(&'a self, id: &StaffId) -> Option<&'a Staff> {
        self.staff.iter().find(|s| &s.id == id)
    }
    pub fn find_staff_by_email<'a>(&'a self, email: &str) -> Option<&'a Staff> {
        self.staff.iter().find(|s| s.email == email)
    }
    pub fn find_staff_mut_by_id(&mut self, id: &StaffId) -> Option<&mut Staff> {
        self.staff.iter_mut().find(|s| &s.id == id)
    }
    pub fn find_clinic_by_id<'a>(&'a self, id: &ClinicId) -> Option<&'a Clinic> {
        self.clinics.iter().find(|c| &c.id == id)
    }
    pub fn find_clinic_by_name<'a>(&'a self, name: &str) -> Option<&'a Clinic> {
        self.clinics.iter().find(|c| c.name == name)
    }
    pub fn find_leave_by_id<'a>(&'a self, id: &LeaveId) -> Option<&'a LeaveRequest> {
        self.leave_requests.iter().find(|lr| &lr.id == id)
    }
    pub fn find_leave_mut_by_id(&mut self, id: &LeaveId) -> Option<&mut LeaveRequest> {
        self.leave_requests.iter_mut().find(|lr| &lr.id == id)
    }

    /// Toutes les affectations d'une date.
    pub fn assignments_on(&self, date: NaiveDate) -> impl Iterator<Item = &ShiftAssignment> {
        self.assignments.iter().filter(move |a| a.shift_date == date)
    }

    /// Affectation d'un membre pour une date, tous cabinets confondus.
    pub fn assignment_for(&self, staff_id: &StaffId, date: NaiveDate) -> Option<&ShiftAssignment> {
        self.assignments
            .iter()
            .find(|a| &a.staff_id == staff_id && a.shift_date == date)
    }
}

fn default_true() -> bool {
    true
}
