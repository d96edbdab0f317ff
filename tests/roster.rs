#![forbid(unsafe_code)]
use cabiplan::{
    model::{Clinic, ClinicId, LeaveRequest, LeaveStatus, LeaveType, Registry, Role, Staff, StaffId},
    roster::{PlanError, Planner, StaffStatus},
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn staff_with_id(id: &str, email: &str, name: &str, role: Role, primary: Option<ClinicId>) -> Staff {
    let mut member = Staff::new(email, name, role, primary, None).unwrap();
    member.id = StaffId::new(id);
    member
}

fn two_clinics() -> (Registry, Clinic, Clinic) {
    let centre = Clinic::new("Centre", "Rue Haute");
    let nord = Clinic::new("Nord", "Avenue du Parc");
    let registry = Registry {
        clinics: vec![nord.clone(), centre.clone()],
        ..Registry::default()
    };
    (registry, centre, nord)
}

#[test]
fn roster_partitions_by_role_and_flags_visitors() {
    let (mut registry, centre, nord) = two_clinics();
    let doc = staff_with_id("a-doc", "doc@cab.example", "Alice", Role::Doctor, Some(centre.id.clone()));
    let da = staff_with_id("b-da", "da@cab.example", "Bruno", Role::DentalAssistant, Some(nord.id.clone()));
    registry.staff = vec![doc.clone(), da.clone()];
    let mut planner = Planner::from_registry(registry);

    let day = date(2025, 10, 6);
    planner.assign(&centre.id, &doc.id, day, None).unwrap();
    // Bruno est rattaché au Nord : au Centre il est visiteur
    planner.assign(&centre.id, &da.id, day, None).unwrap();

    let rosters = planner.roster_for_date(day);
    assert_eq!(rosters.len(), 2);
    // ordre stable : par nom de cabinet
    assert_eq!(rosters[0].clinic.name, "Centre");
    assert_eq!(rosters[1].clinic.name, "Nord");

    let centre_roster = &rosters[0];
    assert_eq!(centre_roster.doctors.len(), 1);
    assert_eq!(centre_roster.doctors[0].status, StaffStatus::Present);
    assert!(!centre_roster.doctors[0].is_visiting);
    assert_eq!(centre_roster.dental_assistants.len(), 1);
    assert_eq!(centre_roster.dental_assistants[0].status, StaffStatus::Visiting);
    assert!(centre_roster.dental_assistants[0].is_visiting);
}

#[test]
fn empty_clinic_yields_empty_lists_not_error() {
    let (registry, _, _) = two_clinics();
    let planner = Planner::from_registry(registry);

    let rosters = planner.roster_for_date(date(2025, 10, 6));
    assert_eq!(rosters.len(), 2);
    for roster in rosters {
        assert!(roster.doctors.is_empty());
        assert!(roster.dental_assistants.is_empty());
        assert!(roster.notes.is_none());
    }
}

#[test]
fn notes_pick_is_deterministic_regardless_of_insertion_order() {
    let day = date(2025, 10, 6);
    let mut results = Vec::new();
    for reversed in [false, true] {
        let (mut registry, centre, _) = two_clinics();
        let a = staff_with_id("a-doc", "a@cab.example", "Alice", Role::Doctor, Some(centre.id.clone()));
        let b = staff_with_id("b-doc", "b@cab.example", "Brice", Role::Doctor, Some(centre.id.clone()));
        registry.staff = vec![a.clone(), b.clone()];
        let mut planner = Planner::from_registry(registry);

        let mut ops: Vec<(&Staff, Option<String>)> =
            vec![(&a, None), (&b, Some("stock faible".into()))];
        if reversed {
            ops.reverse();
        }
        for (member, notes) in ops {
            planner.assign(&centre.id, &member.id, day, notes).unwrap();
        }
        let rosters = planner.roster_for_date(day);
        results.push(rosters[0].notes.clone());
    }
    assert_eq!(results[0], results[1]);
    assert_eq!(results[0].as_deref(), Some("stock faible"));
}

#[test]
fn roster_is_idempotent() {
    let (mut registry, centre, _) = two_clinics();
    let doc = staff_with_id("a-doc", "doc@cab.example", "Alice", Role::Doctor, Some(centre.id.clone()));
    registry.staff = vec![doc.clone()];
    let mut planner = Planner::from_registry(registry);
    planner
        .assign(&centre.id, &doc.id, date(2025, 10, 6), Some("rappel".into()))
        .unwrap();

    let first = planner.roster_for_date(date(2025, 10, 6));
    let second = planner.roster_for_date(date(2025, 10, 6));
    assert_eq!(first, second);
}

#[test]
fn unassigned_excludes_assigned_and_inactive() {
    let (mut registry, centre, _) = two_clinics();
    let assigned = staff_with_id("a", "a@cab.example", "Alice", Role::Doctor, Some(centre.id.clone()));
    let mut gone = staff_with_id("b", "b@cab.example", "Brice", Role::Doctor, Some(centre.id.clone()));
    gone.is_active = false;
    let free = staff_with_id("c", "c@cab.example", "Chloé", Role::DentalAssistant, Some(centre.id.clone()));
    registry.staff = vec![assigned.clone(), gone, free.clone()];
    let mut planner = Planner::from_registry(registry);

    let day = date(2025, 10, 6);
    planner.assign(&centre.id, &assigned.id, day, None).unwrap();

    let unassigned = planner.unassigned_staff(day);
    assert_eq!(unassigned.len(), 1);
    assert_eq!(unassigned[0].staff.id, free.id);
    assert_eq!(unassigned[0].status, StaffStatus::Available);
}

#[test]
fn unassigned_statuses_never_include_presence() {
    let (mut registry, centre, _) = two_clinics();
    let mut off = staff_with_id("a", "a@cab.example", "Alice", Role::Doctor, Some(centre.id.clone()));
    off.weekly_off_day = Some(1); // lundi
    let resting = staff_with_id("b", "b@cab.example", "Brice", Role::Doctor, Some(centre.id.clone()));
    registry.staff = vec![off, resting.clone()];
    registry.leave_requests.push(
        LeaveRequest::new(
            resting.id.clone(),
            date(2025, 10, 6),
            date(2025, 10, 7),
            LeaveType::Emergency,
            Some("urgence".into()),
            LeaveStatus::Approved,
        )
        .unwrap(),
    );
    let planner = Planner::from_registry(registry);

    // lundi 2025-10-06
    let statuses: Vec<StaffStatus> = planner
        .unassigned_staff(date(2025, 10, 6))
        .into_iter()
        .map(|s| s.status)
        .collect();
    assert_eq!(statuses, vec![StaffStatus::WeeklyOff, StaffStatus::ApprovedLeave]);
}

#[test]
fn double_booking_rejected_across_clinics() {
    let (mut registry, centre, nord) = two_clinics();
    let doc = staff_with_id("a", "a@cab.example", "Alice", Role::Doctor, Some(centre.id.clone()));
    registry.staff = vec![doc.clone()];
    let mut planner = Planner::from_registry(registry);

    let day = date(2025, 10, 6);
    planner.assign(&centre.id, &doc.id, day, None).unwrap();
    let err = planner.assign(&nord.id, &doc.id, day, None).unwrap_err();
    assert!(matches!(err, PlanError::DoubleBooked { .. }));
    assert_eq!(planner.registry().assignments.len(), 1);
}

#[test]
fn reassigning_same_clinic_upserts_notes() {
    let (mut registry, centre, _) = two_clinics();
    let doc = staff_with_id("a", "a@cab.example", "Alice", Role::Doctor, Some(centre.id.clone()));
    registry.staff = vec![doc.clone()];
    let mut planner = Planner::from_registry(registry);

    let day = date(2025, 10, 6);
    let first = planner.assign(&centre.id, &doc.id, day, None).unwrap();
    let second = planner
        .assign(&centre.id, &doc.id, day, Some("arrive à 10h".into()))
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(planner.registry().assignments.len(), 1);
    assert_eq!(
        planner.registry().assignments[0].notes.as_deref(),
        Some("arrive à 10h")
    );
}

#[test]
fn unassign_unknown_is_an_error() {
    let (mut registry, centre, _) = two_clinics();
    let doc = staff_with_id("a", "a@cab.example", "Alice", Role::Doctor, Some(centre.id.clone()));
    registry.staff = vec![doc.clone()];
    let mut planner = Planner::from_registry(registry);

    let err = planner
        .unassign(&centre.id, &doc.id, date(2025, 10, 6))
        .unwrap_err();
    assert!(matches!(err, PlanError::UnknownAssignment { .. }));
}

#[test]
fn auto_assign_respects_skip_policy() {
    let (mut registry, centre, nord) = two_clinics();
    let ready = staff_with_id("a", "a@cab.example", "Alice", Role::Doctor, Some(centre.id.clone()));
    let mut off = staff_with_id("b", "b@cab.example", "Brice", Role::Doctor, Some(centre.id.clone()));
    off.weekly_off_day = Some(1); // lundi
    let admin = staff_with_id("c", "c@cab.example", "Chef", Role::Admin, None);
    let resting = staff_with_id("d", "d@cab.example", "Dana", Role::DentalAssistant, Some(nord.id.clone()));
    let placed = staff_with_id("e", "e@cab.example", "Emma", Role::DentalAssistant, Some(centre.id.clone()));
    registry.staff = vec![ready.clone(), off, admin, resting.clone(), placed.clone()];
    registry.leave_requests.push(
        LeaveRequest::new(
            resting.id.clone(),
            date(2025, 10, 6),
            date(2025, 10, 8),
            LeaveType::Planned,
            Some("congé posé".into()),
            LeaveStatus::Approved,
        )
        .unwrap(),
    );
    let mut planner = Planner::from_registry(registry);

    // Emma déjà posée à la main chez un autre cabinet : elle compte en skip
    let monday = date(2025, 10, 6);
    planner.assign(&nord.id, &placed.id, monday, None).unwrap();

    let report = planner.auto_assign_to_primary_clinics(monday).unwrap();
    assert_eq!(report.assigned_count, 1);
    assert_eq!(report.skipped_count, 4);

    let alice = planner.registry().assignment_for(&ready.id, monday).unwrap();
    assert_eq!(alice.clinic_id, centre.id);
    assert!(!alice.is_visiting);

    // relancer la même journée n'assigne plus rien
    let again = planner.auto_assign_to_primary_clinics(monday).unwrap();
    assert_eq!(again.assigned_count, 0);
    assert_eq!(again.skipped_count, 5);
}

#[test]
fn zero_assignments_is_a_valid_state() {
    let (registry, _, _) = two_clinics();
    let planner = Planner::from_registry(registry);

    assert!(planner.roster_for_date(date(2025, 10, 6)).iter().all(|r| {
        r.doctors.is_empty() && r.dental_assistants.is_empty()
    }));
    assert!(planner.unassigned_staff(date(2025, 10, 6)).is_empty());
}
