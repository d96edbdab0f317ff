#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use cabiplan::{
    io, leave,
    model::{AbsenceReason, Clinic, ClinicId, LeaveId, LeaveStatus, LeaveType, Role, Staff, StaffId},
    receipt::{prepare_receipt, TextReceipt},
    roster::Planner,
    storage::{JsonStorage, Storage},
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de planning de cabinets (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du registre
    #[arg(long, global = true, default_value = "registry.json")]
    registry: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer un cabinet
    AddClinic {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        location: String,
    },

    /// Créer un membre du personnel
    AddStaff {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        /// doctor | dental_assistant | admin
        #[arg(long)]
        role: String,
        /// Nom du cabinet de rattachement (vide pour un admin)
        #[arg(long)]
        primary_clinic: Option<String>,
        /// Jour de repos hebdo : 0=dimanche … 6=samedi
        #[arg(long)]
        weekly_off: Option<u8>,
    },

    /// Importer des cabinets depuis un CSV
    ImportClinics {
        #[arg(long)]
        csv: String,
    },

    /// Importer du personnel depuis un CSV
    ImportStaff {
        #[arg(long)]
        csv: String,
    },

    /// Affecter un membre à un cabinet pour une date
    Assign {
        #[arg(long)]
        clinic: String,
        /// email du membre
        #[arg(long)]
        staff: String,
        /// AAAA-MM-JJ
        #[arg(long)]
        date: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Retirer une affectation
    Unassign {
        #[arg(long)]
        clinic: String,
        #[arg(long)]
        staff: String,
        #[arg(long)]
        date: String,
    },

    /// Affecter tout le personnel disponible à son cabinet de rattachement
    AutoAssign {
        #[arg(long)]
        date: String,
    },

    /// Afficher le planning du jour et optionnellement l'exporter
    Roster {
        #[arg(long)]
        date: String,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Statut d'un membre pour une date
    Status {
        #[arg(long)]
        staff: String,
        #[arg(long)]
        date: String,
    },

    /// Soumettre une demande de congé (formulaire public)
    LeaveSubmit {
        #[arg(long)]
        staff: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        /// planned | emergency
        #[arg(long, default_value = "planned")]
        leave_type: String,
        #[arg(long)]
        reason: String,
        /// Fichier de sortie pour la confirmation (texte brut)
        #[arg(long)]
        out: Option<String>,
    },

    /// Lister les demandes de congé
    LeaveList {
        /// pending | approved | rejected
        #[arg(long)]
        status: Option<String>,
        /// Filtrer par email
        #[arg(long)]
        staff: Option<String>,
    },

    /// Approuver une demande
    LeaveApprove {
        #[arg(long)]
        id: String,
        /// email de l'approbateur
        #[arg(long)]
        by: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Refuser une demande
    LeaveReject {
        #[arg(long)]
        id: String,
        #[arg(long)]
        by: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Supprimer une demande
    LeaveDelete {
        #[arg(long)]
        id: String,
    },

    /// Consigner une absence non approuvée
    MarkAbsence {
        #[arg(long)]
        staff: String,
        #[arg(long)]
        date: String,
        /// no_show | rejected_leave
        #[arg(long)]
        reason: String,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        by: String,
    },

    /// Retirer une absence consignée
    RemoveAbsence {
        #[arg(long)]
        staff: String,
        #[arg(long)]
        date: String,
    },
}

fn staff_id_by_email(planner: &Planner, email: &str) -> Result<StaffId> {
    planner
        .registry()
        .find_staff_by_email(email)
        .map(|s| s.id.clone())
        .ok_or_else(|| anyhow::anyhow!("unknown staff email: {}", email))
}

fn clinic_id_by_name(planner: &Planner, name: &str) -> Result<ClinicId> {
    planner
        .registry()
        .find_clinic_by_name(name)
        .map(|c| c.id.clone())
        .ok_or_else(|| anyhow::anyhow!("unknown clinic: {}", name))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    raw.parse::<NaiveDate>()
        .map_err(|_| anyhow::anyhow!("invalid date (expected AAAA-MM-JJ): {}", raw))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.registry)?;
    let mut planner = Planner::from_registry(storage.load_or_default()?);

    let code = match cli.cmd {
        Commands::AddClinic { name, location } => {
            if planner.registry().find_clinic_by_name(&name).is_some() {
                bail!("clinic already exists: {}", name);
            }
            let clinic = Clinic::new(name, location);
            println!("{}", clinic.id.as_str());
            planner.registry_mut().clinics.push(clinic);
            storage.save(planner.registry())?;
            0
        }
        Commands::AddStaff {
            email,
            name,
            role,
            primary_clinic,
            weekly_off,
        } => {
            if planner.registry().find_staff_by_email(&email).is_some() {
                bail!("staff email already exists: {}", email);
            }
            let role: Role = role.parse().map_err(anyhow::Error::msg)?;
            let primary = match primary_clinic {
                Some(ref n) if !n.is_empty() => Some(clinic_id_by_name(&planner, n)?),
                _ => None,
            };
            let member = Staff::new(email, name, role, primary, weekly_off)
                .map_err(anyhow::Error::msg)?;
            println!("{}", member.id.as_str());
            planner.registry_mut().staff.push(member);
            storage.save(planner.registry())?;
            0
        }
        Commands::ImportClinics { csv } => {
            let clinics = io::import_clinics_csv(csv)?;
            planner.registry_mut().clinics.extend(clinics);
            storage.save(planner.registry())?;
            0
        }
        Commands::ImportStaff { csv } => {
            let staff = io::import_staff_csv(csv, planner.registry())?;
            planner.registry_mut().staff.extend(staff);
            storage.save(planner.registry())?;
            0
        }
        Commands::Assign {
            clinic,
            staff,
            date,
            notes,
        } => {
            let clinic_id = clinic_id_by_name(&planner, &clinic)?;
            let staff_id = staff_id_by_email(&planner, &staff)?;
            let date = parse_date(&date)?;
            planner.assign(&clinic_id, &staff_id, date, notes)?;
            storage.save(planner.registry())?;
            0
        }
        Commands::Unassign {
            clinic,
            staff,
            date,
        } => {
            let clinic_id = clinic_id_by_name(&planner, &clinic)?;
            let staff_id = staff_id_by_email(&planner, &staff)?;
            let date = parse_date(&date)?;
            planner.unassign(&clinic_id, &staff_id, date)?;
            storage.save(planner.registry())?;
            0
        }
        Commands::AutoAssign { date } => {
            let date = parse_date(&date)?;
            let report = planner.auto_assign_to_primary_clinics(date)?;
            storage.save(planner.registry())?;
            println!("{}", report.message);
            0
        }
        Commands::Roster {
            date,
            out_csv,
            out_json,
        } => {
            let date = parse_date(&date)?;
            let rosters = planner.roster_for_date(date);
            let unassigned = planner.unassigned_staff(date);

            if let Some(path) = out_csv {
                io::export_day_csv(path, &rosters, &unassigned)?;
            }
            if let Some(path) = out_json {
                let doc = serde_json::json!({
                    "date": date,
                    "rosters": rosters,
                    "unassigned": unassigned,
                });
                std::fs::write(path, serde_json::to_string_pretty(&doc)?)?;
            }

            let mut understaffed = 0usize;
            for roster in &rosters {
                println!("{} ({})", roster.clinic.name, roster.clinic.location);
                for d in &roster.doctors {
                    println!("  doctor    | {} | {}", d.name, d.status.as_str());
                }
                for a in &roster.dental_assistants {
                    println!("  assistant | {} | {}", a.name, a.status.as_str());
                }
                if roster.doctors.is_empty() && roster.dental_assistants.is_empty() {
                    println!("  (personne)");
                    understaffed += 1;
                }
                if let Some(notes) = &roster.notes {
                    println!("  notes: {notes}");
                }
            }
            if !unassigned.is_empty() {
                println!("Non affectés :");
                for member in &unassigned {
                    println!("  {} | {}", member.staff.name, member.status.as_str());
                }
            }
            if understaffed > 0 {
                eprintln!("Attention : {understaffed} cabinet(s) sans personnel");
                // Code 2 = WARNING/INCOMPLETE
                2
            } else {
                0
            }
        }
        Commands::Status { staff, date } => {
            let staff_id = staff_id_by_email(&planner, &staff)?;
            let date = parse_date(&date)?;
            println!("{}", planner.staff_status(&staff_id, date).as_str());
            0
        }
        Commands::LeaveSubmit {
            staff,
            start,
            end,
            leave_type,
            reason,
            out,
        } => {
            let staff_id = staff_id_by_email(&planner, &staff)?;
            let start = parse_date(&start)?;
            let end = parse_date(&end)?;
            let leave_type: LeaveType = leave_type.parse().map_err(anyhow::Error::msg)?;
            let receipt = leave::submit_leave_request(
                planner.registry_mut(),
                &staff_id,
                start,
                end,
                leave_type,
                &reason,
            )?;
            storage.save(planner.registry())?;

            let rendered = prepare_receipt(planner.registry(), &receipt.leave_id, &TextReceipt)?;
            if let Some(path) = out {
                std::fs::write(&path, &rendered.content)?;
            }
            println!("{} {}", receipt.reference, receipt.status_path);
            0
        }
        Commands::LeaveList { status, staff } => {
            let registry = planner.registry();
            let filtered: Vec<_> = match status {
                Some(raw) => {
                    let status: LeaveStatus = raw.parse().map_err(anyhow::Error::msg)?;
                    leave::leaves_with_status(registry, status)
                }
                None => {
                    let mut all: Vec<_> = registry.leave_requests.iter().collect();
                    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                    all
                }
            };
            let staff_filter = match staff {
                Some(email) => Some(staff_id_by_email(&planner, &email)?),
                None => None,
            };
            for lr in filtered {
                if let Some(ref id) = staff_filter {
                    if &lr.staff_id != id {
                        continue;
                    }
                }
                let who = planner
                    .registry()
                    .find_staff_by_id(&lr.staff_id)
                    .map(|s| s.name.as_str())
                    .unwrap_or("?");
                println!(
                    "{} | {} | {} → {} | {} | {}",
                    lr.id.as_str(),
                    who,
                    lr.start_date,
                    lr.end_date,
                    lr.status.as_str(),
                    leave::reference_for(lr),
                );
            }
            0
        }
        Commands::LeaveApprove { id, by, notes } => {
            let approver = staff_id_by_email(&planner, &by)?;
            leave::approve_leave(planner.registry_mut(), &LeaveId::new(id), &approver, notes)?;
            storage.save(planner.registry())?;
            0
        }
        Commands::LeaveReject { id, by, notes } => {
            let approver = staff_id_by_email(&planner, &by)?;
            leave::reject_leave(planner.registry_mut(), &LeaveId::new(id), &approver, notes)?;
            storage.save(planner.registry())?;
            0
        }
        Commands::LeaveDelete { id } => {
            leave::delete_leave(planner.registry_mut(), &LeaveId::new(id))?;
            storage.save(planner.registry())?;
            0
        }
        Commands::MarkAbsence {
            staff,
            date,
            reason,
            notes,
            by,
        } => {
            let staff_id = staff_id_by_email(&planner, &staff)?;
            let marker = staff_id_by_email(&planner, &by)?;
            let date = parse_date(&date)?;
            let reason: AbsenceReason = reason.parse().map_err(anyhow::Error::msg)?;
            leave::mark_absence(planner.registry_mut(), &staff_id, date, reason, notes, &marker)?;
            storage.save(planner.registry())?;
            0
        }
        Commands::RemoveAbsence { staff, date } => {
            let staff_id = staff_id_by_email(&planner, &staff)?;
            let date = parse_date(&date)?;
            leave::remove_absence(planner.registry_mut(), &staff_id, date)?;
            storage.save(planner.registry())?;
            0
        }
    };

    std::process::exit(code);
}
