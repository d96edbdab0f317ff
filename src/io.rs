use crate::model::{Clinic, Registry, Role, Staff};
use crate::roster::{ClinicRoster, StaffWithStatus};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de cabinets depuis CSV: header `name,location[,is_active]`
pub fn import_clinics_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Clinic>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let location = rec.get(1).context("missing location")?.trim();
        if name.is_empty() {
            bail!("invalid clinic row (empty name)");
        }
        let mut clinic = Clinic::new(name.to_string(), location.to_string());
        if let Some(flag) = rec.get(2) {
            let flag = flag.trim();
            if !flag.is_empty() {
                clinic.is_active = parse_bool(flag)
                    .with_context(|| format!("invalid is_active value for clinic {name}"))?;
            }
        }
        out.push(clinic);
    }
    Ok(out)
}

/// Import de personnel depuis CSV:
/// header `email,name,role,primary_clinic[,weekly_off_day]`
///
/// `primary_clinic` référence un cabinet du registre par son nom (vide pour
/// les admins) ; `weekly_off_day` 0=dimanche … 6=samedi.
pub fn import_staff_csv<P: AsRef<Path>>(path: P, registry: &Registry) -> anyhow::Result<Vec<Staff>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let email = rec.get(0).context("missing email")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        let role_raw = rec.get(2).context("missing role")?.trim();
        if email.is_empty() || name.is_empty() {
            bail!("invalid staff row (empty email or name)");
        }
        let role: Role = role_raw
            .parse()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid role for {email}"))?;

        let primary = match rec.get(3).map(str::trim) {
            Some("") | None => None,
            Some(clinic_name) => {
                let clinic = registry
                    .find_clinic_by_name(clinic_name)
                    .with_context(|| format!("unknown clinic {clinic_name} for {email}"))?;
                Some(clinic.id.clone())
            }
        };

        let weekly_off = match rec.get(4).map(str::trim) {
            Some("") | None => None,
            Some(raw) => Some(
                raw.parse::<u8>()
                    .with_context(|| format!("invalid weekly_off_day for {email}"))?,
            ),
        };

        let member = Staff::new(email, name, role, primary, weekly_off)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid staff row for {email}"))?;
        out.push(member);
    }
    Ok(out)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Export JSON du registre (jolie mise en forme)
pub fn export_registry_json<P: AsRef<Path>>(path: P, registry: &Registry) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(registry)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV d'une journée:
/// header `clinic,role,staff_id,staff_name,status,is_visiting,notes`
///
/// Les membres non affectés sont ajoutés en fin de fichier avec une colonne
/// cabinet vide.
pub fn export_day_csv<P: AsRef<Path>>(
    path: P,
    rosters: &[ClinicRoster],
    unassigned: &[StaffWithStatus],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "clinic",
        "role",
        "staff_id",
        "staff_name",
        "status",
        "is_visiting",
        "notes",
    ])?;
    for roster in rosters {
        let notes = roster.notes.as_deref().unwrap_or("");
        for (role, members) in [
            (Role::Doctor, &roster.doctors),
            (Role::DentalAssistant, &roster.dental_assistants),
        ] {
            for m in members {
                w.write_record([
                    roster.clinic.name.as_str(),
                    role.as_str(),
                    m.id.as_str(),
                    m.name.as_str(),
                    m.status.as_str(),
                    if m.is_visiting { "true" } else { "false" },
                    notes,
                ])?;
            }
        }
    }
    for member in unassigned {
        w.write_record([
            "",
            member.staff.role.as_str(),
            member.staff.id.as_str(),
            member.staff.name.as_str(),
            member.status.as_str(),
            "",
            "",
        ])?;
    }
    w.flush()?;
    Ok(())
}
