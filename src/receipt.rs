use crate::leave::{reference_for, status_path_for};
use crate::model::{LeaveId, LeaveRequest, Registry, Staff};
use anyhow::{Context, Result};

/// Confirmation générée pour le demandeur après soumission.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub staff_email: String,
    pub reference: String,
    pub status_path: String,
    pub content: String,
}

/// Permet de customiser le rendu de la confirmation (texte, mail, etc.).
pub trait ReceiptRenderer {
    fn render(&self, staff: &Staff, request: &LeaveRequest, reference: &str, status_path: &str)
        -> String;
}

/// Gabarit texte simple destiné à un futur mail/SMS.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReceipt;

impl ReceiptRenderer for TextReceipt {
    fn render(
        &self,
        staff: &Staff,
        request: &LeaveRequest,
        reference: &str,
        status_path: &str,
    ) -> String {
        format!(
            "Bonjour {name},\n\nTa demande de congé du {start} au {end} a bien été enregistrée.\nRéférence : {reference}\nSuivi de ta demande (lien partageable, sans connexion) : {status_path}\n\nUn admin la traitera prochainement.\n",
            name = staff.name,
            start = request.start_date,
            end = request.end_date,
        )
    }
}

/// Prépare la confirmation pour une demande existante.
pub fn prepare_receipt(
    registry: &Registry,
    leave_id: &LeaveId,
    renderer: &dyn ReceiptRenderer,
) -> Result<Receipt> {
    let request = registry
        .find_leave_by_id(leave_id)
        .with_context(|| format!("unknown leave request: {}", leave_id.as_str()))?;
    let staff = registry
        .find_staff_by_id(&request.staff_id)
        .with_context(|| format!("unknown staff: {}", request.staff_id.as_str()))?;

    let reference = reference_for(request);
    let status_path = status_path_for(&staff.id);
    let content = renderer.render(staff, request, &reference, &status_path);
    Ok(Receipt {
        staff_email: staff.email.clone(),
        reference,
        status_path,
        content,
    })
}
