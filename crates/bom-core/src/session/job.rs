//! Job submission
//!
//! Multipart payload of `/run_report_generator` and `/run_simulation`.

use serde::{Deserialize, Serialize};

use super::Session;
use crate::api::Endpoint;
use crate::error::{AppError, AppResult, ValidationIssue};
use crate::scenario::{JobKind, UploadSlot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSubmission {
    pub kind: JobKind,
    /// Text parts of the multipart form, in order
    pub fields: Vec<(String, String)>,
    /// File parts; the UI attaches the picked files under `slot.field_name()`
    pub files: Vec<UploadSlot>,
}

impl JobSubmission {
    pub fn build(session: &Session, kind: JobKind) -> AppResult<Self> {
        let vehicle = session.vehicle_selection().ok_or_else(|| {
            AppError::Validation(vec![ValidationIssue::new("vehicle", "Select a vehicle first")])
        })?;
        let params = session.scenario.validate_for(kind)?;

        let mut fields = vec![
            ("vehicle".to_string(), serde_json::to_string(&vehicle)?),
            ("tariffs".to_string(), serde_json::to_string(&params.tariffs)?),
            ("inflation_rate".to_string(), params.inflation_rate.to_string()),
            ("vat_rate".to_string(), params.vat_rate.to_string()),
        ];
        if !params.report_name.is_empty() {
            fields.push(("report_name".to_string(), params.report_name));
        }
        if let Some(temp_id) = &session.scenario.countries_temp_id {
            fields.push(("temp_id".to_string(), temp_id.clone()));
        }

        let files = [UploadSlot::Bom, UploadSlot::Supplier]
            .into_iter()
            .filter(|slot| session.scenario.upload(*slot).is_some())
            .collect();

        Ok(Self { kind, fields, files })
    }

    pub fn endpoint(&self) -> Endpoint {
        match self.kind {
            JobKind::Report => Endpoint::RunReportGenerator,
            JobKind::Simulation => Endpoint::RunSimulation,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}
