//! AI, Country Lookup and Job Requests

use web_sys::{File, FormData};

use bom_core::api::{AiRequest, CountriesResponse, Endpoint, JobAck};
use bom_core::scenario::UploadSlot;
use bom_core::session::JobSubmission;
use bom_core::{AppError, AppResult};

use super::{js_error, post_json, Body};

fn attach(form: &FormData, slot: UploadSlot, file: &File) -> AppResult<()> {
    form.append_with_blob_and_filename(slot.field_name(), file, &file.name())
        .map_err(js_error)
}

pub async fn process_bill_of_materials(base: &str, request: &AiRequest) -> AppResult<serde_json::Value> {
    let body = serde_json::to_string(request)?;
    post_json(base, &Endpoint::ProcessBillOfMaterials, Some(Body::Json(body)), None).await
}

/// Upload the two CSVs and get the countries they mention
pub async fn find_countries(base: &str, bom: &File, suppliers: &File) -> AppResult<CountriesResponse> {
    let form = FormData::new().map_err(js_error)?;
    attach(&form, UploadSlot::Bom, bom)?;
    attach(&form, UploadSlot::Supplier, suppliers)?;
    post_json(base, &Endpoint::FindCountries, Some(Body::Form(form)), None).await
}

/// Send a report/simulation job as multipart form
pub async fn submit_job(
    base: &str,
    submission: &JobSubmission,
    files: &[(UploadSlot, File)],
) -> AppResult<JobAck> {
    let form = FormData::new().map_err(js_error)?;
    for (name, value) in &submission.fields {
        form.append_with_str(name, value).map_err(js_error)?;
    }
    for slot in &submission.files {
        let file = files
            .iter()
            .find(|(s, _)| s == slot)
            .map(|(_, f)| f)
            .ok_or_else(|| AppError::Empty(format!("{} is missing, pick it again", slot.label())))?;
        attach(&form, *slot, file)?;
    }
    post_json(base, &submission.endpoint(), Some(Body::Form(form)), None).await
}
