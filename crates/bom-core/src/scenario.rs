//! Economic Scenario
//!
//! Tariff shocks, inflation and VAT as typed into the form, plus the
//! validation that turns them into numbers the simulation accepts.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ValidationIssue};

/// Accepted range for every rate, in percent
pub const MIN_RATE: f64 = -100.0;
pub const MAX_RATE: f64 = 1000.0;

/// A tariff rate change applied to imports from one country
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TariffShock {
    pub country: String,
    /// Raw form input
    pub rate: String,
}

/// The two CSV uploads of the scenario step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UploadSlot {
    /// Bill of materials with part costs
    Bom,
    /// Supplier list with country of origin
    Supplier,
}

impl UploadSlot {
    pub fn field_name(&self) -> &'static str {
        match self {
            UploadSlot::Bom => "bom_csv",
            UploadSlot::Supplier => "supplier_csv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UploadSlot::Bom => "Bill of materials CSV",
            UploadSlot::Supplier => "Supplier CSV",
        }
    }
}

/// Metadata of a picked file; the bytes stay in the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub size_bytes: u64,
}

impl UploadedFile {
    pub fn is_csv(&self) -> bool {
        self.name.to_lowercase().ends_with(".csv")
    }
}

/// Which backend job the review step starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobKind {
    Report,
    Simulation,
}

impl JobKind {
    pub fn required_uploads(&self) -> &'static [UploadSlot] {
        match self {
            JobKind::Report => &[UploadSlot::Bom, UploadSlot::Supplier],
            JobKind::Simulation => &[UploadSlot::Bom],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobKind::Report => "Generate report",
            JobKind::Simulation => "Run simulation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioForm {
    pub tariffs: Vec<TariffShock>,
    pub inflation_rate: String,
    pub vat_rate: String,
    pub report_name: String,
    pub bom_csv: Option<UploadedFile>,
    pub supplier_csv: Option<UploadedFile>,
    /// Handle returned by `/find_countries` for the uploaded pair
    pub countries_temp_id: Option<String>,
    /// Countries found in the uploads; empty until `/find_countries` ran
    pub available_countries: Vec<String>,
}

/// A single form interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScenarioEdit {
    AddTariff,
    RemoveTariff(usize),
    SetTariffCountry(usize, String),
    SetTariffRate(usize, String),
    SetInflation(String),
    SetVat(String),
    SetReportName(String),
    Attach(UploadSlot, UploadedFile),
    Clear(UploadSlot),
}

impl ScenarioForm {
    pub fn apply(&mut self, edit: ScenarioEdit) {
        match edit {
            ScenarioEdit::AddTariff => self.tariffs.push(TariffShock::default()),
            ScenarioEdit::RemoveTariff(i) => {
                if i < self.tariffs.len() {
                    self.tariffs.remove(i);
                }
            }
            ScenarioEdit::SetTariffCountry(i, country) => {
                if let Some(t) = self.tariffs.get_mut(i) {
                    t.country = country;
                }
            }
            ScenarioEdit::SetTariffRate(i, rate) => {
                if let Some(t) = self.tariffs.get_mut(i) {
                    t.rate = rate;
                }
            }
            ScenarioEdit::SetInflation(v) => self.inflation_rate = v,
            ScenarioEdit::SetVat(v) => self.vat_rate = v,
            ScenarioEdit::SetReportName(v) => self.report_name = v,
            ScenarioEdit::Attach(slot, file) => {
                *self.upload_mut(slot) = Some(file);
                self.forget_countries();
            }
            ScenarioEdit::Clear(slot) => {
                *self.upload_mut(slot) = None;
                self.forget_countries();
            }
        }
    }

    pub fn upload(&self, slot: UploadSlot) -> Option<&UploadedFile> {
        match slot {
            UploadSlot::Bom => self.bom_csv.as_ref(),
            UploadSlot::Supplier => self.supplier_csv.as_ref(),
        }
    }

    fn upload_mut(&mut self, slot: UploadSlot) -> &mut Option<UploadedFile> {
        match slot {
            UploadSlot::Bom => &mut self.bom_csv,
            UploadSlot::Supplier => &mut self.supplier_csv,
        }
    }

    /// A changed upload invalidates the country list derived from it
    fn forget_countries(&mut self) {
        self.countries_temp_id = None;
        self.available_countries.clear();
    }

    pub fn set_countries(&mut self, temp_id: String, countries: Vec<String>) {
        self.countries_temp_id = Some(temp_id);
        self.available_countries = countries;
    }

    /// Both CSVs present, so `/find_countries` can run
    pub fn can_find_countries(&self) -> bool {
        self.bom_csv.is_some() && self.supplier_csv.is_some()
    }

    /// Rates and tariffs only, independent of the job kind
    pub fn validate(&self) -> AppResult<ScenarioParams> {
        let mut issues = Vec::new();
        let inflation_rate = check_rate(&self.inflation_rate, "inflation_rate", "Inflation", &mut issues);
        let vat_rate = check_rate(&self.vat_rate, "vat_rate", "VAT", &mut issues);

        let mut tariffs = Vec::with_capacity(self.tariffs.len());
        let mut seen: Vec<String> = Vec::new();
        for (i, shock) in self.tariffs.iter().enumerate() {
            let country = shock.country.trim();
            let field = format!("tariffs[{}].country", i);
            if country.is_empty() {
                issues.push(ValidationIssue::new(field, format!("Tariff #{}: choose a country", i + 1)));
            } else if !self.available_countries.is_empty()
                && !self.available_countries.iter().any(|c| c == country)
            {
                issues.push(ValidationIssue::new(
                    field,
                    format!("Tariff #{}: '{}' is not in the uploaded data", i + 1, country),
                ));
            } else if seen.iter().any(|c| c.eq_ignore_ascii_case(country)) {
                issues.push(ValidationIssue::new(
                    field,
                    format!("Tariff #{}: '{}' already has a tariff", i + 1, country),
                ));
            } else {
                seen.push(country.to_string());
            }

            let rate = check_rate(
                &shock.rate,
                &format!("tariffs[{}].rate", i),
                &format!("Tariff #{} rate", i + 1),
                &mut issues,
            );
            if let Some(rate) = rate {
                tariffs.push(TariffParam {
                    country: country.to_string(),
                    rate,
                });
            }
        }

        match (inflation_rate, vat_rate) {
            (Some(inflation_rate), Some(vat_rate)) if issues.is_empty() => Ok(ScenarioParams {
                tariffs,
                inflation_rate,
                vat_rate,
                report_name: self.report_name.trim().to_string(),
            }),
            _ => {
                log::warn!("scenario validation failed with {} issue(s)", issues.len());
                Err(AppError::Validation(issues))
            }
        }
    }

    /// Full check before submitting `kind`
    pub fn validate_for(&self, kind: JobKind) -> AppResult<ScenarioParams> {
        let mut issues = match self.validate() {
            Ok(_) => Vec::new(),
            Err(AppError::Validation(issues)) => issues,
            Err(other) => return Err(other),
        };
        for slot in kind.required_uploads() {
            match self.upload(*slot) {
                None => issues.push(ValidationIssue::new(
                    slot.field_name(),
                    format!("{} is required", slot.label()),
                )),
                Some(file) if !file.is_csv() => issues.push(ValidationIssue::new(
                    slot.field_name(),
                    format!("{} must be a .csv file", slot.label()),
                )),
                Some(_) => {}
            }
        }
        if kind == JobKind::Report && self.report_name.trim().is_empty() {
            issues.push(ValidationIssue::new("report_name", "Report name is required"));
        }
        if issues.is_empty() {
            self.validate()
        } else {
            Err(AppError::Validation(issues))
        }
    }
}

/// Parse a percentage typed by the user: "5", "5.5", "5,5", "5 %"
pub fn parse_rate(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().trim_end_matches('%').trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn check_rate(raw: &str, field: &str, label: &str, issues: &mut Vec<ValidationIssue>) -> Option<f64> {
    if raw.trim().is_empty() {
        issues.push(ValidationIssue::new(field, format!("{} is required", label)));
        return None;
    }
    match parse_rate(raw) {
        None => {
            issues.push(ValidationIssue::new(field, format!("{} must be a number", label)));
            None
        }
        Some(v) if !(MIN_RATE..=MAX_RATE).contains(&v) => {
            issues.push(ValidationIssue::new(
                field,
                format!("{} must be between {}% and {}%", label, MIN_RATE, MAX_RATE),
            ));
            None
        }
        Some(v) => Some(v),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffParam {
    pub country: String,
    pub rate: f64,
}

/// Validated scenario, ready to be sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub tariffs: Vec<TariffParam>,
    pub inflation_rate: f64,
    pub vat_rate: f64,
    pub report_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv(name: &str) -> UploadedFile {
        UploadedFile {
            name: name.into(),
            size_bytes: 10,
        }
    }

    fn filled() -> ScenarioForm {
        let mut form = ScenarioForm::default();
        form.apply(ScenarioEdit::SetInflation("2.5".into()));
        form.apply(ScenarioEdit::SetVat("19 %".into()));
        form.apply(ScenarioEdit::AddTariff);
        form.apply(ScenarioEdit::SetTariffCountry(0, "China".into()));
        form.apply(ScenarioEdit::SetTariffRate(0, "25".into()));
        form
    }

    fn issue_fields(err: AppError) -> Vec<String> {
        match err {
            AppError::Validation(issues) => issues.into_iter().map(|i| i.field).collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("5"), Some(5.0));
        assert_eq!(parse_rate(" 5,5 % "), Some(5.5));
        assert_eq!(parse_rate("-3"), Some(-3.0));
        assert_eq!(parse_rate("abc"), None);
        assert_eq!(parse_rate("NaN"), None);
        assert_eq!(parse_rate(""), None);
    }

    #[test]
    fn test_valid_scenario() {
        let params = filled().validate().unwrap();
        assert_eq!(params.inflation_rate, 2.5);
        assert_eq!(params.vat_rate, 19.0);
        assert_eq!(params.tariffs, vec![TariffParam { country: "China".into(), rate: 25.0 }]);
    }

    #[test]
    fn test_non_numeric_and_missing_rates() {
        let mut form = filled();
        form.apply(ScenarioEdit::SetVat("nineteen".into()));
        form.apply(ScenarioEdit::SetInflation(String::new()));
        form.apply(ScenarioEdit::SetTariffRate(0, "5000".into()));
        let fields = issue_fields(form.validate().unwrap_err());
        assert_eq!(fields, vec!["inflation_rate", "vat_rate", "tariffs[0].rate"]);
    }

    #[test]
    fn test_tariff_country_rules() {
        let mut form = filled();
        form.apply(ScenarioEdit::AddTariff);
        form.apply(ScenarioEdit::SetTariffCountry(1, "china".into()));
        form.apply(ScenarioEdit::SetTariffRate(1, "10".into()));
        assert_eq!(issue_fields(form.validate().unwrap_err()), vec!["tariffs[1].country"]);

        form.apply(ScenarioEdit::SetTariffCountry(1, "Mexico".into()));
        form.set_countries("tmp-1".into(), vec!["China".into(), "Germany".into()]);
        assert_eq!(issue_fields(form.validate().unwrap_err()), vec!["tariffs[1].country"]);

        form.apply(ScenarioEdit::RemoveTariff(1));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_uploads_required_per_job() {
        let mut form = filled();
        let fields = issue_fields(form.validate_for(JobKind::Report).unwrap_err());
        assert_eq!(fields, vec!["bom_csv", "supplier_csv", "report_name"]);

        form.apply(ScenarioEdit::Attach(UploadSlot::Bom, csv("bom.CSV")));
        assert!(form.validate_for(JobKind::Simulation).is_ok());

        form.apply(ScenarioEdit::Attach(UploadSlot::Supplier, csv("suppliers.xlsx")));
        form.apply(ScenarioEdit::SetReportName("Q3 tariffs".into()));
        assert_eq!(issue_fields(form.validate_for(JobKind::Report).unwrap_err()), vec!["supplier_csv"]);
    }

    #[test]
    fn test_changing_upload_forgets_countries() {
        let mut form = filled();
        form.apply(ScenarioEdit::Attach(UploadSlot::Bom, csv("a.csv")));
        form.apply(ScenarioEdit::Attach(UploadSlot::Supplier, csv("b.csv")));
        assert!(form.can_find_countries());
        form.set_countries("tmp-9".into(), vec!["China".into()]);

        form.apply(ScenarioEdit::Clear(UploadSlot::Supplier));
        assert!(form.countries_temp_id.is_none());
        assert!(form.available_countries.is_empty());
        assert!(!form.can_find_countries());
    }

    #[test]
    fn test_out_of_range_edits_are_ignored() {
        let mut form = ScenarioForm::default();
        form.apply(ScenarioEdit::RemoveTariff(3));
        form.apply(ScenarioEdit::SetTariffRate(0, "1".into()));
        assert!(form.tariffs.is_empty());
    }
}
