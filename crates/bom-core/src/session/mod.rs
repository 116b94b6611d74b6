//! Session State
//!
//! Everything the wizard knows, in one serializable struct. The UI never
//! mutates it directly: it dispatches an [`Action`], the reducer updates the
//! session and returns the [`Effect`]s (fetches, toasts) to run. Results come
//! back as actions stamped with the generation they were issued under.

mod job;
mod remote;
mod wizard;

pub use job::JobSubmission;
pub use remote::{Generation, Remote};
pub use wizard::WizardStep;

use serde::{Deserialize, Serialize};

use crate::api::{
    AiRequest, CountriesResponse, EngineVariant, JobAck, Manufacturer, VehicleModel, VehicleSelection,
};
use crate::catalog::{CatalogView, CategoryMap, ProcessOptions, TopLevelFilter};
use crate::error::AppError;
use crate::notify::Level;
use crate::scenario::{JobKind, ScenarioEdit, ScenarioForm};

/// Latest request stamp per dependent fetch chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Generations {
    pub manufacturers: Generation,
    pub models: Generation,
    pub engines: Generation,
    pub catalog: Generation,
    pub countries: Generation,
    pub ai: Generation,
    pub job: Generation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub manufacturers: Remote<Vec<Manufacturer>>,
    pub selected_brand: Option<u64>,
    pub models: Remote<Vec<VehicleModel>>,
    pub selected_model: Option<u64>,
    pub engines: Remote<Vec<EngineVariant>>,
    /// `vehicle_id` of the chosen engine variant
    pub selected_engine: Option<u64>,
    pub categories: Remote<CategoryMap>,
    pub filter: TopLevelFilter,
    /// Derived from `categories` + `filter`; rebuilt on every change
    view: Option<CatalogView>,
    pub scenario: ScenarioForm,
    pub countries: Remote<Vec<String>>,
    pub ai_result: Remote<serde_json::Value>,
    pub job: Remote<JobAck>,
    pub step: WizardStep,
    pub generations: Generations,
    pub max_tree_depth: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ProcessOptions::default())
    }
}

/// User intents and backend responses
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Start,
    BrandSelected(Option<u64>),
    ModelSelected(Option<u64>),
    EngineSelected(Option<u64>),
    ManufacturersLoaded {
        generation: Generation,
        result: Result<Vec<Manufacturer>, AppError>,
    },
    ModelsLoaded {
        generation: Generation,
        result: Result<Vec<VehicleModel>, AppError>,
    },
    EnginesLoaded {
        generation: Generation,
        result: Result<Vec<EngineVariant>, AppError>,
    },
    CatalogLoaded {
        generation: Generation,
        result: Result<CategoryMap, AppError>,
    },
    FilterChanged(TopLevelFilter),
    ScenarioEdited(ScenarioEdit),
    FindCountries,
    CountriesFound {
        generation: Generation,
        result: Result<CountriesResponse, AppError>,
    },
    AiRequested,
    AiFinished {
        generation: Generation,
        result: Result<serde_json::Value, AppError>,
    },
    SubmitRequested(JobKind),
    JobFinished {
        generation: Generation,
        result: Result<JobAck, AppError>,
    },
    StepTo(WizardStep),
    Next,
    Back,
}

/// Work the UI performs on behalf of the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadManufacturers {
        generation: Generation,
    },
    LoadModels {
        generation: Generation,
        manufacturer_id: u64,
    },
    LoadEngines {
        generation: Generation,
        manufacturer_id: u64,
        model_id: u64,
    },
    LoadCatalog {
        generation: Generation,
        vehicle_id: u64,
        manufacturer_id: u64,
    },
    FindCountries {
        generation: Generation,
    },
    ProcessBom {
        generation: Generation,
        request: AiRequest,
    },
    SubmitJob {
        generation: Generation,
        submission: JobSubmission,
    },
    Notify {
        level: Level,
        text: String,
    },
}

impl Effect {
    fn error(err: &AppError) -> Self {
        Effect::Notify {
            level: Level::Error,
            text: err.user_message(),
        }
    }
}

/// Map an empty list to the "nothing found" error the dropdown shows
fn non_empty<T>(result: Result<Vec<T>, AppError>, what: &str) -> Result<Vec<T>, String> {
    match result {
        Ok(list) if list.is_empty() => Err(AppError::Empty(format!("No {} found", what)).user_message()),
        Ok(list) => Ok(list),
        Err(e) => Err(e.user_message()),
    }
}

impl Session {
    pub fn new(opts: ProcessOptions) -> Self {
        Self {
            manufacturers: Remote::Idle,
            selected_brand: None,
            models: Remote::Idle,
            selected_model: None,
            engines: Remote::Idle,
            selected_engine: None,
            categories: Remote::Idle,
            filter: TopLevelFilter::All,
            view: None,
            scenario: ScenarioForm::default(),
            countries: Remote::Idle,
            ai_result: Remote::Idle,
            job: Remote::Idle,
            step: WizardStep::Vehicle,
            generations: Generations::default(),
            max_tree_depth: opts.max_depth,
        }
    }

    fn process_options(&self) -> ProcessOptions {
        ProcessOptions {
            max_depth: self.max_tree_depth,
        }
    }

    /// Filtered catalog projections, once a catalog is loaded
    pub fn catalog_view(&self) -> Option<&CatalogView> {
        self.view.as_ref()
    }

    pub fn brand(&self) -> Option<&Manufacturer> {
        let id = self.selected_brand?;
        self.manufacturers.loaded()?.iter().find(|m| m.manufacturer_id == id)
    }

    pub fn model(&self) -> Option<&VehicleModel> {
        let id = self.selected_model?;
        self.models.loaded()?.iter().find(|m| m.model_id == id)
    }

    pub fn engine(&self) -> Option<&EngineVariant> {
        let id = self.selected_engine?;
        self.engines.loaded()?.iter().find(|e| e.vehicle_id == id)
    }

    /// Complete brand/model/engine choice, if any
    pub fn vehicle_selection(&self) -> Option<VehicleSelection> {
        let brand = self.brand()?;
        let model = self.model()?;
        let engine = self.engine()?;
        Some(VehicleSelection {
            manufacturer_id: brand.manufacturer_id,
            brand: brand.brand.clone(),
            model_id: model.model_id,
            model_name: model.model_name.clone(),
            vehicle_id: engine.vehicle_id,
            engine: engine.label(),
        })
    }

    /// Pure form of [`Session::apply`]
    pub fn reduce(mut self, action: Action) -> (Session, Vec<Effect>) {
        let effects = self.apply(action);
        (self, effects)
    }

    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        let effects = self.transition(action);
        self.settle_step();
        effects
    }

    fn transition(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Start => {
                let generation = self.generations.manufacturers.next();
                self.manufacturers.begin(generation);
                vec![Effect::LoadManufacturers { generation }]
            }

            Action::BrandSelected(id) => {
                self.selected_brand = id;
                self.clear_from_models();
                match id {
                    Some(manufacturer_id) => {
                        let generation = self.generations.models.next();
                        self.models.begin(generation);
                        vec![Effect::LoadModels {
                            generation,
                            manufacturer_id,
                        }]
                    }
                    None => Vec::new(),
                }
            }

            Action::ModelSelected(id) => {
                self.selected_model = id;
                self.clear_from_engines();
                match (self.selected_brand, id) {
                    (Some(manufacturer_id), Some(model_id)) => {
                        let generation = self.generations.engines.next();
                        self.engines.begin(generation);
                        vec![Effect::LoadEngines {
                            generation,
                            manufacturer_id,
                            model_id,
                        }]
                    }
                    _ => Vec::new(),
                }
            }

            Action::EngineSelected(id) => {
                self.selected_engine = id;
                self.clear_catalog();
                match (self.selected_brand, id) {
                    (Some(manufacturer_id), Some(vehicle_id)) => {
                        let generation = self.generations.catalog.next();
                        self.categories.begin(generation);
                        vec![Effect::LoadCatalog {
                            generation,
                            vehicle_id,
                            manufacturer_id,
                        }]
                    }
                    _ => Vec::new(),
                }
            }

            Action::ManufacturersLoaded { generation, result } => {
                self.manufacturers.resolve(generation, non_empty(result, "manufacturers"));
                Vec::new()
            }

            Action::ModelsLoaded { generation, result } => {
                self.models.resolve(generation, non_empty(result, "models"));
                Vec::new()
            }

            Action::EnginesLoaded { generation, result } => {
                self.engines.resolve(generation, non_empty(result, "engine variants"));
                Vec::new()
            }

            Action::CatalogLoaded { generation, result } => {
                let result = match result {
                    Ok(map) if map.is_empty() => {
                        Err(AppError::Empty("No categories found for this vehicle".into()).user_message())
                    }
                    Ok(map) => Ok(map),
                    Err(e) => Err(e.user_message()),
                };
                if self.categories.resolve(generation, result) {
                    self.recompute_view()
                } else {
                    Vec::new()
                }
            }

            Action::FilterChanged(filter) => {
                self.filter = filter;
                self.recompute_view()
            }

            Action::ScenarioEdited(edit) => {
                let touches_uploads = matches!(edit, ScenarioEdit::Attach(..) | ScenarioEdit::Clear(_));
                self.scenario.apply(edit);
                if touches_uploads {
                    self.countries.reset();
                }
                Vec::new()
            }

            Action::FindCountries => {
                if !self.scenario.can_find_countries() {
                    return vec![Effect::Notify {
                        level: Level::Error,
                        text: "Upload both CSV files first".into(),
                    }];
                }
                let generation = self.generations.countries.next();
                self.countries.begin(generation);
                vec![Effect::FindCountries { generation }]
            }

            Action::CountriesFound { generation, result } => match result {
                Ok(found) => {
                    let count = found.countries.len();
                    if self.countries.resolve(generation, Ok(found.countries.clone())) {
                        self.scenario.set_countries(found.temp_id, found.countries);
                        vec![Effect::Notify {
                            level: Level::Success,
                            text: format!("Found {} countries in the uploaded data", count),
                        }]
                    } else {
                        Vec::new()
                    }
                }
                Err(e) => {
                    if self.countries.resolve(generation, Err(e.user_message())) {
                        vec![Effect::error(&e)]
                    } else {
                        Vec::new()
                    }
                }
            },

            Action::AiRequested => {
                let parts = self.view.as_ref().map(|v| v.parts.clone()).unwrap_or_default();
                match self.vehicle_selection() {
                    Some(vehicle) if !parts.is_empty() => {
                        let generation = self.generations.ai.next();
                        self.ai_result.begin(generation);
                        vec![Effect::ProcessBom {
                            generation,
                            request: AiRequest { vehicle, parts },
                        }]
                    }
                    _ => vec![Effect::Notify {
                        level: Level::Error,
                        text: "Load a parts catalog before asking the AI".into(),
                    }],
                }
            }

            Action::AiFinished { generation, result } => {
                let failure = result.as_ref().err().map(Effect::error);
                let applied = self.ai_result.resolve(generation, result.map_err(|e| e.user_message()));
                failure.filter(|_| applied).into_iter().collect()
            }

            Action::SubmitRequested(kind) => {
                if self.job.is_loading() {
                    return vec![Effect::Notify {
                        level: Level::Info,
                        text: "A job is already being submitted".into(),
                    }];
                }
                match JobSubmission::build(self, kind) {
                    Ok(submission) => {
                        let generation = self.generations.job.next();
                        self.job.begin(generation);
                        vec![Effect::SubmitJob {
                            generation,
                            submission,
                        }]
                    }
                    Err(e) => {
                        log::warn!("{:?} submission rejected: {}", kind, e.user_message());
                        self.job = Remote::Error(e.user_message());
                        vec![Effect::error(&e)]
                    }
                }
            }

            Action::JobFinished { generation, result } => {
                let effect = match &result {
                    Ok(_) => Effect::Notify {
                        level: Level::Success,
                        text: "Job accepted by the server".into(),
                    },
                    Err(e) => Effect::error(e),
                };
                if self.job.resolve(generation, result.map_err(|e| e.user_message())) {
                    vec![effect]
                } else {
                    Vec::new()
                }
            }

            Action::StepTo(step) => self.go_to(step),
            Action::Next => match self.step.next() {
                Some(step) => self.go_to(step),
                None => Vec::new(),
            },
            Action::Back => {
                if let Some(step) = self.step.prev() {
                    self.step = step;
                }
                Vec::new()
            }
        }
    }

    fn go_to(&mut self, step: WizardStep) -> Vec<Effect> {
        match step.blocked_reason(self) {
            None => {
                self.step = step;
                Vec::new()
            }
            Some(reason) => vec![Effect::Notify {
                level: Level::Info,
                text: reason.to_string(),
            }],
        }
    }

    /// Walk back to the last step whose prerequisites still hold
    fn settle_step(&mut self) {
        while !self.step.can_enter(self) {
            match self.step.prev() {
                Some(prev) => self.step = prev,
                None => break,
            }
        }
    }

    fn recompute_view(&mut self) -> Vec<Effect> {
        let Some(categories) = self.categories.loaded() else {
            self.view = None;
            return Vec::new();
        };
        match CatalogView::compute(categories, &self.filter, self.process_options()) {
            Ok(view) => {
                self.view = Some(view);
                Vec::new()
            }
            Err(e) => {
                let err = AppError::from(e);
                log::warn!("rejecting category payload: {}", err);
                self.view = None;
                self.categories = Remote::Error(err.user_message());
                vec![Effect::error(&err)]
            }
        }
    }

    fn clear_from_models(&mut self) {
        self.selected_model = None;
        self.models.reset();
        self.clear_from_engines();
    }

    fn clear_from_engines(&mut self) {
        self.selected_engine = None;
        self.engines.reset();
        self.clear_catalog();
    }

    fn clear_catalog(&mut self) {
        self.categories.reset();
        self.filter = TopLevelFilter::All;
        self.view = None;
        self.ai_result.reset();
        self.job.reset();
    }
}
