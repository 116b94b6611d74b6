//! UI Components
//!
//! Reusable Leptos components.

mod ai_panel;
mod bom_table;
mod catalog_step;
mod category_filter;
mod category_tree_view;
mod chat_widget;
mod csv_upload;
mod remote_select;
mod review_panel;
mod scenario_form;
mod step_bar;
mod toasts;
mod tree_row;
mod vehicle_selector;

pub use ai_panel::AiPanel;
pub use bom_table::BomTable;
pub use catalog_step::CatalogStep;
pub use category_filter::CategoryFilter;
pub use category_tree_view::CategoryTreeView;
pub use chat_widget::ChatWidget;
pub use csv_upload::CsvUpload;
pub use remote_select::{FieldView, RemoteSelect};
pub use review_panel::ReviewPanel;
pub use scenario_form::ScenarioFormView;
pub use step_bar::{StepBar, WizardNav};
pub use toasts::Toasts;
pub use tree_row::TreeRow;
pub use vehicle_selector::VehicleSelector;
