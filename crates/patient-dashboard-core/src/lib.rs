//! Patient Dashboard Core Library
//!
//! Data layer of a patient records dashboard: loads demo users once, turns
//! them into patient records and keeps them in memory for the session.
//!
//! # Architecture
//!
//! ```text
//! User source (HTTP / fixture)
//!         │
//!         ▼
//!  Record Transformer ──► PatientStore ◄── add / edit / delete
//!                              │              (validated forms only)
//!                              ▼
//!          Search → Gender Filter → Sort → Paginate
//!                              │
//!                              ▼
//!                   ViewPage + chart data ──► view layer (FFI)
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, Gender, form data)
//! - [`transform`]: Raw user record to patient record
//! - [`loader`]: One-time initial fetch
//! - [`pipeline`]: Search, filter, sort and pagination of the table
//! - [`store`]: In-memory patient list and its mutations
//! - [`validation`]: Form validation
//! - [`stats`]: Chart summaries
//! - [`dashboard`]: Session state and intent handlers

pub mod dashboard;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod stats;
pub mod store;
pub mod transform;
pub mod validation;

// Re-export commonly used types
pub use dashboard::{ChartData, Dashboard, DashboardError, FormDialog, Notice};
pub use loader::{load_initial_patients, InitialPatientData};
pub use models::{Address, Gender, Patient, PatientFormData, ValidatedForm};
pub use pipeline::{derive_view, GenderFilter, SortKey, SortOrder, ViewPage, ViewQuery};
pub use store::{PatientStore, StoreError};
pub use validation::{validate_form, ValidationErrors};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use patient_dashboard_source::{FixtureUserSource, HttpUserSource, SourceConfig, SourceError};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum DashboardFfiError {
    #[error("Source error: {0}")]
    SourceError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<SourceError> for DashboardFfiError {
    fn from(e: SourceError) -> Self {
        DashboardFfiError::SourceError(e.to_string())
    }
}

impl From<DashboardError> for DashboardFfiError {
    fn from(e: DashboardError) -> Self {
        match e {
            DashboardError::Store(e @ StoreError::NotFound(_)) => {
                DashboardFfiError::NotFound(e.to_string())
            }
            DashboardError::Store(e) => DashboardFfiError::InternalError(e.to_string()),
            other => DashboardFfiError::InvalidInput(other.to_string()),
        }
    }
}

impl From<pipeline::PipelineError> for DashboardFfiError {
    fn from(e: pipeline::PipelineError) -> Self {
        DashboardFfiError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for DashboardFfiError {
    fn from(e: serde_json::Error) -> Self {
        DashboardFfiError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for DashboardFfiError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DashboardFfiError::InternalError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

fn wrap(dashboard: Dashboard) -> Arc<PatientDashboard> {
    Arc::new(PatientDashboard {
        inner: Arc::new(Mutex::new(dashboard)),
    })
}

/// Fetch patients over HTTP and open a session.
///
/// With no `base_url` the source is configured from the environment
/// (`PATIENT_SOURCE_URL`, `PATIENT_SOURCE_LIMIT`, `.env`). A failed fetch
/// still opens a session; see [`PatientDashboard::load_error`].
#[uniffi::export]
pub fn open_dashboard(base_url: Option<String>) -> Result<Arc<PatientDashboard>, DashboardFfiError> {
    let config = match base_url {
        Some(url) => SourceConfig::from_env_values(Some(url), None)?,
        None => SourceConfig::from_env()?,
    };
    let source = HttpUserSource::new(config)?;
    Ok(wrap(Dashboard::from_initial(load_initial_patients(&source))))
}

/// Open a session from a users payload already in hand.
#[uniffi::export]
pub fn open_dashboard_with_payload(json: String) -> Arc<PatientDashboard> {
    let source = FixtureUserSource::from_payload(json);
    wrap(Dashboard::from_initial(load_initial_patients(&source)))
}

/// Open a session with no patients (for testing).
#[uniffi::export]
pub fn open_empty_dashboard() -> Arc<PatientDashboard> {
    wrap(Dashboard::empty())
}

/// Install the global log subscriber. Returns false if one was already set.
///
/// `filter` uses `RUST_LOG` syntax, e.g. `"patient_dashboard_core=debug"`.
#[uniffi::export]
pub fn init_logging(filter: String) -> Result<bool, DashboardFfiError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_new(&filter).map_err(|e| DashboardFfiError::InvalidInput(e.to_string()))?;

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok())
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe dashboard session for FFI.
#[derive(uniffi::Object)]
pub struct PatientDashboard {
    inner: Arc<Mutex<Dashboard>>,
}

#[uniffi::export]
impl PatientDashboard {
    // =========================================================================
    // Session
    // =========================================================================

    /// Message to show if the initial load failed.
    pub fn load_error(&self) -> Result<Option<String>, DashboardFfiError> {
        let dash = self.inner.lock()?;
        Ok(dash.load_error().map(str::to_string))
    }

    /// Full list, most recently added first.
    pub fn patients(&self) -> Result<Vec<FfiPatient>, DashboardFfiError> {
        let dash = self.inner.lock()?;
        Ok(dash.patients().iter().cloned().map(|p| p.into()).collect())
    }

    /// Current table controls.
    pub fn controls(&self) -> Result<FfiControls, DashboardFfiError> {
        let dash = self.inner.lock()?;
        let (sort_key, sort_order) = dash.sort();
        Ok(FfiControls {
            search_term: dash.search_term().to_string(),
            gender_filter: dash.gender_filter().as_str().to_string(),
            sort_key: sort_key.map(|k| k.as_str().to_string()),
            sort_order: sort_order.as_str().to_string(),
            page: dash.page() as u32,
        })
    }

    // =========================================================================
    // Table
    // =========================================================================

    /// Visible page of the table.
    pub fn view(&self) -> Result<FfiViewPage, DashboardFfiError> {
        let dash = self.inner.lock()?;
        Ok(dash.view().into())
    }

    /// Visible page of the table as JSON.
    pub fn view_json(&self) -> Result<String, DashboardFfiError> {
        let dash = self.inner.lock()?;
        Ok(serde_json::to_string(&dash.view())?)
    }

    pub fn set_search(&self, term: String) -> Result<(), DashboardFfiError> {
        let mut dash = self.inner.lock()?;
        dash.set_search(term);
        Ok(())
    }

    /// `filter` is one of "all", "male", "female", "other".
    pub fn set_gender_filter(&self, filter: String) -> Result<(), DashboardFfiError> {
        let filter: GenderFilter = filter.parse()?;
        let mut dash = self.inner.lock()?;
        dash.set_gender_filter(filter);
        Ok(())
    }

    /// `key` is a camelCase column name, e.g. "lastName".
    pub fn toggle_sort(&self, key: String) -> Result<(), DashboardFfiError> {
        let key: SortKey = key.parse()?;
        let mut dash = self.inner.lock()?;
        dash.toggle_sort(key);
        Ok(())
    }

    /// Go to a page; returns the page actually selected.
    pub fn set_page(&self, page: u32) -> Result<u32, DashboardFfiError> {
        let mut dash = self.inner.lock()?;
        Ok(dash.set_page(page as usize) as u32)
    }

    // =========================================================================
    // Form
    // =========================================================================

    pub fn begin_add(&self) -> Result<(), DashboardFfiError> {
        let mut dash = self.inner.lock()?;
        dash.begin_add();
        Ok(())
    }

    /// Open the form for patient `id` and return its prefilled values.
    pub fn begin_edit(&self, id: i64) -> Result<FfiPatientForm, DashboardFfiError> {
        let mut dash = self.inner.lock()?;
        Ok(dash.begin_edit(id)?.into())
    }

    pub fn cancel_dialog(&self) -> Result<(), DashboardFfiError> {
        let mut dash = self.inner.lock()?;
        dash.cancel_dialog();
        Ok(())
    }

    /// Field errors for `form`; empty when it would be accepted.
    pub fn check_form(&self, form: FfiPatientForm) -> Vec<FfiFieldError> {
        match validate_form(&form.into()) {
            Ok(_) => Vec::new(),
            Err(errors) => errors.errors.into_iter().map(|e| e.into()).collect(),
        }
    }

    /// Submit the open form.
    pub fn submit_form(&self, form: FfiPatientForm) -> Result<FfiNotice, DashboardFfiError> {
        let mut dash = self.inner.lock()?;
        Ok(dash.submit_form(&form.into())?.into())
    }

    // =========================================================================
    // Delete
    // =========================================================================

    pub fn request_delete(&self, id: i64) -> Result<(), DashboardFfiError> {
        let mut dash = self.inner.lock()?;
        dash.request_delete(id);
        Ok(())
    }

    pub fn cancel_delete(&self) -> Result<(), DashboardFfiError> {
        let mut dash = self.inner.lock()?;
        dash.cancel_delete();
        Ok(())
    }

    pub fn confirm_delete(&self) -> Result<Option<FfiNotice>, DashboardFfiError> {
        let mut dash = self.inner.lock()?;
        Ok(dash.confirm_delete().map(|n| n.into()))
    }

    // =========================================================================
    // Charts
    // =========================================================================

    pub fn gender_distribution(&self) -> Result<Vec<FfiGenderSlice>, DashboardFfiError> {
        let dash = self.inner.lock()?;
        Ok(dash.charts().gender.into_iter().map(|s| s.into()).collect())
    }

    pub fn age_groups(&self) -> Result<Vec<FfiAgeGroup>, DashboardFfiError> {
        let dash = self.inner.lock()?;
        Ok(dash.charts().age_groups.into_iter().map(|g| g.into()).collect())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub blood_group: String,
    pub height: f64,
    pub weight: f64,
    pub address_city: String,
    pub address_street: Option<String>,
    pub admission_department: String,
    pub image: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            first_name: patient.first_name,
            last_name: patient.last_name,
            age: patient.age,
            gender: patient.gender.as_str().to_string(),
            email: patient.email,
            phone: patient.phone,
            birth_date: patient.birth_date,
            blood_group: patient.blood_group,
            height: patient.height,
            weight: patient.weight,
            address_city: patient.address.city,
            address_street: patient.address.street,
            admission_department: patient.admission_department,
            image: patient.image,
        }
    }
}

/// FFI-safe form values.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientForm {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub blood_group: String,
    pub height: f64,
    pub weight: f64,
    pub address_city: String,
    pub admission_department: String,
    pub image: String,
}

impl From<PatientFormData> for FfiPatientForm {
    fn from(form: PatientFormData) -> Self {
        Self {
            id: form.id,
            first_name: form.first_name,
            last_name: form.last_name,
            age: form.age,
            gender: form.gender,
            email: form.email,
            phone: form.phone,
            birth_date: form.birth_date,
            blood_group: form.blood_group,
            height: form.height,
            weight: form.weight,
            address_city: form.address_city,
            admission_department: form.admission_department,
            image: form.image,
        }
    }
}

impl From<FfiPatientForm> for PatientFormData {
    fn from(form: FfiPatientForm) -> Self {
        PatientFormData {
            id: form.id,
            first_name: form.first_name,
            last_name: form.last_name,
            age: form.age,
            gender: form.gender,
            email: form.email,
            phone: form.phone,
            birth_date: form.birth_date,
            blood_group: form.blood_group,
            height: form.height,
            weight: form.weight,
            address_city: form.address_city,
            admission_department: form.admission_department,
            image: form.image,
        }
    }
}

/// FFI-safe table controls.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiControls {
    pub search_term: String,
    pub gender_filter: String,
    pub sort_key: Option<String>,
    pub sort_order: String,
    pub page: u32,
}

/// FFI-safe table page.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiViewPage {
    pub rows: Vec<FfiPatient>,
    pub page: u32,
    pub total_pages: u32,
    pub total_matches: u32,
}

impl From<ViewPage> for FfiViewPage {
    fn from(view: ViewPage) -> Self {
        Self {
            rows: view.rows.into_iter().map(|p| p.into()).collect(),
            page: view.page as u32,
            total_pages: view.total_pages as u32,
            total_matches: view.total_matches as u32,
        }
    }
}

/// FFI-safe confirmation message.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNotice {
    pub title: String,
    pub description: String,
    pub destructive: bool,
}

impl From<Notice> for FfiNotice {
    fn from(notice: Notice) -> Self {
        Self {
            title: notice.title,
            description: notice.description,
            destructive: notice.destructive,
        }
    }
}

/// FFI-safe field error.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFieldError {
    pub field: String,
    pub message: String,
}

impl From<validation::FieldError> for FfiFieldError {
    fn from(error: validation::FieldError) -> Self {
        Self {
            field: error.field.to_string(),
            message: error.message,
        }
    }
}

/// FFI-safe gender pie slice.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiGenderSlice {
    pub gender: String,
    pub label: String,
    pub count: u32,
    pub percent: u32,
}

impl From<stats::GenderSlice> for FfiGenderSlice {
    fn from(slice: stats::GenderSlice) -> Self {
        Self {
            gender: slice.gender.as_str().to_string(),
            label: slice.label,
            count: slice.count as u32,
            percent: slice.percent,
        }
    }
}

/// FFI-safe age histogram bar.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAgeGroup {
    pub name: String,
    pub count: u32,
}

impl From<stats::AgeGroupCount> for FfiAgeGroup {
    fn from(group: stats::AgeGroupCount) -> Self {
        Self {
            name: group.name,
            count: group.count as u32,
        }
    }
}
