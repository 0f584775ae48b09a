//! Dashboard session state and intent handlers.
//!
//! Holds everything the page keeps between user actions: the patient store,
//! the table controls, the form dialog and a pending delete. Each intent is a
//! plain method; derived data ([`Dashboard::view`], [`Dashboard::charts`]) is
//! recomputed from scratch whenever it is asked for.

use serde::Serialize;
use thiserror::Error;

use crate::loader::InitialPatientData;
use crate::models::{Patient, PatientFormData};
use crate::pipeline::{
    derive_view, filter_patients, total_pages, GenderFilter, PipelineError, SortKey, SortOrder,
    ViewPage, ViewQuery, PAGE_SIZE,
};
use crate::stats::{age_group_histogram, gender_distribution, AgeGroupCount, GenderSlice};
use crate::store::{PatientStore, StoreError};
use crate::validation::{validate_form, ValidationErrors};

/// Dashboard errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("No patient form is open")]
    DialogClosed,
}

pub type DashboardResult<T> = Result<T, DashboardError>;

/// State of the create/edit dialog.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormDialog {
    #[default]
    Closed,
    Adding,
    /// Prefilled with the record being edited
    Editing(PatientFormData),
}

/// Short confirmation shown after a change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub destructive: bool,
}

impl Notice {
    fn added(name: &str) -> Self {
        Self {
            title: "Patient Added".into(),
            description: format!("{} added to records.", name),
            destructive: false,
        }
    }

    fn updated(name: &str) -> Self {
        Self {
            title: "Patient Updated".into(),
            description: format!("{}'s record updated.", name),
            destructive: false,
        }
    }

    fn deleted() -> Self {
        Self {
            title: "Patient Deleted".into(),
            description: "Patient record has been successfully removed.".into(),
            destructive: true,
        }
    }
}

/// Data for both charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub gender: Vec<GenderSlice>,
    pub age_groups: Vec<AgeGroupCount>,
}

/// One dashboard session.
#[derive(Debug, Clone)]
pub struct Dashboard {
    store: PatientStore,
    load_error: Option<String>,
    search_term: String,
    gender_filter: GenderFilter,
    sort_key: Option<SortKey>,
    sort_order: SortOrder,
    page: usize,
    dialog: FormDialog,
    pending_delete: Option<i64>,
}

impl Dashboard {
    /// Start a session from the initial load.
    pub fn from_initial(initial: InitialPatientData) -> Self {
        Self {
            store: PatientStore::from_patients(initial.patients),
            load_error: initial.error,
            search_term: String::new(),
            gender_filter: GenderFilter::All,
            sort_key: None,
            sort_order: SortOrder::Asc,
            page: 1,
            dialog: FormDialog::Closed,
            pending_delete: None,
        }
    }

    /// Start a session with no patients and no error.
    pub fn empty() -> Self {
        Self::from_initial(InitialPatientData::default())
    }

    pub fn patients(&self) -> &[Patient] {
        self.store.patients()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn gender_filter(&self) -> GenderFilter {
        self.gender_filter
    }

    pub fn sort(&self) -> (Option<SortKey>, SortOrder) {
        (self.sort_key, self.sort_order)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn dialog(&self) -> &FormDialog {
        &self.dialog
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    // =========================================================================
    // Table controls
    // =========================================================================

    /// Current pipeline inputs.
    pub fn query(&self) -> ViewQuery {
        ViewQuery {
            search_term: self.search_term.clone(),
            gender_filter: self.gender_filter,
            sort_key: self.sort_key,
            sort_order: self.sort_order,
            page: self.page,
            page_size: PAGE_SIZE,
        }
    }

    /// The visible page of the table.
    pub fn view(&self) -> ViewPage {
        derive_view(self.store.patients(), &self.query())
    }

    /// Page count for the current search and filter.
    pub fn total_pages(&self) -> usize {
        let matches = filter_patients(self.store.patients(), &self.search_term, self.gender_filter);
        total_pages(matches.len(), PAGE_SIZE)
    }

    /// Change the search term and go back to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    /// Change the gender filter and go back to the first page.
    pub fn set_gender_filter(&mut self, filter: GenderFilter) {
        self.gender_filter = filter;
        self.page = 1;
    }

    /// Click on a column header: same column flips the order, a new column
    /// starts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == Some(key) {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_key = Some(key);
            self.sort_order = SortOrder::Asc;
        }
    }

    /// Go to a page, clamped to the pages that exist (at least page 1).
    pub fn set_page(&mut self, page: usize) -> usize {
        let last = self.total_pages().max(1);
        self.page = page.clamp(1, last);
        self.page
    }

    pub fn next_page(&mut self) -> usize {
        self.set_page(self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.set_page(self.page.saturating_sub(1))
    }

    // =========================================================================
    // Form dialog
    // =========================================================================

    /// Open an empty form.
    pub fn begin_add(&mut self) {
        self.dialog = FormDialog::Adding;
    }

    /// Open the form prefilled with patient `id`.
    pub fn begin_edit(&mut self, id: i64) -> DashboardResult<PatientFormData> {
        let patient = self
            .store
            .get_patient(id)
            .ok_or(StoreError::NotFound(id))?;
        let form = PatientFormData::from_patient(patient);
        self.dialog = FormDialog::Editing(form.clone());
        Ok(form)
    }

    pub fn cancel_dialog(&mut self) {
        self.dialog = FormDialog::Closed;
    }

    /// Submit the open form. Invalid input leaves the dialog open and the
    /// store untouched.
    pub fn submit_form(&mut self, data: &PatientFormData) -> DashboardResult<Notice> {
        let editing_id = match &self.dialog {
            FormDialog::Closed => return Err(DashboardError::DialogClosed),
            FormDialog::Adding => None,
            FormDialog::Editing(prefill) => prefill.id,
        };

        let valid = validate_form(data)?;

        let notice = match editing_id {
            Some(id) => {
                self.store.update_patient(id, &valid)?;
                Notice::updated(&valid.full_name())
            }
            None => {
                self.store.add_patient(&valid)?;
                Notice::added(&valid.full_name())
            }
        };

        self.dialog = FormDialog::Closed;
        Ok(notice)
    }

    // =========================================================================
    // Delete confirmation
    // =========================================================================

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the pending patient. A record that is already gone counts as
    /// deleted. Returns `None` when nothing was pending.
    pub fn confirm_delete(&mut self) -> Option<Notice> {
        let id = self.pending_delete.take()?;
        self.store.delete_patient(id);

        // Stay on a page that still exists.
        let last = self.total_pages().max(1);
        self.page = self.page.min(last);

        Some(Notice::deleted())
    }

    // =========================================================================
    // Charts
    // =========================================================================

    /// Chart data over the full list.
    pub fn charts(&self) -> ChartData {
        ChartData {
            gender: gender_distribution(self.store.patients()),
            age_groups: age_group_histogram(self.store.patients()),
        }
    }
}
