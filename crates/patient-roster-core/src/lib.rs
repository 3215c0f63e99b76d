//! Patient Roster Core Library
//!
//! Derived-state pipeline behind a searchable, filterable, paged patient roster.
//!
//! # Architecture
//!
//! ```text
//!   Patient source (external) ──► raw collection ──► issue vocabulary
//!                                        │
//!                       ┌────────────────▼────────────────┐
//!   search text ───────►│  Filter: name ⊇ search          │
//!   active issues ─────►│          AND issue ∈ active     │
//!                       └────────────────┬────────────────┘
//!                       ┌────────────────▼────────────────┐
//!   sort order ────────►│  Sort: stable, by age           │
//!                       └────────────────┬────────────────┘
//!                       ┌────────────────▼────────────────┐
//!   page, page size ───►│  Paginate: slice + metadata     │
//!                       └────────────────┬────────────────┘
//!                                        ▼
//!                             View renderer (host UI)
//! ```
//!
//! # Core Principle
//!
//! **The pipeline never fails.** Empty results, out-of-range pages and missing contact
//! data all degrade to an empty or clamped view.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, ContactCard, FilterState, PageState, etc.)
//! - [`pipeline`]: Filter, sort and pagination stages plus [`pipeline::recompute`]
//! - [`session`]: State holder applying the page-reset rules
//! - [`config`]: Page sizes, pager width and absent-field sentinel

pub mod config;
pub mod models;
pub mod pipeline;
pub mod session;

// Re-export commonly used types
pub use config::{ConfigError, RosterConfig};
pub use models::{
    Contact, ContactCard, ContactField, FilterState, PageState, Patient, SortOrder, ViewMode,
};
pub use pipeline::{recompute, PageMetadata, Paginator, RosterView};
pub use session::RosterSession;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum RosterError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for RosterError {
    fn from(e: config::ConfigError) -> Self {
        RosterError::Configuration(e.to_string())
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(e: serde_json::Error) -> Self {
        RosterError::Serialization(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for RosterError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        RosterError::Internal(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a roster over the given patients with the default configuration.
#[uniffi::export]
pub fn open_roster(patients: Vec<FfiPatient>) -> Arc<PatientRosterCore> {
    let records = patients.into_iter().map(Patient::from).collect();
    Arc::new(PatientRosterCore {
        session: Mutex::new(RosterSession::new(records)),
    })
}

/// Open a roster with a JSON configuration (missing keys take defaults).
#[uniffi::export]
pub fn open_roster_with_config(
    patients: Vec<FfiPatient>,
    config_json: String,
) -> Result<Arc<PatientRosterCore>, RosterError> {
    let config = RosterConfig::from_json(&config_json)?;
    let records = patients.into_iter().map(Patient::from).collect();
    Ok(Arc::new(PatientRosterCore {
        session: Mutex::new(RosterSession::with_config(records, config)),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe session wrapper for FFI.
///
/// Each call is one complete recomputation pass; the lock only serializes host calls.
#[derive(uniffi::Object)]
pub struct PatientRosterCore {
    session: Mutex<RosterSession>,
}

#[uniffi::export]
impl PatientRosterCore {
    // =========================================================================
    // Rendering
    // =========================================================================

    /// Build the view for the current state.
    pub fn render(&self) -> Result<FfiRosterView, RosterError> {
        let session = self.session.lock()?;
        let sentinel = session.config().absent_sentinel.clone();
        Ok(FfiRosterView::from_view(
            session.view(),
            session.view_mode(),
            &sentinel,
        ))
    }

    /// Serialize the current view as JSON.
    pub fn render_json(&self) -> Result<String, RosterError> {
        let session = self.session.lock()?;
        Ok(serde_json::to_string(&session.view())?)
    }

    /// Issues available as filter toggles.
    pub fn issue_vocabulary(&self) -> Result<Vec<String>, RosterError> {
        let session = self.session.lock()?;
        Ok(session.issue_vocabulary().iter().cloned().collect())
    }

    /// Page sizes offered by the page-size selector.
    pub fn page_sizes(&self) -> Result<Vec<u32>, RosterError> {
        let session = self.session.lock()?;
        Ok(session
            .config()
            .page_sizes
            .iter()
            .map(|s| to_u32(*s))
            .collect())
    }

    // =========================================================================
    // Collection
    // =========================================================================

    /// Replace the patient collection (e.g. after a refetch).
    pub fn reload(&self, patients: Vec<FfiPatient>) -> Result<(), RosterError> {
        let mut session = self.session.lock()?;
        session.reload(patients.into_iter().map(Patient::from).collect());
        Ok(())
    }

    // =========================================================================
    // Filter Operations
    // =========================================================================

    pub fn set_search_text(&self, search_text: String) -> Result<(), RosterError> {
        let mut session = self.session.lock()?;
        session.set_search_text(search_text);
        Ok(())
    }

    /// Flip one issue filter. Returns false for issues outside the vocabulary.
    pub fn toggle_issue(&self, issue: String) -> Result<bool, RosterError> {
        let mut session = self.session.lock()?;
        Ok(session.toggle_issue(&issue))
    }

    pub fn set_active_issues(&self, issues: Vec<String>) -> Result<(), RosterError> {
        let mut session = self.session.lock()?;
        session.set_active_issues(issues);
        Ok(())
    }

    pub fn clear_filters(&self) -> Result<(), RosterError> {
        let mut session = self.session.lock()?;
        session.clear_filters();
        Ok(())
    }

    pub fn set_sort_order(&self, sort_order: FfiSortOrder) -> Result<(), RosterError> {
        let mut session = self.session.lock()?;
        session.set_sort_order(sort_order.into());
        Ok(())
    }

    /// Advance the sort control and return the new order.
    pub fn cycle_sort_order(&self) -> Result<FfiSortOrder, RosterError> {
        let mut session = self.session.lock()?;
        Ok(session.cycle_sort_order().into())
    }

    // =========================================================================
    // Page Operations
    // =========================================================================

    /// Change the page size; must be one of [`Self::page_sizes`].
    pub fn set_page_size(&self, page_size: u32) -> Result<(), RosterError> {
        let mut session = self.session.lock()?;
        if session.set_page_size(page_size as usize) {
            Ok(())
        } else {
            Err(RosterError::InvalidInput(format!(
                "page size {} is not one of {:?}",
                page_size,
                session.config().page_sizes
            )))
        }
    }

    /// Jump to a page (clamped). Returns the page actually shown.
    pub fn go_to_page(&self, page: u32) -> Result<u32, RosterError> {
        let mut session = self.session.lock()?;
        Ok(to_u32(session.go_to_page(page as usize)))
    }

    /// Returns false when already on the first page.
    pub fn previous_page(&self) -> Result<bool, RosterError> {
        let mut session = self.session.lock()?;
        Ok(session.previous_page())
    }

    /// Returns false when already on the last page.
    pub fn next_page(&self) -> Result<bool, RosterError> {
        let mut session = self.session.lock()?;
        Ok(session.next_page())
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    pub fn set_view_mode(&self, view_mode: FfiViewMode) -> Result<(), RosterError> {
        let mut session = self.session.lock()?;
        session.set_view_mode(view_mode.into());
        Ok(())
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe contact entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiContact {
    pub address: String,
    pub number: String,
    pub email: String,
}

impl From<FfiContact> for Contact {
    fn from(contact: FfiContact) -> Self {
        Contact {
            address: contact.address,
            number: contact.number,
            email: contact.email,
        }
    }
}

/// FFI-safe patient as supplied by the host's data source.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub patient_id: u32,
    pub patient_name: String,
    pub age: u32,
    pub photo_url: Option<String>,
    pub contact: Vec<FfiContact>,
    pub medical_issue: String,
}

impl From<FfiPatient> for Patient {
    fn from(patient: FfiPatient) -> Self {
        Patient {
            patient_id: patient.patient_id,
            patient_name: patient.patient_name,
            age: patient.age,
            photo_url: patient.photo_url,
            contact: patient.contact.into_iter().map(Contact::from).collect(),
            medical_issue: patient.medical_issue,
        }
    }
}

/// Display-ready row for the table and card layouts.
///
/// Contact fields are `None` when absent; `*_display` carries the sentinel instead.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientRow {
    pub patient_id: u32,
    pub display_id: String,
    pub patient_name: String,
    pub age: u32,
    pub photo_url: Option<String>,
    pub medical_issue: String,
    pub address: Option<String>,
    pub number: Option<String>,
    pub email: Option<String>,
    pub address_display: String,
    pub number_display: String,
    pub email_display: String,
}

impl FfiPatientRow {
    fn from_patient(patient: &Patient, sentinel: &str) -> Self {
        let card = patient.contact_card();
        Self {
            patient_id: patient.patient_id,
            display_id: patient.display_id(),
            patient_name: patient.patient_name.clone(),
            age: patient.age,
            photo_url: patient.photo_url.clone(),
            medical_issue: patient.medical_issue.clone(),
            address_display: card.address.display_or(sentinel).to_string(),
            number_display: card.number.display_or(sentinel).to_string(),
            email_display: card.email.display_or(sentinel).to_string(),
            address: card.address.as_deref().map(str::to_string),
            number: card.number.as_deref().map(str::to_string),
            email: card.email.as_deref().map(str::to_string),
        }
    }
}

/// FFI-safe pager metadata.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPageMetadata {
    pub page_count: u32,
    pub current_page: u32,
    pub page_size: u32,
    /// `None` together with `visible_last` when nothing is shown
    pub visible_first: Option<u32>,
    pub visible_last: Option<u32>,
    pub caption: Option<String>,
    pub page_window: Vec<u32>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

/// FFI-safe view for one render.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRosterView {
    pub rows: Vec<FfiPatientRow>,
    pub issue_vocabulary: Vec<String>,
    pub metadata: FfiPageMetadata,
    pub filtered_count: u32,
    pub total_count: u32,
    pub is_empty: bool,
    pub view_mode: FfiViewMode,
}

impl FfiRosterView {
    fn from_view(view: RosterView, view_mode: ViewMode, sentinel: &str) -> Self {
        let caption = view.caption();
        let metadata = FfiPageMetadata {
            page_count: to_u32(view.metadata.page_count),
            current_page: to_u32(view.metadata.current_page),
            page_size: to_u32(view.metadata.page_size),
            visible_first: view.metadata.visible_range.map(|(first, _)| to_u32(first)),
            visible_last: view.metadata.visible_range.map(|(_, last)| to_u32(last)),
            caption,
            page_window: view.metadata.page_window.iter().map(|p| to_u32(*p)).collect(),
            can_go_previous: view.metadata.can_go_previous,
            can_go_next: view.metadata.can_go_next,
        };

        Self {
            rows: view
                .patients
                .iter()
                .map(|p| FfiPatientRow::from_patient(p, sentinel))
                .collect(),
            is_empty: view.is_empty(),
            issue_vocabulary: view.issue_vocabulary.into_iter().collect(),
            metadata,
            filtered_count: to_u32(view.filtered_count),
            total_count: to_u32(view.total_count),
            view_mode: view_mode.into(),
        }
    }
}

/// FFI-safe sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiSortOrder {
    None,
    Ascending,
    Descending,
}

impl From<FfiSortOrder> for SortOrder {
    fn from(order: FfiSortOrder) -> Self {
        match order {
            FfiSortOrder::None => SortOrder::None,
            FfiSortOrder::Ascending => SortOrder::Ascending,
            FfiSortOrder::Descending => SortOrder::Descending,
        }
    }
}

impl From<SortOrder> for FfiSortOrder {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::None => FfiSortOrder::None,
            SortOrder::Ascending => FfiSortOrder::Ascending,
            SortOrder::Descending => FfiSortOrder::Descending,
        }
    }
}

/// FFI-safe view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiViewMode {
    Table,
    Cards,
}

impl From<FfiViewMode> for ViewMode {
    fn from(mode: FfiViewMode) -> Self {
        match mode {
            FfiViewMode::Table => ViewMode::Table,
            FfiViewMode::Cards => ViewMode::Cards,
        }
    }
}

impl From<ViewMode> for FfiViewMode {
    fn from(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Table => FfiViewMode::Table,
            ViewMode::Cards => FfiViewMode::Cards,
        }
    }
}
