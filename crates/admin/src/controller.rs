//! City administration state machine.
//!
//! The controller owns the client-side mirror of the server's city
//! list and the state of the add/edit dialogs and delete confirmation.
//! Mutations are response-driven: the list only changes inside an
//! `apply_*` method fed with the server's outcome, never on the
//! optimistic assumption that a request will succeed.
//!
//! The submit and delete flows are split into `begin_*` / `apply_*`
//! pairs around the network round-trip. `begin_*` validates, flips the
//! in-flight guard, and hands back what to send; `apply_*` always
//! clears the guard, so the UI can never be left permanently disabled
//! after a failure. The async `submit`/`delete` helpers compose the two
//! around a [`CityGateway`] call.

use pawhub_core::slug::{derive_slug, sanitize_slug_input};
use pawhub_core::types::DbId;

use crate::gateway::{CityGateway, CityPayload, CityRecord, CountryRef};
use crate::GatewayError;

/// A row in the admin table: the server record plus the country name
/// joined from the countries list at merge time.
#[derive(Debug, Clone)]
pub struct CityRow {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub country_id: DbId,
    pub country_name: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub place_count: i64,
}

/// The in-progress, unsaved form state shared by the add and edit
/// dialogs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub name: String,
    pub slug: String,
    /// Set once the user edits the slug field to a non-empty value;
    /// while set, name edits no longer overwrite the slug.
    pub slug_touched: bool,
    pub country_id: Option<DbId>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Which dialog is open, with its draft.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    Closed,
    Add {
        draft: Draft,
    },
    Edit {
        id: DbId,
        /// Captured when the dialog opened; carried forward into the
        /// merged row because the update response is not trusted to
        /// recompute it mid-edit.
        place_count: i64,
        draft: Draft,
    },
}

/// A validated submission ready to be sent to the Reference API.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingSubmit {
    Create(CityPayload),
    Update { id: DbId, payload: CityPayload },
}

/// State machine behind the city administration screen.
#[derive(Debug)]
pub struct CityAdminController {
    cities: Vec<CityRow>,
    countries: Vec<CountryRef>,
    dialog: Dialog,
    in_flight: bool,
    /// Inline error shown in the open dialog.
    error: Option<String>,
    /// Blocking alert raised by a failed delete.
    alert: Option<String>,
    pending_delete: Option<DbId>,
}

impl CityAdminController {
    /// Seed the controller from an initial server snapshot.
    pub fn new(cities: Vec<CityRecord>, countries: Vec<CountryRef>) -> Self {
        let mut controller = Self {
            cities: Vec::with_capacity(cities.len()),
            countries,
            dialog: Dialog::Closed,
            in_flight: false,
            error: None,
            alert: None,
            pending_delete: None,
        };
        for record in cities {
            let row = controller.row_from_record(&record, record.place_count);
            controller.cities.push(row);
        }
        controller
    }

    // -- Accessors ----------------------------------------------------------

    pub fn cities(&self) -> &[CityRow] {
        &self.cities
    }

    pub fn countries(&self) -> &[CountryRef] {
        &self.countries
    }

    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Dismiss the blocking delete alert.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // -- Dialog lifecycle ---------------------------------------------------

    /// Open the add dialog with an empty draft.
    pub fn open_add(&mut self) {
        self.dialog = Dialog::Add {
            draft: Draft::default(),
        };
        self.error = None;
    }

    /// Open the edit dialog for a row, pre-populating the draft from
    /// the stored record (including coordinates, so an edit that does
    /// not touch them round-trips the stored values).
    ///
    /// Returns `false` if the id is not in the list.
    pub fn open_edit(&mut self, id: DbId) -> bool {
        let Some(row) = self.cities.iter().find(|c| c.id == id) else {
            return false;
        };
        self.dialog = Dialog::Edit {
            id,
            place_count: row.place_count,
            draft: Draft {
                name: row.name.clone(),
                slug: row.slug.clone(),
                // An existing slug counts as manually set: renaming an
                // existing city must not silently change its URL.
                slug_touched: true,
                country_id: Some(row.country_id),
                lat: row.lat,
                lng: row.lng,
            },
        };
        self.error = None;
        true
    }

    /// Dismiss the open dialog without calling the API; the draft is
    /// discarded.
    pub fn cancel(&mut self) {
        self.dialog = Dialog::Closed;
        self.error = None;
    }

    // -- Draft editing ------------------------------------------------------

    /// Update the draft name. While adding a new city and the slug has
    /// not been manually set, the slug follows the name.
    pub fn set_name(&mut self, name: &str) {
        match &mut self.dialog {
            Dialog::Add { draft } => {
                draft.name = name.to_string();
                if !draft.slug_touched {
                    draft.slug = derive_slug(name);
                }
            }
            Dialog::Edit { draft, .. } => {
                draft.name = name.to_string();
            }
            Dialog::Closed => {}
        }
    }

    /// Update the draft slug from raw field input. Disallowed
    /// characters are filtered on every keystroke. A non-empty value
    /// marks the slug as manually set; clearing the field hands
    /// control back to derivation.
    pub fn set_slug(&mut self, raw: &str) {
        if let Some(draft) = self.draft_mut() {
            draft.slug = sanitize_slug_input(raw);
            draft.slug_touched = !draft.slug.is_empty();
        }
    }

    pub fn set_country(&mut self, country_id: Option<DbId>) {
        if let Some(draft) = self.draft_mut() {
            draft.country_id = country_id;
        }
    }

    pub fn set_coordinates(&mut self, lat: Option<f64>, lng: Option<f64>) {
        if let Some(draft) = self.draft_mut() {
            draft.lat = lat;
            draft.lng = lng;
        }
    }

    fn draft_mut(&mut self) -> Option<&mut Draft> {
        match &mut self.dialog {
            Dialog::Add { draft } => Some(draft),
            Dialog::Edit { draft, .. } => Some(draft),
            Dialog::Closed => None,
        }
    }

    // -- Submit flow --------------------------------------------------------

    /// Validate the draft and arm the in-flight guard.
    ///
    /// Returns `None` (and dispatches nothing) when no dialog is open,
    /// a request is already in flight, or the draft fails local
    /// validation; validation failures land in the inline error
    /// channel.
    pub fn begin_submit(&mut self) -> Option<PendingSubmit> {
        if self.in_flight {
            return None;
        }

        let (draft, target) = match &self.dialog {
            Dialog::Closed => return None,
            Dialog::Add { draft } => (draft, None),
            Dialog::Edit { id, draft, .. } => (draft, Some(*id)),
        };

        let name = draft.name.trim();
        if name.is_empty() {
            self.error = Some("City name must not be empty".to_string());
            return None;
        }
        let Some(country_id) = draft.country_id else {
            self.error = Some("Please select a country".to_string());
            return None;
        };

        let payload = CityPayload {
            name: name.to_string(),
            slug: draft.slug.clone(),
            country_id,
            lat: draft.lat,
            lng: draft.lng,
        };

        self.in_flight = true;
        self.error = None;

        Some(match target {
            None => PendingSubmit::Create(payload),
            Some(id) => PendingSubmit::Update { id, payload },
        })
    }

    /// Reconcile a submit outcome into local state.
    ///
    /// Always clears the in-flight guard. On success the server record
    /// is merged (appended for a create, replacing the matching row for
    /// an update with the dialog's captured `place_count` carried
    /// forward) and the dialog closes. On failure the dialog stays open
    /// with the error shown inline.
    ///
    /// A success that lands after the dialog was already dismissed is
    /// still merged by id: the server applied the change, so dropping
    /// the record would leave the mirror stale.
    pub fn apply_submit(&mut self, outcome: Result<CityRecord, GatewayError>) {
        self.in_flight = false;

        let record = match outcome {
            Ok(record) => record,
            Err(err) => {
                self.error = Some(err.user_message());
                return;
            }
        };

        match std::mem::replace(&mut self.dialog, Dialog::Closed) {
            Dialog::Add { .. } => {
                let row = self.row_from_record(&record, record.place_count);
                self.cities.push(row);
            }
            Dialog::Edit { place_count, .. } => {
                let row = self.row_from_record(&record, place_count);
                self.merge_row(row);
            }
            Dialog::Closed => {
                // Cancel raced the round-trip. No captured count to
                // carry forward, so the server's own count is used.
                let row = self.row_from_record(&record, record.place_count);
                self.merge_row(row);
            }
        }
    }

    /// Replace the row with the same id, or append when the mirror has
    /// no trace of it.
    fn merge_row(&mut self, row: CityRow) {
        match self.cities.iter_mut().find(|c| c.id == row.id) {
            Some(existing) => *existing = row,
            None => self.cities.push(row),
        }
    }

    /// Run the full submit round-trip against a gateway.
    pub async fn submit<G: CityGateway + ?Sized>(&mut self, gateway: &G) {
        let Some(pending) = self.begin_submit() else {
            return;
        };
        let outcome = match &pending {
            PendingSubmit::Create(payload) => gateway.create_city(payload).await,
            PendingSubmit::Update { id, payload } => gateway.update_city(*id, payload).await,
        };
        self.apply_submit(outcome);
    }

    // -- Delete flow --------------------------------------------------------

    /// Whether the delete affordance is enabled for a row. Cities with
    /// dependent places are protected.
    pub fn can_delete(&self, id: DbId) -> bool {
        self.cities
            .iter()
            .find(|c| c.id == id)
            .is_some_and(|c| c.place_count == 0)
    }

    /// Arm a delete after the user confirms. Returns the id to send,
    /// or `None` when the row is protected, unknown, or another delete
    /// is already pending.
    pub fn begin_delete(&mut self, id: DbId) -> Option<DbId> {
        if self.pending_delete.is_some() || !self.can_delete(id) {
            return None;
        }
        self.pending_delete = Some(id);
        Some(id)
    }

    /// Reconcile a delete outcome. Success removes the row; failure
    /// leaves it in place and raises the blocking alert.
    pub fn apply_delete(&mut self, id: DbId, outcome: Result<(), GatewayError>) {
        self.pending_delete = None;
        match outcome {
            Ok(()) => self.cities.retain(|c| c.id != id),
            Err(err) => self.alert = Some(err.user_message()),
        }
    }

    /// Run the full delete round-trip against a gateway.
    pub async fn delete<G: CityGateway + ?Sized>(&mut self, gateway: &G, id: DbId) {
        let Some(id) = self.begin_delete(id) else {
            return;
        };
        let outcome = gateway.delete_city(id).await;
        self.apply_delete(id, outcome);
    }

    // -- Internal -----------------------------------------------------------

    /// Build a table row from a server record, joining the country
    /// name from the countries list and pinning the given dependent
    /// count.
    fn row_from_record(&self, record: &CityRecord, place_count: i64) -> CityRow {
        let country_name = self
            .countries
            .iter()
            .find(|c| c.id == record.country_id)
            .map(|c| c.name.clone());
        CityRow {
            id: record.id,
            name: record.name.clone(),
            slug: record.slug.clone(),
            country_id: record.country_id,
            country_name,
            lat: record.lat,
            lng: record.lng,
            place_count,
        }
    }
}
