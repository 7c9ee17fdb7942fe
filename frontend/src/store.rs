//! Selection state: the venue list, the origin list and the selected venue
//! id. Replacing either list is atomic, and a selection whose id no longer
//! resolves against the new venue list is cleared rather than left dangling.

use shared::{Origin, Venue};

#[derive(Default)]
pub struct PlannerStore {
    venues: Vec<Venue>,
    origins: Vec<Origin>,
    selected_id: Option<String>,
}

impl PlannerStore {
    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn origins(&self) -> &[Origin] {
        &self.origins
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected_venue(&self) -> Option<&Venue> {
        let id = self.selected_id.as_deref()?;
        self.venues.iter().find(|v| v.id == id)
    }

    /// Replace the venue set wholesale. A stale selection is auto-cleared.
    pub fn set_venues(&mut self, venues: Vec<Venue>) {
        self.venues = venues;
        if let Some(id) = self.selected_id.as_deref() {
            if !self.venues.iter().any(|v| v.id == id) {
                self.selected_id = None;
            }
        }
    }

    /// Replace the origin set wholesale. Origins do not carry the selection,
    /// so it is left untouched.
    pub fn set_origins(&mut self, origins: Vec<Origin>) {
        self.origins = origins;
    }

    /// Set or clear the selection. Selecting an id not present in the venue
    /// set is a no-op. Returns whether the selection actually changed.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        let next = match id {
            Some(id) if self.venues.iter().any(|v| v.id == id) => Some(id.to_string()),
            Some(_) => return false,
            None => None,
        };
        if next == self.selected_id {
            return false;
        }
        self.selected_id = next;
        true
    }
}
