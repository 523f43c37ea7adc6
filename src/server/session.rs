use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use uuid::Uuid;

use crate::data::Dataset;
use crate::state::{DashboardState, Selection, SelectionEvent};
use crate::views::DerivedViews;

struct Entry {
    state: DashboardState,
    last_seen: Instant,
}

/// Per-session dashboard state for HTTP clients.
///
/// Each session owns its own selection; all sessions share one read-only
/// dataset.  The lock is held only for a single select/derive.
pub struct SessionStore {
    dataset: Arc<Dataset>,
    /// Default sector after fallback, so the warning is logged once.
    initial_sector: String,
    capacity: usize,
    sessions: Mutex<HashMap<Uuid, Entry>>,
}

impl SessionStore {
    pub fn new(dataset: Arc<Dataset>, default_sector: impl Into<String>, capacity: usize) -> Self {
        let default_sector: String = default_sector.into();
        let initial_sector = Selection::new(&dataset, &default_sector)
            .current()
            .to_string();
        Self {
            dataset,
            initial_sector,
            capacity: capacity.max(1),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The sector new sessions start at (after fallback).
    pub fn initial_sector(&self) -> &str {
        &self.initial_sector
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Entry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a session at the default sector and return its id and views.
    pub fn create(&self) -> (Uuid, DerivedViews) {
        let state = DashboardState::new(Arc::clone(&self.dataset), &self.initial_sector);
        let views = state.views().clone();
        let id = Uuid::new_v4();

        let mut sessions = self.lock();
        if sessions.len() >= self.capacity {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, e)| e.last_seen)
                .map(|(id, _)| *id);
            if let Some(oldest) = oldest {
                sessions.remove(&oldest);
                log::warn!("Session limit {} reached, dropped {oldest}", self.capacity);
            }
        }
        sessions.insert(
            id,
            Entry {
                state,
                last_seen: Instant::now(),
            },
        );
        log::debug!("Opened session {id} ({} live)", sessions.len());
        (id, views)
    }

    /// Views for the session's current selection.
    pub fn views(&self, id: Uuid) -> Option<DerivedViews> {
        let mut sessions = self.lock();
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(entry.state.views().clone())
    }

    /// Apply a selection change to one session.
    pub fn select(&self, id: Uuid, sector: &str) -> Option<(SelectionEvent, DerivedViews)> {
        let mut sessions = self.lock();
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        let event = entry.state.select(sector);
        Some((event, entry.state.views().clone()))
    }

    /// Close a session.  Returns whether it existed.
    pub fn remove(&self, id: Uuid) -> bool {
        self.lock().remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv_from;

    fn store(capacity: usize) -> SessionStore {
        let csv = "vendor name,sector,price,latitude,longitude\n\
                   Hall A,Banquet Halls,1000,34.0,-118.2\n\
                   Snap B,Photographers,800,34.1,-118.3\n";
        let ds = Dataset::from_table(read_csv_from(csv.as_bytes()).unwrap()).unwrap();
        SessionStore::new(Arc::new(ds), "Banquet Halls", capacity)
    }

    #[test]
    fn sessions_do_not_share_selection() {
        let store = store(8);
        let (a, _) = store.create();
        let (b, _) = store.create();

        let (event, views) = store.select(a, "Photographers").unwrap();
        assert!(event.is_changed());
        assert_eq!(views.sector, "Photographers");
        assert_eq!(store.views(b).unwrap().sector, "Banquet Halls");
    }

    #[test]
    fn unknown_session_is_none() {
        let store = store(8);
        assert!(store.views(Uuid::new_v4()).is_none());
        assert!(store.select(Uuid::new_v4(), "Photographers").is_none());
        assert!(!store.remove(Uuid::new_v4()));
    }

    #[test]
    fn full_store_drops_least_recently_used() {
        let store = store(2);
        let (a, _) = store.create();
        let (b, _) = store.create();
        // Touch `a` so `b` becomes the oldest.
        std::thread::sleep(std::time::Duration::from_millis(2));
        store.views(a);
        let (c, _) = store.create();

        assert_eq!(store.len(), 2);
        assert!(store.views(a).is_some());
        assert!(store.views(b).is_none());
        assert!(store.views(c).is_some());
    }
}
