use crate::patients::PatientStore;
use crate::settings::Settings;
use crate::users::UserStore;
use crate::{debug, error, StoreError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Patients,
    Users,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Patients => f.write_str("patients"),
            StoreKind::Users => f.write_str("users"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Loading,
    Ready,
}

#[derive(Debug)]
struct Slot<S> {
    state: StoreState,
    store: Option<S>,
}

impl<S> Slot<S> {
    fn new() -> Self {
        Self { state: StoreState::Uninitialized, store: None }
    }

    /// A failed open leaves the slot uninitialized, the next call opens again.
    fn get_or_open(&mut self, kind: StoreKind, open: impl FnOnce() -> Result<S, StoreError>) -> Result<&mut S, StoreError> {
        let store = match self.store.take() {
            Some(store) => store,
            None => {
                self.state = StoreState::Loading;
                debug!("Loading {} store", kind);
                match open() {
                    Ok(store) => store,
                    Err(e) => {
                        self.state = StoreState::Uninitialized;
                        error!("Loading {} store failed: {}", kind, e);
                        return Err(e);
                    }
                }
            }
        };
        self.state = StoreState::Ready;
        Ok(self.store.insert(store))
    }
}

/// Process-wide owner of the one store per record type.
///
/// Created once at startup and handed to whoever needs store access. Stores open lazily on
/// first access and stay for the lifetime of the registry.
#[derive(Debug)]
pub struct Registry {
    settings: Settings,
    patients: Slot<PatientStore>,
    users: Slot<UserStore>,
}

impl Registry {
    pub fn new(settings: Settings) -> Self {
        Self { settings, patients: Slot::new(), users: Slot::new() }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self, kind: StoreKind) -> StoreState {
        match kind {
            StoreKind::Patients => self.patients.state,
            StoreKind::Users => self.users.state,
        }
    }

    pub fn patients(&mut self) -> Result<&mut PatientStore, StoreError> {
        let settings = &self.settings;
        self.patients.get_or_open(StoreKind::Patients, || PatientStore::open(settings.patients_path(), settings.store_options()))
    }

    pub fn users(&mut self) -> Result<&mut UserStore, StoreError> {
        let settings = &self.settings;
        self.users.get_or_open(StoreKind::Users, || UserStore::open(settings.users_path(), settings.store_options()))
    }

    /// Persists the given store if it was opened. Unopened stores have nothing to flush.
    pub fn persist(&self, kind: StoreKind) -> Result<(), StoreError> {
        match kind {
            StoreKind::Patients => self.patients.store.as_ref().map_or(Ok(()), |s| s.persist()),
            StoreKind::Users => self.users.store.as_ref().map_or(Ok(()), |s| s.persist()),
        }
    }

    /// Persists users, then patients. Both are attempted, the first failure is returned.
    pub fn persist_all(&self) -> Result<(), StoreError> {
        let users = self.persist(StoreKind::Users);
        let patients = self.persist(StoreKind::Patients);
        users.and(patients)
    }
}
