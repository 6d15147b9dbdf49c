use crate::model::{Patient, PatientField};
use crate::store::{RecordStore, StoreOptions};
use crate::{debug, warn, StoreError};
use chrono::NaiveDate;
use std::ops::Deref;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discharge {
    Discharged,
    AlreadyDischarged,
    NotFound,
}

/// Patient records with store-assigned ids.
///
/// `max_id` follows every add, and is recomputed by a full scan only when the patient
/// holding the current maximum is removed.
#[derive(Debug)]
pub struct PatientStore {
    records: RecordStore<Patient>,
    max_id: u32,
}

impl Deref for PatientStore {
    type Target = RecordStore<Patient>;

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl PatientStore {
    pub fn open(path: impl Into<PathBuf>, options: StoreOptions) -> Result<Self, StoreError> {
        let records = RecordStore::open(path, options)?;
        let max_id = Self::scan_max_id(&records);
        Ok(Self { records, max_id })
    }

    fn scan_max_id(records: &RecordStore<Patient>) -> u32 {
        records.iter().map(Patient::id).max().unwrap_or(0)
    }

    pub fn max_id(&self) -> u32 {
        self.max_id
    }

    /// `None` once `max_id` is `u32::MAX`.
    pub fn next_id(&self) -> Option<u32> {
        self.max_id.checked_add(1)
    }

    /// Admits a new patient under the next free id, today's date and no discharge date.
    /// Returns `None` without touching the store when no id above `max_id` is left.
    pub fn admit(&mut self, first_name: &str, last_name: &str, age: u8, icd: Option<String>) -> Option<Patient> {
        let Some(id) = self.next_id() else {
            warn!("No patient id left above {}", self.max_id);
            return None;
        };
        let patient = Patient::admitted(id, first_name, last_name, age, icd);
        self.add(patient.clone());
        Some(patient)
    }

    pub fn add(&mut self, patient: Patient) {
        if patient.id() > self.max_id {
            self.max_id = patient.id();
        }
        self.records.add(patient);
    }

    pub fn remove(&mut self, patient: &Patient) -> bool {
        let removed = self.records.remove(patient);
        if patient.id() == self.max_id {
            self.max_id = Self::scan_max_id(&self.records);
            debug!("Recomputed max patient id: {}", self.max_id);
        }
        removed
    }

    pub fn delete(&mut self, id: u32) -> bool {
        match self.records.find_by(PatientField::Id, id).cloned() {
            Some(patient) => self.remove(&patient),
            None => false,
        }
    }

    pub fn discharge(&mut self, id: u32, date: NaiveDate) -> Discharge {
        match self.records.find_mut_by(PatientField::Id, id) {
            Some(patient) if patient.discharge_date().is_some() => Discharge::AlreadyDischarged,
            Some(patient) => {
                patient.set_discharge_date(Some(date));
                Discharge::Discharged
            }
            None => Discharge::NotFound,
        }
    }

    pub fn set_icd(&mut self, id: u32, icd: Option<String>) -> bool {
        match self.records.find_mut_by(PatientField::Id, id) {
            Some(patient) => {
                patient.set_icd(icd);
                true
            }
            None => false,
        }
    }
}
