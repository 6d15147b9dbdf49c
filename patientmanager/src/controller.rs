use chrono::Local;
use flatbit::{Discharge, Patient, Registry, StoreError, StoreKind, User};

/// Checks credentials against the user store.
pub struct LoginController<'r> {
    registry: &'r mut Registry,
}

impl<'r> LoginController<'r> {
    /// Opens the user store, seeding the default accounts if it is empty.
    pub fn new(registry: &'r mut Registry) -> Result<Self, StoreError> {
        registry.users()?;
        Ok(Self { registry })
    }

    pub fn login(&mut self, user: &User) -> Result<bool, StoreError> {
        Ok(self.registry.users()?.authenticate(user))
    }
}

/// Patient and user management behind the main menu.
pub struct PatientController<'r> {
    registry: &'r mut Registry,
}

impl<'r> PatientController<'r> {
    pub fn new(registry: &'r mut Registry) -> Result<Self, StoreError> {
        registry.patients()?;
        registry.users()?;
        Ok(Self { registry })
    }

    /// `None` when every patient id is taken.
    pub fn create_patient(&mut self, first_name: &str, last_name: &str, age: u8, icd: Option<String>) -> Result<Option<Patient>, StoreError> {
        Ok(self.registry.patients()?.admit(first_name, last_name, age, icd))
    }

    /// Date format of the store files, also used for patient cards.
    pub fn date_format(&self) -> &str {
        &self.registry.settings().date_format
    }

    /// Adds the account unless the username is taken. `password_hash` is the hex SHA-1 digest.
    pub fn create_user(&mut self, username: &str, password_hash: &str) -> Result<bool, StoreError> {
        let users = self.registry.users()?;
        if users.exists(username) {
            return Ok(false);
        }
        users.add(User::new(username, password_hash));
        Ok(true)
    }

    pub fn delete_patient(&mut self, id: u32) -> Result<bool, StoreError> {
        Ok(self.registry.patients()?.delete(id))
    }

    pub fn delete_user(&mut self, username: &str) -> Result<bool, StoreError> {
        Ok(self.registry.users()?.delete(username))
    }

    /// Discharges with today's date.
    pub fn discharge_patient(&mut self, id: u32) -> Result<Discharge, StoreError> {
        Ok(self.registry.patients()?.discharge(id, Local::now().date_naive()))
    }

    pub fn update_icd(&mut self, id: u32, icd: Option<String>) -> Result<bool, StoreError> {
        Ok(self.registry.patients()?.set_icd(id, icd))
    }

    pub fn search_patient(&mut self, field: &str, value: impl Into<flatbit::FieldValue>) -> Result<Option<Patient>, StoreError> {
        Ok(self.registry.patients()?.find_by_name(field, value).cloned())
    }

    pub fn search_patients(&mut self, field: &str, value: impl Into<flatbit::FieldValue>) -> Result<Vec<Patient>, StoreError> {
        Ok(self.registry.patients()?.find_all_by_name(field, value).into_iter().cloned().collect())
    }

    pub fn patients(&mut self) -> Result<Vec<Patient>, StoreError> {
        Ok(self.registry.patients()?.iter().cloned().collect())
    }

    pub fn persist_users(&self) -> Result<(), StoreError> {
        self.registry.persist(StoreKind::Users)
    }

    pub fn persist_patients(&self) -> Result<(), StoreError> {
        self.registry.persist(StoreKind::Patients)
    }
}
