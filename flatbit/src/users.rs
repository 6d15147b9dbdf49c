use crate::model::{User, UserField};
use crate::store::{RecordStore, StoreOptions};
use crate::{info, StoreError};
use std::ops::Deref;
use std::path::PathBuf;

/// Accounts inserted when the user store loads empty, with their SHA-1 password digests.
pub const DEFAULT_USERS: [(&str, &str); 4] = [
    ("max", "3e5c5f0ee799eb1965756f590546061b77167f43"),
    ("bob", "556f9ae42d491e9bffc3ff34febcaa6fc28c6d3a"),
    ("john", "d139f80a8bc30efec42efcdd6e5daa71d2941127"),
    ("alice", "ddc2a2c436454080555bc4c53513c7af2b9e2559"),
];

/// Operator accounts. Usernames are not checked for uniqueness here.
#[derive(Debug)]
pub struct UserStore {
    records: RecordStore<User>,
}

impl Deref for UserStore {
    type Target = RecordStore<User>;

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl UserStore {
    /// Loads the accounts and seeds [`DEFAULT_USERS`] if none were loaded.
    /// Seeded accounts reach the file with the next persist.
    pub fn open(path: impl Into<PathBuf>, options: StoreOptions) -> Result<Self, StoreError> {
        let mut store = Self { records: RecordStore::open(path, options)? };
        store.seed_if_empty();
        Ok(store)
    }

    fn seed_if_empty(&mut self) -> bool {
        if !self.records.is_empty() {
            return false;
        }
        for (username, hash) in DEFAULT_USERS {
            self.records.add(User::new(username, hash));
        }
        info!("Seeded {} default users", DEFAULT_USERS.len());
        true
    }

    pub fn add(&mut self, user: User) {
        self.records.add(user);
    }

    pub fn remove(&mut self, user: &User) -> bool {
        self.records.remove(user)
    }

    pub fn delete(&mut self, username: &str) -> bool {
        match self.records.find_by(UserField::Username, username).cloned() {
            Some(user) => self.records.remove(&user),
            None => false,
        }
    }

    pub fn exists(&self, username: &str) -> bool {
        self.records.find_by(UserField::Username, username).is_some()
    }

    /// True if an account with exactly this username and password digest exists.
    pub fn authenticate(&self, user: &User) -> bool {
        self.records.find(user).is_some()
    }
}
