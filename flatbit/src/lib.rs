//! flatbit keeps small collections of homogeneous records in memory and persists them as
//! `;` delimited text files, one record per line.
//!
//! A [`RecordStore`] owns an ordered, chunk-grown buffer of one record type, loads its backing
//! file on open and rewrites it in full on [`RecordStore::persist`]. Record types plug in with
//! two contracts: [`LineCodec`] for the line format and [`Fields`] (usually
//! `#[derive(Fields)]`) for exact-match lookups by field, either through the generated field
//! enum or by the field's symbolic name.

extern crate self as flatbit;

pub mod codec;
pub mod error;
pub mod field;
pub mod logger;
pub mod model;
pub mod patients;
pub mod registry;
pub mod settings;
pub mod store;
pub mod users;

pub use chrono;
pub use codec::{CodecOptions, LineCodec, DEFAULT_DATE_FORMAT, DELIMITER};
pub use error::{DecodeError, StoreError, UnknownField};
pub use field::{FieldValue, Fields, ToFieldValue};
pub use macros::Fields;
pub use model::{Patient, PatientCard, PatientField, User, UserField};
pub use patients::{Discharge, PatientStore};
pub use registry::{Registry, StoreKind, StoreState};
pub use settings::Settings;
pub use store::{Record, RecordStore, Records, StoreOptions, DEFAULT_CHUNK_SIZE};
pub use users::{UserStore, DEFAULT_USERS};
