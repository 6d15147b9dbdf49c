use crate::codec::{format_date, parse_date, parse_int, CodecOptions, LineCodec, DEFAULT_DATE_FORMAT};
use crate::{DecodeError, Fields, Record};
use chrono::{Local, NaiveDate};
use std::fmt;

/// A patient of the ward. Identity is the id alone.
#[derive(Debug, Clone, Fields)]
pub struct Patient {
    id: u32,
    first_name: String,
    last_name: String,
    age: u8,
    admission_date: Option<NaiveDate>,
    discharge_date: Option<NaiveDate>,
    icd: Option<String>,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

impl Patient {
    pub fn new(
        id: u32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: u8,
        icd: Option<String>,
        admission_date: Option<NaiveDate>,
        discharge_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            admission_date,
            discharge_date,
            icd: icd.and_then(non_empty),
        }
    }

    /// A freshly admitted patient: admitted today, not discharged.
    pub fn admitted(id: u32, first_name: impl Into<String>, last_name: impl Into<String>, age: u8, icd: Option<String>) -> Self {
        Self::new(id, first_name, last_name, age, icd, Some(Local::now().date_naive()), None)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn admission_date(&self) -> Option<NaiveDate> {
        self.admission_date
    }

    pub fn discharge_date(&self) -> Option<NaiveDate> {
        self.discharge_date
    }

    pub fn set_discharge_date(&mut self, discharge_date: Option<NaiveDate>) {
        self.discharge_date = discharge_date;
    }

    pub fn icd(&self) -> Option<&str> {
        self.icd.as_deref()
    }

    pub fn set_icd(&mut self, icd: Option<String>) {
        self.icd = icd.and_then(non_empty);
    }

    /// Displays the record card, dates rendered with `date_format` like the store file.
    pub fn card<'a>(&'a self, date_format: &'a str) -> PatientCard<'a> {
        PatientCard { patient: self, date_format }
    }

    pub fn is_admitted(&self) -> bool {
        self.discharge_date.is_none()
    }
}

impl PartialEq for Patient {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Patient {}

/// Record card of a patient with dates in a given chrono format, see [`Patient::card`].
pub struct PatientCard<'a> {
    patient: &'a Patient,
    date_format: &'a str,
}

impl fmt::Display for PatientCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.patient;
        let date = |f: &mut fmt::Formatter<'_>, label: &str, d: Option<NaiveDate>| match d {
            Some(d) => writeln!(f, "{:<20}{}", label, d.format(self.date_format)),
            None => writeln!(f, "{:<20}-", label),
        };
        let rule = "*".repeat(50);
        writeln!(f, "{}", rule)?;
        writeln!(f, "{:<20}{}", "ID:", p.id)?;
        writeln!(f, "{:<20}{}", "First name:", p.first_name)?;
        writeln!(f, "{:<20}{}", "Last name:", p.last_name)?;
        writeln!(f, "{:<20}{}", "Age:", p.age)?;
        date(f, "Admission date:", p.admission_date)?;
        date(f, "Discharge date:", p.discharge_date)?;
        writeln!(f, "{:<20}{}", "ICD:", p.icd().unwrap_or("-"))?;
        write!(f, "{}", rule)
    }
}

/// The card with dates in [`DEFAULT_DATE_FORMAT`].
impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.card(DEFAULT_DATE_FORMAT), f)
    }
}

/// `id;firstName;lastName;age;admissionDate;dischargeDate;icd`
impl LineCodec for Patient {
    const FIELD_COUNT: usize = 7;

    fn encode(&self, options: &CodecOptions) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.age.to_string(),
            format_date(self.admission_date.as_ref(), options),
            format_date(self.discharge_date.as_ref(), options),
            self.icd.clone().unwrap_or_default(),
        ]
    }

    fn decode(fields: &[&str], options: &CodecOptions) -> Result<Self, DecodeError> {
        let id: u32 = parse_int("id", fields[0])?;
        if id == 0 {
            return Err(DecodeError::OutOfRange { field: "id", value: fields[0].to_string() });
        }
        Ok(Patient::new(
            id,
            fields[1],
            fields[2],
            parse_int("age", fields[3])?,
            Some(fields[6].to_string()),
            parse_date("admissionDate", fields[4], options)?,
            parse_date("dischargeDate", fields[5], options)?,
        ))
    }
}

impl Record for Patient {
    const KIND: &'static str = "patients";
}
