use flatbit::chrono::NaiveDate;
use flatbit::*;

#[derive(Debug, Clone, PartialEq, Fields)]
pub struct Admission {
    pub ward_no: u16,
    #[field(name = "bed")]
    pub bed_label: String,
    pub since: Option<NaiveDate>,
    #[field(skip)]
    pub cache: Vec<u8>,
}

fn main() {
    let admission = Admission { ward_no: 7, bed_label: "7B".to_string(), since: None, cache: Vec::new() };
    assert_eq!(AdmissionField::ALL.len(), 3);
    assert_eq!("wardNo".parse::<AdmissionField>(), Ok(AdmissionField::WardNo));
    assert_eq!(AdmissionField::BedLabel.to_string(), "bed");
    assert!("cache".parse::<AdmissionField>().is_err());
    assert_eq!(admission.field_value(AdmissionField::WardNo), FieldValue::Int(7));
    assert_eq!(admission.field_value(AdmissionField::Since), FieldValue::Null);
}
