use flatbit::*;

#[derive(Debug, Clone, PartialEq, Eq, Fields)]
struct Badge {
    holder: String,
    level: u8,
}

fn main() {
    let badge = Badge { holder: "nurse".to_string(), level: 2 };
    assert_eq!(badge.field_value(BadgeField::Holder), FieldValue::from("nurse"));
    assert_eq!(BadgeField::Level.name(), "level");
}
