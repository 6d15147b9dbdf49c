use crate::DecodeError;
use chrono::NaiveDate;
use std::str::FromStr;

pub const DELIMITER: char = ';';
pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Formatting knobs shared by all codecs of one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecOptions {
    /// chrono format of the short date style, e.g. `%d.%m.%Y`.
    pub date_format: String,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self { date_format: DEFAULT_DATE_FORMAT.to_string() }
    }
}

/// Line format of one record type.
///
/// The store splits every line on [`DELIMITER`] and checks the field count before calling
/// [`LineCodec::decode`], so implementors always receive exactly `FIELD_COUNT` segments.
/// Fields are never escaped, an embedded delimiter shifts the following fields on reload.
pub trait LineCodec: Sized {
    const FIELD_COUNT: usize;

    fn encode(&self, options: &CodecOptions) -> Vec<String>;

    fn decode(fields: &[&str], options: &CodecOptions) -> Result<Self, DecodeError>;
}

pub fn encode_line<T: LineCodec>(record: &T, options: &CodecOptions) -> String {
    record.encode(options).join(&DELIMITER.to_string())
}

pub fn decode_line<T: LineCodec>(line: &str, options: &CodecOptions) -> Result<T, DecodeError> {
    // trailing empty segments are fields too
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() != T::FIELD_COUNT {
        return Err(DecodeError::FieldCount { expected: T::FIELD_COUNT, found: fields.len() });
    }
    T::decode(&fields, options)
}

pub fn parse_int<N>(field: &'static str, value: &str) -> Result<N, DecodeError>
where
    N: TryFrom<i64>,
{
    let wide = i64::from_str(value).map_err(|source| DecodeError::Number { field, value: value.to_string(), source })?;
    N::try_from(wide).map_err(|_| DecodeError::OutOfRange { field, value: value.to_string() })
}

pub fn parse_date(field: &'static str, value: &str, options: &CodecOptions) -> Result<Option<NaiveDate>, DecodeError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, &options.date_format)
        .map(Some)
        .map_err(|source| DecodeError::Date { field, value: value.to_string(), source })
}

pub fn format_date(date: Option<&NaiveDate>, options: &CodecOptions) -> String {
    date.map(|d| d.format(&options.date_format).to_string()).unwrap_or_default()
}
