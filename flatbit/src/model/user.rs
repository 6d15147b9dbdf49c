use crate::codec::{CodecOptions, LineCodec};
use crate::{DecodeError, Fields, Record};

/// An operator account. `password` is the hex SHA-1 digest, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Fields)]
pub struct User {
    username: String,
    password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self { username: username.into(), password: password_hash.into() }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// `username;passwordHash`
impl LineCodec for User {
    const FIELD_COUNT: usize = 2;

    fn encode(&self, _options: &CodecOptions) -> Vec<String> {
        vec![self.username.clone(), self.password.clone()]
    }

    fn decode(fields: &[&str], _options: &CodecOptions) -> Result<Self, DecodeError> {
        Ok(User::new(fields[0], fields[1]))
    }
}

impl Record for User {
    const KIND: &'static str = "users";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_line, encode_line};
    use crate::FieldValue;

    #[test]
    fn equality_needs_username_and_hash() {
        assert_eq!(User::new("bob", "abc"), User::new("bob", "abc"));
        assert_ne!(User::new("bob", "abc"), User::new("bob", "abd"));
        assert_ne!(User::new("bob", "abc"), User::new("bobby", "abc"));
    }

    #[test]
    fn line_format() {
        let options = CodecOptions::default();
        let user = User::new("max", "3e5c5f0ee799eb1965756f590546061b77167f43");
        let line = encode_line(&user, &options);
        assert_eq!(line, "max;3e5c5f0ee799eb1965756f590546061b77167f43");
        assert_eq!(decode_line::<User>(&line, &options).unwrap(), user);
        assert!(matches!(
            decode_line::<User>("max", &options),
            Err(DecodeError::FieldCount { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn username_is_selectable() {
        let user = User::new("alice", "x");
        assert_eq!(user.field_value(UserField::Username), FieldValue::from("alice"));
        assert_eq!("password".parse::<UserField>(), Ok(UserField::Password));
    }
}
