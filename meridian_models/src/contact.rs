use nutype::nutype;

use crate::email_address::EmailAddress;

/// A submission of the contact form on the marketing site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: ContactRequestName,
    pub email: EmailAddress,
    pub subject: ContactRequestSubject,
    pub message: ContactRequestMessage,
}

/// Name of the inquirer, also used as display name of the sender mailbox.
/// Single line only: control characters are replaced by spaces.
#[nutype(
    sanitize(with = replace_control_chars, trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactRequestName(String);

#[nutype(
    sanitize(with = replace_control_chars, trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactRequestSubject(String);

#[nutype(
    validate(len_char_max = 20000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactRequestMessage(String);

fn replace_control_chars(value: String) -> String {
    if !value.contains(char::is_control) {
        return value;
    }
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        let name = ContactRequestName::try_from("  Jane Doe ").unwrap();
        assert_eq!(*name, "Jane Doe");
    }

    #[test]
    fn line_breaks_in_name_and_subject_are_replaced() {
        let name = ContactRequestName::try_from("Jane\nDoe\r\n").unwrap();
        let subject = ContactRequestSubject::try_from("Quote\r\nBcc: x@example.com").unwrap();

        assert_eq!(*name, "Jane Doe");
        assert_eq!(*subject, "Quote  Bcc: x@example.com");
    }

    #[test]
    fn control_chars_only_name_is_rejected() {
        assert!(ContactRequestName::try_from("\n\t\r").is_err());
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(ContactRequestName::try_from("   ").is_err());
        assert!(ContactRequestSubject::try_from("").is_err());
    }

    #[test]
    fn message_keeps_line_breaks() {
        let message = ContactRequestMessage::try_from("Need rates for\nLondon to Tokyo\n").unwrap();
        assert_eq!(*message, "Need rates for\nLondon to Tokyo\n");
    }

    #[test]
    fn oversized_message_is_rejected() {
        assert!(ContactRequestMessage::try_from("x".repeat(20_001)).is_err());
        assert!(ContactRequestMessage::try_from("x".repeat(20_000)).is_ok());
    }

    #[test]
    fn deserialize_validates() {
        assert!(serde_json::from_str::<ContactRequestSubject>("\"Quote request\"").is_ok());
        assert!(serde_json::from_str::<ContactRequestSubject>("\" \"").is_err());
    }
}
