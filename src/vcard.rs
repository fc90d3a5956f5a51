use crate::contact::Contact;

/// MIME type handed to the share mechanism alongside exported files.
pub const MIME_TYPE: &str = "text/x-vcard";

/// Render one contact as a fixed five-line vCard 3.0 record.
///
/// Name and number are inserted verbatim; the format is write-only and the
/// records are never parsed back, so no escaping is performed.
pub fn encode(contact: &Contact) -> String {
    format!(
        "BEGIN:VCARD\nVERSION:3.0\nFN:{}\nTEL:{}\nEND:VCARD\n",
        contact.name, contact.number
    )
}

/// Concatenate the records for a whole contact list. Each record already
/// self-terminates, so no separator is inserted between them.
pub fn encode_all(contacts: &[Contact]) -> String {
    let mut out = String::new();
    for contact in contacts {
        out.push_str(&encode(contact));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, number: &str) -> Contact {
        Contact {
            name: name.to_string(),
            number: number.to_string(),
        }
    }

    #[test]
    fn test_encode_exact_record() {
        let text = encode(&contact("Jo Lee", "+1-202-555-0191"));
        assert_eq!(
            text,
            "BEGIN:VCARD\nVERSION:3.0\nFN:Jo Lee\nTEL:+1-202-555-0191\nEND:VCARD\n"
        );
    }

    #[test]
    fn test_encode_always_five_lines() {
        for c in [
            contact("Plain", "123"),
            contact("With:Colon", "TEL:456"),
            contact("Semi;colon,comma", "+49 (0) 30"),
        ] {
            let text = encode(&c);
            assert_eq!(text.lines().count(), 5);
            assert!(text.ends_with("END:VCARD\n"));
            assert!(!text.ends_with("\n\n"));
        }
    }

    #[test]
    fn test_encode_verbatim_passthrough() {
        let text = encode(&contact("A:B;C,D", "x:y"));
        assert!(text.contains("FN:A:B;C,D\n"));
        assert!(text.contains("TEL:x:y\n"));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let c = contact("Jo Lee", "+1-202-555-0191");
        assert_eq!(encode(&c), encode(&c.clone()));
    }

    #[test]
    fn test_encode_all_no_separator() {
        let text = encode_all(&[contact("A", "1"), contact("B", "2")]);
        assert_eq!(
            text,
            "BEGIN:VCARD\nVERSION:3.0\nFN:A\nTEL:1\nEND:VCARD\nBEGIN:VCARD\nVERSION:3.0\nFN:B\nTEL:2\nEND:VCARD\n"
        );
    }

    #[test]
    fn test_encode_all_empty_list() {
        assert_eq!(encode_all(&[]), "");
    }
}
