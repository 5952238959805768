use crate::directory::Contact;

/// True when first name, last name or mobile contains `query`, ignoring case
/// and surrounding whitespace. Absent fields never match.
pub fn matches_query(contact: &Contact, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    [&contact.first_name, &contact.last_name, &contact.mobile]
        .into_iter()
        .filter_map(|f| f.as_deref())
        .any(|f| f.trim().to_lowercase().contains(&q))
}

/// Keep the contacts matching `query`. A blank query returns the input unchanged.
pub fn filter(contacts: &[Contact], query: &str) -> Vec<Contact> {
    if query.trim().is_empty() {
        return contacts.to_vec();
    }
    contacts
        .iter()
        .filter(|c| matches_query(c, query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn mk_contact(
		id: &str,
		first: Option<&str>,
		last: Option<&str>,
		mobile: Option<&str>,
	) -> Contact {
		let mut c = Contact::with_id(id.parse().unwrap());
		c.first_name = first.map(|s| s.to_string());
		c.last_name = last.map(|s| s.to_string());
		c.mobile = mobile.map(|s| s.to_string());
		c
	}

	#[test]
	fn search_matches_names_and_mobile_case_insensitively() {
		let contacts = vec![
			mk_contact("1", Some("Ahmed"), Some("Fathi"), Some("0112345678")),
			mk_contact("2", Some("Radwa"), Some("Ahmed"), Some("0112233445")),
			mk_contact("3", Some("Omar"), None, Some("0100000000")),
		];

		let hits = filter(&contacts, "aHMed");
		assert_eq!(hits.len(), 2);
		assert_eq!(hits[0].id().as_str(), "1");
		assert_eq!(hits[1].id().as_str(), "2");

		let hits = filter(&contacts, "  2233 ");
		assert_eq!(hits.len(), 1);
		assert_eq!(hits[0].id().as_str(), "2");
	}

	#[test]
	fn email_and_notes_are_not_searched() {
		let mut c = mk_contact("1", Some("Ahmed"), None, None);
		c.email = Some("secret@example.com".into());
		c.notes = Some("secret".into());
		assert!(!matches_query(&c, "secret"));
	}

	#[test]
	fn blank_query_is_identity() {
		let contacts = vec![
			mk_contact("2", Some("Zed"), None, None),
			mk_contact("1", None, None, None),
		];
		let out = filter(&contacts, "   ");
		assert_eq!(out.len(), 2);
		assert_eq!(out[0].id().as_str(), "2");
	}

	#[test]
	fn field_whitespace_is_trimmed_before_matching() {
		let c = mk_contact("1", Some("  Mona  "), None, None);
		assert!(matches_query(&c, "mona"));
		assert!(matches_query(&c, " MONA "));
		assert!(!matches_query(&c, "  mona  x"));
	}
}
