// Unit tests for contacts-manager
// These tests exercise the public API of each module in isolation

#[cfg(test)]
mod contact_tests {
    use contacts_manager::directory::{Contact, ContactId, Photo};

    #[test]
    fn test_contact_ids_are_unique_and_non_empty() {
        let a = Contact::new();
        let b = Contact::new();
        assert_ne!(a.id(), b.id());
        assert!(!a.id().as_str().is_empty());
        assert!("".parse::<ContactId>().is_err());
        assert!(ContactId::try_from(String::new()).is_err());
    }

    #[test]
    fn test_equality_is_by_id_only() {
        let id: ContactId = "42".parse().unwrap();
        let a = Contact::with_id(id.clone()).with_first_name("Ahmed");
        let b = Contact::with_id(id).with_first_name("Someone else");
        assert_eq!(a, b);
        assert_ne!(a, Contact::new().with_first_name("Ahmed"));
    }

    #[test]
    fn test_row_label_falls_back_to_mobile() {
        let c = Contact::new().with_mobile("0100");
        assert_eq!(c.row_label(), "0100");
        let c = Contact::new().with_first_name(" Radwa ").with_last_name("Ahmed");
        assert_eq!(c.row_label(), "Radwa Ahmed");
        assert_eq!(Contact::new().row_label(), "");
    }

    #[test]
    fn test_photo_and_own_flag() {
        let c = Contact::new().with_photo(Photo(vec![0; 16])).own_contact(true);
        assert_eq!(c.photo.as_ref().map(Photo::len), Some(16));
        assert!(c.is_own_contact);
    }
}

#[cfg(test)]
mod directory_tests {
    use contacts_manager::directory::{Contact, ContactDirectory, GroupKey};

    fn mk(id: &str, first: &str, last: &str, mobile: &str) -> Contact {
        Contact::with_id(id.parse().unwrap())
            .with_first_name(first)
            .with_last_name(last)
            .with_mobile(mobile)
    }

    fn labels(dir: &ContactDirectory) -> Vec<String> {
        dir.sorted_contacts().iter().map(Contact::row_label).collect()
    }

    #[test]
    fn test_sort_uses_first_then_last_name() {
        let dir = ContactDirectory::seeded([
            mk("1", "Sam", "Zed", ""),
            mk("2", "Sam", "Adams", ""),
            mk("3", "Amy", "", ""),
        ]);
        assert_eq!(labels(&dir), vec!["Amy", "Sam Adams", "Sam Zed"]);
    }

    #[test]
    fn test_missing_names_sort_as_empty() {
        let mut dir = ContactDirectory::new();
        dir.upsert(Contact::with_id("1".parse().unwrap()).with_mobile("0100"));
        dir.upsert(mk("2", "Amy", "", ""));
        let ids: Vec<_> = dir.sorted_contacts().iter().map(|c| c.id().to_string()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(dir.display_view("", false).section_titles(), vec!["A", "#"]);
    }

    #[test]
    fn test_grouping_preserves_every_contact_once() {
        let dir = ContactDirectory::seeded([
            mk("1", "Ahmed", "Fathi", "0112345678"),
            mk("2", "Radwa", "Ahmed", "0112233445"),
            mk("3", "", "ali", ""),
            mk("4", "9lives", "", ""),
        ]);
        let view = dir.display_view("", false);
        assert_eq!(view.total_rows(), dir.len());
        assert_eq!(view.section_titles(), vec!["A", "R", "#"]);
        assert_eq!(view.get(GroupKey::Letter('A')).map(|rows| rows.len()), Some(2));
    }

    #[test]
    fn test_every_key_is_ascii_letter_or_hash() {
        let names = [
            "Ahmed", "radwa", "中文", "ªbc", "ŉame", "Émile", "Ωmega", "ßtraße", "Ürsula",
            "9lives", " zoe", "",
        ];
        let dir = ContactDirectory::seeded(
            names
                .iter()
                .enumerate()
                .map(|(i, n)| mk(&i.to_string(), n, "", "")),
        );
        let view = dir.display_view("", false);
        assert_eq!(view.total_rows(), names.len());
        for title in view.section_titles() {
            let mut chars = title.chars();
            let ch = chars.next().unwrap();
            assert!(chars.next().is_none(), "{title}");
            assert!(ch.is_ascii_uppercase() || ch == '#', "{title}");
        }
        assert_eq!(view.section_titles(), vec!["A", "R", "Z", "#"]);
        assert_eq!(view.get(GroupKey::Other).map(|rows| rows.len()), Some(9));
    }

    #[test]
    fn test_upsert_same_id_twice_keeps_one_entry() {
        let mut dir = ContactDirectory::new();
        dir.upsert(mk("1", "Ahmed", "Fathi", ""));
        dir.upsert(mk("1", "Ahmed", "Fathi", ""));
        assert_eq!(dir.len(), 1);
    }
}

#[cfg(test)]
mod search_tests {
    use contacts_manager::directory::Contact;
    use contacts_manager::search::{filter, matches_query};

    #[test]
    fn test_query_is_trimmed_and_case_folded() {
        let c = Contact::new().with_first_name("Ahmed").with_mobile("0112345678");
        assert!(matches_query(&c, "  AHM "));
        assert!(matches_query(&c, "2345"));
        assert!(!matches_query(&c, "radwa"));
        assert!(matches_query(&c, "   "));
    }

    #[test]
    fn test_email_and_notes_are_not_searched() {
        let c = Contact::new()
            .with_first_name("Ahmed")
            .with_email("secret@example.com")
            .with_notes("gym buddy");
        assert!(filter(&[c.clone()], "secret").is_empty());
        assert!(filter(&[c], "gym").is_empty());
    }
}

#[cfg(test)]
mod source_tests {
    use contacts_manager::source::{FetchError, parse_records};

    #[test]
    fn test_records_default_missing_fields() {
        let contacts = parse_records(r#"[{"id": "7", "lastName": "Ahmed"}]"#).unwrap();
        assert_eq!(contacts[0].id().as_str(), "7");
        assert_eq!(contacts[0].last_name.as_deref(), Some("Ahmed"));
        assert_eq!(contacts[0].mobile, None);
        assert!(!contacts[0].is_own_contact);
    }

    #[test]
    fn test_non_array_is_malformed() {
        let err = parse_records(r#"{"id": "1"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
        assert!(err.to_string().contains("malformed"));
    }
}

#[cfg(test)]
mod keymap_tests {
    use contacts_manager::app::{KeyAction, Keymap};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_default_bindings() {
        let km = Keymap::default();
        let press = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        assert_eq!(km.resolve(&press('q')), Some(KeyAction::Quit));
        assert_eq!(km.resolve(&press('c')), Some(KeyAction::CallContact));
        assert_eq!(km.resolve(&press('m')), Some(KeyAction::EmailContact));
        assert_eq!(km.resolve(&press('A')), None);
    }

    #[test]
    fn test_shifted_symbol_resolves() {
        let km = Keymap::default();
        let ev = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(km.resolve(&ev), Some(KeyAction::OpenHelp));
    }

    #[test]
    fn test_format_key() {
        assert_eq!(Keymap::format_key(KeyModifiers::CONTROL, KeyCode::Char('c')), "Ctrl+c");
        assert_eq!(Keymap::format_key(KeyModifiers::NONE, KeyCode::PageDown), "PageDown");
    }
}
