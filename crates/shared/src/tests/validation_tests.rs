use super::*;

fn creds(email: &str, password: &str) -> Credentials {
    Credentials::new(email, password)
}

#[test]
fn empty_email_is_required() {
    let errors = validate(&creds("", "Aditya123"));
    assert_eq!(errors.get(Field::Email), Some(FieldError::EmailRequired));
    assert_eq!(
        errors.get(Field::Email).map(|e| e.to_string()).as_deref(),
        Some("Email is required")
    );
    assert!(!errors.contains(Field::Password));
}

#[test]
fn email_without_at_sign_is_malformed() {
    for email in ["plainaddress", "user.example.com", "x", "@", "a@", "@b"] {
        assert_eq!(
            validate_email(email),
            Some(FieldError::InvalidEmailFormat),
            "{email:?} should be rejected"
        );
    }
}

#[test]
fn whitespace_anywhere_in_email_is_malformed() {
    for email in ["a b@c", "a@b c", " a@b", "a@b ", "a@\tb"] {
        assert_eq!(
            validate_email(email),
            Some(FieldError::InvalidEmailFormat),
            "{email:?} should be rejected"
        );
    }
}

#[test]
fn email_shape_is_permissive_about_domains() {
    for email in ["a@b", "A@B", "a@@b", "24bai70398@cuchd.in", "x@localhost", "ü@ß"] {
        assert_eq!(validate_email(email), None, "{email:?} should pass");
    }
}

#[test]
fn empty_password_is_required() {
    assert_eq!(validate_password(""), Some(FieldError::PasswordRequired));
}

#[test]
fn short_passwords_need_six_characters() {
    for password in ["a", "ab", "abc", "abcd", "abcde", "     "] {
        let err = validate_password(password).expect("too short");
        assert_eq!(err.to_string(), "Minimum 6 characters");
    }
}

#[test]
fn six_or_more_characters_pass() {
    for password in ["abcdef", "Aditya123", "      ", "ääääää"] {
        assert_eq!(validate_password(password), None, "{password:?} should pass");
    }
}

#[test]
fn password_length_counts_characters_not_bytes() {
    // five two-byte characters: ten bytes, still too short
    assert_eq!(
        validate_password("ééééé"),
        Some(FieldError::PasswordTooShort { min: 6 })
    );
}

#[test]
fn astral_characters_count_once_each() {
    assert_eq!(
        validate_password("😀😀😀"),
        Some(FieldError::PasswordTooShort { min: 6 })
    );
    assert_eq!(validate_password("😀😀😀😀😀😀"), None);
}

#[test]
fn both_fields_invalid_yields_two_entries() {
    let errors = validate(&creds("nope", "123"));
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get(Field::Email), Some(FieldError::InvalidEmailFormat));
    assert_eq!(
        errors.get(Field::Password),
        Some(FieldError::PasswordTooShort { min: 6 })
    );
}

#[test]
fn valid_pair_yields_no_errors() {
    assert!(validate(&creds("a@b", "123456")).is_empty());
}

#[test]
fn clearing_one_field_keeps_the_other() {
    let mut errors = validate(&creds("", ""));
    assert!(errors.clear(Field::Email));
    assert!(!errors.clear(Field::Email));
    assert_eq!(errors.get(Field::Password), Some(FieldError::PasswordRequired));
    assert_eq!(
        errors.iter().map(|(field, _)| field).collect::<Vec<_>>(),
        vec![Field::Password]
    );
}
