//! Email acceptance rule.

/// Domain suffixes an email address may end with.
pub const ACCEPTED_EMAIL_SUFFIXES: [&str; 2] = [".com", ".cl"];

/// Message shown when an email fails [`is_accepted_email`].
pub const INVALID_EMAIL_MESSAGE: &str = "Correo inválido. Debe tener formato correcto.";

/// Check whether an email address is accepted for a contact.
///
/// The rule is intentionally narrow: the address must contain an `@` and
/// end with one of [`ACCEPTED_EMAIL_SUFFIXES`]. Addresses on other top-level
/// domains are rejected even when they are otherwise well formed, and no
/// further structural checks are made.
///
/// # Example
///
/// ```
/// use contactos_mcp_server::domain::is_accepted_email;
///
/// assert!(is_accepted_email("ana@test.cl"));
/// assert!(!is_accepted_email("ana@test.org"));
/// ```
pub fn is_accepted_email(email: &str) -> bool {
    email.contains('@')
        && ACCEPTED_EMAIL_SUFFIXES
            .iter()
            .any(|suffix| email.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_com_and_cl() {
        assert!(is_accepted_email("user@example.com"));
        assert!(is_accepted_email("user@empresa.cl"));
        assert!(is_accepted_email("user.name+tag@sub.example.com"));
    }

    #[test]
    fn test_rejects_other_suffixes() {
        assert!(!is_accepted_email("user@test.org"));
        assert!(!is_accepted_email("user@example.co.uk"));
        assert!(!is_accepted_email("user@example.COM"));
    }

    #[test]
    fn test_rejects_missing_at() {
        assert!(!is_accepted_email("example.com"));
        assert!(!is_accepted_email(""));
    }

    #[test]
    fn test_rule_is_not_structural() {
        // Only '@' and the suffix are checked.
        assert!(is_accepted_email("@.com"));
        assert!(is_accepted_email("a@@b.cl"));
    }
}
