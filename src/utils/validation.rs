//! Input validation helpers
//!
//! Request inputs are validated as a pre-step before the operation executes;
//! each helper appends field errors to a shared list so a caller gets every
//! problem at once rather than the first one.

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu item, category, staff, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Order item notes
pub const MAX_NOTE_LEN: usize = 500;

/// Address lines
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Require a non-empty string within the length limit.
pub fn require_text(value: &str, field: &str, max_len: usize, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(format!("{field} must not be empty"));
        return;
    }
    if value.len() > max_len {
        errors.push(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ));
    }
}

/// Check an optional string against the length limit.
pub fn check_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
    errors: &mut Vec<String>,
) {
    if let Some(v) = value
        && v.len() > max_len
    {
        errors.push(format!("{field} is too long ({} chars, max {max_len})", v.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_rejects_empty_and_oversized() {
        let mut errors = Vec::new();
        require_text("", "name", MAX_NAME_LEN, &mut errors);
        require_text("   ", "category", MAX_NAME_LEN, &mut errors);
        require_text(&"x".repeat(MAX_NAME_LEN + 1), "name", MAX_NAME_LEN, &mut errors);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn optional_text_only_checks_present_values() {
        let mut errors = Vec::new();
        check_optional_text(None, "notes", MAX_NOTE_LEN, &mut errors);
        check_optional_text(Some("fine"), "notes", MAX_NOTE_LEN, &mut errors);
        assert!(errors.is_empty());

        let long = "x".repeat(MAX_NOTE_LEN + 1);
        check_optional_text(Some(&long), "notes", MAX_NOTE_LEN, &mut errors);
        assert_eq!(errors.len(), 1);
    }
}
