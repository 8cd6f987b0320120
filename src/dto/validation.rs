//! Explicit per-field validation helpers. Each check appends a
//! `"field:message"` string; DTOs compose them and report the whole list in
//! one 400 response.

pub fn require(errors: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{}:The field {} is required", field, field));
    }
}

pub fn max_len(errors: &mut Vec<String>, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(format!("{}:The field {} must be at most {} characters", field, field, max));
    }
}

pub fn min_len(errors: &mut Vec<String>, field: &str, value: &str, min: usize) {
    if value.chars().count() < min {
        errors.push(format!("{}:The field {} must be at least {} characters", field, field, min));
    }
}

pub fn first_letter_uppercase(errors: &mut Vec<String>, field: &str, value: &str) {
    if let Some(first) = value.chars().next() {
        if first.to_uppercase().to_string() != first.to_string() {
            errors.push(format!("{}:First letter should be uppercase", field));
        }
    }
}

pub fn range_f64(errors: &mut Vec<String>, field: &str, value: f64, min: f64, max: f64) {
    if value < min || value > max {
        errors.push(format!("{}:The field {} must be between {} and {}", field, field, min, max));
    }
}

pub fn range_i32(errors: &mut Vec<String>, field: &str, value: i32, min: i32, max: i32) {
    if value < min || value > max {
        errors.push(format!("{}:The field {} must be between {} and {}", field, field, min, max));
    }
}

/// Shallow shape check, not RFC 5322: local part, one '@', dotted domain.
pub fn email_format(errors: &mut Vec<String>, field: &str, value: &str) {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if !value.trim().is_empty() && !valid {
        errors.push(format!("{}:The field {} is not a valid email address", field, field));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_first_letter_fails() {
        let mut errors = Vec::new();
        first_letter_uppercase(&mut errors, "name", "comedy");
        assert_eq!(errors, vec!["name:First letter should be uppercase"]);
    }

    #[test]
    fn uppercase_first_letter_passes() {
        let mut errors = Vec::new();
        first_letter_uppercase(&mut errors, "name", "Comedy");
        assert!(errors.is_empty());
    }

    #[test]
    fn empty_value_is_only_a_required_error() {
        let mut errors = Vec::new();
        require(&mut errors, "name", "  ");
        first_letter_uppercase(&mut errors, "name", "");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("name:"));
    }

    #[test]
    fn range_checks_are_inclusive() {
        let mut errors = Vec::new();
        range_f64(&mut errors, "latitude", 90.0, -90.0, 90.0);
        range_f64(&mut errors, "latitude", 90.5, -90.0, 90.0);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn email_shape_check() {
        let mut errors = Vec::new();
        email_format(&mut errors, "email", "user@example.com");
        assert!(errors.is_empty());
        email_format(&mut errors, "email", "not-an-email");
        email_format(&mut errors, "email", "user@nodot");
        assert_eq!(errors.len(), 2);
    }
}
