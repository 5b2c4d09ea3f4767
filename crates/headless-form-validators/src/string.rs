//! String validation functions
//!
//! Lengths are counted in characters, not bytes.

pub fn min_length(s: &str, min: usize) -> Result<(), String> {
    if s.chars().count() >= min {
        Ok(())
    } else {
        Err(format!("Must be at least {} characters", min))
    }
}

pub fn max_length(s: &str, max: usize) -> Result<(), String> {
    if s.chars().count() <= max {
        Ok(())
    } else {
        Err(format!("Must be at most {} characters", max))
    }
}

/// Inclusive on both ends
pub fn length_between(s: &str, min: usize, max: usize) -> Result<(), String> {
    let len = s.chars().count();
    if len >= min && len <= max {
        Ok(())
    } else {
        Err(format!("Must be between {} and {} characters", min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hello", 3, 10, true)]
    #[case("hi", 3, 10, false)]
    #[case("verylongstring", 3, 10, false)]
    #[case("abc", 3, 3, true)]
    #[case("héé", 3, 3, true)]
    fn test_length_between(#[case] s: &str, #[case] min: usize, #[case] max: usize, #[case] ok: bool) {
        assert_eq!(length_between(s, min, max).is_ok(), ok);
    }

    #[test]
    fn test_min_max_length() {
        assert!(min_length("hello", 3).is_ok());
        assert_eq!(min_length("hi", 3), Err("Must be at least 3 characters".to_string()));

        assert!(max_length("hello", 10).is_ok());
        assert_eq!(max_length("verylongstring", 5), Err("Must be at most 5 characters".to_string()));
    }
}
