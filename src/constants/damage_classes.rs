//! Damage class table for the detection model

/// Part/damage names indexed by the detection model's class id.
pub const DAMAGE_CLASSES: [&str; 14] = [
    "Bonnet Dent/Damage",
    "Boot Dent/Damage",
    "Door Outer Panel Dent",
    "Fender Dent/Damage",
    "Front Bumper Damage",
    "Front Windshield Damage",
    "Headlight Assembly Damage",
    "Quarter Panel Dent/Damage",
    "Rear Bumper Damage",
    "Rear Windshield Damage",
    "Roof Dent/Damage",
    "Running Board Damage",
    "Side Mirror Damage",
    "Taillight Assembly Damage",
];

/// Name used for class ids outside the table.
pub const UNKNOWN_CLASS: &str = "Unknown";

/// Resolve a class id to its part/damage name.
///
/// Any id outside 0..=13, including negative ids, resolves to "Unknown".
pub fn damage_class_name(class_id: i64) -> &'static str {
    usize::try_from(class_id)
        .ok()
        .and_then(|idx| DAMAGE_CLASSES.get(idx))
        .copied()
        .unwrap_or(UNKNOWN_CLASS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_classes() {
        assert_eq!(damage_class_name(0), "Bonnet Dent/Damage");
        assert_eq!(damage_class_name(4), "Front Bumper Damage");
        assert_eq!(damage_class_name(13), "Taillight Assembly Damage");
    }

    #[test]
    fn test_out_of_range_is_unknown() {
        assert_eq!(damage_class_name(14), UNKNOWN_CLASS);
        assert_eq!(damage_class_name(99), UNKNOWN_CLASS);
        assert_eq!(damage_class_name(-1), UNKNOWN_CLASS);
    }

    #[test]
    fn test_table_is_complete() {
        assert_eq!(DAMAGE_CLASSES.len(), 14);
        for name in DAMAGE_CLASSES {
            assert!(!name.is_empty());
        }
    }
}
