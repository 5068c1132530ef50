//! Permission constants and mask helpers

// Permission bit constants
pub const READ: u64 = 1;
pub const WRITE: u64 = 1 << 1;
pub const CREATE: u64 = 1 << 2;
pub const DELETE: u64 = 1 << 3;
pub const ADMINISTRATION: u64 = 1 << 4;

// Permission name mappings
const PERMS: &[(&str, u64)] = &[
    ("read", READ),
    ("write", WRITE),
    ("create", CREATE),
    ("delete", DELETE),
    ("administration", ADMINISTRATION),
];

/// Convert a permission mask to a list of permission names
pub fn mask_to_names(mask: u64) -> Vec<&'static str> {
    PERMS
        .iter()
        .filter(|(_, b)| mask & b == *b)
        .map(|(n, _)| *n)
        .collect()
}

/// Convert a list of permission names to a mask
pub fn names_to_mask(names: &[&str]) -> u64 {
    names
        .iter()
        .filter_map(|n| PERMS.iter().find(|(k, _)| k == n).map(|(_, v)| v))
        .fold(0, |a, b| a | b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_disjoint() {
        let all = [READ, WRITE, CREATE, DELETE, ADMINISTRATION];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_eq!(a & b, 0);
            }
        }
    }

    #[test]
    fn test_mask_to_names() {
        assert_eq!(mask_to_names(READ | WRITE), vec!["read", "write"]);
        assert_eq!(mask_to_names(ADMINISTRATION), vec!["administration"]);
        assert!(mask_to_names(0).is_empty());
    }

    #[test]
    fn test_names_to_mask() {
        assert_eq!(names_to_mask(&["read", "delete"]), READ | DELETE);
        assert_eq!(names_to_mask(&["bogus"]), 0);
    }
}
