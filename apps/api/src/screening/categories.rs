use serde::Serialize;

/// Label returned for any id the table does not cover. The fitted models
/// only emit ids in `0..=24`, so this is a fallback, not a category.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Job categories indexed by the id the classifier was trained with.
pub const CATEGORIES: [&str; 25] = [
    "Advocate",
    "Arts",
    "Automation Testing",
    "Blockchain",
    "Business Analyst",
    "Civil Engineer",
    "Data Science",
    "Database",
    "DevOps Engineer",
    "Dotnet Developer",
    "ETL Developer",
    "Electrical Engineering",
    "HR",
    "Hadoop",
    "Health and Fitness",
    "Java Developer",
    "Mechanical Engineer",
    "Network Engineer",
    "Operations Manager",
    "PMO",
    "Python Developer",
    "SAP Developer",
    "Sales",
    "Testing",
    "Web Designing",
];

pub fn label_for(id: i64) -> &'static str {
    usize::try_from(id)
        .ok()
        .and_then(|i| CATEGORIES.get(i))
        .copied()
        .unwrap_or(UNKNOWN_LABEL)
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryEntry {
    pub id: i64,
    pub label: &'static str,
}

pub fn all_categories() -> Vec<CategoryEntry> {
    CATEGORIES
        .iter()
        .enumerate()
        .map(|(id, label)| CategoryEntry {
            id: id as i64,
            label,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ids() {
        assert_eq!(label_for(0), "Advocate");
        assert_eq!(label_for(6), "Data Science");
        assert_eq!(label_for(12), "HR");
        assert_eq!(label_for(15), "Java Developer");
        assert_eq!(label_for(20), "Python Developer");
        assert_eq!(label_for(24), "Web Designing");
    }

    #[test]
    fn test_every_id_in_range_has_a_real_label() {
        for id in 0..25 {
            assert_ne!(label_for(id), UNKNOWN_LABEL, "id {id}");
        }
    }

    #[test]
    fn test_out_of_range_ids_are_unknown() {
        for id in [-1, 25, 26, 100, i64::MIN, i64::MAX] {
            assert_eq!(label_for(id), UNKNOWN_LABEL, "id {id}");
        }
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = CATEGORIES.to_vec();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 25);
    }

    #[test]
    fn test_all_categories_matches_table() {
        let all = all_categories();
        assert_eq!(all.len(), 25);
        assert_eq!(all[6].id, 6);
        assert_eq!(all[6].label, "Data Science");
    }
}
