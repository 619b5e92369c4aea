/// Multi-field pet filtering
///
/// Each dimension defaults to a wildcard that disables its predicate;
/// filtering is a plain O(n) scan over the fetched list.
use crate::models::Pet;

/// Age bucket filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AgeFilter {
    #[default]
    Any,
    /// age <= 1
    Young,
    /// 1 < age <= 7
    Adult,
    /// age > 7
    Senior,
}

impl AgeFilter {
    pub fn matches(&self, age: i64) -> bool {
        match self {
            AgeFilter::Any => true,
            AgeFilter::Young => age <= 1,
            AgeFilter::Adult => age > 1 && age <= 7,
            AgeFilter::Senior => age > 7,
        }
    }
}

/// The canonical multi-field filter set
///
/// `None` on a string dimension means "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetFilters {
    pub species: Option<String>,
    pub age: AgeFilter,
    pub size: Option<String>,
    pub gender: Option<String>,
}

impl PetFilters {
    pub fn matches(&self, pet: &Pet) -> bool {
        if let Some(species) = &self.species {
            if !pet.species.eq_ignore_ascii_case(species) {
                return false;
            }
        }
        if !self.age.matches(pet.age) {
            return false;
        }
        if let Some(size) = &self.size {
            match &pet.size {
                Some(pet_size) if pet_size.eq_ignore_ascii_case(size) => {}
                _ => return false,
            }
        }
        if let Some(gender) = &self.gender {
            if !pet.gender.eq_ignore_ascii_case(gender) {
                return false;
            }
        }
        true
    }

    /// Back to all-wildcard defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn pet(species: &str, age: i64, size: Option<&str>, gender: &str) -> Pet {
        let now = Utc::now();
        Pet {
            id: 1,
            name: "Max".to_string(),
            species: species.to_string(),
            breed: "Mixed".to_string(),
            age,
            gender: gender.to_string(),
            size: size.map(String::from),
            description: "A pet".to_string(),
            image_url: "https://example.com/p.jpg".to_string(),
            owner_id: 1,
            owner_name: "Sarah".to_string(),
            owner_avatar_url: "https://example.com/s.jpg".to_string(),
            likes: 0,
            is_adoptable: true,
            is_recent: false,
            is_featured: false,
            status: "Available".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_default_filters_match_everything() {
        let filters = PetFilters::default();
        assert!(filters.matches(&pet("dog", 3, Some("large"), "male")));
        assert!(filters.matches(&pet("bird", 12, None, "female")));
    }

    #[test]
    fn test_age_bucket_boundaries() {
        // age 1 is young, not adult
        assert!(AgeFilter::Young.matches(1));
        assert!(!AgeFilter::Adult.matches(1));
        // age 7 is adult, not senior
        assert!(AgeFilter::Adult.matches(7));
        assert!(!AgeFilter::Senior.matches(7));
        // age 8 is senior
        assert!(AgeFilter::Senior.matches(8));
        assert!(!AgeFilter::Adult.matches(8));
    }

    #[test]
    fn test_species_filter_is_case_insensitive() {
        let filters = PetFilters {
            species: Some("Dog".to_string()),
            ..Default::default()
        };
        assert!(filters.matches(&pet("dog", 2, None, "male")));
        assert!(!filters.matches(&pet("cat", 2, None, "male")));
    }

    #[test]
    fn test_size_filter_skips_sizeless_pets() {
        let filters = PetFilters {
            size: Some("small".to_string()),
            ..Default::default()
        };
        assert!(filters.matches(&pet("dog", 2, Some("small"), "male")));
        assert!(!filters.matches(&pet("bird", 2, None, "male")));
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let filters = PetFilters {
            species: Some("dog".to_string()),
            age: AgeFilter::Adult,
            size: None,
            gender: Some("female".to_string()),
        };

        assert!(filters.matches(&pet("dog", 4, Some("large"), "female")));
        assert!(!filters.matches(&pet("dog", 4, Some("large"), "male")));
        assert!(!filters.matches(&pet("dog", 1, Some("large"), "female")));
    }

    #[test]
    fn test_reset_restores_wildcards() {
        let mut filters = PetFilters {
            species: Some("cat".to_string()),
            age: AgeFilter::Senior,
            size: Some("small".to_string()),
            gender: Some("male".to_string()),
        };

        filters.reset();
        assert_eq!(filters, PetFilters::default());
    }
}
