/// Reducer-driven client state
///
/// Holds fetched lists and derives filtered views on read. Every action
/// is an independent case; applying one is a simple merge that never
/// depends on another case's prior state.
use crate::client::filters::{AgeFilter, PetFilters};
use crate::models::{Owner, Pet};
use std::collections::HashSet;

/// Which fetched list a loading flag refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKey {
    Pets,
    ShowcasePets,
    Owners,
}

/// Per-list loading flags
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadingFlags {
    pub pets: bool,
    pub showcase_pets: bool,
    pub owners: bool,
}

/// State transitions
#[derive(Debug, Clone)]
pub enum Action {
    SetPets(Vec<Pet>),
    SetShowcasePets(Vec<Pet>),
    SetOwners(Vec<Owner>),
    ToggleFavorite(i64),
    SetSpeciesFilter(Option<String>),
    SetAgeFilter(AgeFilter),
    SetSizeFilter(Option<String>),
    SetGenderFilter(Option<String>),
    ResetFilters,
    SetLoading(ListKey, bool),
    SetError(String),
    ClearError,
}

/// The client's single state container
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    pub pets: Vec<Pet>,
    pub showcase_pets: Vec<Pet>,
    pub owners: Vec<Owner>,
    pub favorites: HashSet<i64>,
    pub filters: PetFilters,
    pub loading: LoadingFlags,
    pub error: Option<String>,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetPets(pets) => self.pets = pets,
            Action::SetShowcasePets(pets) => self.showcase_pets = pets,
            Action::SetOwners(owners) => self.owners = owners,
            Action::ToggleFavorite(pet_id) => {
                if !self.favorites.remove(&pet_id) {
                    self.favorites.insert(pet_id);
                }
            }
            Action::SetSpeciesFilter(species) => self.filters.species = species,
            Action::SetAgeFilter(age) => self.filters.age = age,
            Action::SetSizeFilter(size) => self.filters.size = size,
            Action::SetGenderFilter(gender) => self.filters.gender = gender,
            Action::ResetFilters => self.filters.reset(),
            Action::SetLoading(key, value) => match key {
                ListKey::Pets => self.loading.pets = value,
                ListKey::ShowcasePets => self.loading.showcase_pets = value,
                ListKey::Owners => self.loading.owners = value,
            },
            Action::SetError(message) => self.error = Some(message),
            Action::ClearError => self.error = None,
        }
    }

    pub fn is_favorite(&self, pet_id: i64) -> bool {
        self.favorites.contains(&pet_id)
    }

    /// Adoptable pets matching the active filters
    pub fn filtered_pets(&self) -> Vec<&Pet> {
        self.pets.iter().filter(|p| self.filters.matches(p)).collect()
    }

    /// Owners whose name contains the search term
    pub fn filtered_owners(&self, search: &str) -> Vec<&Owner> {
        if search.is_empty() {
            return self.owners.iter().collect();
        }
        let needle = search.to_lowercase();
        self.owners
            .iter()
            .filter(|o| o.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Pets belonging to one owner
    pub fn pets_for_owner(&self, owner_id: i64) -> Vec<&Pet> {
        self.pets.iter().filter(|p| p.owner_id == owner_id).collect()
    }
}
