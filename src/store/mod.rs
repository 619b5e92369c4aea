/// Storage layer: the single point of truth for entity persistence
///
/// `Storage` is implemented by two interchangeable backends — an
/// in-memory map store and a SQLite store — that must behave
/// identically. Route handlers only ever see `Arc<dyn Storage>`.
pub mod memory;
pub mod seed;
pub mod sqlite;

use crate::error::ApiResult;
use crate::models::{
    Admin, NewAdmin, NewOwner, NewPet, NewProduct, NewReport, Owner, OwnerPatch, Pet, PetPatch,
    Product, ProductPatch, Report, ReportPatch,
};
use async_trait::async_trait;

/// Entity persistence interface
///
/// Lookup misses are a normal `Ok(None)` result; only genuine I/O and
/// database failures surface as errors. `delete_*` reports whether a row
/// was removed. No pagination and no ordering beyond insertion/id order.
#[async_trait]
pub trait Storage: Send + Sync {
    // Pets
    async fn list_pets(&self) -> ApiResult<Vec<Pet>>;
    async fn list_adoptable_pets(&self) -> ApiResult<Vec<Pet>>;
    async fn list_showcase_pets(&self) -> ApiResult<Vec<Pet>>;
    async fn get_pet(&self, id: i64) -> ApiResult<Option<Pet>>;
    async fn create_pet(&self, new: NewPet) -> ApiResult<Pet>;
    async fn update_pet(&self, id: i64, patch: PetPatch) -> ApiResult<Option<Pet>>;
    async fn delete_pet(&self, id: i64) -> ApiResult<bool>;

    // Owners
    async fn list_owners(&self) -> ApiResult<Vec<Owner>>;
    async fn list_pending_owners(&self) -> ApiResult<Vec<Owner>>;
    async fn get_owner(&self, id: i64) -> ApiResult<Option<Owner>>;
    async fn get_owner_by_email(&self, email: &str) -> ApiResult<Option<Owner>>;
    async fn register_owner(&self, new: NewOwner) -> ApiResult<Owner>;
    async fn update_owner(&self, id: i64, patch: OwnerPatch) -> ApiResult<Option<Owner>>;
    async fn approve_owner(&self, id: i64) -> ApiResult<Option<Owner>>;
    /// Rejects with Conflict while the owner still has pets
    async fn delete_owner(&self, id: i64) -> ApiResult<bool>;

    // Reports (never deleted)
    async fn list_reports(&self) -> ApiResult<Vec<Report>>;
    async fn get_report(&self, id: i64) -> ApiResult<Option<Report>>;
    async fn create_report(&self, new: NewReport) -> ApiResult<Report>;
    async fn update_report(&self, id: i64, patch: ReportPatch) -> ApiResult<Option<Report>>;

    // Admins
    async fn list_admins(&self) -> ApiResult<Vec<Admin>>;
    async fn get_admin(&self, id: i64) -> ApiResult<Option<Admin>>;
    async fn get_admin_by_username(&self, username: &str) -> ApiResult<Option<Admin>>;
    async fn create_admin(&self, new: NewAdmin) -> ApiResult<Admin>;

    // Products
    async fn list_products(&self) -> ApiResult<Vec<Product>>;
    async fn get_product(&self, id: i64) -> ApiResult<Option<Product>>;
    async fn create_product(&self, new: NewProduct) -> ApiResult<Product>;
    async fn update_product(&self, id: i64, patch: ProductPatch) -> ApiResult<Option<Product>>;
    async fn delete_product(&self, id: i64) -> ApiResult<bool>;

    // Credential checks: unique-key lookup then Argon2 verification.
    // Unknown key and wrong password both return Ok(None).
    async fn validate_admin_login(&self, username: &str, password: &str)
        -> ApiResult<Option<Admin>>;
    async fn validate_owner_login(&self, email: &str, password: &str)
        -> ApiResult<Option<Owner>>;
}

// Patch merging is shared so both backends have identical semantics.

pub(crate) fn apply_pet_patch(pet: &mut Pet, patch: PetPatch) {
    if let Some(name) = patch.name {
        pet.name = name;
    }
    if let Some(species) = patch.species {
        pet.species = species;
    }
    if let Some(breed) = patch.breed {
        pet.breed = breed;
    }
    if let Some(age) = patch.age {
        pet.age = age;
    }
    if let Some(gender) = patch.gender {
        pet.gender = gender;
    }
    if let Some(size) = patch.size {
        pet.size = Some(size);
    }
    if let Some(description) = patch.description {
        pet.description = description;
    }
    if let Some(image_url) = patch.image_url {
        pet.image_url = image_url;
    }
    if let Some(owner_id) = patch.owner_id {
        pet.owner_id = owner_id;
    }
    if let Some(owner_name) = patch.owner_name {
        pet.owner_name = owner_name;
    }
    if let Some(owner_avatar_url) = patch.owner_avatar_url {
        pet.owner_avatar_url = owner_avatar_url;
    }
    if let Some(likes) = patch.likes {
        pet.likes = likes;
    }
    if let Some(is_adoptable) = patch.is_adoptable {
        pet.is_adoptable = is_adoptable;
    }
    if let Some(is_recent) = patch.is_recent {
        pet.is_recent = is_recent;
    }
    if let Some(is_featured) = patch.is_featured {
        pet.is_featured = is_featured;
    }
    if let Some(status) = patch.status {
        pet.status = status;
    }
}

pub(crate) fn apply_owner_patch(owner: &mut Owner, patch: OwnerPatch) {
    if let Some(name) = patch.name {
        owner.name = name;
    }
    if let Some(email) = patch.email {
        owner.email = email;
    }
    if let Some(owner_type) = patch.owner_type {
        owner.owner_type = owner_type;
    }
    if let Some(bio) = patch.bio {
        owner.bio = bio;
    }
    if let Some(avatar_url) = patch.avatar_url {
        owner.avatar_url = avatar_url;
    }
}

pub(crate) fn apply_report_patch(report: &mut Report, patch: ReportPatch) {
    if let Some(status) = patch.status {
        report.status = status;
    }
    if let Some(admin_notes) = patch.admin_notes {
        report.admin_notes = Some(admin_notes);
    }
    if let Some(assigned_to) = patch.assigned_to {
        report.assigned_to = Some(assigned_to);
    }
}

pub(crate) fn apply_product_patch(product: &mut Product, patch: ProductPatch) {
    if let Some(name) = patch.name {
        product.name = name;
    }
    if let Some(description) = patch.description {
        product.description = description;
    }
    if let Some(category) = patch.category {
        product.category = category;
    }
    if let Some(pet_type) = patch.pet_type {
        product.pet_type = pet_type;
    }
    if let Some(price) = patch.price {
        product.price = price;
    }
    if let Some(image_url) = patch.image_url {
        product.image_url = image_url;
    }
    if let Some(stock) = patch.stock {
        product.stock = stock;
    }
    if let Some(is_available) = patch.is_available {
        product.is_available = is_available;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OwnerType, ReportStatus};
    use crate::store::{memory::MemStorage, sqlite::SqliteStorage};
    use sqlx::SqlitePool;
    use std::sync::Arc;

    /// Both backends, fresh and empty; every property below must hold on
    /// each of them identically.
    async fn backends() -> Vec<Arc<dyn Storage>> {
        let mem: Arc<dyn Storage> = Arc::new(MemStorage::new());

        let pool = SqlitePool::connect(":memory:").await.unwrap();
        crate::db::run_migrations(&pool).await.unwrap();
        let sql: Arc<dyn Storage> = Arc::new(SqliteStorage::new(pool));

        vec![mem, sql]
    }

    fn new_pet(name: &str, adoptable: bool) -> NewPet {
        NewPet {
            name: name.to_string(),
            species: "dog".to_string(),
            breed: "Golden Retriever".to_string(),
            age: 2,
            gender: "male".to_string(),
            size: Some("large".to_string()),
            description: "Friendly and energetic companion.".to_string(),
            image_url: "https://example.com/max.jpg".to_string(),
            owner_id: 1,
            owner_name: "Sarah Johnson".to_string(),
            owner_avatar_url: "https://example.com/sarah.jpg".to_string(),
            status: if adoptable { "Available" } else { "Not for adoption" }.to_string(),
            is_adoptable: adoptable,
            is_recent: true,
            is_featured: false,
        }
    }

    fn new_owner(email: &str) -> NewOwner {
        NewOwner {
            name: "Mark Wilson".to_string(),
            email: email.to_string(),
            owner_type: OwnerType::PetRescuer,
            bio: "Rescuing animals is my passion.".to_string(),
            avatar_url: "https://example.com/mark.jpg".to_string(),
            password: "correct-horse-battery".to_string(),
        }
    }

    #[tokio::test]
    async fn test_pet_create_get_round_trip() {
        for storage in backends().await {
            let created = storage.create_pet(new_pet("Max", true)).await.unwrap();
            assert!(created.id > 0);
            assert_eq!(created.likes, 0);

            let fetched = storage.get_pet(created.id).await.unwrap().unwrap();
            assert_eq!(fetched.name, "Max");
            assert_eq!(fetched.breed, created.breed);
            assert_eq!(fetched.likes, 0);
            assert!(fetched.is_adoptable);
        }
    }

    #[tokio::test]
    async fn test_adoptable_showcase_partition() {
        for storage in backends().await {
            storage.create_pet(new_pet("Max", true)).await.unwrap();
            storage.create_pet(new_pet("Charlie", false)).await.unwrap();
            storage.create_pet(new_pet("Luna", true)).await.unwrap();

            let adoptable = storage.list_adoptable_pets().await.unwrap();
            let showcase = storage.list_showcase_pets().await.unwrap();

            assert_eq!(adoptable.len(), 2);
            assert_eq!(showcase.len(), 1);
            assert!(adoptable.iter().all(|p| p.is_adoptable));
            assert!(showcase.iter().all(|p| !p.is_adoptable));

            // The partition is total and disjoint
            let adoptable_ids: Vec<i64> = adoptable.iter().map(|p| p.id).collect();
            assert!(showcase.iter().all(|p| !adoptable_ids.contains(&p.id)));
        }
    }

    #[tokio::test]
    async fn test_pet_patch_moves_between_listings() {
        for storage in backends().await {
            let pet = storage.create_pet(new_pet("Bella", true)).await.unwrap();

            let patch = PetPatch {
                is_adoptable: Some(false),
                status: Some("Not for adoption".to_string()),
                likes: Some(187),
                ..Default::default()
            };
            let updated = storage.update_pet(pet.id, patch).await.unwrap().unwrap();

            assert!(!updated.is_adoptable);
            assert_eq!(updated.likes, 187);
            // Untouched fields survive the merge
            assert_eq!(updated.name, "Bella");
            assert!(updated.updated_at >= pet.updated_at);

            assert!(storage.list_adoptable_pets().await.unwrap().is_empty());
            assert_eq!(storage.list_showcase_pets().await.unwrap().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_update_missing_pet_is_none() {
        for storage in backends().await {
            let result = storage.update_pet(9999, PetPatch::default()).await.unwrap();
            assert!(result.is_none());
        }
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        for storage in backends().await {
            let pet = storage.create_pet(new_pet("Rio", false)).await.unwrap();

            assert!(storage.delete_pet(pet.id).await.unwrap());
            assert!(!storage.delete_pet(pet.id).await.unwrap());
            assert!(storage.get_pet(pet.id).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_owner_registration_starts_pending() {
        for storage in backends().await {
            let owner = storage.register_owner(new_owner("mark@example.com")).await.unwrap();

            assert!(!owner.is_approved);
            assert!(owner.password_hash.starts_with("$argon2"));

            let pending = storage.list_pending_owners().await.unwrap();
            assert_eq!(pending.len(), 1);
            assert_eq!(pending[0].id, owner.id);
        }
    }

    #[tokio::test]
    async fn test_approve_owner_leaves_pending_listing() {
        for storage in backends().await {
            let owner = storage.register_owner(new_owner("mark@example.com")).await.unwrap();

            let approved = storage.approve_owner(owner.id).await.unwrap().unwrap();
            assert!(approved.is_approved);
            assert!(storage.list_pending_owners().await.unwrap().is_empty());

            // Still present in the full directory
            assert_eq!(storage.list_owners().await.unwrap().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_delete_owner_with_pets_conflicts() {
        for storage in backends().await {
            let owner = storage.register_owner(new_owner("sarah@example.com")).await.unwrap();
            let pet = storage
                .create_pet(NewPet {
                    owner_id: owner.id,
                    ..new_pet("Max", true)
                })
                .await
                .unwrap();

            let err = storage.delete_owner(owner.id).await.unwrap_err();
            assert!(matches!(err, crate::error::ApiError::Conflict(_)));

            storage.delete_pet(pet.id).await.unwrap();
            assert!(storage.delete_owner(owner.id).await.unwrap());
            assert!(!storage.delete_owner(owner.id).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_report_defaults_and_anonymous_contact_dropped() {
        for storage in backends().await {
            let report = storage
                .create_report(NewReport {
                    incident_type: "neglect".to_string(),
                    location: "123 Main St".to_string(),
                    description: "left outside without water".to_string(),
                    contact_info: Some("john@example.com".to_string()),
                    anonymous: true,
                })
                .await
                .unwrap();

            assert_eq!(report.status, ReportStatus::Submitted);
            assert!(report.contact_info.is_none());
            assert!(report.admin_notes.is_none());
            assert!(report.assigned_to.is_none());

            // Non-anonymous keeps the contact info
            let named = storage
                .create_report(NewReport {
                    incident_type: "abuse".to_string(),
                    location: "456 Park Ave".to_string(),
                    description: "Multiple cats in poor condition.".to_string(),
                    contact_info: Some("john@example.com".to_string()),
                    anonymous: false,
                })
                .await
                .unwrap();
            assert_eq!(named.contact_info.as_deref(), Some("john@example.com"));
        }
    }

    #[tokio::test]
    async fn test_report_moderation_patch() {
        for storage in backends().await {
            let report = storage
                .create_report(NewReport {
                    incident_type: "abuse".to_string(),
                    location: "456 Park Ave".to_string(),
                    description: "Multiple cats in poor condition.".to_string(),
                    contact_info: None,
                    anonymous: true,
                })
                .await
                .unwrap();

            let patch = ReportPatch {
                status: Some(ReportStatus::Investigating),
                admin_notes: Some("Assigned to animal control.".to_string()),
                assigned_to: None,
            };
            let updated = storage.update_report(report.id, patch).await.unwrap().unwrap();

            assert_eq!(updated.status, ReportStatus::Investigating);
            assert_eq!(updated.admin_notes.as_deref(), Some("Assigned to animal control."));
        }
    }

    #[tokio::test]
    async fn test_admin_login_checks() {
        for storage in backends().await {
            storage
                .create_admin(NewAdmin {
                    username: "admin".to_string(),
                    password: "password123".to_string(),
                    name: "Admin User".to_string(),
                    email: "admin@pethaven.example".to_string(),
                    role: None,
                })
                .await
                .unwrap();

            let ok = storage.validate_admin_login("admin", "password123").await.unwrap();
            assert!(ok.is_some());

            assert!(storage
                .validate_admin_login("admin", "wrong-password")
                .await
                .unwrap()
                .is_none());
            assert!(storage
                .validate_admin_login("nobody", "password123")
                .await
                .unwrap()
                .is_none());
        }
    }

    #[tokio::test]
    async fn test_duplicate_admin_username_conflicts() {
        for storage in backends().await {
            let new = NewAdmin {
                username: "admin".to_string(),
                password: "password123".to_string(),
                name: "Admin User".to_string(),
                email: "admin@pethaven.example".to_string(),
                role: None,
            };
            storage.create_admin(new.clone()).await.unwrap();

            let err = storage.create_admin(new).await.unwrap_err();
            assert!(matches!(err, crate::error::ApiError::Conflict(_)));
        }
    }

    #[tokio::test]
    async fn test_owner_login_checks() {
        for storage in backends().await {
            storage.register_owner(new_owner("mark@example.com")).await.unwrap();

            assert!(storage
                .validate_owner_login("mark@example.com", "correct-horse-battery")
                .await
                .unwrap()
                .is_some());
            assert!(storage
                .validate_owner_login("mark@example.com", "wrong")
                .await
                .unwrap()
                .is_none());
            assert!(storage
                .validate_owner_login("ghost@example.com", "correct-horse-battery")
                .await
                .unwrap()
                .is_none());
        }
    }

    #[tokio::test]
    async fn test_product_lifecycle() {
        for storage in backends().await {
            let product = storage
                .create_product(NewProduct {
                    name: "Premium Dog Food".to_string(),
                    description: "Balanced nutrition for adult dogs.".to_string(),
                    category: "food".to_string(),
                    pet_type: "dog".to_string(),
                    price: "29.99".to_string(),
                    image_url: "https://example.com/food.jpg".to_string(),
                    stock: 50,
                    is_available: true,
                })
                .await
                .unwrap();

            let patch = ProductPatch {
                stock: Some(0),
                is_available: Some(false),
                ..Default::default()
            };
            let updated = storage.update_product(product.id, patch).await.unwrap().unwrap();
            assert_eq!(updated.stock, 0);
            assert!(!updated.is_available);
            assert_eq!(updated.price, "29.99");

            assert!(storage.delete_product(product.id).await.unwrap());
            assert!(storage.get_product(product.id).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_listing_preserves_insertion_order() {
        for storage in backends().await {
            for name in ["Max", "Luna", "Buddy"] {
                storage.create_pet(new_pet(name, true)).await.unwrap();
            }

            let names: Vec<String> = storage
                .list_adoptable_pets()
                .await
                .unwrap()
                .into_iter()
                .map(|p| p.name)
                .collect();
            assert_eq!(names, vec!["Max", "Luna", "Buddy"]);
        }
    }
}
