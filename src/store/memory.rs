/// In-memory storage backend
///
/// Tables are BTreeMaps keyed by sequential ids, so iteration order is
/// insertion order, matching the SQLite backend's id ordering. A single
/// RwLock guards the whole store; concurrent update/delete races are
/// last-write-wins, as specified.
use crate::auth;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Admin, AdminRole, NewAdmin, NewOwner, NewPet, NewProduct, NewReport, Owner, OwnerPatch, Pet,
    PetPatch, Product, ProductPatch, Report, ReportPatch, ReportStatus,
};
use crate::store::{
    apply_owner_patch, apply_pet_patch, apply_product_patch, apply_report_patch, Storage,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    pets: BTreeMap<i64, Pet>,
    owners: BTreeMap<i64, Owner>,
    reports: BTreeMap<i64, Report>,
    admins: BTreeMap<i64, Admin>,
    products: BTreeMap<i64, Product>,

    next_pet_id: i64,
    next_owner_id: i64,
    next_report_id: i64,
    next_admin_id: i64,
    next_product_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// Map-backed storage
pub struct MemStorage {
    inner: RwLock<Tables>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Tables::default()),
        }
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemStorage {
    // Pets

    async fn list_pets(&self) -> ApiResult<Vec<Pet>> {
        Ok(self.inner.read().await.pets.values().cloned().collect())
    }

    async fn list_adoptable_pets(&self) -> ApiResult<Vec<Pet>> {
        let tables = self.inner.read().await;
        Ok(tables
            .pets
            .values()
            .filter(|p| p.is_adoptable)
            .cloned()
            .collect())
    }

    async fn list_showcase_pets(&self) -> ApiResult<Vec<Pet>> {
        let tables = self.inner.read().await;
        Ok(tables
            .pets
            .values()
            .filter(|p| !p.is_adoptable)
            .cloned()
            .collect())
    }

    async fn get_pet(&self, id: i64) -> ApiResult<Option<Pet>> {
        Ok(self.inner.read().await.pets.get(&id).cloned())
    }

    async fn create_pet(&self, new: NewPet) -> ApiResult<Pet> {
        let mut tables = self.inner.write().await;
        let id = next_id(&mut tables.next_pet_id);
        let now = Utc::now();

        let pet = Pet {
            id,
            name: new.name,
            species: new.species,
            breed: new.breed,
            age: new.age,
            gender: new.gender,
            size: new.size,
            description: new.description,
            image_url: new.image_url,
            owner_id: new.owner_id,
            owner_name: new.owner_name,
            owner_avatar_url: new.owner_avatar_url,
            likes: 0,
            is_adoptable: new.is_adoptable,
            is_recent: new.is_recent,
            is_featured: new.is_featured,
            status: new.status,
            created_at: now,
            updated_at: now,
        };

        tables.pets.insert(id, pet.clone());
        Ok(pet)
    }

    async fn update_pet(&self, id: i64, patch: PetPatch) -> ApiResult<Option<Pet>> {
        let mut tables = self.inner.write().await;
        let Some(pet) = tables.pets.get_mut(&id) else {
            return Ok(None);
        };

        apply_pet_patch(pet, patch);
        pet.updated_at = Utc::now();
        Ok(Some(pet.clone()))
    }

    async fn delete_pet(&self, id: i64) -> ApiResult<bool> {
        Ok(self.inner.write().await.pets.remove(&id).is_some())
    }

    // Owners

    async fn list_owners(&self) -> ApiResult<Vec<Owner>> {
        Ok(self.inner.read().await.owners.values().cloned().collect())
    }

    async fn list_pending_owners(&self) -> ApiResult<Vec<Owner>> {
        let tables = self.inner.read().await;
        Ok(tables
            .owners
            .values()
            .filter(|o| !o.is_approved)
            .cloned()
            .collect())
    }

    async fn get_owner(&self, id: i64) -> ApiResult<Option<Owner>> {
        Ok(self.inner.read().await.owners.get(&id).cloned())
    }

    async fn get_owner_by_email(&self, email: &str) -> ApiResult<Option<Owner>> {
        let tables = self.inner.read().await;
        Ok(tables.owners.values().find(|o| o.email == email).cloned())
    }

    async fn register_owner(&self, new: NewOwner) -> ApiResult<Owner> {
        let password_hash = auth::hash_password(&new.password)?;

        let mut tables = self.inner.write().await;
        let id = next_id(&mut tables.next_owner_id);
        let now = Utc::now();

        let owner = Owner {
            id,
            name: new.name,
            email: new.email,
            owner_type: new.owner_type,
            bio: new.bio,
            avatar_url: new.avatar_url,
            password_hash,
            is_approved: false,
            created_at: now,
            updated_at: now,
        };

        tables.owners.insert(id, owner.clone());
        Ok(owner)
    }

    async fn update_owner(&self, id: i64, patch: OwnerPatch) -> ApiResult<Option<Owner>> {
        let mut tables = self.inner.write().await;
        let Some(owner) = tables.owners.get_mut(&id) else {
            return Ok(None);
        };

        apply_owner_patch(owner, patch);
        owner.updated_at = Utc::now();
        Ok(Some(owner.clone()))
    }

    async fn approve_owner(&self, id: i64) -> ApiResult<Option<Owner>> {
        let mut tables = self.inner.write().await;
        let Some(owner) = tables.owners.get_mut(&id) else {
            return Ok(None);
        };

        owner.is_approved = true;
        owner.updated_at = Utc::now();
        Ok(Some(owner.clone()))
    }

    async fn delete_owner(&self, id: i64) -> ApiResult<bool> {
        let mut tables = self.inner.write().await;

        if tables.pets.values().any(|p| p.owner_id == id) {
            return Err(ApiError::Conflict(
                "Owner still has pets listed".to_string(),
            ));
        }

        Ok(tables.owners.remove(&id).is_some())
    }

    // Reports

    async fn list_reports(&self) -> ApiResult<Vec<Report>> {
        Ok(self.inner.read().await.reports.values().cloned().collect())
    }

    async fn get_report(&self, id: i64) -> ApiResult<Option<Report>> {
        Ok(self.inner.read().await.reports.get(&id).cloned())
    }

    async fn create_report(&self, new: NewReport) -> ApiResult<Report> {
        let mut tables = self.inner.write().await;
        let id = next_id(&mut tables.next_report_id);
        let now = Utc::now();

        let report = Report {
            id,
            incident_type: new.incident_type,
            location: new.location,
            description: new.description,
            // Anonymous reports never carry contact details
            contact_info: if new.anonymous { None } else { new.contact_info },
            anonymous: new.anonymous,
            status: ReportStatus::Submitted,
            admin_notes: None,
            assigned_to: None,
            created_at: now,
            updated_at: now,
        };

        tables.reports.insert(id, report.clone());
        Ok(report)
    }

    async fn update_report(&self, id: i64, patch: ReportPatch) -> ApiResult<Option<Report>> {
        let mut tables = self.inner.write().await;
        let Some(report) = tables.reports.get_mut(&id) else {
            return Ok(None);
        };

        apply_report_patch(report, patch);
        report.updated_at = Utc::now();
        Ok(Some(report.clone()))
    }

    // Admins

    async fn list_admins(&self) -> ApiResult<Vec<Admin>> {
        Ok(self.inner.read().await.admins.values().cloned().collect())
    }

    async fn get_admin(&self, id: i64) -> ApiResult<Option<Admin>> {
        Ok(self.inner.read().await.admins.get(&id).cloned())
    }

    async fn get_admin_by_username(&self, username: &str) -> ApiResult<Option<Admin>> {
        let tables = self.inner.read().await;
        Ok(tables
            .admins
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn create_admin(&self, new: NewAdmin) -> ApiResult<Admin> {
        let password_hash = auth::hash_password(&new.password)?;

        let mut tables = self.inner.write().await;
        if tables.admins.values().any(|a| a.username == new.username) {
            return Err(ApiError::Conflict(format!(
                "Username {} already taken",
                new.username
            )));
        }

        let id = next_id(&mut tables.next_admin_id);
        let now = Utc::now();

        let admin = Admin {
            id,
            username: new.username,
            password_hash,
            name: new.name,
            email: new.email,
            role: new.role.unwrap_or(AdminRole::Admin),
            created_at: now,
            updated_at: now,
        };

        tables.admins.insert(id, admin.clone());
        Ok(admin)
    }

    // Products

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        Ok(self.inner.read().await.products.values().cloned().collect())
    }

    async fn get_product(&self, id: i64) -> ApiResult<Option<Product>> {
        Ok(self.inner.read().await.products.get(&id).cloned())
    }

    async fn create_product(&self, new: NewProduct) -> ApiResult<Product> {
        let mut tables = self.inner.write().await;
        let id = next_id(&mut tables.next_product_id);
        let now = Utc::now();

        let product = Product {
            id,
            name: new.name,
            description: new.description,
            category: new.category,
            pet_type: new.pet_type,
            price: new.price,
            image_url: new.image_url,
            stock: new.stock,
            is_available: new.is_available,
            created_at: now,
            updated_at: now,
        };

        tables.products.insert(id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: i64, patch: ProductPatch) -> ApiResult<Option<Product>> {
        let mut tables = self.inner.write().await;
        let Some(product) = tables.products.get_mut(&id) else {
            return Ok(None);
        };

        apply_product_patch(product, patch);
        product.updated_at = Utc::now();
        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: i64) -> ApiResult<bool> {
        Ok(self.inner.write().await.products.remove(&id).is_some())
    }

    // Credential checks

    async fn validate_admin_login(
        &self,
        username: &str,
        password: &str,
    ) -> ApiResult<Option<Admin>> {
        let Some(admin) = self.get_admin_by_username(username).await? else {
            return Ok(None);
        };

        if auth::verify_password(&admin.password_hash, password)? {
            Ok(Some(admin))
        } else {
            Ok(None)
        }
    }

    async fn validate_owner_login(&self, email: &str, password: &str) -> ApiResult<Option<Owner>> {
        let Some(owner) = self.get_owner_by_email(email).await? else {
            return Ok(None);
        };

        if auth::verify_password(&owner.password_hash, password)? {
            Ok(Some(owner))
        } else {
            Ok(None)
        }
    }
}
