/// SQLite storage backend
///
/// Runtime sqlx queries with manual row mapping; updates are
/// read-merge-write so patch semantics match the in-memory backend
/// exactly.
use crate::auth;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Admin, AdminRole, NewAdmin, NewOwner, NewPet, NewProduct, NewReport, Owner, OwnerPatch,
    OwnerType, Pet, PetPatch, Product, ProductPatch, Report, ReportPatch, ReportStatus,
};
use crate::store::{
    apply_owner_patch, apply_pet_patch, apply_product_patch, apply_report_patch, Storage,
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const PET_COLUMNS: &str = "id, name, species, breed, age, gender, size, description, image_url, \
     owner_id, owner_name, owner_avatar_url, likes, is_adoptable, is_recent, is_featured, \
     status, created_at, updated_at";

const OWNER_COLUMNS: &str =
    "id, name, email, owner_type, bio, avatar_url, password_hash, is_approved, created_at, updated_at";

const REPORT_COLUMNS: &str = "id, incident_type, location, description, contact_info, anonymous, \
     status, admin_notes, assigned_to, created_at, updated_at";

const ADMIN_COLUMNS: &str =
    "id, username, password_hash, name, email, role, created_at, updated_at";

const PRODUCT_COLUMNS: &str = "id, name, description, category, pet_type, price, image_url, \
     stock, is_available, created_at, updated_at";

/// SQLite-backed storage
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn pet_from_row(row: &SqliteRow) -> ApiResult<Pet> {
        Ok(Pet {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            species: row.try_get("species")?,
            breed: row.try_get("breed")?,
            age: row.try_get("age")?,
            gender: row.try_get("gender")?,
            size: row.try_get("size")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
            owner_id: row.try_get("owner_id")?,
            owner_name: row.try_get("owner_name")?,
            owner_avatar_url: row.try_get("owner_avatar_url")?,
            likes: row.try_get("likes")?,
            is_adoptable: row.try_get("is_adoptable")?,
            is_recent: row.try_get("is_recent")?,
            is_featured: row.try_get("is_featured")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn owner_from_row(row: &SqliteRow) -> ApiResult<Owner> {
        let owner_type_str: String = row.try_get("owner_type")?;

        Ok(Owner {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            owner_type: OwnerType::from_str(&owner_type_str)?,
            bio: row.try_get("bio")?,
            avatar_url: row.try_get("avatar_url")?,
            password_hash: row.try_get("password_hash")?,
            is_approved: row.try_get("is_approved")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn report_from_row(row: &SqliteRow) -> ApiResult<Report> {
        let status_str: String = row.try_get("status")?;

        Ok(Report {
            id: row.try_get("id")?,
            incident_type: row.try_get("incident_type")?,
            location: row.try_get("location")?,
            description: row.try_get("description")?,
            contact_info: row.try_get("contact_info")?,
            anonymous: row.try_get("anonymous")?,
            status: ReportStatus::from_str(&status_str)?,
            admin_notes: row.try_get("admin_notes")?,
            assigned_to: row.try_get("assigned_to")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn admin_from_row(row: &SqliteRow) -> ApiResult<Admin> {
        let role_str: String = row.try_get("role")?;

        Ok(Admin {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            role: AdminRole::from_str(&role_str)?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn product_from_row(row: &SqliteRow) -> ApiResult<Product> {
        Ok(Product {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            pet_type: row.try_get("pet_type")?,
            price: row.try_get("price")?,
            image_url: row.try_get("image_url")?,
            stock: row.try_get("stock")?,
            is_available: row.try_get("is_available")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    async fn list_pets_where_adoptable(&self, adoptable: bool) -> ApiResult<Vec<Pet>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM pets WHERE is_adoptable = ?1 ORDER BY id",
            PET_COLUMNS
        ))
        .bind(adoptable)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::pet_from_row).collect()
    }

    async fn write_pet(&self, pet: &Pet) -> ApiResult<()> {
        sqlx::query(
            "UPDATE pets SET name = ?1, species = ?2, breed = ?3, age = ?4, gender = ?5, \
             size = ?6, description = ?7, image_url = ?8, owner_id = ?9, owner_name = ?10, \
             owner_avatar_url = ?11, likes = ?12, is_adoptable = ?13, is_recent = ?14, \
             is_featured = ?15, status = ?16, updated_at = ?17 WHERE id = ?18",
        )
        .bind(&pet.name)
        .bind(&pet.species)
        .bind(&pet.breed)
        .bind(pet.age)
        .bind(&pet.gender)
        .bind(&pet.size)
        .bind(&pet.description)
        .bind(&pet.image_url)
        .bind(pet.owner_id)
        .bind(&pet.owner_name)
        .bind(&pet.owner_avatar_url)
        .bind(pet.likes)
        .bind(pet.is_adoptable)
        .bind(pet.is_recent)
        .bind(pet.is_featured)
        .bind(&pet.status)
        .bind(pet.updated_at)
        .bind(pet.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn write_owner(&self, owner: &Owner) -> ApiResult<()> {
        sqlx::query(
            "UPDATE owners SET name = ?1, email = ?2, owner_type = ?3, bio = ?4, \
             avatar_url = ?5, is_approved = ?6, updated_at = ?7 WHERE id = ?8",
        )
        .bind(&owner.name)
        .bind(&owner.email)
        .bind(owner.owner_type.as_str())
        .bind(&owner.bio)
        .bind(&owner.avatar_url)
        .bind(owner.is_approved)
        .bind(owner.updated_at)
        .bind(owner.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    // Pets

    async fn list_pets(&self) -> ApiResult<Vec<Pet>> {
        let rows = sqlx::query(&format!("SELECT {} FROM pets ORDER BY id", PET_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::pet_from_row).collect()
    }

    async fn list_adoptable_pets(&self) -> ApiResult<Vec<Pet>> {
        self.list_pets_where_adoptable(true).await
    }

    async fn list_showcase_pets(&self) -> ApiResult<Vec<Pet>> {
        self.list_pets_where_adoptable(false).await
    }

    async fn get_pet(&self, id: i64) -> ApiResult<Option<Pet>> {
        let row = sqlx::query(&format!("SELECT {} FROM pets WHERE id = ?1", PET_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::pet_from_row).transpose()
    }

    async fn create_pet(&self, new: NewPet) -> ApiResult<Pet> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO pets (name, species, breed, age, gender, size, description, image_url, \
             owner_id, owner_name, owner_avatar_url, likes, is_adoptable, is_recent, is_featured, \
             status, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 0, ?12, ?13, ?14, ?15, ?16, ?17)",
        )
        .bind(&new.name)
        .bind(&new.species)
        .bind(&new.breed)
        .bind(new.age)
        .bind(&new.gender)
        .bind(&new.size)
        .bind(&new.description)
        .bind(&new.image_url)
        .bind(new.owner_id)
        .bind(&new.owner_name)
        .bind(&new.owner_avatar_url)
        .bind(new.is_adoptable)
        .bind(new.is_recent)
        .bind(new.is_featured)
        .bind(&new.status)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Pet {
            id: result.last_insert_rowid(),
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
        })
    }

    async fn update_pet(&self, id: i64, patch: PetPatch) -> ApiResult<Option<Pet>> {
        let Some(mut pet) = self.get_pet(id).await? else {
            return Ok(None);
        };

        apply_pet_patch(&mut pet, patch);
        pet.updated_at = Utc::now();
        self.write_pet(&pet).await?;

        Ok(Some(pet))
    }

    async fn delete_pet(&self, id: i64) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM pets WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // Owners

    async fn list_owners(&self) -> ApiResult<Vec<Owner>> {
        let rows = sqlx::query(&format!("SELECT {} FROM owners ORDER BY id", OWNER_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::owner_from_row).collect()
    }

    async fn list_pending_owners(&self) -> ApiResult<Vec<Owner>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM owners WHERE is_approved = FALSE ORDER BY id",
            OWNER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::owner_from_row).collect()
    }

    async fn get_owner(&self, id: i64) -> ApiResult<Option<Owner>> {
        let row = sqlx::query(&format!("SELECT {} FROM owners WHERE id = ?1", OWNER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::owner_from_row).transpose()
    }

    async fn get_owner_by_email(&self, email: &str) -> ApiResult<Option<Owner>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM owners WHERE email = ?1 ORDER BY id LIMIT 1",
            OWNER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::owner_from_row).transpose()
    }

    async fn register_owner(&self, new: NewOwner) -> ApiResult<Owner> {
        let password_hash = auth::hash_password(&new.password)?;
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO owners (name, email, owner_type, bio, avatar_url, password_hash, \
             is_approved, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, FALSE, ?7, ?8)",
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(new.owner_type.as_str())
        .bind(&new.bio)
        .bind(&new.avatar_url)
        .bind(&password_hash)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Owner {
            id: result.last_insert_rowid(),
            name: new.name,
            email: new.email,
            owner_type: new.owner_type,
            bio: new.bio,
            avatar_url: new.avatar_url,
            password_hash,
            is_approved: false,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_owner(&self, id: i64, patch: OwnerPatch) -> ApiResult<Option<Owner>> {
        let Some(mut owner) = self.get_owner(id).await? else {
            return Ok(None);
        };

        apply_owner_patch(&mut owner, patch);
        owner.updated_at = Utc::now();
        self.write_owner(&owner).await?;

        Ok(Some(owner))
    }

    async fn approve_owner(&self, id: i64) -> ApiResult<Option<Owner>> {
        let Some(mut owner) = self.get_owner(id).await? else {
            return Ok(None);
        };

        owner.is_approved = true;
        owner.updated_at = Utc::now();
        self.write_owner(&owner).await?;

        Ok(Some(owner))
    }

    async fn delete_owner(&self, id: i64) -> ApiResult<bool> {
        let pet_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pets WHERE owner_id = ?1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        if pet_count > 0 {
            return Err(ApiError::Conflict(
                "Owner still has pets listed".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM owners WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // Reports

    async fn list_reports(&self) -> ApiResult<Vec<Report>> {
        let rows = sqlx::query(&format!("SELECT {} FROM reports ORDER BY id", REPORT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::report_from_row).collect()
    }

    async fn get_report(&self, id: i64) -> ApiResult<Option<Report>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM reports WHERE id = ?1",
            REPORT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::report_from_row).transpose()
    }

    async fn create_report(&self, new: NewReport) -> ApiResult<Report> {
        let now = Utc::now();
        // Anonymous reports never carry contact details
        let contact_info = if new.anonymous { None } else { new.contact_info };

        let result = sqlx::query(
            "INSERT INTO reports (incident_type, location, description, contact_info, anonymous, \
             status, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, 'submitted', ?6, ?7)",
        )
        .bind(&new.incident_type)
        .bind(&new.location)
        .bind(&new.description)
        .bind(&contact_info)
        .bind(new.anonymous)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Report {
            id: result.last_insert_rowid(),
            incident_type: new.incident_type,
            location: new.location,
            description: new.description,
            contact_info,
            anonymous: new.anonymous,
            status: ReportStatus::Submitted,
            admin_notes: None,
            assigned_to: None,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_report(&self, id: i64, patch: ReportPatch) -> ApiResult<Option<Report>> {
        let Some(mut report) = self.get_report(id).await? else {
            return Ok(None);
        };

        apply_report_patch(&mut report, patch);
        report.updated_at = Utc::now();

        sqlx::query(
            "UPDATE reports SET status = ?1, admin_notes = ?2, assigned_to = ?3, updated_at = ?4 \
             WHERE id = ?5",
        )
        .bind(report.status.as_str())
        .bind(&report.admin_notes)
        .bind(&report.assigned_to)
        .bind(report.updated_at)
        .bind(report.id)
        .execute(&self.pool)
        .await?;

        Ok(Some(report))
    }

    // Admins

    async fn list_admins(&self) -> ApiResult<Vec<Admin>> {
        let rows = sqlx::query(&format!("SELECT {} FROM admins ORDER BY id", ADMIN_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::admin_from_row).collect()
    }

    async fn get_admin(&self, id: i64) -> ApiResult<Option<Admin>> {
        let row = sqlx::query(&format!("SELECT {} FROM admins WHERE id = ?1", ADMIN_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::admin_from_row).transpose()
    }

    async fn get_admin_by_username(&self, username: &str) -> ApiResult<Option<Admin>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM admins WHERE username = ?1",
            ADMIN_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::admin_from_row).transpose()
    }

    async fn create_admin(&self, new: NewAdmin) -> ApiResult<Admin> {
        if self.get_admin_by_username(&new.username).await?.is_some() {
            return Err(ApiError::Conflict(format!(
                "Username {} already taken",
                new.username
            )));
        }

        let password_hash = auth::hash_password(&new.password)?;
        let role = new.role.unwrap_or(AdminRole::Admin);
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO admins (username, password_hash, name, email, role, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&new.username)
        .bind(&password_hash)
        .bind(&new.name)
        .bind(&new.email)
        .bind(role.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Admin {
            id: result.last_insert_rowid(),
            username: new.username,
            password_hash,
            name: new.name,
            email: new.email,
            role,
            created_at: now,
            updated_at: now,
        })
    }

    // Products

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM products ORDER BY id",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::product_from_row).collect()
    }

    async fn get_product(&self, id: i64) -> ApiResult<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM products WHERE id = ?1",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::product_from_row).transpose()
    }

    async fn create_product(&self, new: NewProduct) -> ApiResult<Product> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO products (name, description, category, pet_type, price, image_url, \
             stock, is_available, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.category)
        .bind(&new.pet_type)
        .bind(&new.price)
        .bind(&new.image_url)
        .bind(new.stock)
        .bind(new.is_available)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
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
        })
    }

    async fn update_product(&self, id: i64, patch: ProductPatch) -> ApiResult<Option<Product>> {
        let Some(mut product) = self.get_product(id).await? else {
            return Ok(None);
        };

        apply_product_patch(&mut product, patch);
        product.updated_at = Utc::now();

        sqlx::query(
            "UPDATE products SET name = ?1, description = ?2, category = ?3, pet_type = ?4, \
             price = ?5, image_url = ?6, stock = ?7, is_available = ?8, updated_at = ?9 \
             WHERE id = ?10",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(&product.pet_type)
        .bind(&product.price)
        .bind(&product.image_url)
        .bind(product.stock)
        .bind(product.is_available)
        .bind(product.updated_at)
        .bind(product.id)
        .execute(&self.pool)
        .await?;

        Ok(Some(product))
    }

    async fn delete_product(&self, id: i64) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
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
