/// Sample data loaded into an empty store
///
/// Everything goes through the `Storage` trait, so both backends start
/// from exactly the same state: three approved owners plus one pending,
/// three adoptable pets, five showcase pets, two reports, one admin, and
/// three products.
use crate::error::ApiResult;
use crate::models::{
    NewAdmin, NewOwner, NewPet, NewProduct, NewReport, OwnerType, PetPatch, ReportPatch,
    ReportStatus,
};
use crate::store::Storage;
use tracing::info;

/// Default admin credentials used when no bootstrap admin is configured
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "password123";

struct SeedPet {
    name: &'static str,
    species: &'static str,
    breed: &'static str,
    age: i64,
    gender: &'static str,
    size: Option<&'static str>,
    description: &'static str,
    image_url: &'static str,
    status: &'static str,
    is_adoptable: bool,
    is_recent: bool,
    is_featured: bool,
    likes: i64,
    owner_index: usize,
}

const SEED_PETS: &[SeedPet] = &[
    SeedPet {
        name: "Max",
        species: "dog",
        breed: "Golden Retriever",
        age: 2,
        gender: "male",
        size: Some("large"),
        description: "Friendly and energetic companion looking for an active family.",
        image_url: "https://images.unsplash.com/photo-1543466835-00a7907e9de1",
        status: "Available",
        is_adoptable: true,
        is_recent: true,
        is_featured: false,
        likes: 120,
        owner_index: 0,
    },
    SeedPet {
        name: "Luna",
        species: "cat",
        breed: "Domestic Shorthair",
        age: 1,
        gender: "female",
        size: Some("small"),
        description: "Playful and affectionate, loves to curl up on laps.",
        image_url: "https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba",
        status: "Available",
        is_adoptable: true,
        is_recent: false,
        is_featured: true,
        likes: 87,
        owner_index: 1,
    },
    SeedPet {
        name: "Buddy",
        species: "dog",
        breed: "Border Collie",
        age: 3,
        gender: "male",
        size: Some("medium"),
        description: "Intelligent and loyal, great with children and other pets.",
        image_url: "https://images.unsplash.com/photo-1583511655826-05700442b31b",
        status: "Available",
        is_adoptable: true,
        is_recent: true,
        is_featured: true,
        likes: 145,
        owner_index: 2,
    },
    SeedPet {
        name: "Charlie",
        species: "dog",
        breed: "Pug",
        age: 4,
        gender: "male",
        size: Some("small"),
        description: "Adorable and cuddly pug with tons of personality.",
        image_url: "https://images.unsplash.com/photo-1517849845537-4d257902454a",
        status: "Not for adoption",
        is_adoptable: false,
        is_recent: false,
        is_featured: true,
        likes: 243,
        owner_index: 0,
    },
    SeedPet {
        name: "Bella",
        species: "dog",
        breed: "Labrador",
        age: 2,
        gender: "female",
        size: Some("large"),
        description: "Beautiful and gentle lab that loves to play fetch.",
        image_url: "https://images.unsplash.com/photo-1552053831-71594a27632d",
        status: "Not for adoption",
        is_adoptable: false,
        is_recent: true,
        is_featured: false,
        likes: 187,
        owner_index: 1,
    },
    SeedPet {
        name: "Rio",
        species: "bird",
        breed: "Parrot",
        age: 5,
        gender: "male",
        size: None,
        description: "Colorful parrot that can say over 50 words!",
        image_url: "https://images.unsplash.com/photo-1577023311546-cdc07a8454d9",
        status: "Not for adoption",
        is_adoptable: false,
        is_recent: false,
        is_featured: false,
        likes: 156,
        owner_index: 2,
    },
    SeedPet {
        name: "Whiskers",
        species: "cat",
        breed: "Maine Coon",
        age: 3,
        gender: "male",
        size: Some("medium"),
        description: "Majestic Maine Coon with a stunning coat and friendly personality.",
        image_url: "https://images.unsplash.com/photo-1548767797-d8c844163c4c",
        status: "Not for adoption",
        is_adoptable: false,
        is_recent: true,
        is_featured: true,
        likes: 219,
        owner_index: 1,
    },
    SeedPet {
        name: "Thumper",
        species: "small",
        breed: "Rabbit",
        age: 1,
        gender: "male",
        size: Some("small"),
        description: "Energetic rabbit who loves to hop around and eat carrots.",
        image_url: "https://images.unsplash.com/photo-1596272875729-ed2ff7d6d9c5",
        status: "Not for adoption",
        is_adoptable: false,
        is_recent: true,
        is_featured: false,
        likes: 98,
        owner_index: 2,
    },
];

/// Populate an empty store with the sample data set
pub async fn populate(storage: &dyn Storage) -> ApiResult<()> {
    info!("Seeding store with sample data");

    let seed_owners = [
        (
            "Sarah Johnson",
            "sarah@example.com",
            OwnerType::PetFoster,
            "I love fostering pets and helping them find their forever homes.",
            "https://randomuser.me/api/portraits/women/62.jpg",
            true,
        ),
        (
            "Mark Wilson",
            "mark@example.com",
            OwnerType::PetRescuer,
            "Rescuing animals is my passion. I specialize in rehabilitating cats.",
            "https://randomuser.me/api/portraits/men/42.jpg",
            true,
        ),
        (
            "Jessica Chen",
            "jessica@example.com",
            OwnerType::PetOwner,
            "Animal lover with a passion for dogs. I train and care for dogs of all breeds.",
            "https://randomuser.me/api/portraits/women/32.jpg",
            true,
        ),
        (
            "Michael Brown",
            "michael@example.com",
            OwnerType::PetOwner,
            "New to pet adoption, looking to add a furry friend to my family.",
            "https://randomuser.me/api/portraits/men/55.jpg",
            false,
        ),
    ];

    let mut owners = Vec::new();
    for (name, email, owner_type, bio, avatar_url, approved) in seed_owners {
        let owner = storage
            .register_owner(NewOwner {
                name: name.to_string(),
                email: email.to_string(),
                owner_type,
                bio: bio.to_string(),
                avatar_url: avatar_url.to_string(),
                password: "changeme-seed".to_string(),
            })
            .await?;

        let owner = if approved {
            storage.approve_owner(owner.id).await?.unwrap_or(owner)
        } else {
            owner
        };
        owners.push(owner);
    }

    for seed in SEED_PETS {
        let owner = &owners[seed.owner_index];
        let pet = storage
            .create_pet(NewPet {
                name: seed.name.to_string(),
                species: seed.species.to_string(),
                breed: seed.breed.to_string(),
                age: seed.age,
                gender: seed.gender.to_string(),
                size: seed.size.map(String::from),
                description: seed.description.to_string(),
                image_url: seed.image_url.to_string(),
                owner_id: owner.id,
                owner_name: owner.name.clone(),
                owner_avatar_url: owner.avatar_url.clone(),
                status: seed.status.to_string(),
                is_adoptable: seed.is_adoptable,
                is_recent: seed.is_recent,
                is_featured: seed.is_featured,
            })
            .await?;

        // Likes are not part of the create payload
        storage
            .update_pet(
                pet.id,
                PetPatch {
                    likes: Some(seed.likes),
                    ..Default::default()
                },
            )
            .await?;
    }

    storage
        .create_report(NewReport {
            incident_type: "neglect".to_string(),
            location: "123 Main St, Anytown".to_string(),
            description: "Dog left outside in extreme heat without water or shelter.".to_string(),
            contact_info: Some("john@example.com".to_string()),
            anonymous: false,
        })
        .await?;

    let investigating = storage
        .create_report(NewReport {
            incident_type: "abuse".to_string(),
            location: "456 Park Ave, Cityville".to_string(),
            description: "Multiple cats in poor condition, appear to be malnourished.".to_string(),
            contact_info: None,
            anonymous: true,
        })
        .await?;
    storage
        .update_report(
            investigating.id,
            ReportPatch {
                status: Some(ReportStatus::Investigating),
                admin_notes: Some("Assigned to animal control for investigation.".to_string()),
                assigned_to: None,
            },
        )
        .await?;

    storage
        .create_admin(NewAdmin {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            name: "Admin User".to_string(),
            email: "admin@pethaven.example".to_string(),
            role: None,
        })
        .await?;

    let seed_products = [
        (
            "Premium Dog Food",
            "High-quality dog food with balanced nutrition for adult dogs.",
            "food",
            "dog",
            "29.99",
            50,
        ),
        (
            "Interactive Cat Toy",
            "Automatic laser toy to keep your cat entertained for hours.",
            "toys",
            "cat",
            "19.99",
            30,
        ),
        (
            "Pet Carrier",
            "Comfortable and secure carrier for small to medium pets.",
            "accessories",
            "small",
            "34.99",
            15,
        ),
    ];

    for (name, description, category, pet_type, price, stock) in seed_products {
        storage
            .create_product(NewProduct {
                name: name.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                pet_type: pet_type.to_string(),
                price: price.to_string(),
                image_url: format!(
                    "https://images.unsplash.com/{}",
                    name.to_lowercase().replace(' ', "-")
                ),
                stock,
                is_available: true,
            })
            .await?;
    }

    info!("Seed data loaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemStorage;

    #[tokio::test]
    async fn test_populate_shape() {
        let storage = MemStorage::new();
        populate(&storage).await.unwrap();

        assert_eq!(storage.list_owners().await.unwrap().len(), 4);
        assert_eq!(storage.list_pending_owners().await.unwrap().len(), 1);
        assert_eq!(storage.list_adoptable_pets().await.unwrap().len(), 3);
        assert_eq!(storage.list_showcase_pets().await.unwrap().len(), 5);
        assert_eq!(storage.list_reports().await.unwrap().len(), 2);
        assert_eq!(storage.list_admins().await.unwrap().len(), 1);
        assert_eq!(storage.list_products().await.unwrap().len(), 3);

        // Likes were patched in after create
        let adoptable = storage.list_adoptable_pets().await.unwrap();
        assert_eq!(adoptable[0].name, "Max");
        assert_eq!(adoptable[0].likes, 120);

        // The seeded admin can log in
        assert!(storage
            .validate_admin_login(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)
            .await
            .unwrap()
            .is_some());
    }
}
