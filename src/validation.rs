/// Input validation for create payloads
///
/// Errors are collected per field and folded into one human-readable
/// message so the client can show a single 400 toast.
use crate::error::ApiError;
use crate::models::{NewAdmin, NewOwner, NewPet, NewProduct, NewReport};

/// Validation error detail
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// Validation result with detailed errors
pub type ValidationResult = Result<(), Vec<ValidationError>>;

fn require(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError {
            field: field.to_string(),
            message: format!("{} is required", field),
        });
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a cruelty report submission
pub fn validate_report(report: &NewReport) -> ValidationResult {
    let mut errors = Vec::new();

    if report.incident_type.trim().is_empty() {
        errors.push(ValidationError {
            field: "type".to_string(),
            message: "Please select an incident type".to_string(),
        });
    }
    if report.location.trim().len() < 3 {
        errors.push(ValidationError {
            field: "location".to_string(),
            message: "Please provide a valid location".to_string(),
        });
    }
    if report.description.trim().len() < 10 {
        errors.push(ValidationError {
            field: "description".to_string(),
            message: "Please provide more details about the incident".to_string(),
        });
    }

    finish(errors)
}

/// Validate an owner registration
pub fn validate_new_owner(owner: &NewOwner) -> ValidationResult {
    let mut errors = Vec::new();

    require(&mut errors, "name", &owner.name);
    require(&mut errors, "bio", &owner.bio);
    require(&mut errors, "avatarUrl", &owner.avatar_url);

    if !owner.email.contains('@') {
        errors.push(ValidationError {
            field: "email".to_string(),
            message: "Please provide a valid email address".to_string(),
        });
    }
    if owner.password.len() < 8 {
        errors.push(ValidationError {
            field: "password".to_string(),
            message: "Password must be at least 8 characters".to_string(),
        });
    }

    finish(errors)
}

/// Validate a pet create payload
pub fn validate_new_pet(pet: &NewPet) -> ValidationResult {
    let mut errors = Vec::new();

    require(&mut errors, "name", &pet.name);
    require(&mut errors, "type", &pet.species);
    require(&mut errors, "breed", &pet.breed);
    require(&mut errors, "gender", &pet.gender);
    require(&mut errors, "description", &pet.description);
    require(&mut errors, "imageUrl", &pet.image_url);
    require(&mut errors, "status", &pet.status);
    require(&mut errors, "ownerName", &pet.owner_name);
    require(&mut errors, "ownerAvatarUrl", &pet.owner_avatar_url);

    if pet.age < 0 {
        errors.push(ValidationError {
            field: "age".to_string(),
            message: "Age cannot be negative".to_string(),
        });
    }
    if pet.owner_id <= 0 {
        errors.push(ValidationError {
            field: "ownerId".to_string(),
            message: "A valid owner is required".to_string(),
        });
    }

    finish(errors)
}

/// Validate an admin create payload
pub fn validate_new_admin(admin: &NewAdmin) -> ValidationResult {
    let mut errors = Vec::new();

    require(&mut errors, "username", &admin.username);
    require(&mut errors, "name", &admin.name);

    if !admin.email.contains('@') {
        errors.push(ValidationError {
            field: "email".to_string(),
            message: "Please provide a valid email address".to_string(),
        });
    }
    if admin.password.len() < 8 {
        errors.push(ValidationError {
            field: "password".to_string(),
            message: "Password must be at least 8 characters".to_string(),
        });
    }

    finish(errors)
}

/// Validate a product create payload
pub fn validate_new_product(product: &NewProduct) -> ValidationResult {
    let mut errors = Vec::new();

    require(&mut errors, "name", &product.name);
    require(&mut errors, "description", &product.description);
    require(&mut errors, "category", &product.category);
    require(&mut errors, "petType", &product.pet_type);

    match product.price.parse::<f64>() {
        Ok(price) if price >= 0.0 => {}
        _ => errors.push(ValidationError {
            field: "price".to_string(),
            message: "Price must be a non-negative decimal".to_string(),
        }),
    }
    if product.stock < 0 {
        errors.push(ValidationError {
            field: "stock".to_string(),
            message: "Stock cannot be negative".to_string(),
        });
    }

    finish(errors)
}

/// Fold validation errors into a single 400 error
pub fn validation_errors_to_api_error(errors: Vec<ValidationError>) -> ApiError {
    let messages: Vec<String> = errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect();

    ApiError::Validation(format!("Validation failed: {}", messages.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OwnerType;

    fn valid_report() -> NewReport {
        NewReport {
            incident_type: "neglect".to_string(),
            location: "123 Main St".to_string(),
            description: "left outside without water".to_string(),
            contact_info: None,
            anonymous: true,
        }
    }

    #[test]
    fn test_valid_report_passes() {
        assert!(validate_report(&valid_report()).is_ok());
    }

    #[test]
    fn test_report_short_location_and_description() {
        let report = NewReport {
            location: "ab".to_string(),
            description: "too short".to_string(),
            ..valid_report()
        };

        let errors = validate_report(&report).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.field == "location"));
        assert!(errors.iter().any(|e| e.field == "description"));
    }

    #[test]
    fn test_report_missing_type() {
        let report = NewReport {
            incident_type: "  ".to_string(),
            ..valid_report()
        };

        let errors = validate_report(&report).unwrap_err();
        assert_eq!(errors[0].message, "Please select an incident type");
    }

    #[test]
    fn test_owner_weak_password_and_bad_email() {
        let owner = NewOwner {
            name: "Michael Brown".to_string(),
            email: "not-an-email".to_string(),
            owner_type: OwnerType::PetOwner,
            bio: "New to pet adoption".to_string(),
            avatar_url: "https://example.com/m.jpg".to_string(),
            password: "short".to_string(),
        };

        let errors = validate_new_owner(&owner).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "email"));
        assert!(errors.iter().any(|e| e.field == "password"));
    }

    #[test]
    fn test_product_price_must_parse() {
        let product = NewProduct {
            name: "Premium Dog Food".to_string(),
            description: "Balanced nutrition".to_string(),
            category: "food".to_string(),
            pet_type: "dog".to_string(),
            price: "twenty".to_string(),
            image_url: "https://example.com/p.jpg".to_string(),
            stock: 10,
            is_available: true,
        };

        let errors = validate_new_product(&product).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "price");
    }

    #[test]
    fn test_aggregated_message_lists_every_field() {
        let report = NewReport {
            incident_type: String::new(),
            location: String::new(),
            description: String::new(),
            contact_info: None,
            anonymous: false,
        };

        let err = validation_errors_to_api_error(validate_report(&report).unwrap_err());
        let message = err.to_string();
        assert!(message.contains("type"));
        assert!(message.contains("location"));
        assert!(message.contains("description"));
    }
}
