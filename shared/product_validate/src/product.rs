use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Every field optional so one pass reports all the missing ones; prices only
// parse from JSON numbers, the discount from JSON integers.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct ProductForm {
    pub name: Option<String>,
    pub emoji: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub old_price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub new_price: Option<Decimal>,
    pub discount: Option<i32>,
}

#[derive(Debug)]
pub struct Validation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

pub fn validate_product(form: &ProductForm) -> Validation {
    let mut errors = Vec::new();

    match &form.name {
        None => errors.push("Nome do produto é obrigatório".to_string()),
        Some(name) if name.trim().is_empty() => {
            errors.push("Nome do produto é obrigatório".to_string())
        }
        // Length is checked before trimming.
        Some(name) if name.chars().count() > 100 => {
            errors.push("Nome não pode ter mais de 100 caracteres".to_string())
        }
        Some(_) => {}
    }

    match &form.emoji {
        None => errors.push("Emoji do produto é obrigatório".to_string()),
        Some(emoji) if emoji.trim().is_empty() => {
            errors.push("Emoji do produto é obrigatório".to_string())
        }
        Some(_) => {}
    }

    match form.old_price {
        None => errors.push("Preço antigo é obrigatório".to_string()),
        Some(price) if price < Decimal::ZERO => {
            errors.push("Preço antigo deve ser um número positivo".to_string())
        }
        Some(_) => {}
    }

    match form.new_price {
        None => errors.push("Preço novo é obrigatório".to_string()),
        Some(price) if price < Decimal::ZERO => {
            errors.push("Preço novo deve ser um número positivo".to_string())
        }
        Some(_) => {}
    }

    match form.discount {
        None => errors.push("Desconto é obrigatório".to_string()),
        Some(discount) if !(0..=100).contains(&discount) => {
            errors.push("Desconto deve ser um número entre 0 e 100".to_string())
        }
        Some(_) => {}
    }

    Validation {
        is_valid: errors.is_empty(),
        errors,
    }
}

// Canonical 8-4-4-4-12 form only. `Uuid::parse_str` on its own would also
// take the simple, braced and urn forms.
pub fn parse_id(id: &str) -> Option<Uuid> {
    let bytes = id.as_bytes();
    if bytes.len() != 36 {
        return None;
    }
    for (i, byte) in bytes.iter().enumerate() {
        let ok = match i {
            8 | 13 | 18 | 23 => *byte == b'-',
            _ => byte.is_ascii_hexdigit(),
        };
        if !ok {
            return None;
        }
    }
    Uuid::parse_str(id).ok()
}

pub fn validate_id(id: &str) -> bool {
    parse_id(id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn full_form() -> ProductForm {
        ProductForm {
            name: Some("Smart TV 55\"".to_string()),
            emoji: Some("📺".to_string()),
            old_price: Some(dec!(2499.99)),
            new_price: Some(dec!(1899.99)),
            discount: Some(24),
        }
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let validation = validate_product(&ProductForm::default());
        assert!(!validation.is_valid);
        assert_eq!(
            validation.errors,
            vec![
                "Nome do produto é obrigatório",
                "Emoji do produto é obrigatório",
                "Preço antigo é obrigatório",
                "Preço novo é obrigatório",
                "Desconto é obrigatório",
            ]
        );
    }

    #[test]
    fn full_form_passes() {
        let validation = validate_product(&full_form());
        assert!(validation.is_valid);
        assert!(validation.errors.is_empty());
    }

    #[test]
    fn blank_name_counts_as_missing() {
        let form = ProductForm {
            name: Some("   ".to_string()),
            ..full_form()
        };
        let validation = validate_product(&form);
        assert_eq!(validation.errors, vec!["Nome do produto é obrigatório"]);
    }

    #[test]
    fn name_over_100_chars_is_rejected() {
        let form = ProductForm {
            name: Some("x".repeat(101)),
            ..full_form()
        };
        let validation = validate_product(&form);
        assert_eq!(
            validation.errors,
            vec!["Nome não pode ter mais de 100 caracteres"]
        );
    }

    #[test]
    fn name_length_is_checked_before_trimming() {
        // 95 visible chars padded to 105; the untrimmed value is what counts.
        let form = ProductForm {
            name: Some(format!("     {}     ", "x".repeat(95))),
            ..full_form()
        };
        let validation = validate_product(&form);
        assert_eq!(
            validation.errors,
            vec!["Nome não pode ter mais de 100 caracteres"]
        );
    }

    #[test]
    fn checks_run_independently() {
        // Only the old price is present, and it is out of range: the other
        // four fields still report as missing alongside the range failure.
        let form = ProductForm {
            old_price: Some(dec!(-1)),
            ..ProductForm::default()
        };
        let validation = validate_product(&form);
        assert_eq!(
            validation.errors,
            vec![
                "Nome do produto é obrigatório",
                "Emoji do produto é obrigatório",
                "Preço antigo deve ser um número positivo",
                "Preço novo é obrigatório",
                "Desconto é obrigatório",
            ]
        );
    }

    #[test]
    fn zero_prices_are_valid() {
        let form = ProductForm {
            old_price: Some(Decimal::ZERO),
            new_price: Some(Decimal::ZERO),
            ..full_form()
        };
        assert!(validate_product(&form).is_valid);
    }

    #[test]
    fn negative_new_price_is_rejected() {
        let form = ProductForm {
            new_price: Some(dec!(-0.01)),
            ..full_form()
        };
        let validation = validate_product(&form);
        assert_eq!(
            validation.errors,
            vec!["Preço novo deve ser um número positivo"]
        );
    }

    #[test]
    fn discount_bounds_are_inclusive() {
        for discount in [0, 100] {
            let form = ProductForm {
                discount: Some(discount),
                ..full_form()
            };
            assert!(validate_product(&form).is_valid);
        }
        for discount in [-1, 101] {
            let form = ProductForm {
                discount: Some(discount),
                ..full_form()
            };
            assert_eq!(
                validate_product(&form).errors,
                vec!["Desconto deve ser um número entre 0 e 100"]
            );
        }
    }

    #[test]
    fn prices_parse_from_json_numbers() {
        let form: ProductForm =
            serde_json::from_str(r#"{"old_price": 2499.99, "new_price": 1899}"#).unwrap();
        assert_eq!(form.old_price, Some(dec!(2499.99)));
        assert_eq!(form.new_price, Some(dec!(1899)));
    }

    #[test]
    fn string_price_is_rejected_at_parse() {
        let result = serde_json::from_str::<ProductForm>(r#"{"old_price": "2499.99"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn fractional_discount_is_rejected_at_parse() {
        let result = serde_json::from_str::<ProductForm>(r#"{"discount": 10.5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn null_fields_parse_as_absent() {
        let form: ProductForm = serde_json::from_str(
            r#"{"name": null, "emoji": null, "old_price": null, "new_price": null, "discount": null}"#,
        )
        .unwrap();
        assert!(form.name.is_none());
        assert!(form.old_price.is_none());
        assert_eq!(validate_product(&form).errors.len(), 5);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let form: ProductForm =
            serde_json::from_str(r#"{"name": "Fone", "savings": 600, "id": "abc"}"#).unwrap();
        assert_eq!(form.name.as_deref(), Some("Fone"));
    }

    #[test]
    fn id_accepts_canonical_form_any_case() {
        assert!(validate_id("550e8400-e29b-41d4-a716-446655440000"));
        assert!(validate_id("550E8400-E29B-41D4-A716-446655440000"));
    }

    #[test]
    fn id_rejects_non_canonical_forms() {
        assert!(!validate_id(""));
        assert!(!validate_id("123"));
        assert!(!validate_id("not-a-uuid"));
        // Simple, braced and urn forms parse as uuids but are not valid here.
        assert!(!validate_id("550e8400e29b41d4a716446655440000"));
        assert!(!validate_id("{550e8400-e29b-41d4-a716-446655440000}"));
        assert!(!validate_id("urn:uuid:550e8400-e29b-41d4-a716-446655440000"));
        // Right length, hyphens in the wrong places.
        assert!(!validate_id("550e8400e-29b-41d4-a716-446655440000"));
        // Right shape, non-hex digit.
        assert!(!validate_id("550g8400-e29b-41d4-a716-446655440000"));
    }

    #[test]
    fn parse_id_matches_uuid_parsing() {
        let id = "550e8400-e29b-41d4-a716-446655440000";
        assert_eq!(parse_id(id), Some(Uuid::parse_str(id).unwrap()));
    }
}
