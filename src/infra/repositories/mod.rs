pub mod sqlite_client_repo;
pub mod sqlite_order_repo;
pub mod sqlite_product_repo;
pub mod sqlite_user_repo;

pub mod postgres_client_repo;
pub mod postgres_order_repo;
pub mod postgres_product_repo;
pub mod postgres_user_repo;

use crate::domain::models::product::Product;
use crate::error::AppError;

/// Substring pattern for `LIKE ... ESCAPE '\'` with the user's wildcards neutralised.
pub(crate) fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Error for a reservation whose conditional decrement matched no row.
pub(crate) fn reservation_error(product_id: &str, requested: i32, product: Option<Product>) -> AppError {
    match product {
        None => AppError::NotFound(format!("Product {} not found", product_id)),
        Some(product) => AppError::DomainViolation(format!(
            "Insufficient stock for {}: requested {}, available {}",
            product.name, requested, product.stock
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("lap"), "%lap%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn reservation_error_distinguishes_missing_from_short() {
        assert!(matches!(reservation_error("p1", 3, None), AppError::NotFound(_)));

        let product = Product::new("Monitor".into(), 2, 150.0);
        match reservation_error(&product.id.clone(), 3, Some(product)) {
            AppError::DomainViolation(msg) => assert!(msg.contains("available 2")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
