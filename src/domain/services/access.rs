use crate::domain::models::{client::Client, order::Order, user::User};
use crate::error::AppError;
use tracing::warn;

/// A record that belongs to exactly one seller.
pub trait Owned {
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn owner_id(&self) -> &str;
}

impl Owned for Client {
    const KIND: &'static str = "client";

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.seller_id
    }
}

impl Owned for Order {
    const KIND: &'static str = "order";

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.seller_id
    }
}

pub fn is_owner<R: Owned>(caller: &User, record: &R) -> bool {
    caller.id == record.owner_id()
}

/// Single authorization gate for every read or write of an owned record.
pub fn ensure_owner<R: Owned>(caller: &User, record: &R) -> Result<(), AppError> {
    if is_owner(caller, record) {
        return Ok(());
    }
    warn!(
        caller_id = %caller.id,
        record_id = %record.id(),
        "Ownership check failed for {}",
        R::KIND
    );
    Err(AppError::Forbidden(format!("You do not have access to this {}", R::KIND)))
}
