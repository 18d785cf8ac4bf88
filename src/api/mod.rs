pub mod extractors;
pub mod graphql;
pub mod handlers;
pub mod router;
