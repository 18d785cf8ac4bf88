pub mod maybe_auth;
