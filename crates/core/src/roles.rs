//! Well-known role name constants carried in the token `role` claim.

pub const ROLE_ADMIN: &str = "admin";
