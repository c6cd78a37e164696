//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod data_check_repo;
pub mod dataset_repo;
pub mod organization_repo;
pub mod record_repo;

pub use data_check_repo::DataCheckRepo;
pub use dataset_repo::DatasetRepo;
pub use organization_repo::OrganizationRepo;
pub use record_repo::RecordRepo;
