pub mod app_config;
pub mod catalog_repo;
pub mod custom_package_repo;
pub mod database;
pub mod offer_repo;
pub mod package_repo;

pub use catalog_repo::PostgresCategoryRepository;
pub use custom_package_repo::PostgresCustomPackageRepository;
pub use database::DbClient;
pub use offer_repo::PostgresOfferRepository;
pub use package_repo::PostgresPackageRepository;
