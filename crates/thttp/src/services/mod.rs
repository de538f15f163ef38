mod fetch_service;
pub use fetch_service::FetchService;

mod upload_service;
pub use upload_service::UploadService;

mod validation;
pub use validation::Validate;
