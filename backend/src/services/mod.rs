pub mod company_directory;
pub mod export_service;
pub mod lookup_service;
pub mod presentation_service;
pub mod ticker_resolver;
