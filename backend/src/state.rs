use std::sync::Arc;

use crate::config::AppConfig;
use crate::external::price_provider::PriceProvider;
use crate::services::company_directory::CompanyDirectory;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub directory: Arc<CompanyDirectory>,
    pub price_provider: Arc<dyn PriceProvider>,
}
