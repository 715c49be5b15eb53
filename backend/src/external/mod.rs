pub mod krx;
pub mod listing_source;
pub mod naver;
pub mod price_provider;
