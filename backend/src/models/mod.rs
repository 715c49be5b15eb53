mod directory_entry;
mod lookup;
mod price_row;
mod ticker;

pub use directory_entry::DirectoryEntry;
pub use lookup::{DateRange, LookupParams, LookupResponse, ResolveParams, ResolveResponse, EMPTY_RANGE_MESSAGE};
pub use price_row::PriceRow;
pub use ticker::Ticker;
