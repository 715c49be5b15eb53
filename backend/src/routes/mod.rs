pub(crate) mod export;
pub(crate) mod health;
pub(crate) mod lookup;
pub(crate) mod page;
