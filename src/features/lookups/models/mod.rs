mod contractor;
mod lookup_item;

pub use contractor::Contractor;
pub use lookup_item::{LookupItem, LookupTable};
