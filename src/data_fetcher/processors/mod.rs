pub mod flatten;
pub mod stat_categories;

pub use flatten::{FlattenedPage, flatten_entry, flatten_page};
pub use stat_categories::{StatCategoryMap, resolve_stat_categories};
