pub mod context;
pub mod genre;
pub mod tables;

pub use context::VideoContext;
pub use genre::Genre;
pub use tables::{Taxonomy, TaxonomyTables};
