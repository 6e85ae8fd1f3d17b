//! Translation of untrusted list-endpoint query parameters into a typed,
//! whitelisted filter/sort/page specification.

pub mod compiler;
pub mod filter;

pub use compiler::compile;
pub use compiler::ListPolicy;
pub use filter::Clause;
pub use filter::Constraint;
pub use filter::Direction;
pub use filter::FieldKind;
pub use filter::Filter;
pub use filter::FilterSpec;
pub use filter::FilterValue;
pub use filter::Search;
pub use filter::SortKey;
