//! Filtering
//!
//! Criteria are conjunctive across keys. Each key holds one predicate:
//!
//! - **Exact**: case-insensitive equality on a scalar field
//! - **Membership**: substring test against any value of a multi-valued field
//! - **Threshold**: numeric field at or above a minimum
//!
//! Selecting the active value again toggles it off, and `"all"` clears the
//! dimension.
//!
//! # Example
//!
//! ```rust
//! use civic_core::filter::{CategoryRegistry, FilterCriteria, FilterPipeline, Predicate, Selection};
//! use civic_core::record::{PoliticianBuilder, PoliticianFilter};
//!
//! let records = vec![
//!     PoliticianBuilder::new().id(1).name("Anne Waiguru").category("governor").build(),
//!     PoliticianBuilder::new().id(2).name("William Ruto").category("president").build(),
//! ];
//!
//! let mut criteria = FilterCriteria::new();
//! let selection = criteria.select(PoliticianFilter::Category, Predicate::equals("governor"));
//! assert_eq!(selection, Selection::Applied);
//!
//! let registry = CategoryRegistry::for_politicians();
//! let result = FilterPipeline::new(&registry).apply(&records, &criteria);
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].name, "Anne Waiguru");
//! ```

mod criteria;
mod pipeline;
mod predicate;
mod registry;

pub use criteria::{FilterCriteria, Selection, ALL_SENTINEL};
pub use pipeline::FilterPipeline;
pub use predicate::{Predicate, PredicateKind};
pub use registry::{CategoryRegistry, RegistryError, RegistryHandle};
