//! Static component catalog, flavor display names and the equivalency table.

mod components;
pub mod equivalency;
mod flavor;

pub use components::{categories, component_by_id, components, Category, Component, ComponentCategory};
pub use equivalency::normalize;
pub use flavor::{equivalents, Flavor};
