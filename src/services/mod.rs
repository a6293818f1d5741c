//! Record services: the mutation contract behind the REST API and form actions.

mod clock;
mod personnel;
mod records;

pub use clock::*;
pub use records::*;
