//! The Lox front end, split into submodules according to their functionality.
//! See the crate-level documentation for further information.

// Shared functionality
pub mod errors;
pub mod std;
pub mod types;
mod util;

// Specific Phases
pub mod token;
