//! # System Interaction Layer
//!
//! Boundary between the pure core and the operating system.
//!
//! - **`executor`**: runs the search commands built by the core through the
//!   platform shell and captures their output.

/// Shell execution of search commands.
pub mod executor;
