//! CLI subcommand implementations.

pub mod edit;
pub mod show;
pub mod timestamps;
pub mod track;
pub mod util;
pub mod week;
