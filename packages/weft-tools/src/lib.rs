//! The filesystem collaborators around the `weft` core: the directory-mirroring pipeline
//! and the JSON discovery index, shared by the `weft` binary. Everything here follows the
//! same contract as the core: failures become counted diagnostics on the shared
//! [`Report`](weft::Report), and processing always continues.

mod error;
mod index;
mod pipeline;

pub use error::PipelineError;
pub use index::{generate_discovery_index, DiscoveryRecord};
pub use pipeline::{process_directory, process_file};
