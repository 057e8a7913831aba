pub mod cli;
pub mod logger;
pub mod recon;
pub mod targets;
