//! Service Module
//! Orchestrates load -> hash -> build -> root/proof over an explicit address set
pub mod cache;
pub mod commitment;
pub mod proof_service;
pub mod root_service;

// Re-export main types
pub use cache::CommitmentCache;
pub use commitment::Commitment;
pub use proof_service::ProofService;
pub use root_service::RootService;
