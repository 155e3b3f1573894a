//! Operations module for the sync pipeline
//!
//! This module provides high-level operations that coordinate:
//! - FetchOperation: update the dependency submodule to its remote
//! - VendorOperation: replace consumer directories with fresh copies
//! - PublishOperation: stage, commit and push the superproject
//! - VerifyOperation: compare consumers against the source
//! - SyncPipeline: fetch, vendor and publish in order
//!
//! The operations coordinate with:
//! - Git: submodule update and publishing (from git module)
//! - Transaction: rollback of consumer swaps (from transaction module)
//! - UI: progress reporting (from ui module)

pub mod fetch;
pub mod pipeline;
pub mod publish;
pub mod vendor;
pub mod verify;

pub use pipeline::{SyncOptions, SyncPipeline, SyncReport};
pub use verify::VerifyOperation;
