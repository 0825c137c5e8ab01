// All classification logic is in prefpin-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod profile_locator;

// Re-export core types for convenience
pub use prefpin_core::*;

// Re-export CLI utilities
pub use profile_locator::{pick_default_profile_dir, ProfileLocator};
