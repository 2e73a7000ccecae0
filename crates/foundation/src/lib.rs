// Foundation crate: small, well-tested primitives only.
pub mod math;
