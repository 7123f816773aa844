/// Note attached to the history entry seeded when an asset is created.
pub const INITIAL_VALUE_NOTE: &str = "Initial value";
