
/// JSON layout of the persisted records
pub mod serde_tests;
