/// Identifier casing command.
pub mod names;
pub(crate) mod util;
/// Raw wire run listing command.
pub mod wire;
