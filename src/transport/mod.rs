/// Filesystem candidate enumeration.
pub mod fs;
