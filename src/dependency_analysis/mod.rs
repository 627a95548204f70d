/// Dependency analysis core
///
/// `domain` holds the value types, `services` the pure algorithms built on top
/// of them. Nothing in here touches the filesystem directly; all I/O goes
/// through the outbound ports.
pub mod domain;
pub mod services;
