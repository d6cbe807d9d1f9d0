/// The render state machine.
pub mod compositor;
pub(crate) mod cpu;
/// Owned pixel buffer and export.
pub mod surface;
