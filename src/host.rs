//! The abstract surface a windowing/input layer implements to drive a
//! `Machine`. The core never depends on a concrete windowing crate; a
//! binary wires a real one (SDL2, in this workspace's `xpire` binary) in.

use crate::rasterizer::Surface;

pub trait HostCallbacks {
    /// Called once per frame, after the raster is complete.
    fn present(&mut self, surface: &Surface);

    /// Called once per frame, before CPU stepping begins. Returns the
    /// pressed-key bits to OR into the P1 controller latch (the `ALWAYS_SET`
    /// bit and the frame's reset are the `Machine`'s job, not the host's).
    fn poll_input(&mut self) -> u8;

    /// Signals that the CPU halted (HLT executed). Default no-op; a CLI
    /// front end can use this to exit cleanly.
    fn on_halt(&mut self) {}
}
