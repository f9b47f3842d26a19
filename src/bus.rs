//! Port-indexed I/O dispatch. Two disjoint maps, one per direction, exactly
//! as the CPU sees it: `IN port` invokes a read handler, `OUT port, value`
//! invokes a write handler.

use std::collections::HashMap;

use crate::error::EmulatorError;

pub struct Bus {
    read_ports: HashMap<u8, Box<dyn FnMut() -> u8>>,
    write_ports: HashMap<u8, Box<dyn FnMut(u8)>>,
    strict: bool,
}

impl Bus {
    /// `strict` controls what happens on an unregistered port: in strict
    /// mode it is a fatal `InvalidReadPort`/`InvalidWritePort`; in
    /// permissive mode (the default the Space Invaders ROM needs for ports
    /// 3, 5 and 6) reads return 0xFF and writes are silently dropped.
    pub fn new(strict: bool) -> Self {
        Bus {
            read_ports: HashMap::new(),
            write_ports: HashMap::new(),
            strict,
        }
    }

    /// Registers (or idempotently replaces) the read handler for `port`.
    pub fn register_read(&mut self, port: u8, handler: impl FnMut() -> u8 + 'static) {
        self.read_ports.insert(port, Box::new(handler));
    }

    /// Registers (or idempotently replaces) the write handler for `port`.
    pub fn register_write(&mut self, port: u8, handler: impl FnMut(u8) + 'static) {
        self.write_ports.insert(port, Box::new(handler));
    }

    pub fn read(&mut self, port: u8) -> Result<u8, EmulatorError> {
        match self.read_ports.get_mut(&port) {
            Some(handler) => Ok(handler()),
            None if self.strict => Err(EmulatorError::InvalidReadPort(port)),
            None => {
                log::warn!("read from unregistered port {:#04X}, returning 0xFF", port);
                Ok(0xFF)
            }
        }
    }

    pub fn write(&mut self, port: u8, value: u8) -> Result<(), EmulatorError> {
        match self.write_ports.get_mut(&port) {
            Some(handler) => {
                handler(value);
                Ok(())
            }
            None if self.strict => Err(EmulatorError::InvalidWritePort(port)),
            None => {
                log::warn!("write to unregistered port {:#04X} ignored", port);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissive_read_of_unregistered_port_returns_ff() {
        let mut bus = Bus::new(false);
        assert_eq!(bus.read(9).unwrap(), 0xFF);
    }

    #[test]
    fn permissive_write_of_unregistered_port_is_a_no_op() {
        let mut bus = Bus::new(false);
        assert!(bus.write(9, 0x42).is_ok());
    }

    #[test]
    fn strict_mode_rejects_unregistered_ports() {
        let mut bus = Bus::new(true);
        assert!(matches!(bus.read(9), Err(EmulatorError::InvalidReadPort(9))));
        assert!(matches!(
            bus.write(9, 1),
            Err(EmulatorError::InvalidWritePort(9))
        ));
    }

    #[test]
    fn register_is_idempotent_replacement() {
        let mut bus = Bus::new(false);
        bus.register_read(3, || 1);
        bus.register_read(3, || 2);
        assert_eq!(bus.read(3).unwrap(), 2);
    }
}
