//! The frame-locked scene loop: owns the CPU, memory, bus and devices, and
//! drives one frame at a time the way spec's scheduler procedure describes
//! it (poll input, raster scanline-by-scanline, inject interrupts at the
//! mid-frame and end-of-frame boundaries, present).

use std::cell::RefCell;
use std::rc::Rc;

use crate::bus::Bus;
use crate::cpu::Cpu;
use crate::devices::{FixedLatch, InputLatch, OutputSink, ShiftRegister};
use crate::error::{CpuResult, EmulatorError};
use crate::interrupt::FlipFlop;
use crate::memory::Memory;
use crate::rasterizer::{self, Palette, Surface};
use crate::scheduler::{Scheduler, LAST_SCANLINE, MID_FRAME_SCANLINE};

const DIP_DUMMY: u8 = 0x8F;
const P2_CONTROLLER_FIXED: u8 = 0x04;

pub struct Machine {
    cpu: Cpu,
    memory: Memory,
    bus: Bus,
    p1: Rc<RefCell<InputLatch>>,
    scheduler: Scheduler,
    flipflop: FlipFlop,
    palette: Palette,
    surface: Surface,
    trace: bool,
}

impl Machine {
    /// Builds a machine with a freshly loaded ROM and the standard Space
    /// Invaders port wiring (spec's port assignment table). `strict`
    /// controls the bus's behavior on an unregistered port; Space Invaders
    /// itself needs permissive mode (`strict = false`) for ports 3, 5, 6.
    pub fn new(rom: &[u8], strict: bool) -> Result<Self, EmulatorError> {
        let mut memory = Memory::new();
        memory.load_rom(rom)?;

        let bus = Self::wire_bus(strict);

        Ok(Machine {
            cpu: Cpu::new(),
            memory,
            bus: bus.0,
            p1: bus.1,
            scheduler: Scheduler::new(),
            flipflop: FlipFlop::new(),
            palette: Palette::monochrome(),
            surface: Surface::blank(),
            trace: false,
        })
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Logs every fetched instruction's disassembly at `trace` level before
    /// executing it. Off by default; a host's `--trace` flag turns it on.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    fn wire_bus(strict: bool) -> (Bus, Rc<RefCell<InputLatch>>) {
        let mut bus = Bus::new(strict);

        let shifter = Rc::new(RefCell::new(ShiftRegister::new()));
        let p1 = Rc::new(RefCell::new(InputLatch::new()));
        let p2 = FixedLatch(P2_CONTROLLER_FIXED);
        let dip = FixedLatch(DIP_DUMMY);
        let sink_sound1 = Rc::new(RefCell::new(OutputSink::new()));
        let sink_sound2 = Rc::new(RefCell::new(OutputSink::new()));
        let sink_watchdog = Rc::new(RefCell::new(OutputSink::new()));

        bus.register_read(0, move || dip.read());
        {
            let p1 = p1.clone();
            bus.register_read(1, move || p1.borrow().read());
        }
        bus.register_read(2, move || p2.read());
        {
            let shifter = shifter.clone();
            bus.register_read(3, move || shifter.borrow().read());
        }

        {
            let shifter = shifter.clone();
            bus.register_write(2, move |v| shifter.borrow_mut().write_offset(v));
        }
        {
            let sink = sink_sound1.clone();
            bus.register_write(3, move |v| sink.borrow_mut().write(v));
        }
        {
            let shifter = shifter.clone();
            bus.register_write(4, move |v| shifter.borrow_mut().write_value(v));
        }
        {
            let sink = sink_sound2.clone();
            bus.register_write(5, move |v| sink.borrow_mut().write(v));
        }
        {
            let sink = sink_watchdog.clone();
            bus.register_write(6, move |v| sink.borrow_mut().write(v));
        }

        (bus, p1)
    }

    /// Runs one 33,333-cycle frame: polls input, raster one scanline at a
    /// time (injecting RST 1 at scanline 96 and RST 2 at scanline 223),
    /// then presents the finished surface.
    pub fn run_frame(&mut self, host: &mut impl crate::host::HostCallbacks) -> CpuResult<()> {
        self.p1.borrow_mut().set(host.poll_input());
        self.scheduler.reset_frame();

        for line in 0..=LAST_SCANLINE {
            rasterizer::rasterize_line(
                self.memory.video_ram(),
                line as usize,
                &self.palette,
                &mut self.surface,
            );

            if line == MID_FRAME_SCANLINE {
                let opcode = self.flipflop.next();
                self.cpu.inject_interrupt(opcode, &mut self.memory, &mut self.bus)?;
            } else if line == LAST_SCANLINE {
                let opcode = self.flipflop.next();
                self.cpu.inject_interrupt(opcode, &mut self.memory, &mut self.bus)?;
            }

            while !self.scheduler.line_complete() {
                if self.cpu.halted() {
                    break;
                }
                if self.trace {
                    let pc = self.cpu.pc();
                    let (text, _) = self.cpu.disassemble_instruction(pc, &self.memory);
                    log::trace!("{:#06X}: {}", pc, text);
                }
                let cycles = self.cpu.step(&mut self.memory, &mut self.bus)?;
                self.scheduler.record(cycles as u32);
            }
            self.scheduler.advance_line();
        }

        if self.cpu.halted() {
            host.on_halt();
        }
        host.present(&self.surface);
        Ok(())
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }
}

/// An alternate, video-free construction that runs a flat CP/M-80 .COM
/// image against the same CPU/Memory core, intercepting the BDOS console
/// calls (C=2 print-char, C=9 print `$`-terminated string) the way
/// `original_source/xpire/scenes/cpm.py` does. No raster, no interrupt
/// controller: CP/M programs poll for input and run to completion or HLT.
pub struct CpmMachine {
    cpu: Cpu,
    memory: Memory,
    bus: Bus,
}

const BDOS_ENTRY_POINT: u16 = 0x0005;
const BDOS_PRINT_STRING: u8 = 0x09;
const BDOS_PRINT_CHAR: u8 = 0x02;
const STRING_TERMINATOR: u8 = b'$';

impl CpmMachine {
    pub fn new(rom: &[u8]) -> Result<Self, EmulatorError> {
        let mut memory = Memory::new();
        memory.load_rom_cpm(rom)?;
        let mut cpu = Cpu::new();
        cpu.set_pc(0x0100);
        Ok(CpmMachine {
            cpu,
            memory,
            bus: Bus::new(false),
        })
    }

    /// Runs until HLT or a jump to the CP/M warm-boot vector (address 0),
    /// calling `on_char` for every character printed through the stubbed
    /// BDOS entry point.
    pub fn run(&mut self, mut on_char: impl FnMut(char)) -> CpuResult<()> {
        loop {
            if self.cpu.pc() == 0x0000 {
                break;
            }
            if self.cpu.pc() == BDOS_ENTRY_POINT {
                self.handle_bdos_call(&mut on_char);
            }
            self.cpu.step(&mut self.memory, &mut self.bus)?;
            if self.cpu.halted() {
                break;
            }
        }
        Ok(())
    }

    fn handle_bdos_call(&mut self, on_char: &mut impl FnMut(char)) {
        match self.cpu.registers().c {
            BDOS_PRINT_STRING => {
                let mut addr = self.cpu.registers().de();
                loop {
                    let byte = self.memory.read_byte(addr);
                    if byte == STRING_TERMINATOR {
                        break;
                    }
                    on_char(byte as char);
                    addr = addr.wrapping_add(1);
                }
            }
            BDOS_PRINT_CHAR => on_char(self.cpu.registers().e as char),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct HeadlessHost {
        input_bits: u8,
        frames_presented: u32,
        halted: bool,
    }

    impl crate::host::HostCallbacks for HeadlessHost {
        fn present(&mut self, _surface: &Surface) {
            self.frames_presented += 1;
        }
        fn poll_input(&mut self) -> u8 {
            self.input_bits
        }
        fn on_halt(&mut self) {
            self.halted = true;
        }
    }

    #[test]
    fn a_frame_of_nops_completes_and_presents_once() {
        let rom = vec![0x00u8; 0x2000]; // NOP forever, never touches video RAM
        let mut machine = Machine::new(&rom, false).unwrap();
        let mut host = HeadlessHost {
            input_bits: 0,
            frames_presented: 0,
            halted: false,
        };
        machine.run_frame(&mut host).unwrap();
        assert_eq!(host.frames_presented, 1);
    }

    #[test]
    fn hlt_is_reported_to_the_host() {
        let mut rom = vec![0x00u8; 0x2000];
        rom[0] = 0x76; // HLT
        let mut machine = Machine::new(&rom, false).unwrap();
        let mut host = HeadlessHost {
            input_bits: 0,
            frames_presented: 0,
            halted: false,
        };
        machine.run_frame(&mut host).unwrap();
        assert!(host.halted);
    }

    #[test]
    fn p2_controller_port_reads_the_fixed_nonzero_byte() {
        let mut rom = vec![0x00u8; 0x2000];
        rom[0] = 0xDB; // IN d8
        rom[1] = 0x02; // port 2
        rom[2] = 0x76; // HLT
        let mut machine = Machine::new(&rom, false).unwrap();
        let mut host = HeadlessHost {
            input_bits: 0,
            frames_presented: 0,
            halted: false,
        };
        machine.run_frame(&mut host).unwrap();
        assert_eq!(machine.cpu().a(), P2_CONTROLLER_FIXED);
    }

    #[test]
    fn cpm_machine_collects_printed_string() {
        // LXI D, msg ; MVI C, 9 ; CALL 0x0005 ; HLT ; msg: "HI$"
        let mut rom = vec![0u8; 0x20];
        rom[0] = 0x11; // LXI D, d16
        rom[1] = 0x09; // low byte of DE = 0x0109 (offset from 0x100 load point: 0x100+9)
        rom[2] = 0x01; // high byte
        rom[3] = 0x0E; // MVI C, d8
        rom[4] = BDOS_PRINT_STRING;
        rom[5] = 0xCD; // CALL 0x0005
        rom[6] = 0x05;
        rom[7] = 0x00;
        rom[8] = 0x76; // HLT
        rom[9] = b'H';
        rom[10] = b'I';
        rom[11] = b'$';

        let mut machine = CpmMachine::new(&rom).unwrap();
        let mut printed = String::new();
        machine.run(|c| printed.push(c)).unwrap();
        assert_eq!(printed, "HI");
    }
}
