//! Control flow: unconditional and conditional JMP/CALL/RET, RST, the
//! stack-pointer instructions PCHL/SPHL/XTHL, PUSH/POP, EI/DI, IN/OUT, and
//! NOP (and its seven documented aliases).

use super::Cpu;
use crate::bus::Bus;
use crate::error::CpuResult;
use crate::flags::{FLAG_C, FLAG_P, FLAG_S, FLAG_Z};
use crate::memory::Memory;

pub fn nop(_cpu: &mut Cpu, _memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    Ok(0)
}

// --- JMP / Jcc. The 8080 spends the same 10 cycles whether or not the
// branch is taken, so these never report additional cycles. ---

fn conditional_jmp(cpu: &mut Cpu, memory: &mut Memory, condition: bool) -> CpuResult<u8> {
    let addr = cpu.fetch_word(memory);
    if condition {
        cpu.set_pc(addr);
    }
    Ok(0)
}

pub fn jmp(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let addr = cpu.fetch_word(memory);
    cpu.set_pc(addr);
    Ok(0)
}

pub fn jnz(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_jmp(cpu, memory, !cpu.registers().flags.get(FLAG_Z))
}
pub fn jz(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_jmp(cpu, memory, cpu.registers().flags.get(FLAG_Z))
}
pub fn jnc(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_jmp(cpu, memory, !cpu.registers().flags.get(FLAG_C))
}
pub fn jc(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_jmp(cpu, memory, cpu.registers().flags.get(FLAG_C))
}
pub fn jpo(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_jmp(cpu, memory, !cpu.registers().flags.get(FLAG_P))
}
pub fn jpe(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_jmp(cpu, memory, cpu.registers().flags.get(FLAG_P))
}
pub fn jp(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_jmp(cpu, memory, !cpu.registers().flags.get(FLAG_S))
}
pub fn jm(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_jmp(cpu, memory, cpu.registers().flags.get(FLAG_S))
}

// --- CALL / Ccc. Base cost in the table is the not-taken cost (11); a
// taken conditional call reports 6 additional cycles, landing on 17 -- the
// same total the unconditional form bills directly. ---

fn conditional_call(cpu: &mut Cpu, memory: &mut Memory, condition: bool) -> CpuResult<u8> {
    let addr = cpu.fetch_word(memory);
    if condition {
        let return_pc = cpu.pc();
        cpu.push_word(return_pc, memory);
        cpu.set_pc(addr);
        Ok(6)
    } else {
        Ok(0)
    }
}

pub fn call(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let addr = cpu.fetch_word(memory);
    let return_pc = cpu.pc();
    cpu.push_word(return_pc, memory);
    cpu.set_pc(addr);
    Ok(0)
}

pub fn cnz(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_call(cpu, memory, !cpu.registers().flags.get(FLAG_Z))
}
pub fn cz(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_call(cpu, memory, cpu.registers().flags.get(FLAG_Z))
}
pub fn cnc(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_call(cpu, memory, !cpu.registers().flags.get(FLAG_C))
}
pub fn cc(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_call(cpu, memory, cpu.registers().flags.get(FLAG_C))
}
pub fn cpo(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_call(cpu, memory, !cpu.registers().flags.get(FLAG_P))
}
pub fn cpe(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_call(cpu, memory, cpu.registers().flags.get(FLAG_P))
}
pub fn cp(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_call(cpu, memory, !cpu.registers().flags.get(FLAG_S))
}
pub fn cm(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_call(cpu, memory, cpu.registers().flags.get(FLAG_S))
}

// --- RET / Rcc. Base cost is the not-taken cost (5); a taken conditional
// return reports 6 additional cycles (5+6=11), unconditional RET bills 10
// directly. ---

fn conditional_ret(cpu: &mut Cpu, memory: &mut Memory, condition: bool) -> CpuResult<u8> {
    if condition {
        let addr = cpu.pop_word(memory);
        cpu.set_pc(addr);
        Ok(6)
    } else {
        Ok(0)
    }
}

pub fn ret(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let addr = cpu.pop_word(memory);
    cpu.set_pc(addr);
    Ok(0)
}

pub fn rnz(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_ret(cpu, memory, !cpu.registers().flags.get(FLAG_Z))
}
pub fn rz(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_ret(cpu, memory, cpu.registers().flags.get(FLAG_Z))
}
pub fn rnc(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_ret(cpu, memory, !cpu.registers().flags.get(FLAG_C))
}
pub fn rc(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_ret(cpu, memory, cpu.registers().flags.get(FLAG_C))
}
pub fn rpo(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_ret(cpu, memory, !cpu.registers().flags.get(FLAG_P))
}
pub fn rpe(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_ret(cpu, memory, cpu.registers().flags.get(FLAG_P))
}
pub fn rp(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_ret(cpu, memory, !cpu.registers().flags.get(FLAG_S))
}
pub fn rm(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    conditional_ret(cpu, memory, cpu.registers().flags.get(FLAG_S))
}

// --- RST 0-7 ---

fn rst(cpu: &mut Cpu, memory: &mut Memory, vector: u16) -> CpuResult<u8> {
    let return_pc = cpu.pc();
    cpu.push_word(return_pc, memory);
    cpu.set_pc(vector);
    Ok(0)
}

pub fn rst_0(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    rst(cpu, memory, 0x0000)
}
pub fn rst_1(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    rst(cpu, memory, 0x0008)
}
pub fn rst_2(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    rst(cpu, memory, 0x0010)
}
pub fn rst_3(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    rst(cpu, memory, 0x0018)
}
pub fn rst_4(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    rst(cpu, memory, 0x0020)
}
pub fn rst_5(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    rst(cpu, memory, 0x0028)
}
pub fn rst_6(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    rst(cpu, memory, 0x0030)
}
pub fn rst_7(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    rst(cpu, memory, 0x0038)
}

// --- PCHL / SPHL / XTHL ---

pub fn pchl(cpu: &mut Cpu, _memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let hl = cpu.registers().hl();
    cpu.set_pc(hl);
    Ok(0)
}

pub fn sphl(cpu: &mut Cpu, _memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    cpu.registers_mut().sp = cpu.registers().hl();
    Ok(0)
}

pub fn xthl(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let sp = cpu.registers().sp;
    let stack_top = memory.read_word(sp);
    let hl = cpu.registers().hl();
    memory.write_word(sp, hl);
    cpu.registers_mut().set_hl(stack_top);
    Ok(0)
}

// --- PUSH / POP ---

pub fn push_b(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let value = cpu.registers().bc();
    cpu.push_word(value, memory);
    Ok(0)
}
pub fn push_d(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let value = cpu.registers().de();
    cpu.push_word(value, memory);
    Ok(0)
}
pub fn push_h(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let value = cpu.registers().hl();
    cpu.push_word(value, memory);
    Ok(0)
}
pub fn push_psw(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let value = cpu.registers().psw();
    cpu.push_word(value, memory);
    Ok(0)
}

pub fn pop_b(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let value = cpu.pop_word(memory);
    cpu.registers_mut().set_bc(value);
    Ok(0)
}
pub fn pop_d(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let value = cpu.pop_word(memory);
    cpu.registers_mut().set_de(value);
    Ok(0)
}
pub fn pop_h(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let value = cpu.pop_word(memory);
    cpu.registers_mut().set_hl(value);
    Ok(0)
}
pub fn pop_psw(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let value = cpu.pop_word(memory);
    cpu.registers_mut().set_psw(value);
    Ok(0)
}

// --- EI / DI ---

pub fn di(cpu: &mut Cpu, _memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    cpu.interrupts_enabled = false;
    Ok(0)
}

pub fn ei(cpu: &mut Cpu, _memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    cpu.interrupts_enabled = true;
    Ok(0)
}

// --- IN / OUT ---

pub fn op_in(cpu: &mut Cpu, memory: &mut Memory, bus: &mut Bus) -> CpuResult<u8> {
    let port = cpu.fetch_byte(memory);
    cpu.registers_mut().a = bus.read(port)?;
    Ok(0)
}

pub fn op_out(cpu: &mut Cpu, memory: &mut Memory, bus: &mut Bus) -> CpuResult<u8> {
    let port = cpu.fetch_byte(memory);
    let value = cpu.registers().a;
    bus.write(port, value)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harness() -> (Cpu, Memory, Bus) {
        (Cpu::new(), Memory::new(), Bus::new(false))
    }

    #[test]
    fn conditional_call_not_taken_reports_no_extra_cycles() {
        let (mut cpu, mut memory, mut bus) = harness();
        cpu.set_pc(0x0000);
        cpu.registers_mut().sp = 0xFFFE;
        memory.write_word(0x0000, 0x1234);
        let extra = cnz(&mut cpu, &mut memory, &mut bus).unwrap();
        assert_eq!(extra, 0);
        assert_eq!(cpu.pc(), 0x0002);
        assert_eq!(cpu.sp(), 0xFFFE);
    }

    #[test]
    fn conditional_call_taken_pushes_return_address() {
        let (mut cpu, mut memory, mut bus) = harness();
        cpu.set_pc(0x0000);
        cpu.registers_mut().sp = 0xFFFE;
        cpu.registers_mut().flags.set(FLAG_Z, true);
        memory.write_word(0x0000, 0x1234);
        let extra = cz(&mut cpu, &mut memory, &mut bus).unwrap();
        assert_eq!(extra, 6);
        assert_eq!(cpu.pc(), 0x1234);
        assert_eq!(memory.read_word(cpu.sp()), 0x0002);
    }

    #[test]
    fn xthl_swaps_hl_with_stack_top() {
        let (mut cpu, mut memory, mut bus) = harness();
        cpu.registers_mut().sp = 0x2000;
        cpu.registers_mut().set_hl(0x1122);
        memory.write_word(0x2000, 0x3344);
        xthl(&mut cpu, &mut memory, &mut bus).unwrap();
        assert_eq!(cpu.registers().hl(), 0x3344);
        assert_eq!(memory.read_word(0x2000), 0x1122);
    }

    #[test]
    fn out_forwards_accumulator_to_the_bus() {
        let (mut cpu, mut memory, mut bus) = harness();
        let seen = std::rc::Rc::new(std::cell::Cell::new(0u8));
        let seen_clone = seen.clone();
        bus.register_write(4, move |value| seen_clone.set(value));
        cpu.registers_mut().a = 0xAB;
        memory.write_byte(0x0000, 4);
        op_out(&mut cpu, &mut memory, &mut bus).unwrap();
        assert_eq!(seen.get(), 0xAB);
    }
}
