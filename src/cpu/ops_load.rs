//! Data movement: MOV, MVI, LXI, LDA/STA, LDAX/STAX, LHLD/SHLD, XCHG.

use super::Cpu;
use crate::bus::Bus;
use crate::error::CpuResult;
use crate::memory::Memory;

// --- MOV r, r' (0x40-0x7F, minus 0x76 which is HALT) ---

mov_r_r!(mov_b_b, b, b);
mov_r_r!(mov_b_c, b, c);
mov_r_r!(mov_b_d, b, d);
mov_r_r!(mov_b_e, b, e);
mov_r_r!(mov_b_h, b, h);
mov_r_r!(mov_b_l, b, l);
mov_r_r!(mov_b_a, b, a);

mov_r_r!(mov_c_b, c, b);
mov_r_r!(mov_c_c, c, c);
mov_r_r!(mov_c_d, c, d);
mov_r_r!(mov_c_e, c, e);
mov_r_r!(mov_c_h, c, h);
mov_r_r!(mov_c_l, c, l);
mov_r_r!(mov_c_a, c, a);

mov_r_r!(mov_d_b, d, b);
mov_r_r!(mov_d_c, d, c);
mov_r_r!(mov_d_d, d, d);
mov_r_r!(mov_d_e, d, e);
mov_r_r!(mov_d_h, d, h);
mov_r_r!(mov_d_l, d, l);
mov_r_r!(mov_d_a, d, a);

mov_r_r!(mov_e_b, e, b);
mov_r_r!(mov_e_c, e, c);
mov_r_r!(mov_e_d, e, d);
mov_r_r!(mov_e_e, e, e);
mov_r_r!(mov_e_h, e, h);
mov_r_r!(mov_e_l, e, l);
mov_r_r!(mov_e_a, e, a);

mov_r_r!(mov_h_b, h, b);
mov_r_r!(mov_h_c, h, c);
mov_r_r!(mov_h_d, h, d);
mov_r_r!(mov_h_e, h, e);
mov_r_r!(mov_h_h, h, h);
mov_r_r!(mov_h_l, h, l);
mov_r_r!(mov_h_a, h, a);

mov_r_r!(mov_l_b, l, b);
mov_r_r!(mov_l_c, l, c);
mov_r_r!(mov_l_d, l, d);
mov_r_r!(mov_l_e, l, e);
mov_r_r!(mov_l_h, l, h);
mov_r_r!(mov_l_l, l, l);
mov_r_r!(mov_l_a, l, a);

mov_r_r!(mov_a_b, a, b);
mov_r_r!(mov_a_c, a, c);
mov_r_r!(mov_a_d, a, d);
mov_r_r!(mov_a_e, a, e);
mov_r_r!(mov_a_h, a, h);
mov_r_r!(mov_a_l, a, l);
mov_r_r!(mov_a_a, a, a);

mov_r_m!(mov_b_m, b);
mov_r_m!(mov_c_m, c);
mov_r_m!(mov_d_m, d);
mov_r_m!(mov_e_m, e);
mov_r_m!(mov_h_m, h);
mov_r_m!(mov_l_m, l);
mov_r_m!(mov_a_m, a);

mov_m_r!(mov_m_b, b);
mov_m_r!(mov_m_c, c);
mov_m_r!(mov_m_d, d);
mov_m_r!(mov_m_e, e);
mov_m_r!(mov_m_h, h);
mov_m_r!(mov_m_l, l);
mov_m_r!(mov_m_a, a);

/// 0x76. Sits in the MOV M,r slot that would otherwise be MOV M,M.
pub fn op_hlt(cpu: &mut Cpu, _memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    cpu.halted = true;
    Ok(0)
}

// --- MVI r, d8 / MVI M, d8 ---

mvi_r!(mvi_b, b);
mvi_r!(mvi_c, c);
mvi_r!(mvi_d, d);
mvi_r!(mvi_e, e);
mvi_r!(mvi_h, h);
mvi_r!(mvi_l, l);
mvi_r!(mvi_a, a);

pub fn mvi_m(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let value = cpu.fetch_byte(memory);
    cpu.write_m(memory, value);
    Ok(0)
}

// --- LXI rp, d16 ---

lxi_rp!(lxi_b, set_bc);
lxi_rp!(lxi_d, set_de);
lxi_rp!(lxi_h, set_hl);

pub fn lxi_sp(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    cpu.regs.sp = cpu.fetch_word(memory);
    Ok(0)
}

// --- LDA/STA a16, LHLD/SHLD a16 ---

pub fn lda(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let addr = cpu.fetch_word(memory);
    cpu.regs.a = memory.read_byte(addr);
    Ok(0)
}

pub fn sta(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let addr = cpu.fetch_word(memory);
    memory.write_byte(addr, cpu.regs.a);
    Ok(0)
}

pub fn lhld(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let addr = cpu.fetch_word(memory);
    cpu.regs.set_hl(memory.read_word(addr));
    Ok(0)
}

pub fn shld(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    let addr = cpu.fetch_word(memory);
    memory.write_word(addr, cpu.regs.hl());
    Ok(0)
}

// --- LDAX/STAX (BC/DE only; HL uses MOV/MVI M instead) ---

pub fn ldax_b(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    cpu.regs.a = memory.read_byte(cpu.regs.bc());
    Ok(0)
}

pub fn ldax_d(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    cpu.regs.a = memory.read_byte(cpu.regs.de());
    Ok(0)
}

pub fn stax_b(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    memory.write_byte(cpu.regs.bc(), cpu.regs.a);
    Ok(0)
}

pub fn stax_d(cpu: &mut Cpu, memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    memory.write_byte(cpu.regs.de(), cpu.regs.a);
    Ok(0)
}

// --- XCHG ---

pub fn xchg(cpu: &mut Cpu, _memory: &mut Memory, _bus: &mut Bus) -> CpuResult<u8> {
    std::mem::swap(&mut cpu.regs.h, &mut cpu.regs.d);
    std::mem::swap(&mut cpu.regs.l, &mut cpu.regs.e);
    Ok(0)
}
