//! The flat 256-entry dispatch table. Each slot names the function that
//! implements it and the base T-state cost that function's return value (the
//! cycles *beyond* this base) is added to. `None` would mean "no handler
//! written yet" -- on the finished core every one of the 256 byte values is
//! `Some`, since the 8080 has no genuinely illegal opcode, only documented
//! aliases of other instructions (0xCB/JMP, 0xD9/0xDD/0xED/0xFD, and the
//! seven NOP aliases at 0x08/0x10/.../0x38).

use lazy_static::lazy_static;

use super::{ops_arith as arith, ops_control as control, ops_load as load, Cpu};
use crate::bus::Bus;
use crate::error::CpuResult;
use crate::memory::Memory;

pub struct Opcode {
    pub mnemonic: &'static str,
    pub cycles: u8,
    pub execute: fn(&mut Cpu, &mut Memory, &mut Bus) -> CpuResult<u8>,
}

macro_rules! op {
    ($mnemonic:expr, $cycles:expr, $execute:expr) => {
        Some(Opcode {
            mnemonic: $mnemonic,
            cycles: $cycles,
            execute: $execute,
        })
    };
}

lazy_static! {
    pub static ref OPCODES: [Option<Opcode>; 256] = [
        // 0x00
        op!("NOP", 4, control::nop),
        op!("LXI B,d16", 10, load::lxi_b),
        op!("STAX B", 7, load::stax_b),
        op!("INX B", 5, arith::inx_b),
        op!("INR B", 5, arith::inr_b),
        op!("DCR B", 5, arith::dcr_b),
        op!("MVI B,d8", 7, load::mvi_b),
        op!("RLC", 4, arith::rlc),
        op!("NOP*", 4, control::nop),
        op!("DAD B", 10, arith::dad_b),
        op!("LDAX B", 7, load::ldax_b),
        op!("DCX B", 5, arith::dcx_b),
        op!("INR C", 5, arith::inr_c),
        op!("DCR C", 5, arith::dcr_c),
        op!("MVI C,d8", 7, load::mvi_c),
        op!("RRC", 4, arith::rrc),
        // 0x10
        op!("NOP*", 4, control::nop),
        op!("LXI D,d16", 10, load::lxi_d),
        op!("STAX D", 7, load::stax_d),
        op!("INX D", 5, arith::inx_d),
        op!("INR D", 5, arith::inr_d),
        op!("DCR D", 5, arith::dcr_d),
        op!("MVI D,d8", 7, load::mvi_d),
        op!("RAL", 4, arith::ral),
        op!("NOP*", 4, control::nop),
        op!("DAD D", 10, arith::dad_d),
        op!("LDAX D", 7, load::ldax_d),
        op!("DCX D", 5, arith::dcx_d),
        op!("INR E", 5, arith::inr_e),
        op!("DCR E", 5, arith::dcr_e),
        op!("MVI E,d8", 7, load::mvi_e),
        op!("RAR", 4, arith::rar),
        // 0x20
        op!("NOP*", 4, control::nop),
        op!("LXI H,d16", 10, load::lxi_h),
        op!("SHLD a16", 16, load::shld),
        op!("INX H", 5, arith::inx_h),
        op!("INR H", 5, arith::inr_h),
        op!("DCR H", 5, arith::dcr_h),
        op!("MVI H,d8", 7, load::mvi_h),
        op!("DAA", 4, arith::daa),
        op!("NOP*", 4, control::nop),
        op!("DAD H", 10, arith::dad_h),
        op!("LHLD a16", 16, load::lhld),
        op!("DCX H", 5, arith::dcx_h),
        op!("INR L", 5, arith::inr_l),
        op!("DCR L", 5, arith::dcr_l),
        op!("MVI L,d8", 7, load::mvi_l),
        op!("CMA", 4, arith::cma),
        // 0x30
        op!("NOP*", 4, control::nop),
        op!("LXI SP,d16", 10, load::lxi_sp),
        op!("STA a16", 13, load::sta),
        op!("INX SP", 5, arith::inx_sp),
        op!("INR M", 10, arith::inr_m),
        op!("DCR M", 10, arith::dcr_m),
        op!("MVI M,d8", 10, load::mvi_m),
        op!("STC", 4, arith::stc),
        op!("NOP*", 4, control::nop),
        op!("DAD SP", 10, arith::dad_sp),
        op!("LDA a16", 13, load::lda),
        op!("DCX SP", 5, arith::dcx_sp),
        op!("INR A", 5, arith::inr_a),
        op!("DCR A", 5, arith::dcr_a),
        op!("MVI A,d8", 7, load::mvi_a),
        op!("CMC", 4, arith::cmc),
        // 0x40
        op!("MOV B,B", 5, load::mov_b_b),
        op!("MOV B,C", 5, load::mov_b_c),
        op!("MOV B,D", 5, load::mov_b_d),
        op!("MOV B,E", 5, load::mov_b_e),
        op!("MOV B,H", 5, load::mov_b_h),
        op!("MOV B,L", 5, load::mov_b_l),
        op!("MOV B,M", 7, load::mov_b_m),
        op!("MOV B,A", 5, load::mov_b_a),
        op!("MOV C,B", 5, load::mov_c_b),
        op!("MOV C,C", 5, load::mov_c_c),
        op!("MOV C,D", 5, load::mov_c_d),
        op!("MOV C,E", 5, load::mov_c_e),
        op!("MOV C,H", 5, load::mov_c_h),
        op!("MOV C,L", 5, load::mov_c_l),
        op!("MOV C,M", 7, load::mov_c_m),
        op!("MOV C,A", 5, load::mov_c_a),
        // 0x50
        op!("MOV D,B", 5, load::mov_d_b),
        op!("MOV D,C", 5, load::mov_d_c),
        op!("MOV D,D", 5, load::mov_d_d),
        op!("MOV D,E", 5, load::mov_d_e),
        op!("MOV D,H", 5, load::mov_d_h),
        op!("MOV D,L", 5, load::mov_d_l),
        op!("MOV D,M", 7, load::mov_d_m),
        op!("MOV D,A", 5, load::mov_d_a),
        op!("MOV E,B", 5, load::mov_e_b),
        op!("MOV E,C", 5, load::mov_e_c),
        op!("MOV E,D", 5, load::mov_e_d),
        op!("MOV E,E", 5, load::mov_e_e),
        op!("MOV E,H", 5, load::mov_e_h),
        op!("MOV E,L", 5, load::mov_e_l),
        op!("MOV E,M", 7, load::mov_e_m),
        op!("MOV E,A", 5, load::mov_e_a),
        // 0x60
        op!("MOV H,B", 5, load::mov_h_b),
        op!("MOV H,C", 5, load::mov_h_c),
        op!("MOV H,D", 5, load::mov_h_d),
        op!("MOV H,E", 5, load::mov_h_e),
        op!("MOV H,H", 5, load::mov_h_h),
        op!("MOV H,L", 5, load::mov_h_l),
        op!("MOV H,M", 7, load::mov_h_m),
        op!("MOV H,A", 5, load::mov_h_a),
        op!("MOV L,B", 5, load::mov_l_b),
        op!("MOV L,C", 5, load::mov_l_c),
        op!("MOV L,D", 5, load::mov_l_d),
        op!("MOV L,E", 5, load::mov_l_e),
        op!("MOV L,H", 5, load::mov_l_h),
        op!("MOV L,L", 5, load::mov_l_l),
        op!("MOV L,M", 7, load::mov_l_m),
        op!("MOV L,A", 5, load::mov_l_a),
        // 0x70
        op!("MOV M,B", 7, load::mov_m_b),
        op!("MOV M,C", 7, load::mov_m_c),
        op!("MOV M,D", 7, load::mov_m_d),
        op!("MOV M,E", 7, load::mov_m_e),
        op!("MOV M,H", 7, load::mov_m_h),
        op!("MOV M,L", 7, load::mov_m_l),
        op!("HLT", 7, load::op_hlt),
        op!("MOV M,A", 7, load::mov_m_a),
        op!("MOV A,B", 5, load::mov_a_b),
        op!("MOV A,C", 5, load::mov_a_c),
        op!("MOV A,D", 5, load::mov_a_d),
        op!("MOV A,E", 5, load::mov_a_e),
        op!("MOV A,H", 5, load::mov_a_h),
        op!("MOV A,L", 5, load::mov_a_l),
        op!("MOV A,M", 7, load::mov_a_m),
        op!("MOV A,A", 5, load::mov_a_a),
        // 0x80
        op!("ADD B", 4, arith::add_b),
        op!("ADD C", 4, arith::add_c),
        op!("ADD D", 4, arith::add_d),
        op!("ADD E", 4, arith::add_e),
        op!("ADD H", 4, arith::add_h),
        op!("ADD L", 4, arith::add_l),
        op!("ADD M", 7, arith::add_m),
        op!("ADD A", 4, arith::add_a_a),
        op!("ADC B", 4, arith::adc_b),
        op!("ADC C", 4, arith::adc_c),
        op!("ADC D", 4, arith::adc_d),
        op!("ADC E", 4, arith::adc_e),
        op!("ADC H", 4, arith::adc_h),
        op!("ADC L", 4, arith::adc_l),
        op!("ADC M", 7, arith::adc_m),
        op!("ADC A", 4, arith::adc_a_a),
        // 0x90
        op!("SUB B", 4, arith::sub_b),
        op!("SUB C", 4, arith::sub_c),
        op!("SUB D", 4, arith::sub_d),
        op!("SUB E", 4, arith::sub_e),
        op!("SUB H", 4, arith::sub_h),
        op!("SUB L", 4, arith::sub_l),
        op!("SUB M", 7, arith::sub_m),
        op!("SUB A", 4, arith::sub_a_a),
        op!("SBB B", 4, arith::sbb_b),
        op!("SBB C", 4, arith::sbb_c),
        op!("SBB D", 4, arith::sbb_d),
        op!("SBB E", 4, arith::sbb_e),
        op!("SBB H", 4, arith::sbb_h),
        op!("SBB L", 4, arith::sbb_l),
        op!("SBB M", 7, arith::sbb_m),
        op!("SBB A", 4, arith::sbb_a_a),
        // 0xA0
        op!("ANA B", 4, arith::ana_b),
        op!("ANA C", 4, arith::ana_c),
        op!("ANA D", 4, arith::ana_d),
        op!("ANA E", 4, arith::ana_e),
        op!("ANA H", 4, arith::ana_h),
        op!("ANA L", 4, arith::ana_l),
        op!("ANA M", 7, arith::ana_m),
        op!("ANA A", 4, arith::ana_a_a),
        op!("XRA B", 4, arith::xra_b),
        op!("XRA C", 4, arith::xra_c),
        op!("XRA D", 4, arith::xra_d),
        op!("XRA E", 4, arith::xra_e),
        op!("XRA H", 4, arith::xra_h),
        op!("XRA L", 4, arith::xra_l),
        op!("XRA M", 7, arith::xra_m),
        op!("XRA A", 4, arith::xra_a_a),
        // 0xB0
        op!("ORA B", 4, arith::ora_b),
        op!("ORA C", 4, arith::ora_c),
        op!("ORA D", 4, arith::ora_d),
        op!("ORA E", 4, arith::ora_e),
        op!("ORA H", 4, arith::ora_h),
        op!("ORA L", 4, arith::ora_l),
        op!("ORA M", 7, arith::ora_m),
        op!("ORA A", 4, arith::ora_a_a),
        op!("CMP B", 4, arith::cmp_b),
        op!("CMP C", 4, arith::cmp_c),
        op!("CMP D", 4, arith::cmp_d),
        op!("CMP E", 4, arith::cmp_e),
        op!("CMP H", 4, arith::cmp_h),
        op!("CMP L", 4, arith::cmp_l),
        op!("CMP M", 7, arith::cmp_m),
        op!("CMP A", 4, arith::cmp_a_a),
        // 0xC0
        op!("RNZ", 5, control::rnz),
        op!("POP B", 10, control::pop_b),
        op!("JNZ a16", 10, control::jnz),
        op!("JMP a16", 10, control::jmp),
        op!("CNZ a16", 11, control::cnz),
        op!("PUSH B", 11, control::push_b),
        op!("ADI d8", 7, arith::adi),
        op!("RST 0", 11, control::rst_0),
        op!("RZ", 5, control::rz),
        op!("RET", 10, control::ret),
        op!("JZ a16", 10, control::jz),
        op!("JMP a16*", 10, control::jmp),
        op!("CZ a16", 11, control::cz),
        op!("CALL a16", 17, control::call),
        op!("ACI d8", 7, arith::aci),
        op!("RST 1", 11, control::rst_1),
        // 0xD0
        op!("RNC", 5, control::rnc),
        op!("POP D", 10, control::pop_d),
        op!("JNC a16", 10, control::jnc),
        op!("OUT d8", 10, control::op_out),
        op!("CNC a16", 11, control::cnc),
        op!("PUSH D", 11, control::push_d),
        op!("SUI d8", 7, arith::sui),
        op!("RST 2", 11, control::rst_2),
        op!("RC", 5, control::rc),
        op!("RET*", 10, control::ret),
        op!("JC a16", 10, control::jc),
        op!("IN d8", 10, control::op_in),
        op!("CC a16", 11, control::cc),
        op!("CALL a16*", 17, control::call),
        op!("SBI d8", 7, arith::sbi),
        op!("RST 3", 11, control::rst_3),
        // 0xE0
        op!("RPO", 5, control::rpo),
        op!("POP H", 10, control::pop_h),
        op!("JPO a16", 10, control::jpo),
        op!("XTHL", 18, control::xthl),
        op!("CPO a16", 11, control::cpo),
        op!("PUSH H", 11, control::push_h),
        op!("ANI d8", 7, arith::ani),
        op!("RST 4", 11, control::rst_4),
        op!("RPE", 5, control::rpe),
        op!("PCHL", 5, control::pchl),
        op!("JPE a16", 10, control::jpe),
        op!("XCHG", 5, load::xchg),
        op!("CPE a16", 11, control::cpe),
        op!("CALL a16*", 17, control::call),
        op!("XRI d8", 7, arith::xri),
        op!("RST 5", 11, control::rst_5),
        // 0xF0
        op!("RP", 5, control::rp),
        op!("POP PSW", 10, control::pop_psw),
        op!("JP a16", 10, control::jp),
        op!("DI", 4, control::di),
        op!("CP a16", 11, control::cp),
        op!("PUSH PSW", 11, control::push_psw),
        op!("ORI d8", 7, arith::ori),
        op!("RST 6", 11, control::rst_6),
        op!("RM", 5, control::rm),
        op!("SPHL", 5, control::sphl),
        op!("JM a16", 10, control::jm),
        op!("EI", 4, control::ei),
        op!("CM a16", 11, control::cm),
        op!("CALL a16*", 17, control::call),
        op!("CPI d8", 7, arith::cpi),
        op!("RST 7", 11, control::rst_7),
    ];
}
