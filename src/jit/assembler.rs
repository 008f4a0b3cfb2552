/*
 * // Copyright (c) Radzivon Bartoshyk 6/2025. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
//! Minimal AArch64 encoder covering the instructions the transform generator emits.
use crate::FftError;

/// General purpose register; index 31 reads as `sp` for address bases and as `xzr` elsewhere.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct XReg(pub(crate) u8);

/// SIMD and floating point register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct VReg(pub(crate) u8);

pub(crate) const X0: XReg = XReg(0);
pub(crate) const X1: XReg = XReg(1);
pub(crate) const X2: XReg = XReg(2);
pub(crate) const X3: XReg = XReg(3);
pub(crate) const X4: XReg = XReg(4);
pub(crate) const FP: XReg = XReg(29);
pub(crate) const LR: XReg = XReg(30);
pub(crate) const SP: XReg = XReg(31);

/// Lane layout of a vector operation over f32 values.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Arrangement {
    /// `.2s`, one complex value in the low 64 bits.
    S2,
    /// `.4s`, two complex values.
    S4,
}

impl Arrangement {
    const fn q(self) -> u32 {
        match self {
            Arrangement::S2 => 0,
            Arrangement::S4 => 1 << 30,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Condition {
    Ne = 1,
}

/// Position in the instruction stream, in words.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Label(usize);

const FADD: u32 = 0x0E20_D400;
const FSUB: u32 = 0x0EA0_D400;
const FMUL: u32 = 0x2E20_DC00;
const FMLA: u32 = 0x0E20_CC00;
const FMLS: u32 = 0x0EA0_CC00;
const FNEG: u32 = 0x2EA0_F800;
const REV64_S: u32 = 0x0EA0_0800;
const EOR: u32 = 0x2E20_1C00;
const UZP1_S: u32 = 0x0E80_1800;
const UZP2_S: u32 = 0x0E80_5800;
const TRN1_S: u32 = 0x0E80_2800;
const TRN2_S: u32 = 0x0E80_6800;

const LDR_Q_POST: u32 = 0x3CC0_0400;
const STR_Q_POST: u32 = 0x3C80_0400;
const LDR_Q_UOFF: u32 = 0x3DC0_0000;
const LDR_D_UOFF: u32 = 0xFD40_0000;
const STR_D_UOFF: u32 = 0xFD00_0000;
const LDR_D_REG: u32 = 0xFC60_6800;
const LDR_W_POST: u32 = 0xB840_0400;

const MOVZ_X: u32 = 0xD280_0000;
const MOVK_X: u32 = 0xF280_0000;
const ADD_X_IMM: u32 = 0x9100_0000;
const SUBS_X_IMM: u32 = 0xF100_0000;
const ADD_X_REG: u32 = 0x8B00_0000;
const ORR_X_REG: u32 = 0xAA00_03E0;
const B_COND: u32 = 0x5400_0000;
const RET: u32 = 0xD65F_03C0;

const STP_X_PRE: u32 = 0xA980_0000;
const LDP_X_POST: u32 = 0xA8C0_0000;
const STP_D_PRE: u32 = 0x6D80_0000;
const LDP_D_POST: u32 = 0x6CC0_0000;

fn x_field(reg: XReg) -> Result<u32, FftError> {
    if reg.0 > 31 {
        return Err(FftError::EncodingViolation(format!(
            "general register x{} does not exist",
            reg.0
        )));
    }
    Ok(reg.0 as u32)
}

fn v_field(reg: VReg) -> Result<u32, FftError> {
    if reg.0 > 31 {
        return Err(FftError::EncodingViolation(format!(
            "vector register v{} does not exist",
            reg.0
        )));
    }
    Ok(reg.0 as u32)
}

fn unsigned_field(value: u64, bits: u32, what: &str) -> Result<u32, FftError> {
    if value >> bits != 0 {
        return Err(FftError::EncodingViolation(format!(
            "{what} {value} does not fit in {bits} unsigned bits"
        )));
    }
    Ok(value as u32)
}

fn signed_field(value: i64, bits: u32, what: &str) -> Result<u32, FftError> {
    let limit = 1i64 << (bits - 1);
    if value < -limit || value >= limit {
        return Err(FftError::EncodingViolation(format!(
            "{what} {value} does not fit in {bits} signed bits"
        )));
    }
    Ok((value as u32) & ((1u32 << bits) - 1))
}

fn scaled(offset: i64, scale: i64, what: &str) -> Result<i64, FftError> {
    if offset % scale != 0 {
        return Err(FftError::EncodingViolation(format!(
            "{what} {offset} is not a multiple of {scale}"
        )));
    }
    Ok(offset / scale)
}

pub(crate) fn encode_vector_three(
    opcode: u32,
    arrangement: Arrangement,
    vd: VReg,
    vn: VReg,
    vm: VReg,
) -> Result<u32, FftError> {
    Ok(opcode | arrangement.q() | v_field(vm)? << 16 | v_field(vn)? << 5 | v_field(vd)?)
}

pub(crate) fn encode_vector_two(
    opcode: u32,
    arrangement: Arrangement,
    vd: VReg,
    vn: VReg,
) -> Result<u32, FftError> {
    Ok(opcode | arrangement.q() | v_field(vn)? << 5 | v_field(vd)?)
}

fn encode_post_index(opcode: u32, rt: u32, rn: XReg, imm: i64) -> Result<u32, FftError> {
    Ok(opcode | signed_field(imm, 9, "post index")? << 12 | x_field(rn)? << 5 | rt)
}

fn encode_unsigned_offset(
    opcode: u32,
    rt: u32,
    rn: XReg,
    offset: u64,
    size: u64,
) -> Result<u32, FftError> {
    let imm = scaled(offset as i64, size as i64, "load/store offset")?;
    Ok(opcode | unsigned_field(imm as u64, 12, "load/store offset")? << 10 | x_field(rn)? << 5 | rt)
}

fn encode_pair(
    opcode: u32,
    rt: u32,
    rt2: u32,
    rn: XReg,
    offset: i64,
) -> Result<u32, FftError> {
    let imm = scaled(offset, 8, "pair offset")?;
    Ok(opcode | signed_field(imm, 7, "pair offset")? << 15 | rt2 << 10 | x_field(rn)? << 5 | rt)
}

/// Growing buffer of little endian A64 instruction words.
#[derive(Debug, Default)]
pub(crate) struct Assembler {
    code: Vec<u32>,
}

impl Assembler {
    pub(crate) fn new() -> Assembler {
        Assembler {
            code: Vec::with_capacity(1024),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.code.len()
    }

    pub(crate) fn finish(self) -> Vec<u32> {
        self.code
    }

    pub(crate) fn label(&self) -> Label {
        Label(self.code.len())
    }

    fn push(&mut self, word: u32) {
        self.code.push(word);
    }

    fn three(
        &mut self,
        opcode: u32,
        arrangement: Arrangement,
        vd: VReg,
        vn: VReg,
        vm: VReg,
    ) -> Result<(), FftError> {
        let word = encode_vector_three(opcode, arrangement, vd, vn, vm)?;
        self.push(word);
        Ok(())
    }

    pub(crate) fn fadd(&mut self, a: Arrangement, vd: VReg, vn: VReg, vm: VReg) -> Result<(), FftError> {
        self.three(FADD, a, vd, vn, vm)
    }

    pub(crate) fn fsub(&mut self, a: Arrangement, vd: VReg, vn: VReg, vm: VReg) -> Result<(), FftError> {
        self.three(FSUB, a, vd, vn, vm)
    }

    pub(crate) fn fmul(&mut self, a: Arrangement, vd: VReg, vn: VReg, vm: VReg) -> Result<(), FftError> {
        self.three(FMUL, a, vd, vn, vm)
    }

    /// `vd += vn * vm`, fused.
    pub(crate) fn fmla(&mut self, a: Arrangement, vd: VReg, vn: VReg, vm: VReg) -> Result<(), FftError> {
        self.three(FMLA, a, vd, vn, vm)
    }

    /// `vd -= vn * vm`, fused.
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn fmls(&mut self, a: Arrangement, vd: VReg, vn: VReg, vm: VReg) -> Result<(), FftError> {
        self.three(FMLS, a, vd, vn, vm)
    }

    /// Bitwise exclusive or; `S2` selects the 8 byte form.
    pub(crate) fn eor(&mut self, a: Arrangement, vd: VReg, vn: VReg, vm: VReg) -> Result<(), FftError> {
        self.three(EOR, a, vd, vn, vm)
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn uzp1(&mut self, a: Arrangement, vd: VReg, vn: VReg, vm: VReg) -> Result<(), FftError> {
        self.three(UZP1_S, a, vd, vn, vm)
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn uzp2(&mut self, a: Arrangement, vd: VReg, vn: VReg, vm: VReg) -> Result<(), FftError> {
        self.three(UZP2_S, a, vd, vn, vm)
    }

    pub(crate) fn trn1(&mut self, a: Arrangement, vd: VReg, vn: VReg, vm: VReg) -> Result<(), FftError> {
        self.three(TRN1_S, a, vd, vn, vm)
    }

    pub(crate) fn trn2(&mut self, a: Arrangement, vd: VReg, vn: VReg, vm: VReg) -> Result<(), FftError> {
        self.three(TRN2_S, a, vd, vn, vm)
    }

    pub(crate) fn fneg(&mut self, a: Arrangement, vd: VReg, vn: VReg) -> Result<(), FftError> {
        let word = encode_vector_two(FNEG, a, vd, vn)?;
        self.push(word);
        Ok(())
    }

    /// Swaps adjacent f32 lanes, i.e. real and imaginary parts.
    pub(crate) fn rev64(&mut self, a: Arrangement, vd: VReg, vn: VReg) -> Result<(), FftError> {
        let word = encode_vector_two(REV64_S, a, vd, vn)?;
        self.push(word);
        Ok(())
    }

    /// `ldr qt, [xn], #imm`
    pub(crate) fn ldr_q_post(&mut self, vt: VReg, xn: XReg, imm: i64) -> Result<(), FftError> {
        let word = encode_post_index(LDR_Q_POST, v_field(vt)?, xn, imm)?;
        self.push(word);
        Ok(())
    }

    /// `str qt, [xn], #imm`
    pub(crate) fn str_q_post(&mut self, vt: VReg, xn: XReg, imm: i64) -> Result<(), FftError> {
        let word = encode_post_index(STR_Q_POST, v_field(vt)?, xn, imm)?;
        self.push(word);
        Ok(())
    }

    /// `ldr wt, [xn], #imm`
    pub(crate) fn ldr_w_post(&mut self, wt: XReg, xn: XReg, imm: i64) -> Result<(), FftError> {
        let word = encode_post_index(LDR_W_POST, x_field(wt)?, xn, imm)?;
        self.push(word);
        Ok(())
    }

    /// `ldr qt, [xn, #offset]`
    pub(crate) fn ldr_q(&mut self, vt: VReg, xn: XReg, offset: u64) -> Result<(), FftError> {
        let word = encode_unsigned_offset(LDR_Q_UOFF, v_field(vt)?, xn, offset, 16)?;
        self.push(word);
        Ok(())
    }

    /// `ldr dt, [xn, #offset]`
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn ldr_d(&mut self, vt: VReg, xn: XReg, offset: u64) -> Result<(), FftError> {
        let word = encode_unsigned_offset(LDR_D_UOFF, v_field(vt)?, xn, offset, 8)?;
        self.push(word);
        Ok(())
    }

    /// `str dt, [xn, #offset]`
    pub(crate) fn str_d(&mut self, vt: VReg, xn: XReg, offset: u64) -> Result<(), FftError> {
        let word = encode_unsigned_offset(STR_D_UOFF, v_field(vt)?, xn, offset, 8)?;
        self.push(word);
        Ok(())
    }

    /// `ldr dt, [xn, xm]` with a zero extended 32 bit index held in `xm`.
    pub(crate) fn ldr_d_indexed(&mut self, vt: VReg, xn: XReg, xm: XReg) -> Result<(), FftError> {
        let word = LDR_D_REG | x_field(xm)? << 16 | x_field(xn)? << 5 | v_field(vt)?;
        self.push(word);
        Ok(())
    }

    pub(crate) fn movz(&mut self, xd: XReg, imm: u16, shift: u32) -> Result<(), FftError> {
        let hw = unsigned_field((shift / 16) as u64, 2, "move wide shift")?;
        if shift % 16 != 0 {
            return Err(FftError::EncodingViolation(format!(
                "move wide shift {shift} is not a multiple of 16"
            )));
        }
        self.push(MOVZ_X | hw << 21 | (imm as u32) << 5 | x_field(xd)?);
        Ok(())
    }

    pub(crate) fn movk(&mut self, xd: XReg, imm: u16, shift: u32) -> Result<(), FftError> {
        let hw = unsigned_field((shift / 16) as u64, 2, "move wide shift")?;
        if shift % 16 != 0 {
            return Err(FftError::EncodingViolation(format!(
                "move wide shift {shift} is not a multiple of 16"
            )));
        }
        self.push(MOVK_X | hw << 21 | (imm as u32) << 5 | x_field(xd)?);
        Ok(())
    }

    /// Materializes a 64 bit constant with one `movz` and as many `movk` as needed.
    pub(crate) fn mov_imm(&mut self, xd: XReg, value: u64) -> Result<(), FftError> {
        self.movz(xd, value as u16, 0)?;
        for shift in [16u32, 32, 48] {
            let chunk = (value >> shift) as u16;
            if chunk != 0 {
                self.movk(xd, chunk, shift)?;
            }
        }
        Ok(())
    }

    /// `mov xd, xm`; encoded as `orr`, so neither operand may be `sp`.
    pub(crate) fn mov(&mut self, xd: XReg, xm: XReg) -> Result<(), FftError> {
        self.push(ORR_X_REG | x_field(xm)? << 16 | x_field(xd)?);
        Ok(())
    }

    /// `add xd, xn, #imm`; register 31 means `sp` on both sides.
    pub(crate) fn add_imm(&mut self, xd: XReg, xn: XReg, imm: u64) -> Result<(), FftError> {
        let imm = unsigned_field(imm, 12, "add immediate")?;
        self.push(ADD_X_IMM | imm << 10 | x_field(xn)? << 5 | x_field(xd)?);
        Ok(())
    }

    pub(crate) fn add(&mut self, xd: XReg, xn: XReg, xm: XReg) -> Result<(), FftError> {
        self.push(ADD_X_REG | x_field(xm)? << 16 | x_field(xn)? << 5 | x_field(xd)?);
        Ok(())
    }

    pub(crate) fn subs_imm(&mut self, xd: XReg, xn: XReg, imm: u64) -> Result<(), FftError> {
        let imm = unsigned_field(imm, 12, "subs immediate")?;
        self.push(SUBS_X_IMM | imm << 10 | x_field(xn)? << 5 | x_field(xd)?);
        Ok(())
    }

    /// Conditional branch to an already emitted `target`.
    pub(crate) fn b_cond(&mut self, condition: Condition, target: Label) -> Result<(), FftError> {
        let delta = target.0 as i64 - self.code.len() as i64;
        let imm = signed_field(delta, 19, "branch displacement")?;
        self.push(B_COND | imm << 5 | condition as u32);
        Ok(())
    }

    pub(crate) fn ret(&mut self) {
        self.push(RET);
    }

    /// `stp xt, xt2, [xn, #offset]!`
    pub(crate) fn stp_x_pre(&mut self, xt: XReg, xt2: XReg, xn: XReg, offset: i64) -> Result<(), FftError> {
        let word = encode_pair(STP_X_PRE, x_field(xt)?, x_field(xt2)?, xn, offset)?;
        self.push(word);
        Ok(())
    }

    /// `ldp xt, xt2, [xn], #offset`
    pub(crate) fn ldp_x_post(&mut self, xt: XReg, xt2: XReg, xn: XReg, offset: i64) -> Result<(), FftError> {
        let word = encode_pair(LDP_X_POST, x_field(xt)?, x_field(xt2)?, xn, offset)?;
        self.push(word);
        Ok(())
    }

    /// `stp dt, dt2, [xn, #offset]!`
    pub(crate) fn stp_d_pre(&mut self, vt: VReg, vt2: VReg, xn: XReg, offset: i64) -> Result<(), FftError> {
        let word = encode_pair(STP_D_PRE, v_field(vt)?, v_field(vt2)?, xn, offset)?;
        self.push(word);
        Ok(())
    }

    /// `ldp dt, dt2, [xn], #offset`
    pub(crate) fn ldp_d_post(&mut self, vt: VReg, vt2: VReg, xn: XReg, offset: i64) -> Result<(), FftError> {
        let word = encode_pair(LDP_D_POST, v_field(vt)?, v_field(vt2)?, xn, offset)?;
        self.push(word);
        Ok(())
    }

    /// Frame record plus the callee saved low halves of v8..v15.
    pub(crate) fn prologue(&mut self) -> Result<(), FftError> {
        self.stp_x_pre(FP, LR, SP, -16)?;
        self.add_imm(FP, SP, 0)?;
        for pair in (8u8..16).step_by(2) {
            self.stp_d_pre(VReg(pair), VReg(pair + 1), SP, -16)?;
        }
        Ok(())
    }

    pub(crate) fn epilogue(&mut self) -> Result<(), FftError> {
        for pair in (8u8..16).step_by(2).rev() {
            self.ldp_d_post(VReg(pair), VReg(pair + 1), SP, 16)?;
        }
        self.ldp_x_post(FP, LR, SP, 16)?;
        self.ret();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const V0: VReg = VReg(0);
    const V1: VReg = VReg(1);
    const V2: VReg = VReg(2);

    fn single(emit: impl FnOnce(&mut Assembler) -> Result<(), FftError>) -> u32 {
        let mut asm = Assembler::new();
        emit(&mut asm).unwrap();
        let code = asm.finish();
        assert_eq!(code.len(), 1);
        code[0]
    }

    #[test]
    fn test_vector_encodings() {
        use Arrangement::*;
        assert_eq!(single(|a| a.fadd(S4, V0, V1, V2)), 0x4E22_D420);
        assert_eq!(single(|a| a.fmul(S4, V0, V1, V2)), 0x6E22_DC20);
        assert_eq!(single(|a| a.fmla(S4, V0, V1, V2)), 0x4E22_CC20);
        assert_eq!(single(|a| a.rev64(S4, V0, V1)), 0x4EA0_0820);
        assert_eq!(single(|a| a.eor(S4, V0, V1, V2)), 0x6E22_1C20);
        assert_eq!(single(|a| a.fadd(S2, V0, V1, V2)), 0x0E22_D420);
        assert_eq!(single(|a| a.fmls(S4, V0, V1, V2)), 0x4EA2_CC20);
        assert_eq!(single(|a| a.uzp1(S4, V0, V1, V2)), 0x4E82_1820);
        assert_eq!(single(|a| a.uzp2(S4, V0, V1, V2)), 0x4E82_5820);
        assert_eq!(single(|a| a.trn1(S4, V0, V1, V2)), 0x4E82_2820);
    }

    #[test]
    fn test_memory_encodings() {
        assert_eq!(single(|a| a.ldr_q_post(V0, X1, 16)), 0x3CC1_0420);
        assert_eq!(single(|a| a.str_q_post(V0, X1, 16)), 0x3C81_0420);
        assert_eq!(single(|a| a.ldr_w_post(XReg(12), XReg(9), 4)), 0xB840_452C);
        assert_eq!(single(|a| a.ldr_d_indexed(V0, X0, XReg(12))), 0xFC6C_6800);
        assert_eq!(single(|a| a.str_d(VReg(20), XReg(10), 8)), 0xFD00_0554);
        assert_eq!(single(|a| a.ldr_q(VReg(24), X4, 0)), 0x3DC0_0098);
        assert_eq!(single(|a| a.ldr_d(V0, X1, 8)), 0xFD40_0420);
    }

    #[test]
    fn test_integer_encodings() {
        assert_eq!(single(|a| a.movz(X0, 0x1234, 0)), 0xD282_4680);
        assert_eq!(single(|a| a.movk(X0, 1, 16)), 0xF2A0_0020);
        assert_eq!(single(|a| a.mov(XReg(9), X3)), 0xAA03_03E9);
        assert_eq!(single(|a| a.add_imm(XReg(10), XReg(10), 128)), 0x9102_014A);
        assert_eq!(single(|a| a.subs_imm(XReg(14), XReg(14), 1)), 0xF100_05CE);
    }

    #[test]
    fn test_frame_encodings() {
        let mut asm = Assembler::new();
        asm.prologue().unwrap();
        asm.epilogue().unwrap();
        let code = asm.finish();
        assert_eq!(code[0], 0xA9BF_7BFD);
        assert_eq!(code[1], 0x9100_03FD);
        assert_eq!(code[2], 0x6DBF_27E8);
        assert_eq!(code[code.len() - 3], 0x6CC1_27E8);
        assert_eq!(code[code.len() - 2], 0xA8C1_7BFD);
        assert_eq!(code[code.len() - 1], 0xD65F_03C0);
    }

    #[test]
    fn test_backward_branch() {
        let mut asm = Assembler::new();
        let top = asm.label();
        for _ in 0..4 {
            asm.ret();
        }
        asm.b_cond(Condition::Ne, top).unwrap();
        assert_eq!(asm.finish()[4], 0x54FF_FF81);
    }

    #[test]
    fn test_mov_imm_splits_chunks() {
        let mut asm = Assembler::new();
        asm.mov_imm(XReg(11), 0x0001_0000).unwrap();
        assert_eq!(asm.len(), 2);
        let mut asm = Assembler::new();
        asm.mov_imm(XReg(11), 7).unwrap();
        assert_eq!(asm.len(), 1);
    }

    #[test]
    fn test_range_violations() {
        let mut asm = Assembler::new();
        assert!(matches!(
            asm.add_imm(X0, X0, 4096),
            Err(FftError::EncodingViolation(_))
        ));
        assert!(asm.ldr_q_post(V0, X1, 256).is_err());
        assert!(asm.ldr_q_post(V0, X1, -256).is_ok());
        assert!(asm.str_d(V0, X1, 12).is_err());
        assert!(asm.str_d(V0, X1, 8 * 4096).is_err());
        assert!(asm.stp_x_pre(FP, LR, SP, -520).is_err());
        assert!(asm.fadd(Arrangement::S4, VReg(32), V0, V0).is_err());
        assert!(asm.mov(XReg(40), X0).is_err());
        assert!(asm.movz(X0, 1, 64).is_err());
        assert_eq!(asm.len(), 1);
    }
}
