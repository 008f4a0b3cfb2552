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
//! Emits one straight AArch64 routine per plan: a gather-and-leaf loop followed by one
//! loop nest per combination level.
//!
//! The routine is called as `fn(input, output, twiddles, gather_offsets, constants)`
//! and follows AAPCS64, preserving the low halves of `v8..v15` and the frame record.
use super::assembler::{Arrangement, Assembler, Condition, VReg, XReg, X0, X1, X2, X3, X4};
use crate::err::try_vec;
use crate::planner::{BaseSize, CombinationStep, DecompositionNode};
use crate::twiddles::TwiddleTable;
use crate::util::compute_twiddle;
use crate::{FftDirection, FftError};
use num_complex::Complex;

/// Largest transform a routine is emitted for; gather offsets are 32 bit byte offsets.
pub(crate) const MAX_JIT_LENGTH: usize = 1 << 24;

const INPUT: XReg = X0;
const OUTPUT: XReg = X1;
const TWIDDLES: XReg = X2;
const GATHER: XReg = X3;
const CONSTANTS: XReg = X4;

const GATHER_CURSOR: XReg = XReg(9);
const OUT_CURSOR: XReg = XReg(10);
const BLOCKS: XReg = XReg(11);
const GATHER_OFFSET: XReg = XReg(12);

const ROWS: [XReg; 4] = [XReg(9), XReg(10), XReg(11), XReg(12)];
const TWIDDLE_CURSOR: XReg = XReg(13);
const COLUMNS: XReg = XReg(14);
const GROUPS: XReg = XReg(15);
const LEVEL_TWIDDLES: XReg = XReg(16);
const SCRATCH: XReg = XReg(17);

const T0: VReg = VReg(16);
const T1: VReg = VReg(17);
const T2: VReg = VReg(18);
const T3: VReg = VReg(19);
const T4: VReg = VReg(20);
const T5: VReg = VReg(21);

const ROTATE: VReg = VReg(24);
const ROOT2: VReg = VReg(25);
const W1: (VReg, VReg) = (VReg(26), VReg(27));
const W3: (VReg, VReg) = (VReg(28), VReg(29));
const W9: (VReg, VReg) = (VReg(30), VReg(31));

const COMPLEX_BYTES: usize = 8;

const D: Arrangement = Arrangement::S2;
const Q: Arrangement = Arrangement::S4;

/// Data the routine reads besides input and twiddles.
#[derive(Debug, Clone)]
pub(crate) struct JitTables {
    /// `8 · permutation[i]`, the byte offset of the input element feeding leaf slot `i`.
    pub(crate) gather_offsets: Vec<u32>,
    /// Eight 4-lane vectors loaded into `v24..v31` once per call.
    pub(crate) constants: [f32; 32],
}

impl JitTables {
    pub(crate) fn new(root: &DecompositionNode, direction: FftDirection) -> Result<JitTables, FftError> {
        let length = root.length();
        if length > MAX_JIT_LENGTH {
            return Err(FftError::UnsupportedSize(length));
        }
        let permutation = root.input_permutation()?;
        let mut gather_offsets = try_vec![0u32; length];
        for (dst, &src) in gather_offsets.iter_mut().zip(permutation.iter()) {
            *dst = src * COMPLEX_BYTES as u32;
        }

        let rotate_sign = match direction {
            FftDirection::Forward => [0.0f32, -0.0, 0.0, -0.0],
            FftDirection::Inverse => [-0.0f32, 0.0, -0.0, 0.0],
        };
        let root2 = 0.5f64.sqrt() as f32;
        let mut constants = [0f32; 32];
        constants[0..4].copy_from_slice(&rotate_sign);
        constants[4..8].copy_from_slice(&[root2; 4]);
        for (i, power) in [1usize, 3, 9].into_iter().enumerate() {
            let w: Complex<f32> = compute_twiddle(power, 16, direction);
            let base = 8 + i * 8;
            constants[base..base + 4].copy_from_slice(&[w.re; 4]);
            constants[base + 4..base + 8].copy_from_slice(&[-w.im, w.im, -w.im, w.im]);
        }

        Ok(JitTables {
            gather_offsets,
            constants,
        })
    }
}

/// Instruction words of the routine for `root`, reading twiddles laid out as `twiddles`.
pub(crate) fn generate(root: &DecompositionNode, twiddles: &TwiddleTable) -> Result<Vec<u32>, FftError> {
    let length = root.length();
    if length > MAX_JIT_LENGTH {
        return Err(FftError::UnsupportedSize(length));
    }
    if twiddles.vector_width() != 2 {
        return Err(FftError::EncodingViolation(format!(
            "combination loops consume twiddles in pairs, table groups {}",
            twiddles.vector_width()
        )));
    }

    let mut asm = Assembler::new();
    asm.prologue()?;
    for i in 0..8u8 {
        asm.ldr_q(VReg(24 + i), CONSTANTS, i as u64 * 16)?;
    }
    emit_leaf_pass(&mut asm, root.leaf(), length)?;
    for (level, step) in root.steps().iter().enumerate() {
        let offset = (twiddles.level_offset(level) * COMPLEX_BYTES) as u64;
        emit_combination_pass(&mut asm, step, length, offset)?;
    }
    asm.epilogue()?;
    Ok(asm.finish())
}

fn v(index: usize) -> VReg {
    VReg(index as u8)
}

/// `x *= -i` forward, `x *= i` inverse.
fn emit_rotate(asm: &mut Assembler, a: Arrangement, x: VReg) -> Result<(), FftError> {
    asm.rev64(a, x, x)?;
    asm.eor(a, x, x, ROTATE)
}

/// `x *= W8` (`third == false`) or `x *= W8³`, as a rotation and a scale by `sqrt(1/2)`.
fn emit_mul_w8(asm: &mut Assembler, x: VReg, third: bool) -> Result<(), FftError> {
    asm.rev64(D, T0, x)?;
    asm.eor(D, T0, T0, ROTATE)?;
    if third {
        asm.fsub(D, x, T0, x)?;
    } else {
        asm.fadd(D, x, T0, x)?;
    }
    asm.fmul(D, x, x, ROOT2)
}

/// `x *= c` for a constant held as broadcast real part and sign-paired imaginary part.
fn emit_mul_constant(asm: &mut Assembler, x: VReg, c: (VReg, VReg)) -> Result<(), FftError> {
    asm.rev64(D, T0, x)?;
    asm.fmul(D, x, x, c.0)?;
    asm.fmla(D, x, T0, c.1)
}

fn emit_bf4_prelude(asm: &mut Assembler, u: [VReg; 4]) -> Result<(), FftError> {
    asm.fadd(D, T0, u[0], u[2])?;
    asm.fsub(D, T1, u[0], u[2])?;
    asm.fadd(D, T2, u[1], u[3])?;
    asm.fsub(D, T3, u[1], u[3])?;
    emit_rotate(asm, D, T3)
}

fn emit_bf4_in_place(asm: &mut Assembler, u: [VReg; 4]) -> Result<(), FftError> {
    emit_bf4_prelude(asm, u)?;
    asm.fadd(D, u[0], T0, T2)?;
    asm.fadd(D, u[1], T1, T3)?;
    asm.fsub(D, u[2], T0, T2)?;
    asm.fsub(D, u[3], T1, T3)
}

fn emit_bf4_store(asm: &mut Assembler, u: [VReg; 4], slots: [usize; 4]) -> Result<(), FftError> {
    emit_bf4_prelude(asm, u)?;
    asm.fadd(D, T4, T0, T2)?;
    emit_store_slot(asm, T4, slots[0])?;
    asm.fadd(D, T4, T1, T3)?;
    emit_store_slot(asm, T4, slots[1])?;
    asm.fsub(D, T4, T0, T2)?;
    emit_store_slot(asm, T4, slots[2])?;
    asm.fsub(D, T4, T1, T3)?;
    emit_store_slot(asm, T4, slots[3])
}

fn emit_bf2_store(asm: &mut Assembler, a: VReg, b: VReg, slots: [usize; 2]) -> Result<(), FftError> {
    asm.fadd(D, T4, a, b)?;
    emit_store_slot(asm, T4, slots[0])?;
    asm.fsub(D, T4, a, b)?;
    emit_store_slot(asm, T4, slots[1])
}

fn emit_store_slot(asm: &mut Assembler, value: VReg, slot: usize) -> Result<(), FftError> {
    asm.str_d(value, OUT_CURSOR, (slot * COMPLEX_BYTES) as u64)
}

/// Leaf network over `v0..v{L-1}`, storing the block spectrum relative to the output cursor.
fn emit_leaf_body(asm: &mut Assembler, base: BaseSize) -> Result<(), FftError> {
    match base {
        BaseSize::Two => emit_bf2_store(asm, v(0), v(1), [0, 1]),
        BaseSize::Four => emit_bf4_store(asm, [v(0), v(1), v(2), v(3)], [0, 1, 2, 3]),
        BaseSize::Eight => {
            emit_bf4_in_place(asm, [v(0), v(2), v(4), v(6)])?;
            emit_bf4_in_place(asm, [v(1), v(3), v(5), v(7)])?;
            emit_mul_w8(asm, v(3), false)?;
            emit_rotate(asm, D, v(5))?;
            emit_mul_w8(asm, v(7), true)?;
            for k in 0..4 {
                emit_bf2_store(asm, v(2 * k), v(2 * k + 1), [k, k + 4])?;
            }
            Ok(())
        }
        BaseSize::Sixteen => {
            for n2 in 0..4 {
                emit_bf4_in_place(asm, [v(n2), v(n2 + 4), v(n2 + 8), v(n2 + 12)])?;
            }
            // u[n2 + 4·k1] *= W16^(n2·k1)
            emit_mul_constant(asm, v(5), W1)?;
            emit_mul_w8(asm, v(9), false)?;
            emit_mul_constant(asm, v(13), W3)?;
            emit_mul_w8(asm, v(6), false)?;
            emit_rotate(asm, D, v(10))?;
            emit_mul_w8(asm, v(14), true)?;
            emit_mul_constant(asm, v(7), W3)?;
            emit_mul_w8(asm, v(11), true)?;
            emit_mul_constant(asm, v(15), W9)?;
            for k1 in 0..4 {
                emit_bf4_store(
                    asm,
                    [v(4 * k1), v(4 * k1 + 1), v(4 * k1 + 2), v(4 * k1 + 3)],
                    [k1, k1 + 4, k1 + 8, k1 + 12],
                )?;
            }
            Ok(())
        }
    }
}

fn emit_leaf_pass(asm: &mut Assembler, base: BaseSize, length: usize) -> Result<(), FftError> {
    let leaf = base.length();
    asm.mov(GATHER_CURSOR, GATHER)?;
    asm.mov(OUT_CURSOR, OUTPUT)?;
    asm.mov_imm(BLOCKS, (length / leaf) as u64)?;
    let top = asm.label();
    for slot in 0..leaf {
        asm.ldr_w_post(GATHER_OFFSET, GATHER_CURSOR, 4)?;
        asm.ldr_d_indexed(v(slot), INPUT, GATHER_OFFSET)?;
    }
    emit_leaf_body(asm, base)?;
    asm.add_imm(OUT_CURSOR, OUT_CURSOR, (leaf * COMPLEX_BYTES) as u64)?;
    asm.subs_imm(BLOCKS, BLOCKS, 1)?;
    asm.b_cond(Condition::Ne, top)
}

/// `dst = x · w` over two complex lanes; `dst` and `tmp` must differ from both inputs.
fn emit_complex_mul(asm: &mut Assembler, dst: VReg, x: VReg, w: VReg, tmp: VReg) -> Result<(), FftError> {
    asm.fneg(Q, dst, w)?;
    asm.trn1(Q, tmp, w, w)?;
    asm.trn2(Q, dst, w, dst)?;
    asm.fmul(Q, dst, dst, x)?;
    asm.rev64(Q, dst, dst)?;
    asm.fmla(Q, dst, tmp, x)
}

/// One combination level. Each inner iteration handles two adjacent columns of one block.
fn emit_combination_pass(
    asm: &mut Assembler,
    step: &CombinationStep,
    length: usize,
    twiddle_offset: u64,
) -> Result<(), FftError> {
    let radix = step.radix();
    let columns = step.columns();
    let row_bytes = (columns * COMPLEX_BYTES) as u64;

    asm.mov_imm(SCRATCH, twiddle_offset)?;
    asm.add(LEVEL_TWIDDLES, TWIDDLES, SCRATCH)?;
    asm.mov(ROWS[0], OUTPUT)?;
    asm.mov_imm(GROUPS, (length / step.length) as u64)?;

    let outer = asm.label();
    asm.mov_imm(SCRATCH, row_bytes)?;
    for row in 1..radix {
        asm.add(ROWS[row], ROWS[row - 1], SCRATCH)?;
    }
    asm.mov(TWIDDLE_CURSOR, LEVEL_TWIDDLES)?;
    asm.mov_imm(COLUMNS, (columns / 2) as u64)?;

    let inner = asm.label();
    for row in 0..radix {
        asm.ldr_q(v(row), ROWS[row], 0)?;
    }
    if radix == 2 {
        asm.ldr_q_post(v(4), TWIDDLE_CURSOR, 16)?;
        emit_complex_mul(asm, v(6), v(1), v(4), v(5))?;
        asm.fadd(Q, T4, v(0), v(6))?;
        asm.str_q_post(T4, ROWS[0], 16)?;
        asm.fsub(Q, T4, v(0), v(6))?;
        asm.str_q_post(T4, ROWS[1], 16)?;
    } else {
        // b, c, d times W^k, W^2k, W^3k
        let scaled = [v(6), v(7), T0];
        for (j, dst) in scaled.iter().enumerate() {
            asm.ldr_q_post(v(4), TWIDDLE_CURSOR, 16)?;
            emit_complex_mul(asm, *dst, v(j + 1), v(4), v(5))?;
        }
        let [b, c, d] = scaled;
        asm.fadd(Q, T1, v(0), c)?;
        asm.fsub(Q, T2, v(0), c)?;
        asm.fadd(Q, T3, b, d)?;
        asm.fsub(Q, T4, b, d)?;
        emit_rotate(asm, Q, T4)?;
        asm.fadd(Q, T5, T1, T3)?;
        asm.str_q_post(T5, ROWS[0], 16)?;
        asm.fadd(Q, T5, T2, T4)?;
        asm.str_q_post(T5, ROWS[1], 16)?;
        asm.fsub(Q, T5, T1, T3)?;
        asm.str_q_post(T5, ROWS[2], 16)?;
        asm.fsub(Q, T5, T2, T4)?;
        asm.str_q_post(T5, ROWS[3], 16)?;
    }
    asm.subs_imm(COLUMNS, COLUMNS, 1)?;
    asm.b_cond(Condition::Ne, inner)?;

    // the last row ends where the next block starts
    asm.mov(ROWS[0], ROWS[radix - 1])?;
    asm.subs_imm(GROUPS, GROUPS, 1)?;
    asm.b_cond(Condition::Ne, outer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::CpuCapabilities;
    use crate::planner::plan;

    fn emit(length: usize, width: usize) -> Result<Vec<u32>, FftError> {
        let root = plan(length, CpuCapabilities::empty()).unwrap().root;
        let twiddles = TwiddleTable::generate(&root, FftDirection::Forward, width).unwrap();
        generate(&root, &twiddles)
    }

    #[test]
    fn test_routine_frame() {
        for length in [2usize, 16, 32, 1024] {
            let code = emit(length, 2).unwrap();
            assert_eq!(code[0], 0xA9BF_7BFD);
            assert_eq!(*code.last().unwrap(), 0xD65F_03C0);
        }
    }

    #[test]
    fn test_code_grows_with_levels() {
        let small = emit(16, 2).unwrap().len();
        let medium = emit(64, 2).unwrap().len();
        let large = emit(1024, 2).unwrap().len();
        assert!(small < medium && medium < large);
        // loops, not unrolled blocks
        assert!(emit(1 << 20, 2).unwrap().len() < 4 * large);
    }

    #[test]
    fn test_rejects_foreign_twiddle_grouping() {
        assert!(matches!(emit(64, 4), Err(FftError::EncodingViolation(_))));
    }

    #[test]
    fn test_tables() {
        let root = plan(32, CpuCapabilities::empty()).unwrap().root;
        let tables = JitTables::new(&root, FftDirection::Forward).unwrap();
        let permutation = root.input_permutation().unwrap();
        assert!(tables
            .gather_offsets
            .iter()
            .zip(permutation.iter())
            .all(|(&o, &p)| o == p * 8));
        assert_eq!(tables.constants[1].to_bits(), (-0f32).to_bits());
        let inverse = JitTables::new(&root, FftDirection::Inverse).unwrap();
        assert_eq!(inverse.constants[0].to_bits(), (-0f32).to_bits());
        assert_eq!(inverse.constants[12], -tables.constants[12]);
    }
}
