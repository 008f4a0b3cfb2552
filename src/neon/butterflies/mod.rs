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
use num_complex::Complex;
use std::arch::aarch64::*;

use crate::neon::util::vh_rotate90_f32;

mod bf16;
mod bf4;
mod bf8;

pub(crate) use bf4::NeonButterfly4;
pub(crate) use bf8::NeonButterfly8;
pub(crate) use bf16::NeonButterfly16;

#[inline(always)]
pub(super) unsafe fn load_complex(input: &[Complex<f32>], index: u32) -> float32x2_t {
    debug_assert!((index as usize) < input.len());
    unsafe { vld1_f32((input.get_unchecked(index as usize) as *const Complex<f32>).cast()) }
}

#[inline(always)]
pub(super) unsafe fn store_complex(output: &mut [Complex<f32>], index: usize, value: float32x2_t) {
    debug_assert!(index < output.len());
    unsafe { vst1_f32((output.get_unchecked_mut(index) as *mut Complex<f32>).cast(), value) }
}

/// 4 point DFT on one complex per D register, natural order.
#[inline(always)]
pub(super) unsafe fn bfh4_f32(
    a: float32x2_t,
    b: float32x2_t,
    c: float32x2_t,
    d: float32x2_t,
    rot_sign: float32x2_t,
) -> (float32x2_t, float32x2_t, float32x2_t, float32x2_t) {
    unsafe {
        let t0 = vadd_f32(a, c);
        let t1 = vsub_f32(a, c);
        let t2 = vadd_f32(b, d);
        let t3 = vh_rotate90_f32(vsub_f32(b, d), rot_sign);
        (
            vadd_f32(t0, t2),
            vadd_f32(t1, t3),
            vsub_f32(t0, t2),
            vsub_f32(t1, t3),
        )
    }
}

/// `value · W8` as a rotation plus a `sqrt(1/2)` scale.
#[inline(always)]
pub(super) unsafe fn vh_mul_w8_f32(value: float32x2_t, rot_sign: float32x2_t, root2: f32) -> float32x2_t {
    unsafe { vmul_n_f32(vadd_f32(vh_rotate90_f32(value, rot_sign), value), root2) }
}

/// `value · W8³`.
#[inline(always)]
pub(super) unsafe fn vh_mul_w8_3_f32(value: float32x2_t, rot_sign: float32x2_t, root2: f32) -> float32x2_t {
    unsafe { vmul_n_f32(vsub_f32(vh_rotate90_f32(value, rot_sign), value), root2) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::butterflies::tests::check_leaf;
    use crate::FftDirection;

    #[test]
    fn test_neon_leaves() {
        for direction in [FftDirection::Forward, FftDirection::Inverse] {
            check_leaf(&NeonButterfly4::new(direction), direction);
            check_leaf(&NeonButterfly8::new(direction), direction);
            check_leaf(&NeonButterfly16::new(direction), direction);
        }
    }
}
