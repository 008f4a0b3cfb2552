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
use crate::avx::util::{_m128s_load_f32x2, _m128s_store_f32x2, _mm_rotate90_ps};
use num_complex::Complex;
use std::arch::x86_64::*;

mod bf16;
mod bf4;
mod bf8;

pub(crate) use bf4::AvxButterfly4;
pub(crate) use bf8::AvxButterfly8;
pub(crate) use bf16::AvxButterfly16;

#[inline]
#[target_feature(enable = "avx2", enable = "fma")]
pub(super) unsafe fn load_complex(input: &[Complex<f32>], index: u32) -> __m128 {
    debug_assert!((index as usize) < input.len());
    unsafe { _m128s_load_f32x2(input.get_unchecked(index as usize)) }
}

#[inline]
#[target_feature(enable = "avx2", enable = "fma")]
pub(super) unsafe fn store_complex(output: &mut [Complex<f32>], index: usize, value: __m128) {
    debug_assert!(index < output.len());
    unsafe { _m128s_store_f32x2(output.get_unchecked_mut(index), value) }
}

/// 4 point DFT on one complex in the low half of each register, natural order.
#[inline]
#[target_feature(enable = "avx2", enable = "fma")]
pub(super) unsafe fn bfh4_ps(
    a: __m128,
    b: __m128,
    c: __m128,
    d: __m128,
    rot_sign: __m128,
) -> (__m128, __m128, __m128, __m128) {
    let t0 = _mm_add_ps(a, c);
    let t1 = _mm_sub_ps(a, c);
    let t2 = _mm_add_ps(b, d);
    let t3 = unsafe { _mm_rotate90_ps(_mm_sub_ps(b, d), rot_sign) };
    (
        _mm_add_ps(t0, t2),
        _mm_add_ps(t1, t3),
        _mm_sub_ps(t0, t2),
        _mm_sub_ps(t1, t3),
    )
}

#[inline]
#[target_feature(enable = "avx2", enable = "fma")]
pub(super) unsafe fn mul_w8_ps(value: __m128, rot_sign: __m128, root2: __m128) -> __m128 {
    let rotated = unsafe { _mm_rotate90_ps(value, rot_sign) };
    _mm_mul_ps(_mm_add_ps(rotated, value), root2)
}

#[inline]
#[target_feature(enable = "avx2", enable = "fma")]
pub(super) unsafe fn mul_w8_3_ps(value: __m128, rot_sign: __m128, root2: __m128) -> __m128 {
    let rotated = unsafe { _mm_rotate90_ps(value, rot_sign) };
    _mm_mul_ps(_mm_sub_ps(rotated, value), root2)
}
