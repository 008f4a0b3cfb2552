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
use std::arch::x86_64::*;

#[inline(always)]
pub(crate) const fn shuffle(z: u32, y: u32, x: u32, w: u32) -> i32 {
    // Checked: we want to reinterpret the bits
    ((z << 6) | (y << 4) | (x << 2) | w) as i32
}

#[inline]
#[target_feature(enable = "avx", enable = "fma")]
pub(crate) unsafe fn _mm_fcmul_ps(a: __m128, b: __m128) -> __m128 {
    let temp1 = _mm_shuffle_ps::<0xA0>(b, b);
    let temp2 = _mm_shuffle_ps::<0xF5>(b, b);
    let mul2 = _mm_mul_ps(a, temp2);
    let mul2 = _mm_shuffle_ps::<0xB1>(mul2, mul2);
    _mm_fmaddsub_ps(a, temp1, mul2)
}

#[inline]
#[target_feature(enable = "avx", enable = "fma")]
pub(crate) unsafe fn _mm256_fcmul_ps(a: __m256, b: __m256) -> __m256 {
    // Extract real and imag parts from a
    let ar = _mm256_moveldup_ps(a); // duplicate even lanes (re parts)
    let ai = _mm256_movehdup_ps(a); // duplicate odd lanes (im parts)

    // Swap real/imag of b for cross terms
    let bswap = _mm256_permute_ps::<0b10110001>(b); // [im, re, im, re, ...]

    // re = ar*br - ai*bi
    // im = ar*bi + ai*br
    _mm256_fmaddsub_ps(ar, b, _mm256_mul_ps(ai, bswap))
}

#[inline]
#[target_feature(enable = "sse4.2")]
pub(crate) unsafe fn _m128s_load_f32x2(a: *const Complex<f32>) -> __m128 {
    unsafe { _mm_castsi128_ps(_mm_loadu_si64(a.cast())) }
}

#[inline]
#[target_feature(enable = "sse4.2")]
pub(crate) unsafe fn _m128s_store_f32x2(a: *mut Complex<f32>, b: __m128) {
    unsafe { _mm_storeu_si64(a.cast(), _mm_castps_si128(b)) }
}

/// Multiplies every complex lane by `∓i`, `sign` selects the direction.
#[inline]
#[target_feature(enable = "sse4.2")]
pub(crate) unsafe fn _mm_rotate90_ps(values: __m128, sign: __m128) -> __m128 {
    const SH: i32 = shuffle(2, 3, 0, 1);
    _mm_xor_ps(_mm_shuffle_ps::<SH>(values, values), sign)
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn _mm256_rotate90_ps(values: __m256, sign: __m256) -> __m256 {
    const SH: i32 = shuffle(2, 3, 0, 1);
    _mm256_xor_ps(_mm256_shuffle_ps::<SH>(values, values), sign)
}

pub(crate) fn rotate_sign(direction: crate::FftDirection) -> [f32; 8] {
    match direction {
        crate::FftDirection::Inverse => [-0.0f32, 0.0, -0.0, 0.0, -0.0, 0.0, -0.0, 0.0],
        crate::FftDirection::Forward => [0.0f32, -0.0, 0.0, -0.0, 0.0, -0.0, 0.0, -0.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fcmul() {
        if !(std::arch::is_x86_feature_detected!("avx2") && std::arch::is_x86_feature_detected!("fma")) {
            return;
        }
        let a = [Complex::new(1.5f32, -2.), Complex::new(0.25, 3.)];
        let b = [Complex::new(-0.5f32, 4.), Complex::new(2., 1.)];
        let mut dst = [Complex::<f32>::default(); 2];
        unsafe {
            let r = _mm_fcmul_ps(_mm_loadu_ps(a.as_ptr().cast()), _mm_loadu_ps(b.as_ptr().cast()));
            _mm_storeu_ps(dst.as_mut_ptr().cast(), r);
        }
        assert_eq!(dst[0], a[0] * b[0]);
        assert_eq!(dst[1], a[1] * b[1]);
    }
}
