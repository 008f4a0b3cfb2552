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
use crate::FftDirection;
use num_complex::Complex;
use num_traits::{AsPrimitive, Float};

/// Exponent `e` with `2^e == n`, or `None` when `n` is not a power of two.
#[inline]
pub(crate) fn compute_logarithm(n: usize) -> Option<u32> {
    if n.is_power_of_two() {
        Some(n.trailing_zeros())
    } else {
        None
    }
}

/// `e^(-2πi·index/fft_len)` for forward, its conjugate for inverse.
///
/// Evaluated in f64. The angle is reduced to the first quadrant and then turned by
/// whole quarter turns, so factors lying on an axis come out exact and every value
/// depends only on `(index mod fft_len, fft_len, direction)`.
pub(crate) fn compute_twiddle<T: Float + 'static>(
    index: usize,
    fft_len: usize,
    direction: FftDirection,
) -> Complex<T>
where
    f64: AsPrimitive<T>,
{
    let (v_cos, v_sin) = sincos_turn(index, fft_len);
    // e^(+iθ) = cos + i sin, forward negates the angle
    let result = Complex::<T> {
        re: v_cos.as_(),
        im: v_sin.as_(),
    };
    match direction {
        FftDirection::Forward => result.conj(),
        FftDirection::Inverse => result,
    }
}

/// `(cos θ, sin θ)` for `θ = 2π·index/fft_len`.
fn sincos_turn(index: usize, fft_len: usize) -> (f64, f64) {
    let index = index % fft_len;
    if fft_len % 4 != 0 {
        let angle = 2. * std::f64::consts::PI * index as f64 / fft_len as f64;
        let (s, c) = angle.sin_cos();
        // fft_len == 2 lands exactly on ±1
        return if 2 * index == fft_len {
            (-1., 0.)
        } else if index == 0 {
            (1., 0.)
        } else {
            (c, s)
        };
    }
    let quarter = fft_len / 4;
    let quadrant = index / quarter;
    let rem = index % quarter;
    let (c, s) = if rem == 0 {
        (1., 0.)
    } else {
        let angle = 2. * std::f64::consts::PI * rem as f64 / fft_len as f64;
        let (s, c) = angle.sin_cos();
        (c, s)
    };
    match quadrant {
        0 => (c, s),
        1 => (-s, c),
        2 => (-c, -s),
        _ => (s, -c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logarithm() {
        assert_eq!(compute_logarithm(1), Some(0));
        assert_eq!(compute_logarithm(2), Some(1));
        assert_eq!(compute_logarithm(4096), Some(12));
        assert_eq!(compute_logarithm(0), None);
        assert_eq!(compute_logarithm(12), None);
    }

    #[test]
    fn test_twiddle_axes_are_exact() {
        for len in [4usize, 8, 16, 64, 1024] {
            let w: Complex<f32> = compute_twiddle(len / 4, len, FftDirection::Forward);
            assert_eq!(w, Complex::new(0., -1.));
            let w: Complex<f32> = compute_twiddle(len / 4, len, FftDirection::Inverse);
            assert_eq!(w, Complex::new(0., 1.));
            let w: Complex<f32> = compute_twiddle(len / 2, len, FftDirection::Forward);
            assert_eq!(w, Complex::new(-1., 0.));
            let w: Complex<f32> = compute_twiddle(0, len, FftDirection::Forward);
            assert_eq!(w, Complex::new(1., 0.));
        }
        let w: Complex<f32> = compute_twiddle(1, 2, FftDirection::Inverse);
        assert_eq!(w, Complex::new(-1., 0.));
    }

    #[test]
    fn test_twiddle_matches_exponential() {
        for len in [2usize, 8, 32, 128, 4096] {
            for index in 0..len {
                let w: Complex<f64> = compute_twiddle(index, len, FftDirection::Forward);
                let angle = -2. * std::f64::consts::PI * index as f64 / len as f64;
                assert!((w.re - angle.cos()).abs() < 1e-12, "re at {index}/{len}");
                assert!((w.im - angle.sin()).abs() < 1e-12, "im at {index}/{len}");
                let inv: Complex<f64> = compute_twiddle(index, len, FftDirection::Inverse);
                assert_eq!(inv, w.conj());
            }
        }
    }
}
