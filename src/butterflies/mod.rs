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
use std::ops::Neg;

mod bf16;
mod bf2;
mod bf4;
mod bf8;
pub(crate) mod short_butterflies;
mod util;

pub(crate) use bf2::Butterfly2;
pub(crate) use bf4::Butterfly4;
pub(crate) use bf8::Butterfly8;
pub(crate) use bf16::Butterfly16;

/// Multiplies by `-i` for forward and by `i` for inverse.
#[inline(always)]
pub(crate) fn rotate_90<T: Copy + Neg<Output = T>>(
    value: Complex<T>,
    direction: FftDirection,
) -> Complex<T> {
    match direction {
        FftDirection::Forward => Complex {
            re: value.im,
            im: -value.re,
        },
        FftDirection::Inverse => Complex {
            re: -value.im,
            im: value.re,
        },
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::dft::{l2_error, random_signal, reference_dft};
    use crate::kernels::LeafButterfly;

    #[test]
    fn test_rotate_90() {
        let v = Complex::new(3f32, 5f32);
        assert_eq!(
            rotate_90(v, FftDirection::Forward),
            v * Complex::new(0., -1.)
        );
        assert_eq!(
            rotate_90(v, FftDirection::Inverse),
            v * Complex::new(0., 1.)
        );
    }

    pub(crate) fn check_leaf(kernel: &dyn LeafButterfly<f32>, direction: FftDirection) {
        let length = kernel.length();
        let blocks = 5;
        let input = random_signal(length * blocks);
        // reversed blocks exercise the gather
        let permutation = (0..blocks)
            .rev()
            .flat_map(|b| (0..length).map(move |t| (b * length + t) as u32))
            .collect::<Vec<_>>();
        let mut output = vec![Complex::<f32>::default(); input.len()];
        kernel.execute(&input, &permutation, &mut output);
        for (b, dst) in output.chunks_exact(length).enumerate() {
            let src_block = blocks - 1 - b;
            let reference = reference_dft(&input[src_block * length..(src_block + 1) * length], direction);
            let error = l2_error(dst, &reference);
            assert!(error < 1e-6, "leaf {length} {direction} error {error}");
        }
    }

    #[test]
    fn test_scalar_leaves() {
        for direction in [FftDirection::Forward, FftDirection::Inverse] {
            check_leaf(&Butterfly2::<f32>::new(direction), direction);
            check_leaf(&Butterfly4::<f32>::new(direction), direction);
            check_leaf(&Butterfly8::<f32>::new(direction), direction);
            check_leaf(&Butterfly16::<f32>::new(direction), direction);
        }
    }
}
