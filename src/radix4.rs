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
use crate::butterflies::rotate_90;
use crate::kernels::CombinePass;
use crate::FftDirection;
use num_complex::Complex;
use num_traits::Float;
use std::marker::PhantomData;

/// Scalar radix 4 combination of four quarter-length spectra.
pub(crate) struct Radix4<T> {
    direction: FftDirection,
    phantom_data: PhantomData<T>,
}

impl<T> Radix4<T> {
    pub(crate) fn new(fft_direction: FftDirection) -> Self {
        Radix4 {
            direction: fft_direction,
            phantom_data: PhantomData,
        }
    }
}

impl<T: Float + Send + Sync> CombinePass<T> for Radix4<T> {
    fn execute(&self, data: &mut [Complex<T>], twiddles: &[Complex<T>], length: usize) {
        let quarter = length / 4;
        for block in data.chunks_exact_mut(length) {
            let (q0, rest) = block.split_at_mut(quarter);
            let (q1, rest) = rest.split_at_mut(quarter);
            let (q2, q3) = rest.split_at_mut(quarter);

            for (j, tw) in twiddles.chunks_exact(3).take(quarter).enumerate() {
                let a = q0[j];
                let b = q1[j] * tw[0];
                let c = q2[j] * tw[1];
                let d = q3[j] * tw[2];

                // radix-4 butterfly
                let t0 = a + c;
                let t1 = a - c;
                let t2 = b + d;
                let t3 = rotate_90(b - d, self.direction);

                q0[j] = t0 + t2;
                q1[j] = t1 + t3;
                q2[j] = t0 - t2;
                q3[j] = t1 - t3;
            }
        }
    }

    fn radix(&self) -> usize {
        4
    }
}
