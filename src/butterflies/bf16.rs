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
use crate::butterflies::short_butterflies::FastButterfly4;
use crate::butterflies::util::boring_scalar_butterfly;
use crate::util::compute_twiddle;
use crate::FftDirection;
use num_complex::Complex;
use num_traits::{AsPrimitive, Float};

/// 16 point DFT as four 4 point columns, a twiddle grid, and four 4 point rows.
pub(crate) struct Butterfly16<T> {
    direction: FftDirection,
    root2: T,
    twiddle1: Complex<T>,
    twiddle3: Complex<T>,
    twiddle9: Complex<T>,
    bf4: FastButterfly4,
}

impl<T: Float + 'static> Butterfly16<T>
where
    f64: AsPrimitive<T>,
{
    pub(crate) fn new(fft_direction: FftDirection) -> Self {
        Butterfly16 {
            direction: fft_direction,
            root2: (0.5f64.sqrt()).as_(),
            twiddle1: compute_twiddle(1, 16, fft_direction),
            twiddle3: compute_twiddle(3, 16, fft_direction),
            twiddle9: compute_twiddle(9, 16, fft_direction),
            bf4: FastButterfly4::new(fft_direction),
        }
    }

    #[inline(always)]
    fn run(&self, chunk: &mut [Complex<T>; 16]) {
        let mut u = *chunk;

        for n2 in 0..4 {
            let (y0, y1, y2, y3) = self.bf4.butterfly4(u[n2], u[n2 + 4], u[n2 + 8], u[n2 + 12]);
            u[n2] = y0;
            u[n2 + 4] = y1;
            u[n2 + 8] = y2;
            u[n2 + 12] = y3;
        }

        // u[n2 + 4·k1] *= W16^(n2·k1)
        u[5] = u[5] * self.twiddle1;
        u[9] = (rotate_90(u[9], self.direction) + u[9]).scale(self.root2);
        u[13] = u[13] * self.twiddle3;
        u[6] = (rotate_90(u[6], self.direction) + u[6]).scale(self.root2);
        u[10] = rotate_90(u[10], self.direction);
        u[14] = (rotate_90(u[14], self.direction) - u[14]).scale(self.root2);
        u[7] = u[7] * self.twiddle3;
        u[11] = (rotate_90(u[11], self.direction) - u[11]).scale(self.root2);
        u[15] = u[15] * self.twiddle9;

        for k1 in 0..4 {
            let (y0, y1, y2, y3) = self.bf4.butterfly4(
                u[4 * k1],
                u[4 * k1 + 1],
                u[4 * k1 + 2],
                u[4 * k1 + 3],
            );
            chunk[k1] = y0;
            chunk[k1 + 4] = y1;
            chunk[k1 + 8] = y2;
            chunk[k1 + 12] = y3;
        }
    }
}

boring_scalar_butterfly!(Butterfly16, 16);
