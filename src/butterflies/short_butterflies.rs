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
use crate::butterflies::rotate_90;
use num_complex::Complex;
use num_traits::{AsPrimitive, Float};

#[derive(Copy, Clone)]
pub(crate) struct FastButterfly2;

impl FastButterfly2 {
    #[inline(always)]
    pub(crate) fn butterfly2<T: Float>(
        &self,
        u0: Complex<T>,
        u1: Complex<T>,
    ) -> (Complex<T>, Complex<T>) {
        (u0 + u1, u0 - u1)
    }
}

#[derive(Copy, Clone)]
pub(crate) struct FastButterfly4 {
    direction: FftDirection,
}

impl FastButterfly4 {
    pub(crate) fn new(fft_direction: FftDirection) -> Self {
        Self {
            direction: fft_direction,
        }
    }

    /// Natural order 4 point DFT.
    #[inline(always)]
    pub(crate) fn butterfly4<T: Float>(
        &self,
        a: Complex<T>,
        b: Complex<T>,
        c: Complex<T>,
        d: Complex<T>,
    ) -> (Complex<T>, Complex<T>, Complex<T>, Complex<T>) {
        let t0 = a + c;
        let t1 = a - c;
        let t2 = b + d;
        let t3 = rotate_90(b - d, self.direction);

        (t0 + t2, t1 + t3, t0 - t2, t1 - t3)
    }
}

/// 8 point DFT from two 4 point ones; the eighth-turn twiddles are a rotation
/// plus a scale by `sqrt(1/2)`.
#[derive(Copy, Clone)]
pub(crate) struct FastButterfly8<T> {
    direction: FftDirection,
    root2: T,
    bf4: FastButterfly4,
}

impl<T: Float + 'static> FastButterfly8<T>
where
    f64: AsPrimitive<T>,
{
    pub(crate) fn new(fft_direction: FftDirection) -> Self {
        FastButterfly8 {
            direction: fft_direction,
            root2: (0.5f64.sqrt()).as_(),
            bf4: FastButterfly4::new(fft_direction),
        }
    }

    #[inline(always)]
    pub(crate) fn exec(&self, u: [Complex<T>; 8]) -> [Complex<T>; 8] {
        let bf2 = FastButterfly2;

        let (u0, u2, u4, u6) = self.bf4.butterfly4(u[0], u[2], u[4], u[6]);
        let (u1, mut u3, mut u5, mut u7) = self.bf4.butterfly4(u[1], u[3], u[5], u[7]);

        u3 = (rotate_90(u3, self.direction) + u3).scale(self.root2);
        u5 = rotate_90(u5, self.direction);
        u7 = (rotate_90(u7, self.direction) - u7).scale(self.root2);

        let (u0, u1) = bf2.butterfly2(u0, u1);
        let (u2, u3) = bf2.butterfly2(u2, u3);
        let (u4, u5) = bf2.butterfly2(u4, u5);
        let (u6, u7) = bf2.butterfly2(u6, u7);

        [u0, u2, u4, u6, u1, u3, u5, u7]
    }
}
