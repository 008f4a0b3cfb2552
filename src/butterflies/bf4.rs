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
use crate::butterflies::short_butterflies::FastButterfly4;
use crate::butterflies::util::boring_scalar_butterfly;
use crate::FftDirection;
use num_complex::Complex;
use num_traits::{AsPrimitive, Float};
use std::marker::PhantomData;

pub(crate) struct Butterfly4<T> {
    bf4: FastButterfly4,
    phantom_data: PhantomData<T>,
}

impl<T> Butterfly4<T> {
    pub(crate) fn new(fft_direction: FftDirection) -> Self {
        Self {
            bf4: FastButterfly4::new(fft_direction),
            phantom_data: PhantomData,
        }
    }
}

impl<T: Float> Butterfly4<T> {
    #[inline(always)]
    fn run(&self, chunk: &mut [Complex<T>; 4]) {
        let (y0, y1, y2, y3) = self.bf4.butterfly4(chunk[0], chunk[1], chunk[2], chunk[3]);
        *chunk = [y0, y1, y2, y3];
    }
}

boring_scalar_butterfly!(Butterfly4, 4);
