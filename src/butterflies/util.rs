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

/// Implements [`crate::kernels::LeafButterfly`] for a scalar butterfly exposing
/// `run(&self, &mut [Complex<T>; N])`.
macro_rules! boring_scalar_butterfly {
    ($bf_name: ident, $size: expr) => {
        impl<T: Float + Send + Sync + 'static> crate::kernels::LeafButterfly<T> for $bf_name<T>
        where
            f64: AsPrimitive<T>,
        {
            fn execute(&self, input: &[Complex<T>], permutation: &[u32], output: &mut [Complex<T>]) {
                for (dst, indices) in output
                    .chunks_exact_mut($size)
                    .zip(permutation.chunks_exact($size))
                {
                    let mut chunk = [Complex::<T>::new(T::zero(), T::zero()); $size];
                    for (v, &index) in chunk.iter_mut().zip(indices.iter()) {
                        *v = input[index as usize];
                    }
                    self.run(&mut chunk);
                    dst.copy_from_slice(&chunk);
                }
            }

            fn length(&self) -> usize {
                $size
            }
        }
    };
}

pub(crate) use boring_scalar_butterfly;
