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
#![cfg_attr(not(target_arch = "aarch64"), allow(dead_code))]
//! Runtime specialization: emits an AArch64 routine for one decomposition and maps it
//! executable. Generation runs on every host; only AArch64 hosts execute the result.
mod assembler;
mod codegen;
#[cfg(test)]
mod emulator;
mod memory;

pub(crate) use codegen::MAX_JIT_LENGTH;

#[cfg(target_arch = "aarch64")]
pub(crate) use routine::JitRoutine;

#[cfg(target_arch = "aarch64")]
mod routine {
    use super::codegen::{generate, JitTables};
    use super::memory::{ExecutableCode, WritableCode};
    use crate::planner::DecompositionNode;
    use crate::twiddles::TwiddleTable;
    use crate::{FftDirection, FftError};
    use num_complex::Complex;

    type TransformFn = unsafe extern "C" fn(
        input: *const Complex<f32>,
        output: *mut Complex<f32>,
        twiddles: *const Complex<f32>,
        gather_offsets: *const u32,
        constants: *const f32,
    );

    /// Machine code specialized to one length and direction, plus the tables it reads.
    pub(crate) struct JitRoutine {
        entry: TransformFn,
        tables: JitTables,
        length: usize,
        // keeps `entry` mapped
        code: ExecutableCode,
    }

    impl JitRoutine {
        pub(crate) fn compile(
            root: &DecompositionNode,
            direction: FftDirection,
            twiddles: &TwiddleTable,
        ) -> Result<JitRoutine, FftError> {
            let words = generate(root, twiddles)?;
            let tables = JitTables::new(root, direction)?;
            let code = WritableCode::new(&words)?.into_executable()?;
            tracing::trace!(
                length = root.length(),
                words = words.len(),
                bytes = code.len(),
                "emitted transform routine"
            );
            let entry = unsafe { std::mem::transmute::<*const u8, TransformFn>(code.as_ptr()) };
            Ok(JitRoutine {
                entry,
                tables,
                length: root.length(),
                code,
            })
        }

        /// `input` and `output` must hold exactly the compiled length; `twiddles` must be
        /// the table the routine was compiled against.
        pub(crate) fn execute(
            &self,
            input: &[Complex<f32>],
            output: &mut [Complex<f32>],
            twiddles: &TwiddleTable,
        ) {
            debug_assert_eq!(input.len(), self.length);
            debug_assert_eq!(output.len(), self.length);
            unsafe {
                (self.entry)(
                    input.as_ptr(),
                    output.as_mut_ptr(),
                    twiddles.as_slice().as_ptr(),
                    self.tables.gather_offsets.as_ptr(),
                    self.tables.constants.as_ptr(),
                );
            }
        }

        pub(crate) fn code_size(&self) -> usize {
            self.code.len()
        }
    }
}
