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
use crate::err::try_vec;
use crate::planner::{CombinationStep, DecompositionNode};
use crate::util::compute_twiddle;
use crate::{FftDirection, FftError};
use num_complex::Complex;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct TwiddleLevel {
    offset: usize,
    step: CombinationStep,
}

/// Twiddle factors of every combination pass, lowest level first.
///
/// Within a level columns are grouped by `vector_width`; each group holds the
/// factors `W_M^{j·k}` for `j = 1..radix`, one run of `vector_width` columns per `j`.
#[derive(Debug, Clone)]
pub struct TwiddleTable {
    values: Vec<Complex<f32>>,
    levels: Vec<TwiddleLevel>,
    vector_width: usize,
}

impl TwiddleTable {
    pub(crate) fn generate(
        root: &DecompositionNode,
        direction: FftDirection,
        vector_width: usize,
    ) -> Result<TwiddleTable, FftError> {
        let steps = root.steps();
        let total = steps
            .iter()
            .map(|step| step.columns() * (step.radix() - 1))
            .sum::<usize>();
        let mut values = try_vec![Complex::<f32>::default(); total];
        let mut levels = Vec::with_capacity(steps.len());

        let mut offset = 0usize;
        for step in steps.iter() {
            let radix = step.radix();
            let level = &mut values[offset..offset + step.columns() * (radix - 1)];
            let mut dst = level.iter_mut();
            for group in (0..step.columns()).step_by(vector_width) {
                for j in 1..radix {
                    for column in group..group + vector_width {
                        if let Some(v) = dst.next() {
                            *v = compute_twiddle(column * j, step.length, direction);
                        }
                    }
                }
            }
            levels.push(TwiddleLevel {
                offset,
                step: *step,
            });
            offset += step.columns() * (radix - 1);
        }

        Ok(TwiddleTable {
            values,
            levels,
            vector_width,
        })
    }

    /// Number of (level, index) pairs.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn levels(&self) -> usize {
        self.levels.len()
    }

    pub(crate) fn level(&self, level: usize) -> &[Complex<f32>] {
        let lv = self.levels[level];
        let count = lv.step.columns() * (lv.step.radix() - 1);
        &self.values[lv.offset..lv.offset + count]
    }

    /// Offset of `level` in complex elements from the start of the table.
    pub(crate) fn level_offset(&self, level: usize) -> usize {
        self.levels[level].offset
    }

    /// Factor applied to column `column` of child `j` on `level`.
    pub fn get(&self, level: usize, column: usize, j: usize) -> Complex<f32> {
        let lv = self.levels[level];
        let width = self.vector_width;
        let group = column / width;
        let index = group * width * (lv.step.radix() - 1) + (j - 1) * width + column % width;
        self.values[lv.offset + index]
    }

    /// Columns per twiddle group.
    pub fn vector_width(&self) -> usize {
        self.vector_width
    }

    pub(crate) fn as_slice(&self) -> &[Complex<f32>] {
        &self.values
    }
}
