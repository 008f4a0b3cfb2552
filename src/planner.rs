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
use crate::capabilities::CpuCapabilities;
use crate::err::try_vec;
use crate::util::compute_logarithm;
use crate::FftError;

/// Terminal transform sizes handled by a fully unrolled kernel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BaseSize {
    /// Degenerate leaf, one sum/difference pair.
    Two,
    Four,
    Eight,
    Sixteen,
}

impl BaseSize {
    pub const fn length(self) -> usize {
        match self {
            BaseSize::Two => 2,
            BaseSize::Four => 4,
            BaseSize::Eight => 8,
            BaseSize::Sixteen => 16,
        }
    }

    fn from_exponent(exponent: u32) -> Option<BaseSize> {
        match exponent {
            1 => Some(BaseSize::Two),
            2 => Some(BaseSize::Four),
            3 => Some(BaseSize::Eight),
            4 => Some(BaseSize::Sixteen),
            _ => None,
        }
    }
}

/// Combination kernel family. The first letter is the parity of the node's
/// exponent, the second the parity of its children's exponent.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KernelFamily {
    EE,
    EO,
    OE,
    OO,
}

impl KernelFamily {
    pub(crate) fn select(exponent: u32, child_exponent: u32) -> KernelFamily {
        match (exponent & 1, child_exponent & 1) {
            (0, 0) => KernelFamily::EE,
            (0, _) => KernelFamily::EO,
            (_, 0) => KernelFamily::OE,
            _ => KernelFamily::OO,
        }
    }

    /// Equal parities mean the node spans two halvings (radix 4), differing ones a single halving.
    pub const fn radix(self) -> usize {
        match self {
            KernelFamily::EE | KernelFamily::OO => 4,
            KernelFamily::EO | KernelFamily::OE => 2,
        }
    }
}

/// Instruction set the selected kernels target.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InstructionFamily {
    Scalar,
    Neon,
    AvxFma,
}

impl InstructionFamily {
    /// Widest family the snapshot and the enabled cargo features allow.
    pub fn select(capabilities: CpuCapabilities) -> InstructionFamily {
        if InstructionFamily::Neon.is_available(capabilities) {
            InstructionFamily::Neon
        } else if InstructionFamily::AvxFma.is_available(capabilities) {
            InstructionFamily::AvxFma
        } else {
            InstructionFamily::Scalar
        }
    }

    pub fn is_available(self, capabilities: CpuCapabilities) -> bool {
        match self {
            InstructionFamily::Scalar => true,
            InstructionFamily::Neon => {
                cfg!(all(target_arch = "aarch64", feature = "neon"))
                    && capabilities.contains(CpuCapabilities::NEON)
            }
            InstructionFamily::AvxFma => {
                cfg!(all(target_arch = "x86_64", feature = "avx"))
                    && capabilities.contains(CpuCapabilities::AVX2 | CpuCapabilities::FMA)
            }
        }
    }

    /// Complex values per vector register, which is also the twiddle grouping width.
    pub const fn vector_width(self) -> usize {
        match self {
            InstructionFamily::Scalar => 1,
            InstructionFamily::Neon => 2,
            InstructionFamily::AvxFma => 4,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub fn of(length: usize) -> SizeClass {
        if length <= 8 {
            SizeClass::Small
        } else if length <= 64 {
            SizeClass::Medium
        } else {
            SizeClass::Large
        }
    }
}

/// One recursion step of a power-of-two transform.
///
/// A `Combine` node of length `M` and radix `r` has `r` children of length `M / r`.
/// They all share one shape, so it is stored once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecompositionNode {
    Leaf(BaseSize),
    Combine {
        length: usize,
        family: KernelFamily,
        child: Box<DecompositionNode>,
    },
}

/// A combination pass as executed, children first.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct CombinationStep {
    pub(crate) family: KernelFamily,
    pub(crate) length: usize,
}

impl CombinationStep {
    pub(crate) fn radix(&self) -> usize {
        self.family.radix()
    }

    pub(crate) fn columns(&self) -> usize {
        self.length / self.family.radix()
    }
}

impl DecompositionNode {
    pub fn length(&self) -> usize {
        match self {
            DecompositionNode::Leaf(base) => base.length(),
            DecompositionNode::Combine { length, .. } => *length,
        }
    }

    /// Base case every path of the tree terminates on.
    pub fn leaf(&self) -> BaseSize {
        let mut node = self;
        loop {
            match node {
                DecompositionNode::Leaf(base) => return *base,
                DecompositionNode::Combine { child, .. } => node = child,
            }
        }
    }

    /// Families from the root down to the last level above the leaves.
    pub fn families(&self) -> Vec<KernelFamily> {
        let mut families = Vec::new();
        let mut node = self;
        while let DecompositionNode::Combine { family, child, .. } = node {
            families.push(*family);
            node = child;
        }
        families
    }

    pub(crate) fn steps(&self) -> Vec<CombinationStep> {
        let mut steps = Vec::new();
        let mut node = self;
        while let DecompositionNode::Combine {
            family,
            length,
            child,
        } = node
        {
            steps.push(CombinationStep {
                family: *family,
                length: *length,
            });
            node = child;
        }
        steps.reverse();
        steps
    }

    /// Input index feeding each output slot of the leaf pass.
    ///
    /// Leaves are laid out contiguously in the order the combination passes consume them,
    /// which makes this the mixed-radix digit reversal implied by the tree.
    pub(crate) fn input_permutation(&self) -> Result<Vec<u32>, FftError> {
        let length = self.length();
        let mut permutation = try_vec![0u32; length];
        let mut cursor = 0usize;
        gather_order(self, 0, 1, &mut permutation, &mut cursor);
        Ok(permutation)
    }
}

fn gather_order(
    node: &DecompositionNode,
    offset: usize,
    stride: usize,
    permutation: &mut [u32],
    cursor: &mut usize,
) {
    match node {
        DecompositionNode::Leaf(base) => {
            for t in 0..base.length() {
                permutation[*cursor] = (offset + t * stride) as u32;
                *cursor += 1;
            }
        }
        DecompositionNode::Combine { family, child, .. } => {
            let radix = family.radix();
            for j in 0..radix {
                gather_order(child, offset + j * stride, stride * radix, permutation, cursor);
            }
        }
    }
}

/// Result of planning: tree shape plus the instruction family its kernels target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    pub root: DecompositionNode,
    pub instruction_family: InstructionFamily,
}

/// Factors a power-of-two `length` into combination steps over base cases.
///
/// Radix 4 and radix 2 steps alternate with depth starting from radix 4 at the root,
/// so a composite transform always ends on 8 or 16 point leaves.
pub fn plan(length: usize, capabilities: CpuCapabilities) -> Result<Decomposition, FftError> {
    let exponent = match compute_logarithm(length) {
        Some(exponent) if exponent >= 1 && exponent < u32::BITS => exponent,
        _ => return Err(FftError::UnsupportedSize(length)),
    };
    Ok(Decomposition {
        root: decompose(exponent, 0),
        instruction_family: InstructionFamily::select(capabilities),
    })
}

fn decompose(exponent: u32, depth: u32) -> DecompositionNode {
    if let Some(base) = BaseSize::from_exponent(exponent) {
        return DecompositionNode::Leaf(base);
    }
    let child_exponent = if depth % 2 == 0 {
        exponent - 2
    } else {
        exponent - 1
    };
    DecompositionNode::Combine {
        length: 1 << exponent,
        family: KernelFamily::select(exponent, child_exponent),
        child: Box::new(decompose(child_exponent, depth + 1)),
    }
}
