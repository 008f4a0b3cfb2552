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
use crate::FftError;
use memmap2::{Mmap, MmapMut};

/// Freshly mapped read/write pages holding generated code that cannot run yet.
pub(crate) struct WritableCode {
    map: MmapMut,
    len: usize,
}

/// Read/execute pages; unmapped on drop.
pub(crate) struct ExecutableCode {
    map: Mmap,
    len: usize,
}

impl WritableCode {
    pub(crate) fn new(words: &[u32]) -> Result<WritableCode, FftError> {
        if words.is_empty() {
            return Err(FftError::AllocationFailure(
                "cannot map an empty routine".to_string(),
            ));
        }
        let len = words.len() * size_of::<u32>();
        let mut map = MmapMut::map_anon(len)
            .map_err(|e| FftError::AllocationFailure(format!("map {len} bytes: {e}")))?;
        for (dst, word) in map.chunks_exact_mut(4).zip(words.iter()) {
            dst.copy_from_slice(&word.to_le_bytes());
        }
        Ok(WritableCode { map, len })
    }

    /// Drops write access, adds execute access and synchronizes the instruction cache.
    pub(crate) fn into_executable(self) -> Result<ExecutableCode, FftError> {
        let len = self.len;
        let map = self
            .map
            .make_exec()
            .map_err(|e| FftError::AllocationFailure(format!("protect {len} bytes: {e}")))?;
        flush_instruction_cache(map.as_ptr(), len);
        Ok(ExecutableCode { map, len })
    }
}

impl ExecutableCode {
    pub(crate) fn as_ptr(&self) -> *const u8 {
        self.map.as_ptr()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub(crate) fn bytes(&self) -> &[u8] {
        &self.map[..self.len]
    }
}

#[cfg(target_arch = "aarch64")]
fn flush_instruction_cache(start: *const u8, len: usize) {
    use std::arch::asm;
    let ctr: u64;
    unsafe {
        asm!("mrs {0}, ctr_el0", out(reg) ctr, options(nomem, nostack, preserves_flags));
    }
    // both fields hold log2 of the line size in words
    let dcache_line = 4usize << ((ctr >> 16) & 0xF);
    let icache_line = 4usize << (ctr & 0xF);
    let begin = start as usize;
    let end = begin + len;

    let mut addr = begin & !(dcache_line - 1);
    while addr < end {
        unsafe {
            asm!("dc cvau, {0}", in(reg) addr, options(nostack, preserves_flags));
        }
        addr += dcache_line;
    }
    unsafe {
        asm!("dsb ish", options(nostack, preserves_flags));
    }
    let mut addr = begin & !(icache_line - 1);
    while addr < end {
        unsafe {
            asm!("ic ivau, {0}", in(reg) addr, options(nostack, preserves_flags));
        }
        addr += icache_line;
    }
    unsafe {
        asm!("dsb ish", "isb", options(nostack, preserves_flags));
    }
}

#[cfg(not(target_arch = "aarch64"))]
fn flush_instruction_cache(_: *const u8, _: usize) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_preserves_words() {
        let words = [0xD65F_03C0u32, 0xA9BF_7BFD, 0x1234_5678];
        let code = WritableCode::new(&words).unwrap().into_executable().unwrap();
        assert_eq!(code.len(), 12);
        assert_eq!(&code.bytes()[..4], &[0xC0, 0x03, 0x5F, 0xD6]);
        assert_eq!(&code.bytes()[8..], &0x1234_5678u32.to_le_bytes());
        assert!(!code.as_ptr().is_null());
    }

    #[test]
    fn test_empty_routine_is_rejected() {
        assert!(matches!(
            WritableCode::new(&[]),
            Err(FftError::AllocationFailure(_))
        ));
    }

    #[cfg(target_arch = "aarch64")]
    #[test]
    fn test_executes_return() {
        // mov x0, #42; ret
        let words = [0xD280_0540u32, 0xD65F_03C0];
        let code = WritableCode::new(&words).unwrap().into_executable().unwrap();
        let f: extern "C" fn() -> u64 = unsafe { std::mem::transmute(code.as_ptr()) };
        assert_eq!(f(), 42);
    }
}
