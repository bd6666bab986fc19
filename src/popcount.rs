// Copyright 2026 Hammdist Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Counting set bits in a 64-bit word.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    /// POPCNT on x86_64, `cnt` on aarch64.
    Hardware,
    /// Mask-and-shift fallback.
    Software,
}

impl Kernel {
    pub fn as_str(self) -> &'static str {
        match self {
            Kernel::Hardware => "hardware",
            Kernel::Software => "software",
        }
    }
}

/// Kernel used by [`popcount`] on this CPU.
pub fn kernel() -> Kernel {
    if hardware_available() {
        Kernel::Hardware
    } else {
        Kernel::Software
    }
}

#[cfg(target_arch = "x86_64")]
fn hardware_available() -> bool {
    std::arch::is_x86_feature_detected!("popcnt")
}

#[cfg(target_arch = "aarch64")]
fn hardware_available() -> bool {
    true
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn hardware_available() -> bool {
    false
}

#[inline]
pub fn popcount(word: u64) -> u32 {
    match kernel() {
        Kernel::Hardware => hardware(word),
        Kernel::Software => swar(word),
    }
}

#[cfg(target_arch = "x86_64")]
#[inline]
fn hardware(word: u64) -> u32 {
    // SAFETY: `kernel` only selects this path after detecting POPCNT.
    unsafe { popcnt(word) }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "popcnt")]
unsafe fn popcnt(word: u64) -> u32 {
    word.count_ones()
}

#[cfg(not(target_arch = "x86_64"))]
#[inline]
fn hardware(word: u64) -> u32 {
    word.count_ones()
}

/// Portable bit count: pairs, nibbles, then a multiply to sum the bytes.
pub fn swar(word: u64) -> u32 {
    let mut x = word;
    x -= (x >> 1) & 0x5555_5555_5555_5555;
    x = (x & 0x3333_3333_3333_3333) + ((x >> 2) & 0x3333_3333_3333_3333);
    x = (x + (x >> 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    (x.wrapping_mul(0x0101_0101_0101_0101) >> 56) as u32
}
