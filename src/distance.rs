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

use crate::popcount::popcount;

/// Number of bit positions where `a` and `b` differ, comparing the raw
/// two's-complement patterns. Always in `0..=64`.
#[inline]
pub fn distance(a: i64, b: i64) -> u32 {
    popcount((a ^ b) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [i64; 10] = [
        0,
        1,
        -1,
        5,
        3,
        i64::MIN,
        i64::MAX,
        0x0F0F_0F0F_0F0F_0F0F,
        -0x1234_5678_9ABC_DEF0,
        42,
    ];

    #[test]
    fn reference_vectors() {
        assert_eq!(distance(0, -1), 64);
        assert_eq!(distance(0, 0), 0);
        assert_eq!(distance(1, 0), 1);
        assert_eq!(distance(5, 3), 2);
        assert_eq!(distance(i64::MIN, 0), 1);
        assert_eq!(distance(i64::MIN, i64::MAX), 64);
    }

    #[test]
    fn identity_and_symmetry() {
        for &a in &SAMPLES {
            assert_eq!(distance(a, a), 0);
            for &b in &SAMPLES {
                assert_eq!(distance(a, b), distance(b, a));
                assert!(distance(a, b) <= 64);
            }
        }
    }

    #[test]
    fn triangle_inequality() {
        for &a in &SAMPLES {
            for &b in &SAMPLES {
                for &c in &SAMPLES {
                    assert!(
                        distance(a, b) <= distance(a, c) + distance(c, b),
                        "d({a}, {b}) > d({a}, {c}) + d({c}, {b})"
                    );
                }
            }
        }
    }

    #[test]
    fn negatives_use_full_width() {
        // -2 is all ones except bit 0.
        assert_eq!(distance(-2, 0), 63);
        assert_eq!(distance(-2, -1), 1);
    }
}
