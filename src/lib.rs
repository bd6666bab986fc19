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

//! `hammdist(a, b)`: Hamming distance between two 64-bit integers as a
//! SQLite scalar function.
//!
//! Register it on a connection you own with [`register`], or build with the
//! `loadable_extension` feature and `load_extension` the resulting library.

#[cfg(all(feature = "bundled", feature = "loadable_extension"))]
compile_error!("features `bundled` and `loadable_extension` are mutually exclusive");

pub mod distance;
#[cfg(feature = "loadable_extension")]
mod extension;
pub mod function;
pub mod popcount;

pub use distance::distance;
#[cfg(feature = "loadable_extension")]
pub use extension::sqlite3_hammdist_init;
pub use function::FUNCTION_ARITY;
pub use function::FUNCTION_NAME;
pub use function::RegisterOptions;
pub use function::register;
pub use function::register_with;
pub use popcount::Kernel;
pub use popcount::popcount;
