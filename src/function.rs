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

use rusqlite::Connection;
use rusqlite::Error;
use rusqlite::Result;
use rusqlite::functions::Context;
use rusqlite::functions::FunctionFlags;
use rusqlite::types::ValueRef;

use crate::distance::distance;

pub const FUNCTION_NAME: &str = "hammdist";
pub const FUNCTION_ARITY: i32 = 2;

/// Flags declared to SQLite alongside the function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterOptions {
    /// Lets the planner factor calls out and allows use in index expressions.
    pub deterministic: bool,
    /// Allows use from triggers and views when `trusted_schema` is off.
    pub innocuous: bool,
}

impl Default for RegisterOptions {
    fn default() -> Self {
        Self {
            deterministic: true,
            innocuous: true,
        }
    }
}

impl RegisterOptions {
    pub fn flags(self) -> FunctionFlags {
        let mut flags = FunctionFlags::SQLITE_UTF8;
        if self.deterministic {
            flags |= FunctionFlags::SQLITE_DETERMINISTIC;
        }
        if self.innocuous {
            flags |= FunctionFlags::SQLITE_INNOCUOUS;
        }
        flags
    }
}

/// Registers `hammdist(a, b)` on `conn` with the default flags.
///
/// A NULL argument yields NULL rather than being read as 0.
pub fn register(conn: &Connection) -> Result<()> {
    register_with(conn, RegisterOptions::default())
}

/// Registers `hammdist(a, b)` on `conn`. SQLite's status is returned as is.
pub fn register_with(conn: &Connection, opts: RegisterOptions) -> Result<()> {
    conn.create_scalar_function(FUNCTION_NAME, FUNCTION_ARITY, opts.flags(), hammdist)
}

fn hammdist(ctx: &Context<'_>) -> Result<Option<i64>> {
    let a = operand(ctx, 0)?;
    let b = operand(ctx, 1)?;
    match (a, b) {
        (Some(a), Some(b)) => Ok(Some(i64::from(distance(a, b)))),
        _ => Ok(None),
    }
}

/// Reads an argument as an integer when SQLite holds it as one exactly:
/// INTEGER as is, REAL without a fractional part, or TEXT spelling either.
fn operand(ctx: &Context<'_>, idx: usize) -> Result<Option<i64>> {
    let value = ctx.get_raw(idx);
    let exact = match value {
        ValueRef::Null => return Ok(None),
        ValueRef::Integer(v) => Some(v),
        ValueRef::Real(v) => exact_integer(v),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().and_then(parse_integer),
        ValueRef::Blob(_) => None,
    };
    match exact {
        Some(v) => Ok(Some(v)),
        None => Err(Error::InvalidFunctionParameterType(idx, value.data_type())),
    }
}

fn exact_integer(v: f64) -> Option<i64> {
    // 2^63 is exactly representable; i64::MAX is not.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if v.is_finite() && v.fract() == 0.0 && (-LIMIT..LIMIT).contains(&v) {
        Some(v as i64)
    } else {
        None
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    trimmed.parse::<f64>().ok().and_then(exact_integer)
}
