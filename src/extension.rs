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

//! Entry point SQLite calls from `load_extension('libhammdist')`.

use std::os::raw::c_char;
use std::os::raw::c_int;

use rusqlite::Connection;
use rusqlite::Result;
use rusqlite::ffi;

use crate::function::FUNCTION_NAME;
use crate::function::register;
use crate::popcount::kernel;

/// SQLite derives this symbol from the library file name.
///
/// # Safety
///
/// Must only be called by SQLite's extension loader with the arguments it
/// hands to every `sqlite3_*_init` routine.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sqlite3_hammdist_init(
    db: *mut ffi::sqlite3,
    pz_err_msg: *mut *mut c_char,
    p_api: *mut ffi::sqlite3_api_routines,
) -> c_int {
    unsafe { Connection::extension_init2(db, pz_err_msg, p_api, init) }
}

fn init(conn: Connection) -> Result<bool> {
    register(&conn)?;
    rusqlite::trace::log(
        ffi::SQLITE_NOTICE,
        &format!("{FUNCTION_NAME} registered ({} popcount)", kernel().as_str()),
    );
    Ok(false)
}
