//! C ABI for host applications.
//!
//! A single process-wide [`SwipeEngine`] backs these functions. Load calls
//! return the word count, or `-1` on failure. `swipe_engine_predict` returns
//! a JSON string the caller must release with `swipe_engine_free_string`, or
//! null when decoding failed.

use crate::SwipeEngine;
use std::ffi::{c_char, CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;
use std::sync::OnceLock;
use tracing::error;

static ENGINE: OnceLock<SwipeEngine> = OnceLock::new();

fn engine() -> &'static SwipeEngine {
    ENGINE.get_or_init(SwipeEngine::new)
}

unsafe fn read_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    CStr::from_ptr(s).to_str().ok()
}

fn count_to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// # Safety
/// `path` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn swipe_engine_load_dictionary(path: *const c_char) -> i32 {
    let Some(path) = read_str(path) else {
        return -1;
    };
    let result = catch_unwind(|| engine().load_dictionary_from_path(path));
    match result {
        Ok(Ok(n)) => count_to_i32(n),
        Ok(Err(_)) => -1,
        Err(_) => {
            error!("Panic while loading dictionary from {:?}", path);
            -1
        }
    }
}

/// # Safety
/// `content` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn swipe_engine_load_dictionary_str(content: *const c_char) -> i32 {
    let Some(content) = read_str(content) else {
        return -1;
    };
    let result = catch_unwind(|| engine().load_dictionary(content));
    match result {
        Ok(Ok(n)) => count_to_i32(n),
        Ok(Err(_)) => -1,
        Err(_) => {
            error!("Panic while loading dictionary text");
            -1
        }
    }
}

#[no_mangle]
pub extern "C" fn swipe_engine_word_count() -> i32 {
    count_to_i32(engine().word_count())
}

/// # Safety
/// `input` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn swipe_engine_predict(input: *const c_char, limit: i32) -> *mut c_char {
    let Some(input) = read_str(input) else {
        return ptr::null_mut();
    };
    let result = catch_unwind(AssertUnwindSafe(|| {
        engine().predict_json(input, i64::from(limit))
    }));
    let json = match result {
        Ok(Ok(json)) => json,
        Ok(Err(_)) => return ptr::null_mut(),
        Err(_) => {
            error!("Panic in predict");
            return ptr::null_mut();
        }
    };
    match CString::new(json) {
        Ok(s) => s.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// # Safety
/// `s` must be null or a pointer previously returned by
/// `swipe_engine_predict` that has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn swipe_engine_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

#[no_mangle]
pub extern "C" fn swipe_engine_set_pop_weight(weight: f64) {
    engine().set_pop_weight(weight);
}
