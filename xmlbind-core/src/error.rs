// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Error taxonomy shared by the tree, the policies and the generic serializer.

use std::borrow::Cow;

use thiserror::Error;

/// Global flag to check if XMLBIND_PANIC_ON_ERROR environment variable is set at compile time.
/// Set XMLBIND_PANIC_ON_ERROR=1 at compile time to enable panic on error.
pub const PANIC_ON_ERROR: bool = option_env!("XMLBIND_PANIC_ON_ERROR").is_some();

/// Check if XMLBIND_PANIC_ON_ERROR environment variable is set.
#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// Error type for loading and saving values against a document tree.
///
/// # Always Use Static Constructor Functions
///
/// Do not construct the message-carrying variants directly; use
/// [`Error::configuration`], [`Error::format`], [`Error::tree`] and
/// [`Error::depth_exceed`]. They convert any `Into<Cow<'static, str>>` and
/// honour the panic switch below.
///
/// ```rust
/// use xmlbind_core::error::Error;
///
/// let err = Error::configuration("binding `hp` attached twice");
/// let err = Error::format(format!("cannot parse `{}` as an integer", "abc"));
/// ```
///
/// ## Debug Mode: XMLBIND_PANIC_ON_ERROR
///
/// Building with `XMLBIND_PANIC_ON_ERROR` set makes every constructor panic at
/// the exact location where the error is created:
///
/// ```bash
/// RUST_BACKTRACE=1 XMLBIND_PANIC_ON_ERROR=1 cargo test
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The binding schema itself is wrong: duplicate names, a policy used
    /// outside its materialization model, a constructor that cannot produce
    /// items. Always a programmer error.
    ///
    /// Do not construct this variant directly; use [`Error::configuration`] instead.
    #[error("configuration error: {0}")]
    Configuration(Cow<'static, str>),

    /// Text could not be converted to or from a value.
    ///
    /// Do not construct this variant directly; use [`Error::format`] instead.
    #[error("format error: {0}")]
    Format(Cow<'static, str>),

    /// The tree refused a structural operation, or markup could not be
    /// parsed or printed.
    ///
    /// Do not construct this variant directly; use [`Error::tree`] instead.
    #[error("tree error: {0}")]
    Tree(Cow<'static, str>),

    /// Maximum nesting depth exceeded.
    ///
    /// Do not construct this variant directly; use [`Error::depth_exceed`] instead.
    #[error("{0}")]
    DepthExceed(Cow<'static, str>),

    /// Reading or writing a document file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new [`Error::Configuration`] from a string or static message.
    ///
    /// If `XMLBIND_PANIC_ON_ERROR` environment variable is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn configuration<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::Configuration(s.into());
        if PANIC_ON_ERROR {
            panic!("XMLBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::Format`] from a string or static message.
    ///
    /// If `XMLBIND_PANIC_ON_ERROR` environment variable is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn format<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::Format(s.into());
        if PANIC_ON_ERROR {
            panic!("XMLBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::Tree`] from a string or static message.
    ///
    /// If `XMLBIND_PANIC_ON_ERROR` environment variable is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn tree<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::Tree(s.into());
        if PANIC_ON_ERROR {
            panic!("XMLBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::DepthExceed`] from a string or static message.
    ///
    /// If `XMLBIND_PANIC_ON_ERROR` environment variable is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn depth_exceed<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::DepthExceed(s.into());
        if PANIC_ON_ERROR {
            panic!("XMLBIND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Appends the name of `T` to a [`Error::Format`] message.
    ///
    /// Other variants are returned unchanged.
    ///
    /// ```
    /// use xmlbind_core::error::Error;
    ///
    /// let err = Error::enhance_format_error::<u8>(Error::format("cannot parse `300`"));
    /// assert_eq!(err.to_string(), "format error: cannot parse `300` (type: u8)");
    /// ```
    #[inline(never)]
    pub fn enhance_format_error<T: ?Sized + 'static>(err: Error) -> Error {
        if let Error::Format(s) = err {
            let mut msg = s.into_owned();
            msg.push_str(" (type: ");
            msg.push_str(std::any::type_name::<T>());
            msg.push(')');
            Error::format(msg)
        } else {
            err
        }
    }

    #[inline(always)]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    #[inline(always)]
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_))
    }

    #[inline(always)]
    pub fn is_tree(&self) -> bool {
        matches!(self, Error::Tree(_))
    }

    #[inline(always)]
    pub fn is_depth_exceed(&self) -> bool {
        matches!(self, Error::DepthExceed(_))
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// A bare literal becomes a [`Error::Format`]; any other expression is
/// returned as the error itself.
///
/// ```
/// use xmlbind_core::ensure;
/// use xmlbind_core::error::Error;
///
/// fn check_level(n: i32) -> Result<(), Error> {
///     ensure!(n > 0, "level must be positive");
///     ensure!(n < 100, Error::format(format!("level {} too large", n)));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal) => {
        if !$cond {
            return Err($crate::error::Error::format($msg));
        }
    };
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::error::Error::format(format!($fmt, $($arg)*)));
        }
    };
}

/// Returns early with a [`Error::Format`].
///
/// ```
/// use xmlbind_core::bail;
/// use xmlbind_core::error::Error;
///
/// fn reject(text: &str) -> Result<(), Error> {
///     bail!("unexpected `{}`", text);
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::format($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::format(format!($fmt, $($arg)*)))
    };
}

/// Returns early with a [`Error::Configuration`].
#[macro_export]
macro_rules! misconfigured {
    ($err:expr) => {
        return Err($crate::error::Error::configuration($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::configuration(format!($fmt, $($arg)*)))
    };
}
