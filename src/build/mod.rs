//! Build Module
//!
//! Decides whether a module interface must be rebuilt and runs the
//! compiler when it must.
//!
//! ## Modes
//! - Module unit: `foo` -> `g++ -std=c++20 -fmodule-mapper=|<self> -fmodules-ts -c foo.cpp`
//! - Header unit: `./foo.h` or `/usr/include/foo.h` ->
//!   `g++ ... -fmodules-ts -x c++-system-header <path>`
//!
//! Only one compiler runs at a time; every import finishes before the next
//! message is looked at.

mod invocation;
mod compiler;
mod dispatcher;

pub use invocation::{classify_module, BuildMode, Invocation};
pub use compiler::{Compiler, ProcessCompiler};
pub use dispatcher::BuildDispatcher;
