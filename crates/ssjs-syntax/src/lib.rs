//! Tree-sitter powered dialect checking for server-side script.
//!
//! The crate provides [`TreeSitterDialectEngine`], an implementation of
//! [`ssjs_core::DialectEngine`] that parses masked documents with the
//! JavaScript grammar and reports:
//!
//! - syntax errors, located at the ERROR or MISSING node
//! - constructs newer than ECMAScript 3 that the line rules do not already
//!   cover, such as template literals, classes and destructuring
//! - references to identifiers that are neither declared in the document nor
//!   provided by the runtime (warnings)
//!
//! # Example
//!
//! ```
//! use ssjs_core::DialectEngine;
//! use ssjs_syntax::TreeSitterDialectEngine;
//!
//! let engine = TreeSitterDialectEngine::new();
//! let findings = engine.check("var greeting = `hi`;\nWrite(greeting);")?;
//! assert_eq!(findings.len(), 1);
//! # Ok::<(), ssjs_core::EngineError>(())
//! ```

mod engine;
mod error;
mod globals;
mod legacy;
mod parser;
mod position;
mod undeclared;

pub use engine::TreeSitterDialectEngine;
pub use error::SyntaxError;
pub use globals::KnownGlobals;
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};

#[cfg(test)]
mod tests;
