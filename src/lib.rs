//! stubclass — generate throwaway classes with stubbed methods.
//!
//! A [`Generator`] session declares methods (public/private/protected,
//! instance or class-level), their parameter shapes (required/optional/
//! keyword), and their return behavior (a fixed value, or a freshly random
//! value of a primitive kind). `build()` then materializes a real
//! [`GeneratedClass`] whose members enforce arity, keyword requirements and
//! visibility exactly like hand-written methods — wrong arity raises at call
//! time instead of silently absorbing arguments.
//!
//! ```
//! use stubclass::{generate, Args, Value};
//!
//! let class = generate(|g| {
//!     g.public_method("greet", |m| {
//!         m.required("name")?
//!             .optional("greeting", "Hello")?
//!             .keyword_required("format")?;
//!         m.returns(true);
//!         Ok(())
//!     })
//! })
//! .unwrap();
//!
//! let instance = class.instantiate();
//! let args = Args::new().pos("Alice").named("format", "json");
//! assert_eq!(instance.call("greet", args).unwrap(), Value::Bool(true));
//! ```
//!
//! There is no textual code generation anywhere: members are descriptor
//! sets, and a dispatch wrapper generated from the parameter list performs
//! the arity and keyword validation. A `Generator` and the classes it builds
//! are single-threaded; only the symbol intern table is shared process-wide.

mod config;
mod error;
mod generator;
mod ident;
mod param;
mod rng;
mod runtime;
mod symbol;
mod value;

pub use config::{MethodConfig, Visibility};
pub use error::Error;
pub use generator::{Generator, generate};
pub use ident::Ident;
pub use param::{Param, ParamKind};
pub use rng::{RANDOM_INT_BOUND, RANDOM_TOKEN_LEN, RandomSource, Xoshiro256StarStar};
pub use runtime::{Args, CallOrigin, GeneratedClass, Instance};
pub use symbol::Symbol;
pub use value::{TypeMarker, Value};
