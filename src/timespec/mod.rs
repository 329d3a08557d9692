//! Time expression parsing and resolution
//!
//! Range boundaries are given as small expressions combining at most one
//! component of each kind, in any order:
//!
//! ```text
//! [DATE] [TIME] [OFFSET]
//! ```
//!
//! # Components
//!
//! - weekday: `Mon` .. `Sun` — the most recent such day
//! - date: `Sep 29` — that day in the current year
//! - word: `now`, `today`, `start` (earliest representable instant),
//!   `end` (latest representable day)
//! - time: `10:00` or `10:00:30` — on the resolved date, today if none
//! - offset: `+1h`, `-3d`, ... — units `s`/`sec`, `m`/`min`, `h`/`hours`,
//!   `d`/`days`, `w`/`weeks`, `mo`/`months`, `y`/`years`
//!
//! # Examples
//!
//! ```text
//! Sun 10:00        most recent Sunday, 10:00
//! Sep 29           September 29 of the current year, midnight
//! today +1h        01:00 today
//! now -30min       half an hour ago
//! +1h              as an end boundary: one hour past the start boundary
//! ```

pub mod error;
pub mod resolver;
pub mod tokenizer;

pub use error::TimespecError;
pub use resolver::{YEAR_MAX, YEAR_MIN, resolve};
pub use tokenizer::{Components, tokenize};
