//! Output generation for harvested articles.
//!
//! # Submodules
//!
//! - [`json`]: Appends each day's records to a single JSON output file and
//!   reads them back
//!
//! # Output Layouts
//!
//! ```text
//! fragments (default)          jsonl
//! [                            {"title":"…","date":"…","url":"…","content":"…"}
//!     {                        {"title":"…","date":"…","url":"…","content":"…"}
//!         "title": "…",
//!         …
//!     }
//! ]
//! [
//!     …
//! ]
//! ```
//!
//! The fragment layout is a concatenation of independently valid JSON arrays,
//! one per harvested day, not a single JSON document.

pub mod json;
