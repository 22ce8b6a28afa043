//! PKV: a minimalistic persistent key-value store.
//!
//! The whole store lives in a single YAML file. Every mutation re-reads the
//! file, applies one change to the decoded mapping and rewrites the file in
//! full, all while holding the store's exclusive lock. Nothing is cached
//! between calls, so the file is always the source of truth.
//!
//! # Basic Usage
//!
//! ```no_run
//! use pkv::{db::Store, value::Value};
//!
//! let store = Store::open_path("/tmp/pkv-doc.db").expect("failed to open store");
//!
//! store.set("name", "Alice").expect("failed to set");
//! store.set("age", 30).expect("failed to set");
//!
//! assert_eq!(store.get("name").unwrap(), Some(Value::from("Alice")));
//! assert_eq!(store.erase("age").unwrap(), Some(Value::Int(30)));
//! assert_eq!(store.get("age").unwrap(), None);
//! ```

mod codec;
mod fio;

pub mod db;
pub mod errors;
pub mod option;
pub mod util;
pub mod value;
