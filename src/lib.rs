#![allow(non_snake_case)]

// Ядро: ключи, записи, курсоры
pub mod keys;
pub mod record;
pub mod iterate; // src/iterate/{mod,cursor,views,consume}.rs
pub mod obj;     // src/obj/{mod,codec}.rs

// Преобразования записей
pub mod assign;
pub mod clone;

// Утилиты
pub mod range;

// Окружение: конфиг, метрики, CLI
pub mod config;
pub mod metrics;
pub mod cli;

// Удобные реэкспорты
pub use clone::Frozen;
pub use config::{ConfigBuilder, IterConfig};
pub use iterate::{entries, keys, values, Cursor, Entry, Spread, Traverse, Window};
pub use keys::{assert_key, is_key_of, try_key_of, Key};
pub use obj::Obj;
pub use record::Record;
