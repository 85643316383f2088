// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod column;
pub mod pagination;
pub mod search;
pub mod selection;
pub mod sort;
pub mod table;

pub use column::*;
pub use pagination::*;
pub use search::*;
pub use selection::*;
pub use sort::*;
pub use table::*;
