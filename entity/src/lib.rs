//! SeaORM entities for the forkcache database.

pub mod prelude;

pub mod repository_cache;
