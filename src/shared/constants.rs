/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Highest page number honoured; larger values are clamped
pub const MAX_PAGE: i64 = 1_000_000;
