/// Convenience type for fallible operations whose errors are only reported, never matched on
pub type Result<T = ()> = anyhow::Result<T>;
