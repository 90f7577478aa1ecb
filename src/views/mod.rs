pub mod detail;
pub mod list;

#[cfg(test)]
pub(crate) mod fake;
