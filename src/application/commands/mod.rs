pub mod categories;
pub mod posts;

#[cfg(test)]
pub(crate) mod testing;

pub use categories::CategoryCommandService;
pub use posts::PostCommandService;
