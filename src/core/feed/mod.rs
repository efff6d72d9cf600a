pub mod fetcher;
pub mod parser;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
