pub mod clock;
pub mod config;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod process;

#[cfg(test)]
pub(crate) mod test_server;
