pub mod apsan;
pub mod apsan_client;
