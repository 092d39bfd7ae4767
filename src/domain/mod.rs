pub mod driver;
pub mod error;
pub mod gateway;
pub mod id;
pub mod invoice;
pub mod money;
pub mod receipt;
pub mod redirect;
pub mod state;
