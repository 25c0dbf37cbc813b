pub mod cfg;
pub mod constant;
pub mod error;
pub mod logging;
pub mod product;
pub mod req;
pub mod route;
pub mod server;
pub mod svc;
pub mod utils;
