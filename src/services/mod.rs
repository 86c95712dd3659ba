mod host_client;
pub(crate) use host_client::*;

mod session;
pub(crate) use session::*;
