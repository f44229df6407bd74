//! Host module - capabilities the control requires from its environment.

mod host_traits;
mod mock_host;

pub use host_traits::AmountInputHost;
pub use mock_host::MockAmountInputHost;
