//! Route registration: descriptors, parameters and the frozen route table.

mod descriptor;
mod error;
mod params;
mod result;
mod table;

pub use descriptor::{FallbackPolicy, PageId, RenderMode, RouteDescriptor};
pub use error::RouteError;
pub use params::RouteParams;
pub use result::{PageProps, PageResult};
pub use table::{RouteTable, RouteTableBuilder};
