//! Request decorators that attach credentials before delegating.

mod url_param;

pub use url_param::UrlParam;
