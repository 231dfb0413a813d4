//! 服务层 - 服务器核心服务
//!
//! - [`HttpService`] - 路由组装、中间件与进程内调用

pub mod http;

pub use http::{HttpService, OneshotResult, build_app};
