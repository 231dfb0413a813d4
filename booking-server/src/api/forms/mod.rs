//! 表单登记 API 模块
//!
//! 每个资源一个端点，成功返回 201 和保存后的记录。
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /register | POST | 登记旅行预订 |
//! | /contact | POST | 联系留言 |
//! | /hotel | POST | 酒店预订 |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/contact", post(handler::contact))
        .route("/hotel", post(handler::hotel))
}
