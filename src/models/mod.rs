//! 数据模型模块
//! 账户、活动与报名记录，以及认证请求/响应

pub mod auth;
pub mod event;
pub mod registration;
pub mod user;
pub mod validation;
