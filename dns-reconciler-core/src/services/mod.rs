//! 业务逻辑服务层

mod reconcile_service;

pub use reconcile_service::Reconciler;
