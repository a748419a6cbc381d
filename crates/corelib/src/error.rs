//! Core errors (renderer-agnostic).

use thiserror::Error;

use crate::ecs::Entity;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("entity {0} is not alive")]
    DeadEntity(Entity),
}

pub type CoreResult<T> = Result<T, CoreError>;
