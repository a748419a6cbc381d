//! Tweening: easing table, scalar tweener and position tween.

pub mod easing;
pub mod position;
pub mod tweener;

pub use easing::{ParseTweenMethodError, TweenFunction, TweenMethod};
pub use position::TweenPosition;
pub use tweener::{TweenState, TweenStatus, Tweener};
