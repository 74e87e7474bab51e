// Resale inventory: flip vehicles with derived profit/margin figures.

pub mod handlers;
pub mod margins;
pub mod pipeline;
