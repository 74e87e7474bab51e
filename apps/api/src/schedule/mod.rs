// Weekly schedule board: Monday-start week math and day bucketing.

pub mod handlers;
pub mod week;
