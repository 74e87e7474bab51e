// Job pipeline: the seven-stage board plus the job CRUD surface.

pub mod handlers;
pub mod pipeline;
