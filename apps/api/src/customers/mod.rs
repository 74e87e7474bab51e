// Customer directory: contact info, tags, and the per-customer detail view.

pub mod handlers;
