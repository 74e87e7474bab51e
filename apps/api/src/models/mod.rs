// Row structs (sqlx::FromRow, column-shaped) and the API shapes built from
// them. Serialized-array columns (tags, photos, line_items, recipient_tags)
// stay TEXT in the rows and become typed Vecs in the API shapes via format.rs.

pub mod campaign;
pub mod customer;
pub mod inventory;
pub mod invoice;
pub mod job;
pub mod vehicle;
