//! Wire DTOs. The submit request body is the raw submission document itself
//! (validated against the declarative schema before deserialization), so
//! only responses need dedicated types.

pub mod responses;
