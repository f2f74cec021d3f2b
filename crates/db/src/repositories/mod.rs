//! Repository layer: raw sqlx queries grouped per table.

pub mod university_repo;

pub use university_repo::UniversityRepo;
