//! University, college, and department catalog repositories.

pub mod college;
pub mod department;
pub mod university;
