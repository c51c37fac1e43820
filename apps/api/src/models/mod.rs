pub mod employee;
pub mod recruitment;
