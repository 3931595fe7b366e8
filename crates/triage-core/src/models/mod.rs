pub mod extraction;
pub mod gender;
pub mod patient;
pub mod verdict;
pub mod vitals;
