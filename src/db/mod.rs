pub mod assignments;
pub mod directory;
pub mod projects;
pub mod proposals;
pub mod tasks;
pub mod team_members;
