pub mod assignment;
pub mod directory;
pub mod project;
pub mod proposal;
pub mod task;
pub mod team_member;

pub use assignment::{AssignmentSummary, AssignmentWithMember, TaskAssignment};
pub use directory::{Client, Organization};
pub use project::{Project, ProjectWithTasks};
pub use proposal::{Proposal, ProposalItem, ProposalStatus, ProposalWithItems};
pub use task::{Task, TaskPriority, TaskStatus, TaskView};
pub use team_member::{TeamMember, TeamRole};
