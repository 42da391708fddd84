pub mod assignments;
pub mod directory;
pub mod projects;
pub mod proposals;
pub mod tasks;
pub mod team_members;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Directory
        .route("/api/organizations", post(directory::create_organization))
        .route("/api/clients", post(directory::create_client))
        // Team members
        .route(
            "/api/team-members",
            get(team_members::list).post(team_members::create),
        )
        // Tasks
        .route("/api/tasks", post(tasks::create))
        .route("/api/tasks/{id}", get(tasks::get).put(tasks::update))
        // Assignments
        .route(
            "/api/tasks/{id}/assignments",
            get(assignments::list_by_task).post(assignments::create),
        )
        .route(
            "/api/tasks/{id}/assignments/summary",
            get(assignments::summary),
        )
        .route(
            "/api/assignments/{id}",
            put(assignments::update).delete(assignments::delete),
        )
        // Projects
        .route("/api/projects/{id}", get(projects::get))
        .route("/api/projects/{id}/tasks", get(projects::list_tasks))
        // Proposals
        .route("/api/admin/proposals", post(proposals::create))
        .route("/api/admin/proposals/{id}", get(proposals::get))
        .route("/api/admin/proposals/{id}/approve", put(proposals::approve))
        .route("/api/admin/proposals/{id}/convert", post(proposals::convert))
}
