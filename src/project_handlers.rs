use actix_web::{web, HttpResponse, Responder};
use tracing::info;

use crate::models::CreateProjectRequest;
use crate::server::AppState;

// Handler to list all projects
pub async fn get_projects_handler(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.store.list_projects())
}

// Handler to create a project
pub async fn create_project_handler(
    data: web::Data<AppState>,
    request: web::Json<CreateProjectRequest>,
) -> impl Responder {
    let project = data.store.create_project(request.into_inner().name);
    info!("[PROJECT] created project_id={} | name={}", project.id, project.name);
    HttpResponse::Ok().json(project)
}

// Handler to get the message history of a project
pub async fn get_project_messages_handler(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let project_id = path.into_inner();
    HttpResponse::Ok().json(data.store.list_messages(&project_id))
}
