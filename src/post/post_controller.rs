use crate::post::post_model::Post;
use crate::post::post_service::PostService;
use crate::utils::error::CustomError;
use actix_web::{HttpResponse, web};

pub async fn create_post(
    post_service: web::Data<PostService>,
    post: web::Json<Post>,
) -> Result<HttpResponse, CustomError> {
    let created = post_service.create_post(post.into_inner()).await?;

    Ok(HttpResponse::Created().json(created))
}

pub async fn get_posts(post_service: web::Data<PostService>) -> Result<HttpResponse, CustomError> {
    let posts = post_service.list_posts().await?;

    Ok(HttpResponse::Ok().json(posts))
}

pub async fn get_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    let post = post_service.get_post(&post_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(post))
}

pub async fn update_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
    post: web::Json<Post>,
) -> Result<HttpResponse, CustomError> {
    let post_id = post_id.into_inner();
    let updated = post_service
        .update_post(&post_id, post.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    post_service.delete_post(&post_id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
