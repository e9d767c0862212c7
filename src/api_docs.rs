use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::authors::list_authors,
        api::authors::create_author,
        api::authors::get_author,
        api::authors::update_author,
        api::authors::delete_author,
        api::books::list_books,
        api::books::create_book,
        api::books::get_book,
        api::books::update_book,
        api::books::delete_book,
    ),
    tags(
        (name = "librarium", description = "Librarium API")
    )
)]
pub struct ApiDoc;
