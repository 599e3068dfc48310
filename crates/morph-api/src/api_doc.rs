//! OpenAPI document assembly.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::handlers::convert::ConvertResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Morph API",
        description = "Stateless media conversion service"
    ),
    paths(
        handlers::health::health,
        handlers::convert::convert_file,
        handlers::download::download_file,
    ),
    components(schemas(ConvertResponse, ErrorResponse)),
    tags(
        (name = "health", description = "Liveness"),
        (name = "convert", description = "File conversion"),
        (name = "download", description = "Artifact download")
    )
)]
pub struct ApiDoc;
