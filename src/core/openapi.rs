use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::exports::{dtos as exports_dtos, handlers as exports_handlers};
use crate::features::lookups::{dtos as lookups_dtos, handlers as lookups_handlers};
use crate::features::statistics::{dtos as statistics_dtos, handlers as statistics_handlers};
use crate::features::supervisions::{dtos as supervisions_dtos, handlers as supervisions_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        auth::handlers::check,
        auth::handlers::logout,
        // Lists
        lookups_handlers::get_lists,
        // Supervisions
        supervisions_handlers::list_supervisions,
        supervisions_handlers::get_supervision,
        supervisions_handlers::create_supervision,
        supervisions_handlers::update_supervision,
        supervisions_handlers::delete_supervision,
        supervisions_handlers::take_in_ks,
        // Exports
        exports_handlers::excel_load,
        // Statistics
        statistics_handlers::supervisions_count_info,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::LoginRequestDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::CurrentUserDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::CurrentUserDto>,
            // Lists
            lookups_dtos::LookupItemDto,
            lookups_dtos::ContractorDto,
            lookups_dtos::ArtistDto,
            lookups_dtos::ListsResponseDto,
            ApiResponse<lookups_dtos::ListsResponseDto>,
            // Supervisions
            supervisions_dtos::SortKey,
            supervisions_dtos::SortDirection,
            supervisions_dtos::SupervisionResponseDto,
            supervisions_dtos::CreateSupervisionDto,
            supervisions_dtos::UpdateSupervisionDto,
            supervisions_dtos::TakeInKsDto,
            supervisions_dtos::TakeInKsResponseDto,
            ApiResponse<supervisions_dtos::SupervisionResponseDto>,
            ApiResponse<Vec<supervisions_dtos::SupervisionResponseDto>>,
            ApiResponse<supervisions_dtos::TakeInKsResponseDto>,
            // Exports
            exports_dtos::LoadType,
            // Statistics
            statistics_dtos::CountsDto,
            statistics_dtos::CountInfoResponseDto,
            ApiResponse<statistics_dtos::CountInfoResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Login gate and access token check"),
        (name = "lists", description = "Reference table contents for dropdowns"),
        (name = "supervisions", description = "Technical supervision records"),
        (name = "exports", description = "Spreadsheet export of supervisions"),
        (name = "statistics", description = "Yearly and monthly supervision counts"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Technical Supervision API",
        version = "0.1.0",
        description = "API documentation for technical supervision records",
    )
)]
pub struct ApiDoc;

/// Security scheme for the access token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/auth",
            "/api/lists",
            "/api/supervisions",
            "/api/supervisions/{id}",
            "/api/take_in_ks",
            "/api/excel_load",
            "/api/supervisions_count_info",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{}", path);
        }

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
