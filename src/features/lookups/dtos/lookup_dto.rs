use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::artists::models::Artist;
use crate::features::lookups::models::{Contractor, LookupItem};

/// Response DTO for an id + name reference row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LookupItemDto {
    pub id: i32,
    pub name: String,
}

impl From<LookupItem> for LookupItemDto {
    fn from(item: LookupItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
        }
    }
}

/// Response DTO for a contractor
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContractorDto {
    pub id: i32,
    pub name: String,
    pub is_archived: bool,
}

impl From<Contractor> for ContractorDto {
    fn from(c: Contractor) -> Self {
        Self {
            id: c.id,
            name: c.name,
            is_archived: c.is_archived,
        }
    }
}

/// Response DTO for an inspector
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArtistDto {
    pub id: i32,
    pub fio: String,
}

impl From<Artist> for ArtistDto {
    fn from(a: Artist) -> Self {
        Self { id: a.id, fio: a.fio }
    }
}

/// All dropdown contents in one response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListsResponseDto {
    pub artists: Vec<ArtistDto>,
    /// Non-archived contractors only
    pub contractors: Vec<ContractorDto>,
    pub day_types: Vec<LookupItemDto>,
    pub paid_statuses: Vec<LookupItemDto>,
    pub statuses_execution: Vec<LookupItemDto>,
    pub statuses_ks: Vec<LookupItemDto>,
    pub responsible_departments: Vec<LookupItemDto>,
}
