use utoipa::OpenApi;

use super::api::catalog::CatalogResponse;
use super::api::error::ErrorResponse;
use super::api::sky::SelectionResponse;
use super::api::tracking::{ObserverResponse, ObserverUpdate};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::sky::sky,
        super::api::sky::get_selection,
        super::api::sky::toggle_selection,
        super::api::catalog::get_catalog,
        super::api::catalog::reload_catalog,
        super::api::tracking::status,
        super::api::tracking::pause,
        super::api::tracking::resume,
        super::api::tracking::toggle,
        super::api::tracking::set_cutoffs,
        super::api::tracking::observer,
        super::api::tracking::set_observer,
    ),
    components(
        schemas(
            CatalogResponse,
            ErrorResponse,
            ObserverResponse,
            ObserverUpdate,
            crate::tracker::Cutoffs,
            SelectionResponse,
            crate::view::SkySnapshot,
            crate::view::SkyEntry,
            crate::view::SortKey,
            crate::view::Legend,
            crate::tracker::TrackedItem,
            crate::tracker::TrackingStatus,
            crate::catalog::ParseDiagnostics,
        )
    ),
    info(
        title = "sat-overhead API",
        description = "Live view of catalog objects above the observer",
        version = "0.1.0"
    ),
    tags(
        (name = "sky", description = "Visible objects and selection"),
        (name = "catalog", description = "TLE catalog"),
        (name = "tracking", description = "Tick loop and observer")
    )
)]
pub struct ApiDoc;
