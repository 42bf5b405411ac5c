//! Listing handlers: public search and detail, owner-scoped mutations.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use estately_core::error::AppError;
use estately_core::types::pagination::PageResponse;
use estately_entity::listing::{Listing, ListingWithSeller};
use estately_service::listing::{ImageUpload, ListingDraft};

use crate::dto::request::SaveListingRequest;
use crate::dto::response::OkResponse;
use crate::extractors::{AuthUser, ListingQueryParams};
use crate::state::AppState;

/// GET /properties
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListingQueryParams>,
) -> Result<Json<PageResponse<Listing>>, AppError> {
    let (filter, sort, page) = params.parse()?;
    let result = state.listing_service.search(&filter, &sort, &page).await?;
    Ok(Json(result))
}

/// GET /properties/mine/all
pub async fn mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Listing>>, AppError> {
    let listings = state.listing_service.mine(&auth).await?;
    Ok(Json(listings))
}

/// GET /properties/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ListingWithSeller>, AppError> {
    let listing = state.listing_service.get(id).await?;
    Ok(Json(listing))
}

/// POST /properties (multipart form)
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Listing>), AppError> {
    let (draft, images) = read_listing_form(multipart).await?;
    let listing = state.listing_service.create(&auth, draft, images).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// PUT /properties/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SaveListingRequest>,
) -> Result<Json<Listing>, AppError> {
    let listing = state
        .listing_service
        .update(&auth, id, req.into_draft())
        .await?;
    Ok(Json(listing))
}

/// DELETE /properties/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<OkResponse>, AppError> {
    state.listing_service.delete(&auth, id).await?;
    Ok(Json(OkResponse::ok()))
}

/// Walk the multipart form and split it into the text draft and the
/// image files. Field names mirror the JSON shape (`price.amount`,
/// `location.city`); `features` and `images` repeat.
async fn read_listing_form(
    mut multipart: Multipart,
) -> Result<(ListingDraft, Vec<ImageUpload>), AppError> {
    let mut draft = ListingDraft::default();
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "images" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Failed to read image: {e}")))?;
            images.push(ImageUpload { filename, data });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::validation(format!("Failed to read field '{name}': {e}")))?;

        match name.as_str() {
            "title" => draft.title = Some(value),
            "description" => draft.description = Some(value),
            "listingType" => draft.listing_type = Some(value),
            "price.amount" => draft.price_amount = Some(value),
            "price.unit" => draft.price_unit = Some(value),
            "location.district" => draft.district = Some(value),
            "location.city" => draft.city = Some(value),
            "location.locality" => draft.locality = Some(value),
            "googleMapsLink" => draft.google_maps_link = Some(value),
            "sizeSqft" => draft.size_sqft = Some(value),
            "propertyType" => draft.property_type = Some(value),
            "features" => draft.features.push(value),
            // unknown fields are ignored
            _ => {}
        }
    }

    Ok((draft, images))
}
