//! Handlers for `/santri` endpoints.
//!
//! Mirror of the `/pesantren` surface, plus an optional `?pesantren_id=`
//! filter on the listing.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use pondok_core::{
  attributes::{SantriAttributes, SantriBundle},
  engine,
  score::SantriScore,
  store::RegistryStore,
  subject::{GeoPoint, NewSantri, Santri},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, store_err};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Restrict to santri of one pesantren.
  pub pesantren_id: Option<Uuid>,
}

/// `GET /santri[?pesantren_id=<id>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Santri>>, ApiError>
where
  S: RegistryStore,
{
  let all = store
    .list_santri(params.pesantren_id)
    .await
    .map_err(store_err)?;
  Ok(Json(all))
}

/// `POST /santri` — 404 when the referenced pesantren does not exist.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewSantri>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RegistryStore,
{
  let created = store.add_santri(body).await.map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /santri/:id` — the subject with its attribute records.
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SantriBundle>, ApiError>
where
  S: RegistryStore,
{
  let bundle = store.load_santri_bundle(id).await.map_err(store_err)?;
  Ok(Json(bundle))
}

/// `DELETE /santri/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: RegistryStore,
{
  if store.delete_santri(id).await.map_err(store_err)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("subject {id} not found")))
  }
}

/// `PUT /santri/:id/atribut`
pub async fn put_atribut<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<SantriAttributes>,
) -> Result<StatusCode, ApiError>
where
  S: RegistryStore,
{
  store
    .put_santri_attributes(id, body)
    .await
    .map_err(store_err)?;
  Ok(StatusCode::NO_CONTENT)
}

/// `PUT /santri/:id/lokasi` — body is a `GeoPoint` or `null` to clear.
pub async fn put_lokasi<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<Option<GeoPoint>>,
) -> Result<StatusCode, ApiError>
where
  S: RegistryStore,
{
  if store.set_santri_lokasi(id, body).await.map_err(store_err)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("subject {id} not found")))
  }
}

/// `GET /santri/:id/skor`
pub async fn get_skor<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SantriScore>, ApiError>
where
  S: RegistryStore,
{
  let score = store
    .get_santri_score(id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("no score computed for santri {id}"))
    })?;
  Ok(Json(score))
}

/// `POST /santri/:id/skor` — recompute and persist.
pub async fn hitung_skor<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SantriScore>, ApiError>
where
  S: RegistryStore,
{
  let score = engine::compute_santri_score(store.as_ref(), id).await?;
  Ok(Json(score))
}
