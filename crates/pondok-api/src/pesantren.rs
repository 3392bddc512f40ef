//! Handlers for `/pesantren` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/pesantren` | List all institutions |
//! | `POST`   | `/pesantren` | Body: [`NewPesantren`]; returns 201 |
//! | `GET`    | `/pesantren/:id` | Subject plus attribute records |
//! | `DELETE` | `/pesantren/:id` | Cascades to santri, scores, map |
//! | `PUT`    | `/pesantren/:id/atribut` | Upsert any subset of records |
//! | `PUT`    | `/pesantren/:id/lokasi` | Body: `GeoPoint` or `null` |
//! | `GET`    | `/pesantren/:id/skor` | Last stored score; 404 if none |
//! | `POST`   | `/pesantren/:id/skor` | Run the engine and persist |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pondok_core::{
  attributes::{PesantrenAttributes, PesantrenBundle},
  engine,
  score::PesantrenScore,
  store::RegistryStore,
  subject::{GeoPoint, NewPesantren, Pesantren},
};
use uuid::Uuid;

use crate::error::{ApiError, store_err};

/// `GET /pesantren`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Pesantren>>, ApiError>
where
  S: RegistryStore,
{
  let all = store.list_pesantren().await.map_err(store_err)?;
  Ok(Json(all))
}

/// `POST /pesantren`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewPesantren>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RegistryStore,
{
  let created = store.add_pesantren(body).await.map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /pesantren/:id` — the subject with its attribute records.
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<PesantrenBundle>, ApiError>
where
  S: RegistryStore,
{
  let bundle = store.load_pesantren_bundle(id).await.map_err(store_err)?;
  Ok(Json(bundle))
}

/// `DELETE /pesantren/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: RegistryStore,
{
  if store.delete_pesantren(id).await.map_err(store_err)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("subject {id} not found")))
  }
}

/// `PUT /pesantren/:id/atribut` — records present in the body are upserted,
/// absent ones are left untouched.
pub async fn put_atribut<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<PesantrenAttributes>,
) -> Result<StatusCode, ApiError>
where
  S: RegistryStore,
{
  store
    .put_pesantren_attributes(id, body)
    .await
    .map_err(store_err)?;
  Ok(StatusCode::NO_CONTENT)
}

/// `PUT /pesantren/:id/lokasi` — body is a `GeoPoint` or `null` to clear.
pub async fn put_lokasi<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<Option<GeoPoint>>,
) -> Result<StatusCode, ApiError>
where
  S: RegistryStore,
{
  if store.set_pesantren_lokasi(id, body).await.map_err(store_err)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("subject {id} not found")))
  }
}

/// `GET /pesantren/:id/skor`
pub async fn get_skor<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<PesantrenScore>, ApiError>
where
  S: RegistryStore,
{
  let score = store
    .get_pesantren_score(id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("no score computed for pesantren {id}"))
    })?;
  Ok(Json(score))
}

/// `POST /pesantren/:id/skor` — recompute and persist.
pub async fn hitung_skor<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<PesantrenScore>, ApiError>
where
  S: RegistryStore,
{
  let score = engine::compute_pesantren_score(store.as_ref(), id).await?;
  Ok(Json(score))
}
